//! Graphics support through `embedded-graphics`
//!
//! [`Pcd8544`] is a [`DrawTarget`] for [`BinaryColor`]: `On` darkens a pixel.
//! Drawing only updates the frame buffer and its dirty region; call
//! [`Pcd8544::flush`] to put the result on the glass.

use crate::color::Color;
use crate::driver::Pcd8544;
use display_interface::DisplayError;
use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};

impl<SPI, CE, DC, RST, const WIDTH: usize, const PAGES: usize> DrawTarget
    for Pcd8544<SPI, CE, DC, RST, WIDTH, PAGES>
{
    type Color = BinaryColor;
    type Error = DisplayError;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            // primitives may extend past the edge, clip instead of panicking
            if let Some((x, y)) = on_panel::<WIDTH, PAGES>(point) {
                self.frame.set_pixel(x, y, color.into());
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.frame.fill(Color::from(color));
        Ok(())
    }
}

impl<SPI, CE, DC, RST, const WIDTH: usize, const PAGES: usize> OriginDimensions
    for Pcd8544<SPI, CE, DC, RST, WIDTH, PAGES>
{
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, (PAGES * 8) as u32)
    }
}

// Checks if a point is inside the panel and narrows it to RAM coordinates
fn on_panel<const WIDTH: usize, const PAGES: usize>(p: Point) -> Option<(u8, u8)> {
    let x = usize::try_from(p.x).ok().filter(|&x| x < WIDTH)?;
    let y = usize::try_from(p.y).ok().filter(|&y| y < PAGES * 8)?;
    Some((x as u8, y as u8))
}
