//! Off-device pixel buffer with dirty-rectangle tracking
//!
//! The buffer mirrors the controller's display RAM: `PAGES` horizontal
//! stripes of `WIDTH` bytes, each byte packing eight vertically stacked
//! pixels with bit 0 at the top of the page. Writes only touch memory; the
//! [`DirtyRegion`] remembers which rectangle has to be sent on the next
//! flush.
use core::ops::RangeInclusive;

use crate::color::Color;

/// Inclusive bounding box (in pixels) of everything written since the last
/// successful flush.
///
/// The box may be larger than the set of pixels that actually changed, but it
/// always contains all of them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirtyRegion {
    /// Leftmost column
    pub min_x: u8,
    /// Topmost row
    pub min_y: u8,
    /// Rightmost column
    pub max_x: u8,
    /// Bottom row
    pub max_y: u8,
}

impl DirtyRegion {
    /// Region covering a single pixel
    pub const fn point(x: u8, y: u8) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    /// Grow the region to the smallest rectangle that also covers `(x, y)`
    pub fn include(&mut self, x: u8, y: u8) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    /// Whether `(x, y)` lies inside the region
    pub fn contains(&self, x: u8, y: u8) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_y..=self.max_y).contains(&y)
    }

    /// Pages touched by the region, top to bottom
    pub fn pages(&self) -> RangeInclusive<u8> {
        (self.min_y / 8)..=(self.max_y / 8)
    }

    /// Number of columns sent per page
    pub fn width(&self) -> usize {
        usize::from(self.max_x - self.min_x) + 1
    }
}

/// Page-ordered 1bpp buffer for a `WIDTH` x `PAGES * 8` panel
pub struct FrameBuffer<const WIDTH: usize, const PAGES: usize> {
    pages: [[u8; WIDTH]; PAGES],
    dirty: Option<DirtyRegion>,
}

impl<const WIDTH: usize, const PAGES: usize> FrameBuffer<WIDTH, PAGES> {
    /// Height in pixels
    pub const HEIGHT: usize = PAGES * 8;

    /// Buffer length in bytes
    pub const LEN: usize = WIDTH * PAGES;

    // X addresses are 7 bits wide and Y addresses 3 bits wide.
    const GEOMETRY_OK: () = assert!(
        WIDTH > 0 && WIDTH <= 128 && PAGES > 0 && PAGES <= 8,
        "PCD8544 geometry must be 1..=128 columns and 1..=8 pages"
    );

    /// An all-white buffer, dirty over the whole frame so the first flush
    /// establishes a known state on the device.
    pub fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::GEOMETRY_OK;
        Self {
            pages: [[Color::White.get_byte_value(); WIDTH]; PAGES],
            dirty: Some(Self::full_region()),
        }
    }

    /// Region covering every pixel
    pub const fn full_region() -> DirtyRegion {
        DirtyRegion {
            min_x: 0,
            min_y: 0,
            max_x: (WIDTH - 1) as u8,
            max_y: (Self::HEIGHT - 1) as u8,
        }
    }

    /// Set a single pixel.
    ///
    /// # Panics
    ///
    /// Panics if `x >= WIDTH` or `y >= HEIGHT`.
    pub fn set_pixel(&mut self, x: u8, y: u8, color: Color) {
        let (page, column, bit) = Self::locate(x, y);
        let byte = &mut self.pages[page][column];
        if color.is_on() {
            *byte |= bit;
        } else {
            *byte &= !bit;
        }

        match self.dirty.as_mut() {
            Some(region) => region.include(x, y),
            None => self.dirty = Some(DirtyRegion::point(x, y)),
        }
    }

    /// Read a single pixel back from the buffer.
    ///
    /// # Panics
    ///
    /// Panics if `x >= WIDTH` or `y >= HEIGHT`.
    pub fn get_pixel(&self, x: u8, y: u8) -> Color {
        let (page, column, bit) = Self::locate(x, y);
        Color::from_bit(self.pages[page][column] & bit != 0)
    }

    /// Fill every pixel with `color` and mark the whole frame dirty
    pub fn fill(&mut self, color: Color) {
        let value = color.get_byte_value();
        for page in self.pages.iter_mut() {
            page.fill(value);
        }
        self.mark_all_dirty();
    }

    /// Force the next flush to send the whole frame
    pub fn mark_all_dirty(&mut self) {
        self.dirty = Some(Self::full_region());
    }

    /// Pending region, `None` when the device is up to date
    pub fn dirty_region(&self) -> Option<DirtyRegion> {
        self.dirty
    }

    /// Whether a flush has anything to send
    pub fn is_dirty(&self) -> bool {
        self.dirty.is_some()
    }

    pub(crate) fn mark_clean(&mut self) {
        self.dirty = None;
    }

    /// Bytes of `page` spanning the region's columns
    pub(crate) fn page_span(&self, page: u8, region: &DirtyRegion) -> &[u8] {
        &self.pages[usize::from(page)][usize::from(region.min_x)..=usize::from(region.max_x)]
    }

    /// The raw buffer, byte `column + page * WIDTH`
    pub fn as_bytes(&self) -> &[u8] {
        self.pages.as_flattened()
    }

    fn locate(x: u8, y: u8) -> (usize, usize, u8) {
        let (column, row) = (usize::from(x), usize::from(y));
        assert!(column < WIDTH, "x = {} out of range (width {})", x, WIDTH);
        assert!(
            row < Self::HEIGHT,
            "y = {} out of range (height {})",
            y,
            Self::HEIGHT
        );
        (row / 8, column, 1 << (row % 8))
    }
}

impl<const WIDTH: usize, const PAGES: usize> Default for FrameBuffer<WIDTH, PAGES> {
    fn default() -> Self {
        Self::new()
    }
}
