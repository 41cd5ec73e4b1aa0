//! Driver for interacting with the PCD8544 display controller
pub use display_interface::DisplayError;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use crate::color::Color;
use crate::framebuffer::{DirtyRegion, FrameBuffer};
use crate::instruction;
use crate::interface::{accumulate, SpiDisplayInterface};

use log::{debug, trace, warn};

/// Bias applied by [`DEFAULT_INIT_SEQUENCE`]
pub const DEFAULT_BIAS: u8 = 4;
/// Operating voltage (contrast) applied by [`DEFAULT_INIT_SEQUENCE`]
pub const DEFAULT_CONTRAST: u8 = 50;
/// How long RES is held low during a hardware reset
pub const RESET_HOLD_MS: u16 = 500;

/// Default init sequence if none is provided
pub const DEFAULT_INIT_SEQUENCE: &[InitStep] = &[
    InitStep::Deselect,
    InitStep::HardReset {
        hold_ms: RESET_HOLD_MS,
    },
    InitStep::Bias(DEFAULT_BIAS),
    InitStep::Contrast(DEFAULT_CONTRAST),
    // normal video, see `instruction::display_control`
    InitStep::Inverted(true),
    InitStep::FullFlush,
];

/// Steps that an init sequence can contain.
///
/// Sequences are plain static arrays so a board crate can ship its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InitStep {
    /// Drive SCE high (bus idle)
    Deselect,
    /// Pulse RES low for `hold_ms`
    HardReset {
        /// Milliseconds RES stays low
        hold_ms: u16,
    },
    /// Block for the given number of milliseconds
    DelayMs(u16),
    /// Set the bias system (0..=7)
    Bias(u8),
    /// Set the operating voltage (0..=0x7F)
    Contrast(u8),
    /// Select the display mode, same polarity as [`Pcd8544::set_inverted`]
    Inverted(bool),
    /// Send a bare instruction byte
    Cmd(u8),
    /// Mark the whole buffer dirty and flush it
    FullFlush,
}

/// A PCD8544 panel with an off-device frame buffer.
///
/// `WIDTH` and `PAGES` default to the 84x48 Nokia 5110 glass. Pixel writes
/// only touch the buffer; [`flush`](Pcd8544::flush) sends the rectangle that
/// changed since the last successful flush.
pub struct Pcd8544<SPI, CE, DC, RST, const WIDTH: usize = 84, const PAGES: usize = 6> {
    interface: SpiDisplayInterface<SPI, CE, DC, RST>,
    pub(crate) frame: FrameBuffer<WIDTH, PAGES>,
    init_sequence: &'static [InitStep],
}

impl<SPI, CE, DC, RST> Pcd8544<SPI, CE, DC, RST> {
    /// Create the driver for the 84x48 panel from an SPI bus and the SCE,
    /// D/C and RES lines.
    ///
    /// Nothing is sent until [`init`](Self::init).
    pub fn new(spi: SPI, ce: CE, dc: DC, rst: RST) -> Self {
        Self::with_init_sequence(spi, ce, dc, rst, DEFAULT_INIT_SEQUENCE)
    }

    /// Create for the 84x48 panel with a custom init sequence
    pub fn with_init_sequence(
        spi: SPI,
        ce: CE,
        dc: DC,
        rst: RST,
        init_sequence: &'static [InitStep],
    ) -> Self {
        Self::with_geometry(spi, ce, dc, rst, init_sequence)
    }
}

impl<SPI, CE, DC, RST, const WIDTH: usize, const PAGES: usize>
    Pcd8544<SPI, CE, DC, RST, WIDTH, PAGES>
{
    /// Create for a `WIDTH` x `PAGES * 8` panel, e.g.
    /// `Pcd8544::<_, _, _, _, 48, 4>::with_geometry(..)`
    pub fn with_geometry(
        spi: SPI,
        ce: CE,
        dc: DC,
        rst: RST,
        init_sequence: &'static [InitStep],
    ) -> Self {
        debug!("creating new Pcd8544 instance ({}x{})", WIDTH, PAGES * 8);
        Self {
            interface: SpiDisplayInterface::new(spi, ce, dc, rst),
            frame: FrameBuffer::new(),
            init_sequence,
        }
    }

    /// Release the bus and lines
    pub fn release(self) -> (SPI, CE, DC, RST) {
        self.interface.release()
    }
}

impl<SPI, CE, DC, RST, const WIDTH: usize, const PAGES: usize>
    Pcd8544<SPI, CE, DC, RST, WIDTH, PAGES>
where
    SPI: SpiBus,
    CE: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Reset and configure the controller, then push the whole buffer.
    ///
    /// Every step of the init sequence is attempted even if an earlier one
    /// failed; the first error is returned.
    pub fn init(&mut self, delay: &mut impl DelayNs) -> Result<(), DisplayError> {
        debug!("initialising pcd8544");
        let mut result = Ok(());
        for step in self.init_sequence {
            debug!("init step: {:?}", step);
            let outcome = match *step {
                InitStep::Deselect => self.interface.deselect(),
                InitStep::HardReset { hold_ms } => {
                    self.interface.hard_reset(delay, u32::from(hold_ms))
                }
                InitStep::DelayMs(ms) => {
                    delay.delay_ms(u32::from(ms));
                    Ok(())
                }
                InitStep::Bias(bias) => self.set_bias(bias),
                InitStep::Contrast(contrast) => self.set_contrast(contrast),
                InitStep::Inverted(inverted) => self.set_inverted(inverted),
                InitStep::Cmd(c) => self.interface.cmd(c),
                InitStep::FullFlush => {
                    self.frame.mark_all_dirty();
                    self.flush()
                }
            };
            if let Err(ref e) = outcome {
                warn!("init step {:?} failed: {:?}", step, e);
            }
            accumulate(&mut result, outcome);
        }
        debug!("init sequence complete");
        result
    }

    /// Set the operating voltage (contrast), `0..=0x7F`.
    ///
    /// An out-of-range value returns `OutOfBoundsError` without sending
    /// anything.
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), DisplayError> {
        debug!("set_contrast: {}", contrast);
        let sequence = instruction::contrast(contrast)?;
        self.interface.cmds(&sequence)
    }

    /// Set the bias system, `0..=7`.
    ///
    /// An out-of-range value returns `OutOfBoundsError` without sending
    /// anything.
    pub fn set_bias(&mut self, bias: u8) -> Result<(), DisplayError> {
        debug!("set_bias: {}", bias);
        let sequence = instruction::bias(bias)?;
        self.interface.cmds(&sequence)
    }

    /// Select normal or inverse video.
    ///
    /// Note the historical polarity: `true` selects the controller's normal
    /// mode and `false` its inverse mode.
    pub fn set_inverted(&mut self, inverted: bool) -> Result<(), DisplayError> {
        debug!("set_inverted: {}", inverted);
        self.interface.cmd(instruction::display_control(inverted))
    }

    /// Send the dirty region to the controller.
    ///
    /// For every page the region touches this selects the page and the
    /// region's first column, writes the page's bytes for the region's column
    /// span in one transmission and resets the Y address. A clean buffer
    /// returns immediately without touching the bus. On failure the region is
    /// kept, so calling `flush` again resends the same bytes.
    pub fn flush(&mut self) -> Result<(), DisplayError> {
        let Some(region) = self.frame.dirty_region() else {
            return Ok(());
        };
        debug!(
            "flush: x {}-{}, y {}-{}",
            region.min_x, region.max_x, region.min_y, region.max_y
        );

        let mut result = Ok(());
        for page in region.pages() {
            trace!("flush page {} ({} bytes)", page, region.width());
            accumulate(
                &mut result,
                self.interface.cmd(instruction::set_y_address(page)),
            );
            accumulate(
                &mut result,
                self.interface.cmd(instruction::set_x_address(region.min_x)),
            );
            accumulate(
                &mut result,
                self.interface.data(self.frame.page_span(page, &region)),
            );
            accumulate(&mut result, self.interface.cmd(instruction::set_y_address(0)));
        }

        match result {
            Ok(()) => self.frame.mark_clean(),
            Err(ref e) => warn!("flush failed, keeping dirty region: {:?}", e),
        }
        result
    }

    /// Set a pixel in the buffer. Call [`flush`](Self::flush) to show it.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates lie outside the panel.
    pub fn set_pixel(&mut self, x: u8, y: u8, color: Color) {
        self.frame.set_pixel(x, y, color);
    }

    /// Read a pixel back from the buffer
    ///
    /// # Panics
    ///
    /// Panics if the coordinates lie outside the panel.
    pub fn get_pixel(&self, x: u8, y: u8) -> Color {
        self.frame.get_pixel(x, y)
    }

    /// Fill the buffer with `color`; the next flush sends the whole frame
    pub fn clear_buffer(&mut self, color: Color) {
        self.frame.fill(color);
    }

    /// Force the next flush to send the whole frame
    pub fn mark_all_dirty(&mut self) {
        self.frame.mark_all_dirty();
    }

    /// Whether the buffer holds changes the controller has not seen
    pub fn is_dirty(&self) -> bool {
        self.frame.is_dirty()
    }

    /// Rectangle the next flush will send
    pub fn dirty_region(&self) -> Option<DirtyRegion> {
        self.frame.dirty_region()
    }

    /// Page-ordered buffer bytes, `column + page * WIDTH`.
    ///
    /// Always [`FrameBuffer::LEN`] bytes long.
    pub fn buffer(&self) -> &[u8] {
        self.frame.as_bytes()
    }
}
