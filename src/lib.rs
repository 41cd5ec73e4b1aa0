//! PCD8544 LCD Driver
//!
//! Used in the 84x48 [Nokia 5110 / 3310 LCD](https://www.sparkfun.com/products/10168)
//! modules sold by SparkFun, Adafruit and many others.
//!
//! The driver keeps a copy of display RAM in memory. Pixel writes only touch
//! that copy and grow a dirty rectangle; [`flush`](driver::Pcd8544::flush)
//! then sends just the rectangle, one 8-pixel-tall page at a time, instead of
//! the full 504 byte frame.
//!
//! ## Architecture
//!
//! - **[`interface`]** frames bytes on the bus: D/C level, SCE low, write, SCE high
//! - **[`instruction`]** encodes the controller's instruction bytes
//! - **[`framebuffer`]** owns the pixel buffer and the dirty rectangle
//! - **[`driver`]** ties them together and runs the init sequence
//!
//! The bus is an `embedded-hal` [`SpiBus`](embedded_hal::spi::SpiBus), not an
//! `SpiDevice`: the driver toggles SCE itself around every transmission.
//!
//! ## Usage
//!
//! ```rust, ignore
//! use pcd8544::prelude::*;
//! use embedded_graphics::{prelude::*, primitives::*, pixelcolor::BinaryColor};
//!
//! let mut lcd = Pcd8544::new(spi, ce, dc, rst);
//! lcd.init(&mut delay)?;
//!
//! lcd.set_pixel(0, 0, Color::Black);
//! Circle::new(Point::new(30, 10), 20)
//!     .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
//!     .draw(&mut lcd)?;
//!
//! // only the rectangle around the pixel and the circle is sent
//! lcd.flush()?;
//! ```
//!
//! A failed `flush` keeps the dirty rectangle, so calling it again resends the
//! same bytes.
//!
#![cfg_attr(not(test), no_std)]
#![deny(missing_docs)]
#![allow(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

mod cmd;
pub mod color;
pub mod driver;
pub mod framebuffer;
#[cfg(feature = "graphics")]
pub mod graphics;
pub mod instruction;

mod flag;

/// Width of the reference panel in pixels
pub const WIDTH: usize = 84;

/// Height of the reference panel in pixels
pub const HEIGHT: usize = 48;

/// Frame buffer size of the reference panel in bytes
pub const BUFFER_SIZE: usize = WIDTH * HEIGHT / 8;

pub mod interface;

/// Useful exports
pub mod prelude {
    pub use crate::color::Color;
    pub use crate::driver::{DisplayError, InitStep, Pcd8544};
    pub use crate::framebuffer::DirtyRegion;
}
