//! Command/data framing over SPI
//!
//! The PCD8544 samples its D/C line to tell configuration bytes from pixel
//! bytes and only listens while SCE is low. [`SpiDisplayInterface`] owns the
//! bus and the three control lines and wraps every transmission in the right
//! line levels.
use display_interface::DisplayError;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use log::trace;

/// Byte class signalled on the D/C line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    /// D/C low: instruction bytes
    Command,
    /// D/C high: display RAM bytes
    Data,
}

/// Record `result` into `acc` unless an earlier step already failed.
///
/// Lets a multi-step operation run every step and still report the first
/// failure.
pub(crate) fn accumulate(acc: &mut Result<(), DisplayError>, result: Result<(), DisplayError>) {
    if acc.is_ok() {
        *acc = result;
    }
}

/// Owns the SPI bus and the chip-enable, data/command and reset lines.
pub struct SpiDisplayInterface<SPI, CE, DC, RST> {
    spi: SPI,
    ce: CE,
    dc: DC,
    rst: RST,
}

impl<SPI, CE, DC, RST> SpiDisplayInterface<SPI, CE, DC, RST> {
    /// Wrap the bus and lines. No line is touched until the first call.
    pub fn new(spi: SPI, ce: CE, dc: DC, rst: RST) -> Self {
        Self { spi, ce, dc, rst }
    }

    /// Release the bus and lines
    pub fn release(self) -> (SPI, CE, DC, RST) {
        (self.spi, self.ce, self.dc, self.rst)
    }
}

impl<SPI, CE, DC, RST> SpiDisplayInterface<SPI, CE, DC, RST>
where
    SPI: SpiBus,
    CE: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Send one instruction byte
    pub fn cmd(&mut self, command: u8) -> Result<(), DisplayError> {
        self.send(&[command], Kind::Command)
    }

    /// Send instruction bytes, one transmission each. Every byte is attempted;
    /// the first failure is returned.
    pub fn cmds(&mut self, commands: &[u8]) -> Result<(), DisplayError> {
        let mut result = Ok(());
        for &command in commands {
            accumulate(&mut result, self.cmd(command));
        }
        result
    }

    /// Send display RAM bytes as a single transmission
    pub fn data(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        self.send(data, Kind::Data)
    }

    /// Frame one transmission: D/C level, SCE low, write, SCE high.
    ///
    /// SCE is released even if the write failed so the bus is left idle.
    pub fn send(&mut self, bytes: &[u8], kind: Kind) -> Result<(), DisplayError> {
        trace!("send {:?}: {} byte(s)", kind, bytes.len());
        let mode = match kind {
            Kind::Command => self.dc.set_low(),
            Kind::Data => self.dc.set_high(),
        };
        mode.map_err(|_| DisplayError::DCError)?;

        self.ce.set_low().map_err(|_| DisplayError::CSError)?;
        let written = self
            .spi
            .write(bytes)
            .and_then(|()| self.spi.flush())
            .map_err(|_| DisplayError::BusWriteError);
        let released = self.ce.set_high().map_err(|_| DisplayError::CSError);

        written.and(released)
    }

    /// Drive SCE high so the controller ignores the bus
    pub fn deselect(&mut self) -> Result<(), DisplayError> {
        self.ce.set_high().map_err(|_| DisplayError::CSError)
    }

    /// Pulse RES low for `hold_ms` milliseconds.
    ///
    /// RES is driven high again even if driving it low failed.
    pub fn hard_reset(
        &mut self,
        delay: &mut impl DelayNs,
        hold_ms: u32,
    ) -> Result<(), DisplayError> {
        let mut result = self.rst.set_low().map_err(|_| DisplayError::RSError);
        delay.delay_ms(hold_ms);
        accumulate(&mut result, self.rst.set_high().map_err(|_| DisplayError::RSError));
        result
    }
}
