//! Instruction encoding for the PCD8544
//!
//! Every function here is pure: it turns a semantic parameter into the byte(s)
//! the controller expects and never touches the bus. Configuration values
//! that need the extended instruction set come back as a three byte sequence
//! that enters extended mode, applies the value and returns to basic mode.
use display_interface::DisplayError;

use crate::cmd::Cmd;
use crate::flag::Flag;

/// An encoded extended-mode configuration: enter H=1, set value, back to H=0.
pub type ExtendedSequence = [u8; 3];

/// Function set with the `H` bit selecting the extended instruction set.
pub const fn function_set(extended: bool) -> u8 {
    if extended {
        Cmd::FUNCTION_SET | Flag::EXTENDED_INSTRUCTION
    } else {
        Cmd::FUNCTION_SET
    }
}

/// Select the row page (Y address) for the next data write.
pub const fn set_y_address(page: u8) -> u8 {
    debug_assert!(page <= Flag::MAX_Y_ADDR);
    Cmd::SET_Y_ADDR | (page & Flag::MAX_Y_ADDR)
}

/// Select the column (X address) for the next data write.
pub const fn set_x_address(column: u8) -> u8 {
    debug_assert!(column <= Flag::MAX_X_ADDR);
    Cmd::SET_X_ADDR | (column & Flag::MAX_X_ADDR)
}

/// Display control command.
///
/// The polarity is swapped relative to the controller's naming: asking for
/// `inverted = true` produces the controller's "normal" code and vice versa.
/// Existing callers depend on this mapping, keep it.
pub const fn display_control(inverted: bool) -> u8 {
    if inverted {
        Cmd::DISPLAY_CONTROL | Flag::DISPLAY_NORMAL
    } else {
        Cmd::DISPLAY_CONTROL | Flag::DISPLAY_INVERTED
    }
}

/// Operating voltage (contrast) sequence. Accepts `0..=0x7F`.
pub fn contrast(value: u8) -> Result<ExtendedSequence, DisplayError> {
    if value > Flag::MAX_VOP {
        return Err(DisplayError::OutOfBoundsError);
    }
    Ok(extended(Cmd::SET_VOP | value))
}

/// Bias system sequence. Accepts `0..=7`.
pub fn bias(value: u8) -> Result<ExtendedSequence, DisplayError> {
    if value > Flag::MAX_BIAS {
        return Err(DisplayError::OutOfBoundsError);
    }
    Ok(extended(Cmd::SET_BIAS | value))
}

const fn extended(instruction: u8) -> ExtendedSequence {
    [function_set(true), instruction, function_set(false)]
}
