pub struct Flag;
impl Flag {
    pub const EXTENDED_INSTRUCTION: u8 = 0x01;
    pub const DISPLAY_NORMAL: u8 = 0x04;
    pub const DISPLAY_INVERTED: u8 = 0x05;
    pub const MAX_VOP: u8 = 0x7F;
    pub const MAX_BIAS: u8 = 0x07;
    pub const MAX_Y_ADDR: u8 = 0x07;
    pub const MAX_X_ADDR: u8 = 0x7F;
}
