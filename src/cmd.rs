pub struct Cmd;
impl Cmd {
    // basic instruction set (H = 0)
    pub const FUNCTION_SET: u8 = 0x20;
    pub const DISPLAY_CONTROL: u8 = 0x08;
    pub const SET_Y_ADDR: u8 = 0x40;
    pub const SET_X_ADDR: u8 = 0x80;

    // extended instruction set (H = 1)
    pub const SET_BIAS: u8 = 0x10;
    pub const SET_VOP: u8 = 0x80;
}
