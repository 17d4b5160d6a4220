pub struct Cmd;
#[allow(dead_code)]
impl Cmd {
    pub const DISPLAY_OFF: u8 = 0x3E;
    pub const DISPLAY_ON: u8 = 0x3F;
    /// Low 6 bits carry the column (Y address)
    pub const SET_COLUMN: u8 = 0x40;
    /// Low 3 bits carry the page (X address)
    pub const SET_PAGE: u8 = 0xB8;
    /// Low 6 bits carry the start line (Z address)
    pub const SET_START_LINE: u8 = 0xC0;
}
