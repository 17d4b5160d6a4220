pub struct Flag;
#[allow(dead_code)]
impl Flag {
    pub const PAGE_MASK: u8 = 0x07;
    pub const COLUMN_MASK: u8 = 0x3F;
    pub const START_LINE_MASK: u8 = 0x3F;
    pub const STATUS_BUSY: u8 = 0x80;
    /// Set while the display output is off
    pub const STATUS_OFF: u8 = 0x40;
    pub const STATUS_RESET: u8 = 0x10;
}
