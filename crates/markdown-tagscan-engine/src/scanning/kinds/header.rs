/// ATX-style header with owned marker constants.
pub struct Header;

impl Header {
    /// The character repeated to open a header line.
    pub const MARK: u8 = b'#';
    /// Markers beyond this count are header content.
    pub const MAX_LEVEL: u8 = 6;
    /// Separates the marker run from the header text.
    pub const SEPARATOR: u8 = b' ';
}
