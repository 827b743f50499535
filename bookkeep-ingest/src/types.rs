/// A physical line of extracted text. `index` is 1-based within the
/// document's concatenated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawLine<'a> {
    pub index: usize,
    pub content: &'a str,
}

/// One logical transaction entry, possibly wrapped across several physical
/// lines, joined with single spaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionBlock {
    /// Line index of the date-led line that opened the block
    pub first_line: usize,
    /// Line index of the amount/balance line that closed it
    pub last_line: usize,
    pub text: String,
}
