/// Raw byte clipboard.
///
/// Content is exchanged verbatim; no charset conversion happens in
/// either direction. Both operations report availability as a plain
/// boolean/option instead of an error.
pub trait Clipboard {
    /// Stores `data`, returning `false` when the clipboard is unavailable.
    fn set(&mut self, data: &[u8]) -> bool;
    /// Current content, `None` when the clipboard is unavailable or empty.
    fn get(&mut self) -> Option<Vec<u8>>;
}

/// Process-local clipboard. Binary content survives round trips exactly,
/// which system text clipboards do not guarantee.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    data: Option<Vec<u8>>,
}

impl Clipboard for MemoryClipboard {
    fn set(&mut self, data: &[u8]) -> bool {
        self.data = Some(data.to_vec());
        true
    }

    fn get(&mut self) -> Option<Vec<u8>> {
        self.data.clone().filter(|d| !d.is_empty())
    }
}
