//! Byte View Module
//!
//! Immutable snapshot of a cached payload.

use std::fmt;
use std::sync::Arc;

use super::lru::Value;

// == Byte View ==
/// An immutable view over a cached byte payload.
///
/// The payload is copied in on construction and copied out by [`ByteView::bytes`],
/// so nothing a caller does with its buffers can reach the cached entry.
/// Cloning a view is cheap and shares the same read-only storage.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ByteView {
    b: Arc<[u8]>,
}

impl ByteView {
    // == Constructor ==
    /// Creates a view holding a private copy of `bytes`.
    pub fn new(bytes: &[u8]) -> Self {
        Self { b: Arc::from(bytes) }
    }

    /// Byte length of the payload.
    pub fn len(&self) -> usize {
        self.b.len()
    }

    pub fn is_empty(&self) -> bool {
        self.b.is_empty()
    }

    // == Bytes ==
    /// Returns an owned copy of the payload.
    pub fn bytes(&self) -> Vec<u8> {
        self.b.to_vec()
    }

    /// Borrows the payload read-only.
    pub fn as_slice(&self) -> &[u8] {
        &self.b
    }

    // == Text ==
    /// Returns the payload as text, replacing invalid UTF-8 sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.b).into_owned()
    }
}

impl Default for ByteView {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl Value for ByteView {
    fn size(&self) -> usize {
        self.len()
    }
}

impl From<&[u8]> for ByteView {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes)
    }
}

impl From<Vec<u8>> for ByteView {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(&bytes)
    }
}

impl From<&str> for ByteView {
    fn from(s: &str) -> Self {
        Self::new(s.as_bytes())
    }
}

impl From<String> for ByteView {
    fn from(s: String) -> Self {
        Self::new(s.as_bytes())
    }
}

impl AsRef<[u8]> for ByteView {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl fmt::Display for ByteView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

impl fmt::Debug for ByteView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteView")
            .field("len", &self.len())
            .field("text", &self.text())
            .finish()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_reports_size() {
        let view = ByteView::from("630");
        assert_eq!(view.len(), 3);
        assert_eq!(view.size(), 3);
        assert!(!view.is_empty());
        assert!(ByteView::default().is_empty());
    }

    #[test]
    fn test_bytes_returns_independent_copy() {
        let view = ByteView::from("abc");

        let mut copy = view.bytes();
        copy[0] = b'z';
        copy.push(b'!');

        assert_eq!(view.as_slice(), b"abc");
        assert_eq!(view.text(), "abc");
    }

    #[test]
    fn test_construction_copies_input() {
        let mut source = b"value".to_vec();
        let view = ByteView::new(&source);

        source[0] = b'V';

        assert_eq!(view.text(), "value");
    }

    #[test]
    fn test_clones_compare_equal() {
        let view = ByteView::from(vec![1u8, 2, 3]);
        let other = view.clone();
        assert_eq!(view, other);
        assert_eq!(other.bytes(), vec![1, 2, 3]);
    }

    #[test]
    fn test_text_is_lossy_for_invalid_utf8() {
        let view = ByteView::new(&[b'o', b'k', 0xff]);
        assert_eq!(view.text(), "ok\u{fffd}");
        assert_eq!(view.len(), 3);
    }

    #[test]
    fn test_display_matches_text() {
        let view = ByteView::from(String::from("589"));
        assert_eq!(view.to_string(), "589");
    }
}
