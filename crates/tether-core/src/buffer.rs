//! Drainable fragment buffers.
//!
//! Mapping, action, export, and watch point declarations are emitted by
//! independent sub-configurations while a participant is still open. They
//! accumulate in a [`FragmentBuffer`] until the participant is finalized,
//! at which point the buffer is drained: ownership of every entry moves to
//! the finalizer and the buffer is left empty for the next participant.

/// A source of buffered declarations.
///
/// The finalization pipeline consumes sources through this trait only,
/// so a sub-configuration may keep its own storage as long as it can hand
/// over everything it holds.
pub trait FragmentSource<T> {
    /// Declarations buffered since the last drain, in declaration order.
    fn pending(&self) -> &[T];

    /// Take every buffered declaration, leaving the source empty.
    fn drain(&mut self) -> Vec<T>;
}

/// Vec-backed [`FragmentSource`].
#[derive(Debug)]
pub struct FragmentBuffer<T> {
    entries: Vec<T>,
}

impl<T> FragmentBuffer<T> {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a declaration.
    pub fn push(&mut self, entry: T) {
        self.entries.push(entry);
    }

    /// Number of buffered declarations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is buffered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for FragmentBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FragmentSource<T> for FragmentBuffer<T> {
    fn pending(&self) -> &[T] {
        &self.entries
    }

    fn drain(&mut self) -> Vec<T> {
        let drained = std::mem::take(&mut self.entries);
        assert!(self.entries.is_empty(), "drain left entries behind");
        drained
    }
}

impl<T> Extend<T> for FragmentBuffer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_empties_and_preserves_order() {
        let mut buf = FragmentBuffer::new();
        buf.push("a");
        buf.push("b");
        buf.extend(["c"]);
        assert_eq!(buf.pending(), &["a", "b", "c"]);
        assert_eq!(buf.drain(), vec!["a", "b", "c"]);
        assert!(buf.is_empty());
        assert!(buf.drain().is_empty());
    }

    #[test]
    fn refills_after_drain() {
        let mut buf = FragmentBuffer::default();
        buf.push(1);
        let _ = buf.drain();
        buf.push(2);
        assert_eq!(buf.len(), 1);
        assert_eq!(buf.pending(), &[2]);
    }
}
