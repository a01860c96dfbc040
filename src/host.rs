use std::ops::Range;

/// Contiguous range of flat row positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowRange {
    /// First affected flat index.
    pub start: usize,
    /// Number of affected rows.
    pub len: usize,
}

impl RowRange {
    /// Creates a range starting at `start` spanning `len` rows.
    pub const fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// Returns `true` if the range spans no rows.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Exclusive end of the range.
    pub const fn end(&self) -> usize {
        self.start + self.len
    }

    /// The affected flat indices, in order.
    pub const fn positions(&self) -> Range<usize> {
        self.start..self.end()
    }
}

/// One atomic visual transaction on the host list.
///
/// Insert positions refer to the list after the edit; remove positions to
/// the list before it. All other rows keep their relative order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowEdit {
    /// Rows appeared at the contained positions.
    Insert(RowRange),
    /// Rows disappeared from the contained positions.
    Remove(RowRange),
}

impl RowEdit {
    /// The affected range, whichever direction the edit goes.
    pub const fn range(&self) -> RowRange {
        match self {
            Self::Insert(range) | Self::Remove(range) => *range,
        }
    }
}

/// Receiver for row edits produced by expand/collapse.
///
/// The state never owns a host; one is borrowed per call, so lifetime stays
/// with the surrounding application. Hosts that redraw wholesale can pass
/// `&mut ()`.
pub trait ListHost {
    /// Applies one edit as a single visual transaction.
    fn apply(&mut self, edit: RowEdit);
}

impl ListHost for () {
    fn apply(&mut self, _edit: RowEdit) {}
}

/// Recording host: keeps the edit log in application order.
impl ListHost for Vec<RowEdit> {
    fn apply(&mut self, edit: RowEdit) {
        self.push(edit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_positions_are_half_open() {
        let range = RowRange::new(1, 2);
        assert_eq!(range.positions().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(range.end(), 3);
        assert!(RowRange::new(4, 0).is_empty());
    }

    #[test]
    fn vec_host_records_in_order() {
        let mut host: Vec<RowEdit> = Vec::new();
        host.apply(RowEdit::Insert(RowRange::new(1, 2)));
        host.apply(RowEdit::Remove(RowRange::new(1, 2)));
        assert_eq!(
            host,
            vec![
                RowEdit::Insert(RowRange::new(1, 2)),
                RowEdit::Remove(RowRange::new(1, 2)),
            ]
        );
        assert_eq!(host[1].range(), RowRange::new(1, 2));
    }
}
