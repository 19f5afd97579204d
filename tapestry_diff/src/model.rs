use serde::Serialize;

/// A maximal run of consecutive tokens sharing one classification.
///
/// At most one of `added`/`removed` is true; neither means the run is common
/// to both sequences. `value` joins `count` consecutive tokens from the new
/// sequence (unchanged and added runs) or the old sequence (removed runs).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditComponent {
    pub count: usize,
    pub added: bool,
    pub removed: bool,
    pub value: String,
}

impl EditComponent {
    /// True when the run is common to both sequences.
    pub fn is_unchanged(&self) -> bool {
        !self.added && !self.removed
    }
}

/// Slice-strategy component: the value stays a borrowed run of elements and is
/// never joined into a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SliceComponent<'a, T> {
    pub count: usize,
    pub added: bool,
    pub removed: bool,
    pub value: &'a [T],
}

impl<T> SliceComponent<'_, T> {
    /// True when the run is common to both sequences.
    pub fn is_unchanged(&self) -> bool {
        !self.added && !self.removed
    }
}

/// One physical line of an expanded diff, ready for styling.
///
/// `padding` counts the leading spaces stripped from `value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffRecord {
    pub added: bool,
    pub removed: bool,
    pub padding: usize,
    pub value: String,
}
