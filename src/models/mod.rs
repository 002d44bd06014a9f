pub mod department;
pub mod employee;

/// One page of a descending-id scan plus the token to resume it.
///
/// An empty page carries the caller's cursor back unchanged so the
/// client position never regresses at end-of-data.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_cursor: String,
}
