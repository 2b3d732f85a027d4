use dialcode_dom::DomError;

/// Errors raised by the picker's DOM operations.
///
/// The picker never surfaces these to its host: each failing operation is
/// logged and abandoned, leaving the page as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PickerError {
    /// A host element the picker needs is not on the page.
    #[error("{0} not found")]
    MissingElement(&'static str),

    /// A catalog index outside the loaded catalog.
    #[error("unknown country index {0}")]
    UnknownCountry(usize),

    #[error(transparent)]
    Dom(#[from] DomError),
}
