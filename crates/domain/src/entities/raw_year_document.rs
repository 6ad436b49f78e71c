//! Unparsed history document for a single year

/// Raw CSV body returned by the history source for one year
///
/// Produced by a fetch and consumed by the parser; never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawYearDocument {
    /// Year the document was requested for
    pub year: i32,
    /// Response body as received
    pub body: String,
}

impl RawYearDocument {
    /// Create a new raw document
    #[must_use]
    pub fn new(year: i32, body: impl Into<String>) -> Self {
        Self {
            year,
            body: body.into(),
        }
    }
}
