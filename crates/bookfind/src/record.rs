//! The results of the individual lookups.
//!
//! Every field is optional, a missing field means the service did not know the value (or could
//! not be reached) and is never treated as an error.

/// Bibliographic metadata of a single book.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BookRecord {
    /// Title of the book.
    pub title: Option<String>,
    /// All authors joined with ", ".
    pub authors: Option<String>,
    /// Publisher of the book.
    pub publisher: Option<String>,
    /// Year of publication, just the four year digits.
    pub year: Option<String>,
    /// Dewey Decimal Classification code.
    pub classification: Option<String>,
}

impl BookRecord {
    /// `true` when no field is known.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.authors.is_none()
            && self.publisher.is_none()
            && self.year.is_none()
            && self.classification.is_none()
    }
}

/// Best prices found for a book, each including shipping.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PriceQuote {
    /// Best price for a new copy.
    pub new: Option<f64>,
    /// Best price for a used copy.
    pub used: Option<f64>,
    /// Name of the shipping destination the prices were calculated for.
    pub destination: Option<String>,
}

impl PriceQuote {
    /// `true` when no field is known.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.new.is_none() && self.used.is_none() && self.destination.is_none()
    }
}
