//! Assembly of the lookup results into the text shown to the user.

use std::fmt;

use crate::{
    isbn::Isbn,
    record::{BookRecord, PriceQuote},
};

/// The outcome of a single search.
///
/// A [`Lookup`] is produced even when none of the services knew anything about the book, in
/// which case every optional field is absent.
#[derive(Clone, Debug, PartialEq)]
pub struct Lookup {
    /// The ISBN as entered by the user, after normalization.
    pub query: Isbn,
    /// The ISBN-13 used to query the services.
    pub isbn: Isbn,
    /// Bibliographic metadata.
    pub book: BookRecord,
    /// Best prices.
    pub price: PriceQuote,
    /// Whether the classification was looked up, an unrequested classification is never counted
    /// as hidden.
    pub classified: bool,
}

impl Lookup {
    /// The marketplace search links for the queried ISBN.
    #[must_use]
    pub fn links(&self) -> [Link; 2] {
        marketplace_links(&self.query)
    }

    /// The number of fields which are absent and therefore left out of the report.
    #[must_use]
    pub fn hidden_count(&self) -> usize {
        self.lines().filter(|(_, value)| value.is_none()).count()
    }

    fn lines(&self) -> impl Iterator<Item = (&'static str, Option<String>)> + '_ {
        let BookRecord {
            title,
            authors,
            publisher,
            year,
            classification,
        } = &self.book;

        let classification = self
            .classified
            .then(|| ("Classification (DDC)", classification.clone()));

        [
            Some(("Title", title.clone())),
            Some(("Author(s)", authors.clone())),
            Some(("ISBN", Some(self.isbn.to_string()))),
            Some(("Publisher", publisher.clone())),
            Some(("Publication Year", year.clone())),
            classification,
            Some(("New Book Price", self.price.new.map(|p| format!("{p:.2}")))),
            Some(("Used Book Price", self.price.used.map(|p| format!("{p:.2}")))),
            Some(("Ships To", self.price.destination.clone())),
        ]
        .into_iter()
        .flatten()
    }
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, value) in self.lines() {
            if let Some(value) = value {
                writeln!(f, "{label}: {value}")?;
            }
        }

        match self.hidden_count() {
            0 => Ok(()),
            1 => f.write_str("(1 empty data entry is hidden)"),
            n => write!(f, "({n} empty data entries are hidden)"),
        }
    }
}

/// A marketplace search page for a book.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Link {
    /// Name of the marketplace.
    pub name: &'static str,
    /// Search URL for the book.
    pub url: String,
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Find on {}: {}", self.name, self.url)
    }
}

/// Search pages on AbeBooks and Bookfinder for `isbn`.
#[must_use]
pub fn marketplace_links(isbn: &Isbn) -> [Link; 2] {
    [
        Link {
            name: "AbeBooks",
            url: format!("https://www.abebooks.com/servlet/SearchResults?kn={isbn}"),
        },
        Link {
            name: "Bookfinder",
            url: format!("https://www.bookfinder.com/isbn/{isbn}/"),
        },
    ]
}
