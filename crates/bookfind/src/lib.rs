#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![warn(missing_docs, rust_2018_idioms)]
#![allow(clippy::module_name_repetitions)]

//! # bookfind
//!
//! bookfind looks up the metadata and the best marketplace prices of a book by its ISBN.
//!
//! User input is normalized into an [`Isbn`], converted to its 13 digit form and then used to
//! query Google Books for the bibliographic data and AbeBooks for the prices. Lookups never fail
//! because of the services: anything that goes wrong on the network or in a response leaves the
//! affected fields of the [`Lookup`] empty.
//!
//! ```no_run
//! let lookup = bookfind::search("0-306-40615-2", bookfind::SearchOptions::default())?;
//! println!("{lookup}");
//! # Ok::<(), bookfind::Error>(())
//! ```

mod api;
mod error;
pub mod isbn;
pub mod record;
pub mod report;

pub use error::{Error, ErrorKind};
pub use isbn::Isbn;
pub use record::{BookRecord, PriceQuote};
pub use report::{marketplace_links, Link, Lookup};

use log::trace;

type Client = reqwest::blocking::Client;

/// Options of a [`search`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Also look up the Dewey Decimal Classification using Open Library.
    pub classify: bool,
}

/// Search the metadata and prices of the book identified by the `raw` user input.
///
/// The lookups are made one after another: metadata, prices and then, when requested, the
/// classification.
///
/// # Errors
///
/// An `Err` of [`ErrorKind::Validation`] is returned when `raw` does not contain 10 or 13
/// digits, no lookup is made in that case.
#[inline]
pub fn search(raw: &str, options: SearchOptions) -> Result<Lookup, Error> {
    search_with::<Client>(raw, options)
}

fn search_with<C: api::Client>(raw: &str, options: SearchOptions) -> Result<Lookup, Error> {
    let query = Isbn::normalize(raw)?;
    let isbn = query.to_isbn13();
    trace!("Search book by ISBN '{query}' as '{isbn}'");

    let mut book = api::google_books::fetch_metadata::<C>(&isbn);
    let price = api::abebooks::fetch_price::<C>(&isbn);

    if options.classify {
        book.classification = api::open_library::fetch_classification::<C>(&isbn);
    }

    Ok(Lookup {
        query,
        isbn,
        book,
        price,
        classified: options.classify,
    })
}

/// Look up the bibliographic metadata of `isbn` using Google Books.
///
/// A failed lookup returns a record with every field absent.
#[inline]
#[must_use]
pub fn fetch_metadata(isbn: &Isbn) -> BookRecord {
    api::google_books::fetch_metadata::<Client>(&isbn.to_isbn13())
}

/// Look up the best new and used prices of `isbn` using AbeBooks.
///
/// A failed lookup returns a quote with every field absent.
#[inline]
#[must_use]
pub fn fetch_price(isbn: &Isbn) -> PriceQuote {
    api::abebooks::fetch_price::<Client>(&isbn.to_isbn13())
}

/// Look up the Dewey Decimal Classification of `isbn` using Open Library.
#[inline]
#[must_use]
pub fn fetch_classification(isbn: &Isbn) -> Option<String> {
    api::open_library::fetch_classification::<Client>(&isbn.to_isbn13())
}
