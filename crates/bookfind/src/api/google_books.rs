use log::{info, trace, warn};
use serde::Deserialize;

use crate::{isbn::Isbn, record::BookRecord, Error, ErrorKind};

use super::Client;

const GOOGLE_BOOKS_URL: &str = "https://www.googleapis.com/books/v1/volumes?q=isbn:";

/// Looks up the metadata of the book, any failure is logged and results in an empty record.
pub(crate) fn fetch_metadata<C: Client>(isbn: &Isbn) -> BookRecord {
    get_book_record::<C>(isbn).unwrap_or_else(|err| {
        warn!("No metadata for ISBN '{isbn}': {err}");
        BookRecord::default()
    })
}

pub(crate) fn get_book_record<C: Client>(isbn: &Isbn) -> Result<BookRecord, Error> {
    info!("Searching for ISBN '{isbn}' using Google Books API");
    let mut url = GOOGLE_BOOKS_URL.to_owned();
    url.push_str(isbn.as_str());

    let client = C::default();
    let GoogleModel { total_items, items } = client.get_json(&url)?;

    trace!("Request was successful - {total_items} item(s) found");

    items
        .into_iter()
        .next()
        .filter(|_| total_items > 0)
        .map(|item| BookRecord::from(item.volume_info))
        .ok_or_else(|| Error::new(ErrorKind::NoValue, "No books found!"))
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct GoogleModel {
    #[serde(rename = "totalItems", default)]
    total_items: u32,
    #[serde(default)]
    items: Vec<Item>,
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct Item {
    #[serde(rename = "volumeInfo", default)]
    volume_info: VolumeInfo,
}

/// Volume information from the Google Book API, every field may be missing.
#[derive(Deserialize, Default)]
#[cfg_attr(test, derive(Debug))]
struct VolumeInfo {
    title: Option<String>,
    #[serde(default)]
    authors: Vec<String>,
    publisher: Option<String>,
    #[serde(rename = "publishedDate")]
    published_date: Option<String>,
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

impl From<VolumeInfo> for BookRecord {
    fn from(info: VolumeInfo) -> Self {
        let VolumeInfo {
            title,
            mut authors,
            publisher,
            published_date,
        } = info;

        authors.retain(|author| !author.trim().is_empty());
        let authors = if authors.is_empty() {
            None
        } else {
            Some(authors.join(", "))
        };

        // publishedDate is Year-Month-Day where month and day are optional.
        let year = published_date
            .and_then(non_empty)
            .map(|date| date.chars().take(4).collect());

        Self {
            title: title.and_then(non_empty),
            authors,
            publisher: publisher.and_then(non_empty),
            year,
            classification: None,
        }
    }
}
