use std::collections::HashMap;

use log::{info, warn};
use serde::Deserialize;

use crate::{isbn::Isbn, Error, ErrorKind};

use super::Client;

const OPEN_LIBRARY_URL: &str = "https://openlibrary.org/api/books";

/// Looks up the Dewey Decimal Classification of the book, any failure is logged and results in
/// `None`.
pub(crate) fn fetch_classification<C: Client>(isbn: &Isbn) -> Option<String> {
    get_dewey_decimal::<C>(isbn)
        .map_err(|err| warn!("No classification for ISBN '{isbn}': {err}"))
        .ok()
}

pub(crate) fn get_dewey_decimal<C: Client>(isbn: &Isbn) -> Result<String, Error> {
    info!("Searching for the classification of ISBN '{isbn}' using Open Library");
    let url = format!("{OPEN_LIBRARY_URL}?bibkeys=ISBN:{isbn}&format=json&jscmd=data");

    let client = C::default();
    let mut books: HashMap<String, OpenLibraryBook> = client.get_json(&url)?;

    books
        .remove(&format!("ISBN:{isbn}"))
        .and_then(|book| book.classifications)
        .and_then(|c| c.dewey_decimal_class.into_iter().next())
        .map(|ddc| ddc.trim().to_owned())
        .filter(|ddc| is_dewey_decimal(ddc))
        .ok_or_else(|| Error::new(ErrorKind::NoValue, "No Dewey Decimal Classification found"))
}

// e.g. "005.133"
fn is_dewey_decimal(ddc: &str) -> bool {
    ddc.starts_with(|c: char| c.is_ascii_digit())
        && ddc.chars().all(|c| c.is_ascii_digit() || c == '.')
}

#[derive(Deserialize)]
struct OpenLibraryBook {
    classifications: Option<Classifications>,
}

#[derive(Deserialize)]
struct Classifications {
    #[serde(default)]
    dewey_decimal_class: Vec<String>,
}
