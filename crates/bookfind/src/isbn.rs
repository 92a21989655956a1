//! Normalization of user supplied ISBN strings.

use std::{fmt, str::FromStr};

use log::trace;

use crate::{Error, ErrorKind};

const ISBN_13_PREFIX: &str = "978";

/// A normalized ISBN, always exactly 10 or 13 ASCII digits.
///
/// The only way to get an [`Isbn`] is through [`Isbn::normalize`] (or [`str::parse`]), so the
/// length invariant holds for every value of this type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Isbn(String);

impl Isbn {
    /// Removes every non digit character from `raw` and checks the remaining digits form an
    /// ISBN-10 or ISBN-13.
    ///
    /// Note that the `X` check digit of an ISBN-10 is removed like any other letter.
    ///
    /// # Errors
    ///
    /// An `Err` of [`ErrorKind::Validation`] is returned when the number of digits is not 10 or
    /// 13.
    pub fn normalize(raw: &str) -> Result<Self, Error> {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        trace!("Normalized '{raw}' to '{digits}'");

        match digits.len() {
            10 | 13 => Ok(Self(digits)),
            len => Err(Error::new(
                ErrorKind::Validation,
                format!("ISBN must be 10 or 13 digits, found {len}"),
            )),
        }
    }

    /// Returns the 13 digit form of this ISBN.
    ///
    /// An ISBN-13 is returned as is. For an ISBN-10 the old check digit is dropped, the
    /// remaining nine digits are prefixed with "978" and a new check digit is appended.
    #[must_use]
    pub fn to_isbn13(&self) -> Self {
        if self.is_isbn13() {
            return self.clone();
        }

        let mut digits = String::with_capacity(13);
        digits.push_str(ISBN_13_PREFIX);
        digits.push_str(&self.0[..9]);
        digits.push(check_digit(&digits));

        Self(digits)
    }

    /// `true` when this is the 13 digit form.
    #[must_use]
    pub fn is_isbn13(&self) -> bool {
        self.0.len() == 13
    }

    /// The digits of this ISBN.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// weights alternate 1, 3, 1, 3.. starting at the first digit
fn check_digit(digits: &str) -> char {
    let sum: u32 = digits
        .bytes()
        .map(|b| u32::from(b - b'0'))
        .zip([1, 3].into_iter().cycle())
        .map(|(digit, weight)| digit * weight)
        .sum();

    let check = (10 - sum % 10) % 10;
    char::from_digit(check, 10).unwrap_or('0')
}

impl FromStr for Isbn {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::normalize(s)
    }
}

impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Isbn {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::Isbn;
    use crate::ErrorKind;

    #[test]
    fn isbn_10_converts_to_known_isbn_13() {
        let isbn = Isbn::normalize("0306406152").unwrap();
        assert_eq!("9780306406153", isbn.to_isbn13().as_str());
    }

    #[test]
    fn more_known_pairs_convert() {
        for (isbn10, isbn13) in [
            ("0735619670", "9780735619678"),
            ("0380815931", "9780380815937"),
            ("0131103628", "9780131103627"),
        ] {
            let isbn = Isbn::normalize(isbn10).unwrap();
            assert_eq!(isbn13, isbn.to_isbn13().as_str(), "converting {isbn10}");
        }
    }

    #[test]
    fn converted_isbn_keeps_978_prefix_and_length() {
        for raw in ["0000000000", "9999999999", "1234567890", "0306406152"] {
            let isbn13 = Isbn::normalize(raw).unwrap().to_isbn13();
            assert!(isbn13.as_str().starts_with("978"), "{isbn13}");
            assert_eq!(13, isbn13.as_str().len());
            assert!(isbn13.as_str().bytes().all(|b| b.is_ascii_digit()));
        }
    }

    #[test]
    fn isbn_13_is_unchanged() {
        let isbn = Isbn::normalize("978-0-306-40615-3").unwrap();
        assert!(isbn.is_isbn13());
        assert_eq!(isbn, isbn.to_isbn13());
    }

    #[test]
    fn normalize_strips_separators_and_letters() {
        assert_eq!("0306406152", Isbn::normalize("0-306-40615-2").unwrap().as_str());
        assert_eq!("0306406152", Isbn::normalize(" 0 306 40615 2 ").unwrap().as_str());
        assert_eq!(
            "0306406152",
            Isbn::normalize("ISBN: 0-306-40615-2").unwrap().as_str()
        );
    }

    #[test]
    fn wrong_lengths_are_rejected() {
        for raw in ["030640615", "03064061521", "978030640615", "97803064061531"] {
            let err = Isbn::normalize(raw).unwrap_err();
            assert_eq!(ErrorKind::Validation, err.kind(), "{raw}");
        }
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!("no digits here".parse::<Isbn>().is_err());
    }

    #[test]
    #[should_panic(expected = "ISBN must be 10 or 13 digits, found 9")]
    fn isbn_10_with_x_check_digit_loses_a_digit() {
        "080442957X".parse::<Isbn>().unwrap();
    }
}
