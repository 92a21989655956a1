use std::io::Write;

use bookfind::{Error as LookupError, ErrorKind};
use dialoguer::Input;
use eyre::{eyre, Context, Result};
use log::trace;

use crate::app::App;

pub fn user_input(prompt: &str) -> Result<String> {
    Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .wrap_err_with(|| eyre!("User input cancelled"))
}

/// Keeps asking for ISBNs until an empty line is entered.
#[inline]
pub fn session<W: Write>(app: &mut App<W>) -> Result<()> {
    session_with(app, || user_input("Enter an ISBN-10 or ISBN-13 code"))
}

/// Runs a search for each line produced by `next_line` until it produces an empty line.
///
/// An invalid ISBN is reported and the session goes on, any other error ends it.
pub fn session_with<W, F>(app: &mut App<W>, mut next_line: F) -> Result<()>
where
    W: Write,
    F: FnMut() -> Result<String>,
{
    loop {
        let input = next_line()?;
        if input.trim().is_empty() {
            trace!("Empty input - ending session");
            return Ok(());
        }

        if let Err(err) = app.search(&input) {
            match err.downcast_ref::<LookupError>().map(LookupError::kind) {
                Some(ErrorKind::Validation) => app.notice(&format!("Error: {err}"))?,
                _ => return Err(err),
            }
        }
    }
}
