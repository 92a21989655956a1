use std::io::Write;

use bookfind::{Lookup, SearchOptions};
use eyre::{Context, Result};
use log::{debug, info};

/// Everything a search needs, handed to each handler instead of living in globals.
pub struct App<W: Write> {
    options: SearchOptions,
    out: W,
}

impl<W: Write> App<W> {
    pub const fn new(options: SearchOptions, out: W) -> Self {
        Self { options, out }
    }

    /// Searches the book for the `raw` ISBN and prints the results.
    ///
    /// Only invalid input is returned as an `Err`, unknown data is simply left out of the
    /// printed results.
    pub fn search(&mut self, raw: &str) -> Result<()> {
        let lookup = bookfind::search(raw, self.options)?;
        info!(
            "Search for '{}' complete with {} empty data entries",
            lookup.isbn,
            lookup.hidden_count()
        );
        self.print(&lookup)
    }

    pub fn print(&mut self, lookup: &Lookup) -> Result<()> {
        debug!("{lookup:?}");
        let out = &mut self.out;

        writeln!(out, "{lookup}")
            .and_then(|_| {
                lookup
                    .links()
                    .iter()
                    .try_for_each(|link| writeln!(out, "{link}"))
            })
            .and_then(|_| out.flush())
            .wrap_err("Cannot write the search results")
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }

    /// Prints a message that is not part of the results, like a rejected ISBN.
    pub fn notice(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "{message}").wrap_err("Cannot write message")
    }
}
