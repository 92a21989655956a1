#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![allow(clippy::as_conversions, clippy::mod_module_files)]

use std::{error, io, process};

mod app;
mod interact;

use app::App;

use bookfind::SearchOptions;
use clap::{Args, Parser};
use log::{error, trace};

fn main() {
    if let Err(err) = try_main() {
        error!("{:#}", err);
        process::exit(2);
    }
}

fn try_main() -> Result<(), Box<dyn error::Error>> {
    let Cli {
        isbn,
        classify,
        global_opts: GlobalOpts { verbosity, quiet },
    } = Cli::parse();

    setup_errlog(verbosity as usize, quiet)?;

    let mut app = App::new(SearchOptions { classify }, io::stdout());

    if let Some(isbn) = isbn {
        trace!("ISBN given as argument - single search");
        app.search(&isbn)?;
    } else {
        trace!("No ISBN given - starting interactive session");
        interact::session(&mut app)?;
    }

    Ok(())
}

fn setup_errlog(verbosity: usize, quiet: bool) -> Result<(), Box<dyn error::Error>> {
    // if quiet then ignore verbosity but still show errors
    let verbosity = if quiet { 0 } else { verbosity + 1 };

    stderrlog::new().verbosity(verbosity).init()?;
    Ok(())
}

#[derive(Parser)]
#[clap(name = "bookfind")]
#[clap(about = "Look up the metadata and best prices of a book by its ISBN")]
#[clap(version, author)]
struct Cli {
    /// The ISBN-10 or ISBN-13 to search for, hyphens and spaces are ignored
    ///
    /// When no ISBN is given an interactive session is started which keeps asking for ISBNs
    /// until an empty line is entered.
    isbn: Option<String>,

    /// Also look up the Dewey Decimal Classification of the book
    #[clap(short, long)]
    classify: bool,

    #[clap(flatten)]
    global_opts: GlobalOpts,
}

#[derive(Debug, Args)]
struct GlobalOpts {
    /// How chatty the program is when performing commands
    ///
    /// The number of times this flag is used will increase how chatty
    /// the program is.
    #[clap(short, long, parse(from_occurrences), global = true)]
    verbosity: u8,

    /// Only errors are logged to stderr, the results are still printed.
    #[clap(short, long, global = true)]
    quiet: bool,
}
