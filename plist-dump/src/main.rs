/*!
 Thin command line wrapper around [`plist_reader`]: parse the property list
 file named on the command line, pretty-print the decoded tree to stdout,
 and exit non-zero on any failure.
*/

use std::process::exit;

use clap::ArgMatches;
use plist_reader::parser::XmlPlistReader;

use crate::app::{
    error::RuntimeError,
    options::{from_command_line, OPTION_PLIST_PATH},
};

mod app;

fn main() {
    let args = from_command_line();
    if let Err(why) = run(&args) {
        eprintln!("{why}");
        exit(1);
    }
}

fn run(args: &ArgMatches) -> Result<(), RuntimeError> {
    let path = args
        .get_one::<String>(OPTION_PLIST_PATH)
        .ok_or_else(|| RuntimeError::InvalidOptions(format!("No {OPTION_PLIST_PATH} provided!")))?;

    let mut reader = XmlPlistReader::from_file(path).map_err(RuntimeError::ParseError)?;
    let root = reader.parse().map_err(RuntimeError::ParseError)?;

    println!("{root:#?}");
    Ok(())
}
