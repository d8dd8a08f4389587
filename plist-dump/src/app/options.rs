/*!
 Represents the command line options and their parser.
*/

use clap::{Arg, ArgMatches, Command};

/// Path to the property list file to parse
pub const OPTION_PLIST_PATH: &str = "path";

/// Current version of the program
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build the command line argument parser.
///
/// A missing path is a usage error; `clap` prints the help text and exits
/// non-zero before `main` ever sees the matches.
pub fn from_command_line() -> ArgMatches {
    Command::new("plist-dump")
        .version(VERSION)
        .about("Parse an Apple XML property list and print the decoded tree")
        .arg_required_else_help(true)
        .arg(
            Arg::new(OPTION_PLIST_PATH)
                .value_name("path")
                .help("Path to the XML property list file to read")
                .required(true),
        )
        .get_matches()
}
