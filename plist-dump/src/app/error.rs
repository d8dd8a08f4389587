/*!
Errors that can happen during the application's runtime.
*/

use std::fmt::{Display, Formatter, Result};

use plist_reader::error::plist::PlistParseError;

/// Errors that can happen during the application's runtime
#[derive(Debug)]
pub enum RuntimeError {
    InvalidOptions(String),
    ParseError(PlistParseError),
}

impl Display for RuntimeError {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> Result {
        match self {
            RuntimeError::InvalidOptions(why) => write!(fmt, "Invalid options!\n{why}"),
            RuntimeError::ParseError(why) => write!(fmt, "{why}"),
        }
    }
}
