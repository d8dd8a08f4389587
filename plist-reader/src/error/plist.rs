/*!
 Errors that can happen when parsing XML property list data.
*/

use std::{
    fmt::{Display, Formatter, Result},
    io::Error as IoError,
    str::Utf8Error,
};

use base64::DecodeError;

/// Errors that can happen when parsing XML property list data
#[derive(Debug)]
pub enum PlistParseError {
    /// The top-level element of the document was not `<plist>`
    ExpectedPlist(String),
    /// A second element appeared inside `<plist>` after the root object
    UnexpectedElementAfterRoot(String),
    /// An element was opened inside a leaf, where only text may appear
    NotInContainer(String),
    /// The document contained no object at all
    MissingRoot,
    /// A `<key>` appeared in a dictionary that was expecting a value
    UnexpectedKey,
    /// A value element appeared in a dictionary that was expecting a `<key>`
    ExpectedKey(String),
    /// A dictionary closed while holding a key with no value
    DanglingKey(String),
    /// An element name outside of the property list grammar
    UnknownElement(String),
    /// Non-whitespace text outside of a leaf element or key
    UnexpectedCharacterData,
    /// An `<integer>` payload that is not a signed 64-bit decimal
    InvalidInteger(String),
    /// A `<real>` payload that is not a floating point literal
    InvalidReal(String),
    /// A `<data>` payload that is not Base64
    InvalidData(DecodeError),
    /// A `<date>` payload outside the `YYYY-MM-DDTHH:MM:SSZ` grammar
    InvalidDate(String),
    /// An element closed with no object under construction
    StackUnderflow,
    /// The reader already ran to completion once
    AlreadyParsed,
    /// The underlying document is not well-formed XML
    Xml(quick_xml::Error),
    /// An element name that is not valid UTF-8
    InvalidText(Utf8Error),
    /// The property list file could not be opened
    CannotRead(IoError),
}

impl Display for PlistParseError {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> Result {
        match self {
            PlistParseError::ExpectedPlist(name) => {
                write!(fmt, "expecting 'plist', found '{name}'")
            }
            PlistParseError::UnexpectedElementAfterRoot(name) => {
                write!(fmt, "unexpected element '{name}' after root element")
            }
            PlistParseError::NotInContainer(name) => {
                write!(fmt, "unexpected '{name}' element in a non-container element")
            }
            PlistParseError::MissingRoot => write!(fmt, "no root object in document"),
            PlistParseError::UnexpectedKey => write!(
                fmt,
                "unexpected 'key' when expecting value in dictionary definition"
            ),
            PlistParseError::ExpectedKey(name) => write!(
                fmt,
                "unexpected element '{name}' when a key was expected in dictionary definition"
            ),
            PlistParseError::DanglingKey(key) => {
                write!(fmt, "key '{key}' has no value in dictionary definition")
            }
            PlistParseError::UnknownElement(name) => write!(fmt, "unexpected element '{name}'"),
            PlistParseError::UnexpectedCharacterData => write!(fmt, "unexpected cdata"),
            PlistParseError::InvalidInteger(text) => {
                write!(fmt, "cannot parse '{text}' as an integer")
            }
            PlistParseError::InvalidReal(text) => write!(fmt, "cannot parse '{text}' as a real"),
            PlistParseError::InvalidData(why) => write!(fmt, "cannot decode data payload: {why}"),
            PlistParseError::InvalidDate(text) => {
                write!(fmt, "cannot parse '{text}' as an ISO-8601 date")
            }
            PlistParseError::StackUnderflow => write!(fmt, "stack underflow"),
            PlistParseError::AlreadyParsed => {
                write!(fmt, "reader has already produced a document")
            }
            PlistParseError::Xml(why) => write!(fmt, "malformed XML: {why}"),
            PlistParseError::InvalidText(why) => {
                write!(fmt, "element name is not valid UTF-8: {why}")
            }
            PlistParseError::CannotRead(why) => write!(fmt, "{why}"),
        }
    }
}
