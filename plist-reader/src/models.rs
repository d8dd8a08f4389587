/*!
 Data structures and models produced by the property list parser.
*/

use base64::{prelude::BASE64_STANDARD, Engine};
use chrono::{DateTime, NaiveDateTime, Utc};
use indexmap::IndexMap;

use crate::error::plist::PlistParseError;

/// Date grammar used by Apple property lists, i.e. `2024-05-01T12:30:00Z`
const PLIST_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// A single value in a property list.
///
/// A property list is a tree: the two container variants own their children
/// outright, so dropping a container drops its entire subtree. Dictionaries
/// iterate in insertion order; re-inserting an existing key keeps the key's
/// original position and replaces the value.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    /// The `<null/>` element
    Null,
    /// The `<true/>` and `<false/>` elements
    Boolean(bool),
    /// A signed decimal `<integer>`
    Integer(i64),
    /// A floating point `<real>`
    Real(f64),
    /// Text from a `<string>` element, entities already resolved
    String(String),
    /// Bytes decoded from a Base64 `<data>` payload
    Data(Vec<u8>),
    /// An instant parsed from an ISO-8601 `<date>` payload
    Date(DateTime<Utc>),
    /// The ordered children of an `<array>`
    Array(Vec<Object>),
    /// The key/value pairs of a `<dict>`, in insertion order
    Dictionary(IndexMap<String, Object>),
}

impl Object {
    /// If `self` is an [`Array`](Object::Array), borrow its children
    pub fn as_array(&self) -> Option<&[Object]> {
        if let Object::Array(children) = self {
            return Some(children);
        }
        None
    }

    /// If `self` is a [`Dictionary`](Object::Dictionary), borrow its entries
    pub fn as_dictionary(&self) -> Option<&IndexMap<String, Object>> {
        if let Object::Dictionary(entries) = self {
            return Some(entries);
        }
        None
    }

    /// If `self` is a [`String`](Object::String), borrow its text
    pub fn as_string(&self) -> Option<&str> {
        if let Object::String(text) = self {
            return Some(text);
        }
        None
    }

    /// If `self` is an [`Integer`](Object::Integer), copy its value
    pub fn as_integer(&self) -> Option<i64> {
        if let Object::Integer(value) = self {
            return Some(*value);
        }
        None
    }

    /// If `self` is a [`Real`](Object::Real), copy its value
    pub fn as_real(&self) -> Option<f64> {
        if let Object::Real(value) = self {
            return Some(*value);
        }
        None
    }

    /// If `self` is a [`Boolean`](Object::Boolean), copy its value
    pub fn as_boolean(&self) -> Option<bool> {
        if let Object::Boolean(value) = self {
            return Some(*value);
        }
        None
    }

    /// If `self` is a [`Data`](Object::Data), borrow its bytes
    pub fn as_data(&self) -> Option<&[u8]> {
        if let Object::Data(bytes) = self {
            return Some(bytes);
        }
        None
    }

    /// If `self` is a [`Date`](Object::Date), copy its instant
    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        if let Object::Date(date) = self {
            return Some(*date);
        }
        None
    }

    /// Whether `self` is the [`Null`](Object::Null) object
    pub fn is_null(&self) -> bool {
        matches!(self, Object::Null)
    }

    /// The property list type of this object, for use in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Null => "null",
            Object::Boolean(_) => "boolean",
            Object::Integer(_) => "integer",
            Object::Real(_) => "real",
            Object::String(_) => "string",
            Object::Data(_) => "data",
            Object::Date(_) => "date",
            Object::Array(_) => "array",
            Object::Dictionary(_) => "dictionary",
        }
    }

    /// Build an [`Integer`](Object::Integer) from the text of an `<integer>` element.
    ///
    /// Leading and trailing whitespace is tolerated; overflow is not.
    pub(crate) fn integer_from(text: &str) -> Result<Self, PlistParseError> {
        let trimmed = text.trim();
        trimmed
            .parse::<i64>()
            .map(Object::Integer)
            .map_err(|_| PlistParseError::InvalidInteger(trimmed.to_string()))
    }

    /// Build a [`Real`](Object::Real) from the text of a `<real>` element
    pub(crate) fn real_from(text: &str) -> Result<Self, PlistParseError> {
        let trimmed = text.trim();
        trimmed
            .parse::<f64>()
            .map(Object::Real)
            .map_err(|_| PlistParseError::InvalidReal(trimmed.to_string()))
    }

    /// Build a [`Data`](Object::Data) from the Base64 text of a `<data>` element.
    ///
    /// Whitespace may appear anywhere inside the payload; anything else
    /// outside the Base64 alphabet fails the conversion.
    pub(crate) fn data_from(text: &str) -> Result<Self, PlistParseError> {
        let compact: String = text.chars().filter(|chr| !chr.is_whitespace()).collect();
        BASE64_STANDARD
            .decode(compact)
            .map(Object::Data)
            .map_err(PlistParseError::InvalidData)
    }

    /// Build a [`Date`](Object::Date) from the text of a `<date>` element
    pub(crate) fn date_from(text: &str) -> Result<Self, PlistParseError> {
        let trimmed = text.trim();
        NaiveDateTime::parse_from_str(trimmed, PLIST_DATE_FORMAT)
            .map(|date| Object::Date(date.and_utc()))
            .map_err(|_| PlistParseError::InvalidDate(trimmed.to_string()))
    }
}
