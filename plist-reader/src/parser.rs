/*!
 Logic used to decode an Apple XML property list into an [`Object`] tree.

 The grammar is the XML flavor of Apple's property list serialization: a
 single `<plist>` root element wrapping exactly one object, `<array>` and
 `<dict>` containers, and typed leaf elements (`<string>`, `<integer>`,
 `<real>`, `<true/>`, `<false/>`, `<null/>`, `<data>`, `<date>`). Inside a
 dictionary, `<key>` elements and value elements strictly alternate.

 Tokenization is delegated to [`quick_xml`]; the [`XmlPlistReader`] consumes
 its start-element, end-element and character-data events and runs an
 explicit stack machine over partially built objects, so the dictionary
 pairing states stay first-class rather than hiding in recursion.
*/

use std::{
    fs::File,
    io::{BufRead, BufReader},
    mem,
    path::Path,
};

use chrono::DateTime;
use indexmap::IndexMap;
use quick_xml::{events::Event, Reader};

use crate::{error::plist::PlistParseError, models::Object};

/// Pairing state of a dictionary whose element is still open.
///
/// The grammar inside `<dict>` strictly alternates `<key>` elements and
/// value elements; this tracks where in that alternation the parser is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum KeyState {
    /// The next child element must be a `<key>`
    #[default]
    AwaitingKey,
    /// A `<key>` element is open and collecting its text
    KeyActive,
    /// A key has been captured; the next child element becomes its value
    KeyReady(String),
}

/// One partially built object plus its dictionary pairing state
#[derive(Debug)]
struct Frame {
    object: Object,
    key: KeyState,
}

impl Frame {
    fn new(object: Object) -> Self {
        Self {
            object,
            key: KeyState::AwaitingKey,
        }
    }
}

/// Contains logic and data used to decode an XML property list.
///
/// The reader owns the tokenizer plus the decoding state: a stack of
/// partially built [`Frame`]s, the innermost frame held separately, the
/// character data accumulated for the currently open leaf or key, and the
/// completed root once the outermost object closes.
///
/// A reader is single-shot: after [`parse`](XmlPlistReader::parse) has run,
/// further calls return [`PlistParseError::AlreadyParsed`] without touching
/// the underlying document again.
///
/// # Example:
///
/// ```
/// use plist_reader::parser::XmlPlistReader;
///
/// let document = "<plist version=\"1.0\"><integer>42</integer></plist>";
/// let mut reader = XmlPlistReader::from_reader(document.as_bytes());
/// let root = reader.parse();
/// ```
pub struct XmlPlistReader<R: BufRead> {
    /// Pull parser that tokenizes the underlying document
    reader: Reader<R>,
    /// Frames whose elements are still open, innermost excluded
    stack: Vec<Frame>,
    /// The innermost open frame
    current: Option<Frame>,
    /// Text accumulated for the currently open leaf or key
    cdata: String,
    /// The completed top-level object
    root: Option<Object>,
    /// Whether a top-level object was ever started
    seen_root: bool,
    /// Whether the reader already ran to completion
    consumed: bool,
    /// Number of currently open elements
    depth: usize,
}

impl XmlPlistReader<BufReader<File>> {
    /// Open the property list file at `path` and build a reader over it
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PlistParseError> {
        let file = File::open(path).map_err(PlistParseError::CannotRead)?;
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: BufRead> XmlPlistReader<R> {
    /// Build a reader over an already-open byte stream.
    ///
    /// # Example:
    ///
    /// ```
    /// use plist_reader::parser::XmlPlistReader;
    ///
    /// let document = "<plist version=\"1.0\"><true/></plist>";
    /// let reader = XmlPlistReader::from_reader(document.as_bytes());
    /// ```
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader: Reader::from_reader(reader),
            stack: vec![],
            current: None,
            cdata: String::new(),
            root: None,
            seen_root: false,
            consumed: false,
            depth: 0,
        }
    }

    /// Decode the document and return its root object.
    ///
    /// The first fatal condition aborts the parse; no partial tree is ever
    /// returned, and everything built up to that point is dropped. The
    /// reader is spent afterwards whether the parse succeeded or not, since
    /// the underlying byte stream has been consumed.
    pub fn parse(&mut self) -> Result<Object, PlistParseError> {
        if self.consumed {
            return Err(PlistParseError::AlreadyParsed);
        }
        self.consumed = true;

        let result = self.run();
        if result.is_err() {
            self.stack.clear();
            self.current = None;
            self.root = None;
            self.cdata.clear();
        }
        result
    }

    /// Pull tokenizer events until end of document or the first fatal error
    fn run(&mut self) -> Result<Object, PlistParseError> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match self
                .reader
                .read_event_into(&mut buf)
                .map_err(PlistParseError::Xml)?
            {
                Event::Start(event) => {
                    let name = as_utf8(event.name().as_ref())?.to_string();
                    self.on_start_element(&name, self.depth)?;
                    self.depth += 1;
                }
                Event::Empty(event) => {
                    // A self-closing element is exactly one open/close pair
                    let name = as_utf8(event.name().as_ref())?.to_string();
                    self.on_start_element(&name, self.depth)?;
                    self.on_end_element(&name)?;
                }
                Event::End(event) => {
                    let name = as_utf8(event.name().as_ref())?.to_string();
                    self.depth = self.depth.saturating_sub(1);
                    self.on_end_element(&name)?;
                }
                Event::Text(event) => {
                    let text = event.unescape().map_err(PlistParseError::Xml)?;
                    self.on_character_data(&text)?;
                }
                Event::CData(event) => {
                    let text = as_utf8(event.as_ref())?.to_string();
                    self.on_character_data(&text)?;
                }
                Event::Eof => break,
                // Declarations, comments, doctypes and processing
                // instructions carry no plist content
                _ => {}
            }
        }

        self.root.take().ok_or(PlistParseError::MissingRoot)
    }

    /// Validate the element's position in the document, then dispatch it
    fn on_start_element(&mut self, name: &str, depth: usize) -> Result<(), PlistParseError> {
        if depth == 0 {
            if name != "plist" {
                return Err(PlistParseError::ExpectedPlist(name.to_string()));
            }
            return Ok(());
        }

        // Only one object may sit inside the root element
        if depth == 1 && self.seen_root {
            return Err(PlistParseError::UnexpectedElementAfterRoot(
                name.to_string(),
            ));
        }

        self.begin_object(name, depth)
    }

    fn on_end_element(&mut self, name: &str) -> Result<(), PlistParseError> {
        match name {
            "plist" => Ok(()),
            "key" => self.end_key(),
            "dict" => self.end_dictionary(),
            "array" | "true" | "false" | "null" => self.pop(),
            "string" => self.end_string(),
            "integer" => self.end_integer(),
            "real" => self.end_real(),
            "data" => self.end_data(),
            "date" => self.end_date(),
            other => Err(PlistParseError::UnknownElement(other.to_string())),
        }
    }

    /// Buffer text for the open leaf or key; only whitespace may appear
    /// anywhere else
    fn on_character_data(&mut self, text: &str) -> Result<(), PlistParseError> {
        if !self.is_expecting_cdata() {
            if text.chars().any(|chr| !chr.is_whitespace()) {
                return Err(PlistParseError::UnexpectedCharacterData);
            }
            return Ok(());
        }

        self.cdata.push_str(text);
        Ok(())
    }

    fn in_array(&self) -> bool {
        matches!(
            self.current,
            Some(Frame {
                object: Object::Array(_),
                ..
            })
        )
    }

    fn in_dictionary(&self) -> bool {
        matches!(
            self.current,
            Some(Frame {
                object: Object::Dictionary(_),
                ..
            })
        )
    }

    /// Whether a new element may begin here: awaiting the root object, or
    /// inside one of the two container types
    fn in_container(&self, depth: usize) -> bool {
        depth == 1 || self.in_array() || self.in_dictionary()
    }

    /// Whether the enclosing dictionary has no captured key yet
    fn is_expecting_key(&self) -> bool {
        matches!(
            self.current,
            Some(Frame {
                object: Object::Dictionary(_),
                key: KeyState::AwaitingKey | KeyState::KeyActive,
            })
        )
    }

    /// Whether buffered character data belongs to the current frame: text
    /// leaves take cdata, as does a dictionary collecting a `<key>`
    fn is_expecting_cdata(&self) -> bool {
        match &self.current {
            Some(Frame { object, key }) => match object {
                Object::Integer(_)
                | Object::Real(_)
                | Object::String(_)
                | Object::Data(_)
                | Object::Date(_) => true,
                Object::Dictionary(_) => *key == KeyState::KeyActive,
                _ => false,
            },
            None => false,
        }
    }

    /// Map an opening element onto the object it constructs
    fn begin_object(&mut self, name: &str, depth: usize) -> Result<(), PlistParseError> {
        if self.in_dictionary() {
            if name == "key" {
                if !self.is_expecting_key() {
                    return Err(PlistParseError::UnexpectedKey);
                }
                return self.begin_key();
            } else if self.is_expecting_key() {
                return Err(PlistParseError::ExpectedKey(name.to_string()));
            }
        }

        if !self.in_container(depth) {
            return Err(PlistParseError::NotInContainer(name.to_string()));
        }

        match name {
            "array" => self.push(Object::Array(vec![])),
            "dict" => self.push(Object::Dictionary(IndexMap::new())),
            "string" => self.push_leaf(Object::String(String::new())),
            "integer" => self.push_leaf(Object::Integer(0)),
            "real" => self.push_leaf(Object::Real(0.0)),
            "true" => self.push(Object::Boolean(true)),
            "false" => self.push(Object::Boolean(false)),
            "null" => self.push(Object::Null),
            "data" => self.push_leaf(Object::Data(vec![])),
            "date" => self.push_leaf(Object::Date(DateTime::UNIX_EPOCH)),
            other => return Err(PlistParseError::UnknownElement(other.to_string())),
        }
        Ok(())
    }

    /// Save the current frame and make `object` the innermost one
    fn push(&mut self, object: Object) {
        if let Some(frame) = self.current.take() {
            self.stack.push(frame);
        }
        self.current = Some(Frame::new(object));
        self.seen_root = true;
    }

    /// Push a leaf that collects text, discarding any buffered whitespace
    fn push_leaf(&mut self, object: Object) {
        self.push(object);
        self.cdata.clear();
    }

    /// Close the innermost frame and attach its object to the parent.
    ///
    /// The outermost object has no parent; it moves into the root slot
    /// instead. A dictionary parent consumes its captured key; an array
    /// parent appends.
    fn pop(&mut self) -> Result<(), PlistParseError> {
        let finished = match self.current.take() {
            Some(frame) => frame,
            None => return Err(PlistParseError::StackUnderflow),
        };

        match self.stack.pop() {
            Some(mut parent) => {
                match &mut parent.object {
                    Object::Array(children) => children.push(finished.object),
                    Object::Dictionary(entries) => {
                        if let KeyState::KeyReady(key) = mem::take(&mut parent.key) {
                            entries.insert(key, finished.object);
                        }
                    }
                    _ => {}
                }
                self.current = Some(parent);
            }
            None => self.root = Some(finished.object),
        }

        self.cdata.clear();
        Ok(())
    }

    fn begin_key(&mut self) -> Result<(), PlistParseError> {
        if let Some(frame) = &mut self.current {
            frame.key = KeyState::KeyActive;
        }
        self.cdata.clear();
        Ok(())
    }

    /// Capture the collected text as the dictionary's pending key
    fn end_key(&mut self) -> Result<(), PlistParseError> {
        if let Some(frame) = &mut self.current {
            frame.key = KeyState::KeyReady(mem::take(&mut self.cdata));
        }
        Ok(())
    }

    fn end_dictionary(&mut self) -> Result<(), PlistParseError> {
        if let Some(Frame {
            key: KeyState::KeyReady(key),
            ..
        }) = &self.current
        {
            return Err(PlistParseError::DanglingKey(key.clone()));
        }
        self.pop()
    }

    fn end_string(&mut self) -> Result<(), PlistParseError> {
        if let Some(frame) = &mut self.current {
            frame.object = Object::String(mem::take(&mut self.cdata));
        }
        self.pop()
    }

    fn end_integer(&mut self) -> Result<(), PlistParseError> {
        if let Some(frame) = &mut self.current {
            frame.object = Object::integer_from(&self.cdata)?;
        }
        self.pop()
    }

    fn end_real(&mut self) -> Result<(), PlistParseError> {
        if let Some(frame) = &mut self.current {
            frame.object = Object::real_from(&self.cdata)?;
        }
        self.pop()
    }

    fn end_data(&mut self) -> Result<(), PlistParseError> {
        if let Some(frame) = &mut self.current {
            frame.object = Object::data_from(&self.cdata)?;
        }
        self.pop()
    }

    fn end_date(&mut self) -> Result<(), PlistParseError> {
        if let Some(frame) = &mut self.current {
            frame.object = Object::date_from(&self.cdata)?;
        }
        self.pop()
    }
}

/// Element names and CDATA payloads must be UTF-8
fn as_utf8(bytes: &[u8]) -> Result<&str, PlistParseError> {
    std::str::from_utf8(bytes).map_err(PlistParseError::InvalidText)
}
