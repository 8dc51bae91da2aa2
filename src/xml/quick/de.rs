//! Deserialization helpers for quick-xml.
//!
//! Provides:
//! - `Attrs`: decoded attribute map with typed getters
//! - `read_root`: locate the document element and decode its attributes

use std::collections::HashMap;
use std::io::BufRead;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::xml::errors::DeserializeError;

/// A parsed attribute map that owns decoded string values.
#[derive(Debug, Clone, Default)]
pub struct Attrs {
    map: HashMap<String, String>,
}

impl Attrs {
    /// Parse attributes from a `BytesStart` event.
    ///
    /// This decodes and unescapes all attribute values once.
    pub fn from_start<R: BufRead>(
        start: &BytesStart<'_>,
        reader: &Reader<R>,
    ) -> Result<Self, DeserializeError> {
        let mut map = HashMap::new();

        for attr_result in start.attributes() {
            let attr = attr_result?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
            let value = attr.decode_and_unescape_value(reader)?.to_string();
            map.insert(key, value);
        }

        Ok(Self { map })
    }

    /// Get an optional i32 attribute.
    ///
    /// Surrounding whitespace is ignored; anything else that is not an
    /// integer is a [`DeserializeError::Format`].
    pub fn get_opt_i32(&self, key: &'static str) -> Result<Option<i32>, DeserializeError> {
        match self.map.get(key) {
            Some(s) => s
                .trim()
                .parse::<i32>()
                .map(Some)
                .map_err(|_| DeserializeError::Format {
                    attribute: key,
                    value: s.clone(),
                }),
            None => Ok(None),
        }
    }
}

/// Advance `reader` to the document element and decode its attributes.
///
/// Declarations, comments and processing instructions before the root are
/// skipped.
pub fn read_root<R: BufRead>(reader: &mut Reader<R>) -> Result<Attrs, DeserializeError> {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) => return Attrs::from_start(&e, reader),
            Event::Eof => return Err(DeserializeError::MissingRoot),
            _ => {}
        }
    }
}
