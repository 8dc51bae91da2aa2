//! Reading and writing the persisted collection format.
//!
//! ```xml
//! <items count="2">
//!   <item><key>a</key><value>1</value></item>
//!   <item><key>b</key><value>2</value></item>
//! </items>
//! ```
//!
//! The root carries a `count` attribute with the number of `item` children,
//! or `-1` when the container itself was absent. A plain collection stores
//! each element directly inside its `item`; a keyed container stores a
//! `key`/`value` pair.
//!
//! Whitespace at either end of a text run is written as character references
//! so that it survives the trimming element reader.

use std::borrow::Cow;
use std::io::{self, Read, Write};

use log::{debug, warn};
use quick_xml::events::{BytesText, Event};
use quick_xml::{Reader, Writer};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::containers::{Collection, Map};
use crate::xml::XmlOptions;
use crate::xml::errors::{DeserializeError, SerializeError};
use crate::xml::quick::{AttrList, XmlEmitter, read_root};

pub const COUNT_ATTRIBUTE: &str = "count";
pub const ITEM_ELEMENT: &str = "item";

/// `count` value marking an absent container.
pub const ABSENT: i32 = -1;

const XML_WHITESPACE: [char; 4] = [' ', '\t', '\n', '\r'];

/// One persisted map entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry<K, V> {
    pub key: K,
    pub value: V,
}

#[derive(Debug, Deserialize)]
struct PersistedItems<T> {
    #[serde(rename = "item", default = "Vec::new")]
    items: Vec<T>,
}

/// Write `collection` as a persisted document into `sink`.
///
/// `None` is written as an empty root with `count="-1"`.
pub fn write_collection_to<T, C, W>(
    sink: W,
    collection: Option<&C>,
    options: &XmlOptions,
) -> Result<(), SerializeError>
where
    T: Serialize,
    C: Collection<T> + ?Sized,
    W: Write,
{
    write_items(sink, collection.map(|c| c.enumerate()), options)
}

/// Write `collection` as a persisted document and return it as a string.
pub fn write_collection<T, C>(
    collection: Option<&C>,
    options: &XmlOptions,
) -> Result<String, SerializeError>
where
    T: Serialize,
    C: Collection<T> + ?Sized,
{
    let mut output = Vec::new();
    write_collection_to(&mut output, collection, options)?;
    Ok(String::from_utf8(output)?)
}

/// Write `map` as a persisted document of key/value entries into `sink`.
pub fn write_map_to<K, V, M, W>(
    sink: W,
    map: Option<&M>,
    options: &XmlOptions,
) -> Result<(), SerializeError>
where
    K: Serialize,
    V: Serialize,
    M: Map<K, V> + ?Sized,
    W: Write,
{
    let entries = map.map(|m| m.enumerate().map(|(key, value)| Entry { key, value }));
    write_items(sink, entries, options)
}

/// Write `map` as a persisted document and return it as a string.
pub fn write_map<K, V, M>(map: Option<&M>, options: &XmlOptions) -> Result<String, SerializeError>
where
    K: Serialize,
    V: Serialize,
    M: Map<K, V> + ?Sized,
{
    let mut output = Vec::new();
    write_map_to(&mut output, map, options)?;
    Ok(String::from_utf8(output)?)
}

fn write_items<S, I, W>(sink: W, items: Option<I>, options: &XmlOptions) -> Result<(), SerializeError>
where
    S: Serialize,
    I: Iterator<Item = S>,
    W: Write,
{
    // Items are rendered up front so a failing element leaves the sink untouched.
    let fragments = match items {
        Some(items) => Some(
            items
                .map(|item| render_item(&item))
                .collect::<Result<Vec<_>, _>>()?,
        ),
        None => None,
    };

    let mut writer = Writer::new(sink);
    let mut emit = XmlEmitter::new(&mut writer);
    if options.declaration {
        emit.xml_decl()?;
    }

    let mut attrs = AttrList::new();
    match fragments {
        None => {
            attrs.add_i32(COUNT_ATTRIBUTE, ABSENT);
            emit.empty_elem_with_attrs(&options.root, &attrs)?;
            debug!("wrote absent collection as <{}>", options.root);
        }
        Some(fragments) => {
            let count = i32::try_from(fragments.len()).map_err(|_| {
                SerializeError::Custom(format!(
                    "{} items exceed the persisted count range",
                    fragments.len()
                ))
            })?;
            attrs.add_i32(COUNT_ATTRIBUTE, count);
            emit.start_elem(&options.root, &attrs)?;
            for fragment in &fragments {
                emit.fragment(fragment)?;
            }
            emit.write_end(&options.root)?;
            debug!("wrote {} items as <{}>", count, options.root);
        }
    }
    writer.into_inner().flush()?;
    Ok(())
}

/// Serialize one element as a single `item` element.
///
/// Elements that serialize as a sequence of siblings, or as nothing, cannot
/// be told apart on reading and fail with [`SerializeError::Custom`].
fn render_item<S: Serialize>(item: &S) -> Result<String, SerializeError> {
    let fragment = quick_xml::se::to_string_with_root(ITEM_ELEMENT, item)?;
    let mut reader = Reader::from_str(&fragment);
    let mut writer = Writer::new(Vec::with_capacity(fragment.len()));
    let mut depth = 0usize;
    let mut roots = 0usize;
    loop {
        let event = reader.read_event()?;
        match &event {
            Event::Eof => break,
            Event::Start(_) => {
                if depth == 0 {
                    roots += 1;
                }
                depth += 1;
            }
            Event::End(_) => depth = depth.saturating_sub(1),
            Event::Empty(_) if depth == 0 => roots += 1,
            Event::Text(text) => {
                let raw = String::from_utf8(text.to_vec())?;
                let escaped = escape_edge_whitespace(&raw);
                writer.write_event(Event::Text(BytesText::from_escaped(escaped)))?;
                continue;
            }
            _ => {}
        }
        writer.write_event(event)?;
    }

    if roots != 1 {
        return Err(SerializeError::Custom(format!(
            "element serializes as {} <{}> elements instead of one",
            roots, ITEM_ELEMENT
        )));
    }
    Ok(String::from_utf8(writer.into_inner())?)
}

/// Replace leading and trailing whitespace of escaped text with character
/// references.
fn escape_edge_whitespace(text: &str) -> Cow<'_, str> {
    if text.trim_matches(&XML_WHITESPACE[..]).len() == text.len() {
        return Cow::Borrowed(text);
    }
    let lead = text.len() - text.trim_start_matches(&XML_WHITESPACE[..]).len();
    let (head, rest) = text.split_at(lead);
    let (body, tail) = rest.split_at(rest.trim_end_matches(&XML_WHITESPACE[..]).len());

    let mut escaped = String::with_capacity(text.len() + 8);
    escaped.extend(head.chars().map(char_reference));
    escaped.push_str(body);
    escaped.extend(tail.chars().map(char_reference));
    Cow::Owned(escaped)
}

fn char_reference(c: char) -> String {
    format!("&#{};", u32::from(c))
}

/// Read and validate the root `count` attribute.
///
/// A missing attribute reads as 0. A value that is not an integer fails with
/// [`DeserializeError::Format`].
pub fn read_count(xml: &str) -> Result<i32, DeserializeError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let attrs = read_root(&mut reader)?;
    Ok(attrs.get_opt_i32(COUNT_ATTRIBUTE)?.unwrap_or(0))
}

/// Parse the items of a persisted document, or `None` for an absent container.
fn read_items<T: DeserializeOwned>(xml: &str) -> Result<Option<Vec<T>>, DeserializeError> {
    let count = read_count(xml)?;
    if count == ABSENT {
        debug!("persisted document marks an absent collection");
        return Ok(None);
    }

    let document: PersistedItems<T> = quick_xml::de::from_str(xml)?;
    if usize::try_from(count).ok() != Some(document.items.len()) {
        warn!(
            "persisted count {} disagrees with {} items read",
            count,
            document.items.len()
        );
    }
    Ok(Some(document.items))
}

/// Add every persisted element to `target`.
///
/// Returns the number of elements added, or `None` when the document marks an
/// absent collection, in which case `target` is left untouched.
pub fn read_collection_into<T, C>(xml: &str, target: &mut C) -> Result<Option<usize>, DeserializeError>
where
    T: DeserializeOwned,
    C: Collection<T> + ?Sized,
{
    let Some(items) = read_items::<T>(xml)? else {
        return Ok(None);
    };
    let read = items.len();
    for item in items {
        target.add(item)?;
    }
    debug!("read {} items into collection", read);
    Ok(Some(read))
}

/// [`read_collection_into`] over any `io::Read` source.
pub fn read_collection_from<T, C, R>(
    mut source: R,
    target: &mut C,
) -> Result<Option<usize>, DeserializeError>
where
    T: DeserializeOwned,
    C: Collection<T> + ?Sized,
    R: Read,
{
    let xml = read_to_string(&mut source)?;
    read_collection_into(&xml, target)
}

/// Insert every persisted entry into `target`.
///
/// A key already present in `target` fails with the map's
/// [`DuplicateKey`](crate::errors::CollectionError::DuplicateKey).
pub fn read_map_into<K, V, M>(xml: &str, target: &mut M) -> Result<Option<usize>, DeserializeError>
where
    K: DeserializeOwned,
    V: DeserializeOwned,
    M: Map<K, V> + ?Sized,
{
    let Some(entries) = read_items::<Entry<K, V>>(xml)? else {
        return Ok(None);
    };
    let read = entries.len();
    for Entry { key, value } in entries {
        target.insert(key, value)?;
    }
    debug!("read {} entries into map", read);
    Ok(Some(read))
}

/// [`read_map_into`] over any `io::Read` source.
pub fn read_map_from<K, V, M, R>(mut source: R, target: &mut M) -> Result<Option<usize>, DeserializeError>
where
    K: DeserializeOwned,
    V: DeserializeOwned,
    M: Map<K, V> + ?Sized,
    R: Read,
{
    let xml = read_to_string(&mut source)?;
    read_map_into(&xml, target)
}

fn read_to_string<R: Read>(source: &mut R) -> io::Result<String> {
    let mut xml = String::new();
    source.read_to_string(&mut xml)?;
    Ok(xml)
}
