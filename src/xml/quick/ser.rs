//! Serialization helpers for quick-xml.
//!
//! Provides:
//! - `AttrList`: attribute builder that owns formatted values
//! - `XmlEmitter`: element writing helpers

use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::xml::errors::SerializeError;

/// A list of attributes with owned values.
///
/// Owning the formatted values avoids the lifetime issues with
/// `ElementWriter::with_attribute`.
#[derive(Debug, Default)]
pub struct AttrList {
    attrs: Vec<(String, String)>,
}

impl AttrList {
    pub fn new() -> Self {
        Self { attrs: Vec::new() }
    }

    /// Add an i32 attribute.
    pub fn add_i32(&mut self, key: &str, value: i32) -> &mut Self {
        self.attrs.push((key.to_string(), value.to_string()));
        self
    }

    /// Apply all attributes to a BytesStart element.
    pub fn apply_to(&self, start: &mut BytesStart<'_>) {
        for (key, value) in &self.attrs {
            start.push_attribute((key.as_str(), value.as_str()));
        }
    }
}

/// Wraps a quick-xml Writer with the element patterns the persisted format
/// needs.
pub struct XmlEmitter<'a, W: Write> {
    writer: &'a mut Writer<W>,
}

impl<'a, W: Write> XmlEmitter<'a, W> {
    pub fn new(writer: &'a mut Writer<W>) -> Self {
        Self { writer }
    }

    /// Write an XML declaration.
    pub fn xml_decl(&mut self) -> Result<(), SerializeError> {
        let decl = BytesDecl::new("1.0", Some("UTF-8"), None);
        self.writer.write_event(Event::Decl(decl))?;
        Ok(())
    }

    /// Write a start tag with attributes: `<name attr="value">`.
    pub fn start_elem(&mut self, name: &str, attrs: &AttrList) -> Result<(), SerializeError> {
        let mut start = BytesStart::new(name);
        attrs.apply_to(&mut start);
        self.writer.write_event(Event::Start(start))?;
        Ok(())
    }

    /// Write an end tag.
    pub fn write_end(&mut self, name: &str) -> Result<(), SerializeError> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    /// Write an empty element with attributes: `<name attr="value"/>`.
    pub fn empty_elem_with_attrs(
        &mut self,
        name: &str,
        attrs: &AttrList,
    ) -> Result<(), SerializeError> {
        let mut start = BytesStart::new(name);
        attrs.apply_to(&mut start);
        self.writer.write_event(Event::Empty(start))?;
        Ok(())
    }

    /// Write an already-escaped markup fragment verbatim.
    pub fn fragment(&mut self, markup: &str) -> Result<(), SerializeError> {
        self.writer
            .write_event(Event::Text(BytesText::from_escaped(markup)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attr_list_keeps_order() {
        let mut attrs = AttrList::new();
        attrs.add_i32("count", 2).add_i32("version", 1);
        let mut start = BytesStart::new("items");
        attrs.apply_to(&mut start);
        let keys: Vec<Vec<u8>> = start
            .attributes()
            .map(|attr| attr.unwrap().key.as_ref().to_vec())
            .collect();
        assert_eq!(keys, vec![b"count".to_vec(), b"version".to_vec()]);
    }

    #[test]
    fn test_empty_elem_with_attrs() {
        let mut output = Vec::new();
        let mut writer = Writer::new(&mut output);
        let mut emit = XmlEmitter::new(&mut writer);

        let mut attrs = AttrList::new();
        attrs.add_i32("count", -1);
        emit.empty_elem_with_attrs("items", &attrs).unwrap();

        let result = String::from_utf8(output).unwrap();
        assert_eq!(result, r#"<items count="-1"/>"#);
    }

    #[test]
    fn test_element_with_fragment() {
        let mut output = Vec::new();
        let mut writer = Writer::new(&mut output);
        let mut emit = XmlEmitter::new(&mut writer);

        let mut attrs = AttrList::new();
        attrs.add_i32("count", 1);
        emit.start_elem("items", &attrs).unwrap();
        emit.fragment("<item>a &amp; b</item>").unwrap();
        emit.write_end("items").unwrap();

        let result = String::from_utf8(output).unwrap();
        assert_eq!(result, r#"<items count="1"><item>a &amp; b</item></items>"#);
    }
}
