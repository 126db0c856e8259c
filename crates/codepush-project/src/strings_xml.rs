// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Android `res/values/strings.xml`.
//
// The document is modelled as the ordered children of `<resources>`. Each
// child keeps its attributes and inner content in escaped form so that items
// the plugin does not touch are written back unchanged. Comments and the XML
// declaration are not preserved.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use codepush_core::error::{PluginError, Result};
use quick_xml::escape::{escape, unescape};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use tracing::debug;

use crate::project::ProjectFile;

const ROOT: &str = "resources";

fn xml_err(e: impl std::fmt::Display) -> PluginError {
    PluginError::Xml(e.to_string())
}

/// One child element of `<resources>`, e.g. `<string name="app_name">demo</string>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceItem {
    /// Element name (`string`, `bool`, `string-array`, ...).
    pub tag: String,
    /// Attributes in document order, values escaped.
    pub attributes: Vec<(String, String)>,
    /// Inner content, escaped. Empty for self-closing elements.
    pub value: String,
}

impl ResourceItem {
    /// A `<string>` resource. `value` is plain text and is escaped here.
    pub fn string(name: &str, value: &str, translatable: bool) -> Self {
        let mut attributes = vec![("name".to_string(), escape(name).into_owned())];
        if !translatable {
            attributes.push(("translatable".to_string(), "false".to_string()));
        }
        Self {
            tag: "string".into(),
            attributes,
            value: escape(value).into_owned(),
        }
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn name(&self) -> Option<&str> {
        self.attribute("name")
    }

    pub fn is_translatable(&self) -> bool {
        self.attribute("translatable") != Some("false")
    }

    /// Inner content with XML entities resolved.
    pub fn text(&self) -> Result<Cow<'_, str>> {
        unescape(&self.value).map_err(xml_err)
    }
}

/// Parsed `strings.xml`.
#[derive(Debug, Clone)]
pub struct StringsXml {
    path: PathBuf,
    root_attributes: Vec<(String, String)>,
    items: Vec<ResourceItem>,
    original: Vec<ResourceItem>,
}

impl StringsXml {
    /// Read `path`; a missing file is treated as an empty `<resources/>`.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let xml = match std::fs::read_to_string(&path) {
            Ok(xml) => xml,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "strings.xml missing, starting empty");
                String::new()
            }
            Err(e) => return Err(e.into()),
        };
        Self::parse(path, &xml)
    }

    pub fn parse(path: impl Into<PathBuf>, xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        let mut root_attributes = Vec::new();
        let mut items = Vec::new();
        let mut current: Option<(ResourceItem, Writer<Vec<u8>>)> = None;
        let mut depth = 0usize;

        loop {
            match reader.read_event().map_err(xml_err)? {
                Event::Eof => break,
                Event::Start(e) => {
                    depth += 1;
                    match depth {
                        1 => root_attributes = read_root(&e)?,
                        2 => current = Some((read_item(&e)?, Writer::new(Vec::new()))),
                        _ => write_inner(&mut current, Event::Start(e))?,
                    }
                }
                Event::Empty(e) => match depth {
                    0 => root_attributes = read_root(&e)?,
                    1 => items.push(read_item(&e)?),
                    _ => write_inner(&mut current, Event::Empty(e))?,
                },
                Event::End(e) => {
                    match depth {
                        0 => return Err(xml_err("unexpected closing tag")),
                        2 => {
                            if let Some((mut item, writer)) = current.take() {
                                item.value = String::from_utf8(writer.into_inner()).map_err(xml_err)?;
                                items.push(item);
                            }
                        }
                        1 => {}
                        _ => write_inner(&mut current, Event::End(e))?,
                    }
                    depth -= 1;
                }
                // Text between items, comments, declarations: dropped.
                other if depth >= 2 => write_inner(&mut current, other)?,
                _ => {}
            }
        }

        if depth != 0 {
            return Err(xml_err("unexpected end of document"));
        }

        Ok(Self {
            path: path.into(),
            root_attributes,
            original: items.clone(),
            items,
        })
    }

    pub fn items(&self) -> &[ResourceItem] {
        &self.items
    }

    /// First `<string>` item with the given name.
    pub fn get_string(&self, name: &str) -> Option<&ResourceItem> {
        self.items
            .iter()
            .find(|item| item.tag == "string" && item.name() == Some(name))
    }

    /// Insert items, replacing any existing item with the same element and
    /// name in place; new names are appended.
    pub fn set_items(&mut self, new_items: impl IntoIterator<Item = ResourceItem>) {
        for new_item in new_items {
            let existing = self
                .items
                .iter()
                .position(|item| item.tag == new_item.tag && item.name() == new_item.name());
            match existing {
                Some(index) => self.items[index] = new_item,
                None => self.items.push(new_item),
            }
        }
    }

    /// Serialize with two-space indentation and no XML declaration.
    pub fn to_xml(&self) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        let mut root = BytesStart::new(ROOT);
        for (key, value) in &self.root_attributes {
            root.push_attribute((key.as_bytes(), value.as_bytes()));
        }
        writer.write_event(Event::Start(root)).map_err(xml_err)?;

        for item in &self.items {
            let mut start = BytesStart::new(item.tag.as_str());
            for (key, value) in &item.attributes {
                start.push_attribute((key.as_bytes(), value.as_bytes()));
            }
            if item.value.is_empty() {
                writer.write_event(Event::Empty(start)).map_err(xml_err)?;
            } else {
                writer.write_event(Event::Start(start)).map_err(xml_err)?;
                writer
                    .write_event(Event::Text(BytesText::from_escaped(item.value.as_str())))
                    .map_err(xml_err)?;
                writer
                    .write_event(Event::End(BytesEnd::new(item.tag.as_str())))
                    .map_err(xml_err)?;
            }
        }

        writer
            .write_event(Event::End(BytesEnd::new(ROOT)))
            .map_err(xml_err)?;

        let mut xml = String::from_utf8(writer.into_inner()).map_err(xml_err)?;
        xml.push('\n');
        Ok(xml)
    }
}

fn read_attributes(e: &BytesStart<'_>) -> Result<Vec<(String, String)>> {
    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(xml_err)?;
        attributes.push((
            String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
            String::from_utf8_lossy(&attr.value).into_owned(),
        ));
    }
    Ok(attributes)
}

fn read_root(e: &BytesStart<'_>) -> Result<Vec<(String, String)>> {
    if e.name().as_ref() != ROOT.as_bytes() {
        return Err(xml_err(format!(
            "expected <{ROOT}> root, found <{}>",
            String::from_utf8_lossy(e.name().as_ref())
        )));
    }
    read_attributes(e)
}

fn read_item(e: &BytesStart<'_>) -> Result<ResourceItem> {
    Ok(ResourceItem {
        tag: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
        attributes: read_attributes(e)?,
        value: String::new(),
    })
}

fn write_inner(current: &mut Option<(ResourceItem, Writer<Vec<u8>>)>, event: Event<'_>) -> Result<()> {
    if let Some((_, writer)) = current.as_mut() {
        writer.write_event(event).map_err(xml_err)?;
    }
    Ok(())
}

impl ProjectFile for StringsXml {
    fn path(&self) -> &Path {
        &self.path
    }

    fn is_modified(&self) -> bool {
        self.items != self.original
    }

    fn render(&self) -> Result<Vec<u8>> {
        Ok(self.to_xml()?.into_bytes())
    }

    fn mark_saved(&mut self) {
        self.original = self.items.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<resources xmlns:tools="http://schemas.android.com/tools">
  <string name="app_name">Tom &amp; Jerry</string>
  <string name="expo_system_ui_user_interface_style" translatable="false">automatic</string>
  <!-- dropped -->
  <string-array name="planets"><item>Mercury</item><item>Venus</item></string-array>
  <bool name="flag"/>
</resources>
"#;

    #[test]
    fn parse_keeps_items_in_order() {
        let doc = StringsXml::parse("strings.xml", SAMPLE).unwrap();
        let names: Vec<_> = doc.items().iter().filter_map(ResourceItem::name).collect();
        assert_eq!(
            names,
            ["app_name", "expo_system_ui_user_interface_style", "planets", "flag"]
        );
        let app_name = doc.get_string("app_name").unwrap();
        assert_eq!(app_name.value, "Tom &amp; Jerry");
        assert_eq!(app_name.text().unwrap(), "Tom & Jerry");
        assert!(!doc.get_string("expo_system_ui_user_interface_style").unwrap().is_translatable());
    }

    #[test]
    fn nested_content_is_kept_verbatim() {
        let doc = StringsXml::parse("strings.xml", SAMPLE).unwrap();
        let planets = &doc.items()[2];
        assert_eq!(planets.tag, "string-array");
        assert_eq!(planets.value, "<item>Mercury</item><item>Venus</item>");
    }

    #[test]
    fn set_items_replaces_by_name() {
        let mut doc = StringsXml::parse("strings.xml", SAMPLE).unwrap();
        doc.set_items([ResourceItem::string("app_name", "renamed", true)]);
        assert_eq!(doc.items().len(), 4);
        assert_eq!(doc.items()[0].value, "renamed");
        assert!(doc.is_modified());

        doc.set_items([ResourceItem::string("extra", "<x>", false)]);
        assert_eq!(doc.items().len(), 5);
        assert_eq!(doc.items()[4].value, "&lt;x&gt;");
    }

    #[test]
    fn serializes_and_reparses() {
        let mut doc = StringsXml::parse("strings.xml", SAMPLE).unwrap();
        doc.set_items([ResourceItem::string("CodePushReleaseChannelPublicId", "abc123", false)]);
        let xml = doc.to_xml().unwrap();
        assert!(xml.starts_with("<resources xmlns:tools=\"http://schemas.android.com/tools\">"));
        assert!(xml.contains(
            r#"<string name="CodePushReleaseChannelPublicId" translatable="false">abc123</string>"#
        ));
        assert!(!xml.contains("dropped"));

        let reparsed = StringsXml::parse("strings.xml", &xml).unwrap();
        assert_eq!(reparsed.items(), doc.items());
    }

    #[test]
    fn empty_input_is_empty_document() {
        let doc = StringsXml::parse("strings.xml", "").unwrap();
        assert!(doc.items().is_empty());
        let xml = doc.to_xml().unwrap();
        assert!(xml.starts_with("<resources>"));
        assert!(xml.trim_end().ends_with("</resources>"));
    }

    #[test]
    fn wrong_root_rejected() {
        let err = StringsXml::parse("strings.xml", "<manifest/>").unwrap_err();
        assert!(matches!(err, PluginError::Xml(_)));
    }

    #[test]
    fn missing_file_loads_empty_and_saves() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("res/values/strings.xml");
        let mut doc = StringsXml::load(&path).unwrap();
        doc.set_items([ResourceItem::string("a", "b", false)]);
        doc.save().unwrap();
        let reloaded = StringsXml::load(&path).unwrap();
        assert_eq!(reloaded.get_string("a").unwrap().value, "b");
    }
}
