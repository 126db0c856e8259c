// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// iOS `Info.plist`: property list read into a dictionary, written back as XML.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use codepush_core::error::{PluginError, Result};
use plist::{Dictionary, Value};
use tracing::debug;

use crate::project::ProjectFile;

fn plist_err(e: plist::Error) -> PluginError {
    PluginError::Plist(e.to_string())
}

/// The application's property list.
#[derive(Debug, Clone)]
pub struct InfoPlist {
    path: PathBuf,
    dict: Dictionary,
    original: Dictionary,
}

impl InfoPlist {
    /// Read an XML or binary property list whose root is a dictionary.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let value = Value::from_file(&path).map_err(plist_err)?;
        let dict = into_root_dictionary(value, &path)?;
        debug!(path = %path.display(), keys = dict.len(), "loaded Info.plist");
        Ok(Self::from_dictionary(path, dict))
    }

    /// Parse property list bytes already in memory.
    pub fn parse(path: impl Into<PathBuf>, bytes: &[u8]) -> Result<Self> {
        let path = path.into();
        let value = Value::from_reader(Cursor::new(bytes)).map_err(plist_err)?;
        let dict = into_root_dictionary(value, &path)?;
        Ok(Self::from_dictionary(path, dict))
    }

    pub fn from_dictionary(path: impl Into<PathBuf>, dict: Dictionary) -> Self {
        Self {
            path: path.into(),
            original: dict.clone(),
            dict,
        }
    }

    pub fn dict(&self) -> &Dictionary {
        &self.dict
    }

    pub fn dict_mut(&mut self) -> &mut Dictionary {
        &mut self.dict
    }

    /// String value of `key`, if present and a string.
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.dict.get(key).and_then(Value::as_string)
    }

    /// Serialize to XML property list text.
    pub fn to_xml(&self) -> Result<String> {
        String::from_utf8(self.render()?).map_err(|e| PluginError::Plist(e.to_string()))
    }
}

fn into_root_dictionary(value: Value, path: &Path) -> Result<Dictionary> {
    value.into_dictionary().ok_or_else(|| {
        PluginError::Plist(format!("{}: root element is not a dictionary", path.display()))
    })
}

impl ProjectFile for InfoPlist {
    fn path(&self) -> &Path {
        &self.path
    }

    fn is_modified(&self) -> bool {
        self.dict != self.original
    }

    fn render(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        Value::Dictionary(self.dict.clone())
            .to_writer_xml(&mut out)
            .map_err(plist_err)?;
        Ok(out)
    }

    fn mark_saved(&mut self) {
        self.original = self.dict.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
	<key>CFBundleDisplayName</key>
	<string>demo</string>
	<key>LSRequiresIPhoneOS</key>
	<true/>
</dict>
</plist>
"#;

    #[test]
    fn parse_reads_root_dictionary() {
        let plist = InfoPlist::parse("Info.plist", SAMPLE.as_bytes()).unwrap();
        assert_eq!(plist.get_string("CFBundleDisplayName"), Some("demo"));
        assert!(!plist.is_modified());
    }

    #[test]
    fn non_dictionary_root_rejected() {
        let array = r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0"><array><string>a</string></array></plist>"#;
        let err = InfoPlist::parse("Info.plist", array.as_bytes()).unwrap_err();
        assert!(matches!(err, PluginError::Plist(_)));
    }

    #[test]
    fn save_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Info.plist");
        std::fs::write(&path, SAMPLE).unwrap();

        let mut plist = InfoPlist::load(&path).unwrap();
        plist
            .dict_mut()
            .insert("CodePushReleaseChannelPublicId".into(), Value::String("abc".into()));
        assert!(plist.is_modified());
        plist.save().unwrap();

        let reloaded = InfoPlist::load(&path).unwrap();
        assert_eq!(reloaded.get_string("CodePushReleaseChannelPublicId"), Some("abc"));
        assert_eq!(reloaded.get_string("CFBundleDisplayName"), Some("demo"));
    }
}
