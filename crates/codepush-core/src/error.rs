// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for the CodePush plugin.
//
// Every variant is fatal to a configuration pass: nothing is written back to
// the native project once one of these has been raised.

use thiserror::Error;

use crate::types::{NativeFile, Platform};

/// Top-level error type for all plugin operations.
#[derive(Debug, Error)]
pub enum PluginError {
    // -- Props --
    #[error("missing {platform} {field}")]
    MissingField {
        platform: Platform,
        field: &'static str,
    },

    #[error("invalid plugin configuration: {0}")]
    InvalidConfig(String),

    // -- Native sources --
    #[error("cannot modify {file} as it's not in a supported language: {language}")]
    UnsupportedLanguage { file: NativeFile, language: String },

    #[error("failed to match \"{anchor}\" in {file}")]
    AnchorNotFound { file: NativeFile, anchor: String },

    // -- Project files --
    #[error("native project layout error: {0}")]
    ProjectLayout(String),

    #[error("property list error: {0}")]
    Plist(String),

    #[error("XML resource error: {0}")]
    Xml(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PluginError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_names_platform_and_field() {
        let err = PluginError::MissingField {
            platform: Platform::Ios,
            field: "CodePushReleaseChannelPublicId",
        };
        assert_eq!(err.to_string(), "missing ios CodePushReleaseChannelPublicId");
    }

    #[test]
    fn unsupported_language_mentions_file() {
        let err = PluginError::UnsupportedLanguage {
            file: NativeFile::AppDelegate,
            language: "swift".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("AppDelegate"));
        assert!(msg.ends_with("swift"));
    }
}
