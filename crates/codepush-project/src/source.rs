// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text source files tagged with their detected dialect.

use std::path::{Path, PathBuf};

use codepush_core::error::{PluginError, Result};
use codepush_core::types::{NativeFile, SourceLanguage};
use tracing::debug;

use crate::project::ProjectFile;

/// A native source or build file: path, language tag, and current contents.
///
/// The contents as loaded are kept alongside so that write-back can skip
/// files a pass did not change.
#[derive(Debug, Clone)]
pub struct SourceFile<L: SourceLanguage> {
    path: PathBuf,
    kind: NativeFile,
    pub language: L,
    pub contents: String,
    original: String,
}

impl<L: SourceLanguage> SourceFile<L> {
    /// Read `path` and detect its language from the file name.
    pub fn load(path: impl Into<PathBuf>, kind: NativeFile) -> Result<Self> {
        let path = path.into();
        let language = L::detect(&path).ok_or_else(|| PluginError::UnsupportedLanguage {
            file: kind,
            language: path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("unknown")
                .to_string(),
        })?;
        let contents = std::fs::read_to_string(&path)?;
        debug!(path = %path.display(), %language, "loaded {kind}");
        Ok(Self::from_contents(path, kind, language, contents))
    }

    /// Build an in-memory file (used when the caller already holds the text).
    pub fn from_contents(
        path: impl Into<PathBuf>,
        kind: NativeFile,
        language: L,
        contents: impl Into<String>,
    ) -> Self {
        let contents = contents.into();
        Self {
            path: path.into(),
            kind,
            language,
            original: contents.clone(),
            contents,
        }
    }

    pub fn kind(&self) -> NativeFile {
        self.kind
    }

    /// Contents as they were when the file was loaded.
    pub fn original(&self) -> &str {
        &self.original
    }
}

impl<L: SourceLanguage> ProjectFile for SourceFile<L> {
    fn path(&self) -> &Path {
        &self.path
    }

    fn is_modified(&self) -> bool {
        self.contents != self.original
    }

    fn render(&self) -> Result<Vec<u8>> {
        Ok(self.contents.as_bytes().to_vec())
    }

    fn mark_saved(&mut self) {
        self.original.clone_from(&self.contents);
    }
}
