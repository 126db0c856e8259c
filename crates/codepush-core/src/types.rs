// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the CodePush plugin.
//
// Source dialects are closed enums: every modifier matches on them
// exhaustively, so "unsupported language" is a branch the compiler checks
// rather than a string comparison.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// npm package name of the update library; also the run-once key.
pub const PACKAGE_NAME: &str = "@appzung/react-native-code-push";

/// Version recorded in the run-once history.
pub const PACKAGE_VERSION: &str = "UNVERSIONED";

/// Target platform of a props block or native file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    Android,
}

impl Platform {
    pub const ALL: [Platform; 2] = [Platform::Ios, Platform::Android];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ios => "ios",
            Self::Android => "android",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The native files this plugin knows how to edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NativeFile {
    /// `ios/<App>/Info.plist`
    InfoPlist,
    /// `ios/<App>/AppDelegate.{m,mm,swift}`
    AppDelegate,
    /// `android/app/src/main/res/values/strings.xml`
    StringsXml,
    /// `android/app/build.gradle[.kts]`
    AppBuildGradle,
    /// `android/app/src/main/{java,kotlin}/**/MainApplication.{java,kt}`
    MainApplication,
}

impl NativeFile {
    pub const ALL: [NativeFile; 5] = [
        NativeFile::InfoPlist,
        NativeFile::AppDelegate,
        NativeFile::StringsXml,
        NativeFile::AppBuildGradle,
        NativeFile::MainApplication,
    ];

    pub fn platform(&self) -> Platform {
        match self {
            Self::InfoPlist | Self::AppDelegate => Platform::Ios,
            Self::StringsXml | Self::AppBuildGradle | Self::MainApplication => Platform::Android,
        }
    }

    /// Short human label used in errors and reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::InfoPlist => "Info.plist",
            Self::AppDelegate => "AppDelegate",
            Self::StringsXml => "strings.xml",
            Self::AppBuildGradle => "build.gradle",
            Self::MainApplication => "MainApplication",
        }
    }
}

impl fmt::Display for NativeFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A source dialect that can be detected from a file path.
pub trait SourceLanguage: Copy + Eq + fmt::Debug + fmt::Display {
    /// Infer the dialect from the file name, or `None` if unrecognised.
    fn detect(path: &Path) -> Option<Self>;
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// Language of the iOS application delegate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppleLanguage {
    /// Objective-C (`.m`)
    ObjC,
    /// Objective-C++ (`.mm`)
    ObjCpp,
    /// Swift (`.swift`)
    Swift,
}

impl AppleLanguage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ObjC => "objc",
            Self::ObjCpp => "objcpp",
            Self::Swift => "swift",
        }
    }
}

impl SourceLanguage for AppleLanguage {
    fn detect(path: &Path) -> Option<Self> {
        match extension(path)?.as_str() {
            "m" => Some(Self::ObjC),
            "mm" => Some(Self::ObjCpp),
            "swift" => Some(Self::Swift),
            _ => None,
        }
    }
}

impl fmt::Display for AppleLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dialect of the Android app build script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradleLanguage {
    /// `build.gradle`
    Groovy,
    /// `build.gradle.kts`
    Kotlin,
}

impl GradleLanguage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Groovy => "groovy",
            Self::Kotlin => "kt",
        }
    }
}

impl SourceLanguage for GradleLanguage {
    fn detect(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_ascii_lowercase();
        if name.ends_with(".gradle.kts") {
            Some(Self::Kotlin)
        } else if name.ends_with(".gradle") {
            Some(Self::Groovy)
        } else {
            None
        }
    }
}

impl fmt::Display for GradleLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Language of the Android application entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JvmLanguage {
    Java,
    Kotlin,
}

impl JvmLanguage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Java => "java",
            Self::Kotlin => "kt",
        }
    }

    /// Whether `import` statements end with a semicolon.
    pub fn uses_semicolons(&self) -> bool {
        matches!(self, Self::Java)
    }
}

impl SourceLanguage for JvmLanguage {
    fn detect(path: &Path) -> Option<Self> {
        match extension(path)?.as_str() {
            "java" => Some(Self::Java),
            "kt" => Some(Self::Kotlin),
            _ => None,
        }
    }
}

impl fmt::Display for JvmLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of a config plugin in the run-once history.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PluginId {
    pub name: String,
    pub version: String,
}

impl PluginId {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// Identity of this package.
    pub fn code_push() -> Self {
        Self::new(PACKAGE_NAME, PACKAGE_VERSION)
    }
}

impl fmt::Display for PluginId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}
