// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the people running prebuild.
//
// Every technical error is mapped to a plain summary with a concrete next step.

use crate::config::RELEASE_CHANNEL_KEY;
use crate::error::PluginError;
use crate::types::{NativeFile, PACKAGE_NAME};

/// A human-readable error with a plain message and an actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// One-line summary (printed first).
    pub message: String,
    /// What the user should try next.
    pub suggestion: String,
}

/// Convert a `PluginError` into a `HumanError`.
pub fn humanize_error(err: &PluginError) -> HumanError {
    match err {
        PluginError::MissingField { platform, field } => HumanError {
            message: format!("The {platform} block of the {PACKAGE_NAME} plugin has no {field}."),
            suggestion: if *field == RELEASE_CHANNEL_KEY {
                format!(
                    "Add \"{field}\" to the {platform} options in app.json, or pass --{platform}-release-channel."
                )
            } else {
                format!("Add \"{field}\" to the {platform} options in app.json.")
            },
        },

        PluginError::InvalidConfig(detail) => HumanError {
            message: "The plugin configuration could not be understood.".into(),
            suggestion: format!(
                "Check the plugins array in app.json: the entry should look like [\"{PACKAGE_NAME}\", {{ \"ios\": {{ ... }} }}]. ({detail})"
            ),
        },

        PluginError::UnsupportedLanguage { file, language } => HumanError {
            message: format!("{file} is written in {language}, which this plugin cannot edit."),
            suggestion: match file {
                NativeFile::AppDelegate => {
                    "Use an Objective-C (.m) or Objective-C++ (.mm) AppDelegate, or wire CodePush into it by hand.".into()
                }
                NativeFile::AppBuildGradle => {
                    "Use a Groovy build.gradle, or add the codepush.gradle apply line by hand.".into()
                }
                NativeFile::MainApplication => {
                    "Use a Kotlin MainApplication.kt, or override getJSBundleFile() by hand.".into()
                }
                NativeFile::InfoPlist | NativeFile::StringsXml => {
                    "Regenerate the native project with a clean prebuild.".into()
                }
            },
        },

        PluginError::AnchorNotFound { file, anchor } => HumanError {
            message: format!("Could not find where to insert CodePush code in {file}."),
            suggestion: format!(
                "The file no longer contains a line matching `{anchor}`. Regenerate it with a clean prebuild or restore that line."
            ),
        },

        PluginError::ProjectLayout(detail) => HumanError {
            message: "The native project files could not be found.".into(),
            suggestion: format!(
                "Run the command from the app root (the folder containing ios/ and android/), or pass --project-root. ({detail})"
            ),
        },

        PluginError::Plist(detail) => HumanError {
            message: "Info.plist could not be read or written.".into(),
            suggestion: format!("Check that Info.plist is a valid property list. ({detail})"),
        },

        PluginError::Xml(detail) => HumanError {
            message: "strings.xml could not be read or written.".into(),
            suggestion: format!("Check that strings.xml is well-formed XML. ({detail})"),
        },

        PluginError::Io(io_err) => HumanError {
            message: "A project file could not be read or written.".into(),
            suggestion: format!("Check the file exists and is writable. ({io_err})"),
        },

        PluginError::Serialization(detail) => HumanError {
            message: "The JSON configuration is not valid.".into(),
            suggestion: format!("Fix the JSON syntax in the props or app config file. ({detail})"),
        },
    }
}
