// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// `apply from:` the library's codepush.gradle in the app build script.

use codepush_core::error::{PluginError, Result};
use codepush_core::types::{GradleLanguage, NativeFile};
use codepush_project::SourceFile;
use tracing::debug;

/// Marker comment guarding the appended directive.
pub const GRADLE_MARKER: &str = "@appzung/react-native-code-push-gradle";

pub const APPLY_FROM: &str =
    r#"apply from: "../../node_modules/@appzung/react-native-code-push/android/codepush.gradle""#;

/// Append the marker and `apply from:` line unless the marker is present.
/// Only Groovy build scripts are accepted.
pub fn apply_code_push_gradle(gradle: &mut SourceFile<GradleLanguage>) -> Result<()> {
    match gradle.language {
        GradleLanguage::Groovy => {}
        GradleLanguage::Kotlin => {
            return Err(PluginError::UnsupportedLanguage {
                file: NativeFile::AppBuildGradle,
                language: gradle.language.to_string(),
            });
        }
    }

    if gradle.contents.contains(GRADLE_MARKER) {
        debug!("codepush.gradle already applied");
        return Ok(());
    }

    gradle.contents.push_str(&format!("\n// {GRADLE_MARKER}\n{APPLY_FROM}\n"));
    debug!("codepush.gradle applied");
    Ok(())
}
