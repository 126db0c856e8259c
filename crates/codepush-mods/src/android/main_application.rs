// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Kotlin `MainApplication`: resolve the JS bundle file through CodePush.

use std::sync::LazyLock;

use codepush_core::error::{PluginError, Result};
use codepush_core::types::{JvmLanguage, NativeFile};
use codepush_project::SourceFile;
use regex::Regex;
use tracing::debug;

use crate::codemod::add_imports;
use crate::generate_code::{MergeOptions, merge_contents};

/// Tag of the generated block holding the override.
pub const MAIN_APPLICATION_TAG: &str = "@appzung/react-native-code-push-main-application-kt";

pub const CODE_PUSH_CLASS: &str = "com.appzung.codepush.react.CodePush";

pub const GET_JS_BUNDLE_FILE_OVERRIDE: &str = "          override fun getJSBundleFile(): String {
              return CodePush.getJSBundleFile()
          }";

static USE_DEVELOPER_SUPPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"override fun getUseDeveloperSupport\(\): Boolean = BuildConfig\.DEBUG")
        .expect("invalid getUseDeveloperSupport regex")
});

/// Import `CodePush` and override `getJSBundleFile()` right after
/// `getUseDeveloperSupport()` in the `ReactNativeHost`.
///
/// The language is checked first, so a Java entry point is rejected with the
/// file left exactly as it was.
pub fn patch_main_application(main: &mut SourceFile<JvmLanguage>) -> Result<()> {
    match main.language {
        JvmLanguage::Kotlin => {}
        JvmLanguage::Java => {
            return Err(PluginError::UnsupportedLanguage {
                file: NativeFile::MainApplication,
                language: main.language.to_string(),
            });
        }
    }

    let imported = add_imports(&main.contents, &[CODE_PUSH_CLASS], main.language.uses_semicolons());

    let merged = merge_contents(MergeOptions {
        file: NativeFile::MainApplication,
        src: &imported,
        new_src: GET_JS_BUNDLE_FILE_OVERRIDE,
        tag: MAIN_APPLICATION_TAG,
        anchor: &USE_DEVELOPER_SUPPORT,
        offset: 1,
        comment: "//",
    })?;

    debug!(did_merge = merged.did_merge, "MainApplication patched");
    main.contents = merged.contents;
    Ok(())
}
