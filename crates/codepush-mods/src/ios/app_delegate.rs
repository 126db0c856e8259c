// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Objective-C application delegate: import the CodePush header and load the
// JS bundle through `[CodePush bundleURL]` in release builds.

use std::sync::LazyLock;

use codepush_core::error::{PluginError, Result};
use codepush_core::types::{AppleLanguage, NativeFile};
use codepush_project::SourceFile;
use regex::{NoExpand, Regex};
use tracing::{debug, warn};

use crate::generate_code::{MergeOptions, merge_contents};

/// Tag of the generated block holding the `#import`.
pub const HEADER_TAG: &str = "@appzung/react-native-code-push-header";

/// Marker comment left above the replaced bundle URL expression.
pub const BUNDLE_MARKER: &str = "@appzung/react-native-code-push-bundle";

pub const CODE_PUSH_IMPORT: &str = "#import <CodePush/CodePush.h>";

static APP_DELEGATE_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"#import "AppDelegate\.h""#).expect("invalid header regex"));

static DEFAULT_BUNDLE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"return \[\[NSBundle mainBundle\] URLForResource:@"main" withExtension:@"jsbundle"\];"#,
    )
    .expect("invalid bundle URL regex")
});

/// Patch the delegate in place.
///
/// Only Objective-C and Objective-C++ are accepted; the language is checked
/// before any edit. The import is idempotent through its tagged block. The
/// bundle URL replacement is not tagged: once the default expression is gone
/// it silently does nothing.
pub fn patch_app_delegate(delegate: &mut SourceFile<AppleLanguage>) -> Result<()> {
    match delegate.language {
        AppleLanguage::ObjC | AppleLanguage::ObjCpp => {}
        AppleLanguage::Swift => {
            return Err(PluginError::UnsupportedLanguage {
                file: NativeFile::AppDelegate,
                language: delegate.language.to_string(),
            });
        }
    }

    let merged = merge_contents(MergeOptions {
        file: NativeFile::AppDelegate,
        src: &delegate.contents,
        new_src: CODE_PUSH_IMPORT,
        tag: HEADER_TAG,
        anchor: &APP_DELEGATE_HEADER,
        offset: 1,
        comment: "//",
    })?;

    let replacement = format!("// {BUNDLE_MARKER}\n  return [CodePush bundleURL];");
    let replaced = DEFAULT_BUNDLE_URL.replace(&merged.contents, NoExpand(&replacement));
    if !DEFAULT_BUNDLE_URL.is_match(&merged.contents) && !merged.contents.contains(BUNDLE_MARKER) {
        warn!(
            "default bundle URL expression not found in AppDelegate; \
             CodePush will not control bundle loading until it is wired by hand"
        );
    }
    let contents = replaced.into_owned();

    debug!(did_merge = merged.did_merge, "AppDelegate patched");
    delegate.contents = contents;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const APP_DELEGATE_MM: &str = r#"#import "AppDelegate.h"

#import <React/RCTBundleURLProvider.h>

@implementation AppDelegate

- (NSURL *)bundleURL
{
#if DEBUG
  return [[RCTBundleURLProvider sharedSettings] jsBundleURLForBundleRoot:@".expo/.virtual-metro-entry"];
#else
  return [[NSBundle mainBundle] URLForResource:@"main" withExtension:@"jsbundle"];
#endif
}

@end
"#;

    fn delegate(language: AppleLanguage, contents: &str) -> SourceFile<AppleLanguage> {
        SourceFile::from_contents("AppDelegate.mm", NativeFile::AppDelegate, language, contents)
    }

    fn import_section(contents: &str) -> Vec<&str> {
        contents.lines().take_while(|line| !line.starts_with("@implementation")).collect()
    }

    #[test]
    fn inserts_import_after_header() {
        let mut file = delegate(AppleLanguage::ObjCpp, APP_DELEGATE_MM);
        patch_app_delegate(&mut file).unwrap();

        let lines: Vec<_> = file.contents.lines().collect();
        assert_eq!(lines[0], "#import \"AppDelegate.h\"");
        assert!(lines[1].starts_with(&format!("// @generated begin {HEADER_TAG} - ")));
        assert_eq!(lines[2], CODE_PUSH_IMPORT);
        assert_eq!(lines[3], format!("// @generated end {HEADER_TAG}"));
    }

    #[test]
    fn replaces_release_bundle_url() {
        let mut file = delegate(AppleLanguage::ObjC, APP_DELEGATE_MM);
        patch_app_delegate(&mut file).unwrap();

        assert!(!file.contents.contains("URLForResource:@\"main\""));
        assert!(file.contents.contains(&format!(
            "  // {BUNDLE_MARKER}\n  return [CodePush bundleURL];\n#endif"
        )));
    }

    #[test]
    fn second_run_is_identical() {
        let mut file = delegate(AppleLanguage::ObjCpp, APP_DELEGATE_MM);
        patch_app_delegate(&mut file).unwrap();
        let once = file.contents.clone();
        patch_app_delegate(&mut file).unwrap();

        assert_eq!(file.contents, once);
        assert_eq!(import_section(&file.contents), import_section(&once));
        assert_eq!(file.contents.matches(CODE_PUSH_IMPORT).count(), 1);
        assert_eq!(file.contents.matches(BUNDLE_MARKER).count(), 1);
    }

    #[test]
    fn crlf_delegate_with_foreign_block_keeps_one_import() {
        let src = format!(
            "#import \"AppDelegate.h\"\r\n\
             // @generated begin {HEADER_TAG} - expo prebuild (DO NOT MODIFY) sync-deadbeef\r\n\
             {CODE_PUSH_IMPORT}\r\n\
             // @generated end {HEADER_TAG}\r\n\
             \r\n\
             @implementation AppDelegate\r\n\
             @end\r\n"
        );
        let mut file = delegate(AppleLanguage::ObjCpp, &src);
        patch_app_delegate(&mut file).unwrap();

        assert_eq!(file.contents.matches(CODE_PUSH_IMPORT).count(), 1);
        assert!(!file.contents.contains("sync-deadbeef"));

        let once = file.contents.clone();
        patch_app_delegate(&mut file).unwrap();
        assert_eq!(file.contents, once);
    }

    #[test]
    fn swift_rejected_before_mutation() {
        let mut file = delegate(AppleLanguage::Swift, "import Expo\n");
        let err = patch_app_delegate(&mut file).unwrap_err();
        match err {
            PluginError::UnsupportedLanguage { file: kind, language } => {
                assert_eq!(kind, NativeFile::AppDelegate);
                assert_eq!(language, "swift");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(file.contents, "import Expo\n");
    }

    #[test]
    fn missing_header_anchor_fails() {
        let mut file = delegate(AppleLanguage::ObjC, "@implementation AppDelegate\n@end\n");
        let err = patch_app_delegate(&mut file).unwrap_err();
        assert!(matches!(err, PluginError::AnchorNotFound { file: NativeFile::AppDelegate, .. }));
        assert_eq!(file.contents, "@implementation AppDelegate\n@end\n");
    }

    #[test]
    fn hand_edited_bundle_url_is_left_alone() {
        let src = "#import \"AppDelegate.h\"\n  return [MyLoader bundleURL];\n";
        let mut file = delegate(AppleLanguage::ObjC, src);
        patch_app_delegate(&mut file).unwrap();
        assert!(file.contents.contains("return [MyLoader bundleURL];"));
        assert!(!file.contents.contains(BUNDLE_MARKER));
    }
}
