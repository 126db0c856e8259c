// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// One configuration pass over an app root: load, modify in memory, write.

use std::path::{Path, PathBuf};

use codepush_core::config::PluginProps;
use codepush_core::error::Result;
use codepush_project::NativeProject;
use tracing::{info, instrument};

use crate::plugin::{CodePushPlugin, ConfigContext};

/// What a pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassOutcome {
    /// The run-once guard skipped the plugin.
    pub skipped: bool,
    /// Files that changed (written, or that would be written on a dry run).
    pub changed: Vec<PathBuf>,
    /// Whether `changed` was written to disk.
    pub written: bool,
}

/// Apply the CodePush plugin to the native project under `root`.
///
/// Only the platforms with a props block are loaded. Files are written only
/// after every modifier succeeded, and not at all when `dry_run` is set.
#[instrument(skip(props, ctx), fields(root = %root.display()))]
pub fn run_pass(
    root: &Path,
    props: &PluginProps,
    ctx: &mut ConfigContext,
    dry_run: bool,
) -> Result<PassOutcome> {
    let mut project = NativeProject::load(root, &props.platforms())?;

    let plugin = CodePushPlugin::new(props.clone()).run_once();
    if !plugin.apply(ctx, &mut project)? {
        return Ok(PassOutcome {
            skipped: true,
            ..PassOutcome::default()
        });
    }

    if dry_run {
        let changed = project.pending_changes();
        info!(count = changed.len(), "dry run, nothing written");
        return Ok(PassOutcome {
            skipped: false,
            changed,
            written: false,
        });
    }

    let changed = project.save()?;
    Ok(PassOutcome {
        skipped: false,
        changed,
        written: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use codepush_core::PlatformProps;
    use codepush_core::error::PluginError;
    use std::fs;

    const INFO_PLIST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0">
<dict>
	<key>CFBundleName</key>
	<string>demo</string>
</dict>
</plist>
"#;

    const APP_DELEGATE: &str = "#import \"AppDelegate.h\"\n\n@implementation AppDelegate\n\
- (NSURL *)bundleURL\n{\n  return [[NSBundle mainBundle] URLForResource:@\"main\" withExtension:@\"jsbundle\"];\n}\n@end\n";

    const MAIN_APPLICATION: &str = "package com.demo\n\nclass MainApplication {\n\
          override fun getUseDeveloperSupport(): Boolean = BuildConfig.DEBUG\n}\n";

    fn write(path: &Path, contents: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn scaffold(root: &Path) {
        write(&root.join("ios/demo/Info.plist"), INFO_PLIST);
        write(&root.join("ios/demo/AppDelegate.mm"), APP_DELEGATE);
        write(&root.join("android/app/build.gradle"), "android {\n}\n");
        write(
            &root.join("android/app/src/main/res/values/strings.xml"),
            "<resources>\n  <string name=\"app_name\">demo</string>\n</resources>\n",
        );
        write(
            &root.join("android/app/src/main/java/com/demo/MainApplication.kt"),
            MAIN_APPLICATION,
        );
    }

    fn props() -> PluginProps {
        PluginProps {
            ios: Some(PlatformProps::new("ios-id")),
            android: Some(PlatformProps::new("abc123")),
        }
    }

    #[test]
    fn full_pass_writes_all_five_files() {
        let dir = tempfile::tempdir().unwrap();
        scaffold(dir.path());

        let outcome = run_pass(dir.path(), &props(), &mut ConfigContext::new(), false).unwrap();
        assert!(outcome.written);
        assert_eq!(outcome.changed.len(), 5);

        let delegate = fs::read_to_string(dir.path().join("ios/demo/AppDelegate.mm")).unwrap();
        assert!(delegate.contains("#import <CodePush/CodePush.h>"));
        assert!(delegate.contains("return [CodePush bundleURL];"));
        let strings =
            fs::read_to_string(dir.path().join("android/app/src/main/res/values/strings.xml"))
                .unwrap();
        assert!(strings.contains(
            r#"<string name="CodePushReleaseChannelPublicId" translatable="false">abc123</string>"#
        ));
    }

    #[test]
    fn second_pass_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        scaffold(dir.path());

        run_pass(dir.path(), &props(), &mut ConfigContext::new(), false).unwrap();
        let again = run_pass(dir.path(), &props(), &mut ConfigContext::new(), false).unwrap();
        assert!(!again.skipped);
        assert!(again.changed.is_empty());
    }

    #[test]
    fn same_context_skips_second_pass() {
        let dir = tempfile::tempdir().unwrap();
        scaffold(dir.path());
        let mut ctx = ConfigContext::new();

        run_pass(dir.path(), &props(), &mut ctx, false).unwrap();
        let again = run_pass(dir.path(), &props(), &mut ctx, false).unwrap();
        assert!(again.skipped);
    }

    #[test]
    fn dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        scaffold(dir.path());

        let outcome = run_pass(dir.path(), &props(), &mut ConfigContext::new(), true).unwrap();
        assert!(!outcome.written);
        assert_eq!(outcome.changed.len(), 5);
        let gradle = fs::read_to_string(dir.path().join("android/app/build.gradle")).unwrap();
        assert_eq!(gradle, "android {\n}\n");
    }

    #[test]
    fn android_failure_leaves_ios_untouched() {
        let dir = tempfile::tempdir().unwrap();
        scaffold(dir.path());
        let props = PluginProps {
            ios: Some(PlatformProps::new("ios-id")),
            android: Some(PlatformProps::default()),
        };

        let err = run_pass(dir.path(), &props, &mut ConfigContext::new(), false).unwrap_err();
        assert!(matches!(err, PluginError::MissingField { .. }));
        let plist = fs::read_to_string(dir.path().join("ios/demo/Info.plist")).unwrap();
        assert_eq!(plist, INFO_PLIST);
    }

    #[test]
    fn android_only_does_not_need_ios_dir() {
        let dir = tempfile::tempdir().unwrap();
        scaffold(dir.path());
        fs::remove_dir_all(dir.path().join("ios")).unwrap();
        let props = PluginProps {
            ios: None,
            android: Some(PlatformProps::new("abc123")),
        };

        let outcome = run_pass(dir.path(), &props, &mut ConfigContext::new(), false).unwrap();
        assert_eq!(outcome.changed.len(), 3);
    }
}
