// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Read-only report of which CodePush edits a project already carries.

use std::path::PathBuf;

use codepush_core::config::{RELEASE_CHANNEL_KEY, SIGNING_KEY_KEY};
use codepush_core::types::NativeFile;
use codepush_project::{AndroidProject, IosProject, NativeProject, ProjectFile};

use crate::android::build_gradle::GRADLE_MARKER;
use crate::android::main_application::{CODE_PUSH_CLASS, MAIN_APPLICATION_TAG};
use crate::generate_code::has_generated_block;
use crate::ios::app_delegate::{BUNDLE_MARKER, HEADER_TAG};

/// Status of one native file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStatus {
    pub file: NativeFile,
    pub path: PathBuf,
    /// Every edit the plugin makes to this file is present.
    pub patched: bool,
    /// Short human summary, e.g. the configured channel.
    pub detail: String,
}

/// Inspect every loaded platform of `project`.
pub fn inspect(project: &NativeProject) -> Vec<FileStatus> {
    let mut report = Vec::new();
    if let Some(ios) = &project.ios {
        report.extend(inspect_ios(ios));
    }
    if let Some(android) = &project.android {
        report.extend(inspect_android(android));
    }
    report
}

fn keys_detail(channel: Option<&str>, signed: bool) -> String {
    match channel {
        Some(channel) if signed => format!("channel {channel}, signed"),
        Some(channel) => format!("channel {channel}"),
        None => "no release channel".into(),
    }
}

fn flags_detail(flags: &[(&str, bool)]) -> String {
    let missing: Vec<&str> = flags
        .iter()
        .filter(|(_, present)| !present)
        .map(|(name, _)| *name)
        .collect();
    if missing.is_empty() {
        "patched".into()
    } else {
        format!("missing {}", missing.join(", "))
    }
}

fn inspect_ios(ios: &IosProject) -> Vec<FileStatus> {
    let channel = ios.info_plist.get_string(RELEASE_CHANNEL_KEY);
    let signed = ios.info_plist.get_string(SIGNING_KEY_KEY).is_some();

    let delegate = &ios.app_delegate.contents;
    let flags = [
        ("import", has_generated_block(delegate, HEADER_TAG)),
        ("bundle URL", delegate.contains(BUNDLE_MARKER)),
    ];

    vec![
        FileStatus {
            file: NativeFile::InfoPlist,
            path: ios.info_plist.path().to_path_buf(),
            patched: channel.is_some(),
            detail: keys_detail(channel, signed),
        },
        FileStatus {
            file: NativeFile::AppDelegate,
            path: ios.app_delegate.path().to_path_buf(),
            patched: flags.iter().all(|(_, present)| *present),
            detail: flags_detail(&flags),
        },
    ]
}

fn inspect_android(android: &AndroidProject) -> Vec<FileStatus> {
    let channel_item = android.strings_xml.get_string(RELEASE_CHANNEL_KEY);
    let channel = channel_item.and_then(|item| item.text().ok()).map(|text| text.into_owned());
    let signed = android.strings_xml.get_string(SIGNING_KEY_KEY).is_some();

    let gradle_patched = android.app_build_gradle.contents.contains(GRADLE_MARKER);

    let main = &android.main_application.contents;
    let main_flags = [
        ("import", main.contains(CODE_PUSH_CLASS)),
        ("getJSBundleFile override", has_generated_block(main, MAIN_APPLICATION_TAG)),
    ];

    vec![
        FileStatus {
            file: NativeFile::StringsXml,
            path: android.strings_xml.path().to_path_buf(),
            patched: channel.is_some(),
            detail: keys_detail(channel.as_deref(), signed),
        },
        FileStatus {
            file: NativeFile::AppBuildGradle,
            path: android.app_build_gradle.path().to_path_buf(),
            patched: gradle_patched,
            detail: flags_detail(&[("apply from codepush.gradle", gradle_patched)]),
        },
        FileStatus {
            file: NativeFile::MainApplication,
            path: android.main_application.path().to_path_buf(),
            patched: main_flags.iter().all(|(_, present)| *present),
            detail: flags_detail(&main_flags),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use codepush_core::PlatformProps;
    use codepush_core::config::PluginProps;
    use codepush_core::types::{AppleLanguage, GradleLanguage, JvmLanguage};
    use codepush_project::{InfoPlist, SourceFile, StringsXml};

    use crate::plugin::with_code_push;

    fn project() -> NativeProject {
        let mut project = NativeProject::empty("/app");
        project.ios = Some(IosProject {
            info_plist: InfoPlist::from_dictionary("/app/ios/demo/Info.plist", plist::Dictionary::new()),
            app_delegate: SourceFile::from_contents(
                "/app/ios/demo/AppDelegate.mm",
                NativeFile::AppDelegate,
                AppleLanguage::ObjCpp,
                "#import \"AppDelegate.h\"\n  return [[NSBundle mainBundle] URLForResource:@\"main\" withExtension:@\"jsbundle\"];\n",
            ),
        });
        project.android = Some(AndroidProject {
            strings_xml: StringsXml::parse("/app/strings.xml", "<resources/>").unwrap(),
            app_build_gradle: SourceFile::from_contents(
                "/app/build.gradle",
                NativeFile::AppBuildGradle,
                GradleLanguage::Groovy,
                "android {}\n",
            ),
            main_application: SourceFile::from_contents(
                "/app/MainApplication.kt",
                NativeFile::MainApplication,
                JvmLanguage::Kotlin,
                "package com.demo\n  override fun getUseDeveloperSupport(): Boolean = BuildConfig.DEBUG\n",
            ),
        });
        project
    }

    #[test]
    fn fresh_project_reports_unpatched() {
        let report = inspect(&project());
        assert_eq!(report.len(), 5);
        assert!(report.iter().all(|status| !status.patched));
        assert_eq!(report[0].detail, "no release channel");
        assert_eq!(report[1].detail, "missing import, bundle URL");
    }

    #[test]
    fn patched_project_reports_patched() {
        let mut project = project();
        let props = PluginProps {
            ios: Some(PlatformProps::new("ios-id").with_signing_public_key("KEY")),
            android: Some(PlatformProps::new("abc123")),
        };
        with_code_push(&mut project, &props).unwrap();

        let report = inspect(&project);
        assert!(report.iter().all(|status| status.patched), "{report:#?}");
        assert_eq!(report[0].detail, "channel ios-id, signed");
        assert_eq!(report[2].detail, "channel abc123");
        assert_eq!(report[4].detail, "patched");
    }
}
