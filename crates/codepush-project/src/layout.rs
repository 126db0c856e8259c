// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Locating the native files inside a generated project.
//
//   <root>/ios/<App>/Info.plist
//   <root>/ios/<App>/AppDelegate.{mm,m,swift}
//   <root>/android/app/src/main/res/values/strings.xml
//   <root>/android/app/build.gradle[.kts]
//   <root>/android/app/src/main/{java,kotlin}/**/MainApplication.{kt,java}

use std::path::{Path, PathBuf};

use codepush_core::error::{PluginError, Result};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Directories under `ios/` that never hold the app target.
const IOS_SKIP_DIRS: &[&str] = &["Pods", "build", "DerivedData"];

const APP_DELEGATE_NAMES: &[&str] = &["AppDelegate.mm", "AppDelegate.m", "AppDelegate.swift"];

const MAIN_APPLICATION_NAMES: &[&str] = &["MainApplication.kt", "MainApplication.java"];

fn is_skipped_ios_dir(entry: &walkdir::DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    IOS_SKIP_DIRS.contains(&&*name)
        || name.ends_with(".xcodeproj")
        || name.ends_with(".xcworkspace")
}

/// Paths of the iOS files this plugin edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IosPaths {
    pub info_plist: PathBuf,
    pub app_delegate: PathBuf,
}

/// Paths of the Android files this plugin edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AndroidPaths {
    /// May not exist yet; it is created on write.
    pub strings_xml: PathBuf,
    pub app_build_gradle: PathBuf,
    pub main_application: PathBuf,
}

/// A generated app root containing `ios/` and/or `android/`.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Find the app target's `AppDelegate` and the `Info.plist` beside it.
    pub fn ios(&self) -> Result<IosPaths> {
        let ios_dir = self.root.join("ios");
        if !ios_dir.is_dir() {
            return Err(PluginError::ProjectLayout(format!(
                "{} does not exist",
                ios_dir.display()
            )));
        }

        // Prune at depth 1 (target dirs), collect at depth 2.
        let mut delegates: Vec<PathBuf> = WalkDir::new(&ios_dir)
            .max_depth(2)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() != 1 || !is_skipped_ios_dir(entry))
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.depth() == 2 && entry.file_type().is_file())
            .filter(|entry| {
                APP_DELEGATE_NAMES.contains(&&*entry.file_name().to_string_lossy())
            })
            .map(|entry| entry.into_path())
            .collect();

        // Prefer .mm over .m over .swift when a target holds more than one.
        delegates.sort_by_key(|path| {
            let name = path.file_name().map(|n| n.to_string_lossy().into_owned());
            APP_DELEGATE_NAMES
                .iter()
                .position(|candidate| name.as_deref() == Some(*candidate))
        });

        let app_delegate = match delegates.as_slice() {
            [] => {
                return Err(PluginError::ProjectLayout(format!(
                    "no AppDelegate found under {}",
                    ios_dir.display()
                )));
            }
            [only] => only.clone(),
            [first, ..] => {
                warn!(
                    count = delegates.len(),
                    using = %first.display(),
                    "multiple AppDelegate files found"
                );
                first.clone()
            }
        };

        let target_dir = app_delegate
            .parent()
            .ok_or_else(|| PluginError::ProjectLayout("AppDelegate has no parent directory".into()))?;
        let info_plist = target_dir.join("Info.plist");
        if !info_plist.is_file() {
            return Err(PluginError::ProjectLayout(format!(
                "{} does not exist",
                info_plist.display()
            )));
        }

        debug!(app_delegate = %app_delegate.display(), "resolved iOS paths");
        Ok(IosPaths {
            info_plist,
            app_delegate,
        })
    }

    /// Find the Android app module's strings, build script and entry point.
    pub fn android(&self) -> Result<AndroidPaths> {
        let app_dir = self.root.join("android").join("app");
        if !app_dir.is_dir() {
            return Err(PluginError::ProjectLayout(format!(
                "{} does not exist",
                app_dir.display()
            )));
        }

        let app_build_gradle = ["build.gradle", "build.gradle.kts"]
            .iter()
            .map(|name| app_dir.join(name))
            .find(|path| path.is_file())
            .ok_or_else(|| {
                PluginError::ProjectLayout(format!("no build.gradle found in {}", app_dir.display()))
            })?;

        let main_dir = app_dir.join("src").join("main");
        let main_application = ["java", "kotlin"]
            .iter()
            .map(|lang| main_dir.join(lang))
            .filter(|dir| dir.is_dir())
            .flat_map(|dir| WalkDir::new(dir).sort_by_file_name().into_iter())
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .find(|entry| {
                MAIN_APPLICATION_NAMES.contains(&&*entry.file_name().to_string_lossy())
            })
            .map(|entry| entry.into_path())
            .ok_or_else(|| {
                PluginError::ProjectLayout(format!(
                    "no MainApplication found under {}",
                    main_dir.display()
                ))
            })?;

        let strings_xml = main_dir.join("res").join("values").join("strings.xml");

        debug!(main_application = %main_application.display(), "resolved Android paths");
        Ok(AndroidPaths {
            strings_xml,
            app_build_gradle,
            main_application,
        })
    }
}
