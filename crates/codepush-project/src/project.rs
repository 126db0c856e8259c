// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-memory native project.
//
// A configuration pass loads the files of the requested platforms, lets the
// modifiers edit them in memory, and only then writes back the files whose
// content changed. A modifier error therefore leaves the tree untouched.
// Write-back serializes every changed file before the first write, so a
// plist or XML serialization failure also leaves the tree untouched. An I/O
// error during the writes themselves can still leave earlier files updated.

use std::path::{Path, PathBuf};

use codepush_core::error::Result;
use codepush_core::types::{AppleLanguage, GradleLanguage, JvmLanguage, NativeFile, Platform};
use tracing::{info, instrument};

use crate::info_plist::InfoPlist;
use crate::layout::ProjectLayout;
use crate::source::SourceFile;
use crate::strings_xml::StringsXml;

/// A native file that can be written back after a pass.
pub trait ProjectFile {
    fn path(&self) -> &Path;

    /// Whether the in-memory content differs from what was loaded.
    fn is_modified(&self) -> bool;

    /// Serialize the current content to the bytes `save` would write.
    fn render(&self) -> Result<Vec<u8>>;

    /// Treat the current content as what is on disk.
    fn mark_saved(&mut self);

    /// Write the current content to `path()`.
    fn save(&mut self) -> Result<()> {
        let bytes = self.render()?;
        write_file(self.path(), &bytes)?;
        self.mark_saved();
        Ok(())
    }
}

/// Write `bytes` to `path`, creating missing parent directories.
fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Write every modified file in `files`; returns the paths written.
///
/// All files are rendered before any is written.
fn write_modified(mut files: Vec<&mut dyn ProjectFile>) -> Result<Vec<PathBuf>> {
    let mut rendered = Vec::new();
    for (index, file) in files.iter().enumerate() {
        if file.is_modified() {
            rendered.push((index, file.render()?));
        }
    }

    let mut written = Vec::with_capacity(rendered.len());
    for (index, bytes) in rendered {
        let file = &mut files[index];
        write_file(file.path(), &bytes)?;
        file.mark_saved();
        info!(path = %file.path().display(), "updated");
        written.push(file.path().to_path_buf());
    }
    Ok(written)
}

/// The iOS files of a project.
#[derive(Debug, Clone)]
pub struct IosProject {
    pub info_plist: InfoPlist,
    pub app_delegate: SourceFile<AppleLanguage>,
}

impl IosProject {
    pub fn load(layout: &ProjectLayout) -> Result<Self> {
        let paths = layout.ios()?;
        Ok(Self {
            info_plist: InfoPlist::load(paths.info_plist)?,
            app_delegate: SourceFile::load(paths.app_delegate, NativeFile::AppDelegate)?,
        })
    }

    fn files_mut(&mut self) -> [&mut dyn ProjectFile; 2] {
        [&mut self.info_plist, &mut self.app_delegate]
    }

    fn files(&self) -> [&dyn ProjectFile; 2] {
        [&self.info_plist, &self.app_delegate]
    }
}

/// The Android files of a project.
#[derive(Debug, Clone)]
pub struct AndroidProject {
    pub strings_xml: StringsXml,
    pub app_build_gradle: SourceFile<GradleLanguage>,
    pub main_application: SourceFile<JvmLanguage>,
}

impl AndroidProject {
    pub fn load(layout: &ProjectLayout) -> Result<Self> {
        let paths = layout.android()?;
        Ok(Self {
            strings_xml: StringsXml::load(paths.strings_xml)?,
            app_build_gradle: SourceFile::load(paths.app_build_gradle, NativeFile::AppBuildGradle)?,
            main_application: SourceFile::load(paths.main_application, NativeFile::MainApplication)?,
        })
    }

    fn files_mut(&mut self) -> [&mut dyn ProjectFile; 3] {
        [
            &mut self.strings_xml,
            &mut self.app_build_gradle,
            &mut self.main_application,
        ]
    }

    fn files(&self) -> [&dyn ProjectFile; 3] {
        [&self.strings_xml, &self.app_build_gradle, &self.main_application]
    }
}

/// The native files of one app, loaded per platform.
#[derive(Debug, Clone)]
pub struct NativeProject {
    root: PathBuf,
    pub ios: Option<IosProject>,
    pub android: Option<AndroidProject>,
}

impl NativeProject {
    /// Load the files of each platform in `platforms` from `root`.
    #[instrument(skip_all, fields(root = %root.as_ref().display()))]
    pub fn load(root: impl AsRef<Path>, platforms: &[Platform]) -> Result<Self> {
        let layout = ProjectLayout::new(root.as_ref());
        let mut project = Self::empty(root.as_ref());
        for platform in platforms {
            match platform {
                Platform::Ios => project.ios = Some(IosProject::load(&layout)?),
                Platform::Android => project.android = Some(AndroidProject::load(&layout)?),
            }
        }
        Ok(project)
    }

    /// A project with no platform loaded.
    pub fn empty(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ios: None,
            android: None,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn has_platform(&self, platform: Platform) -> bool {
        match platform {
            Platform::Ios => self.ios.is_some(),
            Platform::Android => self.android.is_some(),
        }
    }

    fn files(&self) -> Vec<&dyn ProjectFile> {
        let mut files: Vec<&dyn ProjectFile> = Vec::new();
        if let Some(ios) = &self.ios {
            files.extend(ios.files());
        }
        if let Some(android) = &self.android {
            files.extend(android.files());
        }
        files
    }

    /// Paths that `save` would write.
    pub fn pending_changes(&self) -> Vec<PathBuf> {
        self.files()
            .into_iter()
            .filter(|file| file.is_modified())
            .map(|file| file.path().to_path_buf())
            .collect()
    }

    /// Write every modified file; returns the paths written.
    ///
    /// Nothing is written if any changed file fails to serialize.
    #[instrument(skip_all, fields(root = %self.root.display()))]
    pub fn save(&mut self) -> Result<Vec<PathBuf>> {
        let mut files: Vec<&mut dyn ProjectFile> = Vec::new();
        if let Some(ios) = self.ios.as_mut() {
            files.extend(ios.files_mut());
        }
        if let Some(android) = self.android.as_mut() {
            files.extend(android.files_mut());
        }

        write_modified(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const INFO_PLIST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0">
<dict>
	<key>CFBundleName</key>
	<string>demo</string>
</dict>
</plist>
"#;

    fn write(path: &Path, contents: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn scaffold(root: &Path) {
        write(&root.join("ios/demo/Info.plist"), INFO_PLIST);
        write(&root.join("ios/demo/AppDelegate.mm"), "#import \"AppDelegate.h\"\n");
        write(&root.join("android/app/build.gradle"), "apply plugin: \"com.android.application\"\n");
        write(
            &root.join("android/app/src/main/java/com/demo/MainApplication.kt"),
            "package com.demo\n",
        );
    }

    #[test]
    fn loads_only_requested_platforms() {
        let dir = tempfile::tempdir().unwrap();
        scaffold(dir.path());

        let project = NativeProject::load(dir.path(), &[Platform::Android]).unwrap();
        assert!(project.ios.is_none());
        assert!(project.has_platform(Platform::Android));
        assert!(project.pending_changes().is_empty());
    }

    #[test]
    fn save_writes_modified_files_only() {
        let dir = tempfile::tempdir().unwrap();
        scaffold(dir.path());

        let mut project =
            NativeProject::load(dir.path(), &[Platform::Ios, Platform::Android]).unwrap();
        project
            .android
            .as_mut()
            .unwrap()
            .app_build_gradle
            .contents
            .push_str("// edited\n");

        let gradle = dir.path().join("android/app/build.gradle");
        assert_eq!(project.pending_changes(), vec![gradle.clone()]);

        let written = project.save().unwrap();
        assert_eq!(written, vec![gradle.clone()]);
        assert!(fs::read_to_string(&gradle).unwrap().ends_with("// edited\n"));
        assert!(project.pending_changes().is_empty());
        // strings.xml was never written because nothing changed it
        assert!(!dir.path().join("android/app/src/main/res/values/strings.xml").exists());
    }

    struct Unrenderable {
        path: PathBuf,
    }

    impl ProjectFile for Unrenderable {
        fn path(&self) -> &Path {
            &self.path
        }

        fn is_modified(&self) -> bool {
            true
        }

        fn render(&self) -> Result<Vec<u8>> {
            Err(codepush_core::PluginError::Plist("cannot serialize".into()))
        }

        fn mark_saved(&mut self) {}
    }

    #[test]
    fn serialization_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let gradle_path = dir.path().join("build.gradle");
        fs::write(&gradle_path, "android {}\n").unwrap();

        let mut gradle =
            SourceFile::<GradleLanguage>::load(&gradle_path, NativeFile::AppBuildGradle).unwrap();
        gradle.contents.push_str("// edited\n");
        let mut broken = Unrenderable {
            path: dir.path().join("Info.plist"),
        };

        let mut files: Vec<&mut dyn ProjectFile> = Vec::new();
        files.push(&mut gradle);
        files.push(&mut broken);
        let err = write_modified(files).unwrap_err();
        assert!(matches!(err, codepush_core::PluginError::Plist(_)));
        assert_eq!(fs::read_to_string(&gradle_path).unwrap(), "android {}\n");
        assert!(gradle.is_modified());
        assert!(!dir.path().join("Info.plist").exists());
    }
}
