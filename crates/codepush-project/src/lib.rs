// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// CodePush plugin: native project model. Finds the generated iOS and
// Android files under an app root, parses them into editable in-memory
// representations, and writes back whatever a configuration pass changed.

pub mod info_plist;
pub mod layout;
pub mod project;
pub mod source;
pub mod strings_xml;

pub use info_plist::InfoPlist;
pub use layout::{AndroidPaths, IosPaths, ProjectLayout};
pub use project::{AndroidProject, IosProject, NativeProject, ProjectFile};
pub use source::SourceFile;
pub use strings_xml::{ResourceItem, StringsXml};
