// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! codepush-mods: the modifiers that wire the CodePush update library into
//! a generated native project.
//!
//! The iOS chain edits `Info.plist` and the Objective-C `AppDelegate`; the
//! Android chain edits `strings.xml`, `app/build.gradle` and the Kotlin
//! `MainApplication`. Every edit is guarded so that re-running a pass on an
//! already-patched project changes nothing.

pub mod android;
pub mod codemod;
pub mod generate_code;
pub mod inspect;
pub mod ios;
pub mod pass;
pub mod plugin;
pub mod traits;

// PUBLIC API: composed plugin, run-once guard, and pass driver
pub use inspect::{FileStatus, inspect};
pub use pass::{PassOutcome, run_pass};
pub use plugin::{CodePushPlugin, ConfigContext, RunOncePlugin, with_code_push};
pub use traits::ConfigPlugin;
