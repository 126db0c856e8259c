// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Android chain: string resources, app build script, then MainApplication.

pub mod build_gradle;
pub mod main_application;
pub mod strings;

use codepush_core::config::PluginProps;
use codepush_core::error::{PluginError, Result};
use codepush_project::NativeProject;
use tracing::{debug, instrument};

pub use build_gradle::apply_code_push_gradle;
pub use main_application::patch_main_application;
pub use strings::set_code_push_strings;

/// Run the Android chain. A no-op when `props.android` is absent.
#[instrument(skip_all)]
pub fn with_android(project: &mut NativeProject, props: &PluginProps) -> Result<()> {
    let Some(android_props) = props.android.as_ref() else {
        debug!("no android props, skipping");
        return Ok(());
    };
    let android = project
        .android
        .as_mut()
        .ok_or_else(|| PluginError::ProjectLayout("Android project files were not loaded".into()))?;

    set_code_push_strings(&mut android.strings_xml, android_props)?;
    apply_code_push_gradle(&mut android.app_build_gradle)?;
    patch_main_application(&mut android.main_application)?;
    Ok(())
}
