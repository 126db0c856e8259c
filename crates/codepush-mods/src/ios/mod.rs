// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// iOS chain: Info.plist keys, then the AppDelegate import and bundle URL.

pub mod app_delegate;
pub mod info_plist;

use codepush_core::config::PluginProps;
use codepush_core::error::{PluginError, Result};
use codepush_project::NativeProject;
use tracing::{debug, instrument};

pub use app_delegate::patch_app_delegate;
pub use info_plist::set_code_push_keys;

/// Run the iOS chain. A no-op when `props.ios` is absent.
#[instrument(skip_all)]
pub fn with_ios(project: &mut NativeProject, props: &PluginProps) -> Result<()> {
    let Some(ios_props) = props.ios.as_ref() else {
        debug!("no ios props, skipping");
        return Ok(());
    };
    let ios = project
        .ios
        .as_mut()
        .ok_or_else(|| PluginError::ProjectLayout("iOS project files were not loaded".into()))?;

    set_code_push_keys(&mut ios.info_plist, ios_props)?;
    patch_app_delegate(&mut ios.app_delegate)?;
    Ok(())
}
