// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Resolving plugin props from files and flags.
//
// Precedence, lowest first: the plugin entry in app.json, a --props file,
// then individual --<platform>-* flags.

use std::path::{Path, PathBuf};

use codepush_core::config::{PlatformProps, PluginProps};
use codepush_core::error::{PluginError, Result};
use tracing::debug;

/// Props-related command-line inputs.
#[derive(Debug, Clone, Default)]
pub struct PropsSources {
    pub app_config: Option<PathBuf>,
    pub props_file: Option<PathBuf>,
    pub ios_release_channel: Option<String>,
    pub ios_signing_key: Option<String>,
    pub android_release_channel: Option<String>,
    pub android_signing_key: Option<String>,
}

fn flag_block(channel: &Option<String>, key: &Option<String>) -> Option<PlatformProps> {
    if channel.is_none() && key.is_none() {
        return None;
    }
    Some(PlatformProps {
        release_channel_public_id: channel.clone(),
        signing_public_key: key.clone(),
    })
}

/// Merge every source into one `PluginProps`.
///
/// Without an explicit `--app-config`, `<root>/app.json` is read when it
/// exists. An explicit app config that does not list the plugin is an error.
pub fn resolve_props(root: &Path, sources: &PropsSources) -> Result<PluginProps> {
    let mut props = PluginProps::default();

    match &sources.app_config {
        Some(path) => {
            props = PluginProps::from_app_config_file(path)?.ok_or_else(|| {
                PluginError::InvalidConfig(format!(
                    "{} does not list the CodePush plugin",
                    path.display()
                ))
            })?;
        }
        None => {
            let default_path = root.join("app.json");
            if default_path.is_file() {
                if let Some(found) = PluginProps::from_app_config_file(&default_path)? {
                    debug!(path = %default_path.display(), "using props from app config");
                    props = found;
                }
            }
        }
    }

    if let Some(path) = &sources.props_file {
        debug!(path = %path.display(), "merging props file");
        props = props.merge(PluginProps::from_props_file(path)?);
    }

    let overrides = PluginProps {
        ios: flag_block(&sources.ios_release_channel, &sources.ios_signing_key),
        android: flag_block(&sources.android_release_channel, &sources.android_signing_key),
    };
    Ok(props.merge(overrides))
}
