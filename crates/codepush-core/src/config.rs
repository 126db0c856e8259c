// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Plugin props supplied by the embedding build tool.
//
// Props are never persisted by the plugin. They arrive either as a bare JSON
// object, as the options of the plugin entry in an Expo `app.json`, or as
// command-line overrides merged on top of either.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{PluginError, Result};
use crate::types::{PACKAGE_NAME, Platform};

/// Key of the release-channel identifier, in props, Info.plist and strings.xml.
pub const RELEASE_CHANNEL_KEY: &str = "CodePushReleaseChannelPublicId";

/// Key of the signing public key, in props, Info.plist and strings.xml.
pub const SIGNING_KEY_KEY: &str = "CodePushSigningPublicKey";

/// Per-platform props block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformProps {
    /// Identifies the update channel. Required once the block is present,
    /// but optional here so that absence is reported by the modifier.
    #[serde(
        rename = "CodePushReleaseChannelPublicId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub release_channel_public_id: Option<String>,
    /// Public key used to verify signed bundles.
    #[serde(
        rename = "CodePushSigningPublicKey",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub signing_public_key: Option<String>,
}

impl PlatformProps {
    pub fn new(release_channel_public_id: impl Into<String>) -> Self {
        Self {
            release_channel_public_id: Some(release_channel_public_id.into()),
            signing_public_key: None,
        }
    }

    pub fn with_signing_public_key(mut self, key: impl Into<String>) -> Self {
        self.signing_public_key = Some(key.into());
        self
    }

    /// The release channel, or `MissingField` if it is absent or empty.
    pub fn release_channel(&self, platform: Platform) -> Result<&str> {
        match self.release_channel_public_id.as_deref() {
            Some(id) if !id.is_empty() => Ok(id),
            _ => Err(PluginError::MissingField {
                platform,
                field: RELEASE_CHANNEL_KEY,
            }),
        }
    }

    /// The signing key, treating an empty string as absent.
    pub fn signing_key(&self) -> Option<&str> {
        self.signing_public_key.as_deref().filter(|k| !k.is_empty())
    }

    /// Overlay `other` on top of `self`, field by field.
    fn merge(self, other: PlatformProps) -> Self {
        Self {
            release_channel_public_id: other
                .release_channel_public_id
                .or(self.release_channel_public_id),
            signing_public_key: other.signing_public_key.or(self.signing_public_key),
        }
    }
}

/// Props for the whole plugin. A missing platform block disables that
/// platform's chain entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ios: Option<PlatformProps>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub android: Option<PlatformProps>,
}

impl PluginProps {
    pub fn platform(&self, platform: Platform) -> Option<&PlatformProps> {
        match platform {
            Platform::Ios => self.ios.as_ref(),
            Platform::Android => self.android.as_ref(),
        }
    }

    /// Platforms whose props block is present.
    pub fn platforms(&self) -> Vec<Platform> {
        Platform::ALL
            .into_iter()
            .filter(|p| self.platform(*p).is_some())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.ios.is_none() && self.android.is_none()
    }

    /// Parse a bare props object, e.g. `{"ios": {...}, "android": {...}}`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_props_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Extract the props of this plugin's entry in an Expo app config.
    ///
    /// Accepts both `{"expo": {"plugins": [...]}}` and a bare
    /// `{"plugins": [...]}`. Returns `Ok(None)` when the plugin is not listed.
    /// A plugin listed without options yields empty props.
    pub fn from_app_config(config: &Value) -> Result<Option<Self>> {
        let root = config.get("expo").unwrap_or(config);
        let Some(plugins) = root.get("plugins") else {
            return Ok(None);
        };
        let plugins = plugins
            .as_array()
            .ok_or_else(|| PluginError::InvalidConfig("\"plugins\" must be an array".into()))?;

        for entry in plugins {
            match entry {
                Value::String(name) if name == PACKAGE_NAME => {
                    debug!("plugin listed without options");
                    return Ok(Some(Self::default()));
                }
                Value::Array(items) if items.first().and_then(Value::as_str) == Some(PACKAGE_NAME) => {
                    return match items.get(1) {
                        None | Some(Value::Null) => Ok(Some(Self::default())),
                        Some(options @ Value::Object(_)) => {
                            Ok(Some(serde_json::from_value(options.clone())?))
                        }
                        Some(other) => Err(PluginError::InvalidConfig(format!(
                            "options for {PACKAGE_NAME} must be an object, got {other}"
                        ))),
                    };
                }
                _ => {}
            }
        }
        Ok(None)
    }

    pub fn from_app_config_file(path: &Path) -> Result<Option<Self>> {
        let text = std::fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&text)?;
        Self::from_app_config(&value)
    }

    /// Overlay `overrides` on top of `self`. A platform block present in
    /// either side is present in the result.
    pub fn merge(self, overrides: PluginProps) -> Self {
        fn pick(base: Option<PlatformProps>, over: Option<PlatformProps>) -> Option<PlatformProps> {
            match (base, over) {
                (Some(b), Some(o)) => Some(b.merge(o)),
                (b, o) => o.or(b),
            }
        }
        Self {
            ios: pick(self.ios, overrides.ios),
            android: pick(self.android, overrides.android),
        }
    }
}
