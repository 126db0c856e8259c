// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Release channel and signing key in `Info.plist`.

use codepush_core::config::{PlatformProps, RELEASE_CHANNEL_KEY, SIGNING_KEY_KEY};
use codepush_core::error::Result;
use codepush_core::types::Platform;
use codepush_project::InfoPlist;
use plist::Value;
use tracing::debug;

/// Write `CodePushReleaseChannelPublicId` and, when given,
/// `CodePushSigningPublicKey` into the property list.
///
/// Fails with `MissingField` before touching the dictionary when the release
/// channel is absent. Existing values are overwritten.
pub fn set_code_push_keys(plist: &mut InfoPlist, props: &PlatformProps) -> Result<()> {
    let channel = props.release_channel(Platform::Ios)?;

    let dict = plist.dict_mut();
    dict.insert(RELEASE_CHANNEL_KEY.to_string(), Value::String(channel.to_string()));
    if let Some(key) = props.signing_key() {
        dict.insert(SIGNING_KEY_KEY.to_string(), Value::String(key.to_string()));
    }

    debug!(signed = props.signing_key().is_some(), "Info.plist keys set");
    Ok(())
}
