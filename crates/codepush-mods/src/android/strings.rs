// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Release channel and signing key as non-translatable string resources.

use codepush_core::config::{PlatformProps, RELEASE_CHANNEL_KEY, SIGNING_KEY_KEY};
use codepush_core::error::Result;
use codepush_core::types::Platform;
use codepush_project::{ResourceItem, StringsXml};
use tracing::debug;

/// Set `CodePushReleaseChannelPublicId` and, when given,
/// `CodePushSigningPublicKey`, replacing entries of the same name.
///
/// Fails with `MissingField` before touching the document when the release
/// channel is absent.
pub fn set_code_push_strings(strings: &mut StringsXml, props: &PlatformProps) -> Result<()> {
    let channel = props.release_channel(Platform::Android)?;

    let mut items = vec![ResourceItem::string(RELEASE_CHANNEL_KEY, channel, false)];
    if let Some(key) = props.signing_key() {
        items.push(ResourceItem::string(SIGNING_KEY_KEY, key, false));
    }
    strings.set_items(items);

    debug!(signed = props.signing_key().is_some(), "strings.xml resources set");
    Ok(())
}
