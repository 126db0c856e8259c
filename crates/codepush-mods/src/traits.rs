// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Plugin abstraction shared by the composed CodePush plugin and the
// run-once wrapper.

use codepush_core::error::Result;
use codepush_core::types::PluginId;
use codepush_project::NativeProject;

/// A configuration plugin: an identity plus an in-memory edit of a loaded
/// native project.
///
/// `apply` must not perform file I/O; the caller writes the project back
/// once every plugin in the pass has succeeded.
pub trait ConfigPlugin {
    /// Identity recorded in the run-once history.
    fn id(&self) -> PluginId;

    fn apply(&self, project: &mut NativeProject) -> Result<()>;
}
