// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The composed CodePush plugin and its run-once guard.
//
// De-duplication is explicit: the caller owns a `ConfigContext` for the
// configuration pass and threads it through every plugin invocation.

use std::collections::BTreeSet;

use codepush_core::config::PluginProps;
use codepush_core::error::Result;
use codepush_core::types::PluginId;
use codepush_project::NativeProject;
use tracing::{debug, info, instrument};

use crate::android::with_android;
use crate::ios::with_ios;
use crate::traits::ConfigPlugin;

/// Run the iOS chain, then the Android chain. Each chain is skipped when
/// its props block is absent.
pub fn with_code_push(project: &mut NativeProject, props: &PluginProps) -> Result<()> {
    with_ios(project, props)?;
    with_android(project, props)?;
    Ok(())
}

/// The CodePush plugin bound to its props.
#[derive(Debug, Clone)]
pub struct CodePushPlugin {
    props: PluginProps,
}

impl CodePushPlugin {
    pub fn new(props: PluginProps) -> Self {
        Self { props }
    }

    pub fn props(&self) -> &PluginProps {
        &self.props
    }

    /// Wrap in a guard that applies the plugin at most once per context.
    pub fn run_once(self) -> RunOncePlugin<Self> {
        RunOncePlugin::new(self)
    }
}

impl ConfigPlugin for CodePushPlugin {
    fn id(&self) -> PluginId {
        PluginId::code_push()
    }

    #[instrument(skip_all)]
    fn apply(&self, project: &mut NativeProject) -> Result<()> {
        with_code_push(project, &self.props)
    }
}

/// Per-pass record of plugins that have already run.
#[derive(Debug, Clone, Default)]
pub struct ConfigContext {
    history: BTreeSet<PluginId>,
}

impl ConfigContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_applied(&self, id: &PluginId) -> bool {
        self.history.contains(id)
    }

    /// Record `id`; returns `false` if it was already recorded.
    pub fn record(&mut self, id: PluginId) -> bool {
        self.history.insert(id)
    }

    pub fn history(&self) -> impl Iterator<Item = &PluginId> {
        self.history.iter()
    }
}

/// Guard that applies the wrapped plugin at most once per `ConfigContext`,
/// keyed by the plugin's name and version.
#[derive(Debug, Clone)]
pub struct RunOncePlugin<P> {
    inner: P,
}

impl<P: ConfigPlugin> RunOncePlugin<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Apply the plugin unless `ctx` already records it. Returns whether it
    /// ran. The id is recorded before running, so a failed run is not
    /// retried within the same context.
    pub fn apply(&self, ctx: &mut ConfigContext, project: &mut NativeProject) -> Result<bool> {
        let id = self.inner.id();
        if !ctx.record(id.clone()) {
            debug!(plugin = %id, "already applied in this pass, skipping");
            return Ok(false);
        }
        info!(plugin = %id, "applying");
        self.inner.apply(project)?;
        Ok(true)
    }
}
