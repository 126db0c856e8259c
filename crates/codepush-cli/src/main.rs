// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// codepush-config: wire the CodePush update library into a generated
// React Native / Expo native project.
//
// Entry point. Initialises logging, resolves plugin props, and runs a single
// configuration pass (or a read-only status report).

mod props;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use codepush_core::error::{PluginError, Result};
use codepush_core::human_errors::humanize_error;
use codepush_mods::{ConfigContext, inspect, run_pass};
use codepush_project::{AndroidProject, IosProject, NativeProject, ProjectLayout};

use props::{PropsSources, resolve_props};

/// Inject CodePush into the native iOS and Android projects of an app.
#[derive(Parser, Debug)]
#[command(name = "codepush-config", version, about)]
struct Cli {
    /// Log debug output (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply the CodePush edits to Info.plist, AppDelegate, strings.xml,
    /// build.gradle and MainApplication.
    Apply(ApplyArgs),

    /// Report which CodePush edits the native project already carries.
    Status {
        /// App root containing ios/ and android/.
        #[arg(long, default_value = ".")]
        project_root: PathBuf,
    },
}

#[derive(Args, Debug)]
struct ApplyArgs {
    /// App root containing ios/ and android/.
    #[arg(long, default_value = ".")]
    project_root: PathBuf,

    /// Expo app config to read the plugin entry from (default: <root>/app.json).
    #[arg(long)]
    app_config: Option<PathBuf>,

    /// JSON file with {"ios": {...}, "android": {...}} props.
    #[arg(long = "props")]
    props_file: Option<PathBuf>,

    #[arg(long)]
    ios_release_channel: Option<String>,

    #[arg(long)]
    ios_signing_key: Option<String>,

    #[arg(long)]
    android_release_channel: Option<String>,

    #[arg(long)]
    android_signing_key: Option<String>,

    /// List the files that would change without writing them.
    #[arg(long)]
    dry_run: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Command::Apply(args) => apply(args),
        Command::Status { project_root } => status(project_root),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "configuration pass failed");
            let human = humanize_error(&err);
            eprintln!("error: {}", human.message);
            eprintln!("  {}", human.suggestion);
            ExitCode::FAILURE
        }
    }
}

fn apply(args: ApplyArgs) -> Result<()> {
    let sources = PropsSources {
        app_config: args.app_config,
        props_file: args.props_file,
        ios_release_channel: args.ios_release_channel,
        ios_signing_key: args.ios_signing_key,
        android_release_channel: args.android_release_channel,
        android_signing_key: args.android_signing_key,
    };
    let props = resolve_props(&args.project_root, &sources)?;
    if props.is_empty() {
        tracing::warn!("no ios or android props given; nothing to apply");
        return Ok(());
    }

    tracing::info!(
        platforms = ?props.platforms(),
        root = %args.project_root.display(),
        "applying CodePush configuration"
    );

    let mut ctx = ConfigContext::new();
    let outcome = run_pass(&args.project_root, &props, &mut ctx, args.dry_run)?;

    if outcome.changed.is_empty() {
        println!("Already up to date.");
    } else {
        let verb = if outcome.written { "updated" } else { "would update" };
        for path in &outcome.changed {
            println!("{verb} {}", path.display());
        }
    }
    Ok(())
}

fn status(project_root: PathBuf) -> Result<()> {
    let layout = ProjectLayout::new(&project_root);
    let mut project = NativeProject::empty(&project_root);

    match IosProject::load(&layout) {
        Ok(ios) => project.ios = Some(ios),
        Err(PluginError::ProjectLayout(detail)) => println!("ios: not found ({detail})"),
        Err(other) => return Err(other),
    }
    match AndroidProject::load(&layout) {
        Ok(android) => project.android = Some(android),
        Err(PluginError::ProjectLayout(detail)) => println!("android: not found ({detail})"),
        Err(other) => return Err(other),
    }

    for entry in inspect(&project) {
        let mark = if entry.patched { "ok" } else { "--" };
        println!(
            "[{mark}] {:<16} {}  ({})",
            entry.file.label(),
            entry.detail,
            entry.path.display()
        );
    }
    Ok(())
}
