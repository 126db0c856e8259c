// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Tagged generated-code blocks.
//
// A block looks like:
//
//   // @generated begin <tag> - expo prebuild (DO NOT MODIFY) sync-<sha256 of body>
//   <body lines>
//   // @generated end <tag>
//
// The header embeds a hash of the body, so merging the same body twice is a
// no-op while a changed body replaces the previous block with the same tag.

use codepush_core::error::{PluginError, Result};
use codepush_core::types::NativeFile;
use regex::Regex;
use sha2::{Digest, Sha256};
use tracing::debug;

/// Inputs to [`merge_contents`].
#[derive(Debug, Clone, Copy)]
pub struct MergeOptions<'a> {
    /// File being edited (for error reporting).
    pub file: NativeFile,
    /// Current file contents.
    pub src: &'a str,
    /// Body to insert; may span several lines.
    pub new_src: &'a str,
    /// Unique block tag.
    pub tag: &'a str,
    /// The block is inserted relative to the first line matching this.
    pub anchor: &'a Regex,
    /// 0 inserts before the anchor line, 1 right after it.
    pub offset: usize,
    /// Line-comment token of the file's language, e.g. `//`.
    pub comment: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeResults {
    pub contents: String,
    /// A new block was written.
    pub did_merge: bool,
    /// A stale block with the same tag was removed first.
    pub did_clear: bool,
}

/// `sync-` followed by the hex SHA-256 of `contents`.
pub fn sync_hash(contents: &str) -> String {
    format!("sync-{}", hex::encode(Sha256::digest(contents.as_bytes())))
}

pub fn generated_header(new_src: &str, tag: &str, comment: &str) -> String {
    format!(
        "{comment} @generated begin {tag} - expo prebuild (DO NOT MODIFY) {}",
        sync_hash(new_src)
    )
}

pub fn generated_footer(tag: &str, comment: &str) -> String {
    format!("{comment} @generated end {tag}")
}

/// Insert a tagged block after (or at) the anchor unless an identical block
/// is already present.
pub fn merge_contents(options: MergeOptions<'_>) -> Result<MergeResults> {
    let header = generated_header(options.new_src, options.tag, options.comment);
    if options.src.contains(&header) {
        debug!(tag = options.tag, "generated block already up to date");
        return Ok(MergeResults {
            contents: options.src.to_string(),
            did_merge: false,
            did_clear: false,
        });
    }

    let sanitized = remove_generated_contents(options.src, options.tag);
    let did_clear = sanitized.is_some();

    let mut block = Vec::with_capacity(options.new_src.lines().count() + 2);
    block.push(header);
    block.extend(options.new_src.split('\n').map(str::to_string));
    block.push(generated_footer(options.tag, options.comment));

    let contents = add_lines(
        sanitized.as_deref().unwrap_or(options.src),
        options.file,
        options.anchor,
        options.offset,
        block,
    )?;

    debug!(tag = options.tag, did_clear, "merged generated block");
    Ok(MergeResults {
        contents,
        did_merge: true,
        did_clear,
    })
}

/// Remove the block tagged `tag`, or `None` if there is no complete block.
pub fn remove_generated_contents(src: &str, tag: &str) -> Option<String> {
    let begin = format!("@generated begin {tag} -");
    let end = format!("@generated end {tag}");

    let mut lines: Vec<&str> = src.split('\n').collect();
    let start = lines.iter().position(|line| line.contains(&begin))?;
    let finish = lines.iter().position(|line| line.contains(&end))?;
    if start >= finish {
        return None;
    }
    lines.drain(start..=finish);
    Some(lines.join("\n"))
}

/// Whether `src` contains a begin marker for `tag`.
pub fn has_generated_block(src: &str, tag: &str) -> bool {
    let begin = format!("@generated begin {tag} -");
    src.split('\n').any(|line| line.contains(&begin))
}

fn add_lines(
    content: &str,
    file: NativeFile,
    anchor: &Regex,
    offset: usize,
    to_add: Vec<String>,
) -> Result<String> {
    let mut lines: Vec<String> = content.split('\n').map(str::to_string).collect();
    let anchor_index = lines
        .iter()
        .position(|line| anchor.is_match(line))
        .ok_or_else(|| PluginError::AnchorNotFound {
            file,
            anchor: anchor.as_str().to_string(),
        })?;

    let at = (anchor_index + offset).min(lines.len());
    lines.splice(at..at, to_add);
    Ok(lines.join("\n"))
}
