//! Internal implementation for the package-name migration
//!
//! Each step is a free function returning `Result<_, MigrationError>`.
//! The orchestrator in mod.rs decides how each error is reported.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::report::StepStatus;
use super::MigrationError;
use crate::fsutil;
use crate::identifier::PackageIdentifier;
use crate::paths::ProjectLayout;

/// Gradle key holding the Android application id
pub const APPLICATION_ID_KEY: &str = "applicationId";

/// Xcode build setting holding the iOS bundle id
pub const BUNDLE_ID_KEY: &str = "PRODUCT_BUNDLE_IDENTIFIER";

// =============================================================================
// Step 1: locate applicationId
// =============================================================================

/// An `applicationId` assignment found in build.gradle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationId {
    /// Quoted value, without quotes
    pub value: String,
    /// Assignment text as written, e.g. `applicationId = "com.example.app"`
    pub assignment: String,
    /// Everything before the opening quote, e.g. `applicationId = `
    prefix: String,
    quote: char,
    /// 1-based line number
    pub line: usize,
}

impl ApplicationId {
    /// The same assignment carrying a different value
    pub fn with_value(&self, value: &str) -> String {
        format!("{}{}{}{}", self.prefix, self.quote, value, self.quote)
    }
}

/// Read build.gradle and return its first `applicationId` assignment.
pub fn locate_application_id(path: &Path) -> Result<ApplicationId, MigrationError> {
    if !path.is_file() {
        return Err(MigrationError::OptionalArtifactMissing {
            path: path.to_path_buf(),
        });
    }

    let text = fs::read_to_string(path).map_err(|source| MigrationError::ReadFailure {
        path: path.to_path_buf(),
        source,
    })?;

    find_application_id(&text).ok_or_else(|| MigrationError::DescriptorKeyNotFound {
        path: path.to_path_buf(),
        key: APPLICATION_ID_KEY,
    })
}

/// First `applicationId` assignment in Groovy build-script text.
///
/// Comments are ignored, and the key must be a whole word: `testApplicationId`
/// and `applicationIdSuffix` do not count. Comment markers inside quoted
/// strings (`'META-INF/*.kotlin_module'`, `"https://..."`) are not comments.
/// Accepts `applicationId "x"`, `applicationId = "x"`, single quotes, and
/// inline block comments between key and value.
pub fn find_application_id(text: &str) -> Option<ApplicationId> {
    let mut in_block_comment = false;

    for (idx, line) in text.lines().enumerate() {
        let kinds = classify_line(line, &mut in_block_comment);

        let mut search_from = 0;
        while let Some(pos) = line[search_from..].find(APPLICATION_ID_KEY) {
            let start = search_from + pos;
            search_from = start + APPLICATION_ID_KEY.len();

            if let Some(found) = parse_assignment(line, &kinds, start) {
                return Some(ApplicationId {
                    line: idx + 1,
                    ..found
                });
            }
        }
    }

    None
}

/// What a byte of a build-script line belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lexeme {
    Code,
    Comment,
    Literal,
}

/// Classify every byte of `line`, tracking block comments across lines.
///
/// Quoted literals are single-line; a backslash escapes the next byte.
fn classify_line(line: &str, in_block_comment: &mut bool) -> Vec<Lexeme> {
    let bytes = line.as_bytes();
    let mut kinds = vec![Lexeme::Code; bytes.len()];
    let mut i = 0;

    while i < bytes.len() {
        if *in_block_comment {
            if bytes[i..].starts_with(b"*/") {
                kinds[i..i + 2].fill(Lexeme::Comment);
                i += 2;
                *in_block_comment = false;
            } else {
                kinds[i] = Lexeme::Comment;
                i += 1;
            }
            continue;
        }

        match bytes[i] {
            quote @ (b'"' | b'\'') => {
                kinds[i] = Lexeme::Literal;
                i += 1;
                while i < bytes.len() {
                    kinds[i] = Lexeme::Literal;
                    if bytes[i] == b'\\' && i + 1 < bytes.len() {
                        kinds[i + 1] = Lexeme::Literal;
                        i += 2;
                        continue;
                    }
                    i += 1;
                    if bytes[i - 1] == quote {
                        break;
                    }
                }
            }
            b'/' if bytes[i..].starts_with(b"//") => {
                kinds[i..].fill(Lexeme::Comment);
                break;
            }
            b'/' if bytes[i..].starts_with(b"/*") => {
                kinds[i..i + 2].fill(Lexeme::Comment);
                i += 2;
                *in_block_comment = true;
            }
            _ => i += 1,
        }
    }

    kinds
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Parse `applicationId [=] "value"` starting at byte `start` of `line`.
///
/// `assignment` and `prefix` are cut from the raw line so they match the
/// file text byte for byte, inline comments included.
fn parse_assignment(line: &str, kinds: &[Lexeme], start: usize) -> Option<ApplicationId> {
    let key_end = start + APPLICATION_ID_KEY.len();
    if kinds[start..key_end].iter().any(|k| *k != Lexeme::Code) {
        return None;
    }

    let before = line[..start].chars().next_back();
    if before.is_some_and(|c| is_ident_char(c) || c == '.') {
        return None;
    }
    if line[key_end..].chars().next().is_some_and(is_ident_char) {
        return None;
    }

    let bytes = line.as_bytes();
    let skip_blank = |mut i: usize| {
        while i < bytes.len() && (kinds[i] == Lexeme::Comment || bytes[i].is_ascii_whitespace()) {
            i += 1;
        }
        i
    };

    let mut i = skip_blank(key_end);
    if i < bytes.len() && bytes[i] == b'=' && kinds[i] == Lexeme::Code {
        i = skip_blank(i + 1);
    }

    let quote = match bytes.get(i) {
        Some(q @ (b'"' | b'\'')) if kinds[i] == Lexeme::Literal => *q,
        _ => return None,
    };

    let value_start = i + 1;
    let mut j = value_start;
    while j < bytes.len() && bytes[j] != quote {
        j += if bytes[j] == b'\\' { 2 } else { 1 };
    }
    if j >= bytes.len() {
        return None;
    }

    Some(ApplicationId {
        value: line[value_start..j].to_string(),
        assignment: line[start..=j].to_string(),
        prefix: line[start..i].to_string(),
        quote: char::from(quote),
        line: 0,
    })
}

// =============================================================================
// Step 2: rewrite build.gradle
// =============================================================================

/// Result of rewriting the located assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradleRewrite {
    /// The assignment already carries the new value; nothing written
    AlreadyCurrent,
    /// Occurrences replaced
    Replaced(usize),
    /// The located assignment text was not found in the file
    NoMatch,
}

/// Replace every occurrence of the located assignment with the new value.
pub fn rewrite_gradle(
    path: &Path,
    found: &ApplicationId,
    new_id: &PackageIdentifier,
) -> Result<GradleRewrite, MigrationError> {
    let replacement = found.with_value(new_id.as_str());
    if replacement == found.assignment {
        return Ok(GradleRewrite::AlreadyCurrent);
    }

    match replace_in_file(path, &found.assignment, &replacement)? {
        0 => Ok(GradleRewrite::NoMatch),
        count => Ok(GradleRewrite::Replaced(count)),
    }
}

// =============================================================================
// Step 3: relocate the namespace directory tree
// =============================================================================

/// What happened to the Android sources
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relocation {
    pub status: StepStatus,
    pub detail: String,
    pub moved: usize,
    /// Files left in the old tree because the destination already existed
    pub conflicts: Vec<PathBuf>,
}

impl Relocation {
    fn no_op(detail: impl Into<String>) -> Self {
        Self {
            status: StepStatus::NoOp,
            detail: detail.into(),
            moved: 0,
            conflicts: Vec::new(),
        }
    }
}

/// Move every file from the old namespace tree to the new one and delete
/// the emptied old directories.
pub fn relocate_sources(
    layout: &ProjectLayout,
    root: &Path,
    old_id: &PackageIdentifier,
    new_id: &PackageIdentifier,
) -> Result<Relocation, MigrationError> {
    let old_dir = layout.namespace_dir(root, old_id);
    let new_dir = layout.namespace_dir(root, new_id);

    if old_dir == new_dir {
        return Ok(Relocation::no_op(format!(
            "sources already under {}",
            display_rel(root, &new_dir)
        )));
    }
    if !old_dir.is_dir() {
        return Ok(Relocation::no_op(format!(
            "no sources at {}",
            display_rel(root, &old_dir)
        )));
    }

    // Snapshot before creating the new tree: it may live inside the old one
    let mut files = fsutil::list_files(&old_dir).map_err(|source| MigrationError::ReadFailure {
        path: old_dir.clone(),
        source,
    })?;
    order_for_nesting(&mut files, &old_dir, &new_dir);

    fs::create_dir_all(&new_dir).map_err(|source| MigrationError::WriteFailure {
        path: new_dir.clone(),
        source,
    })?;

    let mut moved = 0;
    let mut conflicts = Vec::new();
    for rel in &files {
        let src = old_dir.join(rel);
        let dest = new_dir.join(rel);

        if dest.exists() {
            debug!("not overwriting {}", dest.display());
            conflicts.push(src);
            continue;
        }

        fsutil::move_file(&src, &dest)
            .map_err(|source| MigrationError::WriteFailure { path: dest, source })?;
        debug!("moved {}", rel.display());
        moved += 1;
    }

    prune_old_tree(layout, root, old_id, &old_dir, &new_dir)?;

    let from = display_rel(root, &old_dir);
    let to = display_rel(root, &new_dir);
    if conflicts.is_empty() {
        Ok(Relocation {
            status: StepStatus::Succeeded,
            detail: format!("moved {moved} file(s) from {from} to {to}"),
            moved,
            conflicts,
        })
    } else {
        let names: Vec<String> = conflicts.iter().map(|p| display_rel(root, p)).collect();
        Ok(Relocation {
            status: StepStatus::Warning,
            detail: format!(
                "moved {moved} file(s) from {from} to {to}; left {} already present at destination: {}",
                conflicts.len(),
                names.join(", ")
            ),
            moved,
            conflicts,
        })
    }
}

/// Order moves so no file's destination is still occupied by a file that
/// has yet to move.
///
/// When the new tree sits inside the old one, every destination is deeper
/// than its source, so deeper files go first. When the old tree sits inside
/// the new one, every destination is shallower, so shallower files go
/// first. Unrelated trees keep sorted order.
fn order_for_nesting(files: &mut [PathBuf], old_dir: &Path, new_dir: &Path) {
    let depth = |p: &PathBuf| p.components().count();
    if new_dir.starts_with(old_dir) {
        files.sort_by_key(|p| std::cmp::Reverse(depth(p)));
    } else if old_dir.starts_with(new_dir) {
        files.sort_by_key(depth);
    }
}

/// Delete empty directories inside the old tree, then walk upward through
/// the old identifier's own segments, stopping at the first directory that
/// still holds anything. The new tree and its ancestors are never touched.
fn prune_old_tree(
    layout: &ProjectLayout,
    root: &Path,
    old_id: &PackageIdentifier,
    old_dir: &Path,
    new_dir: &Path,
) -> Result<(), MigrationError> {
    let write_failure = |path: &Path, source| MigrationError::WriteFailure {
        path: path.to_path_buf(),
        source,
    };

    fsutil::prune_empty_dirs(old_dir, new_dir).map_err(|e| write_failure(old_dir, e))?;

    let top = layout.source_base_path(root).join(old_id.first_segment());
    let mut dir = old_dir.parent();
    while let Some(current) = dir {
        if !current.starts_with(&top) || new_dir.starts_with(current) {
            break;
        }
        if !fsutil::remove_dir_if_empty(current).map_err(|e| write_failure(current, e))? {
            break;
        }
        dir = current.parent();
    }

    Ok(())
}

// =============================================================================
// Step 4: rewrite project.pbxproj
// =============================================================================

/// Replace `PRODUCT_BUNDLE_IDENTIFIER = old;` with the new identifier.
///
/// Returns the number of occurrences replaced. The file is not rewritten
/// when nothing would change.
pub fn rewrite_pbxproj(
    path: &Path,
    old_id: Option<&str>,
    new_id: &PackageIdentifier,
) -> Result<usize, MigrationError> {
    if !path.is_file() {
        return Err(MigrationError::OptionalArtifactMissing {
            path: path.to_path_buf(),
        });
    }

    let Some(old_id) = old_id else {
        return Ok(0);
    };
    if old_id == new_id.as_str() {
        return Ok(0);
    }

    replace_in_file(
        path,
        &bundle_id_setting(old_id),
        &bundle_id_setting(new_id.as_str()),
    )
}

/// `PRODUCT_BUNDLE_IDENTIFIER = <id>;`
pub fn bundle_id_setting(id: &str) -> String {
    format!("{BUNDLE_ID_KEY} = {id};")
}

// =============================================================================
// Helpers
// =============================================================================

/// Replace every occurrence of `from` with `to` in a text file.
///
/// Writes atomically, and only if something matched.
fn replace_in_file(path: &Path, from: &str, to: &str) -> Result<usize, MigrationError> {
    let text = fs::read_to_string(path).map_err(|source| MigrationError::ReadFailure {
        path: path.to_path_buf(),
        source,
    })?;

    let count = text.matches(from).count();
    if count == 0 {
        return Ok(0);
    }

    let updated = text.replace(from, to);
    fsutil::write_atomic(path, updated.as_bytes()).map_err(|source| {
        MigrationError::WriteFailure {
            path: path.to_path_buf(),
            source,
        }
    })?;

    Ok(count)
}

/// Path relative to the project root for messages
pub fn display_rel(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}
