//! Project identifier derivation.
//!
//! A project is named on disk by `{sanitized base name}-{sha256 of full path}`.
//! The base name keeps directory listings readable; the hash keeps two
//! projects with the same folder name apart.

use std::borrow::Cow;
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use sha2::{Digest, Sha256};

use super::error::AppDataError;

/// Longest file name most filesystems accept, in bytes.
const MAX_NAME_BYTES: usize = 255;

static ILLEGAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[/?<>\\:*|"]"#).expect("valid regex"));
static CONTROL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x00-\x1f\x80-\x9f]").expect("valid regex"));
static RESERVED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\.+$").expect("valid regex"));
static WINDOWS_RESERVED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(con|prn|aux|nul|com[0-9]|lpt[0-9])(\..*)?$").expect("valid regex")
});
static WINDOWS_TRAILING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[. ]+$").expect("valid regex"));

/// Stable, filesystem-safe name for a project's data directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<Path> for ProjectId {
    fn as_ref(&self) -> &Path {
        Path::new(&self.0)
    }
}

/// Derive the identifier for an absolute project path.
///
/// Fails with [`AppDataError::InvalidInput`] for an empty or relative path.
/// The hash covers the path exactly as given; no canonicalization happens,
/// so `/a/b` and `/a/b/` are different projects.
pub fn derive_identifier(project_root: impl AsRef<Path>) -> Result<ProjectId, AppDataError> {
    let path = project_root.as_ref();

    if path.as_os_str().is_empty() {
        return Err(AppDataError::invalid_input("missing project path"));
    }

    if !path.is_absolute() {
        return Err(AppDataError::invalid_input(format!(
            "expected an absolute project path, not just a name: {}",
            path.display()
        )));
    }

    let base: Cow<'_, str> = path
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    let name = sanitize_file_name(&base);
    let hash = content_hash(path);

    Ok(ProjectId(format!("{name}-{hash}")))
}

/// Strip characters that are not allowed in a single file name.
///
/// Removes separators and shell-reserved characters, control characters,
/// dot-only names, Windows device names and trailing dots/spaces, then
/// truncates to 255 bytes. May return an empty string.
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned = ILLEGAL_RE.replace_all(name, "");
    let cleaned = CONTROL_RE.replace_all(&cleaned, "");
    let cleaned = RESERVED_RE.replace(&cleaned, "");
    let cleaned = WINDOWS_RESERVED_RE.replace(&cleaned, "");
    let cleaned = WINDOWS_TRAILING_RE.replace(&cleaned, "");

    if cleaned.len() <= MAX_NAME_BYTES {
        return cleaned.into_owned();
    }

    // Don't split in the middle of a multi-byte char
    let mut end = MAX_NAME_BYTES;
    while end > 0 && !cleaned.is_char_boundary(end) {
        end -= 1;
    }
    cleaned[..end].to_string()
}

fn content_hash(path: &Path) -> String {
    let mut hasher = Sha256::new();
    hasher.update(path.as_os_str().as_encoded_bytes());
    format!("{:x}", hasher.finalize())
}
