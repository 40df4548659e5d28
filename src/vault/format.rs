//! JSON vault file format and atomic persistence.
//!
//! A vault file is a pretty-printed JSON object keyed by service name:
//!
//! ```text
//! {
//!   "github": {
//!     "username": "alice",
//!     "password": "<plaintext or base64 token>",
//!     "notes": "",
//!     "created_at": "2026-10-19T08:12:44.120391Z",
//!     "updated_at": "2026-10-19T08:12:44.120391Z"
//!   }
//! }
//! ```
//!
//! The same shape is used for plaintext exports.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

use super::entry::StoredEntry;
use crate::errors::{PassVaultError, Result};

/// The whole record set, sorted by service name.
pub type VaultData = BTreeMap<String, StoredEntry>;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Read a vault file from disk.
///
/// A missing file, or one containing only whitespace, is an empty
/// vault.  A file that exists but cannot be read or parsed is reported
/// as `Storage` so the caller never mistakes corruption for an empty
/// vault (and never overwrites it).
pub fn read_vault(path: &Path) -> Result<VaultData> {
    if !path.exists() {
        return Ok(VaultData::new());
    }

    let contents = fs::read_to_string(path).map_err(|e| storage_error(path, e.to_string()))?;

    if contents.trim().is_empty() {
        return Ok(VaultData::new());
    }

    serde_json::from_str(&contents).map_err(|e| storage_error(path, format!("invalid JSON: {e}")))
}

/// Write a vault (or export) file to disk **atomically**.
///
/// 1. Serialize to pretty JSON.
/// 2. Write to a temp file in the same directory and flush it.
/// 3. Rename the temp file over the target path.
///
/// The rename ensures readers never see a half-written file.
pub fn write_vault(path: &Path, data: &VaultData) -> Result<()> {
    let mut json = serde_json::to_string_pretty(data)
        .map_err(|e| PassVaultError::SerializationError(format!("vault: {e}")))?;
    json.push('\n');

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if !parent.exists() {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    let result = write_and_rename(&tmp_path, path, json.as_bytes());
    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

/// Resolve `path` to an absolute form suitable for comparing two paths
/// that may be spelled differently (relative, `..`, symlinked parent).
///
/// The file itself need not exist; only its parent is canonicalized then.
pub fn resolve_path(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => path.to_path_buf(),
        }
    };

    if let Ok(canonical) = fs::canonicalize(&absolute) {
        return canonical;
    }
    let resolved = match (absolute.parent(), absolute.file_name()) {
        (Some(parent), Some(name)) => fs::canonicalize(parent).ok().map(|p| p.join(name)),
        _ => None,
    };
    resolved.unwrap_or(absolute)
}

fn write_and_rename(tmp_path: &Path, path: &Path, contents: &[u8]) -> Result<()> {
    let mut file = fs::File::create(tmp_path)?;
    restrict_permissions(tmp_path);
    file.write_all(contents)?;
    file.sync_all()?;
    drop(file);

    fs::rename(tmp_path, path)?;
    Ok(())
}

fn storage_error(path: &Path, reason: String) -> PassVaultError {
    PassVaultError::Storage {
        path: path.to_path_buf(),
        reason,
    }
}

/// On Unix, restrict the file to owner read/write.
fn restrict_permissions(path: &Path) {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = fs::Permissions::from_mode(0o600);
        let _ = fs::set_permissions(path, perms);
    }
    #[cfg(not(unix))]
    let _ = path;
}

// ---------------------------------------------------------------------------
// Serde helper for timestamps
// ---------------------------------------------------------------------------

/// Accept RFC 3339 timestamps, and also offset-less ISO-8601 ones
/// (`2024-01-31T10:00:00.123456`), which are read as UTC.
pub(crate) fn deserialize_timestamp<'de, D>(
    deserializer: D,
) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_timestamp(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{s}'")))
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}
