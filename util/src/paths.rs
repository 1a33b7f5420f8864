use crate::config;
use std::{
    fs, io,
    path::{Component, Path, PathBuf},
};

/// Ensure the parent directory of a *file path* exists (no-op if none).
pub fn ensure_parent_dir<P: AsRef<Path>>(file_path: P) -> io::Result<()> {
    if let Some(parent) = file_path.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Whether a `DATABASE_PATH` value is a full DSN rather than a SQLite file path.
pub fn is_database_dsn(value: &str) -> bool {
    value.starts_with("sqlite:") || value.starts_with("postgres://") || value.starts_with("mysql://")
}

/// The SQLite file behind a `DATABASE_PATH` value, if there is one.
///
/// Bare paths are returned as is. `sqlite:` DSNs lose their scheme and query
/// string. In-memory and non-SQLite databases have no file.
pub fn sqlite_file_path(value: &str) -> Option<String> {
    if !is_database_dsn(value) {
        return Some(value.to_owned());
    }
    let rest = value
        .strip_prefix("sqlite://")
        .or_else(|| value.strip_prefix("sqlite:"))?;
    let file = rest.split('?').next().unwrap_or_default();
    if file.is_empty() || file.contains(":memory:") {
        None
    } else {
        Some(file.to_owned())
    }
}

/// Connection URL for `DATABASE_PATH`.
///
/// A full DSN is used unchanged. A bare SQLite path gets its parent directory
/// created and is opened in read-write-create mode.
pub fn database_url(value: &str) -> String {
    if is_database_dsn(value) {
        return value.to_owned();
    }
    // SQLite won't create intermediate dirs.
    if let Err(err) = ensure_parent_dir(value) {
        tracing::warn!(path = %value, error = %err, "Could not create database directory");
    }
    format!("sqlite://{value}?mode=rwc")
}

/// Media storage root (absolute), from `config::media_storage_root()`.
/// If relative in env, resolve against current_dir().
pub fn media_storage_root() -> PathBuf {
    let p = PathBuf::from(config::media_storage_root());
    if p.is_absolute() {
        p
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(p)
    }
}

/// Object key for a recording backup: `{student_id}/{assignment_id}/{timestamp_ms}.{ext}`.
pub fn media_key(student_id: &str, assignment_id: &str, timestamp_ms: i64, ext: &str) -> String {
    format!("{student_id}/{assignment_id}/{timestamp_ms}.{ext}")
}

/// Whether `segment` can stand as one component of an object key.
pub fn is_key_segment(segment: &str) -> bool {
    !segment.is_empty() && segment != "." && segment != ".." && !segment.contains(['/', '\\'])
}

/// Whether `key` is relative and made only of plain segments.
pub fn is_valid_media_key(key: &str) -> bool {
    !key.is_empty() && key.split('/').all(is_key_segment)
}

/// Resolves an object key below `root`.
///
/// Returns `None` for keys that are empty, absolute or contain `..`, so a key
/// taken from a URL can never escape the storage root.
pub fn media_path(root: &Path, key: &str) -> Option<PathBuf> {
    let relative = Path::new(key);
    if !is_valid_media_key(key) || relative.is_absolute() {
        return None;
    }
    if !relative
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
    {
        return None;
    }
    Some(root.join(relative))
}
