//! # File I/O Module
//!
//! Project file operations for shared estimating drives:
//! - **Atomic saves**: write to a sidecar `.tmp`, fsync, rename over the target
//! - **File locking**: an OS lock plus a `.lbr.lock` file naming the holder
//! - **Version validation**: refuse files written by a newer schema
//!
//! ## Example
//!
//! ```rust,no_run
//! use takeoff_core::file_io::{save_project, load_project, FileLock};
//! use takeoff_core::project::TakeoffProject;
//! use std::path::Path;
//!
//! let project = TakeoffProject::new("Pat Estimator", "26-014");
//! let path = Path::new("smith-garage.lbr");
//!
//! let lock = FileLock::acquire(path, "pat@example.com")?;
//! save_project(&project, path)?;
//! drop(lock);
//!
//! let reloaded = load_project(path)?;
//! # Ok::<(), takeoff_core::errors::TakeoffError>(())
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::errors::{TakeoffError, TakeoffResult};
use crate::input::ProjectInput;
use crate::project::{TakeoffProject, SCHEMA_VERSION};

/// Locks older than this are treated as abandoned
const STALE_LOCK_HOURS: i64 = 24;

/// Lock file metadata stored in .lbr.lock files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockInfo {
    /// User identifier (email or username)
    pub user_id: String,
    pub machine: String,
    pub pid: u32,
    pub locked_at: DateTime<Utc>,
}

impl LockInfo {
    /// Lock info for the current process
    pub fn new(user_id: impl Into<String>) -> Self {
        LockInfo {
            user_id: user_id.into(),
            machine: hostname().unwrap_or_else(|| "unknown".to_string()),
            pid: std::process::id(),
            locked_at: Utc::now(),
        }
    }

    /// A lock is stale once its process is gone (same machine) or it is a day old.
    pub fn is_stale(&self) -> bool {
        if hostname().as_deref() == Some(self.machine.as_str()) && !process_alive(self.pid) {
            return true;
        }
        (Utc::now() - self.locked_at).num_hours() > STALE_LOCK_HOURS
    }
}

fn hostname() -> Option<String> {
    #[cfg(windows)]
    {
        std::env::var("COMPUTERNAME").ok()
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOSTNAME")
            .ok()
            .or_else(|| std::env::var("HOST").ok())
    }
}

#[cfg(target_os = "linux")]
fn process_alive(pid: u32) -> bool {
    Path::new(&format!("/proc/{}", pid)).exists()
}

#[cfg(windows)]
fn process_alive(pid: u32) -> bool {
    use std::process::Command;
    match Command::new("tasklist")
        .args(["/FI", &format!("PID eq {}", pid), "/NH"])
        .output()
    {
        Ok(output) => String::from_utf8_lossy(&output.stdout).contains(&pid.to_string()),
        Err(_) => true,
    }
}

#[cfg(not(any(target_os = "linux", windows)))]
fn process_alive(_pid: u32) -> bool {
    true
}

/// Exclusive lock on a project file, released on drop.
///
/// Holds an OS-level lock (fs2) on the sidecar file for process safety and
/// writes [`LockInfo`] into it so other users can see who has the file.
pub struct FileLock {
    project_path: PathBuf,
    lock_path: PathBuf,
    /// Keeps the OS lock alive
    _lock_file: File,
    pub info: LockInfo,
}

impl FileLock {
    /// Acquire an exclusive lock on a project file.
    ///
    /// Fails with [`TakeoffError::FileLocked`] when another live holder
    /// has it; a stale lock is taken over.
    pub fn acquire(path: &Path, user_id: impl Into<String>) -> TakeoffResult<Self> {
        let lock_path = sidecar_path(path, "lock");
        let info = LockInfo::new(user_id);

        if let Some(existing) = read_lock_info(&lock_path).filter(|i| !i.is_stale()) {
            return Err(TakeoffError::file_locked(
                path.display().to_string(),
                format!("{} ({})", existing.user_id, existing.machine),
                existing.locked_at.to_rfc3339(),
            ));
        }

        let mut lock_file = OpenOptions::new()
            .write(true)
            .read(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .map_err(|e| TakeoffError::file_error("create lock", lock_path.display().to_string(), e.to_string()))?;

        lock_file.try_lock_exclusive().map_err(|_| {
            TakeoffError::file_locked(path.display().to_string(), "another process", "unknown")
        })?;

        let lock_json = serde_json::to_string_pretty(&info).map_err(TakeoffError::serialization)?;
        lock_file
            .write_all(lock_json.as_bytes())
            .and_then(|_| lock_file.sync_all())
            .map_err(|e| TakeoffError::file_error("write lock", lock_path.display().to_string(), e.to_string()))?;

        tracing::debug!(path = %path.display(), user = %info.user_id, "acquired project lock");

        Ok(FileLock {
            project_path: path.to_path_buf(),
            lock_path,
            _lock_file: lock_file,
            info,
        })
    }

    /// Who holds the lock on `path`, if anyone.
    pub fn check(path: &Path) -> Option<LockInfo> {
        read_lock_info(&sidecar_path(path, "lock")).filter(|info| !info.is_stale())
    }

    pub fn project_path(&self) -> &Path {
        &self.project_path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
    }
}

/// `project.lbr` -> `project.lbr.{suffix}`
fn sidecar_path(path: &Path, suffix: &str) -> PathBuf {
    let mut sidecar = path.to_path_buf();
    let extension = path
        .extension()
        .map(|e| format!("{}.{}", e.to_string_lossy(), suffix))
        .unwrap_or_else(|| suffix.to_string());
    sidecar.set_extension(extension);
    sidecar
}

fn read_lock_info(lock_path: &Path) -> Option<LockInfo> {
    let contents = fs::read_to_string(lock_path).ok()?;
    serde_json::from_str(&contents).ok()
}

/// Write `data` to `path` so that readers see either the old or the new
/// file, never a partial one.
pub fn atomic_write(path: &Path, data: &[u8]) -> TakeoffResult<()> {
    let tmp_path = sidecar_path(path, "tmp");

    let mut tmp_file = File::create(&tmp_path)
        .map_err(|e| TakeoffError::file_error("create temp file", tmp_path.display().to_string(), e.to_string()))?;

    tmp_file
        .write_all(data)
        .and_then(|_| tmp_file.sync_all())
        .map_err(|e| TakeoffError::file_error("write temp file", tmp_path.display().to_string(), e.to_string()))?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        TakeoffError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

/// Save a project as pretty-printed JSON with atomic write semantics.
pub fn save_project(project: &TakeoffProject, path: &Path) -> TakeoffResult<()> {
    let json = serde_json::to_string_pretty(project).map_err(TakeoffError::serialization)?;
    atomic_write(path, json.as_bytes())?;
    tracing::info!(path = %path.display(), "saved project");
    Ok(())
}

/// Load a project file, checking its schema version.
pub fn load_project(path: &Path) -> TakeoffResult<TakeoffProject> {
    let contents = read_file(path)?;
    let project: TakeoffProject = serde_json::from_str(&contents).map_err(|e| {
        TakeoffError::serialization(format!("Invalid project file {}: {}", path.display(), e))
    })?;
    validate_version(&project.meta.version)?;
    Ok(project)
}

/// Load either a project file or a bare [`ProjectInput`] JSON document.
///
/// A bare input is wrapped in fresh metadata with the default catalog.
pub fn load_project_or_input(path: &Path) -> TakeoffResult<TakeoffProject> {
    let contents = read_file(path)?;
    let value: serde_json::Value = serde_json::from_str(&contents)
        .map_err(|e| TakeoffError::serialization(format!("Invalid JSON in {}: {}", path.display(), e)))?;

    if value.get("meta").is_some() && value.get("input").is_some() {
        let project: TakeoffProject = serde_json::from_value(value).map_err(|e| {
            TakeoffError::serialization(format!("Invalid project file {}: {}", path.display(), e))
        })?;
        validate_version(&project.meta.version)?;
        return Ok(project);
    }

    let input: ProjectInput = serde_json::from_value(value).map_err(|e| {
        TakeoffError::serialization(format!("Invalid project input {}: {}", path.display(), e))
    })?;
    tracing::debug!(path = %path.display(), "loaded bare project input");
    Ok(TakeoffProject::from_input(input))
}

fn read_file(path: &Path) -> TakeoffResult<String> {
    fs::read_to_string(path)
        .map_err(|e| TakeoffError::file_error("read", path.display().to_string(), e.to_string()))
}

/// Major versions must match; on 0.x a newer minor is rejected too.
fn validate_version(file_version: &str) -> TakeoffResult<()> {
    let parse = |v: &str| -> Vec<u32> { v.split('.').filter_map(|p| p.parse().ok()).collect() };
    let file_parts = parse(file_version);
    let current_parts = parse(SCHEMA_VERSION);

    let mismatch = || TakeoffError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    match (file_parts.as_slice(), current_parts.as_slice()) {
        ([file_major, ..], [current_major, ..]) if file_major != current_major => Err(mismatch()),
        ([0, file_minor, ..], [0, current_minor, ..]) if file_minor > current_minor => Err(mismatch()),
        ([_, ..], [_, ..]) => Ok(()),
        _ => Err(mismatch()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::FeetInches;

    fn garage_project() -> TakeoffProject {
        let input = ProjectInput::single_room(FeetInches::new(20.0, 0.0), FeetInches::new(15.0, 0.0));
        TakeoffProject::new("Test Estimator", "TEST-001").with_input(input)
    }

    #[test]
    fn test_sidecar_paths() {
        let path = Path::new("/jobs/smith.lbr");
        assert_eq!(sidecar_path(path, "lock"), Path::new("/jobs/smith.lbr.lock"));
        assert_eq!(sidecar_path(path, "tmp"), Path::new("/jobs/smith.lbr.tmp"));
        assert_eq!(sidecar_path(Path::new("/jobs/smith"), "lock"), Path::new("/jobs/smith.lock"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roundtrip.lbr");

        let project = garage_project();
        save_project(&project, &path).unwrap();

        let loaded = load_project(&path).unwrap();
        assert_eq!(loaded.meta.estimator, "Test Estimator");
        assert_eq!(loaded.meta.job_id, "TEST-001");
        assert_eq!(loaded.input, project.input);
        assert_eq!(loaded.calculate(), project.calculate());
    }

    #[test]
    fn test_atomic_save_leaves_no_tmp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("atomic.lbr");

        save_project(&garage_project(), &path).unwrap();

        assert!(path.exists());
        assert!(!sidecar_path(&path, "tmp").exists());
    }

    #[test]
    fn test_load_bare_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("form.json");
        fs::write(
            &path,
            r#"{ "rooms": [{ "lengthFt": 20, "widthFt": 15 }], "overallLengthFt": 20, "overallWidthFt": 15 }"#,
        )
        .unwrap();

        let project = load_project_or_input(&path).unwrap();
        assert_eq!(project.meta.version, SCHEMA_VERSION);
        assert_eq!(project.input.overall_length_ft, 20.0);
    }

    #[test]
    fn test_load_either_accepts_project_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("project.lbr");
        save_project(&garage_project(), &path).unwrap();

        let project = load_project_or_input(&path).unwrap();
        assert_eq!(project.meta.job_id, "TEST-001");
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.lbr");
        fs::write(&path, "{ not json").unwrap();

        let err = load_project_or_input(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_project(Path::new("/definitely/not/here.lbr")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_file_lock_acquire_and_release() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("locked.lbr");
        File::create(&path).unwrap();

        let lock = FileLock::acquire(&path, "test@example.com").unwrap();
        assert_eq!(lock.info.user_id, "test@example.com");
        assert_eq!(lock.project_path(), path.as_path());

        let lock_path = sidecar_path(&path, "lock");
        assert!(lock_path.exists());

        drop(lock);
        assert!(!lock_path.exists());
    }

    #[test]
    fn test_old_lock_is_stale() {
        let mut info = LockInfo::new("someone");
        info.machine = "some-other-machine".to_string();
        assert!(!info.is_stale());

        info.locked_at = Utc::now() - chrono::Duration::hours(STALE_LOCK_HOURS + 1);
        assert!(info.is_stale());
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.7").is_ok());
        assert!(validate_version("0.0.9").is_ok());

        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("garbage").is_err());
    }
}
