// Job Discovery
// Enumerates job sources in a directory and derives their executable paths

use crate::error::{ServiceError, ServiceResult};

use serde::Serialize;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// A single source file eligible for compilation and execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Job {
    /// File name within the jobs directory (e.g. `hello.c`)
    pub name: String,
    /// Path to the source file
    pub source: PathBuf,
    /// Path the compiler writes the executable to
    pub executable: PathBuf,
}

impl Job {
    /// Build a job for `name` inside `directory`.
    ///
    /// Returns `None` when `name` does not end with `suffix` or when stripping
    /// the suffix leaves nothing (a file literally named `.c`).
    pub fn new(directory: &Path, name: &str, suffix: &str) -> Option<Self> {
        let stem = name.strip_suffix(suffix)?;
        if stem.is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            source: directory.join(name),
            executable: directory.join(stem),
        })
    }

    /// Path used to spawn the executable.
    ///
    /// A bare relative name such as `hello` would be looked up on PATH, so it
    /// is anchored to the current directory instead.
    pub fn command_path(&self) -> PathBuf {
        let mut components = self.executable.components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Path::new(".").join(&self.executable),
            _ => self.executable.clone(),
        }
    }
}

/// List jobs in `directory`, sorted by file name.
///
/// A missing or unreadable directory yields an empty list. Use
/// [`validate_directory`] to tell the two apart.
pub fn discover(directory: &Path, suffix: &str) -> Vec<Job> {
    let entries = match fs::read_dir(directory) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(directory = %directory.display(), error = %e, "cannot list jobs directory");
            return Vec::new();
        }
    };

    let mut jobs = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            tracing::debug!(path = %path.display(), "skipping entry with non UTF-8 name");
            continue;
        };

        if let Some(job) = Job::new(directory, &name, suffix) {
            jobs.push(job);
        }
    }

    jobs.sort_by(|a, b| a.name.cmp(&b.name));
    tracing::debug!(directory = %directory.display(), count = jobs.len(), "discovered jobs");
    jobs
}

/// Discover jobs and pick the one named `name`
pub fn find_job(directory: &Path, suffix: &str, name: &str) -> Option<Job> {
    discover(directory, suffix)
        .into_iter()
        .find(|job| job.name == name)
}

/// Check that `path` exists and is a directory
pub fn validate_directory(path: &Path) -> ServiceResult<()> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(ServiceError::NotADirectory(path.to_path_buf())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ServiceError::DirectoryNotFound(path.to_path_buf()))
        }
        Err(e) => Err(ServiceError::Io(e)),
    }
}

/// Result of choosing between a requested directory and the fallback
#[derive(Debug)]
pub struct DirectoryChoice {
    /// Directory to use
    pub directory: PathBuf,
    /// Why the requested directory was rejected, if it was
    pub rejected: Option<ServiceError>,
}

/// Use `requested` when it is a valid directory, otherwise `fallback`
pub fn resolve_directory(requested: &Path, fallback: &Path) -> DirectoryChoice {
    match validate_directory(requested) {
        Ok(()) => DirectoryChoice {
            directory: requested.to_path_buf(),
            rejected: None,
        },
        Err(e) => {
            tracing::warn!(
                requested = %requested.display(),
                fallback = %fallback.display(),
                error = %e,
                "invalid jobs directory, falling back to default"
            );
            DirectoryChoice {
                directory: fallback.to_path_buf(),
                rejected: Some(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), "").unwrap();
    }

    fn names(jobs: &[Job]) -> Vec<&str> {
        jobs.iter().map(|j| j.name.as_str()).collect()
    }

    #[test]
    fn test_job_paths_derived_from_suffix() {
        let job = Job::new(Path::new("jobs"), "hello.c", ".c").unwrap();
        assert_eq!(job.source, PathBuf::from("jobs/hello.c"));
        assert_eq!(job.executable, PathBuf::from("jobs/hello"));
    }

    #[test]
    fn test_job_rejects_other_suffix_and_empty_stem() {
        assert!(Job::new(Path::new("jobs"), "notes.txt", ".c").is_none());
        assert!(Job::new(Path::new("jobs"), ".c", ".c").is_none());
        // Suffix must match the end of the name, not just appear in it
        assert!(Job::new(Path::new("jobs"), "main.cpp", ".c").is_none());
    }

    #[test]
    fn test_command_path_anchors_bare_names() {
        let job = Job::new(Path::new(""), "hello.c", ".c").unwrap();
        assert_eq!(job.executable, PathBuf::from("hello"));
        assert_eq!(job.command_path(), PathBuf::from("./hello"));

        let job = Job::new(Path::new("jobs"), "hello.c", ".c").unwrap();
        assert_eq!(job.command_path(), PathBuf::from("jobs/hello"));
    }

    #[test]
    fn test_discover_only_source_files() {
        let temp = tempfile::tempdir().unwrap();
        touch(temp.path(), "hello.c");
        touch(temp.path(), "broken.c");
        touch(temp.path(), "README.md");
        touch(temp.path(), "hello");
        touch(temp.path(), "util.h");
        fs::create_dir(temp.path().join("nested.c")).unwrap();

        let jobs = discover(temp.path(), ".c");
        assert_eq!(names(&jobs), vec!["broken.c", "hello.c"]);
        assert_eq!(jobs[1].source, temp.path().join("hello.c"));
        assert_eq!(jobs[1].executable, temp.path().join("hello"));
    }

    #[test]
    fn test_discover_without_sources_is_empty() {
        let temp = tempfile::tempdir().unwrap();
        touch(temp.path(), "a.txt");
        touch(temp.path(), "b.o");
        touch(temp.path(), "Makefile");

        assert!(discover(temp.path(), ".c").is_empty());
    }

    #[test]
    fn test_discover_missing_directory_is_empty() {
        let temp = tempfile::tempdir().unwrap();
        assert!(discover(&temp.path().join("missing"), ".c").is_empty());
    }

    #[test]
    fn test_discover_respects_configured_suffix() {
        let temp = tempfile::tempdir().unwrap();
        touch(temp.path(), "a.c");
        touch(temp.path(), "b.cc");

        assert_eq!(names(&discover(temp.path(), ".cc")), vec!["b.cc"]);
    }

    #[test]
    fn test_find_job() {
        let temp = tempfile::tempdir().unwrap();
        touch(temp.path(), "hello.c");

        assert!(find_job(temp.path(), ".c", "hello.c").is_some());
        assert!(find_job(temp.path(), ".c", "hello").is_none());
    }

    #[test]
    fn test_validate_directory() {
        let temp = tempfile::tempdir().unwrap();
        touch(temp.path(), "file.c");

        assert!(validate_directory(temp.path()).is_ok());
        assert!(matches!(
            validate_directory(&temp.path().join("file.c")),
            Err(ServiceError::NotADirectory(_))
        ));
        assert!(matches!(
            validate_directory(&temp.path().join("missing")),
            Err(ServiceError::DirectoryNotFound(_))
        ));
    }

    #[test]
    fn test_resolve_directory_falls_back() {
        let temp = tempfile::tempdir().unwrap();
        let fallback = temp.path().join("jobs");

        let choice = resolve_directory(&temp.path().join("typo"), &fallback);
        assert!(choice.rejected.is_some());
        assert_eq!(choice.directory, fallback);

        let choice = resolve_directory(temp.path(), &fallback);
        assert!(choice.rejected.is_none());
        assert_eq!(choice.directory, temp.path());
    }
}
