//! Invocation of the external solver binaries.
//!
//! The sweep runners treat `driver` and `a.out` as black boxes: they are started
//! with positional arguments, inherit the terminal, and the caller blocks until
//! they exit. There is no timeout, retry or cancellation. A non-zero exit status
//! is reported as an error so a sweep can log it and move on.

use anyhow::{Context, Result, ensure};
use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
    process::{Command, Stdio},
    time::{Duration, Instant},
};

/// An external program run from a fixed working directory.
#[derive(Debug, Clone)]
pub struct ExternalProgram {
    program: PathBuf,
    working_dir: PathBuf,
}

impl ExternalProgram {
    /// `program` is resolved relative to `working_dir` when it is a relative path
    /// with more than one component (e.g. `./driver`); bare names go through `PATH`.
    pub fn new(program: impl Into<PathBuf>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            working_dir: working_dir.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// The path handed to the OS. The child starts inside `working_dir`, so a
    /// path relative to it is made absolute against this process's directory.
    fn resolved_program(&self) -> Result<PathBuf> {
        if self.program.is_relative() && self.program.components().count() > 1 {
            let joined = self.working_dir.join(&self.program);
            std::path::absolute(&joined)
                .with_context(|| format!("Failed to resolve program path {joined:?}"))
        } else {
            Ok(self.program.clone())
        }
    }

    /// Runs the program with `args`, blocking until it exits.
    ///
    /// Returns the wall-clock time between spawning the child and reaping it.
    pub fn run<I, S>(&self, args: I) -> Result<Duration>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<S> = args.into_iter().collect();
        let rendered: Vec<String> = args
            .iter()
            .map(|a| a.as_ref().to_string_lossy().into_owned())
            .collect();
        log::debug!(
            "running {:?} {} in {:?}",
            self.program,
            rendered.join(" "),
            self.working_dir
        );

        let start = Instant::now();
        let status = Command::new(self.resolved_program()?)
            .args(&args)
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .with_context(|| format!("Failed to execute {:?}", self.program))?;
        let elapsed = start.elapsed();

        ensure!(
            status.success(),
            "{:?} {} failed with status: {}",
            self.program,
            rendered.join(" "),
            status
        );
        Ok(elapsed)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_successful_run_reports_duration() {
        let dir = tempfile::tempdir().unwrap();
        let program = ExternalProgram::new("true", dir.path());
        let elapsed = program.run(std::iter::empty::<&str>()).unwrap();
        assert!(elapsed < Duration::from_secs(10));
    }

    #[test]
    fn test_runs_in_working_directory() {
        let dir = tempfile::tempdir().unwrap();
        let program = ExternalProgram::new("sh", dir.path());
        program.run(["-c", "echo 1 2 > output.txt"]).unwrap();
        assert!(dir.path().join("output.txt").exists());
    }

    #[test]
    fn test_non_zero_exit_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let program = ExternalProgram::new("sh", dir.path());
        let err = program.run(["-c", "exit 3"]).unwrap_err();
        assert!(err.to_string().contains("failed with status"));
    }

    #[test]
    fn test_relative_program_in_relative_working_dir() {
        use std::os::unix::fs::PermissionsExt;

        // A relative directory under the package root, as `--working-dir runs` gives.
        let dir = tempfile::tempdir_in(".").unwrap();
        let relative = dir
            .path()
            .strip_prefix(std::env::current_dir().unwrap())
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| dir.path().to_path_buf());
        assert!(relative.is_relative());

        let script = dir.path().join("driver");
        std::fs::write(&script, "#!/bin/sh\necho \"$1 $2\" > output.txt\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let program = ExternalProgram::new("./driver", &relative);
        assert_eq!(
            program.resolved_program().unwrap(),
            std::path::absolute(relative.join("driver")).unwrap()
        );
        program.run(["5", "1"]).unwrap();
        let written = std::fs::read_to_string(dir.path().join("output.txt")).unwrap();
        assert_eq!(written, "5 1\n");
    }

    #[test]
    fn test_missing_binary_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let program = ExternalProgram::new("./does-not-exist", dir.path());
        assert!(program.run(["5"]).is_err());
    }
}
