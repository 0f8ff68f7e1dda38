#![allow(dead_code)]

pub mod cli {
    use std::ffi::OsStr;
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::process::ExitStatus;

    use assert_cmd::Command;
    use tempfile::TempDir;

    /// Throwaway workspace with its own config directory, so user config
    /// and `SPRINTBOARD_*` variables on the host never leak in.
    pub struct SbWorkspace {
        pub temp_dir: TempDir,
    }

    impl SbWorkspace {
        pub fn new() -> Self {
            let temp_dir = TempDir::new().expect("create temp dir");
            fs::create_dir_all(temp_dir.path().join(".config")).expect("create config dir");
            Self { temp_dir }
        }

        pub fn root(&self) -> &Path {
            self.temp_dir.path()
        }

        pub fn path(&self, rel: &str) -> PathBuf {
            self.root().join(rel)
        }

        /// Write a file relative to the workspace root, creating parents.
        pub fn write(&self, rel: &str, content: &str) -> PathBuf {
            let path = self.path(rel);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).expect("create parent dir");
            }
            fs::write(&path, content).expect("write file");
            path
        }
    }

    pub struct SbOutput {
        pub status: ExitStatus,
        pub stdout: String,
        pub stderr: String,
    }

    impl SbOutput {
        pub fn json(&self) -> serde_json::Value {
            serde_json::from_str(&self.stdout)
                .unwrap_or_else(|e| panic!("stdout is not JSON ({e}): {}", self.stdout))
        }
    }

    pub fn sb_cmd(workspace: &SbWorkspace) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("sb"));
        cmd.current_dir(workspace.root());
        cmd.env("HOME", workspace.root());
        cmd.env("XDG_CONFIG_HOME", workspace.path(".config"));
        cmd.env("SPRINTBOARD_LOG", "error");
        for var in [
            "SPRINTBOARD_TICKETS",
            "SPRINTBOARD_REPORTER",
            "SPRINTBOARD_REPORT_WINDOW",
            "SPRINTBOARD_LOG_FORMAT",
        ] {
            cmd.env_remove(var);
        }
        cmd
    }

    pub fn run_sb<I, S>(workspace: &SbWorkspace, args: I, label: &str) -> SbOutput
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let output = sb_cmd(workspace)
            .args(args)
            .output()
            .unwrap_or_else(|e| panic!("{label}: failed to run sb: {e}"));
        SbOutput {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}
