// SPDX-License-Identifier: GPL-3.0-only

#![allow(dead_code)]

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use e2fs_sys::{CommandOutput, CommandRunner, E2fsTools, ExecutableProbe, ToolchainConfig};

pub const DEVICE: &str = "/dev/sda1";

/// Replies to every invocation with the same canned output and records the
/// command lines it was asked to run.
pub struct ScriptedRunner {
    reply: Option<CommandOutput>,
    calls: Mutex<Vec<(PathBuf, Vec<String>)>>,
}

impl ScriptedRunner {
    pub fn exits(status: i32, stdout: &str, stderr: &str) -> Self {
        Self {
            reply: Some(CommandOutput {
                status: Some(status),
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
            }),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn ok(stdout: &str) -> Self {
        Self::exits(0, stdout, "")
    }

    pub fn killed(stderr: &str) -> Self {
        Self {
            reply: Some(CommandOutput {
                status: None,
                stdout: String::new(),
                stderr: stderr.to_string(),
            }),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn unstartable() -> Self {
        Self {
            reply: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(PathBuf, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }

    /// The single recorded call.
    pub fn only_call(&self) -> (PathBuf, Vec<String>) {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one invocation: {calls:?}");
        calls.into_iter().next().unwrap()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, program: &Path, args: &[String]) -> io::Result<CommandOutput> {
        self.calls
            .lock()
            .unwrap()
            .push((program.to_path_buf(), args.to_vec()));
        self.reply
            .clone()
            .ok_or_else(|| io::Error::new(io::ErrorKind::PermissionDenied, "Permission denied"))
    }
}

/// Treats a fixed set of paths as executable.
pub struct Installed(HashSet<PathBuf>);

impl Installed {
    pub fn names(names: &[&str]) -> Self {
        Self(names.iter().map(|name| Path::new("/sbin").join(name)).collect())
    }

    /// The classic ext2/3 toolchain.
    pub fn original() -> Self {
        Self::names(&["tune2fs", "e2label", "e2fsck", "resize2fs", "mke2fs"])
    }
}

impl ExecutableProbe for Installed {
    fn is_executable(&self, path: &Path) -> bool {
        self.0.contains(path)
    }
}

pub fn tools<'a>(
    runner: &'a ScriptedRunner,
    installed: Installed,
) -> E2fsTools<&'a ScriptedRunner, Installed> {
    E2fsTools::with_parts(ToolchainConfig::default(), runner, installed)
}

pub fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|part| part.to_string()).collect()
}
