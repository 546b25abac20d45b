// SPDX-License-Identifier: GPL-3.0-only

//! ext2/3/4 administrative operations
//!
//! Every operation resolves its program afresh, builds the argument vector,
//! runs it through the [`CommandRunner`] and classifies the exit status.

use std::path::PathBuf;

use e2fs_types::KeyValueRecord;
use tracing::{debug, info, warn};

use crate::command::{CommandRunner, SystemRunner, render};
use crate::config::ToolchainConfig;
use crate::error::{E2fsError, Result};
use crate::parse;
use crate::resolver::{self, AccessProbe, ExecutableProbe, Tool};

/// Which exit codes count as success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExitPolicy {
    /// Only 0.
    Zero,
    /// 0 ("clean") and 1 ("errors corrected"). Codes 2 and 3 ("corrected,
    /// reboot required") are failures along with everything above.
    Fsck,
}

impl ExitPolicy {
    fn accepts(self, status: Option<i32>) -> bool {
        match (self, status) {
            (Self::Zero, Some(code)) => code == 0,
            (Self::Fsck, Some(code)) => (0..=1).contains(&code),
            (_, None) => false,
        }
    }
}

/// Output of a tool run that passed its exit policy.
struct ToolRun {
    program: PathBuf,
    stdout: String,
}

impl ToolRun {
    fn program_name(&self) -> String {
        self.program
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.program.display().to_string())
    }
}

/// Front end to the e2fsprogs maintenance tools.
pub struct E2fsTools<R = SystemRunner, P = AccessProbe> {
    config: ToolchainConfig,
    runner: R,
    probe: P,
}

impl E2fsTools {
    /// Tools under `config.tool_dir`, run as real processes.
    pub fn new(config: ToolchainConfig) -> Self {
        Self::with_parts(config, SystemRunner, AccessProbe)
    }
}

impl Default for E2fsTools {
    fn default() -> Self {
        Self::new(ToolchainConfig::default())
    }
}

impl<R: CommandRunner, P: ExecutableProbe> E2fsTools<R, P> {
    pub fn with_parts(config: ToolchainConfig, runner: R, probe: P) -> Self {
        Self {
            config,
            runner,
            probe,
        }
    }

    /// Path of the program `tool` would run right now.
    pub fn resolve(&self, tool: Tool) -> Result<PathBuf> {
        resolver::resolve(&tool.canonical_path(&self.config.tool_dir), &self.probe)
    }

    fn run(&self, tool: Tool, args: Vec<String>, policy: ExitPolicy) -> Result<ToolRun> {
        let program = self.resolve(tool)?;
        debug!("Running {}", render(&program, &args));

        let output = self.runner.run(&program, &args).map_err(|e| {
            warn!("Failed to execute {:?}: {}", program, e);
            E2fsError::ProcessFailed(format!("{}: {}", program.display(), e))
        })?;

        if !policy.accepts(output.status) {
            warn!(
                "{} exited with {:?}: {}",
                program.display(),
                output.status,
                output.stderr.trim_end()
            );
            return Err(E2fsError::ProcessFailed(output.stderr));
        }

        Ok(ToolRun {
            program,
            stdout: output.stdout,
        })
    }

    /// All superblock properties, as printed by `tune2fs -l`.
    pub fn tune2fs_l(&self, device: &str) -> Result<KeyValueRecord> {
        require("device", device)?;
        let run = self.run(Tool::Tune, args(["-l", device]), ExitPolicy::Zero)?;
        let record = parse::parse_listing(&run.stdout)?;
        debug!("Parsed {} properties for {}", record.len(), device);
        Ok(record)
    }

    pub fn set_e2label(&self, device: &str, label: &str) -> Result<()> {
        require("device", device)?;
        require("label", label)?;
        info!("Setting label of {} to {:?}", device, label);
        self.run(Tool::Label, args([device, label]), ExitPolicy::Zero)?;
        Ok(())
    }

    pub fn get_e2label(&self, device: &str) -> Result<String> {
        require("device", device)?;
        let run = self.run(Tool::Label, args([device]), ExitPolicy::Zero)?;
        Ok(parse::strip_label_newline(&run.stdout).to_string())
    }

    pub fn set_e2uuid(&self, device: &str, uuid: &str) -> Result<()> {
        require("device", device)?;
        require("uuid", uuid)?;
        info!("Setting UUID of {} to {}", device, uuid);
        self.run(Tool::Tune, args(["-U", uuid, device]), ExitPolicy::Zero)?;
        Ok(())
    }

    pub fn get_e2uuid(&self, device: &str) -> Result<String> {
        require("device", device)?;
        let run = self.run(Tool::Tune, args(["-l", device]), ExitPolicy::Zero)?;
        parse::extract_filesystem_uuid(&run.stdout, &run.program_name())
    }

    /// Grow or shrink the filesystem to fill its device.
    pub fn resize2fs(&self, device: &str) -> Result<()> {
        require("device", device)?;
        info!("Resizing filesystem on {}", device);
        self.run(Tool::Resize, args([device]), ExitPolicy::Zero)?;
        Ok(())
    }

    /// Forced check with automatic repair.
    ///
    /// Succeeds when e2fsck reports a clean filesystem or errors it corrected.
    /// A "reboot required" result is reported as a failure.
    pub fn e2fsck_f(&self, device: &str) -> Result<()> {
        require("device", device)?;
        info!("Checking filesystem on {}", device);
        self.run(Tool::Check, args(["-p", "-f", device]), ExitPolicy::Fsck)?;
        Ok(())
    }

    pub fn mke2journal(&self, blocksize: u32, device: &str) -> Result<()> {
        self.make_journal(blocksize, None, device)
    }

    pub fn mke2journal_l(&self, blocksize: u32, label: &str, device: &str) -> Result<()> {
        require("label", label)?;
        self.make_journal(blocksize, Some(("-L", label)), device)
    }

    pub fn mke2journal_u(&self, blocksize: u32, uuid: &str, device: &str) -> Result<()> {
        require("uuid", uuid)?;
        self.make_journal(blocksize, Some(("-U", uuid)), device)
    }

    fn make_journal(&self, blocksize: u32, tag: Option<(&str, &str)>, device: &str) -> Result<()> {
        require("device", device)?;
        info!("Creating external journal on {}", device);

        let mut argv = args(["-O", "journal_dev", "-b", &blocksize.to_string()]);
        if let Some((flag, value)) = tag {
            argv.extend(args([flag, value]));
        }
        argv.push(device.to_string());

        self.run(Tool::Mkfs, argv, ExitPolicy::Zero)?;
        Ok(())
    }

    /// Create a filesystem whose journal is the device at `journal`.
    pub fn mke2fs_j(&self, fstype: &str, blocksize: u32, device: &str, journal: &str) -> Result<()> {
        require("journal", journal)?;
        self.make_with_journal(fstype, blocksize, device, &format!("device={journal}"))
    }

    /// Create a filesystem whose journal is the journal device labelled `label`.
    pub fn mke2fs_jl(&self, fstype: &str, blocksize: u32, device: &str, label: &str) -> Result<()> {
        require("label", label)?;
        self.make_with_journal(fstype, blocksize, device, &format!("device=LABEL={label}"))
    }

    /// Create a filesystem whose journal is the journal device with `uuid`.
    pub fn mke2fs_ju(&self, fstype: &str, blocksize: u32, device: &str, uuid: &str) -> Result<()> {
        require("uuid", uuid)?;
        self.make_with_journal(fstype, blocksize, device, &format!("device=UUID={uuid}"))
    }

    fn make_with_journal(
        &self,
        fstype: &str,
        blocksize: u32,
        device: &str,
        journal_spec: &str,
    ) -> Result<()> {
        require("fstype", fstype)?;
        require("device", device)?;
        info!(
            "Creating {} filesystem on {} with journal {}",
            fstype, device, journal_spec
        );

        let argv = args([
            "-t",
            fstype,
            "-J",
            journal_spec,
            "-b",
            &blocksize.to_string(),
            device,
        ]);
        self.run(Tool::Mkfs, argv, ExitPolicy::Zero)?;
        Ok(())
    }
}

fn require(name: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(E2fsError::InvalidArgument(name));
    }
    Ok(())
}

fn args<const N: usize>(parts: [&str; N]) -> Vec<String> {
    parts.iter().map(|part| part.to_string()).collect()
}

impl<R, P> std::fmt::Debug for E2fsTools<R, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("E2fsTools")
            .field("tool_dir", &self.config.tool_dir)
            .finish_non_exhaustive()
    }
}
