// SPDX-License-Identifier: GPL-3.0-only

//! CLI wrapper around the e2fs-sys library for testing and manual operations

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use e2fs_sys::{E2fsRequest, E2fsTools, ToolchainConfig};

/// Run ext2/3/4 maintenance operations and print the result as JSON
#[derive(Parser)]
#[command(name = "e2fs-cli")]
#[command(about = "CLI tool for ext2/3/4 administration", long_about = None)]
struct Cli {
    /// TOML file with toolchain settings (defaults to $E2FS_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dump all superblock properties
    Tune2fsL { device: String },
    /// Set the filesystem label
    SetE2label { device: String, label: String },
    /// Print the filesystem label
    GetE2label { device: String },
    /// Set the filesystem UUID
    SetE2uuid { device: String, uuid: String },
    /// Print the filesystem UUID
    GetE2uuid { device: String },
    /// Resize the filesystem to fill its device
    Resize2fs { device: String },
    /// Force a check with automatic repair
    E2fsckF { device: String },
    /// Format a device as an external journal
    Mke2journal {
        #[arg(short, long)]
        blocksize: u32,
        device: String,
        /// Label for the journal device
        #[arg(short = 'L', long, conflicts_with = "uuid")]
        label: Option<String>,
        /// UUID for the journal device
        #[arg(short = 'U', long)]
        uuid: Option<String>,
    },
    /// Create a filesystem with an external journal
    Mke2fsJ {
        #[arg(short = 't', long)]
        fstype: String,
        #[arg(short, long)]
        blocksize: u32,
        device: String,
        /// Path of the journal device
        #[arg(long, required_unless_present_any = ["journal_label", "journal_uuid"])]
        journal: Option<String>,
        /// Label of the journal device
        #[arg(long, conflicts_with_all = ["journal", "journal_uuid"])]
        journal_label: Option<String>,
        /// UUID of the journal device
        #[arg(long, conflicts_with = "journal")]
        journal_uuid: Option<String>,
    },
}

impl Commands {
    fn into_request(self) -> E2fsRequest {
        match self {
            Commands::Tune2fsL { device } => E2fsRequest::Tune2fsL { device },
            Commands::SetE2label { device, label } => E2fsRequest::SetE2label { device, label },
            Commands::GetE2label { device } => E2fsRequest::GetE2label { device },
            Commands::SetE2uuid { device, uuid } => E2fsRequest::SetE2uuid { device, uuid },
            Commands::GetE2uuid { device } => E2fsRequest::GetE2uuid { device },
            Commands::Resize2fs { device } => E2fsRequest::Resize2fs { device },
            Commands::E2fsckF { device } => E2fsRequest::E2fsckF { device },
            Commands::Mke2journal {
                blocksize,
                device,
                label,
                uuid,
            } => match (label, uuid) {
                (Some(label), _) => E2fsRequest::Mke2journalL {
                    blocksize,
                    label,
                    device,
                },
                (None, Some(uuid)) => E2fsRequest::Mke2journalU {
                    blocksize,
                    uuid,
                    device,
                },
                (None, None) => E2fsRequest::Mke2journal { blocksize, device },
            },
            Commands::Mke2fsJ {
                fstype,
                blocksize,
                device,
                journal,
                journal_label,
                journal_uuid,
            } => match (journal_label, journal_uuid) {
                (Some(label), _) => E2fsRequest::Mke2fsJl {
                    fstype,
                    blocksize,
                    device,
                    label,
                },
                (None, Some(uuid)) => E2fsRequest::Mke2fsJu {
                    fstype,
                    blocksize,
                    device,
                    uuid,
                },
                (None, None) => E2fsRequest::Mke2fsJ {
                    fstype,
                    blocksize,
                    device,
                    journal: journal.unwrap_or_default(),
                },
            },
        }
    }
}

fn main() -> Result<()> {
    // Initialize tracing to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = ToolchainConfig::load(cli.config.as_deref())?;
    let tools = E2fsTools::new(config);
    let request = cli.command.into_request();

    match tools.dispatch(&request) {
        Ok(response) => {
            println!("{}", serde_json::to_string(&response)?);
            Ok(())
        }
        Err(error) => {
            println!("{}", serde_json::to_string(&error)?);
            std::process::exit(1);
        }
    }
}
