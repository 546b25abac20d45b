// SPDX-License-Identifier: GPL-3.0-only

//! ext2/3/4 maintenance tool shim
//!
//! This crate locates and runs the e2fsprogs tools for a block device and
//! turns their text output into structured values:
//! - Tool resolution between the `*2*` and ext4-capable `*4*` program names
//! - Label and UUID query and update
//! - Forced check, resize, external journal creation
//! - `tune2fs -l` property dumps as ordered key/value records
//!
//! Processes are started through the [`CommandRunner`] port.

pub mod command;
pub mod config;
pub mod error;
pub mod ops;
pub mod parse;
pub mod resolver;
mod service;

pub use command::{CommandOutput, CommandRunner, SystemRunner};
pub use config::ToolchainConfig;
pub use error::{E2fsError, Result};
pub use ops::E2fsTools;
pub use resolver::{AccessProbe, ExecutableProbe, Tool};

// Re-export shared models
pub use e2fs_types::{
    E2fsRequest, E2fsResponse, E2fsResult, ErrorKind, KeyValueRecord, OperationError,
};
