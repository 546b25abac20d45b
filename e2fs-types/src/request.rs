// SPDX-License-Identifier: GPL-3.0-only

//! Request and response envelopes for ext2/3/4 administration

use serde::{Deserialize, Serialize};

use crate::{KeyValueRecord, OperationError};

/// One administrative operation together with its parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum E2fsRequest {
    /// Dump all superblock properties (`tune2fs -l`)
    Tune2fsL { device: String },
    SetE2label { device: String, label: String },
    GetE2label { device: String },
    SetE2uuid { device: String, uuid: String },
    GetE2uuid { device: String },
    Resize2fs { device: String },
    /// Forced preen-mode check (`e2fsck -p -f`)
    E2fsckF { device: String },
    /// Format `device` as an external journal
    Mke2journal { blocksize: u32, device: String },
    Mke2journalL {
        blocksize: u32,
        label: String,
        device: String,
    },
    Mke2journalU {
        blocksize: u32,
        uuid: String,
        device: String,
    },
    /// Create a filesystem whose journal lives on `journal`
    Mke2fsJ {
        fstype: String,
        blocksize: u32,
        device: String,
        journal: String,
    },
    Mke2fsJl {
        fstype: String,
        blocksize: u32,
        device: String,
        label: String,
    },
    Mke2fsJu {
        fstype: String,
        blocksize: u32,
        device: String,
        uuid: String,
    },
}

impl E2fsRequest {
    /// Operation name as used on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Tune2fsL { .. } => "tune2fs_l",
            Self::SetE2label { .. } => "set_e2label",
            Self::GetE2label { .. } => "get_e2label",
            Self::SetE2uuid { .. } => "set_e2uuid",
            Self::GetE2uuid { .. } => "get_e2uuid",
            Self::Resize2fs { .. } => "resize2fs",
            Self::E2fsckF { .. } => "e2fsck_f",
            Self::Mke2journal { .. } => "mke2journal",
            Self::Mke2journalL { .. } => "mke2journal_l",
            Self::Mke2journalU { .. } => "mke2journal_u",
            Self::Mke2fsJ { .. } => "mke2fs_j",
            Self::Mke2fsJl { .. } => "mke2fs_jl",
            Self::Mke2fsJu { .. } => "mke2fs_ju",
        }
    }

    /// Target block device of the operation.
    pub fn device(&self) -> &str {
        match self {
            Self::Tune2fsL { device }
            | Self::SetE2label { device, .. }
            | Self::GetE2label { device }
            | Self::SetE2uuid { device, .. }
            | Self::GetE2uuid { device }
            | Self::Resize2fs { device }
            | Self::E2fsckF { device }
            | Self::Mke2journal { device, .. }
            | Self::Mke2journalL { device, .. }
            | Self::Mke2journalU { device, .. }
            | Self::Mke2fsJ { device, .. }
            | Self::Mke2fsJl { device, .. }
            | Self::Mke2fsJu { device, .. } => device,
        }
    }
}

/// Successful result of an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum E2fsResponse {
    Unit,
    Text(String),
    Record(KeyValueRecord),
}

pub type E2fsResult = std::result::Result<E2fsResponse, OperationError>;
