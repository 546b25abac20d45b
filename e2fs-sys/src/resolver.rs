// SPDX-License-Identifier: GPL-3.0-only

//! Tool resolution between the `*2*` and `*4*` toolchains
//!
//! Some distributions ship an ext2/3-only e2fsprogs under the usual names
//! (`mke2fs`, `tune2fs`, ...) next to an ext4-capable set named with a `4`
//! (`mke4fs`, `tune4fs`, ...). The ext4-capable variant is preferred when it
//! is installed.

use std::path::{Path, PathBuf};

use nix::unistd::{AccessFlags, access};
use tracing::debug;

use crate::error::{E2fsError, Result};

const MARKER: &str = "e2";
const EXTENDED_DIGIT: char = '4';
const ORIGINAL_DIGIT: char = '2';

/// Maintenance programs used by the operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    Tune,
    Label,
    Check,
    Resize,
    Mkfs,
}

impl Tool {
    /// Canonical (ext2/3) file name of the program.
    pub fn canonical_name(self) -> &'static str {
        match self {
            Self::Tune => "tune2fs",
            Self::Label => "e2label",
            Self::Check => "e2fsck",
            Self::Resize => "resize2fs",
            Self::Mkfs => "mke2fs",
        }
    }

    pub fn canonical_path(self, tool_dir: &Path) -> PathBuf {
        tool_dir.join(self.canonical_name())
    }
}

/// Answers whether a path names an executable file.
pub trait ExecutableProbe: Send + Sync {
    fn is_executable(&self, path: &Path) -> bool;
}

impl<T: ExecutableProbe + ?Sized> ExecutableProbe for &T {
    fn is_executable(&self, path: &Path) -> bool {
        (**self).is_executable(path)
    }
}

/// `access(2)` with `X_OK`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessProbe;

impl ExecutableProbe for AccessProbe {
    fn is_executable(&self, path: &Path) -> bool {
        access(path, AccessFlags::X_OK).is_ok()
    }
}

/// Both variants of `canonical`, extended first.
///
/// # Panics
///
/// Panics if the file name of `canonical` has no `e2` version marker. Every
/// [`Tool`] name carries one.
pub fn candidates(canonical: &Path) -> [PathBuf; 2] {
    let file_name = canonical
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    let Some(marker) = file_name.find(MARKER) else {
        panic!("tool name {file_name:?} has no {MARKER:?} version marker");
    };
    let digit_at = marker + 1;

    let with_digit = |digit: char| {
        let mut name = String::with_capacity(file_name.len());
        name.push_str(&file_name[..digit_at]);
        name.push(digit);
        name.push_str(&file_name[digit_at + 1..]);
        canonical.with_file_name(name)
    };

    [with_digit(EXTENDED_DIGIT), with_digit(ORIGINAL_DIGIT)]
}

/// Pick the executable variant of `canonical`. Probes on every call.
pub fn resolve(canonical: &Path, probe: &dyn ExecutableProbe) -> Result<PathBuf> {
    for candidate in candidates(canonical) {
        if probe.is_executable(&candidate) {
            debug!("Resolved {:?} to {:?}", canonical, candidate);
            return Ok(candidate);
        }
    }

    Err(E2fsError::ToolNotFound {
        name: canonical.display().to_string(),
    })
}
