// SPDX-License-Identifier: GPL-3.0-only

//! Request dispatch at the transport boundary

use e2fs_types::{E2fsRequest, E2fsResponse, E2fsResult, OperationError};
use tracing::{debug, warn};

use crate::command::CommandRunner;
use crate::ops::E2fsTools;
use crate::resolver::ExecutableProbe;

impl<R: CommandRunner, P: ExecutableProbe> E2fsTools<R, P> {
    /// Run one request. Failure messages pass through unchanged.
    pub fn dispatch(&self, request: &E2fsRequest) -> E2fsResult {
        debug!("Dispatching {} for {}", request.name(), request.device());

        let result = match request {
            E2fsRequest::Tune2fsL { device } => self.tune2fs_l(device).map(E2fsResponse::Record),
            E2fsRequest::SetE2label { device, label } => {
                self.set_e2label(device, label).map(|()| E2fsResponse::Unit)
            }
            E2fsRequest::GetE2label { device } => self.get_e2label(device).map(E2fsResponse::Text),
            E2fsRequest::SetE2uuid { device, uuid } => {
                self.set_e2uuid(device, uuid).map(|()| E2fsResponse::Unit)
            }
            E2fsRequest::GetE2uuid { device } => self.get_e2uuid(device).map(E2fsResponse::Text),
            E2fsRequest::Resize2fs { device } => {
                self.resize2fs(device).map(|()| E2fsResponse::Unit)
            }
            E2fsRequest::E2fsckF { device } => self.e2fsck_f(device).map(|()| E2fsResponse::Unit),
            E2fsRequest::Mke2journal { blocksize, device } => self
                .mke2journal(*blocksize, device)
                .map(|()| E2fsResponse::Unit),
            E2fsRequest::Mke2journalL {
                blocksize,
                label,
                device,
            } => self
                .mke2journal_l(*blocksize, label, device)
                .map(|()| E2fsResponse::Unit),
            E2fsRequest::Mke2journalU {
                blocksize,
                uuid,
                device,
            } => self
                .mke2journal_u(*blocksize, uuid, device)
                .map(|()| E2fsResponse::Unit),
            E2fsRequest::Mke2fsJ {
                fstype,
                blocksize,
                device,
                journal,
            } => self
                .mke2fs_j(fstype, *blocksize, device, journal)
                .map(|()| E2fsResponse::Unit),
            E2fsRequest::Mke2fsJl {
                fstype,
                blocksize,
                device,
                label,
            } => self
                .mke2fs_jl(fstype, *blocksize, device, label)
                .map(|()| E2fsResponse::Unit),
            E2fsRequest::Mke2fsJu {
                fstype,
                blocksize,
                device,
                uuid,
            } => self
                .mke2fs_ju(fstype, *blocksize, device, uuid)
                .map(|()| E2fsResponse::Unit),
        };

        result.map_err(|err| {
            warn!("{} failed: {}", request.name(), err);
            OperationError::from(err)
        })
    }
}
