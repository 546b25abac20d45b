// SPDX-License-Identifier: GPL-3.0-only

//! Shared models for the e2fs administration shim
//!
//! These types sit on the boundary between the core (`e2fs-sys`) and
//! whatever transport carries requests to it:
//!
//! - `E2fsRequest` names one administrative operation and its parameters
//! - `E2fsResponse` carries the successful result of that operation
//! - `OperationError` carries a classified failure message
//! - `KeyValueRecord` is the ordered property table of a `tune2fs -l` dump

pub mod error;
pub mod record;
pub mod request;

pub use error::{ErrorKind, OperationError};
pub use record::KeyValueRecord;
pub use request::{E2fsRequest, E2fsResponse, E2fsResult};
