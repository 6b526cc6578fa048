// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! btp-engine: service instance and binding lifecycles on top of the BTP
//! command-line tool.

mod bindings;
pub mod checks;
mod client;
mod error;
mod instances;

pub use checks::{GoneCheck, ReadyCheck, Resource};
pub use client::{BtpClient, SessionLogin, BINDING_TARGET, INSTANCE_TARGET};
pub use error::{ErrorCategory, Operation, ServiceError};
