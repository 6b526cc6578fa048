// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! btp-core: argument building, output normalisation and error
//! classification for the BTP command-line tool.

pub mod macros;

pub mod check;
pub mod classify;
pub mod command;
pub mod options;
pub mod payload;
pub mod records;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use check::CheckResponse;
pub use classify::{
    classify, extract_last_error_block, get_error_info, ErrorCode, ErrorRecord, RESPONSE_MAPPING,
};
pub use command::{BuildError, CommandBuilder, BTP_TOOL};
pub use options::{
    CreateBindingOptions, CreateInstanceOptions, DeleteBindingOptions, DeleteInstanceOptions,
    GetBindingOptions, GetInstanceOptions, LoginOptions, MissingParameters, Polling,
};
pub use payload::{to_json, PayloadError};
pub use records::{LastOperation, OperationState, ServiceBinding, ServiceInstance};
