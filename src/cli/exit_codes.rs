//! exit codes for formflow commands
//!
//! these follow Unix conventions where 0 = success and non-zero = error
//! specific codes help scripts distinguish between failure types

#![allow(dead_code)]

/// command completed successfully
pub const SUCCESS: i32 = 0;

/// general or unknown error
pub const ERROR: i32 = 1;

/// invalid command-line arguments
pub const INVALID_ARGS: i32 = 2;

/// schema file missing, unparseable, or failed verification
pub const SCHEMA_ERROR: i32 = 3;

/// form data file missing or unparseable
pub const DATA_ERROR: i32 = 4;
