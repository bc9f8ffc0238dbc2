//! Exit codes for aasa-check.
//! Codes 1-4 come from `CheckError::exit_code` (request, connection, response, payload).

pub const SUCCESS: i32 = 0;
pub const NOT_AUTHORIZED: i32 = 5; // Manifest fetched but malformed or identifier missing
pub const INTERNAL_ERROR: i32 = 6; // Local I/O or setup failure
