//! Standard exit codes for CLI operations
//!
//! These exit codes follow Unix conventions and sysexits.h where applicable.

#![allow(dead_code)]

/// Success - operation completed without errors
pub const SUCCESS: i32 = 0;

/// General error - unspecified failure
pub const ERROR: i32 = 1;

/// Validation error - a check failed or warnings were promoted to errors
pub const VALIDATION_ERROR: i32 = 2;

/// Compile error - placement resolution failed
pub const COMPILE_ERROR: i32 = 3;

/// Registry error - invalid registry table or extension file
pub const REGISTRY_ERROR: i32 = 4;

/// IO error - file not found, permission denied, etc.
pub const IO_ERROR: i32 = 5;

/// Usage error - invalid arguments or options (following sysexits.h convention)
pub const USAGE_ERROR: i32 = 64;
