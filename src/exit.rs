// src/exit.rs
//! Standardized process exit codes for `lazytok`.
//!
//! Provides a stable contract for scripts and automation.

use std::process::Termination;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum LazytokExit {
    /// Operation completed successfully.
    Success = 0,
    /// Generic error (e.g. IO, config, encode failure).
    Error = 1,
    /// Input validation failed (unparseable token ids, empty input).
    InvalidInput = 2,
    /// Tokenizer could not be initialized and fail-fast is configured.
    InitFailed = 3,
}

impl LazytokExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl Termination for LazytokExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}
