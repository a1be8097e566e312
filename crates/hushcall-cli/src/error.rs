use anyhow::Error;
use hushcall_config::ConfigError;
use hushcall_core::{CoreError, PhoneError};
use hushcall_store::error::{StoreError, StoreErrorKind};
use std::error::Error as StdError;
use std::process::ExitCode;
use thiserror::Error as ThisError;

pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_NOT_FOUND: u8 = 2;
pub const EXIT_INVALID_INPUT: u8 = 3;

#[derive(Debug, ThisError)]
pub enum CliError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("not found: {0}")]
    NotFound(String),
}

pub fn invalid_input(message: impl Into<String>) -> Error {
    CliError::InvalidInput(message.into()).into()
}

pub fn not_found(message: impl Into<String>) -> Error {
    CliError::NotFound(message.into()).into()
}

pub fn report_error(err: &Error, verbose: bool) {
    if verbose {
        eprintln!("error: {:#}", err);
    } else {
        eprintln!("error: {}", err);
    }
}

/// Exit code of the first cause in the chain that has a known mapping.
pub fn exit_code_for(err: &Error) -> ExitCode {
    ExitCode::from(exit_status(err))
}

fn exit_status(err: &Error) -> u8 {
    err.chain().find_map(code_for_cause).unwrap_or(EXIT_FAILURE)
}

fn code_for_cause(cause: &(dyn StdError + 'static)) -> Option<u8> {
    if let Some(err) = cause.downcast_ref::<CliError>() {
        return Some(match err {
            CliError::InvalidInput(_) => EXIT_INVALID_INPUT,
            CliError::NotFound(_) => EXIT_NOT_FOUND,
        });
    }
    if let Some(err) = cause.downcast_ref::<StoreError>() {
        return Some(match err.kind() {
            StoreErrorKind::NotFound => EXIT_NOT_FOUND,
            StoreErrorKind::InvalidInput => EXIT_INVALID_INPUT,
            StoreErrorKind::Environment | StoreErrorKind::Database => EXIT_FAILURE,
        });
    }
    if let Some(err) = cause.downcast_ref::<ConfigError>() {
        return Some(match err {
            ConfigError::MissingHomeDir | ConfigError::Read { .. } => EXIT_FAILURE,
            _ => EXIT_INVALID_INPUT,
        });
    }
    if cause.is::<CoreError>() || cause.is::<PhoneError>() {
        return Some(EXIT_INVALID_INPUT);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::{exit_status, invalid_input, not_found};
    use anyhow::Context;
    use hushcall_store::error::StoreError;

    #[test]
    fn exit_codes_follow_the_cause_chain() {
        let err = Err::<(), _>(StoreError::not_found("contact", "abc"))
            .context("remove contact")
            .unwrap_err();
        assert_eq!(exit_status(&err), 2);

        assert_eq!(exit_status(&invalid_input("bad")), 3);
        assert_eq!(exit_status(&not_found("gone")), 2);
        assert_eq!(exit_status(&anyhow::anyhow!("boom")), 1);
    }
}
