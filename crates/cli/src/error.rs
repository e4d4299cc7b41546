//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: simulation error (unavailable surface, bad dimensions)
//! - 12: input error (bad JSON params, malformed `--pointer`/`--drift`)
//! - 13: serialization error

use flowfield_core::EngineError;
use std::fmt;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
#[derive(Debug)]
pub enum CliError {
    /// A simulation-level error (unavailable surface, bad dimensions).
    Engine(EngineError),
    /// A user input error (bad JSON params, malformed coordinate pair).
    Input(String),
    /// A serialization error (JSON output failure).
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Engine(_) => 10,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Engine(e) => write!(f, "{e}"),
            CliError::Input(msg) => write!(f, "{msg}"),
            CliError::Serialization(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<EngineError> for CliError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::ParamTypeMismatch { .. } => CliError::Input(e.to_string()),
            other => CliError::Engine(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_error_exit_code_is_10() {
        let err = CliError::Engine(EngineError::InvalidDimensions);
        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn input_error_exit_code_is_12() {
        let err = CliError::Input("bad pointer".into());
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn serialization_error_exit_code_is_13() {
        let err = CliError::Serialization("json fail".into());
        assert_eq!(err.exit_code(), 13);
    }

    #[test]
    fn from_surface_error_routes_to_cli_engine() {
        let cli_err = CliError::from(EngineError::SurfaceUnavailable {
            width: 0,
            height: 10,
        });
        assert_eq!(cli_err.exit_code(), 10);
        assert!(cli_err.to_string().contains("0x10"));
    }

    #[test]
    fn from_param_mismatch_routes_to_cli_input() {
        let cli_err = CliError::from(EngineError::ParamTypeMismatch {
            name: "params".into(),
            expected: "object".into(),
            got: "array".into(),
        });
        assert_eq!(cli_err.exit_code(), 12);
        assert!(cli_err.to_string().contains("params"));
    }

    #[test]
    fn debug_names_the_variant() {
        let err = CliError::Input("bad drift".into());
        assert!(format!("{err:?}").starts_with("Input"));
        let res: Result<(), CliError> = Err(CliError::Engine(EngineError::InvalidDimensions));
        assert_eq!(res.unwrap_err().exit_code(), 10);
    }

    #[test]
    fn from_serde_json_error_routes_to_serialization() {
        let bad_json = serde_json::from_str::<serde_json::Value>("{invalid");
        let cli_err = CliError::from(bad_json.unwrap_err());
        assert_eq!(cli_err.exit_code(), 13);
    }
}
