//! Failures of a `chaos-game` invocation and the exit code each one maps to.
//!
//! | code | kind            | raised when                                        |
//! |------|-----------------|----------------------------------------------------|
//! | 0    |                 | success, or an image write reported without `--strict` |
//! | 2    |                 | clap rejected the arguments                        |
//! | 10   | `engine`        | canvas too small or too large, unreadable seed JSON |
//! | 11   | `io`            | seed file missing or unwritable, image write under `--strict` |
//! | 12   | `input`         | not three `--vertex` points, or a flat triangle    |
//! | 13   | `serialization` | status or seed JSON could not be produced          |

use chaos_game_core::EngineError;
use std::fmt;

#[derive(Debug)]
pub enum CliError {
    /// The run description cannot be rendered.
    Engine(EngineError),
    /// A seed file or the output image could not be read or written.
    Io(String),
    /// The triangle given on the command line or in a seed file is unusable.
    Input(String),
    /// JSON output failed.
    Serialization(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Engine(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }

    /// Short machine-readable label, reported as `kind` under `--json`.
    pub fn kind(&self) -> &'static str {
        match self {
            CliError::Engine(_) => "engine",
            CliError::Io(_) => "io",
            CliError::Input(_) => "input",
            CliError::Serialization(_) => "serialization",
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Engine(e) => write!(f, "cannot render: {e}"),
            CliError::Io(msg) => write!(f, "{msg}"),
            CliError::Input(msg) => write!(f, "bad triangle: {msg}"),
            CliError::Serialization(msg) => write!(f, "json output failed: {msg}"),
        }
    }
}

impl From<EngineError> for CliError {
    /// Geometry problems are the user's input; file problems are I/O;
    /// everything else is about the run itself.
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::Io(msg) => CliError::Io(msg),
            e @ (EngineError::VertexCount { .. } | EngineError::DegenerateTriangle(_)) => {
                CliError::Input(e.to_string())
            }
            other => CliError::Engine(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}
