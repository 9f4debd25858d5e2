//! Bidirectional converter between `docker run` commands and compose
//! manifests.
//!
//! The engine is a pure function of its input: [`convert`] classifies the
//! text, routes it to one of the two translators and returns the rendered
//! output or a [`ConvertError`]. No I/O, no shared state; callers own all
//! presentation.

pub mod classify;
pub mod error;
pub mod flags;
pub mod manifest;
pub mod service;
pub mod tokenize;
pub mod translate;

pub use classify::{classify, InputKind};
pub use error::ConvertError;
pub use service::{ServiceConfig, DEFAULT_SERVICE_NAME};

pub type Result<T> = std::result::Result<T, ConvertError>;

/// Which way a successful conversion went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    RunToCompose,
    ComposeToRun,
}

/// A successful conversion: the rendered text and its direction.
#[derive(Debug, Clone)]
pub struct Converted {
    pub output: String,
    pub direction: Direction,
}

/// Convert either representation into the other.
///
/// Input that is neither a `docker run` command nor a compose manifest is
/// [`ConvertError::UnrecognizedInput`].
pub fn convert(input: &str) -> Result<Converted> {
    match classify::classify(input) {
        InputKind::RunCommand => Ok(Converted {
            output: translate::run_to_compose(input)?,
            direction: Direction::RunToCompose,
        }),
        InputKind::ComposeManifest => Ok(Converted {
            output: translate::compose_to_run(input)?,
            direction: Direction::ComposeToRun,
        }),
        InputKind::Unknown => Err(ConvertError::UnrecognizedInput),
    }
}
