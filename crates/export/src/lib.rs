#![deny(unsafe_code)]
//! Image export for chaos-game rasters.
//!
//! The only output format is the plain-text color PPM (`P3`): a four-line
//! header followed by one `r g b` line per pixel in row-major order.
//! [`ExportPolicy`] lets the caller decide whether a failed write ends the
//! run or is merely reported.

pub mod pixel;
pub mod ppm;

use std::path::Path;

use chaos_game_core::{EngineError, Raster};

pub use ppm::{encode_ppm, write_ppm};

/// What to do when writing the image fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportPolicy {
    /// Hand the failure back as a value; the caller reports it and carries on.
    #[default]
    Report,
    /// Treat the failure as an error of the whole run.
    Fail,
}

impl ExportPolicy {
    /// `Fail` when `strict`, `Report` otherwise.
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            ExportPolicy::Fail
        } else {
            ExportPolicy::Report
        }
    }
}

/// Result of an export under [`ExportPolicy::Report`].
#[derive(Debug)]
pub enum ExportOutcome {
    Written,
    /// The write failed; the error carries the cause.
    Failed(EngineError),
}

/// Writes `raster` to `path` as PPM, applying `policy` to any failure.
pub fn export(
    raster: &Raster,
    path: &Path,
    policy: ExportPolicy,
) -> Result<ExportOutcome, EngineError> {
    match (write_ppm(raster, path), policy) {
        (Ok(()), _) => Ok(ExportOutcome::Written),
        (Err(e), ExportPolicy::Report) => Ok(ExportOutcome::Failed(e)),
        (Err(e), ExportPolicy::Fail) => Err(e),
    }
}
