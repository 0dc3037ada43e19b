//! Reproducible description of one chaos-game run.
//!
//! A [`Seed`] captures everything needed to recreate an image: canvas size,
//! triangle, iteration count, PRNG seed and output path. Two identical
//! `Seed` values produce bit-identical rasters.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::EngineError;
use crate::geometry::Triangle;
use crate::raster::pixel_count;
use serde::{Deserialize, Serialize};

pub const DEFAULT_WIDTH: usize = 500;
pub const DEFAULT_HEIGHT: usize = 500;
pub const DEFAULT_ITERATIONS: usize = 100_000;
pub const DEFAULT_PRNG_SEED: u64 = 42;
pub const DEFAULT_OUTPUT: &str = "foo.ppm";

/// Reproducible description of a chaos-game run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Seed {
    pub width: usize,
    pub height: usize,
    pub vertices: Triangle,
    /// Negative counts in a seed file load as zero.
    #[serde(deserialize_with = "deserialize_iterations")]
    pub iterations: usize,
    pub seed: u64,
    pub output: PathBuf,
}

/// Converts a signed iteration count to the number of steps to run.
/// Zero and negative counts run nothing.
pub fn iterations_from_count(count: i64) -> usize {
    usize::try_from(count).unwrap_or(0)
}

fn deserialize_iterations<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Count {
        Unsigned(u64),
        Signed(i64),
    }

    match Count::deserialize(deserializer)? {
        Count::Unsigned(n) => usize::try_from(n).map_err(serde::de::Error::custom),
        Count::Signed(n) => Ok(iterations_from_count(n)),
    }
}

impl Default for Seed {
    /// The classic run: 500x500, canvas triangle, 100 000 iterations, `foo.ppm`.
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT, DEFAULT_PRNG_SEED)
    }
}

impl Seed {
    /// Creates a seed with the canvas triangle for the given size, the
    /// default iteration count and the default output path.
    pub fn new(width: usize, height: usize, seed: u64) -> Self {
        Self {
            width,
            height,
            vertices: Triangle::canvas_default(width, height),
            iterations: DEFAULT_ITERATIONS,
            seed,
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }

    /// Checks dimensions (non-zero, buffer fits in memory) and that the triangle is
    /// not degenerate.
    pub fn validate(&self) -> Result<(), EngineError> {
        pixel_count(self.width, self.height)?;
        self.vertices.validate()
    }

    /// Reads and validates a seed from a JSON file.
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let text = fs::read_to_string(path)
            .map_err(|e| EngineError::Io(format!("{}: {e}", path.display())))?;
        let seed: Seed = serde_json::from_str(&text)
            .map_err(|e| EngineError::InvalidSeed(format!("{}: {e}", path.display())))?;
        seed.validate()?;
        Ok(seed)
    }

    /// Writes the seed as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), EngineError> {
        let text = serde_json::to_string_pretty(self)
            .map_err(|e| EngineError::InvalidSeed(e.to_string()))?;
        fs::write(path, text).map_err(|e| EngineError::Io(format!("{}: {e}", path.display())))
    }
}
