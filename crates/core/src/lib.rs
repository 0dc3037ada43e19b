#![deny(unsafe_code)]
//! Core types and traits for the chaos-game fractal generator.
//!
//! Provides the `Engine` trait, `Point`/`Triangle` geometry with the
//! barycentric solver, the `Rgb` color type, the `Raster` buffer,
//! `Xorshift64` behind the `RandomSource` trait, and the `Seed` run
//! description.

pub mod color;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod prng;
pub mod raster;
pub mod seed;

pub use color::Rgb;
pub use engine::Engine;
pub use error::EngineError;
pub use geometry::{Point, Triangle};
pub use prng::{RandomSource, Xorshift64};
pub use raster::Raster;
pub use seed::Seed;
