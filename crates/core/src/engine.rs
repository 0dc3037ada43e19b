//! The `Engine` trait implemented by point-plotting simulations.
//!
//! An engine owns its simulation state and random source but not the image:
//! the caller allocates a [`Raster`] and lends it to each step. The trait is
//! object-safe so engines can be driven as `dyn Engine`.

use crate::raster::Raster;
use serde_json::Value;

/// Core trait for raster-plotting engines.
pub trait Engine {
    /// Advances the simulation by one iteration, plotting into `raster`.
    ///
    /// Returns `true` if a pixel was written, `false` if the point of this
    /// iteration fell outside the raster.
    fn step(&mut self, raster: &mut Raster) -> bool;

    /// Runs exactly `iterations` steps and returns how many plotted a pixel.
    ///
    /// Zero iterations leave the raster untouched.
    fn run(&mut self, raster: &mut Raster, iterations: usize) -> usize {
        (0..iterations).filter(|_| self.step(raster)).count()
    }

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing the parameters, their types and defaults.
    fn param_schema(&self) -> Value;
}
