#![deny(unsafe_code)]
//! Chaos-game engine.
//!
//! A point starts on a randomly chosen vertex of a triangle. Each iteration
//! plots the point, then moves it halfway toward a randomly chosen vertex.
//! The visited points settle onto the Sierpinski triangle. Every plotted
//! pixel is colored by blending the vertex colors (red, green, blue) with
//! the point's barycentric weights, so hue varies smoothly across the
//! attractor.

use chaos_game_core::error::EngineError;
use chaos_game_core::geometry::{midpoint, Point, Triangle};
use chaos_game_core::prng::{RandomSource, Xorshift64};
use chaos_game_core::{Engine, Raster, Rgb, Seed};
use serde_json::{json, Value};

/// Vertex colors, paired with the triangle vertices in seed order.
pub const VERTEX_COLORS: [Rgb; 3] = [Rgb::RED, Rgb::GREEN, Rgb::BLUE];

/// Background the raster is cleared to before a run.
pub const BACKGROUND: Rgb = Rgb::BLACK;

/// Chaos-game engine over a fixed seed triangle.
///
/// Generic over its random source so tests can script the vertex choices;
/// the default is [`Xorshift64`]. The triangle is never mutated; only the
/// private current point moves.
pub struct ChaosGame<R = Xorshift64> {
    triangle: Triangle,
    colors: [Rgb; 3],
    current: Point,
    rng: R,
    iterations: usize,
}

impl ChaosGame<Xorshift64> {
    /// Creates an engine over `vertices` driven by `Xorshift64::new(seed)`.
    ///
    /// Returns `EngineError::VertexCount` unless exactly three vertices are
    /// given. Collinearity is not checked here; see [`Triangle::validate`].
    pub fn new(vertices: &[Point], seed: u64) -> Result<Self, EngineError> {
        Self::with_rng(vertices, Xorshift64::new(seed))
    }

    /// Creates an engine from a validated run description.
    pub fn from_seed(seed: &Seed) -> Result<Self, EngineError> {
        seed.validate()?;
        Ok(Self::from_triangle(seed.vertices, Xorshift64::new(seed.seed)))
    }
}

impl<R: RandomSource> ChaosGame<R> {
    /// Creates an engine over `vertices` with a caller-supplied random source.
    pub fn with_rng(vertices: &[Point], rng: R) -> Result<Self, EngineError> {
        Ok(Self::from_triangle(Triangle::from_slice(vertices)?, rng))
    }

    /// Creates an engine over `triangle`, starting on a random vertex.
    ///
    /// The start is a copy of the vertex, so moving it never touches the
    /// triangle.
    pub fn from_triangle(triangle: Triangle, mut rng: R) -> Self {
        let current = triangle.vertex(rng.next_usize(3));
        Self {
            triangle,
            colors: VERTEX_COLORS,
            current,
            rng,
            iterations: 0,
        }
    }

    /// The seed triangle.
    pub fn triangle(&self) -> &Triangle {
        &self.triangle
    }

    /// The point that the next step will plot.
    pub fn current(&self) -> Point {
        self.current
    }

    /// Number of steps taken so far.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Interpolated color at `p`.
    pub fn color_at(&self, p: Point) -> Rgb {
        Rgb::blend(self.colors, self.triangle.barycentric(p))
    }
}

impl<R: RandomSource> Engine for ChaosGame<R> {
    fn step(&mut self, raster: &mut Raster) -> bool {
        let color = self.color_at(self.current);
        let plotted = raster.plot(self.current, color);
        let target = self.triangle.vertex(self.rng.next_usize(3));
        self.current = midpoint(self.current, target);
        self.iterations += 1;
        plotted
    }

    fn params(&self) -> Value {
        let vertices: Vec<[f64; 2]> = self
            .triangle
            .vertices()
            .iter()
            .map(|v| [v.x, v.y])
            .collect();
        json!({
            "vertices": vertices,
            "colors": self.colors.map(Rgb::to_hex),
            "iterations": self.iterations,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "vertices": {
                "type": "array",
                "items": {"type": "array", "items": {"type": "number"}, "length": 2},
                "length": 3,
                "description": "Seed triangle vertices in image coordinates; must not be collinear"
            },
            "colors": {
                "type": "array",
                "items": {"type": "string"},
                "default": VERTEX_COLORS.map(Rgb::to_hex),
                "description": "Vertex colors, fixed to red, green, blue in vertex order"
            },
            "iterations": {
                "type": "integer",
                "min": 0,
                "default": chaos_game_core::seed::DEFAULT_ITERATIONS,
                "description": "Number of point jumps; zero leaves the background untouched"
            }
        })
    }
}

/// Runs a whole [`Seed`]: allocates a black raster, plays `seed.iterations`
/// steps, and returns the raster with the number of plotted points.
pub fn render(seed: &Seed) -> Result<(Raster, usize), EngineError> {
    let mut engine = ChaosGame::from_seed(seed)?;
    let mut raster = Raster::new(seed.width, seed.height, BACKGROUND)?;
    let plotted = engine.run(&mut raster, seed.iterations);
    Ok((raster, plotted))
}
