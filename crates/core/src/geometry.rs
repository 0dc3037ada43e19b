//! Planar geometry for the chaos game: points, the seed triangle, and the
//! Cartesian-to-barycentric conversion used for color interpolation.
//!
//! Barycentric coordinates give every point a weight per triangle vertex;
//! the weights always sum to 1. A point on a vertex has a single non-zero
//! weight, a point on an edge has two. Points outside the triangle get
//! negative weights (or weights above 1), which is not an error here.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::prng::RandomSource;

/// A point in the image plane. Copied freely; the engine mutates its own copy.
pub type Point = glam::DVec2;

/// Below this absolute determinant the three vertices are treated as collinear.
const DEGENERATE_EPSILON: f64 = 1e-9;

/// Maximum redraws when placing random vertices before giving up.
const MAX_RANDOM_ATTEMPTS: usize = 64;

/// The shared denominator of the barycentric formulas.
///
/// Twice the signed area of triangle `abc`; zero when the vertices are collinear.
pub fn determinant(a: Point, b: Point, c: Point) -> f64 {
    (b.y - c.y) * (a.x - c.x) + (c.x - b.x) * (a.y - c.y)
}

/// Barycentric weights `[l1, l2, l3]` of `p` with respect to triangle `abc`.
///
/// `l3` is derived as `1 - l1 - l2`, so the weights sum to exactly one up to
/// the rounding of that subtraction. Collinear vertices make the determinant
/// zero and every weight non-finite; callers validate the triangle first
/// (see [`Triangle::validate`]).
pub fn barycentric(a: Point, b: Point, c: Point, p: Point) -> [f64; 3] {
    let det = determinant(a, b, c);
    let l1 = ((b.y - c.y) * (p.x - c.x) + (c.x - b.x) * (p.y - c.y)) / det;
    let l2 = ((c.y - a.y) * (p.x - c.x) + (a.x - c.x) * (p.y - c.y)) / det;
    let l3 = 1.0 - l1 - l2;
    [l1, l2, l3]
}

/// The point halfway between `p` and `q`.
pub fn midpoint(p: Point, q: Point) -> Point {
    (p + q) / 2.0
}

/// The ordered seed set: exactly three vertices.
///
/// Vertex order matters: vertex `i` is paired with vertex color `i` during
/// interpolation. A `Triangle` is never mutated by a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Triangle {
    vertices: [Point; 3],
}

impl Triangle {
    /// Creates a triangle without validating it.
    pub fn new(a: Point, b: Point, c: Point) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    /// Builds a triangle from a caller-supplied vertex list.
    ///
    /// Returns `EngineError::VertexCount` unless the slice holds exactly
    /// three points.
    pub fn from_slice(points: &[Point]) -> Result<Self, EngineError> {
        match points {
            [a, b, c] => Ok(Self::new(*a, *b, *c)),
            _ => Err(EngineError::VertexCount { got: points.len() }),
        }
    }

    /// The classic canvas triangle: top-center, bottom-left, bottom-right.
    pub fn canvas_default(width: usize, height: usize) -> Self {
        let right = width.saturating_sub(1) as f64;
        let bottom = height.saturating_sub(1) as f64;
        Self::new(
            Point::new((width / 2) as f64, 0.0),
            Point::new(0.0, bottom),
            Point::new(right, bottom),
        )
    }

    /// Draws three integer-coordinate vertices inside a `width` x `height`
    /// canvas, redrawing until they are not collinear.
    pub fn random_within<R: RandomSource>(
        width: usize,
        height: usize,
        rng: &mut R,
    ) -> Result<Self, EngineError> {
        if width < 2 || height < 2 {
            return Err(EngineError::DegenerateTriangle(format!(
                "a {width}x{height} canvas cannot hold a non-degenerate triangle"
            )));
        }
        let mut draw = || Point::new(rng.next_usize(width) as f64, rng.next_usize(height) as f64);
        for _ in 0..MAX_RANDOM_ATTEMPTS {
            let candidate = Self::new(draw(), draw(), draw());
            if candidate.validate().is_ok() {
                return Ok(candidate);
            }
        }
        Err(EngineError::DegenerateTriangle(format!(
            "no non-degenerate triangle found after {MAX_RANDOM_ATTEMPTS} draws"
        )))
    }

    /// The three vertices in seed order.
    pub fn vertices(&self) -> &[Point; 3] {
        &self.vertices
    }

    /// Vertex `i` (0, 1 or 2).
    pub fn vertex(&self, i: usize) -> Point {
        self.vertices[i]
    }

    /// Rejects non-finite coordinates and collinear vertices.
    pub fn validate(&self) -> Result<(), EngineError> {
        if let Some(v) = self.vertices.iter().find(|v| !v.is_finite()) {
            return Err(EngineError::DegenerateTriangle(format!(
                "vertex ({}, {}) is not finite",
                v.x, v.y
            )));
        }
        let [a, b, c] = self.vertices;
        if determinant(a, b, c).abs() < DEGENERATE_EPSILON {
            return Err(EngineError::DegenerateTriangle(format!(
                "vertices ({}, {}), ({}, {}), ({}, {}) are collinear",
                a.x, a.y, b.x, b.y, c.x, c.y
            )));
        }
        Ok(())
    }

    /// Barycentric weights of `p`, one per vertex in seed order.
    pub fn barycentric(&self, p: Point) -> [f64; 3] {
        let [a, b, c] = self.vertices;
        barycentric(a, b, c, p)
    }

    /// The centroid, where all three weights are 1/3.
    pub fn centroid(&self) -> Point {
        let [a, b, c] = self.vertices;
        (a + b + c) / 3.0
    }

    /// Whether `p` lies inside or on the boundary of the triangle.
    pub fn contains(&self, p: Point) -> bool {
        self.barycentric(p).iter().all(|&w| w >= -1e-12)
    }
}
