//! Error types for the chaos-game core.

use thiserror::Error;

/// Errors produced by raster, geometry, engine and export operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Width or height was zero (or their product overflowed) when creating a raster.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A seed set did not contain exactly three vertices.
    #[error("expected exactly 3 seed vertices, got {got}")]
    VertexCount { got: usize },

    /// The seed vertices are collinear or not finite, so barycentric weights are undefined.
    #[error("degenerate triangle: {0}")]
    DegenerateTriangle(String),

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A run description failed validation for a reason other than geometry or size.
    #[error("invalid seed: {0}")]
    InvalidSeed(String),

    /// Writing an image or seed file failed. Carries the underlying cause.
    #[error("i/o error: {0}")]
    Io(String),
}

impl From<std::io::Error> for EngineError {
    fn from(e: std::io::Error) -> Self {
        EngineError::Io(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_dimensions_displays_readable_message() {
        let err = EngineError::InvalidDimensions;
        let msg = format!("{err}");
        assert!(
            msg.contains("width") && msg.contains("height"),
            "expected message mentioning width and height, got: {msg}"
        );
    }

    #[test]
    fn vertex_count_includes_actual_count() {
        let err = EngineError::VertexCount { got: 4 };
        let msg = format!("{err}");
        assert!(msg.contains('3'), "missing expected count in: {msg}");
        assert!(msg.contains('4'), "missing actual count in: {msg}");
    }

    #[test]
    fn degenerate_triangle_includes_message() {
        let err = EngineError::DegenerateTriangle("collinear".into());
        let msg = format!("{err}");
        assert!(msg.contains("collinear"), "missing message in: {msg}");
    }

    #[test]
    fn invalid_color_includes_message() {
        let err = EngineError::InvalidColor("bad hex".into());
        let msg = format!("{err}");
        assert!(msg.contains("bad hex"), "missing message in: {msg}");
    }

    #[test]
    fn io_error_conversion_keeps_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only volume");
        let err = EngineError::from(io);
        assert!(matches!(err, EngineError::Io(_)));
        assert!(err.to_string().contains("read-only volume"));
    }

    #[test]
    fn engine_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EngineError>();
    }

    #[test]
    fn engine_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<EngineError>();
    }
}
