//! Writing a [`Raster`] as a plain-text PPM file.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use chaos_game_core::{EngineError, Raster};

use crate::pixel::{header, pixel_line};

/// Encodes `raster` as an ASCII PPM into `out`.
///
/// Pixels are written row-major (the raster's storage order), one
/// `r g b` triple per line.
pub fn encode_ppm<W: Write>(raster: &Raster, comment: &str, out: &mut W) -> io::Result<()> {
    out.write_all(header(raster.width(), raster.height(), comment).as_bytes())?;
    for row in raster.rows() {
        for &color in row {
            writeln!(out, "{}", pixel_line(color))?;
        }
    }
    Ok(())
}

/// Writes `raster` to `path`, using the file name as the header comment.
///
/// The file handle is owned by a local `BufWriter` and is closed on every
/// return path, success or error. Failures come back as `EngineError::Io`
/// carrying the path and the underlying cause.
pub fn write_ppm(raster: &Raster, path: &Path) -> Result<(), EngineError> {
    let comment = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let io_err = |e: io::Error| EngineError::Io(format!("{}: {e}", path.display()));

    let file = File::create(path).map_err(io_err)?;
    let mut out = BufWriter::new(file);
    encode_ppm(raster, &comment, &mut out).map_err(io_err)?;
    out.flush().map_err(io_err)
}
