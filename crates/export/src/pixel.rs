//! Text formatting of single pixels and the PPM header.
//!
//! Kept separate from the file-writing code so the exact bytes of the
//! format can be tested without touching the file system.

use chaos_game_core::Rgb;

/// Maximum channel value written in the header.
pub const MAX_CHANNEL: u8 = 255;

/// Formats one pixel as `"r g b"`: base-10 integers, truncated and clamped
/// to [0, 255] via [`Rgb::channels_u8`].
pub fn pixel_line(color: Rgb) -> String {
    let [r, g, b] = color.channels_u8();
    format!("{r} {g} {b}")
}

/// The four header lines of an ASCII color PPM, each newline-terminated.
///
/// Line breaks inside `comment` are replaced with spaces so the comment
/// stays on one line.
pub fn header(width: usize, height: usize, comment: &str) -> String {
    let comment = comment.replace(['\n', '\r'], " ");
    format!("P3\n# {comment}\n{width} {height}\n{MAX_CHANNEL}\n")
}
