//! Index-buffer pixel decoding.
//!
//! Each pixel stores a splat index as little-endian RGBA8: R holds bits
//! 0–7, A holds bits 24–31. All-ones (the clear color) means no splat.

/// Bytes per index-buffer pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// Pixel value meaning "no splat here".
pub const NO_SPLAT: u32 = u32::MAX;

/// Decode one RGBA8 pixel to a splat index.
#[must_use]
pub fn decode_index(rgba: [u8; 4]) -> Option<u32> {
    let index = u32::from_le_bytes(rgba);
    (index != NO_SPLAT).then_some(index)
}

/// Decode a `width` × `height` block of pixels laid out with
/// `row_pitch` bytes per row (which may include alignment padding).
///
/// Missing trailing bytes decode as misses.
#[must_use]
pub fn decode_rect(bytes: &[u8], width: usize, height: usize, row_pitch: usize) -> Vec<Option<u32>> {
    let mut out = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let start = row * row_pitch + col * BYTES_PER_PIXEL;
            let pixel = bytes
                .get(start..start + BYTES_PER_PIXEL)
                .and_then(|p| <[u8; 4]>::try_from(p).ok());
            out.push(pixel.and_then(decode_index));
        }
    }
    out
}
