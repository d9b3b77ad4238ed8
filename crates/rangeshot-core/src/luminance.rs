//! Luma calculation using ITU-R BT.601 coefficients.
//!
//! The trimmer's contrast amplification centers on the mean luma of the
//! difference image. Luma is computed the way 8-bit "L" conversion does it:
//! fixed-point 601 weights scaled by 2^16, rounded.

/// ITU-R BT.601 red weight, scaled by 2^16.
pub const LUMA_R: u32 = 19595;

/// ITU-R BT.601 green weight, scaled by 2^16.
pub const LUMA_G: u32 = 38470;

/// ITU-R BT.601 blue weight, scaled by 2^16.
pub const LUMA_B: u32 = 7471;

/// Luma of an RGB pixel (0 to 255).
#[inline]
pub fn luma_u8(r: u8, g: u8, b: u8) -> u8 {
    ((LUMA_R * r as u32 + LUMA_G * g as u32 + LUMA_B * b as u32 + 0x8000) >> 16) as u8
}

/// Mean luma of a sequence of RGB pixels, rounded to the nearest level.
///
/// Returns 0 for an empty sequence.
pub fn mean_luminance<I>(pixels: I) -> u8
where
    I: IntoIterator<Item = [u8; 3]>,
{
    let mut sum = 0u64;
    let mut count = 0u64;
    for [r, g, b] in pixels {
        sum += luma_u8(r, g, b) as u64;
        count += 1;
    }
    if count == 0 {
        return 0;
    }
    ((sum as f64 / count as f64) + 0.5).floor().min(255.0) as u8
}
