//! The twelve pattern recipes.
//!
//! Each recipe is a pure function of the pixel coordinate and the two
//! design colors, on a fixed 512x512 texture. Geometry constants (band
//! widths, tile sizes, the wave amplitude) are part of the product look
//! and must not drift between preview and export.

use image::{Rgb as ImageRgb, RgbImage};

use otomono_core::{Pattern, Rgb};

/// Side length of the square pattern texture, in pixels.
pub const TEXTURE_SIZE: u32 = 512;

const CENTER: f64 = (TEXTURE_SIZE / 2) as f64;
const STRIPE_WIDTH: u32 = 32;
const CHECKER_CELL: u32 = 64;
const PANEL_WIDTH: u32 = 128;
const TILE_SIZE: u32 = 128;
const WAVE_AMPLITUDE: f64 = 100.0;
const WAVE_PERIOD: f64 = 40.0;

/// Color of one texture pixel under the given recipe.
#[must_use]
pub fn pattern_pixel(pattern: Pattern, primary: Rgb, secondary: Rgb, x: u32, y: u32) -> Rgb {
    let fx = f64::from(x);
    let fy = f64::from(y);
    match pattern {
        Pattern::Solid => primary,
        Pattern::VerticalStripes => {
            // Stripes start on a secondary band at x = 0.
            if (x / STRIPE_WIDTH) % 2 == 0 {
                secondary
            } else {
                primary
            }
        }
        Pattern::HorizontalStripes => {
            if (y / STRIPE_WIDTH) % 2 == 0 {
                secondary
            } else {
                primary
            }
        }
        Pattern::DiagonalStripes => {
            // Distance along the 45-degree stripe axis.
            let u = ((fx - CENTER) + (fy - CENTER)) * std::f64::consts::FRAC_1_SQRT_2;
            if u.rem_euclid(f64::from(STRIPE_WIDTH * 2)) < f64::from(STRIPE_WIDTH) {
                secondary
            } else {
                primary
            }
        }
        Pattern::Checkered => {
            if (x / CHECKER_CELL + y / CHECKER_CELL) % 2 == 0 {
                secondary
            } else {
                primary
            }
        }
        Pattern::Gradient => lerp(primary, secondary, fy / f64::from(TEXTURE_SIZE - 1)),
        Pattern::SidePanels => {
            if x < PANEL_WIDTH || x >= TEXTURE_SIZE - PANEL_WIDTH {
                secondary
            } else {
                primary
            }
        }
        Pattern::Chevron => {
            if fy >= CENTER / 2.0 + (fx - CENTER).abs() / 2.0 {
                secondary
            } else {
                primary
            }
        }
        Pattern::Diamond => {
            if (fx - CENTER).abs() + (fy - CENTER).abs() <= CENTER {
                secondary
            } else {
                primary
            }
        }
        Pattern::Split => {
            if x < TEXTURE_SIZE / 2 {
                secondary
            } else {
                primary
            }
        }
        Pattern::Wave => {
            if fy >= CENTER + WAVE_AMPLITUDE * (fx / WAVE_PERIOD).sin() {
                secondary
            } else {
                primary
            }
        }
        Pattern::Geometric => {
            let tile = (x / TILE_SIZE + y / TILE_SIZE) % 2 == 0;
            let dx = f64::from(x % TILE_SIZE) - f64::from(TILE_SIZE / 2);
            let dy = f64::from(y % TILE_SIZE) - f64::from(TILE_SIZE / 2);
            if tile && dx.abs() + dy.abs() <= f64::from(TILE_SIZE / 2) {
                secondary
            } else {
                primary
            }
        }
    }
}

/// Rasterize a full pattern texture.
#[must_use]
pub fn render_pattern(pattern: Pattern, primary: Rgb, secondary: Rgb) -> RgbImage {
    RgbImage::from_fn(TEXTURE_SIZE, TEXTURE_SIZE, |x, y| {
        to_image(pattern_pixel(pattern, primary, secondary, x, y))
    })
}

pub(crate) fn to_image(color: Rgb) -> ImageRgb<u8> {
    ImageRgb([color.r, color.g, color.b])
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lerp(from: Rgb, to: Rgb, t: f64) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| {
        (f64::from(a) + (f64::from(b) - f64::from(a)) * t)
            .round()
            .clamp(0.0, 255.0) as u8
    };
    Rgb::new(mix(from.r, to.r), mix(from.g, to.g), mix(from.b, to.b))
}
