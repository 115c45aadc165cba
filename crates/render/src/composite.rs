//! Flat jersey cut sheet.
//!
//! Lays the selected pattern over the body and sleeve panels of a flat
//! front- or back-view jersey, with collar, cuff, and hem trim in the
//! secondary color. Lettering and logos are composited client-side in the
//! live designer; the sheet is the fabric-and-panel layer shared by
//! previews and exports.

use image::RgbImage;

use otomono_core::{JerseyDesign, Rgb, ViewSide};

use crate::texture::{pattern_pixel, to_image};

/// Cut sheet width in pixels.
pub const SHEET_WIDTH: u32 = 512;
/// Cut sheet height in pixels.
pub const SHEET_HEIGHT: u32 = 512;

const BACKGROUND: Rgb = Rgb::new(0xf3, 0xf4, 0xf6);

// Panel geometry, tuned to the 512px sheet.
const BODY_LEFT: u32 = 128;
const BODY_RIGHT: u32 = 384;
const BODY_TOP: u32 = 96;
const BODY_BOTTOM: u32 = 480;
const SLEEVE_WIDTH: u32 = 64;
const SLEEVE_BOTTOM: u32 = 224;
const CUFF_HEIGHT: u32 = 16;
const HEM_HEIGHT: u32 = 16;
const COLLAR_HALF_WIDTH: u32 = 48;
const COLLAR_DEPTH_FRONT: u32 = 24;
const COLLAR_DEPTH_BACK: u32 = 12;

enum Region {
    Background,
    Fabric,
    Trim,
}

fn classify(view: ViewSide, x: u32, y: u32) -> Region {
    let collar_depth = match view {
        ViewSide::Front => COLLAR_DEPTH_FRONT,
        ViewSide::Back => COLLAR_DEPTH_BACK,
    };
    let center = SHEET_WIDTH / 2;
    let collar = x >= center - COLLAR_HALF_WIDTH
        && x < center + COLLAR_HALF_WIDTH
        && y >= BODY_TOP
        && y < BODY_TOP + collar_depth;
    if collar {
        return Region::Trim;
    }

    let body = x >= BODY_LEFT && x < BODY_RIGHT && y >= BODY_TOP && y < BODY_BOTTOM;
    if body {
        if y >= BODY_BOTTOM - HEM_HEIGHT {
            return Region::Trim;
        }
        return Region::Fabric;
    }

    let left_sleeve = x >= BODY_LEFT - SLEEVE_WIDTH && x < BODY_LEFT;
    let right_sleeve = x >= BODY_RIGHT && x < BODY_RIGHT + SLEEVE_WIDTH;
    if (left_sleeve || right_sleeve) && y >= BODY_TOP && y < SLEEVE_BOTTOM {
        if y >= SLEEVE_BOTTOM - CUFF_HEIGHT {
            return Region::Trim;
        }
        return Region::Fabric;
    }

    Region::Background
}

/// Rasterize the full cut sheet for a design.
///
/// Fabric panels sample the pattern at sheet coordinates, so the pattern
/// flows continuously across the body and sleeves.
#[must_use]
pub fn render_sheet(design: &JerseyDesign) -> RgbImage {
    RgbImage::from_fn(SHEET_WIDTH, SHEET_HEIGHT, |x, y| {
        let color = match classify(design.view, x, y) {
            Region::Background => BACKGROUND,
            Region::Trim => design.secondary_color,
            Region::Fabric => pattern_pixel(
                design.pattern,
                design.primary_color,
                design.secondary_color,
                x,
                y,
            ),
        };
        to_image(color)
    })
}
