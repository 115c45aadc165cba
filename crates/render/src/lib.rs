//! Otomono Render - procedural jersey textures and export.
//!
//! Everything here is deterministic: the same design parameters always
//! produce the same pixels, so previews, cached thumbnails, and exported
//! files never disagree.
//!
//! - [`texture`] rasterizes the twelve pattern recipes onto a fixed-size
//!   square texture.
//! - [`composite`] lays a front or back jersey cut sheet over a texture.
//! - [`export`] encodes a finished sheet as PNG bytes, a PNG data URL, or
//!   a single-page PDF.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod composite;
pub mod export;
pub mod texture;

pub use composite::{SHEET_HEIGHT, SHEET_WIDTH, render_sheet};
pub use export::{ExportError, sheet_pdf, sheet_png, sheet_png_data_url};
pub use texture::{TEXTURE_SIZE, pattern_pixel, render_pattern};
