//! Otomono Core - Shared types library.
//!
//! This crate provides common types used across all Otomono components:
//! - `storefront` - Public-facing jersey customization site
//! - `admin` - Internal administration panel
//! - `orders` - Order persistence cascade
//! - `render` - Pattern texture generator and export
//! - `cli` - Command-line tools
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no file access. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - IDs, emails, money, and status enums
//! - [`order`] - The order record, submission draft, and validation
//! - [`design`] - Jersey design parameters (colors, patterns, lettering)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod design;
pub mod order;
pub mod types;

pub use design::*;
pub use order::*;
pub use types::*;
