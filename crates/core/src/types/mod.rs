//! Core types for TechNest.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod price;
pub mod theme;

pub use email::{Email, EmailError};
pub use id::{IdError, ProductId};
pub use price::{Price, format_vnd};
pub use theme::{Theme, ThemeParseError};
