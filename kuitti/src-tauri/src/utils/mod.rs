//! Rendering, logo and printing helpers.

pub mod logo;
pub mod printing;
pub mod receipt_renderer;
