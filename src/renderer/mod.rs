//! Canvas 2D rendering module
//!
//! `frame` builds a backend-agnostic draw list from a snapshot; `canvas`
//! plays it back on the browser's 2D context.

pub mod frame;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use frame::{DrawCommand, build_frame};
