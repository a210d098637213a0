//! hueblock: an interactive color-block picker widget for GTK4.
//!
//! This library provides:
//! - Offscreen pixel-buffer surfaces with single-pixel readback
//! - Painting for the hue strip and the saturation/lightness block
//! - Display-free pointer/selection state for headless testing
//! - The GTK widget tying those together with a swatch label

pub mod picker;
pub mod render;
pub mod surface;
pub mod ui;

// Re-export commonly used types
pub use hueblock_types::{Color, ColorStop, ParseColorError};
pub use picker::PickerCore;
pub use surface::PickSurface;
pub use ui::ColorBlockPicker;
