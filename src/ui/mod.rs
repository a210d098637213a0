//! UI components

mod color_picker;

pub use color_picker::ColorBlockPicker;
