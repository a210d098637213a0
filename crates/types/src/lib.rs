//! Shared data types for the hueblock picker widget.

mod color;

pub use color::{Color, ColorStop, ParseColorError};
