//! Painting routines for the picker's two drawable surfaces.
//!
//! The hue strip is painted once with a fixed seven-stop rainbow gradient.
//! The block is repainted whenever the base hue changes: a flat hue fill,
//! then a white-to-transparent sweep left to right, then a
//! transparent-to-black sweep top to bottom, each composited over the
//! previous layer with Cairo's default OVER operator.

use cairo::Context;
use hueblock_types::{Color, ColorStop};

/// The seven fixed stops of the hue-strip gradient, cycling through the
/// hue wheel: red, yellow, green, cyan, blue, magenta, back to red.
pub const HUE_STOPS: [ColorStop; 7] = [
    ColorStop::new(0.0, Color::new(1.0, 0.0, 0.0, 1.0)),
    ColorStop::new(0.17, Color::new(1.0, 1.0, 0.0, 1.0)),
    ColorStop::new(0.34, Color::new(0.0, 1.0, 0.0, 1.0)),
    ColorStop::new(0.51, Color::new(0.0, 1.0, 1.0, 1.0)),
    ColorStop::new(0.68, Color::new(0.0, 0.0, 1.0, 1.0)),
    ColorStop::new(0.85, Color::new(1.0, 0.0, 1.0, 1.0)),
    ColorStop::new(1.0, Color::new(1.0, 0.0, 0.0, 1.0)),
];

/// Paint the hue strip: a vertical linear gradient through [`HUE_STOPS`].
pub fn paint_hue_strip(cr: &Context, width: f64, height: f64) -> Result<(), cairo::Error> {
    let pattern = cairo::LinearGradient::new(0.0, 0.0, 0.0, height);
    for stop in &HUE_STOPS {
        pattern.add_color_stop_rgba(
            stop.position,
            stop.color.r,
            stop.color.g,
            stop.color.b,
            stop.color.a,
        );
    }

    cr.set_source(&pattern)?;
    cr.rectangle(0.0, 0.0, width, height);
    cr.fill()?;

    Ok(())
}

/// Paint the saturation/lightness block for a fixed base hue.
///
/// Layer order matters: hue fill, then the white sweep, then the black
/// sweep. Swapping the sweeps changes the corner colors.
pub fn paint_color_block(
    cr: &Context,
    hue: Color,
    width: f64,
    height: f64,
) -> Result<(), cairo::Error> {
    hue.apply_to_cairo(cr);
    cr.rectangle(0.0, 0.0, width, height);
    cr.fill()?;

    // Opaque white on the left fading out to the right
    let white = cairo::LinearGradient::new(0.0, 0.0, width, 0.0);
    white.add_color_stop_rgba(0.0, 1.0, 1.0, 1.0, 1.0);
    white.add_color_stop_rgba(1.0, 1.0, 1.0, 1.0, 0.0);
    cr.set_source(&white)?;
    cr.rectangle(0.0, 0.0, width, height);
    cr.fill()?;

    // Transparent at the top fading to opaque black at the bottom
    let black = cairo::LinearGradient::new(0.0, 0.0, 0.0, height);
    black.add_color_stop_rgba(0.0, 0.0, 0.0, 0.0, 0.0);
    black.add_color_stop_rgba(1.0, 0.0, 0.0, 0.0, 1.0);
    cr.set_source(&black)?;
    cr.rectangle(0.0, 0.0, width, height);
    cr.fill()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hue_stops_cycle_back_to_red() {
        let first = HUE_STOPS.first().unwrap();
        let last = HUE_STOPS.last().unwrap();
        assert_eq!(first.color, last.color);
        assert_eq!(first.position, 0.0);
        assert_eq!(last.position, 1.0);
    }

    #[test]
    fn test_hue_stop_positions_ascend() {
        for pair in HUE_STOPS.windows(2) {
            assert!(pair[0].position < pair[1].position);
        }
    }

    #[test]
    fn test_hue_stops_are_fully_saturated() {
        for stop in &HUE_STOPS {
            assert_eq!(stop.color.a, 1.0);
            for channel in [stop.color.r, stop.color.g, stop.color.b] {
                assert!(channel == 0.0 || channel == 1.0);
            }
        }
    }
}
