//! Pointer handling and selection state for the color picker.
//!
//! [`PickerCore`] owns the two offscreen surfaces and all mutable widget
//! state, so the selection logic runs and tests without a display. The GTK
//! layer in [`crate::ui`] only translates gesture events into calls here.

use log::{debug, warn};

use crate::render;
use crate::surface::PickSurface;
use hueblock_types::Color;

/// Block surface edge length in pixels.
pub const BLOCK_SIZE: i32 = 150;
/// Hue-strip buffer width in pixels.
pub const STRIP_WIDTH: i32 = 50;
/// Hue-strip buffer height in pixels.
pub const STRIP_HEIGHT: i32 = 150;

/// Initial selection: opaque red.
const INITIAL_COLOR: Color = Color::new(1.0, 0.0, 0.0, 1.0);

/// Selection state and pixel sampling for the picker widget.
///
/// The drag flag has two states, up and down: a press moves it down, a
/// release moves it up, and motion while down resamples without changing
/// state. Motion while up is ignored.
pub struct PickerCore {
    block: PickSurface,
    strip: PickSurface,
    selected: Color,
    dragging: bool,
}

impl PickerCore {
    /// Allocate and paint both surfaces.
    ///
    /// The strip gradient is painted exactly once here and never repainted;
    /// the block is painted with the initial hue and repainted on every
    /// strip sample.
    pub fn new() -> Result<Self, cairo::Error> {
        let block = PickSurface::new(BLOCK_SIZE, BLOCK_SIZE)?;
        let strip = PickSurface::new(STRIP_WIDTH, STRIP_HEIGHT)?;

        render::paint_hue_strip(strip.context(), STRIP_WIDTH as f64, STRIP_HEIGHT as f64)?;
        render::paint_color_block(
            block.context(),
            INITIAL_COLOR,
            BLOCK_SIZE as f64,
            BLOCK_SIZE as f64,
        )?;

        Ok(Self {
            block,
            strip,
            selected: INITIAL_COLOR,
            dragging: false,
        })
    }

    pub fn selected(&self) -> Color {
        self.selected
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Force the drag flag, bypassing press/release. Exposed for the
    /// checkbox affordance that mirrors drag state.
    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    pub fn block_surface(&self) -> &PickSurface {
        &self.block
    }

    pub fn strip_surface(&self) -> &PickSurface {
        &self.strip
    }

    /// Press on the block: start dragging and sample immediately.
    pub fn press_block(&mut self, x: f64, y: f64) -> Option<Color> {
        self.dragging = true;
        Some(self.sample_block(x, y))
    }

    /// Motion over the block: resample only while dragging.
    pub fn motion_block(&mut self, x: f64, y: f64) -> Option<Color> {
        if !self.dragging {
            return None;
        }
        Some(self.sample_block(x, y))
    }

    /// Press on the strip: start dragging and pick a new base hue.
    pub fn press_strip(&mut self, x: f64, y: f64) -> Option<Color> {
        self.dragging = true;
        Some(self.sample_strip(x, y))
    }

    /// Motion over the strip: re-pick the hue only while dragging.
    pub fn motion_strip(&mut self, x: f64, y: f64) -> Option<Color> {
        if !self.dragging {
            return None;
        }
        Some(self.sample_strip(x, y))
    }

    /// Release anywhere: stop dragging. The selection keeps whatever the
    /// last sample produced.
    pub fn release(&mut self) {
        self.dragging = false;
    }

    /// Read the block pixel under the pointer and make it the selection.
    /// Alpha is forced opaque regardless of the pixel's own alpha.
    fn sample_block(&mut self, x: f64, y: f64) -> Color {
        self.selected = self.block.pixel_at(x as i32, y as i32).opaque();
        debug!("sampled block at ({x:.0},{y:.0}): {}", self.selected);
        self.selected
    }

    /// Read the strip pixel under the pointer, adopt it as the new base
    /// hue, and repaint the block with it. The strip itself is never
    /// repainted.
    fn sample_strip(&mut self, x: f64, y: f64) -> Color {
        let hue = self.strip.pixel_at(x as i32, y as i32).opaque();
        if let Err(err) = render::paint_color_block(
            self.block.context(),
            hue,
            BLOCK_SIZE as f64,
            BLOCK_SIZE as f64,
        ) {
            warn!("block repaint failed: {err}");
        }
        self.selected = hue;
        debug!("sampled strip at ({x:.0},{y:.0}): {}", self.selected);
        self.selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_near(color: Color, expected: (u8, u8, u8), tolerance: i32) {
        let (r, g, b, a) = color.to_rgba8();
        assert_eq!(a, 255, "sampled alpha must always be opaque");
        for (actual, wanted) in [
            (r as i32, expected.0 as i32),
            (g as i32, expected.1 as i32),
            (b as i32, expected.2 as i32),
        ] {
            assert!(
                (actual - wanted).abs() <= tolerance,
                "channel {actual} not within {tolerance} of {wanted} in {color}"
            );
        }
    }

    #[test]
    fn test_initial_selection_is_opaque_red() {
        let core = PickerCore::new().unwrap();
        assert_eq!(core.selected().to_string(), "rgba(255,0,0,1)");
        assert!(!core.is_dragging());
    }

    #[test]
    fn test_press_top_left_samples_white() {
        let mut core = PickerCore::new().unwrap();
        let color = core.press_block(0.0, 0.0).unwrap();
        // Gradients are interpolated at the pixel center, so the extreme
        // corner lands a hair below pure white.
        assert_near(color, (255, 255, 255), 4);
    }

    #[test]
    fn test_press_bottom_right_samples_black() {
        let mut core = PickerCore::new().unwrap();
        let color = core.press_block(149.0, 149.0).unwrap();
        assert_near(color, (0, 0, 0), 4);
    }

    #[test]
    fn test_sampled_alpha_is_always_opaque() {
        let mut core = PickerCore::new().unwrap();
        for (x, y) in [(0.0, 0.0), (74.0, 74.0), (149.0, 0.0), (0.0, 149.0)] {
            let color = core.press_block(x, y).unwrap();
            assert!(color.to_string().ends_with(",1)"), "got {color}");
        }
    }

    #[test]
    fn test_out_of_bounds_press_yields_opaque_black() {
        let mut core = PickerCore::new().unwrap();
        let color = core.press_block(500.0, 500.0).unwrap();
        assert_eq!(color.to_string(), "rgba(0,0,0,1)");
    }

    #[test]
    fn test_motion_before_press_is_ignored() {
        let mut core = PickerCore::new().unwrap();
        assert!(core.motion_block(10.0, 10.0).is_none());
        assert!(core.motion_strip(10.0, 10.0).is_none());
        assert_eq!(core.selected().to_string(), "rgba(255,0,0,1)");
    }

    #[test]
    fn test_press_release_without_motion_keeps_press_sample() {
        let mut core = PickerCore::new().unwrap();
        let pressed = core.press_block(40.0, 60.0).unwrap();
        core.release();
        assert_eq!(core.selected(), pressed);
        assert!(core.motion_block(0.0, 0.0).is_none());
        assert_eq!(core.selected(), pressed);
    }

    #[test]
    fn test_drag_flag_tracks_press_and_release() {
        let mut core = PickerCore::new().unwrap();
        assert!(!core.is_dragging());
        core.press_block(10.0, 10.0);
        assert!(core.is_dragging());
        core.motion_block(20.0, 20.0);
        assert!(core.is_dragging());
        core.release();
        assert!(!core.is_dragging());
    }

    #[test]
    fn test_set_dragging_enables_motion_sampling() {
        // The checkbox affordance: drag state flips without a press.
        let mut core = PickerCore::new().unwrap();
        core.set_dragging(true);
        assert!(core.motion_block(0.0, 0.0).is_some());
        core.set_dragging(false);
        assert!(core.motion_block(0.0, 0.0).is_none());
    }

    #[test]
    fn test_strip_press_adopts_hue_and_repaints_block() {
        let mut core = PickerCore::new().unwrap();
        let hue = core.press_strip(25.0, 75.0).unwrap();
        assert_eq!(core.selected(), hue);

        // Top-right of the repainted block is approximately the raw hue.
        let corner = core.block_surface().pixel_at(BLOCK_SIZE - 1, 0).opaque();
        let (hr, hg, hb, _) = hue.to_rgba8();
        assert_near(corner, (hr, hg, hb), 4);
    }

    #[test]
    fn test_strip_gradient_is_immutable() {
        let mut core = PickerCore::new().unwrap();
        let before = core.strip_surface().pixel_at(25, 40);
        core.press_strip(25.0, 120.0);
        core.press_block(70.0, 70.0);
        let after = core.strip_surface().pixel_at(25, 40);
        assert_eq!(before, after);
    }

    #[test]
    fn test_strip_ends_are_red() {
        let core = PickerCore::new().unwrap();
        let top = core.strip_surface().pixel_at(25, 0);
        let bottom = core.strip_surface().pixel_at(25, STRIP_HEIGHT - 1);
        assert_near(top, (255, 8, 0), 8);
        assert_near(bottom, (255, 8, 0), 8);
    }
}
