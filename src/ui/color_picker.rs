//! Interactive color-block picker widget: a saturation/lightness block, a
//! hue strip, and a swatch label mirroring the current selection.

use gtk4::prelude::*;
use gtk4::{Box as GtkBox, CheckButton, CssProvider, DrawingArea, GestureDrag, Label, Orientation};
use std::cell::RefCell;
use std::rc::Rc;

use crate::picker::{PickerCore, BLOCK_SIZE, STRIP_HEIGHT, STRIP_WIDTH};
use hueblock_types::Color;

/// Rendered width of the hue strip; its pixel buffer stays [`STRIP_WIDTH`]
/// wide and pointer coordinates are scaled to match.
const STRIP_DISPLAY_WIDTH: i32 = 15;

/// Height of the swatch label above the picking surfaces.
const SWATCH_HEIGHT: i32 = 40;

type ColorCallback = Rc<RefCell<Option<Box<dyn Fn(Color)>>>>;

/// Color picker widget
pub struct ColorBlockPicker {
    container: GtkBox,
    swatch: Label,
    drag_toggle: CheckButton,
    block_area: DrawingArea,
    strip_area: DrawingArea,
    core: Rc<RefCell<PickerCore>>,
    on_color_change: ColorCallback,
}

impl ColorBlockPicker {
    pub fn new() -> Result<Self, cairo::Error> {
        let core = Rc::new(RefCell::new(PickerCore::new()?));
        let on_color_change: ColorCallback = Rc::new(RefCell::new(None));
        // Guard flag so syncing the checkbox from a gesture does not loop
        // back through its toggled handler
        let is_updating: Rc<RefCell<bool>> = Rc::new(RefCell::new(false));

        let container = GtkBox::new(Orientation::Vertical, 10);
        container.set_margin_start(10);
        container.set_margin_end(10);
        container.set_margin_top(10);
        container.set_margin_bottom(10);

        // === Swatch label ===
        let swatch = Label::new(None);
        swatch.set_widget_name("color-label");
        swatch.set_size_request(-1, SWATCH_HEIGHT);
        let swatch_css = CssProvider::new();
        swatch
            .style_context()
            .add_provider(&swatch_css, gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION);
        Self::refresh_swatch(&swatch_css, core.borrow().selected());
        container.append(&swatch);

        // === Drag-state checkbox (debug/testing affordance) ===
        let drag_toggle = CheckButton::new();
        drag_toggle.set_widget_name("color-input");
        let core_for_toggle = core.clone();
        let is_updating_for_toggle = is_updating.clone();
        drag_toggle.connect_toggled(move |toggle| {
            if *is_updating_for_toggle.borrow() {
                return;
            }
            core_for_toggle.borrow_mut().set_dragging(toggle.is_active());
        });
        container.append(&drag_toggle);

        // === Picking surfaces ===
        let picker_box = GtkBox::new(Orientation::Horizontal, 10);

        let block_area = DrawingArea::new();
        block_area.set_widget_name("color-block");
        block_area.set_content_width(BLOCK_SIZE);
        block_area.set_content_height(BLOCK_SIZE);
        let core_for_draw = core.clone();
        block_area.set_draw_func(move |_, cr, _, _| {
            let core = core_for_draw.borrow();
            let _ = cr.set_source_surface(core.block_surface().surface(), 0.0, 0.0);
            let _ = cr.paint();
        });
        picker_box.append(&block_area);

        let strip_area = DrawingArea::new();
        strip_area.set_widget_name("color-strip");
        strip_area.set_content_width(STRIP_DISPLAY_WIDTH);
        strip_area.set_content_height(STRIP_HEIGHT);
        let strip_css = CssProvider::new();
        strip_css.load_from_data("#color-strip { border-radius: 20px; }");
        strip_area
            .style_context()
            .add_provider(&strip_css, gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION);
        let core_for_draw = core.clone();
        strip_area.set_draw_func(move |_, cr, width, height| {
            let core = core_for_draw.borrow();
            let strip = core.strip_surface();
            // Squeeze the 50px-wide buffer into the rendered width
            cr.scale(
                width as f64 / strip.width() as f64,
                height as f64 / strip.height() as f64,
            );
            let _ = cr.set_source_surface(strip.surface(), 0.0, 0.0);
            let _ = cr.paint();
        });
        picker_box.append(&strip_area);

        container.append(&picker_box);

        let picker = Self {
            container,
            swatch,
            drag_toggle,
            block_area,
            strip_area,
            core,
            on_color_change,
        };

        picker.setup_block_gesture(&swatch_css, &is_updating);
        picker.setup_strip_gesture(&swatch_css, &is_updating);

        Ok(picker)
    }

    /// Wire press/drag/release on the block surface to block sampling.
    fn setup_block_gesture(&self, swatch_css: &CssProvider, is_updating: &Rc<RefCell<bool>>) {
        let drag = GestureDrag::new();
        drag.set_button(1);

        let core = self.core.clone();
        let swatch_css_begin = swatch_css.clone();
        let block_area = self.block_area.clone();
        let on_change = self.on_color_change.clone();
        let drag_toggle = self.drag_toggle.clone();
        let is_updating_begin = is_updating.clone();
        drag.connect_drag_begin(move |_, x, y| {
            let sampled = core.borrow_mut().press_block(x, y);
            Self::sync_drag_toggle(&drag_toggle, &is_updating_begin, true);
            if let Some(color) = sampled {
                Self::apply_selection(color, &swatch_css_begin, &block_area, &on_change);
            }
        });

        let core = self.core.clone();
        let swatch_css_update = swatch_css.clone();
        let block_area = self.block_area.clone();
        let on_change = self.on_color_change.clone();
        drag.connect_drag_update(move |gesture, offset_x, offset_y| {
            let Some((start_x, start_y)) = gesture.start_point() else {
                return;
            };
            let sampled = core
                .borrow_mut()
                .motion_block(start_x + offset_x, start_y + offset_y);
            if let Some(color) = sampled {
                Self::apply_selection(color, &swatch_css_update, &block_area, &on_change);
            }
        });

        let core = self.core.clone();
        let drag_toggle = self.drag_toggle.clone();
        let is_updating_end = is_updating.clone();
        drag.connect_drag_end(move |_, _, _| {
            core.borrow_mut().release();
            Self::sync_drag_toggle(&drag_toggle, &is_updating_end, false);
        });

        self.block_area.add_controller(drag);
    }

    /// Wire press/drag/release on the strip to hue picking. Widget
    /// coordinates are scaled into the strip buffer's coordinate space.
    fn setup_strip_gesture(&self, swatch_css: &CssProvider, is_updating: &Rc<RefCell<bool>>) {
        let drag = GestureDrag::new();
        drag.set_button(1);

        let core = self.core.clone();
        let swatch_css_begin = swatch_css.clone();
        let strip_area = self.strip_area.clone();
        let block_area = self.block_area.clone();
        let on_change = self.on_color_change.clone();
        let drag_toggle = self.drag_toggle.clone();
        let is_updating_begin = is_updating.clone();
        drag.connect_drag_begin(move |_, x, y| {
            let (x, y) = Self::strip_buffer_coords(&strip_area, x, y);
            let sampled = core.borrow_mut().press_strip(x, y);
            Self::sync_drag_toggle(&drag_toggle, &is_updating_begin, true);
            if let Some(color) = sampled {
                Self::apply_selection(color, &swatch_css_begin, &block_area, &on_change);
            }
        });

        let core = self.core.clone();
        let swatch_css_update = swatch_css.clone();
        let strip_area = self.strip_area.clone();
        let block_area = self.block_area.clone();
        let on_change = self.on_color_change.clone();
        drag.connect_drag_update(move |gesture, offset_x, offset_y| {
            let Some((start_x, start_y)) = gesture.start_point() else {
                return;
            };
            let (x, y) = Self::strip_buffer_coords(&strip_area, start_x + offset_x, start_y + offset_y);
            let sampled = core.borrow_mut().motion_strip(x, y);
            if let Some(color) = sampled {
                Self::apply_selection(color, &swatch_css_update, &block_area, &on_change);
            }
        });

        let core = self.core.clone();
        let drag_toggle = self.drag_toggle.clone();
        let is_updating_end = is_updating.clone();
        drag.connect_drag_end(move |_, _, _| {
            core.borrow_mut().release();
            Self::sync_drag_toggle(&drag_toggle, &is_updating_end, false);
        });

        self.strip_area.add_controller(drag);
    }

    /// Map strip widget coordinates to strip buffer coordinates.
    fn strip_buffer_coords(strip_area: &DrawingArea, x: f64, y: f64) -> (f64, f64) {
        let widget_width = strip_area.width().max(1) as f64;
        let widget_height = strip_area.height().max(1) as f64;
        (
            x * STRIP_WIDTH as f64 / widget_width,
            y * STRIP_HEIGHT as f64 / widget_height,
        )
    }

    /// Mirror the drag flag to the checkbox without retriggering its handler.
    fn sync_drag_toggle(toggle: &CheckButton, is_updating: &Rc<RefCell<bool>>, active: bool) {
        *is_updating.borrow_mut() = true;
        toggle.set_active(active);
        *is_updating.borrow_mut() = false;
    }

    /// Push a new selection out to the swatch, the block surface, and the
    /// change callback.
    fn apply_selection(
        color: Color,
        swatch_css: &CssProvider,
        block_area: &DrawingArea,
        on_change: &ColorCallback,
    ) {
        Self::refresh_swatch(swatch_css, color);
        block_area.queue_draw();
        if let Some(callback) = on_change.borrow().as_ref() {
            callback(color);
        }
    }

    fn refresh_swatch(swatch_css: &CssProvider, color: Color) {
        swatch_css.load_from_data(&format!("#color-label {{ background-color: {}; }}", color));
    }

    /// The currently selected color.
    pub fn selected_color(&self) -> Color {
        self.core.borrow().selected()
    }

    /// Set callback for when the selected color changes
    pub fn set_on_color_change<F: Fn(Color) + 'static>(&self, callback: F) {
        *self.on_color_change.borrow_mut() = Some(Box::new(callback));
    }

    /// Get the container widget
    pub fn widget(&self) -> &GtkBox {
        &self.container
    }

    /// The swatch label mirroring the selection.
    pub fn swatch(&self) -> &Label {
        &self.swatch
    }
}
