//! Offscreen pixel-buffer surfaces with single-pixel readback.

use cairo::{Context, Format, ImageSurface};
use hueblock_types::Color;

/// A fixed-size offscreen drawing surface owned by the picker.
///
/// Wraps a Cairo ARGB32 image surface together with a drawing context
/// acquired once at construction, so painting and sampling never reach for
/// shared mutable state. The surface memory is released on drop.
pub struct PickSurface {
    surface: ImageSurface,
    context: Context,
    width: i32,
    height: i32,
}

impl PickSurface {
    pub fn new(width: i32, height: i32) -> Result<Self, cairo::Error> {
        let surface = ImageSurface::create(Format::ARgb32, width, height)?;
        let context = Context::new(&surface)?;
        Ok(Self {
            surface,
            context,
            width,
            height,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// The drawing context bound to this surface.
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// The underlying image surface, for blitting into a widget's context.
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    /// Read the single pixel at (x, y) relative to the surface origin.
    ///
    /// Coordinates outside the surface bounds yield transparent black, the
    /// same zero-valued data a raw image read would produce. Pixel data is
    /// stored premultiplied, so the channels are unpremultiplied before
    /// conversion.
    pub fn pixel_at(&self, x: i32, y: i32) -> Color {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return Color::new(0.0, 0.0, 0.0, 0.0);
        }

        self.surface.flush();

        let stride = self.surface.stride();
        let mut pixel = 0u32;
        let read = self.surface.with_data(|data| {
            let offset = (y * stride + x * 4) as usize;
            pixel = u32::from_ne_bytes([
                data[offset],
                data[offset + 1],
                data[offset + 2],
                data[offset + 3],
            ]);
        });
        if read.is_err() {
            return Color::new(0.0, 0.0, 0.0, 0.0);
        }

        let a = (pixel >> 24) & 0xff;
        if a == 0 {
            return Color::new(0.0, 0.0, 0.0, 0.0);
        }
        let unpremultiply = |c: u32| ((c * 255 + a / 2) / a).min(255) as u8;
        let r = unpremultiply((pixel >> 16) & 0xff);
        let g = unpremultiply((pixel >> 8) & 0xff);
        let b = unpremultiply(pixel & 0xff);

        Color::from_rgba8(r, g, b, a as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hueblock_types::Color;

    fn solid_surface(color: Color) -> PickSurface {
        let surface = PickSurface::new(10, 10).unwrap();
        color.apply_to_cairo(surface.context());
        surface.context().rectangle(0.0, 0.0, 10.0, 10.0);
        surface.context().fill().unwrap();
        surface
    }

    #[test]
    fn test_pixel_at_reads_solid_fill() {
        let surface = solid_surface(Color::from_rgba8(10, 20, 30, 255));
        assert_eq!(surface.pixel_at(5, 5).to_rgba8(), (10, 20, 30, 255));
    }

    #[test]
    fn test_pixel_at_out_of_bounds_is_transparent_black() {
        let surface = solid_surface(Color::from_rgba8(255, 255, 255, 255));
        for (x, y) in [(-1, 0), (0, -1), (10, 0), (0, 10), (500, 500)] {
            assert_eq!(surface.pixel_at(x, y), Color::new(0.0, 0.0, 0.0, 0.0));
        }
    }

    #[test]
    fn test_pixel_at_unpremultiplies_alpha() {
        let surface = PickSurface::new(4, 4).unwrap();
        surface.context().set_source_rgba(1.0, 0.0, 0.0, 0.5);
        surface.context().rectangle(0.0, 0.0, 4.0, 4.0);
        surface.context().fill().unwrap();

        let pixel = surface.pixel_at(1, 1);
        let (r, _, _, a) = pixel.to_rgba8();
        assert_eq!(r, 255);
        assert!((a as i32 - 128).abs() <= 1);
    }

    #[test]
    fn test_unpainted_surface_is_transparent() {
        let surface = PickSurface::new(4, 4).unwrap();
        assert_eq!(surface.pixel_at(2, 2), Color::new(0.0, 0.0, 0.0, 0.0));
    }
}
