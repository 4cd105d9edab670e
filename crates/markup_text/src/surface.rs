use crate::color::Hsla;
use crate::font::{Font, FontMetrics};
use crate::geometry::{Bounds, Pixels, Point, Size};
use bitflags::bitflags;
use std::ops::{Deref, DerefMut};

/// The surface text is measured against and drawn to. Implementations wrap
/// whatever the platform calls a device or drawing context; they carry a
/// current font and text color, report extents and metrics under the current
/// font, and draw text and background fills.
pub trait DrawingSurface {
    /// The currently selected font.
    fn font(&self) -> Font;

    /// Select a font. Subsequent extents, metrics and text are resolved
    /// against it.
    fn set_font(&mut self, font: &Font);

    /// The current text foreground color.
    fn text_color(&self) -> Hsla;

    /// Set the text foreground color.
    fn set_text_color(&mut self, color: Hsla);

    /// The rendered extent of `text` under the current font: its width and
    /// the font's full line height.
    fn text_extent(&self, text: &str) -> Size<Pixels>;

    /// The vertical metrics of the current font.
    fn font_metrics(&self) -> FontMetrics;

    /// Draw `text` with its top-left corner at `origin` using the current
    /// font and text color. When `mnemonic` is given it is the byte offset
    /// in `text` of the character to underline as the keyboard accelerator.
    fn draw_text(&mut self, text: &str, origin: Point<Pixels>, mnemonic: Option<usize>);

    /// Fill `bounds` with `color`, behind any text drawn later.
    fn draw_background(&mut self, bounds: Bounds<Pixels>, color: Hsla);
}

/// Windows of controls that render item rows through the platform theme.
/// The text of each styled chunk is drawn by the native facility instead of
/// [`DrawingSurface::draw_text`], so it picks up selection and focus
/// appearance.
pub trait ItemTextRenderer {
    /// Draw `text` inside `bounds` in the appearance matching `state`,
    /// using the font currently selected on `surface`.
    fn draw_item_text(
        &mut self,
        surface: &mut dyn DrawingSurface,
        text: &str,
        bounds: Bounds<Pixels>,
        state: ItemState,
    );
}

bitflags! {
    /// The interaction state of the item a row's text is drawn for, passed
    /// through to the native renderer unchanged.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct ItemState: u8 {
        const SELECTED = 1 << 0;
        const FOCUSED = 1 << 1;
        const DISABLED = 1 << 2;
        const HOVERED = 1 << 3;
    }
}

/// Captures the surface's font and text color and restores both when
/// dropped. Measure and render walks hold one of these for their whole
/// duration, so the surface comes back in its original state on every path,
/// parse errors included.
pub(crate) struct SurfaceState<'a> {
    surface: &'a mut dyn DrawingSurface,
    font: Font,
    color: Hsla,
}

impl<'a> SurfaceState<'a> {
    pub fn capture(surface: &'a mut dyn DrawingSurface) -> Self {
        let font = surface.font();
        let color = surface.text_color();
        SurfaceState {
            surface,
            font,
            color,
        }
    }

    /// The font selected when the surface was captured.
    pub fn base_font(&self) -> &Font {
        &self.font
    }

    /// The text color selected when the surface was captured.
    pub fn base_color(&self) -> Hsla {
        self.color
    }
}

impl<'a> Deref for SurfaceState<'a> {
    type Target = dyn DrawingSurface + 'a;

    fn deref(&self) -> &Self::Target {
        &*self.surface
    }
}

impl<'a> DerefMut for SurfaceState<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.surface
    }
}

impl Drop for SurfaceState<'_> {
    fn drop(&mut self) {
        self.surface.set_font(&self.font);
        self.surface.set_text_color(self.color);
    }
}
