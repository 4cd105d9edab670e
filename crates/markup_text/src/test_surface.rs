use crate::color::{Hsla, black};
use crate::font::{Font, FontMetrics, FontWeight, font};
use crate::geometry::{Bounds, Pixels, Point, Size, px, size};
use crate::surface::{DrawingSurface, ItemState, ItemTextRenderer};

/// A [`DrawingSurface`] with deterministic metrics, derived arithmetically
/// from the selected font: every character advances by half the font size
/// (five quarters of that at semibold and heavier), the line height is 1.25
/// times the font size, the ascent equals the font size, the descent is a
/// quarter of it and the internal leading an eighth. All of these are exact
/// in f32 for power-of-two sizes, so tests can assert equality.
///
/// Every draw is recorded in [`calls`](Self::calls) in order.
pub struct TestSurface {
    font: Font,
    color: Hsla,
    /// Every draw call, in order.
    pub calls: Vec<DrawCall>,
    /// How many times a font was selected, for observing state restoration.
    pub font_selections: usize,
}

/// A recorded [`TestSurface`] draw.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Text {
        text: String,
        origin: Point<Pixels>,
        font: Font,
        color: Hsla,
        mnemonic: Option<usize>,
    },
    Background {
        bounds: Bounds<Pixels>,
        color: Hsla,
    },
}

impl Default for TestSurface {
    fn default() -> Self {
        TestSurface {
            font: font("Helvetica").with_size(px(16.)),
            color: black(),
            calls: Vec::new(),
            font_selections: 0,
        }
    }
}

impl TestSurface {
    fn advance(font: &Font) -> Pixels {
        let advance = font.size * 0.5;
        if font.weight >= FontWeight::SEMIBOLD {
            advance * 1.25
        } else {
            advance
        }
    }

    /// The texts drawn so far, in order.
    pub fn drawn_text(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                DrawCall::Background { .. } => None,
            })
            .collect()
    }
}

impl DrawingSurface for TestSurface {
    fn font(&self) -> Font {
        self.font.clone()
    }

    fn set_font(&mut self, font: &Font) {
        self.font = font.clone();
        self.font_selections += 1;
    }

    fn text_color(&self) -> Hsla {
        self.color
    }

    fn set_text_color(&mut self, color: Hsla) {
        self.color = color;
    }

    fn text_extent(&self, text: &str) -> Size<Pixels> {
        size(
            Self::advance(&self.font) * text.chars().count() as f32,
            self.font.size * 1.25,
        )
    }

    fn font_metrics(&self) -> FontMetrics {
        FontMetrics {
            ascent: self.font.size,
            descent: self.font.size / 4.,
            internal_leading: self.font.size / 8.,
            external_leading: Pixels::ZERO,
        }
    }

    fn draw_text(&mut self, text: &str, origin: Point<Pixels>, mnemonic: Option<usize>) {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            origin,
            font: self.font.clone(),
            color: self.color,
            mnemonic,
        });
    }

    fn draw_background(&mut self, bounds: Bounds<Pixels>, color: Hsla) {
        self.calls.push(DrawCall::Background { bounds, color });
    }
}

/// An [`ItemTextRenderer`] recording the chunks a control window would hand
/// to the native item-text facility.
#[derive(Default)]
pub struct TestWindow {
    pub item_texts: Vec<ItemTextCall>,
}

/// A recorded [`TestWindow`] draw.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemTextCall {
    pub text: String,
    /// The font selected on the surface at the time of the call.
    pub font: Font,
    pub bounds: Bounds<Pixels>,
    pub state: ItemState,
}

impl ItemTextRenderer for TestWindow {
    fn draw_item_text(
        &mut self,
        surface: &mut dyn DrawingSurface,
        text: &str,
        bounds: Bounds<Pixels>,
        state: ItemState,
    ) {
        self.item_texts.push(ItemTextCall {
            text: text.to_string(),
            font: surface.font(),
            bounds,
            state,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_metrics() {
        let mut surface = TestSurface::default();
        assert_eq!(surface.text_extent("Hello World"), size(px(88.), px(20.)));
        assert_eq!(surface.text_extent(""), size(px(0.), px(20.)));

        let metrics = surface.font_metrics();
        assert_eq!(metrics.ascent, px(16.));
        assert_eq!(metrics.height(), px(20.));
        assert_eq!(metrics.visible_height(), px(14.));

        let bold = surface.font().bold();
        surface.set_font(&bold);
        assert_eq!(surface.text_extent("ab"), size(px(20.), px(20.)));
    }
}
