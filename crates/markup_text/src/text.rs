use crate::geometry::{Bounds, Pixels, Point, Size, point, size};
use crate::markup::{self, ParsedMarkup};
use crate::surface::{DrawingSurface, ItemState, ItemTextRenderer, SurfaceState};
use anyhow::Result;
use bitflags::bitflags;
use smallvec::SmallVec;

bitflags! {
    /// Options for [`MarkupText::render`].
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct RenderFlags: u8 {
        /// Underline the mnemonic character, if the markup designates one.
        const SHOW_ACCELS = 1 << 0;
    }
}

/// The extent of a markup string under a surface's base font.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MeasuredText {
    /// The sum of the run widths and the tallest run's line height.
    pub size: Size<Pixels>,
    /// The tallest run's ascent net of its internal leading: the height
    /// above the baseline that glyphs actually ink.
    pub visible_height: Pixels,
}

/// A single line of text with inline markup, measured and drawn against a
/// [`DrawingSurface`].
///
/// The markup string is stored verbatim and parsed again by every
/// operation, so parse errors surface from [`measure`](Self::measure) and
/// the render methods rather than from construction. As in any label, a
/// single `&` in the markup marks the following character as the keyboard
/// mnemonic and `&&` is a literal ampersand; use
/// [`set_markup_text`](Self::set_markup_text) to store text verbatim
/// without that interpretation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MarkupText {
    markup: String,
}

impl MarkupText {
    pub fn new(markup: impl Into<String>) -> Self {
        MarkupText {
            markup: markup.into(),
        }
    }

    /// The stored markup string.
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Replace the markup string.
    pub fn set_markup(&mut self, markup: impl Into<String>) {
        self.markup = markup.into();
    }

    /// Replace the markup with `text`, escaping its ampersands so that no
    /// character of it is interpreted as a mnemonic marker.
    pub fn set_markup_text(&mut self, text: &str) {
        self.markup = markup::escape_mnemonics(text);
    }

    /// Measure the markup under the surface's currently selected font.
    ///
    /// The width is the sum of the run widths, the height the tallest
    /// run's line height. The surface's font and color are left as they
    /// were found, and measuring is idempotent: a second call returns the
    /// same extent.
    pub fn measure(&self, surface: &mut dyn DrawingSurface) -> Result<MeasuredText> {
        let parsed = markup::parse(&self.markup)?;
        let mut surface = SurfaceState::capture(surface);
        let (measured, _) = measure_runs(&parsed, &mut surface);
        Ok(measured)
    }

    /// Draw the markup centered in `bounds`, both horizontally and
    /// vertically. Centering offsets are floor-rounded to whole pixels;
    /// text wider than `bounds` is drawn flush with the left edge and
    /// overflows on the right, without clipping.
    ///
    /// The mnemonic character is underlined only when `flags` contains
    /// [`RenderFlags::SHOW_ACCELS`]. The surface's font and color are
    /// restored before returning.
    pub fn render(
        &self,
        surface: &mut dyn DrawingSurface,
        bounds: Bounds<Pixels>,
        flags: RenderFlags,
    ) -> Result<()> {
        let parsed = markup::parse(&self.markup)?;
        let mut surface = SurfaceState::capture(surface);
        let base_font = surface.base_font().clone();
        let base_color = surface.base_color();
        let (measured, widths) = measure_runs(&parsed, &mut surface);
        let mut pen = centered_origin(&measured, &bounds);

        let mnemonic = flags
            .contains(RenderFlags::SHOW_ACCELS)
            .then_some(parsed.mnemonic)
            .flatten();

        let mut run_start = 0;
        for ((text, style), width) in parsed.iter_runs().zip(widths) {
            surface.set_font(&style.apply(&base_font));
            if let Some(background) = style.background_color {
                surface.draw_background(
                    Bounds {
                        origin: pen,
                        size: size(width, measured.size.height),
                    },
                    background,
                );
            }
            surface.set_text_color(style.color.unwrap_or(base_color));
            let run_mnemonic = mnemonic
                .filter(|&offset| offset >= run_start && offset - run_start < text.len())
                .map(|offset| offset - run_start);
            surface.draw_text(text, pen, run_mnemonic);
            pen.x += width;
            run_start += text.len();
        }
        Ok(())
    }

    /// Draw the markup centered in `bounds` through the native item-text
    /// facility of `window`, chunk by chunk, passing `state` through
    /// unchanged. Used by controls whose rows are drawn in the platform
    /// theme's selection and focus appearance.
    ///
    /// Fonts are selected per run as in [`render`](Self::render), but
    /// colors are left to the native renderer and mnemonics are never
    /// underlined on this path.
    pub fn render_item_text(
        &self,
        window: &mut dyn ItemTextRenderer,
        surface: &mut dyn DrawingSurface,
        bounds: Bounds<Pixels>,
        state: ItemState,
    ) -> Result<()> {
        let parsed = markup::parse(&self.markup)?;
        let mut surface = SurfaceState::capture(surface);
        let base_font = surface.base_font().clone();
        let (measured, widths) = measure_runs(&parsed, &mut surface);
        let mut pen = centered_origin(&measured, &bounds);

        for ((text, style), width) in parsed.iter_runs().zip(widths) {
            surface.set_font(&style.apply(&base_font));
            window.draw_item_text(
                &mut *surface,
                text,
                Bounds {
                    origin: pen,
                    size: size(width, measured.size.height),
                },
                state,
            );
            pen.x += width;
        }
        Ok(())
    }
}

/// Walk the runs left to right, selecting each run's effective font and
/// accumulating the total extent along with the individual run widths for
/// the draw pass.
fn measure_runs(
    parsed: &ParsedMarkup,
    surface: &mut SurfaceState<'_>,
) -> (MeasuredText, SmallVec<[Pixels; 8]>) {
    let mut widths = SmallVec::new();

    if parsed.runs.is_empty() {
        return (
            MeasuredText {
                size: surface.text_extent(""),
                visible_height: surface.font_metrics().visible_height(),
            },
            widths,
        );
    }

    let base_font = surface.base_font().clone();
    let mut width = Pixels::ZERO;
    let mut height = Pixels::ZERO;
    let mut visible_height = Pixels::ZERO;
    for (text, style) in parsed.iter_runs() {
        surface.set_font(&style.apply(&base_font));
        let extent = surface.text_extent(text);
        widths.push(extent.width);
        width += extent.width;
        height = height.max(extent.height);
        visible_height = visible_height.max(surface.font_metrics().visible_height());
    }

    (
        MeasuredText {
            size: size(width, height),
            visible_height,
        },
        widths,
    )
}

/// The top-left corner at which text of extent `measured` is drawn centered
/// in `bounds`. Offsets are floor-rounded; the horizontal offset is clamped
/// so overlong text stays flush with the left edge, while overtall text is
/// allowed to start above the top one.
fn centered_origin(measured: &MeasuredText, bounds: &Bounds<Pixels>) -> Point<Pixels> {
    let x = bounds.origin.x
        + ((bounds.size.width - measured.size.width) / 2.)
            .floor()
            .max(Pixels::ZERO);
    let y = bounds.origin.y + ((bounds.size.height - measured.size.height) / 2.).floor();
    point(x, y)
}
