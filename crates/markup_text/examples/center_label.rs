//! Measures and renders a marked-up label centered in a rectangle, printing
//! every call the renderer makes against a stand-in surface with
//! fixed-width metrics.

use markup_text::{
    Bounds, DrawingSurface, Font, FontMetrics, FontWeight, Hsla, MarkupText, Pixels, Point,
    RenderFlags, Size, black, bounds, font, point, px, size,
};

struct DemoSurface {
    font: Font,
    color: Hsla,
}

impl DrawingSurface for DemoSurface {
    fn font(&self) -> Font {
        self.font.clone()
    }

    fn set_font(&mut self, font: &Font) {
        self.font = font.clone();
    }

    fn text_color(&self) -> Hsla {
        self.color
    }

    fn set_text_color(&mut self, color: Hsla) {
        self.color = color;
    }

    fn text_extent(&self, text: &str) -> Size<Pixels> {
        size(
            self.font.size * 0.6 * text.chars().count() as f32,
            self.font.size * 1.2,
        )
    }

    fn font_metrics(&self) -> FontMetrics {
        FontMetrics {
            ascent: self.font.size,
            descent: self.font.size * 0.2,
            internal_leading: self.font.size * 0.1,
            external_leading: px(0.),
        }
    }

    fn draw_text(&mut self, text: &str, origin: Point<Pixels>, mnemonic: Option<usize>) {
        let weight = if self.font.weight >= FontWeight::BOLD {
            "bold"
        } else {
            "regular"
        };
        println!(
            "  draw {text:?} at ({}, {}), {} {weight} {} {}, color {}",
            origin.x, origin.y, self.font.style, self.font.size, self.font.family, self.color
        );
        if let Some(offset) = mnemonic {
            println!("    underline the mnemonic at byte {offset}");
        }
    }

    fn draw_background(&mut self, bounds: Bounds<Pixels>, color: Hsla) {
        println!(
            "  fill {}x{} at ({}, {}) with {}",
            bounds.size.width, bounds.size.height, bounds.origin.x, bounds.origin.y, color
        );
    }
}

fn main() -> anyhow::Result<()> {
    let mut surface = DemoSurface {
        font: font("Helvetica").with_size(px(16.)),
        color: black(),
    };
    let area = bounds(point(px(0.), px(0.)), size(px(480.), px(48.)));

    let mut label = MarkupText::new(
        "Save <b>&all</b> <span foreground='red' background='yellow' size='larger' style='italic'>unsaved</span> files",
    );
    let measured = label.measure(&mut surface)?;
    println!(
        "measured {} x {}, visible height {}",
        measured.size.width, measured.size.height, measured.visible_height
    );

    println!("rendering with mnemonics shown:");
    label.render(&mut surface, area, RenderFlags::SHOW_ACCELS)?;

    label.set_markup_text("Fish & Chips");
    println!("rendering {:?} (mnemonics escaped):", label.markup());
    label.render(&mut surface, area, RenderFlags::SHOW_ACCELS)?;

    Ok(())
}
