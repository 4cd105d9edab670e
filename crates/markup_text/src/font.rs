use crate::geometry::{Pixels, px};
use std::{
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

/// Construct a [`Font`] with the given family name and default settings.
pub fn font(family: impl Into<Arc<str>>) -> Font {
    Font {
        family: family.into(),
        size: px(14.),
        weight: FontWeight::default(),
        style: FontStyle::default(),
        underline: false,
        strikethrough: false,
    }
}

/// The degree of blackness or stroke thickness of a font, from 100.0 to 900.0.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct FontWeight(pub f32);

impl Default for FontWeight {
    #[inline]
    fn default() -> FontWeight {
        FontWeight::NORMAL
    }
}

impl Hash for FontWeight {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.0.to_bits());
    }
}

impl Eq for FontWeight {}

impl FontWeight {
    /// Thin weight (100), the thinnest value.
    pub const THIN: FontWeight = FontWeight(100.0);
    /// Extra light weight (200).
    pub const EXTRA_LIGHT: FontWeight = FontWeight(200.0);
    /// Light weight (300).
    pub const LIGHT: FontWeight = FontWeight(300.0);
    /// Normal (400).
    pub const NORMAL: FontWeight = FontWeight(400.0);
    /// Medium weight (500, higher than normal).
    pub const MEDIUM: FontWeight = FontWeight(500.0);
    /// Semibold weight (600, similar to bold).
    pub const SEMIBOLD: FontWeight = FontWeight(600.0);
    /// Bold weight (700).
    pub const BOLD: FontWeight = FontWeight(700.0);
    /// Extra-bold weight (800).
    pub const EXTRA_BOLD: FontWeight = FontWeight(800.0);
    /// Black weight (900), the thickest value.
    pub const BLACK: FontWeight = FontWeight(900.0);
}

/// Allows italic or oblique faces to be selected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontStyle {
    /// A face that is neither italic not obliqued.
    #[default]
    Normal,
    /// A form that is generally cursive in nature.
    Italic,
    /// A typically-sloped version of the regular face.
    Oblique,
}

impl fmt::Display for FontStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontStyle::Normal => write!(f, "normal"),
            FontStyle::Italic => write!(f, "italic"),
            FontStyle::Oblique => write!(f, "oblique"),
        }
    }
}

/// The settings under which the surface selects and measures text.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Font {
    /// The font family name.
    pub family: Arc<str>,

    /// The size of the font in pixels.
    pub size: Pixels,

    /// The font weight.
    pub weight: FontWeight,

    /// The font style.
    pub style: FontStyle,

    /// Whether the text is drawn with an underline.
    pub underline: bool,

    /// Whether the text is drawn struck through.
    pub strikethrough: bool,
}

impl Font {
    /// Set this font to a bold weight.
    pub fn bold(mut self) -> Self {
        self.weight = FontWeight::BOLD;
        self
    }

    /// Set this font to an italic style.
    pub fn italic(mut self) -> Self {
        self.style = FontStyle::Italic;
        self
    }

    /// Set this font to be underlined.
    pub fn underlined(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Set this font to be struck through.
    pub fn struck_through(mut self) -> Self {
        self.strikethrough = true;
        self
    }

    /// Set the size of this font in pixels.
    pub fn with_size(mut self, size: Pixels) -> Self {
        self.size = size;
        self
    }
}

/// A font size that is either absolute or a multiple of the inherited size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FontSize {
    /// The size in pixels.
    Absolute(Pixels),
    /// A multiple of the inherited font size.
    Scaled(f32),
}

impl FontSize {
    /// Resolve this size against the size it would otherwise inherit.
    pub fn resolve(&self, base: Pixels) -> Pixels {
        match self {
            FontSize::Absolute(size) => *size,
            FontSize::Scaled(factor) => base * *factor,
        }
    }

    /// Scale this size by an additional factor.
    pub fn scale(&self, factor: f32) -> Self {
        match self {
            FontSize::Absolute(size) => FontSize::Absolute(*size * factor),
            FontSize::Scaled(base_factor) => FontSize::Scaled(base_factor * factor),
        }
    }
}

/// The vertical metrics of a font, as reported by the drawing surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FontMetrics {
    /// Distance from the baseline to the top of the tallest glyphs.
    pub ascent: Pixels,

    /// Distance from the baseline to the bottom of the lowest descenders.
    pub descent: Pixels,

    /// Space above the glyphs that the font reserves inside the ascent,
    /// used for accents on capitals. Zero for many fonts.
    pub internal_leading: Pixels,

    /// Extra space the font recommends between lines, outside the
    /// character cell.
    pub external_leading: Pixels,
}

impl FontMetrics {
    /// The height of the character cell.
    pub fn height(&self) -> Pixels {
        self.ascent + self.descent
    }

    /// The height of the part of the cell that glyphs actually occupy,
    /// excluding the internal leading.
    pub fn visible_height(&self) -> Pixels {
        self.ascent - self.internal_leading
    }
}
