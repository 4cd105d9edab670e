//! Parser for the markup language accepted by label text: a small subset of
//! Pango markup (`<b>`, `<i>`, `<u>`, `<s>`, `<tt>`, `<big>`, `<small>` and
//! `<span>` with attributes, plus the five XML entities), extended with the
//! label mnemonic convention where a single `&` marks the following character
//! as the keyboard accelerator and `&&` is a literal ampersand.

use crate::color::{Hsla, parse_color};
use crate::font::{Font, FontSize, FontStyle, FontWeight};
use crate::geometry::px;
use anyhow::{Context as _, Result, bail};
use std::sync::Arc;

/// The factor by which `<big>` and `<small>` (and the relative `size`
/// attribute values) step the font size.
const SIZE_STEP: f32 = 1.2;

const XML_ENTITIES: [(&str, char); 5] = [
    ("amp;", '&'),
    ("lt;", '<'),
    ("gt;", '>'),
    ("apos;", '\''),
    ("quot;", '"'),
];

/// The style overrides accumulated by the markup spans enclosing a run.
/// Every field is optional; `None` means the run inherits the corresponding
/// property from the base font or surface.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MarkupStyle {
    /// The font weight, from `<b>` or the span `weight` attribute.
    pub font_weight: Option<FontWeight>,
    /// The font style, from `<i>` or the span `style` attribute.
    pub font_style: Option<FontStyle>,
    /// Whether to underline, from `<u>` or the span `underline` attribute.
    pub underline: Option<bool>,
    /// Whether to strike through, from `<s>` or the span `strikethrough`
    /// attribute.
    pub strikethrough: Option<bool>,
    /// The font size, from `<big>`, `<small>` or the span `size` attribute.
    pub size: Option<FontSize>,
    /// The font family, from `<tt>` or the span `face` attribute.
    pub family: Option<Arc<str>>,
    /// The text color.
    pub color: Option<Hsla>,
    /// The color drawn behind the run.
    pub background_color: Option<Hsla>,
}

impl MarkupStyle {
    /// Whether this style overrides nothing.
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }

    /// Overlay `other` on this style, producing the style of text nested
    /// inside both spans. Properties set in `other` win.
    pub fn highlight(&self, other: &MarkupStyle) -> MarkupStyle {
        MarkupStyle {
            font_weight: other.font_weight.or(self.font_weight),
            font_style: other.font_style.or(self.font_style),
            underline: other.underline.or(self.underline),
            strikethrough: other.strikethrough.or(self.strikethrough),
            size: other.size.or(self.size),
            family: other.family.clone().or_else(|| self.family.clone()),
            color: other.color.or(self.color),
            background_color: other.background_color.or(self.background_color),
        }
    }

    /// Resolve the font this style selects when drawn over `base`.
    pub fn apply(&self, base: &Font) -> Font {
        let mut font = base.clone();
        if let Some(weight) = self.font_weight {
            font.weight = weight;
        }
        if let Some(style) = self.font_style {
            font.style = style;
        }
        if let Some(underline) = self.underline {
            font.underline = underline;
        }
        if let Some(strikethrough) = self.strikethrough {
            font.strikethrough = strikethrough;
        }
        if let Some(size) = self.size {
            font.size = size.resolve(base.size);
        }
        if let Some(family) = &self.family {
            font.family = family.clone();
        }
        font
    }
}

/// A maximal span of text rendered with a single style.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkupRun {
    /// The length of the run in UTF-8 bytes.
    pub len: usize,
    /// The style of the run.
    pub style: MarkupStyle,
}

/// The result of parsing a markup string: the text with all tags, entities
/// and mnemonic markers resolved, styled runs covering it exactly, and the
/// position of the mnemonic character if one was designated.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedMarkup {
    /// The text to render.
    pub text: String,
    /// Styled runs covering `text`, in order.
    pub runs: Vec<MarkupRun>,
    /// Byte offset into `text` of the mnemonic character, always on a char
    /// boundary. A run boundary falls here, so the mnemonic character starts
    /// its run.
    pub mnemonic: Option<usize>,
}

impl ParsedMarkup {
    /// Iterate over the runs as substrings of the text paired with their
    /// styles.
    pub fn iter_runs(&self) -> impl Iterator<Item = (&str, &MarkupStyle)> + '_ {
        let mut offset = 0;
        self.runs.iter().map(move |run| {
            let text = &self.text[offset..offset + run.len];
            offset += run.len;
            (text, &run.style)
        })
    }
}

/// Parse a markup string.
pub fn parse(markup: &str) -> Result<ParsedMarkup> {
    let mut parser = Parser {
        source: markup,
        offset: 0,
        text: String::with_capacity(markup.len()),
        runs: Vec::new(),
        mnemonic: None,
        mnemonic_pending: false,
        open_tags: Vec::new(),
    };
    while let Some(c) = parser.bump() {
        match c {
            '<' => parser.tag()?,
            '&' => parser.ampersand()?,
            _ => parser.push_char(c),
        }
    }
    if let Some(tag) = parser.open_tags.last() {
        bail!("unclosed <{}> tag in markup '{markup}'", tag.name);
    }
    if parser.mnemonic_pending {
        // A marker that never found a character to mark, i.e. a trailing
        // lone '&'. Keep it as literal text.
        parser.mnemonic_pending = false;
        parser.push_char('&');
    }
    Ok(ParsedMarkup {
        text: parser.text,
        runs: parser.runs,
        mnemonic: parser.mnemonic,
    })
}

/// Double every `&` in `text` so that, when parsed as markup, no character
/// is interpreted as a mnemonic marker.
pub fn escape_mnemonics(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '&' {
            escaped.push('&');
        }
        escaped.push(c);
    }
    escaped
}

struct Parser<'a> {
    source: &'a str,
    offset: usize,
    text: String,
    runs: Vec<MarkupRun>,
    mnemonic: Option<usize>,
    mnemonic_pending: bool,
    open_tags: Vec<OpenTag<'a>>,
}

struct OpenTag<'a> {
    name: &'a str,
    /// The tag's style composed over everything it is nested in.
    style: MarkupStyle,
}

impl<'a> Parser<'a> {
    fn rest(&self) -> &'a str {
        &self.source[self.offset..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.offset += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, prefix: &str) -> bool {
        if self.rest().starts_with(prefix) {
            self.offset += prefix.len();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        self.offset = self.source.len() - self.rest().trim_start().len();
    }

    fn current_style(&self) -> MarkupStyle {
        self.open_tags
            .last()
            .map(|tag| tag.style.clone())
            .unwrap_or_default()
    }

    fn push_char(&mut self, c: char) {
        let offset = self.text.len();
        if self.mnemonic_pending {
            self.mnemonic_pending = false;
            if self.mnemonic.is_none() {
                self.mnemonic = Some(offset);
            }
        }
        let style = self.current_style();
        match self.runs.last_mut() {
            // The mnemonic character starts its own run even when the style
            // does not change.
            Some(run) if run.style == style && self.mnemonic != Some(offset) => {
                run.len += c.len_utf8();
            }
            _ => self.runs.push(MarkupRun {
                len: c.len_utf8(),
                style,
            }),
        }
        self.text.push(c);
    }

    /// Handle a '&', which is either an escaped '&&', an entity, or a
    /// mnemonic marker applying to the next character. Only the first marker
    /// designates the mnemonic; later ones are dropped, except that a marker
    /// still unspent when the input ends is kept as a literal ampersand.
    fn ampersand(&mut self) -> Result<()> {
        if self.eat("&") {
            self.push_char('&');
            return Ok(());
        }
        for (entity, decoded) in XML_ENTITIES {
            if self.eat(entity) {
                self.push_char(decoded);
                return Ok(());
            }
        }
        if self.eat("#") {
            return self.character_reference();
        }
        self.mnemonic_pending = true;
        Ok(())
    }

    /// Decode a numeric character reference, decimal `&#228;` or
    /// hexadecimal `&#xe4;`.
    fn character_reference(&mut self) -> Result<()> {
        let hex = self.eat("x") || self.eat("X");
        let rest = self.rest();
        let digits_len = rest
            .find(|c: char| {
                if hex {
                    !c.is_ascii_hexdigit()
                } else {
                    !c.is_ascii_digit()
                }
            })
            .unwrap_or(rest.len());
        let digits = &rest[..digits_len];
        self.offset += digits_len;
        if digits.is_empty() {
            bail!("malformed character reference in markup '{}'", self.source);
        }
        if !self.eat(";") {
            bail!("unterminated entity in markup '{}'", self.source);
        }
        let code = u32::from_str_radix(digits, if hex { 16 } else { 10 })
            .with_context(|| format!("invalid character reference '&#{digits};'"))?;
        let decoded = char::from_u32(code)
            .with_context(|| format!("invalid character code {code} in markup"))?;
        self.push_char(decoded);
        Ok(())
    }

    fn tag(&mut self) -> Result<()> {
        let closing = self.eat("/");
        let rest = self.rest();
        let name_len = rest
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(rest.len());
        let name = &rest[..name_len];
        if name.is_empty() {
            bail!("expected a tag name after '<' in markup '{}'", self.source);
        }
        self.offset += name_len;

        if closing {
            self.skip_whitespace();
            if !self.eat(">") {
                bail!("missing '>' after '</{name}' in markup '{}'", self.source);
            }
            let Some(tag) = self.open_tags.pop() else {
                bail!("closing tag </{name}> without a matching opening tag");
            };
            if tag.name != name {
                bail!("closing tag </{name}> inside <{}>", tag.name);
            }
            return Ok(());
        }

        let style = match name {
            "b" => MarkupStyle {
                font_weight: Some(FontWeight::BOLD),
                ..Default::default()
            },
            "i" => MarkupStyle {
                font_style: Some(FontStyle::Italic),
                ..Default::default()
            },
            "u" => MarkupStyle {
                underline: Some(true),
                ..Default::default()
            },
            "s" => MarkupStyle {
                strikethrough: Some(true),
                ..Default::default()
            },
            "tt" => MarkupStyle {
                family: Some("monospace".into()),
                ..Default::default()
            },
            "big" => MarkupStyle {
                size: Some(self.scaled_size(SIZE_STEP)),
                ..Default::default()
            },
            "small" => MarkupStyle {
                size: Some(self.scaled_size(1. / SIZE_STEP)),
                ..Default::default()
            },
            "span" => self.span_attributes()?,
            _ => bail!("unknown tag <{name}> in markup '{}'", self.source),
        };
        if name != "span" {
            self.skip_whitespace();
            if !self.eat(">") {
                bail!("missing '>' after '<{name}' in markup '{}'", self.source);
            }
        }
        self.open_tags.push(OpenTag {
            name,
            style: self.current_style().highlight(&style),
        });
        Ok(())
    }

    /// Parse the attributes of a `<span>` tag, consuming through the
    /// closing '>'.
    fn span_attributes(&mut self) -> Result<MarkupStyle> {
        let mut style = MarkupStyle::default();
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('>') => {
                    self.bump();
                    return Ok(style);
                }
                None => bail!("missing '>' at the end of a <span> tag"),
                Some(_) => {}
            }

            let rest = self.rest();
            let name_len = rest
                .find(|c: char| !c.is_ascii_alphanumeric() && c != '_')
                .unwrap_or(rest.len());
            let name = &rest[..name_len];
            if name.is_empty() {
                bail!("malformed attribute in <span> near '{rest}'");
            }
            self.offset += name_len;

            self.skip_whitespace();
            if !self.eat("=") {
                bail!("missing '=' after the '{name}' attribute in <span>");
            }
            self.skip_whitespace();
            let quote = match self.bump() {
                Some(quote @ ('"' | '\'')) => quote,
                _ => bail!("expected a quoted value for the '{name}' attribute in <span>"),
            };
            let Some(value_len) = self.rest().find(quote) else {
                bail!("unterminated value for the '{name}' attribute in <span>");
            };
            let value = &self.rest()[..value_len];
            self.offset += value_len + 1;
            self.apply_attribute(&mut style, name, value)?;
        }
    }

    fn apply_attribute(&self, style: &mut MarkupStyle, name: &str, value: &str) -> Result<()> {
        match name {
            "foreground" | "fgcolor" | "color" => {
                style.color = Some(
                    parse_color(value)
                        .with_context(|| format!("in the '{name}' attribute of <span>"))?,
                );
            }
            "background" | "bgcolor" => {
                style.background_color = Some(
                    parse_color(value)
                        .with_context(|| format!("in the '{name}' attribute of <span>"))?,
                );
            }
            "face" | "font_family" => style.family = Some(value.into()),
            "weight" => style.font_weight = Some(parse_weight(value)?),
            "style" => {
                style.font_style = Some(match value {
                    "normal" => FontStyle::Normal,
                    "italic" => FontStyle::Italic,
                    "oblique" => FontStyle::Oblique,
                    _ => bail!("unknown font style '{value}' in <span>"),
                });
            }
            "underline" => {
                style.underline = Some(match value {
                    "none" => false,
                    "single" => true,
                    _ => bail!("unsupported underline '{value}' in <span>"),
                });
            }
            "strikethrough" => {
                style.strikethrough = Some(match value {
                    "true" => true,
                    "false" => false,
                    _ => bail!("invalid strikethrough '{value}' in <span>"),
                });
            }
            "size" => style.size = Some(self.parse_size(value)?),
            _ => log::warn!("ignoring unknown <span> attribute '{name}'"),
        }
        Ok(())
    }

    /// A size scaled by `factor` relative to the size inherited at this
    /// point in the markup.
    fn scaled_size(&self, factor: f32) -> FontSize {
        match self.current_style().size {
            Some(size) => size.scale(factor),
            None => FontSize::Scaled(factor),
        }
    }

    fn parse_size(&self, value: &str) -> Result<FontSize> {
        let size = match value {
            "xx-small" => FontSize::Scaled(1. / (SIZE_STEP * SIZE_STEP * SIZE_STEP)),
            "x-small" => FontSize::Scaled(1. / (SIZE_STEP * SIZE_STEP)),
            "small" => FontSize::Scaled(1. / SIZE_STEP),
            "medium" => FontSize::Scaled(1.),
            "large" => FontSize::Scaled(SIZE_STEP),
            "x-large" => FontSize::Scaled(SIZE_STEP * SIZE_STEP),
            "xx-large" => FontSize::Scaled(SIZE_STEP * SIZE_STEP * SIZE_STEP),
            "smaller" => self.scaled_size(1. / SIZE_STEP),
            "larger" => self.scaled_size(SIZE_STEP),
            _ => {
                // A number in 1024ths of a point, converted to pixels at
                // 96 dpi.
                let units = value
                    .parse::<u32>()
                    .with_context(|| format!("invalid size '{value}' in <span>"))?;
                FontSize::Absolute(px(units as f32 / 768.))
            }
        };
        Ok(size)
    }
}

fn parse_weight(value: &str) -> Result<FontWeight> {
    let weight = match value {
        "thin" => FontWeight::THIN,
        "ultralight" => FontWeight::EXTRA_LIGHT,
        "light" => FontWeight::LIGHT,
        "normal" => FontWeight::NORMAL,
        "medium" => FontWeight::MEDIUM,
        "semibold" => FontWeight::SEMIBOLD,
        "bold" => FontWeight::BOLD,
        "ultrabold" => FontWeight::EXTRA_BOLD,
        "heavy" => FontWeight::BLACK,
        _ => FontWeight(
            value
                .parse::<f32>()
                .with_context(|| format!("invalid weight '{value}' in <span>"))?,
        ),
    };
    Ok(weight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{blue, red};
    use pretty_assertions::assert_eq;
    use rand::{Rng as _, SeedableRng as _, rngs::StdRng, seq::SliceRandom as _};

    fn plain(len: usize) -> MarkupRun {
        MarkupRun {
            len,
            style: MarkupStyle::default(),
        }
    }

    fn bold() -> MarkupStyle {
        MarkupStyle {
            font_weight: Some(FontWeight::BOLD),
            ..Default::default()
        }
    }

    #[test]
    fn test_plain_text() {
        let parsed = parse("Hello").unwrap();
        assert_eq!(parsed.text, "Hello");
        assert_eq!(parsed.runs, vec![plain(5)]);
        assert_eq!(parsed.mnemonic, None);
    }

    #[test]
    fn test_empty_markup() {
        let parsed = parse("").unwrap();
        assert_eq!(parsed.text, "");
        assert_eq!(parsed.runs, vec![]);
        assert_eq!(parsed.mnemonic, None);
    }

    #[test]
    fn test_simple_tags() {
        let parsed = parse("a<b>bc</b>d").unwrap();
        assert_eq!(parsed.text, "abcd");
        assert_eq!(
            parsed.runs,
            vec![
                plain(1),
                MarkupRun {
                    len: 2,
                    style: bold()
                },
                plain(1),
            ]
        );
    }

    #[test]
    fn test_nested_styles_compose() {
        let parsed = parse("<b>a<i>b</i>c</b>").unwrap();
        assert_eq!(parsed.text, "abc");
        assert_eq!(
            parsed.runs,
            vec![
                MarkupRun {
                    len: 1,
                    style: bold()
                },
                MarkupRun {
                    len: 1,
                    style: MarkupStyle {
                        font_weight: Some(FontWeight::BOLD),
                        font_style: Some(FontStyle::Italic),
                        ..Default::default()
                    },
                },
                MarkupRun {
                    len: 1,
                    style: bold()
                },
            ]
        );
    }

    #[test]
    fn test_adjacent_same_style_runs_merge() {
        let parsed = parse("<b>a</b><b>b</b>").unwrap();
        assert_eq!(parsed.text, "ab");
        assert_eq!(
            parsed.runs,
            vec![MarkupRun {
                len: 2,
                style: bold()
            }]
        );
    }

    #[test]
    fn test_mnemonic_splits_runs() {
        let parsed = parse("Hello &World").unwrap();
        assert_eq!(parsed.text, "Hello World");
        assert_eq!(parsed.runs, vec![plain(6), plain(5)]);
        assert_eq!(parsed.mnemonic, Some(6));
        assert_eq!(
            parsed.iter_runs().map(|(text, _)| text).collect::<Vec<_>>(),
            ["Hello ", "World"]
        );
    }

    #[test]
    fn test_double_ampersand_is_literal() {
        let parsed = parse("&&Save").unwrap();
        assert_eq!(parsed.text, "&Save");
        assert_eq!(parsed.runs, vec![plain(5)]);
        assert_eq!(parsed.mnemonic, None);
    }

    #[test]
    fn test_mnemonic_before_tag() {
        let parsed = parse("&<b>X</b>yz").unwrap();
        assert_eq!(parsed.text, "Xyz");
        assert_eq!(parsed.mnemonic, Some(0));
        assert_eq!(
            parsed.runs,
            vec![
                MarkupRun {
                    len: 1,
                    style: bold()
                },
                plain(2),
            ]
        );
    }

    #[test]
    fn test_only_first_marker_counts() {
        let parsed = parse("&a &b").unwrap();
        assert_eq!(parsed.text, "a b");
        assert_eq!(parsed.mnemonic, Some(0));
        assert_eq!(parsed.runs, vec![plain(3)]);
    }

    #[test]
    fn test_trailing_ampersand_is_literal() {
        let parsed = parse("Save &").unwrap();
        assert_eq!(parsed.text, "Save &");
        assert_eq!(parsed.runs, vec![plain(6)]);
        assert_eq!(parsed.mnemonic, None);
    }

    #[test]
    fn test_entities() {
        let parsed = parse("&lt;b&gt; &amp; &quot;q&quot; &apos;").unwrap();
        assert_eq!(parsed.text, "<b> & \"q\" '");
        assert_eq!(parsed.runs, vec![plain(11)]);
        assert_eq!(parsed.mnemonic, None);
    }

    #[test]
    fn test_amp_entity_is_not_a_marker() {
        let parsed = parse("&amp;x").unwrap();
        assert_eq!(parsed.text, "&x");
        assert_eq!(parsed.mnemonic, None);
    }

    #[test]
    fn test_numeric_character_references() {
        let parsed = parse("&#65;&#x42;&#228;").unwrap();
        assert_eq!(parsed.text, "ABä");
        assert_eq!(parsed.mnemonic, None);

        assert!(
            parse("&#65")
                .unwrap_err()
                .to_string()
                .contains("unterminated entity")
        );
        assert!(parse("&#;").is_err());
        assert!(parse("&#xZZ;").is_err());
        assert!(parse("&#1114112;").is_err());
    }

    #[test]
    fn test_mnemonic_on_multibyte_char() {
        let parsed = parse("ab &über").unwrap();
        assert_eq!(parsed.text, "ab über");
        assert_eq!(parsed.mnemonic, Some(3));
        assert_eq!(parsed.runs, vec![plain(3), plain(5)]);
    }

    #[test]
    fn test_unknown_tag() {
        let error = parse("<blink>x</blink>").unwrap_err();
        assert!(error.to_string().contains("unknown tag <blink>"));
    }

    #[test]
    fn test_mismatched_tags() {
        assert!(parse("<b>x</i>").unwrap_err().to_string().contains("</i>"));
        assert!(
            parse("<b>x")
                .unwrap_err()
                .to_string()
                .contains("unclosed <b>")
        );
        assert!(
            parse("x</b>")
                .unwrap_err()
                .to_string()
                .contains("without a matching")
        );
        assert!(parse("a < b").is_err());
        assert!(parse("<b").is_err());
    }

    #[test]
    fn test_span_colors() {
        let parsed = parse(r##"<span foreground='red' background="#0000ff">x</span>"##).unwrap();
        let style = &parsed.runs[0].style;
        assert_eq!(style.color, Some(red()));
        assert_eq!(style.background_color, Some(blue()));
    }

    #[test]
    fn test_span_attribute_aliases() {
        let parsed = parse("<span fgcolor='red' bgcolor='blue' font_family='Courier'>x</span>")
            .unwrap();
        let style = &parsed.runs[0].style;
        assert_eq!(style.color, Some(red()));
        assert_eq!(style.background_color, Some(blue()));
        assert_eq!(style.family.as_deref(), Some("Courier"));

        let parsed = parse("<span color='red' face='Courier New'>x</span>").unwrap();
        let style = &parsed.runs[0].style;
        assert_eq!(style.color, Some(red()));
        assert_eq!(style.family.as_deref(), Some("Courier New"));
    }

    #[test]
    fn test_span_weight() {
        let parsed = parse("<span weight='semibold'>x</span>").unwrap();
        assert_eq!(parsed.runs[0].style.font_weight, Some(FontWeight::SEMIBOLD));

        let parsed = parse("<span weight='thin'>x</span>").unwrap();
        assert_eq!(parsed.runs[0].style.font_weight, Some(FontWeight::THIN));

        let parsed = parse("<span weight='650'>x</span>").unwrap();
        assert_eq!(parsed.runs[0].style.font_weight, Some(FontWeight(650.)));
    }

    #[test]
    fn test_span_style_flags() {
        let parsed =
            parse("<span style='italic' underline='single' strikethrough='true'>x</span>")
                .unwrap();
        let style = &parsed.runs[0].style;
        assert_eq!(style.font_style, Some(FontStyle::Italic));
        assert_eq!(style.underline, Some(true));
        assert_eq!(style.strikethrough, Some(true));

        let parsed = parse("<span style='oblique' underline='none'>x</span>").unwrap();
        let style = &parsed.runs[0].style;
        assert_eq!(style.font_style, Some(FontStyle::Oblique));
        assert_eq!(style.underline, Some(false));
    }

    #[test]
    fn test_span_numeric_size() {
        let parsed = parse("<span size='12288'>x</span>").unwrap();
        assert_eq!(
            parsed.runs[0].style.size,
            Some(FontSize::Absolute(px(16.)))
        );
    }

    #[test]
    fn test_span_keyword_sizes() {
        let parsed = parse("<span size='large'>x</span>").unwrap();
        assert_eq!(parsed.runs[0].style.size, Some(FontSize::Scaled(SIZE_STEP)));

        let parsed = parse("<span size='smaller'>x</span>").unwrap();
        assert_eq!(
            parsed.runs[0].style.size,
            Some(FontSize::Scaled(1. / SIZE_STEP))
        );
    }

    #[test]
    fn test_size_steps_accumulate() {
        let parsed = parse("<big><big>x</big></big>").unwrap();
        assert_eq!(
            parsed.runs[0].style.size,
            Some(FontSize::Scaled(SIZE_STEP).scale(SIZE_STEP))
        );

        let parsed = parse("<span size='12288'><small>x</small></span>").unwrap();
        assert_eq!(
            parsed.runs[0].style.size,
            Some(FontSize::Absolute(px(16.)).scale(1. / SIZE_STEP))
        );

        // Keyword sizes reset to a factor of the base size instead of
        // scaling the inherited size.
        let parsed = parse("<big><span size='small'>x</span></big>").unwrap();
        assert_eq!(
            parsed.runs[0].style.size,
            Some(FontSize::Scaled(1. / SIZE_STEP))
        );
    }

    #[test]
    fn test_underline_and_strike_tags() {
        let parsed = parse("<u>x</u>").unwrap();
        assert_eq!(parsed.runs[0].style.underline, Some(true));
        assert_eq!(parsed.runs[0].style.strikethrough, None);

        let parsed = parse("<s>x</s>").unwrap();
        assert_eq!(parsed.runs[0].style.strikethrough, Some(true));
        assert_eq!(parsed.runs[0].style.underline, None);

        let parsed = parse("<u><s>x</s></u>").unwrap();
        assert_eq!(parsed.runs[0].style.underline, Some(true));
        assert_eq!(parsed.runs[0].style.strikethrough, Some(true));
    }

    #[test]
    fn test_tt_selects_monospace() {
        let parsed = parse("<tt>x</tt>").unwrap();
        assert_eq!(parsed.runs[0].style.family.as_deref(), Some("monospace"));
    }

    #[test]
    fn test_unknown_span_attribute_is_ignored() {
        let parsed = parse("<span gravity='south' foreground='red'>x</span>").unwrap();
        assert_eq!(parsed.runs[0].style.color, Some(red()));
    }

    #[test]
    fn test_malformed_span_attributes() {
        assert!(parse("<span foreground='notacolor'>x</span>").is_err());
        assert!(parse("<span underline='wavy'>x</span>").is_err());
        assert!(parse("<span strikethrough='yes'>x</span>").is_err());
        assert!(parse("<span weight='heavyish'>x</span>").is_err());
        assert!(parse("<span size='12pt'>x</span>").is_err());
        assert!(parse("<span foreground=red>x</span>").is_err());
        assert!(parse("<span foreground='red>x</span>").is_err());
        assert!(parse("<span foreground>x</span>").is_err());
        assert!(parse("<span foreground='red'").is_err());
    }

    #[test]
    fn test_style_apply() {
        let base = crate::font::font("Sans").with_size(px(14.));
        let style = MarkupStyle {
            font_weight: Some(FontWeight::BOLD),
            size: Some(FontSize::Absolute(px(20.))),
            ..Default::default()
        };
        let font = style.apply(&base);
        assert_eq!(font.family.as_ref(), "Sans");
        assert_eq!(font.weight, FontWeight::BOLD);
        assert_eq!(font.size, px(20.));

        assert_eq!(MarkupStyle::default().apply(&base), base);
    }

    #[test]
    fn test_highlight_overrides() {
        let outer = MarkupStyle {
            color: Some(red()),
            underline: Some(true),
            ..Default::default()
        };
        let inner = MarkupStyle {
            color: Some(blue()),
            ..Default::default()
        };
        let composed = outer.highlight(&inner);
        assert_eq!(composed.color, Some(blue()));
        assert_eq!(composed.underline, Some(true));
        assert!(MarkupStyle::default().is_plain());
        assert!(!composed.is_plain());
    }

    #[test]
    fn test_escape_mnemonics() {
        assert_eq!(escape_mnemonics("a&b"), "a&&b");
        assert_eq!(escape_mnemonics("&&"), "&&&&");
        assert_eq!(escape_mnemonics("plain"), "plain");
    }

    #[test]
    fn test_escape_round_trip() {
        let alphabet = ['a', 'm', 'p', ';', '&', ' ', 'l', 't', '>'];
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..256 {
            let len = rng.gen_range(0..24);
            let text: String = (0..len)
                .map(|_| *alphabet.choose(&mut rng).unwrap())
                .collect();
            let parsed = parse(&escape_mnemonics(&text)).unwrap();
            assert_eq!(parsed.text, text);
            assert_eq!(parsed.mnemonic, None);
        }
    }
}
