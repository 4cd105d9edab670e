//! Single-line label text with inline markup.
//!
//! A [`MarkupText`] holds a string in a small subset of Pango markup
//! (`<b>`, `<i>`, `<u>`, `<s>`, `<tt>`, `<big>`, `<small>` and `<span>`
//! with attributes), extended with the label convention that a single `&`
//! marks the next character as the keyboard mnemonic. It can measure
//! itself against any [`DrawingSurface`] and draw itself centered in a
//! rectangle, either directly or through a window's native item-text
//! facility.
//!
//! ```ignore
//! let text = MarkupText::new("Cut <b>&here</b>");
//! let measured = text.measure(surface)?;
//! text.render(surface, bounds, RenderFlags::SHOW_ACCELS)?;
//! ```
//!
//! The markup grammar itself lives in [`markup`], which can be used on its
//! own to parse a string into styled runs.

mod color;
mod font;
mod geometry;
pub mod markup;
mod surface;
#[cfg(any(test, feature = "test-support"))]
pub mod test_surface;
mod text;

pub use color::*;
pub use font::*;
pub use geometry::*;
pub use markup::{MarkupRun, MarkupStyle, ParsedMarkup};
pub use surface::{DrawingSurface, ItemState, ItemTextRenderer};
#[cfg(any(test, feature = "test-support"))]
pub use test_surface::{DrawCall, ItemTextCall, TestSurface, TestWindow};
pub use text::*;
