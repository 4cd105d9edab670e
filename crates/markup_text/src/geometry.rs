use derive_more::{Add, AddAssign, Div, Sub, SubAssign};
use std::{
    cmp,
    fmt::{self, Debug, Display},
    hash::{Hash, Hasher},
    ops::{Add, Mul},
};

/// A length in pixels. This is the only unit the crate deals in; the surface
/// is expected to hand back extents and metrics in the same space.
#[derive(Clone, Copy, Default, Add, AddAssign, Sub, SubAssign, Div, PartialEq)]
#[repr(transparent)]
pub struct Pixels(pub f32);

/// Construct a [`Pixels`] value.
pub const fn px(pixels: f32) -> Pixels {
    Pixels(pixels)
}

impl Pixels {
    /// Zero pixels.
    pub const ZERO: Pixels = Pixels(0.0);

    /// Round down to the nearest whole pixel.
    pub fn floor(&self) -> Self {
        Self(self.0.floor())
    }

    /// Round up to the nearest whole pixel.
    pub fn ceil(&self) -> Self {
        Self(self.0.ceil())
    }

    /// Round to the nearest whole pixel.
    pub fn round(&self) -> Self {
        Self(self.0.round())
    }

    /// The absolute value.
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Whether this value is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

impl Mul<f32> for Pixels {
    type Output = Pixels;

    fn mul(self, other: f32) -> Pixels {
        Pixels(self.0 * other)
    }
}

impl Mul<Pixels> for f32 {
    type Output = Pixels;

    fn mul(self, other: Pixels) -> Pixels {
        Pixels(self * other.0)
    }
}

impl Eq for Pixels {}

impl PartialOrd for Pixels {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pixels {
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hash for Pixels {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.0.to_bits());
    }
}

impl Display for Pixels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px", self.0)
    }
}

impl Debug for Pixels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} px", self.0)
    }
}

impl From<Pixels> for f32 {
    fn from(pixels: Pixels) -> Self {
        pixels.0
    }
}

/// A position in a 2D coordinate space.
#[derive(Clone, Copy, Default, Add, Sub, Debug, PartialEq, Eq, Hash)]
#[repr(C)]
pub struct Point<T: Clone + Debug + Default + PartialEq> {
    pub x: T,
    pub y: T,
}

/// Construct a [`Point`].
pub const fn point<T: Clone + Debug + Default + PartialEq>(x: T, y: T) -> Point<T> {
    Point { x, y }
}

/// A 2D extent.
#[derive(Clone, Copy, Default, Add, Sub, Debug, PartialEq, Eq, Hash)]
#[repr(C)]
pub struct Size<T: Clone + Debug + Default + PartialEq> {
    pub width: T,
    pub height: T,
}

/// Construct a [`Size`].
pub const fn size<T: Clone + Debug + Default + PartialEq>(width: T, height: T) -> Size<T> {
    Size { width, height }
}

/// An axis-aligned rectangle, defined by its upper-left origin and its extent.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash)]
#[repr(C)]
pub struct Bounds<T: Clone + Debug + Default + PartialEq> {
    pub origin: Point<T>,
    pub size: Size<T>,
}

/// Construct a [`Bounds`].
pub const fn bounds<T: Clone + Debug + Default + PartialEq>(
    origin: Point<T>,
    size: Size<T>,
) -> Bounds<T> {
    Bounds { origin, size }
}

impl<T> Bounds<T>
where
    T: Clone + Debug + Default + PartialEq + Copy + Add<T, Output = T>,
{
    /// The x coordinate of the right edge.
    pub fn right(&self) -> T {
        self.origin.x + self.size.width
    }

    /// The y coordinate of the bottom edge.
    pub fn bottom(&self) -> T {
        self.origin.y + self.size.height
    }
}

impl Bounds<Pixels> {
    /// The center of the rectangle.
    pub fn center(&self) -> Point<Pixels> {
        point(
            self.origin.x + self.size.width / 2.,
            self.origin.y + self.size.height / 2.,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixels_arithmetic() {
        assert_eq!(px(3.) + px(4.5), px(7.5));
        assert_eq!(px(10.) - px(4.), px(6.));
        assert_eq!(px(10.) * 1.5, px(15.));
        assert_eq!(2. * px(8.), px(16.));
        assert_eq!(px(9.) / 2., px(4.5));
        assert_eq!(px(2.5).floor(), px(2.));
        assert_eq!(px(-0.5).floor(), px(-1.));
        assert_eq!(px(2.5).ceil(), px(3.));
        assert_eq!(px(2.4).round(), px(2.));
        assert_eq!(px(-3.5).abs(), px(3.5));
        assert_eq!(px(2.5).max(px(3.)), px(3.));
        assert_eq!(px(2.5).min(px(3.)), px(2.5));
        assert_eq!(f32::from(px(7.)), 7.);
        assert!(Pixels::ZERO.is_zero());
    }

    #[test]
    fn test_bounds_edges() {
        let bounds = bounds(point(px(10.), px(20.)), size(px(100.), px(40.)));
        assert_eq!(bounds.right(), px(110.));
        assert_eq!(bounds.bottom(), px(60.));
        assert_eq!(bounds.center(), point(px(60.), px(40.)));
    }
}
