//! Affine transforms for placing images and rotated text.

use crate::units::*;
use pdf_writer::Content;

/// A PDF transformation matrix `[a b c d e f]`:
/// ```text
/// | a  b  0 |
/// | c  d  0 |
/// | e  f  1 |
/// ```
///
/// Transforms chained with [`then`](Transform::then) apply in the order
/// they're chained, so `Transform::rotate(r).with_translate(x, y)` rotates
/// about the origin and then moves the result to `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Transform {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Transform {
    pub fn identity() -> Self {
        Transform {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }

    pub fn translate(x: Pt, y: Pt) -> Self {
        Transform {
            e: *x,
            f: *y,
            ..Transform::identity()
        }
    }

    pub fn scale(sx: f32, sy: f32) -> Self {
        Transform {
            a: sx,
            d: sy,
            ..Transform::identity()
        }
    }

    /// Counter-clockwise rotation by `degrees`
    pub fn rotate(degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Transform {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: 0.0,
            f: 0.0,
        }
    }

    /// Apply `self`, then `other`
    pub fn then(self, other: Transform) -> Self {
        Transform {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    pub fn with_translate(self, x: Pt, y: Pt) -> Self {
        self.then(Transform::translate(x, y))
    }

    pub fn write_to_content(&self, content: &mut Content) {
        content.transform([self.a, self.b, self.c, self.d, self.e, self.f]);
    }
}
