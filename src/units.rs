//! Physical units used for all page geometry.
//!
//! Everything on the page is ultimately expressed in [Pt] (1/72 of an inch),
//! the native coordinate unit of PDF documents. [Mm] and [In] exist to make
//! layout constants readable and convert losslessly into points.

use derive_more::{Add, AddAssign, Deref, DerefMut, Display, From, Into, Sub, SubAssign, Sum};
use serde::Deserialize;
use std::ops::{Div, Mul};

/// A length in points (1/72 inch)
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Sum,
    Deref,
    DerefMut,
    From,
    Into,
    Display,
    Deserialize,
)]
#[display("{_0}pt")]
#[serde(transparent)]
pub struct Pt(pub f32);

/// A length in millimetres
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, From, Into, Display)]
#[display("{_0}mm")]
pub struct Mm(pub f32);

/// A length in inches
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, From, Into, Display)]
#[display("{_0}in")]
pub struct In(pub f32);

impl From<Mm> for Pt {
    fn from(mm: Mm) -> Self {
        Pt(mm.0 * 72.0 / 25.4)
    }
}

impl From<In> for Pt {
    fn from(inches: In) -> Self {
        Pt(inches.0 * 72.0)
    }
}

impl Mul<f32> for Pt {
    type Output = Pt;

    fn mul(self, rhs: f32) -> Pt {
        Pt(self.0 * rhs)
    }
}

impl Div<f32> for Pt {
    type Output = Pt;

    fn div(self, rhs: f32) -> Pt {
        Pt(self.0 / rhs)
    }
}

/// Dividing two lengths yields a plain ratio
impl Div<Pt> for Pt {
    type Output = f32;

    fn div(self, rhs: Pt) -> f32 {
        self.0 / rhs.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inches_and_millimetres_convert_to_points() {
        assert_eq!(Pt::from(In(1.0)), Pt(72.0));
        assert!((*Pt::from(Mm(25.4)) - 72.0).abs() < 1e-4);
    }

    #[test]
    fn arithmetic_stays_in_points() {
        let a = Pt(10.0) + Pt(5.0) - Pt(3.0);
        assert_eq!(a, Pt(12.0));
        assert_eq!(a * 2.0, Pt(24.0));
        assert_eq!(a / 4.0, Pt(3.0));
        assert_eq!(Pt(9.0) / Pt(3.0), 3.0);
        let total: Pt = [Pt(1.0), Pt(2.0)].into_iter().sum();
        assert_eq!(total, Pt(3.0));
    }
}
