use crate::units::Pt;
use serde::Deserialize;

/// Margins frame the printable area of the certificate. Nothing prevents
/// content from crossing them: they position the border and act as the
/// reference edges for the layout.
#[derive(Debug, Default, Clone, Copy, PartialEq, Deserialize)]
pub struct Margins {
    pub top: Pt,
    pub right: Pt,
    pub bottom: Pt,
    pub left: Pt,
}

impl Margins {
    /// Create margins where all values are equal
    pub fn all<D: Into<Pt>>(value: D) -> Margins {
        let value: Pt = value.into();
        Margins {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}
