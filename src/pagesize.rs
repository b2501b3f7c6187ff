//! Pre-defined page sizes for the paper formats certificates are printed on.
//!
//! All sizes are provided in portrait orientation (width, height) where width ≤ height.
//! Use the [`PageOrientation`](crate::pagesize::PageOrientation) trait to convert between portrait and landscape.
//!
//! # Example
//!
//! ```
//! use medcert::pagesize::{A5, PageOrientation};
//!
//! let landscape = A5.landscape();
//! assert!(landscape.0 > landscape.1);
//! ```

use crate::units::*;

/// Page dimensions as (width, height) in points.
pub type PageSize = (Pt, Pt);

pub const LETTER: PageSize = (Pt(8.5 * 72.0), Pt(11.0 * 72.0));

// iso a-series (converted from mm to points)
pub const A4: PageSize = (Pt(210.0 * 72.0 / 25.4), Pt(297.0 * 72.0 / 25.4));
pub const A5: PageSize = (Pt(148.0 * 72.0 / 25.4), Pt(210.0 * 72.0 / 25.4));

/// Look up a page size by its common name, case-insensitively
pub fn by_name(name: &str) -> Option<PageSize> {
    match name.to_ascii_uppercase().as_str() {
        "A4" => Some(A4),
        "A5" => Some(A5),
        "LETTER" => Some(LETTER),
        _ => None,
    }
}

/// Convert page sizes between portrait and landscape orientations.
pub trait PageOrientation {
    /// Returns the size in portrait orientation (width ≤ height).
    fn portrait(self) -> Self;
    /// Returns the size in landscape orientation (width ≥ height).
    fn landscape(self) -> Self;
}

impl PageOrientation for PageSize {
    fn portrait(self) -> Self {
        if self.0 <= self.1 {
            self
        } else {
            (self.1, self.0)
        }
    }

    fn landscape(self) -> PageSize {
        if self.0 >= self.1 {
            self
        } else {
            (self.1, self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_resolve_case_insensitively() {
        assert_eq!(by_name("a5"), Some(A5));
        assert_eq!(by_name("Letter"), Some(LETTER));
        assert_eq!(by_name("B5"), None);
    }

    #[test]
    fn orientation_swaps_only_when_needed() {
        assert_eq!(A4.portrait(), A4);
        assert_eq!(A4.landscape(), (A4.1, A4.0));
        assert_eq!(A4.landscape().portrait(), A4);
    }
}
