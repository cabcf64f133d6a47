//! Pre-defined page sizes for common paper formats.
//!
//! All sizes are given in portrait orientation (width, height), in points. Use
//! [`Orientation`](crate::pagesize::Orientation) to turn a size sideways.
//!
//! ```
//! use pdf_table::pagesize::{Orientation, A4};
//!
//! let (width, height) = Orientation::Landscape.apply(A4);
//! assert!(width > height);
//! ```

use crate::units::*;

/// Page dimensions as (width, height) in points.
pub type PageSize = (Pt, Pt);

const fn mm(width: f32, height: f32) -> PageSize {
    (Pt(width * 72.0 / 25.4), Pt(height * 72.0 / 25.4))
}

// iso a-series, the default family for tables
pub const A3: PageSize = mm(297.0, 420.0);
pub const A4: PageSize = mm(210.0, 297.0);
pub const A5: PageSize = mm(148.0, 210.0);

// north american sizes
pub const LETTER: PageSize = (Pt(8.5 * 72.0), Pt(11.0 * 72.0));
pub const LEGAL: PageSize = (Pt(8.5 * 72.0), Pt(14.0 * 72.0));

/// Which way round a page is used
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Orientation {
    /// Width ≤ height
    #[default]
    Portrait,
    /// Width ≥ height
    Landscape,
}

impl Orientation {
    /// Rotate `size` into this orientation if it isn't already
    pub fn apply(self, size: PageSize) -> PageSize {
        let (short, long) = if size.0 <= size.1 {
            (size.0, size.1)
        } else {
            (size.1, size.0)
        };
        match self {
            Orientation::Portrait => (short, long),
            Orientation::Landscape => (long, short),
        }
    }
}
