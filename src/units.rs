//! Units of length used throughout the crate.
//!
//! PDF content is positioned in points ([Pt], 1/72 of an inch) from the bottom-left
//! corner of the page. Table layout is done in millimetres ([Mm]) from the top-left
//! corner, which is how the cursor of a [Canvas](crate::canvas::Canvas) moves.
//! Images are sized in whole pixels ([Px]) at 96 DPI.
//!
//! ```
//! use pdf_table::{Mm, Pt, Px};
//!
//! let width: Pt = Mm(25.4).into();
//! assert!((*width - 72.0).abs() < 1e-4);
//!
//! let logo: Mm = Px(100).into();
//! assert_eq!(logo, Mm(26.458));
//! ```

use derive_more::{Add, AddAssign, Deref, Display, From, Into, Sub, SubAssign, Sum};
use std::ops::{Div, Mul, Neg};

const MM_PER_INCH: f32 = 25.4;
const PT_PER_INCH: f32 = 72.0;
const PX_PER_MM: f32 = 3.779_527_6;
const MM_PER_PX: f32 = 0.264_583_33;
const PT_PER_PX: f32 = 0.75;

/// Typographic points, 1/72 of an inch
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
    Display,
    From,
    Into,
)]
#[display("{_0}pt")]
pub struct Pt(pub f32);

/// Millimetres
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
    Display,
    From,
    Into,
)]
#[display("{_0}mm")]
pub struct Mm(pub f32);

/// Inches
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
    Display,
    From,
    Into,
)]
#[display("{_0}in")]
pub struct In(pub f32);

/// Whole pixels at 96 DPI
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Into)]
#[display("{_0}px")]
pub struct Px(pub u32);

macro_rules! scalar_ops {
    ($unit:ident) => {
        impl Mul<f32> for $unit {
            type Output = $unit;
            fn mul(self, rhs: f32) -> $unit {
                $unit(self.0 * rhs)
            }
        }

        impl Mul<$unit> for f32 {
            type Output = $unit;
            fn mul(self, rhs: $unit) -> $unit {
                $unit(self * rhs.0)
            }
        }

        impl Div<f32> for $unit {
            type Output = $unit;
            fn div(self, rhs: f32) -> $unit {
                $unit(self.0 / rhs)
            }
        }

        /// Dividing two lengths gives a plain ratio
        impl Div<$unit> for $unit {
            type Output = f32;
            fn div(self, rhs: $unit) -> f32 {
                self.0 / rhs.0
            }
        }

        impl Neg for $unit {
            type Output = $unit;
            fn neg(self) -> $unit {
                $unit(-self.0)
            }
        }

        impl $unit {
            /// Round down to the nearest whole unit
            pub fn floor(self) -> $unit {
                $unit(self.0.floor())
            }

            /// The larger of two lengths
            pub fn max(self, other: $unit) -> $unit {
                $unit(self.0.max(other.0))
            }

            /// The smaller of two lengths
            pub fn min(self, other: $unit) -> $unit {
                $unit(self.0.min(other.0))
            }
        }
    };
}

scalar_ops!(Pt);
scalar_ops!(Mm);
scalar_ops!(In);

impl From<In> for Pt {
    fn from(value: In) -> Self {
        Pt(value.0 * PT_PER_INCH)
    }
}

impl From<Pt> for In {
    fn from(value: Pt) -> Self {
        In(value.0 / PT_PER_INCH)
    }
}

impl From<Mm> for Pt {
    fn from(value: Mm) -> Self {
        Pt(value.0 * PT_PER_INCH / MM_PER_INCH)
    }
}

impl From<Pt> for Mm {
    fn from(value: Pt) -> Self {
        Mm(value.0 * MM_PER_INCH / PT_PER_INCH)
    }
}

impl From<In> for Mm {
    fn from(value: In) -> Self {
        Mm(value.0 * MM_PER_INCH)
    }
}

/// Rounds to the nearest pixel; negative lengths clamp to zero
impl From<Mm> for Px {
    fn from(value: Mm) -> Self {
        mm_to_px(value)
    }
}

impl From<Px> for Mm {
    fn from(value: Px) -> Self {
        px_to_mm(value)
    }
}

impl From<Px> for Pt {
    fn from(value: Px) -> Self {
        px_to_pt(value)
    }
}

fn round3(value: f32) -> f32 {
    (value * 1000.0).round() / 1000.0
}

/// Convert millimetres to the nearest whole pixel
pub fn mm_to_px(mm: Mm) -> Px {
    Px((mm.0 * PX_PER_MM).round().max(0.0) as u32)
}

/// Convert pixels to millimetres, rounded to three decimals
pub fn px_to_mm(px: Px) -> Mm {
    Mm(round3(px.0 as f32 * MM_PER_PX))
}

/// Convert pixels to points, rounded to three decimals
pub fn px_to_pt(px: Px) -> Pt {
    Pt(round3(px.0 as f32 * PT_PER_PX))
}
