//! Text layout: breaking text into lines and fitting it into fixed-size boxes.
//!
//! - [LineBreaker](crate::layout::LineBreaker) produces one wrapped line at a time
//! - [fragment](crate::layout::fragment) collects wrapped lines up to a quota, for
//!   the current font of a [Canvas](crate::canvas::Canvas)
//! - [fit_text_fixed_height](crate::layout::fit_text_fixed_height) splits text into
//!   the part that fits a box and the part that overflows it
//!
//! # Example
//!
//! ```
//! use pdf_table::canvas::RecordingCanvas;
//! use pdf_table::layout::fit_text_fixed_height;
//! use pdf_table::Mm;
//!
//! let canvas = RecordingCanvas::default();
//! let text = "a rather long description that will not fit in a small box";
//! let split = fit_text_fixed_height(&canvas, text, Mm(5.0), Mm(30.0), Mm(10.0), true)
//!     .expect("line height is positive");
//! assert!(split.fitting.ends_with("..."));
//! assert!(!split.overflow.is_empty());
//! ```

mod fit;
mod fragment;
mod linebreak;
mod margins;

pub use fit::*;
pub use fragment::*;
pub use linebreak::*;
pub use margins::*;
