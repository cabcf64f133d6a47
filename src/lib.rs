//! Tables for PDF documents.
//!
//! Rows of text are laid out in columns on a [Canvas](canvas::Canvas), with text
//! that doesn't fit a fixed-height cell split off so it can be continued on the
//! next row or page. See [table] for the row drawing API, [layout] for the text
//! fitting underneath it and [canvas] for the drawing surfaces.

mod colour;
pub use colour::*;

mod document;
pub use document::*;

mod font;
pub use font::*;

mod image;
pub use self::image::*;

/// Drawing surfaces with a cursor, a current font and colours
pub mod canvas;

/// Utility functions and structures to lay out text in fixed-size boxes
pub mod layout;

/// Row by row table drawing
pub mod table;

mod content;

mod page;
pub use page::*;

pub mod pagesize;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod standard_font;
pub use standard_font::*;

mod units;
pub use units::*;

mod error;
pub use error::*;

/// Re-export PDF-writer functionality, mostly for custom [pdf_writer::Content] generation
pub use pdf_writer;
