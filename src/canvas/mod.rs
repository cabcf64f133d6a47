//! The drawing surface that tables are laid out on.
//!
//! A [Canvas] owns a cursor, a current font and a set of colours, and knows how to
//! draw bordered cells and blocks of wrapped text at the cursor. Every draw call
//! moves the cursor according to its [CursorAdvance] policy, the same way a pen
//! moves across a page.
//!
//! Two canvases are provided:
//!
//! - [PdfCanvas](crate::canvas::PdfCanvas) draws onto the pages of a
//!   [Document](crate::Document)
//! - [RecordingCanvas](crate::canvas::RecordingCanvas) measures text the same way but
//!   only records the draw calls, which is useful for dry runs and tests
//!
//! ```
//! use pdf_table::canvas::{Canvas, Cell, RecordingCanvas};
//! use pdf_table::Mm;
//!
//! let mut canvas = RecordingCanvas::default();
//! let (x, y) = canvas.cursor();
//! canvas.cell(Cell::new(Mm(40.0), Mm(5.0)).text("Name").border(true));
//! assert_eq!(canvas.cursor(), (x + Mm(40.0), y));
//! ```

mod context;
mod pdf;
mod recording;

pub use context::*;
pub use pdf::*;
pub use recording::*;

use crate::colour::Colour;
use crate::image::Image;
use crate::layout::{line_breaker, FittedLine, Margins};
use crate::units::{Mm, Pt};
use id_arena::Id;
use std::ops::{Deref, DerefMut};

/// Horizontal text alignment within a cell
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
    /// Spread the words of a line across the full width of the cell
    Justify,
}

/// Where the cursor's x ends up after a draw call
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum NextX {
    /// Back at the x the call started at
    Left,
    /// Just right of what was drawn
    #[default]
    Right,
    /// At the left margin
    LeftMargin,
}

/// Where the cursor's y ends up after a draw call
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum NextY {
    /// At the top of what was drawn
    #[default]
    Top,
    /// Just below what was drawn
    Next,
}

/// How a draw call moves the cursor once it is done
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct CursorAdvance {
    pub x: NextX,
    pub y: NextY,
}

impl CursorAdvance {
    pub const fn new(x: NextX, y: NextY) -> CursorAdvance {
        CursorAdvance { x, y }
    }
}

/// Identifies a family of four faces (regular, bold, oblique, bold oblique)
/// registered with a canvas
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct FamilyId(pub(crate) usize);

impl FamilyId {
    /// The built-in Helvetica family every canvas starts with
    pub const HELVETICA: FamilyId = FamilyId(0);
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FontStyle {
    #[default]
    Regular,
    Bold,
    Oblique,
    BoldOblique,
}

impl FontStyle {
    /// Position of this style within a family
    pub(crate) fn index(self) -> usize {
        match self {
            FontStyle::Regular => 0,
            FontStyle::Bold => 1,
            FontStyle::Oblique => 2,
            FontStyle::BoldOblique => 3,
        }
    }
}

/// The font text is currently measured and drawn with
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FontState {
    pub family: FamilyId,
    pub style: FontStyle,
    pub size: Pt,
}

impl Default for FontState {
    fn default() -> Self {
        FontState {
            family: FamilyId::HELVETICA,
            style: FontStyle::Regular,
            size: Pt(12.0),
        }
    }
}

/// Colours used for text, lines (borders) and fills
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Colours {
    pub text: Colour,
    pub draw: Colour,
    pub fill: Colour,
}

impl Default for Colours {
    fn default() -> Self {
        use crate::colour::colours::{BLACK, WHITE};
        Colours {
            text: BLACK,
            draw: BLACK,
            fill: WHITE,
        }
    }
}

/// A single line of text in a box. A width of zero extends the cell to the right
/// margin.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Cell<'a> {
    pub width: Mm,
    pub height: Mm,
    pub text: &'a str,
    pub border: bool,
    pub fill: bool,
    pub align: Align,
    pub advance: CursorAdvance,
}

impl<'a> Cell<'a> {
    /// An empty cell without border or fill that moves the cursor to its right
    pub fn new(width: Mm, height: Mm) -> Cell<'a> {
        Cell {
            width,
            height,
            text: "",
            border: false,
            fill: false,
            align: Align::Left,
            advance: CursorAdvance::default(),
        }
    }

    pub fn text(mut self, text: &'a str) -> Self {
        self.text = text;
        self
    }

    pub fn border(mut self, border: bool) -> Self {
        self.border = border;
        self
    }

    pub fn fill(mut self, fill: bool) -> Self {
        self.fill = fill;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn advance(mut self, x: NextX, y: NextY) -> Self {
        self.advance = CursorAdvance::new(x, y);
        self
    }
}

/// Text wrapped onto as many lines of `line_height` as it needs
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TextBlock<'a> {
    pub width: Mm,
    pub line_height: Mm,
    pub text: &'a str,
    pub border: bool,
    pub fill: bool,
    pub align: Align,
    pub advance: CursorAdvance,
}

impl<'a> TextBlock<'a> {
    /// A justified block without border that leaves the cursor at its top right
    pub fn new(width: Mm, line_height: Mm, text: &'a str) -> TextBlock<'a> {
        TextBlock {
            width,
            line_height,
            text,
            border: false,
            fill: false,
            align: Align::Justify,
            advance: CursorAdvance::default(),
        }
    }

    pub fn border(mut self, border: bool) -> Self {
        self.border = border;
        self
    }

    pub fn fill(mut self, fill: bool) -> Self {
        self.fill = fill;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn advance(mut self, x: NextX, y: NextY) -> Self {
        self.advance = CursorAdvance::new(x, y);
        self
    }
}

/// A page that cells, wrapped text and images can be drawn onto.
///
/// Positions and lengths are in millimetres from the top-left corner of the page.
/// Implementors provide the [DrawingContext] and the primitives that actually put
/// marks on a page; the geometry queries and cursor bookkeeping are shared.
pub trait Canvas {
    fn context(&self) -> &DrawingContext;

    fn context_mut(&mut self) -> &mut DrawingContext;

    /// Advance width of `ch` in the current font, in thousandths of an em
    fn char_width(&self, ch: char) -> f32;

    /// Draw a single line of text in a box, then move the cursor
    fn cell(&mut self, cell: Cell<'_>);

    /// Draw text wrapped to the block's width, one cell of `line_height` per line,
    /// then move the cursor relative to the whole block
    fn multi_cell(&mut self, block: TextBlock<'_>);

    /// Start a new page with the cursor at the top-left margin
    fn new_page(&mut self);

    /// Register an image so it can be drawn, possibly several times
    fn add_image(&mut self, image: Image) -> Id<Image>;

    /// Natural size of a registered image at 96 DPI
    fn image_size(&self, id: Id<Image>) -> Option<(Mm, Mm)>;

    /// Draw a registered image in the box at (`x`, `y`). The cursor does not move.
    fn image(&mut self, id: Id<Image>, x: Mm, y: Mm, width: Mm, height: Mm);

    fn page_width(&self) -> Mm {
        self.context().page_size.0
    }

    fn page_height(&self) -> Mm {
        self.context().page_size.1
    }

    fn margins(&self) -> Margins {
        self.context().margins
    }

    /// Page width minus the left and right margins
    fn effective_width(&self) -> Mm {
        self.page_width() - self.margins().horizontal()
    }

    /// Width from the cursor to the right margin
    fn available_width(&self) -> Mm {
        self.page_width() - self.margins().right - self.cursor().0
    }

    fn cursor(&self) -> (Mm, Mm) {
        self.context().cursor
    }

    fn set_cursor(&mut self, x: Mm, y: Mm) {
        self.context_mut().cursor = (x, y);
    }

    /// Horizontal padding inside every cell
    fn cell_margin(&self) -> Mm {
        self.context().cell_margin
    }

    fn font(&self) -> FontState {
        self.context().font
    }

    fn set_font(&mut self, font: FontState) {
        self.context_mut().font = font;
    }

    /// The current font size in layout units
    fn font_size(&self) -> Mm {
        self.font().size.into()
    }

    /// The character actually drawn for `ch`, or `None` if it is dropped. Carriage
    /// returns are always dropped.
    fn normalize_char(&self, ch: char) -> Option<char> {
        (ch != '\r').then_some(ch)
    }

    /// Width of `text` set in the current font
    fn text_width(&self, text: &str) -> Mm {
        let units: f32 = text
            .chars()
            .filter_map(|ch| self.normalize_char(ch))
            .map(|ch| self.char_width(ch))
            .sum();
        self.font_size() * units / 1000.0
    }

    fn colours(&self) -> Colours {
        self.context().colours
    }

    fn set_colours(&mut self, colours: Colours) {
        self.context_mut().colours = colours;
    }

    /// Move the cursor to the left margin, `height` further down. Without a
    /// height the cursor moves down by the height of the last cell drawn.
    fn line_break(&mut self, height: Option<Mm>) {
        let context = self.context_mut();
        let step = height.or(context.last_height).unwrap_or_default();
        context.cursor = (context.margins.left, context.cursor.1 + step);
    }

    /// Start a new page first if a box `height` tall would cross the automatic
    /// page break at the cursor. The cursor keeps its x.
    fn ensure_room(&mut self, height: Mm) {
        if self.context().needs_page_break(height) {
            let x = self.cursor().0;
            tracing::debug!(%height, "automatic page break");
            self.new_page();
            let top = self.cursor().1;
            self.set_cursor(x, top);
        }
    }
}

/// Scoped font change. The font in effect when the guard was created is
/// restored when the guard is dropped, including on early returns.
pub struct FontGuard<'c, C: Canvas + ?Sized> {
    canvas: &'c mut C,
    saved: FontState,
}

impl<'c, C: Canvas + ?Sized> FontGuard<'c, C> {
    /// Switch `canvas` to `font` until the guard goes out of scope
    pub fn new(canvas: &'c mut C, font: FontState) -> FontGuard<'c, C> {
        let saved = canvas.font();
        canvas.set_font(font);
        FontGuard { canvas, saved }
    }

    /// The font that will be restored
    pub fn saved(&self) -> FontState {
        self.saved
    }
}

impl<C: Canvas + ?Sized> Deref for FontGuard<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        &*self.canvas
    }
}

impl<C: Canvas + ?Sized> DerefMut for FontGuard<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        &mut *self.canvas
    }
}

impl<C: Canvas + ?Sized> Drop for FontGuard<'_, C> {
    fn drop(&mut self) {
        self.canvas.set_font(self.saved);
    }
}

/// Break the text of a block into lines, resolving a zero width to the space left
/// on the line. Returns the resolved width with the lines.
pub(crate) fn block_lines<C: Canvas + ?Sized>(
    canvas: &C,
    block: &TextBlock<'_>,
) -> (Mm, Vec<FittedLine>) {
    let width = if block.width == Mm(0.0) {
        canvas.available_width()
    } else {
        block.width
    };
    let justify = block.align == Align::Justify;
    let lines: Vec<FittedLine> = line_breaker(canvas, width, block.text, justify).collect();
    (width, lines)
}

/// Alignment a wrapped line is drawn with. Only soft-wrapped lines of a justified
/// block are justified; its last line and lines ending a paragraph are set left.
pub(crate) fn line_align(block_align: Align, line: &FittedLine) -> Align {
    match block_align {
        Align::Justify if line.justify => Align::Justify,
        Align::Justify => Align::Left,
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_guard_restores_on_drop() {
        let mut canvas = RecordingCanvas::default();
        let normal = canvas.font();
        {
            let bold = FontState {
                style: FontStyle::Bold,
                size: Pt(9.0),
                ..normal
            };
            let guarded = FontGuard::new(&mut canvas, bold);
            assert_eq!(guarded.font().style, FontStyle::Bold);
        }
        assert_eq!(canvas.font(), normal);
    }

    #[test]
    fn line_break_uses_last_cell_height() {
        let mut canvas = RecordingCanvas::default();
        canvas.cell(Cell::new(Mm(20.0), Mm(7.0)));
        let (_, y) = canvas.cursor();
        canvas.line_break(None);
        assert_eq!(canvas.cursor(), (canvas.margins().left, y + Mm(7.0)));
        canvas.line_break(Some(Mm(2.0)));
        assert_eq!(canvas.cursor().1, y + Mm(9.0));
    }
}
