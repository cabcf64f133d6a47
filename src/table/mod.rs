//! Tables drawn row by row onto a [Canvas].
//!
//! A [Table] borrows a canvas and draws header rows and body rows at its cursor.
//! Body rows come in three kinds:
//!
//! - [RowKind::Line]: one line of text per column
//! - [RowKind::Fixed]: every column is a box of a given height; text that doesn't
//!   fit is returned so it can be continued in a following row
//! - [RowKind::Responsive]: like fixed, with the height of the column that needs
//!   the most lines
//!
//! ```
//! use pdf_table::canvas::RecordingCanvas;
//! use pdf_table::table::{Row, RowKind, Table, TableStyle};
//! use pdf_table::Mm;
//!
//! let mut canvas = RecordingCanvas::default();
//! let mut table = Table::new(&mut canvas, TableStyle::default());
//! table.draw_header(&Row::new(["Item", "Notes"]))?;
//! let overflow = table.draw_row(
//!     &Row::new(["Widget", "A long note that will wrap onto a second line of the cell"])
//!         .widths(vec![Mm(40.0), Mm(30.0)])
//!         .kind(RowKind::Fixed)
//!         .fixed_height(Mm(5.0)),
//! )?;
//! assert_eq!(overflow[0], "");
//! assert!(!overflow[1].is_empty());
//! # Ok::<(), pdf_table::LayoutError>(())
//! ```

mod geometry;
mod placeholder;

pub use geometry::*;
pub use placeholder::*;

use crate::canvas::{
    Align, Canvas, Cell, Colours, FamilyId, FontGuard, FontState, FontStyle, NextX, NextY,
    TextBlock,
};
use crate::colour::{colours, Colour};
use crate::error::LayoutError;
use crate::image::Image;
use crate::layout::{fit_text_fixed_height, split_by_pattern, SplitResult, SplitStrategy};
use crate::units::{Mm, Pt};
use derive_more::Display;
use id_arena::Id;
use std::str::FromStr;

/// Fonts, colours and row heights of a table
#[derive(Debug, Clone, PartialEq)]
pub struct TableStyle {
    /// Size of body text
    pub text_size: Pt,
    /// Size of header text, which is also set in bold
    pub title_size: Pt,
    /// Height of single-line cells: line rows and headers
    pub row_height: Mm,
    /// Height of each line of wrapped text in fixed and responsive rows
    pub line_height: Mm,
    pub family: FamilyId,
    pub text_colour: Colour,
    pub draw_colour: Colour,
    pub fill_colour: Colour,
    pub split: SplitStrategy,
}

impl Default for TableStyle {
    fn default() -> Self {
        TableStyle {
            text_size: Pt(7.5),
            title_size: Pt(9.0),
            row_height: Mm(5.0),
            line_height: Mm(5.0),
            family: FamilyId::HELVETICA,
            text_colour: colours::INK,
            draw_colour: colours::RULE,
            fill_colour: colours::RULE,
            split: SplitStrategy::default(),
        }
    }
}

impl TableStyle {
    pub fn with_family(mut self, family: FamilyId) -> Self {
        self.family = family;
        self
    }

    pub fn with_sizes(mut self, text_size: Pt, title_size: Pt) -> Self {
        self.text_size = text_size;
        self.title_size = title_size;
        self
    }

    pub fn with_heights(mut self, row_height: Mm, line_height: Mm) -> Self {
        self.row_height = row_height;
        self.line_height = line_height;
        self
    }

    pub fn with_split(mut self, split: SplitStrategy) -> Self {
        self.split = split;
        self
    }

    /// The font of body text
    pub fn normal_font(&self) -> FontState {
        FontState {
            family: self.family,
            style: FontStyle::Regular,
            size: self.text_size,
        }
    }

    /// The font of header cells
    pub fn title_font(&self) -> FontState {
        FontState {
            family: self.family,
            style: FontStyle::Bold,
            size: self.title_size,
        }
    }

    pub fn colours(&self) -> Colours {
        Colours {
            text: self.text_colour,
            draw: self.draw_colour,
            fill: self.fill_colour,
        }
    }
}

/// The kinds of body row
#[derive(Debug, Default, Display, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RowKind {
    #[default]
    #[display("line")]
    Line,
    #[display("fixed")]
    Fixed,
    #[display("responsive")]
    Responsive,
}

impl FromStr for RowKind {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "line" => Ok(RowKind::Line),
            "fixed" => Ok(RowKind::Fixed),
            "responsive" => Ok(RowKind::Responsive),
            other => Err(LayoutError::UnknownRowKind(other.to_string())),
        }
    }
}

/// The cells of one row and how to lay them out
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    pub texts: Vec<String>,
    /// One width per column; empty for equal columns across the page
    pub widths: Vec<Mm>,
    pub align: ColumnAlign,
    pub kind: RowKind,
    /// Height of a [RowKind::Fixed] row
    pub fixed_height: Option<Mm>,
    /// End text that doesn't fit with an ellipsis
    pub ellipsis: bool,
    /// Move down an extra line after the row
    pub line_break: bool,
}

impl Row {
    pub fn new<I, S>(texts: I) -> Row
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Row {
            texts: texts.into_iter().map(Into::into).collect(),
            ..Row::default()
        }
    }

    pub fn widths(mut self, widths: Vec<Mm>) -> Self {
        self.widths = widths;
        self
    }

    pub fn align<A: Into<ColumnAlign>>(mut self, align: A) -> Self {
        self.align = align.into();
        self
    }

    pub fn kind(mut self, kind: RowKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn fixed_height(mut self, height: Mm) -> Self {
        self.fixed_height = Some(height);
        self
    }

    pub fn ellipsis(mut self, ellipsis: bool) -> Self {
        self.ellipsis = ellipsis;
        self
    }

    pub fn line_break(mut self, line_break: bool) -> Self {
        self.line_break = line_break;
        self
    }
}

/// Options for [Table::cell_fixed] and [Table::multi_cell_fixed]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FixedCellOptions {
    pub align: Align,
    /// Move down a line once the box is drawn
    pub line_break: bool,
    /// End text that doesn't fit with an ellipsis
    pub ellipsis: bool,
    /// Leave the cursor at the top right of the box, ready for the next column,
    /// instead of below it at the left margin
    pub inline: bool,
}

impl Default for FixedCellOptions {
    fn default() -> Self {
        FixedCellOptions {
            align: Align::Justify,
            line_break: false,
            ellipsis: false,
            inline: false,
        }
    }
}

/// How [Table::draw_header_with] paints the header cells
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct HeaderOptions {
    /// Paint the cells with the fill colour
    pub fill: bool,
    pub border: bool,
}

impl Default for HeaderOptions {
    fn default() -> Self {
        HeaderOptions {
            fill: true,
            border: true,
        }
    }
}

/// Where to draw an image with [Table::draw_centered_image]. Missing positions
/// default to the cursor and missing container sizes to the image's size.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct ImagePlacement {
    pub x: Option<Mm>,
    pub y: Option<Mm>,
    /// Zero to derive from the height and the image's aspect ratio
    pub width: Mm,
    /// Zero to derive from the width and the image's aspect ratio
    pub height: Mm,
    pub container_width: Option<Mm>,
    pub container_height: Option<Mm>,
}

/// Draws table rows onto a canvas
pub struct Table<'c, C: Canvas + ?Sized> {
    canvas: &'c mut C,
    style: TableStyle,
}

impl<'c, C: Canvas + ?Sized> Table<'c, C> {
    /// Start a table on `canvas`, switching it to the style's font and colours
    pub fn new(canvas: &'c mut C, style: TableStyle) -> Table<'c, C> {
        let mut table = Table { canvas, style };
        table.set_defaults();
        table
    }

    pub fn canvas(&mut self) -> &mut C {
        &mut *self.canvas
    }

    pub fn style(&self) -> &TableStyle {
        &self.style
    }

    /// Restore the body font and the style's colours
    pub fn set_defaults(&mut self) {
        self.canvas.set_font(self.style.normal_font());
        self.canvas.set_colours(self.style.colours());
    }

    /// Width of each of `n` equal columns
    pub fn width_n(&self, n: usize) -> Mm {
        width_n(&*self.canvas, n)
    }

    pub fn width_2(&self) -> Mm {
        self.width_n(2)
    }

    pub fn width_3(&self) -> Mm {
        self.width_n(3)
    }

    /// Column widths from spans of a twelve-column grid
    pub fn grid_columns(&self, spans: &[f32]) -> Vec<Mm> {
        grid_columns(self.canvas.effective_width(), spans)
    }

    /// Start x that centres an element within a container. The start defaults to
    /// the cursor, the container to the rest of the effective width and the element
    /// to the container.
    pub fn center_x(
        &self,
        start: Option<Mm>,
        container: Option<Mm>,
        element: Option<Mm>,
    ) -> Result<Mm, LayoutError> {
        let start = start.unwrap_or(self.canvas.cursor().0);
        let container = container.unwrap_or(self.canvas.effective_width() - start);
        center_x(start, container, element.unwrap_or(container))
    }

    /// The x at which a Code 39 barcode for `text` is centred on the page
    pub fn code39_center_x(&self, text: &str) -> Mm {
        code39_center_x(&*self.canvas, text)
    }

    /// Split text into what fits a box and what overflows, in the body font, using
    /// the style's split strategy
    pub fn fit(
        &self,
        text: &str,
        line_height: Mm,
        width: Mm,
        height: Mm,
        ellipsis: bool,
    ) -> Result<SplitResult, LayoutError> {
        let canvas = &*self.canvas;
        match self.style.split {
            SplitStrategy::TrackOffsets => {
                fit_text_fixed_height(canvas, text, line_height, width, height, ellipsis)
            }
            SplitStrategy::MatchPattern => {
                match split_by_pattern(canvas, text, line_height, width, height, "\n", ellipsis) {
                    Err(LayoutError::TextSplitFailure { .. }) => {
                        tracing::warn!("text does not split on \\n, retrying with \\r\\n");
                        split_by_pattern(canvas, text, line_height, width, height, "\r\n", ellipsis)
                    }
                    result => result,
                }
            }
        }
    }

    /// Draw a bordered box `height` tall, then move the cursor the way a column of
    /// a fixed row does: to the next column when inline, otherwise below the box
    /// at the left margin.
    pub fn cell_fixed(&mut self, width: Mm, height: Mm, text: &str, options: FixedCellOptions) {
        let row_height = self.style.row_height;
        let border = Cell::new(width, height)
            .text(text)
            .border(true)
            .align(options.align);
        // the empty second cell leaves the cursor (and the height a line break
        // moves by) as if a single row had been drawn
        if options.inline {
            self.canvas.cell(border.advance(NextX::Left, NextY::Top));
            self.canvas
                .cell(Cell::new(width, row_height).advance(NextX::Right, NextY::Top));
        } else {
            self.canvas.cell(border.advance(NextX::Left, NextY::Next));
            self.canvas
                .cell(Cell::new(width, row_height).advance(NextX::LeftMargin, NextY::Top));
        }
        if options.line_break {
            self.canvas.line_break(None);
        }
    }

    /// Draw as much of `text` as fits in a `width` x `container_height` box of
    /// lines `line_height` tall, border the box, and return the text that didn't
    /// fit.
    pub fn multi_cell_fixed(
        &mut self,
        width: Mm,
        text: &str,
        line_height: Mm,
        container_height: Mm,
        options: FixedCellOptions,
    ) -> Result<String, LayoutError> {
        let split = self.fit(text, line_height, width, container_height, options.ellipsis)?;
        self.canvas.multi_cell(
            TextBlock::new(width, line_height, &split.fitting)
                .align(options.align)
                .advance(NextX::Left, NextY::Top),
        );
        self.cell_fixed(width, container_height, "", options);
        Ok(split.overflow)
    }

    /// Draw a header row: bold title-sized text on a filled, bordered background,
    /// centred unless the row says otherwise. The body font is restored afterwards.
    pub fn draw_header(&mut self, row: &Row) -> Result<(), LayoutError> {
        self.draw_header_with(row, HeaderOptions::default())
    }

    /// [Table::draw_header], with the fill and border chosen by `options`
    pub fn draw_header_with(
        &mut self,
        row: &Row,
        options: HeaderOptions,
    ) -> Result<(), LayoutError> {
        let columns = row.texts.len();
        let widths = resolve_widths(&*self.canvas, &row.widths, columns)?;
        let aligns = resolve_alignments(&row.align, columns, Align::Center)?;
        let row_height = self.style.row_height;

        let mut canvas = FontGuard::new(&mut *self.canvas, self.style.title_font());
        for (i, ((text, width), align)) in row.texts.iter().zip(widths).zip(aligns).enumerate() {
            canvas.cell(
                Cell::new(width, row_height)
                    .text(text)
                    .border(options.border)
                    .fill(options.fill)
                    .align(align),
            );
            if i + 1 == columns {
                canvas.line_break(None);
            }
        }
        Ok(())
    }

    /// Draw a body row, returning for each column the text that didn't fit. Line
    /// rows never overflow.
    ///
    /// Widths, alignments and heights are checked before anything is drawn. A
    /// fixed or responsive row that fails part way leaves its earlier columns drawn.
    pub fn draw_row(&mut self, row: &Row) -> Result<Vec<String>, LayoutError> {
        let columns = row.texts.len();
        if columns == 0 {
            return Ok(Vec::new());
        }
        match row.kind {
            RowKind::Line => {
                let widths = resolve_widths(&*self.canvas, &row.widths, columns)?;
                let aligns = resolve_alignments(&row.align, columns, Align::Left)?;
                self.draw_row_line(&row.texts, &widths, &aligns, row.line_break);
                Ok(vec![String::new(); columns])
            }
            RowKind::Fixed => {
                let height = row
                    .fixed_height
                    .ok_or(LayoutError::MissingRequiredParameter("fixed_height"))?;
                if height < self.style.row_height {
                    return Err(LayoutError::InvalidHeight {
                        height,
                        minimum: self.style.row_height,
                    });
                }
                let widths = resolve_widths(&*self.canvas, &row.widths, columns)?;
                let aligns = resolve_alignments(&row.align, columns, Align::Justify)?;
                self.draw_row_boxes(row, &widths, &aligns, height)
            }
            RowKind::Responsive => {
                let widths = resolve_widths(&*self.canvas, &row.widths, columns)?;
                let aligns = resolve_alignments(&row.align, columns, Align::Justify)?;
                let lines = max_rows(&*self.canvas, &widths, &row.texts, &aligns).max(1);
                let height = self.style.line_height * lines as f32;
                tracing::debug!(lines, %height, "responsive row height");
                self.draw_row_boxes(row, &widths, &aligns, height)
            }
        }
    }

    fn draw_row_line(&mut self, texts: &[String], widths: &[Mm], aligns: &[Align], line_break: bool) {
        let row_height = self.style.row_height;
        for ((text, width), align) in texts.iter().zip(widths).zip(aligns) {
            self.canvas.cell(
                Cell::new(*width, row_height)
                    .text(text)
                    .border(true)
                    .align(*align),
            );
        }
        if line_break {
            self.canvas.line_break(None);
        }
        self.canvas.line_break(None);
    }

    fn draw_row_boxes(
        &mut self,
        row: &Row,
        widths: &[Mm],
        aligns: &[Align],
        height: Mm,
    ) -> Result<Vec<String>, LayoutError> {
        let line_height = self.style.line_height;
        let last = row.texts.len() - 1;
        let mut overflow = Vec::with_capacity(row.texts.len());
        for (i, ((text, width), align)) in row.texts.iter().zip(widths).zip(aligns).enumerate() {
            let options = FixedCellOptions {
                align: *align,
                line_break: i == last && row.line_break,
                ellipsis: row.ellipsis,
                inline: i != last,
            };
            overflow.push(self.multi_cell_fixed(*width, text, line_height, height, options)?);
        }
        Ok(overflow)
    }

    /// Draw a registered image centred in its container. Images the canvas doesn't
    /// know are skipped.
    pub fn draw_centered_image(&mut self, image: Id<Image>, placement: ImagePlacement) {
        let Some(natural) = self.canvas.image_size(image) else {
            tracing::warn!(?image, "image is not registered with the canvas");
            return;
        };
        let (width, height) = image_box(natural, placement.width, placement.height);
        let (cursor_x, cursor_y) = self.canvas.cursor();
        let x = center_in(
            placement.x.unwrap_or(cursor_x),
            placement.container_width.unwrap_or(width),
            width,
        );
        let y = center_in(
            placement.y.unwrap_or(cursor_y),
            placement.container_height.unwrap_or(height),
            height,
        );
        self.canvas.image(image, x, y, width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawCall, RecordingCanvas};

    #[test]
    fn row_kinds_parse() {
        assert_eq!("responsive".parse::<RowKind>(), Ok(RowKind::Responsive));
        assert_eq!(RowKind::Fixed.to_string(), "fixed");
        assert_eq!(
            "grid".parse::<RowKind>(),
            Err(LayoutError::UnknownRowKind("grid".to_string()))
        );
    }

    #[test]
    fn new_tables_apply_the_style() {
        let mut canvas = RecordingCanvas::default();
        let style = TableStyle::default();
        Table::new(&mut canvas, style.clone());
        assert_eq!(canvas.font(), style.normal_font());
        assert_eq!(canvas.colours(), style.colours());
    }

    #[test]
    fn headers_are_bold_and_restore_the_body_font() {
        let mut canvas = RecordingCanvas::default();
        let mut table = Table::new(&mut canvas, TableStyle::default());
        table.draw_header(&Row::new(["a", "b"])).unwrap();
        let style = table.style().clone();
        assert_eq!(canvas.font(), style.normal_font());

        let calls = canvas.calls();
        assert_eq!(calls.len(), 2);
        for call in calls {
            let DrawCall::Cell {
                font, fill, align, ..
            } = call
            else {
                panic!("headers are cells");
            };
            assert_eq!(*font, style.title_font());
            assert!(*fill);
            assert_eq!(*align, Align::Center);
        }
        assert_eq!(canvas.cursor(), (Mm(10.0), Mm(15.0)));
    }

    #[test]
    fn headers_can_skip_fill_and_border() {
        let mut canvas = RecordingCanvas::default();
        let mut table = Table::new(&mut canvas, TableStyle::default());
        let options = HeaderOptions {
            fill: false,
            border: false,
        };
        table.draw_header_with(&Row::new(["a", "b"]), options).unwrap();

        let calls = canvas.calls();
        assert_eq!(calls.len(), 2);
        for call in calls {
            assert!(matches!(
                call,
                DrawCall::Cell {
                    fill: false,
                    border: false,
                    ..
                }
            ));
        }
        assert_eq!(canvas.cursor(), (Mm(10.0), Mm(15.0)));
    }

    #[test]
    fn line_rows_move_to_the_next_line() {
        let mut canvas = RecordingCanvas::default();
        let mut table = Table::new(&mut canvas, TableStyle::default());
        let overflow = table
            .draw_row(&Row::new(["x", "y", "z"]).widths(vec![Mm(20.0); 3]))
            .unwrap();
        assert_eq!(overflow, vec!["", "", ""]);
        let xs: Vec<Mm> = canvas
            .calls()
            .iter()
            .filter_map(|call| call.bounds().map(|(x, ..)| x))
            .collect();
        assert_eq!(xs, vec![Mm(10.0), Mm(30.0), Mm(50.0)]);
        assert_eq!(canvas.cursor(), (Mm(10.0), Mm(15.0)));
    }

    #[test]
    fn fixed_rows_need_a_height() {
        let mut canvas = RecordingCanvas::default();
        let mut table = Table::new(&mut canvas, TableStyle::default());
        let row = Row::new(["x"]).kind(RowKind::Fixed);
        assert_eq!(
            table.draw_row(&row),
            Err(LayoutError::MissingRequiredParameter("fixed_height"))
        );
        assert!(canvas.calls().is_empty());
    }

    #[test]
    fn mismatched_widths_fail_before_drawing() {
        let mut canvas = RecordingCanvas::default();
        let mut table = Table::new(&mut canvas, TableStyle::default());
        let row = Row::new(["x", "y"])
            .widths(vec![Mm(20.0)])
            .kind(RowKind::Responsive);
        assert!(matches!(
            table.draw_row(&row),
            Err(LayoutError::ElementCountMismatch { .. })
        ));
        assert!(canvas.calls().is_empty());
    }

    #[test]
    fn inline_fixed_cells_step_right() {
        let mut canvas = RecordingCanvas::default();
        let mut table = Table::new(&mut canvas, TableStyle::default());
        let options = FixedCellOptions {
            inline: true,
            ..FixedCellOptions::default()
        };
        table.cell_fixed(Mm(30.0), Mm(20.0), "", options);
        assert_eq!(canvas.cursor(), (Mm(40.0), Mm(10.0)));

        let mut table = Table::new(&mut canvas, TableStyle::default());
        table.cell_fixed(Mm(30.0), Mm(20.0), "", FixedCellOptions::default());
        assert_eq!(canvas.cursor(), (Mm(10.0), Mm(30.0)));
        canvas.line_break(None);
        assert_eq!(canvas.cursor(), (Mm(10.0), Mm(35.0)));
    }

    #[test]
    fn grid_and_equal_widths() {
        let mut canvas = RecordingCanvas::default();
        let table = Table::new(&mut canvas, TableStyle::default());
        let epw = *table.width_n(1);
        assert!((*table.width_2() * 2.0 - epw).abs() < 1e-3);
        assert!((*table.width_3() * 3.0 - epw).abs() < 1e-3);
        let widths = table.grid_columns(&[4.0, 8.0]);
        assert!((*widths[0] - epw / 3.0).abs() < 1e-3);
    }

    #[test]
    fn center_x_defaults_to_the_cursor_and_page() {
        let mut canvas = RecordingCanvas::default();
        let table = Table::new(&mut canvas, TableStyle::default());
        let epw = table.width_n(1);
        let x = table.center_x(None, None, Some(Mm(20.0))).unwrap();
        assert!((*x - (10.0 + (*epw - 10.0 - 20.0) / 2.0)).abs() < 1e-3);
        assert!(table.center_x(None, Some(Mm(10.0)), Some(Mm(20.0))).is_err());
    }
}
