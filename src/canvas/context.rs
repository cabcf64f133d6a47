use super::{Colours, CursorAdvance, FontState, NextX, NextY};
use crate::layout::Margins;
use crate::pagesize::{self, Orientation, PageSize};
use crate::units::Mm;

/// Page setup shared by every canvas
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasConfig {
    /// Portrait page size; see [pagesize](crate::pagesize)
    pub page_size: PageSize,
    pub orientation: Orientation,
    pub margins: Margins,
    /// Horizontal padding between a cell's border and its text
    pub cell_margin: Mm,
    /// Width of cell borders
    pub line_width: Mm,
    /// Distance from the bottom edge at which a new page is started, if any
    pub auto_page_break: Option<Mm>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        CanvasConfig {
            page_size: pagesize::A4,
            orientation: Orientation::Portrait,
            margins: Margins::all(Mm(10.0)),
            cell_margin: Mm(1.0),
            line_width: Mm(0.2),
            auto_page_break: Some(Mm(20.0)),
        }
    }
}

impl CanvasConfig {
    pub fn with_page_size(mut self, page_size: PageSize, orientation: Orientation) -> Self {
        self.page_size = page_size;
        self.orientation = orientation;
        self
    }

    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    pub fn with_cell_margin(mut self, cell_margin: Mm) -> Self {
        self.cell_margin = cell_margin;
        self
    }

    pub fn with_line_width(mut self, line_width: Mm) -> Self {
        self.line_width = line_width;
        self
    }

    pub fn with_auto_page_break(mut self, bottom: Option<Mm>) -> Self {
        self.auto_page_break = bottom;
        self
    }

    /// Page size after applying the orientation
    pub fn oriented_size(&self) -> PageSize {
        self.orientation.apply(self.page_size)
    }
}

/// The mutable drawing state of a canvas: where the cursor is, which font and
/// colours are in effect, and how tall the last cell was.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingContext {
    /// Page width and height
    pub page_size: (Mm, Mm),
    pub margins: Margins,
    pub cell_margin: Mm,
    pub line_width: Mm,
    pub auto_page_break: Option<Mm>,
    pub cursor: (Mm, Mm),
    pub font: FontState,
    pub colours: Colours,
    /// Height of the most recent cell, used by line breaks without a height
    pub last_height: Option<Mm>,
}

impl DrawingContext {
    pub fn new(config: &CanvasConfig) -> DrawingContext {
        let (width, height) = config.oriented_size();
        DrawingContext {
            page_size: (width.into(), height.into()),
            margins: config.margins,
            cell_margin: config.cell_margin,
            line_width: config.line_width,
            auto_page_break: config.auto_page_break,
            cursor: (config.margins.left, config.margins.top),
            font: FontState::default(),
            colours: Colours::default(),
            last_height: None,
        }
    }

    /// Put the cursor back at the top-left margin, as on a fresh page
    pub fn reset_cursor(&mut self) {
        self.cursor = (self.margins.left, self.margins.top);
    }

    /// Whether a box `height` tall drawn at the cursor would cross the automatic
    /// page break. A cursor already at the top margin never breaks, so oversized
    /// boxes cannot cause an endless run of empty pages.
    pub fn needs_page_break(&self, height: Mm) -> bool {
        let Some(bottom) = self.auto_page_break else {
            return false;
        };
        let trigger = self.page_size.1 - bottom;
        let y = self.cursor.1;
        y + height > trigger && y > self.margins.top
    }

    /// Move the cursor past a box drawn at `origin`
    pub fn advance(&mut self, origin: (Mm, Mm), width: Mm, height: Mm, advance: CursorAdvance) {
        let x = match advance.x {
            NextX::Left => origin.0,
            NextX::Right => origin.0 + width,
            NextX::LeftMargin => self.margins.left,
        };
        let y = match advance.y {
            NextY::Top => origin.1,
            NextY::Next => origin.1 + height,
        };
        self.cursor = (x, y);
    }
}
