use super::{
    block_lines, Align, Canvas, CanvasConfig, Cell, DrawingContext, FontState, TextBlock,
};
use crate::image::Image;
use crate::standard_font::StandardFont;
use crate::units::Mm;
use id_arena::{Arena, Id};

/// How a [RecordingCanvas] measures characters
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum WidthTable {
    /// Every character has the same advance, in thousandths of an em
    Uniform(f32),
    /// The metrics of the built-in Helvetica faces, matching
    /// [PdfCanvas](super::PdfCanvas) with its default font family
    Helvetica,
}

/// A draw call as seen by a [RecordingCanvas], in layout coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Cell {
        x: Mm,
        y: Mm,
        width: Mm,
        height: Mm,
        text: String,
        border: bool,
        fill: bool,
        align: Align,
        font: FontState,
    },
    MultiCell {
        x: Mm,
        y: Mm,
        width: Mm,
        line_height: Mm,
        /// The wrapped lines, as they would be drawn
        lines: Vec<String>,
        border: bool,
        fill: bool,
        align: Align,
        font: FontState,
    },
    Image {
        id: Id<Image>,
        x: Mm,
        y: Mm,
        width: Mm,
        height: Mm,
    },
    NewPage,
}

impl DrawCall {
    /// The box the call covers as (x, y, width, height), if it draws one
    pub fn bounds(&self) -> Option<(Mm, Mm, Mm, Mm)> {
        match *self {
            DrawCall::Cell {
                x,
                y,
                width,
                height,
                ..
            }
            | DrawCall::Image {
                x,
                y,
                width,
                height,
                ..
            } => Some((x, y, width, height)),
            DrawCall::MultiCell {
                x,
                y,
                width,
                line_height,
                ref lines,
                ..
            } => Some((x, y, width, line_height * lines.len().max(1) as f32)),
            DrawCall::NewPage => None,
        }
    }
}

/// A canvas that lays text out exactly like [PdfCanvas](super::PdfCanvas) but only
/// records what would have been drawn.
pub struct RecordingCanvas {
    context: DrawingContext,
    widths: WidthTable,
    images: Arena<Image>,
    calls: Vec<DrawCall>,
    pages: usize,
}

impl Default for RecordingCanvas {
    fn default() -> Self {
        RecordingCanvas::new(CanvasConfig::default(), WidthTable::Helvetica)
    }
}

impl RecordingCanvas {
    pub fn new(config: CanvasConfig, widths: WidthTable) -> RecordingCanvas {
        RecordingCanvas {
            context: DrawingContext::new(&config),
            widths,
            images: Arena::new(),
            calls: Vec::new(),
            pages: 1,
        }
    }

    /// Everything drawn so far, in order
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Take the recorded calls, leaving the record empty
    pub fn take_calls(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn page_count(&self) -> usize {
        self.pages
    }

    fn record_block(
        &mut self,
        x: Mm,
        y: Mm,
        width: Mm,
        block: &TextBlock<'_>,
        lines: Vec<String>,
    ) {
        self.calls.push(DrawCall::MultiCell {
            x,
            y,
            width,
            line_height: block.line_height,
            lines,
            border: block.border,
            fill: block.fill,
            align: block.align,
            font: self.context.font,
        });
    }
}

impl Canvas for RecordingCanvas {
    fn context(&self) -> &DrawingContext {
        &self.context
    }

    fn context_mut(&mut self) -> &mut DrawingContext {
        &mut self.context
    }

    fn char_width(&self, ch: char) -> f32 {
        match self.widths {
            WidthTable::Uniform(width) => width,
            WidthTable::Helvetica => {
                StandardFont::helvetica(self.context.font.style).char_width(ch) as f32
            }
        }
    }

    fn cell(&mut self, cell: Cell<'_>) {
        self.ensure_room(cell.height);
        let (x, y) = self.cursor();
        let width = if cell.width == Mm(0.0) {
            self.available_width()
        } else {
            cell.width
        };
        self.calls.push(DrawCall::Cell {
            x,
            y,
            width,
            height: cell.height,
            text: cell.text.to_string(),
            border: cell.border,
            fill: cell.fill,
            align: cell.align,
            font: self.context.font,
        });
        self.context.last_height = Some(cell.height);
        self.context.advance((x, y), width, cell.height, cell.advance);
    }

    fn multi_cell(&mut self, block: TextBlock<'_>) {
        let (x, mut top) = self.cursor();
        let (width, lines) = block_lines(&*self, &block);
        let rows = lines.len().max(1);
        let mut lines = lines.into_iter().map(|line| line.text);

        // each line may start a new page; the lines drawn on each page are one call
        let mut drawn = Vec::new();
        for _ in 0..rows {
            if self.context.needs_page_break(block.line_height) {
                if !drawn.is_empty() {
                    self.record_block(x, top, width, &block, std::mem::take(&mut drawn));
                }
                self.ensure_room(block.line_height);
                top = self.cursor().1;
            }
            drawn.extend(lines.next());
            let y = self.cursor().1;
            self.set_cursor(x, y + block.line_height);
        }
        self.record_block(x, top, width, &block, drawn);

        let height = self.cursor().1 - top;
        self.context.last_height = Some(block.line_height);
        self.context.advance((x, top), width, height, block.advance);
    }

    fn new_page(&mut self) {
        self.pages += 1;
        self.calls.push(DrawCall::NewPage);
        self.context.reset_cursor();
    }

    fn add_image(&mut self, image: Image) -> Id<Image> {
        self.images.alloc(image)
    }

    fn image_size(&self, id: Id<Image>) -> Option<(Mm, Mm)> {
        self.images.get(id).map(Image::size_mm)
    }

    fn image(&mut self, id: Id<Image>, x: Mm, y: Mm, width: Mm, height: Mm) {
        self.calls.push(DrawCall::Image {
            id,
            x,
            y,
            width,
            height,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{NextX, NextY};

    #[test]
    fn zero_width_cells_run_to_the_right_margin() {
        let mut canvas = RecordingCanvas::default();
        canvas.set_cursor(Mm(50.0), Mm(10.0));
        canvas.cell(Cell::new(Mm(0.0), Mm(5.0)).advance(NextX::LeftMargin, NextY::Next));
        let Some((_, _, width, _)) = canvas.calls()[0].bounds() else {
            panic!("cells have bounds");
        };
        assert!((*width - (*canvas.page_width() - 60.0)).abs() < 1e-3);
        assert_eq!(canvas.cursor(), (Mm(10.0), Mm(15.0)));
    }

    #[test]
    fn wrapped_blocks_record_their_lines() {
        let mut canvas = RecordingCanvas::new(CanvasConfig::default(), WidthTable::Uniform(500.0));
        let block = TextBlock::new(Mm(0.0), Mm(5.0), "first\nsecond").advance(NextX::Left, NextY::Next);
        canvas.multi_cell(block);
        match &canvas.calls()[0] {
            DrawCall::MultiCell { lines, .. } => assert_eq!(lines, &["first", "second"]),
            other => panic!("unexpected call {other:?}"),
        }
        assert_eq!(canvas.cursor(), (Mm(10.0), Mm(20.0)));
    }

    #[test]
    fn wrapped_blocks_continue_on_a_new_page() {
        let mut canvas = RecordingCanvas::new(CanvasConfig::default(), WidthTable::Uniform(500.0));
        canvas.set_cursor(Mm(10.0), Mm(270.0));
        let block = TextBlock::new(Mm(50.0), Mm(5.0), "a\nb\nc").advance(NextX::Left, NextY::Next);
        canvas.multi_cell(block);

        let placed: Vec<Option<(Mm, Vec<String>)>> = canvas
            .calls()
            .iter()
            .map(|call| match call {
                DrawCall::MultiCell { y, lines, .. } => Some((*y, lines.clone())),
                _ => None,
            })
            .collect();
        assert_eq!(
            placed,
            vec![
                Some((Mm(270.0), vec!["a".to_string()])),
                None,
                Some((Mm(10.0), vec!["b".to_string(), "c".to_string()])),
            ]
        );
        assert_eq!(canvas.calls()[1], DrawCall::NewPage);
        assert_eq!(canvas.page_count(), 2);
        assert_eq!(canvas.cursor(), (Mm(10.0), Mm(20.0)));
    }

    #[test]
    fn cells_past_the_trigger_start_a_new_page() {
        let mut canvas = RecordingCanvas::default();
        canvas.set_cursor(Mm(30.0), Mm(275.0));
        canvas.cell(Cell::new(Mm(20.0), Mm(5.0)));
        assert_eq!(canvas.page_count(), 2);
        assert_eq!(canvas.calls()[0], DrawCall::NewPage);
        assert_eq!(canvas.cursor(), (Mm(50.0), Mm(10.0)));
    }
}
