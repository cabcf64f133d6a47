use super::{
    block_lines, line_align, Align, Canvas, CanvasConfig, Cell, DrawingContext, FamilyId,
    FontState, NextX, NextY, TextBlock,
};
use crate::document::Document;
use crate::font::Font;
use crate::image::Image;
use crate::page::{ImageLayout, Page, ShapeLayout, SpanFont, SpanLayout};
use crate::rect::Rect;
use crate::standard_font::StandardFont;
use crate::units::{Mm, Pt};
use crate::PDFError;
use id_arena::Id;
use std::io::Write;
use std::path::Path;

/// A canvas that draws onto the pages of a [Document].
///
/// The canvas starts with one empty page and the Helvetica family selected. Pages are
/// added as the cursor runs past the automatic page break, or explicitly with
/// [new_page](Canvas::new_page).
///
/// ```
/// use pdf_table::canvas::{Canvas, Cell, PdfCanvas};
/// use pdf_table::Mm;
///
/// let mut canvas = PdfCanvas::default();
/// canvas.cell(Cell::new(Mm(60.0), Mm(5.0)).text("Hello").border(true));
///
/// let mut out = Vec::new();
/// canvas.write(&mut out).expect("can write to memory");
/// assert!(out.starts_with(b"%PDF-"));
/// ```
pub struct PdfCanvas {
    context: DrawingContext,
    document: Document,
    page: Id<Page>,
    families: Vec<[Id<Font>; 4]>,
}

impl Default for PdfCanvas {
    fn default() -> Self {
        PdfCanvas::new(CanvasConfig::default())
    }
}

impl PdfCanvas {
    pub fn new(config: CanvasConfig) -> PdfCanvas {
        let context = DrawingContext::new(&config);
        let mut document = Document::default();
        let helvetica = [
            StandardFont::Helvetica,
            StandardFont::HelveticaBold,
            StandardFont::HelveticaOblique,
            StandardFont::HelveticaBoldOblique,
        ]
        .map(|face| document.add_font(Font::standard(face)));
        let page = document.add_page(Self::blank_page(&context));
        PdfCanvas {
            context,
            document,
            page,
            families: vec![helvetica],
        }
    }

    fn blank_page(context: &DrawingContext) -> Page {
        let size = (context.page_size.0.into(), context.page_size.1.into());
        Page::new(size, Some(&context.margins))
    }

    /// Load a family of four font files from `dir`: `{name}.{extension}` and the
    /// `-Bold`, `-Oblique` and `-BoldOblique` variants of it.
    pub fn add_font_family<P: AsRef<Path>>(
        &mut self,
        dir: P,
        name: &str,
        extension: &str,
    ) -> Result<FamilyId, PDFError> {
        let dir = dir.as_ref();
        let load = |suffix: &str| Font::load_from_disk(dir.join(format!("{name}{suffix}.{extension}")));
        let fonts = [
            load("")?,
            load("-Bold")?,
            load("-Oblique")?,
            load("-BoldOblique")?,
        ];
        let ids = fonts.map(|font| self.document.add_font(font));
        self.families.push(ids);
        tracing::debug!(name, dir = %dir.display(), "loaded font family");
        Ok(FamilyId(self.families.len() - 1))
    }

    /// The document being drawn
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn page_count(&self) -> usize {
        self.document.page_count()
    }

    /// Stop drawing and take the document
    pub fn finish(self) -> Document {
        self.document
    }

    /// Write the finished document to `w`
    pub fn write<W: Write>(self, w: W) -> Result<(), PDFError> {
        self.finish().write(w)
    }

    fn font_id(&self) -> Id<Font> {
        let FontState { family, style, .. } = self.context.font;
        let faces = self.families.get(family.0).unwrap_or(&self.families[0]);
        faces[style.index()]
    }

    fn current_page(&mut self) -> &mut Page {
        &mut self.document.pages[self.page]
    }

    fn to_page(&self, x: Mm, y: Mm) -> (Pt, Pt) {
        let page_height: Pt = self.context.page_size.1.into();
        (x.into(), page_height - y.into())
    }

    fn paint_box(&mut self, (x, y): (Mm, Mm), width: Mm, height: Mm, border: bool, fill: bool) {
        if !border && !fill {
            return;
        }
        let colours = self.context.colours;
        let shape = ShapeLayout {
            rect: Rect::from_layout(x, y, width, height, self.context.page_size.1.into()),
            fill: fill.then_some(colours.fill),
            stroke: border.then_some(colours.draw),
            line_width: self.context.line_width.into(),
        };
        self.current_page().add_shape(shape);
    }

    fn paint_text(&mut self, (x, y): (Mm, Mm), width: Mm, height: Mm, text: &str, align: Align) {
        let shown: String = text.chars().filter_map(|ch| self.normalize_char(ch)).collect();
        if shown.is_empty() {
            return;
        }
        let font = &self.document.fonts[self.font_id()];
        if let Some(ch) = shown.chars().find(|ch| !font.can_render(*ch)) {
            tracing::warn!(?ch, font = %font.name(), "no glyph for character, substituting");
        }

        let span_font = SpanFont {
            id: self.font_id(),
            size: self.context.font.size,
        };
        let colour = self.context.colours.text;
        let margin = self.cell_margin();
        let text_width = self.text_width(&shown);
        let baseline = y + height * 0.5 + self.font_size() * 0.3;
        let start = match align {
            Align::Left | Align::Justify => x + margin,
            Align::Center => x + (width - text_width) / 2.0,
            Align::Right => x + width - margin - text_width,
        };

        let trimmed = shown.trim_end_matches(' ');
        let spaces = trimmed.matches(' ').count();
        let free = width - margin * 2.0 - self.text_width(trimmed);
        if align != Align::Justify || spaces == 0 || free <= Mm(0.0) {
            let span = SpanLayout {
                text: shown,
                font: span_font,
                colour,
                coords: self.to_page(start, baseline),
            };
            self.current_page().add_span(span);
            return;
        }

        // spread the free width over the gaps between words
        let gap = self.text_width(" ") + free / spaces as f32;
        let mut cursor = start;
        let mut spans = Vec::with_capacity(spaces + 1);
        for word in trimmed.split(' ') {
            if !word.is_empty() {
                spans.push(SpanLayout {
                    text: word.to_string(),
                    font: span_font,
                    colour,
                    coords: self.to_page(cursor, baseline),
                });
            }
            cursor += self.text_width(word) + gap;
        }
        self.current_page().add_spans(spans);
    }
}

impl Canvas for PdfCanvas {
    fn context(&self) -> &DrawingContext {
        &self.context
    }

    fn context_mut(&mut self) -> &mut DrawingContext {
        &mut self.context
    }

    fn char_width(&self, ch: char) -> f32 {
        self.document.fonts[self.font_id()].char_width(ch)
    }

    fn set_font(&mut self, mut font: FontState) {
        if font.family.0 >= self.families.len() {
            tracing::warn!(family = font.family.0, "unknown font family, using Helvetica");
            font.family = FamilyId::HELVETICA;
        }
        self.context.font = font;
    }

    fn cell(&mut self, cell: Cell<'_>) {
        self.ensure_room(cell.height);
        let origin = self.cursor();
        let width = if cell.width == Mm(0.0) {
            self.available_width()
        } else {
            cell.width
        };
        self.paint_box(origin, width, cell.height, cell.border, cell.fill);
        self.paint_text(origin, width, cell.height, cell.text, cell.align);
        self.context.last_height = Some(cell.height);
        self.context.advance(origin, width, cell.height, cell.advance);
    }

    fn multi_cell(&mut self, block: TextBlock<'_>) {
        let (x, mut top) = self.cursor();
        let start_page = self.page;
        let (width, lines) = block_lines(&*self, &block);

        let mut rows: Vec<(String, Align)> = lines
            .iter()
            .map(|line| (line.text.clone(), line_align(block.align, line)))
            .collect();
        if rows.is_empty() {
            rows.push((String::new(), Align::Left));
        }

        for (text, align) in rows.iter() {
            let line = Cell::new(width, block.line_height)
                .text(text)
                .fill(block.fill)
                .align(*align)
                .advance(NextX::Left, NextY::Next);
            self.cell(line);
            if self.page != start_page {
                // the block continued on a new page
                top = self.context.margins.top;
            }
        }

        let bottom = self.cursor().1;
        let height = bottom - top;
        if block.border {
            self.paint_box((x, top), width, height, true, false);
        }
        self.context.last_height = Some(block.line_height);
        self.context.advance((x, top), width, height, block.advance);
    }

    fn new_page(&mut self) {
        self.page = self.document.add_page(Self::blank_page(&self.context));
        self.context.reset_cursor();
    }

    fn add_image(&mut self, image: Image) -> Id<Image> {
        self.document.add_image(image)
    }

    fn image_size(&self, id: Id<Image>) -> Option<(Mm, Mm)> {
        self.document.images.get(id).map(Image::size_mm)
    }

    fn image(&mut self, id: Id<Image>, x: Mm, y: Mm, width: Mm, height: Mm) {
        let position = Rect::from_layout(x, y, width, height, self.context.page_size.1.into());
        self.current_page().add_image(ImageLayout {
            image_id: id,
            position,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PageContents;

    #[test]
    fn cells_draw_a_box_and_a_span() {
        let mut canvas = PdfCanvas::default();
        canvas.cell(Cell::new(Mm(40.0), Mm(5.0)).text("Total").border(true));
        let document = canvas.finish();
        let page = document.page_at(0).expect("canvas starts with a page");
        assert_eq!(page.contents.len(), 2);
        assert!(matches!(page.contents[0], PageContents::Shape(_)));
        assert!(matches!(&page.contents[1], PageContents::Text(spans) if spans[0].text == "Total"));
    }

    #[test]
    fn justified_lines_are_split_into_words() {
        let mut canvas = PdfCanvas::default();
        canvas.cell(Cell::new(Mm(100.0), Mm(5.0)).text("one two three").align(Align::Justify));
        let document = canvas.finish();
        let page = document.page_at(0).expect("canvas starts with a page");
        let PageContents::Text(spans) = &page.contents[0] else {
            panic!("expected text");
        };
        let words: Vec<&str> = spans.iter().map(|span| span.text.as_str()).collect();
        assert_eq!(words, vec!["one", "two", "three"]);
        // the last word ends at the right edge, minus the cell margin
        let start_of_three = Mm::from(spans[2].coords.0);
        let font_size: Mm = Pt(12.0).into();
        let three = font_size * (278.0 + 556.0 + 333.0 + 556.0 + 556.0) / 1000.0;
        assert!((*(start_of_three + three + Mm(1.0)) - 110.0).abs() < 1e-2);
    }

    #[test]
    fn unknown_families_fall_back_to_helvetica() {
        let mut canvas = PdfCanvas::default();
        let font = FontState {
            family: FamilyId(7),
            ..canvas.font()
        };
        canvas.set_font(font);
        assert_eq!(canvas.font().family, FamilyId::HELVETICA);
    }

    #[test]
    fn missing_font_files_are_errors() {
        let mut canvas = PdfCanvas::default();
        let result = canvas.add_font_family("/nonexistent", "Nothing", "ttf");
        assert!(matches!(result, Err(PDFError::Io(_))));
    }

    #[test]
    fn new_pages_are_added_to_the_document() {
        let mut canvas = PdfCanvas::default();
        canvas.new_page();
        canvas.new_page();
        assert_eq!(canvas.page_count(), 3);
        assert_eq!(canvas.cursor(), (Mm(10.0), Mm(10.0)));
    }
}
