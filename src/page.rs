use crate::colour::Colour;
use crate::content::render_contents;
use crate::font::Font;
use crate::image::Image;
use crate::layout::Margins;
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::units::*;
use crate::PDFError;
use id_arena::{Arena, Id};
use pdf_writer::{Finish, Name, Pdf};

/// Which font (and at what size) a span is set in
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub id: Id<Font>,
    pub size: Pt,
}

/// A run of text in a single font and colour, starting at a baseline position
#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout {
    pub text: String,
    pub font: SpanFont,
    pub colour: Colour,
    /// Baseline start, in page space
    pub coords: (Pt, Pt),
}

#[derive(Clone, PartialEq, Debug)]
pub struct ImageLayout {
    pub image_id: Id<Image>,
    pub position: Rect,
}

/// A rectangle that is filled, stroked, or both
#[derive(Clone, PartialEq, Debug)]
pub struct ShapeLayout {
    pub rect: Rect,
    pub fill: Option<Colour>,
    pub stroke: Option<Colour>,
    pub line_width: Pt,
}

#[derive(Clone, PartialEq, Debug)]
pub enum PageContents {
    Text(Vec<SpanLayout>),
    Image(ImageLayout),
    Shape(ShapeLayout),
}

pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    /// Where content should live, i.e. within the margins
    pub content_box: Rect,
    /// Everything drawn on the page, in painting order
    pub contents: Vec<PageContents>,
}

impl Page {
    /// Create an empty page. Margins are written as the page's art box
    pub fn new(size: PageSize, margins: Option<&Margins>) -> Page {
        let media_box = Rect {
            x1: Pt(0.0),
            y1: Pt(0.0),
            x2: size.0,
            y2: size.1,
        };
        let content_box = match margins {
            Some(margins) => Rect {
                x1: margins.left.into(),
                y1: margins.bottom.into(),
                x2: size.0 - margins.right.into(),
                y2: size.1 - margins.top.into(),
            },
            None => media_box,
        };
        Page {
            media_box,
            content_box,
            contents: Vec::default(),
        }
    }

    pub fn height(&self) -> Pt {
        self.media_box.height()
    }

    pub fn add_span(&mut self, span: SpanLayout) {
        self.contents.push(PageContents::Text(vec![span]));
    }

    /// Add several spans that share one text object, such as the words of a
    /// justified line
    pub fn add_spans(&mut self, spans: Vec<SpanLayout>) {
        if !spans.is_empty() {
            self.contents.push(PageContents::Text(spans));
        }
    }

    pub fn add_image(&mut self, image: ImageLayout) {
        self.contents.push(PageContents::Image(image));
    }

    pub fn add_shape(&mut self, shape: ShapeLayout) {
        self.contents.push(PageContents::Shape(shape));
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        fonts: &Arena<Font>,
        images: &Arena<Image>,
        writer: &mut Pdf,
    ) -> Result<(), PDFError> {
        let id = refs.get_or_allocate(RefType::Page(page_index));
        let content_id = refs.allocate(RefType::ContentForPage(page_index));
        let page_tree_id = refs.get_or_allocate(RefType::PageTree);

        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        page.art_box(self.content_box.into());
        page.parent(page_tree_id);

        let mut resources = page.resources();
        let mut resource_fonts = resources.fonts();
        for (font_id, _) in fonts.iter() {
            if let Some(font_ref) = refs.get(RefType::Font(font_id.index())) {
                resource_fonts.pair(Name(format!("F{}", font_id.index()).as_bytes()), font_ref);
            }
        }
        resource_fonts.finish();
        let mut resource_xobjects = resources.x_objects();
        for (image_id, _) in images.iter() {
            if let Some(image_ref) = refs.get(RefType::Image(image_id.index())) {
                resource_xobjects.pair(Name(format!("I{}", image_id.index()).as_bytes()), image_ref);
            }
        }
        resource_xobjects.finish();
        resources.finish();

        page.contents(content_id);
        page.finish();

        let rendered = render_contents(&self.contents, fonts)?;
        writer.stream(content_id, rendered.as_slice());
        Ok(())
    }
}
