use crate::{
    font::Font,
    image::Image,
    page::Page,
    refs::{ObjectReferences, RefType},
    PDFError,
};
use id_arena::{Arena, Id};
use pdf_writer::{Finish, Pdf, Ref};
use std::io::Write;

#[derive(Default)]
/// A document is the main object that stores all the contents of the PDF
/// then renders it out with a call to [Document::write]
pub struct Document {
    pub pages: Arena<Page>,
    pub page_order: Vec<Id<Page>>,
    pub fonts: Arena<Font>,
    pub images: Arena<Image>,
}

impl Document {
    /// Add a page to the end of the document, returning its id
    pub fn add_page(&mut self, page: Page) -> Id<Page> {
        let id = self.pages.alloc(page);
        self.page_order.push(id);
        id
    }

    /// Get the 0-based index of a page given its ID. Note that changing the page order
    /// after this call _will_ invalidate the returned page index
    pub fn index_of_page(&self, page: Id<Page>) -> Option<usize> {
        self.page_order.iter().position(|p| *p == page)
    }

    /// The page at position `page_index`, if there is one
    pub fn page_at(&self, page_index: usize) -> Option<&Page> {
        self.page_order
            .get(page_index)
            .and_then(|id| self.pages.get(*id))
    }

    /// Mutable access to the page at position `page_index`
    pub fn page_at_mut(&mut self, page_index: usize) -> Option<&mut Page> {
        let id = *self.page_order.get(page_index)?;
        self.pages.get_mut(id)
    }

    /// Number of pages in document order
    pub fn page_count(&self) -> usize {
        self.page_order.len()
    }

    /// Add a font to the document structure. Fonts are stored "globally" within the
    /// document, such that any page can refer to them by id.
    pub fn add_font(&mut self, font: Font) -> Id<Font> {
        self.fonts.alloc(font)
    }

    /// Add an image to the document structure. Like fonts, an image is stored once and
    /// can be placed on any number of pages.
    pub fn add_image(&mut self, image: Image) -> Id<Image> {
        self.images.alloc(image)
    }

    /// Write the entire document to the writer. Although this can write to arbitrary
    /// streams, the entire document is rendered in memory first.
    ///
    /// Until `write` is called, all references are un-resolved; calling it generates
    /// the PDF objects and the references between them.
    pub fn write<W: Write>(self, mut w: W) -> Result<(), PDFError> {
        let Document {
            pages,
            page_order,
            fonts,
            images,
        } = self;

        let mut refs = ObjectReferences::new();

        let catalog_id = refs.allocate(RefType::Catalog);
        let page_tree_id = refs.allocate(RefType::PageTree);

        let mut writer = Pdf::new();

        // page refs follow the page order, not the arena order
        let page_refs: Vec<Ref> = (0..page_order.len())
            .map(|i| refs.allocate(RefType::Page(i)))
            .collect();

        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs);

        for (id, font) in fonts.iter() {
            font.write(&mut refs, id, &mut writer);
        }

        for (id, image) in images.iter() {
            image.write(&mut refs, id.index(), &mut writer);
        }

        for (page_index, id) in page_order.iter().enumerate() {
            let page = pages.get(*id).ok_or(PDFError::PageMissing)?;
            page.write(&mut refs, page_index, &fonts, &images, &mut writer)?;
        }

        let mut catalog = writer.catalog(catalog_id);
        catalog.pages(page_tree_id);
        catalog.finish();

        tracing::debug!(
            pages = page_order.len(),
            fonts = fonts.len(),
            images = images.len(),
            "writing document"
        );
        w.write_all(writer.finish().as_slice()).map_err(Into::into)
    }
}
