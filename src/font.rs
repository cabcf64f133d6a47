use crate::{
    refs::{ObjectReferences, RefType},
    standard_font::StandardFont,
    PDFError,
};
use id_arena::Id;
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use owned_ttf_parser::{AsFaceRef, GlyphId, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Filter, Finish, Name, Pdf, Ref, Str,
};
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

/// Where the glyphs of a [Font] come from
pub enum FontSource {
    /// One of the standard 14 faces every PDF reader provides; never embedded
    Standard(StandardFont),
    /// A parsed TTF or OTF font, embedded in its entirety in the generated PDF
    Embedded(OwnedFace),
}

/// A font that text can be measured and drawn with.
///
/// Fonts are stored "globally" in a [Document](crate::Document) and referred to by
/// their [Id] everywhere else.
pub struct Font {
    pub source: FontSource,
}

impl Font {
    /// Use one of the built-in standard faces
    pub fn standard(face: StandardFont) -> Font {
        Font {
            source: FontSource::Standard(face),
        }
    }

    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, PDFError> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        Ok(Font {
            source: FontSource::Embedded(face),
        })
    }

    /// Read and parse a font file
    pub fn load_from_disk<P: AsRef<Path>>(path: P) -> Result<Font, PDFError> {
        let bytes = std::fs::read(path.as_ref())?;
        Font::load(bytes)
    }

    /// The full name of the font, falling back to the family name
    pub fn name(&self) -> String {
        match &self.source {
            FontSource::Standard(face) => face.base_font().to_string(),
            FontSource::Embedded(face) => {
                let face = face.as_face_ref();
                [
                    owned_ttf_parser::name_id::FULL_NAME,
                    owned_ttf_parser::name_id::FAMILY,
                ]
                .into_iter()
                .find_map(|id| {
                    face.names()
                        .into_iter()
                        .find(|name| name.name_id == id && name.is_unicode())
                        .and_then(|name| name.to_string())
                })
                .unwrap_or_else(|| "Embedded".to_string())
            }
        }
    }

    /// Advance width of `ch` in thousandths of an em. Characters the font can't show
    /// are measured as the glyph that will be drawn in their place.
    pub fn char_width(&self, ch: char) -> f32 {
        match &self.source {
            FontSource::Standard(face) => face.char_width(ch) as f32,
            FontSource::Embedded(face) => {
                let face = face.as_face_ref();
                let advance = face
                    .glyph_hor_advance(GlyphId(self.glyph_id_or_replacement(ch)))
                    .unwrap_or_default();
                advance as f32 * 1000.0 / face.units_per_em() as f32
            }
        }
    }

    /// Whether the font has a glyph (or an encoding) for `ch`
    pub fn can_render(&self, ch: char) -> bool {
        match &self.source {
            FontSource::Standard(face) => face.can_encode(ch),
            FontSource::Embedded(_) => self.glyph_id(ch).is_some(),
        }
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        match &self.source {
            FontSource::Standard(_) => None,
            FontSource::Embedded(face) => face.as_face_ref().glyph_index(ch).map(|i| i.0),
        }
    }

    fn glyph_id_or_replacement(&self, ch: char) -> u16 {
        self.glyph_id(ch)
            .or_else(|| self.glyph_id('\u{FFFD}'))
            .or_else(|| self.glyph_id('?'))
            .unwrap_or(0)
    }

    /// Write `text` as the hex string operand of a `Tj` operator, without the
    /// surrounding angle brackets
    pub(crate) fn write_hex<W: Write>(&self, text: &str, out: &mut W) -> std::io::Result<()> {
        match &self.source {
            FontSource::Standard(face) => {
                for ch in text.chars() {
                    write!(out, "{:02x}", face.encode(ch))?;
                }
            }
            FontSource::Embedded(_) => {
                for ch in text.chars() {
                    write!(out, "{:04x}", self.glyph_id_or_replacement(ch))?;
                }
            }
        }
        Ok(())
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, id: Id<Font>, writer: &mut Pdf) {
        let font_index = id.index();
        let font_id = refs.allocate(RefType::Font(font_index));
        match &self.source {
            FontSource::Standard(face) => {
                writer
                    .type1_font(font_id)
                    .base_font(Name(face.base_font().as_bytes()))
                    .encoding_predefined(Name(b"WinAnsiEncoding"));
            }
            FontSource::Embedded(owned) => {
                let face = owned.as_face_ref();
                let cid_font_id = write_cid(face, owned.as_slice(), refs, font_index, writer);
                let to_unicode_id = write_to_unicode(face, refs, font_index, writer);

                let mut font = writer.type0_font(font_id);
                font.base_font(Name(format!("F{font_index}").as_bytes()));
                font.encoding_predefined(Name(b"Identity-H"));
                font.descendant_font(cid_font_id);
                font.to_unicode(to_unicode_id);
            }
        }
    }
}

fn write_cid(
    face: &owned_ttf_parser::Face<'_>,
    data: &[u8],
    refs: &mut ObjectReferences,
    font_index: usize,
    writer: &mut Pdf,
) -> Ref {
    let font_descriptor_id = write_descriptor(face, data, refs, font_index, writer);

    let id = refs.allocate(RefType::CidFont(font_index));
    let scaling = 1000.0 / face.units_per_em() as f32;

    let mut id_widths: Vec<(u16, f32)> = glyphs_sizing(face, &glyph_ids(face))
        .into_iter()
        .map(|(gid, (_, (width, _)))| (gid, width as f32 * scaling))
        .collect();
    id_widths.sort_by_key(|(gid, _)| *gid);

    // the most popular width becomes the default
    let mut widths_counts: HashMap<u32, usize> = HashMap::new();
    for (_, width) in id_widths.iter() {
        *widths_counts.entry(width.round() as u32).or_insert(0) += 1;
    }
    let default_width = widths_counts
        .into_iter()
        .max_by_key(|&(width, count)| (count, width))
        .map(|(width, _)| width as f32)
        .unwrap_or(1000.0);

    let mut cid_font = writer.cid_font(id);
    cid_font.subtype(CidFontType::Type2);
    cid_font.base_font(Name(format!("F{font_index}").as_bytes()));
    cid_font.system_info(SystemInfo {
        registry: Str(b"Adobe"),
        ordering: Str(b"Identity"),
        supplement: 0,
    });
    cid_font.font_descriptor(font_descriptor_id);

    let mut widths = cid_font.widths();
    // group runs of consecutive glyph ids into a single entry each
    let mut start: u16 = 0;
    let mut run: Vec<f32> = Vec::new();
    for (gid, width) in id_widths {
        if !run.is_empty() && start as usize + run.len() != gid as usize {
            widths.consecutive(start, run.drain(..));
        }
        if run.is_empty() {
            start = gid;
        }
        run.push(width);
    }
    if !run.is_empty() {
        widths.consecutive(start, run);
    }
    widths.finish();

    cid_font.default_width(default_width);
    cid_font.cid_to_gid_map_predefined(Name(b"Identity"));

    id
}

fn write_font_data(
    raw: &[u8],
    refs: &mut ObjectReferences,
    font_index: usize,
    writer: &mut Pdf,
) -> Ref {
    let id = refs.allocate(RefType::FontData(font_index));
    let compressed = compress_to_vec_zlib(raw, CompressionLevel::DefaultLevel as u8);

    let mut stream = writer.stream(id, compressed.as_slice());
    stream.filter(Filter::FlateDecode);
    stream.pair(Name(b"Length1"), raw.len() as i32);

    id
}

fn write_descriptor(
    face: &owned_ttf_parser::Face<'_>,
    data: &[u8],
    refs: &mut ObjectReferences,
    font_index: usize,
    writer: &mut Pdf,
) -> Ref {
    let font_data_stream_id = write_font_data(data, refs, font_index, writer);

    let sizing = glyphs_sizing(face, &glyph_ids(face));
    let max_width = sizing
        .values()
        .map(|&(_, (w, _))| w)
        .max()
        .unwrap_or_default();
    let max_height = sizing
        .values()
        .map(|&(_, (_, h))| h)
        .max()
        .unwrap_or_default();
    let sum_width: usize = sizing.values().map(|&(_, (w, _))| w as usize).sum();
    let avg_width = sum_width as f32 / sizing.len().max(1) as f32;

    let id = refs.allocate(RefType::FontDescriptor(font_index));
    let scaling = 1000.0 / face.units_per_em() as f32;

    let mut descriptor = writer.font_descriptor(id);
    descriptor.name(Name(format!("F{font_index}").as_bytes()));
    descriptor.weight(face.weight().to_number());

    let mut flags = FontFlags::NON_SYMBOLIC;
    if face.is_monospaced() {
        flags.set(FontFlags::FIXED_PITCH, true);
    }
    if face.is_italic() {
        flags.set(FontFlags::ITALIC, true);
    }
    descriptor.flags(flags);

    descriptor.bbox(pdf_writer::Rect {
        x1: 0.0,
        y1: face.descender() as f32 * scaling,
        x2: max_width as f32 * scaling,
        y2: max_height as f32 * scaling,
    });
    descriptor.italic_angle(face.italic_angle());
    descriptor.ascent(face.ascender() as f32 * scaling);
    descriptor.descent(face.descender() as f32 * scaling);
    descriptor.leading(face.line_gap() as f32 * scaling);
    let cap_height = face.capital_height().unwrap_or(face.ascender());
    descriptor.cap_height(cap_height as f32 * scaling);
    descriptor.x_height(face.x_height().unwrap_or(cap_height) as f32 * scaling);
    // TODO: derive from the OS/2 weight class instead of a fixed stem width
    descriptor.stem_v(80.0);
    descriptor.avg_width(avg_width * scaling);
    descriptor.max_width(max_width as f32 * scaling);
    descriptor.missing_width(max_width as f32 * scaling);
    descriptor.font_file2(font_data_stream_id);

    id
}

/// Map of glyph id to the first unicode character that maps onto it
fn glyph_ids(face: &owned_ttf_parser::Face<'_>) -> HashMap<u16, char> {
    let mut map: HashMap<u16, char> = HashMap::new();
    let Some(cmap) = face.tables().cmap else {
        return map;
    };

    for subtable in cmap.subtables.into_iter().filter(|table| table.is_unicode()) {
        subtable.codepoints(|codepoint: u32| {
            if let Ok(ch) = char::try_from(codepoint) {
                if let Some(index) = subtable.glyph_index(codepoint).filter(|index| index.0 > 0) {
                    map.entry(index.0).or_insert(ch);
                }
            }
        });
    }

    map
}

/// Glyph id to (char, (advance, height)) in font units
fn glyphs_sizing(
    face: &owned_ttf_parser::Face<'_>,
    ids: &HashMap<u16, char>,
) -> HashMap<u16, (char, (u16, i16))> {
    let mut sizing = HashMap::new();
    for (&id, &ch) in ids.iter() {
        let gid = GlyphId(id);
        if let Some(h_advance) = face.glyph_hor_advance(gid) {
            let height = face
                .glyph_bounding_box(gid)
                .map(|bbox| bbox.y_max - bbox.y_min - face.descender())
                .unwrap_or(1000);
            sizing.insert(id, (ch, (h_advance, height)));
        }
    }
    sizing
}

fn write_to_unicode(
    face: &owned_ttf_parser::Face<'_>,
    refs: &mut ObjectReferences,
    font_index: usize,
    writer: &mut Pdf,
) -> Ref {
    let id = refs.allocate(RefType::ToUnicode(font_index));

    let mut map = String::from(
        "/CIDInit /ProcSet findresource begin\n\
         12 dict begin\n\
         begincmap\n\
         /CIDSystemInfo\n\
         << /Registry (Adobe)\n\
         /Ordering (UCS) /Supplement 0 >> def\n\
         /CMapName /Adobe-Identity-UCS def\n\
         /CMapType 2 def\n\
         1 begincodespacerange\n\
         <0000> <FFFF>\n\
         endcodespacerange\n",
    );

    let mut ids: Vec<(u16, char)> = glyph_ids(face).into_iter().collect();
    ids.sort_by_key(|&(id, _)| id);

    // bfchar blocks hold at most 100 entries sharing the same high byte
    let mut blocks: Vec<Vec<(u16, char)>> = Vec::new();
    for (gid, ch) in ids {
        let fits_last = blocks
            .last()
            .is_some_and(|block| block.len() < 100 && block[0].0 >> 8 == gid >> 8);
        if !fits_last {
            blocks.push(Vec::new());
        }
        if let Some(block) = blocks.last_mut() {
            block.push((gid, ch));
        }
    }

    for block in blocks {
        map.push_str(&format!("{} beginbfchar\n", block.len()));
        for (gid, ch) in block {
            let mut utf16 = [0u16; 2];
            let units: String = ch
                .encode_utf16(&mut utf16)
                .iter()
                .map(|unit| format!("{unit:04x}"))
                .collect();
            map.push_str(&format!("<{gid:04x}> <{units}>\n"));
        }
        map.push_str("endbfchar\n");
    }

    map.push_str("endcmap CMapName currentdict /CMap defineresource pop end end\n");

    let compressed = compress_to_vec_zlib(map.as_bytes(), CompressionLevel::DefaultLevel as u8);
    let mut stream = writer.stream(id, compressed.as_slice());
    stream.filter(Filter::FlateDecode);

    id
}
