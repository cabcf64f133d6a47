//! Column widths, alignments and centring arithmetic for table rows.

use crate::canvas::{Align, Canvas};
use crate::error::LayoutError;
use crate::layout::count_lines;
use crate::units::Mm;

/// Slack allowed when comparing a row's total width to the space left, so that
/// widths computed by dividing the page don't fail on rounding
const WIDTH_TOLERANCE: Mm = Mm(1e-3);

/// Width of one character of a Code 39 barcode: six narrow bars of 0.5 mm and
/// three wide bars of 1.5 mm
const CODE39_CHAR_WIDTH: Mm = Mm(7.5);
/// Gap between two Code 39 characters
const CODE39_GAP: Mm = Mm(0.5);

/// How the columns of a row are aligned
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnAlign {
    /// The same alignment for every column
    All(Align),
    /// One alignment per column. An empty list means the row's default alignment.
    Each(Vec<Align>),
}

impl Default for ColumnAlign {
    fn default() -> Self {
        ColumnAlign::Each(Vec::new())
    }
}

impl From<Align> for ColumnAlign {
    fn from(align: Align) -> Self {
        ColumnAlign::All(align)
    }
}

impl From<Vec<Align>> for ColumnAlign {
    fn from(aligns: Vec<Align>) -> Self {
        ColumnAlign::Each(aligns)
    }
}

/// Width of each of `n` equal columns spanning the space between the margins
pub fn width_n<C: Canvas + ?Sized>(canvas: &C, n: usize) -> Mm {
    canvas.effective_width() / n.max(1) as f32
}

/// Widths for `columns` columns. No widths means equal columns across the page;
/// otherwise there must be one width per column and together they must fit
/// between the cursor and the right margin.
pub fn resolve_widths<C: Canvas + ?Sized>(
    canvas: &C,
    widths: &[Mm],
    columns: usize,
) -> Result<Vec<Mm>, LayoutError> {
    if columns == 0 {
        return Ok(Vec::new());
    }
    if widths.is_empty() {
        return Ok(vec![width_n(canvas, columns); columns]);
    }
    if widths.len() != columns {
        return Err(LayoutError::ElementCountMismatch {
            what: "widths",
            expected: columns,
            found: widths.len(),
        });
    }
    let requested: Mm = widths.iter().copied().sum();
    let available = canvas.available_width();
    if requested > available + WIDTH_TOLERANCE {
        return Err(LayoutError::WidthOverflow {
            requested,
            available,
        });
    }
    Ok(widths.to_vec())
}

/// One alignment per column, broadcasting a single alignment and falling back to
/// `default` for an empty list
pub fn resolve_alignments(
    align: &ColumnAlign,
    columns: usize,
    default: Align,
) -> Result<Vec<Align>, LayoutError> {
    match align {
        ColumnAlign::All(align) => Ok(vec![*align; columns]),
        ColumnAlign::Each(aligns) if aligns.is_empty() => Ok(vec![default; columns]),
        ColumnAlign::Each(aligns) if aligns.len() != columns => {
            Err(LayoutError::ElementCountMismatch {
                what: "alignments",
                expected: columns,
                found: aligns.len(),
            })
        }
        ColumnAlign::Each(aligns) => Ok(aligns.clone()),
    }
}

/// The most lines any column's text wraps to, in the canvas's current font.
///
/// Widths are rounded down to whole millimetres first, as the fixed-height fitter
/// does, so a box this many lines tall always holds the whole text.
pub fn max_rows<C: Canvas + ?Sized, S: AsRef<str>>(
    canvas: &C,
    widths: &[Mm],
    texts: &[S],
    aligns: &[Align],
) -> usize {
    widths
        .iter()
        .zip(texts.iter())
        .zip(aligns.iter())
        .map(|((width, text), align)| {
            count_lines(canvas, width.floor(), text.as_ref(), *align == Align::Justify)
        })
        .max()
        .unwrap_or(0)
}

/// Column widths from a twelve-column grid, like a CSS grid system: a column of
/// span 6 takes half of `effective_width`. Any non-positive span gives no widths.
pub fn grid_columns(effective_width: Mm, spans: &[f32]) -> Vec<Mm> {
    if !spans.iter().all(|span| *span > 0.0) {
        return Vec::new();
    }
    spans
        .iter()
        .map(|span| effective_width * (span / 12.0))
        .collect()
}

/// Start position that centres an element within a container beginning at `start`
pub fn center_in(start: Mm, container: Mm, element: Mm) -> Mm {
    if container == element {
        start
    } else {
        start + (container - element) / 2.0
    }
}

/// Like [center_in], but an element larger than its container is an error
pub fn center_x(start: Mm, container: Mm, element: Mm) -> Result<Mm, LayoutError> {
    if element > container {
        return Err(LayoutError::WidthOverflow {
            requested: element,
            available: container,
        });
    }
    Ok(center_in(start, container, element))
}

/// Printed width of a Code 39 barcode of `chars` characters
pub fn code39_width(chars: usize) -> Mm {
    if chars == 0 {
        return Mm(0.0);
    }
    CODE39_CHAR_WIDTH * chars as f32 + CODE39_GAP * (chars - 1) as f32
}

/// The x at which a Code 39 barcode for `text` is centred between the margins
pub fn code39_center_x<C: Canvas + ?Sized>(canvas: &C, text: &str) -> Mm {
    canvas.margins().left + canvas.effective_width() / 2.0 - code39_width(text.chars().count()) / 2.0
}

/// Size to draw an image at: a zero width or height is derived from the other
/// through the image's aspect ratio, and both zero means its natural size.
pub fn image_box(natural: (Mm, Mm), width: Mm, height: Mm) -> (Mm, Mm) {
    let zero = Mm(0.0);
    match (width == zero, height == zero) {
        (true, true) => natural,
        (true, false) if natural.1 > zero => (height * (natural.0 / natural.1), height),
        (false, true) if natural.0 > zero => (width, width * (natural.1 / natural.0)),
        _ => (width, height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{CanvasConfig, RecordingCanvas, WidthTable};
    use crate::units::Pt;

    #[test]
    fn equal_widths_fill_the_page() {
        let canvas = RecordingCanvas::default();
        let widths = resolve_widths(&canvas, &[], 3).unwrap();
        assert_eq!(widths.len(), 3);
        let total: Mm = widths.iter().copied().sum();
        assert!((*total - *canvas.effective_width()).abs() < 1e-3);
    }

    #[test]
    fn width_lists_must_match_and_fit() {
        let canvas = RecordingCanvas::default();
        assert_eq!(
            resolve_widths(&canvas, &[Mm(10.0)], 2),
            Err(LayoutError::ElementCountMismatch {
                what: "widths",
                expected: 2,
                found: 1
            })
        );
        assert!(matches!(
            resolve_widths(&canvas, &[Mm(100.0), Mm(100.0)], 2),
            Err(LayoutError::WidthOverflow { .. })
        ));
        assert_eq!(
            resolve_widths(&canvas, &[Mm(90.0), Mm(100.0)], 2),
            Ok(vec![Mm(90.0), Mm(100.0)])
        );
    }

    #[test]
    fn alignment_lists() {
        assert_eq!(
            resolve_alignments(&Align::Right.into(), 2, Align::Left),
            Ok(vec![Align::Right, Align::Right])
        );
        assert_eq!(
            resolve_alignments(&ColumnAlign::default(), 2, Align::Justify),
            Ok(vec![Align::Justify, Align::Justify])
        );
        assert!(matches!(
            resolve_alignments(&vec![Align::Left].into(), 2, Align::Left),
            Err(LayoutError::ElementCountMismatch { .. })
        ));
    }

    #[test]
    fn row_counts_use_whole_millimetres() {
        // 0.95 mm characters: 11 fit in 12.9 mm, but only 10 in 12 mm
        let mut canvas = RecordingCanvas::new(CanvasConfig::default(), WidthTable::Uniform(950.0));
        let mut font = canvas.font();
        font.size = Pt::from(Mm(1.0));
        canvas.set_font(font);
        let rows = max_rows(&canvas, &[Mm(12.9)], &["aaaaaaaaaaa"], &[Align::Left]);
        assert_eq!(rows, 2);
    }

    #[test]
    fn grid_spans() {
        let widths = grid_columns(Mm(120.0), &[6.0, 3.0, 3.0]);
        assert_eq!(widths, vec![Mm(60.0), Mm(30.0), Mm(30.0)]);
        assert!(grid_columns(Mm(120.0), &[6.0, 0.0]).is_empty());
    }

    #[test]
    fn centring() {
        assert_eq!(center_in(Mm(10.0), Mm(50.0), Mm(50.0)), Mm(10.0));
        assert_eq!(center_in(Mm(10.0), Mm(50.0), Mm(30.0)), Mm(20.0));
        assert!(center_x(Mm(0.0), Mm(20.0), Mm(30.0)).is_err());
    }

    #[test]
    fn code39_dimensions() {
        assert_eq!(code39_width(1), Mm(7.5));
        assert_eq!(code39_width(4), Mm(31.5));
        let canvas = RecordingCanvas::default();
        let x = code39_center_x(&canvas, "ABCD");
        assert!((*x - (10.0 + *canvas.effective_width() / 2.0 - 15.75)).abs() < 1e-3);
    }

    #[test]
    fn image_boxes_keep_the_aspect_ratio() {
        let natural = (Mm(40.0), Mm(20.0));
        assert_eq!(image_box(natural, Mm(0.0), Mm(0.0)), natural);
        assert_eq!(image_box(natural, Mm(20.0), Mm(0.0)), (Mm(20.0), Mm(10.0)));
        assert_eq!(image_box(natural, Mm(0.0), Mm(5.0)), (Mm(10.0), Mm(5.0)));
    }
}
