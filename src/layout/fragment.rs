use super::{FittedLine, LineBreaker};
use crate::canvas::Canvas;
use crate::units::Mm;

/// The lines that fit within a line quota
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentResult {
    pub lines: Vec<FittedLine>,
    /// Whether there was more text than the quota allowed for
    pub exceeds_capacity: bool,
}

/// Width available to text in a cell `width` wide, in thousandths of an em of the
/// canvas's current font. A width of zero means the rest of the line.
pub fn available_units<C: Canvas + ?Sized>(canvas: &C, width: Mm) -> f32 {
    let width = if width == Mm(0.0) {
        canvas.available_width()
    } else {
        width
    };
    (width - canvas.cell_margin() * 2.0) / canvas.font_size() * 1000.0
}

/// Break `text` into lines for a cell `width` wide, measured with the canvas's
/// current font. The font size must be set before calling this.
pub fn line_breaker<'t, C: Canvas + ?Sized>(
    canvas: &'t C,
    width: Mm,
    text: &'t str,
    justify: bool,
) -> LineBreaker<'t, impl Fn(char) -> Option<(char, f32)> + 't> {
    LineBreaker::new(
        text,
        available_units(canvas, width),
        justify,
        canvas.font().style,
        move |ch: char| {
            canvas
                .normalize_char(ch)
                .map(|shown| (shown, canvas.char_width(shown)))
        },
    )
}

/// Produce at most `quota` lines of `text` wrapped to `width`, noting whether
/// another line would have followed.
pub fn fragment<C: Canvas + ?Sized>(
    canvas: &C,
    width: Mm,
    text: &str,
    quota: usize,
    justify: bool,
) -> FragmentResult {
    let mut breaker = line_breaker(canvas, width, text, justify);
    let lines: Vec<FittedLine> = breaker.by_ref().take(quota).collect();
    let exceeds_capacity = breaker.next().is_some();
    tracing::trace!(
        %width,
        quota,
        lines = lines.len(),
        exceeds_capacity,
        "fragmented text"
    );
    FragmentResult {
        lines,
        exceeds_capacity,
    }
}

/// Number of lines `text` takes up when wrapped to `width`
pub fn count_lines<C: Canvas + ?Sized>(canvas: &C, width: Mm, text: &str, justify: bool) -> usize {
    line_breaker(canvas, width, text, justify).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{CanvasConfig, RecordingCanvas, WidthTable};
    use crate::units::Pt;

    /// 10pt text where every character is half an em
    fn canvas() -> RecordingCanvas {
        let mut canvas = RecordingCanvas::new(CanvasConfig::default(), WidthTable::Uniform(500.0));
        let mut font = canvas.font();
        font.size = Pt(10.0);
        canvas.set_font(font);
        canvas
    }

    #[test]
    fn quota_limits_lines_and_flags_the_rest() {
        let canvas = canvas();
        // two characters and a bit, after the 1 mm cell margins
        let width = Mm(2.0) + Mm::from(Pt(10.0)) * 1.2;
        let result = fragment(&canvas, width, "aa bb cc", 2, true);
        let texts: Vec<&str> = result.lines.iter().map(|line| line.text.as_str()).collect();
        assert_eq!(texts, vec!["aa", "bb"]);
        assert!(result.exceeds_capacity);

        let result = fragment(&canvas, width, "aa bb", 2, true);
        assert!(!result.exceeds_capacity);
    }

    #[test]
    fn zero_width_uses_the_rest_of_the_line() {
        let canvas = canvas();
        let full = count_lines(&canvas, Mm(0.0), &"a".repeat(100), false);
        let explicit = count_lines(&canvas, canvas.available_width(), &"a".repeat(100), false);
        assert_eq!(full, explicit);
    }

    #[test]
    fn empty_text_has_no_lines() {
        let canvas = canvas();
        assert_eq!(count_lines(&canvas, Mm(50.0), "", true), 0);
        let result = fragment(&canvas, Mm(50.0), "", 3, true);
        assert!(result.lines.is_empty());
        assert!(!result.exceeds_capacity);
    }
}
