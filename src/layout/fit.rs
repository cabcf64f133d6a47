use super::fragment;
use crate::canvas::Canvas;
use crate::error::LayoutError;
use crate::units::Mm;

/// Text divided into the part that fits a box and the part that doesn't
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SplitResult {
    pub fitting: String,
    /// Left-over text with leading whitespace removed; empty if everything fit
    pub overflow: String,
}

impl SplitResult {
    fn whole(text: &str) -> SplitResult {
        SplitResult {
            fitting: text.to_string(),
            overflow: String::new(),
        }
    }

    /// Replace the last word of `fitting` with an ellipsis and move that word to the
    /// front of `overflow`. Words shorter than three characters are replaced by as
    /// many backslashes instead, as an ellipsis would be wider than the word.
    pub fn with_ellipsis(self) -> SplitResult {
        if self.fitting.is_empty() {
            return self;
        }
        let (head, last_word) = self.fitting.rsplit_once(' ').unwrap_or(("", &self.fitting));
        let length = last_word.chars().count();
        let marker = if length >= 3 {
            "...".to_string()
        } else {
            "\\".repeat(length)
        };
        SplitResult {
            fitting: format!("{head} {marker}"),
            overflow: format!("{last_word} {}", self.overflow),
        }
    }
}

/// How the fitter finds where the overflow starts in the source text
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum SplitStrategy {
    /// Cut the source where the last fitted line ended
    #[default]
    TrackOffsets,
    /// Rebuild the fitted text from its lines, joined by a line separator, and
    /// search for it in the source. Fails when the separator doesn't match the
    /// source's line endings.
    MatchPattern,
}

/// Lines of `line_height` that fit in `height`, rounding down
fn line_capacity(line_height: Mm, height: Mm) -> Result<usize, LayoutError> {
    if line_height <= Mm(0.0) {
        return Err(LayoutError::InvalidHeight {
            height: line_height,
            minimum: Mm(0.0),
        });
    }
    // the slack absorbs rounding in heights built as a line count times the line height
    Ok((height / line_height + 1e-4).floor().max(0.0) as usize)
}

/// Split `text` into what fits a `width` x `height` box of lines `line_height` tall
/// and what overflows it, optionally ending the fitting part with an ellipsis.
///
/// Text is measured with the canvas's current font; the width is rounded down to
/// whole millimetres and a partial line never counts as fitting.
pub fn fit_text_fixed_height<C: Canvas + ?Sized>(
    canvas: &C,
    text: &str,
    line_height: Mm,
    width: Mm,
    height: Mm,
    ellipsis: bool,
) -> Result<SplitResult, LayoutError> {
    let max_lines = line_capacity(line_height, height)?;
    if text.is_empty() {
        return Ok(SplitResult::default());
    }

    let fragments = fragment(canvas, width.floor(), text, max_lines, true);
    if !fragments.exceeds_capacity {
        return Ok(SplitResult::whole(text));
    }

    let end = fragments.lines.last().map_or(0, |line| line.content_end);
    let split = SplitResult {
        fitting: text[..end].trim_end().to_string(),
        overflow: text[end..].trim_start().to_string(),
    };
    tracing::debug!(
        max_lines,
        fitting = split.fitting.len(),
        overflow = split.overflow.len(),
        "text exceeds its box"
    );
    Ok(if ellipsis { split.with_ellipsis() } else { split })
}

/// Like [fit_text_fixed_height], but locates the overflow by joining the fitted
/// lines with `separator` (or a space after soft breaks) and searching the source
/// for the result.
///
/// Returns [LayoutError::TextSplitFailure] if the joined lines don't occur in the
/// source, typically because its line endings differ from `separator`.
pub fn split_by_pattern<C: Canvas + ?Sized>(
    canvas: &C,
    text: &str,
    line_height: Mm,
    width: Mm,
    height: Mm,
    separator: &str,
    ellipsis: bool,
) -> Result<SplitResult, LayoutError> {
    let max_lines = line_capacity(line_height, height)?;
    if text.is_empty() {
        return Ok(SplitResult::default());
    }

    let fragments = fragment(canvas, width.floor(), text, max_lines, true);
    if !fragments.exceeds_capacity {
        return Ok(SplitResult::whole(text));
    }

    let mut joined = String::new();
    for line in fragments.lines.iter() {
        joined.push_str(&line.text);
        joined.push_str(if line.ends_with_hard_break {
            separator
        } else {
            " "
        });
    }
    let joined = joined.trim_end();

    let failure = || LayoutError::TextSplitFailure {
        separator: separator.to_string(),
    };
    if joined.is_empty() {
        return Err(failure());
    }
    let (_, rest) = text.split_once(joined).ok_or_else(failure)?;
    let split = SplitResult {
        fitting: joined.to_string(),
        overflow: rest.trim_start().to_string(),
    };
    Ok(if ellipsis { split.with_ellipsis() } else { split })
}
