use crate::canvas::FontStyle;

/// One line of text produced by a [LineBreaker]
#[derive(Debug, Clone, PartialEq)]
pub struct FittedLine {
    /// The characters of the line as they will be drawn
    pub text: String,
    pub style: FontStyle,
    /// Width of `text` in thousandths of an em
    pub width: f32,
    /// Number of spaces in `text`
    pub spaces: usize,
    /// Whether the line should be stretched to the full width when drawn
    pub justify: bool,
    /// Whether the line was ended by a `\n` in the source
    pub ends_with_hard_break: bool,
    /// Byte offset in the source just past the last character of `text`
    pub content_end: usize,
    /// Byte offset in the source where the next line starts
    pub resume: usize,
}

impl FittedLine {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Where the line can be broken at the last space seen
#[derive(Copy, Clone)]
struct SpaceHint {
    text_len: usize,
    offset: usize,
    resume: usize,
    width: f32,
    spaces: usize,
}

/// Splits text into lines no wider than `max_width`, one line per call to
/// [next](Iterator::next).
///
/// Lines break at the last space that still fits. A word that is wider than the
/// line is broken mid-word, and a single character that is wider than the line
/// still gets a line of its own. `\n` always ends a line, possibly an empty one.
///
/// `measure` returns the character to draw in place of a source character along
/// with its width, or `None` to drop the character entirely.
pub struct LineBreaker<'t, M> {
    source: &'t str,
    position: usize,
    max_width: f32,
    justify: bool,
    style: FontStyle,
    measure: M,
}

impl<'t, M> LineBreaker<'t, M>
where
    M: Fn(char) -> Option<(char, f32)>,
{
    pub fn new(source: &'t str, max_width: f32, justify: bool, style: FontStyle, measure: M) -> Self {
        LineBreaker {
            source,
            position: 0,
            max_width,
            justify,
            style,
            measure,
        }
    }

    /// Byte offset of the first character not yet placed on a line
    pub fn position(&self) -> usize {
        self.position
    }

    /// Offset just past the run of spaces starting at `from`
    fn skip_spaces(&self, from: usize) -> usize {
        from + self.source[from..].bytes().take_while(|b| *b == b' ').count()
    }

    fn line(
        &self,
        text: String,
        width: f32,
        spaces: usize,
        (content_end, resume): (usize, usize),
        hard: bool,
    ) -> FittedLine {
        FittedLine {
            text,
            style: self.style,
            width,
            spaces,
            justify: self.justify && !hard,
            ends_with_hard_break: hard,
            content_end,
            resume,
        }
    }
}

impl<M> Iterator for LineBreaker<'_, M>
where
    M: Fn(char) -> Option<(char, f32)>,
{
    type Item = FittedLine;

    fn next(&mut self) -> Option<FittedLine> {
        let start = self.position;
        if start >= self.source.len() {
            return None;
        }

        let mut text = String::new();
        let mut width = 0.0;
        let mut spaces = 0;
        let mut content_end = start;
        let mut hint: Option<SpaceHint> = None;
        // no break point before the first visible character, or the line would be empty
        let mut has_content = false;

        for (relative, ch) in self.source[start..].char_indices() {
            let offset = start + relative;
            let after = offset + ch.len_utf8();

            if ch == '\n' {
                self.position = after;
                return Some(self.line(text, width, spaces, (content_end, after), true));
            }

            let Some((shown, char_width)) = (self.measure)(ch) else {
                continue;
            };

            if width + char_width > self.max_width {
                if shown == ' ' {
                    // the whole run of spaces at a wrap is consumed
                    let resume = self.skip_spaces(after);
                    self.position = resume;
                    if let Some(run) = hint.filter(|_| text.ends_with(' ')) {
                        text.truncate(run.text_len);
                        return Some(self.line(
                            text,
                            run.width,
                            run.spaces,
                            (run.offset, resume),
                            false,
                        ));
                    }
                    return Some(self.line(text, width, spaces, (content_end, resume), false));
                }
                if text.is_empty() {
                    // too wide for any line, place it anyway so the text keeps moving
                    text.push(shown);
                    self.position = after;
                    return Some(self.line(text, char_width, 0, (after, after), false));
                }
                if let Some(hint) = hint {
                    text.truncate(hint.text_len);
                    let resume = self.skip_spaces(hint.resume);
                    self.position = resume;
                    return Some(self.line(
                        text,
                        hint.width,
                        hint.spaces,
                        (hint.offset, resume),
                        false,
                    ));
                }
                self.position = offset;
                return Some(self.line(text, width, spaces, (content_end, offset), false));
            }

            if shown == ' ' {
                let extends_run = hint.is_some() && text.ends_with(' ');
                if extends_run {
                    // break before the first space of the run, resume after the last
                    if let Some(run) = hint.as_mut() {
                        run.resume = after;
                    }
                } else if has_content {
                    hint = Some(SpaceHint {
                        text_len: text.len(),
                        offset,
                        resume: after,
                        width,
                        spaces,
                    });
                }
                spaces += 1;
            } else {
                has_content = true;
            }
            text.push(shown);
            width += char_width;
            content_end = after;
        }

        self.position = self.source.len();
        if text.is_empty() {
            return None;
        }
        let mut line = self.line(text, width, spaces, (content_end, self.source.len()), false);
        line.justify = false;
        Some(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breaker(text: &str, chars: usize) -> LineBreaker<'_, impl Fn(char) -> Option<(char, f32)>> {
        LineBreaker::new(
            text,
            chars as f32 * 100.0,
            true,
            FontStyle::Regular,
            |ch: char| (ch != '\r').then_some((ch, 100.0)),
        )
    }

    fn lines(text: &str, chars: usize) -> Vec<String> {
        breaker(text, chars).map(|line| line.text).collect()
    }

    #[test]
    fn breaks_at_the_last_space() {
        assert_eq!(lines("the quick brown fox", 10), vec!["the quick", "brown fox"]);
    }

    #[test]
    fn overflowing_space_is_dropped() {
        assert_eq!(lines("abcd efgh", 4), vec!["abcd", "efgh"]);
    }

    #[test]
    fn long_words_break_mid_word() {
        assert_eq!(lines("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn hard_breaks_end_lines_and_may_be_empty() {
        let lines: Vec<FittedLine> = breaker("ab\n\ncd", 10).collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with_hard_break);
        assert!(lines[1].is_empty());
        assert!(lines[1].ends_with_hard_break);
        assert!(!lines[2].ends_with_hard_break);
    }

    #[test]
    fn carriage_returns_are_skipped_but_tracked() {
        let source = "ab\r\ncd";
        let lines: Vec<FittedLine> = breaker(source, 10).collect();
        assert_eq!(lines[0].text, "ab");
        assert_eq!(&source[..lines[0].content_end], "ab");
        assert_eq!(&source[lines[0].resume..], "cd");
    }

    #[test]
    fn only_soft_breaks_are_justified() {
        let lines: Vec<FittedLine> = breaker("aaa bbb ccc\nddd", 7).collect();
        let justified: Vec<bool> = lines.iter().map(|line| line.justify).collect();
        assert_eq!(justified, vec![true, false, false]);
    }

    #[test]
    fn characters_wider_than_the_line_still_progress() {
        assert_eq!(lines("ab", 0), vec!["a", "b"]);
    }

    #[test]
    fn runs_of_spaces_at_a_wrap_are_skipped() {
        assert_eq!(lines("aaaa  bbbb", 4), vec!["aaaa", "bbbb"]);
        assert_eq!(lines("aa  bb  cccccc", 7), vec!["aa  bb", "cccccc"]);
        assert_eq!(lines("aaa  bbbbbbb", 6), vec!["aaa", "bbbbbb", "b"]);

        let source = "one   twothree";
        let first = breaker(source, 8).next().unwrap();
        assert_eq!(first.text, "one");
        assert_eq!(first.content_end, 3);
        assert_eq!(&source[first.resume..], "twothree");
    }

    #[test]
    fn leading_spaces_are_not_a_break_point() {
        assert_eq!(lines("  abcdefgh", 4), vec!["  ab", "cdef", "gh"]);
    }

    #[test]
    fn offsets_cover_the_space_skipped_at_a_break() {
        let source = "one two three";
        let lines: Vec<FittedLine> = breaker(source, 8).collect();
        assert_eq!(lines[0].text, "one two");
        assert_eq!(lines[0].content_end, 7);
        assert_eq!(lines[0].resume, 8);
        assert_eq!(lines[0].spaces, 1);
        assert_eq!(lines[0].width, 700.0);
    }
}
