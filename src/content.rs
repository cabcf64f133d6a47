//! Turns page contents into a PDF content stream.

use crate::font::Font;
use crate::page::{PageContents, ShapeLayout, SpanFont, SpanLayout};
use id_arena::Arena;
use std::io::Write;

/// Render page contents into the operators of a content stream, in painting order
#[allow(clippy::write_with_newline)]
pub(crate) fn render_contents(
    contents: &[PageContents],
    fonts: &Arena<Font>,
) -> Result<Vec<u8>, std::io::Error> {
    let mut content: Vec<u8> = Vec::default();

    for page_content in contents.iter() {
        match page_content {
            PageContents::Text(spans) => render_text_spans(&mut content, spans, fonts)?,
            PageContents::Image(image) => {
                write!(&mut content, "q\n")?;
                write!(
                    &mut content,
                    "{} 0 0 {} {} {} cm\n",
                    *image.position.width(),
                    *image.position.height(),
                    *image.position.x1,
                    *image.position.y1
                )?;
                write!(&mut content, "/I{} Do\n", image.image_id.index())?;
                write!(&mut content, "Q\n")?;
            }
            PageContents::Shape(shape) => render_shape(&mut content, shape)?,
        }
    }

    Ok(content)
}

#[allow(clippy::write_with_newline)]
fn render_text_spans(
    content: &mut Vec<u8>,
    spans: &[SpanLayout],
    fonts: &Arena<Font>,
) -> Result<(), std::io::Error> {
    let Some(first) = spans.first() else {
        return Ok(());
    };

    write!(content, "q\n")?;

    let mut current_font: SpanFont = first.font;
    let mut current_colour = first.colour;
    write!(
        content,
        "/F{} {} Tf\n",
        current_font.id.index(),
        *current_font.size
    )?;
    current_colour.write_fill(content)?;

    for span in spans.iter() {
        if span.font != current_font {
            current_font = span.font;
            write!(
                content,
                "/F{} {} Tf\n",
                current_font.id.index(),
                *current_font.size
            )?;
        }
        if span.colour != current_colour {
            current_colour = span.colour;
            current_colour.write_fill(content)?;
        }

        write!(content, "BT\n")?;
        write!(content, "{} {} Td\n", *span.coords.0, *span.coords.1)?;
        write!(content, "<")?;
        fonts[current_font.id].write_hex(&span.text, content)?;
        write!(content, "> Tj\n")?;
        write!(content, "ET\n")?;
    }

    write!(content, "Q\n")?;
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn render_shape(content: &mut Vec<u8>, shape: &ShapeLayout) -> Result<(), std::io::Error> {
    let operator = match (shape.fill, shape.stroke) {
        (Some(_), Some(_)) => "B",
        (Some(_), None) => "f",
        (None, Some(_)) => "S",
        (None, None) => return Ok(()),
    };

    write!(content, "q\n")?;
    if let Some(fill) = shape.fill {
        fill.write_fill(content)?;
    }
    if let Some(stroke) = shape.stroke {
        stroke.write_stroke(content)?;
        write!(content, "{} w\n", *shape.line_width)?;
    }
    write!(
        content,
        "{} {} {} {} re {}\n",
        *shape.rect.x1,
        *shape.rect.y1,
        *shape.rect.width(),
        *shape.rect.height(),
        operator
    )?;
    write!(content, "Q\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::colours;
    use crate::rect::Rect;
    use crate::standard_font::StandardFont;
    use crate::units::Pt;

    #[test]
    fn stroked_and_filled_boxes_use_one_operator() {
        let shape = ShapeLayout {
            rect: Rect {
                x1: Pt(10.0),
                y1: Pt(20.0),
                x2: Pt(30.0),
                y2: Pt(25.0),
            },
            fill: Some(colours::WHITE),
            stroke: Some(colours::BLACK),
            line_width: Pt(0.5),
        };
        let fonts = Arena::new();
        let rendered = render_contents(&[PageContents::Shape(shape)], &fonts).unwrap();
        let rendered = String::from_utf8(rendered).unwrap();
        assert_eq!(rendered, "q\n1 g\n0 G\n0.5 w\n10 20 20 5 re B\nQ\n");
    }

    #[test]
    fn text_is_written_as_hex_strings() {
        let mut fonts = Arena::new();
        let id = fonts.alloc(Font::standard(StandardFont::Helvetica));
        let span = SpanLayout {
            text: "Hi".to_string(),
            font: SpanFont { id, size: Pt(9.0) },
            colour: colours::BLACK,
            coords: (Pt(1.0), Pt(2.0)),
        };
        let rendered = render_contents(&[PageContents::Text(vec![span])], &fonts).unwrap();
        let rendered = String::from_utf8(rendered).unwrap();
        assert!(rendered.contains("/F0 9 Tf\n"));
        assert!(rendered.contains("1 2 Td\n<4869> Tj\n"));
    }
}
