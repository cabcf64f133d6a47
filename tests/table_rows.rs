use pdf_table::canvas::{Canvas, CanvasConfig, DrawCall, PdfCanvas, RecordingCanvas, WidthTable};
use pdf_table::layout::SplitStrategy;
use pdf_table::table::{ImagePlacement, Row, RowKind, Table, TableStyle};
use pdf_table::{Image, LayoutError, Mm, Pt};

/// Body text where every character is 0.95 mm wide: ten characters fill a 12 mm
/// column
fn uniform_style() -> TableStyle {
    TableStyle::default().with_sizes(Pt::from(Mm(1.0)), Pt::from(Mm(1.0)))
}

fn uniform_canvas() -> RecordingCanvas {
    RecordingCanvas::new(CanvasConfig::default(), WidthTable::Uniform(950.0))
}

fn bordered_boxes(calls: &[DrawCall]) -> Vec<(Mm, Mm, Mm, Mm)> {
    calls
        .iter()
        .filter(|call| matches!(call, DrawCall::Cell { border: true, .. }))
        .filter_map(DrawCall::bounds)
        .collect()
}

#[test]
fn responsive_rows_take_the_height_of_the_tallest_column() {
    let mut canvas = uniform_canvas();
    let mut table = Table::new(&mut canvas, uniform_style());
    let row = Row::new(["aaaa", "aaaaaa bbbbbb cccccc", "aaaaaa bbbbbb"])
        .widths(vec![Mm(12.0); 3])
        .kind(RowKind::Responsive);
    let overflow = table.draw_row(&row).unwrap();
    assert_eq!(overflow, vec!["", "", ""]);

    let line_counts: Vec<usize> = canvas
        .calls()
        .iter()
        .filter_map(|call| match call {
            DrawCall::MultiCell { lines, .. } => Some(lines.len()),
            _ => None,
        })
        .collect();
    assert_eq!(line_counts, vec![1, 3, 2]);

    let boxes = bordered_boxes(canvas.calls());
    assert_eq!(boxes.len(), 3);
    for (i, (x, y, width, height)) in boxes.into_iter().enumerate() {
        assert_eq!(x, Mm(10.0) + Mm(12.0) * i as f32);
        assert_eq!(y, Mm(10.0));
        assert_eq!(width, Mm(12.0));
        assert_eq!(height, Mm(15.0));
    }
    assert_eq!(canvas.cursor(), (Mm(10.0), Mm(25.0)));
}

#[test]
fn responsive_rows_fit_columns_with_fractional_widths() {
    let mut canvas = uniform_canvas();
    let mut table = Table::new(&mut canvas, uniform_style());
    // 12.9 mm holds 13 characters, but text is wrapped at 12 mm
    let row = Row::new(["aaaaaaaaaaa"])
        .widths(vec![Mm(12.9)])
        .kind(RowKind::Responsive);
    assert_eq!(table.draw_row(&row).unwrap(), vec![""]);

    let boxes = bordered_boxes(canvas.calls());
    assert_eq!(boxes, vec![(Mm(10.0), Mm(10.0), Mm(12.9), Mm(10.0))]);
}

#[test]
fn responsive_rows_never_overflow() {
    let mut canvas = RecordingCanvas::default();
    let mut table = Table::new(&mut canvas, TableStyle::default());
    for words in 1..200 {
        let text = lipsum::lipsum(words);
        let row = Row::new(["x", text.as_str(), "y"]).kind(RowKind::Responsive);
        let overflow = table.draw_row(&row).unwrap();
        assert!(
            overflow.iter().all(String::is_empty),
            "{words} words left {overflow:?}"
        );
    }
}

#[test]
fn pattern_splits_fall_back_to_crlf_line_endings() {
    let mut canvas = uniform_canvas();
    let mut table = Table::new(
        &mut canvas,
        uniform_style().with_split(SplitStrategy::MatchPattern),
    );
    let row = Row::new(["aaaa\r\nbbbb\r\ncccc"])
        .widths(vec![Mm(12.0)])
        .kind(RowKind::Fixed)
        .fixed_height(Mm(10.0));
    assert_eq!(table.draw_row(&row), Ok(vec!["cccc".to_string()]));
}

#[test]
fn pattern_splits_fail_when_no_line_ending_matches() {
    let mut canvas = uniform_canvas();
    let mut table = Table::new(
        &mut canvas,
        uniform_style().with_split(SplitStrategy::MatchPattern),
    );
    // the first word is cut mid-word, so the joined lines never occur in the source
    let row = Row::new(["aaaaaaaaaaaaaaa bbbb cccc dddd"])
        .widths(vec![Mm(12.0)])
        .kind(RowKind::Fixed)
        .fixed_height(Mm(10.0));
    assert_eq!(
        table.draw_row(&row),
        Err(LayoutError::TextSplitFailure {
            separator: "\r\n".to_string()
        })
    );
    assert!(canvas.calls().is_empty());
}

#[test]
fn fixed_rows_below_the_row_height_draw_nothing() {
    let mut canvas = uniform_canvas();
    let mut table = Table::new(&mut canvas, uniform_style());
    let row = Row::new(["one", "two"])
        .kind(RowKind::Fixed)
        .fixed_height(Mm(4.0));
    assert_eq!(
        table.draw_row(&row),
        Err(LayoutError::InvalidHeight {
            height: Mm(4.0),
            minimum: Mm(5.0)
        })
    );
    assert!(canvas.calls().is_empty());
    assert_eq!(canvas.cursor(), (Mm(10.0), Mm(10.0)));
}

#[test]
fn widths_are_checked_against_the_space_left_on_the_line() {
    let mut canvas = uniform_canvas();
    canvas.set_cursor(Mm(150.0), Mm(10.0));
    let mut table = Table::new(&mut canvas, uniform_style());
    let row = Row::new(["one", "two"]).widths(vec![Mm(30.0), Mm(30.0)]);
    assert!(matches!(
        table.draw_row(&row),
        Err(LayoutError::WidthOverflow { .. })
    ));
    assert!(canvas.calls().is_empty());
}

#[test]
fn overflow_continues_in_following_rows() {
    let words: Vec<String> = (0..30).map(|i| format!("word{i:05}")).collect();
    let text = words.join(" ");

    let mut canvas = uniform_canvas();
    let mut table = Table::new(&mut canvas, uniform_style());
    let mut remaining = text.clone();
    let mut rows = 0;
    while !remaining.is_empty() {
        let row = Row::new([remaining.as_str()])
            .widths(vec![Mm(50.0)])
            .kind(RowKind::Fixed)
            .fixed_height(Mm(10.0));
        remaining = table.draw_row(&row).unwrap().remove(0);
        rows += 1;
        assert!(rows <= 3, "text should be used up in three rows");
    }
    assert_eq!(rows, 3);

    let drawn: Vec<String> = canvas
        .calls()
        .iter()
        .filter_map(|call| match call {
            DrawCall::MultiCell { lines, .. } => Some(lines.join(" ")),
            _ => None,
        })
        .collect();
    assert_eq!(drawn.join(" "), text);
}

#[test]
fn line_rows_with_a_line_break_skip_a_line() {
    let mut canvas = uniform_canvas();
    let mut table = Table::new(&mut canvas, uniform_style());
    table
        .draw_row(&Row::new(["a", "b"]).line_break(true))
        .unwrap();
    assert_eq!(canvas.cursor(), (Mm(10.0), Mm(20.0)));
}

#[test]
fn empty_rows_are_ignored() {
    let mut canvas = uniform_canvas();
    let mut table = Table::new(&mut canvas, uniform_style());
    let row = Row::new(Vec::<String>::new()).kind(RowKind::Responsive);
    assert_eq!(table.draw_row(&row), Ok(Vec::new()));
    assert!(canvas.calls().is_empty());
}

#[test]
fn images_are_centred_in_their_container() {
    let mut canvas = uniform_canvas();
    // 96 x 48 px is 25.4 x 12.7 mm
    let image = canvas.add_image(Image::from_dynamic(image::DynamicImage::new_rgb8(96, 48)));
    let mut table = Table::new(&mut canvas, uniform_style());
    table.draw_centered_image(
        image,
        ImagePlacement {
            x: Some(Mm(20.0)),
            container_width: Some(Mm(45.4)),
            container_height: Some(Mm(22.7)),
            ..ImagePlacement::default()
        },
    );
    let Some(DrawCall::Image {
        x,
        y,
        width,
        height,
        ..
    }) = canvas.calls().first().cloned()
    else {
        panic!("expected an image");
    };
    assert!((*x - 30.0).abs() < 1e-3);
    assert!((*y - 15.0).abs() < 1e-3);
    assert!((*width - 25.4).abs() < 1e-3);
    assert!((*height - 12.7).abs() < 1e-3);
}

#[test]
fn tables_write_a_pdf_across_pages() {
    let mut canvas = PdfCanvas::default();
    let mut table = Table::new(&mut canvas, TableStyle::default());
    let widths = table.grid_columns(&[3.0, 9.0]);
    table
        .draw_header(&Row::new(["#", "Description"]).widths(widths.clone()))
        .unwrap();
    for i in 0..60 {
        let row = Row::new([i.to_string(), lipsum::lipsum(12)])
            .widths(widths.clone())
            .kind(RowKind::Responsive);
        table.draw_row(&row).unwrap();
    }
    assert!(canvas.page_count() > 1);
    assert_eq!(canvas.font(), TableStyle::default().normal_font());

    let mut out = Vec::new();
    canvas.write(&mut out).unwrap();
    assert!(out.starts_with(b"%PDF-"));
    assert!(out.windows(9).any(|window| window == b"Helvetica"));
}
