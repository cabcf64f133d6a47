use pdf_table::canvas::{Align, Canvas, CanvasConfig, PdfCanvas};
use pdf_table::table::{or_dash, ImagePlacement, Row, RowKind, Table, TableStyle};
use pdf_table::{Image, Mm};
use tracing_subscriber::EnvFilter;

struct Item {
    code: &'static str,
    name: &'static str,
    notes: Option<String>,
}

fn main() {
    // RUST_LOG=pdf_table=debug shows the layout decisions
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut canvas = PdfCanvas::new(CanvasConfig::default());

    // a generated logo, so the demo needs no files
    let logo = image::RgbImage::from_fn(192, 64, |x, y| {
        image::Rgb([(x * 255 / 192) as u8, (y * 255 / 64) as u8, 160])
    });
    let logo = canvas.add_image(Image::from_dynamic(logo.into()));

    let items = [
        Item {
            code: "A-100",
            name: "Bracket",
            notes: Some(lipsum::lipsum(80)),
        },
        Item {
            code: "A-200",
            name: "Hinge",
            notes: None,
        },
        Item {
            code: "B-310",
            name: "Spring washer",
            notes: Some(lipsum::lipsum(20)),
        },
    ];

    let mut table = Table::new(&mut canvas, TableStyle::default());
    let page_width = table.canvas().effective_width();
    let left = table.canvas().margins().left;
    table.draw_centered_image(
        logo,
        ImagePlacement {
            x: Some(left),
            height: Mm(15.0),
            container_width: Some(page_width),
            ..ImagePlacement::default()
        },
    );
    table.canvas().line_break(Some(Mm(20.0)));

    let widths = table.grid_columns(&[2.0, 3.0, 7.0]);
    table
        .draw_header(&Row::new(["Code", "Name", "Notes"]).widths(widths.clone()))
        .expect("header fits the page");

    // fixed rows hand back what didn't fit; keep drawing it until it runs out
    for item in items.iter() {
        let mut notes = or_dash(item.notes.as_deref()).to_string();
        let mut first = true;
        while !notes.is_empty() {
            let (code, name) = if first { (item.code, item.name) } else { ("", "") };
            let row = Row::new([code, name, notes.as_str()])
                .widths(widths.clone())
                .align(vec![Align::Left, Align::Left, Align::Justify])
                .kind(RowKind::Fixed)
                .fixed_height(Mm(15.0));
            let overflow = table.draw_row(&row).expect("row fits the page");
            notes = overflow[2].clone();
            first = false;
        }
    }

    table.canvas().line_break(Some(Mm(10.0)));
    table
        .draw_header(&Row::new(["Summary", "Details"]))
        .expect("header fits the page");
    table
        .draw_row(
            &Row::new([
                "Items listed".to_string(),
                format!(
                    "{} items, {} with notes",
                    items.len(),
                    items.iter().filter(|item| item.notes.is_some()).count()
                ),
            ])
            .kind(RowKind::Responsive),
        )
        .expect("row fits the page");
    table
        .draw_row(&Row::new(["Remarks", lipsum::lipsum(40).as_str()]).kind(RowKind::Responsive))
        .expect("row fits the page");
    table
        .draw_row(&Row::new(["Signed", "", "Date", ""]).line_break(true))
        .expect("row fits the page");

    let pages = canvas.page_count();
    let mut out = std::fs::File::create("table.pdf").expect("can create table.pdf");
    canvas.write(&mut out).expect("can write table.pdf");
    println!("wrote table.pdf ({pages} pages)");
}
