use crate::units::*;

/// A rectangle in PDF page space, specified by two opposite corners.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
    /// The x-coordinate of the lower-left corner.
    pub x1: Pt,
    /// The y-coordinate of the lower-left corner.
    pub y1: Pt,
    /// The x-coordinate of the upper-right corner.
    pub x2: Pt,
    /// The y-coordinate of the upper-right corner.
    pub y2: Pt,
}

impl Rect {
    /// Convert a box given in layout space (millimetres, measured from the top-left
    /// corner of the page) into PDF page space on a page `page_height` tall.
    pub fn from_layout(x: Mm, y: Mm, width: Mm, height: Mm, page_height: Pt) -> Rect {
        let x1: Pt = x.into();
        let x2: Pt = (x + width).into();
        let top: Pt = y.into();
        let bottom: Pt = (y + height).into();
        Rect {
            x1,
            y1: page_height - bottom,
            x2,
            y2: page_height - top,
        }
    }

    pub fn width(&self) -> Pt {
        self.x2 - self.x1
    }

    pub fn height(&self) -> Pt {
        self.y2 - self.y1
    }
}

impl From<Rect> for pdf_writer::Rect {
    fn from(r: Rect) -> Self {
        pdf_writer::Rect {
            x1: r.x1.into(),
            y1: r.y1.into(),
            x2: r.x2.into(),
            y2: r.y2.into(),
        }
    }
}
