use crate::units::Mm;

/// Page margins, in millimetres from each edge.
///
/// Nothing stops content from overflowing the margins; they are guides for the
/// canvas cursor and for automatic page breaks. They are also written to each
/// [`Page`](crate::Page) as its art box.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Margins {
    pub top: Mm,
    pub right: Mm,
    pub bottom: Mm,
    pub left: Mm,
}

impl Margins {
    /// Create margins by specifying individual components in a clockwise fashion
    /// starting at the top (in the same order as CSS margins)
    pub fn trbl(top: Mm, right: Mm, bottom: Mm, left: Mm) -> Margins {
        Margins {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Create margins where all values are equal
    pub fn all<D: Into<Mm>>(value: D) -> Margins {
        let value: Mm = value.into();
        Margins::trbl(value, value, value, value)
    }

    /// Create margins by specifying different values for vertical (top and bottom)
    /// and horizontal (left and right) margins
    pub fn symmetric(vertical: Mm, horizontal: Mm) -> Margins {
        Margins::trbl(vertical, horizontal, vertical, horizontal)
    }

    pub fn empty() -> Margins {
        Margins::all(Mm(0.0))
    }

    /// Combined left and right margin
    pub fn horizontal(&self) -> Mm {
        self.left + self.right
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symmetric_margins_mirror() {
        let margins = Margins::symmetric(Mm(5.0), Mm(10.0));
        assert_eq!(margins.top, margins.bottom);
        assert_eq!(margins.horizontal(), Mm(20.0));
    }
}
