use std::io::Write;

/// A colour, expressed in RGB, CMYK or grey colour spaces
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Colour {
    /// DeviceRGB colour; r, g, b, range from 0.0 to 1.0
    RGB { r: f32, g: f32, b: f32 },
    /// DeviceCMYK colour; c, m, y, and k range from 0.0 to 1.0
    CMYK { c: f32, m: f32, y: f32, k: f32 },
    /// DeviceGray colour; g ranges from 0.0 to 1.0
    Grey { g: f32 },
}

impl Colour {
    /// Create a new colour in the RGB space. r, g, and b range from 0.0 to 1.0
    pub fn new_rgb(r: f32, g: f32, b: f32) -> Colour {
        Colour::RGB { r, g, b }
    }

    /// Create a new colour in the RGB space. r, g, and b range from 0 to 255,
    /// which is how colours usually arrive from stylesheets and design tools
    pub fn new_rgb_bytes(r: u8, g: u8, b: u8) -> Colour {
        Colour::RGB {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Create a new colour in the CMYK space. c, m, y, and k range from 0.0 to 1.0
    pub fn new_cmyk(c: f32, m: f32, y: f32, k: f32) -> Colour {
        Colour::CMYK { c, m, y, k }
    }

    /// Create a new colour in the Gray space, g ranges from 0.0 to 1.0
    pub fn new_grey(g: f32) -> Colour {
        Colour::Grey { g }
    }

    /// Write the operator that makes this the non-stroking (fill and text) colour
    #[allow(clippy::write_with_newline)]
    pub(crate) fn write_fill<W: Write>(&self, out: &mut W) -> Result<(), std::io::Error> {
        match *self {
            Colour::RGB { r, g, b } => write!(out, "{r} {g} {b} rg\n"),
            Colour::CMYK { c, m, y, k } => write!(out, "{c} {m} {y} {k} k\n"),
            Colour::Grey { g } => write!(out, "{g} g\n"),
        }
    }

    /// Write the operator that makes this the stroking (line) colour
    #[allow(clippy::write_with_newline)]
    pub(crate) fn write_stroke<W: Write>(&self, out: &mut W) -> Result<(), std::io::Error> {
        match *self {
            Colour::RGB { r, g, b } => write!(out, "{r} {g} {b} RG\n"),
            Colour::CMYK { c, m, y, k } => write!(out, "{c} {m} {y} {k} K\n"),
            Colour::Grey { g } => write!(out, "{g} G\n"),
        }
    }
}

/// A list of pre-defined colour constants
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::Grey { g: 0.0 };
    pub const WHITE: Colour = Colour::Grey { g: 1.0 };
    /// The near-black used for table text
    pub const INK: Colour = Colour::RGB {
        r: 10.0 / 255.0,
        g: 10.0 / 255.0,
        b: 10.0 / 255.0,
    };
    /// The light grey used for table borders and header backgrounds
    pub const RULE: Colour = Colour::RGB {
        r: 220.0 / 255.0,
        g: 220.0 / 255.0,
        b: 220.0 / 255.0,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_and_stroke_operators_differ_by_case() {
        let mut fill = Vec::new();
        let mut stroke = Vec::new();
        colours::BLACK.write_fill(&mut fill).unwrap();
        colours::BLACK.write_stroke(&mut stroke).unwrap();
        assert_eq!(fill, b"0 g\n");
        assert_eq!(stroke, b"0 G\n");
    }

    #[test]
    fn byte_constructor_matches_table_constants() {
        assert_eq!(Colour::new_rgb_bytes(220, 220, 220), colours::RULE);
        assert_eq!(Colour::new_rgb_bytes(10, 10, 10), colours::INK);
    }
}
