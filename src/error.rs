use crate::units::Mm;
use thiserror::Error;

/// All errors that the crate can generate while loading resources or writing documents
#[derive(Error, Debug)]
pub enum PDFError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsingError(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// [image] failed to parse the image
    Image(#[from] image::ImageError),

    #[error(transparent)]
    /// The image data was not valid base64
    Base64(#[from] base64::DecodeError),

    #[error(transparent)]
    /// Fetching a remote image failed
    Http(#[from] Box<ureq::Error>),

    #[error("page referenced in the page order is missing from the document")]
    PageMissing,

    #[error(transparent)]
    /// A table could not be laid out
    Layout(#[from] LayoutError),
}

/// Errors raised while laying out table rows. These are all caller errors: the
/// request is rejected before anything that depends on the bad value is drawn.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// The requested columns are wider than the space left on the line
    #[error("total width {requested} exceeds the {available} available from the cursor")]
    WidthOverflow { requested: Mm, available: Mm },

    /// A width or alignment list does not have one entry per column
    #[error("expected {expected} {what}, found {found}")]
    ElementCountMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    /// A value that the chosen operation requires was not supplied
    #[error("missing required parameter `{0}`")]
    MissingRequiredParameter(&'static str),

    /// A height is smaller than the minimum the operation allows
    #[error("height {height} is smaller than the minimum of {minimum}")]
    InvalidHeight { height: Mm, minimum: Mm },

    /// A row kind name other than `line`, `fixed` or `responsive`
    #[error("unknown row kind `{0}`")]
    UnknownRowKind(String),

    /// The fitted prefix could not be located in the source text
    #[error("could not split text using line separator {separator:?}")]
    TextSplitFailure { separator: String },
}
