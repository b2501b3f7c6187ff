use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsing(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// [image] failed to parse the image
    Image(#[from] image::ImageError),

    #[error("invalid layout configuration: {0}")]
    /// Layout overrides could not be parsed
    Config(#[from] serde_json::Error),

    #[error("font name `{0}` is reserved for a built-in font")]
    /// A custom font tried to take the name of a built-in font
    BuiltinShadowed(String),

    #[error("an image was placed but the document has no image to draw")]
    /// A draw command referred to an image that wasn't supplied to the writer
    MissingImage,

    #[error("render failed")]
    /// The document could not be produced. Nothing was returned to the caller.
    RenderFailed(#[source] Box<Error>),
}

impl Error {
    pub(crate) fn render_failed<E: Into<Error>>(cause: E) -> Error {
        Error::RenderFailed(Box::new(cause.into()))
    }
}
