//! Face-loading error taxonomy.

use thiserror::Error;

/// Errors reported while turning a font file into a rendered [`Face`].
///
/// These are propagated verbatim from the rasterization layer; the
/// metric engine performs no recovery of its own. All metric
/// computations on a successfully loaded face are infallible.
///
/// [`Face`]: crate::Face
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum FaceError {
    /// The file is not a font format the rasterizer understands.
    #[error("unknown font file format")]
    UnknownFileFormat,

    /// Selecting the requested character size failed.
    #[error("failed to set character size")]
    SetCharSize,

    /// Loading the outline for a glyph failed.
    #[error("failed to load glyph for {0:?}")]
    LoadChar(char),

    /// Storing a rendered glyph in the face's glyph cache failed.
    #[error("failed to cache glyph for {0:?}")]
    CacheChar(char),

    /// Rendering a glyph outline to a bitmap failed.
    #[error("failed to render glyph for {0:?}")]
    RenderChar(char),

    /// Any other rasterizer failure.
    #[error("font loading failed: {0}")]
    Unknown(String),
}
