use crate::strip::{Strip, VectorDocument};

pub mod eps;
pub mod pdf;
pub mod svg;

pub use eps::EpsEncoder;
pub use pdf::PdfEncoder;
pub use svg::SvgEncoder;

/// A serializer rendering a [`VectorDocument`] into one output format.
///
/// Encoders are stateless and never mutate the document, so any number
/// of them can run concurrently against the same instance.
pub trait DocumentEncoder {
    type Output;

    fn encode(&self, doc: &VectorDocument) -> Self::Output;
}

/// The closed set of supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    /// Adobe Illustrator-compatible PDF subset.
    Ai,
    Eps,
}

impl OutputFormat {
    /// Conventional file extension for the format.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Ai => "ai",
            OutputFormat::Eps => "eps",
        }
    }

    /// Serialize the document in this format.
    pub fn encode(self, doc: &VectorDocument) -> Vec<u8> {
        match self {
            OutputFormat::Svg => SvgEncoder.encode(doc).into_bytes(),
            OutputFormat::Ai => PdfEncoder.encode(doc),
            OutputFormat::Eps => EpsEncoder.encode(doc).into_bytes(),
        }
    }
}

/// Format a strip's quantized intensity as a PostScript/PDF gray level
/// in [0, 1], matching the SVG byte mapping.
pub(crate) fn format_gray(strip: &Strip) -> String {
    format!("{:.4}", f32::from(strip.gray_level()) / 255.0)
}
