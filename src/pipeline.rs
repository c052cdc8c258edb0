use image::GrayImage;
use tracing::debug;

use crate::config::ConversionParameters;
use crate::denoise::median_denoise;
use crate::edge::detect_edges;
use crate::encode::{DocumentEncoder, EpsEncoder, PdfEncoder, SvgEncoder};
use crate::error::StripResult;
use crate::mask::threshold_map;
use crate::strip::VectorDocument;
use crate::vectorize::extract_strips;

/// The three serialized renditions of one conversion request.
///
/// All three are produced from the same [`VectorDocument`], so they
/// render geometrically identical content.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionBundle {
    /// UTF-8 SVG markup.
    pub svg: String,
    /// Adobe Illustrator-compatible PDF bytes.
    pub pdf: Vec<u8>,
    /// Encapsulated PostScript text.
    pub eps: String,
}

/// Decode raw image bytes into a grayscale raster.
///
/// This is the only place the engine touches an image container format;
/// color inputs are reduced to luminance here. Decoder failures propagate
/// unchanged.
pub fn decode_raster(raw: &[u8]) -> StripResult<GrayImage> {
    let image = image::load_from_memory(raw)?;
    let buffer = image.to_luma8();
    debug!(
        width = buffer.width(),
        height = buffer.height(),
        "decoded raster"
    );
    Ok(buffer)
}

/// Run preprocessing and vectorization on a decoded raster, producing
/// the document every encoder consumes.
///
/// Parameters must have been validated; an empty raster is a caller
/// error.
pub fn vectorize_raster(buffer: &GrayImage, params: &ConversionParameters) -> VectorDocument {
    let (width, height) = buffer.dimensions();
    assert!(width > 0 && height > 0, "raster must be non-empty");

    let denoised = median_denoise(buffer, params.denoise_strength);
    let intensity = detect_edges(&denoised, params.edge_sigma);
    let mask = threshold_map(&intensity, params.threshold);
    let strips = extract_strips(&mask, &intensity);
    debug!(width, height, strips = strips.len(), "vectorized raster");

    VectorDocument::new(width, height, strips)
}

/// Serialize one document into all three formats, encoders running
/// concurrently over the shared read-only document.
pub fn encode_all(doc: &VectorDocument) -> ConversionBundle {
    let (svg, (pdf, eps)) = rayon::join(
        || SvgEncoder.encode(doc),
        || rayon::join(|| PdfEncoder.encode(doc), || EpsEncoder.encode(doc)),
    );
    ConversionBundle { svg, pdf, eps }
}

/// Convert raw image bytes into the three-format output bundle.
///
/// Parameters are validated before any pixel is touched and a failure at
/// any stage aborts the request before an encoder runs; no partial
/// bundle is ever returned. A conversion with zero detected edges is a
/// valid result whose outputs are structurally valid empty documents.
pub fn convert(raw: &[u8], params: &ConversionParameters) -> StripResult<ConversionBundle> {
    params.validate()?;
    let buffer = decode_raster(raw)?;
    let doc = vectorize_raster(&buffer, params);
    Ok(encode_all(&doc))
}
