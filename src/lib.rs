pub mod config;
pub mod denoise;
pub mod edge;
pub mod encode;
pub mod error;
pub mod mask;
pub mod pipeline;
pub mod strip;
pub mod vectorize;

pub use config::ConversionParameters;
pub use edge::IntensityMap;
pub use encode::{DocumentEncoder, EpsEncoder, OutputFormat, PdfEncoder, SvgEncoder};
pub use error::{StripError, StripResult};
pub use mask::EdgeMask;
pub use pipeline::{ConversionBundle, convert};
pub use strip::{Strip, VectorDocument};

use std::path::Path;
use std::sync::Arc;

use image::GrayImage;

/// Entry point for configuring and running conversions.
///
/// A `Converter` holds the parameters applied to every input it is given;
/// each input produces an independent [`Vectorized`] session and nothing
/// is shared between them.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    params: ConversionParameters,
}

impl Converter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the median filter strength (window radius; 0 disables
    /// denoising).
    pub fn with_denoise_strength(mut self, strength: f32) -> Self {
        self.params.denoise_strength = strength;
        self
    }

    /// Set the Gaussian sigma applied before gradient computation.
    pub fn with_edge_sigma(mut self, sigma: f32) -> Self {
        self.params.edge_sigma = sigma;
        self
    }

    /// Set the edge intensity cutoff.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.params.threshold = threshold;
        self
    }

    /// Get a reference to the configured parameters.
    pub fn params(&self) -> &ConversionParameters {
        &self.params
    }

    /// Decode and vectorize raw image bytes, returning a session from
    /// which every output format can be derived.
    pub fn for_bytes(&self, raw: &[u8]) -> StripResult<Vectorized> {
        self.params.validate()?;
        let buffer = pipeline::decode_raster(raw)?;
        Ok(self.vectorize(&buffer))
    }

    /// Read and vectorize an image file.
    pub fn for_image(&self, path: impl AsRef<Path>) -> StripResult<Vectorized> {
        self.params.validate()?;
        let raw = std::fs::read(path)?;
        let buffer = pipeline::decode_raster(&raw)?;
        Ok(self.vectorize(&buffer))
    }

    fn vectorize(&self, buffer: &GrayImage) -> Vectorized {
        let document = pipeline::vectorize_raster(buffer, &self.params);
        Vectorized {
            document: Arc::new(document),
        }
    }
}

/// Result of vectorizing a single raster, from which any output format
/// can be produced without re-running the pipeline.
///
/// The document is shared read-only, so cloning the session and encoding
/// from several threads is safe.
#[derive(Debug, Clone)]
pub struct Vectorized {
    document: Arc<VectorDocument>,
}

impl Vectorized {
    /// Get a reference to the shared document.
    pub fn document(&self) -> &VectorDocument {
        &self.document
    }

    /// Serialize as SVG text.
    pub fn svg(&self) -> String {
        SvgEncoder.encode(&self.document)
    }

    /// Serialize as Illustrator-compatible PDF bytes.
    pub fn pdf(&self) -> Vec<u8> {
        PdfEncoder.encode(&self.document)
    }

    /// Serialize as EPS text.
    pub fn eps(&self) -> String {
        EpsEncoder.encode(&self.document)
    }

    /// Serialize all three formats from the shared document, encoders
    /// running concurrently.
    pub fn bundle(&self) -> ConversionBundle {
        pipeline::encode_all(&self.document)
    }
}
