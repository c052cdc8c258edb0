use std::fmt::Write;

use super::{DocumentEncoder, format_gray};
use crate::strip::VectorDocument;

/// Serializer producing a minimal Adobe Illustrator-compatible PDF.
///
/// The payload is a self-contained PDF 1.4 file: catalog, page tree, one
/// page whose MediaBox matches the canvas, and a content stream with one
/// fill-rectangle instruction per strip. Body objects are appended to the
/// output buffer while their byte offsets are recorded, then the
/// cross-reference table is written from the recorded offsets, so every
/// xref entry is a byte-accurate pointer into the payload being produced.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfEncoder;

impl DocumentEncoder for PdfEncoder {
    type Output = Vec<u8>;

    fn encode(&self, doc: &VectorDocument) -> Vec<u8> {
        let content = content_stream(doc);
        let objects: [Vec<u8>; 4] = [
            b"1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n".to_vec(),
            b"2 0 obj\n<< /Type /Pages /Kids [3 0 R] /Count 1 >>\nendobj\n".to_vec(),
            format!(
                "3 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] /Contents 4 0 R >>\nendobj\n",
                doc.width(),
                doc.height(),
            )
            .into_bytes(),
            stream_object(4, &content),
        ];

        let mut out = Vec::new();
        out.extend_from_slice(b"%PDF-1.4\n");

        let mut offsets = Vec::with_capacity(objects.len());
        for object in &objects {
            offsets.push(out.len());
            out.extend_from_slice(object);
        }

        let xref_start = out.len();
        let size = offsets.len() + 1;
        out.extend_from_slice(format!("xref\n0 {size}\n").as_bytes());
        out.extend_from_slice(b"0000000000 65535 f \n");
        for offset in &offsets {
            out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
        }
        out.extend_from_slice(format!("trailer\n<< /Root 1 0 R /Size {size} >>\n").as_bytes());
        out.extend_from_slice(format!("startxref\n{xref_start}\n%%EOF").as_bytes());
        out
    }
}

/// Content stream filling one rectangle per strip. PDF user space has its
/// origin at the bottom-left, so rows are flipped against the raster's
/// top-down convention.
fn content_stream(doc: &VectorDocument) -> Vec<u8> {
    let mut content = String::from("q\n");
    for strip in doc.strips() {
        let bottom = doc.height() - strip.row - 1;
        let _ = writeln!(
            content,
            "{} g {} {} {} 1 re f",
            format_gray(strip),
            strip.col_start,
            bottom,
            strip.width(),
        );
    }
    content.push_str("Q\n");
    content.into_bytes()
}

fn stream_object(id: u32, content: &[u8]) -> Vec<u8> {
    let mut object =
        format!("{id} 0 obj\n<< /Length {} >>\nstream\n", content.len()).into_bytes();
    object.extend_from_slice(content);
    object.extend_from_slice(b"\nendstream\nendobj\n");
    object
}
