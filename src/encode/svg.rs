use std::fmt::Write;

use super::DocumentEncoder;
use crate::strip::VectorDocument;

/// Serializer producing a standalone SVG document.
///
/// Each strip becomes one `<rect>` of height 1 at `(col_start, row)`,
/// filled with the strip's intensity mapped linearly to an `rgb(v,v,v)`
/// gray. Element order follows document order.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgEncoder;

impl DocumentEncoder for SvgEncoder {
    type Output = String;

    fn encode(&self, doc: &VectorDocument) -> String {
        let mut out = String::new();
        let _ = writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = doc.width(),
            h = doc.height(),
        );
        for strip in doc.strips() {
            let v = strip.gray_level();
            let _ = writeln!(
                out,
                r#"  <rect x="{}" y="{}" width="{}" height="1" fill="rgb({v},{v},{v})"/>"#,
                strip.col_start,
                strip.row,
                strip.width(),
            );
        }
        let _ = writeln!(out, "</svg>");
        out
    }
}
