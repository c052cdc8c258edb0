use std::fmt::Write;

use super::{DocumentEncoder, format_gray};
use crate::strip::VectorDocument;

/// Serializer producing an Encapsulated PostScript document.
///
/// Rectangles are drawn bottom-up in PostScript user space with the same
/// row flip and grayscale mapping as the PDF encoder; the program ends
/// with `showpage` and the `%%EOF` trailer comment.
#[derive(Debug, Clone, Copy, Default)]
pub struct EpsEncoder;

impl DocumentEncoder for EpsEncoder {
    type Output = String;

    fn encode(&self, doc: &VectorDocument) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "%!PS-Adobe-3.0 EPSF-3.0");
        let _ = writeln!(out, "%%BoundingBox: 0 0 {} {}", doc.width(), doc.height());
        for strip in doc.strips() {
            let bottom = doc.height() - strip.row - 1;
            let width = strip.width();
            let _ = writeln!(out, "{} setgray", format_gray(strip));
            let _ = writeln!(
                out,
                "newpath {} {} moveto {width} 0 rlineto 0 1 rlineto -{width} 0 rlineto closepath fill",
                strip.col_start, bottom,
            );
        }
        let _ = writeln!(out, "showpage");
        out.push_str("%%EOF");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strip::Strip;

    fn two_strip_doc() -> VectorDocument {
        VectorDocument::new(
            4,
            4,
            vec![
                Strip {
                    row: 1,
                    col_start: 0,
                    col_end: 2,
                    intensity: 1.0,
                },
                Strip {
                    row: 3,
                    col_start: 2,
                    col_end: 3,
                    intensity: 0.0,
                },
            ],
        )
    }

    #[test]
    fn starts_with_header_and_ends_with_eof_marker() {
        let eps = EpsEncoder.encode(&two_strip_doc());
        assert!(eps.starts_with("%!PS-Adobe-3.0 EPSF-3.0"));
        assert!(eps.ends_with("%%EOF"));
    }

    #[test]
    fn bounding_box_matches_the_canvas() {
        let eps = EpsEncoder.encode(&two_strip_doc());
        assert!(eps.contains("%%BoundingBox: 0 0 4 4"));
    }

    #[test]
    fn one_filled_rectangle_per_strip_with_flipped_rows() {
        let eps = EpsEncoder.encode(&two_strip_doc());
        assert_eq!(eps.matches("closepath fill").count(), 2);
        assert!(eps.contains("1.0000 setgray"));
        assert!(eps.contains(
            "newpath 0 2 moveto 3 0 rlineto 0 1 rlineto -3 0 rlineto closepath fill"
        ));
        assert!(eps.contains("0.0000 setgray"));
        assert!(eps.contains(
            "newpath 2 0 moveto 2 0 rlineto 0 1 rlineto -2 0 rlineto closepath fill"
        ));
    }

    #[test]
    fn showpage_precedes_the_eof_marker() {
        let eps = EpsEncoder.encode(&two_strip_doc());
        assert!(eps.ends_with("showpage\n%%EOF"));
    }

    #[test]
    fn empty_document_is_still_structurally_valid() {
        let doc = VectorDocument::new(4, 4, Vec::new());
        let eps = EpsEncoder.encode(&doc);

        assert!(eps.starts_with("%!PS-Adobe-3.0 EPSF-3.0"));
        assert!(eps.contains("%%BoundingBox: 0 0 4 4"));
        assert!(!eps.contains("newpath"));
        assert!(eps.ends_with("showpage\n%%EOF"));
    }
}
