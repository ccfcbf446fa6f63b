//! WordprocessingML 2003 writer.
//!
//! The output is a single XML file that Word and LibreOffice open as a regular
//! document. It is kept for readers that cannot open a .docx package.

use std::io::Write;

use dkm_core::reports::RenderBlock;

use crate::error::RenderError;
use crate::format::WriteDocument;
use crate::markup::{Dialect, DocWriter, FONT};

const WORDML_NS: &str = "http://schemas.microsoft.com/office/word/2003/wordml";
const MSO_APPLICATION: &[u8] = b"<?mso-application progid=\"Word.Document\"?>";

/// WordprocessingML 2003 document writer.
pub struct WordMl;

impl WriteDocument for WordMl {
    fn write<W: Write>(w: W, blocks: &[RenderBlock]) -> Result<(), RenderError> {
        let mut doc = DocWriter::new(w, Dialect::WordMl2003);

        doc.declaration()?;
        doc.wr.get_mut().write_all(MSO_APPLICATION)?;

        doc.start("w:wordDocument", &[("xmlns:w", WORDML_NS)])?;
        header(&mut doc)?;
        doc.body(blocks)?;
        doc.end("w:wordDocument")
    }
}

/// Fonts and the default paragraph style.
fn header<W: Write>(doc: &mut DocWriter<W>) -> Result<(), RenderError> {
    doc.start("w:fonts", &[])?;
    doc.empty(
        "w:defaultFonts",
        &[("w:ascii", FONT), ("w:h-ansi", FONT), ("w:cs", FONT)],
    )?;
    doc.end("w:fonts")?;

    doc.start("w:styles", &[])?;
    doc.start(
        "w:style",
        &[
            ("w:type", "paragraph"),
            ("w:default", "on"),
            ("w:styleId", "Normal"),
        ],
    )?;
    doc.empty("w:name", &[("w:val", "Normal")])?;
    doc.start("w:rPr", &[])?;
    doc.font_properties()?;
    doc.end("w:rPr")?;
    doc.end("w:style")?;
    doc.end("w:styles")
}

#[cfg(test)]
mod tests {
    use super::*;
    use dkm_core::reports::{Alignment, Emphasis, TableRow};

    fn render(blocks: &[RenderBlock]) -> String {
        let mut out = Vec::new();
        WordMl::write(&mut out, blocks).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn heading(text: &str, emphasis: Emphasis, alignment: Alignment) -> RenderBlock {
        RenderBlock::Heading {
            text: text.to_string(),
            emphasis,
            alignment,
        }
    }

    #[test]
    fn test_prologue_and_root() {
        let doc = render(&[]);

        assert!(doc.starts_with(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#));
        assert!(doc.contains(r#"<?mso-application progid="Word.Document"?>"#));
        assert!(doc.contains(&format!(r#"<w:wordDocument xmlns:w="{WORDML_NS}">"#)));
        assert!(doc.contains(r#"<w:defaultFonts w:ascii="Times New Roman""#));
        assert!(doc.contains(r#"<w:sz w:val="22"/>"#));
        assert!(doc.contains("<w:body><w:sectPr>"));
        assert!(doc.ends_with("</w:body></w:wordDocument>"));
    }

    #[test]
    fn test_title_is_bold_and_larger() {
        let doc = render(&[heading(
            "Laporan Keuangan DKM Sirojul Huda",
            Emphasis::Title,
            Alignment::Center,
        )]);

        assert!(doc.contains(
            r#"<w:p><w:pPr><w:jc w:val="center"/></w:pPr><w:r><w:rPr><w:b/><w:sz w:val="24"/>"#
        ));
        assert!(doc.contains("<w:t>Laporan Keuangan DKM Sirojul Huda</w:t>"));
    }

    #[test]
    fn test_section_heading_has_spacing_before() {
        let doc = render(&[heading("Pemasukan", Emphasis::Strong, Alignment::Left)]);

        assert!(doc.contains(
            r#"<w:pPr><w:spacing w:before="240"/><w:jc w:val="left"/></w:pPr><w:r><w:rPr><w:b/></w:rPr><w:t>Pemasukan</w:t>"#
        ));
    }

    #[test]
    fn test_amount_paragraph_is_right_aligned() {
        let doc = render(&[RenderBlock::Paragraph {
            text: "4.113.000".to_string(),
            alignment: Alignment::Right,
        }]);

        assert!(doc.contains(
            r#"<w:p><w:pPr><w:jc w:val="right"/></w:pPr><w:r><w:t>4.113.000</w:t></w:r></w:p>"#
        ));
    }

    #[test]
    fn test_table_is_borderless_two_columns() {
        let doc = render(&[RenderBlock::Table {
            rows: vec![
                TableRow::new("Kencleng Jumat (5x)", "1.316.000"),
                TableRow::blank(),
            ],
        }]);

        assert_eq!(doc.matches("<w:tr>").count(), 2);
        assert_eq!(doc.matches("<w:tc>").count(), 4);
        assert_eq!(doc.matches(r#"<w:gridCol "#).count(), 2);
        assert!(doc.contains(r#"<w:insideV w:val="nil"/>"#));
        assert!(doc.contains(
            r#"<w:jc w:val="right"/></w:pPr><w:r><w:t>1.316.000</w:t>"#
        ));
        // Blank cells still carry a paragraph.
        assert_eq!(doc.matches("<w:p>").count(), 4);
    }

    #[test]
    fn test_text_is_escaped() {
        let doc = render(&[RenderBlock::Paragraph {
            text: "Sabun & <lap>".to_string(),
            alignment: Alignment::Left,
        }]);

        assert!(doc.contains("<w:t>Sabun &amp; &lt;lap&gt;</w:t>"));
    }

    #[test]
    fn test_empty_paragraph_has_no_run() {
        let doc = render(&[RenderBlock::Paragraph {
            text: String::new(),
            alignment: Alignment::Left,
        }]);

        assert!(doc.contains(r#"<w:p><w:pPr><w:jc w:val="left"/></w:pPr></w:p>"#));
        assert!(!doc.contains("<w:r>"));
    }
}
