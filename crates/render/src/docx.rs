//! Office Open XML (.docx) writer.
//!
//! A .docx file is a zip package: the content-type map, the package
//! relationships, `word/document.xml` with the body, and `word/styles.xml`
//! setting the default font. The package is assembled in memory because the
//! zip writer needs to seek back over local headers.

use std::io::{Cursor, Write};

use dkm_core::reports::RenderBlock;
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

use crate::error::RenderError;
use crate::format::WriteDocument;
use crate::markup::{Dialect, DocWriter};

const MAIN_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const CONTENT_TYPES_NS: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
const RELATIONSHIPS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const OFFICE_DOCUMENT_REL: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const STYLES_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";

const DOCUMENT_PART: &str = "word/document.xml";
const STYLES_PART: &str = "word/styles.xml";

/// Office Open XML document writer.
pub struct Docx;

impl WriteDocument for Docx {
    fn write<W: Write>(mut w: W, blocks: &[RenderBlock]) -> Result<(), RenderError> {
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

        zip.start_file("[Content_Types].xml", options)?;
        content_types(&mut zip)?;
        zip.start_file("_rels/.rels", options)?;
        relationships(&mut zip, OFFICE_DOCUMENT_REL, DOCUMENT_PART)?;
        zip.start_file("word/_rels/document.xml.rels", options)?;
        relationships(&mut zip, STYLES_REL, "styles.xml")?;
        zip.start_file(STYLES_PART, options)?;
        styles(&mut zip)?;
        zip.start_file(DOCUMENT_PART, options)?;
        document(&mut zip, blocks)?;

        let package = zip.finish()?.into_inner();
        w.write_all(&package)?;
        Ok(())
    }
}

fn content_types<W: Write>(w: W) -> Result<(), RenderError> {
    let mut doc = DocWriter::new(w, Dialect::Ooxml);
    doc.declaration()?;
    doc.start("Types", &[("xmlns", CONTENT_TYPES_NS)])?;
    doc.empty(
        "Default",
        &[
            ("Extension", "rels"),
            ("ContentType", "application/vnd.openxmlformats-package.relationships+xml"),
        ],
    )?;
    doc.empty("Default", &[("Extension", "xml"), ("ContentType", "application/xml")])?;
    doc.empty(
        "Override",
        &[
            ("PartName", "/word/document.xml"),
            (
                "ContentType",
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml",
            ),
        ],
    )?;
    doc.empty(
        "Override",
        &[
            ("PartName", "/word/styles.xml"),
            (
                "ContentType",
                "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml",
            ),
        ],
    )?;
    doc.end("Types")
}

/// A relationships part holding a single relationship.
fn relationships<W: Write>(w: W, kind: &str, target: &str) -> Result<(), RenderError> {
    let mut doc = DocWriter::new(w, Dialect::Ooxml);
    doc.declaration()?;
    doc.start("Relationships", &[("xmlns", RELATIONSHIPS_NS)])?;
    doc.empty(
        "Relationship",
        &[("Id", "rId1"), ("Type", kind), ("Target", target)],
    )?;
    doc.end("Relationships")
}

fn styles<W: Write>(w: W) -> Result<(), RenderError> {
    let mut doc = DocWriter::new(w, Dialect::Ooxml);
    doc.declaration()?;
    doc.start("w:styles", &[("xmlns:w", MAIN_NS)])?;
    doc.start("w:docDefaults", &[])?;
    doc.start("w:rPrDefault", &[])?;
    doc.start("w:rPr", &[])?;
    doc.font_properties()?;
    doc.end("w:rPr")?;
    doc.end("w:rPrDefault")?;
    doc.end("w:docDefaults")?;
    doc.start(
        "w:style",
        &[
            ("w:type", "paragraph"),
            ("w:default", "1"),
            ("w:styleId", "Normal"),
        ],
    )?;
    doc.empty("w:name", &[("w:val", "Normal")])?;
    doc.end("w:style")?;
    doc.end("w:styles")
}

fn document<W: Write>(w: W, blocks: &[RenderBlock]) -> Result<(), RenderError> {
    let mut doc = DocWriter::new(w, Dialect::Ooxml);
    doc.declaration()?;
    doc.start("w:document", &[("xmlns:w", MAIN_NS)])?;
    doc.body(blocks)?;
    doc.end("w:document")
}
