//! Word body markup shared by the 2003 XML and the OOXML writers.
//!
//! Both formats use the `w:` vocabulary for paragraphs, runs and tables; they
//! differ in a handful of element and attribute names, captured by [`Dialect`].
//! Body text is Times New Roman 11 pt; titles are bold 12 pt; section headings
//! are bold with extra space above. Tables have two borderless columns with the
//! right column right-aligned.

use std::io::Write;

use dkm_core::reports::{Alignment, Emphasis, RenderBlock, TableRow};
use quick_xml::{
    Writer,
    events::{BytesDecl, BytesStart, BytesText, Event},
};

use crate::error::{RenderError, xml};

pub(crate) const FONT: &str = "Times New Roman";

/// Half-points.
const BODY_SIZE: &str = "22";
const TITLE_SIZE: &str = "24";
/// Twips above a section heading.
const SECTION_SPACING: &str = "240";

/// A4 portrait, in twips.
const PAGE_WIDTH: &str = "11906";
const PAGE_HEIGHT: &str = "16838";
const MARGIN_SIDE: &str = "1418";
const MARGIN_EDGE: &str = "1134";
/// Column widths in twips; they add up to the text width.
const LEFT_COLUMN: &str = "6354";
const RIGHT_COLUMN: &str = "3000";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Dialect {
    /// WordprocessingML 2003 single-file XML.
    WordMl2003,
    /// Office Open XML (`word/document.xml` inside a .docx package).
    Ooxml,
}

impl Dialect {
    /// Complex-script font size element.
    pub(crate) const fn size_cs(self) -> &'static str {
        match self {
            Self::WordMl2003 => "w:sz-cs",
            Self::Ooxml => "w:szCs",
        }
    }

    /// High-ANSI font attribute.
    pub(crate) const fn high_ansi(self) -> &'static str {
        match self {
            Self::WordMl2003 => "w:h-ansi",
            Self::Ooxml => "w:hAnsi",
        }
    }
}

pub(crate) struct DocWriter<W: Write> {
    pub(crate) wr: Writer<W>,
    dialect: Dialect,
}

impl<W: Write> DocWriter<W> {
    pub(crate) fn new(w: W, dialect: Dialect) -> Self {
        Self {
            wr: Writer::new(w),
            dialect,
        }
    }

    /// `<?xml version="1.0" encoding="UTF-8" standalone="yes"?>`
    pub(crate) fn declaration(&mut self) -> Result<(), RenderError> {
        self.wr
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
            .map_err(xml)
    }

    pub(crate) fn start(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<(), RenderError> {
        let element = BytesStart::new(name).with_attributes(attributes.iter().copied());
        self.wr.write_event(Event::Start(element)).map_err(xml)
    }

    pub(crate) fn end(&mut self, name: &str) -> Result<(), RenderError> {
        self.wr
            .write_event(Event::End(BytesStart::new(name).to_end()))
            .map_err(xml)
    }

    pub(crate) fn empty(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<(), RenderError> {
        let element = BytesStart::new(name).with_attributes(attributes.iter().copied());
        self.wr.write_event(Event::Empty(element)).map_err(xml)
    }

    fn text(&mut self, text: &str) -> Result<(), RenderError> {
        self.wr
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(xml)
    }

    /// Run properties selecting the body font and size.
    pub(crate) fn font_properties(&mut self) -> Result<(), RenderError> {
        let high_ansi = self.dialect.high_ansi();
        self.empty(
            "w:rFonts",
            &[("w:ascii", FONT), (high_ansi, FONT), ("w:cs", FONT)],
        )?;
        self.font_size(BODY_SIZE)
    }

    fn font_size(&mut self, half_points: &str) -> Result<(), RenderError> {
        let size_cs = self.dialect.size_cs();
        self.empty("w:sz", &[("w:val", half_points)])?;
        self.empty(size_cs, &[("w:val", half_points)])
    }

    /// `<w:body>` with every block followed by the page setup.
    pub(crate) fn body(&mut self, blocks: &[RenderBlock]) -> Result<(), RenderError> {
        self.start("w:body", &[])?;
        for block in blocks {
            match block {
                RenderBlock::Heading {
                    text,
                    emphasis,
                    alignment,
                } => self.paragraph(text, *alignment, *emphasis)?,
                RenderBlock::Paragraph { text, alignment } => {
                    self.paragraph(text, *alignment, Emphasis::Normal)?;
                }
                RenderBlock::Table { rows } => self.table(rows)?,
            }
        }
        self.section_properties()?;
        self.end("w:body")
    }

    fn paragraph(
        &mut self,
        text: &str,
        alignment: Alignment,
        emphasis: Emphasis,
    ) -> Result<(), RenderError> {
        self.start("w:p", &[])?;
        self.start("w:pPr", &[])?;
        if emphasis == Emphasis::Strong {
            self.empty("w:spacing", &[("w:before", SECTION_SPACING)])?;
        }
        self.empty("w:jc", &[("w:val", justification(alignment))])?;
        self.end("w:pPr")?;

        if !text.is_empty() {
            self.start("w:r", &[])?;
            match emphasis {
                Emphasis::Title => {
                    self.start("w:rPr", &[])?;
                    self.empty("w:b", &[])?;
                    self.font_size(TITLE_SIZE)?;
                    self.end("w:rPr")?;
                }
                Emphasis::Strong => {
                    self.start("w:rPr", &[])?;
                    self.empty("w:b", &[])?;
                    self.end("w:rPr")?;
                }
                Emphasis::Normal => {}
            }
            self.start("w:t", &[])?;
            self.text(text)?;
            self.end("w:t")?;
            self.end("w:r")?;
        }

        self.end("w:p")
    }

    fn table(&mut self, rows: &[TableRow]) -> Result<(), RenderError> {
        self.start("w:tbl", &[])?;
        self.start("w:tblPr", &[])?;
        self.empty("w:tblW", &[("w:w", "0"), ("w:type", "auto")])?;
        self.start("w:tblBorders", &[])?;
        for edge in ["w:top", "w:left", "w:bottom", "w:right", "w:insideH", "w:insideV"] {
            self.empty(edge, &[("w:val", "nil")])?;
        }
        self.end("w:tblBorders")?;
        self.end("w:tblPr")?;

        self.start("w:tblGrid", &[])?;
        self.empty("w:gridCol", &[("w:w", LEFT_COLUMN)])?;
        self.empty("w:gridCol", &[("w:w", RIGHT_COLUMN)])?;
        self.end("w:tblGrid")?;

        for row in rows {
            self.start("w:tr", &[])?;
            self.cell(&row.left, LEFT_COLUMN, Alignment::Left)?;
            self.cell(&row.right, RIGHT_COLUMN, Alignment::Right)?;
            self.end("w:tr")?;
        }

        self.end("w:tbl")
    }

    /// A cell always holds one paragraph, even when empty.
    fn cell(&mut self, text: &str, width: &str, alignment: Alignment) -> Result<(), RenderError> {
        self.start("w:tc", &[])?;
        self.start("w:tcPr", &[])?;
        self.empty("w:tcW", &[("w:w", width), ("w:type", "dxa")])?;
        self.end("w:tcPr")?;
        self.paragraph(text, alignment, Emphasis::Normal)?;
        self.end("w:tc")
    }

    fn section_properties(&mut self) -> Result<(), RenderError> {
        self.start("w:sectPr", &[])?;
        self.empty("w:pgSz", &[("w:w", PAGE_WIDTH), ("w:h", PAGE_HEIGHT)])?;
        self.empty(
            "w:pgMar",
            &[
                ("w:top", MARGIN_EDGE),
                ("w:right", MARGIN_EDGE),
                ("w:bottom", MARGIN_EDGE),
                ("w:left", MARGIN_SIDE),
            ],
        )?;
        self.end("w:sectPr")
    }
}

const fn justification(alignment: Alignment) -> &'static str {
    match alignment {
        Alignment::Left => "left",
        Alignment::Center => "center",
        Alignment::Right => "right",
    }
}
