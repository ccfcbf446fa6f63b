//! Output format selection.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use dkm_core::reports::RenderBlock;
use serde::{Deserialize, Serialize};

use crate::docx::Docx;
use crate::error::RenderError;
use crate::text::PlainText;
use crate::wordml::WordMl;

/// A writer that turns render blocks into one document format.
pub trait WriteDocument {
    /// Writes the whole document to `w`.
    fn write<W: Write>(w: W, blocks: &[RenderBlock]) -> Result<(), RenderError>;
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    /// Office Open XML package.
    #[default]
    Docx,
    /// WordprocessingML 2003, opened natively by Word and LibreOffice.
    WordMl,
    /// Fixed-width plain text.
    Text,
}

impl DocumentFormat {
    /// File extension including the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Docx => ".docx",
            Self::WordMl => ".doc",
            Self::Text => ".txt",
        }
    }

    /// MIME type for HTTP responses.
    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Self::WordMl => "application/msword",
            Self::Text => "text/plain; charset=utf-8",
        }
    }

    /// Renders the blocks into document bytes.
    pub fn render(self, blocks: &[RenderBlock]) -> Result<Vec<u8>, RenderError> {
        let mut out = Vec::new();
        match self {
            Self::Docx => Docx::write(&mut out, blocks)?,
            Self::WordMl => WordMl::write(&mut out, blocks)?,
            Self::Text => PlainText::write(&mut out, blocks)?,
        }
        Ok(out)
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Docx => f.write_str("docx"),
            Self::WordMl => f.write_str("wordml"),
            Self::Text => f.write_str("text"),
        }
    }
}

impl FromStr for DocumentFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "docx" => Ok(Self::Docx),
            "wordml" | "doc" => Ok(Self::WordMl),
            "text" | "txt" => Ok(Self::Text),
            other => Err(RenderError::UnknownFormat(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dkm_core::reports::{Alignment, Emphasis};
    use rstest::rstest;

    #[rstest]
    #[case("docx", DocumentFormat::Docx)]
    #[case(" DOCX", DocumentFormat::Docx)]
    #[case("wordml", DocumentFormat::WordMl)]
    #[case("WordML", DocumentFormat::WordMl)]
    #[case("doc", DocumentFormat::WordMl)]
    #[case(" text ", DocumentFormat::Text)]
    #[case("txt", DocumentFormat::Text)]
    fn test_parse_format(#[case] raw: &str, #[case] expected: DocumentFormat) {
        assert_eq!(raw.parse::<DocumentFormat>().unwrap(), expected);
    }

    #[test]
    fn test_parse_unknown_format() {
        let err = "pdf".parse::<DocumentFormat>().unwrap_err();
        assert!(matches!(err, RenderError::UnknownFormat(ref name) if name == "pdf"));
    }

    #[test]
    fn test_display_matches_parse() {
        for format in [DocumentFormat::Docx, DocumentFormat::WordMl, DocumentFormat::Text] {
            assert_eq!(format.to_string().parse::<DocumentFormat>().unwrap(), format);
        }
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(
            serde_json::to_string(&DocumentFormat::WordMl).unwrap(),
            "\"wordml\""
        );
        let format: DocumentFormat = serde_json::from_str("\"text\"").unwrap();
        assert_eq!(format, DocumentFormat::Text);
        let format: DocumentFormat = serde_json::from_str("\"docx\"").unwrap();
        assert_eq!(format, DocumentFormat::Docx);
    }

    #[test]
    fn test_extensions_and_content_types() {
        assert_eq!(DocumentFormat::default(), DocumentFormat::Docx);
        assert_eq!(DocumentFormat::Docx.extension(), ".docx");
        assert_eq!(
            DocumentFormat::Docx.content_type(),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );
        assert_eq!(DocumentFormat::WordMl.extension(), ".doc");
        assert_eq!(DocumentFormat::WordMl.content_type(), "application/msword");
        assert_eq!(DocumentFormat::Text.extension(), ".txt");
        assert!(DocumentFormat::Text.content_type().starts_with("text/plain"));
    }

    #[test]
    fn test_render_dispatches_on_format() {
        let blocks = vec![RenderBlock::Heading {
            text: "Laporan".to_string(),
            emphasis: Emphasis::Title,
            alignment: Alignment::Left,
        }];

        let docx = DocumentFormat::Docx.render(&blocks).unwrap();
        assert!(docx.starts_with(b"PK"));

        let doc = DocumentFormat::WordMl.render(&blocks).unwrap();
        assert!(doc.starts_with(b"<?xml"));

        let text = DocumentFormat::Text.render(&blocks).unwrap();
        assert_eq!(text, b"Laporan\n");
    }
}
