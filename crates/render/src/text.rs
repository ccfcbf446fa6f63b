//! Plain text writer.

use std::io::Write;

use dkm_core::reports::{Alignment, Emphasis, RenderBlock, TableRow};
use textwrap::core::display_width;

use crate::error::RenderError;
use crate::format::WriteDocument;

/// Line width of the text rendering.
pub const TEXT_WIDTH: usize = 72;

/// Narrowest the description column gets, however wide the amounts are.
const MIN_LEFT_COLUMN: usize = 24;
const COLUMN_GAP: usize = 2;

/// Fixed-width plain text writer.
pub struct PlainText;

impl WriteDocument for PlainText {
    fn write<W: Write>(mut w: W, blocks: &[RenderBlock]) -> Result<(), RenderError> {
        w.write_all(Self::render(blocks, TEXT_WIDTH).as_bytes())?;
        Ok(())
    }
}

impl PlainText {
    /// Renders the blocks as lines of at most `width` columns.
    ///
    /// Long text is wrapped; a single word wider than the line is kept whole.
    #[must_use]
    pub fn render(blocks: &[RenderBlock], width: usize) -> String {
        let mut out = String::new();
        for block in blocks {
            match block {
                RenderBlock::Heading {
                    text,
                    emphasis,
                    alignment,
                } => {
                    if *emphasis == Emphasis::Strong && !out.is_empty() {
                        out.push('\n');
                    }
                    push_aligned(&mut out, text, *alignment, width);
                }
                RenderBlock::Paragraph { text, alignment } => {
                    push_aligned(&mut out, text, *alignment, width);
                }
                RenderBlock::Table { rows } => push_table(&mut out, rows, width),
            }
        }
        out
    }
}

fn push_aligned(out: &mut String, text: &str, alignment: Alignment, width: usize) {
    if text.is_empty() {
        out.push('\n');
        return;
    }
    for line in textwrap::wrap(text, width) {
        let pad = width.saturating_sub(display_width(&line));
        let indent = match alignment {
            Alignment::Left => 0,
            Alignment::Center => pad / 2,
            Alignment::Right => pad,
        };
        push_line(out, &" ".repeat(indent), &line);
    }
}

fn push_table(out: &mut String, rows: &[TableRow], width: usize) {
    let right_width = rows
        .iter()
        .map(|row| display_width(&row.right))
        .max()
        .unwrap_or(0);
    let left_width = width
        .saturating_sub(right_width + COLUMN_GAP)
        .max(MIN_LEFT_COLUMN);

    for row in rows {
        if row.left.is_empty() && row.right.is_empty() {
            out.push('\n');
            continue;
        }

        let mut left = textwrap::wrap(&row.left, left_width);
        if left.is_empty() {
            left.push("".into());
        }
        let last = left.len() - 1;
        for (i, line) in left.iter().enumerate() {
            if i < last {
                push_line(out, line, "");
                continue;
            }
            // The amount goes on the last line of its description.
            let gap = (left_width + COLUMN_GAP).saturating_sub(display_width(line));
            let pad = right_width.saturating_sub(display_width(&row.right));
            let filler = " ".repeat(gap + pad);
            push_line(out, &format!("{line}{filler}"), &row.right);
        }
    }
}

fn push_line(out: &mut String, head: &str, tail: &str) {
    out.push_str(head);
    out.push_str(tail);
    let trimmed = out.trim_end_matches(' ').len();
    out.truncate(trimmed);
    out.push('\n');
}
