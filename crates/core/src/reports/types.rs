//! Report data types.

use dkm_shared::types::{COUNT_PLACEHOLDER, Rupiah};
use serde::{Deserialize, Serialize};

/// A recurring collection or payment whose label carries its occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedLineItem {
    /// Label with an optional `{count}` placeholder.
    pub label_template: String,
    /// How many times the event happened this period.
    pub occurrence_count: u32,
    /// Total amount for the period.
    pub amount: Rupiah,
}

impl FixedLineItem {
    /// Whether the item gets a row in its table.
    #[must_use]
    pub fn is_shown(&self) -> bool {
        self.occurrence_count > 0 || !self.amount.is_zero()
    }

    /// Display label: the count is filled in, or dropped together with its
    /// parenthesised group when zero.
    #[must_use]
    pub fn display_label(&self) -> String {
        let template = self.label_template.as_str();
        if self.occurrence_count > 0 {
            return template.replace(COUNT_PLACEHOLDER, &self.occurrence_count.to_string());
        }

        let Some(at) = template.find(COUNT_PLACEHOLDER) else {
            return template.to_string();
        };
        let open = template[..at]
            .rfind('(')
            .filter(|&open| !template[open..at].contains(')'));
        let close = template[at..].find(')').map(|offset| at + offset + 1);
        match (open, close) {
            (Some(open), Some(close)) => {
                format!("{}{}", template[..open].trim_end(), &template[close..])
            }
            _ => template.replace(COUNT_PLACEHOLDER, "").trim().to_string(),
        }
    }
}

/// A free-form row typed in by the treasurer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// What the money was for.
    pub description: String,
    /// Amount.
    pub amount: Rupiah,
}

impl LineItem {
    /// Creates a line item.
    #[must_use]
    pub fn new(description: impl Into<String>, amount: Rupiah) -> Self {
        Self {
            description: description.into(),
            amount,
        }
    }

    /// A row counts only with a description and a positive amount.
    #[must_use]
    pub fn qualifies(&self) -> bool {
        !self.description.trim().is_empty() && self.amount.is_positive()
    }
}

/// Contribution of one RT to the neighborhood collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RtAmount {
    /// RT number, starting at 1.
    pub rt_number: u32,
    /// Amount collected.
    pub amount: Rupiah,
}

/// Names printed under the signature block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signatories {
    /// Committee chair.
    pub chair_name: String,
    /// Treasurer.
    pub treasurer_name: String,
    /// "Bandung, 31 Oktober 2025".
    pub signing_place_date: String,
}

/// One month's figures, normalized from the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRequest {
    /// Reported month ("Oktober 2025").
    pub period_label: String,
    /// Previous month, used for the opening balance heading.
    pub previous_period_label: String,
    /// Balance carried over from the previous month.
    pub opening_balance: Rupiah,
    /// Recurring income, in template order.
    pub fixed_income_items: Vec<FixedLineItem>,
    /// Disclosure-only split of one income source. Never added to totals.
    pub rt_breakdown: Vec<RtAmount>,
    /// Ad-hoc income, in entry order.
    pub custom_income_items: Vec<LineItem>,
    /// Recurring expenses, in template order.
    pub fixed_expense_items: Vec<FixedLineItem>,
    /// Ad-hoc expenses, in entry order.
    pub custom_expense_items: Vec<LineItem>,
    /// Signature block.
    pub signatories: Signatories,
}

/// Totals derived from a [`ReportRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportResult {
    /// Fixed plus qualifying custom income.
    pub total_income: Rupiah,
    /// Opening balance plus total income.
    pub gross_balance: Rupiah,
    /// Fixed plus qualifying custom expenses.
    pub total_expense: Rupiah,
    /// Gross balance minus total expense. May be negative.
    pub closing_balance: Rupiah,
}

/// Horizontal alignment of a heading or paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    /// Left.
    Left,
    /// Centered.
    Center,
    /// Right.
    Right,
}

/// Visual weight of a heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emphasis {
    /// Document title: bold and slightly larger.
    Title,
    /// Section heading: bold.
    Strong,
    /// Body weight.
    Normal,
}

/// A two-cell table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// Description cell.
    pub left: String,
    /// Amount (or counter-signatory) cell.
    pub right: String,
}

impl TableRow {
    /// Creates a row.
    #[must_use]
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }

    /// A row with both cells empty.
    #[must_use]
    pub fn blank() -> Self {
        Self::new(String::new(), String::new())
    }
}

/// Rendering-technology-neutral document element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderBlock {
    /// A heading line.
    Heading {
        /// Text.
        text: String,
        /// Weight.
        emphasis: Emphasis,
        /// Alignment.
        alignment: Alignment,
    },
    /// A body paragraph.
    Paragraph {
        /// Text.
        text: String,
        /// Alignment.
        alignment: Alignment,
    },
    /// A two-column table.
    Table {
        /// Rows, top to bottom.
        rows: Vec<TableRow>,
    },
}

/// Totals plus the document that presents them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledReport {
    /// Computed totals.
    pub result: ReportResult,
    /// Document blocks, top to bottom.
    pub blocks: Vec<RenderBlock>,
}
