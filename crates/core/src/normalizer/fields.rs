//! Raw form fields and the names the form uses for them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Reported month, e.g. "Oktober 2025".
pub const PERIOD_FIELD: &str = "bulan_tahun";
/// Previous month, e.g. "September".
pub const PREVIOUS_PERIOD_FIELD: &str = "bulan_sebelumnya";
/// Balance carried over from the previous month.
pub const OPENING_BALANCE_FIELD: &str = "saldo_awal";
/// Signing date written after the signing place.
pub const SIGNING_DATE_FIELD: &str = "tanggal_ttd";
/// Chair's name.
pub const CHAIR_NAME_FIELD: &str = "ttd_ketua";
/// Treasurer's name.
pub const TREASURER_NAME_FIELD: &str = "ttd_bendahara";

/// Which custom row list a numbered field pair belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowCategory {
    /// `income_desc_N` / `income_amt_N`.
    Income,
    /// `expense_desc_N` / `expense_amt_N`.
    Expense,
}

impl RowCategory {
    /// Field name prefix.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Description field of slot `index` (1-based).
    #[must_use]
    pub fn description_field(self, index: usize) -> String {
        format!("{}_desc_{index}", self.prefix())
    }

    /// Amount field of slot `index` (1-based).
    #[must_use]
    pub fn amount_field(self, index: usize) -> String {
        format!("{}_amt_{index}", self.prefix())
    }
}

/// One numbered description/amount slot, still as entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawRow<'a> {
    /// Slot number, starting at 1.
    pub index: usize,
    /// Description as entered.
    pub description: &'a str,
    /// Amount as entered.
    pub amount: &'a str,
}

/// A form submission: field name to entered text. Missing fields read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormFields(HashMap<String, String>);

impl FormFields {
    /// Creates an empty submission.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Sets a field, builder style.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Field value; empty when the field was not submitted.
    #[must_use]
    pub fn get(&self, name: &str) -> &str {
        self.0.get(name).map_or("", String::as_str)
    }

    /// Trimmed field value, or `None` when it is missing or blank.
    #[must_use]
    pub fn non_blank(&self, name: &str) -> Option<&str> {
        Some(self.get(name).trim()).filter(|value| !value.is_empty())
    }

    /// Number of submitted fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing was submitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Numbered custom row slots `1..=cap`, in slot order.
    ///
    /// Slots where both fields are blank are skipped; slots above `cap` are never read.
    #[must_use]
    pub fn custom_rows(&self, category: RowCategory, cap: usize) -> Vec<RawRow<'_>> {
        (1..=cap)
            .map(|index| RawRow {
                index,
                description: self.get(&category.description_field(index)),
                amount: self.get(&category.amount_field(index)),
            })
            .filter(|row| !row.description.trim().is_empty() || !row.amount.trim().is_empty())
            .collect()
    }
}

impl From<HashMap<String, String>> for FormFields {
    fn from(fields: HashMap<String, String>) -> Self {
        Self(fields)
    }
}
