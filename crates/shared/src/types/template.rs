//! Report template: everything about the document that is not user data.
//!
//! One template covers every layout variant of the monthly report. A variant
//! without the RT breakdown sets `rt_breakdown` to `None`; a variant without fixed
//! line items leaves the corresponding list empty.

use serde::{Deserialize, Serialize};

/// Placeholder replaced by the occurrence count in fixed item labels.
pub const COUNT_PLACEHOLDER: &str = "{count}";

/// Static layout of the monthly report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportTemplate {
    /// Document title.
    pub title: String,
    /// Address line under the title.
    pub address: String,
    /// Prefix of the period heading ("Bulan Oktober 2025").
    pub period_prefix: String,
    /// Section and total labels.
    pub labels: SectionLabels,
    /// Recurring income events, in display order.
    pub fixed_income: Vec<FixedItemSpec>,
    /// Recurring expenses, in display order.
    pub fixed_expense: Vec<FixedItemSpec>,
    /// Per-RT disclosure of one income source, if the variant shows it.
    ///
    /// Config files cannot express `None`; `units = 0` hides the breakdown too.
    pub rt_breakdown: Option<RtBreakdownSpec>,
    /// Signature block texts.
    pub signatories: SignatoryTemplate,
}

/// Section headings and total row labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionLabels {
    /// Prefix of the opening and closing balance headings ("Saldo September").
    pub balance_prefix: String,
    /// Income section heading.
    pub income: String,
    /// Income total row.
    pub total_income: String,
    /// Opening balance plus income heading.
    pub gross_balance: String,
    /// Expense section heading.
    pub expense: String,
    /// Expense total row.
    pub total_expense: String,
}

/// A recurring line item and the form fields it is read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedItemSpec {
    /// Label, optionally holding a `{count}` placeholder ("Kencleng Jumat ({count}x)").
    pub label: String,
    /// Field holding the occurrence count, if the item is counted.
    #[serde(default)]
    pub count_field: Option<String>,
    /// Field holding the amount.
    pub amount_field: String,
    /// Example amount shown in the empty form input.
    #[serde(default)]
    pub placeholder: String,
}

impl FixedItemSpec {
    /// Creates a counted item.
    #[must_use]
    pub fn counted(label: &str, count_field: &str, amount_field: &str) -> Self {
        Self {
            label: label.to_string(),
            count_field: Some(count_field.to_string()),
            amount_field: amount_field.to_string(),
            placeholder: String::new(),
        }
    }

    /// Creates an item without an occurrence count.
    #[must_use]
    pub fn single(label: &str, amount_field: &str) -> Self {
        Self {
            label: label.to_string(),
            count_field: None,
            amount_field: amount_field.to_string(),
            placeholder: String::new(),
        }
    }

    /// Sets the example amount shown in the form.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }
}

/// Per-RT breakdown of one income source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RtBreakdownSpec {
    /// Heading above the breakdown table.
    pub title: String,
    /// Field name prefix; RT 3 is read from `{field_prefix}03`.
    pub field_prefix: String,
    /// Number of RTs in the neighborhood.
    pub units: u32,
    /// Row label prefix ("RT 03").
    pub label_prefix: String,
}

impl RtBreakdownSpec {
    /// Form field holding the amount of the given RT.
    #[must_use]
    pub fn field_name(&self, rt_number: u32) -> String {
        format!("{}{rt_number:02}", self.field_prefix)
    }

    /// Row label of the given RT.
    #[must_use]
    pub fn row_label(&self, rt_number: u32) -> String {
        format!("{} {rt_number:02}", self.label_prefix)
    }
}

impl ReportTemplate {
    /// The RT breakdown, unless the template hides it.
    #[must_use]
    pub fn active_rt_breakdown(&self) -> Option<&RtBreakdownSpec> {
        self.rt_breakdown.as_ref().filter(|rt| rt.units > 0)
    }
}

/// Signature block texts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignatoryTemplate {
    /// Place written before the signing date.
    pub place: String,
    /// Heading above the chair's signature.
    pub chair_heading: String,
    /// Role label under the chair's name.
    pub chair_role: String,
    /// Role label under the treasurer's name.
    pub treasurer_role: String,
    /// Chair name used when the form leaves it blank.
    pub default_chair_name: String,
    /// Treasurer name used when the form leaves it blank.
    pub default_treasurer_name: String,
    /// Blank rows left for handwritten signatures.
    pub spacer_rows: usize,
}

impl Default for ReportTemplate {
    fn default() -> Self {
        Self {
            title: "Laporan Keuangan DKM Sirojul Huda".to_string(),
            address: "Aspol Sukamiskin Bandung".to_string(),
            period_prefix: "Bulan".to_string(),
            labels: SectionLabels::default(),
            fixed_income: vec![
                FixedItemSpec::counted(
                    "Kencleng Jumat ({count}x)",
                    "kencleng_kali",
                    "kencleng_total",
                )
                .with_placeholder("1.316.000"),
                FixedItemSpec::single("Infaq Warga RW 07 (total)", "rw07_total")
                    .with_placeholder("1.740.000"),
            ],
            fixed_expense: vec![
                FixedItemSpec::counted("Honor Khotib ({count}x)", "jumat_khotib", "honor_khotib")
                    .with_placeholder("1.000.000"),
                FixedItemSpec::single("Honor Marbot + Uang Saku", "honor_marbot_uangsaku")
                    .with_placeholder("1.250.000"),
                FixedItemSpec::counted("Bayar Listrik ({count}x)", "listrik_kali", "bayar_listrik")
                    .with_placeholder("176.000"),
            ],
            rt_breakdown: Some(RtBreakdownSpec::default()),
            signatories: SignatoryTemplate::default(),
        }
    }
}

impl Default for SectionLabels {
    fn default() -> Self {
        Self {
            balance_prefix: "Saldo".to_string(),
            income: "Pemasukan".to_string(),
            total_income: "Total Pemasukan".to_string(),
            gross_balance: "Pemasukan Kotor".to_string(),
            expense: "Pengeluaran".to_string(),
            total_expense: "Total Pengeluaran".to_string(),
        }
    }
}

impl Default for RtBreakdownSpec {
    fn default() -> Self {
        Self {
            title: "Rincian Infaq Warga RW 07 (berdasarkan RT)".to_string(),
            field_prefix: "rt_".to_string(),
            units: 5,
            label_prefix: "RT".to_string(),
        }
    }
}

impl Default for SignatoryTemplate {
    fn default() -> Self {
        Self {
            place: "Bandung".to_string(),
            chair_heading: "Ketua DKM Sirojul Huda".to_string(),
            chair_role: "Ketua".to_string(),
            treasurer_role: "Bendahara".to_string(),
            default_chair_name: "Ali Marga".to_string(),
            default_treasurer_name: "Eneng Nariah".to_string(),
            spacer_rows: 3,
        }
    }
}
