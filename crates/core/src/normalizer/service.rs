//! Form normalization service.

use dkm_shared::FormConfig;
use dkm_shared::types::{FixedItemSpec, MAX_ROWS, ParseMode, ReportTemplate, Rupiah};
use tracing::debug;

use super::error::NormalizeError;
use super::fields::{
    CHAIR_NAME_FIELD, FormFields, OPENING_BALANCE_FIELD, PERIOD_FIELD, PREVIOUS_PERIOD_FIELD,
    RawRow, RowCategory, SIGNING_DATE_FIELD, TREASURER_NAME_FIELD,
};
use crate::reports::{FixedLineItem, LineItem, ReportRequest, RtAmount, Signatories};

/// Builds a [`ReportRequest`] out of a raw form submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalizer {
    parse_mode: ParseMode,
    max_income_rows: usize,
    max_expense_rows: usize,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::from_config(&FormConfig::default())
    }
}

impl Normalizer {
    /// Creates a normalizer with explicit row caps, each clamped to [`MAX_ROWS`].
    #[must_use]
    pub const fn new(parse_mode: ParseMode, max_income_rows: usize, max_expense_rows: usize) -> Self {
        Self {
            parse_mode,
            max_income_rows: clamp_rows(max_income_rows),
            max_expense_rows: clamp_rows(max_expense_rows),
        }
    }

    /// Creates a normalizer from the `[form]` configuration section.
    #[must_use]
    pub fn from_config(config: &FormConfig) -> Self {
        Self::new(
            config.parse_mode,
            config.max_income_rows,
            config.max_expense_rows,
        )
    }

    /// Maximum number of custom rows read for a category.
    #[must_use]
    pub const fn max_rows(&self, category: RowCategory) -> usize {
        match category {
            RowCategory::Income => self.max_income_rows,
            RowCategory::Expense => self.max_expense_rows,
        }
    }

    /// Normalizes a submission against the template's fixed items and RT breakdown.
    ///
    /// Nothing is computed when a header field is missing.
    pub fn normalize(
        &self,
        template: &ReportTemplate,
        fields: &FormFields,
    ) -> Result<ReportRequest, NormalizeError> {
        let period_label = required(fields, PERIOD_FIELD)?;
        let previous_period_label = required(fields, PREVIOUS_PERIOD_FIELD)?;
        let opening_balance =
            self.parse_amount(OPENING_BALANCE_FIELD, required(fields, OPENING_BALANCE_FIELD)?)?;

        let fixed_income_items = self.fixed_items(fields, &template.fixed_income)?;
        let fixed_expense_items = self.fixed_items(fields, &template.fixed_expense)?;

        let rt_breakdown = match template.active_rt_breakdown() {
            Some(spec) => (1..=spec.units)
                .map(|rt_number| {
                    let field = spec.field_name(rt_number);
                    Ok(RtAmount {
                        rt_number,
                        amount: self.parse_amount(&field, fields.get(&field))?,
                    })
                })
                .collect::<Result<Vec<_>, NormalizeError>>()?,
            None => Vec::new(),
        };

        let income_rows = fields.custom_rows(RowCategory::Income, self.max_income_rows);
        let custom_income_items = self.collect_custom_rows(RowCategory::Income, &income_rows)?;
        let expense_rows = fields.custom_rows(RowCategory::Expense, self.max_expense_rows);
        let custom_expense_items = self.collect_custom_rows(RowCategory::Expense, &expense_rows)?;

        let texts = &template.signatories;
        let signing_place_date = match (texts.place.trim(), fields.non_blank(SIGNING_DATE_FIELD)) {
            ("", Some(date)) => date.to_string(),
            (place, Some(date)) => format!("{place}, {date}"),
            (place, None) => place.to_string(),
        };
        let signatories = Signatories {
            chair_name: fields
                .non_blank(CHAIR_NAME_FIELD)
                .unwrap_or(texts.default_chair_name.as_str())
                .to_string(),
            treasurer_name: fields
                .non_blank(TREASURER_NAME_FIELD)
                .unwrap_or(texts.default_treasurer_name.as_str())
                .to_string(),
            signing_place_date,
        };

        Ok(ReportRequest {
            period_label: period_label.to_string(),
            previous_period_label: previous_period_label.to_string(),
            opening_balance,
            fixed_income_items,
            rt_breakdown,
            custom_income_items,
            fixed_expense_items,
            custom_expense_items,
            signatories,
        })
    }

    /// Keeps the rows that have both a description and a positive amount, in slot order.
    ///
    /// At most [`max_rows`](Self::max_rows) rows are considered. Amounts of rows
    /// without a description are never parsed, so they cannot fail strict parsing.
    pub fn collect_custom_rows(
        &self,
        category: RowCategory,
        rows: &[RawRow<'_>],
    ) -> Result<Vec<LineItem>, NormalizeError> {
        let mut items = Vec::new();
        for row in rows.iter().take(self.max_rows(category)) {
            let description = row.description.trim();
            if description.is_empty() {
                continue;
            }
            let amount = self.parse_amount(&category.amount_field(row.index), row.amount)?;
            if amount.is_positive() {
                items.push(LineItem::new(description, amount));
            }
        }
        Ok(items)
    }

    fn fixed_items(
        &self,
        fields: &FormFields,
        specs: &[FixedItemSpec],
    ) -> Result<Vec<FixedLineItem>, NormalizeError> {
        specs
            .iter()
            .map(|spec| {
                let occurrence_count = match &spec.count_field {
                    Some(field) => self.parse_count(field, fields.get(field))?,
                    None => 0,
                };
                Ok(FixedLineItem {
                    label_template: spec.label.clone(),
                    occurrence_count,
                    amount: self.parse_amount(&spec.amount_field, fields.get(&spec.amount_field))?,
                })
            })
            .collect()
    }

    fn parse_amount(&self, field: &str, raw: &str) -> Result<Rupiah, NormalizeError> {
        self.parse_mode
            .parse_amount(raw)
            .inspect(|amount| {
                if amount.is_zero() && ParseMode::Strict.parse_amount(raw).is_err() {
                    debug!(field, value = raw, "Unparsable amount counted as zero");
                }
            })
            .map_err(|_| unparsable(field, raw))
    }

    fn parse_count(&self, field: &str, raw: &str) -> Result<u32, NormalizeError> {
        self.parse_mode
            .parse_count(raw)
            .map_err(|_| unparsable(field, raw))
    }
}

const fn clamp_rows(cap: usize) -> usize {
    if cap > MAX_ROWS { MAX_ROWS } else { cap }
}

fn required<'a>(fields: &'a FormFields, name: &str) -> Result<&'a str, NormalizeError> {
    fields
        .non_blank(name)
        .ok_or_else(|| NormalizeError::MissingRequiredField(name.to_string()))
}

fn unparsable(field: &str, raw: &str) -> NormalizeError {
    NormalizeError::UnparsableAmount {
        field: field.to_string(),
        value: raw.trim().to_string(),
    }
}
