//! Report compilation service.

use dkm_shared::types::{ReportTemplate, RtBreakdownSpec, Rupiah};

use super::types::{
    Alignment, CompiledReport, Emphasis, FixedLineItem, LineItem, RenderBlock, ReportRequest,
    ReportResult, RtAmount, Signatories, TableRow,
};

/// Prefix of every generated document name.
pub const FILENAME_PREFIX: &str = "Laporan_DKM";

/// Service for computing and laying out the monthly report.
pub struct ReportService;

impl ReportService {
    /// Computes income, expense and balances.
    ///
    /// Custom rows without a description or amount are ignored and the RT
    /// breakdown is never counted, so the report cannot double count the
    /// neighborhood collection.
    #[must_use]
    pub fn calculate_totals(request: &ReportRequest) -> ReportResult {
        let total_income = Self::section_total(
            &request.fixed_income_items,
            &request.custom_income_items,
        );
        let total_expense = Self::section_total(
            &request.fixed_expense_items,
            &request.custom_expense_items,
        );
        let gross_balance = request.opening_balance + total_income;

        ReportResult {
            total_income,
            gross_balance,
            total_expense,
            closing_balance: gross_balance - total_expense,
        }
    }

    /// Computes the totals and lays the report out as render blocks.
    ///
    /// Block order: title, address, period, opening balance, income table,
    /// RT breakdown (only when some RT contributed), gross balance, expense
    /// table, closing balance, signature table.
    #[must_use]
    pub fn compile(template: &ReportTemplate, request: &ReportRequest) -> CompiledReport {
        let result = Self::calculate_totals(request);
        let labels = &template.labels;
        let mut blocks = Vec::new();

        blocks.push(heading(&template.title, Emphasis::Title, Alignment::Center));
        blocks.push(heading(&template.address, Emphasis::Normal, Alignment::Center));
        blocks.push(heading(
            prefixed(&template.period_prefix, &request.period_label),
            Emphasis::Normal,
            Alignment::Center,
        ));

        blocks.push(section(prefixed(
            &labels.balance_prefix,
            &request.previous_period_label,
        )));
        blocks.push(amount_paragraph(request.opening_balance));

        blocks.push(section(&labels.income));
        blocks.push(RenderBlock::Table {
            rows: Self::ledger_rows(
                &request.fixed_income_items,
                &request.custom_income_items,
                &labels.total_income,
                result.total_income,
            ),
        });

        if let Some(rt_spec) = template.active_rt_breakdown()
            && let Some(rows) = Self::rt_rows(rt_spec, &request.rt_breakdown)
        {
            blocks.push(section(&rt_spec.title));
            blocks.push(RenderBlock::Table { rows });
        }

        blocks.push(section(&labels.gross_balance));
        blocks.push(amount_paragraph(result.gross_balance));

        blocks.push(section(&labels.expense));
        blocks.push(RenderBlock::Table {
            rows: Self::ledger_rows(
                &request.fixed_expense_items,
                &request.custom_expense_items,
                &labels.total_expense,
                result.total_expense,
            ),
        });

        blocks.push(section(prefixed(&labels.balance_prefix, &request.period_label)));
        blocks.push(amount_paragraph(result.closing_balance));

        blocks.push(RenderBlock::Table {
            rows: Self::signatory_rows(template, &request.signatories),
        });

        CompiledReport { result, blocks }
    }

    /// Download name for the report of the given period.
    ///
    /// `"Oktober 2025"` with `".docx"` gives `Laporan_DKM_Oktober_2025.docx`.
    #[must_use]
    pub fn suggested_filename(period_label: &str, extension: &str) -> String {
        if period_label.is_empty() {
            format!("{FILENAME_PREFIX}{extension}")
        } else {
            format!(
                "{FILENAME_PREFIX}_{}{extension}",
                period_label.replace(' ', "_")
            )
        }
    }

    fn section_total(fixed: &[FixedLineItem], custom: &[LineItem]) -> Rupiah {
        let fixed_total: Rupiah = fixed.iter().map(|item| item.amount).sum();
        let custom_total: Rupiah = custom
            .iter()
            .filter(|item| item.qualifies())
            .map(|item| item.amount)
            .sum();
        fixed_total + custom_total
    }

    fn ledger_rows(
        fixed: &[FixedLineItem],
        custom: &[LineItem],
        total_label: &str,
        total: Rupiah,
    ) -> Vec<TableRow> {
        fixed
            .iter()
            .filter(|item| item.is_shown())
            .map(|item| TableRow::new(item.display_label(), item.amount.to_string()))
            .chain(
                custom
                    .iter()
                    .filter(|item| item.qualifies())
                    .map(|item| TableRow::new(item.description.trim(), item.amount.to_string())),
            )
            .chain(std::iter::once(TableRow::new(total_label, total.to_string())))
            .collect()
    }

    fn rt_rows(spec: &RtBreakdownSpec, entries: &[RtAmount]) -> Option<Vec<TableRow>> {
        let rows: Vec<TableRow> = entries
            .iter()
            .filter(|entry| entry.amount.is_positive())
            .map(|entry| TableRow::new(spec.row_label(entry.rt_number), entry.amount.to_string()))
            .collect();

        (!rows.is_empty()).then_some(rows)
    }

    fn signatory_rows(template: &ReportTemplate, signatories: &Signatories) -> Vec<TableRow> {
        let texts = &template.signatories;
        let mut rows = Vec::with_capacity(texts.spacer_rows + 3);

        rows.push(TableRow::new(
            &texts.chair_heading,
            &signatories.signing_place_date,
        ));
        rows.extend(std::iter::repeat_with(TableRow::blank).take(texts.spacer_rows));
        rows.push(TableRow::new(
            &signatories.chair_name,
            &signatories.treasurer_name,
        ));
        rows.push(TableRow::new(&texts.chair_role, &texts.treasurer_role));
        rows
    }
}

fn heading(text: impl Into<String>, emphasis: Emphasis, alignment: Alignment) -> RenderBlock {
    RenderBlock::Heading {
        text: text.into(),
        emphasis,
        alignment,
    }
}

fn section(text: impl Into<String>) -> RenderBlock {
    heading(text, Emphasis::Strong, Alignment::Left)
}

fn amount_paragraph(amount: Rupiah) -> RenderBlock {
    RenderBlock::Paragraph {
        text: amount.to_string(),
        alignment: Alignment::Right,
    }
}

fn prefixed(prefix: &str, label: &str) -> String {
    match (prefix.is_empty(), label.is_empty()) {
        (true, _) => label.to_string(),
        (false, true) => prefix.to_string(),
        (false, false) => format!("{prefix} {label}"),
    }
}
