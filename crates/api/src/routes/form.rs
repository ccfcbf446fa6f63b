//! The HTML form page.
//!
//! The page is generated from the configured [`ReportTemplate`], so fixed items,
//! RT fields and default signatory names always match what the normalizer reads.

use axum::{Router, extract::State, response::Html, routing::get};
use dkm_core::normalizer::{Normalizer, RowCategory};
use dkm_core::normalizer::fields::{
    CHAIR_NAME_FIELD, OPENING_BALANCE_FIELD, PERIOD_FIELD, PREVIOUS_PERIOD_FIELD,
    SIGNING_DATE_FIELD, TREASURER_NAME_FIELD,
};
use dkm_core::reports::FixedLineItem;
use dkm_shared::types::{FixedItemSpec, ReportTemplate, Rupiah};
use quick_xml::escape::escape;

use crate::AppState;

const STYLE: &str = "\
body{font-family:system-ui,-apple-system,Segoe UI,Roboto,Arial,sans-serif;max-width:800px;margin:24px auto;padding:0 12px}
fieldset{border:1px solid #ccc;border-radius:8px;margin:16px 0;padding:12px}
legend{font-weight:600}
label{display:block;margin:8px 0 4px}
input{box-sizing:border-box;width:100%;padding:8px;border:1px solid #bbb;border-radius:6px}
.row{display:flex;flex-wrap:wrap;gap:8px}
.row>div{flex:1;min-width:120px}
button{padding:8px 12px;border:1px solid #555;border-radius:8px;background:#111;color:#fff}
.ghost{background:#eee;color:#111;border-color:#ddd}
small{color:#666}";

const SCRIPT: &str = "\
function addPair(sectionId, prefix, max, button){
  const box = document.getElementById(sectionId);
  const idx = box.querySelectorAll('.pair').length + 1;
  if (idx > max) { return; }
  const wrap = document.createElement('div');
  wrap.className = 'pair';
  wrap.innerHTML = `
    <div class=\"row\">
      <div><label>Deskripsi</label><input name=\"${prefix}_desc_${idx}\" type=\"text\" placeholder=\"mis. Infaq Bu Ninin\"></div>
      <div><label>Jumlah (rupiah, titik sebagai pemisah)</label><input name=\"${prefix}_amt_${idx}\" type=\"text\" placeholder=\"100.000\"></div>
    </div>`;
  box.appendChild(wrap);
  if (idx >= max) { button.disabled = true; }
}";

/// GET / - The report form.
async fn form_page(State(state): State<AppState>) -> Html<String> {
    Html(render_form(&state.template, &state.normalizer))
}

/// Creates the form page route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(form_page))
}

/// Renders the complete form page.
#[must_use]
pub fn render_form(template: &ReportTemplate, normalizer: &Normalizer) -> String {
    let labels = &template.labels;
    let mut html = String::with_capacity(8 * 1024);

    html.push_str("<!doctype html>\n<html>\n<head>\n");
    html.push_str("<meta charset=\"utf-8\"/>\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\"/>\n");
    html.push_str(&format!("<title>{}</title>\n", escape(template.title.as_str())));
    html.push_str(&format!("<style>\n{STYLE}\n</style>\n<script>\n{SCRIPT}\n</script>\n"));
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!(
        "<h2>{} &#8594; unduh Word (.docx)</h2>\n",
        escape(template.title.as_str())
    ));
    html.push_str("<form method=\"post\" action=\"/build\">\n");

    html.push_str("<fieldset>\n<legend>Header &amp; Saldo</legend>\n<div class=\"row\">\n");
    html.push_str(&cell(
        "Bulan &amp; Tahun (contoh: Oktober 2025)",
        &input(PERIOD_FIELD, "", "", true),
    ));
    html.push_str(&cell(
        "Nama Bulan Sebelumnya (contoh: September)",
        &input(PREVIOUS_PERIOD_FIELD, "", "", true),
    ));
    html.push_str("</div>\n");
    html.push_str(&cell(
        "Saldo awal (rupiah)",
        &input(OPENING_BALANCE_FIELD, "4.113.000", "", true),
    ));
    html.push_str("</fieldset>\n");

    html.push_str(&format!(
        "<fieldset>\n<legend>{}</legend>\n",
        escape(labels.income.as_str())
    ));
    for spec in &template.fixed_income {
        html.push_str(&fixed_item_inputs(spec));
    }
    if let Some(rt) = template.active_rt_breakdown() {
        html.push_str(&format!("<label>{}</label>\n<div class=\"row\">\n", escape(rt.title.as_str())));
        for rt_number in 1..=rt.units {
            html.push_str(&cell(
                &escape(rt.row_label(rt_number).as_str()),
                &input(&rt.field_name(rt_number), "", "", false),
            ));
        }
        html.push_str("</div>\n");
    }
    html.push_str(&custom_rows(
        RowCategory::Income,
        normalizer.max_rows(RowCategory::Income),
        "+ Tambah baris pemasukan custom",
    ));
    html.push_str("</fieldset>\n");

    html.push_str(&format!(
        "<fieldset>\n<legend>{}</legend>\n",
        escape(labels.expense.as_str())
    ));
    for spec in &template.fixed_expense {
        html.push_str(&fixed_item_inputs(spec));
    }
    html.push_str(&custom_rows(
        RowCategory::Expense,
        normalizer.max_rows(RowCategory::Expense),
        "+ Tambah baris pengeluaran custom",
    ));
    html.push_str("</fieldset>\n");

    let signatories = &template.signatories;
    html.push_str("<fieldset>\n<legend>Tanda Tangan</legend>\n<div class=\"row\">\n");
    html.push_str(&cell(
        "Tanggal TTD (contoh: 31 Oktober 2025)",
        &input(SIGNING_DATE_FIELD, "", "", false),
    ));
    html.push_str(&cell(
        &format!("Nama {}", escape(signatories.chair_role.as_str())),
        &input(CHAIR_NAME_FIELD, "", &signatories.default_chair_name, false),
    ));
    html.push_str(&cell(
        &format!("Nama {}", escape(signatories.treasurer_role.as_str())),
        &input(TREASURER_NAME_FIELD, "", &signatories.default_treasurer_name, false),
    ));
    html.push_str("</div>\n</fieldset>\n");

    html.push_str("<button type=\"submit\">Buat &amp; Unduh .docx</button>\n");
    html.push_str("</form>\n</body>\n</html>\n");
    html
}

/// Inputs for one fixed item: an optional count plus the amount.
fn fixed_item_inputs(spec: &FixedItemSpec) -> String {
    // A zero count drops the "(5x)" part, leaving the bare name.
    let name = FixedLineItem {
        label_template: spec.label.clone(),
        occurrence_count: 0,
        amount: Rupiah::ZERO,
    }
    .display_label();
    let name = escape(name.as_str());

    match &spec.count_field {
        Some(count_field) => format!(
            "<div class=\"row\">\n{}{}</div>\n",
            cell(
                &format!("{name}: berapa kali?"),
                &format!(
                    "<input name=\"{}\" type=\"number\" min=\"0\" value=\"0\">",
                    escape(count_field.as_str())
                ),
            ),
            cell(
                &format!("{name}: total (rupiah)"),
                &input(&spec.amount_field, &spec.placeholder, "", false),
            ),
        ),
        None => {
            // "Infaq Warga RW 07 (total)" already says what is asked for.
            let label = if name.ends_with(')') {
                name.into_owned()
            } else {
                format!("{name} (rupiah)")
            };
            cell(&label, &input(&spec.amount_field, &spec.placeholder, "", false))
        }
    }
}

fn custom_rows(category: RowCategory, max: usize, caption: &str) -> String {
    let prefix = category.prefix();
    format!(
        "<hr>\n<div id=\"{prefix}Box\"></div>\n\
         <button type=\"button\" class=\"ghost\" \
         onclick=\"addPair('{prefix}Box','{prefix}',{max},this)\">{caption}</button>\n\
         <div><small>Baris yang dikosongkan tidak akan dimasukkan (maksimal {max} baris).</small></div>\n"
    )
}

/// A labelled grid cell. `label` must already be escaped.
fn cell(label: &str, control: &str) -> String {
    format!("<div><label>{label}</label>{control}</div>\n")
}

fn input(name: &str, placeholder: &str, value: &str, required: bool) -> String {
    let mut html = format!("<input name=\"{}\" type=\"text\"", escape(name));
    if !placeholder.is_empty() {
        html.push_str(&format!(" placeholder=\"{}\"", escape(placeholder)));
    }
    if !value.is_empty() {
        html.push_str(&format!(" value=\"{}\"", escape(value)));
    }
    if required {
        html.push_str(" required");
    }
    html.push('>');
    html
}
