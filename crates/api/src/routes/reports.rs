//! Report routes.
//!
//! `POST /build` takes the urlencoded HTML form and answers with the .docx
//! document. The JSON endpoints take the same fields as a JSON object.

use std::collections::HashMap;

use axum::{
    Form, Json, Router,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use dkm_core::normalizer::FormFields;
use dkm_core::reports::{CompiledReport, RenderBlock, ReportResult, ReportService};
use dkm_render::DocumentFormat;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::{AppState, error::ApiError};

/// Creates the browser download route.
pub fn form_routes() -> Router<AppState> {
    Router::new().route("/build", post(build_from_form))
}

/// Creates the JSON report routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reports/preview", post(preview_report))
        .route("/reports/document", post(download_report))
}

// ============================================================================
// Request / Response Types
// ============================================================================

/// Query parameters for the document endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct DocumentQuery {
    /// `docx` (default), `wordml` or `text`.
    pub format: Option<String>,
}

/// Response for the preview endpoint.
#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    /// Computed totals.
    pub result: ReportResult,
    /// Document layout.
    pub blocks: Vec<RenderBlock>,
    /// Name the Word document would be downloaded as.
    pub filename: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /build - Form submission to .docx document.
async fn build_from_form(
    State(state): State<AppState>,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    document_response(&state, &FormFields::from(fields), DocumentFormat::Docx)
}

/// POST /reports/preview - Totals and layout without rendering.
async fn preview_report(
    State(state): State<AppState>,
    Json(fields): Json<FormFields>,
) -> Result<Json<PreviewResponse>, ApiError> {
    let (period_label, report) = compile(&state, &fields)?;

    Ok(Json(PreviewResponse {
        result: report.result,
        blocks: report.blocks,
        filename: ReportService::suggested_filename(
            &period_label,
            DocumentFormat::default().extension(),
        ),
    }))
}

/// POST /reports/document - JSON fields to a document in the requested format.
async fn download_report(
    State(state): State<AppState>,
    Query(query): Query<DocumentQuery>,
    Json(fields): Json<FormFields>,
) -> Result<Response, ApiError> {
    let format = match query.format.as_deref() {
        Some(raw) => raw.parse::<DocumentFormat>()?,
        None => DocumentFormat::default(),
    };
    document_response(&state, &fields, format)
}

// ============================================================================
// Helpers
// ============================================================================

fn compile(state: &AppState, fields: &FormFields) -> Result<(String, CompiledReport), ApiError> {
    let request = state
        .normalizer
        .normalize(&state.template, fields)
        .inspect_err(|e| warn!(field = e.field(), error = %e, "Rejected report submission"))?;

    let report = ReportService::compile(&state.template, &request);
    info!(
        period = %request.period_label,
        total_income = %report.result.total_income,
        total_expense = %report.result.total_expense,
        closing_balance = %report.result.closing_balance,
        "Compiled report"
    );
    Ok((request.period_label, report))
}

fn document_response(
    state: &AppState,
    fields: &FormFields,
    format: DocumentFormat,
) -> Result<Response, ApiError> {
    let (period_label, report) = compile(state, fields)?;
    let bytes = format
        .render(&report.blocks)
        .inspect_err(|e| error!(error = %e, %format, "Failed to render report"))?;
    let filename = ReportService::suggested_filename(&period_label, format.extension());

    info!(%filename, size = bytes.len(), "Report document generated");
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (header::CONTENT_DISPOSITION, content_disposition(&filename)),
        ],
        bytes,
    )
        .into_response())
}

/// `attachment; filename="..."` with characters that cannot appear in a
/// quoted header value replaced by `_`.
fn content_disposition(filename: &str) -> String {
    let safe: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii_graphic() && c != '"' && c != '\\' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("attachment; filename=\"{safe}\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use dkm_shared::AppConfig;
    use dkm_shared::types::ParseMode;
    use http_body_util::BodyExt;
    use rstest::rstest;
    use serde_json::json;
    use std::io::Read;
    use tower::ServiceExt;

    use crate::create_router;

    fn app() -> Router {
        create_router(AppState::from_config(&AppConfig::default()))
    }

    fn strict_app() -> Router {
        let mut config = AppConfig::default();
        config.form.parse_mode = ParseMode::Strict;
        create_router(AppState::from_config(&config))
    }

    fn october() -> serde_json::Value {
        json!({
            "bulan_tahun": "Oktober 2025",
            "bulan_sebelumnya": "September",
            "saldo_awal": "4.113.000",
            "kencleng_kali": "5",
            "kencleng_total": "1.316.000",
            "rw07_total": "1.740.000",
            "rt_01": "290.000",
            "rt_02": "340.000",
            "rt_03": "340.000",
            "rt_04": "370.000",
            "rt_05": "400.000",
            "income_desc_1": "Infaq Bu Ninin",
            "income_amt_1": "100.000",
            "jumat_khotib": "5",
            "honor_khotib": "1.000.000",
            "honor_marbot_uangsaku": "1.250.000",
            "listrik_kali": "1",
            "bayar_listrik": "176.000",
            "tanggal_ttd": "31 Oktober 2025"
        })
    }

    fn json_request(uri: &str, body: &serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        response
            .into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes()
            .to_vec()
    }

    fn document_xml(package: &[u8]) -> String {
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(package)).unwrap();
        let mut xml = String::new();
        archive
            .by_name("word/document.xml")
            .unwrap()
            .read_to_string(&mut xml)
            .unwrap();
        xml
    }

    async fn body_json(response: Response) -> serde_json::Value {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    #[tokio::test]
    async fn test_preview_returns_totals_and_layout() {
        let response = app()
            .oneshot(json_request("/api/v1/reports/preview", &october()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["result"]["total_income"], 3_156_000);
        assert_eq!(body["result"]["gross_balance"], 7_269_000);
        assert_eq!(body["result"]["total_expense"], 2_426_000);
        assert_eq!(body["result"]["closing_balance"], 4_843_000);
        assert_eq!(body["filename"], "Laporan_DKM_Oktober_2025.docx");
        assert_eq!(body["blocks"][0]["kind"], "heading");
        assert_eq!(body["blocks"][0]["emphasis"], "title");
        assert_eq!(body["blocks"][0]["text"], "Laporan Keuangan DKM Sirojul Huda");
    }

    #[tokio::test]
    async fn test_build_from_urlencoded_form() {
        let body = "bulan_tahun=Oktober+2025&bulan_sebelumnya=September&saldo_awal=4.113.000\
                    &income_desc_1=Infaq+Bu+Ninin&income_amt_1=100.000";
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/build")
                    .header("Content-Type", "application/x-www-form-urlencoded")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Laporan_DKM_Oktober_2025.docx\""
        );
        let package = body_bytes(response).await;
        assert!(package.starts_with(b"PK"));
        let doc = document_xml(&package);
        assert!(doc.contains("<w:t>Infaq Bu Ninin</w:t>"));
        assert!(doc.contains("<w:t>4.213.000</w:t>"));
    }

    #[tokio::test]
    async fn test_wordml_document_on_request() {
        let response = app()
            .oneshot(json_request(
                "/api/v1/reports/document?format=wordml",
                &october(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/msword");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Laporan_DKM_Oktober_2025.doc\""
        );
        let doc = String::from_utf8(body_bytes(response).await).unwrap();
        assert!(doc.starts_with("<?xml"));
        assert!(doc.contains("<w:t>Rincian Infaq Warga RW 07 (berdasarkan RT)</w:t>"));
    }

    #[tokio::test]
    async fn test_json_document_defaults_to_docx() {
        let response = app()
            .oneshot(json_request("/api/v1/reports/document", &october()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Laporan_DKM_Oktober_2025.docx\""
        );
        let doc = document_xml(&body_bytes(response).await);
        assert!(doc.contains("<w:t>4.843.000</w:t>"));
    }

    #[tokio::test]
    async fn test_text_document() {
        let response = app()
            .oneshot(json_request(
                "/api/v1/reports/document?format=text",
                &october(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Laporan_DKM_Oktober_2025.txt\""
        );
        let text = String::from_utf8(body_bytes(response).await).unwrap();
        assert!(text.contains("Rincian Infaq Warga RW 07"));
        assert!(text.lines().any(|line| line.starts_with("Total Pengeluaran")
            && line.ends_with("2.426.000")));
    }

    #[rstest]
    #[case("bulan_tahun")]
    #[case("bulan_sebelumnya")]
    #[case("saldo_awal")]
    #[tokio::test]
    async fn test_missing_header_field_is_rejected(#[case] field: &str) {
        let mut fields = october();
        fields.as_object_mut().unwrap().remove(field);

        let response = app()
            .oneshot(json_request("/api/v1/reports/document", &fields))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "VALIDATION_ERROR");
        assert!(body["message"].as_str().unwrap().contains(field));
    }

    #[tokio::test]
    async fn test_unknown_format_is_rejected() {
        let response = app()
            .oneshot(json_request(
                "/api/v1/reports/document?format=pdf",
                &october(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_strict_mode_rejects_unparsable_amount() {
        let mut fields = october();
        fields["income_amt_1"] = json!("seratus ribu");

        let response = strict_app()
            .oneshot(json_request("/api/v1/reports/preview", &fields))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["message"].as_str().unwrap().contains("income_amt_1"));
    }

    #[tokio::test]
    async fn test_lenient_mode_counts_unparsable_amount_as_zero() {
        let mut fields = october();
        fields["kencleng_total"] = json!("satu juta");

        let response = app()
            .oneshot(json_request("/api/v1/reports/preview", &fields))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["result"]["total_income"], 1_840_000);
    }

    #[rstest]
    #[case("Laporan_DKM_Oktober_2025.docx", "attachment; filename=\"Laporan_DKM_Oktober_2025.docx\"")]
    #[case("Laporan_DKM_\"Q4\".doc", "attachment; filename=\"Laporan_DKM__Q4_.doc\"")]
    #[case("Laporan_DKM_Mei\u{2013}Juni.txt", "attachment; filename=\"Laporan_DKM_Mei_Juni.txt\"")]
    fn test_content_disposition(#[case] filename: &str, #[case] expected: &str) {
        assert_eq!(content_disposition(filename), expected);
    }
}
