use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use voucherdrop_core::{CategoryVocabulary, ValidatedVoucher, VoucherDraft, VoucherError};
use voucherdrop_extract::ExtractedVoucherFields;

use crate::AppState;

/// Request body: raw pasted or OCR text.
#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct RedeemCheckRequest {
    pub voucher: ValidatedVoucher,
    #[serde(default)]
    pub use_count: u32,
    /// Defaults to the current UTC date.
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct RedeemCheckResponse {
    pub redeemable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_uses: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Rejected voucher submission; always answered as `422 {"error": ...}`.
pub enum ApiError {
    Invalid(VoucherError),
    Body(JsonRejection),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error = match self {
            ApiError::Invalid(e) => e.to_string(),
            ApiError::Body(rejection) => rejection.body_text(),
        };
        (StatusCode::UNPROCESSABLE_ENTITY, Json(ErrorResponse { error })).into_response()
    }
}

pub async fn health_check() -> &'static str {
    "OK"
}

pub async fn list_categories(State(state): State<AppState>) -> Json<CategoryVocabulary> {
    Json(state.extractor.categories().clone())
}

/// Suggest voucher fields for the submit form.
pub async fn extract_fields(
    State(state): State<AppState>,
    Json(req): Json<ExtractRequest>,
) -> Json<ExtractedVoucherFields> {
    let fields = state.extractor.extract(&req.text);
    tracing::info!(
        input_chars = req.text.chars().count(),
        has_code = !fields.voucher_code.is_empty(),
        has_expiry = !fields.expiry_date.is_empty(),
        "voucher text extracted"
    );
    Json(fields)
}

pub async fn validate_voucher(
    State(state): State<AppState>,
    draft: Result<Json<VoucherDraft>, JsonRejection>,
) -> Result<Json<ValidatedVoucher>, ApiError> {
    let Json(draft) = draft.map_err(|rejection| {
        tracing::info!("voucher draft body rejected: {}", rejection.body_text());
        ApiError::Body(rejection)
    })?;
    match ValidatedVoucher::validate(draft, state.extractor.categories(), &state.moderation) {
        Ok(voucher) => Ok(Json(voucher)),
        Err(e) => {
            tracing::info!("voucher draft rejected: {e}");
            Err(ApiError::Invalid(e))
        }
    }
}

pub async fn redeem_check(Json(req): Json<RedeemCheckRequest>) -> Response {
    let today = req.today.unwrap_or_else(|| chrono::Utc::now().date_naive());
    let response = match req.voucher.check_redeemable(req.use_count, today) {
        Ok(redemption) => RedeemCheckResponse {
            redeemable: true,
            remaining_uses: redemption.remaining_uses,
            reason: None,
        },
        Err(e) => RedeemCheckResponse {
            redeemable: false,
            remaining_uses: None,
            reason: Some(e.to_string()),
        },
    };
    (StatusCode::OK, Json(response)).into_response()
}
