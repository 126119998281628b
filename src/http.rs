//! HTTP surface for the discount engine
//!
//! Thin axum layer over [`DiscountService`]; all invariants live in the
//! service and the store. Routes and wire shapes follow the storefront's
//! checkout contract: camelCase bodies, `{error, details}` on rejection.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use validator::Validate;

use crate::domain::{DiscountCode, ValidatedDiscount};
use crate::service::DiscountService;
use crate::store::DiscountStore;
use crate::DiscountError;

pub fn router<S>(service: DiscountService<S>) -> Router
where
    S: DiscountStore + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route("/generate_discount", post(generate_discount::<S>))
        .route("/validate_discount", post(validate_discount::<S>))
        .route("/redeem_discount", post(redeem_discount::<S>))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(service)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({"status": "healthy", "service": "storefront-discounts"}))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateDiscountRequest {
    #[validate(length(min = 1, message = "must be a non-empty string"))]
    pub code: String,
    pub discount_value: Decimal,
    /// ISO-8601 datetime string, parsed here so an unparseable date is
    /// reported as a field-level 400 rather than a body rejection.
    pub expiration_date: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CodeRequest {
    #[validate(length(min = 1, message = "must be a non-empty string"))]
    pub code: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateDiscountResponse {
    pub discount_code: DiscountCode,
}

#[derive(Debug, Serialize)]
pub struct DiscountResponse {
    pub message: &'static str,
    pub discount: ValidatedDiscount,
}

async fn generate_discount<S: DiscountStore>(
    State(service): State<DiscountService<S>>,
    Json(req): Json<GenerateDiscountRequest>,
) -> Result<Json<GenerateDiscountResponse>, ApiError> {
    req.validate().map_err(bad_request)?;
    let expiration_date: DateTime<Utc> = req
        .expiration_date
        .parse()
        .map_err(|e| bad_field("expirationDate", e))?;

    let discount_code = service
        .generate(&req.code, req.discount_value, expiration_date)
        .await?;
    Ok(Json(GenerateDiscountResponse { discount_code }))
}

async fn validate_discount<S: DiscountStore>(
    State(service): State<DiscountService<S>>,
    Json(req): Json<CodeRequest>,
) -> Result<Json<DiscountResponse>, ApiError> {
    req.validate().map_err(bad_request)?;
    let discount = service.validate(&req.code).await?;
    Ok(Json(DiscountResponse {
        message: "Discount code is valid",
        discount,
    }))
}

async fn redeem_discount<S: DiscountStore>(
    State(service): State<DiscountService<S>>,
    Json(req): Json<CodeRequest>,
) -> Result<Json<DiscountResponse>, ApiError> {
    req.validate().map_err(bad_request)?;
    let discount = service.redeem(&req.code).await?;
    Ok(Json(DiscountResponse {
        message: "Discount code redeemed",
        discount,
    }))
}

// =============================================================================
// Error mapping
// =============================================================================

pub struct ApiError {
    status: StatusCode,
    error: String,
    details: Option<String>,
}

fn bad_request(e: validator::ValidationErrors) -> ApiError {
    ApiError {
        status: StatusCode::BAD_REQUEST,
        error: "Invalid request".to_string(),
        details: Some(e.to_string()),
    }
}

fn bad_field(field: &'static str, e: chrono::ParseError) -> ApiError {
    ApiError::from(DiscountError::invalid(field, e.to_string()))
}

impl From<DiscountError> for ApiError {
    fn from(e: DiscountError) -> Self {
        let status = match &e {
            DiscountError::InvalidInput { .. }
            | DiscountError::CodeNotFound
            | DiscountError::CodeExpired
            | DiscountError::CodeInactive
            | DiscountError::UsageLimitReached => StatusCode::BAD_REQUEST,
            DiscountError::CodeAlreadyExists => StatusCode::CONFLICT,
            DiscountError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let details = match &e {
            DiscountError::InvalidInput { message, .. } => Some(message.clone()),
            _ => None,
        };
        ApiError {
            status,
            error: e.to_string(),
            details,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = serde_json::json!({"error": self.error});
        if let Some(details) = self.details {
            body["details"] = serde_json::Value::String(details);
        }
        (self.status, Json(body)).into_response()
    }
}
