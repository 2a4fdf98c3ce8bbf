use std::sync::Arc;

use axum::{
    extract::State,
    http::{header::HeaderValue, HeaderMap},
    routing::{get, post},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    config::Config,
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use bankwire_discount_core::{
    carts::Cart,
    discount::{compute_discount_amount, format_amount, ApplyOutcome},
    settings::{DiscountSettings, DiscountSettingsUpdate},
};

/// Header carrying the ambient shop session.
pub const SESSION_HEADER: &str = "x-session-id";

pub async fn healthz() -> &'static str {
    "ok"
}

pub async fn readyz() -> &'static str {
    "ok"
}

// Settings endpoints (admin configuration form relies on these)
async fn get_settings(State(state): State<Arc<AppState>>) -> ApiResult<Json<DiscountSettings>> {
    let s = state.settings_service.get_settings()?;
    Ok(Json(s))
}

async fn update_settings(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<DiscountSettingsUpdate>,
) -> ApiResult<Json<DiscountSettings>> {
    let updated = state.settings_service.update_settings(&payload).await?;
    Ok(Json(updated))
}

/// Response contract consumed by the storefront script.
#[derive(Serialize)]
struct ApplyDiscountResponse {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    discount_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    discount_amount_formatted: Option<String>,
}

impl ApplyDiscountResponse {
    fn failure(message: &str) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            discount_amount: None,
            discount_amount_formatted: None,
        }
    }

    fn applied(message: &str, amount: Decimal, currency: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            discount_amount: Some(amount),
            discount_amount_formatted: Some(format_amount(amount, currency)),
        }
    }
}

fn session_cart(state: &AppState, headers: &HeaderMap) -> ApiResult<Option<Cart>> {
    let Some(session_id) = headers.get(SESSION_HEADER).and_then(|v| v.to_str().ok()) else {
        return Ok(None);
    };
    Ok(state.cart_repository.get_cart_by_session(session_id)?)
}

async fn apply_discount(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<ApplyDiscountResponse>> {
    let Some(cart) = session_cart(&state, &headers)? else {
        return Ok(Json(ApplyDiscountResponse::failure("No cart found")));
    };

    if !state.module_active {
        return Ok(Json(ApplyDiscountResponse::failure("Module disabled")));
    }

    let settings = state.settings_service.get_settings()?;
    if !settings.enabled {
        return Ok(Json(ApplyDiscountResponse::failure("Discount disabled")));
    }

    // Already applied: answer with the reduction value stored at attach
    // time, not a recomputation from the current total.
    if let Some(existing) = state.discount_service.find_existing_discount(&cart)? {
        return Ok(Json(ApplyDiscountResponse::applied(
            "Discount already applied",
            existing.value,
            &cart.currency,
        )));
    }

    match state
        .discount_service
        .apply_discount(&cart, &settings)
        .await?
    {
        ApplyOutcome::Applied { amount } => Ok(Json(ApplyDiscountResponse::applied(
            "Discount applied successfully",
            amount,
            &cart.currency,
        ))),
        ApplyOutcome::AlreadyApplied { amount } => Ok(Json(ApplyDiscountResponse::applied(
            "Discount already applied",
            amount,
            &cart.currency,
        ))),
        ApplyOutcome::NotApplied { .. } => Ok(Json(ApplyDiscountResponse::failure(
            "Failed to apply discount",
        ))),
    }
}

/// What the storefront needs to render the "pay by wire, save X" banner.
#[derive(Serialize)]
struct DiscountQuoteResponse {
    enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    percent: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    discount_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    discount_amount_formatted: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cart_total_formatted: Option<String>,
}

impl DiscountQuoteResponse {
    fn disabled() -> Self {
        Self {
            enabled: false,
            percent: None,
            discount_amount: None,
            discount_amount_formatted: None,
            cart_total_formatted: None,
        }
    }
}

async fn get_discount_quote(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<DiscountQuoteResponse>> {
    if !state.module_active {
        return Ok(Json(DiscountQuoteResponse::disabled()));
    }
    let settings = state.settings_service.get_settings()?;
    if !settings.enabled {
        return Ok(Json(DiscountQuoteResponse::disabled()));
    }

    let cart = session_cart(&state, &headers)?.ok_or(ApiError::NotFound)?;
    let amount = compute_discount_amount(cart.total_with_tax, settings.percent);

    Ok(Json(DiscountQuoteResponse {
        enabled: true,
        percent: Some(settings.percent),
        discount_amount: Some(amount),
        discount_amount_formatted: Some(format_amount(amount, &cart.currency)),
        cart_total_formatted: Some(format_amount(cart.total_with_tax, &cart.currency)),
    }))
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let cors = if config.cors_allow.iter().any(|origin| origin == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_allow
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let api = Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/settings", get(get_settings).put(update_settings))
        .route("/discount/quote", get(get_discount_quote))
        .route("/discount/apply", post(apply_discount))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(cors)
}
