//! HTTP routes and handlers.
//!
//! Status policy: 401 on auth failure, 400 on malformed input, 500 when an
//! upstream fails in a way that leaves nothing to serve. Plain-text bodies
//! on the quote endpoints (the primary consumer is a spreadsheet, not a
//! browser), JSON on the transcript and heartbeat endpoints.

use crate::auth::{authorize, log_access};
use crate::error::GatewayResult;
use crate::state::AppState;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use finapi_core::{is_valid_currency, is_valid_symbol_ticker, is_valid_ticker};
use finapi_extract::ExtractedFigures;
use finapi_feed::{collect_spreads, ProductMap};
use finapi_telemetry::Severity;
use finapi_ws::{FeedClient, FeedConfig};
use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

/// Page bodies outside these bounds are interstitials or garbage, not a
/// quote page.
const PAGE_MIN_BYTES: usize = 100;
const PAGE_MAX_BYTES: usize = 10_000_000;

/// Build the gateway router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(heartbeat))
        .route("/write-crypto-futures-data", post(write_crypto_futures_data))
        .route("/get-forex-conversion", get(get_forex_conversion))
        .route(
            "/get-stock-price-and-market-cap-gurufocus",
            get(get_scraped_price_and_market_cap),
        )
        .route(
            "/get-stock-price-and-market-cap",
            get(get_stock_price_and_market_cap),
        )
        .route(
            "/get-earnings-call-transcript",
            get(get_earnings_call_transcript),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            log_access,
        ))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Unauthenticated liveness probe.
async fn heartbeat() -> Json<serde_json::Value> {
    Json(serde_json::json!({"message": "Finance gateway is alive!"}))
}

#[derive(Debug, Deserialize)]
struct ForexParams {
    currency: Option<String>,
}

async fn get_forex_conversion(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<ForexParams>,
) -> Response {
    if let Err(denied) = authorize(&state, &headers).await {
        return denied;
    }

    let currency = params.currency.unwrap_or_default();
    if !is_valid_currency(&currency) {
        state
            .relay_log(
                Severity::Error,
                &format!("Bad currency submitted: {currency}"),
            )
            .await;
        return (StatusCode::BAD_REQUEST, String::new()).into_response();
    }

    match fetch_fx_rate(&state, &currency).await {
        Ok(rate) => {
            state
                .relay_log(
                    Severity::Trace,
                    &format!("Got forex conversion rate for {currency}: {rate}"),
                )
                .await;
            (StatusCode::OK, rate).into_response()
        }
        Err(e) => {
            error!(error = %e, currency = %currency, "FX rate fetch failed");
            state
                .relay_log(
                    Severity::Error,
                    &format!("Failed to get forex conversion rate for currency {currency}: {e}"),
                )
                .await;
            (StatusCode::INTERNAL_SERVER_ERROR, String::new()).into_response()
        }
    }
}

async fn fetch_fx_rate(state: &AppState, currency: &str) -> GatewayResult<String> {
    let bundle = state.secrets().fetch().await?;
    let api_key = bundle.api_key("alpha_vantage")?;
    Ok(state.market_data().fx_rate(api_key, currency).await?)
}

#[derive(Debug, Deserialize)]
struct TickerParams {
    ticker: Option<String>,
}

async fn get_scraped_price_and_market_cap(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<TickerParams>,
) -> Response {
    if let Err(denied) = authorize(&state, &headers).await {
        return denied;
    }

    let ticker = params.ticker.unwrap_or_default();
    if !is_valid_ticker(&ticker) {
        state
            .relay_log(Severity::Error, &format!("Bad ticker submitted: {ticker}"))
            .await;
        return (StatusCode::BAD_REQUEST, String::new()).into_response();
    }
    let ticker = ticker.to_uppercase();

    let source = match state.pages().page_source(&ticker).await {
        Ok(source) if (PAGE_MIN_BYTES..=PAGE_MAX_BYTES).contains(&source.len()) => source,
        Ok(source) => {
            state
                .relay_log(
                    Severity::Error,
                    &format!(
                        "Equity page body for {ticker} has implausible size {}",
                        source.len()
                    ),
                )
                .await;
            return (StatusCode::INTERNAL_SERVER_ERROR, String::new()).into_response();
        }
        Err(e) => {
            error!(error = %e, ticker = %ticker, "Equity page fetch failed");
            state
                .relay_log(
                    Severity::Error,
                    &format!("Failed to fetch equity page for {ticker}: {e}"),
                )
                .await;
            return (StatusCode::INTERNAL_SERVER_ERROR, String::new()).into_response();
        }
    };

    let figures = ExtractedFigures::from_page(&source);
    match (figures.price, figures.market_cap) {
        (Some(price), Some(cap)) => {
            state
                .relay_log(
                    Severity::Trace,
                    &format!("Extracted price and market cap for {ticker}: {price}, {cap}"),
                )
                .await;
            (StatusCode::OK, format!("{price},{cap}")).into_response()
        }
        // ETF pages carry a price but no market cap section.
        (Some(price), None) => {
            state
                .relay_log(
                    Severity::Trace,
                    &format!("Extracted price for {ticker}: {price}"),
                )
                .await;
            (StatusCode::OK, format!("{price},N/A")).into_response()
        }
        _ => {
            state
                .relay_log(
                    Severity::Error,
                    &format!("Failed to extract price and market cap for {ticker}"),
                )
                .await;
            (StatusCode::INTERNAL_SERVER_ERROR, String::new()).into_response()
        }
    }
}

async fn get_stock_price_and_market_cap(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<TickerParams>,
) -> Response {
    if let Err(denied) = authorize(&state, &headers).await {
        return denied;
    }

    let ticker = params.ticker.unwrap_or_default();
    if !is_valid_symbol_ticker(&ticker) {
        state
            .relay_log(Severity::Error, &format!("Bad ticker submitted: {ticker}"))
            .await;
        return (StatusCode::BAD_REQUEST, String::new()).into_response();
    }
    let ticker = ticker.to_uppercase();

    let bundle = match state.secrets().fetch().await {
        Ok(bundle) => bundle,
        Err(e) => {
            error!(error = %e, "Secrets fetch failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, String::new()).into_response();
        }
    };
    let api_key = match bundle.api_key("alpha_vantage") {
        Ok(key) => key,
        Err(e) => {
            error!(error = %e, "Market-data API key missing");
            return (StatusCode::INTERNAL_SERVER_ERROR, String::new()).into_response();
        }
    };

    let price = match state.market_data().intraday_price(api_key, &ticker).await {
        Ok(price) => price,
        Err(e) => {
            error!(error = %e, ticker = %ticker, "Intraday price fetch failed");
            state
                .relay_log(
                    Severity::Error,
                    &format!("Failed to get price for {ticker}: {e}"),
                )
                .await;
            return (StatusCode::INTERNAL_SERVER_ERROR, String::new()).into_response();
        }
    };

    // A missing market cap (".HK" tickers, or a cap fetch failure) still
    // leaves a usable price; degrade to N/A rather than failing the call.
    let cap = match state
        .market_data()
        .company_market_cap(api_key, &ticker)
        .await
    {
        Ok(Some(cap)) => cap,
        Ok(None) => "N/A".to_string(),
        Err(e) => {
            state
                .relay_log(
                    Severity::Warning,
                    &format!("Failed to get market cap for {ticker}: {e}"),
                )
                .await;
            "N/A".to_string()
        }
    };

    state
        .relay_log(
            Severity::Trace,
            &format!("Got price and market cap for {ticker}: {price}, {cap}"),
        )
        .await;
    (StatusCode::OK, format!("{price},{cap}")).into_response()
}

#[derive(Debug, Deserialize)]
struct TranscriptParams {
    ticker: String,
    year: i32,
    quarter: i32,
}

async fn get_earnings_call_transcript(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<TranscriptParams>,
) -> Response {
    if let Err(denied) = authorize(&state, &headers).await {
        return denied;
    }

    let result: GatewayResult<String> = async {
        let bundle = state.secrets().fetch().await?;
        let text = state
            .transcripts()
            .get(
                bundle.transcript_api_key(),
                &params.ticker,
                params.year,
                params.quarter,
            )
            .await?;
        Ok(text)
    }
    .await;

    match result {
        Ok(text) => Json(serde_json::json!({"transcript": text})).into_response(),
        Err(e) => {
            error!(error = %e, ticker = %params.ticker, "Transcript retrieval failed");
            state
                .relay_log(
                    Severity::Error,
                    &format!(
                        "Failed to get transcript for {} {} Q{}: {e}",
                        params.ticker, params.year, params.quarter
                    ),
                )
                .await;
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({})),
            )
                .into_response()
        }
    }
}

async fn write_crypto_futures_data(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Err(denied) = authorize(&state, &headers).await {
        return denied;
    }

    match run_spread_aggregation(&state).await {
        Ok(()) => (StatusCode::OK, String::new()).into_response(),
        Err(e) => {
            error!(error = %e, "Futures spread aggregation failed");
            state
                .relay_log(
                    Severity::Error,
                    &format!("Futures spread aggregation failed: {e}"),
                )
                .await;
            (StatusCode::INTERNAL_SERVER_ERROR, String::new()).into_response()
        }
    }
}

/// Run one full aggregation pass: subscribe, collect the window, persist
/// one row per coin.
async fn run_spread_aggregation(state: &AppState) -> GatewayResult<()> {
    let bundle = state.secrets().fetch().await?;
    let feed_settings = &state.config().feed;

    let client = FeedClient::new(FeedConfig {
        url: feed_settings.ws_url.clone(),
        products: feed_settings.products.clone(),
        api_key: Some(bundle.feed_credentials().name.clone()),
        ..Default::default()
    });

    let spreads = collect_spreads(
        &client,
        ProductMap::infer(&feed_settings.products),
        Duration::from_millis(feed_settings.window_ms),
    )
    .await?;

    // One row per coin; a failed write is logged and must not block the
    // other coin's row. No transaction spans coins.
    for (coin, spread) in &spreads {
        if let Err(e) = state.futures_writer().write_spread(*coin, spread).await {
            error!(error = %e, coin = %coin, "Spread row write failed");
            state
                .relay_log(
                    Severity::Error,
                    &format!("Writing {coin} spread row failed: {e}"),
                )
                .await;
        }
    }

    state
        .relay_log(Severity::Debug, "Finished writing futures spread data")
        .await;
    Ok(())
}

/// Run the gateway HTTP server.
pub async fn run_server(state: AppState) -> GatewayResult<()> {
    let port = state.config().server.port;
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(port, "Starting gateway server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
