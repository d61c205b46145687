//! REST API server for test card generation.
//!
//! # Usage
//!
//! ```bash
//! # Start server
//! ccgen-server
//!
//! # With custom port
//! ccgen-server --port 8080
//! ```
//!
//! # Swagger UI
//!
//! Visit http://localhost:3000/swagger-ui/ for interactive API documentation.

use axum::{
    extract::Query,
    http::{header, Method, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::{IntoParams, OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use cc_generator::batch::partition;
use cc_generator::{
    classify, export_batch, is_valid_luhn, parse_pattern, BatchGenerator, CardGenerator,
    CardRecord, ExportFormat,
};

/// Largest batch a single request may ask for.
const MAX_COUNT: usize = 1000;

// ============================================================================
// OpenAPI Documentation
// ============================================================================

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Test Card Generator API",
        version = "0.1.0",
        description = "Generates Luhn-valid test payment cards from patterns. For testing only; no auth or rate limiting.",
        license(name = "MIT OR Apache-2.0"),
        contact(name = "API Support")
    ),
    tags(
        (name = "Generation", description = "Card generation from patterns"),
        (name = "Export", description = "Rendering records in other formats"),
        (name = "Detection", description = "Card brand detection"),
        (name = "System", description = "Health and status endpoints")
    ),
    paths(generate_cards, export_cards, detect_brand_handler, health),
    components(schemas(
        GenerateRequest,
        GenerateResponse,
        CardResponse,
        ExportRequest,
        CardInput,
        ExportResponse,
        DetectQuery,
        DetectResponse,
        HealthResponse,
    ))
)]
struct ApiDoc;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Deserialize, ToSchema)]
#[schema(example = json!({"pattern": "434769805926XXXX|10|2029|XXX", "count": 3, "format": "pipe"}))]
struct GenerateRequest {
    /// Pattern: BIN with wildcards (X x * ? # _), then optional month, year and CVV,
    /// separated by any of | / : -
    pattern: String,
    /// Number of cards to generate (1-1000, default: 1)
    #[serde(default = "default_count")]
    count: usize,
    /// Export format for the `exported` field: pipe, json, csv or formatted (default: pipe)
    #[serde(default = "default_format")]
    format: String,
    /// Seed for reproducible output
    #[serde(default)]
    seed: Option<u64>,
    /// Keep a month or year given without the other
    #[serde(default)]
    honor_partial_expiry: bool,
    /// Replace literal CVVs whose length does not fit the brand
    #[serde(default)]
    strict_cvv: bool,
}

fn default_count() -> usize {
    1
}

fn default_format() -> String {
    ExportFormat::Pipe.name().to_string()
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct CardResponse {
    /// Luhn-valid card number
    card_number: String,
    /// Expiry month, two digits
    month: String,
    /// Expiry year, two digits
    year: String,
    /// Card verification value
    cvv: String,
    /// Detected brand name
    card_type: String,
    /// `card_number|month|year|cvv`
    formatted: String,
}

impl From<&CardRecord> for CardResponse {
    fn from(record: &CardRecord) -> Self {
        Self {
            card_number: record.card_number().to_string(),
            month: record.month().to_string(),
            year: record.year().to_string(),
            cvv: record.cvv().to_string(),
            card_type: record.card_type().name().to_string(),
            formatted: record.formatted().to_string(),
        }
    }
}

#[derive(Serialize, ToSchema)]
struct GenerateResponse {
    /// Generated records
    records: Vec<CardResponse>,
    /// Records rendered in the requested format
    exported: String,
    /// Number of records that failed and were skipped
    failed: usize,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct CardInput {
    /// Card number; the brand is detected from it
    card_number: String,
    /// Expiry month
    month: String,
    /// Expiry year
    year: String,
    /// Card verification value
    cvv: String,
}

#[derive(Deserialize, ToSchema)]
struct ExportRequest {
    /// Records to render
    records: Vec<CardInput>,
    /// pipe, json, csv or formatted (default: pipe)
    #[serde(default = "default_format")]
    format: String,
}

#[derive(Serialize, ToSchema)]
struct ExportResponse {
    /// Rendered document
    exported: String,
}

#[derive(Deserialize, ToSchema, IntoParams)]
struct DetectQuery {
    /// Card number or prefix to classify
    card: String,
}

#[derive(Serialize, ToSchema)]
struct DetectResponse {
    /// Detected brand name ("Unknown" when no rule matches)
    brand: String,
    /// CVV length for the brand
    cvv_length: usize,
    /// Whether the digits pass the Luhn check
    luhn_valid: bool,
}

#[derive(Serialize, ToSchema)]
struct HealthResponse {
    /// Service status
    status: String,
    /// API version
    version: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// Generate test cards from a pattern
#[utoipa::path(
    post,
    path = "/generate",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Generated cards", body = GenerateResponse),
        (status = 400, description = "Invalid pattern, count or format")
    ),
    tag = "Generation"
)]
async fn generate_cards(
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, (StatusCode, String)> {
    if !(1..=MAX_COUNT).contains(&req.count) {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("count must be between 1 and {}", MAX_COUNT),
        ));
    }
    let format = parse_format(&req.format)?;
    parse_pattern(&req.pattern).map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let generator = CardGenerator::new()
        .honor_partial_expiry(req.honor_partial_expiry)
        .validate_literal_cvv(req.strict_cvv);
    let mut rng = match req.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let results = BatchGenerator::new(generator).generate_all(&req.pattern, req.count, &mut rng);
    let (records, failed) = partition(results);
    for (index, error) in &failed {
        tracing::warn!(index, %error, "skipping card record that failed to generate");
    }

    let exported = export_batch(&records, format)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(GenerateResponse {
        records: records.iter().map(CardResponse::from).collect(),
        exported,
        failed: failed.len(),
    }))
}

/// Render existing records in another format
#[utoipa::path(
    post,
    path = "/export",
    request_body = ExportRequest,
    responses(
        (status = 200, description = "Rendered records", body = ExportResponse),
        (status = 400, description = "Unknown format")
    ),
    tag = "Export"
)]
async fn export_cards(
    Json(req): Json<ExportRequest>,
) -> Result<Json<ExportResponse>, (StatusCode, String)> {
    let format = parse_format(&req.format)?;

    let records: Vec<CardRecord> = req
        .records
        .into_iter()
        .map(|input| {
            let brand = classify(&input.card_number);
            CardRecord::new(input.card_number, input.month, input.year, input.cvv, brand)
        })
        .collect();

    let exported = export_batch(&records, format)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(ExportResponse { exported }))
}

/// Detect card brand from number
#[utoipa::path(
    get,
    path = "/detect",
    params(DetectQuery),
    responses(
        (status = 200, description = "Detected brand", body = DetectResponse)
    ),
    tag = "Detection"
)]
async fn detect_brand_handler(Query(query): Query<DetectQuery>) -> Json<DetectResponse> {
    let digits: String = query.card.chars().filter(|c| c.is_ascii_digit()).collect();
    let brand = classify(&digits);

    Json(DetectResponse {
        brand: brand.name().to_string(),
        cvv_length: brand.cvv_length(),
        luhn_valid: is_valid_luhn(&digits),
    })
}

/// Health check
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "System"
)]
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============================================================================
// Helpers
// ============================================================================

fn parse_format(name: &str) -> Result<ExportFormat, (StatusCode, String)> {
    name.parse()
        .map_err(|e: cc_generator::ExportError| (StatusCode::BAD_REQUEST, e.to_string()))
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse args
    let port: u16 = std::env::args()
        .skip_while(|a| a != "--port")
        .nth(1)
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(Any);

    // Build router with Swagger UI
    let app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/generate", post(generate_cards))
        .route("/export", post(export_cards))
        .route("/detect", get(detect_brand_handler))
        .route("/health", get(health))
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting server on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}:{}/swagger-ui/", "localhost", port);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(error) => {
            tracing::error!(%addr, %error, "failed to bind");
            std::process::exit(1);
        }
    };
    if let Err(error) = axum::serve(listener, app).await {
        tracing::error!(%error, "server error");
        std::process::exit(1);
    }
}
