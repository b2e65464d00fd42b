pub mod products;

use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Message;

use crate::errors::JsonApiError;
use crate::state::ServerState;

pub async fn index() -> Json<Message> {
    Json(Message::new("Product Catalog Administration"))
}

pub async fn health() -> Json<Message> {
    Json(Message::new("OK"))
}

async fn fallback() -> JsonApiError {
    JsonApiError::not_found("The requested resource does not exist.")
}

/// Build the full application router
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let product_routes = Router::new()
        .route("/products", get(products::list_products).post(products::create_product))
        .route(
            "/products/:id",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        );

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .merge(product_routes)
        .fallback(fallback)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
