use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use models::product::ProductDocument;
use serde::Deserialize;
use serde_json::Value;
use service::product_service::{self, ProductFilter};
use tracing::{error, info, warn};

use crate::errors::JsonApiError;
use crate::state::ServerState;

pub const BASE_URL: &str = "/products";
const JSON_MEDIA_TYPE: &str = "application/json";

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub name: Option<String>,
    pub category: Option<String>,
    pub available: Option<String>,
}

/// Reject the request unless `Content-Type` names `expected` (parameters such
/// as `charset` are allowed).
pub fn check_content_type(headers: &HeaderMap, expected: &str) -> Result<(), JsonApiError> {
    let Some(value) = headers.get(header::CONTENT_TYPE) else {
        error!("No Content-Type specified.");
        return Err(JsonApiError::unsupported_media_type(format!("Content-Type must be {expected}")));
    };
    let media_type = value
        .to_str()
        .ok()
        .and_then(|v| v.split(';').next())
        .map(str::trim)
        .unwrap_or_default();
    if media_type.eq_ignore_ascii_case(expected) {
        return Ok(());
    }
    error!(content_type = ?value, "invalid Content-Type");
    Err(JsonApiError::unsupported_media_type(format!("Content-Type must be {expected}")))
}

/// Resolve the `{id}` segment. A value that is not an `i32` names no product.
fn product_id(path: Result<Path<i32>, PathRejection>) -> Result<i32, JsonApiError> {
    match path {
        Ok(Path(id)) => Ok(id),
        Err(rejection) => {
            warn!(error = %rejection, "unusable product id in path");
            Err(JsonApiError::not_found("No product exists at this path."))
        }
    }
}

fn parse_json(body: &Bytes) -> Result<Value, JsonApiError> {
    serde_json::from_slice(body).map_err(|e| JsonApiError::bad_request(format!("malformed JSON body: {e}")))
}

pub async fn create_product(
    State(state): State<ServerState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, JsonApiError> {
    info!("Request to create a product");
    check_content_type(&headers, JSON_MEDIA_TYPE)?;
    let payload = parse_json(&body)?;

    let product = product_service::create_product(&state.db, &payload).await?;
    let doc = product.serialize();
    let location = format!("{}/{}", BASE_URL, doc.id.unwrap_or_default());
    info!(id = ?doc.id, %location, "product created");
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(doc)))
}

pub async fn get_product(
    State(state): State<ServerState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<ProductDocument>, JsonApiError> {
    let id = product_id(path)?;
    info!(id, "Request for product");
    match product_service::get_product(&state.db, id).await? {
        Some(product) => Ok(Json(product.serialize())),
        None => Err(JsonApiError::not_found(format!("Product with id '{id}' was not found."))),
    }
}

pub async fn update_product(
    State(state): State<ServerState>,
    path: Result<Path<i32>, PathRejection>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ProductDocument>, JsonApiError> {
    let id = product_id(path)?;
    info!(id, "Request to update a product");
    check_content_type(&headers, JSON_MEDIA_TYPE)?;
    let payload = parse_json(&body)?;

    let product = product_service::update_product(&state.db, id, &payload).await?;
    Ok(Json(product.serialize()))
}

pub async fn delete_product(
    State(state): State<ServerState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, JsonApiError> {
    let id = product_id(path)?;
    info!(id, "Request to delete a product");
    product_service::delete_product(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_products(
    State(state): State<ServerState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<ProductDocument>>, JsonApiError> {
    info!(?q, "Request to list products");
    let filter = ProductFilter::from_query(q.name.as_deref(), q.category.as_deref(), q.available.as_deref())?;
    let results: Vec<ProductDocument> = product_service::list_products(&state.db, &filter)
        .await?
        .iter()
        .map(|p| p.serialize())
        .collect();
    info!(count = results.len(), "products returned");
    Ok(Json(results))
}
