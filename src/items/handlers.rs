//! CRUD route handlers for the items collection.
//!
//! Items are opaque documents; nothing here interprets their shape.
//! Driver failures propagate as [`AppError::Database`] and surface as
//! the uniform 500 error body.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::ReturnDocument;
use mongodb::Collection;
use serde_json::{json, Value};

use crate::http::error::AppError;
use crate::http::server::AppState;

const COLLECTION: &str = "items";

/// Routes for the `/items` resource.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_items).post(create_item))
        .route(
            "/{id}",
            get(get_item).put(update_item).delete(delete_item),
        )
}

fn collection(state: &AppState) -> Collection<Document> {
    state.db.database().collection(COLLECTION)
}

fn parse_id(id: String) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(&id).map_err(|_| AppError::InvalidId(id))
}

async fn list_items(State(state): State<AppState>) -> Result<Json<Vec<Document>>, AppError> {
    let items = collection(&state)
        .find(doc! {})
        .await?
        .try_collect()
        .await?;
    Ok(Json(items))
}

async fn create_item(
    State(state): State<AppState>,
    Json(mut item): Json<Document>,
) -> Result<(StatusCode, Json<Document>), AppError> {
    let result = collection(&state).insert_one(&item).await?;
    item.insert("_id", result.inserted_id);
    Ok((StatusCode::CREATED, Json(item)))
}

async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Document>, AppError> {
    let id = parse_id(id)?;
    collection(&state)
        .find_one(doc! { "_id": id })
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(item): Json<Document>,
) -> Result<Json<Document>, AppError> {
    let id = parse_id(id)?;
    collection(&state)
        .find_one_and_replace(doc! { "_id": id }, &item)
        .return_document(ReturnDocument::After)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = parse_id(id)?;
    let result = collection(&state).delete_one(doc! { "_id": id }).await?;
    if result.deleted_count == 0 {
        return Err(AppError::NotFound);
    }
    Ok(Json(json!({ "deleted": true })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_object_ids() {
        let err = parse_id("not-an-oid".into()).unwrap_err();
        assert!(matches!(err, AppError::InvalidId(_)));
    }

    #[test]
    fn accepts_well_formed_object_ids() {
        let oid = ObjectId::new();
        assert_eq!(parse_id(oid.to_hex()).unwrap(), oid);
    }
}
