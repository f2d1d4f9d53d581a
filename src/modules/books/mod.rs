pub mod models;
pub mod ops;

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, post};
use axum::{Json, Router};
use bson::Document;
use serde_json::json;

use handyhub_http::error::AppError;
use handyhub_http::wire;
use handyhub_kernel::{InitCtx, Module};
use handyhub_store::{Collection, Store};

use models::Book;

/// Books module: create, list, and delete-by-isbn against the books
/// collection.
pub struct BooksModule;

impl BooksModule {
    pub const fn new() -> Self {
        Self
    }
}

#[derive(Clone)]
struct BooksState {
    books: Arc<dyn Collection>,
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self, store: &Store) -> Router {
        let state = BooksState {
            books: store.collection(ops::BOOKS_COLLECTION),
        };
        Router::new()
            .route("/books", post(create_book).get(list_books))
            .route("/books/{isbn}", delete(delete_book))
            .with_state(state)
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/books": {
                    "get": {
                        "summary": "List all books",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "Every stored book",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/Book" }
                                        }
                                    }
                                }
                            },
                            "500": { "description": "Store failure" }
                        }
                    },
                    "post": {
                        "summary": "Create a book",
                        "tags": ["Books"],
                        "requestBody": {
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/Book" }
                                }
                            },
                            "required": true
                        },
                        "responses": {
                            "201": { "description": "Book created" },
                            "400": { "description": "Malformed body" },
                            "500": { "description": "Store failure" }
                        }
                    }
                },
                "/books/{isbn}": {
                    "delete": {
                        "summary": "Delete every book matching the isbn",
                        "tags": ["Books"],
                        "parameters": [{
                            "name": "isbn",
                            "in": "path",
                            "required": true,
                            "schema": { "type": "string" }
                        }],
                        "responses": {
                            "200": { "description": "Matching books deleted" },
                            "404": { "description": "No book matched the isbn" },
                            "500": { "description": "Store failure" }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "isbn": { "type": "string" },
                            "title": { "type": "string" },
                            "author": { "type": "string" }
                        },
                        "required": ["isbn", "title", "author"]
                    }
                }
            }
        }))
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// POST /books
async fn create_book(
    State(state): State<BooksState>,
    payload: Result<Json<Book>, JsonRejection>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let Json(book) = payload
        .map_err(|rejection| AppError::bad_request(format!("invalid book payload: {rejection}")))?;

    ops::create_book(state.books.as_ref(), &book)
        .await
        .map_err(|err| AppError::store("could not insert book", err))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "book created successfully" })),
    ))
}

/// GET /books
async fn list_books(State(state): State<BooksState>) -> Result<Json<Vec<Document>>, AppError> {
    let books = ops::list_books(state.books.as_ref())
        .await
        .map_err(|err| AppError::store("could not fetch books", err))?;

    Ok(Json(wire::render_documents(books)))
}

/// DELETE /books/{isbn}
async fn delete_book(
    State(state): State<BooksState>,
    Path(isbn): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = ops::delete_by_isbn(state.books.as_ref(), &isbn)
        .await
        .map_err(|err| AppError::store("could not delete book", err))?;

    if deleted == 0 {
        return Err(AppError::not_found("no book found with that isbn"));
    }

    Ok(Json(json!({
        "message": "book deleted successfully",
        "deleted": deleted
    })))
}

/// Create a new instance of the books module
pub fn create_module() -> Arc<dyn Module> {
    Arc::new(BooksModule::new())
}
