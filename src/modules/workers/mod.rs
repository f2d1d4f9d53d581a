pub mod models;
pub mod ops;

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use bson::Document;
use serde_json::json;

use handyhub_http::error::AppError;
use handyhub_http::wire;
use handyhub_kernel::{InitCtx, Module};
use handyhub_store::{Collection, Store};

use models::{Worker, WorkerProfile};

/// Workers module: the simple add/list pair plus the full profile flow with
/// its work-name lookup. All four routes share the workers collection.
pub struct WorkersModule;

impl WorkersModule {
    pub const fn new() -> Self {
        Self
    }
}

#[derive(Clone)]
struct WorkersState {
    workers: Arc<dyn Collection>,
}

#[async_trait]
impl Module for WorkersModule {
    fn name(&self) -> &'static str {
        "workers"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "workers module initialized"
        );
        Ok(())
    }

    fn routes(&self, store: &Store) -> Router {
        let state = WorkersState {
            workers: store.collection(ops::WORKERS_COLLECTION),
        };
        Router::new()
            .route("/workers", get(list_workers))
            .route("/workers/{workName}", get(workers_by_work_name))
            .route("/addWorker", post(add_worker))
            .route("/addWorkerToList", post(add_worker_to_list))
            .with_state(state)
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/workers": {
                    "get": {
                        "summary": "List all workers",
                        "tags": ["Workers"],
                        "responses": {
                            "200": {
                                "description": "Every stored worker",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/WorkerProfile" }
                                        }
                                    }
                                }
                            },
                            "500": { "description": "Store failure" }
                        }
                    }
                },
                "/workers/{workName}": {
                    "get": {
                        "summary": "List workers for one trade",
                        "tags": ["Workers"],
                        "parameters": [{
                            "name": "workName",
                            "in": "path",
                            "required": true,
                            "schema": { "type": "string" }
                        }],
                        "responses": {
                            "200": { "description": "Matching workers" },
                            "404": { "description": "No worker matched the trade" },
                            "500": { "description": "Store failure" }
                        }
                    }
                },
                "/addWorker": {
                    "post": {
                        "summary": "Add a minimal worker record",
                        "tags": ["Workers"],
                        "requestBody": {
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/Worker" }
                                }
                            },
                            "required": true
                        },
                        "responses": {
                            "201": { "description": "Worker created" },
                            "400": { "description": "Malformed body" },
                            "500": { "description": "Store failure" }
                        }
                    }
                },
                "/addWorkerToList": {
                    "post": {
                        "summary": "Add a full worker profile",
                        "tags": ["Workers"],
                        "requestBody": {
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/WorkerProfile" }
                                }
                            },
                            "required": true
                        },
                        "responses": {
                            "201": { "description": "Worker added, response carries the generated id" },
                            "400": { "description": "Malformed body" },
                            "500": { "description": "Store failure" }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Worker": {
                        "type": "object",
                        "properties": {
                            "imgUrl": { "type": "string" },
                            "nameOfWorker": { "type": "string" }
                        },
                        "required": ["imgUrl", "nameOfWorker"]
                    },
                    "Coordinates": {
                        "type": "object",
                        "properties": {
                            "latitude": { "type": "number", "format": "double" },
                            "longitude": { "type": "number", "format": "double" }
                        },
                        "required": ["latitude", "longitude"]
                    },
                    "WorkerProfile": {
                        "type": "object",
                        "properties": {
                            "name": { "type": "string" },
                            "workName": { "type": "string" },
                            "imgUrl": { "type": "string" },
                            "coordinatesOfWorker": { "$ref": "#/components/schemas/Coordinates" },
                            "costPerHour": { "type": "integer" }
                        },
                        "required": ["name", "workName", "imgUrl", "coordinatesOfWorker", "costPerHour"]
                    }
                }
            }
        }))
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "workers module stopped");
        Ok(())
    }
}

/// GET /workers
async fn list_workers(State(state): State<WorkersState>) -> Result<Json<Vec<Document>>, AppError> {
    let workers = ops::list_workers(state.workers.as_ref())
        .await
        .map_err(|err| AppError::store("could not fetch workers", err))?;

    Ok(Json(wire::render_documents(workers)))
}

/// GET /workers/{workName}
///
/// Unlike the full scan, an empty match here is a 404. Callers depend on
/// that asymmetry.
async fn workers_by_work_name(
    State(state): State<WorkersState>,
    Path(work_name): Path<String>,
) -> Result<Json<Vec<Document>>, AppError> {
    let workers = ops::find_by_work_name(state.workers.as_ref(), &work_name)
        .await
        .map_err(|err| AppError::store("could not fetch workers", err))?;

    if workers.is_empty() {
        return Err(AppError::not_found("no workers found for that work name"));
    }

    Ok(Json(wire::render_documents(workers)))
}

/// POST /addWorker
async fn add_worker(
    State(state): State<WorkersState>,
    payload: Result<Json<Worker>, JsonRejection>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let Json(worker) = payload.map_err(|rejection| {
        AppError::bad_request(format!("invalid worker payload: {rejection}"))
    })?;

    ops::add_worker(state.workers.as_ref(), &worker)
        .await
        .map_err(|err| AppError::store("could not insert worker", err))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "worker created successfully" })),
    ))
}

/// POST /addWorkerToList
async fn add_worker_to_list(
    State(state): State<WorkersState>,
    payload: Result<Json<WorkerProfile>, JsonRejection>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let Json(profile) = payload.map_err(|rejection| {
        AppError::bad_request(format!("invalid worker profile payload: {rejection}"))
    })?;

    let id = ops::add_worker_profile(state.workers.as_ref(), &profile)
        .await
        .map_err(|err| AppError::store("could not insert worker", err))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "worker added successfully",
            "id": wire::id_string(&id)
        })),
    ))
}

/// Create a new instance of the workers module
pub fn create_module() -> Arc<dyn Module> {
    Arc::new(WorkersModule::new())
}
