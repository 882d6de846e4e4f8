//! Generic controllers, instantiated once per entity by [`resource_routes`].

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use axum_extra::extract::WithRejection;
use uuid::Uuid;

use crate::dto::Identified;
use crate::error::{AppError, AppResult};
use crate::services::EntityStore;
use crate::state::AppState;

pub fn resource_routes<E: EntityStore>() -> Router<AppState> {
    Router::new()
        .route("/", get(list_records::<E>).post(create_record::<E>))
        .route(
            "/:id",
            get(get_record::<E>)
                .put(update_record::<E>)
                .delete(delete_record::<E>),
        )
}

pub fn resource_path<E: EntityStore>() -> String {
    format!("/api/{}", E::RESOURCE)
}

pub async fn list_records<E: EntityStore>(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<E::View>>> {
    let records = state.service::<E>().list_active().await?;
    Ok(Json(records.into_iter().map(E::View::from).collect()))
}

pub async fn get_record<E: EntityStore>(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<E::View>> {
    let record = state
        .service::<E>()
        .get_by_id(id)
        .await?
        .ok_or_else(AppError::not_found)?;
    Ok(Json(E::View::from(record)))
}

pub async fn create_record<E: EntityStore>(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<E::Payload>, AppError>,
) -> AppResult<impl IntoResponse> {
    let record = state.service::<E>().create(payload).await?;
    let location = format!("{}/{}", resource_path::<E>(), record.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(E::View::from(record)),
    ))
}

pub async fn update_record<E: EntityStore>(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    WithRejection(Json(payload), _): WithRejection<Json<Identified<E::Payload>>, AppError>,
) -> AppResult<Json<E::View>> {
    if payload.id != id {
        return Err(AppError::bad_request(format!(
            "body id {} does not match route id {id}",
            payload.id
        )));
    }

    let record = state.service::<E>().update(payload).await?;
    Ok(Json(E::View::from(record)))
}

pub async fn delete_record<E: EntityStore>(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.service::<E>().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
