use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    dto::DeletedResponse,
    error::{ApiError, Entity},
    extract::{ApiJson, ApiPath},
    state::AppState,
};

use super::dto::{CreateSubmenuRequest, SubmenuResponse, UpdateSubmenuRequest};

pub fn submenu_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/menus/:menu_id/submenus",
            get(list_submenus).post(create_submenu),
        )
        .route(
            "/menus/:menu_id/submenus/:submenu_id",
            get(get_submenu).patch(update_submenu).delete(delete_submenu),
        )
}

#[instrument(skip(state))]
pub async fn list_submenus(
    State(state): State<AppState>,
    ApiPath(menu_id): ApiPath<Uuid>,
) -> Result<Json<Vec<SubmenuResponse>>, ApiError> {
    let submenus = state.catalog.list_submenus(menu_id).await?;
    Ok(Json(submenus.into_iter().map(SubmenuResponse::from).collect()))
}

#[instrument(skip(state, payload))]
pub async fn create_submenu(
    State(state): State<AppState>,
    ApiPath(menu_id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<CreateSubmenuRequest>,
) -> Result<(StatusCode, Json<SubmenuResponse>), ApiError> {
    let new = payload.into_new()?;
    let Some(submenu) = state.catalog.create_submenu(menu_id, new).await? else {
        warn!(%menu_id, "create submenu under missing menu");
        return Err(ApiError::NotFound(Entity::Menu));
    };
    info!(%menu_id, submenu_id = %submenu.id, "submenu created");
    Ok((StatusCode::CREATED, Json(submenu.into())))
}

#[instrument(skip(state))]
pub async fn get_submenu(
    State(state): State<AppState>,
    ApiPath((menu_id, submenu_id)): ApiPath<(Uuid, Uuid)>,
) -> Result<Json<SubmenuResponse>, ApiError> {
    let Some(submenu) = state.catalog.get_submenu(menu_id, submenu_id).await? else {
        warn!(%menu_id, %submenu_id, "submenu not found");
        return Err(ApiError::NotFound(Entity::Submenu));
    };
    let dishes_count = state.catalog.count_dishes(submenu_id).await?;
    Ok(Json(SubmenuResponse::with_count(submenu, dishes_count)))
}

#[instrument(skip(state, payload))]
pub async fn update_submenu(
    State(state): State<AppState>,
    ApiPath((menu_id, submenu_id)): ApiPath<(Uuid, Uuid)>,
    ApiJson(payload): ApiJson<UpdateSubmenuRequest>,
) -> Result<Json<SubmenuResponse>, ApiError> {
    let changes = payload.into_changes()?;
    match state
        .catalog
        .update_submenu(menu_id, submenu_id, changes)
        .await?
    {
        Some(submenu) => {
            info!(%menu_id, %submenu_id, "submenu updated");
            Ok(Json(submenu.into()))
        }
        None => {
            warn!(%menu_id, %submenu_id, "submenu not found");
            Err(ApiError::NotFound(Entity::Submenu))
        }
    }
}

#[instrument(skip(state))]
pub async fn delete_submenu(
    State(state): State<AppState>,
    ApiPath((menu_id, submenu_id)): ApiPath<(Uuid, Uuid)>,
) -> Result<Json<DeletedResponse>, ApiError> {
    if !state.catalog.delete_submenu(menu_id, submenu_id).await? {
        warn!(%menu_id, %submenu_id, "submenu not found");
        return Err(ApiError::NotFound(Entity::Submenu));
    }
    info!(%menu_id, %submenu_id, "submenu deleted");
    Ok(Json(DeletedResponse {
        message: Entity::Submenu.deleted_message(),
    }))
}
