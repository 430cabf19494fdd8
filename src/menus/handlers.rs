use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    dto::{DeletedResponse, Pagination},
    error::{ApiError, Entity},
    extract::{ApiJson, ApiPath, ApiQuery},
    state::AppState,
};

use super::dto::{CreateMenuRequest, MenuResponse, UpdateMenuRequest};

pub fn menu_routes() -> Router<AppState> {
    Router::new()
        .route("/menus", get(list_menus).post(create_menu))
        .route(
            "/menus/:menu_id",
            get(get_menu).patch(update_menu).delete(delete_menu),
        )
}

#[instrument(skip(state))]
pub async fn list_menus(
    State(state): State<AppState>,
    ApiQuery(p): ApiQuery<Pagination>,
) -> Result<Json<Vec<MenuResponse>>, ApiError> {
    let menus = state.catalog.list_menus(p.into_page()?).await?;
    Ok(Json(menus.into_iter().map(MenuResponse::from).collect()))
}

#[instrument(skip(state, payload))]
pub async fn create_menu(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateMenuRequest>,
) -> Result<(StatusCode, Json<MenuResponse>), ApiError> {
    let menu = state.catalog.create_menu(payload.into_new()?).await?;
    info!(menu_id = %menu.id, "menu created");
    Ok((StatusCode::CREATED, Json(menu.into())))
}

#[instrument(skip(state))]
pub async fn get_menu(
    State(state): State<AppState>,
    ApiPath(menu_id): ApiPath<Uuid>,
) -> Result<Json<MenuResponse>, ApiError> {
    let Some(menu) = state.catalog.get_menu(menu_id).await? else {
        warn!(%menu_id, "menu not found");
        return Err(ApiError::NotFound(Entity::Menu));
    };
    let counts = state.catalog.menu_counts(menu_id).await?;
    Ok(Json(MenuResponse::with_counts(menu, counts)))
}

#[instrument(skip(state, payload))]
pub async fn update_menu(
    State(state): State<AppState>,
    ApiPath(menu_id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<UpdateMenuRequest>,
) -> Result<Json<MenuResponse>, ApiError> {
    let changes = payload.into_changes()?;
    match state.catalog.update_menu(menu_id, changes).await? {
        Some(menu) => {
            info!(%menu_id, "menu updated");
            Ok(Json(menu.into()))
        }
        None => {
            warn!(%menu_id, "menu not found");
            Err(ApiError::NotFound(Entity::Menu))
        }
    }
}

#[instrument(skip(state))]
pub async fn delete_menu(
    State(state): State<AppState>,
    ApiPath(menu_id): ApiPath<Uuid>,
) -> Result<Json<DeletedResponse>, ApiError> {
    if !state.catalog.delete_menu(menu_id).await? {
        warn!(%menu_id, "menu not found");
        return Err(ApiError::NotFound(Entity::Menu));
    }
    info!(%menu_id, "menu deleted");
    Ok(Json(DeletedResponse {
        message: Entity::Menu.deleted_message(),
    }))
}
