use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::{
    dto::{DeletedResponse, Pagination},
    error::{ApiError, Entity},
    extract::{ApiJson, ApiPath, ApiQuery},
    state::AppState,
};

use super::dto::{CreateDishRequest, DishResponse, UpdateDishRequest};

pub fn dish_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/menus/:menu_id/submenus/:submenu_id/dishes",
            get(list_dishes).post(create_dish),
        )
        .route(
            "/menus/:menu_id/submenus/:submenu_id/dishes/:dish_id",
            get(get_dish).patch(update_dish).delete(delete_dish),
        )
}

#[instrument(skip(state))]
pub async fn list_dishes(
    State(state): State<AppState>,
    ApiPath((menu_id, submenu_id)): ApiPath<(Uuid, Uuid)>,
    ApiQuery(p): ApiQuery<Pagination>,
) -> Result<Json<Vec<DishResponse>>, ApiError> {
    let dishes = state
        .catalog
        .list_dishes(menu_id, submenu_id, p.into_page()?)
        .await?;
    Ok(Json(dishes.into_iter().map(DishResponse::from).collect()))
}

/// The menu segment is not checked here; the dish is attached to whichever
/// menu owns the submenu.
#[instrument(skip(state, payload))]
pub async fn create_dish(
    State(state): State<AppState>,
    ApiPath((menu_id, submenu_id)): ApiPath<(Uuid, Uuid)>,
    ApiJson(payload): ApiJson<CreateDishRequest>,
) -> Result<(StatusCode, Json<DishResponse>), ApiError> {
    let new = payload.into_new()?;
    debug!(%menu_id, price = %new.price, "creating dish");
    let Some(dish) = state.catalog.create_dish(submenu_id, new).await? else {
        warn!(%submenu_id, "create dish under missing submenu");
        return Err(ApiError::NotFound(Entity::Submenu));
    };
    info!(%submenu_id, dish_id = %dish.id, "dish created");
    Ok((StatusCode::CREATED, Json(dish.into())))
}

#[instrument(skip(state))]
pub async fn get_dish(
    State(state): State<AppState>,
    ApiPath((menu_id, submenu_id, dish_id)): ApiPath<(Uuid, Uuid, Uuid)>,
) -> Result<Json<DishResponse>, ApiError> {
    match state.catalog.get_dish(menu_id, submenu_id, dish_id).await? {
        Some(dish) => Ok(Json(dish.into())),
        None => {
            warn!(%menu_id, %submenu_id, %dish_id, "dish not found");
            Err(ApiError::NotFound(Entity::Dish))
        }
    }
}

#[instrument(skip(state, payload))]
pub async fn update_dish(
    State(state): State<AppState>,
    ApiPath((menu_id, submenu_id, dish_id)): ApiPath<(Uuid, Uuid, Uuid)>,
    ApiJson(payload): ApiJson<UpdateDishRequest>,
) -> Result<Json<DishResponse>, ApiError> {
    let changes = payload.into_changes()?;
    match state
        .catalog
        .update_dish(menu_id, submenu_id, dish_id, changes)
        .await?
    {
        Some(dish) => {
            info!(%dish_id, "dish updated");
            Ok(Json(dish.into()))
        }
        None => {
            warn!(%menu_id, %submenu_id, %dish_id, "dish not found");
            Err(ApiError::NotFound(Entity::Dish))
        }
    }
}

#[instrument(skip(state))]
pub async fn delete_dish(
    State(state): State<AppState>,
    ApiPath((menu_id, submenu_id, dish_id)): ApiPath<(Uuid, Uuid, Uuid)>,
) -> Result<Json<DeletedResponse>, ApiError> {
    if !state
        .catalog
        .delete_dish(menu_id, submenu_id, dish_id)
        .await?
    {
        warn!(%menu_id, %submenu_id, %dish_id, "dish not found");
        return Err(ApiError::NotFound(Entity::Dish));
    }
    info!(%dish_id, "dish deleted");
    Ok(Json(DeletedResponse {
        message: Entity::Dish.deleted_message(),
    }))
}
