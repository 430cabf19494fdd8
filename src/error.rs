use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Catalog entity kinds, used for not-found details and delete confirmations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Menu,
    Submenu,
    Dish,
}

impl Entity {
    pub fn name(self) -> &'static str {
        match self {
            Entity::Menu => "menu",
            Entity::Submenu => "submenu",
            Entity::Dish => "dish",
        }
    }

    pub fn deleted_message(self) -> String {
        match self {
            Entity::Menu => "Menu deleted successfully".into(),
            Entity::Submenu => "Submenu deleted successfully".into(),
            Entity::Dish => "Dish deleted successfully".into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{} not found", .0.name())]
    NotFound(Entity),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Validation(msg) => {
                tracing::warn!(detail = %msg, "request rejected");
                (StatusCode::UNPROCESSABLE_ENTITY, msg.clone())
            }
            ApiError::Internal(e) => {
                tracing::error!(error = ?e, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };
        (status, Json(ErrorBody { detail })).into_response()
    }
}
