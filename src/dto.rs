//! Request pieces shared by the menu, submenu and dish bodies.

use serde::{Deserialize, Deserializer, Serialize};

use crate::{catalog::repo_types::Page, error::ApiError};

pub const MAX_TEXT_LEN: usize = 255;

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default, alias = "offset")]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}
fn default_limit() -> i64 {
    100
}

impl Pagination {
    pub fn into_page(self) -> Result<Page, ApiError> {
        if self.skip < 0 {
            return Err(ApiError::Validation("skip must be non-negative".into()));
        }
        if self.limit < 0 {
            return Err(ApiError::Validation("limit must be non-negative".into()));
        }
        Ok(Page {
            offset: self.skip,
            limit: self.limit,
        })
    }
}

/// Keeps an explicit `null` apart from a missing key: missing stays `None`
/// (via `#[serde(default)]`), `null` becomes `Some(None)`.
pub fn nullable<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

pub fn check_text(field: &str, value: &str) -> Result<(), ApiError> {
    if value.chars().count() > MAX_TEXT_LEN {
        return Err(ApiError::Validation(format!(
            "{field} must be at most {MAX_TEXT_LEN} characters"
        )));
    }
    Ok(())
}

pub fn check_optional_text(field: &str, value: Option<&str>) -> Result<(), ApiError> {
    match value {
        Some(v) => check_text(field, v),
        None => Ok(()),
    }
}

/// A PATCH field that may be omitted but not nulled.
pub fn required_change<T>(field: &str, value: Option<Option<T>>) -> Result<Option<T>, ApiError> {
    match value {
        Some(None) => Err(ApiError::Validation(format!("{field} may not be null"))),
        Some(Some(v)) => Ok(Some(v)),
        None => Ok(None),
    }
}
