use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    catalog::repo_types::{Dish, DishChanges, NewDish},
    dto::{check_optional_text, check_text, nullable, required_change},
    error::ApiError,
};

use super::services::{format_price, validate_price};

/// Price as sent by the client. Numbers are kept in their textual form.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    Text(String),
    Number(serde_json::Number),
}

impl PriceInput {
    fn into_checked(self) -> Result<String, ApiError> {
        let raw = match self {
            PriceInput::Text(s) => s,
            PriceInput::Number(n) => n.to_string(),
        };
        check_text("price", &raw)?;
        validate_price(&raw)?;
        Ok(raw)
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateDishRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: PriceInput,
}

impl CreateDishRequest {
    pub fn into_new(self) -> Result<NewDish, ApiError> {
        check_text("title", &self.title)?;
        check_optional_text("description", self.description.as_deref())?;
        Ok(NewDish {
            title: self.title,
            description: self.description,
            price: self.price.into_checked()?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateDishRequest {
    #[serde(default, deserialize_with = "nullable")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub price: Option<Option<PriceInput>>,
}

impl UpdateDishRequest {
    pub fn into_changes(self) -> Result<DishChanges, ApiError> {
        let title = required_change("title", self.title)?;
        if let Some(t) = &title {
            check_text("title", t)?;
        }
        if let Some(d) = &self.description {
            check_optional_text("description", d.as_deref())?;
        }
        let price = required_change("price", self.price)?
            .map(PriceInput::into_checked)
            .transpose()?;
        Ok(DishChanges {
            title,
            description: self.description,
            price,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct DishResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub price: String,
    pub submenu_id: Uuid,
}

impl From<Dish> for DishResponse {
    fn from(d: Dish) -> Self {
        Self {
            price: format_price(&d.price),
            id: d.id,
            title: d.title,
            description: d.description,
            submenu_id: d.submenu_id,
        }
    }
}
