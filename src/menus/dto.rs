use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    catalog::repo_types::{Menu, MenuChanges, MenuCounts, NewMenu},
    dto::{check_optional_text, check_text, nullable, required_change},
    error::ApiError,
};

/// Request body for POST /menus. Client-supplied counts are ignored.
#[derive(Debug, Deserialize)]
pub struct CreateMenuRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl CreateMenuRequest {
    pub fn into_new(self) -> Result<NewMenu, ApiError> {
        check_text("title", &self.title)?;
        check_optional_text("description", self.description.as_deref())?;
        Ok(NewMenu {
            title: self.title,
            description: self.description,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateMenuRequest {
    #[serde(default, deserialize_with = "nullable")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
}

impl UpdateMenuRequest {
    pub fn into_changes(self) -> Result<MenuChanges, ApiError> {
        let title = required_change("title", self.title)?;
        if let Some(t) = &title {
            check_text("title", t)?;
        }
        if let Some(d) = &self.description {
            check_optional_text("description", d.as_deref())?;
        }
        Ok(MenuChanges {
            title,
            description: self.description,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct MenuResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submenus_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dishes_count: Option<i64>,
}

impl MenuResponse {
    pub fn with_counts(menu: Menu, counts: MenuCounts) -> Self {
        Self {
            submenus_count: Some(counts.submenus_count),
            dishes_count: Some(counts.dishes_count),
            ..Self::from(menu)
        }
    }
}

impl From<Menu> for MenuResponse {
    fn from(m: Menu) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            submenus_count: None,
            dishes_count: None,
        }
    }
}
