use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    catalog::repo_types::{NewSubmenu, Submenu, SubmenuChanges},
    dto::{check_optional_text, check_text, nullable, required_change},
    error::ApiError,
};

#[derive(Debug, Deserialize)]
pub struct CreateSubmenuRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl CreateSubmenuRequest {
    pub fn into_new(self) -> Result<NewSubmenu, ApiError> {
        check_text("title", &self.title)?;
        check_optional_text("description", self.description.as_deref())?;
        Ok(NewSubmenu {
            title: self.title,
            description: self.description,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateSubmenuRequest {
    #[serde(default, deserialize_with = "nullable")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
}

impl UpdateSubmenuRequest {
    pub fn into_changes(self) -> Result<SubmenuChanges, ApiError> {
        let title = required_change("title", self.title)?;
        if let Some(t) = &title {
            check_text("title", t)?;
        }
        if let Some(d) = &self.description {
            check_optional_text("description", d.as_deref())?;
        }
        Ok(SubmenuChanges {
            title,
            description: self.description,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct SubmenuResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub menu_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dishes_count: Option<i64>,
}

impl SubmenuResponse {
    pub fn with_count(submenu: Submenu, dishes_count: i64) -> Self {
        Self {
            dishes_count: Some(dishes_count),
            ..Self::from(submenu)
        }
    }
}

impl From<Submenu> for SubmenuResponse {
    fn from(s: Submenu) -> Self {
        Self {
            id: s.id,
            title: s.title,
            description: s.description,
            menu_id: s.menu_id,
            dishes_count: None,
        }
    }
}
