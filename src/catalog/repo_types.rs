use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Menu record in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Menu {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Submenu {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub menu_id: Uuid,
}

/// Dish record; `price` is kept exactly as the client sent it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Dish {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub price: String,
    pub submenu_id: Uuid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, FromRow)]
pub struct MenuCounts {
    pub submenus_count: i64,
    pub dishes_count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: i64,
    pub limit: i64,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 100,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewMenu {
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewSubmenu {
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewDish {
    pub title: String,
    pub description: Option<String>,
    pub price: String,
}

/// Fields a PATCH supplied. `None` leaves the column alone;
/// `description: Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct MenuChanges {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
}

impl MenuChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SubmenuChanges {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
}

impl SubmenuChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }
}

#[derive(Debug, Clone, Default)]
pub struct DishChanges {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub price: Option<String>,
}

impl DishChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.price.is_none()
    }
}
