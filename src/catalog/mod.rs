#[cfg(test)]
pub mod memory;
pub mod pg;
pub mod repo_types;

use async_trait::async_trait;
use uuid::Uuid;

use repo_types::{
    Dish, DishChanges, Menu, MenuChanges, MenuCounts, NewDish, NewMenu, NewSubmenu, Page,
    Submenu, SubmenuChanges,
};

/// Storage for the Menu -> Submenu -> Dish hierarchy.
///
/// Lookups scoped by parent ids return `None` when the row is missing or
/// belongs to another parent. Creates return `None` when the parent row
/// does not exist. Deleting a row removes its descendants.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn list_menus(&self, page: Page) -> anyhow::Result<Vec<Menu>>;
    async fn get_menu(&self, id: Uuid) -> anyhow::Result<Option<Menu>>;
    async fn menu_counts(&self, id: Uuid) -> anyhow::Result<MenuCounts>;
    async fn create_menu(&self, new: NewMenu) -> anyhow::Result<Menu>;
    async fn update_menu(&self, id: Uuid, changes: MenuChanges) -> anyhow::Result<Option<Menu>>;
    async fn delete_menu(&self, id: Uuid) -> anyhow::Result<bool>;

    async fn list_submenus(&self, menu_id: Uuid) -> anyhow::Result<Vec<Submenu>>;
    async fn get_submenu(&self, menu_id: Uuid, id: Uuid) -> anyhow::Result<Option<Submenu>>;
    async fn count_dishes(&self, submenu_id: Uuid) -> anyhow::Result<i64>;
    async fn create_submenu(&self, menu_id: Uuid, new: NewSubmenu)
        -> anyhow::Result<Option<Submenu>>;
    async fn update_submenu(
        &self,
        menu_id: Uuid,
        id: Uuid,
        changes: SubmenuChanges,
    ) -> anyhow::Result<Option<Submenu>>;
    async fn delete_submenu(&self, menu_id: Uuid, id: Uuid) -> anyhow::Result<bool>;

    async fn list_dishes(
        &self,
        menu_id: Uuid,
        submenu_id: Uuid,
        page: Page,
    ) -> anyhow::Result<Vec<Dish>>;
    async fn get_dish(
        &self,
        menu_id: Uuid,
        submenu_id: Uuid,
        id: Uuid,
    ) -> anyhow::Result<Option<Dish>>;
    async fn create_dish(&self, submenu_id: Uuid, new: NewDish) -> anyhow::Result<Option<Dish>>;
    async fn update_dish(
        &self,
        menu_id: Uuid,
        submenu_id: Uuid,
        id: Uuid,
        changes: DishChanges,
    ) -> anyhow::Result<Option<Dish>>;
    async fn delete_dish(&self, menu_id: Uuid, submenu_id: Uuid, id: Uuid)
        -> anyhow::Result<bool>;
}
