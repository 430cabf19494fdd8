use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use super::{
    repo_types::{
        Dish, DishChanges, Menu, MenuChanges, MenuCounts, NewDish, NewMenu, NewSubmenu, Page,
        Submenu, SubmenuChanges,
    },
    Catalog,
};

#[derive(Default)]
struct Tables {
    menus: Vec<Menu>,
    submenus: Vec<Submenu>,
    dishes: Vec<Dish>,
}

impl Tables {
    fn submenu_of(&self, menu_id: Uuid, id: Uuid) -> Option<usize> {
        self.submenus
            .iter()
            .position(|s| s.id == id && s.menu_id == menu_id)
    }

    fn dish_of(&self, menu_id: Uuid, submenu_id: Uuid, id: Uuid) -> Option<usize> {
        self.submenu_of(menu_id, submenu_id)?;
        self.dishes
            .iter()
            .position(|d| d.id == id && d.submenu_id == submenu_id)
    }

    fn remove_submenus(&mut self, doomed: &[Uuid]) {
        self.submenus.retain(|s| !doomed.contains(&s.id));
        self.dishes.retain(|d| !doomed.contains(&d.submenu_id));
    }
}

impl MenuChanges {
    fn apply(self, menu: &mut Menu) {
        if let Some(title) = self.title {
            menu.title = title;
        }
        if let Some(description) = self.description {
            menu.description = description;
        }
    }
}

impl SubmenuChanges {
    fn apply(self, submenu: &mut Submenu) {
        if let Some(title) = self.title {
            submenu.title = title;
        }
        if let Some(description) = self.description {
            submenu.description = description;
        }
    }
}

impl DishChanges {
    fn apply(self, dish: &mut Dish) {
        if let Some(title) = self.title {
            dish.title = title;
        }
        if let Some(description) = self.description {
            dish.description = description;
        }
        if let Some(price) = self.price {
            dish.price = price;
        }
    }
}

/// In-process catalog with the same ownership and cascade rules as Postgres.
#[derive(Default)]
pub struct InMemoryCatalog {
    tables: Mutex<Tables>,
}

fn paged<T: Clone>(rows: impl Iterator<Item = T>, page: Page) -> Vec<T> {
    rows.skip(page.offset as usize)
        .take(page.limit as usize)
        .collect()
}

#[async_trait]
impl Catalog for InMemoryCatalog {
    async fn list_menus(&self, page: Page) -> anyhow::Result<Vec<Menu>> {
        let t = self.tables.lock().unwrap();
        Ok(paged(t.menus.iter().cloned(), page))
    }

    async fn get_menu(&self, id: Uuid) -> anyhow::Result<Option<Menu>> {
        let t = self.tables.lock().unwrap();
        Ok(t.menus.iter().find(|m| m.id == id).cloned())
    }

    async fn menu_counts(&self, id: Uuid) -> anyhow::Result<MenuCounts> {
        let t = self.tables.lock().unwrap();
        let submenu_ids: Vec<Uuid> = t
            .submenus
            .iter()
            .filter(|s| s.menu_id == id)
            .map(|s| s.id)
            .collect();
        let dishes = t
            .dishes
            .iter()
            .filter(|d| submenu_ids.contains(&d.submenu_id))
            .count();
        Ok(MenuCounts {
            submenus_count: submenu_ids.len() as i64,
            dishes_count: dishes as i64,
        })
    }

    async fn create_menu(&self, new: NewMenu) -> anyhow::Result<Menu> {
        let menu = Menu {
            id: Uuid::new_v4(),
            title: new.title,
            description: new.description,
        };
        self.tables.lock().unwrap().menus.push(menu.clone());
        Ok(menu)
    }

    async fn update_menu(&self, id: Uuid, changes: MenuChanges) -> anyhow::Result<Option<Menu>> {
        let mut t = self.tables.lock().unwrap();
        let Some(menu) = t.menus.iter_mut().find(|m| m.id == id) else {
            return Ok(None);
        };
        changes.apply(menu);
        Ok(Some(menu.clone()))
    }

    async fn delete_menu(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut t = self.tables.lock().unwrap();
        let before = t.menus.len();
        t.menus.retain(|m| m.id != id);
        if t.menus.len() == before {
            return Ok(false);
        }
        let doomed: Vec<Uuid> = t
            .submenus
            .iter()
            .filter(|s| s.menu_id == id)
            .map(|s| s.id)
            .collect();
        t.remove_submenus(&doomed);
        Ok(true)
    }

    async fn list_submenus(&self, menu_id: Uuid) -> anyhow::Result<Vec<Submenu>> {
        let t = self.tables.lock().unwrap();
        Ok(t.submenus
            .iter()
            .filter(|s| s.menu_id == menu_id)
            .cloned()
            .collect())
    }

    async fn get_submenu(&self, menu_id: Uuid, id: Uuid) -> anyhow::Result<Option<Submenu>> {
        let t = self.tables.lock().unwrap();
        Ok(t.submenu_of(menu_id, id).map(|i| t.submenus[i].clone()))
    }

    async fn count_dishes(&self, submenu_id: Uuid) -> anyhow::Result<i64> {
        let t = self.tables.lock().unwrap();
        Ok(t.dishes
            .iter()
            .filter(|d| d.submenu_id == submenu_id)
            .count() as i64)
    }

    async fn create_submenu(
        &self,
        menu_id: Uuid,
        new: NewSubmenu,
    ) -> anyhow::Result<Option<Submenu>> {
        let mut t = self.tables.lock().unwrap();
        if !t.menus.iter().any(|m| m.id == menu_id) {
            return Ok(None);
        }
        let submenu = Submenu {
            id: Uuid::new_v4(),
            title: new.title,
            description: new.description,
            menu_id,
        };
        t.submenus.push(submenu.clone());
        Ok(Some(submenu))
    }

    async fn update_submenu(
        &self,
        menu_id: Uuid,
        id: Uuid,
        changes: SubmenuChanges,
    ) -> anyhow::Result<Option<Submenu>> {
        let mut t = self.tables.lock().unwrap();
        let Some(i) = t.submenu_of(menu_id, id) else {
            return Ok(None);
        };
        changes.apply(&mut t.submenus[i]);
        Ok(Some(t.submenus[i].clone()))
    }

    async fn delete_submenu(&self, menu_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        let mut t = self.tables.lock().unwrap();
        if t.submenu_of(menu_id, id).is_none() {
            return Ok(false);
        }
        t.remove_submenus(&[id]);
        Ok(true)
    }

    async fn list_dishes(
        &self,
        menu_id: Uuid,
        submenu_id: Uuid,
        page: Page,
    ) -> anyhow::Result<Vec<Dish>> {
        let t = self.tables.lock().unwrap();
        if t.submenu_of(menu_id, submenu_id).is_none() {
            return Ok(Vec::new());
        }
        Ok(paged(
            t.dishes
                .iter()
                .filter(|d| d.submenu_id == submenu_id)
                .cloned(),
            page,
        ))
    }

    async fn get_dish(
        &self,
        menu_id: Uuid,
        submenu_id: Uuid,
        id: Uuid,
    ) -> anyhow::Result<Option<Dish>> {
        let t = self.tables.lock().unwrap();
        Ok(t.dish_of(menu_id, submenu_id, id)
            .map(|i| t.dishes[i].clone()))
    }

    async fn create_dish(&self, submenu_id: Uuid, new: NewDish) -> anyhow::Result<Option<Dish>> {
        let mut t = self.tables.lock().unwrap();
        if !t.submenus.iter().any(|s| s.id == submenu_id) {
            return Ok(None);
        }
        let dish = Dish {
            id: Uuid::new_v4(),
            title: new.title,
            description: new.description,
            price: new.price,
            submenu_id,
        };
        t.dishes.push(dish.clone());
        Ok(Some(dish))
    }

    async fn update_dish(
        &self,
        menu_id: Uuid,
        submenu_id: Uuid,
        id: Uuid,
        changes: DishChanges,
    ) -> anyhow::Result<Option<Dish>> {
        let mut t = self.tables.lock().unwrap();
        let Some(i) = t.dish_of(menu_id, submenu_id, id) else {
            return Ok(None);
        };
        changes.apply(&mut t.dishes[i]);
        Ok(Some(t.dishes[i].clone()))
    }

    async fn delete_dish(
        &self,
        menu_id: Uuid,
        submenu_id: Uuid,
        id: Uuid,
    ) -> anyhow::Result<bool> {
        let mut t = self.tables.lock().unwrap();
        let Some(i) = t.dish_of(menu_id, submenu_id, id) else {
            return Ok(false);
        };
        t.dishes.remove(i);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_menu(title: &str) -> NewMenu {
        NewMenu {
            title: title.into(),
            description: None,
        }
    }

    fn new_submenu(title: &str) -> NewSubmenu {
        NewSubmenu {
            title: title.into(),
            description: None,
        }
    }

    fn new_dish(title: &str, price: &str) -> NewDish {
        NewDish {
            title: title.into(),
            description: None,
            price: price.into(),
        }
    }

    #[tokio::test]
    async fn counts_follow_the_hierarchy() {
        let c = InMemoryCatalog::default();
        let menu = c.create_menu(new_menu("Lunch")).await.unwrap();
        let a = c.create_submenu(menu.id, new_submenu("Soups")).await.unwrap().unwrap();
        let b = c.create_submenu(menu.id, new_submenu("Mains")).await.unwrap().unwrap();
        c.create_dish(a.id, new_dish("Borscht", "5")).await.unwrap().unwrap();
        c.create_dish(b.id, new_dish("Steak", "20")).await.unwrap().unwrap();
        c.create_dish(b.id, new_dish("Fish", "18")).await.unwrap().unwrap();

        let counts = c.menu_counts(menu.id).await.unwrap();
        assert_eq!(counts.submenus_count, 2);
        assert_eq!(counts.dishes_count, 3);
        assert_eq!(c.count_dishes(b.id).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn deleting_a_menu_cascades() {
        let c = InMemoryCatalog::default();
        let keep = c.create_menu(new_menu("Keep")).await.unwrap();
        let kept_sub = c.create_submenu(keep.id, new_submenu("S")).await.unwrap().unwrap();
        c.create_dish(kept_sub.id, new_dish("D", "1")).await.unwrap().unwrap();

        let menu = c.create_menu(new_menu("Gone")).await.unwrap();
        let sub = c.create_submenu(menu.id, new_submenu("S")).await.unwrap().unwrap();
        let dish = c.create_dish(sub.id, new_dish("D", "1")).await.unwrap().unwrap();

        assert!(c.delete_menu(menu.id).await.unwrap());
        assert!(c.get_submenu(menu.id, sub.id).await.unwrap().is_none());
        assert!(c.get_dish(menu.id, sub.id, dish.id).await.unwrap().is_none());
        assert_eq!(c.count_dishes(sub.id).await.unwrap(), 0);
        assert_eq!(c.menu_counts(keep.id).await.unwrap().dishes_count, 1);
        assert!(!c.delete_menu(menu.id).await.unwrap());
    }

    #[tokio::test]
    async fn ownership_is_checked_on_nested_lookups() {
        let c = InMemoryCatalog::default();
        let m1 = c.create_menu(new_menu("One")).await.unwrap();
        let m2 = c.create_menu(new_menu("Two")).await.unwrap();
        let sub = c.create_submenu(m1.id, new_submenu("S")).await.unwrap().unwrap();
        let dish = c.create_dish(sub.id, new_dish("D", "1")).await.unwrap().unwrap();

        assert!(c.get_submenu(m2.id, sub.id).await.unwrap().is_none());
        assert!(c.get_dish(m2.id, sub.id, dish.id).await.unwrap().is_none());
        assert!(!c.delete_dish(m2.id, sub.id, dish.id).await.unwrap());
        assert!(c.get_dish(m1.id, sub.id, dish.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn creating_under_missing_parent_yields_none() {
        let c = InMemoryCatalog::default();
        assert!(c
            .create_submenu(Uuid::new_v4(), new_submenu("S"))
            .await
            .unwrap()
            .is_none());
        assert!(c
            .create_dish(Uuid::new_v4(), new_dish("D", "1"))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn partial_update_keeps_unsent_fields() {
        let c = InMemoryCatalog::default();
        let menu = c
            .create_menu(NewMenu {
                title: "Lunch".into(),
                description: Some("Midday menu".into()),
            })
            .await
            .unwrap();

        let renamed = c
            .update_menu(
                menu.id,
                MenuChanges {
                    title: Some("Dinner".into()),
                    description: None,
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(renamed.title, "Dinner");
        assert_eq!(renamed.description.as_deref(), Some("Midday menu"));

        let cleared = c
            .update_menu(
                menu.id,
                MenuChanges {
                    title: None,
                    description: Some(None),
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(cleared.title, "Dinner");
        assert_eq!(cleared.description, None);

        assert!(c
            .update_menu(Uuid::new_v4(), MenuChanges::default())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn dish_price_update() {
        let c = InMemoryCatalog::default();
        let menu = c.create_menu(new_menu("Lunch")).await.unwrap();
        let sub = c.create_submenu(menu.id, new_submenu("S")).await.unwrap().unwrap();
        let dish = c.create_dish(sub.id, new_dish("Soup", "4.5")).await.unwrap().unwrap();

        let changes = DishChanges {
            price: Some("5".into()),
            ..Default::default()
        };
        let updated = c
            .update_dish(menu.id, sub.id, dish.id, changes)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.price, "5");
        assert_eq!(updated.title, "Soup");
    }

    #[tokio::test]
    async fn list_menus_pages() {
        let c = InMemoryCatalog::default();
        for i in 0..5 {
            c.create_menu(new_menu(&format!("m{i}"))).await.unwrap();
        }
        let page = c.list_menus(Page { offset: 1, limit: 2 }).await.unwrap();
        let titles: Vec<_> = page.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, ["m1", "m2"]);
        assert_eq!(c.list_menus(Page::default()).await.unwrap().len(), 5);
    }
}
