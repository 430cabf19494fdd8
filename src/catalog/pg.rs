use anyhow::Context;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;
use uuid::Uuid;

use super::{
    repo_types::{
        Dish, DishChanges, Menu, MenuChanges, MenuCounts, NewDish, NewMenu, NewSubmenu, Page,
        Submenu, SubmenuChanges,
    },
    Catalog,
};

/// Postgres-backed catalog. Cascades are declared on the foreign keys.
#[derive(Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn is_missing_parent(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}

#[async_trait]
impl Catalog for PgCatalog {
    async fn list_menus(&self, page: Page) -> anyhow::Result<Vec<Menu>> {
        let rows = sqlx::query_as::<_, Menu>(
            r#"
            SELECT id, title, description
            FROM menu
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await
        .context("list menus")?;
        Ok(rows)
    }

    async fn get_menu(&self, id: Uuid) -> anyhow::Result<Option<Menu>> {
        let menu = sqlx::query_as::<_, Menu>(
            r#"SELECT id, title, description FROM menu WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("get menu")?;
        Ok(menu)
    }

    async fn menu_counts(&self, id: Uuid) -> anyhow::Result<MenuCounts> {
        let counts = sqlx::query_as::<_, MenuCounts>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM submenu s WHERE s.menu_id = $1) AS submenus_count,
                (SELECT COUNT(*)
                   FROM dish d
                   JOIN submenu s ON s.id = d.submenu_id
                  WHERE s.menu_id = $1) AS dishes_count
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .context("count menu children")?;
        Ok(counts)
    }

    async fn create_menu(&self, new: NewMenu) -> anyhow::Result<Menu> {
        let menu = sqlx::query_as::<_, Menu>(
            r#"
            INSERT INTO menu (id, title, description)
            VALUES ($1, $2, $3)
            RETURNING id, title, description
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.title)
        .bind(new.description)
        .fetch_one(&self.pool)
        .await
        .context("insert menu")?;
        Ok(menu)
    }

    async fn update_menu(&self, id: Uuid, changes: MenuChanges) -> anyhow::Result<Option<Menu>> {
        if changes.is_empty() {
            return self.get_menu(id).await;
        }

        let mut qb = QueryBuilder::<Postgres>::new("UPDATE menu SET ");
        let mut set = qb.separated(", ");
        if let Some(title) = changes.title {
            set.push("title = ").push_bind_unseparated(title);
        }
        if let Some(description) = changes.description {
            set.push("description = ").push_bind_unseparated(description);
        }
        qb.push(" WHERE id = ")
            .push_bind(id)
            .push(" RETURNING id, title, description");

        debug!(sql = qb.sql(), "update menu");
        let menu = qb
            .build_query_as::<Menu>()
            .fetch_optional(&self.pool)
            .await
            .context("update menu")?;
        Ok(menu)
    }

    async fn delete_menu(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query(r#"DELETE FROM menu WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await
            .context("delete menu")?;
        Ok(res.rows_affected() > 0)
    }

    async fn list_submenus(&self, menu_id: Uuid) -> anyhow::Result<Vec<Submenu>> {
        let rows = sqlx::query_as::<_, Submenu>(
            r#"
            SELECT id, title, description, menu_id
            FROM submenu
            WHERE menu_id = $1
            ORDER BY id
            "#,
        )
        .bind(menu_id)
        .fetch_all(&self.pool)
        .await
        .context("list submenus")?;
        Ok(rows)
    }

    async fn get_submenu(&self, menu_id: Uuid, id: Uuid) -> anyhow::Result<Option<Submenu>> {
        let submenu = sqlx::query_as::<_, Submenu>(
            r#"
            SELECT id, title, description, menu_id
            FROM submenu
            WHERE id = $1 AND menu_id = $2
            "#,
        )
        .bind(id)
        .bind(menu_id)
        .fetch_optional(&self.pool)
        .await
        .context("get submenu")?;
        Ok(submenu)
    }

    async fn count_dishes(&self, submenu_id: Uuid) -> anyhow::Result<i64> {
        let count =
            sqlx::query_scalar::<_, i64>(r#"SELECT COUNT(*) FROM dish WHERE submenu_id = $1"#)
                .bind(submenu_id)
                .fetch_one(&self.pool)
                .await
                .context("count submenu dishes")?;
        Ok(count)
    }

    async fn create_submenu(
        &self,
        menu_id: Uuid,
        new: NewSubmenu,
    ) -> anyhow::Result<Option<Submenu>> {
        let res = sqlx::query_as::<_, Submenu>(
            r#"
            INSERT INTO submenu (id, title, description, menu_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, description, menu_id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.title)
        .bind(new.description)
        .bind(menu_id)
        .fetch_one(&self.pool)
        .await;

        match res {
            Ok(submenu) => Ok(Some(submenu)),
            Err(e) if is_missing_parent(&e) => Ok(None),
            Err(e) => Err(anyhow::Error::new(e).context("insert submenu")),
        }
    }

    async fn update_submenu(
        &self,
        menu_id: Uuid,
        id: Uuid,
        changes: SubmenuChanges,
    ) -> anyhow::Result<Option<Submenu>> {
        if changes.is_empty() {
            return self.get_submenu(menu_id, id).await;
        }

        let mut qb = QueryBuilder::<Postgres>::new("UPDATE submenu SET ");
        let mut set = qb.separated(", ");
        if let Some(title) = changes.title {
            set.push("title = ").push_bind_unseparated(title);
        }
        if let Some(description) = changes.description {
            set.push("description = ").push_bind_unseparated(description);
        }
        qb.push(" WHERE id = ")
            .push_bind(id)
            .push(" AND menu_id = ")
            .push_bind(menu_id)
            .push(" RETURNING id, title, description, menu_id");

        debug!(sql = qb.sql(), "update submenu");
        let submenu = qb
            .build_query_as::<Submenu>()
            .fetch_optional(&self.pool)
            .await
            .context("update submenu")?;
        Ok(submenu)
    }

    async fn delete_submenu(&self, menu_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query(r#"DELETE FROM submenu WHERE id = $1 AND menu_id = $2"#)
            .bind(id)
            .bind(menu_id)
            .execute(&self.pool)
            .await
            .context("delete submenu")?;
        Ok(res.rows_affected() > 0)
    }

    async fn list_dishes(
        &self,
        menu_id: Uuid,
        submenu_id: Uuid,
        page: Page,
    ) -> anyhow::Result<Vec<Dish>> {
        let rows = sqlx::query_as::<_, Dish>(
            r#"
            SELECT d.id, d.title, d.description, d.price, d.submenu_id
            FROM dish d
            JOIN submenu s ON s.id = d.submenu_id
            WHERE d.submenu_id = $1 AND s.menu_id = $2
            ORDER BY d.id
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(submenu_id)
        .bind(menu_id)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await
        .context("list dishes")?;
        Ok(rows)
    }

    async fn get_dish(
        &self,
        menu_id: Uuid,
        submenu_id: Uuid,
        id: Uuid,
    ) -> anyhow::Result<Option<Dish>> {
        let dish = sqlx::query_as::<_, Dish>(
            r#"
            SELECT d.id, d.title, d.description, d.price, d.submenu_id
            FROM dish d
            JOIN submenu s ON s.id = d.submenu_id
            JOIN menu m ON m.id = s.menu_id
            WHERE d.id = $1 AND s.id = $2 AND m.id = $3
            "#,
        )
        .bind(id)
        .bind(submenu_id)
        .bind(menu_id)
        .fetch_optional(&self.pool)
        .await
        .context("get dish")?;
        Ok(dish)
    }

    async fn create_dish(&self, submenu_id: Uuid, new: NewDish) -> anyhow::Result<Option<Dish>> {
        let res = sqlx::query_as::<_, Dish>(
            r#"
            INSERT INTO dish (id, title, description, price, submenu_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, description, price, submenu_id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.title)
        .bind(new.description)
        .bind(new.price)
        .bind(submenu_id)
        .fetch_one(&self.pool)
        .await;

        match res {
            Ok(dish) => Ok(Some(dish)),
            Err(e) if is_missing_parent(&e) => Ok(None),
            Err(e) => Err(anyhow::Error::new(e).context("insert dish")),
        }
    }

    async fn update_dish(
        &self,
        menu_id: Uuid,
        submenu_id: Uuid,
        id: Uuid,
        changes: DishChanges,
    ) -> anyhow::Result<Option<Dish>> {
        if changes.is_empty() {
            return self.get_dish(menu_id, submenu_id, id).await;
        }

        let mut qb = QueryBuilder::<Postgres>::new("UPDATE dish SET ");
        let mut set = qb.separated(", ");
        if let Some(title) = changes.title {
            set.push("title = ").push_bind_unseparated(title);
        }
        if let Some(description) = changes.description {
            set.push("description = ").push_bind_unseparated(description);
        }
        if let Some(price) = changes.price {
            set.push("price = ").push_bind_unseparated(price);
        }
        qb.push(" FROM submenu WHERE dish.id = ")
            .push_bind(id)
            .push(" AND dish.submenu_id = ")
            .push_bind(submenu_id)
            .push(" AND submenu.id = dish.submenu_id AND submenu.menu_id = ")
            .push_bind(menu_id)
            .push(" RETURNING dish.id, dish.title, dish.description, dish.price, dish.submenu_id");

        debug!(sql = qb.sql(), "update dish");
        let dish = qb
            .build_query_as::<Dish>()
            .fetch_optional(&self.pool)
            .await
            .context("update dish")?;
        Ok(dish)
    }

    async fn delete_dish(
        &self,
        menu_id: Uuid,
        submenu_id: Uuid,
        id: Uuid,
    ) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            DELETE FROM dish
            USING submenu
            WHERE dish.id = $1
              AND dish.submenu_id = $2
              AND submenu.id = dish.submenu_id
              AND submenu.menu_id = $3
            "#,
        )
        .bind(id)
        .bind(submenu_id)
        .bind(menu_id)
        .execute(&self.pool)
        .await
        .context("delete dish")?;
        Ok(res.rows_affected() > 0)
    }
}
