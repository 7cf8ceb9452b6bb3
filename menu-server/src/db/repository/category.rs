//! Category Repository

use super::{RepoError, RepoResult};
use shared::error::ErrorCode;
use shared::i18n::{Lang, LocalizedText};
use shared::models::{Category, CategoryCreate, CategoryUpdate};
use shared::slug::{self, CATEGORY_SLUG_MAX};
use sqlx::SqlitePool;

const SELECT: &str = "SELECT id, name_ru, name_kk, name_en, description_ru, description_kk, description_en, slug, position, image, show_in_nav, nav_position, is_21plus FROM categories";

/// Navigation and listing order
const ORDER_BY: &str = "ORDER BY nav_position, position, id";

#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: i64,
    name_ru: String,
    name_kk: String,
    name_en: String,
    description_ru: String,
    description_kk: String,
    description_en: String,
    slug: Option<String>,
    position: i32,
    image: Option<String>,
    show_in_nav: bool,
    nav_position: i32,
    is_21plus: bool,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: row.id,
            name: LocalizedText::from_parts(row.name_ru, row.name_kk, row.name_en),
            description: LocalizedText::from_parts(
                row.description_ru,
                row.description_kk,
                row.description_en,
            ),
            slug: row.slug.unwrap_or_default(),
            position: row.position,
            image: row.image.filter(|s| !s.is_empty()),
            show_in_nav: row.show_in_nav,
            nav_position: row.nav_position,
            is_21plus: row.is_21plus,
        }
    }
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Category>> {
    let rows = sqlx::query_as::<_, CategoryRow>(&format!("{SELECT} {ORDER_BY}"))
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

/// Categories flagged for the navigation bar
pub async fn find_nav(pool: &SqlitePool) -> RepoResult<Vec<Category>> {
    let rows =
        sqlx::query_as::<_, CategoryRow>(&format!("{SELECT} WHERE show_in_nav = 1 {ORDER_BY}"))
            .fetch_all(pool)
            .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Category>> {
    let row = sqlx::query_as::<_, CategoryRow>(&format!("{SELECT} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Into::into))
}

pub async fn find_by_slug(pool: &SqlitePool, slug: &str) -> RepoResult<Option<Category>> {
    let row = sqlx::query_as::<_, CategoryRow>(&format!("{SELECT} WHERE slug = ? LIMIT 1"))
        .bind(slug)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Into::into))
}

/// Whether any 21+ category exists
pub async fn any_21plus(pool: &SqlitePool) -> RepoResult<bool> {
    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM categories WHERE is_21plus = 1)")
            .fetch_one(pool)
            .await?;
    Ok(exists)
}

/// Cover image path: the category's own image, else the first dish image
/// (by position, id). Lookup failures degrade to `None`.
pub async fn cover_image(pool: &SqlitePool, category: &Category) -> Option<String> {
    if let Some(image) = &category.image {
        return Some(image.clone());
    }
    let first = sqlx::query_scalar::<_, String>(
        "SELECT image FROM dishes WHERE category_id = ? AND image IS NOT NULL AND image != '' ORDER BY position, id LIMIT 1",
    )
    .bind(category.id)
    .fetch_optional(pool)
    .await;
    match first {
        Ok(image) => image,
        Err(e) => {
            tracing::warn!(category_id = category.id, error = %e, "Cover image lookup failed");
            None
        }
    }
}

/// Create a category
///
/// Without an explicit slug one is derived from the name; a category with no
/// name at all gets `cat-<id>`.
pub async fn create(pool: &SqlitePool, data: CategoryCreate) -> RepoResult<Category> {
    let slug = slug::initial_slug(data.slug.as_deref(), &data.name, CATEGORY_SLUG_MAX);

    let mut tx = pool.begin().await?;
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO categories (name_ru, name_kk, name_en, description_ru, description_kk, description_en, slug, position, image, show_in_nav, nav_position, is_21plus) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(data.name.get(Lang::Ru))
    .bind(data.name.get(Lang::Kk))
    .bind(data.name.get(Lang::En))
    .bind(data.description.get(Lang::Ru))
    .bind(data.description.get(Lang::Kk))
    .bind(data.description.get(Lang::En))
    .bind(&slug)
    .bind(data.position.unwrap_or(0))
    .bind(data.image.filter(|s| !s.is_empty()))
    .bind(data.show_in_nav.unwrap_or(true))
    .bind(data.nav_position.unwrap_or(0))
    .bind(data.is_21plus.unwrap_or(false))
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| duplicate_slug(e, slug.as_deref()))?;

    if slug.is_none() {
        sqlx::query("UPDATE categories SET slug = ? WHERE id = ?")
            .bind(slug::placeholder("cat", id))
            .bind(id)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create category".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: CategoryUpdate) -> RepoResult<Category> {
    let slug = match data.slug.as_deref() {
        Some(raw) => {
            let s = slug::slugify_truncated(raw, CATEGORY_SLUG_MAX);
            if s.is_empty() {
                return Err(RepoError::Validation(format!("Invalid slug: {raw:?}")));
            }
            Some(s)
        }
        None => None,
    };
    let name = data.name.as_ref();
    let description = data.description.as_ref();

    let rows = sqlx::query(
        "UPDATE categories SET \
            name_ru = COALESCE(?1, name_ru), name_kk = COALESCE(?2, name_kk), name_en = COALESCE(?3, name_en), \
            description_ru = COALESCE(?4, description_ru), description_kk = COALESCE(?5, description_kk), description_en = COALESCE(?6, description_en), \
            slug = COALESCE(?7, slug), position = COALESCE(?8, position), \
            image = CASE WHEN ?9 IS NULL THEN image ELSE NULLIF(?9, '') END, \
            show_in_nav = COALESCE(?10, show_in_nav), nav_position = COALESCE(?11, nav_position), \
            is_21plus = COALESCE(?12, is_21plus) \
         WHERE id = ?13",
    )
    .bind(name.map(|n| n.get(Lang::Ru).to_string()))
    .bind(name.map(|n| n.get(Lang::Kk).to_string()))
    .bind(name.map(|n| n.get(Lang::En).to_string()))
    .bind(description.map(|d| d.get(Lang::Ru).to_string()))
    .bind(description.map(|d| d.get(Lang::Kk).to_string()))
    .bind(description.map(|d| d.get(Lang::En).to_string()))
    .bind(&slug)
    .bind(data.position)
    .bind(data.image)
    .bind(data.show_in_nav)
    .bind(data.nav_position)
    .bind(data.is_21plus)
    .bind(id)
    .execute(pool)
    .await
    .map_err(|e| duplicate_slug(e, slug.as_deref()))?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Category {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Category {id} not found")))
}

/// Delete a category; refused while dishes still reference it
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM dishes WHERE category_id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    if count > 0 {
        return Err(RepoError::Business(
            ErrorCode::CategoryHasDishes,
            format!("Category {id} still has {count} dishes"),
        ));
    }
    let rows = sqlx::query("DELETE FROM categories WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Category {id} not found")));
    }
    Ok(true)
}

fn duplicate_slug(err: sqlx::Error, slug: Option<&str>) -> RepoError {
    match RepoError::from(err) {
        RepoError::Duplicate(_) => RepoError::Business(
            ErrorCode::SlugExists,
            format!("Slug '{}' is already used", slug.unwrap_or_default()),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::testing::test_pool;

    fn named(ru: &str) -> CategoryCreate {
        CategoryCreate {
            name: LocalizedText::from_parts(ru, "", ""),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_slug_from_russian_name() {
        let (pool, _dir) = test_pool().await;
        let c = create(&pool, named("Десерты")).await.unwrap();
        assert_eq!(c.slug, "deserty");
        assert_eq!(find_by_slug(&pool, "deserty").await.unwrap().unwrap().id, c.id);
    }

    #[tokio::test]
    async fn test_placeholder_slug_without_name() {
        let (pool, _dir) = test_pool().await;
        let c = create(&pool, CategoryCreate::default()).await.unwrap();
        assert_eq!(c.slug, format!("cat-{}", c.id));
    }

    #[tokio::test]
    async fn test_duplicate_slug_rejected() {
        let (pool, _dir) = test_pool().await;
        create(&pool, named("Супы")).await.unwrap();
        let err = create(&pool, named("Супы")).await.unwrap_err();
        assert!(matches!(err, RepoError::Business(ErrorCode::SlugExists, _)));
    }

    #[tokio::test]
    async fn test_navigation_order() {
        let (pool, _dir) = test_pool().await;
        let mut b = named("Б");
        b.nav_position = Some(2);
        let mut a = named("А");
        a.nav_position = Some(1);
        a.position = Some(5);
        let mut hidden = named("Скрытая");
        hidden.show_in_nav = Some(false);
        create(&pool, b).await.unwrap();
        create(&pool, a).await.unwrap();
        create(&pool, hidden).await.unwrap();

        let nav: Vec<String> = find_nav(&pool)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name.get(Lang::Ru).to_string())
            .collect();
        assert_eq!(nav, vec!["А", "Б"]);
        assert_eq!(find_all(&pool).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_update_keeps_unspecified_fields() {
        let (pool, _dir) = test_pool().await;
        let c = create(&pool, named("Пиво")).await.unwrap();
        let updated = update(
            &pool,
            c.id,
            CategoryUpdate {
                is_21plus: Some(true),
                image: Some("categories/beer.jpg".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert!(updated.is_21plus);
        assert_eq!(updated.slug, "pivo");
        assert_eq!(updated.image.as_deref(), Some("categories/beer.jpg"));
        assert!(any_21plus(&pool).await.unwrap());

        let cleared = update(
            &pool,
            c.id,
            CategoryUpdate {
                image: Some(String::new()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(cleared.image, None);
    }

    #[tokio::test]
    async fn test_update_missing_category() {
        let (pool, _dir) = test_pool().await;
        let err = update(&pool, 404, CategoryUpdate::default()).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }
}
