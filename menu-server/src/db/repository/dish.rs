//! Dish Repository

use super::{RepoError, RepoResult, parse_money};
use shared::error::ErrorCode;
use shared::i18n::{Lang, LocalizedText};
use shared::models::{Dish, DishCreate, DishUpdate};
use shared::order::normalize_price;
use shared::slug::{self, DISH_SLUG_MAX};
use sqlx::SqlitePool;

const SELECT: &str = "SELECT d.id, d.category_id, d.name_ru, d.name_kk, d.name_en, d.description_ru, d.description_kk, d.description_en, d.slug, d.base_price, d.image, d.passport_bg, d.is_available, d.position, c.is_21plus AS requires_21 \
     FROM dishes d JOIN categories c ON c.id = d.category_id";

#[derive(Debug, sqlx::FromRow)]
struct DishRow {
    id: i64,
    category_id: i64,
    name_ru: String,
    name_kk: String,
    name_en: String,
    description_ru: String,
    description_kk: String,
    description_en: String,
    slug: Option<String>,
    base_price: String,
    image: Option<String>,
    passport_bg: Option<String>,
    is_available: bool,
    position: i32,
    requires_21: bool,
}

impl DishRow {
    fn into_dish(self) -> RepoResult<Dish> {
        Ok(Dish {
            id: self.id,
            category_id: self.category_id,
            name: LocalizedText::from_parts(self.name_ru, self.name_kk, self.name_en),
            description: LocalizedText::from_parts(
                self.description_ru,
                self.description_kk,
                self.description_en,
            ),
            slug: self.slug.unwrap_or_default(),
            price: parse_money(&self.base_price)?,
            is_available: self.is_available,
            position: self.position,
            image: self.image.filter(|s| !s.is_empty()),
            passport_bg: self.passport_bg.filter(|s| !s.is_empty()),
            requires_21: self.requires_21,
        })
    }
}

fn into_dishes(rows: Vec<DishRow>) -> RepoResult<Vec<Dish>> {
    rows.into_iter().map(DishRow::into_dish).collect()
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Dish>> {
    let row = sqlx::query_as::<_, DishRow>(&format!("{SELECT} WHERE d.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    row.map(DishRow::into_dish).transpose()
}

pub async fn find_by_slug(pool: &SqlitePool, slug: &str) -> RepoResult<Option<Dish>> {
    let row = sqlx::query_as::<_, DishRow>(&format!("{SELECT} WHERE d.slug = ? LIMIT 1"))
        .bind(slug)
        .fetch_optional(pool)
        .await?;
    row.map(DishRow::into_dish).transpose()
}

/// Dishes of one category by (position, id); `available_only` hides
/// dishes switched off by staff
pub async fn find_by_category(
    pool: &SqlitePool,
    category_id: i64,
    available_only: bool,
) -> RepoResult<Vec<Dish>> {
    let filter = if available_only {
        " AND d.is_available = 1"
    } else {
        ""
    };
    let rows = sqlx::query_as::<_, DishRow>(&format!(
        "{SELECT} WHERE d.category_id = ?{filter} ORDER BY d.position, d.id"
    ))
    .bind(category_id)
    .fetch_all(pool)
    .await?;
    into_dishes(rows)
}

/// Every dish, grouped by category order then (position, id)
pub async fn find_all(pool: &SqlitePool, available_only: bool) -> RepoResult<Vec<Dish>> {
    let filter = if available_only {
        " WHERE d.is_available = 1"
    } else {
        ""
    };
    let rows = sqlx::query_as::<_, DishRow>(&format!(
        "{SELECT}{filter} ORDER BY c.nav_position, c.position, c.id, d.position, d.id"
    ))
    .fetch_all(pool)
    .await?;
    into_dishes(rows)
}

/// Available dishes ranked by how many order lines reference them, ties by
/// (position, id). With no orders yet this is plain position order.
pub async fn find_popular(pool: &SqlitePool, limit: i64) -> RepoResult<Vec<Dish>> {
    let rows = sqlx::query_as::<_, DishRow>(&format!(
        "{SELECT} LEFT JOIN (SELECT dish_id, COUNT(*) AS times FROM order_items GROUP BY dish_id) t ON t.dish_id = d.id \
         WHERE d.is_available = 1 \
         ORDER BY COALESCE(t.times, 0) DESC, d.position, d.id LIMIT ?"
    ))
    .bind(limit)
    .fetch_all(pool)
    .await?;
    into_dishes(rows)
}

/// Create a dish
///
/// The price is validated and stored at 2 decimal places. Without a name or
/// explicit slug the dish gets `dish-<id>`.
pub async fn create(pool: &SqlitePool, data: DishCreate) -> RepoResult<Dish> {
    let price = normalize_price(data.price)
        .map_err(|e| RepoError::Business(ErrorCode::InvalidPrice, e.to_string()))?;
    let slug = slug::initial_slug(data.slug.as_deref(), &data.name, DISH_SLUG_MAX);

    let mut tx = pool.begin().await?;
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO dishes (category_id, name_ru, name_kk, name_en, description_ru, description_kk, description_en, slug, base_price, image, passport_bg, is_available, position) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(data.category_id)
    .bind(data.name.get(Lang::Ru))
    .bind(data.name.get(Lang::Kk))
    .bind(data.name.get(Lang::En))
    .bind(data.description.get(Lang::Ru))
    .bind(data.description.get(Lang::Kk))
    .bind(data.description.get(Lang::En))
    .bind(&slug)
    .bind(price.to_string())
    .bind(data.image.filter(|s| !s.is_empty()))
    .bind(data.passport_bg.filter(|s| !s.is_empty()))
    .bind(data.is_available.unwrap_or(true))
    .bind(data.position.unwrap_or(0))
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| map_write_error(e, data.category_id, slug.as_deref()))?;

    if slug.is_none() {
        sqlx::query("UPDATE dishes SET slug = ? WHERE id = ?")
            .bind(slug::placeholder("dish", id))
            .bind(id)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create dish".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: DishUpdate) -> RepoResult<Dish> {
    let price = data
        .price
        .map(normalize_price)
        .transpose()
        .map_err(|e| RepoError::Business(ErrorCode::InvalidPrice, e.to_string()))?;
    let slug = match data.slug.as_deref() {
        Some(raw) => {
            let s = slug::slugify_truncated(raw, DISH_SLUG_MAX);
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
        "UPDATE dishes SET \
            category_id = COALESCE(?1, category_id), \
            name_ru = COALESCE(?2, name_ru), name_kk = COALESCE(?3, name_kk), name_en = COALESCE(?4, name_en), \
            description_ru = COALESCE(?5, description_ru), description_kk = COALESCE(?6, description_kk), description_en = COALESCE(?7, description_en), \
            slug = COALESCE(?8, slug), base_price = COALESCE(?9, base_price), \
            image = CASE WHEN ?10 IS NULL THEN image ELSE NULLIF(?10, '') END, \
            passport_bg = CASE WHEN ?11 IS NULL THEN passport_bg ELSE NULLIF(?11, '') END, \
            is_available = COALESCE(?12, is_available), position = COALESCE(?13, position) \
         WHERE id = ?14",
    )
    .bind(data.category_id)
    .bind(name.map(|n| n.get(Lang::Ru).to_string()))
    .bind(name.map(|n| n.get(Lang::Kk).to_string()))
    .bind(name.map(|n| n.get(Lang::En).to_string()))
    .bind(description.map(|d| d.get(Lang::Ru).to_string()))
    .bind(description.map(|d| d.get(Lang::Kk).to_string()))
    .bind(description.map(|d| d.get(Lang::En).to_string()))
    .bind(&slug)
    .bind(price.map(|p| p.to_string()))
    .bind(data.image)
    .bind(data.passport_bg)
    .bind(data.is_available)
    .bind(data.position)
    .bind(id)
    .execute(pool)
    .await
    .map_err(|e| map_write_error(e, data.category_id.unwrap_or_default(), slug.as_deref()))?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Dish {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Dish {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM dishes WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Dish {id} not found")));
    }
    Ok(true)
}

fn map_write_error(err: sqlx::Error, category_id: i64, slug: Option<&str>) -> RepoError {
    match RepoError::from(err) {
        RepoError::Duplicate(_) => RepoError::Business(
            ErrorCode::SlugExists,
            format!("Slug '{}' is already used", slug.unwrap_or_default()),
        ),
        RepoError::Validation(_) => RepoError::Business(
            ErrorCode::CategoryNotFound,
            format!("Category {category_id} not found"),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::category;
    use crate::db::repository::testing::test_pool;
    use rust_decimal::Decimal;
    use shared::models::CategoryCreate;
    use std::str::FromStr;

    async fn seed_category(pool: &SqlitePool, name: &str, is_21plus: bool) -> i64 {
        category::create(
            pool,
            CategoryCreate {
                name: LocalizedText::from_parts(name, "", ""),
                is_21plus: Some(is_21plus),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .id
    }

    fn dish(category_id: i64, name: &str, price: &str) -> DishCreate {
        DishCreate {
            category_id,
            name: LocalizedText::from_parts(name, "", ""),
            description: LocalizedText::new(),
            slug: None,
            price: Decimal::from_str(price).unwrap(),
            is_available: None,
            position: None,
            image: None,
            passport_bg: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_inherit_21plus() {
        let (pool, _dir) = test_pool().await;
        let bar = seed_category(&pool, "Бар", true).await;
        let d = create(&pool, dish(bar, "Пиво светлое", "1200")).await.unwrap();
        assert_eq!(d.slug, "pivo-svetloe");
        assert_eq!(d.price.to_string(), "1200.00");
        assert!(d.requires_21);
    }

    #[tokio::test]
    async fn test_placeholder_slug() {
        let (pool, _dir) = test_pool().await;
        let cat = seed_category(&pool, "Супы", false).await;
        let d = create(&pool, dish(cat, "", "10")).await.unwrap();
        assert_eq!(d.slug, format!("dish-{}", d.id));
    }

    #[tokio::test]
    async fn test_invalid_price_rejected() {
        let (pool, _dir) = test_pool().await;
        let cat = seed_category(&pool, "Супы", false).await;
        let err = create(&pool, dish(cat, "Борщ", "-5")).await.unwrap_err();
        assert!(matches!(err, RepoError::Business(ErrorCode::InvalidPrice, _)));
        let err = create(&pool, dish(cat, "Борщ", "1.005")).await.unwrap_err();
        assert!(matches!(err, RepoError::Business(ErrorCode::InvalidPrice, _)));
    }

    #[tokio::test]
    async fn test_unknown_category() {
        let (pool, _dir) = test_pool().await;
        let err = create(&pool, dish(999, "Борщ", "5")).await.unwrap_err();
        assert!(matches!(err, RepoError::Business(ErrorCode::CategoryNotFound, _)));
    }

    #[tokio::test]
    async fn test_category_with_dishes_cannot_be_deleted() {
        let (pool, _dir) = test_pool().await;
        let cat = seed_category(&pool, "Салаты", false).await;
        let d = create(&pool, dish(cat, "Цезарь", "2500")).await.unwrap();

        let err = category::delete(&pool, cat).await.unwrap_err();
        assert!(matches!(err, RepoError::Business(ErrorCode::CategoryHasDishes, _)));

        delete(&pool, d.id).await.unwrap();
        assert!(category::delete(&pool, cat).await.unwrap());
    }

    #[tokio::test]
    async fn test_available_filter_and_order() {
        let (pool, _dir) = test_pool().await;
        let cat = seed_category(&pool, "Горячее", false).await;
        let mut second = dish(cat, "Плов", "1500");
        second.position = Some(2);
        let mut first = dish(cat, "Манты", "1800");
        first.position = Some(1);
        let mut hidden = dish(cat, "Лагман", "1700");
        hidden.is_available = Some(false);
        create(&pool, second).await.unwrap();
        create(&pool, first).await.unwrap();
        create(&pool, hidden).await.unwrap();

        let available = find_by_category(&pool, cat, true).await.unwrap();
        let slugs: Vec<&str> = available.iter().map(|d| d.slug.as_str()).collect();
        assert_eq!(slugs, vec!["manty", "plov"]);
        assert_eq!(find_by_category(&pool, cat, false).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_cover_image_falls_back_to_first_dish() {
        let (pool, _dir) = test_pool().await;
        let cat_id = seed_category(&pool, "Десерты", false).await;
        let mut cake = dish(cat_id, "Торт", "900");
        cake.image = Some("dishes/cake.jpg".into());
        cake.position = Some(3);
        let mut ice = dish(cat_id, "Мороженое", "600");
        ice.image = Some("dishes/ice.jpg".into());
        ice.position = Some(1);
        create(&pool, cake).await.unwrap();
        create(&pool, ice).await.unwrap();

        let cat = category::find_by_id(&pool, cat_id).await.unwrap().unwrap();
        assert_eq!(
            category::cover_image(&pool, &cat).await.as_deref(),
            Some("dishes/ice.jpg")
        );
    }

    #[tokio::test]
    async fn test_update_price() {
        let (pool, _dir) = test_pool().await;
        let cat = seed_category(&pool, "Чай", false).await;
        let d = create(&pool, dish(cat, "Чай чёрный", "300")).await.unwrap();
        let updated = update(
            &pool,
            d.id,
            DishUpdate {
                price: Some(Decimal::from_str("350.5").unwrap()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.price.to_string(), "350.50");
        assert_eq!(updated.slug, "chay-chernyy");
    }
}
