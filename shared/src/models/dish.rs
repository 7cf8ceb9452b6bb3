//! Dish Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::i18n::{Lang, LocalizedText};

/// Menu dish
///
/// `requires_21` is copied from the owning category when the row is loaded;
/// it is never stored on the dish itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dish {
    pub id: i64,
    pub category_id: i64,
    pub name: LocalizedText,
    pub description: LocalizedText,
    pub slug: String,
    /// Fixed 2-decimal price
    pub price: Decimal,
    pub is_available: bool,
    pub position: i32,
    pub image: Option<String>,
    /// Full-page background for the dish "passport" view
    pub passport_bg: Option<String>,
    pub requires_21: bool,
}

impl Dish {
    pub fn display_name(&self, lang: Lang) -> &str {
        self.name.resolve(lang)
    }

    pub fn display_description(&self, lang: Lang) -> &str {
        self.description.resolve(lang)
    }

    pub fn locked(&self, age_verified: bool) -> bool {
        self.requires_21 && !age_verified
    }
}

/// Create dish payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DishCreate {
    pub category_id: i64,
    #[serde(default)]
    pub name: LocalizedText,
    #[serde(default)]
    pub description: LocalizedText,
    pub slug: Option<String>,
    pub price: Decimal,
    pub is_available: Option<bool>,
    pub position: Option<i32>,
    pub image: Option<String>,
    pub passport_bg: Option<String>,
}

/// Update dish payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DishUpdate {
    pub category_id: Option<i64>,
    pub name: Option<LocalizedText>,
    pub description: Option<LocalizedText>,
    pub slug: Option<String>,
    pub price: Option<Decimal>,
    pub is_available: Option<bool>,
    pub position: Option<i32>,
    pub image: Option<String>,
    pub passport_bg: Option<String>,
}
