//! Category Model

use serde::{Deserialize, Serialize};

use crate::i18n::{Lang, LocalizedText};

/// Menu category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: LocalizedText,
    pub description: LocalizedText,
    pub slug: String,
    pub position: i32,
    /// Cover image path relative to the media root
    pub image: Option<String>,
    pub show_in_nav: bool,
    pub nav_position: i32,
    /// Alcohol and other content for adults only
    pub is_21plus: bool,
}

impl Category {
    pub fn display_name(&self, lang: Lang) -> &str {
        self.name.resolve(lang)
    }

    pub fn display_description(&self, lang: Lang) -> &str {
        self.description.resolve(lang)
    }

    pub fn requires_21(&self) -> bool {
        self.is_21plus
    }

    /// Content is 21+ and the viewer has not confirmed their age
    pub fn locked(&self, age_verified: bool) -> bool {
        self.is_21plus && !age_verified
    }
}

/// Create category payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryCreate {
    #[serde(default)]
    pub name: LocalizedText,
    #[serde(default)]
    pub description: LocalizedText,
    /// Derived from the name when absent
    pub slug: Option<String>,
    pub position: Option<i32>,
    pub image: Option<String>,
    pub show_in_nav: Option<bool>,
    pub nav_position: Option<i32>,
    pub is_21plus: Option<bool>,
}

/// Update category payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryUpdate {
    pub name: Option<LocalizedText>,
    pub description: Option<LocalizedText>,
    pub slug: Option<String>,
    pub position: Option<i32>,
    pub image: Option<String>,
    pub show_in_nav: Option<bool>,
    pub nav_position: Option<i32>,
    pub is_21plus: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(is_21plus: bool) -> Category {
        Category {
            id: 1,
            name: LocalizedText::from_parts("Пиво", "Сыра", "Beer"),
            description: LocalizedText::new(),
            slug: "pivo".into(),
            position: 0,
            image: None,
            show_in_nav: true,
            nav_position: 0,
            is_21plus,
        }
    }

    #[test]
    fn test_locked_only_without_confirmation() {
        let c = category(true);
        assert!(c.requires_21());
        assert!(c.locked(false));
        assert!(!c.locked(true));

        let c = category(false);
        assert!(!c.locked(false));
    }

    #[test]
    fn test_display_name_follows_language() {
        let c = category(false);
        assert_eq!(c.display_name(Lang::Kk), "Сыра");
        assert_eq!(c.display_description(Lang::En), "");
    }
}
