//! Localized text
//!
//! Menu content is stored in three languages. Display code never picks a
//! field directly; it asks a [`LocalizedText`] to resolve itself for the
//! request language and gets the first non-empty translation along that
//! language's fallback chain.
//!
//! | Request | Chain |
//! |---------|-------|
//! | `ru` | ru → en → kk |
//! | `en` | en → ru → kk |
//! | `kk` | kk → ru → en |
//! | anything else | same as `ru` |

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Supported content language
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    Ru,
    Kk,
    En,
}

impl Lang {
    pub const ALL: [Lang; 3] = [Lang::Ru, Lang::Kk, Lang::En];

    pub const fn code(&self) -> &'static str {
        match self {
            Lang::Ru => "ru",
            Lang::Kk => "kk",
            Lang::En => "en",
        }
    }

    /// Native display name for language pickers
    pub const fn label(&self) -> &'static str {
        match self {
            Lang::Ru => "Русский",
            Lang::Kk => "Қазақша",
            Lang::En => "English",
        }
    }

    /// Parse a language tag such as `kk`, `en-US` or `RU`.
    ///
    /// Only the primary subtag is considered. Returns `None` for languages
    /// the menu is not translated into.
    pub fn parse(tag: &str) -> Option<Lang> {
        let primary = tag
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match primary.as_str() {
            "ru" => Some(Lang::Ru),
            "kk" => Some(Lang::Kk),
            "en" => Some(Lang::En),
            _ => None,
        }
    }

    /// Like [`Lang::parse`] but unknown or missing codes resolve to `ru`
    pub fn parse_or_default(tag: Option<&str>) -> Lang {
        tag.and_then(Lang::parse).unwrap_or_default()
    }

    /// Order in which translations are tried for this language
    pub const fn fallback_chain(&self) -> [Lang; 3] {
        match self {
            Lang::Ru => [Lang::Ru, Lang::En, Lang::Kk],
            Lang::En => [Lang::En, Lang::Ru, Lang::Kk],
            Lang::Kk => [Lang::Kk, Lang::Ru, Lang::En],
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Lang {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Lang::parse(s).ok_or_else(|| format!("unsupported language: {s}"))
    }
}

/// Text keyed by language
///
/// Serializes as a plain object: `{"ru": "...", "kk": "...", "en": "..."}`.
/// Missing keys are treated as empty translations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedText(BTreeMap<Lang, String>);

impl LocalizedText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the three stored columns
    pub fn from_parts(
        ru: impl Into<String>,
        kk: impl Into<String>,
        en: impl Into<String>,
    ) -> Self {
        Self::new().with(Lang::Ru, ru).with(Lang::Kk, kk).with(Lang::En, en)
    }

    pub fn with(mut self, lang: Lang, text: impl Into<String>) -> Self {
        self.set(lang, text);
        self
    }

    pub fn set(&mut self, lang: Lang, text: impl Into<String>) {
        self.0.insert(lang, text.into());
    }

    /// Raw translation for one language, empty when absent
    pub fn get(&self, lang: Lang) -> &str {
        self.0.get(&lang).map(String::as_str).unwrap_or_default()
    }

    /// First non-empty translation along `lang`'s fallback chain, or `""`
    pub fn resolve(&self, lang: Lang) -> &str {
        lang.fallback_chain()
            .into_iter()
            .map(|l| self.get(l))
            .find(|text| !text.is_empty())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        Lang::ALL.iter().all(|l| self.get(*l).is_empty())
    }
}
