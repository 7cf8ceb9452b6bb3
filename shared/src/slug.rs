//! URL slugs
//!
//! Slugs are ASCII: Russian and Kazakh Cyrillic is transliterated, other
//! punctuation is dropped, and whitespace/hyphen runs collapse to one `-`.

use crate::i18n::{Lang, LocalizedText};

/// Maximum slug length for categories
pub const CATEGORY_SLUG_MAX: usize = 120;
/// Maximum slug length for dishes
pub const DISH_SLUG_MAX: usize = 160;

fn transliterate(c: char) -> Option<&'static str> {
    let s = match c {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' | 'ё' | 'э' => "e",
        'ж' => "zh",
        'з' => "z",
        'и' | 'і' => "i",
        'й' | 'ы' => "y",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' | 'ұ' | 'ү' => "u",
        'ф' => "f",
        'х' => "kh",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "shch",
        'ъ' | 'ь' => "",
        'ю' => "yu",
        'я' => "ya",
        // Kazakh
        'ә' => "a",
        'ғ' => "g",
        'қ' => "q",
        'ң' => "n",
        'ө' => "o",
        'һ' => "h",
        _ => return None,
    };
    Some(s)
}

/// Turn free text into a slug. May return an empty string.
pub fn slugify(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_dash = false;

    for c in input.chars().flat_map(char::to_lowercase) {
        let piece: Option<std::borrow::Cow<'static, str>> =
            if c.is_ascii_alphanumeric() || c == '_' {
                Some(c.to_string().into())
            } else if c.is_whitespace() || c == '-' {
                pending_dash = true;
                None
            } else {
                transliterate(c).map(Into::into)
            };

        if let Some(piece) = piece {
            if piece.is_empty() {
                continue;
            }
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push_str(&piece);
        }
    }

    out.trim_matches(|c| c == '-' || c == '_').to_string()
}

/// Slugify and cut to `max` characters without leaving a trailing dash
pub fn slugify_truncated(input: &str, max: usize) -> String {
    let slug = slugify(input);
    if slug.len() <= max {
        return slug;
    }
    // slug is pure ASCII, byte slicing is char slicing
    slug[..max].trim_end_matches('-').to_string()
}

/// Placeholder slug for records created without any name
pub fn placeholder(prefix: &str, id: i64) -> String {
    format!("{prefix}-{id}")
}

/// Slug for a new record: the explicit slug if given, else one derived from
/// the name (ru, then en, then kk). `None` means the caller must assign a
/// [`placeholder`] once the id is known.
pub fn initial_slug(explicit: Option<&str>, name: &LocalizedText, max: usize) -> Option<String> {
    explicit
        .map(|s| slugify_truncated(s, max))
        .filter(|s| !s.is_empty())
        .or_else(|| Some(slugify_truncated(name.resolve(Lang::Ru), max)))
        .filter(|s| !s.is_empty())
}
