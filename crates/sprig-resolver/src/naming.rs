//! Layer name sanitizing.

use convert_case::{Case, Casing};
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

static INVALID_CHARS: OnceLock<Regex> = OnceLock::new();

fn invalid_chars() -> &'static Regex {
    INVALID_CHARS.get_or_init(|| Regex::new(r"[^A-Za-z0-9]+").expect("valid identifier pattern"))
}

/// Hands out unique snake_case identifiers derived from layer names.
///
/// The first use of a name gets it as is; later uses get `_2`, `_3`, ...
/// Registration order is the only input, so a fixed traversal order yields
/// the same names every run.
#[derive(Debug, Default)]
pub struct NameRegistry {
    used: HashSet<String>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sanitize `raw` into an identifier, using `fallback` when nothing
    /// usable remains.
    pub fn sanitize(&self, raw: &str, fallback: &str) -> String {
        let spaced = invalid_chars().replace_all(raw, " ");
        let snake = spaced.trim().to_case(Case::Snake);
        if snake.is_empty() {
            return fallback.to_string();
        }
        if snake.starts_with(|c: char| c.is_ascii_digit()) {
            return format!("{}_{}", fallback, snake);
        }
        snake
    }

    /// Sanitize and reserve a unique identifier.
    pub fn register(&mut self, raw: &str, fallback: &str) -> String {
        let base = self.sanitize(raw, fallback);
        if self.used.insert(base.clone()) {
            return base;
        }
        let mut n = 2;
        loop {
            let candidate = format!("{}_{}", base, n);
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize() {
        let names = NameRegistry::new();
        assert_eq!(names.sanitize("Primary Button", "frame"), "primary_button");
        assert_eq!(names.sanitize("Card / Header", "frame"), "card_header");
        assert_eq!(names.sanitize("🔥", "text"), "text");
        assert_eq!(names.sanitize("2 columns", "frame"), "frame_2_columns");
    }

    #[test]
    fn test_register_is_unique() {
        let mut names = NameRegistry::new();
        assert_eq!(names.register("Title", "text"), "title");
        assert_eq!(names.register("title", "text"), "title_2");
        assert_eq!(names.register("Title 2", "text"), "title_2_2");
        assert_eq!(names.register("Title", "text"), "title_3");
    }
}
