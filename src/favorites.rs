//! Saved roasts: insertion ordered, no duplicates, never the placeholder.

use serde::{Deserialize, Serialize};

use crate::PLACEHOLDER;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Favorites(Vec<String>);

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `text` may be saved: non-empty, not the placeholder, not saved yet.
    pub fn accepts(&self, text: &str) -> bool {
        !text.is_empty() && text != PLACEHOLDER && !self.contains(text)
    }

    /// Appends `text` if it is acceptable. Returns whether anything changed.
    pub fn insert(&mut self, text: &str) -> bool {
        if !self.accepts(text) {
            return false;
        }
        self.0.push(text.to_owned());
        true
    }

    pub fn contains(&self, text: &str) -> bool {
        self.0.iter().any(|f| f == text)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

// Stored lists may have been edited by hand; first occurrence wins.
impl From<Vec<String>> for Favorites {
    fn from(value: Vec<String>) -> Self {
        let mut favorites = Self::new();
        for text in value {
            favorites.insert(&text);
        }
        favorites
    }
}

impl From<Favorites> for Vec<String> {
    fn from(value: Favorites) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_placeholder_empty_and_duplicates() {
        let mut favorites = Favorites::new();
        assert!(!favorites.insert(""));
        assert!(!favorites.insert(PLACEHOLDER));
        assert!(favorites.insert("Rusty Toaster!"));
        assert!(!favorites.insert("Rusty Toaster!"));
        assert_eq!(favorites.as_slice(), ["Rusty Toaster!"]);
    }

    #[test]
    fn matching_is_case_sensitive() {
        let mut favorites = Favorites::new();
        assert!(favorites.insert("Rusty Toaster!"));
        assert!(favorites.insert("rusty toaster!"));
        assert_eq!(favorites.len(), 2);
    }

    #[test]
    fn keeps_insertion_order() {
        let mut favorites = Favorites::new();
        for text in ["Wobbly Tin can!", "Faulty Wireback!", "Clogged Metalhead!"] {
            favorites.insert(text);
        }
        let order: Vec<&str> = favorites.iter().map(String::as_str).collect();
        assert_eq!(order, ["Wobbly Tin can!", "Faulty Wireback!", "Clogged Metalhead!"]);
    }

    #[test]
    fn deserializing_drops_duplicates_and_placeholder() {
        let json = format!(r#"["Rusty Toaster!","{PLACEHOLDER}","Rusty Toaster!","Wobbly Tin can!"]"#);
        let favorites: Favorites = serde_json::from_str(&json).unwrap();
        assert_eq!(favorites.as_slice(), ["Rusty Toaster!", "Wobbly Tin can!"]);
    }

    #[test]
    fn serializes_as_plain_array() {
        let favorites = Favorites::from(vec!["Sparking Toaster!".to_owned()]);
        assert_eq!(serde_json::to_string(&favorites).unwrap(), r#"["Sparking Toaster!"]"#);
    }
}
