use alloc::string::{String, ToString};
use alloc::vec::Vec;
use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::*;

pub const ANIMALS: [&str; 12] = [
    "🐶", "🐱", "🐭", "🐹", "🐰", "🦊", "🐻", "🐼", "🦁", "🐯", "🐨", "🐵",
];

pub const FOOD: [&str; 12] = [
    "🍎", "🍌", "🍇", "🍓", "🍒", "🍍", "🥝", "🍋", "🍉", "🥭", "🍊", "🍐",
];

/// Named, ordered set of distinct symbols a deck is dealt from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ThemeRecord")]
pub struct Theme {
    name: String,
    symbols: Vec<String>,
}

/// Unchecked wire form of a [`Theme`].
#[derive(Deserialize)]
struct ThemeRecord {
    name: String,
    symbols: Vec<String>,
}

impl TryFrom<ThemeRecord> for Theme {
    type Error = GameError;

    fn try_from(record: ThemeRecord) -> Result<Self> {
        Self::new(record.name, record.symbols)
    }
}

fn has_duplicates(symbols: &[String]) -> bool {
    let mut seen = HashSet::with_capacity(symbols.len());
    !symbols.iter().all(|symbol| seen.insert(symbol.as_str()))
}

impl Theme {
    /// Builds a theme, it must be able to fill the largest board without repeating a symbol.
    pub fn new<S: Into<String>>(
        name: impl Into<String>,
        symbols: impl IntoIterator<Item = S>,
    ) -> Result<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(GameError::InvalidTheme);
        }

        let symbols: Vec<String> = symbols.into_iter().map(Into::into).collect();
        if symbols.len() < usize::from(Difficulty::max_pair_count()) {
            return Err(GameError::ThemeTooSmall);
        }

        if has_duplicates(&symbols) {
            return Err(GameError::DuplicateSymbol);
        }

        Ok(Self { name, symbols })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }
}

/// Themes a session can be started with, in registration order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ThemeCatalog {
    themes: Vec<Theme>,
}

impl ThemeCatalog {
    pub const fn empty() -> Self {
        Self { themes: Vec::new() }
    }

    pub fn builtin() -> Self {
        let themes = [("animals", ANIMALS), ("food", FOOD)]
            .into_iter()
            .map(|(name, symbols)| Theme {
                name: name.to_string(),
                symbols: symbols.into_iter().map(String::from).collect(),
            })
            .collect();
        Self { themes }
    }

    pub fn register(&mut self, theme: Theme) -> Result<()> {
        if self.themes.iter().any(|known| known.is_named(theme.name())) {
            return Err(GameError::DuplicateTheme);
        }
        log::debug!("registered theme {:?}", theme.name());
        self.themes.push(theme);
        Ok(())
    }

    /// Looks a theme up by name, ignoring ASCII case and surrounding whitespace.
    pub fn get(&self, name: &str) -> Result<&Theme> {
        self.themes
            .iter()
            .find(|theme| theme.is_named(name))
            .ok_or(GameError::InvalidTheme)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.themes.iter().map(Theme::name)
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}

impl Default for ThemeCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn builtin_catalog_has_animals_and_food() {
        let catalog = ThemeCatalog::builtin();

        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["animals", "food"]);
        assert_eq!(catalog.get("animals").unwrap().symbols()[0], "🐶");
        assert_eq!(catalog.get(" FOOD ").unwrap().name(), "food");
    }

    #[test]
    fn builtin_themes_fill_every_difficulty() {
        let catalog = ThemeCatalog::builtin();
        for name in catalog.names() {
            let theme = catalog.get(name).unwrap();
            assert!(theme.symbols().len() >= usize::from(Difficulty::max_pair_count()));
        }
    }

    #[test]
    fn unknown_theme_is_rejected() {
        assert_eq!(
            ThemeCatalog::builtin().get("space"),
            Err(GameError::InvalidTheme)
        );
    }

    #[test]
    fn deserialized_themes_are_validated() {
        let letters: Theme = serde_json::from_str(
            r#"{"name": "letters", "symbols": ["a","b","c","d","e","f","g","h","i","j","k","l"]}"#,
        )
        .unwrap();
        assert_eq!(letters.symbols().len(), 12);

        let tiny = serde_json::from_str::<Theme>(r#"{"name": "tiny", "symbols": ["a", "b"]}"#);
        assert!(tiny.is_err());

        let twice = serde_json::from_str::<Theme>(
            r#"{"name": "twice", "symbols": ["a","a","c","d","e","f","g","h","i","j","k","l"]}"#,
        );
        assert!(twice.is_err());
    }

    #[test]
    fn register_validates_themes() {
        let mut catalog = ThemeCatalog::builtin();

        assert_eq!(
            Theme::new("letters", ["a", "b", "c"]),
            Err(GameError::ThemeTooSmall)
        );
        assert_eq!(
            Theme::new("letters", ["a"; 12]),
            Err(GameError::DuplicateSymbol)
        );

        let animals = Theme::new("Animals", "abcdefghijkl".chars().map(String::from)).unwrap();
        assert_eq!(catalog.register(animals), Err(GameError::DuplicateTheme));

        let letters = Theme::new("letters", "abcdefghijkl".chars().map(String::from)).unwrap();
        catalog.register(letters).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get("letters").unwrap().symbols()[11], "l");
    }
}
