use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// One game record in the catalog
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct GameEntry {
    pub title: String,
    /// `None` when the key is absent, `Some(None)` for an explicit `null`
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Fields this tool doesn't touch (difficulty, badge, image, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl GameEntry {
    /// Store a classification result; the first label doubles as the
    /// single `category` for older consumers.
    pub fn set_categories(&mut self, categories: Vec<String>) {
        self.category = Some(categories.first().cloned());
        self.categories = categories;
    }
}

/// Top-level `meta` block
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct CatalogMeta {
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A games catalog as stored in `games.json`
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Catalog {
    #[serde(default)]
    pub meta: CatalogMeta,
    #[serde(default)]
    pub games: Vec<GameEntry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Catalog {
    /// Load a catalog from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let catalog = serde_json::from_reader(reader)?;
        Ok(catalog)
    }

    /// Write the catalog as pretty-printed JSON
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_fields_survive_round_trip() {
        let raw = json!({
            "meta": { "title": "Games", "categories": ["arcade"] },
            "games": [
                { "title": "Chess", "category": "strategy", "difficulty": "hard" }
            ],
            "version": 3
        });
        let catalog: Catalog = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(catalog.games[0].extra["difficulty"], "hard");
        assert_eq!(catalog.meta.extra["title"], "Games");
        assert_eq!(serde_json::to_value(&catalog).unwrap(), raw);
    }

    #[test]
    fn missing_optional_fields_load() {
        let catalog: Catalog =
            serde_json::from_value(json!({ "games": [{ "title": "Pong" }] })).unwrap();
        let game = &catalog.games[0];
        assert_eq!(game.category, None);
        assert!(game.categories.is_empty());
        assert!(catalog.meta.categories.is_empty());
    }

    #[test]
    fn null_category_is_kept_apart_from_missing() {
        let catalog: Catalog = serde_json::from_value(json!({
            "games": [{ "title": "Pong", "category": null }, { "title": "Go" }]
        }))
        .unwrap();
        assert_eq!(catalog.games[0].category, Some(None));
        assert_eq!(catalog.games[1].category, None);

        let written = serde_json::to_value(&catalog).unwrap();
        assert!(written["games"][0]["category"].is_null());
        assert!(written["games"][1].get("category").is_none());
    }

    #[test]
    fn rewrite_keeps_unknown_key_order() {
        let raw = r#"{"meta":{"version":2,"title":"Games"},"games":[{"title":"Pong","zeta":1,"alpha":2}]}"#;
        let catalog: Catalog = serde_json::from_str(raw).unwrap();
        let written = serde_json::to_string(&catalog).unwrap();
        assert!(written.find("\"version\"").unwrap() < written.find("\"title\":\"Games\"").unwrap());
        assert!(written.find("\"zeta\"").unwrap() < written.find("\"alpha\"").unwrap());
    }

    #[test]
    fn set_categories_sets_primary() {
        let mut game = GameEntry {
            title: "Pong".to_string(),
            ..Default::default()
        };
        game.set_categories(vec!["arcade".to_string(), "classic".to_string()]);
        assert_eq!(game.category, Some(Some("arcade".to_string())));
        assert_eq!(game.categories, vec!["arcade", "classic"]);
    }
}
