use game_categorizer::categorize::run_categorize;
use game_categorizer::{Catalog, Config, CATEGORY_VOCABULARY};
use serde_json::json;
use std::fs;

fn write_catalog(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("games.json");
    let raw = json!({
        "meta": { "title": "Arcade Hall", "categories": ["strategy"] },
        "games": [
            { "title": "Connect Four Challenge", "category": "simulation", "image": "connect-four-card.jpg" },
            { "title": "Tic Tac Toe Arena", "category": "" },
            { "title": "Space Blaster Pong", "genre": "Shooter", "description": "Rétro" },
            { "title": "Untitled Widget", "category": "" },
            { "title": "Quantum Maze", "category": null }
        ]
    });
    fs::write(&path, serde_json::to_string_pretty(&raw).unwrap()).unwrap();
    path
}

#[test]
fn categorize_rewrites_catalog_to_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_catalog(dir.path());
    let output = dir.path().join("out").join("games.json");

    let mut config = Config::default();
    config.catalog_path = input.to_string_lossy().to_string();
    config.output_path = Some(output.to_string_lossy().to_string());

    let summary = run_categorize(&config).unwrap();
    assert_eq!(summary.games_processed, 5);

    let catalog = Catalog::from_file(&output).unwrap();
    assert_eq!(catalog.meta.categories, CATEGORY_VOCABULARY.to_vec());
    assert_eq!(catalog.meta.extra["title"], "Arcade Hall");

    let games = &catalog.games;
    assert_eq!(games[0].categories, vec!["2-player", "puzzle", "strategy"]);
    assert_eq!(games[0].category, Some(Some("2-player".to_string())));
    assert_eq!(games[0].extra["image"], "connect-four-card.jpg");
    assert_eq!(games[1].categories, vec!["2-player", "classic", "puzzle"]);
    assert_eq!(games[2].categories, vec!["arcade", "classic"]);
    assert_eq!(games[2].description.as_deref(), Some("Rétro"));
    assert_eq!(games[3].categories, vec!["arcade"]);
    assert_eq!(games[4].categories, vec!["strategy"]);

    // input left untouched when an output path is given
    let original = Catalog::from_file(&input).unwrap();
    assert!(original.games[0].categories.is_empty());
}

#[test]
fn categorize_in_place_without_output_path() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_catalog(dir.path());

    let mut config = Config::default();
    config.catalog_path = input.to_string_lossy().to_string();
    config.mode_options.categorize.use_multi_threading = true;
    config.mode_options.categorize.thread_count = 2;

    run_categorize(&config).unwrap();

    let catalog = Catalog::from_file(&input).unwrap();
    assert!(catalog.games.iter().all(|g| !g.categories.is_empty()));
    assert!(catalog
        .games
        .iter()
        .all(|g| g.category == Some(g.categories.first().cloned())));
}

#[test]
fn missing_catalog_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.catalog_path = dir.path().join("nope.json").to_string_lossy().to_string();
    assert!(run_categorize(&config).is_err());
}
