use std::collections::BTreeMap;
use std::time::Instant;
use rayon::prelude::*;

use crate::catalog::{Catalog, GameEntry};
use crate::classifier::{CategoryClassifier, CATEGORY_VOCABULARY};
use crate::config::{CategorizeOptions, Config};

/// Before/after record for one game
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryChange {
    pub title: String,
    /// Seed the entry was classified with; `None` for an explicit `null`
    pub old_category: Option<String>,
    pub new_categories: Vec<String>,
}

/// Outcome of a categorization pass
#[derive(Debug, Clone, Default)]
pub struct CategorizeSummary {
    pub games_processed: usize,
    pub changes: Vec<CategoryChange>,
    /// Number of games carrying each label
    pub distribution: BTreeMap<String, usize>,
}

impl CategorizeSummary {
    fn log(&self) {
        for change in &self.changes {
            log::info!(
                "{:<30} | {:<12} -> {}",
                change.title,
                change.old_category.as_deref().unwrap_or("None"),
                change.new_categories.join(", ")
            );
        }
        log::info!("Updated {} games with multiple categories", self.games_processed);
        log::info!("Category distribution:");
        for (category, count) in &self.distribution {
            log::info!("  {}: {} games", category, count);
        }
    }
}

/// Reclassify every game in the catalog in place.
///
/// Entries are classified independently, so the threaded and sequential paths
/// produce the same catalog.
pub fn categorize_catalog(
    catalog: &mut Catalog,
    classifier: &CategoryClassifier,
    options: &CategorizeOptions,
) -> Result<CategorizeSummary, Box<dyn std::error::Error>> {
    catalog.meta.categories = CATEGORY_VOCABULARY.iter().map(|c| c.to_string()).collect();

    let classify_game = |game: &mut GameEntry| {
        // only an absent key gets the default; null stays unseeded
        let old_category = match &game.category {
            Some(category) => category.clone(),
            None => Some(options.default_category.clone()),
        };
        let new_categories = classifier.classify(
            &game.title,
            old_category.as_deref(),
            game.genre.as_deref(),
            game.description.as_deref(),
        );
        game.set_categories(new_categories.clone());
        CategoryChange {
            title: game.title.clone(),
            old_category,
            new_categories,
        }
    };

    let changes: Vec<CategoryChange> = if options.use_multi_threading {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(options.thread_count.max(1))
            .build()?;
        pool.install(|| catalog.games.par_iter_mut().map(classify_game).collect())
    } else {
        catalog.games.iter_mut().map(classify_game).collect()
    };

    let mut distribution = BTreeMap::new();
    for game in &catalog.games {
        for category in &game.categories {
            *distribution.entry(category.clone()).or_insert(0) += 1;
        }
    }

    Ok(CategorizeSummary {
        games_processed: changes.len(),
        changes,
        distribution,
    })
}

/// Load the configured catalog, reclassify it and write it back
pub fn run_categorize(config: &Config) -> Result<CategorizeSummary, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    let catalog_path = config.get_catalog_path();
    let output_path = config.get_output_path();

    log::info!("Loading catalog: {}", catalog_path.display());
    let mut catalog = Catalog::from_file(&catalog_path)?;
    log::info!("Processing {} games...", catalog.games.len());

    let classifier = CategoryClassifier::new();
    let summary = categorize_catalog(&mut catalog, &classifier, &config.mode_options.categorize)?;

    catalog.save_to_file(&output_path)?;
    summary.log();

    log::info!("Saved catalog to: {}", output_path.display());
    log::debug!("Processing time: {:?}", start_time.elapsed());
    Ok(summary)
}
