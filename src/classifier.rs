use std::collections::BTreeSet;

/// Working set of labels for one entry. Ordered, so iteration is already the
/// ascending output order.
pub type CategorySet = BTreeSet<String>;

/// A single keyword rule: takes the lower-cased title and the labels gathered
/// so far, returns the updated labels.
pub type Rule = fn(&str, CategorySet) -> CategorySet;

/// Known catalog labels. Informational only, the classifier never validates
/// against it.
pub const CATEGORY_VOCABULARY: [&str; 12] = [
    "2-player",
    "4-player",
    "ai-exclusive",
    "adventure",
    "arcade",
    "classic",
    "defense",
    "multiplayer",
    "puzzle",
    "racing",
    "simulation",
    "strategy",
];

/// Label used when nothing else applies
pub const FALLBACK_CATEGORY: &str = "arcade";

/// Rule-based multi-label classifier for catalog entries
#[derive(Clone)]
pub struct CategoryClassifier {
    rules: Vec<(&'static str, Rule)>,
}

impl Default for CategoryClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryClassifier {
    /// Create a classifier with the standard rule order.
    ///
    /// Order matters: the connect-four and tic-tac-toe rules drop `simulation`
    /// that may have come from the seed, and the contradiction rule has to see
    /// every label added before it.
    pub fn new() -> Self {
        let rules: Vec<(&'static str, Rule)> = vec![
            ("board_games", board_games as Rule),
            ("connect_four", connect_four as Rule),
            ("tic_tac_toe", tic_tac_toe as Rule),
            ("racing", racing as Rule),
            ("puzzle", puzzle as Rule),
            ("card_games", card_games as Rule),
            ("arcade_classics", arcade_classics as Rule),
            ("tower_defense", tower_defense as Rule),
            ("ai_themed", ai_themed as Rule),
            ("multiplayer", multiplayer as Rule),
            ("head_to_head", head_to_head as Rule),
            ("adventure", adventure as Rule),
            ("simulation", simulation as Rule),
            ("classic_retro", classic_retro as Rule),
            ("resolve_contradictions", resolve_contradictions as Rule),
        ];
        Self { rules }
    }

    /// Classify one entry.
    ///
    /// `genre` and `description` are accepted so callers can pass the whole
    /// entry, but no rule reads them yet.
    pub fn classify(
        &self,
        title: &str,
        current_category: Option<&str>,
        _genre: Option<&str>,
        _description: Option<&str>,
    ) -> Vec<String> {
        let title_lower = title.to_lowercase();
        let mut categories = CategorySet::new();

        if let Some(seed) = current_category.filter(|c| !c.is_empty()) {
            categories.insert(seed.to_string());
        }

        for (name, rule) in &self.rules {
            let before = categories.len();
            categories = rule(&title_lower, categories);
            if categories.len() != before {
                log::trace!("Rule {} changed '{}': {:?}", name, title, categories);
            }
        }

        if categories.is_empty() {
            categories.insert(FALLBACK_CATEGORY.to_string());
        }

        categories.into_iter().collect()
    }
}

/// Classify with the default rule set
pub fn classify(
    title: &str,
    current_category: Option<&str>,
    genre: Option<&str>,
    description: Option<&str>,
) -> Vec<String> {
    CategoryClassifier::new().classify(title, current_category, genre, description)
}

fn contains_any(title: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| title.contains(keyword))
}

fn add(mut categories: CategorySet, labels: &[&str]) -> CategorySet {
    categories.extend(labels.iter().map(|label| label.to_string()));
    categories
}

fn board_games(title: &str, categories: CategorySet) -> CategorySet {
    // "go " keeps the trailing space so words like "dragon" don't match
    if contains_any(title, &["chess", "checkers", "go ", "backgammon"]) {
        add(categories, &["strategy", "2-player", "classic"])
    } else {
        categories
    }
}

fn connect_four(title: &str, categories: CategorySet) -> CategorySet {
    if contains_any(title, &["connect four", "connect-four"]) {
        let mut categories = add(categories, &["puzzle", "2-player", "strategy"]);
        categories.remove("simulation");
        categories
    } else {
        categories
    }
}

fn tic_tac_toe(title: &str, categories: CategorySet) -> CategorySet {
    if title.contains("tic") && title.contains("tac") && title.contains("toe") {
        let mut categories = add(categories, &["puzzle", "2-player", "classic"]);
        categories.remove("simulation");
        categories
    } else {
        categories
    }
}

fn racing(title: &str, categories: CategorySet) -> CategorySet {
    if contains_any(title, &["racing", "race", "circuit", "speed", "drift"]) {
        add(categories, &["racing", "arcade"])
    } else {
        categories
    }
}

fn puzzle(title: &str, categories: CategorySet) -> CategorySet {
    if contains_any(
        title,
        &["puzzle", "match", "tetris", "blocks", "crystal", "gem", "swap"],
    ) {
        add(categories, &["puzzle"])
    } else {
        categories
    }
}

fn card_games(title: &str, categories: CategorySet) -> CategorySet {
    if contains_any(title, &["poker", "cards", "solitaire", "blackjack"]) {
        add(categories, &["classic", "2-player"])
    } else {
        categories
    }
}

fn arcade_classics(title: &str, categories: CategorySet) -> CategorySet {
    if contains_any(
        title,
        &["blaster", "asteroid", "space", "shooter", "invader", "breakout", "pong"],
    ) {
        add(categories, &["arcade", "classic"])
    } else {
        categories
    }
}

fn tower_defense(title: &str, categories: CategorySet) -> CategorySet {
    if contains_any(title, &["tower", "defense", "defend", "turret"]) {
        add(categories, &["defense", "strategy"])
    } else {
        categories
    }
}

fn ai_themed(title: &str, categories: CategorySet) -> CategorySet {
    if !contains_any(
        title,
        &["ai ", "algorithm", "neural", "matrix", "nexus", "quantum"],
    ) {
        return categories;
    }
    // Only a seed can already carry ai-exclusive; no earlier rule adds it.
    if categories.contains("ai-exclusive") {
        add(categories, &["ai-exclusive", "strategy"])
    } else {
        add(categories, &["strategy"])
    }
}

fn multiplayer(title: &str, categories: CategorySet) -> CategorySet {
    if !contains_any(
        title,
        &["network", "online", "multi", "battle", "versus", "pvp"],
    ) {
        return categories;
    }
    let categories = add(categories, &["multiplayer"]);
    if title.contains("multi") {
        add(categories, &["4-player"])
    } else {
        categories
    }
}

fn head_to_head(title: &str, categories: CategorySet) -> CategorySet {
    if contains_any(title, &["vs ", "versus", "battle", "duel"]) && !title.contains("network") {
        add(categories, &["2-player"])
    } else {
        categories
    }
}

fn adventure(title: &str, categories: CategorySet) -> CategorySet {
    if contains_any(title, &["quest", "adventure", "exploration", "journey"]) {
        add(categories, &["adventure"])
    } else {
        categories
    }
}

fn simulation(title: &str, categories: CategorySet) -> CategorySet {
    if contains_any(title, &["simulator", "tycoon", "management", "builder"]) {
        add(categories, &["simulation"])
    } else {
        categories
    }
}

fn classic_retro(title: &str, categories: CategorySet) -> CategorySet {
    if contains_any(title, &["classic", "retro", "vintage", "old school"]) {
        add(categories, &["classic"])
    } else {
        categories
    }
}

fn resolve_contradictions(title: &str, mut categories: CategorySet) -> CategorySet {
    if categories.contains("2-player")
        && categories.contains("multiplayer")
        && contains_any(title, &["chess", "checkers", "connect four", "tic tac toe"])
    {
        categories.remove("multiplayer");
    }
    categories
}
