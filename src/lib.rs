// Export modules
pub mod audit;
pub mod catalog;
pub mod categorize;
pub mod classifier;
pub mod config;

// Re-export commonly used types
pub use catalog::{Catalog, GameEntry};
pub use classifier::{classify, CategoryClassifier, CATEGORY_VOCABULARY};
pub use config::{Config, RunMode};
