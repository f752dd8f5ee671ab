use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use regex::Regex;

use crate::config::Config;

const CARD_SUFFIX: &str = "-card.jpg";

/// Result of comparing card image references with the files on disk
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageAudit {
    pub referenced: Vec<String>,
    pub existing: Vec<String>,
    /// Referenced but not on disk
    pub missing: Vec<String>,
    /// On disk but never referenced
    pub unused: Vec<String>,
}

impl ImageAudit {
    pub fn new(referenced: Vec<String>, existing: Vec<String>) -> Self {
        let existing_set: BTreeSet<&String> = existing.iter().collect();
        let referenced_set: BTreeSet<&String> = referenced.iter().collect();

        let missing = referenced
            .iter()
            .filter(|image| !existing_set.contains(image))
            .cloned()
            .collect();
        let unused = existing
            .iter()
            .filter(|image| !referenced_set.contains(image))
            .cloned()
            .collect();

        ImageAudit {
            referenced,
            existing,
            missing,
            unused,
        }
    }

    /// Percentage of referenced images that exist
    pub fn coverage(&self) -> f64 {
        if self.referenced.is_empty() {
            return 100.0;
        }
        let found = self.referenced.len() - self.missing.len();
        found as f64 / self.referenced.len() as f64 * 100.0
    }
}

/// Extract unique `assets/images/*-card.jpg` references from HTML, sorted
pub fn extract_image_references(html: &str) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let re = Regex::new(r#"assets/images/([^"]+?-card\.jpg)"#)?;
    let references: BTreeSet<String> = re
        .captures_iter(html)
        .filter_map(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
        .collect();
    Ok(references.into_iter().collect())
}

/// List card image file names in a directory, sorted
pub fn existing_images(images_dir: &Path) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let mut images: Vec<String> = fs::read_dir(images_dir)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| entry.file_name().to_str().map(|name| name.to_string()))
        .filter(|name| !name.starts_with('.') && name.ends_with(CARD_SUFFIX))
        .collect();
    images.sort();
    Ok(images)
}

/// Check the configured HTML page against the configured image directory
pub fn run_audit(config: &Config) -> Result<ImageAudit, Box<dyn std::error::Error>> {
    let html_file = config.get_html_file();
    let images_dir = config.get_images_dir();

    if !images_dir.is_dir() {
        return Err(format!("Image directory does not exist: {}", images_dir.display()).into());
    }

    log::info!("Extracting image references from {}", html_file.display());
    let html = fs::read_to_string(&html_file)?;
    let referenced = extract_image_references(&html)?;
    log::info!("Found {} unique image references", referenced.len());

    let existing = existing_images(&images_dir)?;
    log::info!("Found {} existing image files", existing.len());

    let audit = ImageAudit::new(referenced, existing);

    if audit.missing.is_empty() {
        log::info!("All referenced images exist");
    } else {
        log::warn!("Missing images ({}):", audit.missing.len());
        for (i, image) in audit.missing.iter().enumerate() {
            log::warn!("{:2}. {}", i + 1, image);
        }
        log::info!(
            "Referenced: {}, existing: {}, missing: {}, coverage: {:.1}%",
            audit.referenced.len(),
            audit.existing.len(),
            audit.missing.len(),
            audit.coverage()
        );
    }

    if !audit.unused.is_empty() {
        log::info!("Unused images ({}):", audit.unused.len());
        for (i, image) in audit.unused.iter().enumerate() {
            log::info!("{:2}. {}", i + 1, image);
        }
    }

    Ok(audit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_unique_sorted_references() {
        let html = r#"
            <img src="assets/images/pong-card.jpg">
            <img src="assets/images/chess-card.jpg" alt="">
            <img src="assets/images/pong-card.jpg">
            <img src="assets/images/logo.png">
        "#;
        let references = extract_image_references(html).unwrap();
        assert_eq!(references, vec!["chess-card.jpg", "pong-card.jpg"]);
    }

    #[test]
    fn audit_splits_missing_and_unused() {
        let audit = ImageAudit::new(
            vec!["a-card.jpg".into(), "b-card.jpg".into()],
            vec!["b-card.jpg".into(), "c-card.jpg".into()],
        );
        assert_eq!(audit.missing, vec!["a-card.jpg"]);
        assert_eq!(audit.unused, vec!["c-card.jpg"]);
        assert!((audit.coverage() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_reference_list_is_full_coverage() {
        let audit = ImageAudit::new(Vec::new(), vec!["x-card.jpg".into()]);
        assert_eq!(audit.coverage(), 100.0);
        assert_eq!(audit.unused, vec!["x-card.jpg"]);
    }

    #[test]
    fn lists_only_card_images() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b-card.jpg", "a-card.jpg", "banner.jpg", "c-card.png", ".x-card.jpg"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }
        fs::create_dir(dir.path().join("d-card.jpg")).unwrap();
        let images = existing_images(dir.path()).unwrap();
        assert_eq!(images, vec!["a-card.jpg", "b-card.jpg"]);
    }
}
