//! Category folders under a family's content root.
//!
//! A category is any subdirectory of the root. Its keywords live one per line
//! in `<root>/<category>/config.txt`.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

use log::info;

use crate::error::Result;

pub const KEYWORDS_FILE: &str = "config.txt";

/// Every subdirectory name under `root`, sorted by name.
pub fn list_categories(root: &Path) -> Result<Vec<String>> {
    let mut categories = vec![];
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => categories.push(name),
            Err(name) => log::warn!("skipping category with non utf-8 name: {name:?}"),
        }
    }
    categories.sort();
    Ok(categories)
}

/// Trimmed, non-empty lines of the category's keyword file. A missing file
/// yields no keywords.
pub fn get_keywords(root: &Path, category: &str) -> Result<Vec<String>> {
    let content = match fs::read_to_string(root.join(category).join(KEYWORDS_FILE)) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(vec![]),
        Err(e) => return Err(e.into()),
    };
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Creates the category directory and its keyword file when they are missing.
/// Existing keywords are never overwritten.
pub fn ensure_category(root: &Path, category: &str, keywords_text: &str) -> Result<()> {
    let dir = root.join(category);
    fs::create_dir_all(&dir)?;

    // create_new keeps a concurrent first writer's keywords intact
    match OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(dir.join(KEYWORDS_FILE))
    {
        Ok(mut fd) => {
            writeln!(fd, "{}", keywords_text.trim())?;
            info!("created category {:?} in {:?}", category, root);
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// First category (in name order) holding `<slug>.md`.
///
/// The same slug may exist in several categories; the first one wins.
pub fn find_category_of(root: &Path, slug: &str) -> Result<Option<String>> {
    let file_name = format!("{slug}.md");
    Ok(list_categories(root)?
        .into_iter()
        .find(|category| root.join(category).join(&file_name).is_file()))
}
