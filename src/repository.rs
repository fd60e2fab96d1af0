//! Markdown items of one family, stored as `<root>/<category>/<slug>.md`.
//!
//! The directory tree is the only source of truth: every call re-reads it and
//! nothing is cached between calls. Concurrent writers to the same slug race
//! and the last write wins.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local};
use log::{debug, info, warn};
use rand::Rng;
use serde::Serialize;

use crate::category;
use crate::error::{ContentError, Result};
use crate::gate::Authorized;
use crate::markdown;
use crate::metadata::{
    FeaturedItem, ItemKey, ItemPage, ItemSummary, Submission, UpdateAction, UpdateOutcome,
};
use crate::slug::{humanize, slugify};

/// `category_select` value asking for a brand new category.
pub const NEW_CATEGORY: &str = "__new__";
/// Collides with the `/<family>/add` route.
pub const RESERVED_TITLE: &str = "add";

const LIST_DATE_FORMAT: &str = "%d %B %Y %H:%M";
const CREATED_DATE_FORMAT: &str = "%Y %m %d";

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    Posts,
    Projects,
    Notes,
}

impl Family {
    pub const ALL: [Family; 3] = [Family::Posts, Family::Projects, Family::Notes];

    /// Directory under the content dir, also the URL prefix.
    pub fn dir_name(self) -> &'static str {
        match self {
            Family::Posts => "posts",
            Family::Projects => "projects",
            Family::Notes => "notes",
        }
    }

    pub fn singular(self) -> &'static str {
        match self {
            Family::Posts => "post",
            Family::Projects => "project",
            Family::Notes => "note",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Family::Posts => "Posts",
            Family::Projects => "Projects",
            Family::Notes => "Notes",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

fn format_time(time: SystemTime, format: &str) -> String {
    DateTime::<Local>::from(time).format(format).to_string()
}

// Windows reports a real creation time; elsewhere ctime is a metadata change
// time, so the modification time stands in for it.
#[cfg(windows)]
fn created_at(meta: &fs::Metadata) -> io::Result<SystemTime> {
    meta.created()
}

#[cfg(not(windows))]
fn created_at(meta: &fs::Metadata) -> io::Result<SystemTime> {
    meta.modified()
}

/// Category and slug values end up in paths; only plain names are allowed.
fn checked_segment<'a>(kind: &str, value: &'a str) -> Result<&'a str> {
    if value.is_empty() || value.starts_with('.') || value.contains(['/', '\\']) {
        return Err(ContentError::not_found(format!("{kind} {value:?}")));
    }
    Ok(value)
}

fn read_body(path: &Path) -> Result<String> {
    match fs::read(path) {
        Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Err(ContentError::not_found(path.display().to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Fills a freshly claimed file. A failed write removes the file again so no
/// empty item is left behind.
fn write_claimed(mut fd: impl Write, path: &Path, bytes: &[u8]) -> Result<()> {
    if let Err(e) = fd.write_all(bytes).and_then(|()| fd.flush()) {
        drop(fd);
        if let Err(cleanup) = fs::remove_file(path) {
            warn!("could not remove partial {}: {cleanup}", path.display());
        }
        return Err(e.into());
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct Repository {
    family: Family,
    root: PathBuf,
}

impl Repository {
    pub fn new(family: Family, content_dir: &Path) -> Self {
        Self {
            family,
            root: content_dir.join(family.dir_name()),
        }
    }

    pub fn family(&self) -> Family {
        self.family
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Creates the family root if it does not exist yet.
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        Ok(())
    }

    pub fn categories(&self) -> Result<Vec<String>> {
        category::list_categories(&self.root)
    }

    fn item_path(&self, category: &str, slug: &str) -> Result<PathBuf> {
        let category = checked_segment("category", category)?;
        let slug = checked_segment(self.family.singular(), slug)?;
        Ok(self.root.join(category).join(format!("{slug}.md")))
    }

    fn existing_item_path(&self, category: &str, slug: &str) -> Result<PathBuf> {
        let path = self.item_path(category, slug)?;
        if !path.is_file() {
            return Err(ContentError::not_found(format!(
                "{} {category}/{slug}",
                self.family.singular()
            )));
        }
        Ok(path)
    }

    /// Every item across every category, most recently modified first.
    pub fn list_all(&self) -> Result<Vec<ItemSummary>> {
        let mut items = vec![];
        for category in self.categories()? {
            let keywords = category::get_keywords(&self.root, &category)?;
            for entry in fs::read_dir(self.root.join(&category))? {
                let entry = entry?;
                let file_name = entry.file_name();
                let Some(slug) = file_name.to_str().and_then(|n| n.strip_suffix(".md")) else {
                    continue;
                };
                // the file may disappear between read_dir and stat
                let Ok(meta) = entry.metadata() else {
                    continue;
                };
                if !meta.is_file() {
                    continue;
                }
                let modified = meta.modified()?;
                items.push(ItemSummary {
                    slug: slug.to_string(),
                    title: humanize(slug),
                    category: category.clone(),
                    keywords: keywords.clone(),
                    date: format_time(modified, LIST_DATE_FORMAT),
                    modified,
                });
            }
        }

        items.sort_by(|a, b| {
            b.modified
                .cmp(&a.modified)
                .then_with(|| a.category.cmp(&b.category))
                .then_with(|| a.slug.cmp(&b.slug))
        });
        debug!("listed {} {}", items.len(), self.family);
        Ok(items)
    }

    /// Renders the item at `index` in the listing, or a uniformly random one
    /// when no index is given.
    pub fn get_one(&self, index: Option<usize>) -> Result<FeaturedItem> {
        let items = self.list_all()?;
        if items.is_empty() {
            return Err(ContentError::Empty(self.family));
        }
        let index = index.unwrap_or_else(|| rand::thread_rng().gen_range(0..items.len()));
        let item = items.get(index).ok_or_else(|| {
            ContentError::not_found(format!("{} #{index}", self.family.singular()))
        })?;

        let body = read_body(&self.item_path(&item.category, &item.slug)?)?;
        Ok(FeaturedItem {
            slug: item.slug.clone(),
            title: item.title.clone(),
            category: item.category.clone(),
            date: item.date.clone(),
            html: markdown::render(&body),
        })
    }

    pub fn get_by_slug(&self, category: &str, slug: &str) -> Result<ItemPage> {
        let path = self.existing_item_path(category, slug)?;
        let body = read_body(&path)?;
        let created = created_at(&fs::metadata(&path)?)?;

        Ok(ItemPage {
            slug: slug.to_string(),
            title: humanize(slug),
            category: category.to_string(),
            keywords: category::get_keywords(&self.root, category)?,
            created: format_time(created, CREATED_DATE_FORMAT),
            html: markdown::render(&body),
        })
    }

    /// Raw markdown of an item, for the editor.
    pub fn read_source(&self, category: &str, slug: &str) -> Result<String> {
        read_body(&self.existing_item_path(category, slug)?)
    }

    /// Resolves a bare slug to its category. See [`category::find_category_of`]
    /// for how duplicates are resolved.
    pub fn locate(&self, slug: &str) -> Result<ItemKey> {
        let slug = checked_segment(self.family.singular(), slug)?;
        match category::find_category_of(&self.root, slug)? {
            Some(category) => Ok(ItemKey {
                category,
                slug: slug.to_string(),
            }),
            None => Err(ContentError::not_found(format!(
                "{} {slug}",
                self.family.singular()
            ))),
        }
    }

    /// Path of an existing item, to be streamed back verbatim.
    pub fn download(&self, category: &str, slug: &str) -> Result<PathBuf> {
        self.existing_item_path(category, slug)
    }

    /// Stores an uploaded markdown file under a slug derived from its title.
    ///
    /// On a slug collision inside the target category `-1`, `-2`, ... is
    /// appended until the name is free.
    pub fn create(&self, _auth: &Authorized, submission: Submission) -> Result<ItemKey> {
        // only the bare literal is reserved; " add " slugs to "add" and is fine
        if submission.title.as_deref() == Some(RESERVED_TITLE) {
            return Err(ContentError::validation(format!(
                "title must not be '{RESERVED_TITLE}'"
            )));
        }
        let title = submission
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ContentError::validation("title must not be empty"))?;

        let file = submission
            .file
            .filter(|f| !f.filename.is_empty())
            .ok_or_else(|| ContentError::validation("no file selected"))?;
        if !file.is_markdown() {
            return Err(ContentError::validation("only .md files are accepted"));
        }

        // checked before the category so a rejected title never creates one
        let base = slugify(title);
        if base.is_empty() {
            return Err(ContentError::validation(
                "title must contain at least one letter or digit",
            ));
        }

        let category = self.resolve_category(
            submission.category_select.as_deref(),
            submission.new_category.as_deref(),
            submission.new_keywords.as_deref(),
        )?;

        let dir = self.root.join(&category);
        let mut slug = base.clone();
        let mut suffix = 1;
        loop {
            let path = dir.join(format!("{slug}.md"));
            // create_new makes the existence check and the claim one step
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(fd) => {
                    write_claimed(fd, &path, &file.bytes)?;
                    break;
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    slug = format!("{base}-{suffix}");
                    suffix += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }

        info!("created {} {category}/{slug}", self.family.singular());
        Ok(ItemKey { category, slug })
    }

    fn resolve_category(
        &self,
        selected: Option<&str>,
        new_category: Option<&str>,
        new_keywords: Option<&str>,
    ) -> Result<String> {
        match selected.filter(|s| !s.is_empty()) {
            Some(NEW_CATEGORY) => {
                let name = new_category
                    .map(slugify)
                    .filter(|c| !c.is_empty())
                    .ok_or_else(|| ContentError::validation("new category name must not be empty"))?;
                let keywords = new_keywords
                    .map(str::trim)
                    .filter(|k| !k.is_empty())
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("#{name}"));
                category::ensure_category(&self.root, &name, &keywords)?;
                Ok(name)
            }
            Some(existing) => {
                let existing = checked_segment("category", existing)?;
                if !self.root.join(existing).is_dir() {
                    return Err(ContentError::not_found(format!("category {existing}")));
                }
                Ok(existing.to_string())
            }
            None => Err(ContentError::validation("no category selected")),
        }
    }

    /// Applies one update action to `<category>/<slug>.md`. Writes are full
    /// overwrites.
    pub fn update(
        &self,
        _auth: &Authorized,
        category: &str,
        slug: &str,
        action: UpdateAction,
    ) -> Result<UpdateOutcome> {
        let outcome = match action {
            UpdateAction::Save { content } => {
                let path = self.existing_item_path(category, slug)?;
                fs::write(path, content)?;
                UpdateOutcome::Saved
            }
            UpdateAction::Upload(upload) => {
                if !upload.is_markdown() {
                    return Err(ContentError::validation("only .md files are accepted"));
                }
                let path = self.existing_item_path(category, slug)?;
                fs::write(path, upload.bytes)?;
                UpdateOutcome::Replaced
            }
            UpdateAction::Delete { confirm_slug } => {
                let path = self.item_path(category, slug)?;
                if confirm_slug != slug {
                    return Err(ContentError::ConfirmationMismatch);
                }
                if !path.is_file() {
                    return Err(ContentError::not_found(format!(
                        "{} {category}/{slug}",
                        self.family.singular()
                    )));
                }
                fs::remove_file(path)?;
                UpdateOutcome::Deleted
            }
        };

        info!(
            "{outcome:?} {} {category}/{slug}",
            self.family.singular()
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::gate::AccessGate;
    use crate::metadata::Upload;
    use tempfile::TempDir;

    fn authorized() -> Authorized {
        AccessGate::new(&bcrypt::hash("pw", 4).unwrap())
            .verify(Some("pw"))
            .unwrap()
    }

    fn md(name: &str, body: &str) -> Upload {
        Upload {
            filename: name.to_string(),
            bytes: body.as_bytes().to_vec(),
        }
    }

    fn submission(title: &str, category: &str, body: &str) -> Submission {
        Submission {
            title: Some(title.to_string()),
            file: Some(md("upload.md", body)),
            category_select: Some(category.to_string()),
            ..Default::default()
        }
    }

    fn setup() -> (TempDir, Repository) {
        let tmp = TempDir::new().unwrap();
        let repo = Repository::new(Family::Posts, tmp.path());
        repo.init().unwrap();
        (tmp, repo)
    }

    fn seed(repo: &Repository, category: &str, slug: &str, body: &str, secs_ago: u64) {
        let dir = repo.root().join(category);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(format!("{slug}.md"));
        fs::write(&path, body).unwrap();
        touch(&path, secs_ago);
    }

    fn touch(path: &Path, secs_ago: u64) {
        let time = SystemTime::now() - Duration::from_secs(secs_ago);
        fs::File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(time)
            .unwrap();
    }

    #[test]
    fn family_roots_are_separate() {
        let tmp = TempDir::new().unwrap();
        for family in Family::ALL {
            let repo = Repository::new(family, tmp.path());
            repo.init().unwrap();
            assert_eq!(repo.root(), tmp.path().join(family.dir_name()));
        }
        assert!(tmp.path().join("projects").is_dir());
    }

    #[test]
    fn list_all_is_newest_first() {
        let (_tmp, repo) = setup();
        seed(&repo, "rust", "oldest-one", "a", 300);
        seed(&repo, "linux", "middle", "b", 200);
        seed(&repo, "rust", "newest", "c", 100);
        fs::write(repo.root().join("rust").join("ignored.txt"), "x").unwrap();

        let slugs: Vec<_> = repo.list_all().unwrap().into_iter().map(|i| i.slug).collect();
        assert_eq!(slugs, vec!["newest", "middle", "oldest-one"]);

        touch(&repo.root().join("rust").join("oldest-one.md"), 10);
        let slugs: Vec<_> = repo.list_all().unwrap().into_iter().map(|i| i.slug).collect();
        assert_eq!(slugs, vec!["oldest-one", "newest", "middle"]);
    }

    #[test]
    fn list_all_carries_title_and_keywords() {
        let (_tmp, repo) = setup();
        category::ensure_category(repo.root(), "rust", "#rust\n#cargo").unwrap();
        seed(&repo, "rust", "hello-world", "# hi", 5);

        let items = repo.list_all().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Hello World");
        assert_eq!(items[0].category, "rust");
        assert_eq!(items[0].keywords, vec!["#rust", "#cargo"]);
        assert!(!items[0].date.is_empty());
    }

    #[test]
    fn get_one_on_empty_family() {
        let (_tmp, repo) = setup();
        assert!(matches!(
            repo.get_one(None),
            Err(ContentError::Empty(Family::Posts))
        ));
        fs::create_dir(repo.root().join("empty-category")).unwrap();
        assert!(matches!(repo.get_one(Some(0)), Err(ContentError::Empty(_))));
    }

    #[test]
    fn get_one_random_stays_in_collection() {
        let (_tmp, repo) = setup();
        seed(&repo, "rust", "only", "# Only", 5);
        for _ in 0..20 {
            assert_eq!(repo.get_one(None).unwrap().slug, "only");
        }

        seed(&repo, "rust", "second", "two", 4);
        seed(&repo, "linux", "third", "three", 3);
        let known = ["only", "second", "third"];
        for _ in 0..50 {
            let item = repo.get_one(None).unwrap();
            assert!(known.contains(&item.slug.as_str()), "{}", item.slug);
        }
    }

    #[test]
    fn get_one_by_index_renders_markdown() {
        let (_tmp, repo) = setup();
        seed(&repo, "rust", "older", "older", 50);
        seed(&repo, "rust", "latest", "# Latest\n\n| a |\n|---|\n| 1 |\n", 5);

        let item = repo.get_one(Some(0)).unwrap();
        assert_eq!(item.slug, "latest");
        assert_eq!(item.category, "rust");
        assert!(item.html.contains("<h1>Latest</h1>"));
        assert!(item.html.contains("<table>"));

        assert!(matches!(
            repo.get_one(Some(2)),
            Err(ContentError::NotFound(_))
        ));
    }

    #[test]
    fn get_by_slug_reads_one_item() {
        let (_tmp, repo) = setup();
        category::ensure_category(repo.root(), "rust", "#rust").unwrap();
        seed(&repo, "rust", "intro", "*hi*", 5);

        let page = repo.get_by_slug("rust", "intro").unwrap();
        assert_eq!(page.title, "Intro");
        assert_eq!(page.keywords, vec!["#rust"]);
        assert!(page.html.contains("<em>hi</em>"));
        assert_eq!(page.created.len(), "2024 01 31".len());

        assert!(matches!(
            repo.get_by_slug("rust", "missing"),
            Err(ContentError::NotFound(_))
        ));
        assert!(matches!(
            repo.get_by_slug("..", "intro"),
            Err(ContentError::NotFound(_))
        ));
    }

    #[test]
    fn create_appends_suffix_on_collision() {
        let (_tmp, repo) = setup();
        fs::create_dir(repo.root().join("rust")).unwrap();
        let auth = authorized();

        let first = repo.create(&auth, submission("My Post", "rust", "one")).unwrap();
        let second = repo.create(&auth, submission("My Post", "rust", "two")).unwrap();
        let third = repo.create(&auth, submission("my post!", "rust", "three")).unwrap();

        assert_eq!(first.slug, "my-post");
        assert_eq!(second.slug, "my-post-1");
        assert_eq!(third.slug, "my-post-2");
        assert_eq!(
            fs::read_to_string(repo.root().join("rust").join("my-post-1.md")).unwrap(),
            "two"
        );
    }

    #[test]
    fn create_same_title_in_other_category_keeps_slug() {
        let (_tmp, repo) = setup();
        fs::create_dir(repo.root().join("rust")).unwrap();
        fs::create_dir(repo.root().join("linux")).unwrap();
        let auth = authorized();

        repo.create(&auth, submission("Setup", "rust", "a")).unwrap();
        let key = repo.create(&auth, submission("Setup", "linux", "b")).unwrap();
        assert_eq!(key.slug, "setup");
        assert_eq!(key.category, "linux");
    }

    #[test]
    fn create_new_category_defaults_keywords() {
        let (_tmp, repo) = setup();
        let auth = authorized();

        let key = repo
            .create(
                &auth,
                Submission {
                    new_category: Some("Home Lab".to_string()),
                    ..submission("Rack", NEW_CATEGORY, "rack")
                },
            )
            .unwrap();
        assert_eq!(key.category, "home-lab");
        assert_eq!(
            category::get_keywords(repo.root(), "home-lab").unwrap(),
            vec!["#home-lab"]
        );

        repo.create(
            &auth,
            Submission {
                new_category: Some("Garden".to_string()),
                new_keywords: Some("  #plants\n#soil  ".to_string()),
                ..submission("Tomatoes", NEW_CATEGORY, "red")
            },
        )
        .unwrap();
        assert_eq!(
            category::get_keywords(repo.root(), "garden").unwrap(),
            vec!["#plants", "#soil"]
        );
    }

    #[test]
    fn create_validates_fields() {
        let (_tmp, repo) = setup();
        fs::create_dir(repo.root().join("rust")).unwrap();
        let auth = authorized();

        let cases = [
            Submission {
                title: None,
                ..submission("", "rust", "x")
            },
            submission("   ", "rust", "x"),
            submission("add", "rust", "x"),
            submission("???", "rust", "x"),
            Submission {
                file: None,
                ..submission("Fine", "rust", "x")
            },
            Submission {
                file: Some(md("", "x")),
                ..submission("Fine", "rust", "x")
            },
            Submission {
                file: Some(md("notes.txt", "x")),
                ..submission("Fine", "rust", "x")
            },
            Submission {
                category_select: None,
                ..submission("Fine", "rust", "x")
            },
            submission("Fine", NEW_CATEGORY, "x"),
        ];
        for case in cases {
            let res = repo.create(&auth, case.clone());
            assert!(
                matches!(res, Err(ContentError::Validation(_))),
                "{case:?} -> {res:?}"
            );
        }

        assert!(matches!(
            repo.create(&auth, submission("Fine", "nope", "x")),
            Err(ContentError::NotFound(_))
        ));
        assert!(repo.list_all().unwrap().is_empty());
    }

    #[test]
    fn rejected_title_leaves_no_new_category() {
        let (_tmp, repo) = setup();
        let case = Submission {
            new_category: Some("Junk".to_string()),
            ..submission("???", NEW_CATEGORY, "x")
        };
        assert!(matches!(
            repo.create(&authorized(), case),
            Err(ContentError::Validation(_))
        ));
        assert!(!repo.root().join("junk").exists());
        assert!(repo.categories().unwrap().is_empty());
    }

    #[test]
    fn only_the_bare_reserved_title_is_refused() {
        let (_tmp, repo) = setup();
        fs::create_dir(repo.root().join("rust")).unwrap();
        let auth = authorized();

        assert!(matches!(
            repo.create(&auth, submission("add", "rust", "x")),
            Err(ContentError::Validation(_))
        ));
        for (title, slug) in [(" add ", "add"), ("Add", "add-1"), ("add more", "add-more")] {
            let key = repo.create(&auth, submission(title, "rust", "x")).unwrap();
            assert_eq!(key.slug, slug, "{title:?}");
        }
    }

    struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(ErrorKind::Other, "no space left"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failed_write_removes_claimed_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("claimed.md");
        fs::File::create(&path).unwrap();

        assert!(matches!(
            write_claimed(FullDisk, &path, b"# body"),
            Err(ContentError::Io(_))
        ));
        assert!(!path.exists());

        let fd = fs::File::create(&path).unwrap();
        write_claimed(fd, &path, b"# body").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "# body");
    }

    #[test]
    fn save_overwrites_with_empty_body() {
        let (_tmp, repo) = setup();
        seed(&repo, "rust", "intro", "# something", 5);

        let outcome = repo
            .update(
                &authorized(),
                "rust",
                "intro",
                UpdateAction::Save {
                    content: String::new(),
                },
            )
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::Saved);
        assert_eq!(repo.get_by_slug("rust", "intro").unwrap().html, "");
        assert_eq!(repo.read_source("rust", "intro").unwrap(), "");
    }

    #[test]
    fn save_requires_existing_item() {
        let (_tmp, repo) = setup();
        fs::create_dir(repo.root().join("rust")).unwrap();
        let res = repo.update(
            &authorized(),
            "rust",
            "ghost",
            UpdateAction::Save {
                content: "boo".to_string(),
            },
        );
        assert!(matches!(res, Err(ContentError::NotFound(_))));
        assert!(!repo.root().join("rust").join("ghost.md").exists());
    }

    #[test]
    fn upload_replaces_bytes_at_fixed_path() {
        let (_tmp, repo) = setup();
        seed(&repo, "rust", "intro", "old", 5);
        let auth = authorized();

        let outcome = repo
            .update(
                &auth,
                "rust",
                "intro",
                UpdateAction::Upload(md("whatever-name.md", "new body")),
            )
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::Replaced);
        assert_eq!(repo.read_source("rust", "intro").unwrap(), "new body");
        assert!(!repo.root().join("rust").join("whatever-name.md").exists());

        let res = repo.update(
            &auth,
            "rust",
            "intro",
            UpdateAction::Upload(md("intro.html", "<p>")),
        );
        assert!(matches!(res, Err(ContentError::Validation(_))));
        assert_eq!(repo.read_source("rust", "intro").unwrap(), "new body");
    }

    #[test]
    fn delete_needs_matching_confirmation() {
        let (_tmp, repo) = setup();
        seed(&repo, "rust", "intro", "body", 5);
        let auth = authorized();
        let path = repo.root().join("rust").join("intro.md");

        for wrong in ["", "Intro", "intro ", "other"] {
            let res = repo.update(
                &auth,
                "rust",
                "intro",
                UpdateAction::Delete {
                    confirm_slug: wrong.to_string(),
                },
            );
            assert!(matches!(res, Err(ContentError::ConfirmationMismatch)));
            assert!(path.exists());
        }

        let outcome = repo
            .update(
                &auth,
                "rust",
                "intro",
                UpdateAction::Delete {
                    confirm_slug: "intro".to_string(),
                },
            )
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::Deleted);
        assert!(!path.exists());

        let res = repo.update(
            &auth,
            "rust",
            "intro",
            UpdateAction::Delete {
                confirm_slug: "intro".to_string(),
            },
        );
        assert!(matches!(res, Err(ContentError::NotFound(_))));
    }

    #[test]
    fn upload_then_download_is_byte_identical() {
        let (_tmp, repo) = setup();
        fs::create_dir(repo.root().join("rust")).unwrap();
        let body = "# Título\n\nline one\r\nline two\n\n```\ncode\n```\n";

        let key = repo
            .create(&authorized(), submission("Round Trip", "rust", body))
            .unwrap();
        let path = repo.download(&key.category, &key.slug).unwrap();
        assert_eq!(fs::read(path).unwrap(), body.as_bytes());

        assert!(matches!(
            repo.download("rust", "missing"),
            Err(ContentError::NotFound(_))
        ));
    }

    #[test]
    fn locate_finds_category() {
        let (_tmp, repo) = setup();
        seed(&repo, "rust", "intro", "x", 5);
        assert_eq!(
            repo.locate("intro").unwrap(),
            ItemKey {
                category: "rust".to_string(),
                slug: "intro".to_string()
            }
        );
        assert!(matches!(
            repo.locate("missing"),
            Err(ContentError::NotFound(_))
        ));
    }
}
