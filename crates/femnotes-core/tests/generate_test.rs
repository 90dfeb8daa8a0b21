//! End-to-end tests: payload bytes in, note tree out.

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    fs,
    path::Path,
};

use femnotes_core::{
    CourseCache, CourseFetcher, FemError, MarkdownProjector, MarkdownTemplates, OutputDirectory,
    Result, TemplateOverrides, UNKNOWN_LESSON_COUNT, format_course_summary, load_course,
    parse_course,
};
use tempfile::TempDir;

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture(name: &str) -> Vec<u8> {
    fs::read(format!("{}/{}", FIXTURES_DIR, name)).expect("Failed to read fixture")
}

#[derive(Default)]
struct MemoryCache {
    entries: RefCell<HashMap<String, Vec<u8>>>,
}

impl CourseCache for MemoryCache {
    async fn read(&self, slug: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.borrow().get(slug).cloned())
    }

    async fn write(&self, slug: &str, data: &[u8]) -> Result<()> {
        self.entries.borrow_mut().insert(slug.to_string(), data.to_vec());
        Ok(())
    }
}

/// Serves one payload for one slug and counts calls.
struct FixtureFetcher {
    slug: &'static str,
    data: Vec<u8>,
    calls: Cell<usize>,
}

impl CourseFetcher for FixtureFetcher {
    async fn fetch(&self, slug: &str) -> Result<Vec<u8>> {
        self.calls.set(self.calls.get() + 1);
        if slug == self.slug {
            Ok(self.data.clone())
        } else {
            Err(FemError::CourseNotFound {
                slug: slug.to_string(),
            })
        }
    }
}

fn fetcher() -> FixtureFetcher {
    FixtureFetcher {
        slug: "go-basics",
        data: fixture("two-sections.json"),
        calls: Cell::new(0),
    }
}

fn relative_files(root: &Path) -> Vec<String> {
    fn walk(dir: &Path, root: &Path, out: &mut Vec<String>) {
        for entry in fs::read_dir(dir).unwrap().flatten() {
            let path = entry.path();
            if path.is_dir() {
                out.push(format!("{}/", path.strip_prefix(root).unwrap().display()));
                walk(&path, root, out);
            } else {
                out.push(path.strip_prefix(root).unwrap().display().to_string());
            }
        }
    }

    let mut out = Vec::new();
    walk(root, root, &mut out);
    out.sort();
    out
}

#[tokio::test]
async fn test_load_course_writes_through_cache() {
    let cache = MemoryCache::default();
    let fetcher = fetcher();

    let course = load_course("go-basics", &cache, &fetcher).await.unwrap();
    assert_eq!(course.title, "Go Basics");
    assert_eq!(fetcher.calls.get(), 1);
    assert!(cache.entries.borrow().contains_key("go-basics"));

    // Second load is served from cache.
    load_course("go-basics", &cache, &fetcher).await.unwrap();
    assert_eq!(fetcher.calls.get(), 1);
}

#[tokio::test]
async fn test_not_found_is_surfaced() {
    let cache = MemoryCache::default();

    let err = load_course("basics-go", &cache, &fetcher()).await.unwrap_err();

    assert!(matches!(err, FemError::CourseNotFound { ref slug } if slug == "basics-go"));
    assert!(cache.entries.borrow().is_empty());
}

#[tokio::test]
async fn test_generates_section_tree() {
    let dir = TempDir::new().unwrap();
    let course = parse_course("go-basics", &fixture("two-sections.json")).unwrap();
    let output = OutputDirectory::new(dir.path()).await.unwrap();
    let templates = MarkdownTemplates::bundled().unwrap();
    let tags = vec!["go".to_string()];

    let written = MarkdownProjector::new(&course, &output, &templates, &tags)
        .generate()
        .await
        .unwrap();

    assert_eq!(written.len(), 4);
    assert_eq!(
        relative_files(dir.path()),
        [
            "0-intro/",
            "0-intro/00-welcome.md",
            "1-advanced/",
            "1-advanced/01-generics.md",
            "1-advanced/02-wrapping-up.md",
            "go-basics.md",
        ]
    );

    let course_note = fs::read_to_string(dir.path().join("go-basics.md")).unwrap();
    assert!(course_note.contains("0. Intro\n  - [[0-intro/welcome.md|0. Welcome]]\n"));
    assert!(course_note.contains("1. Advanced\n  - [[1-advanced/generics.md|1. Generics]]\n"));
    assert!(course_note.contains("  - [[1-advanced/wrapping-up.md|2. Wrapping Up]]\n"));

    let lesson_note = fs::read_to_string(dir.path().join("0-intro/00-welcome.md")).unwrap();
    assert!(lesson_note.contains("> [!NOTE]+ 01:05 -> 60:01\n> Slides are linked here\n"));
    assert!(lesson_note.contains("  - go\n"));
}

#[tokio::test]
async fn test_regeneration_reuses_directories_and_overwrites_files() {
    let dir = TempDir::new().unwrap();
    let course = parse_course("go-basics", &fixture("two-sections.json")).unwrap();
    let output = OutputDirectory::new(dir.path()).await.unwrap();
    let templates = MarkdownTemplates::bundled().unwrap();

    fs::create_dir_all(dir.path().join("1-advanced")).unwrap();
    fs::write(dir.path().join("1-advanced/01-generics.md"), "stale").unwrap();

    MarkdownProjector::new(&course, &output, &templates, &[])
        .generate()
        .await
        .unwrap();

    let lesson_note = fs::read_to_string(dir.path().join("1-advanced/01-generics.md")).unwrap();
    assert!(lesson_note.contains("# 1. Generics"));
}

#[tokio::test]
async fn test_zero_section_course_writes_only_course_note() {
    let dir = TempDir::new().unwrap();
    let course = parse_course("empty", br#"{"title": "Nothing Yet"}"#).unwrap();
    let output = OutputDirectory::new(dir.path()).await.unwrap();
    let templates = MarkdownTemplates::bundled().unwrap();

    MarkdownProjector::new(&course, &output, &templates, &[])
        .generate()
        .await
        .unwrap();

    assert_eq!(relative_files(dir.path()), ["empty.md"]);
    assert_eq!(course.lesson_count, UNKNOWN_LESSON_COUNT);
    assert!(format_course_summary(&course).contains("\tNumber of Lessons: -1\n"));
}

#[tokio::test]
async fn test_custom_template_override() {
    let dir = TempDir::new().unwrap();
    let template_dir = dir.path().join("templates");
    fs::create_dir_all(&template_dir).unwrap();
    fs::write(template_dir.join("lesson.tmpl"), "{{ lesson.index }}:{{ course_slug }}").unwrap();

    let overrides = TemplateOverrides::from_paths([template_dir.join("lesson.tmpl")]).unwrap();
    let templates = MarkdownTemplates::load(&overrides).await.unwrap();
    let course = parse_course("go-basics", &fixture("two-sections.json")).unwrap();
    let output = OutputDirectory::new(dir.path().join("notes")).await.unwrap();

    MarkdownProjector::new(&course, &output, &templates, &[])
        .generate()
        .await
        .unwrap();

    let lesson_note = fs::read_to_string(output.join("1-advanced/02-wrapping-up.md")).unwrap();
    assert_eq!(lesson_note, "2:go-basics");
    // Course note still comes from the bundled template.
    let course_note = fs::read_to_string(output.join("go-basics.md")).unwrap();
    assert!(course_note.starts_with("---\n"));
}

#[tokio::test]
async fn test_filesystem_error_aborts_generation() {
    let dir = TempDir::new().unwrap();
    let course = parse_course("go-basics", &fixture("two-sections.json")).unwrap();
    let output = OutputDirectory::new(dir.path()).await.unwrap();
    let templates = MarkdownTemplates::bundled().unwrap();

    // A plain file where the first section directory should go.
    fs::write(dir.path().join("0-intro"), "in the way").unwrap();

    let err = MarkdownProjector::new(&course, &output, &templates, &[])
        .generate()
        .await
        .unwrap_err();

    assert!(matches!(err, FemError::IoError(_)));
    assert!(dir.path().join("go-basics.md").exists());
    assert!(!dir.path().join("1-advanced").exists());
}
