//! femnotes Core Library
//!
//! Fetches Frontend Masters course descriptions, rebuilds their section and
//! lesson structure, and writes them out as a tree of linked markdown notes.

pub mod api;
pub mod cache;
pub mod course;
pub mod duration;
pub mod error;
pub mod format;
pub mod markdown;
pub mod output;
pub mod pipeline;
pub mod sections;
pub mod slug;
pub mod templates;
pub mod types;

// Re-export commonly used items at crate root
pub use api::{ApiClient, ApiConfig, CourseFetcher};
pub use cache::{CourseCache, DiskCache, get_course_path, get_root_cache_dir};
pub use course::{Course, CourseFields, UNKNOWN_LESSON_COUNT};
pub use error::{FemError, Result};
pub use format::{
    format_annotations, format_course_data, format_course_summary, format_tags, format_timestamp,
};
pub use markdown::MarkdownProjector;
pub use output::OutputDirectory;
pub use pipeline::{load_course, load_course_bytes, parse_course};
pub use sections::{LessonElement, parse_sections};
pub use slug::{SlugTable, slugify};
pub use templates::{MarkdownTemplates, TemplateOverrides};
pub use types::{Annotation, Lesson, Section};
