use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FemError {
    #[error("Course not found: {slug}")]
    CourseNotFound { slug: String },

    #[error("Failed to parse section duration {duration:?}: {reason}")]
    DurationUnparseable { duration: String, reason: String },

    #[error("Lesson {hash} has index {index}, outside of the {count} lessons recorded in sections")]
    LessonIndexOutOfRange {
        hash: String,
        index: usize,
        count: usize,
    },

    #[error("Lesson index {index} is too large to count lessons from")]
    LessonCountOverflow { index: usize },

    #[error("Sections record {count} lessons but lesson data has only {lessons}")]
    LessonCountMismatch { count: usize, lessons: usize },

    #[error("Invalid template {path}: allowed template filenames are course.tmpl and lesson.tmpl")]
    InvalidTemplateName { path: PathBuf },

    #[error("Template error: {0}")]
    TemplateError(#[from] minijinja::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, FemError>;
