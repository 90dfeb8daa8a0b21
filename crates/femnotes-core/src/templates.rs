//! Course and lesson note templates.
//!
//! Templates are rendered with `minijinja` and can call three helpers:
//! `formattags(tags)`, `formatcoursedata(course)` and
//! `formatannotations(annotations)`.

use std::path::{Path, PathBuf};

use minijinja::{AutoEscape, Environment, ErrorKind, Value};
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    course::Course,
    error::{FemError, Result},
    format::{format_annotations, format_course_data, format_tags},
    types::{Annotation, Lesson},
};

pub const COURSE_TEMPLATE: &str = "course.tmpl";
pub const LESSON_TEMPLATE: &str = "lesson.tmpl";

const BUNDLED_COURSE: &str = include_str!("../templates/obsidian/course.tmpl");
const BUNDLED_LESSON: &str = include_str!("../templates/obsidian/lesson.tmpl");

/// User-supplied template files, validated by file name.
#[derive(Debug, Clone, Default)]
pub struct TemplateOverrides {
    course: Option<PathBuf>,
    lesson: Option<PathBuf>,
}

impl TemplateOverrides {
    /// Accepts only files named `course.tmpl` or `lesson.tmpl`. A later path
    /// for the same template replaces an earlier one.
    pub fn from_paths<I, P>(paths: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut overrides = Self::default();

        for path in paths {
            let path: PathBuf = path.into();
            match path.file_name().and_then(|name| name.to_str()) {
                Some(COURSE_TEMPLATE) => overrides.course = Some(path),
                Some(LESSON_TEMPLATE) => overrides.lesson = Some(path),
                _ => return Err(FemError::InvalidTemplateName { path }),
            }
        }

        Ok(overrides)
    }

    pub fn course(&self) -> Option<&Path> {
        self.course.as_deref()
    }

    pub fn lesson(&self) -> Option<&Path> {
        self.lesson.as_deref()
    }
}

#[derive(Serialize)]
struct CourseContext<'a> {
    course: &'a Course,
    tags: &'a [String],
}

#[derive(Serialize)]
struct LessonContext<'a> {
    lesson: &'a Lesson,
    tags: &'a [String],
    course_slug: &'a str,
}

/// The course/lesson template pair with helpers registered.
pub struct MarkdownTemplates {
    env: Environment<'static>,
}

impl MarkdownTemplates {
    /// The bundled Obsidian templates.
    pub fn bundled() -> Result<Self> {
        Self::with_sources(BUNDLED_COURSE.to_string(), BUNDLED_LESSON.to_string())
    }

    /// Bundled templates with any overrides read from disk.
    pub async fn load(overrides: &TemplateOverrides) -> Result<Self> {
        let course = match overrides.course() {
            Some(path) => tokio::fs::read_to_string(path).await?,
            None => BUNDLED_COURSE.to_string(),
        };
        let lesson = match overrides.lesson() {
            Some(path) => tokio::fs::read_to_string(path).await?,
            None => BUNDLED_LESSON.to_string(),
        };

        Self::with_sources(course, lesson)
    }

    pub fn with_sources(course: String, lesson: String) -> Result<Self> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_keep_trailing_newline(true);

        env.add_function("formattags", |tags: Value| {
            from_template_value::<Vec<String>>(&tags).map(|tags| format_tags(&tags))
        });
        env.add_function("formatcoursedata", |course: Value| {
            from_template_value::<Course>(&course).map(|course| format_course_data(&course))
        });
        env.add_function("formatannotations", |annotations: Value| {
            from_template_value::<Vec<Annotation>>(&annotations)
                .map(|annotations| format_annotations(&annotations))
        });

        env.add_template_owned(COURSE_TEMPLATE, course)?;
        env.add_template_owned(LESSON_TEMPLATE, lesson)?;

        Ok(Self { env })
    }

    pub fn render_course(&self, course: &Course, tags: &[String]) -> Result<String> {
        let template = self.env.get_template(COURSE_TEMPLATE)?;
        Ok(template.render(CourseContext { course, tags })?)
    }

    pub fn render_lesson(
        &self,
        lesson: &Lesson,
        tags: &[String],
        course_slug: &str,
    ) -> Result<String> {
        let template = self.env.get_template(LESSON_TEMPLATE)?;
        Ok(template.render(LessonContext {
            lesson,
            tags,
            course_slug,
        })?)
    }
}

fn from_template_value<T: DeserializeOwned>(
    value: &Value,
) -> std::result::Result<T, minijinja::Error> {
    serde_json::to_value(value)
        .and_then(serde_json::from_value)
        .map_err(|e| minijinja::Error::new(ErrorKind::InvalidOperation, e.to_string()))
}
