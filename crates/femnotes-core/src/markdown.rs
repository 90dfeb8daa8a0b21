use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::{
    course::Course,
    error::Result,
    output::OutputDirectory,
    templates::MarkdownTemplates,
    types::Lesson,
};

/// Name of the directory holding the notes of section `x`.
pub fn section_dir_name(x: usize, section_slug: &str) -> String {
    format!("{}-{}", x, section_slug)
}

/// File name of a lesson note.
pub fn lesson_file_name(lesson: &Lesson) -> String {
    format!("{:02}-{}.md", lesson.index, lesson.slug)
}

/// Writes a course as one course note plus one directory of lesson notes per
/// section.
pub struct MarkdownProjector<'a> {
    course: &'a Course,
    output: &'a OutputDirectory,
    templates: &'a MarkdownTemplates,
    tags: &'a [String],
}

impl<'a> MarkdownProjector<'a> {
    pub fn new(
        course: &'a Course,
        output: &'a OutputDirectory,
        templates: &'a MarkdownTemplates,
        tags: &'a [String],
    ) -> Self {
        Self {
            course,
            output,
            templates,
            tags,
        }
    }

    /// Write every note and return the paths written, course note first.
    ///
    /// Stops at the first error; files already written stay on disk.
    pub async fn generate(&self) -> Result<Vec<PathBuf>> {
        let mut written = vec![self.generate_course().await?];

        for (x, section) in self.course.sections.iter().enumerate() {
            let section_dir = self
                .output
                .create(section_dir_name(x, &section.slug()))
                .await?;
            debug!(dir = %section_dir.path().display(), "section directory ready");

            for &lesson_index in &section.lesson_indices {
                let Some(lesson) = self.course.lesson_at(lesson_index) else {
                    warn!(lesson_index, section = %section.title, "no lesson data for index");
                    continue;
                };
                written.push(self.generate_lesson(&section_dir, lesson).await?);
            }
        }

        info!(
            course = %self.course.slug,
            files = written.len(),
            "generated course notes"
        );
        Ok(written)
    }

    pub async fn generate_course(&self) -> Result<PathBuf> {
        let contents = self.templates.render_course(self.course, self.tags)?;
        self.output
            .write_file(format!("{}.md", self.course.slug), &contents)
            .await
    }

    pub async fn generate_lesson(
        &self,
        section_dir: &OutputDirectory,
        lesson: &Lesson,
    ) -> Result<PathBuf> {
        let contents = self
            .templates
            .render_lesson(lesson, self.tags, &self.course.slug)?;
        section_dir
            .write_file(lesson_file_name(lesson), &contents)
            .await
    }
}
