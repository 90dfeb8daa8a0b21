use std::{collections::HashMap, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{
    duration::parse_duration,
    error::{FemError, Result},
    format::format_course_summary,
    types::{Lesson, Section},
};

/// Lesson count reported when no section has been parsed.
pub const UNKNOWN_LESSON_COUNT: i64 = -1;

/// Top-level course fields as delivered by the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseFields {
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub date_published: String,
    #[serde(default)]
    pub description: String,
}

/// The assembled, read-only course model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub slug: String,
    pub title: String,
    pub date_published: String,
    pub description: String,
    pub sections: Vec<Section>,
    /// `lesson_index_to_hash[lesson.index]` is the key of that lesson in `lessons`.
    pub lesson_index_to_hash: Vec<String>,
    pub lessons: HashMap<String, Lesson>,
    pub lesson_count: i64,
}

impl Course {
    pub fn assemble(
        fields: CourseFields,
        sections: Vec<Section>,
        lessons: HashMap<String, Lesson>,
    ) -> Result<Self> {
        let lesson_count = lesson_count(&sections)?;
        let table_len = usize::try_from(lesson_count).unwrap_or(0);

        // Every slot needs a lesson; checked before allocating the table.
        if table_len > lessons.len() {
            return Err(FemError::LessonCountMismatch {
                count: table_len,
                lessons: lessons.len(),
            });
        }

        let mut lesson_index_to_hash = vec![String::new(); table_len];
        if lesson_count != UNKNOWN_LESSON_COUNT {
            for (hash, lesson) in &lessons {
                let slot = lesson_index_to_hash.get_mut(lesson.index).ok_or_else(|| {
                    FemError::LessonIndexOutOfRange {
                        hash: hash.clone(),
                        index: lesson.index,
                        count: table_len,
                    }
                })?;
                *slot = hash.clone();
            }
        }

        Ok(Self {
            slug: fields.slug,
            title: fields.title,
            date_published: fields.date_published,
            description: fields.description,
            sections,
            lesson_index_to_hash,
            lessons,
            lesson_count,
        })
    }

    /// Resolve a global lesson index to its lesson.
    pub fn lesson_at(&self, index: usize) -> Option<&Lesson> {
        let hash = self.lesson_index_to_hash.get(index)?;
        self.lessons.get(hash)
    }

    /// Human-readable summary: title, description, lesson count and duration.
    pub fn summary(&self) -> String {
        format_course_summary(self)
    }

    /// Total course duration, the sum of every section's duration.
    pub fn duration(&self) -> Result<Duration> {
        self.sections
            .iter()
            .map(|section| parse_duration(&section.duration))
            .sum()
    }
}

/// Number of lessons according to the last index recorded in the sections.
///
/// Returns [`UNKNOWN_LESSON_COUNT`] when there are no sections. Trailing
/// sections without lessons are skipped when looking for the last index.
pub fn lesson_count(sections: &[Section]) -> Result<i64> {
    if sections.is_empty() {
        return Ok(UNKNOWN_LESSON_COUNT);
    }

    let Some(&last) = sections
        .iter()
        .rev()
        .find_map(|section| section.lesson_indices.last())
    else {
        return Ok(0);
    };

    i64::try_from(last)
        .ok()
        .and_then(|last| last.checked_add(1))
        .ok_or(FemError::LessonCountOverflow { index: last })
}
