use std::collections::HashMap;

use serde::Deserialize;
use serde_json::value::RawValue;
use tracing::{debug, info};

use crate::{
    api::CourseFetcher,
    cache::CourseCache,
    course::{Course, CourseFields},
    error::Result,
    sections::parse_sections,
    types::Lesson,
};

/// The parts of the course payload that are not plain top-level fields.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CourseBody {
    #[serde(default)]
    lesson_data: Option<HashMap<String, Lesson>>,
    #[serde(default)]
    lesson_elements: Option<Vec<Box<RawValue>>>,
}

/// Load the raw course payload, from cache if present, otherwise from the
/// fetcher with a write-through to the cache.
pub async fn load_course_bytes<C, F>(slug: &str, cache: &C, fetcher: &F) -> Result<Vec<u8>>
where
    C: CourseCache,
    F: CourseFetcher,
{
    if let Some(data) = cache.read(slug).await? {
        return Ok(data);
    }

    let data = fetcher.fetch(slug).await?;
    cache.write(slug, &data).await?;
    debug!(slug, bytes = data.len(), "cached course payload");

    Ok(data)
}

/// Decode a course payload and assemble the course model.
///
/// `slug` is used when the payload does not carry one.
pub fn parse_course(slug: &str, data: &[u8]) -> Result<Course> {
    let mut fields: CourseFields = serde_json::from_slice(data)?;
    let body: CourseBody = serde_json::from_slice(data)?;

    if fields.slug.is_empty() {
        fields.slug = slug.to_string();
    }

    let sections = parse_sections(body.lesson_elements.as_deref().unwrap_or_default());
    let lessons = body.lesson_data.unwrap_or_default();
    info!(
        slug = %fields.slug,
        sections = sections.len(),
        lessons = lessons.len(),
        "parsed course"
    );

    Course::assemble(fields, sections, lessons)
}

pub async fn load_course<C, F>(slug: &str, cache: &C, fetcher: &F) -> Result<Course>
where
    C: CourseCache,
    F: CourseFetcher,
{
    let data = load_course_bytes(slug, cache, fetcher).await?;
    parse_course(slug, &data)
}
