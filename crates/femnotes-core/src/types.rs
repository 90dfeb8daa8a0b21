use serde::{Deserialize, Deserializer, Serialize};

use crate::format::format_timestamp;

/// A titled group of lessons, in the order the course lists them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub duration: String,
    pub lesson_indices: Vec<usize>,
}

impl Section {
    pub fn new(title: impl Into<String>, duration: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            duration: duration.into(),
            lesson_indices: Vec::new(),
        }
    }

    pub fn slug(&self) -> String {
        crate::slug::slugify(&self.title)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub index: usize,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub annotations: Vec<Annotation>,
}

/// A timestamped note attached to a lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(default, deserialize_with = "null_as_default")]
    pub range: Vec<u64>,
    #[serde(default)]
    pub message: String,
}

impl Annotation {
    /// Every point of the range as `MM:SS`.
    pub fn readable_range(&self) -> Vec<String> {
        self.range.iter().copied().map(format_timestamp).collect()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
