//! Rebuilds sections from the flat `lessonElements` array.
//!
//! The array mixes section header objects with bare lesson indices. Each
//! index belongs to the closest header before it:
//!
//! ```text
//! [ {"title": "A", "duration": "1m"}, 0, 1, {"title": "B", "duration": "2m"}, 2 ]
//! ```

use serde::Deserialize;
use serde_json::value::RawValue;
use tracing::{debug, trace};

use crate::types::Section;

#[derive(Debug, Deserialize)]
struct SectionHeader {
    title: String,
    duration: String,
}

/// One decoded element of `lessonElements`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LessonElement {
    SectionHeader { title: String, duration: String },
    LessonIndex(usize),
    Unrecognized,
}

impl LessonElement {
    /// Try the fragment as a header first, then as an index.
    pub fn decode(raw: &RawValue) -> Self {
        if let Ok(header) = serde_json::from_str::<SectionHeader>(raw.get()) {
            return Self::SectionHeader {
                title: header.title,
                duration: header.duration,
            };
        }

        match serde_json::from_str::<usize>(raw.get()) {
            Ok(index) => Self::LessonIndex(index),
            Err(_) => Self::Unrecognized,
        }
    }
}

/// Accumulator for folding elements into sections.
#[derive(Debug, Default)]
struct SectionFold {
    finished: Vec<Section>,
    open: Option<Section>,
}

impl SectionFold {
    fn push(mut self, element: LessonElement) -> Self {
        match element {
            LessonElement::SectionHeader { title, duration } => {
                self.finished.extend(self.open.take());
                self.open = Some(Section::new(title, duration));
            }
            LessonElement::LessonIndex(index) => match self.open.as_mut() {
                Some(section) => section.lesson_indices.push(index),
                None => debug!(index, "dropping lesson index before any section header"),
            },
            LessonElement::Unrecognized => {}
        }
        self
    }

    fn finish(mut self) -> Vec<Section> {
        self.finished.extend(self.open.take());
        self.finished
    }
}

/// Build the ordered section list. Malformed elements are skipped, never fatal.
pub fn parse_sections(elements: &[Box<RawValue>]) -> Vec<Section> {
    elements
        .iter()
        .map(|raw| {
            let element = LessonElement::decode(raw);
            if element == LessonElement::Unrecognized {
                trace!(fragment = raw.get(), "skipping unrecognized lesson element");
            }
            element
        })
        .fold(SectionFold::default(), SectionFold::push)
        .finish()
}
