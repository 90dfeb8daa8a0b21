use std::fmt::Write;

use crate::{course::Course, duration::format_duration, types::Annotation};

/// Format seconds as MM:SS timestamp. Minutes keep counting past the hour.
pub fn format_timestamp(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Format tags as a YAML list for note front matter
pub fn format_tags(tags: &[String]) -> String {
    let mut output = String::from("\n");
    for tag in tags {
        let _ = writeln!(output, "  - {}", tag);
    }
    output
}

/// Format the course index: one numbered line per section, one wiki link per lesson
pub fn format_course_data(course: &Course) -> String {
    let mut output = String::new();

    for (x, section) in course.sections.iter().enumerate() {
        let _ = writeln!(output, "{}. {}", x, section.title);

        let section_slug = section.slug();
        for &lesson_index in &section.lesson_indices {
            let Some(lesson) = course.lesson_at(lesson_index) else {
                continue;
            };
            let _ = writeln!(
                output,
                "  - [[{}-{}/{}.md|{}. {}]]",
                x, section_slug, lesson.slug, lesson_index, lesson.title
            );
        }
    }

    output
}

/// Format annotations as collapsible Obsidian callouts
pub fn format_annotations(annotations: &[Annotation]) -> String {
    let mut output = String::new();

    for annotation in annotations {
        let _ = writeln!(
            output,
            "\n> [!NOTE]+ {}",
            annotation.readable_range().join(" -> ")
        );
        let _ = writeln!(output, "> {}", annotation.message);
    }

    output
}

/// Format a short human-readable course summary
pub fn format_course_summary(course: &Course) -> String {
    let mut output = String::from("Course:\n");

    let _ = writeln!(output, "\tTitle: {}", course.title);
    let _ = writeln!(output, "\tDescription: {}", course.description);
    let _ = writeln!(output, "\tNumber of Lessons: {}", course.lesson_count);

    match course.duration() {
        Ok(duration) => {
            let _ = writeln!(output, "\tDuration: {}", format_duration(duration));
        }
        Err(_) => output.push_str("\tDuration: Failed to parse duration.\n"),
    }

    output
}
