//! Filesystem-safe slugs for section titles.
//!
//! Every ASCII character in the Unicode Symbol (`S`) or Punctuation (`P`)
//! general categories gets a replacement string; the table is built once per
//! process and shared read-only afterwards.

use std::{collections::HashMap, sync::LazyLock, thread};

/// A run of code points `lo..=hi` stepping by `stride`, as in the Unicode
/// category tables.
#[derive(Debug, Clone, Copy)]
struct CategoryRange {
    lo: u16,
    hi: u16,
    stride: u16,
}

const fn range(lo: u16, hi: u16) -> CategoryRange {
    CategoryRange { lo, hi, stride: 1 }
}

/// General category `S` (Sm, Sc, Sk, So), Basic Latin and Latin-1 blocks.
const SYMBOL_RANGES: &[CategoryRange] = &[
    range(0x0024, 0x0024),
    range(0x002b, 0x002b),
    range(0x003c, 0x003e),
    range(0x005e, 0x005e),
    range(0x0060, 0x0060),
    range(0x007c, 0x007c),
    range(0x007e, 0x007e),
    range(0x00a2, 0x00a6),
    range(0x00a8, 0x00a9),
    range(0x00ac, 0x00ac),
    range(0x00ae, 0x00b1),
    range(0x00b4, 0x00b4),
    range(0x00b8, 0x00b8),
    range(0x00d7, 0x00d7),
    range(0x00f7, 0x00f7),
];

/// General category `P` (Pc, Pd, Ps, Pe, Pi, Pf, Po), Basic Latin and Latin-1 blocks.
const PUNCTUATION_RANGES: &[CategoryRange] = &[
    range(0x0021, 0x0023),
    range(0x0025, 0x002a),
    range(0x002c, 0x002f),
    range(0x003a, 0x003b),
    range(0x003f, 0x0040),
    range(0x005b, 0x005d),
    range(0x005f, 0x005f),
    range(0x007b, 0x007b),
    range(0x007d, 0x007d),
    range(0x00a1, 0x00a1),
    range(0x00a7, 0x00a7),
    range(0x00ab, 0x00ab),
    range(0x00b6, 0x00b7),
    range(0x00bb, 0x00bb),
    range(0x00bf, 0x00bf),
];

const MAX_ASCII: u16 = 0x7f;

static GLOBAL: LazyLock<SlugTable> = LazyLock::new(SlugTable::build);

/// Replacement table from symbol/punctuation characters to slug text.
#[derive(Debug, Clone)]
pub struct SlugTable {
    replacements: HashMap<char, &'static str>,
}

impl SlugTable {
    /// Build the table by scanning the symbol and punctuation categories.
    ///
    /// The two scans run on scoped threads and are merged afterwards; the
    /// resulting table does not depend on which scan finishes first.
    pub fn build() -> Self {
        let scanned: Vec<char> = thread::scope(|scope| {
            let scans = [SYMBOL_RANGES, PUNCTUATION_RANGES]
                .map(|ranges| scope.spawn(move || ascii_code_points(ranges)));

            scans
                .into_iter()
                .flat_map(|scan| scan.join().expect("category scan panicked"))
                .collect()
        });

        let mut replacements: HashMap<char, &'static str> = scanned
            .into_iter()
            .map(|c| (c, replacement_for(c)))
            .collect();
        replacements.insert(' ', "-");

        Self { replacements }
    }

    /// The process-wide table, built on first use.
    pub fn global() -> &'static SlugTable {
        &GLOBAL
    }

    pub fn replacement(&self, c: char) -> Option<&'static str> {
        self.replacements.get(&c).copied()
    }

    pub fn len(&self) -> usize {
        self.replacements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replacements.is_empty()
    }

    /// Turn a title into a lowercase, filesystem-safe slug.
    pub fn slugify(&self, title: &str) -> String {
        let mut slug = String::with_capacity(title.len());

        for c in title.trim_matches(' ').chars() {
            match self.replacement(c) {
                Some(replacement) => slug.push_str(replacement),
                None => slug.push(c),
            }
        }

        slug.to_lowercase()
    }
}

/// Slugify with the process-wide table.
///
/// ```
/// use femnotes_core::slugify;
///
/// assert_eq!(slugify("Portfolio Footer & Projects"), "portfolio-footer-and-projects");
/// assert_eq!(slugify("Routing Q&A"), "routing-qanda");
/// ```
pub fn slugify(title: &str) -> String {
    SlugTable::global().slugify(title)
}

fn replacement_for(c: char) -> &'static str {
    match c {
        '&' => "and",
        '-' => "-",
        '(' | ')' | '[' | ']' | '/' | '\\' | '|' => "_",
        _ => "",
    }
}

fn ascii_code_points(ranges: &[CategoryRange]) -> Vec<char> {
    let mut found = Vec::new();

    for r in ranges {
        // Tables are sorted, nothing past this point is ASCII.
        if r.lo > MAX_ASCII {
            break;
        }

        let hi = r.hi.min(MAX_ASCII);
        found.extend(
            (r.lo..=hi)
                .step_by(usize::from(r.stride))
                .filter_map(|cp| char::from_u32(u32::from(cp))),
        );
    }

    found
}
