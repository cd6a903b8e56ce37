//! Section Extractor — isolates the required/preferred qualification spans of a
//! posting with a line-oriented state machine, ignoring everything else
//! (responsibilities, benefits, company blurb).

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Hard cap per section so a malformed posting cannot blow up downstream work.
pub const MAX_LINES_PER_SECTION: usize = 15;
/// Lines shorter than this are treated as noise (stray bullets, single glyphs).
const MIN_LINE_CHARS: usize = 3;

/// The required/preferred qualification lines of a posting, in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtractedSections {
    pub required: Vec<String>,
    pub preferred: Vec<String>,
}

impl ExtractedSections {
    pub fn is_empty(&self) -> bool {
        self.required.is_empty() && self.preferred.is_empty()
    }

    pub fn required_text(&self) -> String {
        self.required.join("\n")
    }

    pub fn preferred_text(&self) -> String {
        self.preferred.join("\n")
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Section {
    None,
    Required,
    Preferred,
}

static REQUIRED_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)자격\s*요건|지원\s*자격|필수\s*요건|requirements?").unwrap()
});

static PREFERRED_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)우대\s*사항|우대\s*조건|가산점|preferred|nice\s*to\s*have").unwrap()
});

static STOP_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)주요\s*업무|담당\s*업무|근무\s*조건|전형\s*절차|복리\s*후생|회사\s*소개|responsibilities?")
        .unwrap()
});

static LEADING_BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-*\s]+").unwrap());

/// A requirement-looking sentence: mentions a duration unit alongside an
/// experience/necessity word. Rescues postings that omit canonical headers.
fn required_hint(line: &str) -> bool {
    (line.contains('년') || line.contains("개월"))
        && ["경험", "필요", "요구"].iter().any(|w| line.contains(w))
}

fn preferred_hint(line: &str) -> bool {
    ["우대", "선호", "환영"].iter().any(|w| line.contains(w))
}

/// Walks the normalized posting line by line and collects qualification lines.
///
/// Header lines switch the current section and are themselves discarded; a
/// stop header drops back to `None` so unrelated sections are never collected.
/// Never fails — an unclassifiable posting yields two empty lists.
pub fn extract(clean_text: &str) -> ExtractedSections {
    let mut out = ExtractedSections::default();
    let mut section = Section::None;

    for raw in clean_text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if REQUIRED_HEADER.is_match(line) {
            section = Section::Required;
            continue;
        }
        if PREFERRED_HEADER.is_match(line) {
            section = Section::Preferred;
            continue;
        }
        if STOP_HEADER.is_match(line) {
            section = Section::None;
            continue;
        }

        // Headerless postings: classify by content, keeping the trigger line.
        if section == Section::None {
            if required_hint(line) {
                section = Section::Required;
            } else if preferred_hint(line) {
                section = Section::Preferred;
            } else {
                continue;
            }
        }

        let content = LEADING_BULLET.replace(line, "").trim().to_string();
        if content.chars().count() < MIN_LINE_CHARS {
            continue;
        }

        let target = match section {
            Section::Required => &mut out.required,
            Section::Preferred => &mut out.preferred,
            Section::None => continue,
        };
        if target.len() < MAX_LINES_PER_SECTION {
            target.push(content);
        }
    }

    out
}
