//! Text Normalizer — turns a raw posting (HTML or pasted text) into clean,
//! line-oriented plain text for the section extractor.

use once_cell::sync::Lazy;
use regex::Regex;

/// Bullet glyphs commonly seen in Korean/English job postings, standardized to "- ".
const BULLET_GLYPHS: [char; 7] = ['•', '‣', '▪', '▶', '▸', '·', 'ㆍ'];

static MARKUP_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</?[a-z][^>]*>").unwrap());

static NONCONTENT_BLOCKS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?is)<script\b.*?</script>|<style\b.*?</style>|<noscript\b.*?</noscript>|<svg\b.*?</svg>|<iframe\b.*?</iframe>",
    )
    .unwrap()
});

static HTML_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());

/// Closing tags that imply a line break in the rendered document.
static LINE_BREAK_TAGS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<br\s*/?>|</p>|</li>|</div>|</tr>|</h[1-6]>").unwrap()
});

static ANY_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]+>").unwrap());

static SPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").unwrap());

/// Normalizes a raw posting into clean plain text:
/// markup stripped (if present), NBSP mapped to space, bullet glyphs mapped to
/// "- ", line breaks unified to `\n`, whitespace collapsed, blank lines dropped.
///
/// Never fails; blank input yields an empty string.
pub fn normalize(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }

    let text = if MARKUP_TAG.is_match(raw) {
        strip_markup(raw)
    } else {
        raw.to_string()
    };

    let mut text = text.replace('\u{00A0}', " ");
    for glyph in BULLET_GLYPHS {
        text = text.replace(glyph, "- ");
    }
    let text = text.replace("\r\n", "\n").replace('\r', "\n");

    let lines: Vec<String> = text
        .lines()
        .map(|line| SPACE_RUN.replace_all(line.trim(), " ").into_owned())
        .filter(|line| !line.is_empty())
        .collect();

    lines.join("\n")
}

/// Removes non-content elements and tags, keeping document line structure.
fn strip_markup(html: &str) -> String {
    let text = NONCONTENT_BLOCKS.replace_all(html, " ");
    let text = HTML_COMMENT.replace_all(&text, " ");
    let text = LINE_BREAK_TAGS.replace_all(&text, "\n");
    let text = ANY_TAG.replace_all(&text, " ");
    decode_entities(&text)
}

/// Decodes the handful of HTML entities that actually show up in postings.
fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_input_yields_empty_string() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \n\t  "), "");
    }

    #[test]
    fn test_plain_text_passes_through_trimmed() {
        assert_eq!(normalize("  hello   world  "), "hello world");
    }

    #[test]
    fn test_bullet_glyphs_become_dash_prefix() {
        let out = normalize("• Java 경험\nㆍSpring Boot 활용");
        assert_eq!(out, "- Java 경험\n- Spring Boot 활용");
    }

    #[test]
    fn test_nbsp_collapsed_to_single_space() {
        assert_eq!(normalize("Java\u{00A0}\u{00A0}Spring"), "Java Spring");
    }

    #[test]
    fn test_line_break_variants_unified() {
        assert_eq!(normalize("a\r\nb\rc"), "a\nb\nc");
    }

    #[test]
    fn test_consecutive_newlines_collapsed() {
        assert_eq!(normalize("a\n\n\nb"), "a\nb");
    }

    #[test]
    fn test_script_and_style_blocks_removed() {
        let html = "<html><head><style>.x{color:red}</style>\
                    <script>alert('hi')</script></head>\
                    <body><p>자격요건</p><li>Java 3년</li></body></html>";
        let out = normalize(html);
        assert!(!out.contains("alert"));
        assert!(!out.contains("color"));
        assert!(out.contains("자격요건"));
        assert!(out.contains("Java 3년"));
    }

    #[test]
    fn test_block_closers_produce_line_breaks() {
        let html = "<div>자격요건</div><div>Java 경험 필수</div>";
        let out = normalize(html);
        assert_eq!(out, "자격요건\nJava 경험 필수");
    }

    #[test]
    fn test_entities_decoded() {
        assert_eq!(normalize("<p>C&#39;s &amp; C++&nbsp;3년</p>"), "C's & C++ 3년");
    }

    #[test]
    fn test_text_with_angle_bracket_math_not_treated_as_markup() {
        // "3 < 5" has no tag-shaped token, so the markup path is skipped
        assert_eq!(normalize("경력 3 < 5 년"), "경력 3 < 5 년");
    }
}
