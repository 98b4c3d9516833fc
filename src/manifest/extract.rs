use std::sync::LazyLock;

use regex::Regex;

use crate::metadata::PostMetadata;

/// Labeled fields are only looked for this far into a post.
const LABEL_WINDOW: usize = 20;
const EXCERPT_MAX_LINES: usize = 2;
const EXCERPT_MAX_CHARS: usize = 300;
const ELLIPSIS: &str = "...";

static LABEL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\*\*(Published|Author|Category):\*\*(.*)$").expect("label pattern is valid")
});

pub(crate) fn extract_metadata(id: &str, content: &str, default_author: &str) -> PostMetadata {
    let lines: Vec<&str> = content.lines().collect();

    let mut metadata = PostMetadata {
        id: id.to_string(),
        title: extract_title(&lines).unwrap_or_default(),
        date: "".to_string(),
        author: default_author.to_string(),
        excerpt: "".to_string(),
        category: "".to_string(),
    };

    // no early exit: the last label in the window wins
    for line in lines.iter().take(LABEL_WINDOW) {
        let Some(caps) = LABEL_PATTERN.captures(line) else {
            continue;
        };
        // every repeat of the label is dropped from the value, not just the leading one
        let label = format!("**{}:**", &caps[1]);
        let value = caps[2].replace(&label, "").trim().to_string();
        match &caps[1] {
            "Published" => metadata.date = value,
            "Author" => metadata.author = value,
            "Category" => metadata.category = value,
            _ => {}
        }
    }

    metadata.excerpt = truncate_excerpt(extract_excerpt(&lines));
    metadata
}

fn extract_title(lines: &[&str]) -> Option<String> {
    lines
        .iter()
        .find_map(|line| line.trim().strip_prefix("# "))
        .map(|title| title.trim().to_string())
}

fn extract_excerpt(lines: &[&str]) -> String {
    let mut in_overview = false;
    let mut excerpt_lines: Vec<&str> = vec![];

    for line in lines {
        if line.trim().is_empty() || line.starts_with('#') || line.starts_with("**") {
            if line.starts_with("## Overview") {
                in_overview = true;
            }
            continue;
        }

        if in_overview || excerpt_lines.is_empty() {
            excerpt_lines.push(line.trim());
            if excerpt_lines.len() >= EXCERPT_MAX_LINES {
                break;
            }
        }
    }

    excerpt_lines.join(" ")
}

/// Counts characters, not bytes, so multi-byte text is never split.
fn truncate_excerpt(excerpt: String) -> String {
    if excerpt.chars().count() <= EXCERPT_MAX_CHARS {
        return excerpt;
    }
    let keep = EXCERPT_MAX_CHARS - ELLIPSIS.chars().count();
    let mut truncated: String = excerpt.chars().take(keep).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    const AUTHOR: &str = "Example Team";

    fn extract(content: &str) -> PostMetadata {
        extract_metadata("post", content, AUTHOR)
    }

    #[test]
    fn title_from_first_heading() {
        let meta = extract("intro text\n# My Title\n# Second Title\n");
        assert_eq!(meta.title, "My Title");
    }

    #[test]
    fn title_ignores_deeper_headings_and_indentation() {
        assert_eq!(extract("## Overview\n   #   Indented  \n").title, "Indented");
        assert_eq!(extract("## Only a subheading\n#NoSpace\n").title, "");
    }

    #[test]
    fn missing_title_is_empty() {
        assert_eq!(extract("just a paragraph\n").title, "");
        assert_eq!(extract("").title, "");
    }

    #[test]
    fn labeled_fields() {
        let meta = extract(concat!(
            "# Title\n",
            "\n",
            "**Published:** March 1, 2024\n",
            "**Author:** Jane Doe\n",
            "**Category:**   Research  \n",
        ));
        assert_eq!(meta.date, "March 1, 2024");
        assert_eq!(meta.author, "Jane Doe");
        assert_eq!(meta.category, "Research");
    }

    #[test]
    fn default_author_when_absent() {
        let meta = extract("# Title\n**Published:** March 1, 2024\n");
        assert_eq!(meta.author, AUTHOR);
        assert_eq!(meta.category, "");
    }

    #[test]
    fn last_label_in_window_wins() {
        let meta = extract(concat!(
            "**Author:** First Author\n",
            "**Published:** January 1, 2020\n",
            "**Author:** Second Author\n",
            "**Published:** February 2, 2022\n",
        ));
        assert_eq!(meta.author, "Second Author");
        assert_eq!(meta.date, "February 2, 2022");
    }

    #[test]
    fn repeated_label_removed_from_value() {
        let meta = extract("**Author:** A **Author:** B\n**Category:** X**Category:**\n");
        assert_eq!(meta.author, "A  B");
        assert_eq!(meta.category, "X");
    }

    #[test]
    fn labels_outside_window_are_ignored() {
        let mut content = "**Author:** Inside\n".to_string();
        for i in 0..19 {
            content.push_str(&format!("filler {i}\n"));
        }
        content.push_str("**Author:** Outside\n**Category:** Late\n");
        let meta = extract(&content);
        assert_eq!(meta.author, "Inside");
        assert_eq!(meta.category, "");
    }

    #[test]
    fn indented_labels_do_not_match() {
        let meta = extract("  **Author:** Indented\n");
        assert_eq!(meta.author, AUTHOR);
    }

    #[test]
    fn excerpt_from_first_paragraph_line() {
        let meta = extract(concat!(
            "# Title\n",
            "**Published:** March 1, 2024\n",
            "\n",
            "  First line of the body.  \n",
            "Second line of the body.\n",
            "Third line.\n",
        ));
        assert_eq!(meta.excerpt, "First line of the body.");
    }

    #[test]
    fn excerpt_continues_into_overview() {
        let meta = extract(concat!(
            "# Title\n",
            "Lead sentence.\n",
            "Ignored sentence.\n",
            "## Overview\n",
            "\n",
            "Overview sentence.\n",
            "Never reached.\n",
        ));
        assert_eq!(meta.excerpt, "Lead sentence. Overview sentence.");
    }

    #[test]
    fn excerpt_of_overview_only() {
        let meta = extract(concat!(
            "# Title\n",
            "## Overview\n",
            "One.\n",
            "## Details\n",
            "Two.\n",
            "Three.\n",
        ));
        assert_eq!(meta.excerpt, "One. Two.");
    }

    #[test]
    fn excerpt_empty_without_body() {
        assert_eq!(extract("# Title\n**Author:** A\n\n").excerpt, "");
    }

    #[test]
    fn long_excerpt_truncated_to_exactly_300() {
        let body = "word ".repeat(100);
        let meta = extract(&format!("# Title\n{body}\n"));
        assert_eq!(meta.excerpt.chars().count(), 300);
        assert!(meta.excerpt.ends_with("..."));
        assert!(body.starts_with(meta.excerpt.trim_end_matches("...")));
    }

    #[test]
    fn excerpt_at_limit_is_kept() {
        let body = "a".repeat(300);
        assert_eq!(extract(&body).excerpt, body);
    }

    #[test]
    fn truncation_counts_characters() {
        let body = "é".repeat(400);
        let meta = extract(&body);
        assert_eq!(meta.excerpt.chars().count(), 300);
        assert_eq!(meta.excerpt, format!("{}...", "é".repeat(297)));
    }

    #[test]
    fn crlf_line_endings() {
        let meta = extract("# Title\r\n**Author:** Jane Doe\r\n\r\nBody.\r\n");
        assert_eq!(meta.title, "Title");
        assert_eq!(meta.author, "Jane Doe");
        assert_eq!(meta.excerpt, "Body.");
    }
}
