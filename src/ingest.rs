//! Splitting pasted text into documents.

/// Split a blob of text into paragraphs on blank-line boundaries.
///
/// A line holding only whitespace counts as blank. Paragraphs are trimmed
/// and empty ones dropped; line breaks inside a paragraph are kept.
pub fn split_paragraphs(blob: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in blob.lines() {
        if line.trim().is_empty() {
            flush(&mut current, &mut paragraphs);
        } else {
            current.push(line);
        }
    }
    flush(&mut current, &mut paragraphs);

    paragraphs
}

fn flush(lines: &mut Vec<&str>, out: &mut Vec<String>) {
    if lines.is_empty() {
        return;
    }
    let paragraph = lines.join("\n").trim().to_string();
    if !paragraph.is_empty() {
        out.push(paragraph);
    }
    lines.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_blank_lines() {
        let blob = "First paragraph.\nStill first.\n\nSecond paragraph.\n\n\n  Third.  \n";
        assert_eq!(
            split_paragraphs(blob),
            vec![
                "First paragraph.\nStill first.".to_string(),
                "Second paragraph.".to_string(),
                "Third.".to_string(),
            ]
        );
    }

    #[test]
    fn test_whitespace_only_lines_are_blank() {
        let blob = "one\n   \t\ntwo";
        assert_eq!(split_paragraphs(blob), vec!["one", "two"]);
    }

    #[test]
    fn test_empty_blob() {
        assert!(split_paragraphs("").is_empty());
        assert!(split_paragraphs("\n\n   \n").is_empty());
    }

    #[test]
    fn test_crlf_input() {
        assert_eq!(split_paragraphs("a\r\n\r\nb\r\n"), vec!["a", "b"]);
    }
}
