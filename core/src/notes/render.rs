use super::NoteHit;

pub const NO_NOTES_CONFIGURED: &str = "(No notes configured)";
pub const NO_RELEVANT_NOTES: &str = "No relevant notes found.";

/// Render hits as `Source: ..` blocks separated by `---`.
pub fn render_hits(hits: &[NoteHit], snippet_chars: usize) -> String {
    if hits.is_empty() {
        return NO_RELEVANT_NOTES.to_string();
    }
    hits.iter()
        .map(|h| format!("Source: {}\n{}", h.source, truncate_chars(&h.text, snippet_chars)))
        .collect::<Vec<_>>()
        .join("\n---\n")
}

/// First `max_chars` characters of `s`.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    // Fast path: byte length <= max_chars means char count <= max_chars (UTF-8 property)
    if s.len() <= max_chars {
        return s;
    }
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_hits_render_fixed_message() {
        assert_eq!(render_hits(&[], 600), NO_RELEVANT_NOTES);
    }

    #[test]
    fn hits_are_joined_with_separator() {
        let hits = vec![
            NoteHit::new("a.txt", "alpha"),
            NoteHit::new("b.txt", "bravo charlie"),
        ];
        assert_eq!(
            render_hits(&hits, 5),
            "Source: a.txt\nalpha\n---\nSource: b.txt\nbravo"
        );
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_chars("ñandú", 2), "ña");
        assert_eq!(truncate_chars("short", 100), "short");
    }
}
