// Tests for the note search index: mutation tracking, HTML stripping, and
// snippet extraction on non-ASCII content.

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use crate::notes::SmartNote;
    use crate::search::{strip_html, NoteSearchIndex};

    fn note(id: &str, title: &str, content: &str) -> SmartNote {
        let now = Utc::now();
        SmartNote {
            id: id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            tags: Vec::new(),
            category: "Study".to_string(),
            created_at: now,
            updated_at: now,
            is_pinned: false,
            is_archived: false,
            color: None,
            version: 1,
            parent_id: None,
            is_folder: false,
            backlinks: Vec::new(),
        }
    }

    #[test]
    fn test_search_finds_body_text() {
        let index = NoteSearchIndex::new().unwrap();
        index
            .rebuild(&[
                note("a", "Cells", "<p>Mitochondria produce ATP.</p>"),
                note("b", "Optics", "<p>Light refracts in glass.</p>"),
            ])
            .unwrap();

        let hits = index.search("mitochondria", 10).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "a");
        assert!(hits[0].snippet.contains("Mitochondria"));
    }

    #[test]
    fn test_snippet_with_length_changing_unicode() {
        // Lowercasing can change byte lengths (U+0130 becomes two chars), so
        // the match offset must not be applied to the original bytes.
        let index = NoteSearchIndex::new().unwrap();
        index
            .rebuild(&[note("a", "Pastry", "<p>İ éclair recipes İİİ and notes.</p>")])
            .unwrap();

        let hits = index.search("éclair", 10).unwrap();
        assert_eq!(hits.len(), 1);
        assert!(
            hits[0].snippet.contains("éclair"),
            "snippet should surround the matched term, got {:?}",
            hits[0].snippet
        );
    }

    #[test]
    fn test_snippet_match_deep_in_unicode_text() {
        // Multi-byte text before the match, long enough to force a leading
        // ellipsis, must still slice cleanly.
        let padding = "İstanbul ".repeat(30);
        let body = format!("<p>{}galvanic cells</p>", padding);
        let index = NoteSearchIndex::new().unwrap();
        index.rebuild(&[note("a", "Chem", &body)]).unwrap();

        let hits = index.search("galvanic", 10).unwrap();
        assert_eq!(hits.len(), 1);
        assert!(hits[0].snippet.starts_with("..."));
        assert!(hits[0].snippet.contains("galvanic"));
    }

    #[test]
    fn test_index_note_and_remove_note() {
        let index = NoteSearchIndex::new().unwrap();
        index.rebuild(&[]).unwrap();

        index
            .index_note(&note("a", "Waves", "<p>Interference patterns.</p>"))
            .unwrap();
        assert_eq!(index.search("interference", 10).unwrap().len(), 1);

        // Re-indexing the same id replaces, never duplicates.
        index
            .index_note(&note("a", "Waves", "<p>Standing interference waves.</p>"))
            .unwrap();
        assert_eq!(index.search("interference", 10).unwrap().len(), 1);

        index.remove_note("a").unwrap();
        assert!(index.search("interference", 10).unwrap().is_empty());
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(
            strip_html("<h2>Cues</h2><ul><li>one</li><li>two</li></ul>"),
            "Cues one two"
        );
        assert_eq!(strip_html("plain"), "plain");
        assert_eq!(strip_html(""), "");
    }
}
