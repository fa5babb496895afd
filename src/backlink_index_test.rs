// Tests for the backlink indexer: resolution rules, symmetry, and
// order independence.

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use crate::notes::{rebuild_backlinks, NoteStore, SmartNote};

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
    fn test_basic_resolution() {
        let mut notes = vec![
            note("a", "Quantum Computing", "uses [[Linear Algebra]]"),
            note("b", "Linear Algebra", "applied in [[Quantum Computing]]"),
            note("c", "Welcome", "start at [[Quantum Computing]]"),
        ];
        rebuild_backlinks(&mut notes);

        assert_eq!(notes[0].backlinks, vec!["b".to_string(), "c".to_string()]);
        assert_eq!(notes[1].backlinks, vec!["a".to_string()]);
        assert!(notes[2].backlinks.is_empty());
    }

    #[test]
    fn test_case_insensitive_title_match() {
        let mut notes = vec![
            note("a", "Linear Algebra", ""),
            note("b", "Intro", "see [[linear algebra]] and [[LINEAR ALGEBRA]]"),
        ];
        rebuild_backlinks(&mut notes);
        assert_eq!(
            notes[0].backlinks,
            vec!["b".to_string()],
            "both casings resolve to the same target, recorded once"
        );
    }

    #[test]
    fn test_unresolved_references_dropped() {
        let mut notes = vec![note("a", "Solo", "points at [[Nowhere]] and [[Nothing]]")];
        rebuild_backlinks(&mut notes);
        assert!(notes[0].backlinks.is_empty());
    }

    #[test]
    fn test_self_reference_records_no_backlink() {
        let mut notes = vec![
            note("a", "Recursion", "To understand [[Recursion]], see [[Recursion]]."),
            note("b", "Index", "[[Recursion]]"),
        ];
        rebuild_backlinks(&mut notes);
        assert_eq!(
            notes[0].backlinks,
            vec!["b".to_string()],
            "a note mentioning its own title must not backlink itself"
        );
    }

    #[test]
    fn test_duplicate_titles_first_note_wins() {
        let mut notes = vec![
            note("a", "Notes", ""),
            note("b", "Notes", ""),
            note("c", "Index", "[[Notes]]"),
        ];
        rebuild_backlinks(&mut notes);
        assert_eq!(notes[0].backlinks, vec!["c".to_string()]);
        assert!(notes[1].backlinks.is_empty(), "only the first title match gets the backlink");
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let mut notes = vec![
            note("a", "Alpha", "[[Beta]]"),
            note("b", "Beta", "[[Alpha]]"),
        ];
        rebuild_backlinks(&mut notes);
        let snapshot: Vec<Vec<String>> = notes.iter().map(|n| n.backlinks.clone()).collect();
        rebuild_backlinks(&mut notes);
        let again: Vec<Vec<String>> = notes.iter().map(|n| n.backlinks.clone()).collect();
        assert_eq!(snapshot, again, "repeat rebuilds must not accumulate entries");
    }

    #[test]
    fn test_result_is_order_independent() {
        let a = note("a", "Alpha", "[[Beta]] [[Gamma]]");
        let b = note("b", "Beta", "[[Alpha]]");
        let c = note("c", "Gamma", "[[Beta]]");

        let mut forward = vec![a.clone(), b.clone(), c.clone()];
        let mut reverse = vec![c, b, a];
        rebuild_backlinks(&mut forward);
        rebuild_backlinks(&mut reverse);

        for fwd in &forward {
            let rev = reverse.iter().find(|n| n.id == fwd.id).unwrap();
            let mut x = fwd.backlinks.clone();
            let mut y = rev.backlinks.clone();
            x.sort();
            y.sort();
            assert_eq!(x, y, "backlink set for {} depends on collection order", fwd.id);
        }
    }

    #[test]
    fn test_symmetry_between_links_and_backlinks() {
        let mut notes = vec![
            note("a", "Alpha", "[[Beta]]"),
            note("b", "Beta", "[[Alpha]] [[Gamma]]"),
            note("c", "Gamma", ""),
        ];
        rebuild_backlinks(&mut notes);

        // For every resolved outgoing reference there is exactly one matching
        // backlink entry on the target.
        for source in notes.clone() {
            for title in crate::notes::links::parse_internal_links(&source.content) {
                let target = notes
                    .iter()
                    .find(|n| n.title.to_lowercase() == title.to_lowercase());
                if let Some(target) = target {
                    assert!(
                        target.backlinks.contains(&source.id),
                        "{} links to {} but the backlink is missing",
                        source.id,
                        target.id
                    );
                }
            }
        }
    }

    #[test]
    fn test_store_mutations_recompute_backlinks() {
        let mut store = NoteStore::seeded(vec![
            note("a", "Alpha", "[[Beta]]"),
            note("b", "Beta", ""),
        ]);
        assert_eq!(store.get("b").unwrap().backlinks, vec!["a".to_string()]);

        // Retitle the target: the old reference no longer resolves.
        assert!(store.update_title("b", "Renamed"));
        assert!(store.get("b").unwrap().backlinks.is_empty());

        // Point the source at the new title.
        assert!(store.update_content("a", "[[Renamed]]"));
        assert_eq!(store.get("b").unwrap().backlinks, vec!["a".to_string()]);

        // Deleting the source clears the backlink.
        assert!(store.delete("a"));
        assert!(store.get("b").unwrap().backlinks.is_empty());
    }

    #[test]
    fn test_demo_notes_are_cross_linked() {
        let notes = crate::notes::templates::demo_notes();
        let quantum = notes.iter().find(|n| n.title == "Quantum Computing").unwrap();
        let linear = notes.iter().find(|n| n.title == "Linear Algebra").unwrap();
        assert!(quantum.backlinks.contains(&linear.id));
        assert!(linear.backlinks.contains(&quantum.id));
    }
}
