//! Static note templates and demo seed data. These were mutable globals in
//! earlier incarnations of the app; here they are plain constant tables.

use once_cell::sync::Lazy;

use super::SmartNote;

pub struct NoteTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub title: &'static str,
    pub content: &'static str,
    pub tags: &'static [&'static str],
    pub category: &'static str,
}

pub static TEMPLATES: Lazy<Vec<NoteTemplate>> = Lazy::new(|| {
    vec![
        NoteTemplate {
            id: "cornell",
            name: "Cornell Notes",
            title: "Cornell Notes",
            content: "<h2>Cues</h2><ul><li></li></ul><h2>Notes</h2><p></p><h2>Summary</h2><p></p>",
            tags: &["method"],
            category: "Study",
        },
        NoteTemplate {
            id: "lecture",
            name: "Lecture Summary",
            title: "Lecture Summary",
            content: "<h2>Key Concepts</h2><ul><li></li></ul><h2>Questions</h2><ul><li></li></ul>",
            tags: &["lecture"],
            category: "Study",
        },
        NoteTemplate {
            id: "exam-review",
            name: "Exam Review",
            title: "Exam Review",
            content: "<h2>Topics to Revise</h2><ul><li></li></ul><h2>Weak Areas</h2><ul><li></li></ul>",
            tags: &["exam"],
            category: "Revision",
        },
        NoteTemplate {
            id: "reading",
            name: "Reading Notes",
            title: "Reading Notes",
            content: "<h2>Source</h2><p></p><h2>Highlights</h2><ul><li></li></ul>",
            tags: &["reading"],
            category: "Study",
        },
    ]
});

pub fn template(id: &str) -> Option<&'static NoteTemplate> {
    TEMPLATES.iter().find(|t| t.id == id)
}

/// Seed notes shown when the persisted collection is missing or unreadable.
pub fn demo_notes() -> Vec<SmartNote> {
    let now = chrono::Utc::now();
    let mut notes = vec![
        SmartNote {
            id: "demo-1".to_string(),
            title: "Quantum Computing".to_string(),
            content: "<p>Qubits exploit superposition. Related: [[Linear Algebra]].</p>".to_string(),
            tags: vec!["physics".to_string()],
            category: "Study".to_string(),
            created_at: now,
            updated_at: now,
            is_pinned: true,
            is_archived: false,
            color: Some("#8b5cf6".to_string()),
            version: 1,
            parent_id: None,
            is_folder: false,
            backlinks: Vec::new(),
        },
        SmartNote {
            id: "demo-2".to_string(),
            title: "Linear Algebra".to_string(),
            content: "<p>Vector spaces and matrices. Used heavily in [[Quantum Computing]].</p>"
                .to_string(),
            tags: vec!["math".to_string()],
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
        },
        SmartNote {
            id: "demo-3".to_string(),
            title: "Welcome".to_string(),
            content: "<p>Link notes together with [[Quantum Computing]]-style references.</p>"
                .to_string(),
            tags: Vec::new(),
            category: "General".to_string(),
            created_at: now,
            updated_at: now,
            is_pinned: false,
            is_archived: false,
            color: None,
            version: 1,
            parent_id: None,
            is_folder: false,
            backlinks: Vec::new(),
        },
    ];
    super::rebuild_backlinks(&mut notes);
    notes
}
