pub mod links;
pub mod templates;

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use links::parse_internal_links;

/// A rich-text note. `content` is an HTML string straight from the editor.
///
/// `backlinks` is derived data (the ids of notes whose content references
/// this note's title), recomputed wholesale by `rebuild_backlinks` whenever
/// the collection changes. It is never authored directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartNote {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub version: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub is_folder: bool,
    #[serde(default)]
    pub backlinks: Vec<String>,
}

/// Recompute every note's `backlinks` from scratch.
///
/// Reference extraction is pure per note and runs in parallel; resolution is
/// sequential in collection order so results are deterministic. A reference
/// resolves against the FIRST note whose title matches case-insensitively
/// (exact match, not fuzzy). Unresolved references and self-references are
/// dropped silently.
///
/// Full rescan on every change is O(notes x links): fine at personal-note
/// scale, and deliberately not incremental.
pub fn rebuild_backlinks(notes: &mut [SmartNote]) {
    // First occurrence wins on duplicate titles.
    let mut title_to_id: HashMap<String, String> = HashMap::new();
    for note in notes.iter() {
        title_to_id
            .entry(note.title.to_lowercase())
            .or_insert_with(|| note.id.clone());
    }

    let references: Vec<(String, Vec<String>)> = notes
        .par_iter()
        .map(|n| (n.id.clone(), parse_internal_links(&n.content)))
        .collect();

    for note in notes.iter_mut() {
        note.backlinks.clear();
    }

    for (source_id, titles) in references {
        for title in titles {
            let Some(target_id) = title_to_id.get(&title.to_lowercase()) else {
                continue;
            };
            // Backlinks are the other notes referencing this one; a note
            // mentioning its own title records nothing.
            if target_id == &source_id {
                continue;
            }
            if let Some(target) = notes.iter_mut().find(|n| &n.id == target_id) {
                if !target.backlinks.contains(&source_id) {
                    target.backlinks.push(source_id.clone());
                }
            }
        }
    }
}

/// The full note collection for one session. Single-writer: all mutation goes
/// through these methods, each of which re-derives backlinks before
/// returning.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteStore {
    pub notes: Vec<SmartNote>,
    #[serde(default)]
    next_id: u64,
}

impl NoteStore {
    pub fn new() -> Self {
        NoteStore::default()
    }

    pub fn seeded(notes: Vec<SmartNote>) -> Self {
        let mut store = NoteStore {
            notes,
            next_id: 0,
        };
        rebuild_backlinks(&mut store.notes);
        store
    }

    pub fn get(&self, id: &str) -> Option<&SmartNote> {
        self.notes.iter().find(|n| n.id == id)
    }

    fn fresh_id(&mut self) -> String {
        self.next_id += 1;
        format!("note-{}", self.next_id)
    }

    fn push_note(&mut self, title: &str, content: &str, tags: Vec<String>, category: &str) -> String {
        let id = self.fresh_id();
        let now = Utc::now();
        self.notes.push(SmartNote {
            id: id.clone(),
            title: title.to_string(),
            content: content.to_string(),
            tags,
            category: category.to_string(),
            created_at: now,
            updated_at: now,
            is_pinned: false,
            is_archived: false,
            color: None,
            version: 1,
            parent_id: None,
            is_folder: false,
            backlinks: Vec::new(),
        });
        rebuild_backlinks(&mut self.notes);
        id
    }

    pub fn create_blank(&mut self, title: &str) -> String {
        self.push_note(title, "", Vec::new(), "General")
    }

    /// Create a note from the static template table. `None` for an unknown
    /// template id.
    pub fn create_from_template(&mut self, template_id: &str) -> Option<String> {
        let tpl = templates::template(template_id)?;
        let tags = tpl.tags.iter().map(|t| t.to_string()).collect();
        Some(self.push_note(tpl.title, tpl.content, tags, tpl.category))
    }

    pub fn create_folder(&mut self, name: &str, parent_id: Option<&str>) -> String {
        let id = self.push_note(name, "", Vec::new(), "General");
        if let Some(note) = self.get_mut_internal(&id) {
            note.is_folder = true;
            note.parent_id = parent_id.map(|p| p.to_string());
        }
        id
    }

    fn get_mut_internal(&mut self, id: &str) -> Option<&mut SmartNote> {
        self.notes.iter_mut().find(|n| n.id == id)
    }

    fn touch(note: &mut SmartNote) {
        note.version += 1;
        note.updated_at = Utc::now();
    }

    /// Replace a note's content. Bumps version, re-derives backlinks. Returns
    /// false for unknown ids.
    pub fn update_content(&mut self, id: &str, content: &str) -> bool {
        let Some(note) = self.get_mut_internal(id) else {
            return false;
        };
        note.content = content.to_string();
        Self::touch(note);
        rebuild_backlinks(&mut self.notes);
        true
    }

    /// Rename a note. Backlinks are re-derived since references resolve by
    /// title.
    pub fn update_title(&mut self, id: &str, title: &str) -> bool {
        let Some(note) = self.get_mut_internal(id) else {
            return false;
        };
        note.title = title.to_string();
        Self::touch(note);
        rebuild_backlinks(&mut self.notes);
        true
    }

    pub fn set_tags(&mut self, id: &str, tags: Vec<String>) -> bool {
        let Some(note) = self.get_mut_internal(id) else {
            return false;
        };
        note.tags = tags;
        Self::touch(note);
        true
    }

    pub fn toggle_pin(&mut self, id: &str) -> bool {
        let Some(note) = self.get_mut_internal(id) else {
            return false;
        };
        note.is_pinned = !note.is_pinned;
        true
    }

    pub fn set_archived(&mut self, id: &str, archived: bool) -> bool {
        let Some(note) = self.get_mut_internal(id) else {
            return false;
        };
        note.is_archived = archived;
        true
    }

    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.notes.len();
        self.notes.retain(|n| n.id != id);
        let removed = self.notes.len() != before;
        if removed {
            rebuild_backlinks(&mut self.notes);
        }
        removed
    }

    /// Children of a folder, computed from `parent_id` (the relation has one
    /// source of truth; there is no stored child list).
    pub fn children_of(&self, parent_id: &str) -> Vec<&SmartNote> {
        self.notes
            .iter()
            .filter(|n| n.parent_id.as_deref() == Some(parent_id))
            .collect()
    }

    /// Non-archived notes, pinned first, then most recently updated.
    pub fn listing(&self) -> Vec<&SmartNote> {
        let mut visible: Vec<&SmartNote> = self.notes.iter().filter(|n| !n.is_archived).collect();
        visible.sort_by(|a, b| {
            b.is_pinned
                .cmp(&a.is_pinned)
                .then(b.updated_at.cmp(&a.updated_at))
        });
        visible
    }
}
