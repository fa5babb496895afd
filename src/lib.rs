pub mod ai;
pub mod flashcards;
pub mod mindmap;
pub mod notes;
pub mod planner;
pub mod search;
pub mod storage;


#[cfg(test)]
mod layout_test;


#[cfg(test)]
mod backlink_index_test;


#[cfg(test)]
mod search_index_test;



use std::path::{Path, PathBuf};

use flashcards::{CardDraft, Deck};
use mindmap::MindMap;
use notes::NoteStore;
use planner::{PlanDraft, StudyPlan};
use search::{NoteSearchIndex, NoteSearchResult};

const NOTES_FILE: &str = "notes.json";
const MAPS_FILE: &str = "mindmaps.json";
const PLANS_FILE: &str = "plans.json";
const DECKS_FILE: &str = "decks.json";

/// One user's study data: notes, mind maps, plans and decks, plus the derived
/// search index. Collections load at open (seeding demo data when missing)
/// and persist wholesale on `save`.
///
/// Single-writer by construction: `Workspace` is `&mut self` throughout and
/// carries no interior locking beyond what the search writer needs.
pub struct Workspace {
    data_dir: PathBuf,
    pub notes: NoteStore,
    pub maps: Vec<MindMap>,
    pub plans: Vec<StudyPlan>,
    pub decks: Vec<Deck>,
    search: NoteSearchIndex,
}

impl Workspace {
    /// Load every collection from `data_dir`, seeding demo data for any that
    /// is absent or unreadable, then build the search index over the notes.
    pub fn open(data_dir: &Path) -> Result<Self, String> {
        std::fs::create_dir_all(data_dir)
            .map_err(|e| format!("Failed to create data dir {:?}: {}", data_dir, e))?;

        let notes: NoteStore = storage::load_or_seed(&data_dir.join(NOTES_FILE), || {
            NoteStore::seeded(notes::templates::demo_notes())
        });
        let maps: Vec<MindMap> = storage::load_or_seed(&data_dir.join(MAPS_FILE), || {
            vec![mindmap::demo_map()]
        });
        let plans: Vec<StudyPlan> = storage::load_or_seed(&data_dir.join(PLANS_FILE), Vec::new);
        let decks: Vec<Deck> = storage::load_or_seed(&data_dir.join(DECKS_FILE), Vec::new);

        let search = NoteSearchIndex::new()?;
        search.rebuild(&notes.notes)?;

        log::info!(
            "[workspace] opened {:?}: {} notes, {} maps, {} plans, {} decks",
            data_dir,
            notes.notes.len(),
            maps.len(),
            plans.len(),
            decks.len()
        );

        Ok(Workspace {
            data_dir: data_dir.to_path_buf(),
            notes,
            maps,
            plans,
            decks,
            search,
        })
    }

    /// Persist all four collections. Each file is written atomically; the
    /// first failure aborts the save.
    pub fn save(&self) -> Result<(), String> {
        storage::save_collection(&self.data_dir.join(NOTES_FILE), &self.notes)?;
        storage::save_collection(&self.data_dir.join(MAPS_FILE), &self.maps)?;
        storage::save_collection(&self.data_dir.join(PLANS_FILE), &self.plans)?;
        storage::save_collection(&self.data_dir.join(DECKS_FILE), &self.decks)?;
        Ok(())
    }

    // Note mutations go through the workspace so the search index stays in
    // step with the store.

    pub fn create_note(&mut self, title: &str) -> Result<String, String> {
        let id = self.notes.create_blank(title);
        self.reindex_note(&id)?;
        Ok(id)
    }

    pub fn create_note_from_template(&mut self, template_id: &str) -> Result<String, String> {
        let id = self
            .notes
            .create_from_template(template_id)
            .ok_or_else(|| format!("Unknown template: {}", template_id))?;
        self.reindex_note(&id)?;
        Ok(id)
    }

    pub fn update_note_content(&mut self, id: &str, content: &str) -> Result<(), String> {
        if !self.notes.update_content(id, content) {
            return Err(format!("Unknown note: {}", id));
        }
        self.reindex_note(id)
    }

    pub fn update_note_title(&mut self, id: &str, title: &str) -> Result<(), String> {
        if !self.notes.update_title(id, title) {
            return Err(format!("Unknown note: {}", id));
        }
        self.reindex_note(id)
    }

    pub fn delete_note(&mut self, id: &str) -> Result<(), String> {
        if !self.notes.delete(id) {
            return Err(format!("Unknown note: {}", id));
        }
        self.search.remove_note(id)
    }

    fn reindex_note(&self, id: &str) -> Result<(), String> {
        match self.notes.get(id) {
            Some(note) => self.search.index_note(note),
            None => Ok(()),
        }
    }

    pub fn search_notes(&self, query: &str, limit: usize) -> Result<Vec<NoteSearchResult>, String> {
        self.search.search(query, limit)
    }

    /// Ingest an AI-drafted plan outline as a new plan.
    pub fn add_plan(&mut self, draft: PlanDraft) -> String {
        let id = next_id("plan", self.plans.iter().map(|p| p.id.as_str()));
        self.plans.push(StudyPlan::from_draft(&id, draft));
        id
    }

    pub fn add_deck(&mut self, name: &str, drafts: Vec<CardDraft>) -> String {
        let id = next_id("deck", self.decks.iter().map(|d| d.id.as_str()));
        self.decks.push(Deck::from_drafts(&id, name, drafts));
        id
    }

    pub fn plan_mut(&mut self, id: &str) -> Option<&mut StudyPlan> {
        self.plans.iter_mut().find(|p| p.id == id)
    }

    pub fn deck_mut(&mut self, id: &str) -> Option<&mut Deck> {
        self.decks.iter_mut().find(|d| d.id == id)
    }
}

/// Smallest unused `prefix-N` id given the ids already in the collection.
fn next_id<'a>(prefix: &str, existing: impl Iterator<Item = &'a str>) -> String {
    let max = existing
        .filter_map(|id| id.strip_prefix(prefix).and_then(|s| s.strip_prefix('-')))
        .filter_map(|n| n.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    format!("{}-{}", prefix, max + 1)
}
