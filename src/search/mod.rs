//! Full-text search over the note collection, backed by an in-RAM Tantivy
//! index. The index is derived state: it is rebuilt from the note store on
//! startup and patched per-note on every mutation, and is never persisted.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tantivy::collector::TopDocs;
use tantivy::query::QueryParser;
use tantivy::schema::{Schema, Value, STORED, STRING, TEXT};
use tantivy::{Index, IndexReader, IndexWriter, ReloadPolicy, TantivyDocument};

use crate::notes::SmartNote;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteSearchResult {
    pub id: String,
    pub title: String,
    pub snippet: String,
    pub score: f32,
}

/// Strip HTML markup down to its text content. Note bodies are editor HTML;
/// indexing the raw markup would make tag names searchable.
pub fn strip_html(html: &str) -> String {
    let fragment = scraper::Html::parse_fragment(html);
    let text: Vec<&str> = fragment.root_element().text().collect();
    let joined = text.join(" ");
    joined.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extract a snippet of `max_len` chars around the first query-term match.
fn extract_snippet(text: &str, query: &str, max_len: usize) -> String {
    if text.is_empty() {
        return String::new();
    }

    let query_terms: Vec<&str> = query.split_whitespace().filter(|t| !t.is_empty()).collect();
    if query_terms.is_empty() {
        return text.chars().take(max_len).collect();
    }

    let text_lower = text.to_lowercase();
    let mut best_pos = None;
    for term in &query_terms {
        if let Some(pos) = text_lower.find(&term.to_lowercase()) {
            if best_pos.is_none() || pos < best_pos.unwrap() {
                best_pos = Some(pos);
            }
        }
    }

    match best_pos {
        Some(match_pos) => {
            // `find` returns a byte offset into the lowercased copy; it is
            // only guaranteed to be a char boundary there (lowercasing can
            // change byte lengths, e.g. U+0130), so count chars in that copy.
            let char_pos = text_lower[..match_pos].chars().count();
            let start = char_pos.saturating_sub(max_len / 3);
            let snippet: String = text.chars().skip(start).take(max_len).collect();
            let trimmed = snippet.trim();
            if start > 0 {
                format!("...{}", trimmed)
            } else {
                trimmed.to_string()
            }
        }
        None => text.chars().take(max_len).collect(),
    }
}

pub struct NoteSearchIndex {
    index: Index,
    reader: IndexReader,
    writer: Arc<Mutex<IndexWriter>>,
    f_id: tantivy::schema::Field,
    f_title: tantivy::schema::Field,
    f_body: tantivy::schema::Field,
    f_tags: tantivy::schema::Field,
    f_category: tantivy::schema::Field,
}

impl NoteSearchIndex {
    pub fn new() -> Result<Self, String> {
        let mut schema_builder = Schema::builder();
        let f_id = schema_builder.add_text_field("id", STRING | STORED);
        let f_title = schema_builder.add_text_field("title", TEXT | STORED);
        let f_body = schema_builder.add_text_field("body", TEXT | STORED);
        let f_tags = schema_builder.add_text_field("tags", TEXT);
        let f_category = schema_builder.add_text_field("category", STRING);
        let schema = schema_builder.build();

        let index = Index::create_in_ram(schema);

        let reader: IndexReader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()
            .map_err(|e| e.to_string())?;

        let writer = index.writer(50_000_000).map_err(|e| e.to_string())?;

        Ok(NoteSearchIndex {
            index,
            reader,
            writer: Arc::new(Mutex::new(writer)),
            f_id,
            f_title,
            f_body,
            f_tags,
            f_category,
        })
    }

    fn build_doc(&self, note: &SmartNote) -> TantivyDocument {
        let mut doc = TantivyDocument::new();
        doc.add_text(self.f_id, &note.id);
        doc.add_text(self.f_title, &note.title);
        doc.add_text(self.f_body, strip_html(&note.content));
        for tag in &note.tags {
            doc.add_text(self.f_tags, tag);
        }
        doc.add_text(self.f_category, &note.category);
        doc
    }

    /// Drop everything and re-add the full collection in one commit.
    pub fn rebuild(&self, notes: &[SmartNote]) -> Result<(), String> {
        let mut writer = self.writer.lock().map_err(|e| e.to_string())?;
        writer.delete_all_documents().map_err(|e| e.to_string())?;
        for note in notes {
            writer
                .add_document(self.build_doc(note))
                .map_err(|e| e.to_string())?;
        }
        writer.commit().map_err(|e| e.to_string())?;
        drop(writer);
        self.reader.reload().map_err(|e| e.to_string())?;
        log::info!("[search] rebuilt index over {} notes", notes.len());
        Ok(())
    }

    /// Replace one note's document (delete-then-add keyed on id).
    pub fn index_note(&self, note: &SmartNote) -> Result<(), String> {
        let mut writer = self.writer.lock().map_err(|e| e.to_string())?;
        let id_term = tantivy::Term::from_field_text(self.f_id, &note.id);
        writer.delete_term(id_term);
        writer
            .add_document(self.build_doc(note))
            .map_err(|e| e.to_string())?;
        writer.commit().map_err(|e| e.to_string())?;
        drop(writer);
        self.reader.reload().map_err(|e| e.to_string())
    }

    pub fn remove_note(&self, id: &str) -> Result<(), String> {
        let mut writer = self.writer.lock().map_err(|e| e.to_string())?;
        let id_term = tantivy::Term::from_field_text(self.f_id, id);
        writer.delete_term(id_term);
        writer.commit().map_err(|e| e.to_string())?;
        drop(writer);
        self.reader.reload().map_err(|e| e.to_string())
    }

    /// Full-text search across titles and bodies. Results carry a snippet of
    /// body context around the first matching term.
    pub fn search(&self, query_str: &str, limit: usize) -> Result<Vec<NoteSearchResult>, String> {
        let searcher = self.reader.searcher();
        let query_parser = QueryParser::for_index(&self.index, vec![self.f_title, self.f_body]);
        let query = query_parser
            .parse_query(query_str)
            .map_err(|e| e.to_string())?;

        let top_docs = searcher
            .search(&query, &TopDocs::with_limit(limit))
            .map_err(|e| e.to_string())?;

        let mut results = Vec::new();
        for (score, doc_address) in top_docs {
            let doc: TantivyDocument = searcher.doc(doc_address).map_err(|e| e.to_string())?;

            let id = doc
                .get_first(self.f_id)
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string();
            let title = doc
                .get_first(self.f_title)
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string();
            let body_text = doc
                .get_first(self.f_body)
                .and_then(|v| v.as_str())
                .unwrap_or("");

            let snippet = extract_snippet(body_text, query_str, 150);

            results.push(NoteSearchResult {
                id,
                title,
                snippet,
                score,
            });
        }

        Ok(results)
    }
}
