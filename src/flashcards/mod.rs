//! Flashcard decks with a three-level confidence scale. Confidence only moves
//! through the review flow, which also stamps `last_reviewed`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MIN_CONFIDENCE: u8 = 1;
pub const MAX_CONFIDENCE: u8 = 3;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    pub id: String,
    pub front: String,
    pub back: String,
    /// 1 = hard, 2 = medium, 3 = easy. Only `record_review` writes this.
    pub confidence: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reviewed: Option<DateTime<Utc>>,
}

/// Front/back pair without identity or review state, as drafted by the AI
/// adapter or entered in a form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDraft {
    pub front: String,
    pub back: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub flashcards: Vec<Flashcard>,
    #[serde(default)]
    next_id: u64,
}

impl Deck {
    pub fn new(id: &str, name: &str) -> Self {
        Deck {
            id: id.to_string(),
            name: name.to_string(),
            flashcards: Vec::new(),
            next_id: 0,
        }
    }

    /// Build a deck out of drafted cards. Cards start at the lowest
    /// confidence, never reviewed.
    pub fn from_drafts(id: &str, name: &str, drafts: Vec<CardDraft>) -> Self {
        let mut deck = Deck::new(id, name);
        for draft in drafts {
            deck.add_card(draft);
        }
        deck
    }

    pub fn add_card(&mut self, draft: CardDraft) -> String {
        self.next_id += 1;
        let card_id = format!("{}-card-{}", self.id, self.next_id);
        self.flashcards.push(Flashcard {
            id: card_id.clone(),
            front: draft.front,
            back: draft.back,
            confidence: MIN_CONFIDENCE,
            last_reviewed: None,
        });
        card_id
    }

    pub fn card(&self, card_id: &str) -> Option<&Flashcard> {
        self.flashcards.iter().find(|c| c.id == card_id)
    }

    /// Record one review: clamp the reported confidence into range and stamp
    /// the review time. Unknown ids are a no-op returning false.
    pub fn record_review(&mut self, card_id: &str, confidence: u8) -> bool {
        match self.flashcards.iter_mut().find(|c| c.id == card_id) {
            Some(card) => {
                card.confidence = confidence.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE);
                card.last_reviewed = Some(Utc::now());
                true
            }
            None => false,
        }
    }

    pub fn remove_card(&mut self, card_id: &str) -> bool {
        let before = self.flashcards.len();
        self.flashcards.retain(|c| c.id != card_id);
        self.flashcards.len() != before
    }

    /// Cards due for another look: never reviewed, or still below top
    /// confidence.
    pub fn cards_to_review(&self) -> Vec<&Flashcard> {
        self.flashcards
            .iter()
            .filter(|c| c.last_reviewed.is_none() || c.confidence < MAX_CONFIDENCE)
            .collect()
    }
}
