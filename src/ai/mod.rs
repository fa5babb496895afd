//! Generative-AI completion adapter. One provider seam (`TextModel`), one
//! concrete HTTP client, and a set of typed helpers that are total functions:
//! any failure along the way (transport, blocked response, malformed JSON,
//! wrong shape) is logged and replaced by a deterministic fallback, so callers
//! never see an error from this module.

pub mod fallback;

use serde::{Deserialize, Serialize};

use crate::flashcards::CardDraft;
use crate::planner::PlanDraft;

/// Provider seam. The production impl is `GeminiClient`; tests plug in stubs.
pub trait TextModel {
    fn complete(&self, prompt: &str) -> Result<String, String>;
}

const GEMINI_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const MAX_OUTPUT_TOKENS: u32 = 8192;

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Option<Vec<CandidatePart>>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Blocking client for the Gemini `generateContent` endpoint. One round trip
/// per call; no retry, no streaming.
pub struct GeminiClient {
    client: reqwest::blocking::Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    /// Reads the key from `GEMINI_API_KEY`.
    pub fn from_env() -> Result<Self, String> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| "GEMINI_API_KEY is not set".to_string())?;
        Ok(GeminiClient {
            client: reqwest::blocking::Client::new(),
            api_key,
            model: DEFAULT_MODEL.to_string(),
        })
    }

    pub fn with_key(api_key: &str) -> Self {
        GeminiClient {
            client: reqwest::blocking::Client::new(),
            api_key: api_key.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    fn endpoint(&self) -> Result<url::Url, String> {
        let raw = format!("{}/{}:generateContent", GEMINI_BASE, self.model);
        let mut endpoint = url::Url::parse(&raw).map_err(|e| format!("Invalid endpoint: {}", e))?;
        endpoint.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(endpoint)
    }
}

impl TextModel for GeminiClient {
    fn complete(&self, prompt: &str) -> Result<String, String> {
        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };

        let response = self
            .client
            .post(self.endpoint()?)
            .json(&request)
            .send()
            .map_err(|e| format!("Request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(format!("Provider returned status {}", response.status()));
        }

        let body: GenerateContentResponse = response
            .json()
            .map_err(|e| format!("Failed to parse response: {}", e))?;

        body.candidates
            .and_then(|mut c| if c.is_empty() { None } else { Some(c.remove(0)) })
            .and_then(|c| c.content)
            .and_then(|c| c.parts)
            .and_then(|mut p| if p.is_empty() { None } else { Some(p.remove(0)) })
            .and_then(|p| p.text)
            .ok_or_else(|| "Empty or blocked completion".to_string())
    }
}

/// Models often wrap JSON replies in Markdown code fences despite being told
/// not to. Strip one leading/trailing fence pair if present.
pub fn strip_code_fences(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Skip the language tag on the opening fence ("json", "JSON", ...).
    let rest = match rest.find('\n') {
        Some(pos) => &rest[pos + 1..],
        None => rest,
    };
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    #[serde(default)]
    pub explanation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub topic: String,
    pub difficulty: Difficulty,
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub title: String,
    pub key_points: Vec<String>,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionAnalysis {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

fn parse_reply<T: serde::de::DeserializeOwned>(reply: &str) -> Result<T, String> {
    serde_json::from_str(strip_code_fences(reply)).map_err(|e| e.to_string())
}

/// Generate a quiz with exactly `count` questions of 4 options each. Shape is
/// enforced: a model reply with the wrong question count, option count, or a
/// correct answer not among the options is discarded wholesale.
pub fn generate_quiz(
    model: &dyn TextModel,
    topic: &str,
    difficulty: Difficulty,
    count: usize,
) -> Quiz {
    let prompt = format!(
        "Generate a {} multiple-choice quiz about \"{}\" with exactly {} questions. \
         Respond with ONLY a JSON array, no markdown fences, where each element is \
         {{\"question\": string, \"options\": [4 strings], \"correctAnswer\": string \
         (must be one of the options), \"explanation\": string}}.",
        difficulty.label(),
        topic,
        count
    );

    let questions = match model.complete(&prompt).and_then(|r| {
        let parsed: Vec<QuizQuestion> = parse_reply(&r)?;
        if parsed.len() != count {
            return Err(format!("expected {} questions, got {}", count, parsed.len()));
        }
        for q in &parsed {
            if q.options.len() != 4 {
                return Err(format!("question has {} options", q.options.len()));
            }
            if !q.options.contains(&q.correct_answer) {
                return Err("correct answer not among options".to_string());
            }
        }
        Ok(parsed)
    }) {
        Ok(questions) => questions,
        Err(e) => {
            log::warn!("[ai] quiz generation failed ({}), using fallback", e);
            fallback::quiz_questions(topic, count)
        }
    };

    Quiz {
        topic: topic.to_string(),
        difficulty,
        questions,
    }
}

/// Draft exactly `count` flashcards for a topic.
pub fn generate_flashcards(model: &dyn TextModel, topic: &str, count: usize) -> Vec<CardDraft> {
    let prompt = format!(
        "Create exactly {} study flashcards about \"{}\". Respond with ONLY a JSON \
         array, no markdown fences, of {{\"front\": string, \"back\": string}}.",
        count, topic
    );

    match model.complete(&prompt).and_then(|r| {
        let parsed: Vec<CardDraft> = parse_reply(&r)?;
        if parsed.len() != count {
            return Err(format!("expected {} cards, got {}", count, parsed.len()));
        }
        Ok(parsed)
    }) {
        Ok(cards) => cards,
        Err(e) => {
            log::warn!("[ai] flashcard generation failed ({}), using fallback", e);
            fallback::flashcards(topic, count)
        }
    }
}

/// Summarize arbitrary text (typically extracted from an uploaded document).
pub fn summarize_text(model: &dyn TextModel, text: &str) -> Summary {
    let prompt = format!(
        "Summarize the following study material. Respond with ONLY JSON, no markdown \
         fences: {{\"title\": string, \"keyPoints\": [strings], \"summary\": string}}.\n\n{}",
        text
    );

    match model.complete(&prompt).and_then(|r| parse_reply::<Summary>(&r)) {
        Ok(summary) => summary,
        Err(e) => {
            log::warn!("[ai] summarization failed ({}), using fallback", e);
            fallback::summary(text)
        }
    }
}

/// Analyze a finished study session (topics covered, quiz scores, notes).
pub fn analyze_study_session(model: &dyn TextModel, session_notes: &str) -> SessionAnalysis {
    let prompt = format!(
        "Analyze this study session and respond with ONLY JSON, no markdown fences: \
         {{\"strengths\": [strings], \"weaknesses\": [strings], \
         \"recommendations\": [strings]}}.\n\n{}",
        session_notes
    );

    match model
        .complete(&prompt)
        .and_then(|r| parse_reply::<SessionAnalysis>(&r))
    {
        Ok(analysis) => analysis,
        Err(e) => {
            log::warn!("[ai] session analysis failed ({}), using fallback", e);
            fallback::session_analysis()
        }
    }
}

/// Draft a structured study plan for a subject.
pub fn generate_study_plan(model: &dyn TextModel, subject: &str) -> PlanDraft {
    let prompt = format!(
        "Create a study plan for \"{}\". Respond with ONLY JSON, no markdown fences: \
         {{\"title\": string, \"subject\": string, \"topics\": [{{\"name\": string, \
         \"subtopics\": [{{\"name\": string}}]}}]}}.",
        subject
    );

    match model
        .complete(&prompt)
        .and_then(|r| parse_reply::<PlanDraft>(&r))
    {
        Ok(draft) => draft,
        Err(e) => {
            log::warn!("[ai] study plan generation failed ({}), using fallback", e);
            fallback::plan_draft(subject)
        }
    }
}

/// Suggest exactly `count` child-branch labels for a mind-map node.
pub fn suggest_branches(model: &dyn TextModel, topic: &str, count: usize) -> Vec<String> {
    let prompt = format!(
        "Suggest exactly {} short subtopic labels (2-4 words each) for the mind-map \
         topic \"{}\". Respond with ONLY a JSON array of strings, no markdown fences.",
        count, topic
    );

    match model.complete(&prompt).and_then(|r| {
        let parsed: Vec<String> = parse_reply(&r)?;
        if parsed.len() != count {
            return Err(format!("expected {} labels, got {}", count, parsed.len()));
        }
        Ok(parsed)
    }) {
        Ok(labels) => labels,
        Err(e) => {
            log::warn!("[ai] branch suggestion failed ({}), using fallback", e);
            fallback::branch_labels(topic, count)
        }
    }
}

/// Free-form tutoring chat. History is replayed into the prompt; the reply is
/// plain text, no JSON contract to enforce.
pub fn chat_reply(model: &dyn TextModel, history: &[ChatMessage], message: &str) -> String {
    let mut prompt = String::from(
        "You are a friendly study tutor. Answer the student's question concisely.\n\n",
    );
    for turn in history {
        prompt.push_str(&format!("{}: {}\n", turn.role, turn.content));
    }
    prompt.push_str(&format!("student: {}\ntutor:", message));

    match model.complete(&prompt) {
        Ok(reply) => reply.trim().to_string(),
        Err(e) => {
            log::warn!("[ai] chat failed ({}), using fallback", e);
            fallback::chat_reply(message)
        }
    }
}
