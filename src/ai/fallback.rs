//! Deterministic fallbacks used when the provider is unreachable or returns
//! something unusable. Each mirrors the shape contract of its helper exactly,
//! so downstream code never needs to distinguish generated from canned output.

use crate::flashcards::CardDraft;
use crate::planner::{PlanDraft, PlanTopicDraft, PlanSubtopicDraft};

use super::{QuizQuestion, SessionAnalysis, Summary};

const BRANCH_SUFFIXES: [&str; 6] = [
    "Fundamentals",
    "Key Concepts",
    "Applications",
    "History",
    "Common Pitfalls",
    "Advanced Topics",
];

pub fn quiz_questions(topic: &str, count: usize) -> Vec<QuizQuestion> {
    (0..count)
        .map(|i| {
            let options = vec![
                format!("A core principle of {}", topic),
                "An unrelated concept".to_string(),
                format!("A common misconception about {}", topic),
                "None of the above".to_string(),
            ];
            QuizQuestion {
                question: format!(
                    "Which of the following best describes concept {} of {}?",
                    i + 1,
                    topic
                ),
                correct_answer: options[0].clone(),
                options,
                explanation: format!(
                    "Review your notes on {} to verify this answer.",
                    topic
                ),
            }
        })
        .collect()
}

pub fn flashcards(topic: &str, count: usize) -> Vec<CardDraft> {
    (0..count)
        .map(|i| CardDraft {
            front: format!("Key idea {} of {}", i + 1, topic),
            back: format!("Write down what you remember about {} and check your notes.", topic),
        })
        .collect()
}

/// First-sentences summary. Good enough to keep the page rendering when the
/// provider is down.
pub fn summary(text: &str) -> Summary {
    let condensed: String = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let excerpt: String = condensed.chars().take(300).collect();
    Summary {
        title: "Summary".to_string(),
        key_points: vec![
            "The full summary could not be generated right now.".to_string(),
            "The excerpt below covers the opening of the material.".to_string(),
        ],
        summary: excerpt,
    }
}

pub fn session_analysis() -> SessionAnalysis {
    SessionAnalysis {
        strengths: vec!["You completed a study session.".to_string()],
        weaknesses: vec!["Detailed analysis is unavailable right now.".to_string()],
        recommendations: vec![
            "Review the topics you marked as difficult.".to_string(),
            "Try a short quiz to check retention.".to_string(),
        ],
    }
}

pub fn plan_draft(subject: &str) -> PlanDraft {
    PlanDraft {
        title: format!("{} Study Plan", subject),
        subject: subject.to_string(),
        topics: vec![
            PlanTopicDraft {
                name: format!("{} Basics", subject),
                subtopics: vec![
                    PlanSubtopicDraft {
                        name: "Core terminology".to_string(),
                    },
                    PlanSubtopicDraft {
                        name: "Foundational concepts".to_string(),
                    },
                ],
            },
            PlanTopicDraft {
                name: "Practice".to_string(),
                subtopics: vec![PlanSubtopicDraft {
                    name: "Worked examples".to_string(),
                }],
            },
            PlanTopicDraft {
                name: "Review".to_string(),
                subtopics: vec![PlanSubtopicDraft {
                    name: "Self-testing".to_string(),
                }],
            },
        ],
    }
}

/// Cycles through a fixed suffix table, so the labels stay sensible for any
/// requested count.
pub fn branch_labels(topic: &str, count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            let suffix = BRANCH_SUFFIXES[i % BRANCH_SUFFIXES.len()];
            if i < BRANCH_SUFFIXES.len() {
                format!("{} {}", topic, suffix)
            } else {
                format!("{} {} {}", topic, suffix, i / BRANCH_SUFFIXES.len() + 1)
            }
        })
        .collect()
}

pub fn chat_reply(message: &str) -> String {
    format!(
        "I can't reach the tutor service right now, so here is a study tip instead: \
         rephrase \"{}\" in your own words and try to answer it from your notes first.",
        message.chars().take(80).collect::<String>()
    )
}
