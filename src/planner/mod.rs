//! Study plans: a three-level outline (plan, topic, subtopic) with per-item
//! progress status. Plans are either authored directly or ingested from an
//! AI-drafted outline.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Pending,
    InProgress,
    Completed,
    NeedsReview,
}

impl Default for Status {
    fn default() -> Self {
        Status::Pending
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySubtopic {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: Status,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyTopic {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub subtopics: Vec<StudySubtopic>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyPlan {
    pub id: String,
    pub title: String,
    pub subject: String,
    #[serde(default)]
    pub topics: Vec<StudyTopic>,
}

/// Untrusted outline shape coming back from the AI adapter. Statuses and ids
/// are assigned on ingestion, never parsed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDraft {
    pub title: String,
    pub subject: String,
    #[serde(default)]
    pub topics: Vec<PlanTopicDraft>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanTopicDraft {
    pub name: String,
    #[serde(default)]
    pub subtopics: Vec<PlanSubtopicDraft>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSubtopicDraft {
    pub name: String,
}

impl StudyPlan {
    /// Materialize a drafted outline into a plan. Every item starts pending.
    pub fn from_draft(id: &str, draft: PlanDraft) -> Self {
        let topics = draft
            .topics
            .into_iter()
            .enumerate()
            .map(|(ti, topic)| StudyTopic {
                id: format!("{}-topic-{}", id, ti + 1),
                name: topic.name,
                status: Status::Pending,
                subtopics: topic
                    .subtopics
                    .into_iter()
                    .enumerate()
                    .map(|(si, sub)| StudySubtopic {
                        id: format!("{}-topic-{}-sub-{}", id, ti + 1, si + 1),
                        name: sub.name,
                        status: Status::Pending,
                    })
                    .collect(),
            })
            .collect();

        StudyPlan {
            id: id.to_string(),
            title: draft.title,
            subject: draft.subject,
            topics,
        }
    }

    pub fn topic_mut(&mut self, topic_id: &str) -> Option<&mut StudyTopic> {
        self.topics.iter_mut().find(|t| t.id == topic_id)
    }

    /// Set a topic's status directly. No effect on subtopics.
    pub fn set_topic_status(&mut self, topic_id: &str, status: Status) -> bool {
        match self.topic_mut(topic_id) {
            Some(topic) => {
                topic.status = status;
                true
            }
            None => false,
        }
    }

    /// Set a subtopic's status, then refresh the owning topic's rollup.
    pub fn set_subtopic_status(&mut self, subtopic_id: &str, status: Status) -> bool {
        for topic in &mut self.topics {
            if let Some(sub) = topic.subtopics.iter_mut().find(|s| s.id == subtopic_id) {
                sub.status = status;
                topic.refresh_status();
                return true;
            }
        }
        false
    }

    /// Fraction of subtopics completed, across all topics. Topics without
    /// subtopics count as one unit themselves.
    pub fn progress(&self) -> f64 {
        let mut total = 0usize;
        let mut done = 0usize;
        for topic in &self.topics {
            if topic.subtopics.is_empty() {
                total += 1;
                if topic.status == Status::Completed {
                    done += 1;
                }
            } else {
                total += topic.subtopics.len();
                done += topic
                    .subtopics
                    .iter()
                    .filter(|s| s.status == Status::Completed)
                    .count();
            }
        }
        if total == 0 {
            0.0
        } else {
            done as f64 / total as f64
        }
    }
}

impl StudyTopic {
    /// Assistive rollup from subtopic statuses. This is a convenience, not an
    /// invariant: a caller may still set the topic status directly and the
    /// children are left alone.
    pub fn refresh_status(&mut self) {
        if self.subtopics.is_empty() {
            return;
        }
        if self.subtopics.iter().all(|s| s.status == Status::Completed) {
            self.status = Status::Completed;
        } else if self
            .subtopics
            .iter()
            .any(|s| s.status != Status::Pending)
        {
            self.status = Status::InProgress;
        }
    }
}
