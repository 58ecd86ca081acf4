//! Form DTOs and template view models

use auth::domain::identity::Identity;
use serde::{Deserialize, Serialize};

use crate::domain::entity::poll::Poll;

// ============================================================================
// Forms
// ============================================================================

/// Create-poll form fields
///
/// Fields default to empty so a missing field fails validation (400)
/// instead of being rejected as an unreadable form.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPollForm {
    #[serde(default)]
    pub title: String,
    /// Newline-separated option names
    #[serde(default)]
    pub options: String,
}

/// Vote form fields
#[derive(Debug, Clone, Deserialize)]
pub struct VoteForm {
    /// 0-based option index as submitted; validated server-side
    #[serde(default)]
    pub option: String,
}

/// Add-option form fields
#[derive(Debug, Clone, Deserialize)]
pub struct AddOptionForm {
    #[serde(default)]
    pub name: String,
}

// ============================================================================
// Views
// ============================================================================

/// One option as rendered in a template
#[derive(Debug, Clone, Serialize)]
pub struct OptionView {
    pub index: usize,
    pub name: String,
    pub votes: i64,
}

/// One poll as rendered in a template
#[derive(Debug, Clone, Serialize)]
pub struct PollView {
    pub id: String,
    pub title: String,
    pub options: Vec<OptionView>,
    pub total_votes: i64,
    pub created_at: String,
    /// Whether the viewing identity created this poll (controls the
    /// delete button)
    pub is_owner: bool,
}

impl PollView {
    pub fn from_poll(poll: &Poll, viewer: &Identity) -> Self {
        let is_owner = viewer
            .current_user()
            .is_some_and(|u| poll.is_owned_by(&u.user_id));

        Self {
            id: poll.poll_id.to_string(),
            title: poll.title.to_string(),
            options: poll
                .options
                .iter()
                .enumerate()
                .map(|(index, o)| OptionView {
                    index,
                    name: o.name.to_string(),
                    votes: o.votes,
                })
                .collect(),
            total_votes: poll.total_votes(),
            created_at: poll.created_at.format("%b %e, %Y %H:%M UTC").to_string(),
            is_owner,
        }
    }

    pub fn from_polls(polls: &[Poll], viewer: &Identity) -> Vec<Self> {
        polls.iter().map(|p| Self::from_poll(p, viewer)).collect()
    }
}
