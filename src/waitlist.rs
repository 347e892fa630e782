//! In-memory waitlist.
//!
//! Signups are kept for the lifetime of the process. Positions are 1-based
//! and never reused; joining twice with the same address (case-insensitive)
//! returns the original entry.

use crate::i18n::Locale;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;
use std::sync::{Mutex, OnceLock};
use thiserror::Error;

const MAX_EMAIL_LEN: usize = 254;

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitlistEntry {
    pub email: String,
    pub locale: Locale,
    pub position: usize,
    pub joined_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    Joined(WaitlistEntry),
    AlreadyJoined(WaitlistEntry),
}

impl JoinOutcome {
    pub fn entry(&self) -> &WaitlistEntry {
        match self {
            JoinOutcome::Joined(entry) | JoinOutcome::AlreadyJoined(entry) => entry,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WaitlistError {
    #[error("Invalid email address: '{0}'")]
    InvalidEmail(String),
}

#[derive(Debug, Default)]
pub struct WaitlistStore {
    entries: Mutex<Vec<WaitlistEntry>>,
}

impl WaitlistStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn join(&self, email: &str, locale: Locale) -> Result<JoinOutcome, WaitlistError> {
        let email = email.trim().to_lowercase();
        if !is_valid_email(&email) {
            return Err(WaitlistError::InvalidEmail(email));
        }

        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(existing) = entries.iter().find(|e| e.email == email) {
            return Ok(JoinOutcome::AlreadyJoined(existing.clone()));
        }

        let entry = WaitlistEntry {
            email,
            locale,
            position: entries.len() + 1,
            joined_at: Utc::now(),
        };
        entries.push(entry.clone());

        Ok(JoinOutcome::Joined(entry))
    }

    pub fn count(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    /// Snapshot of all entries in signup order.
    pub fn entries(&self) -> Vec<WaitlistEntry> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

fn is_valid_email(email: &str) -> bool {
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
    });

    email.len() <= MAX_EMAIL_LEN && regex.is_match(email)
}
