// Moderation service - banned-word administration and message checks.
//
// This service handles:
// - Reading the word list fresh for every message check
// - Adding / listing / removing banned words
//
// NO Discord dependencies here - just pure domain logic.

use super::ban_words::{normalize_word, parse_word_list};
use super::moderation_models::{AddWordsSummary, IncomingMessage, ModerationDecision};
use super::moderation_policy::evaluate;
use async_trait::async_trait;
use thiserror::Error;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum WordStoreError {
    #[error("Storage error: {0}")]
    Storage(String),
}

#[derive(Debug, Error)]
pub enum ModerationError {
    #[error("No words given")]
    EmptyWordList,

    #[error("Word \"{0}\" is not in the list")]
    WordNotFound(String),

    #[error(transparent)]
    Store(#[from] WordStoreError),
}

// ============================================================================
// STORAGE TRAIT (PORT)
// ============================================================================

/// Persistent banned-word list.
///
/// Words are stored lowercase and never empty; the service normalises
/// before calling in.
#[async_trait]
pub trait WordStore: Send + Sync {
    /// All stored words, in insertion order.
    async fn list_words(&self) -> Result<Vec<String>, WordStoreError>;

    /// Insert a word. Returns false if it was already present.
    async fn add_word(&self, word: &str) -> Result<bool, WordStoreError>;

    /// Delete a word. Returns the number of rows removed (0 or 1).
    async fn remove_word(&self, word: &str) -> Result<u64, WordStoreError>;
}

// ============================================================================
// CORE SERVICE
// ============================================================================

pub struct ModerationService<S: WordStore> {
    store: S,
}

impl<S: WordStore> ModerationService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Evaluate a message against the current word list.
    ///
    /// Admins short-circuit before the store is touched.
    pub async fn check_message(
        &self,
        message: &IncomingMessage,
        is_sender_admin: bool,
    ) -> Result<ModerationDecision, ModerationError> {
        if is_sender_admin {
            return Ok(ModerationDecision::Allow);
        }

        let words = self.store.list_words().await?;
        Ok(evaluate(message, false, &words))
    }

    /// Add every word found in `input` (separated by commas, semicolons or spaces).
    pub async fn add_words(&self, input: &str) -> Result<AddWordsSummary, ModerationError> {
        let words = parse_word_list(input);
        if words.is_empty() {
            return Err(ModerationError::EmptyWordList);
        }

        let mut summary = AddWordsSummary::default();
        for word in words {
            if self.store.add_word(&word).await? {
                summary.added.push(word);
            } else {
                summary.already_present.push(word);
            }
        }

        Ok(summary)
    }

    pub async fn list_words(&self) -> Result<Vec<String>, ModerationError> {
        Ok(self.store.list_words().await?)
    }

    /// Remove a single word. Returns the normalised word that was removed.
    pub async fn remove_word(&self, input: &str) -> Result<String, ModerationError> {
        let word = normalize_word(input).ok_or(ModerationError::EmptyWordList)?;

        let removed = self.store.remove_word(&word).await?;
        if removed == 0 {
            return Err(ModerationError::WordNotFound(word));
        }

        Ok(word)
    }
}

// ============================================================================
// TESTS
// ============================================================================
