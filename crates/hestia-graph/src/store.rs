// SPDX-FileCopyrightText: 2026 Hestia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-thread conversation persistence.

use async_trait::async_trait;
use dashmap::DashMap;
use hestia_core::HestiaError;

use crate::state::ConversationState;

/// Loads and saves the state of a conversation thread.
///
/// Concurrent turns on the same thread are not serialized here: the last save wins.
#[async_trait]
pub trait ThreadStore: Send + Sync {
    async fn load(&self, thread_id: &str) -> Result<Option<ConversationState>, HestiaError>;

    async fn save(&self, thread_id: &str, state: ConversationState) -> Result<(), HestiaError>;
}

/// Process-local store. Threads are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryThreadStore {
    threads: DashMap<String, ConversationState>,
}

impl InMemoryThreadStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.threads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.threads.is_empty()
    }
}

#[async_trait]
impl ThreadStore for InMemoryThreadStore {
    async fn load(&self, thread_id: &str) -> Result<Option<ConversationState>, HestiaError> {
        Ok(self.threads.get(thread_id).map(|entry| entry.value().clone()))
    }

    async fn save(&self, thread_id: &str, state: ConversationState) -> Result<(), HestiaError> {
        self.threads.insert(thread_id.to_string(), state);
        Ok(())
    }
}
