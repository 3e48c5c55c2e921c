// SPDX-FileCopyrightText: 2026 Hestia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model-backed intent classification.
//!
//! One deterministic model call per turn labels the conversation. The reply is
//! untrusted free text, so anything outside the known labels becomes
//! [`Category::General`].

use std::str::FromStr;
use std::sync::Arc;

use hestia_core::types::{Message, ProviderRequest};
use hestia_core::{HestiaError, ProviderAdapter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::{debug, warn};

/// Housing issue categories. Every turn resolves to exactly one.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Heating,
    Damp,
    Repairs,
    General,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Heating,
        Category::Damp,
        Category::Repairs,
        Category::General,
    ];
}

/// System instruction for the classification call.
pub const CLASSIFIER_PROMPT: &str = "Classify the user message into EXACTLY ONE category:
- heating: boiler errors, radiator issues, temperature, heating problems
- damp: damp, mold, mould, condensation, moisture, wet issues
- repairs: broken taps/pipes, cracked windows, electrical faults, doors, brickwork, roofing, painting
- general: other housing issues

Answer with ONLY the category name in lowercase, nothing else.";

/// Map a raw model reply to a category, falling back to `General`.
pub fn parse_category(reply: &str) -> Category {
    let label = reply.trim().to_lowercase();
    match Category::from_str(&label) {
        Ok(category) => category,
        Err(e) => {
            warn!(reply = %label, error = %e, "unrecognized classifier reply, using general");
            Category::General
        }
    }
}

/// Labels a conversation with one [`Category`].
#[derive(Clone)]
pub struct IntentClassifier {
    provider: Arc<dyn ProviderAdapter>,
    model: String,
}

impl IntentClassifier {
    pub fn new(provider: Arc<dyn ProviderAdapter>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// Temperature 0, no tools, classifier prompt ahead of the full history.
    pub fn build_request(&self, history: &[Message]) -> ProviderRequest {
        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(Message::system(CLASSIFIER_PROMPT));
        messages.extend_from_slice(history);

        let mut request = ProviderRequest::new(self.model.clone(), messages);
        request.temperature = Some(0.0);
        request
    }

    /// Classify `history`. Provider failures propagate unretried.
    pub async fn classify(&self, history: &[Message]) -> Result<Category, HestiaError> {
        let response = self.provider.complete(self.build_request(history)).await?;
        let category = parse_category(&response.message.content);
        debug!(issue_type = %category, "classified turn");
        Ok(category)
    }
}

impl std::fmt::Debug for IntentClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntentClassifier")
            .field("provider", &self.provider.name())
            .field("model", &self.model)
            .finish()
    }
}
