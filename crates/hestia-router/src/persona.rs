// SPDX-FileCopyrightText: 2026 Hestia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixed specialist personas, one per [`Category`].

use crate::classifier::Category;

/// A specialist's identity: the category it serves, its node label, and its
/// system instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persona {
    pub category: Category,
    pub agent_name: String,
    pub system_prompt: String,
}

impl Persona {
    pub fn new(
        category: Category,
        agent_name: impl Into<String>,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            category,
            agent_name: agent_name.into(),
            system_prompt: system_prompt.into(),
        }
    }

    /// The built-in persona for `category`.
    pub fn builtin(category: Category) -> Self {
        let (agent_name, system_prompt) = match category {
            Category::Heating => (
                "heating_agent",
                "You are a heating system expert. Help users with boiler errors, radiator issues, \
                 temperature problems, and heating maintenance. Provide practical, \
                 safety-conscious advice.",
            ),
            Category::Damp => (
                "damp_agent",
                "You are a damp and moisture specialist. Help users with mold, condensation, \
                 moisture, and dampness problems. Provide practical solutions and prevention tips.",
            ),
            Category::Repairs => (
                "repairs_agent",
                "You are a repairs and maintenance expert. Help users with plumbing, electrical, \
                 structural issues, broken fixtures, and general home maintenance. Provide \
                 practical advice and safety warnings when needed.",
            ),
            Category::General => (
                "general_agent",
                "You are a general housing advisor. Help users with any housing-related questions \
                 that don't fit into heating, damp, or repairs categories. Provide practical \
                 advice and guidance.",
            ),
        };
        Self::new(category, agent_name, system_prompt)
    }
}
