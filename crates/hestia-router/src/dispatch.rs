// SPDX-FileCopyrightText: 2026 Hestia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Category to specialist mapping.

use std::collections::HashMap;
use std::sync::Arc;

use hestia_core::ProviderAdapter;
use hestia_skill::ToolRegistry;

use crate::classifier::Category;
use crate::persona::Persona;
use crate::specialist::{AgentSettings, SpecialistAgent};

/// Maps each [`Category`] to its specialist. `General` is always present and
/// answers for anything unmapped.
#[derive(Debug, Clone)]
pub struct DispatchTable {
    agents: HashMap<Category, Arc<SpecialistAgent>>,
    general: Arc<SpecialistAgent>,
}

impl DispatchTable {
    /// Table with only the general specialist.
    pub fn new(general: SpecialistAgent) -> Self {
        let general = Arc::new(general);
        let mut agents = HashMap::new();
        agents.insert(Category::General, general.clone());
        Self { agents, general }
    }

    /// Add or replace the specialist for its persona's category.
    pub fn with_agent(mut self, agent: SpecialistAgent) -> Self {
        let category = agent.persona().category;
        let agent = Arc::new(agent);
        if category == Category::General {
            self.general = agent.clone();
        }
        self.agents.insert(category, agent);
        self
    }

    /// One specialist per category using the built-in personas.
    pub fn builtin(
        provider: Arc<dyn ProviderAdapter>,
        tools: Arc<ToolRegistry>,
        settings: AgentSettings,
    ) -> Self {
        let make = |category| {
            SpecialistAgent::new(
                Persona::builtin(category),
                provider.clone(),
                tools.clone(),
                settings.clone(),
            )
        };
        Category::ALL
            .into_iter()
            .fold(Self::new(make(Category::General)), |table, category| {
                table.with_agent(make(category))
            })
    }

    /// The specialist for `category`, or the general one.
    pub fn route(&self, category: Option<Category>) -> &SpecialistAgent {
        category
            .and_then(|c| self.agents.get(&c))
            .unwrap_or(&self.general)
    }

    pub fn categories(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|c| self.agents.contains_key(c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use hestia_test_utils::MockProvider;

    use super::*;

    fn settings() -> AgentSettings {
        AgentSettings {
            model: "m".into(),
            temperature: 0.7,
            max_tokens: 100,
            max_tool_rounds: 1,
        }
    }

    fn builtin() -> DispatchTable {
        DispatchTable::builtin(
            Arc::new(MockProvider::new()),
            Arc::new(ToolRegistry::new()),
            settings(),
        )
    }

    #[test]
    fn every_category_routes_to_its_persona() {
        let table = builtin();
        for category in Category::ALL {
            let agent = table.route(Some(category));
            assert_eq!(agent.persona(), &Persona::builtin(category));
        }
    }

    #[test]
    fn missing_category_routes_to_general() {
        let table = builtin();
        assert_eq!(table.route(None).name(), "general_agent");
    }

    #[test]
    fn unmapped_category_routes_to_general() {
        let general = SpecialistAgent::new(
            Persona::builtin(Category::General),
            Arc::new(MockProvider::new()),
            Arc::new(ToolRegistry::new()),
            settings(),
        );
        let table = DispatchTable::new(general);
        assert_eq!(table.route(Some(Category::Damp)).name(), "general_agent");
        assert_eq!(table.categories(), vec![Category::General]);
    }

    #[test]
    fn replacing_general_updates_fallback() {
        let custom = SpecialistAgent::new(
            Persona::new(Category::General, "concierge", "You are a concierge."),
            Arc::new(MockProvider::new()),
            Arc::new(ToolRegistry::new()),
            settings(),
        );
        let table = builtin().with_agent(custom);
        assert_eq!(table.route(None).name(), "concierge");
    }
}
