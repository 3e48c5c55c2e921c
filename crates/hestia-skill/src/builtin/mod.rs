// SPDX-FileCopyrightText: 2026 Hestia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in housing tools.
//!
//! These return synthetic confirmations; real integrations register their own
//! [`Tool`](crate::Tool) implementations under the same names.

pub mod escalation;
pub mod knowledge;
pub mod maintenance;

pub use escalation::EscalateToHumanTool;
pub use knowledge::SearchHousingKnowledgeTool;
pub use maintenance::{GetBoilerInfoTool, GetRepairGuidanceTool, ScheduleEngineerTool, Urgency};

use std::sync::Arc;

use crate::ToolRegistry;

/// Registers all built-in tools into the given registry.
pub fn register_builtins(registry: &mut ToolRegistry) {
    registry.register(Arc::new(SearchHousingKnowledgeTool));
    registry.register(Arc::new(GetBoilerInfoTool));
    registry.register(Arc::new(GetRepairGuidanceTool));
    registry.register(Arc::new(ScheduleEngineerTool));
    registry.register(Arc::new(EscalateToHumanTool));
}
