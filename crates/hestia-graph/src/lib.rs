// SPDX-FileCopyrightText: 2026 Hestia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Graph runtime for the housing assistant.
//!
//! A [`RoutingGraph`] runs one turn as `start -> classify -> dispatch ->
//! specialist -> end`, persisting conversation state per thread and
//! optionally streaming execution events as they happen.

pub mod event;
pub mod graph;
pub mod registry;
pub mod routing;
pub mod state;
pub mod store;

pub use event::{EventStream, GraphEvent};
pub use graph::Graph;
pub use registry::GraphRegistry;
pub use routing::{CLASSIFY_NODE, RoutingGraph};
pub use state::{ConversationState, RunConfig};
pub use store::{InMemoryThreadStore, ThreadStore};
