// SPDX-FileCopyrightText: 2026 Hestia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Intent routing for housing queries.
//!
//! The [`IntentClassifier`] labels a conversation with a [`Category`], the
//! [`DispatchTable`] maps that label to a persona-bound [`SpecialistAgent`],
//! and the agent produces the turn's reply, calling tools as the model asks.

pub mod classifier;
pub mod dispatch;
pub mod observer;
pub mod persona;
pub mod specialist;

pub use classifier::{CLASSIFIER_PROMPT, Category, IntentClassifier, parse_category};
pub use dispatch::DispatchTable;
pub use observer::{NoopObserver, TurnObserver};
pub use persona::Persona;
pub use specialist::{AgentSettings, SamplingOverrides, SpecialistAgent};
