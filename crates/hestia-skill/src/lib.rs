// SPDX-FileCopyrightText: 2026 Hestia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tools the specialist agents can call.
//!
//! Tools are a pluggable capability: anything implementing [`Tool`] can be
//! registered. The [`builtin`] set returns canned strings and is what the
//! server registers by default.

pub mod builtin;
pub mod tool;

pub use builtin::register_builtins;
pub use tool::{Tool, ToolOutput, ToolRegistry};
