// SPDX-FileCopyrightText: 2026 Hestia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Hestia integration tests.
//!
//! - [`MockProvider`] - scripted LLM provider, no network
//! - [`TestHarness`] - full gateway router over a mock-backed routing graph

pub mod harness;
pub mod mock_provider;

pub use harness::{HttpReply, TestHarness};
pub use mock_provider::{MockProvider, MockReply};
