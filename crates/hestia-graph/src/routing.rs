// SPDX-FileCopyrightText: 2026 Hestia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The housing routing graph.
//!
//! ```text
//! start -> classify -> dispatch -> {heating|damp|repairs|general} -> end
//! ```
//!
//! Each invocation walks the whole path once: one classification and one
//! specialist turn. State is saved only when `end` is reached.

use std::sync::Arc;

use async_trait::async_trait;
use hestia_config::HestiaConfig;
use hestia_core::{HestiaError, Message, ProviderAdapter};
use hestia_router::{
    AgentSettings, Category, DispatchTable, IntentClassifier, NoopObserver, TurnObserver,
};
use hestia_skill::ToolRegistry;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::event::{EventStream, GraphEvent};
use crate::graph::Graph;
use crate::state::{ConversationState, RunConfig};
use crate::store::ThreadStore;

/// Node label of the classification step.
///
/// This node emits no `Token` events. Its model output is a routing label,
/// not text for the user, so only specialist tokens reach streaming clients.
pub const CLASSIFY_NODE: &str = "detect_intent";

const EVENT_BUFFER: usize = 64;

/// Positions in the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Start,
    Classify,
    Dispatch,
    Specialist(Category),
    End,
}

type EventSender = mpsc::Sender<Result<GraphEvent, HestiaError>>;

/// Classify, dispatch, answer.
#[derive(Clone)]
pub struct RoutingGraph {
    id: String,
    classifier: IntentClassifier,
    dispatch: DispatchTable,
    store: Arc<dyn ThreadStore>,
}

impl RoutingGraph {
    pub fn new(
        id: impl Into<String>,
        classifier: IntentClassifier,
        dispatch: DispatchTable,
        store: Arc<dyn ThreadStore>,
    ) -> Self {
        Self {
            id: id.into(),
            classifier,
            dispatch,
            store,
        }
    }

    /// The standard graph: built-in personas over one provider and tool set.
    pub fn from_config(
        config: &HestiaConfig,
        provider: Arc<dyn ProviderAdapter>,
        tools: Arc<ToolRegistry>,
        store: Arc<dyn ThreadStore>,
    ) -> Self {
        let classifier = IntentClassifier::new(provider.clone(), config.openai.model.clone());
        let dispatch = DispatchTable::builtin(provider, tools, AgentSettings::from_config(config));
        Self::new(config.graph.id.clone(), classifier, dispatch, store)
    }

    async fn run(
        &self,
        input: Vec<Message>,
        config: &RunConfig,
        events: Option<&EventSender>,
    ) -> Result<ConversationState, HestiaError> {
        let mut state = self
            .store
            .load(&config.thread_id)
            .await?
            .unwrap_or_default();
        state.append(input);
        state.issue_type = None;
        state.current_agent = None;

        info!(
            graph_id = %self.id,
            thread_id = %config.thread_id,
            user_id = %config.user_id,
            history = state.messages.len(),
            "run started"
        );

        let mut step = Step::Start;
        loop {
            step = match step {
                Step::Start => Step::Classify,
                Step::Classify => {
                    emit(events, GraphEvent::NodeStarted { node: CLASSIFY_NODE.into() }).await;
                    let category = self.classifier.classify(&state.messages).await?;
                    state.issue_type = Some(category);
                    emit(events, GraphEvent::NodeFinished { node: CLASSIFY_NODE.into() }).await;
                    Step::Dispatch
                }
                Step::Dispatch => Step::Specialist(state.issue_type.unwrap_or(Category::General)),
                Step::Specialist(category) => {
                    let agent = self.dispatch.route(Some(category));
                    let node = agent.name().to_string();
                    state.current_agent = Some(node.clone());
                    info!(thread_id = %config.thread_id, issue_type = %category, agent = %node, "dispatched");

                    emit(events, GraphEvent::NodeStarted { node: node.clone() }).await;
                    let produced = match events {
                        Some(tx) => {
                            let observer = NodeObserver { tx, node: &node };
                            agent.respond(&state.messages, config.sampling, &observer).await?
                        }
                        None => {
                            agent
                                .respond(&state.messages, config.sampling, &NoopObserver)
                                .await?
                        }
                    };
                    state.append(produced);
                    emit(events, GraphEvent::NodeFinished { node }).await;
                    Step::End
                }
                Step::End => break,
            };
        }

        if config.persist {
            self.store.save(&config.thread_id, state.clone()).await?;
            debug!(thread_id = %config.thread_id, messages = state.messages.len(), "thread saved");
        } else {
            debug!(thread_id = %config.thread_id, "transient run, state not saved");
        }
        Ok(state)
    }
}

#[async_trait]
impl Graph for RoutingGraph {
    fn id(&self) -> &str {
        &self.id
    }

    async fn invoke(
        &self,
        input: Vec<Message>,
        config: RunConfig,
    ) -> Result<ConversationState, HestiaError> {
        self.run(input, &config, None).await
    }

    fn stream_events(&self, input: Vec<Message>, config: RunConfig) -> EventStream {
        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        let graph = self.clone();

        let task = tokio::spawn(async move {
            emit(
                Some(&tx),
                GraphEvent::RunStarted {
                    thread_id: config.thread_id.clone(),
                },
            )
            .await;
            let outcome = match graph.run(input, &config, Some(&tx)).await {
                Ok(state) => Ok(GraphEvent::RunFinished { state }),
                Err(e) => Err(e),
            };
            let _ = tx.send(outcome).await;
        });

        EventStream::new(rx, task)
    }
}

impl std::fmt::Debug for RoutingGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutingGraph")
            .field("id", &self.id)
            .field("classifier", &self.classifier)
            .field("dispatch", &self.dispatch)
            .finish()
    }
}

/// Send an event if streaming. A closed receiver is ignored: the stream owner
/// aborts this task on drop.
async fn emit(events: Option<&EventSender>, event: GraphEvent) {
    if let Some(tx) = events {
        let _ = tx.send(Ok(event)).await;
    }
}

/// Forwards one specialist node's progress as graph events.
struct NodeObserver<'a> {
    tx: &'a EventSender,
    node: &'a str,
}

#[async_trait]
impl TurnObserver for NodeObserver<'_> {
    async fn on_token(&self, text: &str) {
        emit(
            Some(self.tx),
            GraphEvent::Token {
                node: self.node.to_string(),
                text: text.to_string(),
            },
        )
        .await;
    }

    async fn on_tool_start(&self, tool: &str) {
        emit(
            Some(self.tx),
            GraphEvent::ToolStarted {
                node: self.node.to_string(),
                tool: tool.to_string(),
            },
        )
        .await;
    }

    async fn on_tool_end(&self, tool: &str, is_error: bool) {
        emit(
            Some(self.tx),
            GraphEvent::ToolFinished {
                node: self.node.to_string(),
                tool: tool.to_string(),
                is_error,
            },
        )
        .await;
    }
}
