//! Proposal generation — the agent pipeline and its HTTP entry point.
//!
//! Five agents, one orchestrator. Each agent is a prompt template plus a
//! typed output schema over the shared LLM client; the orchestrator wires
//! them together with bounded revision loops.

pub mod costing;
pub mod handlers;
pub mod orchestrator;
pub mod prompts;
pub mod reviewer;
pub mod technical;
pub mod translator;
pub mod writer;
