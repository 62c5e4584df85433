//! rdk-reconcile
//!
//! Per-agent reconciliation engine:
//! - Two-state replay machine (Idle / Holding) over a finalized ledger
//! - Running cost accumulation against the test case's pricing table
//! - First violation wins: replay stops, no partial cost survives
//! - One agent's verdict never affects another agent's
//!
//! Deterministic, pure logic. No IO.

mod engine;
mod types;

pub use engine::{replay, RentalState};
pub use types::{AgentReport, Inconsistency, Verdict};
