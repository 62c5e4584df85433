//! Per-agent event ledgers.
//!
//! An [`AgentLedger`] is append-only while a test case is being read and is
//! consumed exactly once by reconciliation. [`AgentLedger::finalize`] fixes
//! the replay order: ascending timestamp, ties broken by input order. The
//! same recorded events always replay in the same order, so two runs over
//! the same input always produce the same verdicts.

use std::collections::BTreeMap;

use crate::{valid_name, Event, EventKind, MAX_DISTANCE_KM, MAX_EVENT_TS, MAX_SEVERITY_PCT};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Invariant violations an event append can surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Agent name must be 1..=40 word characters.
    BadAgentName { name: String },
    /// Timestamps must be in 0..=100_000.
    TimestampOutOfRange { ts: i64 },
    /// Accident severity must be in 0..=100.
    SeverityOutOfRange { severity_pct: i64 },
    /// Distance driven must be in 0..=1_000.
    DistanceOutOfRange { distance_km: i64 },
    /// Picked-up car name must be 1..=40 word characters.
    BadCarName { name: String },
}

impl std::fmt::Display for LedgerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadAgentName { name } => write!(f, "bad agent name: {:?}", name),
            Self::TimestampOutOfRange { ts } => {
                write!(f, "timestamp must be in 0..={MAX_EVENT_TS}, got {ts}")
            }
            Self::SeverityOutOfRange { severity_pct } => {
                write!(
                    f,
                    "severity must be in 0..={MAX_SEVERITY_PCT}, got {severity_pct}"
                )
            }
            Self::DistanceOutOfRange { distance_km } => {
                write!(
                    f,
                    "distance must be in 0..={MAX_DISTANCE_KM}, got {distance_km}"
                )
            }
            Self::BadCarName { name } => write!(f, "bad car name: {:?}", name),
        }
    }
}

impl std::error::Error for LedgerError {}

// ---------------------------------------------------------------------------
// AgentLedger
// ---------------------------------------------------------------------------

/// One agent's recorded events within one test case.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgentLedger {
    agent: String,
    events: Vec<Event>,
}

impl AgentLedger {
    pub fn new(agent: impl Into<String>) -> Result<Self, LedgerError> {
        let agent = agent.into();
        if !valid_name(&agent) {
            return Err(LedgerError::BadAgentName { name: agent });
        }
        Ok(Self {
            agent,
            events: Vec::new(),
        })
    }

    /// Append one event, enforcing field bounds.
    ///
    /// The ledger is **not** mutated on error. Nothing is deduplicated:
    /// exact multiplicity feeds the replay state machine.
    pub fn append(&mut self, event: Event) -> Result<(), LedgerError> {
        Self::validate(&event)?;
        self.events.push(event);
        Ok(())
    }

    pub fn agent(&self) -> &str {
        &self.agent
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Consume the ledger and return its events in replay order.
    ///
    /// `sort_by_key` is stable, so events sharing a timestamp keep their
    /// input order — which can decide a verdict (return-then-pickup vs
    /// pickup-then-return at the same tick are different sequences).
    pub fn finalize(mut self) -> Vec<Event> {
        self.events.sort_by_key(|e| e.ts);
        self.events
    }

    fn validate(event: &Event) -> Result<(), LedgerError> {
        if event.ts < 0 || event.ts > MAX_EVENT_TS {
            return Err(LedgerError::TimestampOutOfRange { ts: event.ts });
        }
        match &event.kind {
            EventKind::Pickup { car } => {
                if !valid_name(car) {
                    return Err(LedgerError::BadCarName { name: car.clone() });
                }
            }
            EventKind::Accident { severity_pct } => {
                if *severity_pct < 0 || *severity_pct > MAX_SEVERITY_PCT {
                    return Err(LedgerError::SeverityOutOfRange {
                        severity_pct: *severity_pct,
                    });
                }
            }
            EventKind::Return { distance_km } => {
                if *distance_km < 0 || *distance_km > MAX_DISTANCE_KM {
                    return Err(LedgerError::DistanceOutOfRange {
                        distance_km: *distance_km,
                    });
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// EventBook
// ---------------------------------------------------------------------------

/// All agent ledgers of one test case, keyed by agent name.
///
/// `BTreeMap` keys iterate lexicographically, which is exactly the required
/// emission order for verdicts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventBook {
    ledgers: BTreeMap<String, AgentLedger>,
}

impl EventBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route one event to its agent's ledger, creating the ledger on first
    /// sight of the agent.
    pub fn append(&mut self, agent: &str, event: Event) -> Result<(), LedgerError> {
        if let Some(ledger) = self.ledgers.get_mut(agent) {
            return ledger.append(event);
        }
        let mut ledger = AgentLedger::new(agent)?;
        ledger.append(event)?;
        self.ledgers.insert(agent.to_string(), ledger);
        Ok(())
    }

    /// Consume the book, yielding `(agent, ledger)` in lexicographic order.
    pub fn into_ledgers(self) -> BTreeMap<String, AgentLedger> {
        self.ledgers
    }

    pub fn len(&self) -> usize {
        self.ledgers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ledgers.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
