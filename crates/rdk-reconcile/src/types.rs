use serde::Serialize;

/// Why an agent's ledger failed reconciliation.
///
/// Blame evidence for diagnostics; user-visible output collapses every
/// variant to the single `INCONSISTENT` marker.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Inconsistency {
    /// Accident or return recorded while no car was held.
    ActionWhileIdle { ts: i64 },
    /// Second pickup without an intervening return.
    DoublePickup { ts: i64, car: String },
    /// Replay ended with a car still held.
    NeverReturned { car: String },
    /// Pickup referenced a car absent from the pricing table.
    UnknownCar { ts: i64, car: String },
    /// Agent appeared with no recorded events.
    EmptyLedger,
}

impl std::fmt::Display for Inconsistency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ActionWhileIdle { ts } => {
                write!(f, "action at ts={ts} while no car is held")
            }
            Self::DoublePickup { ts, car } => {
                write!(f, "pickup of {car} at ts={ts} while another car is held")
            }
            Self::NeverReturned { car } => write!(f, "car {car} was never returned"),
            Self::UnknownCar { ts, car } => {
                write!(f, "pickup of unknown car {car} at ts={ts}")
            }
            Self::EmptyLedger => write!(f, "agent has no recorded events"),
        }
    }
}

impl std::error::Error for Inconsistency {}

/// Final per-agent outcome: an integer cost total, or inconsistent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Cost(i64),
    Inconsistent,
}

impl Verdict {
    pub fn is_consistent(&self) -> bool {
        matches!(self, Verdict::Cost(_))
    }

    pub fn cost(&self) -> Option<i64> {
        match self {
            Verdict::Cost(c) => Some(*c),
            Verdict::Inconsistent => None,
        }
    }
}

impl From<Result<i64, Inconsistency>> for Verdict {
    fn from(outcome: Result<i64, Inconsistency>) -> Self {
        match outcome {
            Ok(cost) => Verdict::Cost(cost),
            Err(_) => Verdict::Inconsistent,
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Cost(c) => write!(f, "{c}"),
            Verdict::Inconsistent => write!(f, "INCONSISTENT"),
        }
    }
}

/// One emitted line: agent name plus verdict.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AgentReport {
    pub agent: String,
    pub verdict: Verdict,
}

impl AgentReport {
    pub fn new(agent: impl Into<String>, verdict: Verdict) -> Self {
        Self {
            agent: agent.into(),
            verdict,
        }
    }
}

impl std::fmt::Display for AgentReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.agent, self.verdict)
    }
}
