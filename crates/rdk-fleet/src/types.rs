/// A single rental action recorded for an agent.
///
/// `ts` orders events within one agent's ledger only; two agents may share a
/// timestamp without meaning anything. Ties within one agent are broken by
/// input order (see [`AgentLedger::finalize`](crate::AgentLedger::finalize)).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    pub ts: i64,
    pub kind: EventKind,
}

impl Event {
    pub fn pickup(ts: i64, car: impl Into<String>) -> Self {
        Self {
            ts,
            kind: EventKind::Pickup { car: car.into() },
        }
    }

    pub fn accident(ts: i64, severity_pct: i64) -> Self {
        Self {
            ts,
            kind: EventKind::Accident { severity_pct },
        }
    }

    pub fn ret(ts: i64, distance_km: i64) -> Self {
        Self {
            ts,
            kind: EventKind::Return { distance_km },
        }
    }
}

/// Closed set of rental actions. The payload lives on the variant, so a
/// severity can never be read off a return and a distance never off an
/// accident.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EventKind {
    /// Agent picks up the named car.
    Pickup { car: String },
    /// Damage to the held car, as a percentage of catalog price.
    Accident { severity_pct: i64 },
    /// Held car comes back after `distance_km` driven.
    Return { distance_km: i64 },
}
