//! rdk-fleet
//!
//! Fleet & ledger model for RentalDesk:
//! - Per-car pricing table (catalog value, pickup fee, per-km rate)
//! - Typed rental events (pickup / accident / return)
//! - Append-only per-agent ledgers with deterministic timestamp ordering
//!
//! Pure deterministic logic. No IO. No clock.

mod pricing;
mod types;

pub mod ledger;

pub use ledger::{AgentLedger, EventBook, LedgerError};
pub use pricing::{CarPricing, PricingError, PricingTable, UnknownCar};
pub use types::{Event, EventKind};

/// Bounds carried over from the upstream record format.
pub const MAX_CATALOG_PRICE: i64 = 100_000;
pub const MAX_PICKUP_PRICE: i64 = 1_000;
pub const MAX_PRICE_PER_KM: i64 = 100;
pub const MAX_EVENT_TS: i64 = 100_000;
pub const MAX_DISTANCE_KM: i64 = 1_000;
pub const MAX_SEVERITY_PCT: i64 = 100;
pub const MAX_NAME_LEN: usize = 40;

/// Identifier rule shared by car names and agent names:
/// 1..=40 ASCII alphanumerics or underscore, no whitespace.
pub fn valid_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= MAX_NAME_LEN
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_rule_accepts_word_characters() {
        assert!(valid_name("suv"));
        assert!(valid_name("SUV"));
        assert!(valid_name("agent_007"));
    }

    #[test]
    fn name_rule_rejects_empty_overlong_and_spaced() {
        assert!(!valid_name(""));
        assert!(!valid_name(&"a".repeat(41)));
        assert!(!valid_name("two words"));
        assert!(!valid_name("dash-ed"));
    }
}
