//! Batch coordination: one [`TestCase`] is one fully isolated reconciliation
//! problem. The coordinator owns nothing across cases — a case is built,
//! audited, and dropped before the next one is touched.

use rdk_fleet::{EventBook, PricingTable};
use rdk_reconcile::{replay, AgentReport, Verdict};

/// One pricing table plus the event book recorded against it.
#[derive(Clone, Debug, Default)]
pub struct TestCase {
    pub pricing: PricingTable,
    pub book: EventBook,
}

impl TestCase {
    pub fn new(pricing: PricingTable, book: EventBook) -> Self {
        Self { pricing, book }
    }

    /// Finalize every ledger and replay it against this case's pricing.
    ///
    /// Consumes the case: ledgers are immutable input to exactly one replay.
    /// Reports come back in lexicographic agent order (the book's key order).
    pub fn audit(self) -> Vec<AgentReport> {
        let TestCase { pricing, book } = self;
        book.into_ledgers()
            .into_iter()
            .map(|(agent, ledger)| {
                let events = ledger.finalize();
                let verdict = Verdict::from(replay(&events, &pricing));
                AgentReport::new(agent, verdict)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdk_fleet::{CarPricing, Event};

    fn case_with(catalog: i64, pickup: i64, per_km: i64) -> TestCase {
        let mut pricing = PricingTable::new();
        pricing
            .insert(CarPricing::new("suv", catalog, pickup, per_km))
            .unwrap();
        TestCase::new(pricing, EventBook::new())
    }

    #[test]
    fn audit_emits_in_lexicographic_agent_order() {
        let mut case = case_with(1000, 50, 2);
        case.book.append("zoe", Event::pickup(1, "suv")).unwrap();
        case.book.append("zoe", Event::ret(2, 0)).unwrap();
        case.book.append("abe", Event::pickup(1, "suv")).unwrap();
        case.book.append("abe", Event::ret(2, 0)).unwrap();

        let agents: Vec<String> = case.audit().into_iter().map(|r| r.agent).collect();
        assert_eq!(agents, vec!["abe".to_string(), "zoe".to_string()]);
    }

    #[test]
    fn identical_agent_names_are_isolated_across_cases() {
        let mut first = case_with(1000, 50, 2);
        first.book.append("x", Event::pickup(1, "suv")).unwrap();
        first.book.append("x", Event::ret(2, 10)).unwrap();

        let mut second = case_with(1000, 7, 1);
        second.book.append("x", Event::pickup(1, "suv")).unwrap();
        second.book.append("x", Event::ret(2, 10)).unwrap();

        assert_eq!(first.audit()[0].verdict, Verdict::Cost(70));
        assert_eq!(second.audit()[0].verdict, Verdict::Cost(17));
    }

    #[test]
    fn inconsistent_agent_renders_marker() {
        let mut case = case_with(1000, 50, 2);
        case.book.append("x", Event::accident(1, 10)).unwrap();

        let reports = case.audit();
        assert_eq!(reports[0].to_string(), "x INCONSISTENT");
    }
}
