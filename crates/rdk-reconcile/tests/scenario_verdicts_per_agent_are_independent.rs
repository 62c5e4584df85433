use rdk_fleet::{CarPricing, Event, EventBook, PricingTable};
use rdk_reconcile::{replay, Verdict};

/// One agent going inconsistent must not disturb another agent's verdict
/// computed against the same pricing table.
#[test]
fn scenario_verdicts_per_agent_are_independent() {
    let mut pricing = PricingTable::new();
    pricing.insert(CarPricing::new("suv", 1000, 50, 2)).unwrap();

    let mut book = EventBook::new();
    // anna: clean rental.
    book.append("anna", Event::pickup(1, "suv")).unwrap();
    book.append("anna", Event::ret(9, 100)).unwrap();
    // yuri: double pickup.
    book.append("yuri", Event::pickup(1, "suv")).unwrap();
    book.append("yuri", Event::pickup(2, "suv")).unwrap();

    let mut verdicts = Vec::new();
    for (agent, ledger) in book.into_ledgers() {
        let events = ledger.finalize();
        verdicts.push((agent, Verdict::from(replay(&events, &pricing))));
    }

    assert_eq!(
        verdicts,
        vec![
            ("anna".to_string(), Verdict::Cost(250)),
            ("yuri".to_string(), Verdict::Inconsistent),
        ]
    );
}
