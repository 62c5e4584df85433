use rdk_fleet::{AgentLedger, CarPricing, Event, PricingTable};
use rdk_reconcile::replay;

/// Events arrive in arbitrary order; the ledger finalize step restores
/// timestamp order before replay, so the scrambled input still reconciles.
#[test]
fn scenario_unsorted_input_replays_in_timestamp_order() {
    let mut pricing = PricingTable::new();
    pricing.insert(CarPricing::new("suv", 1000, 50, 2)).unwrap();

    let mut ledger = AgentLedger::new("x").unwrap();
    ledger.append(Event::ret(10, 100)).unwrap();
    ledger.append(Event::accident(5, 10)).unwrap();
    ledger.append(Event::pickup(1, "suv")).unwrap();

    // Replayed as pickup(1), accident(5), return(10): 50 + 100 + 200.
    assert_eq!(replay(&ledger.finalize(), &pricing), Ok(350));
}
