use rdk_fleet::{CarPricing, Event, EventKind, PricingTable};

use crate::Inconsistency;

/// Replay state for one agent. Holding borrows the pricing row looked up at
/// pickup, so accident and return costing never re-query the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RentalState<'a> {
    Idle,
    Holding(&'a CarPricing),
}

/// Replay one agent's finalized event sequence against the pricing table.
///
/// Transition table:
///
/// | State      | Event       | Action                          | Next       |
/// |------------|-------------|---------------------------------|------------|
/// | Idle       | Pickup(c)   | cost += pickup_price(c)         | Holding(c) |
/// | Idle       | Accident    | violation: `ActionWhileIdle`    | —          |
/// | Idle       | Return      | violation: `ActionWhileIdle`    | —          |
/// | Holding(c) | Pickup(_)   | violation: `DoublePickup`       | —          |
/// | Holding(c) | Accident(d) | cost += ceil(catalog(c)·d/100)  | Holding(c) |
/// | Holding(c) | Return(km)  | cost += per_km(c)·km            | Idle       |
///
/// A pickup of a car the table never declared is `UnknownCar`. Ending the
/// sequence in `Holding` is `NeverReturned`. The first violation ends the
/// replay: later events are not evaluated and no partial cost is returned.
///
/// `events` must already be in replay order (see `AgentLedger::finalize`).
pub fn replay(events: &[Event], pricing: &PricingTable) -> Result<i64, Inconsistency> {
    if events.is_empty() {
        return Err(Inconsistency::EmptyLedger);
    }

    let mut state = RentalState::Idle;
    let mut total: i64 = 0;

    for event in events {
        match (state, &event.kind) {
            (RentalState::Idle, EventKind::Pickup { car }) => {
                let priced = pricing.lookup(car).map_err(|_| Inconsistency::UnknownCar {
                    ts: event.ts,
                    car: car.clone(),
                })?;
                total += priced.pickup_price;
                state = RentalState::Holding(priced);
            }
            (RentalState::Idle, _) => {
                return Err(Inconsistency::ActionWhileIdle { ts: event.ts });
            }
            (RentalState::Holding(_), EventKind::Pickup { car }) => {
                return Err(Inconsistency::DoublePickup {
                    ts: event.ts,
                    car: car.clone(),
                });
            }
            (RentalState::Holding(held), EventKind::Accident { severity_pct }) => {
                total += held.accident_cost(*severity_pct);
            }
            (RentalState::Holding(held), EventKind::Return { distance_km }) => {
                total += held.mileage_cost(*distance_km);
                state = RentalState::Idle;
            }
        }
    }

    if let RentalState::Holding(held) = state {
        return Err(Inconsistency::NeverReturned {
            car: held.name.clone(),
        });
    }

    Ok(total)
}
