use std::collections::BTreeMap;

use crate::{valid_name, MAX_CATALOG_PRICE, MAX_PICKUP_PRICE, MAX_PRICE_PER_KM};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Invariant violations a car declaration can carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// Car name must be 1..=40 word characters.
    BadCarName { name: String },
    /// `catalog_price` must be in 1..=100_000.
    CatalogPriceOutOfRange { value: i64 },
    /// `pickup_price` must be in 1..=1_000.
    PickupPriceOutOfRange { value: i64 },
    /// `price_per_km` must be in 1..=100.
    PricePerKmOutOfRange { value: i64 },
}

impl std::fmt::Display for PricingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadCarName { name } => {
                write!(f, "bad car name: {:?}", name)
            }
            Self::CatalogPriceOutOfRange { value } => {
                write!(
                    f,
                    "catalog price must be in 1..={MAX_CATALOG_PRICE}, got {value}"
                )
            }
            Self::PickupPriceOutOfRange { value } => {
                write!(
                    f,
                    "pickup price must be in 1..={MAX_PICKUP_PRICE}, got {value}"
                )
            }
            Self::PricePerKmOutOfRange { value } => {
                write!(
                    f,
                    "price per km must be in 1..={MAX_PRICE_PER_KM}, got {value}"
                )
            }
        }
    }
}

impl std::error::Error for PricingError {}

/// Lookup miss: an event referenced a car the current table never declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCar {
    pub name: String,
}

impl std::fmt::Display for UnknownCar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown car: {}", self.name)
    }
}

impl std::error::Error for UnknownCar {}

// ---------------------------------------------------------------------------
// CarPricing
// ---------------------------------------------------------------------------

/// Per-car cost parameters, immutable once the table is built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CarPricing {
    pub name: String,
    /// Replacement value; accident cost is a percentage of this.
    pub catalog_price: i64,
    /// Flat fee charged at pickup.
    pub pickup_price: i64,
    /// Rate applied to distance driven, charged at return.
    pub price_per_km: i64,
}

impl CarPricing {
    pub fn new(
        name: impl Into<String>,
        catalog_price: i64,
        pickup_price: i64,
        price_per_km: i64,
    ) -> Self {
        Self {
            name: name.into(),
            catalog_price,
            pickup_price,
            price_per_km,
        }
    }

    /// Cost of an accident at `severity_pct` percent damage.
    ///
    /// `catalog_price * severity_pct / 100`, rounded **up** whenever the
    /// exact value is fractional. Integer-only: for non-negative inputs
    /// `(a + 99) / 100` is exactly ceil(a / 100).
    pub fn accident_cost(&self, severity_pct: i64) -> i64 {
        (self.catalog_price * severity_pct + 99) / 100
    }

    /// Cost of returning the car after `distance_km` driven.
    pub fn mileage_cost(&self, distance_km: i64) -> i64 {
        self.price_per_km * distance_km
    }

    fn validate(&self) -> Result<(), PricingError> {
        if !valid_name(&self.name) {
            return Err(PricingError::BadCarName {
                name: self.name.clone(),
            });
        }
        if self.catalog_price < 1 || self.catalog_price > MAX_CATALOG_PRICE {
            return Err(PricingError::CatalogPriceOutOfRange {
                value: self.catalog_price,
            });
        }
        if self.pickup_price < 1 || self.pickup_price > MAX_PICKUP_PRICE {
            return Err(PricingError::PickupPriceOutOfRange {
                value: self.pickup_price,
            });
        }
        if self.price_per_km < 1 || self.price_per_km > MAX_PRICE_PER_KM {
            return Err(PricingError::PricePerKmOutOfRange {
                value: self.price_per_km,
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// PricingTable
// ---------------------------------------------------------------------------

/// One test case's car pricing, keyed by car name.
///
/// Built once while the test case is read, then read-only. A redeclared name
/// overwrites the earlier entry (last declaration wins).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PricingTable {
    cars: BTreeMap<String, CarPricing>,
}

impl PricingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a car declaration, enforcing field bounds.
    ///
    /// The table is **not** mutated on error.
    pub fn insert(&mut self, car: CarPricing) -> Result<(), PricingError> {
        car.validate()?;
        self.cars.insert(car.name.clone(), car);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Result<&CarPricing, UnknownCar> {
        self.cars.get(name).ok_or_else(|| UnknownCar {
            name: name.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.cars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cars.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn suv() -> CarPricing {
        CarPricing::new("suv", 1000, 50, 2)
    }

    #[test]
    fn insert_then_lookup() {
        let mut t = PricingTable::new();
        t.insert(suv()).unwrap();
        assert_eq!(t.lookup("suv").unwrap().pickup_price, 50);
    }

    #[test]
    fn lookup_miss_is_unknown_car() {
        let t = PricingTable::new();
        let err = t.lookup("bike").unwrap_err();
        assert_eq!(err.name, "bike");
    }

    #[test]
    fn redeclaration_overwrites() {
        let mut t = PricingTable::new();
        t.insert(suv()).unwrap();
        t.insert(CarPricing::new("suv", 2000, 60, 3)).unwrap();
        assert_eq!(t.lookup("suv").unwrap().catalog_price, 2000);
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn rejects_out_of_range_fields() {
        let mut t = PricingTable::new();
        assert_eq!(
            t.insert(CarPricing::new("suv", 0, 50, 2)),
            Err(PricingError::CatalogPriceOutOfRange { value: 0 })
        );
        assert_eq!(
            t.insert(CarPricing::new("suv", 1000, 1001, 2)),
            Err(PricingError::PickupPriceOutOfRange { value: 1001 })
        );
        assert_eq!(
            t.insert(CarPricing::new("suv", 1000, 50, 0)),
            Err(PricingError::PricePerKmOutOfRange { value: 0 })
        );
        assert!(t.is_empty()); // table not mutated on error
    }

    #[test]
    fn rejects_bad_name() {
        let mut t = PricingTable::new();
        let err = t.insert(CarPricing::new("two words", 1000, 50, 2));
        assert_eq!(
            err,
            Err(PricingError::BadCarName {
                name: "two words".to_string()
            })
        );
    }

    // --- Accident cost rounding ---

    #[test]
    fn accident_cost_exact_percentage_is_unrounded() {
        assert_eq!(suv().accident_cost(10), 100);
    }

    #[test]
    fn accident_cost_fractional_rounds_up() {
        // 1001 * 33 / 100 = 330.33 -> 331
        let c = CarPricing::new("sedan", 1001, 50, 2);
        assert_eq!(c.accident_cost(33), 331);
    }

    #[test]
    fn accident_cost_boundaries() {
        assert_eq!(suv().accident_cost(0), 0);
        assert_eq!(suv().accident_cost(100), 1000);
        // 999 * 1 / 100 = 9.99 -> 10
        let c = CarPricing::new("mini", 999, 50, 2);
        assert_eq!(c.accident_cost(1), 10);
    }

    #[test]
    fn mileage_cost_is_linear() {
        assert_eq!(suv().mileage_cost(0), 0);
        assert_eq!(suv().mileage_cost(100), 200);
    }
}
