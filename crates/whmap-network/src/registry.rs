//! Warehouse deduplication.
//!
//! Raw warehouse coordinates repeat once per customer row. The registry
//! collapses them into facilities numbered `0..N` in first-seen order, and
//! every coordinate comparison goes through [`CoordKey`] so registry
//! construction and assignment lookup share one rounding tolerance.

use std::collections::HashMap;

use serde::Serialize;
use whmap_core::CoordinatePair;

/// Decimal digits kept when comparing coordinates.
pub const ROUNDING_DIGITS: i32 = 6;

const SCALE: f64 = 1_000_000.0;

/// A coordinate rounded to [`ROUNDING_DIGITS`] decimal places, usable as a
/// hash key. Two pairs are the same facility iff their keys are equal.
///
/// Stores the bit pattern of each rounded, scaled axis, so distinct rounded
/// values always give distinct keys regardless of magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoordKey {
    lon_bits: u64,
    lat_bits: u64,
}

impl CoordKey {
    /// The only place coordinate rounding happens.
    #[must_use]
    pub fn of(pair: CoordinatePair) -> Self {
        Self {
            lon_bits: rounded_bits(pair.longitude),
            lat_bits: rounded_bits(pair.latitude),
        }
    }
}

fn rounded_bits(value: f64) -> u64 {
    // Adding +0.0 folds -0.0 into 0.0 so both sides of zero share a key.
    ((value * SCALE).round() + 0.0).to_bits()
}

/// A deduplicated warehouse location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Facility {
    /// Dense, immutable, assigned in first-seen order.
    pub index: usize,
    /// The first raw coordinate seen for this facility.
    pub coordinate: CoordinatePair,
}

/// Unique facilities plus a rounded-coordinate lookup, built for one dataset.
#[derive(Debug, Clone, Default)]
pub struct WarehouseRegistry {
    facilities: Vec<Facility>,
    lookup: HashMap<CoordKey, usize>,
}

impl WarehouseRegistry {
    /// Single ordered pass: the first occurrence of each rounded coordinate
    /// gets the next index, later occurrences are ignored.
    pub fn build<I>(raw_warehouses: I) -> Self
    where
        I: IntoIterator<Item = CoordinatePair>,
    {
        let mut registry = Self::default();
        for coordinate in raw_warehouses {
            let next = registry.facilities.len();
            if let std::collections::hash_map::Entry::Vacant(slot) =
                registry.lookup.entry(CoordKey::of(coordinate))
            {
                slot.insert(next);
                registry.facilities.push(Facility {
                    index: next,
                    coordinate,
                });
            }
        }
        registry
    }

    /// Uses `centers` verbatim as the facility list, index = position.
    ///
    /// Duplicate centers stay distinct facilities; lookups resolve to the
    /// first of them.
    #[must_use]
    pub fn from_centers(centers: &[CoordinatePair]) -> Self {
        let mut lookup = HashMap::with_capacity(centers.len());
        let facilities = centers
            .iter()
            .enumerate()
            .map(|(index, &coordinate)| {
                lookup.entry(CoordKey::of(coordinate)).or_insert(index);
                Facility { index, coordinate }
            })
            .collect();
        Self { facilities, lookup }
    }

    #[must_use]
    pub fn facilities(&self) -> &[Facility] {
        &self.facilities
    }

    #[must_use]
    pub fn lookup(&self) -> &HashMap<CoordKey, usize> {
        &self.lookup
    }

    #[must_use]
    pub fn index_of(&self, coordinate: CoordinatePair) -> Option<usize> {
        self.lookup.get(&CoordKey::of(coordinate)).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.facilities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.facilities.is_empty()
    }

    /// Facility coordinates in index order.
    #[must_use]
    pub fn coordinates(&self) -> Vec<CoordinatePair> {
        self.facilities.iter().map(|f| f.coordinate).collect()
    }
}
