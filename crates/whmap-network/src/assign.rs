//! Customer → facility assignment.

use serde::Serialize;
use whmap_core::CoordinatePair;

use crate::error::NetworkError;
use crate::registry::WarehouseRegistry;

/// A customer location attached to a facility of the registry it was
/// resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CustomerRecord {
    pub coordinate: CoordinatePair,
    pub facility_index: usize,
}

/// Resolves each customer's paired warehouse coordinate to a facility index.
///
/// `customers` and `warehouses` are parallel sequences of equal length.
///
/// # Errors
///
/// Returns [`NetworkError::ColumnLengthMismatch`] when the two sequences
/// differ in length, and [`NetworkError::UnknownFacilityCoordinate`] when a
/// warehouse coordinate is not in `registry`. Both only happen if the caller
/// built its inputs from different sets of rows.
pub fn resolve(
    customers: &[CoordinatePair],
    warehouses: &[CoordinatePair],
    registry: &WarehouseRegistry,
) -> Result<Vec<CustomerRecord>, NetworkError> {
    if customers.len() != warehouses.len() {
        return Err(NetworkError::ColumnLengthMismatch {
            customers: customers.len(),
            warehouses: warehouses.len(),
        });
    }

    customers
        .iter()
        .zip(warehouses)
        .map(|(&coordinate, &warehouse)| {
            let facility_index = registry.index_of(warehouse).ok_or_else(|| {
                NetworkError::UnknownFacilityCoordinate {
                    longitude: warehouse.longitude,
                    latitude: warehouse.latitude,
                }
            })?;
            Ok(CustomerRecord {
                coordinate,
                facility_index,
            })
        })
        .collect()
}

/// Accepts customer rows whose facility index was decided upstream,
/// checking each index against the registry size.
///
/// # Errors
///
/// Returns [`NetworkError::FacilityIndexOutOfRange`] for the first row whose
/// index has no facility.
pub fn validate_indices<I>(
    rows: I,
    registry: &WarehouseRegistry,
) -> Result<Vec<CustomerRecord>, NetworkError>
where
    I: IntoIterator<Item = CustomerRecord>,
{
    let facility_count = registry.len();
    rows.into_iter()
        .map(|record| {
            if record.facility_index < facility_count {
                Ok(record)
            } else {
                Err(NetworkError::FacilityIndexOutOfRange {
                    index: record.facility_index,
                    facility_count,
                })
            }
        })
        .collect()
}
