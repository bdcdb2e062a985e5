use thiserror::Error;

#[derive(Debug, Error)]
pub enum NetworkError {
    /// The uploaded table cannot be turned into customer/warehouse rows.
    #[error("malformed input: {reason}")]
    MalformedInput { reason: String },

    #[error("invalid color \"{value}\": expected 6 hex digits with optional leading '#'")]
    InvalidColorFormat { value: String },

    /// A customer's warehouse coordinate has no facility in the registry.
    /// Only reachable when the registry was built from different rows.
    #[error("no facility registered at ({longitude}, {latitude})")]
    UnknownFacilityCoordinate { longitude: f64, latitude: f64 },

    /// Customer and warehouse columns handed to assignment differ in length.
    #[error("{customers} customer coordinates but {warehouses} warehouse coordinates")]
    ColumnLengthMismatch { customers: usize, warehouses: usize },

    #[error("facility index {index} out of range for {facility_count} facilities")]
    FacilityIndexOutOfRange { index: usize, facility_count: usize },

    #[error("CSV read error: {0}")]
    Csv(#[from] csv::Error),
}

impl NetworkError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            reason: reason.into(),
        }
    }

    /// Whether the error was caused by the caller's data rather than a
    /// broken internal contract.
    ///
    /// Pre-resolved tables come from outside the process, so a bad
    /// warehouse index there is reported back rather than treated as a bug.
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        !matches!(
            self,
            Self::UnknownFacilityCoordinate { .. } | Self::ColumnLengthMismatch { .. }
        )
    }
}
