//! CSV ingestion into typed rows.
//!
//! Rows with missing, non-numeric, or out-of-range coordinates are dropped
//! here and counted, so the rest of the pipeline only ever sees valid WGS84
//! positions.

use std::io::Read;

use serde::{Deserialize, Serialize};
use whmap_core::{CoordinatePair, WarehouseFallback};

use crate::error::NetworkError;

/// One customer and the warehouse that serves it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateRow {
    pub customer: CoordinatePair,
    pub warehouse: CoordinatePair,
}

/// A customer row whose warehouse index was decided upstream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedStore {
    #[serde(alias = "Longitude")]
    pub longitude: f64,
    #[serde(alias = "Latitude")]
    pub latitude: f64,
    #[serde(alias = "Warehouse")]
    pub warehouse: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IngestReport<T> {
    pub rows: Vec<T>,
    /// Rows dropped for missing or unusable values, header rows included.
    pub skipped: usize,
}

fn csv_reader<R: Read>(reader: R, has_headers: bool) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(has_headers)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
}

fn parse_cell(record: &csv::StringRecord, index: usize) -> Option<f64> {
    record
        .get(index)
        .and_then(|cell| cell.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Latitude and longitude cells read into a pair, kept only when in range.
fn lat_lon_pair(
    record: &csv::StringRecord,
    lat_col: usize,
    lon_col: usize,
) -> Option<CoordinatePair> {
    parse_cell(record, lat_col)
        .zip(parse_cell(record, lon_col))
        .map(|(lat, lon)| CoordinatePair::new(lon, lat))
        .filter(CoordinatePair::is_valid)
}

/// Reads `customerLat, customerLon, warehouseLat, warehouseLon` rows.
///
/// Only the first four columns are used and a header row is optional.
/// With [`WarehouseFallback::Centroid`], rows lacking warehouse coordinates
/// are attached to the mean customer position instead of being dropped.
///
/// # Errors
///
/// Returns [`NetworkError::MalformedInput`] for empty input, too few columns,
/// or when no row survives, and [`NetworkError::Csv`] if the CSV itself
/// cannot be read.
pub fn read_coordinate_rows<R: Read>(
    reader: R,
    fallback: WarehouseFallback,
) -> Result<IngestReport<CoordinateRow>, NetworkError> {
    let mut table = csv_reader(reader, false);

    let mut parsed: Vec<(CoordinatePair, Option<CoordinatePair>)> = Vec::new();
    let mut skipped = 0usize;
    let mut record_count = 0usize;
    let mut widest = 0usize;

    for result in table.records() {
        let record = result?;
        record_count += 1;
        widest = widest.max(record.len());

        let Some(customer) = lat_lon_pair(&record, 0, 1) else {
            skipped += 1;
            continue;
        };
        parsed.push((customer, lat_lon_pair(&record, 2, 3)));
    }

    if record_count == 0 {
        return Err(NetworkError::malformed("input is empty"));
    }

    let required_columns = match fallback {
        WarehouseFallback::Drop => 4,
        WarehouseFallback::Centroid => 2,
    };
    if widest < required_columns {
        return Err(NetworkError::malformed(format!(
            "expected at least {required_columns} columns, found {widest}"
        )));
    }

    let rows: Vec<CoordinateRow> = match fallback {
        WarehouseFallback::Drop => parsed
            .into_iter()
            .filter_map(|(customer, warehouse)| match warehouse {
                Some(warehouse) => Some(CoordinateRow {
                    customer,
                    warehouse,
                }),
                None => {
                    skipped += 1;
                    None
                }
            })
            .collect(),
        WarehouseFallback::Centroid => {
            let center = centroid(parsed.iter().map(|(customer, _)| *customer));
            parsed
                .into_iter()
                .filter_map(|(customer, warehouse)| {
                    let warehouse = warehouse.or(center)?;
                    Some(CoordinateRow {
                        customer,
                        warehouse,
                    })
                })
                .collect()
        }
    };

    if rows.is_empty() {
        return Err(NetworkError::malformed("no parsable rows"));
    }

    if skipped > 0 {
        tracing::warn!(skipped, kept = rows.len(), "skipped rows without usable coordinates");
    }

    Ok(IngestReport { rows, skipped })
}

/// Mean position, or `None` for an empty sequence.
#[allow(clippy::cast_precision_loss)]
fn centroid<I>(points: I) -> Option<CoordinatePair>
where
    I: IntoIterator<Item = CoordinatePair>,
{
    let (count, lon_sum, lat_sum) = points
        .into_iter()
        .fold((0usize, 0.0, 0.0), |(n, lon, lat), p| {
            (n + 1, lon + p.longitude, lat + p.latitude)
        });
    (count > 0).then(|| CoordinatePair::new(lon_sum / count as f64, lat_sum / count as f64))
}

/// Reads a `Longitude, Latitude, Warehouse` table with a header row.
/// Header names are matched case-insensitively and may appear in any order.
///
/// # Errors
///
/// Returns [`NetworkError::MalformedInput`] if a required column is missing
/// or no row parses.
pub fn read_resolved_stores<R: Read>(
    reader: R,
) -> Result<IngestReport<ResolvedStore>, NetworkError> {
    let mut table = csv_reader(reader, true);
    let headers = table.headers()?.clone();

    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| NetworkError::malformed(format!("missing required column '{name}'")))
    };
    let lon_col = column("longitude")?;
    let lat_col = column("latitude")?;
    let warehouse_col = column("warehouse")?;

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for result in table.records() {
        let record = result?;
        let warehouse = record
            .get(warehouse_col)
            .and_then(|cell| cell.parse::<usize>().ok());
        let position = lat_lon_pair(&record, lat_col, lon_col);
        match position.zip(warehouse) {
            Some((position, warehouse)) => rows.push(ResolvedStore {
                longitude: position.longitude,
                latitude: position.latitude,
                warehouse,
            }),
            None => skipped += 1,
        }
    }

    if rows.is_empty() {
        return Err(NetworkError::malformed("no parsable rows"));
    }
    if skipped > 0 {
        tracing::warn!(skipped, kept = rows.len(), "skipped unparsable store rows");
    }

    Ok(IngestReport { rows, skipped })
}

/// Reads headerless `lon, lat` warehouse centers. Unparsable lines (such as
/// a header) are skipped.
///
/// # Errors
///
/// Returns [`NetworkError::MalformedInput`] when no center parses or a center
/// lies outside WGS84 bounds. Such a center is not skipped, since that would
/// shift the index of every center after it.
pub fn read_centers<R: Read>(reader: R) -> Result<Vec<CoordinatePair>, NetworkError> {
    let mut table = csv_reader(reader, false);
    let mut centers = Vec::new();
    for result in table.records() {
        let record = result?;
        if let Some((lon, lat)) = parse_cell(&record, 0).zip(parse_cell(&record, 1)) {
            let center = CoordinatePair::new(lon, lat);
            if !center.is_valid() {
                return Err(NetworkError::malformed(format!(
                    "warehouse center {} ({lon}, {lat}) is outside WGS84 bounds",
                    centers.len()
                )));
            }
            centers.push(center);
        }
    }
    if centers.is_empty() {
        return Err(NetworkError::malformed("no warehouse centers found"));
    }
    Ok(centers)
}

#[cfg(test)]
#[path = "ingest_test.rs"]
mod tests;
