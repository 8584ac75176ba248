//! CSV import/export for the KPI and value catalogs.
//!
//! The catalogs travel as flat CSV with a header row. Import is an
//! idempotent upsert keyed on id; export emits the catalog sorted by id.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{CompanyKpi, CompanyValue};

/// CSV row shape for a KPI. Optional columns serialize as empty fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct KpiRecord {
    id: String,
    name: String,
    description: String,
    unit: Option<String>,
    target: Option<Decimal>,
}

/// CSV row shape for a company value.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ValueRecord {
    id: String,
    name: String,
    description: String,
}

impl From<&CompanyKpi> for KpiRecord {
    fn from(kpi: &CompanyKpi) -> Self {
        Self {
            id: kpi.id.clone(),
            name: kpi.name.clone(),
            description: kpi.description.clone(),
            unit: kpi.unit.clone(),
            target: kpi.target,
        }
    }
}

impl From<KpiRecord> for CompanyKpi {
    fn from(record: KpiRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            description: record.description,
            unit: record.unit.filter(|u| !u.is_empty()),
            target: record.target,
        }
    }
}

/// Serializes the KPI catalog to CSV.
pub fn kpis_to_csv(kpis: &[CompanyKpi]) -> EngineResult<String> {
    write_csv(kpis.iter().map(KpiRecord::from))
}

/// Parses a CSV payload into KPI records, validating ids.
pub fn kpis_from_csv(data: &str) -> EngineResult<Vec<CompanyKpi>> {
    let records: Vec<KpiRecord> = read_csv(data)?;
    records
        .into_iter()
        .map(|r| {
            require_id(&r.id)?;
            Ok(CompanyKpi::from(r))
        })
        .collect()
}

/// Serializes the company value catalog to CSV.
pub fn values_to_csv(values: &[CompanyValue]) -> EngineResult<String> {
    write_csv(values.iter().map(|v| ValueRecord {
        id: v.id.clone(),
        name: v.name.clone(),
        description: v.description.clone(),
    }))
}

/// Parses a CSV payload into company value records, validating ids.
pub fn values_from_csv(data: &str) -> EngineResult<Vec<CompanyValue>> {
    let records: Vec<ValueRecord> = read_csv(data)?;
    records
        .into_iter()
        .map(|r| {
            require_id(&r.id)?;
            Ok(CompanyValue {
                id: r.id,
                name: r.name,
                description: r.description,
            })
        })
        .collect()
}

fn write_csv<T: Serialize>(records: impl Iterator<Item = T>) -> EngineResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer.serialize(record).map_err(csv_error)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| EngineError::CsvError {
            line: 0,
            message: e.to_string(),
        })?;
    String::from_utf8(bytes).map_err(|e| EngineError::CsvError {
        line: 0,
        message: e.to_string(),
    })
}

fn read_csv<T: serde::de::DeserializeOwned>(data: &str) -> EngineResult<Vec<T>> {
    let mut reader = csv::Reader::from_reader(data.as_bytes());
    reader
        .deserialize()
        .collect::<Result<Vec<T>, csv::Error>>()
        .map_err(csv_error)
}

fn csv_error(error: csv::Error) -> EngineError {
    let line = error.position().map(|p| p.line()).unwrap_or(0);
    EngineError::CsvError {
        line,
        message: error.to_string(),
    }
}

fn require_id(id: &str) -> EngineResult<()> {
    if id.trim().is_empty() {
        return Err(EngineError::ValidationError {
            field: "id".to_string(),
            message: "CSV record has an empty id".to_string(),
        });
    }
    Ok(())
}
