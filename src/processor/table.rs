//! Table processor using Polars DataFrames
use crate::error::{Error, Result};
use crate::processor::{Processor, ensure_ok, provider_message};
use crate::request::common::Period;
use crate::response::Response;
use polars_core::frame::DataFrame;
use polars_io::prelude::*;
use std::io::Cursor;

/// Converts a statement response into a DataFrame of the reports for one period.
///
/// One row per fiscal period, one column per line item, in API order.
#[derive(Debug, Clone, Copy)]
pub struct Table {
    period: Period,
}

impl Table {
    /// Tabulate the `annualReports` or `quarterlyReports` array
    pub fn new(period: Period) -> Self {
        Self { period }
    }

    /// Period whose reports are tabulated
    pub fn period(&self) -> Period {
        self.period
    }
}

impl Processor for Table {
    type Output = DataFrame;

    fn process<R: Response>(&self, response: Result<R>) -> Result<DataFrame> {
        let resp = ensure_ok(response?)?;
        let json_value: serde_json::Value = serde_json::from_str(resp.body())?;

        if let Some(message) = provider_message(&json_value) {
            return Err(Error::Provider(message));
        }

        let key = self.period.report_key();
        let reports = json_value
            .get(key)
            .ok_or_else(|| Error::Custom(format!("No '{key}' data found in response")))?;

        let rows = reports
            .as_array()
            .ok_or_else(|| Error::Custom(format!("Expected '{key}' to be an array")))?;

        // JsonReader cannot infer a schema from zero rows
        if rows.is_empty() {
            return Ok(DataFrame::empty());
        }

        let json_bytes = serde_json::to_vec(reports)?;
        let preview = String::from_utf8_lossy(&json_bytes[..json_bytes.len().min(200)]).to_string();
        let df = JsonReader::new(Cursor::new(json_bytes))
            .finish()
            .map_err(|e| Error::Custom(format!("Failed to parse '{key}' as DataFrame: {e}. Data preview: {preview}")))?;

        // Schema inference does not keep field order for wide objects
        let mut columns: Vec<&str> = Vec::new();
        for field in rows.iter().filter_map(|row| row.as_object()).flat_map(|obj| obj.keys()) {
            if !columns.contains(&field.as_str()) {
                columns.push(field);
            }
        }
        Ok(df.select(columns)?)
    }
}
