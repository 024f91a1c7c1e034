//! Writers for valuation output

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::LoadResult;
use crate::projection::{AnnualCashFlowRecord, DcfResult};

/// Write annual records as CSV, one row per projection year
pub fn write_cash_flows_csv<W: Write>(records: &[AnnualCashFlowRecord], writer: W) -> LoadResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write annual records to a CSV file at `path`
pub fn write_cash_flows_csv_path<P: AsRef<Path>>(records: &[AnnualCashFlowRecord], path: P) -> LoadResult<()> {
    let file = File::create(path.as_ref())?;
    write_cash_flows_csv(records, file)?;
    log::info!("Wrote {} annual records to {}", records.len(), path.as_ref().display());
    Ok(())
}

/// Write the full result as pretty-printed JSON
pub fn write_result_json<W: Write>(result: &DcfResult, writer: W) -> LoadResult<()> {
    serde_json::to_writer_pretty(writer, result)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{AnnualRecordBuilder, TerminalValue};

    fn result() -> DcfResult {
        let records: Vec<_> = (1..=3)
            .map(|year| {
                AnnualRecordBuilder {
                    scheduled_rent: 10_000.0 * year as f64,
                    ..AnnualRecordBuilder::new(year)
                }
                .finish(1.0)
            })
            .collect();
        DcfResult {
            total_present_value: records.iter().map(|r| r.present_value).sum(),
            cash_flows: records,
            going_in_cap_rate_percent: 0.0,
            irr_percent: f64::NAN,
            terminal: TerminalValue::default(),
            warnings: vec![],
        }
    }

    #[test]
    fn test_csv_has_header_and_one_row_per_year() {
        let mut buf = Vec::new();
        write_cash_flows_csv(&result().cash_flows, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("year,scheduled_rent,market_rent"));
        assert!(lines[2].starts_with("2,20000.0,"));
    }

    #[test]
    fn test_json_writes_nan_irr_as_null() {
        let mut buf = Vec::new();
        write_result_json(&result(), &mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert!(value["irr_percent"].is_null());
        assert_eq!(value["cash_flows"].as_array().unwrap().len(), 3);
    }
}
