//! Load a rent roll from CSV

use super::{Escalation, Lease, Reimbursement, RenewalTerms, RentStep};
use crate::error::{DcfError, LoadResult};
use chrono::NaiveDate;
use csv::Reader;
use std::path::Path;

/// Raw CSV row matching the rent roll columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    tenant: String,
    area: f64,
    rent_per_area: f64,
    start_date: NaiveDate,
    end_date: NaiveDate,
    /// fixed | step | cpi
    escalation: String,
    #[serde(default)]
    escalation_rate: Option<f64>,
    #[serde(default)]
    cpi_review_years: Option<u32>,
    /// "3:16.50;6:18.00"
    #[serde(default)]
    step_schedule: Option<String>,
    /// nnn | mg | gross
    reimbursement: String,
    #[serde(default)]
    expense_stop: Option<f64>,
    #[serde(default)]
    admin_fee: Option<f64>,
    #[serde(default)]
    renewal_probability: Option<f64>,
    #[serde(default)]
    renewal_term: Option<u32>,
    #[serde(default)]
    renewal_bump: Option<f64>,
    #[serde(default)]
    renewal_downtime: Option<f64>,
    #[serde(default)]
    renewal_ti: Option<f64>,
    #[serde(default)]
    renewal_lc: Option<f64>,
    #[serde(default)]
    renewal_market_rent: Option<f64>,
}

impl CsvRow {
    fn into_lease(self, row: usize) -> LoadResult<Lease> {
        let invalid = |reason: String| DcfError::InvalidRecord { row, reason };

        let escalation = match self.escalation.trim().to_ascii_lowercase().as_str() {
            "fixed" => Escalation::FixedPercent {
                rate_percent: self.escalation_rate.unwrap_or(0.0),
            },
            "step" => Escalation::StepUp {
                schedule: parse_step_schedule(self.step_schedule.as_deref().unwrap_or(""))
                    .map_err(invalid)?,
            },
            "cpi" => Escalation::Cpi {
                rate_percent: self.escalation_rate,
                review_frequency_years: self.cpi_review_years.unwrap_or(1),
            },
            other => return Err(invalid(format!("Unknown escalation: {}", other))),
        };

        let admin_fee_percent = self.admin_fee.unwrap_or(0.0);
        let reimbursement = match self.reimbursement.trim().to_ascii_lowercase().as_str() {
            "nnn" => Reimbursement::Nnn { admin_fee_percent },
            "mg" | "modified_gross" => Reimbursement::ModifiedGross {
                expense_stop_per_area: self.expense_stop,
                admin_fee_percent,
            },
            "gross" => Reimbursement::Gross,
            other => return Err(invalid(format!("Unknown reimbursement: {}", other))),
        };

        let renewal = RenewalTerms {
            probability_percent: self.renewal_probability.unwrap_or(0.0),
            term_years: self.renewal_term.unwrap_or(0),
            rent_bump_percent: self.renewal_bump.unwrap_or(0.0),
            downtime_months: self.renewal_downtime.unwrap_or(0.0),
            ti_per_area: self.renewal_ti.unwrap_or(0.0),
            lc_percent: self.renewal_lc.unwrap_or(0.0),
            market_rent_per_area: self.renewal_market_rent.unwrap_or(0.0),
        };

        Ok(Lease {
            tenant: self.tenant,
            area: self.area,
            base_rent_per_area: self.rent_per_area,
            start_date: self.start_date,
            end_date: self.end_date,
            escalation,
            reimbursement,
            renewal,
        })
    }
}

/// Parse `"lease_year:rent;lease_year:rent"` into an ordered schedule
fn parse_step_schedule(raw: &str) -> Result<Vec<RentStep>, String> {
    let mut schedule = raw
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|entry| {
            let (year, rent) = entry
                .split_once(':')
                .ok_or_else(|| format!("Malformed step '{}'", entry))?;
            Ok(RentStep {
                lease_year: year.trim().parse().map_err(|_| format!("Bad step year '{}'", year))?,
                rent_per_area: rent.trim().parse().map_err(|_| format!("Bad step rent '{}'", rent))?,
            })
        })
        .collect::<Result<Vec<_>, String>>()?;
    schedule.sort_by_key(|step| step.lease_year);
    Ok(schedule)
}

/// Load all leases from a CSV file
pub fn load_rent_roll<P: AsRef<Path>>(path: P) -> LoadResult<Vec<Lease>> {
    let reader = Reader::from_path(path)?;
    collect_leases(reader)
}

/// Load leases from any reader (e.g., string buffer, uploaded file)
pub fn load_rent_roll_from_reader<R: std::io::Read>(reader: R) -> LoadResult<Vec<Lease>> {
    collect_leases(Reader::from_reader(reader))
}

fn collect_leases<R: std::io::Read>(mut reader: Reader<R>) -> LoadResult<Vec<Lease>> {
    let mut leases = Vec::new();

    for (idx, result) in reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        // Row 1 is the header
        leases.push(row.into_lease(idx + 2)?);
    }

    log::debug!("Loaded {} leases from rent roll", leases.len());
    Ok(leases)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROLL: &str = "\
tenant,area,rent_per_area,start_date,end_date,escalation,escalation_rate,cpi_review_years,step_schedule,reimbursement,expense_stop,admin_fee,renewal_probability,renewal_term,renewal_bump,renewal_downtime,renewal_ti,renewal_lc,renewal_market_rent
Suite 100,1000,15.0,2024-01-01,2035-12-31,fixed,2.5,,,nnn,,10,,,,,,,
Suite 200,2500,22.0,2022-07-01,2027-06-30,step,,,6:25.0;3:23.5,mg,7.25,,75,5,0,3,10,6,24
Suite 300,800,18.0,2023-01-01,2029-12-31,cpi,,2,,gross,,,,,,,,,
";

    #[test]
    fn test_load_rent_roll_from_reader() {
        let leases = load_rent_roll_from_reader(ROLL.as_bytes()).expect("rent roll should parse");
        assert_eq!(leases.len(), 3);

        assert_eq!(leases[0].escalation, Escalation::FixedPercent { rate_percent: 2.5 });
        assert_eq!(leases[0].reimbursement, Reimbursement::Nnn { admin_fee_percent: 10.0 });

        match &leases[1].escalation {
            Escalation::StepUp { schedule } => {
                assert_eq!(schedule.len(), 2);
                assert_eq!(schedule[0].lease_year, 3);
                assert_eq!(schedule[1].rent_per_area, 25.0);
            }
            other => panic!("expected step-up, got {:?}", other),
        }
        assert_eq!(leases[1].renewal.probability_percent, 75.0);
        assert_eq!(leases[1].renewal.market_rent_per_area, 24.0);

        assert_eq!(
            leases[2].escalation,
            Escalation::Cpi { rate_percent: None, review_frequency_years: 2 }
        );
        assert_eq!(leases[2].reimbursement, Reimbursement::Gross);
    }

    #[test]
    fn test_unknown_escalation_reports_row() {
        let roll = "\
tenant,area,rent_per_area,start_date,end_date,escalation,reimbursement
A,100,10,2024-01-01,2025-01-01,percentage,nnn
";
        match load_rent_roll_from_reader(roll.as_bytes()) {
            Err(DcfError::InvalidRecord { row, .. }) => assert_eq!(row, 2),
            other => panic!("expected invalid record, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_step_schedule_rejects_garbage() {
        assert!(parse_step_schedule("3-16.5").is_err());
        assert!(parse_step_schedule("").unwrap().is_empty());
    }
}
