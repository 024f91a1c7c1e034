//! JSON deal file loader

use super::DcfInput;
use crate::error::LoadResult;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Load a full valuation input from a JSON file
pub fn load_input<P: AsRef<Path>>(path: P) -> LoadResult<DcfInput> {
    let file = File::open(path)?;
    load_input_from_reader(BufReader::new(file))
}

/// Load a valuation input from any JSON reader
pub fn load_input_from_reader<R: std::io::Read>(reader: R) -> LoadResult<DcfInput> {
    let input: DcfInput = serde_json::from_reader(reader)?;
    log::debug!(
        "Loaded deal: {} leases, {} expense buckets, {} capital items, horizon {} years",
        input.leases.len(),
        input.expenses.len(),
        input.capital_items.len(),
        input.globals.horizon_years,
    );
    Ok(input)
}
