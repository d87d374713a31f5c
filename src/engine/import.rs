//! Plain-text number lists.
//!
//! Import files are read line by line, each line split on commas or tabs, so
//! CSV exports and spreadsheet copy/paste both work. Anything that does not
//! start with an integer is skipped.

use super::pool::parse_number;
use std::collections::HashSet;

/// Sample file offered for download: four rows of five numbers.
pub const TEMPLATE: &str = "1,2,3,4,5\n6,7,8,9,10\n11,12,13,14,15\n16,17,18,19,20";

pub const TEMPLATE_FILE_NAME: &str = "number_import_template.csv";

/// Parse an import file into its distinct numbers, in file order.
pub fn parse_import(text: &str) -> Vec<i64> {
    let mut seen = HashSet::new();
    text.split('\n')
        .flat_map(|line| line.split([',', '\t']))
        .filter_map(parse_number)
        .filter(|n| seen.insert(*n))
        .collect()
}

/// Parse the comma-separated list typed into the input box.
pub fn parse_batch(text: &str) -> Vec<i64> {
    text.split(',').filter_map(parse_number).collect()
}
