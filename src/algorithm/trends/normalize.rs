//! Cleaning of raw rows into typed records

use log::debug;

use crate::config::DatasetConfig;
use crate::error::{Result, TrendsError};
use crate::models::{NormalizedRecord, RawRecord};
use crate::utils::logging::log_skipped_rows;

/// Clean raw rows into typed records.
///
/// Rows named with the rare-names placeholder, rows with a blank name and
/// rows whose year does not parse are skipped without error. An unknown
/// gender code or a count that is not a non-negative integer fails the whole
/// call. Names are upper-cased.
pub fn normalize<I>(raw_records: I, config: &DatasetConfig) -> Result<Vec<NormalizedRecord>>
where
    I: IntoIterator<Item = RawRecord>,
{
    let raw_records = raw_records.into_iter();
    let mut records = Vec::with_capacity(raw_records.size_hint().0);
    let mut rare = 0usize;
    let mut blank = 0usize;
    let mut bad_year = 0usize;

    for raw in raw_records {
        if raw.name == config.rare_names_sentinel {
            rare += 1;
            continue;
        }
        if raw.name.trim().is_empty() {
            blank += 1;
            continue;
        }

        let gender = config
            .gender_for_code(&raw.gender_code)
            .ok_or_else(|| TrendsError::InvalidGenderCode {
                code: raw.gender_code.clone(),
                line: raw.line,
            })?;

        let Some(year) = parse_year(&raw.year) else {
            bad_year += 1;
            continue;
        };

        let count = raw
            .count
            .trim()
            .parse::<u64>()
            .map_err(|_| TrendsError::InvalidCount {
                value: raw.count.clone(),
                line: raw.line,
            })?;

        records.push(NormalizedRecord {
            gender,
            name: raw.name.to_uppercase(),
            year,
            count,
        });
    }

    log_skipped_rows(
        "normalize",
        &[
            ("rare names", rare),
            ("blank name", blank),
            ("unparsable year", bad_year),
        ],
    );
    debug!("normalize: kept {} rows", records.len());

    Ok(records)
}

/// Parse a year leniently: surrounding whitespace is ignored and integral
/// decimals such as `1999.0` are accepted
fn parse_year(value: &str) -> Option<i32> {
    let value = value.trim();
    if let Ok(year) = value.parse::<i32>() {
        return Some(year);
    }

    let year = value.parse::<f64>().ok()?;
    let in_range = year >= f64::from(i32::MIN) && year <= f64::from(i32::MAX);
    (year.is_finite() && year.fract() == 0.0 && in_range).then_some(year as i32)
}
