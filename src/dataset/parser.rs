// Dataset Parser
// Reads the country/subcountry JSON document into lookup tables
//
// Layout:
//   [
//     {"name": "Australia", "code": "AU", "subcountries": [
//       {"name": "New South Wales", "code": "NSW", "category": "state", "fips10_4": "02"},
//       ...
//     ]},
//     {"name": "Singapore", "code": "SG"},
//     ...
//   ]
//
// Each country block and each subcountry block is decoded from its own raw
// slice of the document, so a failure can be pinned to the exact source line.
// Any deviation from the layout is fatal: the dataset is assumed to be
// internally consistent.

use serde::Deserialize;
use serde_json::value::RawValue;

use super::tables::{CountryRecord, SubcountryRecord, SubcountryTables};
use super::Dataset;
use crate::error::MalformedDatasetError;

/// Country label used when an error cannot be attributed to a country block
pub const DOCUMENT_LABEL: &str = "<dataset>";

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCountry<'a> {
    name: String,
    code: String,
    #[serde(default, borrow)]
    subcountries: Vec<&'a RawValue>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSubcountry {
    name: String,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    regional_division: Option<String>,
    #[serde(default)]
    fips10_4: Option<String>,
}

/// Lenient view of a country block, used only to name it in error messages
#[derive(Deserialize)]
struct NameProbe {
    name: String,
}

impl RawSubcountry {
    fn into_record(self) -> SubcountryRecord {
        SubcountryRecord {
            name: self.name,
            code: present(self.code),
            category: present(self.category),
            regional_division: present(self.regional_division),
            fips10_4: present(self.fips10_4),
        }
    }
}

/// Blank optional fields count as absent
fn present(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn is_country_code(code: &str) -> bool {
    code.len() == 2 && code.bytes().all(|b| b.is_ascii_uppercase())
}

fn is_subcountry_code(code: &str) -> bool {
    (1..=3).contains(&code.len())
        && code
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}

/// 1-based line on which `fragment` starts within `source`.
///
/// `fragment` must be a slice of `source`; anything else reports line 1.
fn line_of(source: &str, fragment: &str) -> usize {
    let offset = (fragment.as_ptr() as usize)
        .checked_sub(source.as_ptr() as usize)
        .filter(|&o| o <= source.len() && source.is_char_boundary(o))
        .unwrap_or(0);
    source[..offset].matches('\n').count() + 1
}

fn malformed(
    source: &str,
    country: &str,
    line: usize,
    reason: impl Into<String>,
) -> MalformedDatasetError {
    let content = source
        .lines()
        .nth(line.saturating_sub(1))
        .unwrap_or_default()
        .trim()
        .to_string();
    MalformedDatasetError {
        country: country.to_string(),
        line,
        content,
        reason: reason.into(),
    }
}

/// Line of a serde error raised while decoding a block starting at `base`
fn error_line(base: usize, err: &serde_json::Error) -> usize {
    base + err.line().max(1) - 1
}

/// Parse a dataset document into a `Dataset`
pub fn parse_dataset(source: &str) -> Result<Dataset, MalformedDatasetError> {
    let blocks: Vec<&RawValue> = serde_json::from_str(source)
        .map_err(|e| malformed(source, DOCUMENT_LABEL, e.line().max(1), e.to_string()))?;

    let mut dataset = Dataset::default();
    for block in blocks {
        let (country, tables) = parse_country(source, block, &dataset)?;
        dataset.insert_country(country, tables);
    }
    Ok(dataset)
}

fn parse_country(
    source: &str,
    block: &RawValue,
    dataset: &Dataset,
) -> Result<(CountryRecord, SubcountryTables), MalformedDatasetError> {
    let base = line_of(source, block.get());
    let raw: RawCountry<'_> = serde_json::from_str(block.get()).map_err(|e| {
        let label = serde_json::from_str::<NameProbe>(block.get())
            .map(|p| p.name)
            .unwrap_or_else(|_| DOCUMENT_LABEL.to_string());
        malformed(source, &label, error_line(base, &e), e.to_string())
    })?;

    if raw.name.trim().is_empty() {
        return Err(malformed(source, DOCUMENT_LABEL, base, "country name is blank"));
    }
    if !is_country_code(&raw.code) {
        return Err(malformed(
            source,
            &raw.name,
            base,
            format!("invalid country code {:?}", raw.code),
        ));
    }
    if dataset.country_by_code.contains_key(&raw.code) {
        return Err(malformed(
            source,
            &raw.name,
            base,
            format!("duplicate country code {:?}", raw.code),
        ));
    }
    if dataset.country_by_name.contains_key(&raw.name) {
        return Err(malformed(source, &raw.name, base, "duplicate country name"));
    }

    let mut tables = SubcountryTables::default();
    for sub in &raw.subcountries {
        let record = parse_subcountry(source, &raw.name, sub, &tables)?;
        tables.insert(record);
    }

    Ok((
        CountryRecord {
            name: raw.name,
            code: raw.code,
        },
        tables,
    ))
}

fn parse_subcountry(
    source: &str,
    country: &str,
    block: &RawValue,
    tables: &SubcountryTables,
) -> Result<SubcountryRecord, MalformedDatasetError> {
    let line = line_of(source, block.get());
    let record = serde_json::from_str::<RawSubcountry>(block.get())
        .map_err(|e| malformed(source, country, error_line(line, &e), e.to_string()))?
        .into_record();

    if record.name.trim().is_empty() {
        return Err(malformed(source, country, line, "subcountry name is blank"));
    }
    if let Some(code) = &record.code {
        if !is_subcountry_code(code) {
            return Err(malformed(
                source,
                country,
                line,
                format!("invalid subcountry code {:?}", code),
            ));
        }
        if tables.contains_code(code) {
            return Err(malformed(
                source,
                country,
                line,
                format!("duplicate subcountry code {:?}", code),
            ));
        }
    }
    Ok(record)
}
