// Record types and per-country lookup tables
//
// Tables are filled once by the parser and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// ISO 3166-1 country entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRecord {
    /// Canonical country name, as stored in the dataset
    pub name: String,
    /// Two-letter ISO 3166-1 alpha-2 code
    pub code: String,
}

/// ISO 3166-2 subdivision entry
///
/// Records without a `code` (historical or unofficial regions) are kept in
/// the per-country record list but never indexed by name or code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubcountryRecord {
    pub name: String,
    /// ISO 3166-2 code without the country prefix, e.g. `NSW`
    pub code: Option<String>,
    /// Kind of subdivision, e.g. `state` or `council area`
    pub category: Option<String>,
    /// Code of the coarser division this one belongs to, e.g. `SCT`
    pub regional_division: Option<String>,
    /// FIPS 10-4 code without the country prefix, e.g. `02`
    pub fips10_4: Option<String>,
}

/// Lookup tables for the subdivisions of one country
#[derive(Debug, Default)]
pub(crate) struct SubcountryTables {
    /// Every parsed record, in dataset order
    pub(crate) records: Vec<SubcountryRecord>,
    pub(crate) code_to_name: HashMap<String, String>,
    pub(crate) name_to_code: HashMap<String, String>,
    /// Keys of `name_to_code` in first-insertion order, for the fallback scan
    pub(crate) name_order: Vec<String>,
    pub(crate) category: HashMap<String, String>,
    pub(crate) division: HashMap<String, String>,
    pub(crate) fips_to_iso: HashMap<String, String>,
    pub(crate) iso_to_fips: HashMap<String, String>,
}

impl SubcountryTables {
    pub(crate) fn contains_code(&self, code: &str) -> bool {
        self.code_to_name.contains_key(code)
    }

    /// Register a closed subcountry block.
    ///
    /// A repeated name keeps its original scan position but maps to the code
    /// of the latest record.
    pub(crate) fn insert(&mut self, record: SubcountryRecord) {
        if let Some(code) = &record.code {
            self.code_to_name.insert(code.clone(), record.name.clone());
            if self
                .name_to_code
                .insert(record.name.clone(), code.clone())
                .is_none()
            {
                self.name_order.push(record.name.clone());
            }

            if let Some(category) = &record.category {
                self.category.insert(code.clone(), category.clone());
            }
            if let Some(division) = &record.regional_division {
                self.division.insert(code.clone(), division.clone());
            }
            if let Some(fips) = &record.fips10_4 {
                self.fips_to_iso.insert(fips.clone(), code.clone());
                self.iso_to_fips.insert(code.clone(), fips.clone());
            }
        }
        self.records.push(record);
    }
}
