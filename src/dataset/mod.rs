// Dataset module - ISO 3166-1 countries and ISO 3166-2 subdivisions
//
// A `Dataset` is built once from a JSON document (the embedded snapshot by
// default) and is immutable afterwards. `World` and `Country` handles borrow
// from it; nothing mutates the tables after load.
//
// Source selection:
// - `DatasetSource::Embedded` uses data/subdivisions.json compiled into the crate
// - `DatasetSource::Path` reads an alternate file at load time
// - `SUBDIVISIONS_DATASET` picks a file for `DatasetSource::from_env()`

pub mod parser;
pub mod tables;

use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::OnceLock;

use crate::catalog::World;
use crate::country::Country;
use crate::error::{DatasetError, MalformedDatasetError};
use tables::{CountryRecord, SubcountryTables};

/// Environment variable naming an alternate dataset file
pub const DATASET_ENV: &str = "SUBDIVISIONS_DATASET";

const EMBEDDED_JSON: &str = include_str!("../../data/subdivisions.json");

/// Where to load the dataset from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DatasetSource {
    #[default]
    Embedded,
    Path(PathBuf),
}

impl DatasetSource {
    /// `Path` when `SUBDIVISIONS_DATASET` is set and non-empty, else `Embedded`
    pub fn from_env() -> Self {
        match std::env::var_os(DATASET_ENV) {
            Some(path) if !path.is_empty() => DatasetSource::Path(PathBuf::from(path)),
            _ => DatasetSource::Embedded,
        }
    }
}

/// Record counts, logged after every load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DatasetStats {
    pub countries: usize,
    pub subcountries: usize,
    /// Subcountries carrying an ISO 3166-2 code
    pub coded_subcountries: usize,
}

/// In-memory country and subdivision tables
#[derive(Debug, Default)]
pub struct Dataset {
    /// Countries in dataset order
    pub(crate) countries: Vec<CountryRecord>,
    pub(crate) country_by_code: HashMap<String, String>,
    pub(crate) country_by_name: HashMap<String, String>,
    /// Subdivision tables keyed by country code; every country has an entry
    pub(crate) subcountries: HashMap<String, SubcountryTables>,
}

impl Dataset {
    /// Load and parse a dataset
    pub fn load(source: &DatasetSource) -> Result<Self, DatasetError> {
        match source {
            DatasetSource::Embedded => {
                log::debug!("Loading embedded subdivision dataset");
                Ok(Self::from_json(EMBEDDED_JSON)?)
            }
            DatasetSource::Path(path) => {
                log::debug!("Loading subdivision dataset from {}", path.display());
                let text = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
                    path: path.clone(),
                    source,
                })?;
                Ok(Self::from_json(&text)?)
            }
        }
    }

    /// The snapshot compiled into the crate
    pub fn embedded() -> Result<Self, DatasetError> {
        Self::load(&DatasetSource::Embedded)
    }

    /// Parse a dataset document held in memory
    pub fn from_json(text: &str) -> Result<Self, MalformedDatasetError> {
        let dataset = parser::parse_dataset(text)?;
        let stats = dataset.stats();
        log::info!(
            "Loaded subdivision dataset: {} countries, {} subdivisions ({} coded)",
            stats.countries,
            stats.subcountries,
            stats.coded_subcountries
        );
        Ok(dataset)
    }

    pub fn stats(&self) -> DatasetStats {
        let tables = self.subcountries.values();
        DatasetStats {
            countries: self.countries.len(),
            subcountries: tables.clone().map(|t| t.records.len()).sum(),
            coded_subcountries: tables.map(|t| t.code_to_name.len()).sum(),
        }
    }

    /// Country-level catalog
    pub fn world(&self) -> World<'_> {
        World::new(self)
    }

    /// Resolve a country by two-letter code (any case) or canonical name.
    ///
    /// Returns `None`, with a warning logged, when neither matches.
    pub fn country(&self, identifier: &str) -> Option<Country<'_>> {
        Country::resolve(self, identifier)
    }

    pub(crate) fn insert_country(&mut self, country: CountryRecord, tables: SubcountryTables) {
        self.country_by_code
            .insert(country.code.clone(), country.name.clone());
        self.country_by_name
            .insert(country.name.clone(), country.code.clone());
        self.subcountries.insert(country.code.clone(), tables);
        self.countries.push(country);
    }
}

static SHARED: OnceLock<Dataset> = OnceLock::new();

/// Process-wide dataset, loaded from `DatasetSource::from_env()` on first use.
///
/// A failed load is not cached; the next call tries again.
pub fn dataset() -> Result<&'static Dataset, DatasetError> {
    if let Some(dataset) = SHARED.get() {
        return Ok(dataset);
    }
    let dataset = Dataset::load(&DatasetSource::from_env())?;
    Ok(SHARED.get_or_init(|| dataset))
}
