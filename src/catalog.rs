// Country catalog (ISO 3166-1)
//
// `Catalog` is the read-only listing capability shared by the world-level
// view and per-country subdivision views.

use std::collections::HashMap;

use crate::country::Country;
use crate::dataset::tables::CountryRecord;
use crate::dataset::Dataset;
use crate::lookup::Lookup;

/// Sorted listings and full mappings over a code/name table.
///
/// `World` always answers `Found`. A `Country` without subdivisions answers
/// `NotApplicable`, which is distinct from an empty listing.
pub trait Catalog<'a> {
    /// All codes, lexically ascending
    fn all_codes(&self) -> Lookup<Vec<&'a str>>;

    /// All names, lexically ascending
    fn all_full_names(&self) -> Lookup<Vec<&'a str>>;

    /// Mapping code -> name
    fn code_full_name_hash(&self) -> Lookup<&'a HashMap<String, String>>;

    /// Mapping name -> code
    fn full_name_code_hash(&self) -> Lookup<&'a HashMap<String, String>>;
}

/// Keys of a table in plain byte order
pub(crate) fn sorted_keys(map: &HashMap<String, String>) -> Vec<&str> {
    let mut keys: Vec<&str> = map.keys().map(String::as_str).collect();
    keys.sort_unstable();
    keys
}

/// World-level view over the country table
#[derive(Debug, Clone, Copy)]
pub struct World<'a> {
    dataset: &'a Dataset,
}

impl<'a> World<'a> {
    pub(crate) fn new(dataset: &'a Dataset) -> Self {
        Self { dataset }
    }

    /// Countries in dataset order
    pub fn countries(&self) -> impl Iterator<Item = &'a CountryRecord> + 'a {
        let dataset: &'a Dataset = self.dataset;
        dataset.countries.iter()
    }

    /// Resolve a country handle, see `Dataset::country`
    pub fn country(&self, identifier: &str) -> Option<Country<'a>> {
        Country::resolve(self.dataset, identifier)
    }
}

impl<'a> Catalog<'a> for World<'a> {
    fn all_codes(&self) -> Lookup<Vec<&'a str>> {
        Lookup::Found(sorted_keys(&self.dataset.country_by_code))
    }

    fn all_full_names(&self) -> Lookup<Vec<&'a str>> {
        Lookup::Found(sorted_keys(&self.dataset.country_by_name))
    }

    fn code_full_name_hash(&self) -> Lookup<&'a HashMap<String, String>> {
        Lookup::Found(&self.dataset.country_by_code)
    }

    fn full_name_code_hash(&self) -> Lookup<&'a HashMap<String, String>> {
        Lookup::Found(&self.dataset.country_by_name)
    }
}
