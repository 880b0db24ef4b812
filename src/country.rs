// Subcountry resolver (ISO 3166-2 / FIPS 10-4)
//
// A `Country` is a resolved (name, code) pair plus a borrow of that country's
// subdivision tables.
//
// Case handling differs per accessor:
// - `full_name`, `fips10_4_code`, `subcountry`: input is upper-cased after cleaning
// - `category`, `regional_division`, `iso3166_2_code`: cleaned only, matched as given
// - `code`: exact match first, then a case-insensitive scan over names

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use crate::catalog::{sorted_keys, Catalog};
use crate::dataset::tables::{SubcountryRecord, SubcountryTables};
use crate::dataset::Dataset;
use crate::lookup::Lookup;
use crate::normalize::clean;

/// Handle on one country and its subdivisions
#[derive(Debug, Clone, Copy)]
pub struct Country<'a> {
    name: &'a str,
    code: &'a str,
    tables: &'a SubcountryTables,
}

impl<'a> Country<'a> {
    /// Two-character identifiers are treated as codes (case-insensitive),
    /// anything else must equal the stored country name.
    pub(crate) fn resolve(dataset: &'a Dataset, identifier: &str) -> Option<Self> {
        let found = if identifier.chars().count() == 2 {
            dataset
                .country_by_code
                .get_key_value(identifier.to_uppercase().as_str())
                .map(|(code, name)| (name, code))
        } else {
            dataset.country_by_name.get_key_value(identifier)
        };

        let Some((name, code)) = found else {
            log::warn!("Unknown country identifier {:?}", identifier);
            return None;
        };
        let tables = dataset.subcountries.get(code)?;

        Some(Self {
            name: name.as_str(),
            code: code.as_str(),
            tables,
        })
    }

    /// Canonical country name
    pub fn country(&self) -> &'a str {
        self.name
    }

    /// ISO 3166-1 alpha-2 code
    pub fn country_code(&self) -> &'a str {
        self.code
    }

    pub fn has_sub_countries(&self) -> bool {
        !self.tables.code_to_name.is_empty()
    }

    /// Subdivision code for a name.
    ///
    /// Falls back to a case-insensitive scan in dataset order when the
    /// cleaned name has no exact match; stored names are cleaned the same way
    /// for that comparison. The first hit wins.
    pub fn code(&self, full_name: &str) -> Lookup<&'a str> {
        if !self.has_sub_countries() {
            return Lookup::NotApplicable;
        }
        let tables: &'a SubcountryTables = self.tables;
        let name = clean(full_name);

        if let Some(code) = tables.name_to_code.get(&*name) {
            return Lookup::Found(code.as_str());
        }

        let wanted = name.to_uppercase();
        tables
            .name_order
            .iter()
            .find(|candidate| clean(candidate).to_uppercase() == wanted)
            .and_then(|candidate| tables.name_to_code.get(candidate))
            .map(String::as_str)
            .into()
    }

    /// Subdivision name for a code, optionally upper-cased.
    ///
    /// Upper-casing applies to found names only; a miss stays `NotFound`.
    pub fn full_name(&self, code: &str, upper_case: bool) -> Lookup<Cow<'a, str>> {
        if !self.has_sub_countries() {
            return Lookup::NotApplicable;
        }
        let tables: &'a SubcountryTables = self.tables;
        let code = clean(code).to_uppercase();

        match tables.code_to_name.get(&code) {
            Some(name) if upper_case => Lookup::Found(Cow::Owned(name.to_uppercase())),
            Some(name) => Lookup::Found(Cow::Borrowed(name.as_str())),
            None => Lookup::NotFound,
        }
    }

    pub fn category(&self, code: &str) -> Lookup<&'a str> {
        let tables: &'a SubcountryTables = self.tables;
        tables
            .category
            .get(&*clean(code))
            .map(String::as_str)
            .into()
    }

    pub fn regional_division(&self, code: &str) -> Lookup<&'a str> {
        let tables: &'a SubcountryTables = self.tables;
        tables
            .division
            .get(&*clean(code))
            .map(String::as_str)
            .into()
    }

    /// FIPS 10-4 code for an ISO 3166-2 code
    pub fn fips10_4_code(&self, code: &str) -> Lookup<&'a str> {
        let tables: &'a SubcountryTables = self.tables;
        tables
            .iso_to_fips
            .get(&clean(code).to_uppercase())
            .map(String::as_str)
            .into()
    }

    /// ISO 3166-2 code for a FIPS 10-4 code
    pub fn iso3166_2_code(&self, fips: &str) -> Lookup<&'a str> {
        let tables: &'a SubcountryTables = self.tables;
        tables
            .fips_to_iso
            .get(&*clean(fips))
            .map(String::as_str)
            .into()
    }

    /// Every subdivision record, including ones without a code, in dataset order
    pub fn subcountries(&self) -> &'a [SubcountryRecord] {
        &self.tables.records
    }

    /// Full record for a subdivision code
    pub fn subcountry(&self, code: &str) -> Option<&'a SubcountryRecord> {
        let tables: &'a SubcountryTables = self.tables;
        let code = clean(code).to_uppercase();
        tables
            .records
            .iter()
            .find(|r| r.code.as_deref() == Some(code.as_str()))
    }
}

impl<'a> Catalog<'a> for Country<'a> {
    fn all_codes(&self) -> Lookup<Vec<&'a str>> {
        if !self.has_sub_countries() {
            return Lookup::NotApplicable;
        }
        let tables: &'a SubcountryTables = self.tables;
        Lookup::Found(sorted_keys(&tables.code_to_name))
    }

    fn all_full_names(&self) -> Lookup<Vec<&'a str>> {
        if !self.has_sub_countries() {
            return Lookup::NotApplicable;
        }
        let tables: &'a SubcountryTables = self.tables;
        Lookup::Found(sorted_keys(&tables.name_to_code))
    }

    fn code_full_name_hash(&self) -> Lookup<&'a HashMap<String, String>> {
        if !self.has_sub_countries() {
            return Lookup::NotApplicable;
        }
        Lookup::Found(&self.tables.code_to_name)
    }

    fn full_name_code_hash(&self) -> Lookup<&'a HashMap<String, String>> {
        if !self.has_sub_countries() {
            return Lookup::NotApplicable;
        }
        Lookup::Found(&self.tables.name_to_code)
    }
}

impl fmt::Display for Country<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn embedded() -> Dataset {
        let _ = env_logger::builder().is_test(true).try_init();
        Dataset::embedded().unwrap()
    }

    fn name(lookup: Lookup<Cow<'_, str>>) -> Option<String> {
        lookup.found().map(Cow::into_owned)
    }

    #[test]
    fn test_resolve_by_code_any_case() {
        let dataset = embedded();
        let upper = dataset.country("AU").unwrap();
        let lower = dataset.country("au").unwrap();
        assert_eq!(upper.country_code(), "AU");
        assert_eq!(lower.country_code(), "AU");
        assert_eq!(upper.country(), "Australia");
    }

    #[test]
    fn test_resolve_by_name() {
        let dataset = embedded();
        assert_eq!(dataset.country("Australia").unwrap().country_code(), "AU");
        // names are not case-folded
        assert!(dataset.country("australia").is_none());
    }

    #[test]
    fn test_every_code_resolves_to_itself() {
        let dataset = embedded();
        for record in dataset.world().countries() {
            let country = dataset.country(&record.code.to_lowercase()).unwrap();
            assert_eq!(country.country_code(), record.code);
            assert_eq!(dataset.country(&record.name).unwrap().country_code(), record.code);
        }
    }

    #[test]
    fn test_unknown_country() {
        let dataset = embedded();
        assert!(dataset.country("XX").is_none());
        assert!(dataset.country("Atlantis").is_none());
        assert!(dataset.country("").is_none());
    }

    #[test]
    fn test_code_trims_and_falls_back() {
        let dataset = embedded();
        let au = dataset.country("AU").unwrap();
        assert_eq!(au.code("New South Wales "), Lookup::Found("NSW"));
        assert_eq!(au.code("New South Wales"), Lookup::Found("NSW"));
        assert_eq!(au.code("new south wales"), Lookup::Found("NSW"));
        assert_eq!(au.code("NEW SOUTH WALES"), Lookup::Found("NSW"));
        assert_eq!(au.code("  new  south wales"), Lookup::Found("NSW"));
        assert_eq!(au.code("Atlantis"), Lookup::NotFound);
        assert_eq!(au.code("Atlantis").or_unknown(), Some("unknown"));
    }

    #[test]
    fn test_full_name_upper_case() {
        let dataset = embedded();
        let au = dataset.country("AU").unwrap();
        assert_eq!(name(au.full_name("Qld", true)).as_deref(), Some("QUEENSLAND"));
        assert_eq!(name(au.full_name("qld", false)).as_deref(), Some("Queensland"));
        assert_eq!(au.full_name("ZZ", true).or_unknown(), Some("unknown"));
    }

    #[test]
    fn test_gb_division() {
        let dataset = embedded();
        let gb = dataset.country("GB").unwrap();
        assert_eq!(name(gb.full_name("DGY", false)).as_deref(), Some("Dumfries and Galloway"));
        assert_eq!(gb.regional_division("DGY"), Lookup::Found("SCT"));
        assert_eq!(gb.category("DGY"), Lookup::Found("council area"));
        assert_eq!(gb.regional_division("ENG"), Lookup::NotFound);
    }

    #[test]
    fn test_category_is_case_sensitive() {
        let dataset = embedded();
        let gb = dataset.country("GB").unwrap();
        assert_eq!(gb.category("dgy"), Lookup::NotFound);
        assert_eq!(gb.regional_division("dgy"), Lookup::NotFound);
        assert_eq!(gb.category(" DGY "), Lookup::Found("council area"));
    }

    #[test]
    fn test_fips_cross_reference() {
        let dataset = embedded();
        let au = dataset.country("AU").unwrap();
        assert_eq!(au.fips10_4_code("ACT"), Lookup::Found("01"));
        assert_eq!(au.fips10_4_code("act"), Lookup::Found("01"));
        assert_eq!(au.iso3166_2_code("02"), Lookup::Found("NSW"));
        assert_eq!(au.iso3166_2_code("99"), Lookup::NotFound);

        let gb = dataset.country("GB").unwrap();
        assert_eq!(gb.fips10_4_code("DGY"), Lookup::NotFound);
    }

    #[test]
    fn test_unknown_inputs() {
        let dataset = embedded();
        let au = dataset.country("AU").unwrap();
        assert_eq!(au.full_name("ZZ", false), Lookup::NotFound);
        assert_eq!(au.category("ZZ"), Lookup::NotFound);
        assert_eq!(au.category("ZZ").or_unknown(), Some("unknown"));
    }

    #[test]
    fn test_no_subdivisions() {
        let dataset = embedded();
        let sg = dataset.country("SG").unwrap();
        assert!(!sg.has_sub_countries());
        assert_eq!(sg.code("anything"), Lookup::NotApplicable);
        assert_eq!(sg.code("anything").or_unknown(), None);
        assert!(sg.full_name("01", true).is_not_applicable());
        assert_eq!(sg.all_codes(), Lookup::NotApplicable);
        assert_eq!(sg.all_full_names(), Lookup::NotApplicable);
        assert!(sg.code_full_name_hash().is_not_applicable());
        assert!(sg.full_name_code_hash().is_not_applicable());
        assert_eq!(sg.category("01"), Lookup::NotFound);
    }

    #[test]
    fn test_round_trip() {
        let dataset = embedded();
        for code in ["AU", "CA", "DE", "GB", "US"] {
            let country = dataset.country(code).unwrap();
            let pairs = country.code_full_name_hash().found().unwrap();
            for (sub_code, sub_name) in pairs {
                assert_eq!(
                    name(country.full_name(sub_code, false)).as_deref(),
                    Some(sub_name.as_str())
                );
                assert_eq!(country.code(sub_name), Lookup::Found(sub_code.as_str()));
            }
        }
    }

    #[test]
    fn test_sorted_listings() {
        let dataset = embedded();
        let au = dataset.country("AU").unwrap();
        assert_eq!(
            au.all_codes(),
            Lookup::Found(vec!["ACT", "NSW", "NT", "QLD", "SA", "TAS", "VIC", "WA"])
        );
        let names = au.all_full_names().found().unwrap();
        assert_eq!(names.first(), Some(&"Australian Capital Territory"));
        assert_eq!(names.last(), Some(&"Western Australia"));
        assert_eq!(au.full_name_code_hash().found().unwrap()["Tasmania"], "TAS");
    }

    #[test]
    fn test_codeless_records() {
        let dataset = embedded();
        let gb = dataset.country("GB").unwrap();
        let strathclyde = gb
            .subcountries()
            .iter()
            .find(|r| r.name == "Strathclyde")
            .unwrap();
        assert_eq!(strathclyde.code, None);
        assert_eq!(strathclyde.regional_division.as_deref(), Some("SCT"));
        assert_eq!(gb.code("Strathclyde"), Lookup::NotFound);
        assert!(!gb.all_full_names().found().unwrap().contains(&"Strathclyde"));
    }

    #[test]
    fn test_subcountry_record() {
        let dataset = embedded();
        let us = dataset.country("US").unwrap();
        let dc = us.subcountry("d.c.").unwrap();
        assert_eq!(dc.name, "District of Columbia");
        assert_eq!(dc.category.as_deref(), Some("district"));
        assert_eq!(dc.fips10_4.as_deref(), Some("11"));
        assert!(us.subcountry("ZZ").is_none());
    }

    #[test]
    fn test_ambiguous_names_last_wins_and_scan_order() {
        let dataset = Dataset::from_json(
            r#"[{"name": "Testland", "code": "TL", "subcountries": [
                {"name": "Saint Anne", "code": "SA1"},
                {"name": "SAINT ANNE", "code": "SA2"},
                {"name": "Saint Anne", "code": "SA3"}
            ]}]"#,
        )
        .unwrap();
        let tl = dataset.country("TL").unwrap();
        assert_eq!(tl.code("Saint Anne"), Lookup::Found("SA3"));
        // scan hits "Saint Anne" before "SAINT ANNE"
        assert_eq!(tl.code("saint anne"), Lookup::Found("SA3"));
        assert_eq!(tl.code("SAINT ANNE"), Lookup::Found("SA2"));
        assert_eq!(name(tl.full_name("sa1", false)).as_deref(), Some("Saint Anne"));
    }

    #[test]
    fn test_code_for_stored_name_with_periods() {
        let dataset = embedded();
        let us = dataset.country("US").unwrap();
        let stored = name(us.full_name("VI", false)).unwrap();
        assert_eq!(stored, "Virgin Islands, U.S.");
        assert_eq!(us.code(&stored), Lookup::Found("VI"));
        assert_eq!(us.code("Virgin Islands, US"), Lookup::Found("VI"));
        assert_eq!(us.code("virgin islands, u.s."), Lookup::Found("VI"));
    }

    #[test]
    fn test_display() {
        let dataset = embedded();
        assert_eq!(dataset.country("gb").unwrap().to_string(), "United Kingdom (GB)");
    }
}
