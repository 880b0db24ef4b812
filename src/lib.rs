//! Subdivisions Library
//! ISO 3166-1 countries, ISO 3166-2 subdivisions and FIPS 10-4 cross-references
//!
//! The embedded snapshot (`data/subdivisions.json`) lists every ISO 3166-1
//! country but carries subdivisions only for AU, CA, DE, GB and US; every
//! other country reports `has_sub_countries() == false`. Point
//! `SUBDIVISIONS_DATASET` at a complete dataset file in the same format to
//! get full ISO 3166-2 coverage through `dataset()`.
//!
//! ```
//! use subdivisions::{Dataset, Lookup};
//!
//! let dataset = Dataset::embedded()?;
//! let au = dataset.country("AU").unwrap();
//! assert_eq!(au.code("New South Wales"), Lookup::Found("NSW"));
//! # Ok::<(), subdivisions::DatasetError>(())
//! ```

pub mod catalog;
pub mod country;
pub mod dataset;
pub mod error;
pub mod lookup;
pub mod normalize;

pub use catalog::{Catalog, World};
pub use country::Country;
pub use dataset::tables::{CountryRecord, SubcountryRecord};
pub use dataset::{dataset, Dataset, DatasetSource, DatasetStats, DATASET_ENV};
pub use error::{DatasetError, MalformedDatasetError};
pub use lookup::{Lookup, UNKNOWN};
pub use normalize::clean;
