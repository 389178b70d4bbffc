//! The JSON catalog file: the session's catalog source and the editor's
//! append target.
//!
//! The file is a single pretty-printed JSON array of
//! [`RestaurantRecord`](crate::record::RestaurantRecord) values, indented
//! with four spaces to match the format the original dataset was written
//! in.

use std::fs::File;
use std::io::{self, BufReader, BufWriter};

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use thiserror::Error;

use nearbite_core::{CatalogError, CatalogSource, Restaurant};

use crate::places::PlaceDetails;
use crate::record::RestaurantRecord;

/// Errors from reading or writing the catalog file.
#[derive(Debug, Error)]
pub enum CatalogFileError {
    /// The file could not be read.
    #[error("failed to read catalog file {path}")]
    Read {
        /// Location of the catalog file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The file exists but does not hold a valid record array.
    #[error("catalog file {path} is not a valid record array")]
    Parse {
        /// Location of the catalog file.
        path: Utf8PathBuf,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },
    /// The file could not be written.
    #[error("failed to write catalog file {path}")]
    Write {
        /// Location of the catalog file.
        path: Utf8PathBuf,
        /// Underlying I/O or encode error.
        #[source]
        source: io::Error,
    },
}

/// Outcome of an append attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum AppendOutcome {
    /// The record was added with a freshly assigned id.
    Added(Restaurant),
    /// A record with the same name or maps URL already exists; the file was
    /// left untouched.
    Duplicate {
        /// Name of the existing record.
        name: String,
    },
}

/// A catalog persisted as a JSON file on disk.
///
/// # Examples
/// ```no_run
/// use nearbite_catalog::JsonCatalog;
/// use nearbite_core::CatalogSource;
///
/// let catalog = JsonCatalog::new("services/data.json");
/// let restaurants = catalog.load()?;
/// # Ok::<(), nearbite_core::CatalogError>(())
/// ```
#[derive(Debug, Clone)]
pub struct JsonCatalog {
    path: Utf8PathBuf,
}

impl JsonCatalog {
    /// Point at a catalog file. The file need not exist yet; appending
    /// creates it.
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Read and convert every record in the file.
    ///
    /// Records that fail conversion (an out-of-range price bracket) are
    /// skipped with a warning rather than failing the whole catalog.
    ///
    /// # Errors
    /// Returns [`CatalogFileError`] when the file is missing, unreadable or
    /// not a valid record array.
    pub fn records(&self) -> Result<Vec<Restaurant>, CatalogFileError> {
        let raw = self.read_raw()?;
        let mut restaurants = Vec::with_capacity(raw.len());
        for record in raw {
            let id = record.id;
            match record.into_restaurant() {
                Ok(restaurant) => restaurants.push(restaurant),
                Err(error) => log::warn!("catalog record {id}: skipping: {error}"),
            }
        }
        Ok(restaurants)
    }

    /// Append a looked-up place to the catalog.
    ///
    /// Rejects duplicates by name or maps-URL equality, assigns the next id
    /// (`max(existing) + 1`, or 1 for an empty catalog) and rewrites the
    /// file pretty-printed. A missing file is treated as an empty catalog.
    ///
    /// # Errors
    /// Returns [`CatalogFileError`] on read, parse or write failure.
    pub fn append(&self, details: &PlaceDetails, cuisine: &str) -> Result<AppendOutcome, CatalogFileError> {
        let mut records = match self.read_raw() {
            Ok(records) => records,
            Err(CatalogFileError::Read { source, .. })
                if source.kind() == io::ErrorKind::NotFound =>
            {
                Vec::new()
            }
            Err(error) => return Err(error),
        };

        if let Some(existing) = records
            .iter()
            .find(|r| r.name == details.name || r.google_maps_url == details.url)
        {
            return Ok(AppendOutcome::Duplicate {
                name: existing.name.clone(),
            });
        }

        let next_id = records.iter().map(|r| r.id).max().map_or(1, |max| max + 1);
        let restaurant = details.to_restaurant(next_id, cuisine);
        records.push(RestaurantRecord::from_restaurant(&restaurant));
        self.write_raw(&records)?;
        Ok(AppendOutcome::Added(restaurant))
    }

    fn read_raw(&self) -> Result<Vec<RestaurantRecord>, CatalogFileError> {
        let file = File::open(&self.path).map_err(|source| CatalogFileError::Read {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|source| CatalogFileError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn write_raw(&self, records: &[RestaurantRecord]) -> Result<(), CatalogFileError> {
        let write_error = |source| CatalogFileError::Write {
            path: self.path.clone(),
            source,
        };
        let file = File::create(&self.path).map_err(write_error)?;
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer =
            serde_json::Serializer::with_formatter(BufWriter::new(file), formatter);
        records
            .serialize(&mut serializer)
            .map_err(|source| write_error(io::Error::other(source)))
    }
}

impl CatalogSource for JsonCatalog {
    fn load(&self) -> Result<Vec<Restaurant>, CatalogError> {
        self.records().map_err(|error| CatalogError::Unavailable {
            reason: error.to_string(),
        })
    }
}
