//! CollabNet Ingestion
//!
//! Turns the raw inputs into the `FacultyDirectory` the network builders
//! consume:
//! - roster CSV loading
//! - streaming bibliographic XML parsing
//! - record fetching for roster entries without a local file

pub mod errors;
pub mod fetcher;
pub mod loader;
pub mod records;
pub mod roster;

pub use errors::IngestionError;
pub use fetcher::{fetch_missing_records, FetchSummary, HttpRecordSource, RecordSource};
pub use loader::load_directory;
pub use records::{parse_publications, parse_publications_file};
pub use roster::load_roster;
