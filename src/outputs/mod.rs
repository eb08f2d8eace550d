//! Output rendering for flat files.
//!
//! # Submodules
//!
//! - [`json`]: neighborhood array for `us_neighborhoods.json`
//! - [`tabular`]: CSV for `us_neighborhoods.csv` and `call_centers_progress.csv`
//!
//! ```text
//! us_neighborhoods.json       # written once, after every city
//! us_neighborhoods.csv        # same records, read back by `listings`
//! call_centers_progress.csv   # rewritten at every checkpoint
//! ```

pub mod json;
pub mod tabular;
