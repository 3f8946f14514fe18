//! Output generation for both jobs.
//!
//! - [`snapshot`]: timestamped raw HTML + CSV record for the scrape job
//! - [`dashboard`]: static chart page for the dashboard job
//!
//! # Output Structure
//!
//! ```text
//! data/
//! ├── eci_initiatives.csv         # dashboard input
//! └── 2025-05-06_20-30-00/
//!     ├── ECI_2024_000007.html
//!     └── eci_poc_data.csv
//!
//! docs/
//! └── index.html                  # dashboard, overwritten each run
//! ```

pub mod dashboard;
pub mod snapshot;
