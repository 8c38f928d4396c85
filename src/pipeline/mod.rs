//! Pipeline module - derives the chart tables from the loaded term records
//!
//! ```text
//!  .csv / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader  │  Dataset (read-only for the rest of the run)
//!   └──────────┘
//!        │
//!        ├── aggregate ── term_totals, yearly_satisfaction
//!        ├── select ───── retention_trend
//!        ├── melt ─────── department_enrollment
//!        ├── filter ───── term_comparison
//!        └── melt + union combined_metrics
//! ```

pub mod aggregate;
pub mod charts;
pub mod columns;
pub mod combine;
pub mod error;
pub mod filter;
pub mod loader;
pub mod reshape;

pub use aggregate::*;
pub use charts::*;
pub use combine::*;
pub use error::*;
pub use filter::*;
pub use loader::*;
pub use reshape::*;
