pub mod dtos;
pub mod table;
pub mod triage;

pub use dtos::{AdminStats, BucketCount};
pub use table::{SortDirection, SortField, TableSort};
pub use triage::{AdminTriageView, ViewMode};
