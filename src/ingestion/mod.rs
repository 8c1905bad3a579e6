//! Bulk CSV inventory ingestion.
//!
//! One uploaded CSV document becomes one atomic batch: rows are parsed into
//! normalized records, merged one at a time into the nested product/variant/
//! size tree, and the net per-size deltas are written to the upload ledger.
//! The whole batch commits once or not at all.

pub mod ledger;
pub mod merge;
pub mod parser;
pub mod pipeline;

pub use ledger::LedgerBuilder;
pub use merge::{merge_row, MergeOutcome};
pub use parser::{IdentityValues, NormalizedRow, RowReader};
pub use pipeline::{BulkUploadService, UploadReceipt};
