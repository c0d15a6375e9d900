//! Damaged Box Common Library
//!
//! Record model, filtering and report building shared by the CLI.
//! Nothing in here performs network or file I/O.

pub mod types;
pub mod layout;
pub mod filter;
pub mod highlight;
pub mod badge;
pub mod error;
pub mod export;

pub use types::{DamagedBox, ImageSlot};
pub use filter::{apply_filter, count_by_issue_type, issue_type_counts, FilterCriteria, Summary};
pub use highlight::{highlight, Segment};
pub use badge::IssueBadge;
pub use error::{Error, Result};
