mod filter;
mod insight;

pub use filter::{build_filter, parse_number, FilterQuery, InsightFilter, NumericRange};
pub use insight::{normalize_record, nullable_number, nullable_text, Insight, InsightInsert};
