mod error;
mod query;
mod store;

pub use error::{Result, StoreError};
pub use query::{
    GroupKey, GroupOrder, GroupSummary, GroupValue, HeatmapCell, ScatterPoint, TextField,
};
pub use store::InsightStore;
