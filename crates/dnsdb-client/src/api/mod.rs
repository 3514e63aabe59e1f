//! API endpoint modules.

mod lookup;

pub use lookup::{LookupApi, RdataRequestBuilder, RrsetRequestBuilder};
