//! Core pipeline: record model, filtering/sorting, pagination, aggregation,
//! and the one-shot profile fetch.

pub mod aggregate;
pub mod fetch;
pub mod logging;
pub mod model;
pub mod page;
pub mod view;
