//! Result log persistence

mod json_result_store;

pub use json_result_store::JsonResultStore;
