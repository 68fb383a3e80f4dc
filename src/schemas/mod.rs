//! Request and response shapes for the HTTP layer.

pub mod envelope;
pub mod membership;
pub mod notification;
pub mod payment;
pub mod report;
pub mod task;
pub mod user;

pub use envelope::{ApiResponse, PageQuery, Pagination, SortOrder};
