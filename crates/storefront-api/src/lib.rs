//! Presentation of query results: the scoring HTTP router and plain-text
//! rendering of commerce reports.

pub mod error;
pub mod http;
pub mod text;

pub use error::ApiError;
pub use http::{router, serve};
pub use text::{CommerceReport, render_scores, render_scores_html};
