//! Converts logs between the two on-disk formats.

mod error;
mod pipeline;
mod progress;

pub use error::ConvertError;
pub use pipeline::{ConvertSummary, convert_logs};
pub use progress::{BarProgress, ConvertProgress, NoProgress};
