pub mod log;
mod view;

pub use view::{ViewArgs, view};
