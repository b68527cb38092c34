pub mod catalog;
pub(crate) mod health;
pub mod support;

pub use health::health_check;
