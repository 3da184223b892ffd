pub mod fixtures;

pub use fixtures::{cca_sample, synthetic_survival};
