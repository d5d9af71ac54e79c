// Topic detection: label normalization, catalog matching, and resolution.

pub mod catalog;
pub mod fuzzy;
pub mod matcher;
pub mod normalize;
pub mod resolve;
pub mod subjects;
pub mod traits;
