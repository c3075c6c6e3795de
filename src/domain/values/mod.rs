pub mod embedding;
pub mod interest_set;
pub mod similarity;
