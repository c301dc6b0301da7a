//! Public types for the Mimir API.

mod document;
mod problem;

pub use document::{Document, Operation, QueryRequest};
pub use problem::{
    DetailRecord, Difficulty, PROBLEM_URL_BASE, SolutionInfo, SummaryRecord, Tag, problem_url,
};
