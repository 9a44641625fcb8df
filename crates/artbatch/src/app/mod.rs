//! Application layer orchestrating domain logic and infrastructure.

pub mod export;
pub mod naming;
pub mod options;
pub mod preflight;
pub mod report;
pub mod run;
