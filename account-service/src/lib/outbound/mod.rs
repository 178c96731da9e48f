pub mod challenge;
pub mod repositories;
