pub mod classifier;
pub mod decision;
pub mod distance;
pub mod engine;
pub mod tracker;
