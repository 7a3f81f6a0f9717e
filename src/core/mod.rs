pub mod advisory;
pub mod load_curve;
pub mod load_model;
pub mod units;
