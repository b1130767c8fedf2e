pub mod algorithm;
pub mod boundary;
pub mod inverse_iteration;
