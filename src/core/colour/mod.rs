pub mod factory;
pub mod gradient;
pub mod gradients;
pub mod kinds;
pub mod logarithmic;
pub mod policy;

pub use kinds::GradientKind;
pub use policy::ColourPolicy;
