//! Request and response models

pub mod prediction;
pub mod batch;
pub mod model;

pub use prediction::*;
pub use batch::*;
pub use model::*;
