mod alphabet;
mod deletion;
mod error;
mod generator;
mod substitution;
mod types;

pub use alphabet::*;
pub use deletion::*;
pub use error::*;
pub use generator::*;
pub use substitution::*;
pub use types::*;
