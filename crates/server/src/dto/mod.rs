mod marker;
mod station;

pub use marker::*;
pub use station::*;
