mod buckets;
mod rollup;
mod window;

pub use buckets::*;
pub use rollup::*;
pub use window::*;
