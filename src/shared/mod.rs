pub mod geo;
pub mod time;

pub use geo::{Coordinate, Project, ScreenPoint, Viewport};
pub use time::*;
