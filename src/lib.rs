pub mod encoding;
pub mod repository;
pub mod session;
pub mod shared;
pub mod source;
pub mod traffic;

pub mod prelude {
    pub use crate::encoding::{Encoding, FlowClass, SqrtScale, StationMarker, markers};
    pub use crate::repository::{Repository, Station, Trip};
    pub use crate::session::{Frame, Renderer, Session};
    pub use crate::shared::{Coordinate, MinuteOfDay, Project, ScreenPoint, TimeFilter, Viewport};
    pub use crate::source::SourceReader;
    pub use crate::traffic::{Buckets, MinuteBuckets, StationTraffic, Traffic, Window, aggregate};
}
