pub mod clip;
pub mod edit;
pub mod track;
#[allow(clippy::module_inception)]
pub mod timeline;
pub mod zoom;

pub use clip::{Clip, ClipSource};
pub use edit::EditActions;
pub use timeline::Timeline;
pub use track::{Track, TrackKind};
pub use zoom::{RulerMarker, Zoom};
