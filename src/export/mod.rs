pub mod job;
pub mod settings;

pub use job::ExportJob;
pub use settings::{Codec, ExportSettings, Format, Resolution};
