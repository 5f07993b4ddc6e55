pub mod bus;
pub mod clock;
pub mod driver;
pub mod state;

pub use bus::{BusEvent, Origin, SignalBus};
pub use clock::PlaybackClock;
pub use driver::PlaybackDriver;
pub use state::PlaybackState;
