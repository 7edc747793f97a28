//! Structure-agnostic step recording and playback.

pub mod console;
pub mod highlight;
pub mod ids;
pub mod mutator;
pub mod playback;
pub mod session;
pub mod step;
pub mod ticker;

pub use console::{ConsoleLevel, ConsoleLine, ConsoleLog};
pub use highlight::{HighlightState, Projector, StepProjector};
pub use ids::{CounterIds, ElementId, IdSource};
pub use mutator::{Arena, Mutation, Mutator};
pub use playback::{PlaybackController, PlaybackState, Speed, SpeedProfile};
pub use session::Session;
pub use step::{AuxView, Step, StepKind, StepRecorder, Steps};
pub use ticker::{Ticker, VirtualTicker};
