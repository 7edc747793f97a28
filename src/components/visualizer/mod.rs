mod component;
mod render;
mod timer;

pub use component::{Action, Binding, Field, input, visualizer};
