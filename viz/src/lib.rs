//! Terminal frontend for the gridstar pathfinding visualizer.
//!
//! Three layers: a pure model ([`app::App`]) that consumes
//! [`input::Action`]s and animation ticks, an input layer mapping
//! crossterm events to actions, and a screen layer that projects the
//! model onto the terminal.

pub mod app;
pub mod input;
pub mod screen;

pub use app::{App, Mark};
pub use input::{Action, action_for};
pub use screen::Screen;
