//! Grid maze chase: a player eats pellets while random-walking adversaries
//! roam the maze. The crate is the tick engine; drawing, input and alerts are
//! supplied by the host through [`Snapshot`], [`Session::post_input`] and
//! [`Notifier`].

pub mod components;
pub mod config;
pub mod ghost;
pub mod level;
pub mod movement;
pub mod player;
pub mod session;

pub use components::{Adversary, Agent, Dir, Pos, Rgb};
pub use config::{AdversarySpawn, ConfigError, GameConfig};
pub use level::{init_map, Cell, Grid, PelletSet};
pub use session::{Notifier, Outcome, Session, Snapshot, TerminalEvent};
