//! Game session: the controller the presentation layer talks to.

pub mod logic;
pub mod registry;
pub mod types;

pub use logic::GameSession;
pub use registry::{SessionRegistry, SharedSession};
pub use types::*;
