//! Game rules: legality, combat and termination.

pub mod combat;
pub mod legality;
pub mod termination;

pub use combat::resolve_combat;
pub use legality::check_destination;
pub use termination::check_winner;
