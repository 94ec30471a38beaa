//! Players: who decides the moves.
//!
//! - [`Human`]: surfaces its choices; an external caller picks one
//! - [`Automated`]: decides after a thinking delay, optimally when it is
//!   the overall winner and at random otherwise
//!
//! Automated decisions run as [`Deferred`] tasks on the current
//! `tokio::task::LocalSet`; cancelling one guarantees it never plays.

mod automated;
mod deferred;
mod human;
mod player;

pub use automated::Automated;
pub use deferred::Deferred;
pub use human::Human;
pub use player::{Player, PlayerKind};
