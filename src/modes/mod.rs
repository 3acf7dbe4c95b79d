pub mod human;
pub mod round;

pub use human::HumanMode;
pub use round::{EndReason, Round, RoundConfig, RoundPhase, Speed, TrailParticle};
