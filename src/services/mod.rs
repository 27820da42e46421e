pub mod ranking;
pub mod registration;
pub mod server;

pub use ranking::{RankingService, RankingSnapshot};
pub use registration::{
    AcceptContradictions, ContradictionGate, RegistrationOutcome, RegistrationService,
    RejectContradictions,
};
