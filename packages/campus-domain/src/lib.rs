pub mod corpus;
pub mod matching;
pub mod otp;
pub mod profile;
pub mod ranking;

pub use matching::MatchRequest;
pub use profile::UserRecord;
pub use ranking::{Candidate, RankedResult, rank};
