//! treatment-merlin
//!
//! Client for the Merlin differential-diagnosis API, with an OpenAI chat
//! fallback when Merlin is unreachable or degraded.

pub mod client;
pub mod error;
pub mod fallback;
