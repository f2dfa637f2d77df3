//! Effect system for facility and tech-card outcomes.
//!
//! - `Effect`: one atomic change (gain, spend, place colony, build ship, ...)
//! - `EffectBatch`: the effects of one rule invocation, for one player
//! - `EffectResolver`: applies a batch all-or-nothing
//!
//! Rules never mutate the match directly. They read the context, decide,
//! and hand back a batch; only the resolver writes.

mod effect;
mod resolver;

pub use effect::{Effect, EffectBatch};
pub use resolver::{EffectResolver, Resolution};
