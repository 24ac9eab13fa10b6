// rust/engine/src/policy/mod.rs
#![forbid(unsafe_code)]

mod base;
mod random;
mod wall_follower;

/**
 * Curated policy public API.
 *
 * Policies are rollout drivers for diagnostics, benches and tests; they only see the
 * world through the same action/sensor vocabulary an interpreter would use.
 */
pub use base::Policy;
pub use random::RandomPolicy;
pub use wall_follower::WallFollowerPolicy;
