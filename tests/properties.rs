//! Property tests for metaform.
//!
//! Properties use randomized input generation to explore edge cases and
//! protect invariants like "never duplicates" and "round-trips".
//!
//! Run with: `cargo test --test properties`

#[path = "properties/component_set.rs"]
mod component_set;

#[path = "properties/ignore.rs"]
mod ignore;

#[path = "properties/round_trip.rs"]
mod round_trip;
