//! The input modeling module provides the customer schedules that drive a
//! simulation.  Schedules are either loaded from a fixed list of arrivals
//! (text, YAML, or JSON) or drawn from random variable distributions, with
//! a seeded random number generator for reproducibility.

pub mod random_variable;
pub mod schedule;
pub mod uniform_rng;

pub use random_variable::Continuous as ContinuousRandomVariable;
pub use schedule::{Schedule, ScheduleEntry};
pub use uniform_rng::UniformRNG;
