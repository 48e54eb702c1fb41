//! # Overview
//! "devs_queue" models a single-clerk queue with the Discrete Event System
//! Specification (DEVS): a source releases customers on a predetermined
//! schedule, and a server lines them up and serves them one at a time, in
//! arrival order.
//!
//! This repository contains:
//!
//! * Input modeling, for loading fixed customer schedules or drawing
//! synthetic ones from random variable distributions.
//! * The source and server atomic models, with the DEVS time advance,
//! output, and internal, external, and confluent transitions.
//! * A simulator, for coupling the source to the server and executing the
//! simulation.
//! * Output analysis, for summarizing the departed customers.
//!
//! devs_queue is compatible with a wide variety of compilation targets,
//! including WASM.
pub mod input_modeling;
pub mod models;
pub mod output_analysis;
pub mod simulator;
pub mod utils;

pub use utils::errors::SimulationError;
