//! The simulator module provides the mechanics to drive a source and a
//! server through a discrete event simulation.  The specific formalism for
//! simulation execution is the Discrete Event System Specification.  The
//! simulator owns exactly one source, one server, and the connector between
//! them - it is the executive the two atomic models depend on, not a general
//! purpose coordinator for networks of models.
//!
//! `Simulation` and `WebSimulation` are used for Rust- and npm-based
//! projects, respectively.  The `Simulation` methods use the associated
//! struct types directly, while the `WebSimulation` provides an interface
//! with better JS/WASM compatibility.
//!
//! Each simulation step follows the two-phase DEVS protocol.  Outputs are
//! collected from every imminent model first, then routed through the
//! connector, and only then are the transitions applied.  The `step`,
//! `step_n`, `step_until`, and `run` methods return the messages generated
//! during the execution of the simulation step(s), for use in analysis.

use std::convert::TryFrom;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::input_modeling::Schedule;
use crate::models::{
    Customer, DevsModel, Model, ModelMessage, ModelRecord, Reportable, Server, Source,
    TimeAdvance,
};
use crate::utils::errors::SimulationError;
use crate::utils::{equivalent_f64, set_panic_hook};

pub mod coupling;
pub mod web;

pub use self::coupling::{Connector, Message};
pub use self::web::Simulation as WebSimulation;

/// The `Simulation` struct is the executive of devs_queue, and includes
/// everything needed to run a simulation - the source and server models and
/// the connector between them.  State information, specifically global
/// time, the time of each model's last transition, and the departed
/// customers are additionally retained in the struct.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "SimulationRepr")]
pub struct Simulation {
    source: Model,
    server: Model,
    connector: Connector,
    global_time: f64,
    last_events: LastEvents,
    departures: Vec<Customer>,
}

/// Simulation time of each model's most recent transition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LastEvents {
    source: f64,
    server: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SimulationRepr {
    source: Model,
    server: Model,
    connector: Connector,
    #[serde(default)]
    global_time: f64,
    #[serde(default)]
    last_events: LastEvents,
    #[serde(default)]
    departures: Vec<Customer>,
}

impl TryFrom<SimulationRepr> for Simulation {
    type Error = SimulationError;

    fn try_from(repr: SimulationRepr) -> Result<Self, Self::Error> {
        let mut simulation = Self::post(repr.source, repr.server, repr.connector)?;
        simulation.global_time = repr.global_time;
        simulation.last_events = repr.last_events;
        simulation.departures = repr.departures;
        Ok(simulation)
    }
}

impl Simulation {
    /// This constructor method creates a simulation from a supplied
    /// configuration (source, server, and the connector between them).
    pub fn post(source: Model, server: Model, connector: Connector) -> Result<Self, SimulationError> {
        set_panic_hook();
        if connector.source_id() != source.id() || connector.target_id() != server.id() {
            return Err(SimulationError::ModelNotFound);
        }
        Ok(Self {
            source,
            server,
            connector,
            global_time: 0.0,
            last_events: LastEvents::default(),
            departures: Vec::new(),
        })
    }

    /// This constructor method couples a `Source` releasing the supplied
    /// schedule to a `Server`, as models `source-01` and `server-01`,
    /// through their `arrive` ports.
    pub fn from_schedule(schedule: Schedule, store_records: bool) -> Self {
        set_panic_hook();
        Self {
            source: Model::new(
                String::from("source-01"),
                Box::new(Source::new(schedule, String::from("arrive"), store_records)),
            ),
            server: Model::new(
                String::from("server-01"),
                Box::new(Server::new(
                    String::from("arrive"),
                    String::from("depart"),
                    store_records,
                )),
            ),
            connector: Connector::new(
                String::from("connector-01"),
                String::from("source-01"),
                String::from("server-01"),
                String::from("arrive"),
                String::from("arrive"),
            ),
            global_time: 0.0,
            last_events: LastEvents::default(),
            departures: Vec::new(),
        }
    }

    /// An accessor method for the simulation global time.
    pub fn get_global_time(&self) -> f64 {
        self.global_time
    }

    /// Every customer that has departed the server so far, in departure
    /// order, stamped with its entry and departure times.
    pub fn departures(&self) -> &[Customer] {
        &self.departures
    }

    fn model(&self, model_id: &str) -> Result<&Model, SimulationError> {
        [&self.source, &self.server]
            .iter()
            .find(|model| model.id() == model_id)
            .copied()
            .ok_or(SimulationError::ModelNotFound)
    }

    /// This method provides a mechanism for getting the status of either
    /// model in a simulation.  The method takes the model ID as an argument,
    /// and returns the current status string for that model.
    pub fn get_status(&self, model_id: &str) -> Result<String, SimulationError> {
        Ok(self.model(model_id)?.status())
    }

    /// This method provides a mechanism for getting the records of either
    /// model in a simulation.  The method takes the model ID as an argument,
    /// and returns the records for that model.
    pub fn get_records(&self, model_id: &str) -> Result<&Vec<ModelRecord>, SimulationError> {
        Ok(self.model(model_id)?.records())
    }

    /// The simulation time of the next event, or `None` once both models are
    /// passive.
    pub fn next_event_time(&self) -> Option<f64> {
        let source_next = self.source_next_event();
        let server_next = self.server_next_event();
        source_next.min(server_next).as_finite()
    }

    /// Absolute time of the source's next internal event.
    fn source_next_event(&self) -> TimeAdvance {
        match self.source.until_next_event() {
            TimeAdvance::Finite(delay) => TimeAdvance::Finite(self.last_events.source + delay),
            TimeAdvance::Infinite => TimeAdvance::Infinite,
        }
    }

    /// Absolute time of the server's next internal event.
    fn server_next_event(&self) -> TimeAdvance {
        match self.server.until_next_event() {
            TimeAdvance::Finite(delay) => TimeAdvance::Finite(self.last_events.server + delay),
            TimeAdvance::Infinite => TimeAdvance::Infinite,
        }
    }

    /// The simulation step is foundational for a discrete event simulation.
    /// This method executes a single discrete event simulation step,
    /// including output collection, message routing, internal, external,
    /// and confluent state transitions, output garbage collection, global
    /// time accounting, and step messages output.  Once both models are
    /// passive, a step does nothing and returns no messages.
    pub fn step(&mut self) -> Result<Vec<Message>, SimulationError> {
        let time = match self.next_event_time() {
            Some(time) => time,
            None => return Ok(Vec::new()),
        };
        let source_imminent = self
            .source_next_event()
            .as_finite()
            .map_or(false, |next| equivalent_f64(next, time));
        let server_imminent = self
            .server_next_event()
            .as_finite()
            .map_or(false, |next| equivalent_f64(next, time));
        trace!(
            "Simulation: step at t = {} (source imminent: {}, server imminent: {})",
            time,
            source_imminent,
            server_imminent
        );
        // Outputs are computed before any transition is applied
        let source_outputs = if source_imminent {
            self.source.events_output()?
        } else {
            Vec::new()
        };
        let server_outputs = if server_imminent {
            self.server.events_output()?
        } else {
            Vec::new()
        };
        // Every arrival must leave through the connected port
        if source_outputs
            .iter()
            .any(|outgoing_message| outgoing_message.port_name != self.connector.source_port())
        {
            return Err(SimulationError::PortNotFound);
        }
        let server_inputs: Vec<ModelMessage> = source_outputs
            .iter()
            .map(|outgoing_message| ModelMessage {
                port_name: self.connector.target_port().to_string(),
                content: outgoing_message.content.clone(),
            })
            .collect();
        if source_imminent {
            self.source.events_int()?;
            self.last_events.source = time;
        }
        match (server_imminent, server_inputs.is_empty()) {
            (true, true) => self.server.events_int()?,
            (true, false) => self.server.events_conf(&server_inputs)?,
            (false, false) => {
                let elapsed = (time - self.last_events.server).max(0.0);
                self.server.events_ext(elapsed, &server_inputs)?
            }
            (false, true) => {}
        }
        if server_imminent || !server_inputs.is_empty() {
            self.last_events.server = time;
        }
        self.global_time = time;
        let messages = self.messages(time, &source_outputs, &server_outputs);
        self.departures.extend(
            server_outputs
                .iter()
                .map(|outgoing_message| outgoing_message.content.clone()),
        );
        self.source.collect_output(source_outputs);
        self.server.collect_output(server_outputs);
        Ok(messages)
    }

    fn messages(
        &self,
        time: f64,
        source_outputs: &[ModelMessage],
        server_outputs: &[ModelMessage],
    ) -> Vec<Message> {
        let routed = source_outputs.iter().map(|outgoing_message| {
            Message::new(
                self.source.id().to_string(),
                outgoing_message.port_name.clone(),
                Some((
                    self.connector.target_id().to_string(),
                    self.connector.target_port().to_string(),
                )),
                time,
                outgoing_message.content.clone(),
            )
        });
        let departed = server_outputs.iter().map(|outgoing_message| {
            Message::new(
                self.server.id().to_string(),
                outgoing_message.port_name.clone(),
                None,
                time,
                outgoing_message.content.clone(),
            )
        });
        routed.chain(departed).collect()
    }

    /// This method executes the specified number of simulation steps, `n`.
    /// Upon execution of the n steps, the messages from all the steps are
    /// returned.
    pub fn step_n(&mut self, n: usize) -> Result<Vec<Message>, SimulationError> {
        let mut message_records: Vec<Message> = Vec::new();
        for _ in 0..n {
            message_records.extend(self.step()?);
        }
        Ok(message_records)
    }

    /// This method executes simulation `step` calls, until the next event
    /// would occur after `until`.  Events scheduled exactly at `until` are
    /// executed.  The messages from all the simulation steps are returned.
    pub fn step_until(&mut self, until: f64) -> Result<Vec<Message>, SimulationError> {
        let mut message_records: Vec<Message> = Vec::new();
        while let Some(next_event_time) = self.next_event_time() {
            if next_event_time > until {
                break;
            }
            message_records.extend(self.step()?);
        }
        Ok(message_records)
    }

    /// This method executes simulation `step` calls until both models are
    /// passive - the schedule is exhausted and the line is empty.
    pub fn run(&mut self) -> Result<Vec<Message>, SimulationError> {
        self.step_until(f64::INFINITY)
    }
}
