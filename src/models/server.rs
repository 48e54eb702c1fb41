use std::collections::VecDeque;

use log::debug;
use serde::{Deserialize, Serialize};

use super::model_trait::{check_elapsed, DevsModel, Reportable, ReportableModel, SerializableModel};
use super::{Customer, ModelMessage, ModelRecord, TimeAdvance};
use crate::utils::errors::SimulationError;
use crate::utils::TIME_EPSILON;

use devs_queue_derive::SerializableModel;

/// The server is a single clerk with an unbounded line.  Arriving customers
/// join the back of the line, stamped with their entry time, and the
/// customer at the head of the line is the one being served.  Once the
/// head's service duration has elapsed, the customer departs, stamped with
/// the departure time, and the next customer in line begins service.
///
/// Service time keeps elapsing for the head of the line while new arrivals
/// are processed.  When a departure and arrivals coincide, the departure is
/// resolved first and the arrivals join behind.
#[derive(Debug, Clone, Serialize, Deserialize, SerializableModel)]
#[serde(rename_all = "camelCase")]
pub struct Server {
    #[serde(default)]
    ports_in: PortsIn,
    #[serde(default)]
    ports_out: PortsOut,
    #[serde(default)]
    store_records: bool,
    #[serde(default)]
    state: State,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PortsIn {
    arrive: String,
}

impl Default for PortsIn {
    fn default() -> Self {
        Self {
            arrive: String::from("arrive"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
enum ArrivalPort {
    Arrive,
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PortsOut {
    depart: String,
}

impl Default for PortsOut {
    fn default() -> Self {
        Self {
            depart: String::from("depart"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct State {
    local_time: f64,
    elapsed_on_head: f64,
    queue: VecDeque<Customer>,
    records: Vec<ModelRecord>,
}

impl Server {
    pub fn new(arrive_port: String, depart_port: String, store_records: bool) -> Self {
        Self {
            ports_in: PortsIn {
                arrive: arrive_port,
            },
            ports_out: PortsOut {
                depart: depart_port,
            },
            store_records,
            state: State::default(),
        }
    }

    pub fn local_time(&self) -> f64 {
        self.state.local_time
    }

    /// Service time already spent on the customer at the head of the line.
    pub fn elapsed_on_head(&self) -> f64 {
        self.state.elapsed_on_head
    }

    /// The line, head first.  The head is the customer in service.
    pub fn queue(&self) -> &VecDeque<Customer> {
        &self.state.queue
    }

    fn arrival_port(&self, message_port: &str) -> ArrivalPort {
        if message_port == self.ports_in.arrive {
            ArrivalPort::Arrive
        } else {
            ArrivalPort::Unknown
        }
    }

    /// Remaining service time of the head of the line, if any.
    fn remaining_service(&self) -> Option<f64> {
        self.state
            .queue
            .front()
            .map(|head| head.service_duration - self.state.elapsed_on_head)
    }

    fn enqueue(&mut self, customer: &Customer) {
        let mut customer = customer.clone();
        customer.enter_time = Some(self.state.local_time);
        customer.leave_time = None;
        self.record(self.state.local_time, String::from("Arrival"), customer.label());
        self.state.queue.push_back(customer);
    }

    fn summarize(&self, transition: &str) {
        debug!(
            "Server: {} transition at t = {}, {} customer(s) in line, next departure at t = {}",
            transition,
            self.state.local_time,
            self.state.queue.len(),
            self.state.local_time + self.until_next_event().to_f64()
        );
    }

    fn record(&mut self, time: f64, action: String, subject: String) {
        if self.store_records {
            self.state.records.push(ModelRecord {
                time,
                action,
                subject,
            });
        }
    }
}

impl DevsModel for Server {
    fn until_next_event(&self) -> TimeAdvance {
        match self.remaining_service() {
            // Service completion is never in the past
            Some(remaining) => TimeAdvance::Finite(remaining.max(0.0)),
            None => TimeAdvance::Infinite,
        }
    }

    fn events_output(&self) -> Result<Vec<ModelMessage>, SimulationError> {
        let remaining = self.remaining_service().ok_or_else(|| {
            SimulationError::InvariantViolation(String::from(
                "departure requested from a server with an empty line",
            ))
        })?;
        let mut departing = self.state.queue.front().cloned().ok_or_else(|| {
            SimulationError::InvariantViolation(String::from("the line has no head"))
        })?;
        departing.leave_time = Some(self.state.local_time + remaining.max(0.0));
        Ok(vec![ModelMessage {
            port_name: self.ports_out.depart.clone(),
            content: departing,
        }])
    }

    fn events_int(&mut self) -> Result<(), SimulationError> {
        let remaining = self.remaining_service().ok_or_else(|| {
            SimulationError::InvariantViolation(String::from(
                "internal transition of a server with an empty line",
            ))
        })?;
        self.state.local_time += remaining.max(0.0);
        self.state.elapsed_on_head = 0.0;
        let departed = self.state.queue.pop_front().ok_or_else(|| {
            SimulationError::InvariantViolation(String::from("the line has no head"))
        })?;
        self.record(
            self.state.local_time,
            String::from("Departure"),
            departed.label(),
        );
        if let Some(head) = self.state.queue.front() {
            let subject = head.label();
            self.record(
                self.state.local_time,
                String::from("Service Start"),
                subject,
            );
        }
        self.summarize("internal");
        Ok(())
    }

    fn events_ext(
        &mut self,
        elapsed: f64,
        incoming_messages: &[ModelMessage],
    ) -> Result<(), SimulationError> {
        check_elapsed(elapsed)?;
        if incoming_messages.iter().any(|incoming_message| {
            matches!(
                self.arrival_port(&incoming_message.port_name),
                ArrivalPort::Unknown
            )
        }) {
            return Err(SimulationError::PortNotFound);
        }
        if let Some(head) = self.state.queue.front() {
            let elapsed_on_head = self.state.elapsed_on_head + elapsed;
            if elapsed_on_head > head.service_duration + TIME_EPSILON {
                return Err(SimulationError::InvariantViolation(format![
                    "{} elapsed on customer {}, beyond its service duration {}",
                    elapsed_on_head, head.id, head.service_duration
                ]));
            }
            self.state.elapsed_on_head = elapsed_on_head.min(head.service_duration);
        }
        self.state.local_time += elapsed;
        incoming_messages.iter().for_each(|incoming_message| {
            let was_idle = self.state.queue.is_empty();
            self.enqueue(&incoming_message.content);
            if was_idle {
                self.record(
                    self.state.local_time,
                    String::from("Service Start"),
                    incoming_message.content.label(),
                );
            }
        });
        self.summarize("external");
        Ok(())
    }
}

impl Reportable for Server {
    fn status(&self) -> String {
        match self.state.queue.front() {
            Some(head) => format![
                "Serving customer {} ({} in line)",
                head.id,
                self.state.queue.len()
            ],
            None => String::from("Idle"),
        }
    }

    fn records(&self) -> &Vec<ModelRecord> {
        &self.state.records
    }
}

impl ReportableModel for Server {}
