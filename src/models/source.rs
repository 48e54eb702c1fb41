use log::debug;
use serde::{Deserialize, Serialize};

use super::model_trait::{check_elapsed, DevsModel, Reportable, ReportableModel, SerializableModel};
use super::{Customer, ModelMessage, ModelRecord, TimeAdvance};
use crate::input_modeling::{Schedule, ScheduleEntry};
use crate::utils::errors::SimulationError;
use crate::utils::TIME_EPSILON;

use devs_queue_derive::SerializableModel;

/// The source releases customers according to a predetermined schedule.
/// Each schedule entry is released after its interarrival delay, measured
/// from the previous release, as a customer with the entry's service
/// duration.  The source has no input ports.  Any input is ignored, and
/// only the elapsed time is counted toward the pending release.  The source
/// becomes permanently passive once the schedule is exhausted.
#[derive(Debug, Clone, Serialize, Deserialize, SerializableModel)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    schedule: Schedule,
    #[serde(default)]
    ports_out: PortsOut,
    #[serde(default)]
    store_records: bool,
    #[serde(default)]
    state: State,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PortsOut {
    arrive: String,
}

impl Default for PortsOut {
    fn default() -> Self {
        Self {
            arrive: String::from("arrive"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct State {
    local_time: f64,
    // Index of the schedule entry released next
    next_customer: usize,
    // Time already waited toward the next release
    elapsed_toward_release: f64,
    records: Vec<ModelRecord>,
}

impl Source {
    pub fn new(schedule: Schedule, arrive_port: String, store_records: bool) -> Self {
        Self {
            schedule,
            ports_out: PortsOut {
                arrive: arrive_port,
            },
            store_records,
            state: State::default(),
        }
    }

    pub fn local_time(&self) -> f64 {
        self.state.local_time
    }

    /// Number of customers not yet released.
    pub fn remaining(&self) -> usize {
        self.schedule.len().saturating_sub(self.state.next_customer)
    }

    fn next_entry(&self) -> Option<&ScheduleEntry> {
        self.schedule.entries().get(self.state.next_customer)
    }

    fn until_release(&self) -> Option<f64> {
        self.next_entry()
            .map(|entry| (entry.interarrival - self.state.elapsed_toward_release).max(0.0))
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

impl DevsModel for Source {
    fn until_next_event(&self) -> TimeAdvance {
        match self.until_release() {
            Some(delay) => TimeAdvance::Finite(delay),
            None => TimeAdvance::Infinite,
        }
    }

    fn events_output(&self) -> Result<Vec<ModelMessage>, SimulationError> {
        let entry = self.next_entry().ok_or_else(|| {
            SimulationError::ProtocolViolation(String::from(
                "output requested from a source with an exhausted schedule",
            ))
        })?;
        // Customer ids are 1-based arrival indices
        Ok(vec![ModelMessage {
            port_name: self.ports_out.arrive.clone(),
            content: Customer::new(self.state.next_customer + 1, entry.service_duration),
        }])
    }

    fn events_int(&mut self) -> Result<(), SimulationError> {
        let until_release = self.until_release().ok_or_else(|| {
            SimulationError::ProtocolViolation(String::from(
                "internal transition of a source with an exhausted schedule",
            ))
        })?;
        self.state.local_time += until_release;
        self.state.elapsed_toward_release = 0.0;
        self.state.next_customer += 1;
        debug!(
            "Source: released customer {} at t = {}, {} remaining",
            self.state.next_customer,
            self.state.local_time,
            self.remaining()
        );
        self.record(
            self.state.local_time,
            String::from("Arrival"),
            format!["customer {}", self.state.next_customer],
        );
        Ok(())
    }

    fn events_ext(
        &mut self,
        elapsed: f64,
        incoming_messages: &[ModelMessage],
    ) -> Result<(), SimulationError> {
        check_elapsed(elapsed)?;
        if !incoming_messages.is_empty() {
            debug!(
                "Source: ignored {} input message(s) at t = {}",
                incoming_messages.len(),
                self.state.local_time + elapsed
            );
        }
        if let Some(until_release) = self.until_release() {
            if elapsed > until_release + TIME_EPSILON {
                return Err(SimulationError::ProtocolViolation(format![
                    "elapsed time {} passes the next release, due in {}",
                    elapsed, until_release
                ]));
            }
            self.state.elapsed_toward_release += elapsed;
        }
        self.state.local_time += elapsed;
        Ok(())
    }
}

impl Reportable for Source {
    fn status(&self) -> String {
        match self.remaining() {
            0 => String::from("Passive"),
            remaining => format!["Generating arrivals ({} remaining)", remaining],
        }
    }

    fn records(&self) -> &Vec<ModelRecord> {
        &self.state.records
    }
}

impl ReportableModel for Source {}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(arrivals: &[(f64, f64)]) -> Source {
        Source::new(
            Schedule::from_arrivals(arrivals).unwrap(),
            String::from("arrive"),
            true,
        )
    }

    #[test]
    fn releases_customers_in_schedule_order() {
        let mut source = source(&[(1.0, 4.0), (3.0, 2.0)]);
        assert_eq!(source.until_next_event(), TimeAdvance::Finite(1.0));
        let released = source.events_output().unwrap();
        assert_eq!(released.len(), 1);
        assert_eq!(released[0].port_name, "arrive");
        assert_eq!(released[0].content, Customer::new(1, 4.0));
        source.events_int().unwrap();
        assert_eq!(source.local_time(), 1.0);

        assert_eq!(source.until_next_event(), TimeAdvance::Finite(2.0));
        assert_eq!(source.events_output().unwrap()[0].content, Customer::new(2, 2.0));
        source.events_int().unwrap();
        assert_eq!(source.local_time(), 3.0);
        assert!(source.until_next_event().is_infinite());
        assert_eq!(source.status(), "Passive");
        assert_eq!(source.records().len(), 2);
    }

    #[test]
    fn empty_schedule_is_passive_from_the_start() {
        let mut source = source(&[]);
        assert!(source.until_next_event().is_infinite());
        assert!(matches!(
            source.events_output(),
            Err(SimulationError::ProtocolViolation(_))
        ));
        assert!(matches!(
            source.events_int(),
            Err(SimulationError::ProtocolViolation(_))
        ));
    }

    #[test]
    fn input_is_ignored_without_shifting_releases() {
        let mut source = source(&[(3.0, 1.0)]);
        let stray = ModelMessage {
            port_name: String::from("arrive"),
            content: Customer::new(7, 1.0),
        };
        source.events_ext(1.0, &[stray]).unwrap();
        assert_eq!(source.until_next_event(), TimeAdvance::Finite(2.0));
        assert_eq!(source.local_time(), 1.0);
        assert!(matches!(
            source.events_ext(2.5, &[]),
            Err(SimulationError::ProtocolViolation(_))
        ));
    }

    #[test]
    fn simultaneous_releases_have_zero_delay() {
        let mut source = source(&[(2.0, 1.0), (2.0, 1.0)]);
        source.events_int().unwrap();
        assert_eq!(source.until_next_event(), TimeAdvance::Finite(0.0));
        assert_eq!(source.status(), "Generating arrivals (1 remaining)");
    }

    #[test]
    fn confluent_transition_is_an_internal_transition() {
        let mut confluent = source(&[(1.0, 1.0), (4.0, 1.0)]);
        let mut internal = confluent.clone();
        confluent.events_conf(&[]).unwrap();
        internal.events_int().unwrap();
        assert_eq!(confluent.local_time(), internal.local_time());
        assert_eq!(confluent.until_next_event(), internal.until_next_event());
        assert_eq!(
            confluent.events_output().unwrap(),
            internal.events_output().unwrap()
        );
    }

    #[test]
    fn deserializes_from_configuration() {
        let source: Source = serde_yaml::from_str(
            r#"
schedule:
  - interarrival: 0.5
    serviceDuration: 2.0
portsOut:
  arrive: customer
"#,
        )
        .unwrap();
        assert_eq!(source.remaining(), 1);
        assert_eq!(source.events_output().unwrap()[0].port_name, "customer");
    }
}
