//! A schedule is the predetermined, ordered list of customers a `Source`
//! releases.  Each entry pairs the delay since the previous arrival with the
//! service duration the customer will need once it reaches the clerk.
//!
//! Schedules are validated when they are built, so the atomic models never
//! observe a negative or non-finite duration.

use std::convert::TryFrom;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{ContinuousRandomVariable, UniformRNG};
use crate::utils::errors::SimulationError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    pub interarrival: f64,
    pub service_duration: f64,
}

impl ScheduleEntry {
    fn validate(&self, index: usize) -> Result<(), SimulationError> {
        if !self.interarrival.is_finite() || self.interarrival < 0.0 {
            return Err(SimulationError::InvalidSchedule {
                index,
                reason: format!["interarrival time {} is not a non-negative number", self.interarrival],
            });
        }
        if !self.service_duration.is_finite() || self.service_duration < 0.0 {
            return Err(SimulationError::InvalidSchedule {
                index,
                reason: format![
                    "service duration {} is not a non-negative number",
                    self.service_duration
                ],
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ScheduleEntry>", into = "Vec<ScheduleEntry>")]
pub struct Schedule {
    entries: Vec<ScheduleEntry>,
}

impl Schedule {
    /// Builds a schedule from absolute arrival times, each paired with a
    /// service duration.  Arrival times must be non-decreasing; the first
    /// delay is measured from time 0.
    pub fn from_arrivals(arrivals: &[(f64, f64)]) -> Result<Self, SimulationError> {
        let mut last_arrival_time = 0.0;
        let entries = arrivals
            .iter()
            .enumerate()
            .map(|(index, (arrival_time, service_duration))| {
                if !arrival_time.is_finite() || *arrival_time < last_arrival_time {
                    return Err(SimulationError::InvalidSchedule {
                        index,
                        reason: format![
                            "arrival time {} precedes the previous arrival at {}",
                            arrival_time, last_arrival_time
                        ],
                    });
                }
                let entry = ScheduleEntry {
                    interarrival: arrival_time - last_arrival_time,
                    service_duration: *service_duration,
                };
                last_arrival_time = *arrival_time;
                Ok(entry)
            })
            .collect::<Result<Vec<ScheduleEntry>, SimulationError>>()?;
        Self::try_from(entries)
    }

    /// Draws a synthetic schedule of `count` customers, with interarrival
    /// and service times from the supplied random variables.
    pub fn sample(
        count: usize,
        interarrival: &mut ContinuousRandomVariable,
        service_duration: &mut ContinuousRandomVariable,
        uniform_rng: &mut UniformRNG,
    ) -> Result<Self, SimulationError> {
        let entries = (0..count)
            .map(|_| -> Result<ScheduleEntry, SimulationError> {
                Ok(ScheduleEntry {
                    interarrival: interarrival.random_variate(uniform_rng)?,
                    service_duration: service_duration.random_variate(uniform_rng)?,
                })
            })
            .collect::<Result<Vec<ScheduleEntry>, SimulationError>>()?;
        Self::try_from(entries)
    }

    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<Vec<ScheduleEntry>> for Schedule {
    type Error = SimulationError;

    fn try_from(entries: Vec<ScheduleEntry>) -> Result<Self, Self::Error> {
        entries
            .iter()
            .enumerate()
            .try_for_each(|(index, entry)| entry.validate(index))?;
        Ok(Self { entries })
    }
}

impl From<Schedule> for Vec<ScheduleEntry> {
    fn from(schedule: Schedule) -> Self {
        schedule.entries
    }
}

/// Parses whitespace separated `arrival_time service_duration` pairs, with
/// absolute arrival times.
impl FromStr for Schedule {
    type Err = SimulationError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let numbers = text
            .split_whitespace()
            .enumerate()
            .map(|(position, token)| {
                token
                    .parse::<f64>()
                    .map_err(|_| SimulationError::InvalidSchedule {
                        index: position / 2,
                        reason: format!["'{}' is not a number", token],
                    })
            })
            .collect::<Result<Vec<f64>, SimulationError>>()?;
        if numbers.len() % 2 != 0 {
            return Err(SimulationError::InvalidSchedule {
                index: numbers.len() / 2,
                reason: String::from("missing service duration"),
            });
        }
        let arrivals: Vec<(f64, f64)> = numbers
            .chunks(2)
            .map(|pair| (pair[0], pair[1]))
            .collect();
        Self::from_arrivals(&arrivals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_arrivals_become_delays() {
        let schedule = Schedule::from_arrivals(&[(1.0, 1.0), (2.0, 8.0), (3.0, 2.0), (5.0, 1.0)])
            .unwrap();
        let delays: Vec<f64> = schedule.entries().iter().map(|e| e.interarrival).collect();
        assert_eq!(delays, vec![1.0, 1.0, 1.0, 2.0]);
    }

    #[test]
    fn parses_schedule_text() {
        let schedule: Schedule = "1 1\n2 8\n3 2\n5 1\n7 4\n".parse().unwrap();
        assert_eq!(schedule.len(), 5);
        assert_eq!(schedule.entries()[1].service_duration, 8.0);
        assert_eq!(schedule.entries()[4].interarrival, 2.0);
    }

    #[test]
    fn empty_text_is_an_empty_schedule() {
        let schedule: Schedule = "  \n".parse().unwrap();
        assert!(schedule.is_empty());
    }

    #[test]
    fn rejects_malformed_text() {
        assert!(matches!(
            "1 1 2".parse::<Schedule>(),
            Err(SimulationError::InvalidSchedule { index: 1, .. })
        ));
        assert!(matches!(
            "1 x".parse::<Schedule>(),
            Err(SimulationError::InvalidSchedule { index: 0, .. })
        ));
    }

    #[test]
    fn rejects_decreasing_arrivals() {
        assert!(matches!(
            Schedule::from_arrivals(&[(3.0, 1.0), (2.0, 1.0)]),
            Err(SimulationError::InvalidSchedule { index: 1, .. })
        ));
    }

    #[test]
    fn rejects_negative_and_non_finite_durations() {
        assert!(matches!(
            Schedule::from_arrivals(&[(0.0, -1.0)]),
            Err(SimulationError::InvalidSchedule { index: 0, .. })
        ));
        assert!(Schedule::try_from(vec![ScheduleEntry {
            interarrival: f64::NAN,
            service_duration: 1.0,
        }])
        .is_err());
        assert!(Schedule::from_arrivals(&[(f64::INFINITY, 1.0)]).is_err());
    }

    #[test]
    fn deserialization_validates_entries() {
        let valid: Schedule =
            serde_yaml::from_str("- interarrival: 0.0\n  serviceDuration: 5.0\n").unwrap();
        assert_eq!(valid.len(), 1);
        let invalid = serde_yaml::from_str::<Schedule>(
            "- interarrival: -1.0\n  serviceDuration: 5.0\n",
        );
        assert!(invalid.is_err());
    }

    #[test]
    fn sampled_schedules_are_reproducible() {
        let draw = || {
            Schedule::sample(
                20,
                &mut ContinuousRandomVariable::Exp { lambda: 0.5 },
                &mut ContinuousRandomVariable::Uniform { min: 1.0, max: 3.0 },
                &mut UniformRNG::new(11),
            )
            .unwrap()
        };
        let schedule = draw();
        assert_eq!(schedule.len(), 20);
        assert_eq!(schedule, draw());
        assert!(schedule
            .entries()
            .iter()
            .all(|entry| entry.service_duration >= 1.0 && entry.service_duration < 3.0));
    }

    #[test]
    fn negative_draws_are_rejected() {
        let schedule = Schedule::sample(
            5,
            &mut ContinuousRandomVariable::Constant { value: -1.0 },
            &mut ContinuousRandomVariable::Constant { value: 1.0 },
            &mut UniformRNG::default(),
        );
        assert!(schedule.is_err());
    }
}
