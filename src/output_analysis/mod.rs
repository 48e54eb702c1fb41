//! The output analysis module summarizes the customers that departed the
//! server.  Departure records carry both the entry and departure stamps, so
//! time in system and waiting time follow directly from them.

use num_traits::Float;
use serde::{Deserialize, Serialize};

use crate::models::Customer;
use crate::utils::errors::SimulationError;
use crate::utils::TIME_EPSILON;

fn sum<T: Float>(points: &[T]) -> T
where
    f64: Into<T>,
{
    points.iter().fold(0.0.into(), |sum, point| sum + *point)
}

/// This function calculates the sample mean from a set of points - a simple
/// arithmetic mean.
fn sample_mean<T: Float>(points: &[T]) -> Result<T, SimulationError>
where
    f64: Into<T>,
{
    Ok(sum(points) / usize_to_float(points.len())?)
}

/// This function calculates sample variance, given a set of points and the
/// sample mean.
fn sample_variance<T: Float>(points: &[T], mean: &T) -> Result<T, SimulationError>
where
    f64: Into<T>,
{
    Ok(points
        .iter()
        .fold(0.0.into(), |acc, point| acc + (*point - *mean).powi(2))
        / usize_to_float(points.len())?)
}

/// This function converts a usize to a Float, with an associated
/// `SimulationError` returned for failed conversions
fn usize_to_float<T: Float>(unconv: usize) -> Result<T, SimulationError> {
    T::from(unconv).ok_or(SimulationError::FloatConvError)
}

/// Summary statistics over departed customers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartureSummary {
    count: usize,
    mean_time_in_system: f64,
    time_in_system_variance: f64,
    max_time_in_system: f64,
    mean_waiting_time: f64,
    no_wait_fraction: f64,
}

impl DepartureSummary {
    /// Summarizes departed customers.  Every customer must carry both its
    /// entry and departure stamps.
    pub fn post(departures: &[Customer]) -> Result<Self, SimulationError> {
        if departures.is_empty() {
            return Err(SimulationError::InvalidModelState);
        }
        let times_in_system = departures
            .iter()
            .map(|customer| customer.time_in_system())
            .collect::<Option<Vec<f64>>>()
            .ok_or(SimulationError::InvalidModelState)?;
        let waiting_times: Vec<f64> = departures
            .iter()
            .zip(times_in_system.iter())
            .map(|(customer, time_in_system)| time_in_system - customer.service_duration)
            .collect();
        let mean_time_in_system = sample_mean(&times_in_system)?;
        let no_waits = waiting_times
            .iter()
            .filter(|waiting_time| **waiting_time <= TIME_EPSILON)
            .count();
        Ok(Self {
            count: departures.len(),
            mean_time_in_system,
            time_in_system_variance: sample_variance(&times_in_system, &mean_time_in_system)?,
            max_time_in_system: times_in_system.iter().copied().fold(0.0, f64::max),
            mean_waiting_time: sample_mean(&waiting_times)?,
            no_wait_fraction: usize_to_float::<f64>(no_waits)?
                / usize_to_float::<f64>(departures.len())?,
        })
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn mean_time_in_system(&self) -> f64 {
        self.mean_time_in_system
    }

    pub fn time_in_system_variance(&self) -> f64 {
        self.time_in_system_variance
    }

    pub fn max_time_in_system(&self) -> f64 {
        self.max_time_in_system
    }

    pub fn mean_waiting_time(&self) -> f64 {
        self.mean_waiting_time
    }

    /// Fraction of customers served on arrival, without waiting in line.
    pub fn no_wait_fraction(&self) -> f64 {
        self.no_wait_fraction
    }
}
