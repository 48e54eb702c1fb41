use serde::{Deserialize, Serialize};

/// A customer is one service request.  The `Source` creates it from a
/// schedule entry, and the `Server` stamps it on entering and leaving the
/// line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: usize,
    pub service_duration: f64,
    #[serde(default)]
    pub enter_time: Option<f64>,
    #[serde(default)]
    pub leave_time: Option<f64>,
}

impl Customer {
    pub fn new(id: usize, service_duration: f64) -> Self {
        Self {
            id,
            service_duration,
            enter_time: None,
            leave_time: None,
        }
    }

    /// Time between joining and leaving the server's line.
    pub fn time_in_system(&self) -> Option<f64> {
        Some(self.leave_time? - self.enter_time?)
    }

    /// Time spent in line, excluding the customer's own service.
    pub fn waiting_time(&self) -> Option<f64> {
        Some(self.time_in_system()? - self.service_duration)
    }

    pub(crate) fn label(&self) -> String {
        format!["customer {}", self.id]
    }
}
