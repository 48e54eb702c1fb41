use super::{ModelMessage, ModelRecord, TimeAdvance};
use crate::utils::errors::SimulationError;

pub trait ModelClone {
    fn clone_box(&self) -> Box<dyn ReportableModel>;
}

impl<T> ModelClone for T
where
    T: 'static + ReportableModel + Clone,
{
    fn clone_box(&self) -> Box<dyn ReportableModel> {
        Box::new(self.clone())
    }
}

impl Clone for Box<dyn ReportableModel> {
    fn clone(&self) -> Box<dyn ReportableModel> {
        self.clone_box()
    }
}

pub trait SerializableModel {
    fn get_type(&self) -> &'static str {
        "Model"
    }
    fn serialize(&self) -> serde_yaml::Value {
        serde_yaml::Value::Null
    }
}

/// The `DevsModel` trait defines everything required for an atomic model
/// to operate within the discrete event simulation.  The simulator formalism
/// (Discrete Event System Specification) requires a time advance
/// (`until_next_event`), an output function (`events_output`), and the
/// internal, external, and confluent transitions (`events_int`,
/// `events_ext`, and `events_conf`).
///
/// The simulator calls `events_output` before `events_int` at the same
/// event, supplies the exact elapsed time since the model's last transition
/// to `events_ext`, and calls `events_conf` instead of the internal and
/// external transitions when both are due at the same instant.
pub trait DevsModel: ModelClone + SerializableModel {
    fn until_next_event(&self) -> TimeAdvance;
    fn events_output(&self) -> Result<Vec<ModelMessage>, SimulationError>;
    fn events_int(&mut self) -> Result<(), SimulationError>;
    fn events_ext(
        &mut self,
        elapsed: f64,
        incoming_messages: &[ModelMessage],
    ) -> Result<(), SimulationError>;

    /// The confluent transition applies the internal transition first, and
    /// then folds in the simultaneous input with zero elapsed time.
    fn events_conf(&mut self, incoming_messages: &[ModelMessage]) -> Result<(), SimulationError> {
        self.events_int()?;
        self.events_ext(0.0, incoming_messages)
    }

    /// Output garbage collection.  Messages own their customers, so
    /// releasing them is a drop.
    fn collect_output(&mut self, outgoing_messages: Vec<ModelMessage>) {
        drop(outgoing_messages);
    }
}

/// The additional status and record-keeping methods of `Reportable` provide
/// improved simulation reasoning, reporting, and debugging, but do not
/// impact simulation execution or results.
pub trait Reportable {
    fn status(&self) -> String;
    fn records(&self) -> &Vec<ModelRecord>;
}

/// A `ReportableModel` has the required Discrete Event System Specification
/// methods of trait `DevsModel` and the status reporting and record keeping
/// mechanisms of trait `Reportable`.
pub trait ReportableModel: DevsModel + Reportable {}

/// Rejects elapsed times the simulator should never supply.
pub(crate) fn check_elapsed(elapsed: f64) -> Result<(), SimulationError> {
    if elapsed.is_finite() && elapsed >= 0.0 {
        Ok(())
    } else {
        Err(SimulationError::ProtocolViolation(format![
            "elapsed time {} is negative or non-finite",
            elapsed
        ]))
    }
}
