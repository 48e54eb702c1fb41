use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::model_trait::{DevsModel, Reportable, ReportableModel, SerializableModel};
use super::{ModelMessage, ModelRecord, TimeAdvance};
use crate::utils::errors::SimulationError;

/// `Model` wraps an atomic model and provides common ID functionality (a
/// struct field and associated accessor method).  The simulator requires
/// all models to have an ID.
#[derive(Clone)]
pub struct Model {
    id: String,
    inner: Box<dyn ReportableModel>,
}

impl Model {
    pub fn new(id: String, inner: Box<dyn ReportableModel>) -> Self {
        Self { id, inner }
    }

    pub fn id(&self) -> &str {
        self.id.as_str()
    }
}

impl Serialize for Model {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let extra_fields: serde_yaml::Value = self.inner.serialize();
        let mut model = serializer.serialize_map(None)?;
        model.serialize_entry("id", &self.id)?;
        model.serialize_entry("type", self.inner.get_type())?;
        if let serde_yaml::Value::Mapping(map) = extra_fields {
            for (key, value) in map.iter() {
                model.serialize_entry(&key, &value)?;
            }
        }
        model.end()
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let model_repr = super::ModelRepr::deserialize(deserializer)?;
        let concrete_model =
            super::model_factory::create::<D>(&model_repr.model_type[..], model_repr.extra)?;
        Ok(Model::new(model_repr.id, concrete_model))
    }
}

impl SerializableModel for Model {}

impl DevsModel for Model {
    fn until_next_event(&self) -> TimeAdvance {
        self.inner.until_next_event()
    }

    fn events_output(&self) -> Result<Vec<ModelMessage>, SimulationError> {
        self.inner.events_output()
    }

    fn events_int(&mut self) -> Result<(), SimulationError> {
        self.inner.events_int()
    }

    fn events_ext(
        &mut self,
        elapsed: f64,
        incoming_messages: &[ModelMessage],
    ) -> Result<(), SimulationError> {
        self.inner.events_ext(elapsed, incoming_messages)
    }

    fn events_conf(&mut self, incoming_messages: &[ModelMessage]) -> Result<(), SimulationError> {
        self.inner.events_conf(incoming_messages)
    }

    fn collect_output(&mut self, outgoing_messages: Vec<ModelMessage>) {
        self.inner.collect_output(outgoing_messages);
    }
}

impl Reportable for Model {
    fn status(&self) -> String {
        self.inner.status()
    }

    fn records(&self) -> &Vec<ModelRecord> {
        self.inner.records()
    }
}

impl ReportableModel for Model {}
