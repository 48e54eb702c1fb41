use js_sys::Array;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::utils::errors::SimulationError;
use crate::utils::set_panic_hook;

use super::Simulation as CoreSimulation;

fn to_js_error(error: SimulationError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// The web `Simulation` provides JS/WASM-compatible interfaces to the core
/// `Simulation` struct.  For additional insight on these methods, refer to
/// the associated core `Simulation` methods.  Configurations and messages
/// are exchanged as JSON or YAML strings, and errors are returned as
/// JavaScript exceptions.
#[wasm_bindgen]
#[derive(Clone, Serialize, Deserialize)]
pub struct Simulation {
    simulation: CoreSimulation,
}

impl Simulation {
    fn from_json(configuration: &str) -> Result<Self, SimulationError> {
        Ok(Self {
            simulation: serde_json::from_str(configuration)?,
        })
    }

    fn from_yaml(configuration: &str) -> Result<Self, SimulationError> {
        Ok(Self {
            simulation: serde_yaml::from_str(configuration)?,
        })
    }

    fn messages_json(&mut self, until: Option<f64>) -> Result<String, SimulationError> {
        let messages = match until {
            Some(until) => self.simulation.step_until(until)?,
            None => self.simulation.step()?,
        };
        Ok(serde_json::to_string(&messages)?)
    }

    /// The core simulation, for native callers of the web interface.
    pub fn simulation(&self) -> &CoreSimulation {
        &self.simulation
    }
}

#[wasm_bindgen]
impl Simulation {
    /// A JS/WASM interface for `Simulation.post`, which uses a JSON
    /// representation of the source, server, and connector.
    pub fn post_json(configuration: &str) -> Result<Simulation, JsValue> {
        set_panic_hook();
        Self::from_json(configuration).map_err(to_js_error)
    }

    /// A JS/WASM interface for `Simulation.post`, which uses a YAML
    /// representation of the source, server, and connector.
    pub fn post_yaml(configuration: &str) -> Result<Simulation, JsValue> {
        set_panic_hook();
        Self::from_yaml(configuration).map_err(to_js_error)
    }

    /// Get a JSON representation of the full `Simulation` configuration and
    /// state.
    pub fn get_json(&self) -> Result<String, JsValue> {
        serde_json::to_string_pretty(&self.simulation)
            .map_err(|error| to_js_error(error.into()))
    }

    /// Get a YAML representation of the full `Simulation` configuration and
    /// state.
    pub fn get_yaml(&self) -> Result<String, JsValue> {
        serde_yaml::to_string(&self.simulation).map_err(|error| to_js_error(error.into()))
    }

    /// An interface to `Simulation.get_global_time`.
    pub fn get_global_time(&self) -> f64 {
        self.simulation.get_global_time()
    }

    /// An interface to `Simulation.get_status`.
    pub fn get_status(&self, model_id: &str) -> Result<String, JsValue> {
        self.simulation.get_status(model_id).map_err(to_js_error)
    }

    /// A JS/WASM interface for `Simulation.step`, which converts the
    /// returned messages to a JSON string.
    pub fn step_json(&mut self) -> Result<String, JsValue> {
        self.messages_json(None).map_err(to_js_error)
    }

    /// A JS/WASM interface for `Simulation.step`, which converts the
    /// returned messages to a JavaScript Array of JSON strings.
    pub fn step_js(&mut self) -> Result<Array, JsValue> {
        let messages = self.simulation.step().map_err(to_js_error)?;
        messages
            .iter()
            .map(|message| {
                serde_json::to_string(message)
                    .map(|message| JsValue::from_str(&message))
                    .map_err(|error| to_js_error(error.into()))
            })
            .collect()
    }

    /// A JS/WASM interface for `Simulation.step_until`, which converts the
    /// returned messages to a JSON string.
    pub fn step_until_json(&mut self, until: f64) -> Result<String, JsValue> {
        self.messages_json(Some(until)).map_err(to_js_error)
    }

    /// A JS/WASM interface for `Simulation.run`, which converts the
    /// returned messages to a JSON string.
    pub fn run_json(&mut self) -> Result<String, JsValue> {
        self.messages_json(Some(f64::INFINITY)).map_err(to_js_error)
    }

    /// A JS/WASM interface for `Simulation.departures`, as a JSON string.
    pub fn departures_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.simulation.departures())
            .map_err(|error| to_js_error(error.into()))
    }
}
