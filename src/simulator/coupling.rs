use serde::{Deserialize, Serialize};

use crate::models::Customer;

/// The connector couples the source's arrival output port to the server's
/// arrival input port.  During simulation, the models exchange messages
/// (as per the Discrete Event System Specification) only through it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connector {
    id: String,
    #[serde(rename = "sourceID")]
    source_id: String,
    #[serde(rename = "targetID")]
    target_id: String,
    source_port: String,
    target_port: String,
}

impl Connector {
    pub fn new(
        id: String,
        source_id: String,
        target_id: String,
        source_port: String,
        target_port: String,
    ) -> Self {
        Self {
            id,
            source_id,
            target_id,
            source_port,
            target_port,
        }
    }

    /// This accessor method returns the ID of the connector.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// This accessor method returns the model ID of the connector source model.
    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    /// This accessor method returns the source port of the connector.
    pub fn source_port(&self) -> &str {
        &self.source_port
    }

    /// This accessor method returns the model ID of the connector target model.
    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    /// This accessor method returns the target port of the connector.
    pub fn target_port(&self) -> &str {
        &self.target_port
    }
}

/// Messages are the output events of a simulation step.  The message
/// contains origin information (source model ID and port), destination
/// information when the output was routed through the connector, the
/// simulation time of the event, and the customer it carries.  Departures
/// leave the simulation, so they have no destination.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    source_id: String,
    source_port: String,
    target_id: Option<String>,
    target_port: Option<String>,
    time: f64,
    content: Customer,
}

impl Message {
    /// This constructor method builds a `Message`, which is passed between
    /// simulation models
    pub fn new(
        source_id: String,
        source_port: String,
        target: Option<(String, String)>,
        time: f64,
        content: Customer,
    ) -> Self {
        let (target_id, target_port) = match target {
            Some((target_id, target_port)) => (Some(target_id), Some(target_port)),
            None => (None, None),
        };
        Self {
            source_id,
            source_port,
            target_id,
            target_port,
            time,
            content,
        }
    }

    /// This accessor method returns the model ID of a message source.
    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    /// This accessor method returns the source port of a message.
    pub fn source_port(&self) -> &str {
        &self.source_port
    }

    /// This accessor method returns the model ID of a message target, if
    /// the message was routed to one.
    pub fn target_id(&self) -> Option<&str> {
        self.target_id.as_deref()
    }

    /// This accessor method returns the target port of a message, if the
    /// message was routed to one.
    pub fn target_port(&self) -> Option<&str> {
        self.target_port.as_deref()
    }

    /// This accessor method returns the simulation time of a message.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// This accessor method returns the customer carried by a message.
    pub fn content(&self) -> &Customer {
        &self.content
    }
}
