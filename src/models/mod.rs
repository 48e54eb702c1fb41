//! The models module provides the two atomic models of a single-clerk
//! queue - a `Source` of scheduled customers and a `Server` that lines them
//! up and serves them one at a time.  Additionally, this module specifies
//! the requirements of any atomic model, via the `DevsModel` trait.

use serde::{Deserialize, Serialize};

pub mod customer;
pub mod model;
pub mod server;
pub mod source;
pub mod time_advance;

pub mod model_factory;
pub mod model_repr;
pub mod model_trait;

pub use self::customer::Customer;
pub use self::model::Model;
pub use self::model_trait::{DevsModel, Reportable, ReportableModel, SerializableModel};
pub use self::server::Server;
pub use self::source::Source;
pub use self::time_advance::TimeAdvance;

pub use self::model_repr::ModelRepr;

#[derive(Debug, Clone, PartialEq)]
pub struct ModelMessage {
    pub port_name: String,
    pub content: Customer,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelRecord {
    pub time: f64,
    pub action: String,
    pub subject: String,
}
