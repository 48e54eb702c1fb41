use super::model_trait::ReportableModel;
use serde::de;
use serde::Deserializer;
use std::collections::HashMap;

use lazy_static::lazy_static;

use std::sync::{Mutex, MutexGuard, PoisonError};

pub type ModelConstructor = fn(serde_yaml::Value) -> Option<Box<dyn ReportableModel>>;
lazy_static! {
    static ref CONSTRUCTORS: Mutex<HashMap<&'static str, ModelConstructor>> = {
        let mut m = HashMap::new();
        m.insert("Server", super::Server::from_value as ModelConstructor);
        m.insert("Source", super::Source::from_value as ModelConstructor);
        Mutex::new(m)
    };
}

// The registry only ever gains complete entries, so a poisoned lock still
// guards a consistent map
fn constructors() -> MutexGuard<'static, HashMap<&'static str, ModelConstructor>> {
    CONSTRUCTORS.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Makes a custom model type available to configurations, under
/// `model_type`.
pub fn register(model_type: &'static str, model_constructor: ModelConstructor) {
    constructors().insert(model_type, model_constructor);
}

fn variants() -> Vec<&'static str> {
    constructors().keys().copied().collect()
}

pub fn create<'de, D: Deserializer<'de>>(
    model_type: &str,
    extra_fields: serde_yaml::Value,
) -> Result<Box<dyn ReportableModel>, D::Error> {
    let constructor = constructors().get(model_type).copied();
    match constructor {
        Some(constructor) => constructor(extra_fields).ok_or_else(|| {
            de::Error::custom(format!["invalid configuration for a {} model", model_type])
        }),
        None => Err(de::Error::custom(format![
            "unknown model type `{}`, expected one of {:?}",
            model_type,
            variants()
        ])),
    }
}
