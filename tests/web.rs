use devs_queue::models::Customer;
use devs_queue::simulator::WebSimulation;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};

wasm_bindgen_test_configure!(run_in_browser);

const CONFIGURATION: &str = r#"
{
    "source": {
        "id": "source-01",
        "type": "Source",
        "schedule": [
            { "interarrival": 0.0, "serviceDuration": 5.0 },
            { "interarrival": 2.0, "serviceDuration": 3.0 }
        ]
    },
    "server": {
        "id": "server-01",
        "type": "Server"
    },
    "connector": {
        "id": "connector-01",
        "sourceID": "source-01",
        "targetID": "server-01",
        "sourcePort": "arrive",
        "targetPort": "arrive"
    }
}"#;

#[test]
#[wasm_bindgen_test]
fn json_simulation_runs_to_completion() {
    let mut web = WebSimulation::post_json(CONFIGURATION).unwrap();
    let first: serde_json::Value = serde_json::from_str(&web.step_json().unwrap()).unwrap();
    assert_eq!(first[0]["targetId"], "server-01");
    assert_eq!(first[0]["content"]["id"], 1);

    let rest: serde_json::Value = serde_json::from_str(&web.run_json().unwrap()).unwrap();
    assert_eq!(rest.as_array().map(Vec::len), Some(3));
    assert_eq!(web.get_global_time(), 8.0);
    assert_eq!(web.get_status("server-01").unwrap(), "Idle");

    let departures: Vec<Customer> =
        serde_json::from_str(&web.departures_json().unwrap()).unwrap();
    assert_eq!(departures[1].enter_time, Some(2.0));
    assert_eq!(departures[1].leave_time, Some(8.0));
}

#[test]
#[wasm_bindgen_test]
fn yaml_round_trip_preserves_progress() {
    let mut web = WebSimulation::post_json(CONFIGURATION).unwrap();
    web.step_until_json(2.0).unwrap();
    let mut resumed = WebSimulation::post_yaml(&web.get_yaml().unwrap()).unwrap();
    assert_eq!(resumed.get_global_time(), 2.0);
    assert_eq!(
        resumed.get_status("server-01").unwrap(),
        "Serving customer 1 (2 in line)"
    );
    resumed.run_json().unwrap();
    assert_eq!(resumed.simulation().departures().len(), 2);
}

#[test]
#[wasm_bindgen_test]
fn json_snapshot_resumes_where_it_left_off() {
    let mut web = WebSimulation::post_json(CONFIGURATION).unwrap();
    web.step_json().unwrap();
    let snapshot = web.get_json().unwrap();
    let mut resumed = WebSimulation::post_json(&snapshot).unwrap();
    assert_eq!(resumed.get_global_time(), 0.0);
    assert_eq!(
        resumed.get_status("source-01").unwrap(),
        "Generating arrivals (1 remaining)"
    );
    assert_eq!(resumed.get_json().unwrap(), snapshot);
    resumed.run_json().unwrap();
    let departures: Vec<Customer> =
        serde_json::from_str(&resumed.departures_json().unwrap()).unwrap();
    assert_eq!(departures.len(), 2);
    assert_eq!(departures[0].leave_time, Some(5.0));
}

// js-sys arrays only exist on the wasm target
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen_test]
fn step_js_returns_one_json_string_per_message() {
    let mut web = WebSimulation::post_json(CONFIGURATION).unwrap();
    let messages = web.step_js().unwrap();
    assert_eq!(messages.length(), 1);
    let message: serde_json::Value =
        serde_json::from_str(&messages.get(0).as_string().unwrap()).unwrap();
    assert_eq!(message["sourceId"], "source-01");
    assert_eq!(message["targetPort"], "arrive");
    assert_eq!(message["content"]["serviceDuration"], 5.0);
    assert_eq!(web.step_js().unwrap().length(), 1);
    assert_eq!(web.get_global_time(), 2.0);
}
