//! Shared network fixtures for integration tests.
#![allow(dead_code)]

use bn_config::{JsonDocument, Structure, Values};
use bn_core::Network;

pub const SCENARIO_STRUCTURE: &str = r#"{
    "variables": {"A": ["true", "false"], "B": ["true", "false"]},
    "dependencies": {"B": ["A"]}
}"#;

pub const SCENARIO_VALUES: &str = r#"{
    "prior_probabilities": {"A": {"true": 0.2, "false": 0.8}},
    "conditional_probabilities": {"B": [
        {"A": "true", "own_value": "true", "probability": 0.8},
        {"A": "true", "own_value": "false", "probability": 0.2},
        {"A": "false", "own_value": "true", "probability": 0.1},
        {"A": "false", "own_value": "false", "probability": 0.9}
    ]}
}"#;

/// Burglary/earthquake alarm network with boolean domains.
pub const ALARM_STRUCTURE: &str = r#"{
    "variables": {
        "Burglary": [true, false],
        "Earthquake": [true, false],
        "Alarm": [true, false],
        "JohnCalls": [true, false],
        "MaryCalls": [true, false]
    },
    "dependencies": {
        "Burglary": null,
        "Earthquake": [],
        "Alarm": ["Burglary", "Earthquake"],
        "JohnCalls": ["Alarm"],
        "MaryCalls": ["Alarm"]
    }
}"#;

pub const ALARM_VALUES: &str = r#"{
    "prior_probabilities": {
        "Burglary": {"true": 0.001, "false": 0.999},
        "Earthquake": {"true": 0.002, "false": 0.998}
    },
    "conditional_probabilities": {
        "Alarm": [
            {"Burglary": true, "Earthquake": true, "own_value": true, "probability": 0.95},
            {"Burglary": true, "Earthquake": true, "own_value": false, "probability": 0.05},
            {"Burglary": true, "Earthquake": false, "own_value": true, "probability": 0.94},
            {"Burglary": true, "Earthquake": false, "own_value": false, "probability": 0.06},
            {"Burglary": false, "Earthquake": true, "own_value": true, "probability": 0.29},
            {"Burglary": false, "Earthquake": true, "own_value": false, "probability": 0.71},
            {"Burglary": false, "Earthquake": false, "own_value": true, "probability": 0.001},
            {"Burglary": false, "Earthquake": false, "own_value": false, "probability": 0.999}
        ],
        "JohnCalls": [
            {"Alarm": true, "own_value": true, "probability": 0.90},
            {"Alarm": true, "own_value": false, "probability": 0.10},
            {"Alarm": false, "own_value": true, "probability": 0.05},
            {"Alarm": false, "own_value": false, "probability": 0.95}
        ],
        "MaryCalls": [
            {"Alarm": true, "own_value": true, "probability": 0.70},
            {"Alarm": true, "own_value": false, "probability": 0.30},
            {"Alarm": false, "own_value": true, "probability": 0.01},
            {"Alarm": false, "own_value": false, "probability": 0.99}
        ]
    }
}"#;

pub fn documents(structure: &str, values: &str) -> (Structure, Values) {
    (
        Structure::parse_json(structure).expect("fixture structure must parse"),
        Values::parse_json(values).expect("fixture values must parse"),
    )
}

pub fn network(structure: &str, values: &str) -> Network {
    let (s, v) = documents(structure, values);
    Network::construct(&s, &v).expect("fixture network must construct")
}

pub fn scenario() -> Network {
    network(SCENARIO_STRUCTURE, SCENARIO_VALUES)
}

pub fn alarm() -> Network {
    network(ALARM_STRUCTURE, ALARM_VALUES)
}
