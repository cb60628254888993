use httpmock::prelude::*;

use homelink_core::types::{StateMap, Value};
use homelink_host::params::PluginParameters;
use homelink_plugin::{ApiClient, PersistedState};

fn api_for(server: &MockServer) -> ApiClient {
    let params = PluginParameters {
        key: "thermo".to_string(),
        address: server.host(),
        port: server.port().to_string(),
        ..Default::default()
    };
    ApiClient::new(&params).unwrap()
}

fn defaults() -> StateMap {
    let mut map = StateMap::new();
    map.insert("count".to_string(), Value::Integer(0));
    map
}

#[tokio::test]
async fn test_save_then_load_round_trips_the_mapping() {
    let server = MockServer::start();
    let api = api_for(&server);

    let save_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/json.htm")
            .query_param("param", "updateuservariable")
            .query_param("vname", "thermo-InternalVariables")
            .query_param("vtype", "2")
            .query_param("vvalue", "{\"count\":5}");
        then.status(200)
            .json_body(serde_json::json!({ "status": "OK" }));
    });

    let mut state = PersistedState::new("thermo", defaults());
    state.set("count", 5i64);
    state.save(&api).await.unwrap();
    save_mock.assert();

    // The host hands the stored value back verbatim on the next load.
    server.mock(|when, then| {
        when.method(GET)
            .path("/json.htm")
            .query_param("param", "getuservariables");
        then.status(200).json_body(serde_json::json!({
            "status": "OK",
            "result": [
                { "Name": "thermo-InternalVariables", "Value": "{\"count\":5}" }
            ]
        }));
    });

    let mut restored = PersistedState::new("thermo", defaults());
    restored.load(&api).await.unwrap();
    assert_eq!(restored.get_integer("count"), Some(5));
    assert_eq!(restored.as_map(), state.as_map());
}

#[tokio::test]
async fn test_load_creates_variable_on_recent_host() {
    let server = MockServer::start();
    let api = api_for(&server);

    server.mock(|when, then| {
        when.method(GET)
            .path("/json.htm")
            .query_param("param", "getuservariables");
        then.status(200)
            .json_body(serde_json::json!({ "status": "OK", "result": [] }));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/json.htm")
            .query_param("param", "getversion");
        then.status(200).json_body(serde_json::json!({
            "status": "OK",
            "version": "2024.4",
            "dzvents_version": "3.1.8"
        }));
    });
    let create_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/json.htm")
            .query_param("param", "adduservariable")
            .query_param("vname", "thermo-InternalVariables")
            .query_param("vtype", "2")
            .query_param("vvalue", "{\"count\":0}");
        then.status(200)
            .json_body(serde_json::json!({ "status": "OK" }));
    });

    let mut state = PersistedState::new("thermo", defaults());
    state.set("count", 9i64);
    state.load(&api).await.unwrap();

    create_mock.assert();
    assert_eq!(state.get_integer("count"), Some(0));
}

#[tokio::test]
async fn test_load_creates_variable_on_old_host() {
    let server = MockServer::start();
    let api = api_for(&server);

    server.mock(|when, then| {
        when.method(GET)
            .path("/json.htm")
            .query_param("param", "getuservariables");
        then.status(200)
            .json_body(serde_json::json!({ "status": "OK", "result": [] }));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/json.htm")
            .query_param("param", "getversion");
        then.status(200).json_body(serde_json::json!({
            "status": "OK",
            "version": "4.10717",
            "dzvents_version": "2.4.8"
        }));
    });
    let create_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/json.htm")
            .query_param("param", "saveuservariable");
        then.status(200)
            .json_body(serde_json::json!({ "status": "OK" }));
    });

    let mut state = PersistedState::new("thermo", defaults());
    state.load(&api).await.unwrap();

    create_mock.assert();
}

#[tokio::test]
async fn test_load_resets_on_corrupt_value() {
    let server = MockServer::start();
    let api = api_for(&server);

    server.mock(|when, then| {
        when.method(GET)
            .path("/json.htm")
            .query_param("param", "getuservariables");
        then.status(200).json_body(serde_json::json!({
            "status": "OK",
            "result": [
                { "Name": "thermo-InternalVariables", "Value": "not a mapping" }
            ]
        }));
    });

    let mut state = PersistedState::new("thermo", defaults());
    state.set("count", 9i64);
    state.load(&api).await.unwrap();
    assert_eq!(state.get_integer("count"), Some(0));
}

#[tokio::test]
async fn test_load_resets_on_transport_failure() {
    let server = MockServer::start();
    let api = api_for(&server);

    server.mock(|when, then| {
        when.method(GET).path("/json.htm");
        then.status(500);
    });

    let mut state = PersistedState::new("thermo", defaults());
    state.set("count", 9i64);
    let result = state.load(&api).await;

    assert!(result.is_err());
    assert_eq!(state.get_integer("count"), Some(0));
}
