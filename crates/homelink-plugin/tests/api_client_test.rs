use std::sync::Arc;

use httpmock::prelude::*;

use homelink_core::error::Error;
use homelink_core::types::StateMap;
use homelink_host::memory::{LogKind, MemoryHost};
use homelink_host::params::PluginParameters;
use homelink_plugin::{ApiClient, PluginHelper};

fn params_for(server: &MockServer) -> PluginParameters {
    PluginParameters {
        key: "thermostat".to_string(),
        address: server.host(),
        port: server.port().to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_call_returns_body_on_ok_status() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/json.htm")
            .query_param("type", "command")
            .query_param("param", "getversion");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "status": "OK",
                "version": "2024.4",
                "dzvents_version": "3.1.8"
            }));
    });

    let api = ApiClient::new(&params_for(&server)).unwrap();
    let body = api.call("type=command&param=getversion").await.unwrap();

    mock.assert();
    assert_eq!(body["version"], "2024.4");

    let version = api.version().await.unwrap();
    assert_eq!(version.script_api_version, "3.1.8");
}

#[tokio::test]
async fn test_call_sends_basic_auth_when_username_configured() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/json.htm")
            // base64 of "admin:secret"
            .header("Authorization", "Basic YWRtaW46c2VjcmV0");
        then.status(200)
            .json_body(serde_json::json!({ "status": "OK" }));
    });

    let mut params = params_for(&server);
    params.username = "admin".to_string();
    params.password = "secret".to_string();

    let api = ApiClient::new(&params).unwrap();
    api.call("type=command&param=getversion").await.unwrap();

    mock.assert();
}

#[tokio::test]
async fn test_call_rejects_non_ok_status() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/json.htm");
        then.status(200)
            .json_body(serde_json::json!({ "status": "ERR" }));
    });

    let api = ApiClient::new(&params_for(&server)).unwrap();
    let result = api.call("type=command&param=getuservariables").await;

    match result {
        Err(Error::Api(message)) => assert!(message.contains("ERR")),
        other => panic!("expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_call_rejects_http_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/json.htm");
        then.status(500);
    });

    let api = ApiClient::new(&params_for(&server)).unwrap();
    let result = api.call("type=command&param=getversion").await;

    match result {
        Err(Error::Http(message)) => assert!(message.contains("500")),
        other => panic!("expected HTTP error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_call_rejects_body_without_status_field() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/json.htm");
        then.status(200).json_body(serde_json::json!({ "result": [] }));
    });

    let api = ApiClient::new(&params_for(&server)).unwrap();
    let result = api.call("type=command&param=getversion").await;
    assert!(matches!(result, Err(Error::Api(_))));
}

#[tokio::test]
async fn test_helper_api_call_logs_and_swallows_failures() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/json.htm");
        then.status(200)
            .json_body(serde_json::json!({ "status": "ERR" }));
    });

    let host = Arc::new(MemoryHost::new(params_for(&server)));
    let helper = PluginHelper::new(host.clone(), StateMap::new()).unwrap();

    let result = helper.api_call("type=command&param=getversion").await;
    assert!(result.is_none());

    let errors = host.log_lines_of(LogKind::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("status = ERR"));
}
