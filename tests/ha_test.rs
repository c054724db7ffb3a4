use mockito::Server;
use painel::bandeira::SENTINELA;
use painel::config::HaConfig;
use painel::ha::HaClient;
use serde_json::json;

fn config_para(server: &Server) -> HaConfig {
    HaConfig {
        base_url: server.url(),
        token: "test_token".to_string(),
        nabu_base_url: server.url(),
        timeout_secs: 5,
        filter_timeout_secs: 2,
        ..HaConfig::default()
    }
}

#[tokio::test]
async fn climate_summary_formats_temperature_and_humidity() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/states/climate.quarto")
        .match_header("authorization", "Bearer test_token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "entity_id": "climate.quarto",
                "state": "cool",
                "attributes": {"current_temperature": 23.5, "current_humidity": 48}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = HaClient::new(config_para(&server)).unwrap();
    assert_eq!(client.climate_summary().await, "23.5°C / 48%");
    mock.assert_async().await;
}

#[tokio::test]
async fn climate_summary_uses_sentinel_for_missing_attributes() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/states/climate.quarto")
        .with_status(200)
        .with_body(
            json!({
                "entity_id": "climate.quarto",
                "state": "off",
                "attributes": {}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = HaClient::new(config_para(&server)).unwrap();
    assert_eq!(client.climate_summary().await, "—°C / —%");
}

#[tokio::test]
async fn climate_summary_degrades_on_missing_entity() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/states/climate.quarto")
        .with_status(404)
        .create_async()
        .await;

    let client = HaClient::new(config_para(&server)).unwrap();
    assert_eq!(client.climate_summary().await, SENTINELA);
}

#[tokio::test]
async fn climate_summary_degrades_on_auth_failure() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/states/climate.quarto")
        .with_status(401)
        .create_async()
        .await;

    let client = HaClient::new(config_para(&server)).unwrap();
    assert_eq!(client.climate_summary().await, SENTINELA);
}

#[tokio::test]
async fn filter_status_maps_binary_sensor_state() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/states/binary_sensor.quarto_filter_clean_required")
        .with_status(200)
        .with_body(
            json!({
                "entity_id": "binary_sensor.quarto_filter_clean_required",
                "state": "on",
                "attributes": {}
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let client = HaClient::new(config_para(&server)).unwrap();
    assert_eq!(client.filter_status().await, "Necessário");
}

#[tokio::test]
async fn filter_status_off_is_ok() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/states/binary_sensor.quarto_filter_clean_required")
        .with_status(200)
        .with_body(
            json!({
                "entity_id": "binary_sensor.quarto_filter_clean_required",
                "state": "off",
                "attributes": {}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = HaClient::new(config_para(&server)).unwrap();
    assert_eq!(client.filter_status().await, "OK");
}

#[tokio::test]
async fn trigger_webhook_posts_to_nabu_endpoint() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/webhook/wh_luz_quarto")
        .with_status(200)
        .create_async()
        .await;

    let client = HaClient::new(config_para(&server)).unwrap();
    client.trigger_webhook("wh_luz_quarto").await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn trigger_webhook_surfaces_http_errors() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/webhook/wh_luz_quarto")
        .with_status(500)
        .create_async()
        .await;

    let client = HaClient::new(config_para(&server)).unwrap();
    assert!(client.trigger_webhook("wh_luz_quarto").await.is_err());
}
