use mockito::{Matcher, Server};
use painel::config::TempoConfig;
use painel::tempo::{INDISPONIVEL, TempoClient};

fn config_para(server: &Server) -> TempoConfig {
    TempoConfig {
        base_url: server.url(),
        cidade: "Sao+Paulo".to_string(),
        timeout_secs: 5,
        ..TempoConfig::default()
    }
}

#[tokio::test]
async fn fetch_passes_body_through_trimmed() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/Sao+Paulo")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("format".into(), "%c+%C+%t+Humidity+%h".into()),
            Matcher::UrlEncoded("lang".into(), "pt".into()),
        ]))
        .with_status(200)
        .with_body("☀️ Ensolarado +23°C Humidity 48%\n")
        .create_async()
        .await;

    let client = TempoClient::new(config_para(&server)).unwrap();
    assert_eq!(client.fetch().await, "☀️ Ensolarado +23°C Humidity 48%");
    mock.assert_async().await;
}

#[tokio::test]
async fn fetch_degrades_on_http_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/Sao+Paulo")
        .match_query(Matcher::Any)
        .with_status(503)
        .create_async()
        .await;

    let client = TempoClient::new(config_para(&server)).unwrap();
    assert_eq!(client.fetch().await, INDISPONIVEL);
}

#[tokio::test]
async fn fetch_degrades_on_empty_body() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/Sao+Paulo")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("   \n")
        .create_async()
        .await;

    let client = TempoClient::new(config_para(&server)).unwrap();
    assert_eq!(client.fetch().await, INDISPONIVEL);
}

#[tokio::test]
async fn fetch_degrades_on_connection_error() {
    let config = TempoConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        timeout_secs: 1,
        ..TempoConfig::default()
    };
    let client = TempoClient::new(config).unwrap();
    assert_eq!(client.fetch().await, INDISPONIVEL);
}
