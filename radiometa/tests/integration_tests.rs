//! Integration tests for radiometa

use radiometa::{Error, MetadataClient, StreamInfo};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> MetadataClient {
    MetadataClient::new(format!("{}/now_playing.txt", server.uri())).unwrap()
}

#[tokio::test]
async fn test_fetch_stream_info() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/now_playing.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Adele - Hello\n"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let info = client.fetch_stream_info().await.unwrap();

    assert_eq!(info, StreamInfo::new("Adele", "Hello"));
}

#[tokio::test]
async fn test_fetch_degraded_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/now_playing.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Station jingle"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let info = client.fetch_stream_info().await.unwrap();

    // No delimiter: whole body becomes the artist field
    assert_eq!(info.artist, "Station jingle");
    assert_eq!(info.title, "");
}

#[tokio::test]
async fn test_fetch_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/now_playing.txt"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let err = client.fetch_stream_info().await.unwrap_err();

    assert!(matches!(err, Error::Http(_)));
}

#[tokio::test]
async fn test_fetch_empty_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/now_playing.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let info = client.fetch_stream_info().await.unwrap();

    assert!(info.is_empty());
}
