//! Wire-level tests for the blocking HTTP transport.
//!
//! These tests run the real `HttpTransport` against a mock HTTP server.

use crunchy_api::{
    ClientConfig, ClientError, CrunchyrollClient, Field, HttpTransport, MediaType, ObjectType,
    Transport,
};
use mockito::{Matcher, Server};

fn json_body(value: serde_json::Value) -> String {
    value.to_string()
}

fn config_for(server: &Server) -> ClientConfig {
    ClientConfig::new("app-token").with_base_url(server.url())
}

fn mock_start_session(server: &mut Server, hits: usize) -> mockito::Mock {
    server
        .mock("POST", "/start_session.0.json")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("device_type".into(), "com.crunchyroll.windows.desktop".into()),
            Matcher::UrlEncoded("access_token".into(), "app-token".into()),
            Matcher::UrlEncoded("version".into(), "1.1.21.0".into()),
            Matcher::UrlEncoded("locale".into(), "enUS".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json_body(serde_json::json!({
            "error": false,
            "code": "ok",
            "data": { "session_id": "http-session" }
        })))
        .expect(hits)
        .create()
}

fn mock_login(server: &mut Server) -> mockito::Mock {
    server
        .mock("POST", "/login.0.json")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("account".into(), "testuser".into()),
            Matcher::UrlEncoded("password".into(), "p@ss word&1".into()),
            Matcher::UrlEncoded("session_id".into(), "http-session".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json_body(serde_json::json!({
            "error": false,
            "code": "ok",
            "data": { "auth": "http-auth" }
        })))
        .expect(1)
        .create()
}

fn connect(server: &mut Server) -> CrunchyrollClient {
    CrunchyrollClient::connect(config_for(server), "testuser", "p@ss word&1")
        .expect("login should succeed")
}

// =============================================================================
// Transport Tests
// =============================================================================

mod transport {
    use super::*;

    #[test]
    fn test_posts_form_and_returns_body() {
        let mut server = Server::new();
        let mock = server
            .mock("POST", "/info.0.json")
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_body(Matcher::UrlEncoded("media_types".into(), "anime|drama".into()))
            .with_status(200)
            .with_body("raw bytes")
            .expect(1)
            .create();

        let transport = HttpTransport::new(&ClientConfig::new("app-token")).unwrap();
        let body = transport
            .post_form(
                &format!("{}/info.0.json", server.url()),
                &[("media_types".to_string(), "anime|drama".to_string())],
            )
            .unwrap();

        assert_eq!(body, b"raw bytes");
        mock.assert();
    }

    #[test]
    fn test_non_success_status_is_server_error() {
        let mut server = Server::new();
        let mock = server
            .mock("POST", "/queue.0.json")
            .with_status(500)
            .with_body("Internal Server Error")
            .expect(1)
            .create();

        let transport = HttpTransport::new(&ClientConfig::new("app-token")).unwrap();
        let result = transport.post_form(&format!("{}/queue.0.json", server.url()), &[]);

        match result {
            Err(ClientError::ServerError { status, message }) => {
                assert_eq!(status, 500);
                assert!(message.contains("Internal Server Error"));
            }
            other => panic!("Expected ServerError, got: {:?}", other),
        }
        mock.assert();
    }

    #[test]
    fn test_unreachable_server() {
        let transport = HttpTransport::new(&ClientConfig::new("app-token")).unwrap();
        let result = transport.post_form("http://127.0.0.1:1/info.0.json", &[]);

        match result {
            Err(ClientError::ServerUnreachable(_)) | Err(ClientError::Request(_)) => {}
            other => panic!("Expected ServerUnreachable or Request error, got: {:?}", other),
        }
    }
}

// =============================================================================
// End-to-end Client Tests
// =============================================================================

mod client {
    use super::*;

    #[test]
    fn test_connect_and_info() {
        let mut server = Server::new();
        let start = mock_start_session(&mut server, 1);
        let login = mock_login(&mut server);
        let info = server
            .mock("POST", "/info.0.json")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("media_id".into(), "1234".into()),
                Matcher::UrlEncoded("session_id".into(), "http-session".into()),
                Matcher::UrlEncoded("version".into(), "1.1.21.0".into()),
                Matcher::UrlEncoded("locale".into(), "enUS".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json_body(serde_json::json!({
                "error": false,
                "code": "ok",
                "data": { "media_id": "1234", "name": "Episode 1" }
            })))
            .expect(1)
            .create();

        let mut client = connect(&mut server);
        assert!(client.is_authenticated());

        let response = client.info(ObjectType::Media, 1234).unwrap();
        assert!(!response.is_error());
        assert_eq!(response.data_str("name"), Some("Episode 1"));

        start.assert();
        login.assert();
        info.assert();
    }

    #[test]
    fn test_queue_over_http() {
        let mut server = Server::new();
        let _start = mock_start_session(&mut server, 1);
        let _login = mock_login(&mut server);
        let queue = server
            .mock("POST", "/queue.0.json")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("media_types".into(), "anime|drama".into()),
                Matcher::UrlEncoded(
                    "fields".into(),
                    "media.media_id,series.name".into(),
                ),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json_body(serde_json::json!({
                "error": false,
                "code": "ok",
                "data": []
            })))
            .expect(1)
            .create();

        let mut client = connect(&mut server);
        let response = client
            .queue(MediaType::AnimeDrama, &[Field::MediaMediaId, Field::SeriesName])
            .unwrap();

        assert!(!response.is_error());
        queue.assert();
    }

    #[test]
    fn test_rejected_login_fails_connect() {
        let mut server = Server::new();
        let start = mock_start_session(&mut server, 2);
        let login = server
            .mock("POST", "/login.0.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json_body(serde_json::json!({
                "error": true,
                "code": "bad_auth_params",
                "message": "Incorrect login information."
            })))
            .expect(2)
            .create();

        let result = CrunchyrollClient::connect(config_for(&server), "testuser", "wrong");
        match result {
            Err(ClientError::AuthFailed(msg)) => assert!(msg.contains("Incorrect login")),
            Err(e) => panic!("Expected AuthFailed, got: {:?}", e),
            Ok(_) => panic!("Expected connect to fail"),
        }

        start.assert();
        login.assert();
    }

    #[test]
    fn test_malformed_body_is_parse_error() {
        let mut server = Server::new();
        let _start = server
            .mock("POST", "/start_session.0.json")
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create();

        let result = CrunchyrollClient::connect(config_for(&server), "testuser", "pass");
        assert!(matches!(result, Err(ClientError::ParseError(_))));
    }

    #[test]
    fn test_placeholder_makes_no_request() {
        let mut server = Server::new();
        let _start = mock_start_session(&mut server, 1);
        let _login = mock_login(&mut server);
        let batch = server.mock("POST", "/batch.0.json").expect(0).create();

        let mut client = connect(&mut server);
        assert!(matches!(
            client.batch(),
            Err(ClientError::NotImplemented("batch"))
        ));

        batch.assert();
    }
}
