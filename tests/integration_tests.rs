mod common;

use std::time::Duration;
use namesmith::{
  Error, GenerationClient, NamesmithBackend, ResponseParser, ResultExporter
};
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use common::{completion, tech_startup_request, test_config, GENERATE_PATH, TEST_KEY};

#[tokio::test]
async fn test_tech_startup_end_to_end()
{   let server = MockServer::start().await;
    Mock::given(method("POST"))
      .and(path(GENERATE_PATH))
      .respond_with(completion(
        "1. Nexify\n2. Velocix\n3. Nexify\n4. Quantrix\n5. Boltly\n6. extra one"
      ))
      .expect(1)
      .mount(&server)
      .await;

    let config = test_config(&server.uri());
    let client = GenerationClient::new(&config);
    let parser = ResponseParser::new(config.parser.clone());
    let names = assert_ok!(
      namesmith::pipeline::generate_names(
        &client,
        &parser,
        &tech_startup_request(5),
        None
      ).await
    );
    assert_eq!(names.names(), ["Nexify", "Velocix", "Quantrix", "Boltly"]);

    let artifact = ResultExporter::new().export(&names);
    assert_eq!(artifact.row_count(), 4);
    assert_ok!(artifact.to_xlsx_bytes());
}

#[tokio::test]
async fn test_empty_list_after_parsing_is_empty_result()
{   let server = MockServer::start().await;
    Mock::given(method("POST"))
      .respond_with(completion("Here are your names:\n\n---"))
      .expect(1)
      .mount(&server)
      .await;

    let config = test_config(&server.uri());
    let err = assert_err!(
      namesmith::pipeline::generate_names(
        &GenerationClient::new(&config),
        &ResponseParser::default(),
        &tech_startup_request(5),
        None
      ).await
    );
    assert_eq!(err, Error::EmptyResult);
    assert!(err.is_retryable_by_user());
}

#[tokio::test]
async fn test_backend_generates_names()
{   let server = MockServer::start().await;
    Mock::given(method("POST"))
      .respond_with(completion("Nexify\nVelocix\nQuantrix"))
      .expect(1)
      .mount(&server)
      .await;

    let backend = NamesmithBackend::new(test_config(&server.uri()));
    let mut rx = assert_ok!(
      backend.generate_names(tech_startup_request(2), None).await
    );
    let reply = tokio::time::timeout(Duration::from_secs(5), rx.recv())
      .await
      .expect("reply in time")
      .expect("reply sent");
    let names = assert_ok!(reply);
    assert_eq!(names.names(), ["Nexify", "Velocix"]);

    assert_ok!(backend.shutdown().await);
}

#[tokio::test]
async fn test_backend_default_key_can_be_replaced()
{   let server = MockServer::start().await;
    Mock::given(method("POST"))
      .and(header("x-goog-api-key", "rotated-key"))
      .respond_with(completion("Zento"))
      .expect(1)
      .mount(&server)
      .await;
    Mock::given(method("POST"))
      .and(header("x-goog-api-key", TEST_KEY))
      .respond_with(ResponseTemplate::new(401))
      .expect(0)
      .mount(&server)
      .await;

    let backend = NamesmithBackend::new(test_config(&server.uri()));
    let mut key_rx = assert_ok!(
      backend.set_default_api_key(Some("rotated-key".to_string())).await
    );
    assert_eq!(key_rx.recv().await, Some(Ok(())));

    let mut rx = assert_ok!(
      backend.generate_names(tech_startup_request(3), None).await
    );
    let names = assert_ok!(rx.recv().await.expect("reply sent"));
    assert_eq!(names.names(), ["Zento"]);

    assert_ok!(backend.shutdown().await);
}

#[tokio::test]
async fn test_backend_reports_missing_key()
{   let mut config = test_config("http://127.0.0.1:9");
    config.default_api_key = None;
    let backend = NamesmithBackend::new(config);

    let mut rx = assert_ok!(
      backend.generate_names(tech_startup_request(3), None).await
    );
    let err = assert_err!(rx.recv().await.expect("reply sent"));
    assert!(matches!(err, Error::Authentication(_)));

    assert_ok!(backend.shutdown().await);
}

#[tokio::test]
#[ignore]
async fn test_live_gemini_generation()
{   let config = namesmith::NamesmithConfig::default().with_env_default_key();
    if config.default_api_key.is_none()
    {   println!("Skipping: GEMINI_API_KEY not set");
        return;
    }

    let client = GenerationClient::new(&config);
    match namesmith::pipeline::generate_names(
      &client,
      &ResponseParser::default(),
      &tech_startup_request(5),
      None
    ).await
    {   Ok(names) => {
          println!("Generated: {:?}", names.names());
          assert!(!names.is_empty());
          assert!(names.len() <= 5);
        }
      , Err(e) => {
          println!("Live generation failed: {}", e);
        }
    }
}
