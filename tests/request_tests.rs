use namesmith::config::resolve_api_key;
use namesmith::request::parse_keywords;
use namesmith::{
  Error, GenerationRequest, Language, NameLength, NameStyle, NamesmithConfig
};
use tokio_test::{assert_err, assert_ok};

#[test]
fn test_builder_trims_and_drops_blanks()
{   let request = assert_ok!(
      GenerationRequest::builder()
        .business_type("  Bakery ")
        .keywords(["  warm", "", " fresh "])
        .personality("   ")
        .market("")
        .count(4)
        .build()
    );
    assert_eq!(request.business_type(), Some("Bakery"));
    assert_eq!(request.keywords(), ["warm", "fresh"]);
    assert_eq!(request.personality(), None);
    assert_eq!(request.market(), None);
    assert_eq!(request.count(), 4);
}

#[test]
fn test_builder_requires_signal()
{   let err = assert_err!(
      GenerationRequest::builder().market("Global").build()
    );
    assert!(matches!(err, Error::InvalidRequest(_)));
}

#[test]
fn test_count_bounds()
{   for bad in [0, 16, 100]
    {   let err = assert_err!(
          GenerationRequest::builder().keyword("trust").count(bad).build()
        );
        assert!(matches!(err, Error::InvalidRequest(_)));
    }
    for good in [1, 15]
    {   assert_ok!(
          GenerationRequest::builder().keyword("trust").count(good).build()
        );
    }
}

#[test]
fn test_parse_keywords()
{   assert_eq!(
      parse_keywords("innovation, trust,, quality ,speed"),
      vec!["innovation", "trust", "quality", "speed"]
    );
    assert!(parse_keywords(" , ").is_empty());
}

#[test]
fn test_vocabulary_from_labels_and_slugs()
{   assert_eq!(assert_ok!("Modern & Tech".parse::<NameStyle>()), NameStyle::ModernTech);
    assert_eq!(assert_ok!("minimal-clean".parse::<NameStyle>()), NameStyle::MinimalClean);
    assert_eq!(assert_ok!("ANY".parse::<NameStyle>()), NameStyle::Any);
    assert_eq!(assert_ok!("short".parse::<NameLength>()), NameLength::Short);
    assert_eq!(assert_ok!("japanese".parse::<Language>()), Language::Japanese);
    assert!(matches!(
      "Klingon".parse::<Language>(),
      Err(Error::InvalidRequest(_))
    ));
    for style in NameStyle::ALL
    {   assert_eq!(assert_ok!(style.to_string().parse::<NameStyle>()), style);
    }
}

#[test]
fn test_api_key_precedence()
{   assert_eq!(resolve_api_key(Some("user"), Some("env")), Ok("user".to_string()));
    assert_eq!(resolve_api_key(Some("  "), Some("env")), Ok("env".to_string()));
    assert_eq!(resolve_api_key(None, Some(" env ")), Ok("env".to_string()));
    assert!(matches!(
      resolve_api_key(None, None),
      Err(Error::Authentication(_))
    ));
}

#[test]
fn test_config_defaults()
{   let config = NamesmithConfig::default();
    assert_eq!(config.sampling.temperature, 0.7);
    assert_eq!(config.sampling.top_p, 0.4);
    assert_eq!(config.sampling.max_output_tokens, 1024);
    assert_eq!(config.retry.max_attempts, 3);
    assert_eq!(config.provider.timeout_secs, 30);
    assert_eq!(config.provider.model, "gemini-2.5-flash");
    assert_eq!(config.default_api_key, None);
}

#[test]
fn test_partial_json_config()
{   let config = assert_ok!(NamesmithConfig::from_json_str(r#"{
      "retry": { "max_attempts": 5 },
      "parser": { "max_words": 3 },
      "default_api_key": "ignored"
    }"#));
    assert_eq!(config.retry.max_attempts, 5);
    assert_eq!(config.retry.initial_backoff_ms, 1000);
    assert_eq!(config.parser.max_words, 3);
    assert_eq!(config.parser.max_chars, 40);
    assert_eq!(config.default_api_key, None);
    assert_eq!(config.sampling, NamesmithConfig::default().sampling);
}

#[test]
fn test_malformed_json_config()
{   let err = assert_err!(NamesmithConfig::from_json_str("{ not json"));
    assert!(matches!(err, Error::InvalidRequest(_)));
}

#[test]
fn test_env_default_key_is_read_once()
{   let mut config = NamesmithConfig::default();
    config.provider.api_key_env = "NAMESMITH_TEST_KEY_THAT_IS_NOT_SET".to_string();
    let config = config.with_env_default_key();
    assert_eq!(config.default_api_key, None);
}
