//! namesmith command line front end.
//!
//! Collects the request fields, runs one generation and writes the
//! names to a spreadsheet.

use std::path::PathBuf;
use std::process::ExitCode;
use clap::Parser;
use log::{debug, error};
use namesmith::{
  Language, NameLength, NameStyle, NamesmithConfig, ResultExporter
};

/// Generate brand-name candidates for a business.
#[derive(Parser, Debug)]
#[command(name = "namesmith")]
#[command(version)]
#[command(
  long_about = "Generate brand-name candidates with Gemini and export them to a spreadsheet.\n\nExample usage:\n  namesmith --business-type \"Tech startup\" --keywords \"innovation, speed\" --style \"Modern & Tech\" --count 5"
)]
struct Cli
{   /// What the business does (e.g. "Tech startup")
    #[arg(short, long)]
    business_type: Option<String>

  , /// Comma-separated brand values or keywords
    #[arg(short, long)]
    keywords: Option<String>

  , /// Brand personality (e.g. "Modern, friendly, professional")
    #[arg(short, long)]
    personality: Option<String>

  , /// Name style ("Modern & Tech", "minimal-clean", "any", ...)
    #[arg(long, default_value = "Creative & Unique")]
    style: NameStyle

  , /// Preferred length (any, short, medium, long)
    #[arg(long, default_value = "any")]
    length: NameLength

  , /// Language of the names
    #[arg(long, default_value = "English")]
    language: Language

  , /// Target market (e.g. "Global", "Latin America")
    #[arg(short, long)]
    market: Option<String>

  , /// How many names to ask for (1-15)
    #[arg(short = 'n', long, default_value_t = namesmith::request::DEFAULT_COUNT)]
    count: usize

  , /// API key; falls back to the configured environment variable
    #[arg(long)]
    api_key: Option<String>

  , /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>

  , /// Where to write the spreadsheet
    #[arg(short, long, default_value = namesmith::export::SUGGESTED_FILE_NAME)]
    output: PathBuf

  , /// Skip writing the spreadsheet
    #[arg(long)]
    no_export: bool

  , /// Log level (trace, debug, info, warn, error); RUST_LOG wins
    #[arg(short, long, default_value = "warn")]
    log_level: String
}

#[tokio::main]
async fn main() -> ExitCode
{   let cli = Cli::parse();
    env_logger::Builder::from_env(
      env_logger::Env::default().default_filter_or(cli.log_level.as_str())
    ).init();
    debug!("Requested {} names in {}", cli.count, cli.language);

    match run(cli).await
    {   Ok(()) => ExitCode::SUCCESS
      , Err(e) => {
          error!("namesmith failed ({})", e.kind());
          eprintln!("{}", e);
          if e.is_retryable_by_user()
          {   eprintln!("You can run the command again.");
          }
          ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), namesmith::Error>
{   let config = match &cli.config
    {   Some(path) => NamesmithConfig::from_json_file(path)?
      , None => NamesmithConfig::default()
    }.with_env_default_key();

    let mut builder = namesmith::GenerationRequest::builder()
      .style(cli.style)
      .length(cli.length)
      .language(cli.language)
      .count(cli.count);
    if let Some(business_type) = cli.business_type
    {   builder = builder.business_type(business_type);
    }
    if let Some(keywords) = &cli.keywords
    {   builder = builder.keywords(
          namesmith::request::parse_keywords(keywords)
        );
    }
    if let Some(personality) = cli.personality
    {   builder = builder.personality(personality);
    }
    if let Some(market) = cli.market
    {   builder = builder.market(market);
    }
    let request = builder.build()?;

    let client = namesmith::GenerationClient::new(&config);
    let parser = namesmith::ResponseParser::new(config.parser.clone());
    let names = namesmith::pipeline::generate_names(
      &client,
      &parser,
      &request,
      cli.api_key.as_deref()
    ).await?;

    for (index, name) in names.iter().enumerate()
    {   println!("{:>2}. {}", index + 1, name);
    }

    if !cli.no_export
    {   ResultExporter::new()
          .export(&names)
          .write_xlsx(&cli.output)?;
        println!("\nSaved to {}", cli.output.display());
    }
    Ok(())
}
