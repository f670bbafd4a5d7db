use anyhow::Context;
use clap::Parser;
use nt_core::ArticleInput;
use nt_inference::{
    create_models, ClassifierAdapter, EntityExtractor, InferenceConfig, ModelKind, SimilarityScorer,
};
use nt_ratings::{DatasetConfig, RatingMatcher};
use nt_search::{create_search, ArticleSearch, Corroborator, SearchConfig, SimilarityAnchor};
use nt_web::AppState;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
struct HumanDuration(Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut total_seconds = 0u64;
        let mut current_number = String::new();
        let mut has_unit = false;

        for c in s.chars() {
            if c.is_ascii_digit() {
                current_number.push(c);
            } else if let Ok(num) = current_number.parse::<u64>() {
                match c {
                    's' => total_seconds += num,
                    'm' => total_seconds += num * 60,
                    'h' => total_seconds += num * 3600,
                    _ => return Err(format!("Invalid duration unit: {}", c)),
                }
                current_number.clear();
                has_unit = true;
            } else if !c.is_whitespace() {
                return Err(format!("Invalid character in duration: {}", c));
            }
        }

        // A bare number is seconds
        if !current_number.is_empty() {
            total_seconds += current_number
                .parse::<u64>()
                .map_err(|_| "Invalid number in duration".to_string())?;
            has_unit = true;
        }

        if !has_unit {
            return Err("Duration must include a number".to_string());
        }

        Ok(HumanDuration(Duration::from_secs(total_seconds)))
    }
}

fn parse_delimiter(s: &str) -> std::result::Result<u8, String> {
    match s {
        "\\t" | "tab" => Ok(b'\t'),
        _ if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        _ => Err(format!("Delimiter must be a single ASCII character, got {:?}", s)),
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Corroborate news articles and look up source ratings", long_about = None)]
pub struct Cli {
    #[arg(long, env = "NT_MODEL", value_enum, default_value_t = ModelKind::Remote)]
    model: ModelKind,
    #[arg(long, env = "HF_API_KEY", hide_env_values = true)]
    hf_api_key: Option<String>,
    #[arg(long, env = "HF_BASE_URL", default_value = nt_inference::DEFAULT_HF_BASE_URL)]
    hf_base_url: String,
    #[arg(long, env = "NER_MODEL", default_value = nt_inference::DEFAULT_NER_MODEL)]
    ner_model: String,
    #[arg(long, env = "SIMILARITY_MODEL", default_value = nt_inference::DEFAULT_SIMILARITY_MODEL)]
    similarity_model: String,
    #[arg(long, env = "CLASSIFIER_URL", default_value = nt_inference::DEFAULT_CLASSIFIER_URL)]
    classifier_url: String,
    #[arg(long, env = "CLASSIFIER_MODEL", default_value = nt_inference::DEFAULT_CLASSIFIER_MODEL)]
    classifier_model: String,
    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true)]
    news_api_key: Option<String>,
    #[arg(long, env = "NEWS_BASE_URL", default_value = nt_search::DEFAULT_NEWS_BASE_URL)]
    news_base_url: String,
    /// Search results requested per query
    #[arg(long, env = "NEWS_PAGE_SIZE", default_value_t = 20)]
    news_page_size: u32,
    /// Similarity calls in flight per request (1 = sequential)
    #[arg(long, env = "SEARCH_CONCURRENCY", default_value_t = 4)]
    search_concurrency: usize,
    #[arg(long, env = "SIMILARITY_ANCHOR", value_enum, default_value_t = SimilarityAnchor::Article)]
    similarity_anchor: SimilarityAnchor,
    /// Source rating dataset
    #[arg(long, env = "RATINGS_PATH", default_value = nt_ratings::DEFAULT_RATINGS_PATH)]
    ratings: PathBuf,
    #[arg(long, env = "RATINGS_DELIMITER", default_value = ",", value_parser = parse_delimiter)]
    ratings_delimiter: u8,
    /// Per-request timeout for upstream services (e.g. 30s, 1m)
    #[arg(long, env = "REQUEST_TIMEOUT", default_value = "30s")]
    request_timeout: HumanDuration,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API
    Serve {
        #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8000")]
        bind: SocketAddr,
    },
    /// Corroborate an article and print the analysis as JSON
    Corroborate {
        /// Article text. Read from --file when omitted.
        content: Option<String>,
        #[arg(long)]
        file: Option<PathBuf>,
        #[arg(long)]
        title: Option<String>,
    },
    /// Look up a source's bias rating
    Rating {
        source: String,
    },
    /// Classify article text
    Classify {
        content: String,
    },
}

impl Cli {
    fn inference_config(&self) -> InferenceConfig {
        InferenceConfig {
            model: self.model,
            api_key: self.hf_api_key.clone(),
            base_url: self.hf_base_url.clone(),
            ner_model: self.ner_model.clone(),
            similarity_model: self.similarity_model.clone(),
            classifier_url: self.classifier_url.clone(),
            classifier_model: self.classifier_model.clone(),
            request_timeout: self.request_timeout.0,
        }
    }

    fn search_config(&self) -> SearchConfig {
        SearchConfig {
            api_key: self.news_api_key.clone(),
            base_url: self.news_base_url.clone(),
            page_size: self.news_page_size,
            concurrency: self.search_concurrency,
            anchor: self.similarity_anchor,
            request_timeout: self.request_timeout.0,
        }
    }

    fn dataset_config(&self) -> DatasetConfig {
        DatasetConfig {
            path: self.ratings.clone(),
            delimiter: self.ratings_delimiter,
        }
    }
}

fn build_state(cli: &Cli) -> anyhow::Result<AppState> {
    let dataset = cli
        .dataset_config()
        .load()
        .context("Failed to load the source rating dataset")?;

    let models = create_models(&cli.inference_config())?;
    let search_config = cli.search_config();
    let backend = create_search(&search_config, cli.model)?;

    let search = ArticleSearch::new(backend, SimilarityScorer::new(models.similarity.clone()))
        .with_anchor(search_config.anchor)
        .with_concurrency(search_config.concurrency);

    Ok(AppState {
        corroborator: Corroborator::new(EntityExtractor::new(models.recognizer.clone()), search),
        classifier: ClassifierAdapter::new(models.classifier.clone()),
        ratings: RatingMatcher::new(Arc::new(dataset)),
    })
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let state = build_state(&cli)?;

    match cli.command {
        Commands::Serve { bind } => {
            info!("🚀 Starting server with {} source ratings", state.ratings.dataset().len());
            nt_web::serve(state, bind).await?;
        }
        Commands::Corroborate { content, file, title } => {
            let content = match (content, file) {
                (Some(content), _) => content,
                (None, Some(path)) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                (None, None) => anyhow::bail!("Provide article text or --file"),
            };
            let input = ArticleInput { content, title };
            print_json(&state.corroborator.corroborate(&input).await?)?;
        }
        Commands::Rating { source } => {
            nt_ratings::validate_source(&source)?;
            print_json(&state.ratings.lookup(&source))?;
        }
        Commands::Classify { content } => {
            print_json(&state.classifier.classify(&content).await?)?;
        }
    }

    Ok(())
}
