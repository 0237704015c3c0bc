use clap::{Arg, Command};
use std::sync::Arc;
use tarjuma::{
    ContentNode, HttpBackend, Language, MockBackend, MockMode, TranslationBackend,
    TranslationService,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("warn".parse()?),
        )
        .init();

    let matches = Command::new("tarjuma")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Translate textbook phrases or content documents to Urdu")
        .arg(
            Arg::new("text")
                .help("Source text to translate")
                .index(1),
        )
        .arg(
            Arg::new("document")
                .long("document")
                .short('d')
                .help("Path to a JSON content document to translate instead of a phrase"),
        )
        .arg(
            Arg::new("target")
                .long("target")
                .short('t')
                .help("Target language code")
                .default_value("ur"),
        )
        .arg(
            Arg::new("endpoint")
                .long("endpoint")
                .short('e')
                .help("Translation API base URL (default: TARJUMA_API_URL, else http://localhost:8000)"),
        )
        .arg(
            Arg::new("mock")
                .long("mock")
                .short('m')
                .help("Use the offline mock backend instead of the HTTP API")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Show backend and cache details")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let target = match matches.get_one::<String>("target") {
        Some(code) => Language::from_code(code)
            .ok_or_else(|| format!("Unsupported language code: {} (expected en or ur)", code))?,
        None => Language::Urdu,
    };
    let verbose = matches.get_flag("verbose");

    let backend: Arc<dyn TranslationBackend> = if matches.get_flag("mock") {
        Arc::new(MockBackend::new(MockMode::Suffix))
    } else {
        let backend = match matches.get_one::<String>("endpoint") {
            Some(url) => HttpBackend::new(url.clone())?,
            None => HttpBackend::from_env()
                .or_else(|_| HttpBackend::new("http://localhost:8000"))?,
        };
        Arc::new(backend)
    };

    if verbose {
        eprintln!("backend: {}", backend.backend_name());
        eprintln!("target:  {}", target.code());
    }

    let service = TranslationService::new(backend);

    match matches.get_one::<String>("document") {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            let document: ContentNode = serde_json::from_str(&raw)?;
            if verbose {
                eprintln!("leaves:  {}", document.text_leaves().len());
            }
            let translated = service.translate_tree(&document, target).await;
            println!("{}", serde_json::to_string_pretty(&translated)?);
        }
        None => {
            let text = matches
                .get_one::<String>("text")
                .ok_or("Provide a text argument or --document <path>")?;
            let translated = service.translate(text, target).await;
            println!("{}", translated);
        }
    }

    if verbose {
        eprintln!("cached:  {} entries", service.cache().len());
    }

    Ok(())
}
