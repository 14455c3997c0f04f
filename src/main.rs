//! Application entry point — minutes-gen CLI.
//!
//! # Generate flow
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Resolve the API key (`--api-key` flag → `GEMINI_API_KEY` → stored key).
//! 4. Load the audio file and render the chosen template.
//! 5. Build a [`GeminiClient`] and run the retry/backoff wrapper, printing
//!    progress events to stderr as they arrive.
//! 6. Write the generated text to stdout or `--output`.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tokio::sync::mpsc;

use minutes_gen::{
    cli::{progress_line, Cli, Commands, KeyAction},
    config::{ApiKeyStore, AppConfig, AppPaths},
    gemini::GeminiClient,
    generate::{run_generation, GenerationEvent, RetryPolicy},
    media::AudioPayload,
    template,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match cli.command {
        Commands::Generate {
            file,
            template,
            output,
            model,
            api_key,
        } => generate(file, template, output, model, api_key).await,
        Commands::Templates => {
            list_templates();
            Ok(())
        }
        Commands::Key { action } => manage_key(action),
    }
}

// ---------------------------------------------------------------------------
// generate
// ---------------------------------------------------------------------------

async fn generate(
    file: PathBuf,
    template_id: Option<String>,
    output: Option<PathBuf>,
    model: Option<String>,
    api_key: Option<String>,
) -> Result<()> {
    let mut config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });
    if let Some(model) = model {
        config.gemini.model = model;
    }

    let api_key = resolve_api_key(api_key)?;
    let template = resolve_template(template_id.as_deref(), &config)?;

    let payload = AudioPayload::from_path(&file)?;
    let prompt = template.render(&payload.file_name);
    log::info!(
        "Generating {} for {} ({} bytes, {})",
        template.id,
        payload.file_name,
        payload.data.len(),
        payload.mime_type
    );

    let client = GeminiClient::new(&config.gemini, api_key);
    let policy = RetryPolicy::from_config(&config.retry);

    // Progress printer: consumes events concurrently so the retry loop's
    // sends never back up.
    let (events_tx, mut events_rx) = mpsc::channel::<GenerationEvent>(32);
    let printer = tokio::spawn(async move {
        while let Some(event) = events_rx.recv().await {
            eprintln!("{}", progress_line(&event));
        }
    });

    let result = run_generation(&client, &prompt, &payload, &policy, &events_tx).await;
    drop(events_tx);
    let _ = printer.await;

    let text = result?;
    write_result(&text, output.as_deref())
}

fn resolve_api_key(flag: Option<String>) -> Result<String> {
    if let Some(key) = flag.map(|k| k.trim().to_string()).filter(|k| !k.is_empty()) {
        return Ok(key);
    }
    if let Ok(key) = std::env::var("GEMINI_API_KEY") {
        let key = key.trim().to_string();
        if !key.is_empty() {
            return Ok(key);
        }
    }
    if let Some(key) = ApiKeyStore::new().load()? {
        return Ok(key);
    }
    bail!(
        "no API key configured — run `minutes-gen key set <KEY>`, \
         set GEMINI_API_KEY, or pass --api-key"
    );
}

fn resolve_template(
    id: Option<&str>,
    config: &AppConfig,
) -> Result<&'static template::Template> {
    let id = id.or(config.default_template.as_deref());
    match id {
        None => Ok(template::default_template()),
        Some(id) => template::find(id).with_context(|| {
            let known: Vec<&str> = template::CATALOG.iter().map(|t| t.id).collect();
            format!("unknown template {id:?}; available: {}", known.join(", "))
        }),
    }
}

fn write_result(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("could not write {}", path.display()))?;
            log::info!("Wrote {} characters to {}", text.chars().count(), path.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// templates
// ---------------------------------------------------------------------------

fn list_templates() {
    for t in template::CATALOG {
        println!("{}  {:<18} {}", t.icon, t.id, t.name);
        println!("    {}", t.description);
    }
}

// ---------------------------------------------------------------------------
// key management
// ---------------------------------------------------------------------------

fn manage_key(action: KeyAction) -> Result<()> {
    let store = ApiKeyStore::new();
    match action {
        KeyAction::Set { key } => {
            store.save(&key)?;
            println!("API key saved.");
        }
        KeyAction::Clear => {
            store.clear()?;
            println!("API key cleared.");
        }
        KeyAction::Status => {
            let paths = AppPaths::new();
            match store.load()? {
                Some(_) => println!("API key: saved ({})", paths.api_key_file.display()),
                None => println!("API key: not set"),
            }
        }
    }
    Ok(())
}
