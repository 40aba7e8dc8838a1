use std::io::{self, BufRead};
use std::path::PathBuf;

use eyre::{Result, WrapErr, bail};
use log::{debug, error, info};

use ytnotes::config::{self, Config, Overrides, Settings};
use ytnotes::pipeline::Pipeline;
use ytnotes::summarize::GeminiClient;
use ytnotes::web::{self, AppState};
use ytnotes::youtube::YouTubeCaptions;

mod cli;

use cli::{Cli, OutputFormat};

fn setup_logging() -> Result<()> {
    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let log_file = log_dir.join("ytnotes.log");

    let target = Box::new(std::fs::OpenOptions::new().create(true).append(true).open(&log_file)?);

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized: {}", log_file.display());
    Ok(())
}

fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ytnotes")
        .join("logs")
}

fn build_after_help() -> String {
    let key_line = match std::env::var(config::API_KEY_ENV) {
        Ok(k) if !k.trim().is_empty() => format!("  \x1b[32m✅\x1b[0m {}", config::API_KEY_ENV),
        _ => format!(
            "  \x1b[31m❌\x1b[0m {}     (not set; also read from ./.env)",
            config::API_KEY_ENV
        ),
    };

    format!(
        "\nREQUIRED ENVIRONMENT:\n{key_line}\n\nConfig file: {}\nLogs are written to: {}",
        config::config_path().display(),
        log_dir().join("ytnotes.log").display()
    )
}

type GeminiPipeline = Pipeline<YouTubeCaptions, GeminiClient>;

fn build_pipeline(client: reqwest::Client, settings: &Settings) -> GeminiPipeline {
    Pipeline::new(
        YouTubeCaptions::new(client.clone(), settings.languages.clone()),
        GeminiClient::new(client, settings),
    )
}

async fn serve(config: &Config, bind: Option<&str>, overrides: Overrides, client: reqwest::Client) -> Result<()> {
    let bind = config::bind_addr(bind.or(config.bind.as_deref()))?;

    // A missing key still serves the form, which then shows the error
    let state: AppState<YouTubeCaptions, GeminiClient> = match Settings::from_env(config, overrides) {
        Ok(settings) => {
            debug!("Resolved settings: {settings:?}");
            AppState::Ready(build_pipeline(client, &settings))
        }
        Err(e) => {
            error!("Configuration error: {e}");
            eprintln!("Configuration error: {e}");
            AppState::Misconfigured(e.to_string())
        }
    };

    eprintln!("Serving on http://{bind}");
    web::serve(bind, state).await.wrap_err_with(|| format!("server on {bind} failed"))?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    setup_logging()?;

    let after_help = build_after_help();
    let cmd = <Cli as clap::CommandFactory>::command().after_help(after_help);
    let matches = cmd.get_matches();
    let cli = <Cli as clap::FromArgMatches>::from_arg_matches(&matches)?;

    // Load config file (non-fatal if missing/invalid)
    let config = Config::load().unwrap_or_else(|e| {
        error!("Ignoring config file: {e}");
        Config::default()
    });

    if cli.verbose {
        let config_path = config::config_path();
        if config_path.exists() {
            eprintln!("Config: {}", config_path.display());
        }
    }

    // CLI flags take priority over the config file
    let overrides = Overrides {
        languages: cli.lang.clone(),
        model: cli.model.clone(),
    };

    let client = reqwest::Client::new();

    if cli.serve {
        return serve(&config, cli.bind.as_deref(), overrides, client).await;
    }

    let settings = Settings::from_env(&config, overrides).wrap_err("cannot summarize without configuration")?;
    debug!("Resolved settings: {settings:?}");

    let format = cli
        .format
        .or_else(|| config.default_format.as_deref().and_then(OutputFormat::from_config))
        .unwrap_or(OutputFormat::Text);

    let pipeline = build_pipeline(client, &settings);

    // Collect URLs: from arg or stdin
    let urls = if let Some(ref url) = cli.url {
        vec![url.clone()]
    } else {
        let stdin = io::stdin();
        stdin.lock().lines().collect::<Result<Vec<_>, _>>()?
    };

    if urls.iter().all(|u| u.trim().is_empty()) {
        bail!("no URL or video ID provided\n\nUsage: ytnotes <URL>\n       echo <URL> | ytnotes\n       ytnotes --serve");
    }

    let mut rendered = Vec::new();
    let mut failures = 0usize;

    for url_input in &urls {
        let url_input = url_input.trim();
        if url_input.is_empty() {
            continue;
        }

        if cli.verbose {
            eprintln!("Summarizing {url_input} with {}", settings.model);
        }

        match pipeline.run(url_input).await {
            Ok(notes) => {
                if cli.verbose {
                    eprintln!(
                        "Video: {}\nLanguage: {}\nThumbnail: {}",
                        notes.video_id, notes.language, notes.thumbnail_url
                    );
                }
                rendered.push(match format {
                    OutputFormat::Text => ytnotes::output::render_text(&notes),
                    OutputFormat::Json => ytnotes::output::render_json(&notes),
                });
            }
            Err(e) => {
                failures += 1;
                error!("{url_input}: {e} (stage: {})", e.stage());
                eprintln!("{url_input}: {}", e.user_message());
            }
        }
    }

    if !rendered.is_empty() {
        let output = rendered.join("\n\n");
        if let Some(ref path) = cli.output {
            std::fs::write(path, &output)?;
            if cli.verbose {
                eprintln!("Output written to: {}", path.display());
            }
        } else {
            println!("{output}");
        }
    }

    if failures > 0 {
        bail!("{failures} video(s) could not be summarized");
    }

    Ok(())
}
