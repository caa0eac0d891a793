//! CLI command definitions and handlers

use clap::Subcommand;
use std::path::PathBuf;
use std::sync::Arc;

use crate::core::config::TranslatorConfig;
use crate::core::models::{EngineParameters, TranslationMode};
use crate::core::preferences::{FilePreferences, PreferenceStore, Preferences, StaticPreferences};
use crate::core::translator::Translator;

/// Commands for Metadata Translator
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translate a piece of text
    Translate {
        /// Text to translate
        #[arg(short, long)]
        text: String,

        /// Target language (e.g. en, zh-CN)
        #[arg(short, long, default_value = "en")]
        lang: String,

        /// Printed instead when translation is skipped or fails
        #[arg(long)]
        fallback: Option<String>,

        /// Preference file (TOML/JSON/YAML); overrides --mode/--engine/--params
        #[arg(long)]
        prefs: Option<PathBuf>,

        /// Translation mode
        #[arg(long, default_value = "Title and Summary")]
        mode: String,

        /// Translation engine
        #[arg(short, long, default_value = "google")]
        engine: String,

        /// Engine parameters, e.g. "appid=1,key=abc,to=fr"
        #[arg(short, long, default_value = "")]
        params: String,
    },

    /// Show how an engine parameter table is parsed
    Params {
        /// Parameter table, e.g. "appid=1,key=abc,to=fr"
        table: String,
    },
}

/// Handle translate command
pub async fn handle_translate(
    text: String,
    lang: String,
    fallback: Option<String>,
    prefs: Option<PathBuf>,
    mode: String,
    engine: String,
    params: String,
) -> anyhow::Result<()> {
    use tracing::info;

    let store: Arc<dyn PreferenceStore> = match prefs {
        Some(path) => {
            info!("Reading preferences from {}", path.display());
            Arc::new(FilePreferences::new(path))
        }
        None => Arc::new(StaticPreferences::new(Preferences {
            mode: mode.parse::<TranslationMode>()?,
            engine,
            engine_parameters: params,
        })),
    };

    let config = TranslatorConfig::from_env()?;
    info!("Using translation API at {}", config.translate_url());

    let translator = Translator::from_config(&config, store)?;

    match translator.translate(&text, &lang, fallback).await {
        Some(translated) => println!("{}", translated),
        None => eprintln!("No translation produced"),
    }

    Ok(())
}

/// Handle params command
pub fn handle_params(table: String) -> anyhow::Result<()> {
    let parsed = EngineParameters::parse(&table);
    println!("{}", serde_json::to_string_pretty(&parsed)?);
    Ok(())
}
