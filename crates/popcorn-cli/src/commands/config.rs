use super::prompts;
use super::AppContext;
use crate::output::{Output, OutputFormat};
use crate::progress::is_interactive;
use crate::ConfigCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use owo_colors::OwoColorize;
use popcorn_config::{Config, API_KEY_ENV, PLACEHOLDER_API_KEY};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::warn;

pub fn run_config(ctx: &AppContext, cmd: ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => show_config(ctx, full, output),
        ConfigCommands::Init { force } => init_config(ctx, force, output),
        ConfigCommands::SetApiKey { key } => set_api_key(ctx, &key, output),
    }
}

fn show_config(ctx: &AppContext, full: bool, output: &Output) -> Result<()> {
    let config = &ctx.config;
    let config_file = ctx.paths.config_file();
    let key_display = if full { config.omdb.api_key.clone() } else { mask_string(&config.omdb.api_key) };
    let env_override = std::env::var(API_KEY_ENV).is_ok();

    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }

            if !config_file.exists() {
                output.warn(format!("Configuration file not found at: {}", config_file.display()));
                output.info("Showing defaults. Run 'popcorn config init' to create it.");
            }

            let mut table = Table::new();
            table.set_header(vec![
                Cell::new("Setting").fg(comfy_table::Color::Cyan).add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Value").fg(comfy_table::Color::Cyan).add_attribute(comfy_table::Attribute::Bold),
            ]);
            table.add_row(vec![Cell::new("Config File"), Cell::new(config_file.display().to_string())]);
            table.add_row(vec![
                Cell::new("OMDb Configured"),
                Cell::new(if config.is_omdb_configured() { "✓".green().to_string() } else { "✗".red().to_string() }),
            ]);
            table.add_row(vec![
                Cell::new("OMDb API Key"),
                Cell::new(if env_override { format!("{} (from {})", key_display, API_KEY_ENV) } else { key_display }),
            ]);
            table.add_row(vec![Cell::new("OMDb URL"), Cell::new(&config.omdb.base_url)]);
            table.add_row(vec![Cell::new("Min Query Length"), Cell::new(config.search.min_query_length)]);
            table.add_row(vec![Cell::new("Watched Key"), Cell::new(&config.storage.watched_key)]);
            table.add_row(vec![Cell::new("Storage File"), Cell::new(ctx.paths.storage_file().display().to_string())]);
            table.add_row(vec![Cell::new("Log Level"), Cell::new(&config.logging.level)]);
            table.add_row(vec![
                Cell::new("Log File"),
                Cell::new(
                    config
                        .logging
                        .file
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "<stderr>".bright_black().to_string()),
                ),
            ]);
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            println!("{}", table);
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "config_file": config_file.display().to_string(),
                "omdb": {
                    "configured": config.is_omdb_configured(),
                    "api_key": key_display,
                    "api_key_from_env": env_override,
                    "base_url": config.omdb.base_url,
                },
                "search": { "min_query_length": config.search.min_query_length },
                "storage": {
                    "watched_key": config.storage.watched_key,
                    "file": ctx.paths.storage_file().display().to_string(),
                },
                "logging": {
                    "level": config.logging.level,
                    "file": config.logging.file.as_ref().map(|p| p.display().to_string()),
                },
            }));
        }
    }

    Ok(())
}

fn init_config(ctx: &AppContext, force: bool, output: &Output) -> Result<()> {
    let config_file = ctx.paths.config_file();
    if config_file.exists() && !force {
        output.warn(format!("Configuration already exists at: {}", config_file.display()));
        output.info("Use --force to overwrite it.");
        return Ok(());
    }

    ctx.paths
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create configuration directories: {}", e))?;

    let mut config = Config::default();
    if is_interactive() && output.format() == OutputFormat::Human {
        print_section_header("OMDb API Setup", output);
        output.println("Request a free key at https://www.omdbapi.com/apikey.aspx");
        output.println("");
        loop {
            let input = prompts::prompt_string("OMDb API key (empty to set later)", None)?;
            let input = input.trim();
            if input.is_empty() {
                break;
            }
            match validate_api_key(input) {
                Ok(()) => {
                    config.omdb.api_key = input.to_string();
                    break;
                }
                Err(e) => output.error(format!("Validation error: {}", e)),
            }
        }
    }

    save(&config, &config_file)?;
    output.success(format!("Configuration written to {}", config_file.display()));
    if !config.is_omdb_configured() {
        output.info(format!(
            "Set your key later with 'popcorn config set-api-key <KEY>' or the {} environment variable.",
            API_KEY_ENV
        ));
    }
    Ok(())
}

fn set_api_key(ctx: &AppContext, key: &str, output: &Output) -> Result<()> {
    let key = key.trim();
    validate_api_key(key).map_err(|e| eyre!("{}", e))?;

    let config_file = ctx.paths.config_file();
    if !config_file.exists() {
        output.info("Configuration file not found. Creating default configuration...");
    }
    if let Some(backup) = write_api_key(&config_file, key)? {
        output.warn(format!(
            "{} could not be parsed. Backed up to {} and rewrote it with defaults.",
            config_file.display(),
            backup.display()
        ));
    }
    output.success(format!("OMDb API key saved to {}", config_file.display()));
    Ok(())
}

/// Store `key` in the config file at `path`, keeping its other settings.
/// An unparseable file is copied to `config.toml.bak` and replaced with
/// defaults; the backup path is returned in that case.
fn write_api_key(path: &PathBuf, key: &str) -> Result<Option<PathBuf>> {
    // Start from the file, not the loaded config, so an environment key is never persisted
    let (mut config, backup) = if path.exists() {
        match Config::load_from_file(path) {
            Ok(config) => (config, None),
            Err(e) => {
                warn!("Ignoring unparseable config {}: {:#}", path.display(), e);
                let backup = backup_path(path);
                std::fs::copy(path, &backup)
                    .map_err(|e| eyre!("Failed to back up {}: {}", path.display(), e))?;
                (Config::default(), Some(backup))
            }
        }
    } else {
        (Config::default(), None)
    };

    config.omdb.api_key = key.to_string();
    save(&config, path)?;
    Ok(backup)
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".bak");
    path.with_file_name(name)
}

fn save(config: &Config, path: &PathBuf) -> Result<()> {
    config
        .save_to_file(path)
        .map_err(|e| eyre!("Failed to save config to {}: {}", path.display(), e))
}

fn mask_string(s: &str) -> String {
    if s.is_empty() || s == PLACEHOLDER_API_KEY {
        return "<not set>".to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}

/// OMDb keys are short alphanumeric tokens
fn validate_api_key(input: &str) -> Result<(), &'static str> {
    if input.is_empty() {
        return Err("API key cannot be empty");
    }
    if input == PLACEHOLDER_API_KEY {
        return Err("API key is still the placeholder value");
    }
    if !input.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err("API key may only contain letters and digits");
    }
    Ok(())
}

fn print_section_header(title: &str, output: &Output) {
    output.println("");
    output.println(format!("{}", title.bold().bright_cyan()));
    output.println(format!("{}", "─".repeat(title.len()).bright_cyan()));
}
