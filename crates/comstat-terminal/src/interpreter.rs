//! Command dispatch: parsed command to text output or app signal.

use comstat_platform::{AudioService, DocumentService, Inventory, TimeService};
use comstat_types::config::ComstatConfig;
use comstat_types::error::{ComstatError, Result};

use crate::catalog::Domain;
use crate::parser::{self, ParsedCommand};
use crate::render::{self, LabelStyle};
use crate::sinks;

/// Output produced by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// Plain text lines.
    Text(String),
    /// Command produced no visible output.
    None,
    /// Signal to the app to run the load monitor until cancelled.
    Monitor,
    /// Signal to the app to terminate with exit code 0.
    Exit,
}

/// Everything a command may touch.
pub struct Environment<'a> {
    /// Inventory snapshot taken at startup.
    pub inventory: &'a Inventory,
    /// Time service for `save` timestamps.
    pub time: Option<&'a dyn TimeService>,
    /// Opens the help document.
    pub docs: Option<&'a dyn DocumentService>,
    /// Background music playback.
    pub audio: Option<&'a mut dyn AudioService>,
    /// File locations.
    pub config: &'a ComstatConfig,
}

/// Parses input lines and dispatches them.
#[derive(Debug, Default)]
pub struct CommandInterpreter;

impl CommandInterpreter {
    pub fn new() -> Self {
        Self
    }

    /// Parse and execute one input line. Blank lines produce no output.
    pub fn execute(&self, line: &str, env: &mut Environment<'_>) -> Result<CommandOutput> {
        if line.trim().is_empty() {
            return Ok(CommandOutput::None);
        }
        self.dispatch(parser::parse_command(line), env)
    }

    /// Run a parsed command.
    pub fn dispatch(
        &self,
        command: ParsedCommand,
        env: &mut Environment<'_>,
    ) -> Result<CommandOutput> {
        match command.domain {
            Domain::Invalid => Err(ComstatError::Command("Invalid command".to_string())),
            Domain::All => Ok(CommandOutput::Text(render::render_all(
                env.inventory,
                LabelStyle::Aligned,
            ))),
            Domain::RealTime => Ok(CommandOutput::Monitor),
            Domain::MusicOn => music_on(env),
            Domain::MusicOff => music_off(env),
            Domain::Save => save(env),
            Domain::Help => help(env),
            Domain::Exit => Ok(CommandOutput::Exit),
            data => {
                let Some(catalog) = data.catalog() else {
                    return Err(ComstatError::Command("Invalid command".to_string()));
                };
                let text = if command.fields.is_empty() {
                    render::render_section(env.inventory, catalog, LabelStyle::Aligned)
                } else {
                    render::render_fields(env.inventory, catalog, &command.fields)
                };
                Ok(CommandOutput::Text(text))
            },
        }
    }
}

fn music_on(env: &mut Environment<'_>) -> Result<CommandOutput> {
    let path = &env.config.music_file;
    let Some(audio) = env.audio.as_mut() else {
        return Err(ComstatError::Audio("Music file not found".to_string()));
    };
    audio.play_loop(path).map_err(|e| {
        log::warn!("musicon: {e}");
        ComstatError::Audio("Music file not found".to_string())
    })?;
    Ok(CommandOutput::Text("Music on!".to_string()))
}

fn music_off(env: &mut Environment<'_>) -> Result<CommandOutput> {
    let Some(audio) = env.audio.as_mut() else {
        return Err(ComstatError::Audio("Can't stop music file".to_string()));
    };
    audio.stop().map_err(|e| {
        log::warn!("musicoff: {e}");
        ComstatError::Audio("Can't stop music file".to_string())
    })?;
    Ok(CommandOutput::Text("Music off!".to_string()))
}

fn save(env: &mut Environment<'_>) -> Result<CommandOutput> {
    let time = env
        .time
        .ok_or_else(|| ComstatError::Platform("no time service available".to_string()))?;
    let path = &env.config.statistics_file;
    sinks::append(path, &render::render_statistics(env.inventory, time.now()?))?;
    log::info!("Statistics appended to {}", path.display());
    Ok(CommandOutput::Text(format!(
        "Statistics were saved in {}!",
        path.display()
    )))
}

fn help(env: &mut Environment<'_>) -> Result<CommandOutput> {
    let docs = env
        .docs
        .ok_or_else(|| ComstatError::Platform("Can't open help page".to_string()))?;
    docs.open(&env.config.help_file).map_err(|e| {
        log::warn!("help: {e}");
        ComstatError::Platform("Can't open help page".to_string())
    })?;
    Ok(CommandOutput::Text("Help page was opened!".to_string()))
}

/// User-facing line for a failed command.
pub fn error_text(error: &ComstatError) -> String {
    match error {
        ComstatError::Command(msg) | ComstatError::Audio(msg) | ComstatError::Platform(msg) => {
            format!("Error! {msg}...")
        },
        other => format!("Error! {other}"),
    }
}
