//! ComStat interactive entry point.
//!
//! Collects the hardware inventory once, then reads commands such as
//! `cpu`, `diskgetmodelserialnumber` or `save` until `exit` or end of input.

mod commands;

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};

use comstat_platform::{DesktopPlatform, Inventory, InventoryService, ProcessAudio};
use comstat_terminal::{CommandInterpreter, Environment};
use comstat_types::config::{CONFIG_FILE, ComstatConfig};

use commands::Flow;

const BANNER: &str = r"   ______                            __
  / ____/___  ____ ___  ____  __  __/ /____  _____
 / /   / __ \/ __ `__ \/ __ \/ / / / __/ _ \/ ___/
/ /___/ /_/ / / / / / / /_/ / /_/ / /_/  __/ /
\____/\____/_/ /_/ /_/ .___/\__,_/\__/\___/_/
                    /_/
   _____ __        __  _      __  _
  / ___// /_____ _/ /_(_)____/ /_(_)_________
  \__ \/ __/ __ `/ __/ / ___/ __/ / ___/ ___/
 ___/ / /_/ /_/ / /_/ (__  ) /_/ / /__(__  )
/____/\__/\__,_/\__/_/____/\__/_/\___/____/

";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = ComstatConfig::load(Path::new(CONFIG_FILE))
        .with_context(|| format!("failed to load {CONFIG_FILE}"))?;
    log::info!(
        "Starting ComStat (root {}, monitor every {} ms)",
        config.sysfs_root.display(),
        config.monitor_interval_ms,
    );

    // Set up platform services.
    let platform = DesktopPlatform::new(config.sysfs_root.clone(), config.document_opener.clone());
    let mut audio = ProcessAudio::new(config.audio_player.clone());

    let inventory = platform.collect().unwrap_or_else(|e| {
        log::warn!("Inventory collection failed: {e}");
        Inventory::default()
    });

    let interpreter = CommandInterpreter::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    if config.show_banner {
        write!(stdout, "{BANNER}")?;
    }

    let mut line = String::new();
    loop {
        write!(stdout, "{}", config.prompt)?;
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            writeln!(stdout)?;
            log::info!("End of input");
            break;
        }

        let result = {
            let mut env = Environment {
                inventory: &inventory,
                time: Some(&platform),
                docs: Some(&platform),
                audio: Some(&mut audio),
                config: &config,
            };
            interpreter.execute(&line, &mut env)
        };

        let flow = commands::process_command_output(result, &platform, &config, &mut stdout)?;
        if flow == Flow::Exit {
            break;
        }
    }

    log::info!("ComStat exiting");
    Ok(())
}
