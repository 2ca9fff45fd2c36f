use std::io::{self, Write};
use std::thread;

use comstat_platform::Platform;
use comstat_terminal::{CancelToken, CommandOutput, error_text, run_monitor};
use comstat_types::config::ComstatConfig;
use comstat_types::error::Result;

/// What the read-eval loop does after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Print a command result or act on its signal.
pub fn process_command_output(
    result: Result<CommandOutput>,
    platform: &dyn Platform,
    config: &ComstatConfig,
    out: &mut dyn Write,
) -> io::Result<Flow> {
    match result {
        Ok(CommandOutput::Text(text)) if text.is_empty() => {},
        Ok(CommandOutput::Text(text)) => {
            write!(out, "\n{text}")?;
            if !text.ends_with('\n') {
                writeln!(out)?;
            }
        },
        Ok(CommandOutput::None) => {},
        Ok(CommandOutput::Monitor) => monitor_until_enter(platform, config, out)?,
        Ok(CommandOutput::Exit) => return Ok(Flow::Exit),
        Err(e) => {
            log::debug!("Command failed: {e}");
            writeln!(out, "\n{}", error_text(&e))?;
        },
    }
    Ok(Flow::Continue)
}

/// Run the load monitor until the user presses Enter.
fn monitor_until_enter(
    platform: &dyn Platform,
    config: &ComstatConfig,
    out: &mut dyn Write,
) -> io::Result<()> {
    writeln!(out, "\nPress Enter to stop monitoring.")?;
    let token = CancelToken::new();
    let watcher = {
        let token = token.clone();
        thread::spawn(move || {
            let mut line = String::new();
            let _ = io::stdin().read_line(&mut line);
            token.cancel();
        })
    };

    let result = run_monitor(
        platform,
        platform,
        &config.log_file,
        out,
        &token,
        config.monitor_interval(),
    );
    match result {
        Ok(_) => {
            let _ = watcher.join();
            writeln!(out, "\nLogs were saved in {}!", config.log_file.display())?;
        },
        Err(e) => {
            log::warn!("Monitor aborted: {e}");
            writeln!(out, "\n{}", error_text(&e))?;
            writeln!(out, "Press Enter to return to the prompt.")?;
            out.flush()?;
            let _ = watcher.join();
        },
    }
    Ok(())
}
