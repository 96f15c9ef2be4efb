/*
 * This file is part of Envdash.
 *
 * Copyright (C) 2025 Envdash contributors
 *
 * Envdash is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Envdash is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Envdash. If not, see <https://www.gnu.org/licenses/>.
 */

use std::io::stdout;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::Terminal;

use envdash::cli::{describe_snapshot, Cli, Commands};
use envdash::config::save_config;
use envdash::controller::ViewController;
use envdash::events::handle_key_event;
use envdash::logger;
use envdash::source::{HttpSensorSource, SensorSource};
use envdash::ui::ui;

// Frame pacing; poll results are picked up at least this often
const FRAME_TIMEOUT: Duration = Duration::from_millis(100);

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.logging {
        logger::init_logging();
        logger::log_event("startup", serde_json::json!({
            "args": std::env::args().collect::<Vec<_>>(),
        }));
    }

    let cfg = cli.resolve_config().context("invalid configuration")?;

    match &cli.command {
        Some(Commands::InitConfig { force }) => {
            let path = cli.config_file();
            if path.exists() && !force {
                eprintln!("{} already exists; pass --force to overwrite", path.display());
                std::process::exit(1);
            }
            save_config(&path, &cfg)?;
            println!("Wrote config to {}", path.display());
            return Ok(());
        }
        Some(Commands::Fetch) => {
            let source = HttpSensorSource::new(cfg.api_url.trim())?;
            match source.fetch() {
                Ok(snapshot) => {
                    for line in describe_snapshot(&snapshot) {
                        println!("{}", line);
                    }
                    return Ok(());
                }
                Err(e) => {
                    eprintln!("fetch error from {}: {}", source.describe(), e);
                    std::process::exit(1);
                }
            }
        }
        None => {}
    }

    // Fail before touching the terminal
    let mut controller = ViewController::new(&cfg)?;

    // Terminal init
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    logger::log_event("tui_start", serde_json::json!({ "source": cfg.api_url }));
    let res = run_app(&mut terminal, &mut controller);
    controller.shutdown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
        logger::log_event("fatal_error", serde_json::json!({ "error": err.to_string() }));
        std::process::exit(1);
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<ratatui::backend::CrosstermBackend<std::io::Stdout>>,
    controller: &mut ViewController,
) -> anyhow::Result<()> {
    loop {
        controller.pump();

        terminal.draw(|f| ui(f, controller.app()))?;

        if event::poll(FRAME_TIMEOUT)? {
            if let Event::Key(key_event) = event::read()? {
                if handle_key_event(controller, key_event)? {
                    return Ok(());
                }
            }
        }
    }
}
