mod app;
mod bridge;
mod client;
mod format;
mod render;
mod tenure;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use crossbeam_channel::{unbounded, Receiver};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    fs::OpenOptions,
    io,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
    time::Duration,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::app::{App, AppConfig};
use crate::bridge::UiEvent;
use crate::client::CalcClient;

const TICK: Duration = Duration::from_millis(100);

/// Terminal EMI calculator backed by a remote `/calculate` service.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Base URL of the calculation backend
    #[arg(long, env = "EMI_SERVER_URL", default_value = "http://127.0.0.1:5000")]
    server_url: String,
    /// Longest tenure offered, in months
    #[arg(long, default_value_t = 360)]
    max_months: u32,
    /// Spacing between tenure options, in months
    #[arg(long, default_value_t = 3)]
    step: u32,
    /// Tenure selected at startup, in months
    #[arg(long, default_value_t = 12)]
    default_months: u32,
    /// Initial loan amount
    #[arg(long, default_value = "")]
    amount: String,
    /// Initial annual interest rate in percent
    #[arg(long, default_value = "10")]
    rate: String,
    /// Where log output goes while the terminal UI owns stdout
    #[arg(long, default_value = "emi-calculator.log")]
    log_file: PathBuf,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_file)?;
    info!(server_url = %args.server_url, "starting emi calculator");

    let (cmd_tx, cmd_rx) = unbounded();
    let (ui_tx, ui_rx) = unbounded();
    let client = CalcClient::new(args.server_url);
    let worker = bridge::spawn(Arc::new(client), cmd_rx, ui_tx)
        .context("starting calculation worker")?;

    let app = App::new(
        AppConfig {
            max_months: args.max_months,
            step: args.step,
            default_months: args.default_months,
            amount: args.amount,
            rate: args.rate,
        },
        cmd_tx,
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app, ui_rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // run_app consumed the app and with it the command sender
    if worker.join().is_err() {
        tracing::error!("calculation worker panicked");
    }

    if let Err(err) = res {
        println!("{:?}", err)
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App, ui_rx: Receiver<UiEvent>) -> Result<()> {
    loop {
        for ui_event in ui_rx.try_iter() {
            app.apply(ui_event);
        }

        terminal.draw(|f| ui::draw(f, &mut app))?;

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.handle_key(key) {
                    return Ok(());
                }
            }
        }
    }
}
