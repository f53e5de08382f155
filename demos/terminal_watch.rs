//! Terminal Watch - live device type for the current terminal
//!
//! Treats the terminal as the viewport and prints the detected device type
//! every time it changes. Resize the terminal window to see it update.
//!
//! - `q` / `Esc` / `Ctrl+C` quits
//! - `RUST_LOG=spark_device=debug` shows detector logs on stderr
//! - optional first argument: path to a detection config TOML
//!
//! Run with: cargo run --example terminal_watch -- [config.toml]

use std::io::{self, Write};
use std::rc::Rc;
use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal;
use tracing_subscriber::EnvFilter;

use spark_device::prelude::*;

const IDLE_TIMEOUT: Duration = Duration::from_millis(250);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => DetectionConfig::load(path)?,
        None => DetectionConfig::full_ladder(),
    };

    let window = Rc::new(TerminalWindow::detect()?);
    let scheduler = Rc::new(SystemScheduler::new());
    let ctx = DetectionContext::new(Rc::new(StaticSniffer::desktop()), scheduler.clone())
        .with_window(window.clone())
        .with_config(config);

    let detection = use_device_type_detection(ctx);

    terminal::enable_raw_mode()?;
    let outcome = watch(&window, &scheduler, &detection);
    terminal::disable_raw_mode()?;

    outcome
}

fn watch(
    window: &TerminalWindow,
    scheduler: &SystemScheduler,
    detection: &DeviceDetection,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut stdout = io::stdout();
    let mut last_generation = u64::MAX;

    loop {
        if detection.generation() != last_generation {
            last_generation = detection.generation();
            let result = detection.result();
            write!(
                stdout,
                "{:>5}x{:<5} {:<22} orientation={:<9} desktop={} laptop={} tv={}\r\n",
                window.inner_width(),
                window.inner_height(),
                result.device_type_label(),
                result.orientation,
                result.is_desktop,
                result.is_laptop,
                result.is_tv,
            )?;
            stdout.flush()?;
        }

        let timeout = scheduler.next_deadline().unwrap_or(IDLE_TIMEOUT);
        if let Some(event) = window.pump(timeout)? {
            if is_quit(&event) {
                return Ok(());
            }
        }
        scheduler.run_due();
    }
}

fn is_quit(event: &Event) -> bool {
    match event {
        Event::Key(KeyEvent { code: KeyCode::Char('q') | KeyCode::Esc, .. }) => true,
        Event::Key(KeyEvent { code: KeyCode::Char('c'), modifiers, .. }) => {
            modifiers.contains(KeyModifiers::CONTROL)
        }
        _ => false,
    }
}
