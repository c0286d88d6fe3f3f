use chrono::Local;
use color_eyre::{eyre::eyre, Result};
use padbind::controller::GilrsBackend;
use padbind::frontend::HostCommand;
use padbind::mapping::LogicalButton;
use padbind::persistence::ConfigStore;
use padbind::{InputSubsystem, LatchedCore, Polling};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, Level};
use tracing_subscriber::FmtSubscriber;

const USAGE: &str = "usage: padbind [rebind <button>]";

#[tokio::main]
async fn main() -> Result<()> {
    setup()?;

    let store = ConfigStore::default_location();
    let config = store
        .load_or_create()
        .await
        .map_err(|e| eyre!("Failed to load config: {}", e))?;
    let bindings = config.bindings()?;

    let mut backend = GilrsBackend::new()?;
    let mut subsystem = InputSubsystem::create(config.frontend.clone(), bindings);
    subsystem.init_joysticks(&mut backend);

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Ctrl-C received, shutting down");
                ctrl_c.cancel();
            }
            Err(e) => error!("Failed to listen for Ctrl-C: {}", e),
        }
    });

    let mut args = std::env::args().skip(1);
    if let Some(command) = args.next() {
        if command != "rebind" {
            return Err(eyre!("Unknown command {}, {}", command, USAGE));
        }
        let name = args.next().ok_or_else(|| eyre!(USAGE))?;
        let button = LogicalButton::from_name(&name)
            .ok_or_else(|| eyre!("Unknown button {}", name))?;

        let subsystem = rebind(subsystem, &mut backend, button, &cancel);
        store.save(&subsystem.to_config()).await?;
        subsystem.destroy();
        return Ok(());
    }

    run_input_loop(&mut subsystem, &mut backend, &cancel).await;
    subsystem.destroy();
    Ok(())
}

fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    setup_logging_env();
    Ok(())
}

fn setup_logging_env() {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .pretty()
        .init();
}

fn rebind(
    subsystem: InputSubsystem<Polling>,
    backend: &mut GilrsBackend,
    button: LogicalButton,
    cancel: &CancellationToken,
) -> InputSubsystem<Polling> {
    let mut capturing = subsystem.begin_capture();
    // capture blocks until input, timeout or Ctrl-C
    let code =
        tokio::task::block_in_place(|| capturing.capture_and_bind(button, backend, cancel));
    info!("{} is bound to {}", button, code);
    capturing.finish_capture()
}

async fn run_input_loop(
    subsystem: &mut InputSubsystem<Polling>,
    backend: &mut GilrsBackend,
    cancel: &CancellationToken,
) {
    let tick_rate = subsystem.settings().tick_rate_hz.max(1);
    let mut interval = tokio::time::interval(Duration::from_secs(1) / tick_rate);
    let mut core = LatchedCore::new();
    info!("Running input loop at {} Hz", tick_rate);

    let mut event_count = 0;
    let mut last_log_time = Local::now();
    let log_interval = chrono::Duration::seconds(10);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                info!("Input loop cancelled");
                break;
            }
            _ = interval.tick() => {}
        }

        let previous = core.processed;
        let report = subsystem.process_tick(backend, &mut core);
        event_count += report.events;

        if report.pad != previous {
            debug!("Pad {:#06x}", report.pad.to_mask());
        }
        for command in &report.commands {
            handle_command(command);
        }
        if subsystem.touch_mut().take_click() {
            let touch = subsystem.touch().state();
            info!("Touch click at ({}, {})", touch.x, touch.y);
        }
        if report.quit_requested() {
            break;
        }

        let now = Local::now();
        if now - last_log_time > log_interval {
            info!(
                "Input stats: {} events in last {} seconds, {} frames, {} joysticks",
                event_count,
                log_interval.num_seconds(),
                core.frames,
                subsystem.registry().count()
            );
            event_count = 0;
            last_log_time = now;
        }
    }
}

fn handle_command(command: &HostCommand) {
    match command {
        HostCommand::Quit => info!("Quitting"),
        HostCommand::LoadState(slot) => info!("Load state requested for slot {}", slot),
        HostCommand::SaveState(slot) => info!("Save state requested for slot {}", slot),
        other => info!("Host command {:?}", other),
    }
}
