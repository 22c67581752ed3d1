mod config;

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use config::WrapperConfig;
use mc_rs_command::properties;
use mc_rs_command::{Dispatcher, Instruction, StateStore};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWriteExt};
use tokio::process::{ChildStdin, Command};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Period of the extension clock.
const TICK: Duration = Duration::from_secs(1);

#[tokio::main]
async fn main() {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "wrapper.toml".into());
    let config = match WrapperConfig::load(&config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load {config_path}: {e}");
            std::process::exit(1);
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!(
        "MC-RS wrapper v{} starting: {} {}",
        env!("CARGO_PKG_VERSION"),
        config.server.command,
        config.server.args.join(" ")
    );

    let working_dir = PathBuf::from(&config.server.working_dir);
    let properties_path = working_dir.join(&config.files.properties);
    if config.server.temp_mobs {
        toggle_mobs(&properties_path, "Temporarily toggling mobs");
    }

    let mut dispatcher = Dispatcher::new(config.extensions.to_options())
        .with_ops(properties::load_ops(&working_dir.join(&config.files.ops)))
        .with_properties(properties::load_properties(&properties_path))
        .with_store(StateStore::new(working_dir.join(&config.files.data_dir)));

    let mut child = match Command::new(&config.server.command)
        .args(&config.server.args)
        .current_dir(&working_dir)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
    {
        Ok(child) => child,
        Err(e) => {
            eprintln!("Failed to start {}: {e}", config.server.command);
            std::process::exit(1);
        }
    };
    info!("Server process started (pid {:?})", child.id());

    let (Some(mut server_in), Some(stdout), Some(stderr)) =
        (child.stdin.take(), child.stdout.take(), child.stderr.take())
    else {
        eprintln!("Server process has no piped stdio");
        std::process::exit(1);
    };

    // Server output arrives on both streams
    let (line_tx, mut line_rx) = mpsc::channel::<String>(256);
    forward_lines(stdout, line_tx.clone());
    forward_lines(stderr, line_tx);

    let (shutdown_tx, mut shutdown_rx) = tokio::sync::watch::channel(false);

    // Handle Ctrl+C
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Shutdown signal received");
        let _ = shutdown_tx.send(true);
    });

    // Operator console: lines are passed to the server verbatim
    let (console_tx, mut console_rx) = mpsc::channel::<String>(32);
    tokio::spawn(async move {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        let mut lines = stdin.lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let line = line.trim().to_string();
            if !line.is_empty() && console_tx.send(line).await.is_err() {
                break;
            }
        }
    });

    if config.server.auto_save {
        send(&mut server_in, "save-on").await;
    }

    let mut tick_interval = tokio::time::interval_at(tokio::time::Instant::now() + TICK, TICK);
    loop {
        tokio::select! {
            line = line_rx.recv() => {
                match line {
                    Some(line) => {
                        println!("{line}");
                        dispatcher.handle_line(&line);
                    }
                    None => {
                        info!("Server output closed");
                        break;
                    }
                }
            }
            _ = tick_interval.tick() => {
                dispatcher.tick();
            }
            Some(line) = console_rx.recv() => {
                send(&mut server_in, &line).await;
            }
            _ = shutdown_rx.changed() => {
                if *shutdown_rx.borrow() {
                    info!("Stopping server...");
                    send(&mut server_in, "save-all").await;
                    send(&mut server_in, "stop").await;
                    break;
                }
            }
        }
        flush(&mut server_in, dispatcher.drain_output()).await;
    }

    info!("Saving extension state...");
    dispatcher.shutdown();
    let welcome = &dispatcher.options().welcome;
    if !welcome.is_empty() {
        info!("The current welcome message is: {welcome}");
    }

    // Keep reading while the server stops so its pipes never fill up
    let drain = tokio::spawn(async move {
        while let Some(line) = line_rx.recv().await {
            println!("{line}");
        }
    });

    drop(server_in);
    match child.wait().await {
        Ok(status) => info!("Server process exited ({status})"),
        Err(e) => warn!("Failed to wait for server process: {e}"),
    }
    let _ = drain.await;

    if config.server.temp_mobs {
        toggle_mobs(&properties_path, "Restoring previous mob state");
    }
    info!("Wrapper shut down.");
}

/// Send each line of `reader` to `tx` until either side closes.
fn forward_lines<R>(reader: R, tx: mpsc::Sender<String>)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = tokio::io::BufReader::new(reader).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if tx.send(line).await.is_err() {
                break;
            }
        }
    });
}

async fn flush(server_in: &mut ChildStdin, instructions: Vec<Instruction>) {
    for instruction in instructions {
        send(server_in, &instruction.to_string()).await;
    }
}

async fn send(server_in: &mut ChildStdin, line: &str) {
    let result = async {
        server_in.write_all(line.as_bytes()).await?;
        server_in.write_all(b"\n").await?;
        server_in.flush().await
    }
    .await;
    if let Err(e) = result {
        warn!("Failed to write to server: {e}");
    }
}

fn toggle_mobs(path: &Path, action: &str) {
    match properties::toggle_mobs(path) {
        Ok(enabled) => info!("{action}, spawn-monsters={enabled}"),
        Err(e) => warn!("Failed to toggle mobs in {}: {e}", path.display()),
    }
}
