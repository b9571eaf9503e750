//! Traffic Dashboard CLI
//!
//! Terminal front end for the traffic analytics backend:
//! - Watch live snapshots (density, signal, source)
//! - Configure signal timing
//! - Generate the traffic graph
//! - Upload/delete videos and switch to the webcam

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use traffic_dashboard::config::{generate_default_config, Config, LoggingConfig};
use traffic_dashboard::{Controller, Dashboard, HttpClient, TerminalView, TracingSink};

type CliController = Controller<HttpClient, TerminalView, TracingSink>;

#[derive(Parser)]
#[command(name = "traffic-dashboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Live dashboard for the traffic flow analytics backend")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend URL, overrides the config file
    #[arg(long, global = true)]
    pub url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Poll snapshots and render them live.
    ///
    /// Commands on stdin: s = signal, g = graph, w = webcam, d = delete,
    /// u <path> = upload, q = quit
    Watch {
        /// Don't print the traffic summary text
        #[arg(long)]
        no_summary: bool,

        /// Where `g` saves the graph PNG
        #[arg(long)]
        graph_output: Option<PathBuf>,
    },

    /// Configure the signal for the current traffic level
    Signal,

    /// Generate the traffic history graph
    Graph {
        /// Save the PNG here
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Upload a video file as the analysis source
    Upload {
        /// Path to the video
        path: PathBuf,
    },

    /// Delete the uploaded video
    Delete,

    /// Switch the analysis source to the webcam
    Webcam,

    /// Show which video source is active
    Status,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        return write_default_config(output.as_deref());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::load_default(),
    };
    if let Some(url) = cli.url {
        config.server.base_url = url;
    }

    init_logging(&config.logging)?;
    tracing::debug!("Backend: {}", config.server.base_url);

    let api = HttpClient::new(&config.server).context("creating HTTP client")?;

    match cli.command {
        Commands::Watch {
            no_summary,
            graph_output,
        } => {
            let mut view = TerminalView::new().show_summary(!no_summary);
            if let Some(path) = graph_output {
                view = view.graph_output(path);
            }
            let controller = build_controller(api, view, &config);
            watch(controller).await?;
        }
        Commands::Signal => {
            // The signal uses the last-known level, so read one snapshot first
            let view = TerminalView::new().show_summary(false);
            let controller = build_controller(api, view, &config);
            controller.poll_once().await;
            controller.configure_signal().await;
        }
        Commands::Graph { output } => {
            let mut view = TerminalView::new();
            if let Some(path) = output {
                view = view.graph_output(path);
            }
            build_controller(api, view, &config).show_graph().await;
        }
        Commands::Upload { path } => {
            build_controller(api, TerminalView::new(), &config)
                .upload_video(&path)
                .await;
        }
        Commands::Delete => {
            build_controller(api, TerminalView::new(), &config)
                .delete_video()
                .await;
        }
        Commands::Webcam => {
            build_controller(api, TerminalView::new(), &config)
                .switch_to_webcam()
                .await;
        }
        Commands::Status => {
            build_controller(api, TerminalView::new(), &config)
                .check_status()
                .await;
        }
        Commands::Config { .. } => unreachable!("handled before config loading"),
    }

    Ok(())
}

fn build_controller(api: HttpClient, view: TerminalView, config: &Config) -> Arc<CliController> {
    let dashboard = Dashboard::new(view, TracingSink, config.dashboard_settings());
    Arc::new(Controller::new(api, dashboard, config.poll_interval()))
}

fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("traffic_dashboard={}", config.level)))
        .context("invalid log level")?;

    // Logs go to stderr so they don't interleave with the dashboard output
    let registry = tracing_subscriber::registry().with(filter);
    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?;
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()?;
    }

    Ok(())
}

fn write_default_config(output: Option<&Path>) -> anyhow::Result<()> {
    let content = generate_default_config();
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("Config written to {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}

/// Run the live dashboard until `q`, end of input plus Ctrl-C, or Ctrl-C
async fn watch(controller: Arc<CliController>) -> anyhow::Result<()> {
    tracing::info!(
        "Traffic dashboard v{} (poll every {:?})",
        env!("CARGO_PKG_VERSION"),
        controller.poll_interval()
    );
    controller.start_monitoring();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    if !dispatch(&controller, line.trim()) {
                        break;
                    }
                }
                Ok(None) => {
                    // No interactive input; keep watching until interrupted
                    tokio::signal::ctrl_c().await.context("waiting for Ctrl-C")?;
                    break;
                }
                Err(e) => {
                    tracing::warn!("stdin closed: {}", e);
                    tokio::signal::ctrl_c().await.context("waiting for Ctrl-C")?;
                    break;
                }
            },
        }
    }

    controller.stop_monitoring();
    Ok(())
}

/// Handle one stdin command. Returns false to quit.
///
/// Actions run as their own tasks, like button handlers, so they overlap
/// with polling instead of pausing it.
fn dispatch(controller: &Arc<CliController>, command: &str) -> bool {
    let (verb, arg) = match command.split_once(char::is_whitespace) {
        Some((verb, arg)) => (verb, arg.trim()),
        None => (command, ""),
    };

    let c = Arc::clone(controller);
    match verb {
        "" => {}
        "q" | "quit" => return false,
        "s" | "signal" => {
            tokio::spawn(async move { c.configure_signal().await });
        }
        "g" | "graph" => {
            tokio::spawn(async move { c.show_graph().await });
        }
        "r" | "refresh" => {
            tokio::spawn(async move { c.refresh_graph().await });
        }
        "w" | "webcam" => {
            tokio::spawn(async move { c.switch_to_webcam().await });
        }
        "d" | "delete" => {
            tokio::spawn(async move { c.delete_video().await });
        }
        "u" | "upload" if !arg.is_empty() => {
            let path = PathBuf::from(arg);
            tokio::spawn(async move { c.upload_video(&path).await });
        }
        _ => {
            eprintln!(
                "commands: s(ignal) g(raph) r(efresh) w(ebcam) \
                 d(elete) u(pload) <path> q(uit)"
            );
        }
    }
    true
}
