//! impoll - live class histogram in the terminal
//!
//! Commands:
//! - `add` - submit one value
//! - `reset --yes` - clear every value
//! - `show` - print statistics and the chart once
//! - `recent` - list the most recent observations
//! - `watch` - redraw on the configured refresh interval

mod text;

use std::num::NonZeroUsize;
use std::ops::ControlFlow;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use impoll_core::{
    format_value, BinCount, ChartKind, Dashboard, DashboardConfig, RefreshLoop,
    ResetConfirmation, ViewOptions,
};

#[derive(Parser)]
#[command(name = "impoll", about = "Collect numbers from a class and watch the histogram grow")]
struct Cli {
    /// Path to a TOML config file. Defaults to the user config dir.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// SQLite database file, overriding the config.
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit one value.
    Add {
        /// The number to record (a decimal comma is accepted).
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Delete every stored value.
    Reset {
        /// Confirm the reset. Nothing is deleted without it.
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
    /// Print statistics and the chart once.
    Show {
        #[command(flatten)]
        chart: ChartArgs,

        /// Print the view as JSON instead of text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List the most recent observations, oldest first.
    Recent {
        /// How many to list. Defaults to `recent_count` from the config.
        count: Option<NonZeroUsize>,
    },
    /// Redraw every refresh interval until interrupted.
    Watch {
        #[command(flatten)]
        chart: ChartArgs,
    },
}

#[derive(Args)]
struct ChartArgs {
    /// Draw a boxplot instead of a histogram.
    #[arg(long, default_value_t = false)]
    boxplot: bool,

    /// Number of histogram bins (5-60).
    #[arg(long)]
    bins: Option<usize>,

    /// Overlay a kernel density estimate on the histogram.
    #[arg(long, default_value_t = false)]
    density: bool,
}

impl ChartArgs {
    fn apply(&self, options: &mut ViewOptions) -> impoll_core::Result<()> {
        if self.boxplot {
            options.chart.kind = ChartKind::Boxplot;
        }
        if let Some(bins) = self.bins {
            options.chart.bins = BinCount::new(bins)?;
        }
        if self.density {
            options.chart.show_density = true;
        }
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = DashboardConfig::load_or_default(cli.config.as_deref())?;
    if let Some(database) = cli.database {
        config.database = database;
    }
    let dashboard = Dashboard::open(&config)?;

    match cli.command {
        Commands::Add { value } => {
            let observation = dashboard.submit_value(value)?;
            println!(
                "Recorded {} (#{})",
                format_value(Some(observation.value), 2),
                observation.id
            );
        }
        Commands::Reset { yes } => {
            if !yes {
                return Err("refusing to reset without --yes".into());
            }
            dashboard.reset_all(ResetConfirmation::confirmed())?;
            println!("All values cleared.");
        }
        Commands::Show { chart, json } => {
            let mut options = config.view_options();
            chart.apply(&mut options)?;
            let view = dashboard.view(&options)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print!("{}", text::render_view(&view));
            }
        }
        Commands::Recent { count } => {
            let limit = count.unwrap_or_else(|| config.recent_limit());
            let snapshot = dashboard.get_snapshot(Some(limit))?;
            for observation in &snapshot.observations {
                println!(
                    "{:>6}  {:>10}  {}",
                    observation.id,
                    format_value(Some(observation.value), 2),
                    observation.created_at.to_rfc3339()
                );
            }
        }
        Commands::Watch { chart } => {
            let mut options = config.view_options();
            chart.apply(&mut options)?;
            let once = !config.auto_refresh;
            if once {
                info!("auto_refresh is off; drawing once");
            }

            let refresh = RefreshLoop::spawn(
                dashboard,
                options,
                config.refresh_interval(),
                move |view| {
                    match view {
                        // Clear screen and home the cursor
                        Ok(view) => print!("\x1b[2J\x1b[H{}", text::render_view(&view)),
                        Err(err) => eprintln!("Error: {err}"),
                    }
                    if once {
                        ControlFlow::Break(())
                    } else {
                        ControlFlow::Continue(())
                    }
                },
            );
            if !refresh.wait() {
                return Err("refresh loop stopped unexpectedly".into());
            }
        }
    }

    Ok(())
}
