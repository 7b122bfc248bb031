//! Mealscope CLI
//!
//! Terminal dashboard for menu frequency and column rankings:
//! - List categories or types
//! - Show the top-N menu items of a diet category
//! - Rank rows by a type column (MBTI datasets)
//! - Summarize a dataset
//! - Browse interactively

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dialoguer::{Input, Select};
use mealscope::config::{generate_default_config, Config, LoggingConfig};
use mealscope::report::{
    render_categories, render_menu_view, render_rank_view, render_summary, render_types,
    OutputFormat,
};
use mealscope::{DataSource, Dashboard};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "mealscope")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Rank the most frequent menu items in a meal-plan dataset")]
#[command(long_about = "Mealscope loads a CSV dataset from a file or URL, counts menu items per diet category\n(or ranks rows by a type column), and renders the result as a bar chart and table.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Dataset location: local path or http(s) URL
    #[arg(short, long, global = true)]
    pub source: Option<String>,

    /// Config file (default: ~/.config/mealscope/config.toml or ./mealscope.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    /// Encoding to try, in order (repeatable; default: utf-8, euc-kr)
    #[arg(short, long = "encoding", global = true)]
    pub encodings: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List diet categories
    Categories,

    /// Menu frequency for one diet category
    Menu {
        /// Diet category (default: first category in the data)
        #[arg(short, long)]
        category: Option<String>,
        /// Number of items to show
        #[arg(short = 'n', long)]
        top: Option<usize>,
    },

    /// List type columns of an MBTI-style dataset
    Types,

    /// Rank rows by a type column
    Rank {
        /// Type column (default: first type in the data)
        #[arg(short, long = "type", value_name = "TYPE")]
        type_name: Option<String>,
        /// Number of rows to show
        #[arg(short = 'n', long)]
        top: Option<usize>,
    },

    /// Dataset overview: rows, columns, categories, data period
    Summary {
        /// Preview rows to show
        #[arg(long)]
        rows: Option<usize>,
    },

    /// Interactive dashboard
    Browse {
        /// Browse type rankings instead of menu categories
        #[arg(long)]
        mbti: bool,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("⚠ {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("could not load config {}", path.display()))?,
        None => Config::load_default(),
    };

    if let Some(source) = &cli.source {
        config.source.location = source.clone();
    }
    if !cli.encodings.is_empty() {
        config.source.encodings = cli.encodings.clone();
    }

    init_logging(&config.logging);
    tracing::debug!("Data source: {}", config.source.location);

    let format = cli.format;
    let bar_width = config.display.bar_width;

    match cli.command {
        Commands::Config { output } => {
            let content = generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &content)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", content);
                }
            }
        }

        Commands::Categories => {
            let dashboard = Dashboard::new(config)?;
            let dataset = dashboard.dataset().await?;
            let counts = dataset.value_counts(&dashboard.config().columns.menu.category)?;
            print!("{}", render_categories(&counts, format)?);
        }

        Commands::Menu { category, top } => {
            let dashboard = Dashboard::new(config)?;
            let category = match category {
                Some(c) => c,
                None => dashboard
                    .categories()
                    .await?
                    .into_iter()
                    .next()
                    .context("dataset has no categories")?,
            };

            let view = dashboard.menu_frequency(&category, top).await?;
            print!("{}", render_menu_view(&view, format, bar_width)?);
        }

        Commands::Types => {
            let dashboard = Dashboard::new(config)?;
            let types = dashboard.types().await?;
            print!("{}", render_types(&types, format)?);
        }

        Commands::Rank { type_name, top } => {
            let dashboard = Dashboard::new(config)?;
            let type_name = match type_name {
                Some(t) => t,
                None => dashboard
                    .types()
                    .await?
                    .into_iter()
                    .next()
                    .context("dataset has no type columns")?,
            };

            let view = dashboard.rank(&type_name, top).await?;
            print!("{}", render_rank_view(&view, format, bar_width)?);
        }

        Commands::Summary { rows } => {
            if let Some(rows) = rows {
                config.display.preview_rows = rows;
            }
            let dashboard = Dashboard::new(config)?;
            let summary = dashboard.summary().await?;
            print!("{}", render_summary(&summary, format)?);
        }

        Commands::Browse { mbti } => {
            let mut dashboard = Dashboard::new(config)?;
            browse(&mut dashboard, mbti, format).await?;
        }
    }

    Ok(())
}

const RELOAD: &str = "↻ Reload data";
const CHANGE_SOURCE: &str = "⇄ Change source";
const QUIT: &str = "✕ Quit";

/// Select → top-N → render, until the user quits
///
/// Load and analysis errors end only the current pass; the loop keeps going.
async fn browse(dashboard: &mut Dashboard, mbti: bool, format: OutputFormat) -> Result<()> {
    let display = dashboard.config().display.clone();
    let mut top_n = display.top_n_default;

    loop {
        let choices = if mbti {
            dashboard.types().await
        } else {
            dashboard.categories().await
        };

        let choices = match choices {
            Ok(choices) => choices,
            Err(e) => {
                eprintln!("⚠ {}", e);
                Vec::new()
            }
        };

        let mut items: Vec<&str> = choices.iter().map(String::as_str).collect();
        items.extend([RELOAD, CHANGE_SOURCE, QUIT]);

        let prompt = if mbti {
            "Select a type"
        } else {
            "Select a diet category"
        };
        let pick = Select::new()
            .with_prompt(prompt)
            .items(&items)
            .default(0)
            .interact()?;

        let selected = match choices.get(pick) {
            Some(selected) => selected,
            None if items[pick] == RELOAD => {
                if let Err(e) = dashboard.reload().await {
                    eprintln!("⚠ {}", e);
                }
                continue;
            }
            None if items[pick] == CHANGE_SOURCE => {
                let location: String = Input::new()
                    .with_prompt("Path or URL")
                    .with_initial_text(dashboard.source().to_string())
                    .interact_text()?;
                dashboard.set_source(DataSource::parse(&location));
                continue;
            }
            None => return Ok(()),
        };

        top_n = Input::<usize>::new()
            .with_prompt(format!("How many? ({}-{})", display.top_n_min, display.top_n_max))
            .default(top_n)
            .validate_with(|n: &usize| -> Result<(), String> {
                if (display.top_n_min..=display.top_n_max).contains(n) {
                    Ok(())
                } else {
                    Err(format!(
                        "enter a number between {} and {}",
                        display.top_n_min, display.top_n_max
                    ))
                }
            })
            .interact_text()?;

        let rendered = if mbti {
            match dashboard.rank(selected, Some(top_n)).await {
                Ok(view) => render_rank_view(&view, format, display.bar_width).map_err(anyhow::Error::from),
                Err(e) => Err(e.into()),
            }
        } else {
            match dashboard.menu_frequency(selected, Some(top_n)).await {
                Ok(view) => render_menu_view(&view, format, display.bar_width).map_err(anyhow::Error::from),
                Err(e) => Err(e.into()),
            }
        };

        match rendered {
            Ok(text) => println!("\n{}", text),
            Err(e) => eprintln!("⚠ {:#}", e),
        }
    }
}

fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("mealscope={}", config.level)));

    let registry = tracing_subscriber::registry().with(filter);

    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
