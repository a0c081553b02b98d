//! netfail - Entry Point

use clap::Parser;
use netfail::config::CliOverrides;
use netfail::figure::{render, GraphModel};
use netfail::graph_layout::LayoutKind;
use netfail::html::{self, ReportData};
use netfail::model::{AppError, Metric, NodeId};
use netfail::{pipeline, report, view};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

/// Visualize send/receive failures between cluster nodes
#[derive(Parser, Debug)]
#[command(name = "netfail")]
#[command(version)]
#[command(about = "Visualize send/receive failures between cluster nodes from network error logs")]
pub struct Args {
    /// Log files to analyze
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Path of the HTML report [default: network_errors.html]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Open the interactive terminal view instead of writing a report
    #[arg(short, long)]
    pub interactive: bool,

    /// Failures to show: send, receive or combined
    #[arg(long)]
    pub metric: Option<Metric>,

    /// Start with this node selected
    #[arg(long)]
    pub node: Option<NodeId>,

    /// Hide node pairs with fewer failures than this
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub threshold: Option<u64>,

    /// Number of nodes in the ranking table
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub top: Option<u64>,

    /// Node placement: grid, circle or spiral
    #[arg(long)]
    pub layout: Option<LayoutKind>,

    /// Only parse the last N lines of each file
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_lines: Option<u64>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            output: self.output.clone(),
            metric: self.metric,
            threshold: self.threshold,
            top_n: self.top.map(|n| n as usize),
            layout: self.layout,
            max_lines: self.max_lines.map(|n| n as usize),
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Run failed");
            eprintln!("netfail: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), AppError> {
    // Defaults → Config File → Env Vars → CLI Args
    let config = netfail::config::resolve(args.config.clone(), args.overrides())?;

    netfail::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let analysis = pipeline::analyze(&args.files, config.max_lines)?;

    let total = analysis.aggregate.total(Metric::Combined);
    let top = analysis.aggregate.top_ranked(config.top_n);
    print!("{}", report::summary_text(&analysis.summary));
    println!();
    print!("{}", report::ranking_text(&top, total));
    if !analysis.report.malformed().is_empty() {
        println!();
        print!("{}", report::malformed_text(analysis.report.malformed()));
    }

    let view_state = pipeline::initial_view(
        &analysis.aggregate,
        config.metric,
        config.threshold,
        args.node.clone(),
    );
    let model = GraphModel::new(analysis.aggregate, config.layout);

    if args.interactive {
        view::run_interactive(model, view_state, config.top_n)?;
        return Ok(());
    }

    let figure = render(&model, &view_state);
    let cumulative = model.aggregate().cumulative_share(Metric::Combined);
    html::write_report(
        &config.output,
        &ReportData {
            figure: &figure,
            summary: &analysis.summary,
            top: &top,
            total,
            cumulative: &cumulative,
        },
    )?;
    println!();
    println!("Report written to {}", config.output.display());

    Ok(())
}
