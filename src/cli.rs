//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::chart_svg::SvgChartAdapter;
use crate::adapters::csv_data_adapter::CsvDataAdapter;
use crate::adapters::csv_export_adapter::{CsvExportAdapter, EXPORT_FILE_NAME};
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::aggregate::aggregate;
use crate::domain::config_validation::{configured_months, validate_analysis_config};
use crate::domain::error::CashprodError;
use crate::domain::month::{parse_months, validate_month_label, MonthInput};
use crate::domain::validation::partition_rows;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

pub const DEFAULT_DATA_DIR: &str = "data";

#[derive(Parser, Debug)]
#[command(name = "cashprod", about = "Monthly cash-productivity analyzer")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Aggregate month inputs and export the summary table
    Summarize {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        chart: Option<PathBuf>,
        #[arg(long)]
        months: Option<String>,
        #[arg(long)]
        dry_run: bool,
    },
    /// Validate configuration and month input rows
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List months that have data files
    ListMonths {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Start the web form server
    Serve {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Summarize {
            config,
            output,
            chart,
            months,
            dry_run,
        } => {
            if dry_run {
                run_dry_run(&config, months.as_deref())
            } else {
                run_summarize(&config, output.as_ref(), chart.as_ref(), months.as_deref())
            }
        }
        Command::Validate { config } => run_validate(&config),
        Command::ListMonths { config } => run_list_months(&config),
        Command::Serve { config } => run_serve(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = CashprodError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// `--months` wins over `[analysis] months`.
pub fn resolve_months(months_override: Option<&str>, config: &dyn ConfigPort) -> Vec<String> {
    if let Some(list) = months_override {
        return list
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }

    if let Some(list) = config.get_string("analysis", "months") {
        return list
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }

    vec![]
}

pub fn data_dir(config: &dyn ConfigPort) -> PathBuf {
    PathBuf::from(
        config
            .get_string("analysis", "data_dir")
            .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string()),
    )
}

/// Pair each month's rows from the data port with its cash balances from the
/// month's config section. Absent balances default to 0.0, matching the
/// original form defaults.
pub fn build_month_inputs(
    config: &dyn ConfigPort,
    data_port: &dyn DataPort,
    months: &[String],
) -> Result<Vec<MonthInput>, CashprodError> {
    let mut inputs = Vec::with_capacity(months.len());

    for month in months {
        let rows = data_port.fetch_rows(month)?;
        inputs.push(MonthInput {
            month: month.clone(),
            rows,
            cash_start: config.get_double(month, "cash_start", 0.0),
            cash_end: config.get_double(month, "cash_end", 0.0),
        });
    }

    Ok(inputs)
}

fn warn_skipped(input: &MonthInput) {
    let partition = partition_rows(&input.rows);
    for skipped in &partition.skipped {
        match &skipped.name {
            Some(name) => eprintln!(
                "Warning: {}: skipping row {} ({}): {}",
                input.month,
                skipped.index + 1,
                name,
                skipped.reason
            ),
            None => eprintln!(
                "Warning: {}: skipping row {}: {}",
                input.month,
                skipped.index + 1,
                skipped.reason
            ),
        }
    }
}

fn run_summarize(
    config_path: &PathBuf,
    output_path: Option<&PathBuf>,
    chart_path: Option<&PathBuf>,
    months_override: Option<&str>,
) -> ExitCode {
    // Stage 1: Load config
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    // Stage 2: Validate analysis config
    if let Err(e) = validate_analysis_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    // Stage 3: Resolve months (an override bypasses the config list, so its
    // labels still need checking)
    let months = resolve_months(months_override, &adapter);
    if months.is_empty() {
        eprintln!("error: no months configured");
        return ExitCode::from(2);
    }
    for label in &months {
        if let Err(e) = validate_month_label(label) {
            eprintln!("error: {e}");
            return (&e).into();
        }
    }

    // Stage 4: Fetch rows per month
    let dir = data_dir(&adapter);
    eprintln!("Reading month data from {}", dir.display());
    let data_port = CsvDataAdapter::new(dir);

    let inputs = match build_month_inputs(&adapter, &data_port, &months) {
        Ok(inputs) => inputs,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 5: Report rows dropped by validation
    for input in &inputs {
        warn_skipped(input);
    }

    // Stage 6: Aggregate
    let summaries = aggregate(&inputs);

    // Stage 7: Console summary to stderr
    eprintln!("\n=== Monthly Summary ===");
    for summary in &summaries {
        eprintln!(
            "  {}:  weighted TP/LT {:.2}, cash delta {:+.1}",
            summary.month, summary.weighted_tp_over_lt, summary.cash_delta
        );
    }

    // Stage 8: Write the summary table
    let output = output_path.cloned().unwrap_or_else(|| {
        adapter
            .get_string("export", "output")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(EXPORT_FILE_NAME))
    });

    if let Err(e) = CsvExportAdapter.write(&summaries, &output) {
        eprintln!("error: failed to write summary: {e}");
        return (&e).into();
    }
    eprintln!("\nSummary written to: {}", output.display());

    // Stage 9: Optional scatter chart
    let chart = chart_path
        .cloned()
        .or_else(|| adapter.get_string("export", "chart").map(PathBuf::from));
    if let Some(chart) = chart {
        if let Err(e) = SvgChartAdapter.write(&summaries, &chart) {
            eprintln!("error: failed to write chart: {e}");
            return (&e).into();
        }
        eprintln!("Chart written to: {}", chart.display());
    }

    ExitCode::SUCCESS
}

fn run_dry_run(config_path: &PathBuf, months_override: Option<&str>) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_analysis_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    eprintln!("Config validated successfully");

    let months = match months_override {
        Some(list) => match parse_months(list) {
            Ok(months) => months,
            Err(e) => {
                eprintln!("error: failed to parse months: {e}");
                return ExitCode::from(4);
            }
        },
        None => match configured_months(&adapter) {
            Ok(months) => months,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        },
    };

    for label in &months {
        if let Err(e) = validate_month_label(label) {
            eprintln!("error: {e}");
            return (&e).into();
        }
    }

    eprintln!("\nMonths to analyze:");
    for month in &months {
        eprintln!(
            "  {}: cash {} to {}",
            month,
            adapter.get_double(month, "cash_start", 0.0),
            adapter.get_double(month, "cash_end", 0.0)
        );
    }
    eprintln!("\nData directory: {}", data_dir(&adapter).display());

    eprintln!("\nDry run complete: configuration is valid");
    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_analysis_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let months = match configured_months(&adapter) {
        Ok(months) => months,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let data_port = CsvDataAdapter::new(data_dir(&adapter));

    eprintln!("\nMonth inputs:");
    for month in &months {
        let rows = match data_port.fetch_rows(month) {
            Ok(rows) => rows,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        };

        let partition = partition_rows(&rows);
        for skipped in &partition.skipped {
            eprintln!(
                "  Warning: {}: row {} will be skipped: {}",
                month,
                skipped.index + 1,
                skipped.reason
            );
        }
        eprintln!(
            "  {}: {} valid rows, {} skipped",
            month,
            partition.rows.len(),
            partition.skipped.len()
        );
    }

    eprintln!("\nConfiguration is valid.");
    ExitCode::SUCCESS
}

fn run_list_months(config_path: &PathBuf) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let dir = data_dir(&config);
    let adapter = CsvDataAdapter::new(dir.clone());

    let months = match adapter.list_months() {
        Ok(m) => m,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if months.is_empty() {
        eprintln!("No month data files found in {}", dir.display());
    } else {
        for month in &months {
            println!("{}", month);
        }
        eprintln!("{} months found", months.len());
    }
    ExitCode::SUCCESS
}

fn run_serve(config_path: &PathBuf) -> ExitCode {
    #[cfg(feature = "web")]
    {
        use crate::adapters::web::{build_router, AppState};
        use std::net::SocketAddr;
        use std::sync::Arc;

        eprintln!("Loading config from {}", config_path.display());
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(code) => return code,
        };

        let addr: SocketAddr = config
            .get_string("web", "listen")
            .unwrap_or_else(|| "127.0.0.1:3000".to_string())
            .parse()
            .unwrap_or_else(|_| "127.0.0.1:3000".parse().unwrap());

        eprintln!("Starting web server on {}", addr);

        let state = AppState {
            config: Arc::new(config),
        };
        let router = build_router(state);

        tokio::runtime::Runtime::new().unwrap().block_on(async {
            let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
            axum::serve(listener, router).await.unwrap();
        });

        ExitCode::SUCCESS
    }

    #[cfg(not(feature = "web"))]
    {
        let _ = config_path;
        eprintln!("error: web feature is required for serve");
        ExitCode::from(1)
    }
}
