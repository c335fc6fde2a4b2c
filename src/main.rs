use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use crossover::prelude::*;
use prettytable::{Cell, Row, Table};
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "crossover")]
#[command(about = "A moving-average crossover backtesting engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    //run a single backtest
    Run {
        //path to csv data file with a Close column
        #[arg(long, required_unless_present = "config")]
        data: Option<PathBuf>,

        //json run configuration, replaces every other flag
        #[arg(long)]
        config: Option<PathBuf>,

        //short sma window
        #[arg(long, default_value = "20")]
        short: usize,

        //long sma window
        #[arg(long, default_value = "50")]
        long: usize,

        #[command(flatten)]
        params: SimulationArgs,

        //output path for equity curve csv
        #[arg(long)]
        output_equity_csv: Option<PathBuf>,

        //output path for trades csv
        #[arg(long)]
        output_trades_csv: Option<PathBuf>,
    },

    //run every short/long window combination
    Sweep {
        //path to csv data file with a Close column
        #[arg(long)]
        data: PathBuf,

        //candidate short windows (comma separated)
        #[arg(long, value_delimiter = ',', default_value = "5,10,20")]
        shorts: Vec<usize>,

        //candidate long windows (comma separated)
        #[arg(long, value_delimiter = ',', default_value = "30,50,100")]
        longs: Vec<usize>,

        #[command(flatten)]
        params: SimulationArgs,
    },
}

//parameters shared by run and sweep
#[derive(Args)]
struct SimulationArgs {
    //initial capital
    #[arg(long, default_value = "10000")]
    capital: f64,

    //fraction of cash committed per entry
    #[arg(long, default_value = "1.0")]
    allocation: f64,

    //fee per fill as a fraction of notional
    #[arg(long, default_value = "0.0")]
    fee: f64,

    //slippage in basis points
    #[arg(long, default_value = "0.0")]
    slippage_bps: f64,

    //stop-loss as a fraction below entry price
    #[arg(long)]
    stop_loss: Option<f64>,

    //skip the check that capital covers one share at the first open
    #[arg(long)]
    no_open_check: bool,
}

impl SimulationArgs {
    fn to_config(&self, short_window: usize, long_window: usize) -> SimulationConfig {
        SimulationConfig {
            short_window,
            long_window,
            initial_capital: self.capital,
            allocation_fraction: self.allocation,
            fee_fraction: self.fee,
            slippage_bps: self.slippage_bps,
            stop_loss_fraction: self.stop_loss,
            opening_price: None,
        }
    }
}

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            data,
            config,
            short,
            long,
            params,
            output_equity_csv,
            output_trades_csv,
        } => {
            let run_config = match config {
                Some(path) => RunConfiguration::from_json_file(&path)
                    .context(format!("Failed to load configuration from {:?}", path))?,
                None => RunConfiguration {
                    data_path: data.context("--data is required without --config")?,
                    simulation: params.to_config(short, long),
                    output_equity_csv,
                    output_trades_csv,
                },
            };
            run_backtest(run_config, !params.no_open_check)?;
        }
        Commands::Sweep {
            data,
            shorts,
            longs,
            params,
        } => {
            run_parameter_sweep(
                &data,
                params.to_config(0, 0),
                !params.no_open_check,
                &shorts,
                &longs,
            )?;
        }
    }

    Ok(())
}

fn run_backtest(run_config: RunConfiguration, open_check: bool) -> Result<()> {
    println!("Crossover Backtesting Engine");
    println!("============================\n");

    //load data
    println!("Loading data from {:?}...", run_config.data_path);
    let history = load_csv(&run_config.data_path).context(format!(
        "Failed to load data from {:?}",
        run_config.data_path
    ))?;
    println!("Loaded {} bars", history.len());

    if let (Some(first), Some(last)) = (history.date_at(0), history.date_at(history.len() - 1)) {
        println!("Date range: {} to {}", first, last);
    }

    let mut config = run_config.simulation.clone();
    if open_check {
        history.apply_open_check(&mut config);
    }

    println!(
        "\nStrategy: SMA Crossover (short={}, long={})",
        config.short_window, config.long_window
    );
    println!("Initial capital: ${:.2}", config.initial_capital);
    println!("Allocation: {:.0}%", config.allocation_fraction * 100.0);
    println!("Fee: {:.3}% per fill", config.fee_fraction * 100.0);
    println!("Slippage: {} bps", config.slippage_bps);
    match config.stop_loss_fraction {
        Some(stop) => println!("Stop-loss: {:.2}%\n", stop * 100.0),
        None => println!("Stop-loss: none\n"),
    }

    //run backtest
    println!("Running backtest...\n");
    let result = simulate(&history.closes, &config)?;

    let summary =
        SummaryMetrics::from_run(&result.equity_curve, &result.trades, config.initial_capital);

    //display results
    println!("Backtest Results");
    println!("================\n");
    summary.pretty_print_table();

    println!("\nTrades taken:");
    for trade in &result.trades {
        println!(
            "  [{}] {} {:.4} @ {:.2}",
            trade.index, trade.side, trade.quantity, trade.price
        );
    }
    if result.has_open_position() {
        println!("  (position still open, marked to market at the last close)");
    }

    //save outputs if requested
    if let Some(equity_path) = &run_config.output_equity_csv {
        save_equity_csv(&history, &result.equity_curve, equity_path)?;
        println!("\nEquity curve saved to {:?}", equity_path);
    }

    if let Some(trades_path) = &run_config.output_trades_csv {
        save_trades_csv(&history, &result.trades, trades_path)?;
        println!("Trades saved to {:?}", trades_path);
    }

    Ok(())
}

fn run_parameter_sweep(
    data_path: &Path,
    mut base: SimulationConfig,
    open_check: bool,
    shorts: &[usize],
    longs: &[usize],
) -> Result<()> {
    let history =
        load_csv(data_path).context(format!("Failed to load data from {:?}", data_path))?;
    println!("Loaded {} bars from {:?}\n", history.len(), data_path);

    if open_check {
        history.apply_open_check(&mut base);
    }

    let results = run_sweep(&history.closes, &base, shorts, longs)?;

    let mut table = Table::new();
    table.add_row(Row::new(
        ["Short", "Long", "Return", "Max DD", "Win Rate", "Closed", "Profit Factor"]
            .iter()
            .map(|h| Cell::new(h))
            .collect(),
    ));
    for (pair, summary) in &results {
        let cells = [
            pair.short.to_string(),
            pair.long.to_string(),
            format!("{:.2}%", summary.total_return * 100.0),
            format!("{:.2}%", summary.max_drawdown * 100.0),
            format!("{:.2}%", summary.win_rate * 100.0),
            summary.num_closed_trades.to_string(),
            format!("{:.3}", summary.profit_factor),
        ];
        table.add_row(Row::new(cells.iter().map(|c| Cell::new(c)).collect()));
    }
    table.printstd();

    if let Some((pair, summary)) = best_by_return(&results) {
        println!(
            "\nBest: short={} long={} return={:.2}%",
            pair.short,
            pair.long,
            summary.total_return * 100.0
        );
    }

    Ok(())
}

fn save_equity_csv(history: &PriceHistory, equity_curve: &[f64], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["index", "date", "equity", "drawdown"])?;

    for point in calculate_equity_curve(equity_curve) {
        writer.write_record([
            point.index.to_string(),
            format_date(history, point.index),
            point.equity.to_string(),
            point.drawdown.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

fn save_trades_csv(history: &PriceHistory, trades: &[Trade], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["index", "date", "side", "price", "quantity", "fee"])?;

    for trade in trades {
        writer.write_record([
            trade.index.to_string(),
            format_date(history, trade.index),
            trade.side.to_string(),
            trade.price.to_string(),
            trade.quantity.to_string(),
            trade.fee.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

fn format_date(history: &PriceHistory, index: usize) -> String {
    history
        .date_at(index)
        .map(|d| d.to_string())
        .unwrap_or_default()
}
