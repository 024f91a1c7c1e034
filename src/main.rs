//! Property DCF CLI
//!
//! Command-line interface for valuing a property from a JSON deal file

use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};

use property_dcf::assumptions::load_input;
use property_dcf::lease::load_rent_roll;
use property_dcf::output::{write_cash_flows_csv_path, write_result_json};
use property_dcf::{DcfInput, DcfResult, ScenarioRunner};

/// Discounted cash flow valuation for multi-tenant commercial property
#[derive(Parser)]
#[command(name = "property-dcf", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Value a deal and print the annual cash flows
    Run(RunArgs),
    /// Present value across discount rates and exit cap rates
    Sensitivity(SensitivityArgs),
    /// Simulate seeded renewal outcomes
    MonteCarlo(MonteCarloArgs),
}

#[derive(Args)]
struct InputArgs {
    /// JSON deal file
    #[arg(long)]
    input: PathBuf,

    /// CSV rent roll replacing the deal file's leases
    #[arg(long)]
    rent_roll: Option<PathBuf>,
}

#[derive(Args)]
struct RunArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Write the annual records to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Print the full result as JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct SensitivityArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Discount rates in percent
    #[arg(long, value_delimiter = ',', default_values_t = vec![7.0, 8.0, 9.0])]
    discount_rates: Vec<f64>,

    /// Exit cap rates in percent; defaults to the deal's own
    #[arg(long, value_delimiter = ',')]
    exit_caps: Vec<f64>,
}

#[derive(Args)]
struct MonteCarloArgs {
    #[command(flatten)]
    input: InputArgs,

    #[arg(long, default_value_t = 500)]
    trials: u32,

    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => run(args),
        Commands::Sensitivity(args) => sensitivity(args),
        Commands::MonteCarlo(args) => monte_carlo(args),
    }
}

fn load(args: &InputArgs) -> Result<DcfInput> {
    let mut input = load_input(&args.input)
        .with_context(|| format!("Failed to load deal file {}", args.input.display()))?;
    if let Some(path) = &args.rent_roll {
        input.leases = load_rent_roll(path)
            .with_context(|| format!("Failed to load rent roll {}", path.display()))?;
    }
    Ok(input)
}

fn run(args: RunArgs) -> Result<()> {
    let input = load(&args.input)?;
    let Some(result) = ScenarioRunner::new(input).run() else {
        bail!("Horizon is zero years; nothing to value");
    };

    if let Some(path) = &args.csv {
        write_cash_flows_csv_path(&result.cash_flows, path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    if args.json {
        write_result_json(&result, io::stdout().lock())?;
        println!();
    } else {
        print_table(&result);
    }
    Ok(())
}

fn print_table(result: &DcfResult) {
    println!(
        "{:>4} {:>14} {:>14} {:>14} {:>14} {:>12} {:>14} {:>14}",
        "Year", "PGR", "EGI", "OpEx", "NOI", "TI/LC+Cap", "Net CF", "PV"
    );
    println!("{}", "-".repeat(108));
    for r in &result.cash_flows {
        println!(
            "{:>4} {:>14.2} {:>14.2} {:>14.2} {:>14.2} {:>12.2} {:>14.2} {:>14.2}",
            r.year,
            r.potential_gross_revenue,
            r.effective_gross_income,
            r.operating_expenses,
            r.net_operating_income,
            r.ti_lc_outflow + r.capital_outflow,
            r.net_cash_flow_with_reversion,
            r.present_value,
        );
    }

    let summary = result.summary();
    println!("\nSummary:");
    println!("  Total NOI: ${:.2}", summary.total_net_operating_income);
    println!("  Net Reversion: ${:.2}", summary.net_reversion);
    println!("  Present Value: ${:.2}", result.total_present_value);
    println!("  Going-in Cap Rate: {:.3}%", result.going_in_cap_rate_percent);
    if result.irr_percent.is_finite() {
        println!("  IRR: {:.3}%", result.irr_percent);
    } else {
        println!("  IRR: did not converge");
    }
    for warning in &result.warnings {
        println!("  Warning: {}", warning);
    }
}

fn sensitivity(args: SensitivityArgs) -> Result<()> {
    let input = load(&args.input)?;
    let exit_caps = if args.exit_caps.is_empty() {
        vec![input.globals.exit_cap_rate_percent]
    } else {
        args.exit_caps
    };

    let runner = ScenarioRunner::new(input);
    let points = runner.sensitivity_grid(&args.discount_rates, &exit_caps);
    if points.is_empty() {
        bail!("Horizon is zero years; nothing to value");
    }

    println!("{:>10} {:>10} {:>16} {:>10}", "Disc %", "Exit Cap %", "Present Value", "IRR %");
    for p in &points {
        println!(
            "{:>10.2} {:>10.2} {:>16.2} {:>10.3}",
            p.discount_rate_percent, p.exit_cap_rate_percent, p.total_present_value, p.irr_percent
        );
    }
    Ok(())
}

fn monte_carlo(args: MonteCarloArgs) -> Result<()> {
    let runner = ScenarioRunner::new(load(&args.input)?);
    let Some(summary) = runner.renewal_monte_carlo(args.trials, args.seed) else {
        bail!("No trials were valued (zero trials or zero horizon)");
    };

    println!("Renewal simulation ({} trials, seed {}):", summary.trials, args.seed);
    println!("  Mean PV: ${:.2}", summary.mean_pv);
    println!("  Min PV:  ${:.2}", summary.min_pv);
    println!("  P5 PV:   ${:.2}", summary.p5_pv);
    println!("  P95 PV:  ${:.2}", summary.p95_pv);
    println!("  Max PV:  ${:.2}", summary.max_pv);
    println!("  Mean IRR: {:.3}%", summary.mean_irr_percent);
    Ok(())
}
