use std::path::PathBuf;

use clap::{Parser, Subcommand};
use employee_mapper::config::{AssetCapabilities, Config};
use employee_mapper::pipeline;
use employee_mapper::store::ReferenceStore;
use employee_mapper::{MapperError, Result};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_tracing()?;
    let config = Config::load(cli.config.as_deref())?;
    let assets = AssetCapabilities::probe(&config);

    match cli.command {
        Command::Process(args) => execute_process(&config, args),
        Command::Employee { action } => execute_employee(&config, &assets, action),
    }
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| MapperError::Logging(error.to_string()))
}

fn execute_process(config: &Config, args: ProcessArgs) -> Result<()> {
    let reference = args
        .database
        .unwrap_or_else(|| config.reference_path.clone());
    let output = args.output.unwrap_or_else(|| config.report_path.clone());

    let summary = pipeline::process_files(&args.csv, &reference, &output)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!(
        "CSV processed successfully: {} rows written to {}",
        summary.rows,
        summary.output.display()
    );
    if !summary.missing.is_empty() {
        println!(
            "warning: Missing Employee Numbers: {}",
            summary.missing.join(", ")
        );
    }
    Ok(())
}

fn execute_employee(
    config: &Config,
    assets: &AssetCapabilities,
    action: EmployeeCommand,
) -> Result<()> {
    let mut store = ReferenceStore::open(config.reference_path.clone())?;
    println!(
        "Loaded {} ({} employees, logo {})",
        store.path().display(),
        store.table().len(),
        if assets.has_logo() { "present" } else { "not found" }
    );

    match action {
        EmployeeCommand::Add { emp_no, name } => {
            store.insert(&emp_no, &name)?;
            println!("Added employee {emp_no}");
        }
        EmployeeCommand::Update { emp_no, name } => {
            store.update(&emp_no, &name)?;
            println!("Updated employee {emp_no}");
        }
        EmployeeCommand::Delete { emp_no } => {
            store.delete(&emp_no)?;
            println!("Deleted employee {emp_no}");
        }
        EmployeeCommand::List => {
            for record in store.table().iter() {
                println!("{}\t{}", record.emp_no, record.name);
            }
        }
    }
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Map daily production CSV exports onto the employee reference table."
)]
struct Cli {
    /// Optional JSON configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Reconcile a daily CSV export and write the processed workbook.
    Process(ProcessArgs),

    /// Maintain the employee reference table.
    Employee {
        #[command(subcommand)]
        action: EmployeeCommand,
    },
}

#[derive(clap::Args)]
struct ProcessArgs {
    /// Daily CSV export.
    #[arg(long)]
    csv: PathBuf,

    /// Alternate reference table used for this run only.
    #[arg(long)]
    database: Option<PathBuf>,

    /// Output workbook path.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print a JSON summary instead of plain messages.
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum EmployeeCommand {
    /// Add a new employee.
    Add { emp_no: String, name: String },
    /// Rename an existing employee.
    Update { emp_no: String, name: String },
    /// Remove an employee.
    Delete { emp_no: String },
    /// Print every employee.
    List,
}
