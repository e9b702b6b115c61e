use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use csv2qif::{
    convert::{self, Conversion, InputSource, Outcome, OutputTarget, TracingObserver},
    domain::{
        account::Account,
        column::{ColumnSpec, DEFAULT_COLUMNS},
    },
    writer::Format,
};

/// Convert financial transactions in CSV format to QIF files.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Verbose logging output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert one CSV statement
    Convert(ConvertArgs),
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// Complete account name, e.g. Assets:Checking:Joint
    #[arg(long)]
    account: String,

    /// QIF account type: Bank, Cash, CCard, Invst, ...
    #[arg(long, default_value = "Bank")]
    account_type: String,

    /// Description written to the account header
    #[arg(long)]
    account_description: Option<String>,

    /// Location of the input file, `-` or `stdin` for standard input
    #[arg(long, default_value = "-")]
    input_file: String,

    /// Directory to write to, `-` or `stdout` for standard output
    #[arg(long, default_value = "-")]
    output_dir: String,

    /// Output format, either qif or json
    #[arg(long, default_value = "qif")]
    output_format: String,

    /// JSON object mapping fields to zero based column indices
    #[arg(long, default_value = DEFAULT_COLUMNS)]
    columns: String,

    /// Also write the sorted statement as CSV next to the output
    #[arg(long)]
    backup: bool,

    /// Allow the json output format
    #[arg(long, hide = true)]
    enable_json: bool,
}

impl ConvertArgs {
    fn into_conversion(self) -> anyhow::Result<Conversion> {
        let columns = ColumnSpec::from_json(&self.columns).context("invalid --columns")?;
        let format: Format = self.output_format.parse()?;

        Ok(Conversion {
            account: Account::new(self.account, self.account_type)
                .with_description(self.account_description),
            input: InputSource::parse(&self.input_file),
            output: OutputTarget::parse(&self.output_dir),
            format,
            columns,
            backup: self.backup,
            json_enabled: self.enable_json,
        })
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}={default_level}", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Convert(args) => {
            let conversion = args.into_conversion()?;
            tracing::debug!(?conversion);

            let input = conversion.input.describe();
            let outcome = convert::convert(&conversion, &TracingObserver)
                .with_context(|| format!("failed to convert {input}"))?;
            if let Outcome::Written { records, .. } = outcome {
                tracing::info!("converted {records} transactions");
            }
            Ok(())
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
