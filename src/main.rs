mod settings;

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use env_logger::Env;
use sokopack_data::record::RecordWriter;
use sokopack_data::{CompileOptions, compile_levels};

use crate::settings::Loader;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Convert text Sokoban levels into packed binary records"
)]
struct Cli {
    /// Level files to read; standard input if none are given
    #[arg(value_name = "INFILE")]
    inputs: Vec<PathBuf>,

    /// Output file for the packed records
    #[arg(short, long, value_name = "OUTFILE")]
    output: PathBuf,

    /// Report progress on stderr (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// TOML file layered over the built-in settings
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the maximum number of rows
    #[arg(long, value_name = "N")]
    max_rows: Option<u8>,

    /// Override the maximum number of columns
    #[arg(long, value_name = "N")]
    max_cols: Option<u8>,

    /// Decode every record after encoding it and check it matches the level
    #[arg(long)]
    verify: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    let options = load_options(&cli)?;

    let file = File::create(&cli.output)
        .wrap_err_with(|| format!("error opening file: {}", cli.output.display()))?;
    let mut writer = RecordWriter::new(BufWriter::new(file));

    // Flush whatever earlier levels produced even if a later one is rejected.
    let result = compile_inputs(&cli.inputs, &mut writer, &options);
    let flushed = writer.flush();
    result?;
    flushed.wrap_err_with(|| format!("error writing file: {}", cli.output.display()))?;

    log::info!(
        "wrote {} records, {} bytes to {}",
        writer.records(),
        writer.bytes(),
        cli.output.display()
    );
    Ok(())
}

fn load_options(cli: &Cli) -> Result<CompileOptions> {
    let mut loader = Loader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_file(path);
    }
    if let Some(rows) = cli.max_rows {
        loader = loader.set_override("limits.max_rows", i64::from(rows))?;
    }
    if let Some(cols) = cli.max_cols {
        loader = loader.set_override("limits.max_cols", i64::from(cols))?;
    }
    let settings = loader.build().wrap_err("invalid configuration")?;
    let options = settings
        .compile_options(cli.verify)
        .wrap_err("invalid configuration")?;
    log::debug!("{options:?}");
    Ok(options)
}

fn compile_inputs<W: Write>(
    inputs: &[PathBuf],
    writer: &mut RecordWriter<W>,
    options: &CompileOptions,
) -> Result<()> {
    if inputs.is_empty() {
        log::info!("processing standard input");
        compile_levels(io::stdin().lock(), writer, options).wrap_err("in standard input")?;
        return Ok(());
    }

    for path in inputs {
        log::info!("processing file: {}", path.display());
        let file = File::open(path)
            .wrap_err_with(|| format!("error opening file: {}", path.display()))?;
        let levels = compile_levels(BufReader::new(file), writer, options)
            .wrap_err_with(|| format!("in {}", path.display()))?;
        log::info!("{levels} levels from {}", path.display());
    }
    Ok(())
}
