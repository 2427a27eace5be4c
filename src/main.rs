use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;
use serde::Serialize;

use coltrans::{
    ByteTrace, CipherOptions, CipherResult, ColumnarTransposition, Direction, KeyCharPolicy,
    KeyMode, Phase, Step,
};
use coltrans::text_codec::strip_padding;

#[derive(Parser, Debug)]
#[command(
    name = "coltrans",
    version,
    about = "Columnar transposition cipher with step traces"
)]
struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    json: bool,
    #[arg(short, long, global = true, help = "Enable debug logging")]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the column order a key resolves to
    Order {
        #[command(flatten)]
        key: KeyArgs,
    },
    /// Encrypt text
    Encrypt {
        text: String,
        #[command(flatten)]
        key: KeyArgs,
        #[command(flatten)]
        padding: PaddingArgs,
        #[arg(long, help = "List every fill and read step")]
        steps: bool,
    },
    /// Decrypt text
    Decrypt {
        text: String,
        #[command(flatten)]
        key: KeyArgs,
        #[command(flatten)]
        padding: PaddingArgs,
        #[arg(long, help = "List every fill and read step")]
        steps: bool,
    },
    /// Encrypt a file byte by byte
    EncryptFile {
        input: PathBuf,
        output: PathBuf,
        #[command(flatten)]
        key: KeyArgs,
    },
    /// Decrypt a file byte by byte
    DecryptFile {
        input: PathBuf,
        output: PathBuf,
        #[command(flatten)]
        key: KeyArgs,
    },
    /// Trace the first bytes of a file through the grid
    TraceFile {
        input: PathBuf,
        #[command(flatten)]
        key: KeyArgs,
        #[arg(long, value_enum, default_value_t = TraceDirection::Encrypt)]
        direction: TraceDirection,
        #[arg(long, default_value_t = coltrans::config::DEFAULT_SAMPLE_LEN)]
        sample: usize,
    },
}

#[derive(Args, Debug)]
struct KeyArgs {
    #[arg(short, long, help = "Cipher key (word, or permutation with --numeric)")]
    key: String,
    #[arg(long, help = "Read the key as a permutation of 1..N")]
    numeric: bool,
    #[arg(long, help = "Accept any characters in a text key")]
    any_key_chars: bool,
}

#[derive(Args, Debug)]
struct PaddingArgs {
    #[arg(
        long,
        default_value_t = coltrans::config::DEFAULT_PADDING.to_string(),
        help = "Padding character for the last row (empty for none)"
    )]
    pad: String,
    #[arg(long, conflicts_with = "pad", help = "Leave the last row unpadded")]
    no_pad: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TraceDirection {
    Encrypt,
    Decrypt,
}

impl From<TraceDirection> for Direction {
    fn from(value: TraceDirection) -> Self {
        match value {
            TraceDirection::Encrypt => Direction::Encrypt,
            TraceDirection::Decrypt => Direction::Decrypt,
        }
    }
}

impl KeyArgs {
    fn options(&self) -> CipherOptions {
        let mode = if self.numeric {
            KeyMode::Numeric
        } else {
            KeyMode::Text
        };
        let policy = if self.any_key_chars {
            KeyCharPolicy::Any
        } else {
            KeyCharPolicy::Alphanumeric
        };
        CipherOptions::default()
            .with_mode(mode)
            .with_key_chars(policy)
    }

    fn cipher(&self, options: CipherOptions) -> coltrans::Result<ColumnarTransposition> {
        ColumnarTransposition::new(&self.key, options)
    }
}

impl PaddingArgs {
    fn padding(&self) -> coltrans::Result<Option<char>> {
        if self.no_pad {
            return Ok(None);
        }
        CipherOptions::padding_from_str(&self.pad)
    }
}

#[derive(Serialize)]
struct OrderReport<'a> {
    order: &'a [usize],
    display_key: &'a [String],
}

#[derive(Serialize)]
struct TextReport<'a> {
    output: &'a str,
    #[serde(flatten)]
    result: &'a CipherResult,
}

#[derive(Serialize)]
struct FileReport {
    input_len: usize,
    output_len: usize,
    trace: ByteTrace,
}

fn main() {
    let cli = Cli::parse();
    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(cli) {
        eprintln!("ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> coltrans::Result<()> {
    let json = cli.json;
    match cli.command {
        Commands::Order { key } => {
            let cipher = key.cipher(key.options())?;
            let report = OrderReport {
                order: cipher.key().order(),
                display_key: cipher.key().display_key(),
            };
            if json {
                print_json(&report)?;
            } else {
                println!("key:   {}", report.display_key.join(" "));
                let order: Vec<String> = report.order.iter().map(|c| c.to_string()).collect();
                println!("order: {}", order.join(" "));
            }
        }
        Commands::Encrypt {
            text,
            key,
            padding,
            steps,
        } => {
            let options = key.options().with_padding(padding.padding()?);
            let result = key.cipher(options)?.encrypt_text(&text);
            print_text_result(&result, result.text(), json, steps)?;
        }
        Commands::Decrypt {
            text,
            key,
            padding,
            steps,
        } => {
            let options = key.options().with_padding(padding.padding()?);
            let cipher = key.cipher(options)?;
            let result = cipher.decrypt_text(&text);
            let plaintext = strip_padding(result.text(), cipher.options().padding);
            print_text_result(&result, plaintext, json, steps)?;
        }
        Commands::EncryptFile { input, output, key } => {
            let cipher = key.cipher(key.options())?;
            transform_file(&cipher, &input, &output, Direction::Encrypt, json)?;
        }
        Commands::DecryptFile { input, output, key } => {
            let cipher = key.cipher(key.options())?;
            transform_file(&cipher, &input, &output, Direction::Decrypt, json)?;
        }
        Commands::TraceFile {
            input,
            key,
            direction,
            sample,
        } => {
            let cipher = key.cipher(key.options().with_sample_len(sample))?;
            let data = fs::read(&input)?;
            let trace = cipher.trace_bytes(&data, direction.into());
            if json {
                print_json(&trace)?;
            } else {
                print_steps(trace.fill_steps(), Phase::Write);
                print_steps(trace.read_steps(), Phase::Read);
            }
        }
    }
    Ok(())
}

fn transform_file(
    cipher: &ColumnarTransposition,
    input: &Path,
    output: &Path,
    direction: Direction,
    json: bool,
) -> coltrans::Result<()> {
    let data = fs::read(input)?;
    let transformed = match direction {
        Direction::Encrypt => cipher.encrypt_bytes(&data),
        Direction::Decrypt => cipher.decrypt_bytes(&data),
    };
    fs::write(output, &transformed)?;
    info!(
        "Wrote {} bytes to {}",
        transformed.len(),
        output.display()
    );

    if json {
        print_json(&FileReport {
            input_len: data.len(),
            output_len: transformed.len(),
            trace: cipher.trace_bytes(&data, direction),
        })?;
    } else {
        println!(
            "{} -> {} ({} bytes in, {} bytes out)",
            input.display(),
            output.display(),
            data.len(),
            transformed.len()
        );
        if direction == Direction::Decrypt {
            println!("note: zero padding added at encryption is kept at the tail");
        }
    }
    Ok(())
}

/// Prints `output` after the optional step listing. In JSON mode `output`
/// sits next to the full result.
fn print_text_result(
    result: &CipherResult,
    output: &str,
    json: bool,
    steps: bool,
) -> coltrans::Result<()> {
    if json {
        return print_json(&TextReport { output, result });
    }
    if steps {
        print_steps(result.fill_steps(), Phase::Write);
        print_steps(result.read_steps(), Phase::Read);
    }
    println!("{}", output);
    Ok(())
}

fn print_steps<T: coltrans::CellValue>(steps: &[Step<T>], phase: Phase) {
    let total = steps.len();
    for (i, step) in steps.iter().enumerate() {
        println!("{}", step.describe(i + 1, total, phase));
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> coltrans::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, value).map_err(io::Error::from)?;
    writeln!(out)?;
    Ok(())
}
