// Command-line wrapper for the polyline codec.
//
// Coordinates are exchanged as plain text, one coordinate per line with axes
// separated by commas and/or whitespace. Polylines are exchanged as their
// ASCII bytes.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

use crate::codec::{Codec, DEFAULT_DIM, DEFAULT_SCALE};
use crate::varint::MAX_VARINT_LEN;

const BUF_SIZE: usize = 64 * 1024;

/// Largest number of decimal places printed for a decoded axis.
const MAX_PRECISION: usize = 17;

// ---------------------------------------------------------------------------
// Clap CLI definition
// ---------------------------------------------------------------------------

/// Encoded Polyline encoder/decoder.
#[derive(Parser, Debug)]
#[command(
    name = "polyline-codec",
    version,
    about = "Encoded Polyline encoder/decoder",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Cmd,

    /// Number of axes per coordinate.
    #[arg(long, short = 'd', global = true, default_value_t = DEFAULT_DIM)]
    dim: usize,

    /// Fixed-point scale applied to every axis.
    #[arg(long, short = 's', global = true, default_value_t = DEFAULT_SCALE)]
    scale: f64,

    /// Force overwrite existing output files.
    #[arg(short = 'f', long, global = true)]
    force: bool,

    /// Quiet mode (suppress non-error output).
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbose mode (use multiple times for more detail).
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Encode text coordinates into a polyline.
    Encode(EncodeArgs),
    /// Decode a polyline into text coordinates.
    Decode(DecodeArgs),
    /// Print build/configuration details.
    Config,
}

#[derive(Args, Debug)]
struct IoArgs {
    /// Input file (default: stdin).
    #[arg(long, value_hint = ValueHint::FilePath, conflicts_with = "input_pos")]
    input: Option<PathBuf>,

    /// Output file (default: stdout).
    #[arg(long, value_hint = ValueHint::FilePath, conflicts_with = "output_pos")]
    output: Option<PathBuf>,

    /// Write output to stdout.
    #[arg(short = 'c', long)]
    stdout: bool,

    /// Input file (positional form).
    #[arg(value_hint = ValueHint::FilePath)]
    input_pos: Option<PathBuf>,

    /// Output file (positional form).
    #[arg(value_hint = ValueHint::FilePath)]
    output_pos: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct EncodeArgs {
    /// Check/compute only (do not write output).
    #[arg(long = "check-only")]
    no_output: bool,

    #[command(flatten)]
    io: IoArgs,
}

#[derive(Args, Debug)]
struct DecodeArgs {
    /// Decimal places per axis (default: derived from the scale).
    #[arg(
        long,
        short = 'p',
        value_parser = clap::value_parser!(u32).range(0..=MAX_PRECISION as i64)
    )]
    precision: Option<u32>,

    /// Check/compute only (do not write output).
    #[arg(long = "check-only")]
    no_output: bool,

    #[command(flatten)]
    io: IoArgs,
}

// ---------------------------------------------------------------------------
// Resolved command + options (flattened from Cli)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Encode,
    Decode,
    Config,
}

#[derive(Debug)]
struct Options {
    command: Command,
    dim: usize,
    scale: f64,
    use_stdout: bool,
    force: bool,
    quiet: bool,
    verbose: u8,
    no_output: bool,
    precision: Option<usize>,
    input_file: Option<PathBuf>,
    output_file: Option<PathBuf>,
}

fn resolve_options(cli: Cli) -> Options {
    let (command, io, no_output, precision) = match cli.command {
        Cmd::Encode(args) => (Command::Encode, Some(args.io), args.no_output, None),
        Cmd::Decode(args) => (
            Command::Decode,
            Some(args.io),
            args.no_output,
            args.precision.map(|p| p as usize),
        ),
        Cmd::Config => (Command::Config, None, false, None),
    };
    let (use_stdout, input_file, output_file) = match io {
        Some(io) => (
            io.stdout,
            io.input.or(io.input_pos),
            io.output.or(io.output_pos),
        ),
        None => (false, None, None),
    };

    Options {
        command,
        dim: cli.dim,
        scale: cli.scale,
        use_stdout,
        force: cli.force,
        quiet: cli.quiet,
        verbose: cli.verbose.min(2),
        no_output,
        precision,
        input_file,
        output_file,
    }
}

#[cfg(any(test, feature = "fuzzing"))]
pub fn fuzz_try_parse_args(args: &[String]) {
    let argv: Vec<String> = std::iter::once("polyline-codec".to_string())
        .chain(args.iter().cloned())
        .collect();
    if let Ok(cli) = Cli::try_parse_from(argv) {
        let _ = resolve_options(cli);
    }
}

// ---------------------------------------------------------------------------
// Text formats
// ---------------------------------------------------------------------------

/// Parse text coordinates: one per line, axes split on commas and/or
/// whitespace. Blank lines and lines starting with `#` are skipped.
fn parse_coords(text: &str, dim: usize) -> Result<Vec<Vec<f64>>, String> {
    let mut coords = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let coord = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|field| !field.is_empty())
            .map(|field| {
                field
                    .parse::<f64>()
                    .map_err(|e| format!("line {}: invalid number '{field}': {e}", idx + 1))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if coord.len() != dim {
            return Err(format!(
                "line {}: expected {dim} axes, found {}",
                idx + 1,
                coord.len()
            ));
        }
        coords.push(coord);
    }
    Ok(coords)
}

/// Decimal places needed to show every digit the scale preserves.
fn default_precision(scale: f64) -> usize {
    (scale.log10().ceil().max(0.0) as usize).min(MAX_PRECISION)
}

fn format_coords(coords: &[Vec<f64>], precision: usize) -> String {
    let mut out = String::new();
    for coord in coords {
        let line: Vec<String> = coord.iter().map(|x| format!("{x:.precision$}")).collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }
    out
}

// ---------------------------------------------------------------------------
// I/O helpers
// ---------------------------------------------------------------------------

fn read_input(path: Option<&Path>) -> io::Result<Vec<u8>> {
    let mut data = Vec::new();
    match path {
        Some(path) => {
            File::open(path)?.read_to_end(&mut data)?;
        }
        None => {
            io::stdin().lock().read_to_end(&mut data)?;
        }
    }
    Ok(data)
}

fn open_output(opts: &Options) -> Result<Box<dyn Write>, String> {
    match (opts.use_stdout, &opts.output_file) {
        (true, _) | (_, None) => Ok(Box::new(BufWriter::with_capacity(
            BUF_SIZE,
            io::stdout().lock(),
        ))),
        (false, Some(path)) => {
            if path.exists() && !opts.force {
                return Err(format!(
                    "output file exists, use -f to overwrite: {}",
                    path.display()
                ));
            }
            File::create(path)
                .map(|f| Box::new(BufWriter::with_capacity(BUF_SIZE, f)) as Box<dyn Write>)
                .map_err(|e| format!("output file: {}: {e}", path.display()))
        }
    }
}

fn write_output(opts: &Options, payload: &[u8]) -> Result<(), String> {
    let mut writer = open_output(opts)?;
    writer
        .write_all(payload)
        .and_then(|()| writer.flush())
        .map_err(|e| format!("write error: {e}"))
}

fn read_input_or_report(opts: &Options) -> Option<Vec<u8>> {
    match read_input(opts.input_file.as_deref()) {
        Ok(data) => Some(data),
        Err(e) => {
            match &opts.input_file {
                Some(path) => eprintln!("polyline-codec: input file: {}: {e}", path.display()),
                None => eprintln!("polyline-codec: read error: {e}"),
            }
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Config command
// ---------------------------------------------------------------------------

fn cmd_config() -> i32 {
    let version = env!("CARGO_PKG_VERSION");
    eprintln!("polyline-codec version {version} (Rust)");

    let parallel = cfg!(feature = "parallel") as u8;

    eprintln!("PARALLEL={parallel}");
    eprintln!("DEFAULT_DIM={DEFAULT_DIM}");
    eprintln!("DEFAULT_SCALE={DEFAULT_SCALE}");
    eprintln!("MAX_VARINT_LEN={MAX_VARINT_LEN}");

    0
}

// ---------------------------------------------------------------------------
// Encode command
// ---------------------------------------------------------------------------

fn cmd_encode(opts: &Options, codec: Codec) -> i32 {
    let Some(data) = read_input_or_report(opts) else {
        return 1;
    };
    let text = match std::str::from_utf8(&data) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("polyline-codec: input is not UTF-8: {e}");
            return 1;
        }
    };
    let coords = match parse_coords(text, codec.dim()) {
        Ok(coords) => coords,
        Err(e) => {
            eprintln!("polyline-codec: {e}");
            return 1;
        }
    };

    let mut buf = Vec::with_capacity(coords.len() * codec.dim() * 4);
    if let Err(e) = codec.encode(&mut buf, &coords) {
        eprintln!("polyline-codec: encode error: {e}");
        return 1;
    }
    log::debug!("encoded {} coordinates into {} bytes", coords.len(), buf.len());

    if opts.no_output {
        if !opts.quiet {
            eprintln!(
                "polyline-codec: coordinates: {}, encoded size: {}",
                coords.len(),
                buf.len()
            );
        }
        return 0;
    }

    buf.push(b'\n');
    if let Err(e) = write_output(opts, &buf) {
        eprintln!("polyline-codec: {e}");
        return 1;
    }

    if opts.verbose > 0 && !opts.quiet {
        eprintln!(
            "polyline-codec: encoder: input size: {}, coordinates: {}, output size: {}",
            data.len(),
            coords.len(),
            buf.len() - 1
        );
    }

    0
}

// ---------------------------------------------------------------------------
// Decode command
// ---------------------------------------------------------------------------

fn cmd_decode(opts: &Options, codec: Codec) -> i32 {
    let Some(data) = read_input_or_report(opts) else {
        return 1;
    };
    let polyline = data.trim_ascii();

    let coords = match codec.decode(polyline) {
        Ok((coords, _)) => coords,
        Err(e) => {
            eprintln!("polyline-codec: decode error: {e}");
            return 1;
        }
    };

    if opts.no_output {
        if !opts.quiet {
            eprintln!("polyline-codec: coordinates: {}", coords.len());
        }
        return 0;
    }

    let precision = opts
        .precision
        .unwrap_or_else(|| default_precision(codec.scale()));
    let text = format_coords(&coords, precision);
    if let Err(e) = write_output(opts, text.as_bytes()) {
        eprintln!("polyline-codec: {e}");
        return 1;
    }

    if opts.verbose > 0 && !opts.quiet {
        eprintln!(
            "polyline-codec: decoder: input size: {}, coordinates: {}",
            polyline.len(),
            coords.len()
        );
    }

    0
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Main CLI entry point. Parses arguments via clap, dispatches commands.
pub fn run() -> ! {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let cli = Cli::parse();
    let mut opts = resolve_options(cli);

    let codec = match Codec::new(opts.dim, opts.scale) {
        Ok(codec) => codec,
        Err(e) => {
            eprintln!("polyline-codec: {e}");
            process::exit(1);
        }
    };

    // Warn if -c overrides output filename.
    if opts.use_stdout && !opts.quiet {
        if let Some(path) = &opts.output_file {
            eprintln!(
                "polyline-codec: warning: -c option overrides output filename: {}",
                path.display()
            );
        }
    }
    if opts.use_stdout {
        opts.output_file = None;
    }

    let exit_code = match opts.command {
        Command::Encode => cmd_encode(&opts, codec),
        Command::Decode => cmd_decode(&opts, codec),
        Command::Config => cmd_config(),
    };

    process::exit(exit_code);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_opts(args: &[&str]) -> Options {
        let argv: Vec<String> = std::iter::once("polyline-codec".to_string())
            .chain(args.iter().map(|s| s.to_string()))
            .collect();
        let cli = Cli::try_parse_from(argv).expect("cli parse failed");
        resolve_options(cli)
    }

    #[test]
    fn encode_subcommand_maps_correctly() {
        let opts = parse_opts(&["encode", "--check-only", "in.txt", "out.txt"]);
        assert_eq!(opts.command, Command::Encode);
        assert!(opts.no_output);
        assert_eq!(opts.dim, DEFAULT_DIM);
        assert_eq!(opts.scale, DEFAULT_SCALE);
        assert_eq!(opts.input_file, Some(PathBuf::from("in.txt")));
        assert_eq!(opts.output_file, Some(PathBuf::from("out.txt")));
    }

    #[test]
    fn decode_subcommand_maps_correctly() {
        let opts = parse_opts(&[
            "--quiet",
            "decode",
            "--precision",
            "3",
            "--input",
            "line.txt",
        ]);
        assert_eq!(opts.command, Command::Decode);
        assert!(opts.quiet);
        assert_eq!(opts.precision, Some(3));
        assert_eq!(opts.input_file, Some(PathBuf::from("line.txt")));
        assert_eq!(opts.output_file, None);
    }

    #[test]
    fn codec_flags_are_global() {
        let opts = parse_opts(&["encode", "--dim", "3", "--scale", "1e6", "in"]);
        assert_eq!(opts.dim, 3);
        assert_eq!(opts.scale, 1e6);
        let opts = parse_opts(&["-d", "1", "decode"]);
        assert_eq!(opts.dim, 1);
    }

    #[test]
    fn global_stdio_and_force_flags() {
        let opts = parse_opts(&["--force", "encode", "--stdout", "in", "out"]);
        assert!(opts.use_stdout);
        assert!(opts.force);
    }

    #[test]
    fn verbose_is_capped() {
        let verbose = parse_opts(&["--verbose", "--verbose", "--verbose", "encode", "in"]);
        assert_eq!(verbose.verbose, 2);
    }

    #[test]
    fn precision_is_bounded() {
        let argv = ["polyline-codec", "decode", "--precision", "40"];
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn config_command_maps() {
        assert_eq!(parse_opts(&["config"]).command, Command::Config);
    }

    #[test]
    fn parse_coords_accepts_mixed_separators() {
        let text = "# track\n38.5,-120.2\n\n40.7 -120.95\n  43.252 , -126.453  \n";
        let coords = parse_coords(text, 2).unwrap();
        assert_eq!(
            coords,
            vec![
                vec![38.5, -120.2],
                vec![40.7, -120.95],
                vec![43.252, -126.453]
            ]
        );
    }

    #[test]
    fn parse_coords_reports_line() {
        let err = parse_coords("1,2\n3\n", 2).unwrap_err();
        assert!(err.starts_with("line 2:"), "{err}");
        let err = parse_coords("1,x\n", 2).unwrap_err();
        assert!(err.contains("invalid number 'x'"), "{err}");
    }

    #[test]
    fn precision_follows_scale() {
        assert_eq!(default_precision(1e5), 5);
        assert_eq!(default_precision(1.0), 0);
        assert_eq!(default_precision(0.01), 0);
        assert_eq!(default_precision(2e6), 7);
        assert_eq!(default_precision(1e300), MAX_PRECISION);
    }

    #[test]
    fn format_coords_joins_axes() {
        let text = format_coords(&[vec![38.5, -120.2], vec![1.0, 2.0]], 2);
        assert_eq!(text, "38.50,-120.20\n1.00,2.00\n");
    }

    #[test]
    fn fuzz_hook_tolerates_garbage() {
        fuzz_try_parse_args(&["--dim".to_string()]);
        fuzz_try_parse_args(&["encode".to_string(), "--scale".to_string(), "x".to_string()]);
    }
}
