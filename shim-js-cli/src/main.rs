use clap::{Parser, Subcommand, ValueEnum};
use shim_js::{
  str_split, BlockCommentNewlines, LoadOptions, SourceString, StripOptions, TargetEncoding,
};
use std::fs::File;
use std::io::stdin;
use std::io::stdout;
use std::io::Read;
use std::io::Write;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "shim-js", about = "Inspect how JS sources are loaded by the embedding shim")]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Load a UTF-8 source file the way the engine would, optionally without comments.
  Strip {
    /// File to load; omit for stdin.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output destination; omit for stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Keep comments instead of stripping them.
    #[arg(long)]
    keep_comments: bool,

    /// Target string representation.
    #[arg(long, value_enum, default_value_t = EncodingArg::Auto)]
    encoding: EncodingArg,

    /// What a multi-line block comment leaves behind.
    #[arg(long, value_enum, default_value_t = BlockNewlinesArg::Collapse)]
    block_newlines: BlockNewlinesArg,

    /// Write raw code units (Latin-1 bytes or UTF-16LE) instead of UTF-8 text.
    #[arg(long)]
    raw: bool,
  },
  /// Split a string on a single-character delimiter, one segment per line.
  Split {
    #[arg(short, long, default_value_t = ',')]
    delimiter: char,

    value: String,
  },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EncodingArg {
  Auto,
  Latin1,
  Utf16,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BlockNewlinesArg {
  Collapse,
  PerLine,
}

fn exit_with_error(name: &str, message: impl std::fmt::Display) -> ! {
  eprintln!("error: {name}: {message}");
  process::exit(1);
}

fn encode(source: &SourceString, raw: bool) -> Vec<u8> {
  match (source, raw) {
    (SourceString::Latin1(units), true) => units.clone(),
    (SourceString::Utf16(units), true) => units.iter().flat_map(|u| u.to_le_bytes()).collect(),
    (_, false) => source.to_string_lossy().into_bytes(),
  }
}

fn strip(
  input: Option<PathBuf>,
  output: Option<PathBuf>,
  options: LoadOptions,
  raw: bool,
) {
  let input_name = input
    .as_ref()
    .map(|p| p.to_string_lossy().into_owned())
    .unwrap_or_else(|| "<stdin>".to_string());
  let mut input_file: Box<dyn Read> = match input.as_ref() {
    Some(p) => match File::open(p) {
      Ok(f) => Box::new(f),
      Err(err) => exit_with_error(&input_name, format!("failed to open: {err}")),
    },
    None => Box::new(stdin()),
  };
  let mut bytes = Vec::new();
  if let Err(err) = input_file.read_to_end(&mut bytes) {
    exit_with_error(&input_name, format!("failed to read input: {err}"));
  }

  let source = match SourceString::from_utf8(&bytes, &options) {
    Ok(source) => source,
    Err(err) => exit_with_error(&input_name, err),
  };
  tracing::info!(
    input = %input_name,
    latin1 = source.is_latin1(),
    units = source.len(),
    "loaded source"
  );

  let encoded = encode(&source, raw);
  let write_result = match output.as_ref() {
    Some(p) => File::create(p)
      .and_then(|mut file| file.write_all(&encoded))
      .map_err(|err| (p.display().to_string(), err)),
    None => stdout()
      .write_all(&encoded)
      .map_err(|err| ("<stdout>".to_string(), err)),
  };
  if let Err((dest, err)) = write_result {
    exit_with_error(&dest, format!("failed to write output: {err}"));
  }
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_writer(std::io::stderr)
    .init();

  let args = Cli::parse();
  match args.command {
    Command::Strip {
      input,
      output,
      keep_comments,
      encoding,
      block_newlines,
      raw,
    } => {
      let strip_options = StripOptions::new().with_block_comment_newlines(match block_newlines {
        BlockNewlinesArg::Collapse => BlockCommentNewlines::Collapse,
        BlockNewlinesArg::PerLine => BlockCommentNewlines::PerLine,
      });
      let options = LoadOptions::new()
        .with_strip_comments(!keep_comments)
        .with_strip_options(strip_options)
        .with_encoding(match encoding {
          EncodingArg::Auto => TargetEncoding::Auto,
          EncodingArg::Latin1 => TargetEncoding::Latin1,
          EncodingArg::Utf16 => TargetEncoding::Utf16,
        });
      strip(input, output, options, raw);
    }
    Command::Split { delimiter, value } => {
      let mut out = stdout().lock();
      for segment in str_split(&value, delimiter) {
        if let Err(err) = writeln!(out, "{segment}") {
          exit_with_error("<stdout>", format!("failed to write output: {err}"));
        }
      }
    }
  }
}
