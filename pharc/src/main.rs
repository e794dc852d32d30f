use std::path::PathBuf;

use phar_format::Compression;
use structopt::StructOpt;

mod commands;
mod error;

#[derive(Debug)]
struct ParseCompressionError(String);

impl std::error::Error for ParseCompressionError {}

impl std::fmt::Display for ParseCompressionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unknown compression method: {}", self.0)
    }
}

fn parse_compression(src: &str) -> std::result::Result<Compression, ParseCompressionError> {
    let compression = match src {
        "gz" | "gzip" | "deflate" => Compression::Deflate,
        "xz" => Compression::Xz,
        _ => return Err(ParseCompressionError(src.to_string())),
    };

    Ok(compression)
}

#[derive(Debug, StructOpt)]
#[structopt(
    name = "pharc",
    about = "PHP Code compiler - Phar executable compiling utility",
    usage = "pharc [FLAGS|OPTIONS] -e <main> -o <output>"
)]
pub(crate) struct CliOpts {
    #[structopt(short = "e", long, help = "Set the PHAR stub's main entrypoint script")]
    pub(crate) main: Option<String>,

    #[structopt(
        short = "d",
        long = "dir",
        number_of_values = 1,
        help = "Add directory contents (\"-d $dir\") optionally filtered on a specific file extension (\"$dir:$extension\")"
    )]
    pub(crate) dirs: Vec<String>,

    #[structopt(
        short = "f",
        long = "file",
        number_of_values = 1,
        help = "Add a single file to the archive"
    )]
    pub(crate) files: Vec<String>,

    #[structopt(
        short = "m",
        long = "meta",
        number_of_values = 1,
        help = "Add a metadata property (eg: \"-m $key:$value\")"
    )]
    pub(crate) meta: Vec<String>,

    #[structopt(
        short = "o",
        long,
        parse(from_os_str),
        help = "Set the compiled archive output name"
    )]
    pub(crate) output: Option<PathBuf>,

    #[structopt(
        short = "b",
        long,
        parse(from_os_str),
        help = "Load legal notice from the given banner file"
    )]
    pub(crate) banner: Option<PathBuf>,

    #[structopt(
        long = "shebang-less",
        help = "Produce a stub deprived of the shebang directive"
    )]
    pub(crate) shebang_less: bool,

    #[structopt(
        short = "C",
        long,
        parse(try_from_str = parse_compression),
        default_value = "gz",
        help = "Compression to be used for archive entries [gz|xz]"
    )]
    pub(crate) compression: Compression,

    #[structopt(short, long, help = "Show verbose output")]
    pub(crate) verbose: bool,
}

fn main() {
    let opts = CliOpts::from_args();

    let level = if opts.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = commands::compile(opts) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
