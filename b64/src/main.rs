//! b64 - encode and decode base64 from the command line

use anyhow::Result;
use base64_lenient::Alphabet;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

/// Base64 encoder and lenient decoder
#[derive(Parser)]
#[command(name = "b64")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Encode binary data to base64 text
    Encode {
        /// Text to encode (reads --input or stdin when omitted)
        text: Option<String>,

        /// Use the URL-safe alphabet (- and _ instead of + and /)
        #[arg(short, long, env = "B64_URL_SAFE")]
        url_safe: bool,

        #[command(flatten)]
        io: IoArgs,
    },

    /// Decode base64 text, skipping characters outside the alphabet
    Decode {
        /// Base64 text to decode (reads --input or stdin when omitted)
        text: Option<String>,

        /// Use the URL-safe alphabet (- and _ instead of + and /)
        #[arg(short, long, env = "B64_URL_SAFE")]
        url_safe: bool,

        /// Remove spaces and line breaks before decoding
        #[arg(short = 's', long, env = "B64_IGNORE_SPACES")]
        ignore_spaces: bool,

        #[command(flatten)]
        io: IoArgs,
    },
}

#[derive(Args)]
pub struct IoArgs {
    /// Read input from a file instead of stdin
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr, stdout carries the data
    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Encode { text, url_safe, io } => {
            let input = commands::read_input(text, io.input.as_deref())?;
            let mut sink = commands::Sink::open(io.output.as_deref())?;
            let newline = sink.is_stdout();
            commands::encode(&input, alphabet(url_safe), newline, &mut sink)?;
            sink.finish()
        }
        Commands::Decode {
            text,
            url_safe,
            ignore_spaces,
            io,
        } => {
            let input = commands::read_input(text, io.input.as_deref())?;
            let mut sink = commands::Sink::open(io.output.as_deref())?;
            commands::decode(&input, alphabet(url_safe), ignore_spaces, &mut sink)?;
            sink.finish()
        }
    }
}

fn alphabet(url_safe: bool) -> Alphabet {
    if url_safe {
        Alphabet::UrlSafe
    } else {
        Alphabet::Standard
    }
}
