use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

use tcpwire_frame::NamedDelimiter;
use tcpwire_transport::Network;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod send;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write one payload to a TCP destination, optionally waiting for a
    /// delimiter-framed reply.
    Send(SendArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Send(args) => send::run(args, format),
    }
}

/// Named delimiter choices on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum DelimiterArg {
    Cr,
    Lf,
    Ff,
}

impl DelimiterArg {
    pub fn as_named(self) -> NamedDelimiter {
        match self {
            DelimiterArg::Cr => NamedDelimiter::Cr,
            DelimiterArg::Lf => NamedDelimiter::Lf,
            DelimiterArg::Ff => NamedDelimiter::Ff,
        }
    }
}

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Destination host.
    #[arg(long, default_value = "localhost")]
    pub host: String,
    /// Destination port.
    #[arg(long)]
    pub port: String,
    /// Transport kind: tcp, tcp4, or tcp6.
    #[arg(long, default_value = "tcp")]
    pub network: Network,
    /// Delimiter appended to the payload and framing the reply.
    #[arg(long, value_enum)]
    pub delimiter: Option<DelimiterArg>,
    /// Hex-encoded custom delimiter byte (overrides --delimiter).
    #[arg(long, value_name = "HEX")]
    pub custom_delimiter: Option<String>,
    /// Raw string payload.
    #[arg(long, conflicts_with = "file")]
    pub data: Option<String>,
    /// Read payload from file; with neither --data nor --file, the
    /// payload is read from stdin.
    #[arg(long)]
    pub file: Option<PathBuf>,
    /// Wait for one reply and print it.
    #[arg(long)]
    pub wait: bool,
    /// Write deadline (e.g. 5s, 500ms).
    #[arg(long, value_name = "DURATION")]
    pub write_timeout: Option<String>,
    /// Read deadline while waiting for the reply (e.g. 5s, 500ms).
    #[arg(long, value_name = "DURATION")]
    pub read_timeout: Option<String>,
}
