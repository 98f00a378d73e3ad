use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use serde::Serialize;
use tcpwire_session::SendOutput;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Json,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Raw
        } else {
            Self::Json
        }
    }
}

/// JSON line mirroring the result field names hosts see.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SendOutputLine<'a> {
    bytes_written: usize,
    bytes_received: usize,
    data: &'a str,
}

pub fn print_send_output(output: &SendOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let data = String::from_utf8_lossy(&output.data);
            let line = SendOutputLine {
                bytes_written: output.bytes_written,
                bytes_received: output.bytes_received,
                data: &data,
            };
            println!(
                "{}",
                serde_json::to_string(&line).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Raw => {
            if !output.data.is_empty() {
                let mut stdout = std::io::stdout().lock();
                let _ = stdout.write_all(&output.data);
                let _ = stdout.write_all(b"\n");
            }
        }
    }
}
