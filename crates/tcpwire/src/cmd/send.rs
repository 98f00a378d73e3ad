use std::fs;
use std::io::Read;
use std::time::Duration;

use tcpwire_session::{SendInput, Session, SessionConfig};

use crate::cmd::SendArgs;
use crate::exit::{io_error, session_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_send_output, OutputFormat};

pub fn run(args: SendArgs, format: OutputFormat) -> CliResult<i32> {
    let config = SessionConfig {
        network: args.network,
        host: args.host.clone(),
        port: args.port.clone(),
        write_timeout_ms: parse_timeout_ms(args.write_timeout.as_deref())?,
        read_timeout_ms: parse_timeout_ms(args.read_timeout.as_deref())?,
        delimiter: args.delimiter.map(|d| d.as_named()),
        custom_delimiter: args.custom_delimiter.clone(),
        wait_for_reply: args.wait,
        keep_connection_open: false,
    };

    let session =
        Session::new(config).map_err(|err| session_error("invalid configuration", err))?;

    let payload = resolve_payload(&args)?;
    let output = session
        .send(SendInput::new(payload))
        .map_err(|err| session_error("send failed", err))?;

    if args.wait {
        print_send_output(&output, format);
    }

    Ok(SUCCESS)
}

fn resolve_payload(args: &SendArgs) -> CliResult<Vec<u8>> {
    if let Some(data) = &args.data {
        return Ok(data.as_bytes().to_vec());
    }
    if let Some(path) = &args.file {
        return fs::read(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err));
    }
    let mut payload = Vec::new();
    std::io::stdin()
        .read_to_end(&mut payload)
        .map_err(|err| io_error("failed reading stdin", err))?;
    Ok(payload)
}

fn parse_timeout_ms(input: Option<&str>) -> CliResult<u64> {
    let Some(input) = input else {
        return Ok(0);
    };
    parse_duration(input).map(|d| d.as_millis() as u64)
}

fn parse_duration(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::new(USAGE, "duration must not be empty"));
    }

    let (number, unit) = if let Some(num) = input.strip_suffix("ms") {
        (num, "ms")
    } else if let Some(num) = input.strip_suffix('s') {
        (num, "s")
    } else {
        (input, "s")
    };

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid duration value: {input}")))?;

    if value == 0 {
        return Err(CliError::new(USAGE, "duration must be greater than zero"));
    }

    match unit {
        "ms" => Ok(Duration::from_millis(value)),
        "s" => Ok(Duration::from_secs(value)),
        _ => Err(CliError::new(
            USAGE,
            format!("unsupported duration unit: {unit}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_duration_seconds_and_millis() {
        assert_eq!(parse_duration("2s").unwrap(), Duration::from_secs(2));
        assert_eq!(parse_duration("150ms").unwrap(), Duration::from_millis(150));
        assert_eq!(parse_duration("3").unwrap(), Duration::from_secs(3));
    }

    #[test]
    fn parse_duration_rejects_invalid_values() {
        assert!(parse_duration("0s").is_err());
        assert!(parse_duration("bad").is_err());
        assert!(parse_duration("").is_err());
    }

    #[test]
    fn absent_timeout_means_disabled() {
        assert_eq!(parse_timeout_ms(None).unwrap(), 0);
        assert_eq!(parse_timeout_ms(Some("250ms")).unwrap(), 250);
    }
}
