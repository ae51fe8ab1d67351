use std::error::Error;

use clap::Parser;
use gsdep::logging::{init_logging, LogFormat, LogLevel};
use gsdep_client::{RetryPolicy, Session, SessionConfig};
use gsdep_frame::Message;
use gsdep_wire::{Channel, TypedValue};

/// GSDEP protocol client.
///
/// Connects to a server, runs the CNCT handshake, optionally sends one
/// typed value, and with `--watch` subscribes to the data stream and
/// prints every decoded message.
#[derive(Debug, Parser)]
#[command(name = "gsdep", version, about)]
struct Cli {
    /// Server host.
    #[arg(long, default_value = "localhost")]
    host: String,

    /// Server port.
    #[arg(long, default_value_t = 1337)]
    port: u16,

    /// Channel for the outgoing value.
    #[arg(long, value_name = "CHANNEL", default_value = "com")]
    channel: ChannelArg,

    /// Send a UTF-8 string payload.
    #[arg(long, group = "payload")]
    text: Option<String>,

    /// Send an integer payload.
    #[arg(long, group = "payload", allow_negative_numbers = true)]
    int: Option<i32>,

    /// Send a float payload.
    #[arg(long, group = "payload", allow_negative_numbers = true)]
    float: Option<f64>,

    /// Send an integer list payload (comma separated).
    #[arg(long, group = "payload", value_delimiter = ',', allow_negative_numbers = true)]
    int_list: Option<Vec<i32>>,

    /// Send a float list payload (comma separated).
    #[arg(long, group = "payload", value_delimiter = ',', allow_negative_numbers = true)]
    float_list: Option<Vec<f64>>,

    /// Send a JSON object payload.
    #[arg(long, group = "payload")]
    json: Option<String>,

    /// Subscribe to the data stream and print messages until interrupted.
    #[arg(long)]
    watch: bool,

    /// Give up the handshake after this many attempts instead of retrying
    /// forever.
    #[arg(long)]
    max_attempts: Option<u32>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: LogLevel,
}

#[derive(Copy, Clone, Debug, clap::ValueEnum)]
enum ChannelArg {
    Com,
    Dat,
}

impl From<ChannelArg> for Channel {
    fn from(arg: ChannelArg) -> Self {
        match arg {
            ChannelArg::Com => Channel::Com,
            ChannelArg::Dat => Channel::Dat,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let value = resolve_value(&cli)?;

    let mut config = SessionConfig::new(cli.host.clone(), cli.port);
    if let Some(max) = cli.max_attempts {
        config.retry = RetryPolicy {
            max_attempts: Some(max),
            ..RetryPolicy::default()
        };
    }

    let mut session = Session::connect(&config)?;

    if let Some(value) = value {
        session.send(cli.channel.into(), &value)?;
    }

    if cli.watch {
        session.start_data()?;
        loop {
            let msg = session.recv()?;
            println!("{}", render(&msg));
        }
    }

    session.close()?;
    Ok(())
}

fn resolve_value(cli: &Cli) -> Result<Option<TypedValue>, Box<dyn Error>> {
    if let Some(text) = &cli.text {
        return Ok(Some(TypedValue::Str(text.clone())));
    }
    if let Some(v) = cli.int {
        return Ok(Some(TypedValue::Int(v)));
    }
    if let Some(v) = cli.float {
        return Ok(Some(TypedValue::Float(v)));
    }
    if let Some(vs) = &cli.int_list {
        return Ok(Some(TypedValue::IntList(vs.clone())));
    }
    if let Some(vs) = &cli.float_list {
        return Ok(Some(TypedValue::FloatList(vs.clone())));
    }
    if let Some(json) = &cli.json {
        let map = serde_json::from_str(json)?;
        return Ok(Some(TypedValue::Map(map)));
    }
    Ok(None)
}

fn render(msg: &Message) -> String {
    serde_json::json!({
        "channel": msg.channel.name(),
        "type": msg.data_type().name(),
        "value": msg.value,
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("gsdep").chain(args.iter().copied()))
    }

    #[test]
    fn defaults_match_protocol_conventions() {
        let cli = parse(&[]);
        assert_eq!(cli.host, "localhost");
        assert_eq!(cli.port, 1337);
        assert!(!cli.watch);
    }

    #[test]
    fn value_flags_resolve() {
        let cli = parse(&["--int", "-5"]);
        assert_eq!(resolve_value(&cli).unwrap(), Some(TypedValue::Int(-5)));

        let cli = parse(&["--int-list", "1,2,3"]);
        assert_eq!(
            resolve_value(&cli).unwrap(),
            Some(TypedValue::IntList(vec![1, 2, 3]))
        );

        let cli = parse(&["--json", r#"{"z": 1}"#]);
        match resolve_value(&cli).unwrap() {
            Some(TypedValue::Map(map)) => assert_eq!(map.get("z"), Some(&serde_json::json!(1))),
            other => panic!("expected mapping, got {other:?}"),
        }

        let cli = parse(&[]);
        assert_eq!(resolve_value(&cli).unwrap(), None);
    }

    #[test]
    fn invalid_json_rejected() {
        let cli = parse(&["--json", "{broken"]);
        assert!(resolve_value(&cli).is_err());
    }

    #[test]
    fn payload_flags_are_exclusive() {
        let result =
            Cli::try_parse_from(["gsdep", "--int", "1", "--text", "hi"]);
        assert!(result.is_err());
    }

    #[test]
    fn render_is_json() {
        let msg = Message::new(Channel::Dat, TypedValue::IntList(vec![1, 2]));
        let rendered = render(&msg);
        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed["channel"], "DAT");
        assert_eq!(parsed["type"], "LIST_INT");
        assert_eq!(parsed["value"], serde_json::json!([1, 2]));
    }
}
