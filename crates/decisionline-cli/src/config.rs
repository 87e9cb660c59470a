use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use decisionline_core::EventType;
use decisionline_layout::{DateRange, FilterCriteria};
use std::ffi::OsString;
use std::path::PathBuf;

pub const USAGE: &str = "\
usage:
  decisionline layout --events <file.json> [--config <file.toml>]
                      [--type <document|message|email|decision>]...
                      [--from <rfc3339>] [--to <rfc3339>] [--query <text>]
                      [--width <px>]
  decisionline factors --factors <file.json>

`-` reads the input from stdin.";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Layout(LayoutArgs),
    Factors { factors: PathBuf },
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutArgs {
    pub events: PathBuf,
    pub settings: Option<PathBuf>,
    pub criteria: FilterCriteria,
    pub width: Option<f64>,
}

pub fn parse_args() -> Result<Command> {
    parse_args_from(std::env::args_os().skip(1))
}

fn parse_args_from<I>(args: I) -> Result<Command>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args = args.into_iter();
    let Some(command) = args.next() else {
        anyhow::bail!("missing command\n{USAGE}");
    };

    match &*command.to_string_lossy() {
        "layout" => parse_layout(args).map(Command::Layout),
        "factors" => parse_factors(args),
        other => anyhow::bail!("unknown command: {other}\n{USAGE}"),
    }
}

fn value_of(flag: &str, args: &mut impl Iterator<Item = OsString>) -> Result<String> {
    let Some(value) = args.next() else {
        anyhow::bail!("{flag} expects a value");
    };
    Ok(value.to_string_lossy().into_owned())
}

fn parse_timestamp(flag: &str, raw: &str) -> Result<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(raw)
        .with_context(|| format!("{flag} expects an RFC 3339 timestamp, got {raw:?}"))?;
    Ok(parsed.with_timezone(&Utc))
}

fn parse_layout(mut args: impl Iterator<Item = OsString>) -> Result<LayoutArgs> {
    let mut events = None;
    let mut settings = None;
    let mut criteria = FilterCriteria::default();
    let mut width = None;
    let mut from = None;
    let mut to = None;

    while let Some(arg) = args.next() {
        match &*arg.to_string_lossy() {
            "--events" => events = Some(PathBuf::from(value_of("--events", &mut args)?)),
            "--config" => settings = Some(PathBuf::from(value_of("--config", &mut args)?)),
            "--type" => {
                let value = value_of("--type", &mut args)?;
                let Some(kind) = EventType::parse(&value) else {
                    anyhow::bail!(
                        "invalid event type: {value} (expected document|message|email|decision)"
                    );
                };
                criteria.types.insert(kind);
            }
            "--from" => from = Some(parse_timestamp("--from", &value_of("--from", &mut args)?)?),
            "--to" => to = Some(parse_timestamp("--to", &value_of("--to", &mut args)?)?),
            "--query" => criteria.search_query = Some(value_of("--query", &mut args)?),
            "--width" => {
                let value = value_of("--width", &mut args)?;
                let px: f64 = value
                    .parse()
                    .with_context(|| format!("--width expects a number, got {value:?}"))?;
                width = Some(px);
            }
            _ => anyhow::bail!("unknown argument: {:?}", arg),
        }
    }

    let Some(events) = events else {
        anyhow::bail!("layout requires --events\n{USAGE}");
    };
    if from.is_some() || to.is_some() {
        criteria.date_range = Some(DateRange::new(
            from.unwrap_or(DateTime::<Utc>::MIN_UTC),
            to.unwrap_or(DateTime::<Utc>::MAX_UTC),
        ));
    }

    Ok(LayoutArgs {
        events,
        settings,
        criteria,
        width,
    })
}

fn parse_factors(mut args: impl Iterator<Item = OsString>) -> Result<Command> {
    let mut factors = None;
    while let Some(arg) = args.next() {
        if arg == "--factors" {
            factors = Some(PathBuf::from(value_of("--factors", &mut args)?));
        } else {
            anyhow::bail!("unknown argument: {:?}", arg);
        }
    }
    let Some(factors) = factors else {
        anyhow::bail!("factors requires --factors\n{USAGE}");
    };
    Ok(Command::Factors { factors })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn args(list: &[&str]) -> Vec<OsString> {
        list.iter().map(OsString::from).collect()
    }

    #[test]
    fn parses_layout_filters() {
        let command = parse_args_from(args(&[
            "layout",
            "--events",
            "events.json",
            "--type",
            "email",
            "--type",
            "Decision",
            "--query",
            "invoice",
            "--from",
            "2024-01-01T00:00:00Z",
            "--width",
            "1440",
        ]))
        .expect("args parsed");

        let Command::Layout(layout) = command else {
            panic!("expected layout command");
        };
        assert_eq!(layout.events, PathBuf::from("events.json"));
        assert_eq!(layout.width, Some(1440.0));
        assert!(layout.criteria.types.contains(&EventType::Email));
        assert!(layout.criteria.types.contains(&EventType::Decision));
        assert_eq!(layout.criteria.search_query.as_deref(), Some("invoice"));

        let range = layout.criteria.date_range.expect("range set");
        assert_eq!(range.start, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(range.end, DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn parses_factors_command() {
        let command = parse_args_from(args(&["factors", "--factors", "-"])).expect("args parsed");
        assert_eq!(
            command,
            Command::Factors {
                factors: PathBuf::from("-")
            }
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_args_from(args(&[])).is_err());
        assert!(parse_args_from(args(&["render"])).is_err());
        assert!(parse_args_from(args(&["layout"])).is_err());
        assert!(parse_args_from(args(&["layout", "--events", "e.json", "--type", "fax"])).is_err());
        assert!(parse_args_from(args(&["layout", "--events", "e.json", "--from", "yesterday"])).is_err());
        assert!(parse_args_from(args(&["factors", "--factors"])).is_err());
    }
}
