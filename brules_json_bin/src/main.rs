use brules_json::{
    has_json_path_with_options, is_json_with_options, parse_with_options, JsonPathQuery,
    ParseOptions,
};

use clap::{Parser, Subcommand};
use std::error::Error;
use std::io::{self, Read, Write};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Only accept strict JSON: quoted keys and double-quoted strings.
    #[arg(long)]
    strict: bool,

    /// Maximum nesting of arrays and objects.
    #[arg(long, default_value_t = brules_json::parser::DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check whether stdin holds a JSON-like document.
    Check,
    /// Check whether the jsonpath matches anything in the document on stdin.
    Has {
        /// The jsonpath string.
        #[arg(short, long)]
        jsonpath: String,
    },
    /// Print every match of the jsonpath in the document on stdin.
    Query {
        /// The jsonpath string.
        #[arg(short, long)]
        jsonpath: String,

        /// Print the matches as one JSON array instead of one per line.
        #[arg(long)]
        json: bool,
    },
}

impl Args {
    fn parse_options(&self) -> ParseOptions {
        let options = if self.strict {
            ParseOptions::strict()
        } else {
            ParseOptions::default()
        };
        options.with_max_depth(self.max_depth)
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_document() -> Result<String, Box<dyn Error>> {
    let mut json = String::new();
    io::stdin().read_to_string(&mut json)?;
    Ok(json)
}

/// Answers the subcommand for `json`, writing the answer to `out`.
fn run(args: &Args, json: &str, out: &mut impl Write) -> Result<bool, Box<dyn Error>> {
    debug!(bytes = json.len(), command = ?args.command, "read document");

    let options = args.parse_options();
    match &args.command {
        Command::Check => {
            let ok = is_json_with_options(Some(json), options);
            writeln!(out, "{}", ok)?;
            Ok(ok)
        }
        Command::Has { jsonpath } => {
            let found =
                has_json_path_with_options(Some(json), Some(jsonpath.as_str()), options)?;
            writeln!(out, "{}", found)?;
            Ok(found)
        }
        Command::Query {
            jsonpath,
            json: as_json,
        } => {
            let tree = parse_with_options(json, options)?;
            let matches = tree.query(jsonpath)?;
            if *as_json {
                let values = matches.iter().map(|v| serde_json::Value::from(*v)).collect();
                writeln!(out, "{}", serde_json::Value::Array(values))?;
            } else {
                for m in &matches {
                    writeln!(out, "{}", m.to_match_string())?;
                }
            }
            Ok(!matches.is_empty())
        }
    }
}

/// 0 for a positive answer, 1 for a negative one, 2 for an error.
fn exit_status(outcome: &Result<bool, Box<dyn Error>>) -> u8 {
    match outcome {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(_) => 2,
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args.log_level);

    let outcome = read_document().and_then(|json| run(&args, &json, &mut io::stdout().lock()));
    if let Err(e) = &outcome {
        eprintln!("error: {}", e);
    }
    ExitCode::from(exit_status(&outcome))
}

#[cfg(test)]
mod test {
    use clap::Parser;

    use super::{exit_status, run, Args};

    fn answer(argv: &[&str], json: &str) -> (u8, String) {
        let args = Args::try_parse_from(argv.iter().copied()).unwrap();
        let mut out = vec![];
        let outcome = run(&args, json, &mut out);
        (exit_status(&outcome), String::from_utf8(out).unwrap())
    }

    const PEOPLE: &str = "{items: [{'name': 'carl'}, {'name': 'jim', age: 3}]}";

    #[test]
    fn check_exits_zero_only_for_json() {
        assert_eq!((0, "true\n".to_string()), answer(&["brules-json", "check"], "{name: 'Carl'}"));
        assert_eq!((1, "false\n".to_string()), answer(&["brules-json", "check"], "{x}"));
        assert_eq!(
            (1, "false\n".to_string()),
            answer(&["brules-json", "--strict", "check"], "{name: 'Carl'}")
        );
        assert_eq!(
            (1, "false\n".to_string()),
            answer(&["brules-json", "--max-depth", "1", "check"], "[[1]]")
        );
    }

    #[test]
    fn has_exits_by_match_and_two_on_empty_path() {
        let has = |path: &str, json: &str| answer(&["brules-json", "has", "--jsonpath", path], json);
        assert_eq!((0, "true\n".to_string()), has("$.items[*].name", PEOPLE));
        assert_eq!((1, "false\n".to_string()), has("$.a[*].name", PEOPLE));
        assert_eq!((1, "false\n".to_string()), has("$.a[-].name", PEOPLE));
        assert_eq!((1, "false\n".to_string()), has("$.name", "{items: [}"));
        assert_eq!((2, String::new()), has("", PEOPLE));
    }

    #[test]
    fn query_prints_matches_and_exits_by_match() {
        let query = |argv: &[&str], json: &str| {
            let mut full = vec!["brules-json", "query"];
            full.extend_from_slice(argv);
            answer(&full, json)
        };
        assert_eq!(
            (0, "carl\njim\n".to_string()),
            query(&["--jsonpath", "$.items[*].name"], PEOPLE)
        );
        assert_eq!(
            (0, "[\"jim\",3]\n".to_string()),
            query(&["--jsonpath", "$.items[1].*", "--json"], PEOPLE)
        );
        assert_eq!((1, String::new()), query(&["--jsonpath", "$.nothing"], PEOPLE));
        assert_eq!((2, String::new()), query(&["--jsonpath", "$..name"], PEOPLE));
        assert_eq!((2, String::new()), query(&["--jsonpath", "$.items"], "{items: [}"));
    }
}
