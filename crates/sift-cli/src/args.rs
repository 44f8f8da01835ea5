use clap::{ArgAction, Parser, Subcommand};
use sift::{Data, Dialect};

#[derive(Parser, Debug)]
#[command(name = "sift")]
#[command(about = "Bind key=value filters against a demo task list", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// SQL dialect used by `sql`
    #[arg(long, env = "SIFT_DIALECT", default_value = "sqlite", global = true)]
    pub dialect: Dialect,

    /// Table alias prefixed to every column
    #[arg(long, global = true)]
    pub qualifier: Option<String>,

    /// Verbose logging (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the WHERE fragment and its parameters
    Sql {
        /// Filter input (e.g. q=bug priority.from=3 status[0]=open)
        #[arg(value_parser = parse_pair)]
        pairs: Vec<(String, String)>,
    },

    /// Print the canonical form of the input
    Echo {
        #[arg(value_parser = parse_pair)]
        pairs: Vec<(String, String)>,
    },

    /// Print the demo tasks the input selects
    Filter {
        #[arg(value_parser = parse_pair)]
        pairs: Vec<(String, String)>,
    },

    /// List the filterable fields and their keys
    Fields,
}

/// Collects `key=value` arguments into the input mapping. Later keys win.
pub fn to_data(pairs: Vec<(String, String)>) -> Data {
    pairs.into_iter().collect()
}

fn parse_pair(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, _)) if key.is_empty() => Err(format!("empty key in '{}'", s)),
        Some((key, value)) => Ok((key.to_string(), value.to_string())),
        None => Err(format!("expected key=value, got '{}'", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_split_on_first_equals() {
        assert_eq!(
            parse_pair("q=a=b"),
            Ok(("q".to_string(), "a=b".to_string()))
        );
        assert_eq!(parse_pair("q="), Ok(("q".to_string(), String::new())));
        assert!(parse_pair("q").is_err());
        assert!(parse_pair("=x").is_err());
    }

    #[test]
    fn cli_parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["sift", "sql", "q=x", "--dialect", "postgres", "-vv"])
            .unwrap();
        assert_eq!(cli.dialect, Dialect::Postgres);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Sql { pairs } => assert_eq!(pairs, vec![("q".into(), "x".into())]),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
