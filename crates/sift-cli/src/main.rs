use anyhow::Result;
use clap::Parser;
use sift::{BoundForm, SiftError, SqlParams};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod args;
mod demo;

use args::{to_data, Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        match e.downcast_ref::<SiftError>() {
            Some(SiftError::Bind(errors)) => {
                for error in errors {
                    if error.args.is_empty() {
                        eprintln!("error: {}", error);
                    } else {
                        eprintln!("error: {} ({})", error, error.args.join(", "));
                    }
                }
            }
            _ => eprintln!("Error: {}", e),
        }
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .with_env_filter(filter)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let form = demo::form(cli.qualifier.as_deref());
    debug!(dialect = %cli.dialect, fields = form.len(), "form ready");

    match cli.command {
        Commands::Sql { pairs } => {
            let bound = form.try_bind(&to_data(pairs))?;
            let mut params = SqlParams::new();
            println!("{}", bound.predicate.to_sql(cli.dialect, &mut params));
            println!("params: {}", serde_json::to_string(&params.values)?);
        }
        Commands::Echo { pairs } => {
            let bound = form.try_bind(&to_data(pairs))?;
            for (key, value) in &bound.data {
                println!("{}={}", key, value);
            }
        }
        Commands::Filter { pairs } => {
            let bound = form.try_bind(&to_data(pairs))?;
            print_matches(&bound)?;
        }
        Commands::Fields => {
            for (name, keys) in demo::FIELDS {
                println!("{:<10} {}", name, keys);
            }
        }
    }
    Ok(())
}

fn print_matches(bound: &BoundForm) -> Result<()> {
    let tasks = demo::tasks();
    let hits = bound.predicate.filter(&tasks, demo::accessor)?;
    for task in &hits {
        println!(
            "{:>3}  {:<6} {}",
            task.id,
            sift::FilterEnum::name(&task.status),
            task.title
        );
    }
    println!("{} of {} tasks", hits.len(), tasks.len());
    Ok(())
}
