use anyhow::bail;
use clap::Parser;
use inquire::InquireError;
use tracing_subscriber::EnvFilter;

use eventseek::{
    assistant::{self, Reply},
    cli::{self, InterpreterArgs},
    config::Config,
    listing::ListingFilters,
    search_query::{Interpreter, KScaling},
};

fn interpreter(config: &Config, args: &InterpreterArgs) -> Interpreter {
    if args.scoped_k {
        Interpreter::new(KScaling::Scoped)
    } else {
        config.interpreter()
    }
}

fn print_reply(reply: Option<Reply>) {
    match reply {
        None => {}
        Some(Reply::Search { message, link, .. }) => {
            println!("{message}");
            println!("{link}");
        }
        Some(Reply::NotUnderstood { message }) => println!("{message}"),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cli::Args::parse();

    let config = Config::load_with(Config::default_base_path()?)?;

    match args.command {
        cli::Command::Parse {
            text,
            interpreter_args,
        } => {
            let filters = interpreter(&config, &interpreter_args).parse(&text.join(" "));
            println!("{}", serde_json::to_string_pretty(&filters)?);
            Ok(())
        }

        cli::Command::Ask {
            text,
            interpreter_args,
        } => {
            let interpreter = interpreter(&config, &interpreter_args);
            print_reply(assistant::respond(&text.join(" "), &interpreter));
            Ok(())
        }

        cli::Command::Chat { interpreter_args } => {
            let interpreter = interpreter(&config, &interpreter_args);
            println!("{}", assistant::GREETING);

            loop {
                let line = match inquire::Text::new(">").prompt() {
                    Ok(line) => line,
                    Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                        return Ok(());
                    }
                    Err(err) => bail!("An error occurred: {}", err),
                };

                if line.trim().is_empty() {
                    return Ok(());
                }

                print_reply(assistant::respond(&line, &interpreter));
            }
        }

        cli::Command::Seed { query } => {
            let filters = ListingFilters::from_query(&query, config.listing.max_price);
            println!("{}", serde_json::to_string_pretty(&filters)?);
            Ok(())
        }

        cli::Command::Serve { addr } => {
            let addr = addr.unwrap_or_else(|| config.web.addr.clone());
            eventseek::web::start_daemon(config, addr)?;
            Ok(())
        }

        cli::Command::Config {} => {
            print!("{}", serde_yml::to_string(&config)?);
            Ok(())
        }
    }
}
