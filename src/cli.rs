use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct InterpreterArgs {
    /// Only treat "k" as thousands when it directly follows a price.
    /// By default any "k" in the query scales every price.
    #[clap(long, default_value = "false")]
    pub scoped_k: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Extract category, location and price range from a request
    Parse {
        /// Free-text request, e.g. "caterer in Pune under 50k"
        #[clap(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,

        #[clap(flatten)]
        interpreter_args: InterpreterArgs,
    },
    /// Ask the assistant once and print its reply
    Ask {
        #[clap(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,

        #[clap(flatten)]
        interpreter_args: InterpreterArgs,
    },
    /// Chat with the assistant interactively
    Chat {
        #[clap(flatten)]
        interpreter_args: InterpreterArgs,
    },
    /// Build the listings page filters from a url query string
    Seed {
        /// e.g. "category=Catering&maxPrice=50000"
        #[clap(allow_hyphen_values = true)]
        query: String,
    },
    /// Start the http service.
    Serve {
        /// Overrides web.addr from the config
        #[clap(long)]
        addr: Option<String>,
    },
    /// Print the effective configuration
    Config {},
}
