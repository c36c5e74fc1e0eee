use clap::{Parser, Subcommand, Args, ValueEnum};

#[derive(Parser)]
#[command(name = "houndsploit", version, about = "Search exploits and shellcodes")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// YAML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// SQLite database path (overrides the config file)
    #[arg(long, global = true)]
    pub db: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Serve(ServeArgs),
    /// Search the catalog from the terminal
    Search(SearchArgs),
    /// Manage search-term suggestions
    Suggestions(SuggestionsArgs),
    /// Import exploit and shellcode records from a JSON file
    Import(ImportArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

#[derive(Args, Clone)]
pub struct ServeArgs {
    /// Listen port
    #[arg(long)]
    pub port: Option<u16>,

    /// Listen address
    #[arg(long)]
    pub host: Option<String>,

    /// Directory holding exploit and shellcode source files
    #[arg(long)]
    pub artifacts: Option<String>,

    /// Allow cross-origin requests
    #[arg(long)]
    pub cors: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OperatorArg {
    And,
    Or,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum CollectionArg {
    Exploits,
    Shellcodes,
    All,
}

#[derive(Args, Clone)]
pub struct SearchArgs {
    /// Free text matched against description, author and file path
    #[arg(default_value = "")]
    pub text: String,

    /// How text and filters combine; any filter switches to advanced search
    #[arg(long, value_enum, default_value = "and")]
    pub operator: OperatorArg,

    /// Type filter, by label
    #[arg(long = "type")]
    pub vuln_type: Option<String>,

    /// Platform filter, by label
    #[arg(long)]
    pub platform: Option<String>,

    /// Author filter (substring)
    #[arg(long)]
    pub author: Option<String>,

    /// Port filter
    #[arg(long)]
    pub port: Option<u16>,

    /// Earliest publication date (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<chrono::NaiveDate>,

    /// Latest publication date (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<chrono::NaiveDate>,

    /// Which collection to search
    #[arg(long, value_enum, default_value = "all")]
    pub collection: CollectionArg,

    /// Skip suggestion substitution
    #[arg(long)]
    pub raw: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl SearchArgs {
    pub fn is_advanced(&self) -> bool {
        self.operator == OperatorArg::Or
            || self.vuln_type.is_some()
            || self.platform.is_some()
            || self.author.is_some()
            || self.port.is_some()
            || self.from.is_some()
            || self.to.is_some()
    }
}

#[derive(Args, Clone)]
pub struct SuggestionsArgs {
    #[command(subcommand)]
    pub action: SuggestionAction,
}

#[derive(Subcommand, Clone)]
pub enum SuggestionAction {
    /// List stored suggestions
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add or update the suggestion for a term
    Add {
        searched: String,
        suggestion: String,
        /// Replace the term automatically instead of proposing it
        #[arg(long)]
        auto: bool,
    },
    /// Delete a suggestion by id
    Delete { id: i64 },
}

#[derive(Args, Clone)]
pub struct ImportArgs {
    /// JSON file with "exploits" and "shellcodes" arrays
    pub file: String,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Config file to validate
    pub config: String,
}
