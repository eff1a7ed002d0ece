use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::output::{FormatOptions, OutputFormat};
use crate::pipeline::FilterOptions;

/// Window used by `--recent`.
const RECENT_WEEKS: u32 = 2;

#[derive(Parser)]
#[command(name = "linear-updates")]
#[command(about = "Print the latest Linear project updates as Markdown", version)]
#[command(after_help = "EXAMPLES:
    linear-updates                    Latest update of every project
    linear-updates -p                 Only started, planned and paused projects
    linear-updates -p -w 2            ...updated within the last two weeks
    linear-updates -u -b              Bold headers with update timestamps
    linear-updates --json             Machine-readable output")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub updates: UpdatesArgs,

    /// Output as JSON for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Log request details and show error causes
    #[arg(long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Save your Linear API key to the config file
    #[command(after_help = "EXAMPLES:
    linear-updates init")]
    Init,
    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    linear-updates completions bash > ~/.bash_completion.d/linear-updates
    linear-updates completions zsh > ~/.zfunc/_linear-updates
    linear-updates completions fish > ~/.config/fish/completions/linear-updates.fish")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Args, Clone, Debug, Default)]
pub struct UpdatesArgs {
    /// Only show projects that are started, planned or paused
    #[arg(long, short = 'p')]
    pub in_progress_only: bool,

    /// Include the last updated timestamp in project headers
    #[arg(long, short = 'u')]
    pub include_updated: bool,

    /// Use bold text instead of ## headings
    #[arg(long, short = 'b')]
    pub bold_headers: bool,

    /// Only show projects updated within the last N weeks
    #[arg(long, short = 'w', value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub weeks_back: Option<u32>,

    /// Only show projects updated within the last two weeks (same as -w 2)
    #[arg(long, short = 'r')]
    pub recent: bool,
}

impl UpdatesArgs {
    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions {
            in_progress_only: self.in_progress_only,
            weeks_back: self
                .weeks_back
                .or_else(|| self.recent.then_some(RECENT_WEEKS)),
        }
    }

    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            include_updated: self.include_updated,
            bold_headers: self.bold_headers,
        }
    }
}

impl Cli {
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Markdown
        }
    }
}
