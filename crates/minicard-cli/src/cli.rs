use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use minicard_core::{CardId, Point};

use crate::commands::common::parse_point;

#[derive(Parser)]
#[command(name = "minicard")]
#[command(about = "Arrange note cards on a stage from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the persisted state
    #[arg(long, global = true, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    /// Optional path to the config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Quick capture: minicard "buy milk"
    #[arg(trailing_var_arg = true)]
    pub card: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the topics and the cards of the current topic
    Show,
    /// Add a card to the current topic
    #[command(alias = "new")]
    Add {
        /// Card content
        content: Vec<String>,
    },
    /// Delete a card from the current topic
    #[command(alias = "delete")]
    Rm {
        /// Card id as printed by `show`
        card: CardId,
    },
    /// Edit a card's text
    Edit {
        /// Card id as printed by `show`
        card: CardId,
        /// New text (opens $EDITOR when omitted)
        #[arg(long)]
        text: Option<String>,
    },
    /// Drag a card to a stage position
    Drag {
        /// Card id as printed by `show`
        card: CardId,
        /// Pointer position where the card is let go, as X,Y
        #[arg(long, value_name = "X,Y", value_parser = parse_point, allow_hyphen_values = true)]
        to: Point,
        /// Pointer position where the card is grabbed (defaults to its corner)
        #[arg(long, value_name = "X,Y", value_parser = parse_point, allow_hyphen_values = true)]
        from: Option<Point>,
    },
    /// Manage topics
    Topic {
        #[command(subcommand)]
        command: TopicCommands,
    },
    /// Toggle secret mode
    Secret,
    /// Widen or narrow the side bar by a number of pixels
    Resize {
        /// Pixels to add, negative to shrink
        #[arg(allow_hyphen_values = true)]
        delta: i32,
    },
    /// Export all data
    Export {
        /// Export format
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
        /// Optional output file or directory (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
        /// Copy the snapshot to the system clipboard instead
        #[arg(long, conflicts_with_all = ["output", "format", "pretty"])]
        clipboard: bool,
        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Replace all data with an exported snapshot
    Import {
        /// File holding the snapshot (prompts or reads stdin when omitted)
        path: Option<PathBuf>,
    },
    /// Copy the card texts of the current topic
    Copy {
        /// Print the text instead of copying it
        #[arg(long)]
        stdout: bool,
    },
    /// Delete all data
    Reset {
        /// Confirmation phrase, DELETE ALL (prompts when omitted)
        #[arg(long, value_name = "PHRASE")]
        confirm: Option<String>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum TopicCommands {
    /// Create a topic and switch to it
    New {
        /// Topic label (prompts when omitted)
        label: Vec<String>,
    },
    /// Delete the current topic
    Rm,
    /// Rename the current topic
    Edit {
        /// New label (prompts when omitted)
        label: Vec<String>,
    },
    /// Switch to the next topic
    Next,
    /// Switch to the previous topic
    Prev,
    /// Switch to a topic by id
    Switch {
        /// Topic id as printed by `topic list`
        id: String,
    },
    /// List all topics
    List,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Markdown,
}

impl From<ExportFormat> for minicard_core::export::ExportFormat {
    fn from(format: ExportFormat) -> Self {
        match format {
            ExportFormat::Json => Self::Json,
            ExportFormat::Markdown => Self::Markdown,
        }
    }
}
