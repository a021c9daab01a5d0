use crate::commands::{add, delete, import_export, list, misc, update, CommandEnum};
use crate::output::RowColor;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Terminal bookmark manager", long_about = None)]
pub struct Cli {
    /// Optional custom database file path
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Optional custom configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable color output
    #[arg(long, global = true)]
    pub nc: bool,

    /// Show debug information
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the database if it does not exist
    Init,

    /// Add a new bookmark
    Add {
        /// Bookmark title
        #[arg(short, long)]
        title: String,

        /// URL to bookmark
        #[arg(short, long)]
        link: String,

        /// Tags separated by ';' (',' also accepted)
        #[arg(short = 'g', long, default_value = "")]
        tags: String,
    },

    /// List bookmarks, optionally filtered
    List {
        /// Title contains
        #[arg(short, long)]
        title: Option<String>,

        /// Link contains
        #[arg(short, long)]
        link: Option<String>,

        /// Every tag must be present, e.g. "rust;web"
        #[arg(short = 'g', long)]
        tags: Option<String>,

        /// Background of alternating rows
        #[arg(short = 'c', long, value_enum)]
        row_color: Option<RowColor>,
    },

    /// Update an existing bookmark
    Update {
        /// Bookmark ID
        id: i64,

        /// New title
        #[arg(short, long)]
        title: Option<String>,

        /// New link
        #[arg(short, long)]
        link: Option<String>,

        /// Replacement tags
        #[arg(short = 'g', long)]
        tags: Option<String>,
    },

    /// Delete bookmarks by ID, or the single bookmark matching a title
    Delete {
        /// Bookmark IDs
        #[arg(num_args = 0..)]
        ids: Vec<i64>,

        /// Exact title (case-insensitive)
        #[arg(short, long, conflicts_with = "ids")]
        title: Option<String>,

        /// Exact link, narrows a title match
        #[arg(short, long, requires = "title")]
        link: Option<String>,
    },

    /// Import bookmarks from a file
    Import {
        /// File format, see `formats`
        #[arg(short, long)]
        format: String,

        /// Input file
        #[arg(short = 'n', long)]
        file: PathBuf,
    },

    /// Export bookmarks to a file
    Export {
        /// File format, see `formats`
        #[arg(short, long)]
        format: String,

        /// Output file, overwritten if it exists
        #[arg(short = 'n', long)]
        file: PathBuf,

        /// Title contains
        #[arg(short, long)]
        title: Option<String>,

        /// Link contains
        #[arg(short, long)]
        link: Option<String>,

        /// Every tag must be present
        #[arg(short = 'g', long)]
        tags: Option<String>,
    },

    /// List the supported import/export formats
    Formats,

    /// Show the program version
    Version,
}

impl Commands {
    /// Convert to a runnable command; `None` for commands that need no database
    pub fn into_command(self) -> Option<CommandEnum> {
        let command = match self {
            Commands::Init => CommandEnum::Init(misc::InitCommand),
            Commands::Add { title, link, tags } => {
                CommandEnum::Add(add::AddCommand { title, link, tags })
            }
            Commands::List {
                title,
                link,
                tags,
                row_color,
            } => CommandEnum::List(list::ListCommand {
                title,
                link,
                tags,
                row_color,
            }),
            Commands::Update {
                id,
                title,
                link,
                tags,
            } => CommandEnum::Update(update::UpdateCommand {
                id,
                title,
                link,
                tags,
            }),
            Commands::Delete { ids, title, link } => {
                CommandEnum::Delete(delete::DeleteCommand { ids, title, link })
            }
            Commands::Import { format, file } => {
                CommandEnum::Import(import_export::ImportCommand { format, file })
            }
            Commands::Export {
                format,
                file,
                title,
                link,
                tags,
            } => CommandEnum::Export(import_export::ExportCommand {
                format,
                file,
                title,
                link,
                tags,
            }),
            Commands::Formats => CommandEnum::Formats(misc::FormatsCommand),
            Commands::Version => return None,
        };
        Some(command)
    }
}
