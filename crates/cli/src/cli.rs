use std::path::PathBuf;

use clap::{Parser, Subcommand};
use storefront_core::{ComponentId, ContentSection, LayoutMode};

/// Storefront page editor.
///
/// Edits the persisted layout, copy and color scheme of the storefront page,
/// and forwards prompts to the layout assistant.
#[derive(Parser, Debug)]
#[command(name = "storefront", about = "Storefront page editor")]
pub struct CliArgs {
    /// Snapshot directory (overrides DATA_DIR)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Layout mode: grid or list (overrides LAYOUT_MODE)
    #[arg(long, global = true)]
    pub mode: Option<LayoutMode>,

    /// Assistant base URL (overrides ASSISTANT_BASE_URL)
    #[arg(long, global = true)]
    pub assistant_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the layout, theme and hidden components
    Show {
        /// Also print all editable copy
        #[arg(long)]
        content: bool,
    },

    /// Place a component's start cell (grid mode)
    Move {
        component: ComponentId,
        column: u32,
        row: u32,
    },

    /// Resize a component: small, medium, large, full, or a column count (grid mode)
    Resize {
        component: ComponentId,
        size: String,
        /// Row span; only used with a column count
        #[arg(long)]
        rows: Option<u32>,
    },

    /// Drop one component onto another (swap in grid mode, reorder in list mode)
    Swap {
        dragged: ComponentId,
        target: ComponentId,
    },

    /// Move the component at one index to another (list mode)
    Reorder { from: usize, to: usize },

    /// Hide a component
    Remove { component: ComponentId },

    /// Show a hidden component where it was
    Restore { component: ComponentId },

    /// Restore the default arrangement and clear the event log
    ResetLayout,

    /// Restore the default copy
    ResetContent,

    /// Edit one text field
    Edit {
        section: ContentSection,
        field: String,
        value: String,
    },

    /// Switch the active color scheme
    Scheme { id: String },

    /// List the color scheme catalog
    Schemes,

    /// Print recorded layout events, newest last
    Events {
        /// Only the most recent N events
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Print the context that would be sent to the assistant
    Context,

    /// Apply a change list from a JSON file
    Apply { file: PathBuf },

    /// Apply the built-in demo change list
    Mock,

    /// Ask the assistant to change the page
    Ask { prompt: String },
}
