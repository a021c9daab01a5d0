use peywand::config::Config;
use peywand::db::PeywandDb;
use peywand::error::Result;
use peywand::plugin::PluginRegistry;

pub struct AppContext<'a> {
    pub db: &'a PeywandDb,
    pub config: &'a Config,
    pub registry: &'a PluginRegistry,
    /// Colored output; false with `--nc` or `color: false` in the config
    pub color: bool,
}

pub mod add;
pub mod delete;
pub mod import_export;
pub mod list;
pub mod misc;
pub mod update;

pub trait PeywandCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()>;
}

/// Enum-based dispatch for commands (avoids Box<dyn PeywandCommand>)
pub enum CommandEnum {
    Init(misc::InitCommand),
    Add(add::AddCommand),
    List(list::ListCommand),
    Update(update::UpdateCommand),
    Delete(delete::DeleteCommand),
    Import(import_export::ImportCommand),
    Export(import_export::ExportCommand),
    Formats(misc::FormatsCommand),
}

impl CommandEnum {
    pub fn execute(&self, ctx: &AppContext) -> Result<()> {
        match self {
            Self::Init(cmd) => cmd.execute(ctx),
            Self::Add(cmd) => cmd.execute(ctx),
            Self::List(cmd) => cmd.execute(ctx),
            Self::Update(cmd) => cmd.execute(ctx),
            Self::Delete(cmd) => cmd.execute(ctx),
            Self::Import(cmd) => cmd.execute(ctx),
            Self::Export(cmd) => cmd.execute(ctx),
            Self::Formats(cmd) => cmd.execute(ctx),
        }
    }
}
