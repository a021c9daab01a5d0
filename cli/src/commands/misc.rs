use super::{AppContext, PeywandCommand};
use peywand::error::Result;

/// The database is created on open; this only reports where it lives
#[derive(Debug, Clone)]
pub struct InitCommand;

impl PeywandCommand for InitCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let count = ctx.db.count()?;
        eprintln!(
            "Database ready at {} ({} bookmark(s))",
            ctx.db.get_path().display(),
            count
        );
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct FormatsCommand;

impl FormatsCommand {
    pub fn lines(ctx: &AppContext) -> Vec<String> {
        ctx.registry
            .plugins()
            .map(|plugin| format!("{:<6} {}", plugin.format(), plugin.description()))
            .collect()
    }
}

impl PeywandCommand for FormatsCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        for line in Self::lines(ctx) {
            println!("{}", line);
        }
        Ok(())
    }
}

pub fn version_string() -> String {
    format!("Current version: {}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::TestEnv;

    #[test]
    fn test_formats_lists_builtin_plugins() {
        let env = TestEnv::new();
        let lines = FormatsCommand::lines(&env.ctx());

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("csv"));
        assert!(lines[1].starts_with("html"));
        assert!(lines[2].starts_with("json"));
    }

    #[test]
    fn test_init_reports_ok() {
        let env = TestEnv::new();
        assert!(InitCommand.execute(&env.ctx()).is_ok());
    }

    #[test]
    fn test_version_string() {
        assert!(version_string().ends_with(env!("CARGO_PKG_VERSION")));
    }
}
