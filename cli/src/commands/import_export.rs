use super::{AppContext, PeywandCommand};
use indicatif::{ProgressBar, ProgressStyle};
use peywand::db::InsertOutcome;
use peywand::error::Result;
use peywand::models::{Bookmark, BookmarkFilter};
use peywand::plugin::{BookmarkSink, ImportReport};
use std::path::{Path, PathBuf};
use std::time::Duration;

fn spinner(template: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template(template)
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Sink that forwards to another sink and ticks a progress bar per row
struct ProgressSink<'a> {
    inner: &'a mut dyn BookmarkSink,
    pb: &'a ProgressBar,
}

impl BookmarkSink for ProgressSink<'_> {
    fn insert(&mut self, bookmark: &Bookmark) -> Result<InsertOutcome> {
        self.pb.inc(1);
        self.pb.set_message(bookmark.link.clone());
        self.inner.insert(bookmark)
    }
}

#[derive(Debug, Clone)]
pub struct ImportCommand {
    pub format: String,
    pub file: PathBuf,
}

impl ImportCommand {
    pub fn run(&self, ctx: &AppContext) -> Result<ImportReport> {
        let plugin = ctx.registry.get(&self.format)?;

        let pb = spinner("{spinner:.green} [{pos}] {msg}");
        pb.set_message(format!("Importing {}", self.file.display()));

        let result = ctx.db.insert_batch(|sink| {
            let mut sink = ProgressSink { inner: sink, pb: &pb };
            plugin.import(&self.file, &mut sink)
        });
        pb.finish_and_clear();

        result
    }

    fn summary(&self, report: &ImportReport) -> String {
        format!(
            "{}: {} row(s), {}",
            self.file.display(),
            report.total(),
            report
        )
    }
}

impl PeywandCommand for ImportCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let report = self.run(ctx)?;
        eprintln!("{}", self.summary(&report));
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ExportCommand {
    pub format: String,
    pub file: PathBuf,
    pub title: Option<String>,
    pub link: Option<String>,
    pub tags: Option<String>,
}

impl ExportCommand {
    fn filter(&self) -> BookmarkFilter {
        BookmarkFilter::from_parts(
            self.title.as_deref(),
            self.link.as_deref(),
            self.tags.as_deref(),
        )
    }

    /// Write the matching bookmarks and return how many were written
    pub fn run(&self, ctx: &AppContext) -> Result<usize> {
        let plugin = ctx.registry.get(&self.format)?;
        let bookmarks = ctx.db.find(&self.filter())?;

        let pb = ProgressBar::new(bookmarks.len() as u64);
        pb.set_style(
            ProgressStyle::with_template("{msg} [{bar:40.cyan/blue}] {pos}/{len}")
                .map(|style| style.progress_chars("=>-"))
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        pb.set_message(format!("Exporting to {}", display_name(&self.file)));

        let result = plugin.export_with(&self.file, &bookmarks, &mut |bookmark| {
            pb.inc(1);
            pb.set_message(bookmark.link.clone());
        });
        pb.finish_and_clear();

        result.map(|_| bookmarks.len())
    }
}

impl PeywandCommand for ExportCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let count = self.run(ctx)?;
        eprintln!(
            "Exported {} bookmark(s) to {} as {}",
            count,
            self.file.display(),
            self.format
        );
        Ok(())
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
