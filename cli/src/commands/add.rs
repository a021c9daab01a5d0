use super::{AppContext, PeywandCommand};
use peywand::db::InsertOutcome;
use peywand::error::{PeywandError, Result};
use peywand::models::Bookmark;

#[derive(Debug, Clone)]
pub struct AddCommand {
    pub title: String,
    pub link: String,
    pub tags: String,
}

impl PeywandCommand for AddCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let bookmark = Bookmark::new(self.title.trim(), self.link.trim(), &self.tags);

        match ctx.db.insert(&bookmark)? {
            InsertOutcome::Inserted(id) => {
                eprintln!("Added bookmark at index {}", id);
                Ok(())
            }
            InsertOutcome::Duplicate => Err(PeywandError::Duplicate(bookmark.link)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::TestEnv;
    use rstest::rstest;

    fn cmd(title: &str, link: &str, tags: &str) -> AddCommand {
        AddCommand {
            title: title.to_string(),
            link: link.to_string(),
            tags: tags.to_string(),
        }
    }

    #[rstest]
    #[case("Rust Book", "https://doc.rust-lang.org/book/", "rust;learning", "rust;learning")]
    #[case("Comma tags", "https://example.com", "a, b,a", "a;b")]
    #[case("No tags", "https://bare.example", "", "")]
    fn test_add_command(
        #[case] title: &str,
        #[case] link: &str,
        #[case] tags: &str,
        #[case] stored_tags: &str,
    ) {
        let env = TestEnv::new();
        cmd(title, link, tags).execute(&env.ctx()).unwrap();

        let records = env.db.all().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, title);
        assert_eq!(records[0].link, link);
        assert_eq!(records[0].tags, stored_tags);
    }

    #[test]
    fn test_add_duplicate_link_fails() {
        let env = TestEnv::new();
        env.add("First", "https://example.com", "");

        let result = cmd("Second", "https://example.com", "").execute(&env.ctx());
        assert!(matches!(result, Err(PeywandError::Duplicate(_))));
        assert_eq!(env.db.count().unwrap(), 1);
    }

    #[rstest]
    #[case("", "https://example.com")]
    #[case("Title", "   ")]
    fn test_add_missing_field_fails(#[case] title: &str, #[case] link: &str) {
        let env = TestEnv::new();
        let result = cmd(title, link, "").execute(&env.ctx());
        assert!(matches!(result, Err(PeywandError::Validation(_))));
        assert_eq!(env.db.count().unwrap(), 0);
    }
}
