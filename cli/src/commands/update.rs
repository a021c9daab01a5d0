use super::{AppContext, PeywandCommand};
use peywand::error::{PeywandError, Result};
use peywand::models::BookmarkUpdate;

#[derive(Debug, Clone)]
pub struct UpdateCommand {
    pub id: i64,
    pub title: Option<String>,
    pub link: Option<String>,
    pub tags: Option<String>,
}

impl PeywandCommand for UpdateCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let changes = BookmarkUpdate {
            title: self.title.as_deref().map(|t| t.trim().to_string()),
            link: self.link.as_deref().map(|l| l.trim().to_string()),
            tags: self.tags.clone(),
        };

        if changes.is_empty() {
            return Err(PeywandError::Validation(
                "nothing to update; pass at least one of --title, --link or --tags".to_string(),
            ));
        }

        let updated = ctx.db.update(self.id, &changes)?;
        eprintln!("Bookmark '{}/{}' updated!", updated.link, updated.title);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::TestEnv;
    use rstest::rstest;

    fn cmd(id: i64, title: Option<&str>, link: Option<&str>, tags: Option<&str>) -> UpdateCommand {
        UpdateCommand {
            id,
            title: title.map(String::from),
            link: link.map(String::from),
            tags: tags.map(String::from),
        }
    }

    #[rstest]
    #[case(Some("Renamed"), None, None, ("Renamed", "https://a.example", "x;y"))]
    #[case(None, Some("https://moved.example"), None, ("A", "https://moved.example", "x;y"))]
    #[case(None, None, Some("z, w"), ("A", "https://a.example", "z;w"))]
    #[case(None, None, Some(""), ("A", "https://a.example", ""))]
    fn test_update_fields(
        #[case] title: Option<&str>,
        #[case] link: Option<&str>,
        #[case] tags: Option<&str>,
        #[case] expected: (&str, &str, &str),
    ) {
        let env = TestEnv::new();
        let id = env.add("A", "https://a.example", "x;y");

        cmd(id, title, link, tags).execute(&env.ctx()).unwrap();

        let stored = env.db.get(id).unwrap().unwrap();
        assert_eq!(
            (stored.title.as_str(), stored.link.as_str(), stored.tags.as_str()),
            expected
        );
    }

    #[test]
    fn test_update_without_fields_fails() {
        let env = TestEnv::new();
        let id = env.add("A", "https://a.example", "");
        let result = cmd(id, None, None, None).execute(&env.ctx());
        assert!(matches!(result, Err(PeywandError::Validation(_))));
    }

    #[test]
    fn test_update_unknown_id_fails() {
        let env = TestEnv::new();
        let result = cmd(42, Some("x"), None, None).execute(&env.ctx());
        assert!(matches!(result, Err(PeywandError::BookmarkNotFound(42))));
    }

    #[test]
    fn test_update_to_taken_link_fails() {
        let env = TestEnv::new();
        env.add("A", "https://a.example", "");
        let id = env.add("B", "https://b.example", "");

        let result = cmd(id, None, Some("https://a.example"), None).execute(&env.ctx());
        assert!(matches!(result, Err(PeywandError::Duplicate(_))));
        assert_eq!(env.db.get(id).unwrap().unwrap().link, "https://b.example");
    }
}
