use std::path::Path;
use tracing::{info, instrument};

use super::writer::AtomicCsvWriter;
use crate::{error::Result, users::User};

/// Status a user must have to show up in the report. Compared exactly.
pub const ACTIVE_STATUS: &str = "active";

/// Email suffix a user must have to show up in the report.
pub const TEST_EMAIL_SUFFIX: &str = ".test";

/// Returns `true` for active users with an email ending in `.test`.
pub fn is_active_test_user(user: &User) -> bool {
    user.status.as_deref() == Some(ACTIVE_STATUS)
        && user
            .email
            .as_deref()
            .map_or(false, |email| email.ends_with(TEST_EMAIL_SUFFIX))
}

/// The active `.test` users, in the order they were given.
pub fn active_test_users(users: &[User]) -> Vec<&User> {
    users.iter().filter(|user| is_active_test_user(user)).collect()
}

/// Writes the `id,email` report of active `.test` users to `path` and
/// returns the number of rows written.
///
/// # Errors
/// [`Error::Write`](crate::Error::Write) if the file can't be written. The
/// previous file, if any, is left untouched in that case.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn write_active_test_users(users: &[User], path: impl AsRef<Path>) -> Result<usize> {
    let mut writer = AtomicCsvWriter::new(&path)?;
    writer.write_record(["id", "email"])?;

    let matches = active_test_users(users);
    for user in &matches {
        let email = user.email.as_deref().unwrap_or_default();
        writer.write_record([user.id.to_string().as_str(), email])?;
    }
    writer.finish()?;

    info!(rows = matches.len(), "wrote active test users report");
    Ok(matches.len())
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;

    fn user(id: i64, status: Option<&str>, email: Option<&str>) -> User {
        User {
            id,
            name: None,
            email: email.map(str::to_string),
            gender: None,
            status: status.map(str::to_string),
        }
    }

    #[test]
    fn test_filter() {
        let users = vec![
            user(1, Some("active"), Some("a@x.test")),
            user(2, Some("active"), Some("b@x.com")),
            user(3, Some("inactive"), Some("c@x.test")),
            user(4, Some("Active"), Some("d@x.test")),
            user(5, Some("active"), None),
            user(6, None, Some("f@x.test")),
            user(7, Some("active"), Some("g@x.TEST")),
            user(8, Some("active"), Some("h@y.test")),
        ];

        let ids: Vec<i64> = active_test_users(&users).iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 8]);
    }

    #[test]
    fn test_email_without_at_sign() {
        // Only the suffix matters here; the domain report drops it.
        let users = vec![user(9, Some("active"), Some("nobody.test"))];

        let ids: Vec<i64> = active_test_users(&users).iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![9]);
        assert!(crate::reports::domain_counts(&users).is_empty());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("active_test_users.csv");
        assert_eq!(write_active_test_users(&users, &path).unwrap(), 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), "id,email\n9,nobody.test\n");
    }

    #[test]
    fn test_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("active_test_users.csv");
        let users = vec![
            user(1, Some("active"), Some("a@x.test")),
            user(2, Some("active"), Some("b@x.com")),
            user(3, Some("inactive"), Some("c@x.test")),
        ];

        assert_eq!(write_active_test_users(&users, &path).unwrap(), 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), "id,email\n1,a@x.test\n");
    }

    #[test]
    fn test_write_without_matches() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("active_test_users.csv");

        assert_eq!(write_active_test_users(&[], &path).unwrap(), 0);
        assert_eq!(fs::read_to_string(&path).unwrap(), "id,email\n");
    }

    #[test]
    fn test_comma_in_email_is_quoted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("active_test_users.csv");
        let users = vec![user(9, Some("active"), Some("\"odd,one\"@x.test"))];

        write_active_test_users(&users, &path).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "id,email\n9,\"\"\"odd,one\"\"@x.test\"\n"
        );
    }
}
