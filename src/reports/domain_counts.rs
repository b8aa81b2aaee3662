use std::{collections::BTreeMap, path::Path};
use tracing::{info, instrument};

use super::writer::AtomicCsvWriter;
use crate::{error::Result, users::User};

/// Returns the lowercased last label of the email's domain, or `None` if
/// there's no `@`.
///
/// The domain is everything after the first `@`. If it has no dot, the
/// whole domain is the suffix.
///
/// ```
/// use gorest_reports::reports::domain_suffix;
///
/// assert_eq!(domain_suffix("john.doe@Example.COM").as_deref(), Some("com"));
/// assert_eq!(domain_suffix("root@localhost").as_deref(), Some("localhost"));
/// assert_eq!(domain_suffix("nobody"), None);
/// ```
pub fn domain_suffix(email: &str) -> Option<String> {
    let (_, domain) = email.split_once('@')?;
    let suffix = domain
        .rsplit_once('.')
        .map_or(domain, |(_, suffix)| suffix);
    Some(suffix.to_lowercase())
}

/// Counts users per domain suffix. Users without a usable email are
/// skipped.
pub fn domain_counts(users: &[User]) -> BTreeMap<String, u64> {
    let mut counts = BTreeMap::new();
    for suffix in users
        .iter()
        .filter_map(|user| user.email.as_deref())
        .filter_map(domain_suffix)
    {
        *counts.entry(suffix).or_insert(0) += 1;
    }
    counts
}

/// Writes the `Domain,count` report to `path`, one row per suffix sorted by
/// suffix, and returns the number of rows written.
///
/// # Errors
/// [`Error::Write`](crate::Error::Write) if the file can't be written. The
/// previous file, if any, is left untouched in that case.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn write_domain_counts(users: &[User], path: impl AsRef<Path>) -> Result<usize> {
    let mut writer = AtomicCsvWriter::new(&path)?;
    writer.write_record(["Domain", "count"])?;

    let counts = domain_counts(users);
    for (suffix, count) in &counts {
        writer.write_record([suffix.as_str(), count.to_string().as_str()])?;
    }
    writer.finish()?;

    info!(rows = counts.len(), "wrote domain counts report");
    Ok(counts.len())
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;

    fn user(id: i64, email: Option<&str>) -> User {
        User {
            id,
            name: None,
            email: email.map(str::to_string),
            gender: None,
            status: None,
        }
    }

    #[test]
    fn test_domain_suffix() {
        assert_eq!(domain_suffix("a@Foo.COM").as_deref(), Some("com"));
        assert_eq!(domain_suffix("a@mail.example.org").as_deref(), Some("org"));
        assert_eq!(domain_suffix("a@localhost").as_deref(), Some("localhost"));
        assert_eq!(domain_suffix("a@LocalHost").as_deref(), Some("localhost"));
        assert_eq!(domain_suffix("a@example.").as_deref(), Some(""));
        assert_eq!(domain_suffix("a@").as_deref(), Some(""));
        assert_eq!(domain_suffix("a@b@c.net").as_deref(), Some("net"));
        assert_eq!(domain_suffix("no-at-sign.com"), None);
        assert_eq!(domain_suffix(""), None);
    }

    #[test]
    fn test_counts() {
        let users = vec![
            user(1, Some("a@Foo.COM")),
            user(2, Some("b@foo.com")),
            user(3, Some("c@bar.net")),
            user(4, None),
            user(5, Some("broken")),
        ];

        let counts = domain_counts(&users);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts["com"], 2);
        assert_eq!(counts["net"], 1);
    }

    #[test]
    fn test_write_sorted_by_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("email_domain_counts.csv");
        let users = vec![
            user(1, Some("c@bar.net")),
            user(2, Some("a@Foo.COM")),
            user(3, Some("x@localhost")),
            user(4, Some("b@foo.com")),
        ];

        assert_eq!(write_domain_counts(&users, &path).unwrap(), 3);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Domain,count\ncom,2\nlocalhost,1\nnet,1\n"
        );
    }
}
