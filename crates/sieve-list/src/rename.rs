//! Validating and saving item renames.
//!
//! The list itself never renames anything; these helpers implement the host
//! side of an inline rename: check the proposed name, run the host's async
//! save, and on failure put the old name back and tell the user.

use crate::item::{Item, NamedItem};
use regex::Regex;
use std::future::Future;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::{debug, warn};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9_.-]*$").expect("name pattern"));

/// Where user-facing warnings and errors go.
pub trait Notifier {
    fn warning(&self, message: &str);

    fn error(&self, message: &str);

    /// A save started. Hosts typically show a saving indicator.
    fn saving_started(&self) {}

    /// A save finished, successfully or not.
    fn saving_finished(&self) {}
}

/// Why a proposed name was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("Invalid name. Only letters, numbers, underscores, dashes and dots are allowed.")]
    Invalid,
    #[error("Invalid name. An item already exists with the name \"{0}\"")]
    Duplicate(String),
}

#[derive(Debug, Error)]
pub enum RenameError {
    #[error(transparent)]
    Name(#[from] NameError),
    #[error("Renaming the item '{id}' failed.")]
    Failed {
        id: String,
        #[source]
        source: Option<BoxError>,
    },
}

/// Check `name` as the new name of the item identified by `item_id`.
///
/// The name must start with a letter or digit and contain only letters,
/// digits, `_`, `.` and `-`. Keeping the item's own identifier is always
/// allowed; any other name already in `existing` is rejected. Comparison
/// against existing identifiers is case-sensitive.
pub fn validate_name<S: AsRef<str>>(
    item_id: &str,
    name: &str,
    existing: impl IntoIterator<Item = S>,
) -> Result<(), NameError> {
    if !NAME_PATTERN.is_match(name) {
        return Err(NameError::Invalid);
    }
    if item_id == name {
        return Ok(());
    }
    if existing.into_iter().any(|id| id.as_ref() == name) {
        return Err(NameError::Duplicate(name.to_string()));
    }
    Ok(())
}

/// [`validate_name`], reporting a rejection to `notifier` as a warning.
pub fn check_name<S: AsRef<str>>(
    item_id: &str,
    name: &str,
    existing: impl IntoIterator<Item = S>,
    notifier: &impl Notifier,
) -> bool {
    match validate_name(item_id, name, existing) {
        Ok(()) => true,
        Err(err) => {
            debug!(item_id, name, %err, "name rejected");
            notifier.warning(&err.to_string());
            false
        }
    }
}

/// Handle a failed rename: report it and revert the display name.
pub fn rename_failed(item: &NamedItem, notifier: &impl Notifier) {
    let err = RenameError::Failed {
        id: item.id().to_string(),
        source: None,
    };
    notifier.error(&err.to_string());
    item.revert_name();
}

/// Run the host's async `save` for `item`.
///
/// The notifier is told when saving starts and finishes. If `save` fails,
/// the item's display name is reverted to its identifier and the failure is
/// reported before saving is marked finished.
pub async fn save_name<T, E, F>(
    item: &NamedItem,
    save: F,
    notifier: &impl Notifier,
) -> Result<T, RenameError>
where
    F: Future<Output = Result<T, E>>,
    E: Into<BoxError>,
{
    notifier.saving_started();
    let result = save.await.map_err(|err| {
        let source = err.into();
        warn!(id = item.id(), error = %source, "rename failed");
        rename_failed(item, notifier);
        RenameError::Failed {
            id: item.id().to_string(),
            source: Some(source),
        }
    });
    notifier.saving_finished();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        events: RefCell<Vec<String>>,
    }

    impl Recorder {
        fn events(&self) -> Vec<String> {
            self.events.borrow().clone()
        }
    }

    impl Notifier for Recorder {
        fn warning(&self, message: &str) {
            self.events.borrow_mut().push(format!("warning: {message}"));
        }

        fn error(&self, message: &str) {
            self.events.borrow_mut().push(format!("error: {message}"));
        }

        fn saving_started(&self) {
            self.events.borrow_mut().push("saving".into());
        }

        fn saving_finished(&self) {
            self.events.borrow_mut().push("saved".into());
        }
    }

    const EXISTING: [&str; 3] = ["alpha", "beta", "gamma"];

    #[test]
    fn accepts_well_formed_names() {
        assert_eq!(validate_name("alpha", "delta", EXISTING), Ok(()));
        assert_eq!(validate_name("alpha", "v2.spider_x-1", EXISTING), Ok(()));
        assert_eq!(validate_name("alpha", "9lives", EXISTING), Ok(()));
    }

    #[test]
    fn rejects_malformed_names() {
        for name in ["", "_alpha", ".hidden", "-dash", "has space", "slash/name", "ünï"] {
            assert_eq!(
                validate_name("alpha", name, EXISTING),
                Err(NameError::Invalid),
                "{name:?}"
            );
        }
    }

    #[test]
    fn own_id_is_allowed() {
        assert_eq!(validate_name("alpha", "alpha", EXISTING), Ok(()));
    }

    #[test]
    fn duplicate_is_rejected() {
        assert_eq!(
            validate_name("alpha", "beta", EXISTING),
            Err(NameError::Duplicate("beta".into()))
        );
        assert_eq!(validate_name("alpha", "Beta", EXISTING), Ok(()));
    }

    #[test]
    fn check_name_warns() {
        let notifier = Recorder::default();
        assert!(!check_name("alpha", "bad name", EXISTING, &notifier));
        assert!(!check_name("alpha", "gamma", EXISTING.to_vec(), &notifier));
        assert!(check_name("alpha", "omega", EXISTING, &notifier));
        assert_eq!(
            notifier.events(),
            vec![
                "warning: Invalid name. Only letters, numbers, underscores, dashes and dots are allowed.",
                "warning: Invalid name. An item already exists with the name \"gamma\"",
            ]
        );
    }

    #[test]
    fn rename_failed_reverts_and_reports() {
        let notifier = Recorder::default();
        let item = NamedItem::new("crawler").with_name("renamed");
        rename_failed(&item, &notifier);
        assert_eq!(item.name(), "crawler");
        assert_eq!(
            notifier.events(),
            vec!["error: Renaming the item 'crawler' failed."]
        );
    }

    #[tokio::test]
    async fn successful_save_keeps_name() {
        let notifier = Recorder::default();
        let item = NamedItem::new("crawler").with_name("renamed");
        let out = save_name(&item, async { Ok::<_, std::io::Error>(7) }, &notifier).await;
        assert_eq!(out.unwrap(), 7);
        assert_eq!(item.name(), "renamed");
        assert_eq!(notifier.events(), vec!["saving", "saved"]);
    }

    #[tokio::test]
    async fn failed_save_reverts() {
        let notifier = Recorder::default();
        let item = NamedItem::new("crawler").with_name("renamed");
        let save = async { Err::<(), _>(std::io::Error::other("conflict")) };
        let err = save_name(&item, save, &notifier).await.unwrap_err();

        assert_eq!(err.to_string(), "Renaming the item 'crawler' failed.");
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(item.name(), "crawler");
        assert_eq!(
            notifier.events(),
            vec![
                "saving",
                "error: Renaming the item 'crawler' failed.",
                "saved",
            ]
        );
    }
}
