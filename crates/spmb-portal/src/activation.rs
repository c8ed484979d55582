//! Exclusive activation of templates, waves, and payment schemes.
//!
//! At most one record of each activatable kind is active at a time.

use spmb_core::SpmbResult;
use spmb_forms::FormTemplate;

use crate::models::{Entity, Gelombang, PaymentScheme};
use crate::repository::Repository;

/// A record with an `isActive` flag.
pub trait Activatable: Entity {
    fn is_active(&self) -> bool;

    fn set_active(&mut self, active: bool);
}

impl Activatable for FormTemplate {
    fn is_active(&self) -> bool {
        self.is_active
    }

    fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }
}

impl Activatable for Gelombang {
    fn is_active(&self) -> bool {
        self.is_active
    }

    fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }
}

impl Activatable for PaymentScheme {
    fn is_active(&self) -> bool {
        self.is_active
    }

    fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }
}

/// Marks `id` active and every other record inactive.
///
/// Records whose flag is already correct are not rewritten.
///
/// # Errors
///
/// Returns [`SpmbError::NotFound`](spmb_core::SpmbError::NotFound) if `id`
/// does not exist; nothing is changed in that case.
pub async fn activate<T, R>(repo: &R, id: &str) -> SpmbResult<T>
where
    T: Activatable,
    R: Repository<T> + ?Sized,
{
    let mut target = repo.get(id).await?;
    for mut record in repo.list().await? {
        if record.id() != id && record.is_active() {
            record.set_active(false);
            repo.update(record).await?;
        }
    }
    if !target.is_active() {
        target.set_active(true);
        target = repo.update(target).await?;
    }
    tracing::info!(kind = T::KIND, id, "activated");
    Ok(target)
}

/// Returns the active record, if any.
pub async fn active<T, R>(repo: &R) -> SpmbResult<Option<T>>
where
    T: Activatable,
    R: Repository<T> + ?Sized,
{
    Ok(repo.list().await?.into_iter().find(Activatable::is_active))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryRepository;
    use spmb_core::SpmbError;

    fn template(id: &str, active: bool) -> FormTemplate {
        let mut t = FormTemplate::new(id, format!("Form {id}"));
        t.is_active = active;
        t
    }

    #[tokio::test]
    async fn test_activate_is_exclusive() {
        let repo = InMemoryRepository::with_items(vec![
            template("1", true),
            template("2", false),
            template("3", false),
        ]);
        let activated = activate(&repo, "3").await.unwrap();
        assert!(activated.is_active);

        let flags: Vec<bool> = repo.list().await.unwrap().iter().map(|t| t.is_active).collect();
        assert_eq!(flags, vec![false, false, true]);
        assert_eq!(active(&repo).await.unwrap().map(|t| t.id().to_string()), Some("3".into()));
    }

    #[tokio::test]
    async fn test_activate_missing_changes_nothing() {
        let repo = InMemoryRepository::with_items(vec![template("1", true)]);
        let err = activate(&repo, "9").await.unwrap_err();
        assert!(matches!(err, SpmbError::NotFound(_)));
        assert!(repo.get("1").await.unwrap().is_active);
    }

    #[tokio::test]
    async fn test_no_active_record() {
        let repo = InMemoryRepository::with_items(vec![template("1", false)]);
        assert!(active(&repo).await.unwrap().is_none());
    }
}
