//! Storage-backed resource repository

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::resource::{Resource, ResourceCategory, ResourceId, ResourceRepository};
use crate::domain::storage::Storage;
use crate::domain::subject::SubjectId;
use crate::domain::DomainError;
use crate::infrastructure::storage::SUBJECT_FIELD;

const CATEGORY_FIELD: &str = "category";

#[derive(Debug)]
pub struct StorageResourceRepository {
    storage: Arc<dyn Storage<Resource>>,
}

impl StorageResourceRepository {
    pub fn new(storage: Arc<dyn Storage<Resource>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl ResourceRepository for StorageResourceRepository {
    async fn get(&self, id: &ResourceId) -> Result<Option<Resource>, DomainError> {
        self.storage.get(id).await
    }

    async fn create(&self, resource: Resource) -> Result<Resource, DomainError> {
        self.storage.create(resource).await
    }

    async fn list_by_subject(&self, subject_id: &SubjectId) -> Result<Vec<Resource>, DomainError> {
        self.storage
            .list_by_field(SUBJECT_FIELD, subject_id.as_str())
            .await
    }

    async fn list_by_category(
        &self,
        category: ResourceCategory,
    ) -> Result<Vec<Resource>, DomainError> {
        self.storage
            .list_by_field(CATEGORY_FIELD, category.as_str())
            .await
    }

    async fn search_title(&self, query: &str) -> Result<Vec<Resource>, DomainError> {
        let needle = query.to_lowercase();
        let all = self.storage.list().await?;

        Ok(all
            .into_iter()
            .filter(|r| r.title().to_lowercase().contains(&needle))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::UserId;
    use crate::infrastructure::storage::InMemoryStorage;

    async fn seeded() -> (StorageResourceRepository, SubjectId, SubjectId) {
        let repo = StorageResourceRepository::new(Arc::new(InMemoryStorage::<Resource>::new()));
        let ds = SubjectId::generate();
        let os = SubjectId::generate();
        let uploader = UserId::generate();

        for (title, category, subject) in [
            ("Binary Trees slides", ResourceCategory::Presentation, &ds),
            ("Heaps notes", ResourceCategory::SubjectNote, &ds),
            ("Paging slides", ResourceCategory::Presentation, &os),
        ] {
            repo.create(Resource::new(
                title,
                category,
                subject.clone(),
                uploader.clone(),
                format!("/uploads/resources/{}.pdf", title),
                100,
            ))
            .await
            .unwrap();
        }

        (repo, ds, os)
    }

    #[tokio::test]
    async fn test_list_by_subject_and_category() {
        let (repo, ds, os) = seeded().await;

        let titles: Vec<_> = repo
            .list_by_subject(&ds)
            .await
            .unwrap()
            .iter()
            .map(|r| r.title().to_string())
            .collect();
        assert_eq!(titles, vec!["Binary Trees slides", "Heaps notes"]);
        assert_eq!(repo.list_by_subject(&os).await.unwrap().len(), 1);

        let presentations = repo
            .list_by_category(ResourceCategory::Presentation)
            .await
            .unwrap();
        assert_eq!(presentations.len(), 2);
        assert!(repo
            .list_by_category(ResourceCategory::ProjectThesis)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_search_title_ignores_case() {
        let (repo, _, _) = seeded().await;

        let found = repo.search_title("SLIDES").await.unwrap();
        assert_eq!(found.len(), 2);

        let found = repo.search_title("heap").await.unwrap();
        assert_eq!(found[0].title(), "Heaps notes");

        assert!(repo.search_title("graphs").await.unwrap().is_empty());
    }
}
