//! Resource service - teaching material uploads, lookup and search

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use super::subject_service::SUBJECT_NOT_FOUND;
use crate::domain::paper::ArtifactStore;
use crate::domain::resource::{
    stored_file_name, Resource, ResourceCategory, ResourceId, ResourceRepository,
};
use crate::domain::subject::{SubjectId, SubjectRepository};
use crate::domain::user::User;
use crate::domain::DomainError;

pub const RESOURCE_NOT_FOUND: &str = "The requested resource not found.";
pub const NO_RESOURCES_IN_CATEGORY: &str = "No resources under the requested category";
pub const NO_SEARCH_RESULTS: &str = "Searched returned no resources.";

#[derive(Debug, Clone)]
pub struct NewResource {
    pub title: String,
    pub category: ResourceCategory,
    pub subject_id: SubjectId,
    /// Name the client gave the file
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// A category as offered to uploaders
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryInfo {
    pub slug: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryListing {
    #[serde(rename = "type")]
    pub category: String,
    pub resource_list: Vec<Resource>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub query: String,
    pub resource_list: Vec<Resource>,
}

#[derive(Debug)]
pub struct ResourceService {
    resources: Arc<dyn ResourceRepository>,
    subjects: Arc<dyn SubjectRepository>,
    files: Arc<dyn ArtifactStore>,
}

impl ResourceService {
    pub fn new(
        resources: Arc<dyn ResourceRepository>,
        subjects: Arc<dyn SubjectRepository>,
        files: Arc<dyn ArtifactStore>,
    ) -> Self {
        Self {
            resources,
            subjects,
            files,
        }
    }

    pub fn categories(&self) -> Vec<CategoryInfo> {
        ResourceCategory::ALL
            .into_iter()
            .map(|c| CategoryInfo {
                slug: c.as_str(),
                label: c.label(),
            })
            .collect()
    }

    /// Stores the file and records it under the subject
    pub async fn upload(&self, actor: &User, request: NewResource) -> Result<Resource, DomainError> {
        let title = request.title.trim();
        if title.is_empty() {
            return Err(DomainError::validation("Resource title is required"));
        }
        if request.bytes.is_empty() {
            return Err(DomainError::validation("Resource file is empty"));
        }

        if self.subjects.get(&request.subject_id).await?.is_none() {
            return Err(DomainError::not_found(SUBJECT_NOT_FOUND));
        }

        let size = request.bytes.len() as u64;
        let url = self
            .files
            .store(&stored_file_name(&request.file_name), request.bytes)
            .await?;

        let resource = self
            .resources
            .create(Resource::new(
                title,
                request.category,
                request.subject_id,
                actor.id().clone(),
                url,
                size,
            ))
            .await?;

        info!(
            resource_id = %resource.id(),
            subject_id = %resource.subject_id(),
            category = %resource.category(),
            uploader = %actor.username(),
            "Resource uploaded"
        );

        Ok(resource)
    }

    pub async fn get(&self, id: &ResourceId) -> Result<Resource, DomainError> {
        self.resources
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(RESOURCE_NOT_FOUND))
    }

    /// Resources of a category; an unknown or empty category is not found
    pub async fn list_by_type(&self, type_name: &str) -> Result<CategoryListing, DomainError> {
        let category = ResourceCategory::parse(type_name)
            .ok_or_else(|| DomainError::not_found(NO_RESOURCES_IN_CATEGORY))?;

        let resource_list = self.resources.list_by_category(category).await?;
        if resource_list.is_empty() {
            return Err(DomainError::not_found(NO_RESOURCES_IN_CATEGORY));
        }

        Ok(CategoryListing {
            category: category.label().to_string(),
            resource_list,
        })
    }

    pub async fn search(&self, query: &str) -> Result<SearchResults, DomainError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(DomainError::validation("Enter something to search for"));
        }

        let resource_list = self.resources.search_title(query).await?;
        debug!(query = %query, hits = resource_list.len(), "Resource search");

        if resource_list.is_empty() {
            return Err(DomainError::not_found(NO_SEARCH_RESULTS));
        }

        Ok(SearchResults {
            query: query.to_string(),
            resource_list,
        })
    }
}
