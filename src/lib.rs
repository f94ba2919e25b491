//! Vijnana
//!
//! Department resource service with:
//! - Subject registry, subscriptions and staff rosters
//! - Teaching resource uploads, categories and title search
//! - Question bank ingestion from spreadsheets
//! - Randomised question paper generation (docx, LaTeX, PDF)
//! - JWT authentication over in-memory or PostgreSQL storage

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use anyhow::Context;
use api::state::AppState;
use config::{BootstrapConfig, StorageSettings};
use domain::exam::{Exam, ExamRepository};
use domain::paper::{CriteriaResolver, DocumentFormat, WrapRule};
use domain::question::{Question, QuestionRepository};
use domain::resource::{Resource, ResourceRepository};
use domain::subject::{Subject, SubjectRepository};
use domain::user::{User, UserRole};
use infrastructure::{
    artifact::{LocalArtifactStore, RESOURCE_DIR},
    auth::{JwtConfig, JwtService},
    exam::StorageExamRepository,
    ingestion::XlsxReader,
    question::StorageQuestionRepository,
    render::renderer_for,
    resource::StorageResourceRepository,
    services::{PaperService, PaperSettings, QuestionBankService, ResourceService, SubjectService},
    storage::{PostgresConfig, StorageConfig, StorageFactory, StorageType, SUBJECT_FIELD},
    subject::StorageSubjectRepository,
    user::{Argon2Hasher, CreateUserRequest, StorageUserRepository, UserService},
};
use rand::distributions::Alphanumeric;
use rand::Rng;
use tracing::info;

/// User service over the configured storage
pub type AppUserService = UserService<StorageUserRepository, Argon2Hasher>;

/// Entity repositories sharing one storage backend
#[derive(Debug, Clone)]
pub struct Repositories {
    pub users: Arc<StorageUserRepository>,
    pub subjects: Arc<dyn SubjectRepository>,
    pub questions: Arc<dyn QuestionRepository>,
    pub exams: Arc<dyn ExamRepository>,
    pub resources: Arc<dyn ResourceRepository>,
}

impl Repositories {
    pub async fn create(factory: &StorageFactory) -> anyhow::Result<Self> {
        Ok(Self {
            users: Arc::new(StorageUserRepository::new(
                factory.create::<User>("users").await?,
            )),
            subjects: Arc::new(StorageSubjectRepository::new(
                factory.create::<Subject>("subjects").await?,
            )),
            questions: Arc::new(StorageQuestionRepository::new(
                factory
                    .create_indexed::<Question>("questions", SUBJECT_FIELD)
                    .await?,
            )),
            exams: Arc::new(StorageExamRepository::new(
                factory.create::<Exam>("exams").await?,
            )),
            resources: Arc::new(StorageResourceRepository::new(
                factory
                    .create_indexed::<Resource>("resources", SUBJECT_FIELD)
                    .await?,
            )),
        })
    }
}

/// Translate the storage settings into a backend selection
pub fn storage_config(settings: &StorageSettings) -> anyhow::Result<StorageConfig> {
    let backend = StorageType::parse(&settings.backend)
        .with_context(|| format!("Unknown storage backend '{}'", settings.backend))?;

    Ok(match backend {
        StorageType::InMemory => StorageConfig::in_memory(),
        StorageType::Postgres => StorageConfig::postgres(
            PostgresConfig::new(settings.database_url.clone())
                .with_max_connections(settings.max_connections),
        ),
    })
}

/// Connect the configured storage and open every repository
pub async fn create_repositories(config: &AppConfig) -> anyhow::Result<Repositories> {
    let factory = StorageFactory::connect(&storage_config(&config.storage)?).await?;
    info!(backend = ?factory.storage_type(), "Opening repositories");

    Repositories::create(&factory).await
}

pub fn create_user_service(repositories: &Repositories) -> AppUserService {
    UserService::new(Arc::clone(&repositories.users), Arc::new(Argon2Hasher::new()))
}

const GENERATED_PASSWORD_LEN: usize = 16;

/// Creates the configured bootstrap account when the user store is empty
pub async fn create_initial_user(
    service: &AppUserService,
    config: &BootstrapConfig,
) -> anyhow::Result<Option<User>> {
    if !config.enabled || !service.list().await?.is_empty() {
        return Ok(None);
    }

    let role = UserRole::parse(&config.role)
        .with_context(|| format!("Unknown bootstrap role '{}'", config.role))?;

    let (password, generated) = match &config.password {
        Some(p) if !p.is_empty() => (p.clone(), false),
        _ => (
            rand::thread_rng()
                .sample_iter(&Alphanumeric)
                .take(GENERATED_PASSWORD_LEN)
                .map(char::from)
                .collect(),
            true,
        ),
    };

    let user = service
        .create(CreateUserRequest {
            username: config.username.clone(),
            password: password.clone(),
            name: config.name.clone(),
            department: config.department.clone(),
            role,
        })
        .await?;

    info!(username = %user.username(), role = %user.role(), department = %user.department(), "Initial user created");
    if generated {
        info!("Initial user password: {}", password);
    }

    Ok(Some(user))
}

/// Create the application state with default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let repositories = create_repositories(config).await?;
    create_app_state_with_repositories(config, &repositories).await
}

/// Wire the services on top of already opened repositories
pub async fn create_app_state_with_repositories(
    config: &AppConfig,
    repositories: &Repositories,
) -> anyhow::Result<AppState> {
    let format = DocumentFormat::parse(&config.paper.format)
        .with_context(|| format!("Unknown paper format '{}'", config.paper.format))?;

    tokio::fs::create_dir_all(&config.media.scratch_dir)
        .await
        .with_context(|| format!("Cannot create scratch directory '{}'", config.media.scratch_dir))?;

    let users: Arc<dyn domain::user::UserRepository> = repositories.users.clone();

    let subject_service = SubjectService::new(
        Arc::clone(&repositories.subjects),
        users,
        Arc::clone(&repositories.resources),
    );

    let resource_service = ResourceService::new(
        Arc::clone(&repositories.resources),
        Arc::clone(&repositories.subjects),
        Arc::new(
            LocalArtifactStore::new(&config.media.root, config.media.url_prefix.clone())
                .with_subdirectory(RESOURCE_DIR),
        ),
    );

    let question_bank_service = QuestionBankService::new(
        Arc::clone(&repositories.subjects),
        Arc::clone(&repositories.questions),
        Arc::new(XlsxReader::new()),
        &config.media.scratch_dir,
    );

    let paper_service = PaperService::new(
        Arc::clone(&repositories.subjects),
        Arc::clone(&repositories.exams),
        CriteriaResolver::new(Arc::clone(&repositories.questions)),
        renderer_for(format, &config.paper.pdflatex, &config.media.scratch_dir),
        Arc::new(LocalArtifactStore::new(
            &config.media.root,
            config.media.url_prefix.clone(),
        )),
        PaperSettings {
            institution: config.paper.institution.clone(),
            wrap: WrapRule {
                threshold: config.paper.wrap_threshold,
                search_from: config.paper.wrap_search_from,
            },
            seed: config.paper.seed,
        },
    );

    let jwt_service = JwtService::new(JwtConfig::new(
        config.auth.jwt_secret.clone(),
        config.auth.expiration_hours,
    ));

    info!(format = ?format, media_root = %config.media.root, "Services initialized");

    Ok(AppState {
        user_service: Arc::new(create_user_service(repositories)),
        jwt_service: Arc::new(jwt_service),
        subject_service: Arc::new(subject_service),
        question_bank_service: Arc::new(question_bank_service),
        resource_service: Arc::new(resource_service),
        paper_service: Arc::new(paper_service),
    })
}
