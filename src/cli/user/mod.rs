//! Create-user command - provisions accounts against the configured storage

use clap::Args;
use tracing::{info, warn};

use crate::domain::user::UserRole;
use crate::infrastructure::storage::StorageType;
use crate::infrastructure::user::CreateUserRequest;

#[derive(Debug, Args)]
pub struct CreateUserArgs {
    #[arg(long)]
    pub username: String,

    #[arg(long)]
    pub password: String,

    /// Full name
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub department: String,

    /// student, faculty, labstaff, hod or administrator
    #[arg(long, default_value = "faculty")]
    pub role: String,
}

pub async fn run(args: CreateUserArgs) -> anyhow::Result<()> {
    let config = super::bootstrap()?;

    let role = UserRole::parse(&args.role)
        .ok_or_else(|| anyhow::anyhow!("Unknown role '{}'", args.role))?;

    if StorageType::parse(&config.storage.backend) == Some(StorageType::InMemory) {
        warn!("In-memory storage is configured; the account disappears when this command exits");
    }

    let repositories = crate::create_repositories(&config).await?;
    let service = crate::create_user_service(&repositories);

    let user = service
        .create(CreateUserRequest {
            username: args.username,
            password: args.password,
            name: args.name,
            department: args.department,
            role,
        })
        .await?;

    info!(user_id = %user.id(), username = %user.username(), role = %user.role(), "User created");
    println!("{}", user.id());

    Ok(())
}
