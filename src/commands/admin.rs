use crate::Config;
use clap::Subcommand;
use tracing::info;

#[derive(Subcommand)]
pub enum AdminAction {
    /// Create an admin account (admins cannot self-register)
    Create {
        #[arg(long, help = "Admin email address")]
        email: String,
        #[arg(long, help = "Admin password (min 8 characters)")]
        password: String,
        #[arg(long, help = "Display name")]
        name: Option<String>,
    },
}

pub async fn handle_admin_command(
    action: AdminAction,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    use crate::auth::password::hash_password;
    use crate::database::entities::{Role, UserRecord};
    use crate::database::{DatabaseManager, DatabaseManagerImpl};

    let db_manager = DatabaseManagerImpl::new_from_config(config).await?;

    match action {
        AdminAction::Create {
            email,
            password,
            name,
        } => {
            if password.len() < 8 {
                return Err("Password must be at least 8 characters".into());
            }
            let email = email.trim().to_lowercase();
            if db_manager.users().find_by_email(&email).await?.is_some() {
                return Err(format!("An account for {} already exists", email).into());
            }

            let password_hash = hash_password(&password)
                .map_err(|e| format!("Failed to hash password: {}", e))?;
            let mut user = UserRecord::new(email, password_hash, Role::Admin);
            if let Some(name) = name {
                user = user.with_display_name(name);
            }

            let user = db_manager.users().create(&user).await?;
            info!(user_id = %user.id, "Admin account created");
            println!("Admin account {} created with id {}", user.email, user.id);
        }
    }

    Ok(())
}
