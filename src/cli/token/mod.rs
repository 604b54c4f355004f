//! Token command - mints a bearer token for a principal

use clap::Args;

use crate::config::AppConfig;
use crate::infrastructure::auth::{JwtConfig, JwtService, TEACHER_ROLE};

#[derive(Args, Clone, Debug)]
pub struct TokenArgs {
    /// Subject of the token; teachers are matched on their userId
    #[arg(long)]
    pub user_id: String,

    /// Educational mail carried in the `email` claim
    #[arg(long)]
    pub email: String,

    #[arg(long, default_value = TEACHER_ROLE)]
    pub role: String,
}

/// Print a token signed with `auth.jwt_secret`
pub async fn run(args: TokenArgs) -> anyhow::Result<()> {
    let config = AppConfig::load().unwrap_or_default();

    let secret = config
        .auth
        .jwt_secret
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| anyhow::anyhow!("auth.jwt_secret must be configured to mint tokens"))?;

    let service = JwtService::new(JwtConfig::new(secret, config.auth.token_ttl_hours));
    let token = service.issue(&args.user_id, &args.email, &args.role)?;

    println!("{}", token);
    Ok(())
}
