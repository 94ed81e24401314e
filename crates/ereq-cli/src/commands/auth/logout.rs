use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Serialize)]
struct AuthLogoutResponse {
    signed_out: bool,
    note: &'static str,
}

/// Revoke the token with Google, then forget it locally.
pub async fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    ereq_auth::logout().await?;
    output(
        &AuthLogoutResponse {
            signed_out: true,
            note: "run `ereq auth login` to sign in as another account",
        },
        flags.format,
    )
}
