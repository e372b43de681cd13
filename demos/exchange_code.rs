//! Starts a sandbox authorization request and, when `REVOLUT_AUTH_CODE` is set, exchanges the
//! returned code for tokens.
//!
//! Required environment: `REVOLUT_CLIENT_ID`, `REVOLUT_PRIVATE_KEY` (PEM path or `file://`
//! URL), and `REVOLUT_REDIRECT_URI`.

// std
use std::env;
// crates.io
use color_eyre::{Result, eyre::eyre};
use serde_json::json;
// self
use oauth2_revolut::ReqwestRevolut;

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let options = json!({
		"clientId": env::var("REVOLUT_CLIENT_ID")?,
		"privateKey": env::var("REVOLUT_PRIVATE_KEY")?,
		"redirectUri": env::var("REVOLUT_REDIRECT_URI")?,
		"isSandbox": true,
	});
	let options = options.as_object().ok_or_else(|| eyre!("Options must be a JSON object."))?;
	let revolut = ReqwestRevolut::from_options(options)?;
	let session = revolut.authorization_request();

	println!("Send your user to {}.", &session.authorize_url);

	let Ok(code) = env::var("REVOLUT_AUTH_CODE") else {
		println!("Set REVOLUT_AUTH_CODE to the `code` query parameter to finish the exchange.");

		return Ok(());
	};
	let token = revolut.exchange_code(code).await?;

	println!("Access token expires at {:?}.", token.expires_at);
	println!("Refresh token issued: {}.", token.refresh_token.is_some());

	Ok(())
}
