//! Authentication endpoints

use reqwest::{Method, StatusCode};

use crate::error::{ClientError, ClientResult};
use crate::http::{ApiClient, expect_json, expect_status};
use crate::models::{MeResponse, TokenResponse, UserCredentials};
use crate::validation::{validate_password, validate_username};

/// Exchange username/password for a bearer credential
pub async fn sign_in(client: &ApiClient, credentials: &UserCredentials) -> ClientResult<String> {
    validate_credentials(credentials)?;

    let response = client
        .request(Method::POST, "/auth/signin")
        .json(credentials)
        .send()
        .await?;

    let token: TokenResponse = expect_json(response, StatusCode::OK).await?;
    Ok(token.access_token)
}

/// Register a new account. Does not log the user in.
pub async fn sign_up(client: &ApiClient, credentials: &UserCredentials) -> ClientResult<()> {
    validate_credentials(credentials)?;

    let response = client
        .request(Method::POST, "/auth/signup")
        .json(credentials)
        .send()
        .await?;

    expect_status(response, StatusCode::CREATED)?;
    Ok(())
}

/// Validate a candidate credential and return the account username
pub async fn me(client: &ApiClient, token: &str) -> ClientResult<String> {
    let response = client
        .request_with_token(Method::GET, "/auth/me", token)
        .send()
        .await?;

    let me: MeResponse = expect_json(response, StatusCode::OK).await?;
    Ok(me.username)
}

fn validate_credentials(credentials: &UserCredentials) -> ClientResult<()> {
    validate_username(&credentials.username).map_err(ClientError::Validation)?;
    validate_password(&credentials.password).map_err(ClientError::Validation)?;
    Ok(())
}
