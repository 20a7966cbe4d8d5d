//! Category endpoints

use reqwest::{Method, StatusCode};

use crate::error::{ClientError, ClientResult};
use crate::http::{ApiClient, expect_json, expect_status};
use crate::models::{Category, RenameRequest};
use crate::validation::validate_name;

/// List all categories of the authenticated user
pub async fn get_categories(client: &ApiClient) -> ClientResult<Vec<Category>> {
    let response = client.request(Method::GET, "/categories").send().await?;
    expect_json(response, StatusCode::OK).await
}

/// Fetch a single category
pub async fn get_category(client: &ApiClient, id: i64) -> ClientResult<Category> {
    let response = client
        .request(Method::GET, &format!("/categories/{id}"))
        .send()
        .await?;
    expect_json(response, StatusCode::OK).await
}

/// Create a category
pub async fn create_category(client: &ApiClient, name: &str) -> ClientResult<Category> {
    validate_name(name).map_err(ClientError::Validation)?;

    let response = client
        .request(Method::POST, "/categories")
        .json(&RenameRequest {
            name: name.to_string(),
        })
        .send()
        .await?;
    expect_json(response, StatusCode::CREATED).await
}

/// Rename a category
pub async fn edit_category(client: &ApiClient, id: i64, name: &str) -> ClientResult<Category> {
    validate_name(name).map_err(ClientError::Validation)?;

    let response = client
        .request(Method::PATCH, &format!("/categories/{id}"))
        .json(&RenameRequest {
            name: name.to_string(),
        })
        .send()
        .await?;
    expect_json(response, StatusCode::OK).await
}

/// Delete a category and everything under it
pub async fn delete_category(client: &ApiClient, id: i64) -> ClientResult<()> {
    let response = client
        .request(Method::DELETE, &format!("/categories/{id}"))
        .send()
        .await?;
    expect_status(response, StatusCode::OK)?;
    Ok(())
}
