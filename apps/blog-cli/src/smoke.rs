//! End-to-end request script: walks every endpoint once and prints what the
//! server answered.

use anyhow::Context;
use serde_json::Value;

use blog_shared::dto::{BlogListQuery, BlogRequest};

use crate::client::{BlogClient, Reply};

const SAMPLE_DATE: &str = "2024-02-05";

pub async fn run(client: &BlogClient) -> anyhow::Result<()> {
    let reply = client.list(&BlogListQuery::default()).await?;
    report(1, "Get Blog List (Unauthenticated)", &reply);

    let token = client.token().await?;
    println!("Test Case 2 - Authenticate and Get JWT Token: Token: {token}");

    let me = client.me().await?.success()?;
    let user_id = me.body.get("id").and_then(Value::as_i64).context("missing user id")?;

    let reply = client.list(&BlogListQuery::default()).await?;
    report(3, "Get Blog List (Authenticated)", &reply);

    let created = client
        .create(&BlogRequest {
            title: Some("New Test Blog".to_string()),
            content: Some("This is a new test blog content.".to_string()),
        })
        .await?;
    report(4, "Create Blog (Authenticated)", &created);
    let id = created
        .success()?
        .body
        .get("id")
        .and_then(Value::as_i64)
        .context("created blog has no id")?;

    let reply = client
        .update(
            id,
            &BlogRequest {
                title: Some("Updated Test Blog".to_string()),
                content: Some("This is an updated test blog content.".to_string()),
            },
        )
        .await?;
    report(5, "Update Blog (Authenticated)", &reply);

    let reply = client.delete(id).await?;
    report(6, "Delete Blog (Authenticated)", &reply);

    let reply = client
        .list(&BlogListQuery {
            title: Some("Test".to_string()),
            ..Default::default()
        })
        .await?;
    report(7, "Search Blog by Title (Unauthenticated)", &reply);

    let reply = client
        .list(&BlogListQuery {
            author: Some(user_id.to_string()),
            ..Default::default()
        })
        .await?;
    report(8, "Search Blog by Author (Unauthenticated)", &reply);

    let reply = client.by_date(SAMPLE_DATE).await?;
    report(9, "Get Blogs by Date", &reply);

    let reply = client.by_date_range("2024-02-01", SAMPLE_DATE).await?;
    report(10, "Get Blogs by Date Range", &reply);

    let reply = client.created_after("2024-02-01").await?;
    report(11, "Get Blogs Created After Date", &reply);

    let reply = client.created_before("2024-02-06").await?;
    report(12, "Get Blogs Created Before Date", &reply);

    Ok(())
}

fn report(step: u8, name: &str, reply: &Reply) {
    if reply.body.is_null() {
        println!("Test Case {step} - {name}: Status Code: {}", reply.status.as_u16());
    } else {
        println!(
            "Test Case {step} - {name}: Status Code: {}, Response: {}",
            reply.status.as_u16(),
            reply.body
        );
    }
}
