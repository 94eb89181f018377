//! Example: configure a named connection, rebuild a model's search index,
//! and run a couple of searches against it.
//!
//! Expects an Elasticsearch-compatible engine on 127.0.0.1:9200:
//! ```bash
//! cargo run --example reindex_app
//! ```

use async_trait::async_trait;
use searchkit_rs::{
    reindex_all, ConnectionConfig, ConnectionRegistry, ReindexOutcome, Searchable,
    DEFAULT_CONNECTION,
};
use serde_json::{json, Value};

struct Posts;

#[async_trait]
impl Searchable for Posts {
    fn index_name(&self) -> &str {
        "posts"
    }

    async fn records(&self) -> anyhow::Result<Vec<(String, Value)>> {
        // In a real application these come from the database
        Ok(vec![
            ("1".to_string(), json!({"title": "Getting started", "body": "first steps"})),
            ("2".to_string(), json!({"title": "Going further", "body": "next steps"})),
        ])
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("searchkit_rs=debug")),
        )
        .init();

    let registry = ConnectionRegistry::new();
    registry.configure(DEFAULT_CONNECTION, ConnectionConfig::default());
    let client = registry.connection(DEFAULT_CONNECTION)?;

    let posts = Posts;
    let reports = reindex_all(&client, &["Posts", "Profiles"], |name| match name {
        "Posts" => Some(&posts as &dyn Searchable),
        _ => None,
    })
    .await?;

    for report in &reports {
        match &report.outcome {
            ReindexOutcome::Ok { count } => {
                println!("[ok] {}: index created, {} record(s) added", report.model, count)
            }
            ReindexOutcome::Skipped => {
                println!("[skipped] {}: not searchable", report.model)
            }
        }
    }

    // Free-text query string
    let hits = client.search(&["posts"], "started").await?;
    println!("query string: {} hit(s)", hits.len());

    // Structured query body
    let hits = client
        .search(
            &["posts"],
            json!({"query": {"multi_match": {"query": "steps", "fields": ["title", "body"]}}}),
        )
        .await?;
    println!("query dsl: {} hit(s)", hits.len());

    println!("total documents: {}", client.count("posts", None).await?);
    Ok(())
}
