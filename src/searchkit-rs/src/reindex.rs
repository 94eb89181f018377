use crate::client::Client;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

/// Capability for model types whose data can be mirrored into a search index.
///
/// Implement this on a model to make it eligible for [`reindex`]; the
/// orchestration in [`reindex_all`] reports models without the capability
/// as skipped instead of failing.
#[async_trait]
pub trait Searchable: Send + Sync {
    /// Name of the index this model's records live in.
    fn index_name(&self) -> &str;

    /// Index settings applied when the index is recreated.
    fn index_settings(&self) -> Option<Value> {
        None
    }

    /// All records to import, as (document id, document fields) pairs.
    async fn records(&self) -> Result<Vec<(String, Value)>>;
}

/// Per-model result of a [`reindex_all`] run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReindexOutcome {
    /// Index rebuilt and `count` record(s) imported.
    Ok { count: usize },
    /// The model does not expose the [`Searchable`] capability.
    Skipped,
}

#[derive(Debug, Clone)]
pub struct ReindexReport {
    pub model: String,
    pub outcome: ReindexOutcome,
}

/// Drop and recreate a model's index, then import every record.
///
/// Returns the number of records indexed. Any client or data-source error
/// propagates immediately; a partially rebuilt index is left as-is.
pub async fn reindex(client: &Client, model: &dyn Searchable) -> Result<usize> {
    let name = model.index_name();

    if client.index_exists(name).await? {
        client.remove_index(name).await?;
    }
    client.add_index(name, model.index_settings()).await?;

    let records = model.records().await?;
    for (id, data) in &records {
        client.index(name, id, data).await?;
    }

    info!("Rebuilt index `{}` with {} record(s)", name, records.len());
    Ok(records.len())
}

/// Rebuild the indexes for a list of model names.
///
/// Each name is resolved to its model; names that resolve to a model
/// without the [`Searchable`] capability are reported as skipped. Outcomes
/// come back in input order.
pub async fn reindex_all<'a>(
    client: &Client,
    names: &[&str],
    resolve: impl Fn(&str) -> Option<&'a dyn Searchable>,
) -> Result<Vec<ReindexReport>> {
    let mut reports = Vec::with_capacity(names.len());
    for &name in names {
        let outcome = match resolve(name) {
            Some(model) => ReindexOutcome::Ok {
                count: reindex(client, model).await?,
            },
            None => {
                info!("Skipping `{}`: not searchable", name);
                ReindexOutcome::Skipped
            }
        };
        reports.push(ReindexReport {
            model: name.to_string(),
            outcome,
        });
    }
    Ok(reports)
}
