//! The hellok8s run: create the pod, wait for the operator, list by label

use kube::ResourceExt;
use tokio::io::{AsyncBufRead, AsyncWrite, AsyncWriteExt};
use tracing::info;

use crate::client::{DynamicResourceClient, GroupVersionResource};
use crate::config::Config;
use crate::error::Result;
use crate::manifest;
use crate::prompt;

/// Run the full sequence against `client`, using `input`/`output` as the console.
///
/// Returns the names that were listed. A failure at any step stops the run;
/// a pod created before the failure is left on the cluster.
pub async fn run<C, R, W>(client: &C, config: &Config, input: &mut R, output: &mut W) -> Result<Vec<String>>
where
    C: DynamicResourceClient,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let pods = GroupVersionResource::pods();

    let mut pod = manifest::hellok8s_pod();
    pod.metadata.namespace = Some(config.namespace.clone());
    let obj = manifest::to_dynamic(&pod)?;

    let created = client.create(&pods, &config.namespace, &obj).await?;
    info!(name = %created.name_any(), namespace = %config.namespace, "Pod submitted");

    prompt::wait_for_return(input, output).await?;

    let items = client
        .list(&pods, &config.namespace, &config.label_selector)
        .await?;
    info!(selector = %config.label_selector, count = items.len(), "Listed pods");

    let names: Vec<String> = items.iter().map(|item| item.name_any()).collect();
    for name in &names {
        output.write_all(name.as_bytes()).await?;
        output.write_all(b"\n").await?;
    }
    output.flush().await?;

    Ok(names)
}
