//! Outbound HTTP. Each request is sent once; failures are logged, never
//! retried.

use std::time::Duration;

use branch_core::{BranchError, BranchRequest, BranchResult};
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// POST every request concurrently and return how many got a 2xx response.
pub async fn send_all(requests: Vec<BranchRequest>, timeout_ms: u64) -> BranchResult<usize> {
    let http = reqwest::Client::builder()
        .timeout(Duration::from_millis(timeout_ms))
        .build()
        .map_err(|e| BranchError::Transport(e.to_string()))?;

    let mut tasks = JoinSet::new();
    for request in requests {
        let http = http.clone();
        tasks.spawn(async move { send_one(&http, request).await });
    }

    let mut delivered = 0;
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Ok(())) => delivered += 1,
            Ok(Err(e)) => warn!(error = %e, "branch request failed"),
            Err(e) => warn!(error = %e, "send task aborted"),
        }
    }
    Ok(delivered)
}

async fn send_one(http: &reqwest::Client, request: BranchRequest) -> BranchResult<()> {
    let mut builder = http.post(&request.url);
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }

    let response = builder
        .body(request.body)
        .send()
        .await
        .map_err(|e| BranchError::Transport(format!("{}: {e}", request.url)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(BranchError::Transport(format!(
            "{} responded with {status}",
            request.url
        )));
    }
    debug!(url = %request.url, %status, "branch request delivered");
    Ok(())
}
