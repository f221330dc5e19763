use crate::error::{DiffError, Result};
use crate::host::NetworkCapability;
use crate::pairing::RequestPair;
use crate::resource::ResourceNode;

/// Response body of one executed request, labelled with the request name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub name: String,
    pub body: String,
}

/// Run both sides of a pair, first then second.
///
/// The sends are never overlapped so each body is attributed to the request
/// that produced it.
pub async fn execute_pair(
    pair: &RequestPair,
    network: &dyn NetworkCapability,
) -> Result<(ExecutionResult, ExecutionResult)> {
    let Some(ref second) = pair.second else {
        return Err(DiffError::UnmatchedRequest {
            name: pair.first.name.clone(),
        });
    };

    let first = execute_request(&pair.first, network).await?;
    let second = execute_request(second, network).await?;
    Ok((first, second))
}

pub async fn execute_request(
    request: &ResourceNode,
    network: &dyn NetworkCapability,
) -> Result<ExecutionResult> {
    tracing::debug!(id = %request.id, name = %request.name, "sending request");

    let response =
        network
            .send_request(request)
            .await
            .map_err(|e| DiffError::RequestExecution {
                name: request.name.clone(),
                message: format!("{e:#}"),
            })?;

    let body = tokio::fs::read_to_string(&response.body_path)
        .await
        .map_err(|source| DiffError::BodyRead {
            name: request.name.clone(),
            path: response.body_path.clone(),
            source,
        })?;

    Ok(ExecutionResult {
        name: request.name.clone(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Mutex;

    use anyhow::anyhow;
    use async_trait::async_trait;

    use super::*;
    use crate::host::SentResponse;
    use crate::resource::ResourceType;

    /// Serves `<dir>/<id>` and records the order of sends.
    struct DirNetwork {
        dir: PathBuf,
        sent: Mutex<Vec<String>>,
    }

    impl DirNetwork {
        fn new(dir: &std::path::Path) -> Self {
            Self {
                dir: dir.to_path_buf(),
                sent: Mutex::new(Vec::new()),
            }
        }

        fn sent(&self) -> Vec<String> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl NetworkCapability for DirNetwork {
        async fn send_request(&self, request: &ResourceNode) -> anyhow::Result<SentResponse> {
            self.sent.lock().unwrap().push(request.id.clone());
            if request.id.starts_with("down") {
                return Err(anyhow!("connection refused"));
            }
            Ok(SentResponse {
                body_path: self.dir.join(&request.id),
            })
        }
    }

    fn request(id: &str, name: &str) -> ResourceNode {
        ResourceNode::new(id, ResourceType::Request, Some("fld"), name)
    }

    #[tokio::test]
    async fn test_executes_first_then_second() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a"), "{\"id\":1}").unwrap();
        std::fs::write(dir.path().join("b"), "{\"id\":2}").unwrap();
        let network = DirNetwork::new(dir.path());

        let pair = RequestPair::new(request("a", "GetUser"), Some(request("b", "GetUser")));
        let (first, second) = execute_pair(&pair, &network).await.unwrap();

        assert_eq!(network.sent(), vec!["a", "b"]);
        assert_eq!(first.body, "{\"id\":1}");
        assert_eq!(second.body, "{\"id\":2}");
        assert_eq!(first.name, "GetUser");
    }

    #[tokio::test]
    async fn test_unmatched_pair_fails_before_sending() {
        let dir = tempfile::tempdir().unwrap();
        let network = DirNetwork::new(dir.path());

        let pair = RequestPair::new(request("a", "GetUser"), None);
        let err = execute_pair(&pair, &network).await.unwrap_err();

        assert!(matches!(err, DiffError::UnmatchedRequest { ref name } if name == "GetUser"));
        assert!(network.sent().is_empty());
    }

    #[tokio::test]
    async fn test_network_failure_stops_the_pair() {
        let dir = tempfile::tempdir().unwrap();
        let network = DirNetwork::new(dir.path());

        let pair = RequestPair::new(request("down", "GetUser"), Some(request("b", "GetUser")));
        let err = execute_pair(&pair, &network).await.unwrap_err();

        match err {
            DiffError::RequestExecution { name, message } => {
                assert_eq!(name, "GetUser");
                assert_eq!(message, "connection refused");
            }
            other => panic!("expected RequestExecution, got {other:?}"),
        }
        assert_eq!(network.sent(), vec!["down"]);
    }

    #[tokio::test]
    async fn test_missing_body_file() {
        let dir = tempfile::tempdir().unwrap();
        let network = DirNetwork::new(dir.path());

        let err = execute_request(&request("gone", "GetUser"), &network)
            .await
            .unwrap_err();
        assert!(matches!(err, DiffError::BodyRead { .. }));
    }

    #[tokio::test]
    async fn test_binary_body_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("png"), [0x89, 0x50, 0x4e, 0x47, 0xff, 0xfe]).unwrap();
        let network = DirNetwork::new(dir.path());

        let err = execute_request(&request("png", "Logo"), &network)
            .await
            .unwrap_err();
        match err {
            DiffError::BodyRead { name, path, .. } => {
                assert_eq!(name, "Logo");
                assert_eq!(path, dir.path().join("png"));
            }
            other => panic!("expected BodyRead, got {other:?}"),
        }
    }
}
