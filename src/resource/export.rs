use std::collections::HashSet;

use serde::Deserialize;
use serde_json::Value;

use super::types::{ResourceNode, ResourceType};
use crate::error::{DiffError, Result};

#[derive(Debug, Deserialize)]
struct ExportFile {
    #[serde(default)]
    resources: Vec<Value>,
}

/// Parse a host export snapshot into validated resource nodes, keeping the
/// snapshot order.
pub fn parse_export(snapshot: &str) -> Result<Vec<ResourceNode>> {
    let file: ExportFile = serde_json::from_str(snapshot)?;

    let mut nodes = Vec::with_capacity(file.resources.len());
    for (index, record) in file.resources.into_iter().enumerate() {
        nodes.push(parse_record(index, record)?);
    }

    let mut ids = HashSet::with_capacity(nodes.len());
    for node in &nodes {
        if !ids.insert(node.id.as_str()) {
            return Err(DiffError::DuplicateId {
                id: node.id.clone(),
            });
        }
    }

    for node in &nodes {
        if let Some(ref parent_id) = node.parent_id {
            if !ids.contains(parent_id.as_str()) {
                return Err(DiffError::DanglingParent {
                    id: node.id.clone(),
                    parent_id: parent_id.clone(),
                });
            }
        }
    }

    tracing::debug!(resources = nodes.len(), "parsed workspace export");
    Ok(nodes)
}

fn parse_record(index: usize, record: Value) -> Result<ResourceNode> {
    let invalid = |reason: &str| DiffError::InvalidResource {
        index,
        reason: reason.to_string(),
    };

    let Some(fields) = record.as_object() else {
        return Err(invalid("not a JSON object"));
    };

    let id = match fields.get("_id") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        _ => return Err(invalid("missing `_id`")),
    };

    let kind = match fields.get("_type") {
        Some(Value::String(s)) => ResourceType::from_tag(s),
        _ => return Err(invalid("missing `_type`")),
    };

    let name = match fields.get("name") {
        Some(Value::String(s)) => s.clone(),
        None | Some(Value::Null) if !kind.requires_name() => String::new(),
        _ => return Err(invalid(&format!("{} `{id}` has no `name`", kind.tag()))),
    };

    let parent_id = match fields.get("parentId") {
        Some(Value::String(s)) => Some(s.clone()),
        None | Some(Value::Null) => None,
        Some(_) => return Err(invalid("`parentId` is not a string")),
    };
    if parent_id.is_none() && kind != ResourceType::Workspace {
        return Err(invalid(&format!("{} `{id}` has no `parentId`", kind.tag())));
    }

    Ok(ResourceNode {
        id,
        kind,
        parent_id,
        name,
        record,
    })
}

/// Workspaces in snapshot order.
pub fn workspaces(resources: &[ResourceNode]) -> impl Iterator<Item = &ResourceNode> {
    resources
        .iter()
        .filter(|r| r.kind == ResourceType::Workspace)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "_type": "export",
        "__export_format": 4,
        "resources": [
            {"_id": "wrk_1", "_type": "workspace", "parentId": null, "name": "Demo"},
            {"_id": "env_1", "_type": "environment", "parentId": "wrk_1", "name": "Base"},
            {"_id": "fld_1", "_type": "request_group", "parentId": "wrk_1", "name": "V1"},
            {"_id": "req_1", "_type": "request", "parentId": "fld_1", "name": "GetUser",
             "method": "GET", "url": "https://api.example.com/v1/user"}
        ]
    }"#;

    #[test]
    fn test_parse_keeps_order_and_types() {
        let nodes = parse_export(SNAPSHOT).unwrap();
        let kinds: Vec<&str> = nodes.iter().map(|n| n.kind.tag()).collect();
        assert_eq!(
            kinds,
            vec!["workspace", "environment", "request_group", "request"]
        );
        assert_eq!(nodes[0].parent_id, None);
        assert_eq!(nodes[3].method(), Some("GET"));
        assert_eq!(nodes[3].url(), Some("https://api.example.com/v1/user"));
    }

    #[test]
    fn test_workspaces_filters_by_type() {
        let nodes = parse_export(SNAPSHOT).unwrap();
        let ids: Vec<&str> = workspaces(&nodes).map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["wrk_1"]);
    }

    #[test]
    fn test_missing_resources_is_empty() {
        assert!(parse_export("{}").unwrap().is_empty());
    }

    #[test]
    fn test_not_json() {
        assert!(matches!(
            parse_export("not json"),
            Err(DiffError::ExportParse(_))
        ));
    }

    #[test]
    fn test_request_without_name_is_rejected() {
        let snapshot = r#"{"resources": [
            {"_id": "wrk_1", "_type": "workspace", "name": "W"},
            {"_id": "req_1", "_type": "request", "parentId": "wrk_1"}
        ]}"#;
        let err = parse_export(snapshot).unwrap_err();
        assert!(matches!(err, DiffError::InvalidResource { index: 1, .. }));
    }

    #[test]
    fn test_unnamed_other_types_are_accepted() {
        let snapshot = r#"{"resources": [
            {"_id": "wrk_1", "_type": "workspace", "name": "W"},
            {"_id": "jar_1", "_type": "cookie_jar", "parentId": "wrk_1"}
        ]}"#;
        let nodes = parse_export(snapshot).unwrap();
        assert_eq!(nodes[1].name, "");
    }

    #[test]
    fn test_folder_without_parent_is_rejected() {
        let snapshot = r#"{"resources": [
            {"_id": "fld_1", "_type": "request_group", "parentId": null, "name": "V1"}
        ]}"#;
        assert!(matches!(
            parse_export(snapshot),
            Err(DiffError::InvalidResource { index: 0, .. })
        ));
    }

    #[test]
    fn test_dangling_parent() {
        let snapshot = r#"{"resources": [
            {"_id": "wrk_1", "_type": "workspace", "name": "W"},
            {"_id": "fld_1", "_type": "request_group", "parentId": "wrk_9", "name": "V1"}
        ]}"#;
        match parse_export(snapshot) {
            Err(DiffError::DanglingParent { id, parent_id }) => {
                assert_eq!(id, "fld_1");
                assert_eq!(parent_id, "wrk_9");
            }
            other => panic!("expected DanglingParent, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_id() {
        let snapshot = r#"{"resources": [
            {"_id": "wrk_1", "_type": "workspace", "name": "W"},
            {"_id": "wrk_1", "_type": "workspace", "name": "W2"}
        ]}"#;
        assert!(matches!(
            parse_export(snapshot),
            Err(DiffError::DuplicateId { .. })
        ));
    }
}
