use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceType {
    Workspace,
    RequestGroup,
    Request,
    /// Environments, cookie jars, specs and anything else an export carries.
    Other(String),
}

impl ResourceType {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "workspace" => ResourceType::Workspace,
            "request_group" => ResourceType::RequestGroup,
            "request" => ResourceType::Request,
            other => ResourceType::Other(other.to_string()),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            ResourceType::Workspace => "workspace",
            ResourceType::RequestGroup => "request_group",
            ResourceType::Request => "request",
            ResourceType::Other(tag) => tag,
        }
    }

    /// Types whose records must carry a display name.
    pub fn requires_name(&self) -> bool {
        !matches!(self, ResourceType::Other(_))
    }
}

/// One validated record of a workspace export.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceNode {
    pub id: String,
    pub kind: ResourceType,
    /// `None` only for workspaces.
    pub parent_id: Option<String>,
    pub name: String,
    /// The untouched export record, handed back to the host when sending.
    pub record: Value,
}

impl ResourceNode {
    /// Build a node together with a minimal export record.
    pub fn new(id: &str, kind: ResourceType, parent_id: Option<&str>, name: &str) -> Self {
        let record = json!({
            "_id": id,
            "_type": kind.tag(),
            "parentId": parent_id,
            "name": name,
        });
        Self {
            id: id.to_string(),
            kind,
            parent_id: parent_id.map(str::to_string),
            name: name.to_string(),
            record,
        }
    }

    pub fn is_request(&self) -> bool {
        self.kind == ResourceType::Request
    }

    pub fn is_folder(&self) -> bool {
        self.kind == ResourceType::RequestGroup
    }

    pub fn is_child_of(&self, parent_id: &str) -> bool {
        self.parent_id.as_deref() == Some(parent_id)
    }

    /// HTTP method from the record, if the export carries one.
    pub fn method(&self) -> Option<&str> {
        self.record.get("method").and_then(Value::as_str)
    }

    pub fn url(&self) -> Option<&str> {
        self.record.get("url").and_then(Value::as_str)
    }
}
