use crate::error::{DiffError, Result};
use crate::resource::ResourceNode;

/// A request from the first folder and its same-named counterpart, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestPair {
    pub first: ResourceNode,
    pub second: Option<ResourceNode>,
}

impl RequestPair {
    pub fn new(first: ResourceNode, second: Option<ResourceNode>) -> Self {
        Self { first, second }
    }

    pub fn is_resolved(&self) -> bool {
        self.second.is_some()
    }

    pub fn name(&self) -> &str {
        &self.first.name
    }
}

/// The two folders chosen for a comparison. Always distinct.
#[derive(Debug, Clone, Copy)]
pub struct FolderSelection<'a> {
    pub first: &'a ResourceNode,
    pub second: &'a ResourceNode,
}

/// Folders directly under the workspace, in encounter order.
pub fn list_folders<'a>(resources: &'a [ResourceNode], workspace_id: &str) -> Vec<&'a ResourceNode> {
    resources
        .iter()
        .filter(|r| r.is_folder() && r.is_child_of(workspace_id))
        .collect()
}

/// Folder-scope comparison needs at least two folders to choose from.
pub fn require_two_folders(folders: &[&ResourceNode]) -> Result<()> {
    if folders.len() < 2 {
        return Err(DiffError::EmptyFolderSet {
            found: folders.len(),
        });
    }
    Ok(())
}

/// Resolve two prompt answers to folders by display name.
///
/// Names are not unique, so the second answer skips the folder already taken
/// by the first one.
pub fn select_folders<'a>(
    folders: &[&'a ResourceNode],
    first_name: &str,
    second_name: &str,
) -> Result<FolderSelection<'a>> {
    let first = folders
        .iter()
        .copied()
        .find(|f| f.name == first_name)
        .ok_or_else(|| DiffError::FolderNotFound {
            name: first_name.to_string(),
        })?;

    let mut candidates = folders.iter().copied().filter(|f| f.name == second_name);
    let Some(second) = candidates.clone().find(|f| f.id != first.id) else {
        return Err(if candidates.next().is_some() {
            DiffError::SameFolderSelected {
                name: second_name.to_string(),
            }
        } else {
            DiffError::FolderNotFound {
                name: second_name.to_string(),
            }
        });
    };

    Ok(FolderSelection { first, second })
}

/// Pair every request of the first folder with the first same-named request of
/// the second folder. Requests that only exist in the second folder are not
/// reported.
pub fn resolve_pairs(
    resources: &[ResourceNode],
    folder_a: &ResourceNode,
    folder_b: &ResourceNode,
) -> Vec<RequestPair> {
    let requests_in = |folder: &ResourceNode| -> Vec<&ResourceNode> {
        resources
            .iter()
            .filter(|r| r.is_request() && r.is_child_of(&folder.id))
            .collect()
    };
    let set_a = requests_in(folder_a);
    let set_b = requests_in(folder_b);

    let pairs: Vec<RequestPair> = set_a
        .into_iter()
        .map(|a| {
            let b = set_b.iter().find(|b| b.name == a.name).map(|b| (*b).clone());
            RequestPair::new(a.clone(), b)
        })
        .collect();

    tracing::debug!(
        first = %folder_a.name,
        second = %folder_b.name,
        pairs = pairs.len(),
        unmatched = pairs.iter().filter(|p| !p.is_resolved()).count(),
        "resolved request pairs"
    );
    pairs
}
