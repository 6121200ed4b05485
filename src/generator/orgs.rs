//! Organization tree generation

use tracing::debug;

use crate::models::{Organization, ROOT_ORG_NAME, ROOT_PARENT_ID};

/// Build a tree with `depth` levels of `branches` children below the root.
///
/// Organizations come back in pre-order with ids `"1"`, `"2"`, ... so every
/// parent precedes its children. Child names extend the parent name with
/// `-部门<n>`, `n` counting from 1 under each parent.
pub fn generate_organizations(depth: u32, branches: u32) -> Vec<Organization> {
    let mut builder = TreeBuilder {
        orgs: Vec::new(),
        next_id: 1,
    };

    let root_id = builder.push(ROOT_ORG_NAME.to_string(), ROOT_PARENT_ID.to_string());

    // Children are pushed in reverse so they pop in branch order.
    let mut pending: Vec<Pending> = Vec::new();
    if depth > 0 {
        pending.extend(Pending::children_of(&root_id, ROOT_ORG_NAME, 1, branches));
    }
    while let Some(node) = pending.pop() {
        let id = builder.push(node.name.clone(), node.parent_id);
        if node.level < depth {
            pending.extend(Pending::children_of(&id, &node.name, node.level + 1, branches));
        }
    }

    debug!(depth, branches, count = builder.orgs.len(), "Generated organization tree");
    builder.orgs
}

struct TreeBuilder {
    orgs: Vec<Organization>,
    next_id: u64,
}

impl TreeBuilder {
    fn push(&mut self, name: String, parent_id: String) -> String {
        let id = self.next_id.to_string();
        self.next_id += 1;
        self.orgs.push(Organization {
            id: id.clone(),
            name,
            parent_id,
        });
        id
    }
}

/// A node whose id has not been assigned yet.
struct Pending {
    parent_id: String,
    name: String,
    level: u32,
}

impl Pending {
    fn children_of(
        parent_id: &str,
        parent_name: &str,
        level: u32,
        branches: u32,
    ) -> Vec<Pending> {
        (1..=branches)
            .rev()
            .map(|branch| Pending {
                parent_id: parent_id.to_string(),
                name: format!("{parent_name}-部门{branch}"),
                level,
            })
            .collect()
    }
}
