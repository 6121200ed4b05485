//! Human-readable dataset summary printed by `show`.

use std::collections::HashMap;
use std::fmt;

use crate::config::MAX_ORG_DEPTH;
use crate::models::{Dataset, Organization, ROOT_PARENT_ID};

const SAMPLE_USERS: usize = 5;

/// Tree levels drawn before a subtree is elided as `...`.
const MAX_PREVIEW_LEVELS: u32 = MAX_ORG_DEPTH + 1;

/// Statistics, an org tree preview and a user sample for a dataset.
pub struct DatasetReport<'a> {
    dataset: &'a Dataset,
}

impl<'a> DatasetReport<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        Self { dataset }
    }

    fn write_tree(
        &self,
        f: &mut fmt::Formatter<'_>,
        children: &HashMap<&str, Vec<&Organization>>,
    ) -> fmt::Result {
        let mut stack = Vec::new();
        push_children(&mut stack, children, ROOT_PARENT_ID, String::new(), 0);

        while let Some(entry) = stack.pop() {
            let branch = if entry.last { "└── " } else { "├── " };
            writeln!(f, "{}{branch}{} (ID: {})", entry.indent, entry.org.name, entry.org.id)?;

            let indent = format!("{}{}", entry.indent, if entry.last { "    " } else { "│   " });
            if entry.level + 1 >= MAX_PREVIEW_LEVELS {
                if children.contains_key(entry.org.id.as_str()) {
                    writeln!(f, "{indent}...")?;
                }
                continue;
            }
            push_children(&mut stack, children, &entry.org.id, indent, entry.level + 1);
        }
        Ok(())
    }
}

struct TreeLine<'a> {
    org: &'a Organization,
    indent: String,
    last: bool,
    level: u32,
}

/// Queue the children of `parent_id` so they pop in list order.
fn push_children<'a>(
    stack: &mut Vec<TreeLine<'a>>,
    children: &HashMap<&str, Vec<&'a Organization>>,
    parent_id: &str,
    indent: String,
    level: u32,
) {
    let Some(nodes) = children.get(parent_id) else {
        return;
    };
    for (index, &org) in nodes.iter().enumerate().rev() {
        stack.push(TreeLine {
            org,
            indent: indent.clone(),
            last: index + 1 == nodes.len(),
            level,
        });
    }
}

impl fmt::Display for DatasetReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.dataset;

        writeln!(f, "\n=== 测试数据统计 ===")?;
        writeln!(f, "配置信息:")?;
        writeln!(f, "  用户数量: {}", data.config.user_count)?;
        writeln!(f, "  组织深度: {}", data.config.org_depth)?;
        writeln!(f, "  每层分支数: {}", data.config.org_branches)?;
        writeln!(f, "\n实际数据:")?;
        writeln!(f, "  用户总数: {}", data.users.len())?;
        writeln!(f, "  组织总数: {}", data.orgs.len())?;

        writeln!(f, "\n=== 组织架构预览 ===")?;
        let mut children: HashMap<&str, Vec<&Organization>> = HashMap::new();
        for org in &data.orgs {
            children.entry(org.parent_id.as_str()).or_default().push(org);
        }
        self.write_tree(f, &children)?;

        writeln!(f, "\n=== 用户样本 (前{SAMPLE_USERS}个) ===")?;
        for user in data.users.iter().take(SAMPLE_USERS) {
            writeln!(f, "{} ({})", user.member_name, user.username)?;
            writeln!(f, "  联系方式: {}", user.contact)?;
            writeln!(f, "  所属组织: {}", user.orgs.join(", "))?;
            writeln!(f)?;
        }
        Ok(())
    }
}
