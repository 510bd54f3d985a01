//! Tree data model and its JSON shape
//!
//! A node is either a Folder (named children plus a `$className` marker)
//! or a Leaf (a `$path` file reference). The same shape is used in both
//! directions: the config skeleton deserializes from it and the finished
//! manifest serializes back to it. Children keep insertion order so output
//! is stable across runs.

use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const CLASS_KEY: &str = "$className";
const PATH_KEY: &str = "$path";

/// A node in the virtual tree.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode {
    Folder {
        class_name: String,
        children: IndexMap<String, TreeNode>,
    },
    Leaf {
        path: String,
    },
}

impl TreeNode {
    /// An empty container node.
    pub fn folder() -> Self {
        TreeNode::Folder {
            class_name: "Folder".to_string(),
            children: IndexMap::new(),
        }
    }

    pub fn leaf(path: impl Into<String>) -> Self {
        TreeNode::Leaf { path: path.into() }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, TreeNode::Folder { .. })
    }

    /// Look up a child by name, case-insensitively.
    pub fn child(&self, name: &str) -> Option<&TreeNode> {
        match self {
            TreeNode::Folder { children, .. } => children
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v),
            TreeNode::Leaf { .. } => None,
        }
    }

    /// Mutable case-insensitive child lookup.
    pub fn child_mut(&mut self, name: &str) -> Option<&mut TreeNode> {
        match self {
            TreeNode::Folder { children, .. } => {
                let idx = children
                    .keys()
                    .position(|k| k.eq_ignore_ascii_case(name))?;
                children.get_index_mut(idx).map(|(_, v)| v)
            }
            TreeNode::Leaf { .. } => None,
        }
    }

    /// Get or create the folder child with this name.
    ///
    /// Matching is case-insensitive and the first-created key spelling is
    /// kept. An existing non-folder node under the name is replaced by an
    /// empty folder (last write wins).
    ///
    /// # Panics
    ///
    /// Panics if `self` is a leaf; callers only reach this through nodes
    /// they created as folders.
    pub fn ensure_folder(&mut self, name: &str) -> &mut TreeNode {
        let TreeNode::Folder { children, .. } = self else {
            panic!("ensure_folder called on a leaf node");
        };
        let idx = match children.keys().position(|k| k.eq_ignore_ascii_case(name)) {
            Some(idx) => {
                if !children[idx].is_folder() {
                    children[idx] = TreeNode::folder();
                }
                idx
            }
            None => {
                children.insert(name.to_string(), TreeNode::folder());
                children.len() - 1
            }
        };
        match children.get_index_mut(idx) {
            Some((_, node)) => node,
            None => unreachable!("index points at an existing child"),
        }
    }

    /// Insert or overwrite a child, reusing an existing key that differs
    /// only in case.
    pub fn set_child(&mut self, name: &str, node: TreeNode) {
        let TreeNode::Folder { children, .. } = self else {
            panic!("set_child called on a leaf node");
        };
        match children.keys().position(|k| k.eq_ignore_ascii_case(name)) {
            Some(idx) => children[idx] = node,
            None => {
                children.insert(name.to_string(), node);
            }
        }
    }
}

impl Serialize for TreeNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TreeNode::Leaf { path } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(PATH_KEY, path)?;
                map.end()
            }
            TreeNode::Folder {
                class_name,
                children,
            } => {
                let mut map = serializer.serialize_map(Some(children.len() + 1))?;
                map.serialize_entry(CLASS_KEY, class_name)?;
                for (name, child) in children {
                    map.serialize_entry(name, child)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for TreeNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(NodeVisitor)
    }
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = TreeNode;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a tree node object ($path leaf or $className folder)")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<TreeNode, A::Error> {
        let mut class_name: Option<String> = None;
        let mut path: Option<String> = None;
        let mut children = IndexMap::new();

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                CLASS_KEY => class_name = Some(map.next_value()?),
                PATH_KEY => path = Some(map.next_value()?),
                _ => {
                    children.insert(key, map.next_value::<TreeNode>()?);
                }
            }
        }

        if let Some(path) = path {
            if !children.is_empty() {
                return Err(de::Error::custom("a $path node cannot have children"));
            }
            return Ok(TreeNode::Leaf { path });
        }
        Ok(TreeNode::Folder {
            class_name: class_name.unwrap_or_else(|| "Folder".to_string()),
            children,
        })
    }
}

/// The output document: a name plus the finished tree.
#[derive(Debug, Clone, Serialize)]
pub struct Manifest {
    pub name: String,
    pub tree: TreeNode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_lookup_keeps_first_spelling() {
        let mut root = TreeNode::folder();
        root.ensure_folder("Utils");
        root.ensure_folder("utils");
        let TreeNode::Folder { children, .. } = &root else {
            unreachable!()
        };
        assert_eq!(children.len(), 1);
        assert!(children.contains_key("Utils"));
    }

    #[test]
    fn test_set_child_overwrites_case_insensitively() {
        let mut root = TreeNode::folder();
        root.set_child("Main", TreeNode::leaf("src/main.luau"));
        root.set_child("main", TreeNode::leaf("src/other/main.luau"));
        let TreeNode::Folder { children, .. } = &root else {
            unreachable!()
        };
        assert_eq!(children.len(), 1);
        assert_eq!(
            root.child("MAIN"),
            Some(&TreeNode::leaf("src/other/main.luau"))
        );
    }

    #[test]
    fn test_leaf_in_the_way_becomes_a_folder() {
        let mut root = TreeNode::folder();
        root.set_child("Core", TreeNode::leaf("src/core.luau"));
        let core = root.ensure_folder("Core");
        assert!(core.is_folder());
    }

    #[test]
    fn test_serialize_shapes() {
        let mut root = TreeNode::folder();
        let shared = root.ensure_folder("Shared");
        shared.set_child("Main", TreeNode::leaf("src/main.luau"));

        let json = serde_json::to_value(&root).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "$className": "Folder",
                "Shared": {
                    "$className": "Folder",
                    "Main": { "$path": "src/main.luau" }
                }
            })
        );
    }

    #[test]
    fn test_deserialize_skeleton() {
        let node: TreeNode = serde_json::from_value(serde_json::json!({
            "$className": "DataModel",
            "Storage": {
                "Packages": { "$path": "Packages" }
            }
        }))
        .unwrap();

        let storage = node.child("Storage").unwrap();
        assert!(storage.is_folder(), "missing $className defaults to Folder");
        assert_eq!(storage.child("Packages"), Some(&TreeNode::leaf("Packages")));
    }

    #[test]
    fn test_deserialize_rejects_leaf_with_children() {
        let result: Result<TreeNode, _> = serde_json::from_value(serde_json::json!({
            "$path": "src",
            "Extra": { "$className": "Folder" }
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_serialization_preserves_insertion_order() {
        let mut root = TreeNode::folder();
        for name in ["Zebra", "Apple", "Mango"] {
            root.ensure_folder(name);
        }
        let json = serde_json::to_string(&root).unwrap();
        let zebra = json.find("Zebra").unwrap();
        let apple = json.find("Apple").unwrap();
        let mango = json.find("Mango").unwrap();
        assert!(zebra < apple && apple < mango, "order not preserved: {}", json);
    }
}
