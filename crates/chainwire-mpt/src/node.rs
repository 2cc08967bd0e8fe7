use std::fmt;

use chainwire_rlp::{self as rlp, RlpItem};

use crate::error::{MptError, MptResult};
use crate::nibbles::Nibbles;

/// Reference to a trie node: the blake3 hash of its canonical encoding.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHash([u8; 32]);

impl NodeHash {
    /// Hash a node's serialized bytes.
    pub fn of(bytes: &[u8]) -> Self {
        Self(*blake3::hash(bytes).as_bytes())
    }

    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for NodeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeHash({})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for NodeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// A child slot in a node: empty, a hash reference into the proof's node
/// set, or a small node embedded inline in the parent's encoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeRef {
    Empty,
    Hash(NodeHash),
    Inline(Box<Node>),
}

/// A decoded trie node.
///
/// The wire shape decision table: a 2-element list is a leaf or extension,
/// split by the compact path's flag nibble; a 17-element list is a branch;
/// any other element count is [`MptError::UnknownNodeLength`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Leaf {
        path: Nibbles,
        value: Vec<u8>,
    },
    Extension {
        path: Nibbles,
        child: NodeRef,
    },
    Branch {
        children: Box<[NodeRef; 16]>,
        value: Option<Vec<u8>>,
    },
}

impl Node {
    /// Decode a node from its serialized bytes.
    pub fn decode_bytes(bytes: &[u8]) -> MptResult<Self> {
        Self::decode(&rlp::decode(bytes)?)
    }

    /// Decode a node from an already-parsed item (used for inline children).
    pub fn decode(item: &RlpItem) -> MptResult<Self> {
        let elements = item.as_list()?;
        match elements.len() {
            2 => {
                let (path, is_leaf) = Nibbles::from_compact(elements[0].as_bytes()?)?;
                if is_leaf {
                    Ok(Self::Leaf {
                        path,
                        value: elements[1].as_bytes()?.to_vec(),
                    })
                } else {
                    if path.is_empty() {
                        return Err(MptError::Decode("extension with empty path"));
                    }
                    let child = decode_ref(&elements[1])?;
                    if child == NodeRef::Empty {
                        return Err(MptError::Decode("extension with empty child"));
                    }
                    Ok(Self::Extension { path, child })
                }
            }
            17 => {
                let mut children: [NodeRef; 16] = Default::default();
                for (slot, element) in children.iter_mut().zip(&elements[..16]) {
                    *slot = decode_ref(element)?;
                }
                let value = match &elements[16] {
                    RlpItem::Bytes(b) if b.is_empty() => None,
                    RlpItem::Bytes(b) => Some(b.clone()),
                    RlpItem::List(_) => {
                        return Err(MptError::Decode("branch value slot holds a list"))
                    }
                };
                Ok(Self::Branch {
                    children: Box::new(children),
                    value,
                })
            }
            other => Err(MptError::UnknownNodeLength(other)),
        }
    }

    /// Canonical encoded form; its hash is the node's reference.
    pub fn encode(&self) -> Vec<u8> {
        rlp::encode(&self.to_item())
    }

    pub fn hash(&self) -> NodeHash {
        NodeHash::of(&self.encode())
    }

    fn to_item(&self) -> RlpItem {
        match self {
            Self::Leaf { path, value } => RlpItem::list(vec![
                RlpItem::bytes(path.to_compact(true)),
                RlpItem::bytes(value.clone()),
            ]),
            Self::Extension { path, child } => RlpItem::list(vec![
                RlpItem::bytes(path.to_compact(false)),
                ref_to_item(child),
            ]),
            Self::Branch { children, value } => {
                let mut elements: Vec<RlpItem> = children.iter().map(ref_to_item).collect();
                elements.push(RlpItem::bytes(value.clone().unwrap_or_default()));
                RlpItem::List(elements)
            }
        }
    }
}

impl Default for NodeRef {
    fn default() -> Self {
        Self::Empty
    }
}

fn decode_ref(item: &RlpItem) -> MptResult<NodeRef> {
    match item {
        RlpItem::Bytes(b) if b.is_empty() => Ok(NodeRef::Empty),
        RlpItem::Bytes(b) => {
            let hash: [u8; 32] = b
                .as_slice()
                .try_into()
                .map_err(|_| MptError::Decode("child reference must be empty or a 32-byte hash"))?;
            Ok(NodeRef::Hash(NodeHash::from_bytes(hash)))
        }
        RlpItem::List(_) => Ok(NodeRef::Inline(Box::new(Node::decode(item)?))),
    }
}

fn ref_to_item(node_ref: &NodeRef) -> RlpItem {
    match node_ref {
        NodeRef::Empty => RlpItem::bytes(Vec::new()),
        NodeRef::Hash(h) => RlpItem::bytes(h.as_bytes().to_vec()),
        NodeRef::Inline(node) => node.to_item(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(path: Vec<u8>, value: &[u8]) -> Node {
        Node::Leaf {
            path: Nibbles::from_raw(path),
            value: value.to_vec(),
        }
    }

    #[test]
    fn leaf_roundtrip() {
        let node = leaf(vec![1, 2, 3], b"value");
        assert_eq!(Node::decode_bytes(&node.encode()).unwrap(), node);
    }

    #[test]
    fn extension_roundtrip() {
        let node = Node::Extension {
            path: Nibbles::from_raw(vec![0x0A]),
            child: NodeRef::Hash(NodeHash::from_bytes([0x77; 32])),
        };
        assert_eq!(Node::decode_bytes(&node.encode()).unwrap(), node);
    }

    #[test]
    fn branch_roundtrip() {
        let mut children: [NodeRef; 16] = Default::default();
        children[3] = NodeRef::Hash(NodeHash::from_bytes([0x11; 32]));
        children[9] = NodeRef::Inline(Box::new(leaf(vec![], b"inline")));
        let node = Node::Branch {
            children: Box::new(children),
            value: Some(b"terminal".to_vec()),
        };
        assert_eq!(Node::decode_bytes(&node.encode()).unwrap(), node);
    }

    #[test]
    fn branch_without_value_roundtrip() {
        let node = Node::Branch {
            children: Box::new(Default::default()),
            value: None,
        };
        assert_eq!(Node::decode_bytes(&node.encode()).unwrap(), node);
    }

    #[test]
    fn wrong_element_count_rejected() {
        for count in [0usize, 1, 3, 16, 18] {
            let item = RlpItem::list(vec![RlpItem::bytes(Vec::new()); count]);
            let err = Node::decode(&item).unwrap_err();
            assert_eq!(err, MptError::UnknownNodeLength(count), "count {count}");
        }
    }

    #[test]
    fn truncated_child_hash_rejected() {
        let item = RlpItem::list(vec![
            RlpItem::bytes(Nibbles::from_raw(vec![1]).to_compact(false)),
            RlpItem::bytes(vec![0x22; 31]),
        ]);
        assert!(matches!(Node::decode(&item), Err(MptError::Decode(_))));
    }

    #[test]
    fn empty_extension_rejected() {
        let item = RlpItem::list(vec![
            RlpItem::bytes(Nibbles::from_raw(vec![]).to_compact(false)),
            RlpItem::bytes(vec![0x22; 32]),
        ]);
        assert_eq!(
            Node::decode(&item),
            Err(MptError::Decode("extension with empty path"))
        );
    }

    #[test]
    fn branch_value_list_rejected() {
        let mut elements = vec![RlpItem::bytes(Vec::new()); 16];
        elements.push(RlpItem::list(vec![]));
        let err = Node::decode(&RlpItem::list(elements)).unwrap_err();
        assert_eq!(err, MptError::Decode("branch value slot holds a list"));
    }

    #[test]
    fn hash_tracks_content() {
        let a = leaf(vec![1], b"a");
        let b = leaf(vec![1], b"b");
        assert_ne!(a.hash(), b.hash());
        assert_eq!(a.hash(), leaf(vec![1], b"a").hash());
    }
}
