use std::collections::HashMap;

use chainwire_rlp::{self as rlp, RlpItem};

use crate::error::{MptError, MptResult};
use crate::nibbles::Nibbles;
use crate::node::{Node, NodeHash, NodeRef};

/// Result of a proof lookup: both outcomes are answers, not errors.
///
/// `Absent` means the proof structurally demonstrates the key is not in
/// the trie. An undecidable lookup (a referenced node the proof does not
/// carry) is [`MptError::MissingNode`] instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Lookup {
    Found(Vec<u8>),
    Absent,
}

/// A partial trie: serialized nodes keyed by their claimed hash, checked
/// against a trusted root during verification.
#[derive(Clone, Debug, Default)]
pub struct Proof {
    nodes: HashMap<NodeHash, Vec<u8>>,
}

impl Proof {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node under the hash its supplier claims for it. The claim
    /// is only trusted by [`Proof::lookup`]; [`Proof::verify_inclusion`]
    /// recomputes it.
    pub fn insert(&mut self, claimed: NodeHash, bytes: Vec<u8>) {
        self.nodes.insert(claimed, bytes);
    }

    /// Insert a node keyed by its computed hash; returns the key used.
    pub fn add_node(&mut self, bytes: Vec<u8>) -> NodeHash {
        let hash = NodeHash::of(&bytes);
        self.nodes.insert(hash, bytes);
        hash
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Follow the key's nibble path from `root` and report the value found
    /// there, or that the key is provably absent.
    pub fn lookup(&self, root: NodeHash, key: &[u8]) -> MptResult<Lookup> {
        self.walk(root, key, false)
    }

    /// Prove that `key` maps to `expected` under `root`.
    ///
    /// Every node fetched by hash is re-hashed over its exact serialized
    /// bytes and compared against the reference its parent declared; a
    /// substituted node fails with [`MptError::HashMismatch`] no matter
    /// how plausible its contents are.
    pub fn verify_inclusion(&self, root: NodeHash, key: &[u8], expected: &[u8]) -> MptResult<()> {
        match self.walk(root, key, true)? {
            Lookup::Found(value) if value == expected => Ok(()),
            Lookup::Found(value) => Err(MptError::ValueMismatch {
                expected: hex::encode(expected),
                found: hex::encode(&value),
            }),
            Lookup::Absent => Err(MptError::KeyAbsent),
        }
    }

    fn walk(&self, root: NodeHash, key: &[u8], verify: bool) -> MptResult<Lookup> {
        let key = Nibbles::from_bytes(key);
        let mut node = self.fetch(root, verify)?;
        let mut pos = 0;

        loop {
            match node {
                Node::Leaf { path, value } => {
                    return if key.slice_from(pos) == path {
                        Ok(Lookup::Found(value))
                    } else {
                        Ok(Lookup::Absent)
                    };
                }
                Node::Extension { path, child } => {
                    if !key.slice_from(pos).starts_with(&path) {
                        return Ok(Lookup::Absent);
                    }
                    pos += path.len();
                    tracing::trace!(consumed = pos, "descending through extension");
                    node = self.deref(&child, verify)?;
                }
                Node::Branch { children, value } => {
                    if pos == key.len() {
                        return Ok(match value {
                            Some(v) => Lookup::Found(v),
                            None => Lookup::Absent,
                        });
                    }
                    let nibble = key.at(pos) as usize;
                    match &children[nibble] {
                        NodeRef::Empty => return Ok(Lookup::Absent),
                        child => {
                            pos += 1;
                            tracing::trace!(nibble, consumed = pos, "descending into branch child");
                            node = self.deref(child, verify)?;
                        }
                    }
                }
            }
        }
    }

    fn deref(&self, node_ref: &NodeRef, verify: bool) -> MptResult<Node> {
        match node_ref {
            // Inline children are committed to by the parent's own bytes,
            // so they carry no separate hash to check.
            NodeRef::Inline(node) => Ok((**node).clone()),
            NodeRef::Hash(hash) => self.fetch(*hash, verify),
            NodeRef::Empty => Err(MptError::Decode("dangling empty reference")),
        }
    }

    fn fetch(&self, hash: NodeHash, verify: bool) -> MptResult<Node> {
        let bytes = self.nodes.get(&hash).ok_or(MptError::MissingNode(hash))?;
        if verify {
            let computed = NodeHash::of(bytes);
            if computed != hash {
                return Err(MptError::HashMismatch {
                    declared: hash,
                    computed,
                });
            }
        }
        Node::decode_bytes(bytes)
    }

    /// Parse a proof-of-inclusion container: an encoded list of per-tree
    /// `[root, [[hash, node-bytes], ...]]` groups, as delivered by node
    /// RPC endpoints. Returns one (root, proof) pair per group.
    pub fn from_poi_bytes(bytes: &[u8]) -> MptResult<Vec<(NodeHash, Proof)>> {
        let decoded = rlp::decode(bytes)?;
        let groups = decoded.as_list()?;
        let mut out = Vec::with_capacity(groups.len());
        for group in groups {
            let parts = group.as_list()?;
            if parts.len() != 2 {
                return Err(MptError::Decode("poi group needs root and node list"));
            }
            let root = read_hash(&parts[0])?;
            let mut proof = Proof::new();
            for entry in parts[1].as_list()? {
                let pair = entry.as_list()?;
                if pair.len() != 2 {
                    return Err(MptError::Decode("poi node entry needs hash and bytes"));
                }
                proof.insert(read_hash(&pair[0])?, pair[1].as_bytes()?.to_vec());
            }
            out.push((root, proof));
        }
        Ok(out)
    }
}

fn read_hash(item: &RlpItem) -> MptResult<NodeHash> {
    let bytes: [u8; 32] = item
        .as_bytes()?
        .try_into()
        .map_err(|_| MptError::Decode("hash must be 32 bytes"))?;
    Ok(NodeHash::from_bytes(bytes))
}
