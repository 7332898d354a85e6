// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

#[cfg(feature = "concurrent")]
use utils::iterators::*;
use utils::{iter, iter_mut, Serializable};

use crate::{errors::MerkleTreeError, hash::Hasher};


// MERKLE TREE
// ================================================================================================

/// A fully-balanced Merkle tree.
///
/// In this implementation, a Merkle tree consists of two types of nodes: leaves and internal
/// nodes (one of which is a tree root). All nodes must be instances of the digest specified by
/// the [Hasher] used to build the tree.
///
/// ```text
///       *        <- tree root
///     /   \
///    /     \
///   *       *    <- internal nodes
///  / \     / \
/// o   o   o   o  <- leaves
/// ```
///
/// Nodes are stored in a single vector where the root is at position 1, its children are at
/// positions 2 and 3, and in general the children of node `i` are at `2 * i` and `2 * i + 1`;
/// leaves occupy the second half of the vector. A tree with a single leaf has that leaf as its
/// root.
///
/// When `concurrent` feature is enabled, every level of the tree is built using multiple
/// threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree<H: Hasher> {
    nodes: Vec<H::Digest>,
}

impl<H: Hasher> MerkleTree<H> {
    // CONSTRUCTORS
    // --------------------------------------------------------------------------------------------

    /// Returns new Merkle tree built from the provided leaves using hash function specified by
    /// the `H` generic parameter.
    ///
    /// # Errors
    /// Returns an error if the number of leaves is zero or is not a power of two.
    pub fn new(leaves: Vec<H::Digest>) -> Result<Self, MerkleTreeError> {
        if leaves.is_empty() {
            return Err(MerkleTreeError::NoLeaves);
        }
        if !leaves.len().is_power_of_two() {
            return Err(MerkleTreeError::NumberOfLeavesNotPowerOfTwo(leaves.len()));
        }

        let n = leaves.len();
        let mut nodes = vec![H::Digest::default(); n];
        nodes.extend_from_slice(&leaves);

        // build the tree level by level; parents of nodes in [2k, 4k) are in [k, 2k)
        let mut k = n / 2;
        while k > 0 {
            let (parents, children) = nodes.split_at_mut(2 * k);
            let children = &children[..2 * k];
            iter_mut!(parents[k..]).enumerate().for_each(|(i, parent)| {
                *parent = H::merge(&[children[2 * i], children[2 * i + 1]]);
            });
            k /= 2;
        }

        Ok(Self { nodes })
    }

    /// Returns a Merkle tree whose leaves are hashes of the serialized `values`.
    ///
    /// # Errors
    /// Returns an error if the number of values is zero or is not a power of two.
    pub fn from_values<T: Serializable + Sync>(values: &[T]) -> Result<Self, MerkleTreeError> {
        Self::new(hash_values::<H, T>(values))
    }

    // PUBLIC ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns the root of the tree.
    pub fn root(&self) -> &H::Digest {
        &self.nodes[1]
    }

    /// Returns depth of the tree, i.e. the length of an authentication path.
    pub fn depth(&self) -> usize {
        self.num_leaves().ilog2() as usize
    }

    /// Returns the number of leaves in the tree.
    pub fn num_leaves(&self) -> usize {
        self.nodes.len() / 2
    }

    /// Returns leaf nodes of the tree.
    pub fn leaves(&self) -> &[H::Digest] {
        &self.nodes[self.num_leaves()..]
    }

    // PROVING
    // --------------------------------------------------------------------------------------------

    /// Returns an authentication path for the leaf at the specified index.
    ///
    /// The path lists the siblings of all nodes on the way from the leaf to the root (excluding
    /// the root), starting with the sibling of the leaf itself.
    ///
    /// # Errors
    /// Returns an error if the specified index is greater than or equal to the number of leaves
    /// in the tree.
    pub fn prove(&self, index: usize) -> Result<Vec<H::Digest>, MerkleTreeError> {
        let num_leaves = self.num_leaves();
        if index >= num_leaves {
            return Err(MerkleTreeError::LeafIndexOutOfBounds(index, num_leaves));
        }

        let mut path = Vec::with_capacity(self.depth());
        let mut index = index + num_leaves;
        while index > 1 {
            path.push(self.nodes[index ^ 1]);
            index >>= 1;
        }
        Ok(path)
    }

    // VERIFICATION
    // --------------------------------------------------------------------------------------------

    /// Checks whether `path` authenticates `leaf` at position `index` against the tree `root`.
    ///
    /// Returns false (and never panics) when the path does not lead to the root, or when
    /// `index` cannot address a leaf of a tree of depth `path.len()`.
    pub fn verify(root: H::Digest, index: usize, leaf: H::Digest, path: &[H::Digest]) -> bool {
        if path.len() >= usize::BITS as usize || index >> path.len() != 0 {
            return false;
        }

        let mut index = index;
        let mut node = leaf;
        for &sibling in path {
            node = if index & 1 == 0 {
                H::merge(&[node, sibling])
            } else {
                H::merge(&[sibling, node])
            };
            index >>= 1;
        }
        node == root
    }
}

// VALUE COMMITMENTS
// ================================================================================================

/// Commits to a vector of serializable values and returns the Merkle root.
///
/// Every value is serialized and hashed into a leaf digest.
///
/// # Errors
/// Returns an error if the number of values is zero or is not a power of two.
pub fn commit<H: Hasher, T: Serializable + Sync>(values: &[T]) -> Result<H::Digest, MerkleTreeError> {
    MerkleTree::<H>::from_values(values).map(|tree| *tree.root())
}

/// Returns the authentication path for the value at `index` in a commitment to `values`.
///
/// # Errors
/// Returns an error if the number of values is zero or is not a power of two, or if `index` is
/// out of bounds.
pub fn open<H: Hasher, T: Serializable + Sync>(
    index: usize,
    values: &[T],
) -> Result<Vec<H::Digest>, MerkleTreeError> {
    MerkleTree::<H>::from_values(values)?.prove(index)
}

/// Checks that `value` sits at position `index` of the vector committed to by `root`.
pub fn verify<H: Hasher, T: Serializable>(
    root: H::Digest,
    index: usize,
    path: &[H::Digest],
    value: &T,
) -> bool {
    MerkleTree::<H>::verify(root, index, H::hash(&value.to_bytes()), path)
}

// HELPER FUNCTIONS
// ================================================================================================

fn hash_values<H: Hasher, T: Serializable + Sync>(values: &[T]) -> Vec<H::Digest> {
    iter!(values).map(|value| H::hash(&value.to_bytes())).collect()
}
