//! Reconstruction of branched trees from flat SWC records.
//!
//! Records only link to their parent. Reconstruction inverts these links into
//! a child list per record (ordered by ascending id), then grows branches
//! from every root:
//! - a record with no children ends the branch,
//! - a record with exactly one child continues the same branch,
//! - a record with two or more children is a fork; one new branch
//!   (leaf kind `Normal`) starts at each child, in ascending id order.
//!
//! Branches are grown into an arena with an explicit work stack and
//! assembled into owned [Branch]es bottom-up afterwards, so input depth does
//! not affect the call stack.

use crate::model::{Branch, Color, LeafKind, NeuronData, NeuronType, Tree};
use crate::parser::byte_source::ByteSource;
use crate::parser::{ByteParser, ParsingError, ParsingErrorType};
use crate::swc::record::{SwcRecord, TypeCode, parse_records};
use log::{debug, warn};
use std::collections::HashMap;
use std::path::Path;

/// Index of a record in the input slice.
type RecordIndex = usize;

/// Index of a branch in the reconstruction arena.
type ArenaIndex = usize;

/// A branch under construction; children are arena indices, always larger
/// than the branch's own index.
struct ArenaBranch {
    branch: Branch,
    children: Vec<ArenaIndex>,
}

// =#========================================================================#=
// SWC READER
// =#========================================================================#=
/// Configurable reader turning SWC text or records into [NeuronData].
///
/// # Policy
/// - Records with parent `-1` or type soma start a new tree
/// - Duplicate ids are rejected
/// - A record referencing a parent id that does not exist is rejected,
///   unless [SwcReader::with_orphans_as_roots] is set, in which case it
///   starts a new tree
/// - Records that cannot be reached from any root (a cycle in parentage)
///   are rejected
///
/// Reconstructed trees are white, their root branch has leaf kind `Normal`
/// and the neuron type is taken from the first axon (2), dendrite (3) or
/// apical dendrite (4) record of the tree, defaulting to axon.
///
/// # Example
/// ```
/// use nlxml::swc::SwcReader;
///
/// let data = SwcReader::new().parse_str("1 1 0 0 0 1 -1\n2 3 1 0 0 1 1\n3 3 1 1 0 1 2\n")?;
/// assert_eq!(data.trees.len(), 1);
/// assert_eq!(data.trees[0].root.points.len(), 3);
/// # Ok::<(), nlxml::parser::ParsingError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct SwcReader {
    orphans_as_roots: bool,
}

impl SwcReader {
    /// Creates a reader with default settings (dangling parents are errors).
    pub fn new() -> Self {
        Self::default()
    }

    /// Treats records with a dangling parent reference as new roots
    /// instead of failing.
    pub fn with_orphans_as_roots(mut self) -> Self {
        self.orphans_as_roots = true;
        self
    }

    /// Parses records from `parser` until EOF and reconstructs them.
    pub fn parse<S: ByteSource>(
        &self,
        mut parser: ByteParser<S>,
    ) -> Result<NeuronData, ParsingError> {
        let records = parse_records(&mut parser)?;
        self.reconstruct(&records)
    }

    /// Parses and reconstructs SWC text.
    pub fn parse_str<S: AsRef<str>>(&self, swc: S) -> Result<NeuronData, ParsingError> {
        self.parse(ByteParser::for_str(swc.as_ref()))
    }

    /// Reads the file at `path` completely, then parses and reconstructs it.
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<NeuronData, ParsingError> {
        self.parse(ByteParser::from_file(path)?)
    }

    /// Reconstructs trees from records.
    ///
    /// # Errors
    /// Returns a structural [ParsingError] (`DuplicateId`, `DanglingParent`
    /// or `CyclicParentage`) if the records do not describe a forest.
    pub fn reconstruct(&self, records: &[SwcRecord]) -> Result<NeuronData, ParsingError> {
        // Index ids
        let mut by_id: HashMap<i64, RecordIndex> = HashMap::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            if by_id.insert(record.id, index).is_some() {
                return Err(ParsingError::without_context(ParsingErrorType::DuplicateId(
                    record.id,
                )));
            }
        }

        // Find roots and invert parent links
        let mut roots: Vec<RecordIndex> = Vec::new();
        let mut children: HashMap<i64, Vec<RecordIndex>> = HashMap::new();
        for (index, record) in records.iter().enumerate() {
            if record.is_root() {
                roots.push(index);
            } else if by_id.contains_key(&record.parent_id) {
                children.entry(record.parent_id).or_default().push(index);
            } else if self.orphans_as_roots {
                warn!(
                    "Record {} references unknown parent {}, starting a new tree",
                    record.id, record.parent_id
                );
                roots.push(index);
            } else {
                return Err(ParsingError::without_context(
                    ParsingErrorType::DanglingParent {
                        id: record.id,
                        parent_id: record.parent_id,
                    },
                ));
            }
        }
        for siblings in children.values_mut() {
            siblings.sort_by_key(|&index| records[index].id);
        }

        // Grow branches
        let mut arena: Vec<ArenaBranch> = Vec::with_capacity(roots.len());
        let mut tree_types: Vec<Option<NeuronType>> = vec![None; roots.len()];
        let mut visited = vec![false; records.len()];
        let mut stack: Vec<(ArenaIndex, RecordIndex, usize)> = Vec::new();
        let mut root_arena: Vec<ArenaIndex> = Vec::with_capacity(roots.len());

        for (tree_index, &root) in roots.iter().enumerate() {
            root_arena.push(arena.len());
            stack.push((arena.len(), root, tree_index));
            arena.push(ArenaBranch {
                branch: Branch::new(LeafKind::Normal),
                children: Vec::new(),
            });

            while let Some((branch_index, start, tree)) = stack.pop() {
                let mut current = start;
                loop {
                    let record = &records[current];
                    visited[current] = true;
                    arena[branch_index].branch.points.push(record.point());
                    if tree_types[tree].is_none() {
                        tree_types[tree] = neuron_type_of(record.type_code);
                    }

                    let kids = children.get(&record.id).map(Vec::as_slice).unwrap_or(&[]);
                    match kids {
                        [] => break,
                        [only] => current = *only,
                        forks => {
                            // Reverse, so the lowest id is grown first
                            for &kid in forks.iter().rev() {
                                let kid_branch = arena.len();
                                arena.push(ArenaBranch {
                                    branch: Branch::new(LeafKind::Normal),
                                    children: Vec::new(),
                                });
                                stack.push((kid_branch, kid, tree));
                            }
                            let first = arena.len() - forks.len();
                            arena[branch_index].children = (first..arena.len()).rev().collect();
                            break;
                        }
                    }
                }
            }
        }

        if let Some(unreached) = visited.iter().position(|&v| !v) {
            return Err(ParsingError::without_context(
                ParsingErrorType::CyclicParentage(records[unreached].id),
            ));
        }

        // Assemble bottom-up: children always come after their parent in the arena
        let mut built: Vec<Option<Branch>> = Vec::with_capacity(arena.len());
        built.resize_with(arena.len(), || None);
        for (index, node) in arena.into_iter().enumerate().rev() {
            let ArenaBranch {
                mut branch,
                children,
            } = node;
            branch.children = children
                .iter()
                .filter_map(|&child| built[child].take())
                .collect();
            built[index] = Some(branch);
        }

        let mut data = NeuronData::new();
        for (tree_index, &arena_index) in root_arena.iter().enumerate() {
            if let Some(root) = built[arena_index].take() {
                let neuron_type = tree_types[tree_index].take().unwrap_or_default();
                data.trees
                    .push(Tree::new(neuron_type, Color::WHITE).with_root(root));
            }
        }

        debug!(
            "Reconstructed {} trees from {} records",
            data.trees.len(),
            records.len()
        );
        Ok(data)
    }
}

/// Neuron type named by a type code, if any.
fn neuron_type_of(type_code: TypeCode) -> Option<NeuronType> {
    match type_code {
        TypeCode::Axon => Some(NeuronType::Axon),
        TypeCode::Dendrite => Some(NeuronType::Dendrite),
        TypeCode::ApicalDendrite => Some(NeuronType::ApicalDendrite),
        _ => None,
    }
}

/// Reconstructs trees from records with default [SwcReader] settings.
///
/// # Errors
/// See [SwcReader::reconstruct].
pub fn reconstruct(records: &[SwcRecord]) -> Result<NeuronData, ParsingError> {
    SwcReader::new().reconstruct(records)
}
