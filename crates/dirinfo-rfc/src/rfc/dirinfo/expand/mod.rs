//! BEGIN/END entity tree assembly.
//!
//! A flat field sequence is folded into nested [`Block`]s, one per
//! `BEGIN:x` ... `END:x` pair.

use crate::error::{DirInfoError, DirInfoResult};
use crate::rfc::dirinfo::core::Field;

/// One node of an expanded field sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entity {
    Field(Field),
    Block(Block),
}

impl Entity {
    /// Returns the field if this is a leaf.
    #[must_use]
    pub const fn as_field(&self) -> Option<&Field> {
        match self {
            Self::Field(f) => Some(f),
            Self::Block(_) => None,
        }
    }

    /// Returns the block if this is a nested entity.
    #[must_use]
    pub const fn as_block(&self) -> Option<&Block> {
        match self {
            Self::Block(b) => Some(b),
            Self::Field(_) => None,
        }
    }
}

/// A BEGIN/END delimited entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub begin: Field,
    pub children: Vec<Entity>,
    pub end: Field,
}

impl Block {
    /// The BEGIN value, e.g. `VCARD`.
    #[must_use]
    pub fn kind(&self) -> &str {
        self.begin.raw_value().unwrap_or_default()
    }

    /// Whether the BEGIN value equals `kind`, case-insensitively.
    #[must_use]
    pub fn is_kind(&self, kind: &str) -> bool {
        self.kind().eq_ignore_ascii_case(kind)
    }

    /// Partitions this block into its own fields, BEGIN and END included,
    /// and its directly nested blocks.
    #[must_use]
    pub fn split_outer_inner(&self) -> (Vec<&Field>, Vec<&Block>) {
        let (mut outer, inner) = split_outer_inner(&self.children);
        outer.insert(0, &self.begin);
        outer.push(&self.end);
        (outer, inner)
    }

    /// All fields in line order, BEGIN and END included.
    #[must_use]
    pub fn flatten(&self) -> Vec<&Field> {
        let mut out = vec![&self.begin];
        flatten_into(&self.children, &mut out);
        out.push(&self.end);
        out
    }
}

/// Nests a field sequence by BEGIN/END pairs.
///
/// Invalid fields are carried through as leaves.
///
/// ## Errors
///
/// - `MismatchedBeginEnd` if an END value differs (case-insensitively) from
///   the innermost open BEGIN value.
/// - `UnmatchedEnd` for an END with no open block.
/// - `UnclosedBlock` if a block is still open at the end of input.
#[tracing::instrument(skip(fields))]
pub fn expand<I>(fields: I) -> DirInfoResult<Vec<Entity>>
where
    I: IntoIterator<Item = Field>,
{
    let mut root: Vec<Entity> = Vec::new();
    let mut open: Vec<(Field, Vec<Entity>)> = Vec::new();

    for field in fields {
        if field.is_name("BEGIN") {
            tracing::trace!(kind = field.raw_value(), depth = open.len(), "Opening block");
            open.push((field, Vec::new()));
        } else if field.is_name("END") {
            let end_kind = field.raw_value().unwrap_or_default();
            let Some((begin, children)) = open.pop() else {
                tracing::warn!(kind = end_kind, "END without BEGIN");
                return Err(DirInfoError::UnmatchedEnd(end_kind.to_string()));
            };

            let begin_kind = begin.raw_value().unwrap_or_default();
            if !begin_kind.eq_ignore_ascii_case(end_kind) {
                tracing::warn!(begin = begin_kind, end = end_kind, "Mismatched BEGIN/END");
                return Err(DirInfoError::MismatchedBeginEnd {
                    begin: begin_kind.to_string(),
                    end: end_kind.to_string(),
                });
            }

            let block = Entity::Block(Block {
                begin,
                children,
                end: field,
            });
            match open.last_mut() {
                Some((_, parent)) => parent.push(block),
                None => root.push(block),
            }
        } else {
            let leaf = Entity::Field(field);
            match open.last_mut() {
                Some((_, parent)) => parent.push(leaf),
                None => root.push(leaf),
            }
        }
    }

    if let Some((begin, _)) = open.last() {
        let kind = begin.raw_value().unwrap_or_default();
        tracing::warn!(kind, "Unclosed block at end of input");
        return Err(DirInfoError::UnclosedBlock(kind.to_string()));
    }

    tracing::debug!(count = root.len(), "Expanded entities");

    Ok(root)
}

/// Partitions one level of entities into leaf fields and nested blocks,
/// each in order.
#[must_use]
pub fn split_outer_inner(level: &[Entity]) -> (Vec<&Field>, Vec<&Block>) {
    let mut outer = Vec::new();
    let mut inner = Vec::new();

    for entity in level {
        match entity {
            Entity::Field(f) => outer.push(f),
            Entity::Block(b) => inner.push(b),
        }
    }

    (outer, inner)
}

fn flatten_into<'a>(level: &'a [Entity], out: &mut Vec<&'a Field>) {
    for entity in level {
        match entity {
            Entity::Field(f) => out.push(f),
            Entity::Block(b) => {
                out.push(&b.begin);
                flatten_into(&b.children, out);
                out.push(&b.end);
            }
        }
    }
}
