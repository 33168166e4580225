use bstr::{BStr, BString, ByteSlice};
use ugit_hash::ObjectId;

use crate::ObjectError;

/// The kind of a tree entry's referent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Blob,
    Tree,
}

impl EntryKind {
    fn as_bytes(&self) -> &'static [u8] {
        match self {
            Self::Blob => b"blob",
            Self::Tree => b"tree",
        }
    }

    fn from_bytes(s: &[u8]) -> Result<Self, ObjectError> {
        match s {
            b"blob" => Ok(Self::Blob),
            b"tree" => Ok(Self::Tree),
            _ => Err(ObjectError::InvalidTreeEntry {
                offset: 0,
                reason: format!("unknown entry kind {:?}", BString::from(s)),
            }),
        }
    }
}

/// A single entry in a tree object: `kind SP oid SP name LF`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub kind: EntryKind,
    pub oid: ObjectId,
    pub name: BString,
}

fn validate_name(name: &[u8], offset: usize) -> Result<(), ObjectError> {
    if name.is_empty() || name == b"." || name == b".." || name.contains(&b'/') {
        return Err(ObjectError::InvalidTreeEntry {
            offset,
            reason: format!("invalid entry name {:?}", BString::from(name)),
        });
    }
    Ok(())
}

/// A tree object — an ordered directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tree {
    pub entries: Vec<TreeEntry>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse tree content: one `kind SP oid SP name LF` line per entry.
    pub fn parse(content: &[u8]) -> Result<Self, ObjectError> {
        let mut entries = Vec::new();
        let mut pos = 0;

        while pos < content.len() {
            let line_end = content[pos..]
                .iter()
                .position(|&b| b == b'\n')
                .map(|p| p + pos)
                .ok_or_else(|| ObjectError::InvalidTreeEntry {
                    offset: pos,
                    reason: "entry missing trailing newline".into(),
                })?;
            let line = &content[pos..line_end];

            let first_sp = line.iter().position(|&b| b == b' ').ok_or_else(|| {
                ObjectError::InvalidTreeEntry {
                    offset: pos,
                    reason: "missing space after kind".into(),
                }
            })?;
            let kind = EntryKind::from_bytes(&line[..first_sp]).map_err(|_| {
                ObjectError::InvalidTreeEntry {
                    offset: pos,
                    reason: "unknown entry kind".into(),
                }
            })?;

            let rest = &line[first_sp + 1..];
            let second_sp = rest.iter().position(|&b| b == b' ').ok_or_else(|| {
                ObjectError::InvalidTreeEntry {
                    offset: pos,
                    reason: "missing space after oid".into(),
                }
            })?;
            let oid_hex = std::str::from_utf8(&rest[..second_sp]).map_err(|_| {
                ObjectError::InvalidTreeEntry {
                    offset: pos,
                    reason: "oid is not valid utf-8".into(),
                }
            })?;
            let oid = ObjectId::from_hex(oid_hex).map_err(|e| ObjectError::InvalidTreeEntry {
                offset: pos,
                reason: e.to_string(),
            })?;

            let name = &rest[second_sp + 1..];
            validate_name(name, pos)?;

            entries.push(TreeEntry {
                kind,
                oid,
                name: BString::from(name),
            });
            pos = line_end + 1;
        }

        Ok(Self { entries })
    }

    /// Serialize in canonical sorted-by-name order.
    pub fn serialize_content(&self) -> Vec<u8> {
        let mut sorted: Vec<&TreeEntry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));

        let mut out = Vec::new();
        for entry in sorted {
            out.extend_from_slice(entry.kind.as_bytes());
            out.push(b' ');
            out.extend_from_slice(entry.oid.to_hex().as_bytes());
            out.push(b' ');
            out.extend_from_slice(&entry.name);
            out.push(b'\n');
        }
        out
    }

    pub fn sort(&mut self) {
        self.entries.sort_by(|a, b| a.name.cmp(&b.name));
    }

    pub fn find(&self, name: &BStr) -> Option<&TreeEntry> {
        self.entries.iter().find(|e| e.name.as_bstr() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TreeEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
