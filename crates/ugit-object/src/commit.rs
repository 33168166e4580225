use bstr::{BStr, BString, ByteSlice};
use ugit_hash::ObjectId;

use crate::ObjectError;

/// A commit object: a tree, zero or more parents, and a message.
///
/// No author/committer identity or timestamps are recorded — this history
/// engine tracks parentage, not provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub tree: ObjectId,
    /// Parent OIDs in merge order: first parent is the previous HEAD,
    /// second parent (if any) is the merged-in side.
    pub parents: Vec<ObjectId>,
    /// Message bytes, verbatim, including any trailing newline.
    pub message: BString,
}

impl Commit {
    pub fn new(tree: ObjectId, parents: Vec<ObjectId>, message: impl Into<BString>) -> Self {
        Self {
            tree,
            parents,
            message: message.into(),
        }
    }

    /// Parse commit content: headers, a blank line, then the message.
    pub fn parse(content: &[u8]) -> Result<Self, ObjectError> {
        let mut tree: Option<ObjectId> = None;
        let mut parents = Vec::new();

        let mut pos = 0;
        loop {
            if pos >= content.len() {
                break;
            }
            if content[pos] == b'\n' {
                pos += 1;
                break;
            }

            let line_end = content[pos..]
                .iter()
                .position(|&b| b == b'\n')
                .map(|p| p + pos)
                .unwrap_or(content.len());
            let line = &content[pos..line_end];

            let space = line.iter().position(|&b| b == b' ').ok_or_else(|| {
                ObjectError::UnknownCommitHeader(BString::from(line))
            })?;
            let key = &line[..space];
            let value = &line[space + 1..];
            let hex = std::str::from_utf8(value).map_err(|_| {
                ObjectError::UnknownCommitHeader(BString::from(key))
            })?;

            match key {
                b"tree" => tree = Some(ObjectId::from_hex(hex)?),
                b"parent" => parents.push(ObjectId::from_hex(hex)?),
                _ => return Err(ObjectError::UnknownCommitHeader(BString::from(key))),
            }

            pos = line_end + 1;
        }

        let tree = tree.ok_or(ObjectError::MissingCommitField { field: "tree" })?;
        let message = BString::from(&content[pos..]);

        Ok(Self {
            tree,
            parents,
            message,
        })
    }

    /// Serialize to `tree <oid>\n` + `parent <oid>\n`* + blank line + message.
    pub fn serialize_content(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(b"tree ");
        out.extend_from_slice(self.tree.to_hex().as_bytes());
        out.push(b'\n');
        for parent in &self.parents {
            out.extend_from_slice(b"parent ");
            out.extend_from_slice(parent.to_hex().as_bytes());
            out.push(b'\n');
        }
        out.push(b'\n');
        out.extend_from_slice(&self.message);
        out
    }

    pub fn first_parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// The first line of the message.
    pub fn summary(&self) -> &BStr {
        let msg: &[u8] = self.message.as_ref();
        match msg.find_byte(b'\n') {
            Some(pos) => BStr::new(&msg[..pos]),
            None => BStr::new(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TREE_HEX: &str = "da39a3ee5e6b4b0d3255bfef95601890afd80709";
    const PARENT_HEX: &str = "0000000000000000000000000000000000000001";

    fn sample_bytes() -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(format!("tree {TREE_HEX}\n").as_bytes());
        out.extend_from_slice(format!("parent {PARENT_HEX}\n").as_bytes());
        out.extend_from_slice(b"\nfirst\n");
        out
    }

    #[test]
    fn parse_commit_with_parent() {
        let commit = Commit::parse(&sample_bytes()).unwrap();
        assert_eq!(commit.tree.to_hex(), TREE_HEX);
        assert_eq!(commit.parents.len(), 1);
        assert_eq!(commit.message.as_bytes(), b"first\n");
    }

    #[test]
    fn parse_root_commit_has_no_parents() {
        let data = format!("tree {TREE_HEX}\n\nroot\n");
        let commit = Commit::parse(data.as_bytes()).unwrap();
        assert!(commit.is_root());
        assert!(!commit.is_merge());
    }

    #[test]
    fn parse_merge_commit_has_two_parents() {
        let data = format!(
            "tree {TREE_HEX}\nparent {PARENT_HEX}\nparent {PARENT_HEX}\n\nMerge\n"
        );
        let commit = Commit::parse(data.as_bytes()).unwrap();
        assert!(commit.is_merge());
        assert_eq!(commit.parents.len(), 2);
    }

    #[test]
    fn serialize_roundtrip() {
        let original = sample_bytes();
        let commit = Commit::parse(&original).unwrap();
        assert_eq!(commit.serialize_content(), original);
    }

    #[test]
    fn missing_tree_is_an_error() {
        let data = b"parent 0000000000000000000000000000000000000001\n\nmsg\n";
        assert!(Commit::parse(data).is_err());
    }

    #[test]
    fn unknown_header_is_an_error() {
        let data = format!("tree {TREE_HEX}\nauthor somebody\n\nmsg\n");
        assert!(Commit::parse(data.as_bytes()).is_err());
    }

    #[test]
    fn summary_is_first_line() {
        let commit = Commit::parse(&sample_bytes()).unwrap();
        assert_eq!(commit.summary().as_bytes(), b"first");
    }
}
