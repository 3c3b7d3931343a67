//! Conditional sections: `{{#name}}...{{/name}}` and `{{^name}}...{{/name}}`.
//!
//! Blocks are parsed with an explicit stack into a flat node list where each
//! block records the index its content ends at. A close tag closes the
//! nearest still-open block of the same name; blocks opened inside it and
//! never closed stay in place as literal text. Close tags with no open block
//! are literal text as well.

use crate::record::FieldRecord;
use crate::token::{scan, Segment, TagKind};
use crate::validator::TemplateIssue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Node<'a> {
    Text(&'a str),
    /// Opens a block whose content is `nodes[index + 1..end]`.
    Block {
        name: &'a str,
        negated: bool,
        end: usize,
    },
}

struct Frame<'a> {
    name: &'a str,
    negated: bool,
    /// Position of the open tag in the node list.
    index: usize,
}

pub(crate) struct BlockTree<'a> {
    nodes: Vec<Node<'a>>,
    pub(crate) issues: Vec<TemplateIssue>,
}

impl<'a> BlockTree<'a> {
    pub(crate) fn parse(src: &'a str) -> Self {
        let mut nodes: Vec<Node<'a>> = Vec::new();
        let mut stack: Vec<Frame<'a>> = Vec::new();
        let mut issues = Vec::new();

        for segment in scan(src) {
            let tag = match segment {
                Segment::Text(text) => {
                    nodes.push(Node::Text(text));
                    continue;
                }
                Segment::Tag(tag) => tag,
            };

            match tag.kind() {
                TagKind::Open { name, negated } => {
                    // Literal until a matching close turns it into a block.
                    stack.push(Frame {
                        name,
                        negated,
                        index: nodes.len(),
                    });
                    nodes.push(Node::Text(tag.raw));
                }
                TagKind::Close { name } => {
                    let Some(pos) = stack.iter().rposition(|f| f.name == name) else {
                        tracing::debug!(block = name, "close tag without a matching open tag");
                        issues.push(TemplateIssue::UnmatchedClose {
                            name: name.to_string(),
                        });
                        nodes.push(Node::Text(tag.raw));
                        continue;
                    };

                    for frame in stack.drain(pos + 1..).rev() {
                        unclosed(frame, &mut issues);
                    }
                    if let Some(frame) = stack.pop() {
                        let end = nodes.len();
                        nodes[frame.index] = Node::Block {
                            name: frame.name,
                            negated: frame.negated,
                            end,
                        };
                    }
                }
                _ => nodes.push(Node::Text(tag.raw)),
            }
        }

        while let Some(frame) = stack.pop() {
            unclosed(frame, &mut issues);
        }

        BlockTree { nodes, issues }
    }

    pub(crate) fn evaluate(&self, record: &FieldRecord) -> String {
        let mut out = String::new();
        let mut i = 0;

        while let Some(node) = self.nodes.get(i) {
            match *node {
                Node::Text(text) => {
                    out.push_str(text);
                    i += 1;
                }
                Node::Block {
                    name,
                    negated,
                    end,
                } => {
                    i = if record.is_truthy(name) != negated {
                        i + 1
                    } else {
                        end
                    };
                }
            }
        }

        out
    }
}

fn unclosed(frame: Frame<'_>, issues: &mut Vec<TemplateIssue>) {
    tracing::debug!(block = frame.name, "open tag is never closed");
    issues.push(TemplateIssue::UnclosedBlock {
        name: frame.name.to_string(),
    });
}

/// Keep or drop conditional sections according to `record`.
///
/// A `#` block is kept when the field is truthy, a `^` block when it is not.
/// Kept blocks lose their delimiters and their content is evaluated in turn;
/// dropped blocks vanish with everything inside them.
pub fn evaluate(html: &str, record: &FieldRecord) -> String {
    BlockTree::parse(html).evaluate(record)
}
