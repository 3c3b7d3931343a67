use crate::conditional::BlockTree;
use crate::design::CardDesign;
use crate::render::Face;
use crate::substitute::is_known_field;
use crate::token::{scan, Segment, TagKind};
use thiserror::Error;

/// Something in a template that renders, but probably not the way the
/// author intended. Rendering never fails on these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateIssue {
    #[error("Block '{name}' is opened but never closed")]
    UnclosedBlock { name: String },

    #[error("Closing tag for '{name}' has no matching opening tag")]
    UnmatchedClose { name: String },

    #[error("Unknown placeholder '{name}' will be shown as written")]
    UnknownPlaceholder { name: String },
}

/// Collect the issues in a single template.
pub fn check_template(template: &str) -> Vec<TemplateIssue> {
    let mut issues = BlockTree::parse(template).issues;
    let mut unknown: Vec<&str> = Vec::new();

    for segment in scan(template) {
        if let Segment::Tag(tag) = segment {
            if let TagKind::Field { name } = tag.kind() {
                if !is_known_field(name) && !unknown.contains(&name) {
                    unknown.push(name);
                }
            }
        }
    }

    issues.extend(unknown.into_iter().map(|name| TemplateIssue::UnknownPlaceholder {
        name: name.to_string(),
    }));
    issues
}

/// Collect the issues in both faces of a design.
pub fn check_design(design: &CardDesign) -> Vec<(Face, TemplateIssue)> {
    [Face::Front, Face::Back]
        .into_iter()
        .flat_map(|face| {
            check_template(design.template(face))
                .into_iter()
                .map(move |issue| (face, issue))
        })
        .collect()
}
