//! Partitioning a resolved graph into ordered compile units.
//!
//! Every `@root` file (and the entry itself) opens one compile unit; the
//! files between two boundaries are inlined into the nearer unit,
//! dependency-first. Output order is script-load order, so the walk is
//! deterministic by construction.

use std::collections::VecDeque;
use std::sync::Arc;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::annotation::AnnotationKind;
use crate::node::DependencyNode;

/// One ordered compile unit.
///
/// `dependencies` lists the scripts to concatenate, dependency-first with
/// the unit's own defining file last. `packages` are the `@root` boundaries
/// this unit references as separately compiled units. `no_compile_paths`
/// is the subset of `dependencies` exempt from minification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencySet {
    pub stylesheets: Vec<String>,
    pub packages: Vec<String>,
    pub dependencies: Vec<String>,
    pub no_compile_paths: Vec<String>,
}

impl DependencySet {
    /// The unit's defining file: the last dependency entry.
    pub fn defining_path(&self) -> Option<&str> {
        self.dependencies.last().map(String::as_str)
    }
}

/// Walk a resolved graph into an ordered, deduplicated list of compile
/// units. The root node is an implicit package boundary.
///
/// Units are discovered root-first but compiled dependency-first, so the
/// list is reversed before structural duplicates are dropped (first-seen
/// order after reversal wins).
pub fn partition(root: &Arc<DependencyNode>) -> Vec<DependencySet> {
    let mut frontier: VecDeque<Arc<DependencyNode>> = VecDeque::new();
    let mut scheduled: FxHashSet<String> = FxHashSet::default();

    scheduled.insert(root.path.clone());
    frontier.push_back(root.clone());

    let mut units = Vec::new();
    while let Some(boundary) = frontier.pop_front() {
        let mut unit = DependencySet::default();
        let mut emitted = FxHashSet::default();
        collect(&boundary, &mut unit, &mut emitted, &mut frontier, &mut scheduled);
        units.push(unit);
    }

    units.reverse();
    let units = drop_structural_duplicates(units);
    debug!(units = units.len(), "partitioned dependency graph");
    units
}

/// Accumulate one node into the current unit, children first. A child that
/// is a package boundary is referenced and queued, never inlined; a node
/// already emitted in this unit is skipped so shared dependencies appear
/// once.
fn collect(
    node: &Arc<DependencyNode>,
    unit: &mut DependencySet,
    emitted: &mut FxHashSet<String>,
    frontier: &mut VecDeque<Arc<DependencyNode>>,
    scheduled: &mut FxHashSet<String>,
) {
    if !emitted.insert(node.path.clone()) {
        return;
    }

    for entry in &node.order {
        match entry.kind {
            AnnotationKind::Require => {
                let child = &node.children[entry.index];
                if child.is_root {
                    if !unit.packages.contains(&child.path) {
                        unit.packages.push(child.path.clone());
                    }
                    if scheduled.insert(child.path.clone()) {
                        frontier.push_back(child.clone());
                    }
                } else {
                    collect(child, unit, emitted, frontier, scheduled);
                }
            }
            AnnotationKind::RequireStyle => {
                let stylesheet = &node.stylesheet_refs[entry.index];
                if !unit.stylesheets.contains(stylesheet) {
                    unit.stylesheets.push(stylesheet.clone());
                }
            }
            // The resolver only records require/requireStyle order kinds.
            _ => {}
        }
    }

    unit.dependencies.push(node.path.clone());
    if node.is_no_compile {
        unit.no_compile_paths.push(node.path.clone());
    }
}

fn drop_structural_duplicates(units: Vec<DependencySet>) -> Vec<DependencySet> {
    let mut kept: Vec<DependencySet> = Vec::with_capacity(units.len());
    for unit in units {
        if !kept.contains(&unit) {
            kept.push(unit);
        }
    }
    kept
}
