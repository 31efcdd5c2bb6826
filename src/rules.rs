//! Relocation rules and the compiled-in retail plan.

use std::fmt;
use std::path::PathBuf;

/// How a rule treats an already-existing destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveMode {
    /// Destination present: skip the whole rule. Absent: rename the subtree.
    OverwriteForbiddenDirectoryMove,
    /// Destination present: move each child that does not collide, then
    /// drop the source if it ended up empty. Absent: rename the subtree.
    MergeChildren,
}

impl fmt::Display for MoveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MoveMode::OverwriteForbiddenDirectoryMove => "move",
            MoveMode::MergeChildren => "merge",
        })
    }
}

/// One relocation, with paths relative to the repository root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRule {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub mode: MoveMode,
}

impl MoveRule {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>, mode: MoveMode) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            mode,
        }
    }

    pub fn merge(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self::new(source, destination, MoveMode::MergeChildren)
    }

    pub fn move_dir(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self::new(source, destination, MoveMode::OverwriteForbiddenDirectoryMove)
    }
}

/// Ordered rules followed by ordered cleanup directories (innermost first).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    pub rules: Vec<MoveRule>,
    pub cleanup: Vec<PathBuf>,
}

impl Plan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rule(mut self, rule: MoveRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn cleanup(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cleanup.push(dir.into());
        self
    }
}

pub const NESTED_ROOT: &str = "apps/retail-api/apps";

/// The retail-api flattening plan. Later rules do not rely on earlier ones;
/// each re-checks the tree, so partial or repeated runs are safe.
pub fn retail_plan() -> Plan {
    Plan::new()
        .rule(MoveRule::merge("apps/retail-api/apps/api/src", "apps/retail-api/src"))
        .rule(MoveRule::merge("apps/retail-api/apps/api/scripts", "apps/retail-api/scripts"))
        .rule(MoveRule::move_dir("apps/retail-api/apps/worker", "apps/retail-worker"))
        .rule(MoveRule::move_dir("apps/retail-api/apps/web", "apps/retail-web-legacy"))
        .cleanup("apps/retail-api/apps/api")
        .cleanup(NESTED_ROOT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn retail_plan_order() {
        let plan = retail_plan();
        let modes: Vec<_> = plan.rules.iter().map(|r| r.mode).collect();
        assert_eq!(
            modes,
            [
                MoveMode::MergeChildren,
                MoveMode::MergeChildren,
                MoveMode::OverwriteForbiddenDirectoryMove,
                MoveMode::OverwriteForbiddenDirectoryMove,
            ]
        );
        assert_eq!(plan.rules[3].destination, Path::new("apps/retail-web-legacy"));
        assert_eq!(
            plan.cleanup,
            [PathBuf::from("apps/retail-api/apps/api"), PathBuf::from(NESTED_ROOT)]
        );
    }

    #[test]
    fn cleanup_is_innermost_first() {
        let plan = retail_plan();
        for pair in plan.cleanup.windows(2) {
            assert!(pair[0].starts_with(&pair[1]));
        }
    }

    #[test]
    fn rule_paths_are_relative() {
        for r in retail_plan().rules {
            assert!(r.source.is_relative() && r.destination.is_relative(), "{r:?}");
        }
    }
}
