//! Plan execution.
//!
//! Applies a [`Plan`] against a repository root, one rule at a time and in
//! order. Every rule re-checks the tree before acting, so a run over a
//! partially flattened (or fully flattened) tree only reports skips.
//!
//! Expected conditions (missing source, collision, non-empty leftovers) are
//! recorded as [`Outcome`]s. Only an I/O failure while moving an existing,
//! non-colliding entry is returned as an error, and it stops the run.

use anyhow::Result;
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::errors::FlattenError;
use crate::fs_ops::{entry_exists, is_real_dir, list_children, relocate, remove_dir_if_empty};
use crate::output as out;
use crate::rules::{MoveMode, MoveRule, Plan, retail_plan};

/// Result of one sub-step. Paths are relative to the repository root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Moved { src: PathBuf, dst: PathBuf },
    MovedChild { src: PathBuf, dst: PathBuf },
    SkippedChild { src: PathBuf, dst: PathBuf },
    DestinationExists { src: PathBuf, dst: PathBuf },
    SourceNotFound { src: PathBuf },
    RemovedDir { dir: PathBuf },
    WouldMove { src: PathBuf, dst: PathBuf },
    WouldMoveChild { src: PathBuf, dst: PathBuf },
    WouldRemoveDir { dir: PathBuf },
}

impl Outcome {
    pub fn is_move(&self) -> bool {
        matches!(self, Outcome::Moved { .. } | Outcome::MovedChild { .. })
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, Outcome::SkippedChild { .. } | Outcome::DestinationExists { .. })
    }

    pub fn is_dry_run(&self) -> bool {
        matches!(
            self,
            Outcome::WouldMove { .. } | Outcome::WouldMoveChild { .. } | Outcome::WouldRemoveDir { .. }
        )
    }

    fn emit(&self) {
        let line = self.to_string();
        match self {
            Outcome::Moved { .. } | Outcome::MovedChild { .. } | Outcome::RemovedDir { .. } => {
                out::print_success(&line)
            }
            Outcome::SkippedChild { .. } | Outcome::DestinationExists { .. } => out::print_skip(&line),
            Outcome::SourceNotFound { .. }
            | Outcome::WouldMove { .. }
            | Outcome::WouldMoveChild { .. }
            | Outcome::WouldRemoveDir { .. } => out::print_info(&line),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Moved { src, dst } => write!(f, "Moved {} -> {}", src.display(), dst.display()),
            Outcome::MovedChild { src, dst } => {
                write!(f, "  Moved {} -> {}", src.display(), dst.display())
            }
            Outcome::SkippedChild { dst, .. } => {
                write!(f, "  Skipping {} (already exists)", dst.display())
            }
            Outcome::DestinationExists { dst, .. } => write!(f, "{} already exists", dst.display()),
            Outcome::SourceNotFound { src } => write!(f, "{} not found", src.display()),
            Outcome::RemovedDir { dir } => write!(f, "Removed empty directory {}", dir.display()),
            Outcome::WouldMove { src, dst } => {
                write!(f, "dry-run: would move {} -> {}", src.display(), dst.display())
            }
            Outcome::WouldMoveChild { src, dst } => {
                write!(f, "  dry-run: would move {} -> {}", src.display(), dst.display())
            }
            Outcome::WouldRemoveDir { dir } => {
                write!(f, "dry-run: would remove {} if empty", dir.display())
            }
        }
    }
}

/// Ordered outcomes of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    outcomes: Vec<Outcome>,
}

impl Report {
    fn record(&mut self, outcome: Outcome) {
        outcome.emit();
        debug!(outcome = ?outcome, "step");
        self.outcomes.push(outcome);
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    pub fn moved(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_move()).count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_skip()).count()
    }

    pub fn not_found(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, Outcome::SourceNotFound { .. }))
            .count()
    }

    pub fn removed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, Outcome::RemovedDir { .. }))
            .count()
    }

    /// True when the run changed nothing on disk and planned nothing.
    pub fn is_noop(&self) -> bool {
        self.outcomes
            .iter()
            .all(|o| matches!(o, Outcome::SourceNotFound { .. }) || o.is_skip())
    }
}

/// Executes a [`Plan`] below a repository root.
#[derive(Debug, Clone)]
pub struct Flattener {
    root: PathBuf,
    dry_run: bool,
}

impl Flattener {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            dry_run: false,
        }
    }

    /// Report what would happen without touching the filesystem.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn run(&self, plan: &Plan) -> Result<Report> {
        if !self.root.is_dir() {
            return Err(FlattenError::RootInvalid(self.root.clone()).into());
        }
        info!(
            root = %self.root().display(),
            rules = plan.rules.len(),
            dry_run = self.dry_run,
            "Flattening start"
        );
        out::print_user(&format!("Flattening nested layout under {}...", self.root().display()));

        let mut report = Report::default();
        // Dry-run only: absolute paths that the planned moves would empty out.
        let mut vacated = BTreeSet::new();
        for rule in &plan.rules {
            out::print_user("");
            self.apply_rule(rule, &mut report, &mut vacated)?;
        }

        out::print_user("");
        for dir in &plan.cleanup {
            self.cleanup_dir(dir, &mut report, &mut vacated);
        }

        info!(
            moved = report.moved(),
            skipped = report.skipped(),
            not_found = report.not_found(),
            removed = report.removed(),
            "Flattening complete"
        );
        out::print_success(&format!(
            "Flattening complete: {} moved, {} skipped, {} not found, {} directories removed",
            report.moved(),
            report.skipped(),
            report.not_found(),
            report.removed()
        ));
        Ok(report)
    }

    fn apply_rule(&self, rule: &MoveRule, report: &mut Report, vacated: &mut BTreeSet<PathBuf>) -> Result<()> {
        let src = self.root.join(&rule.source);
        let dst = self.root.join(&rule.destination);
        debug!(src = %src.display(), dest = %dst.display(), mode = %rule.mode, "applying rule");

        if !entry_exists(&src) {
            report.record(Outcome::SourceNotFound {
                src: rule.source.clone(),
            });
            return Ok(());
        }

        if !entry_exists(&dst) {
            let (src_rel, dst_rel) = (rule.source.clone(), rule.destination.clone());
            if self.dry_run {
                report.record(Outcome::WouldMove { src: src_rel, dst: dst_rel });
                vacated.insert(src);
            } else {
                relocate(&src, &dst)?;
                report.record(Outcome::Moved { src: src_rel, dst: dst_rel });
            }
            return Ok(());
        }

        match rule.mode {
            MoveMode::OverwriteForbiddenDirectoryMove => {
                warn!(dest = %dst.display(), "destination exists; rule skipped");
                report.record(Outcome::DestinationExists {
                    src: rule.source.clone(),
                    dst: rule.destination.clone(),
                });
            }
            MoveMode::MergeChildren => {
                if !is_real_dir(&src) || !is_real_dir(&dst) {
                    // Nothing to merge into or out of; treat as a whole-rule collision.
                    warn!(src = %src.display(), dest = %dst.display(), "merge needs two directories; rule skipped");
                    report.record(Outcome::DestinationExists {
                        src: rule.source.clone(),
                        dst: rule.destination.clone(),
                    });
                    return Ok(());
                }
                self.merge_children(rule, &src, &dst, report, vacated)?;
            }
        }
        Ok(())
    }

    fn merge_children(
        &self,
        rule: &MoveRule,
        src: &Path,
        dst: &Path,
        report: &mut Report,
        vacated: &mut BTreeSet<PathBuf>,
    ) -> Result<()> {
        let mut collisions = 0usize;
        for child in list_children(src)? {
            let Some(name) = child.file_name() else {
                continue;
            };
            let target = dst.join(name);
            let src_rel = rule.source.join(name);
            let dst_rel = rule.destination.join(name);

            if entry_exists(&target) {
                collisions += 1;
                warn!(dest = %target.display(), "child already exists; skipped");
                report.record(Outcome::SkippedChild { src: src_rel, dst: dst_rel });
            } else if self.dry_run {
                report.record(Outcome::WouldMoveChild { src: src_rel, dst: dst_rel });
                vacated.insert(child.clone());
            } else {
                relocate(&child, &target)?;
                report.record(Outcome::MovedChild { src: src_rel, dst: dst_rel });
            }
        }

        if self.dry_run {
            if collisions == 0 {
                report.record(Outcome::WouldRemoveDir {
                    dir: rule.source.clone(),
                });
                vacated.insert(src.to_path_buf());
            }
        } else if remove_dir_if_empty(src) {
            report.record(Outcome::RemovedDir {
                dir: rule.source.clone(),
            });
        }
        Ok(())
    }

    fn cleanup_dir(&self, dir: &Path, report: &mut Report, vacated: &mut BTreeSet<PathBuf>) {
        let abs = self.root.join(dir);
        if self.dry_run {
            if would_be_empty(&abs, vacated) {
                report.record(Outcome::WouldRemoveDir {
                    dir: dir.to_path_buf(),
                });
                vacated.insert(abs);
            }
            return;
        }
        if remove_dir_if_empty(&abs) {
            report.record(Outcome::RemovedDir {
                dir: dir.to_path_buf(),
            });
        }
    }
}

/// True if `dir` is a directory whose every child is already planned to move away.
fn would_be_empty(dir: &Path, vacated: &BTreeSet<PathBuf>) -> bool {
    if !is_real_dir(dir) {
        return false;
    }
    list_children(dir)
        .map(|children| children.iter().all(|c| vacated.contains(c)))
        .unwrap_or(false)
}

/// Apply the retail plan below `repository_root`.
pub fn run(repository_root: &Path) -> Result<Report> {
    Flattener::new(repository_root).run(&retail_plan())
}
