//! Application orchestrator.
//! Builds config from CLI flags, initializes logging, resolves the repository
//! root and runs the retail plan.

use anyhow::Result;
use std::io;
use tracing::{debug, error, info};

use retail_flatten::cli::Args;
use retail_flatten::fs_ops::io_hint;
use retail_flatten::output as out;
use retail_flatten::{Config, FlattenError, Flattener, resolve_repository_root, retail_plan};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    let mut cfg = Config::default();
    args.apply_overrides(&mut cfg);

    if let Some(raw) = args.log_level.as_deref()
        && args.effective_log_level().is_none()
    {
        out::print_warn(&format!("Ignoring unknown log level '{raw}'; using {}", cfg.log_level));
    }

    init_tracing(&cfg.log_level, cfg.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {}", e));
        e
    })?;
    debug!("Starting retail-flatten: {:?}", args);

    let result = resolve_repository_root(&cfg).and_then(|root| {
        Flattener::new(root)
            .dry_run(cfg.dry_run)
            .run(&retail_plan())
    });

    match result {
        Ok(report) => {
            if cfg.dry_run {
                out::print_info("Dry-run: no files or directories were changed.");
            }
            info!(
                moved = report.moved(),
                skipped = report.skipped(),
                noop = report.is_noop(),
                "Run finished"
            );
            Ok(())
        }
        Err(e) => {
            report_failure(&e);
            Err(e)
        }
    }
}

fn report_failure(e: &anyhow::Error) {
    let Some(fe) = e.downcast_ref::<FlattenError>() else {
        error!(error = ?e, "Flattening failed");
        return;
    };
    let code = fe.code();
    match fe {
        FlattenError::MoveFailed { op, src, dst, source } => {
            error!(code, kind = fe.kind(), op, src = %src.display(), dest = %dst.display(), error = %source, "Move failed; remaining steps aborted");
            print_hint(source);
            out::print_error("Stopped before the remaining steps. Fix the cause above and re-run; completed steps will be skipped.");
        }
        FlattenError::ReadDirFailed { path, source } => {
            error!(code, kind = fe.kind(), path = %path.display(), error = %source, "Cannot list directory; remaining steps aborted");
            print_hint(source);
        }
        FlattenError::RootInvalid(root) => {
            error!(code, kind = fe.kind(), root = %root.display(), "Repository root invalid");
            out::print_error("Pass --root <DIR> to point at the repository checkout.");
        }
        FlattenError::RootUnresolved(reason) => {
            error!(code, kind = fe.kind(), %reason, "Repository root unresolved");
            out::print_error("Pass --root <DIR> to point at the repository checkout.");
        }
    }
}

fn print_hint(source: &io::Error) {
    if let Some(hint) = io_hint(source) {
        out::print_error(&format!("hint: {hint}"));
    }
}
