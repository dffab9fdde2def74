pub mod pattern;
pub(crate) mod symbol;
pub(crate) mod treesitter;

use std::fs;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use tracing::{debug, warn};

use crate::budget::{Flow, ResultAccumulator};
use crate::classify::determine_match_kind;
use crate::config::Config;
use crate::context::{CompilationContext, detect_lang};
use crate::error::NavtoError;
use crate::types::{MatchKind, NavigateToItem, SourceFile};
use pattern::PatternMatcher;

// Always skipped: build output, vendored dependencies and VCS state.
// .gitignore is not consulted, so gitignored sources are still searched.
pub(crate) const SKIP_DIRS: &[&str] = &[
    ".git",
    "node_modules",
    "target",
    "dist",
    "build",
    "__pycache__",
    "vendor",
    ".next",
    "coverage",
    ".cache",
    ".venv",
    ".mypy_cache",
    ".pytest_cache",
    ".turbo",
    ".svelte-kit",
    "out",
    ".gradle",
    ".idea",
];

/// Skip minified bundles and generated blobs.
const MAX_FILE_BYTES: u64 = 500_000;

/// Navigate-to: every identifier in `files` that matches `search_value`,
/// in file order then document order, deduplicated by (name, container)
/// and capped by the budget left for `search_value` in the context's ledger.
///
/// Never fails. An empty or invalid pattern, or a budget already spent,
/// yields an empty list.
pub fn get_navigate_to_items(
    context: &CompilationContext,
    files: &[SourceFile],
    max_result_count: usize,
    search_value: &str,
    case_sensitive: bool,
) -> Vec<NavigateToItem> {
    if search_value.is_empty() {
        return Vec::new();
    }
    let matcher = PatternMatcher::new(search_value, case_sensitive);
    if !matcher.is_valid() {
        return Vec::new();
    }

    // Held until the new count is recorded: same-string calls serialize.
    let slot = context.ledger().slot(search_value);
    let mut emitted = slot.lock();
    if *emitted >= max_result_count {
        debug!(search_value, emitted = *emitted, "budget already spent");
        return Vec::new();
    }

    let mut acc = ResultAccumulator::new(max_result_count - *emitted);
    let mut stopped = false;

    'files: for file in files {
        for entry in symbol::symbols_in_file(context, file) {
            let match_kind = determine_match_kind(&entry.name, &matcher);
            if match_kind == MatchKind::None {
                continue;
            }
            let item = NavigateToItem {
                name: entry.name,
                kind: entry.kind,
                match_kind,
                // Always true, whatever the query's case sensitivity.
                is_case_sensitive: true,
                file_name: file.file_path.clone(),
                container_name: entry.container_name,
                container_kind: entry.container_kind,
                text_span: entry.span,
            };
            if acc.try_emit(item) == Flow::Stop {
                debug!(search_value, file = %file.file_path, "budget exhausted, stopping scan");
                stopped = true;
                break 'files;
            }
        }
    }

    // Stopping means the budget hit zero, so this saturates at the maximum.
    *emitted = max_result_count - acc.remaining();
    let results = acc.into_results();
    debug!(
        search_value,
        found = results.len(),
        emitted = *emitted,
        stopped,
        "navigate-to finished"
    );
    results
}

/// Discover source files under `paths`, load them and run navigate-to.
/// Errors only for missing paths or bad globs; unreadable files are skipped.
pub fn navigate_paths(
    context: &CompilationContext,
    search_value: &str,
    paths: &[PathBuf],
    config: &Config,
) -> Result<Vec<NavigateToItem>, NavtoError> {
    let found = discover_files(paths, &config.globs, &config.skip_dirs)?;

    // Skip parsing when the answer is already known to be empty.
    if context.ledger().emitted(search_value) >= config.max_results {
        return Ok(Vec::new());
    }

    let files = load_sources(&found);
    context.prepare(&files);
    Ok(get_navigate_to_items(
        context,
        &files,
        config.max_results,
        search_value,
        config.case_sensitive,
    ))
}

/// Source files under `paths`, in a stable order: paths as given, directory
/// entries sorted by name. Explicit file paths are kept even without a
/// known extension; walked files need a grammar and must match `globs`.
pub fn discover_files(
    paths: &[PathBuf],
    globs: &[String],
    skip_dirs: &[String],
) -> Result<Vec<PathBuf>, NavtoError> {
    let include = build_globset(globs)?;
    let mut files = Vec::new();

    for root in paths {
        if !root.exists() {
            return Err(NavtoError::NotFound { path: root.clone() });
        }
        if root.is_file() {
            files.push(root.clone());
            continue;
        }

        let extra_skips = skip_dirs.to_vec();
        let walker = WalkBuilder::new(root)
            .hidden(false)
            .git_ignore(false)
            .git_global(false)
            .git_exclude(false)
            .ignore(false)
            .parents(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| {
                if entry.file_type().is_some_and(|ft| ft.is_dir())
                    && let Some(name) = entry.file_name().to_str()
                {
                    return !SKIP_DIRS.contains(&name) && !extra_skips.iter().any(|s| s == name);
                }
                true
            })
            .build();

        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!(error = %e, "walk error");
                    continue;
                }
            };
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }
            let path = entry.path();
            if detect_lang(path).is_none() {
                continue;
            }
            if let Some(set) = &include
                && !set.is_match(path)
            {
                continue;
            }
            if entry.metadata().is_ok_and(|m| m.len() > MAX_FILE_BYTES) {
                debug!(path = %path.display(), "skipping oversized file");
                continue;
            }
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}

/// Read each path into a `SourceFile`. Unreadable or non-UTF-8 files are
/// logged and left out.
pub fn load_sources(paths: &[PathBuf]) -> Vec<SourceFile> {
    paths
        .iter()
        .filter_map(|path| match fs::read_to_string(path) {
            Ok(source) => Some(SourceFile::new(display_path(path), source)),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping unreadable file");
                None
            }
        })
        .collect()
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}

fn build_globset(globs: &[String]) -> Result<Option<GlobSet>, NavtoError> {
    if globs.is_empty() {
        return Ok(None);
    }
    let mut builder = GlobSetBuilder::new();
    for g in globs {
        let glob = Glob::new(g).map_err(|e| NavtoError::InvalidGlob {
            pattern: g.clone(),
            reason: e.to_string(),
        })?;
        builder.add(glob);
    }
    builder
        .build()
        .map(Some)
        .map_err(|e| NavtoError::InvalidGlob {
            pattern: globs.join(","),
            reason: e.to_string(),
        })
}
