//! Handler for `depot resolve`.

use std::path::PathBuf;
use std::sync::Arc;

use depot_core::config::DepotConfig;
use depot_core::coordinate::Coordinate;
use depot_core::scope::Scope;
use depot_maven::source::LocalRepository;
use depot_resolver::{DependencyGraph, PomGraphBuilder, Resolver, TracingListener};
use depot_util::errors::DepotError;
use miette::Result;
use tokio::task::JoinSet;

/// Options for `depot resolve`.
#[derive(Debug, Default)]
pub struct ResolveOptions {
    pub coordinates: Vec<String>,
    pub scope: Option<String>,
    pub repo: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub include_optional: bool,
    pub depth: Option<usize>,
    pub json: bool,
    pub conflicts: bool,
    pub disabled: bool,
    pub why: Option<String>,
}

pub async fn exec(opts: ResolveOptions) -> Result<()> {
    let config = match &opts.config {
        Some(path) => DepotConfig::from_path(path)?,
        None => DepotConfig::load(&std::env::current_dir().map_err(DepotError::Io)?)?,
    };

    let scope: Scope = match &opts.scope {
        Some(s) => s.parse()?,
        None => config.resolve.scope,
    };
    let include_optional = opts.include_optional || config.resolve.include_optional;
    let repo_root = opts.repo.clone().unwrap_or_else(|| config.repository_path());
    if !repo_root.is_dir() {
        tracing::warn!(path = %repo_root.display(), "local repository does not exist");
    }

    let roots = opts
        .coordinates
        .iter()
        .map(|c| Coordinate::parse(c))
        .collect::<Result<Vec<_>, _>>()?;

    let builder =
        PomGraphBuilder::new(LocalRepository::new(&repo_root)).include_optional(include_optional);
    let resolver = Arc::new(
        Resolver::new(builder)
            .include_optional(include_optional)
            .with_listener(Arc::new(TracingListener)),
    );

    // Roots are independent; resolve them side by side on the blocking pool.
    let mut set = JoinSet::new();
    for (i, root) in roots.into_iter().enumerate() {
        let resolver = resolver.clone();
        set.spawn_blocking(move || (i, resolver.resolve(&root, scope)));
    }
    let mut results = Vec::new();
    while let Some(joined) = set.join_next().await {
        let (i, result) = joined.map_err(|e| DepotError::Generic {
            message: format!("resolution task failed: {e}"),
        })?;
        results.push((i, result));
    }
    results.sort_by_key(|(i, _)| *i);

    let mut graphs = Vec::with_capacity(results.len());
    for (_, result) in results {
        graphs.push(result?);
    }

    if opts.json {
        let snapshots: Vec<_> = graphs.iter().map(DependencyGraph::snapshot).collect();
        let out = serde_json::to_string_pretty(&snapshots).map_err(|e| DepotError::Generic {
            message: format!("Failed to serialize graph: {e}"),
        })?;
        println!("{out}");
        return Ok(());
    }

    for (i, graph) in graphs.iter().enumerate() {
        if i > 0 {
            println!();
        }
        render(graph, &opts);
    }
    Ok(())
}

fn render(graph: &DependencyGraph, opts: &ResolveOptions) {
    if let Some(ref target) = opts.why {
        if let Some(path) = graph.find_path(target) {
            println!("Path to {target}:");
            for (i, node) in path.iter().enumerate() {
                let indent = "  ".repeat(i);
                println!("{indent}{node}");
            }
        } else {
            println!("Dependency '{target}' not found in the graph.");
        }
        return;
    }

    if opts.conflicts {
        if graph.conflicts.is_empty() {
            println!("No version conflicts.");
        } else {
            print!("{}", graph.conflicts);
        }
        return;
    }

    if opts.disabled {
        let disabled = graph.disabled_edges();
        if disabled.is_empty() {
            println!("No disabled edges.");
            return;
        }
        println!("Disabled edges ({}):", disabled.len());
        for (from, to, edge) in disabled {
            let reason = edge.disabled_reason().map(|r| r.as_str()).unwrap_or("?");
            println!("  {} -> {} ({reason})", graph.node(from), graph.node(to));
        }
        return;
    }

    print!("{}", graph.print_tree(opts.depth));
}
