//! Subcommand implementations
//!
//! Each command renders to a `String` so the binary only has to print it.

use anyhow::{Context, Result};
use clap::ArgMatches;
use refnet_core::{
    assign_classes, compute_stats, filter_by_campaign, find_nodes_with_class, find_path_to_node,
    parse_tree, validate_tree, NetworkConfig, NetworkNode, NetworkStats, NetworkView, NodeId,
    ViewOptions,
};
use refnet_enrich::{EnrichMode, Enricher, MemoryDirectory};
use std::fmt::Write as _;
use std::io::Read;
use std::path::Path;

/// Rendered command result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Text for stdout
    pub output: String,
    /// Whether the process should exit successfully
    pub success: bool,
}

impl Outcome {
    fn ok(output: String) -> Self {
        Self {
            output,
            success: true,
        }
    }
}

/// Load a tree from a file, or stdin when `source` is `-`
///
/// # Errors
/// Returns error if the input cannot be read or is not a tree
pub fn read_tree(source: &str) -> Result<NetworkNode> {
    let json = if source == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("reading tree from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(Path::new(source))
            .with_context(|| format!("reading tree from {source}"))?
    };
    parse_tree(&json).with_context(|| format!("parsing tree from {source}"))
}

/// Load configuration from `--config`, or defaults
///
/// # Errors
/// Returns error if the file is unreadable or invalid
pub fn load_config(matches: &ArgMatches) -> Result<NetworkConfig> {
    match matches.get_one::<String>("config") {
        Some(path) => NetworkConfig::load(path).with_context(|| format!("loading config {path}")),
        None => Ok(NetworkConfig::default()),
    }
}

/// Dispatch the parsed command line
///
/// # Errors
/// Returns error on unreadable input, bad configuration or failed enrichment
pub async fn run(matches: &ArgMatches) -> Result<Outcome> {
    let config = load_config(matches)?;
    let Some((name, args)) = matches.subcommand() else {
        anyhow::bail!("no subcommand given");
    };
    let tree = read_tree(required(args, "tree")?)?;
    tracing::info!(command = name, root = %tree.id, "running");

    match name {
        "stats" => {
            let roles: Vec<String> = args
                .get_many::<String>("role")
                .map(|values| values.cloned().collect())
                .unwrap_or_default();
            stats(&tree, &config, &roles, args.get_flag("json"))
        }
        "classes" => classes(
            &tree,
            &config,
            args.get_one::<u32>("class").copied(),
            args.get_flag("json"),
        ),
        "path" => Ok(path(&tree, &NodeId::from(required(args, "id")?))),
        "filter" => filter(&tree, &config, required(args, "campaign")?),
        "view" => view(&tree, &config, args).await,
        "validate" => Ok(validate(&tree)),
        other => anyhow::bail!("unknown subcommand {other}"),
    }
}

fn required<'a>(args: &'a ArgMatches, name: &str) -> Result<&'a str> {
    args.get_one::<String>(name)
        .map(String::as_str)
        .with_context(|| format!("missing argument {name}"))
}

/// `stats`: statistics with the configured and requested role counts
///
/// # Errors
/// Returns error if JSON rendering fails
pub fn stats(tree: &NetworkNode, config: &NetworkConfig, roles: &[String], json: bool) -> Result<Outcome> {
    let stats = compute_stats(Some(tree))
        .with_reported_roles(&config.report_roles)
        .with_reported_roles(roles);
    if json {
        return Ok(Outcome::ok(serde_json::to_string_pretty(&stats)?));
    }
    Ok(Outcome::ok(render_stats(&stats)))
}

fn render_stats(stats: &NetworkStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total members:   {}", stats.total_members);
    let _ = writeln!(out, "Direct invites:  {}", stats.direct_invites);
    let _ = writeln!(out, "Network depth:   {}", stats.network_depth);
    let _ = writeln!(out, "Average invites: {:.1}", stats.average_invites);
    let _ = writeln!(out, "Roles:");
    for (role, count) in &stats.role_counts {
        let _ = writeln!(out, "  {role}: {count}");
    }
    out
}

/// `classes`: class of every member, or the members of one class
///
/// # Errors
/// Returns error if JSON rendering fails
pub fn classes(tree: &NetworkNode, config: &NetworkConfig, class: Option<u32>, json: bool) -> Result<Outcome> {
    let classified = assign_classes(tree, config.start_class);
    let rows: Vec<(NodeId, u32)> = match class {
        Some(class) => find_nodes_with_class(&classified, class)
            .into_iter()
            .map(|id| (id, class))
            .collect(),
        None => classified
            .iter()
            .filter_map(|node| node.network_class.map(|c| (node.id.clone(), c)))
            .collect(),
    };

    let output = if json {
        let value: Vec<_> = rows
            .iter()
            .map(|(id, class)| serde_json::json!({ "id": id, "networkClass": class }))
            .collect();
        serde_json::to_string_pretty(&value)?
    } else {
        let mut out = String::new();
        for (id, class) in &rows {
            let _ = writeln!(out, "{id}\t{class}");
        }
        out
    };
    Ok(Outcome {
        success: !rows.is_empty(),
        output,
    })
}

/// `path`: ids from the root to `target`
#[must_use]
pub fn path(tree: &NetworkNode, target: &NodeId) -> Outcome {
    let path = find_path_to_node(tree, target);
    if path.is_empty() {
        return Outcome {
            output: format!("{target} is not in this network\n"),
            success: false,
        };
    }
    let ids: Vec<_> = path.iter().map(NodeId::as_str).collect();
    Outcome::ok(format!("{}\n", ids.join(" > ")))
}

/// `filter`: tree restricted to a campaign, as JSON
///
/// # Errors
/// Returns error if JSON rendering fails
pub fn filter(tree: &NetworkNode, config: &NetworkConfig, campaign: &str) -> Result<Outcome> {
    match filter_by_campaign(tree, &config.campaign_filter(campaign)) {
        Some(filtered) => Ok(Outcome::ok(serde_json::to_string_pretty(&filtered)?)),
        None => Ok(Outcome {
            output: format!("no network to display for campaign {campaign}\n"),
            success: false,
        }),
    }
}

async fn view(tree: &NetworkNode, config: &NetworkConfig, args: &ArgMatches) -> Result<Outcome> {
    let mut options = ViewOptions::new();
    if let Some(campaign) = args.get_one::<String>("campaign") {
        options = options.with_campaign(config.campaign_filter(campaign));
    }
    if let Some(class) = args.get_one::<u32>("class") {
        options = options.with_class(*class);
    }
    if let Some(user) = args.get_one::<String>("user") {
        options = options.with_current_user(user.as_str());
    }

    let users = args.get_one::<String>("users");
    let campaigns = args.get_one::<String>("campaigns");
    let tree = if users.is_some() || campaigns.is_some() {
        let mut directory = MemoryDirectory::new();
        if let Some(path) = users {
            directory = directory
                .load_users(path)
                .await
                .with_context(|| format!("loading users {path}"))?;
        }
        if let Some(path) = campaigns {
            directory = directory
                .load_campaigns(path)
                .await
                .with_context(|| format!("loading campaigns {path}"))?;
        }
        let mode = args
            .get_one::<usize>("concurrent")
            .map_or(EnrichMode::Sequential, |&limit| EnrichMode::Concurrent { limit });
        Enricher::new(directory)
            .with_mode(mode)
            .enrich(tree)
            .await
            .context("enriching tree")?
    } else {
        tree.clone()
    };

    render_view(&NetworkView::build(&tree, &options, config))
}

/// Render a built view as JSON
///
/// # Errors
/// Returns error if JSON rendering fails
pub fn render_view(view: &NetworkView) -> Result<Outcome> {
    Ok(Outcome {
        output: serde_json::to_string_pretty(view)?,
        success: !view.is_empty(),
    })
}

/// `validate`: list inconsistencies
#[must_use]
pub fn validate(tree: &NetworkNode) -> Outcome {
    let report = validate_tree(tree);
    if report.is_consistent() {
        return Outcome::ok("consistent\n".to_string());
    }
    let mut out = String::new();
    for issue in &report.issues {
        let _ = writeln!(out, "{issue}");
    }
    Outcome {
        output: out,
        success: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use refnet_core::roles;

    fn tree() -> NetworkNode {
        NetworkNode::new(1, roles::ADMIN)
            .with_child(
                NetworkNode::new(2, roles::USER)
                    .with_child(NetworkNode::new(3, roles::USER).with_campaign("camp-A")),
            )
            .with_child(NetworkNode::new(4, roles::USER))
    }

    #[test]
    fn stats_text() {
        let outcome = stats(&tree(), &NetworkConfig::default(), &["manager".to_string()], false).unwrap();
        assert!(outcome.output.contains("Total members:   4"));
        assert!(outcome.output.contains("Average invites: 0.8"));
        assert!(outcome.output.contains("  manager: 0"));
    }

    #[test]
    fn classes_filtered() {
        let outcome = classes(&tree(), &NetworkConfig::default(), Some(2), false).unwrap();
        assert_eq!(outcome.output, "2\t2\n4\t2\n");
        assert!(!classes(&tree(), &NetworkConfig::default(), Some(9), false).unwrap().success);
    }

    #[test]
    fn classes_success_ignores_format() {
        for json in [false, true] {
            assert!(!classes(&tree(), &NetworkConfig::default(), Some(9), json).unwrap().success);
            assert!(classes(&tree(), &NetworkConfig::default(), Some(3), json).unwrap().success);
        }
        let outcome = classes(&tree(), &NetworkConfig::default(), Some(9), true).unwrap();
        assert_eq!(outcome.output, "[]");
    }

    #[test]
    fn path_text() {
        assert_eq!(path(&tree(), &NodeId::from("3")).output, "1 > 2 > 3\n");
        assert!(!path(&tree(), &NodeId::from("9")).success);
    }

    #[test]
    fn filter_reports_empty() {
        let outcome = filter(&tree(), &NetworkConfig::default(), "camp-Z").unwrap();
        assert!(!outcome.success);
        assert!(filter(&tree(), &NetworkConfig::default(), "all").unwrap().success);
    }

    #[test]
    fn validate_flags_mismatch() {
        let mut bad = tree();
        bad.children[1].invited_by = None;
        let outcome = validate(&bad);
        assert!(!outcome.success);
        assert_eq!(outcome.output, "4: nested under 1 but has no inviter\n");
        assert!(validate(&tree()).success);
    }
}
