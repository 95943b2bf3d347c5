//! Human-readable terminal renderer.

use std::path::Path;

use owo_colors::OwoColorize as _;

use crate::domain::config::Qd2Config;
use crate::domain::helm_set::flatten_to_set_expressions;
use crate::domain::plan::Slot;
use crate::domain::values::component_values;
use crate::output::OutputContext;

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

/// What a deploy would do, as shown by `qd2 validate`.
pub struct PlanView<'a> {
    pub namespace: &'a str,
    pub repo_alias: &'a str,
    pub repo_url: &'a str,
    pub slots: &'a [Slot<'a>],
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the deploy plan: one block per release with its `--set` parameters.
    pub fn render_plan(&self, plan: &PlanView<'_>) {
        if self.ctx.quiet {
            return;
        }
        println!();
        self.ctx
            .header(&format!("Deploy plan (namespace: {})", plan.namespace));
        println!(
            "  {:<16} {} {}",
            "chart source:",
            plan.repo_alias,
            format!("({})", plan.repo_url).style(self.ctx.styles.dim)
        );
        println!();
        for slot in plan.slots {
            match slot {
                Slot::Present(c) => {
                    let version = c.version.map(|v| format!("@{v}")).unwrap_or_default();
                    println!(
                        "  {:<16} {}{version} on {}",
                        c.release.style(self.ctx.styles.bold),
                        c.chart_ref(plan.repo_alias),
                        c.nodek8s
                    );
                    for expr in flatten_to_set_expressions(&component_values(c)) {
                        println!("    {} {expr}", "--set".style(self.ctx.styles.dim));
                    }
                }
                Slot::Absent(section) => {
                    println!(
                        "  {:<16} {}",
                        section,
                        "not specified".style(self.ctx.styles.dim)
                    );
                }
            }
        }
        println!();
    }

    /// Render the effective qd2 configuration.
    pub fn render_config(&self, config: &Qd2Config, path: &Path) {
        println!();
        println!(
            "  {}",
            format!("Configuration ({})", path.display()).style(self.ctx.styles.header)
        );
        println!();
        println!("  {:<24} {}", "defaults.namespace:", config.defaults.namespace);
        println!("  {:<24} {}", "defaults.repoAlias:", config.defaults.repo_alias);
        println!(
            "  {:<24} {}",
            "defaults.kubeconfig:",
            config
                .defaults
                .kubeconfig
                .as_deref()
                .map_or_else(|| "(not set)".to_string(), |p| p.display().to_string())
        );
        println!("  {:<24} {}", "helm.binary:", config.helm.binary);
        println!(
            "  {:<24} {}s",
            "helm.queryTimeoutSecs:", config.helm.query_timeout_secs
        );
        println!();
        println!("  {}", "Environment:".style(self.ctx.styles.bold));
        for var in ["QD2_CONFIG", "QD2_LOG", "KUBECONFIG", "NO_COLOR"] {
            println!(
                "    {:<18} {}",
                format!("{var}:"),
                std::env::var(var).unwrap_or_else(|_| "(not set)".to_string())
            );
        }
        println!();
    }
}
