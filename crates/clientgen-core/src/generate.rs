//! One end-to-end run: discovery, prompts, plan, store, codegen, wiring.

// Internal imports (std, crate)
use std::fmt;
use std::path::{Path, PathBuf};

use crate::codegen::{invoke_plan, CodegenRunner, Invocation, Outcome};
use crate::config::GeneratorConfig;
use crate::discovery::DiscoveryProbe;
use crate::plan::GenerationPlan;
use crate::project::RunContext;
use crate::prompt::{Answers, FlowContext, PromptFlow, Prompter};
use crate::store::{ClientStore, ClientType};
use crate::wiring::{wire_project, WiringChange};

/// What a run did
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    pub plan: GenerationPlan,
    pub invocations: Vec<Invocation>,
    pub wiring: Vec<WiringChange>,
    /// Name of the client saved to the store this run
    pub saved: Option<String>,
}

impl GenerationReport {
    pub fn has_failures(&self) -> bool {
        self.invocations.iter().any(Invocation::failed)
    }

    fn back_end_succeeded(invocations: &[Invocation]) -> bool {
        invocations
            .iter()
            .any(|i| i.client_type == ClientType::Back && i.succeeded())
    }
}

impl fmt::Display for GenerationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.plan.is_empty() {
            return writeln!(f, "No API client selected, nothing generated");
        }
        for invocation in &self.invocations {
            let status = match &invocation.outcome {
                Outcome::Succeeded => "ok".to_string(),
                Outcome::Failed { reason } => format!("FAILED ({reason})"),
                Outcome::Skipped { reason } => format!("skipped ({reason})"),
            };
            writeln!(
                f,
                "  {} [{}]: {}",
                invocation.client_name, invocation.client_type, status
            )?;
        }
        for change in &self.wiring {
            writeln!(f, "  {}: {}", change.file.display(), change.description)?;
        }
        if let Some(name) = &self.saved {
            writeln!(f, "  saved API client {name} for reuse")?;
        }
        Ok(())
    }
}

/// Drives a run against one host project
#[derive(Debug, Clone)]
pub struct Generator {
    config: GeneratorConfig,
    project_dir: PathBuf,
}

impl Generator {
    pub fn new(config: GeneratorConfig, project_dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            project_dir: project_dir.into(),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Run once.
    ///
    /// With `regen` set no question is asked and nothing is probed: every
    /// stored client is regenerated with its saved parameters.
    pub async fn run<P, R>(
        &self,
        regen: bool,
        prompter: &mut P,
        runner: &R,
    ) -> crate::Result<GenerationReport>
    where
        P: Prompter + ?Sized,
        R: CodegenRunner,
    {
        let ctx = RunContext::load(&self.project_dir).await?;
        log::debug!(
            "Host project {} ({:?}, {})",
            ctx.base_name,
            ctx.application_type,
            ctx.build_tool
        );
        let mut store = ClientStore::load(&self.project_dir, &self.config.store_namespace).await?;

        let answers = if regen {
            log::info!("Regenerating {} stored API client(s)", store.len());
            Answers::default()
        } else {
            let probe = DiscoveryProbe::new(
                self.config.registry_url.clone(),
                self.config.gateway_url.clone(),
            );
            let discovered = probe.discover().await;
            let flow_context = FlowContext {
                store: &store,
                discovered: &discovered,
                service_discovery_supported: ctx.supports_service_discovery(),
                has_front_end: !ctx.skip_client,
                default_spec: &self.config.default_spec,
                default_client_name: &self.config.default_client_name,
            };
            PromptFlow::new(flow_context).run(prompter)?
        };

        let plan = GenerationPlan::resolve(&store, &answers, regen);
        plan.validate()?;

        let mut report = GenerationReport {
            plan,
            ..Default::default()
        };

        if !regen && answers.save_for_reuse == Some(true) {
            if let Some((name, entry)) = answers.new_client() {
                store.save(&name, entry).await?;
                report.saved = Some(name);
            }
        }

        if report.plan.is_empty() {
            log::warn!("No API client to generate");
            return Ok(report);
        }

        report.invocations = invoke_plan(&report.plan, &ctx, &self.config, runner).await?;

        if GenerationReport::back_end_succeeded(&report.invocations) {
            report.wiring = wire_project(&ctx).await?;
            for change in &report.wiring {
                println!("   update {} ({})", change.file.display(), change.description);
            }
        } else if report.plan.targets_back_end() {
            log::warn!("No back-end client was generated, leaving the project untouched");
        }

        Ok(report)
    }
}
