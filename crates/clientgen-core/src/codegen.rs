//! Invocation of the external swagger-codegen jar.
//!
//! One [`CodegenCommand`] is built per (client, client type) and handed to a
//! [`CodegenRunner`]. Runs are strictly sequential; a failed run is recorded
//! and the next client is still attempted unless `fail_fast` is set.

// Internal imports (std, crate)
use std::fmt;
use std::future::Future;
use std::path::Path;

// External imports (alphabetized)
use tokio::process::Command;

use crate::config::GeneratorConfig;
use crate::plan::GenerationPlan;
use crate::project::{ClientFramework, RunContext};
use crate::store::{ClientEntry, ClientType};
use crate::utils::{lower_camel, underscored, upper_camel};
use crate::Error;

/// A fully composed generator command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodegenCommand {
    pub client_name: String,
    pub client_type: ClientType,
    pub program: String,
    pub args: Vec<String>,
}

impl CodegenCommand {
    /// Spring Cloud Feign client under `<package>.client.<name>`
    pub fn back_end(
        config: &GeneratorConfig,
        ctx: &RunContext,
        client_name: &str,
        entry: &ClientEntry,
    ) -> Self {
        let client_root = format!("{}.client", ctx.package_name);
        let cli_package = format!("{}.{}", client_root, underscored(client_name));

        let mut args = vec![
            "-Dmodels".to_string(),
            "-Dapis".to_string(),
            "-DsupportingFiles=ApiKeyRequestInterceptor.java,ClientConfiguration.java".to_string(),
            "-jar".to_string(),
            config.jar.display().to_string(),
            "generate".to_string(),
        ];
        if let Some(templates) = &config.templates_dir {
            args.push("-t".to_string());
            args.push(templates.display().to_string());
        }
        args.extend([
            "-l".to_string(),
            "spring".to_string(),
            "--library".to_string(),
            "spring-cloud".to_string(),
            "-i".to_string(),
            entry.spec_location.clone(),
            "-o".to_string(),
            ctx.project_dir.display().to_string(),
            "--artifact-id".to_string(),
            lower_camel(client_name),
            "--api-package".to_string(),
            format!("{cli_package}.api"),
            "--model-package".to_string(),
            format!("{cli_package}.model"),
            "--type-mappings".to_string(),
            "DateTime=OffsetDateTime,Date=LocalDate".to_string(),
            "--import-mappings".to_string(),
            "OffsetDateTime=java.time.OffsetDateTime,LocalDate=java.time.LocalDate".to_string(),
            format!(
                "-DdateLibrary=custom,basePackage={},configPackage={},title={}",
                client_root,
                cli_package,
                upper_camel(client_name)
            ),
        ]);
        if entry.use_service_discovery {
            args.push("--additional-properties".to_string());
            args.push("ribbon=true".to_string());
        }

        Self {
            client_name: client_name.to_string(),
            client_type: ClientType::Back,
            program: config.java.clone(),
            args,
        }
    }

    /// Angular client under `src/main/webapp/app/api-clients/<name>`
    pub fn front_end(
        config: &GeneratorConfig,
        ctx: &RunContext,
        client_name: &str,
        entry: &ClientEntry,
    ) -> Self {
        let language = match ctx.client_framework {
            ClientFramework::AngularJs => "typescript-angularjs",
            ClientFramework::Angular => "typescript-angular",
        };
        let output = ctx
            .webapp_dir()
            .join("app/api-clients")
            .join(underscored(client_name));

        let mut args = vec![
            "-jar".to_string(),
            config.jar.display().to_string(),
            "generate".to_string(),
        ];
        if let Some(templates) = &config.templates_dir {
            args.push("-t".to_string());
            args.push(templates.display().to_string());
        }
        args.extend([
            "-l".to_string(),
            language.to_string(),
            "-i".to_string(),
            entry.spec_location.clone(),
            "-o".to_string(),
            output.display().to_string(),
        ]);

        Self {
            client_name: client_name.to_string(),
            client_type: ClientType::Front,
            program: config.java.clone(),
            args,
        }
    }

    /// The command as a single shell-like line, for logs
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for CodegenCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.command_line())
    }
}

/// Exit information of one generator run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStatus {
    pub success: bool,
    pub code: Option<i32>,
}

impl RunStatus {
    pub fn ok() -> Self {
        Self {
            success: true,
            code: Some(0),
        }
    }

    pub fn failed(code: Option<i32>) -> Self {
        Self {
            success: false,
            code,
        }
    }
}

/// Executes generator commands
pub trait CodegenRunner {
    /// Run `command` in `working_dir` to completion.
    ///
    /// `Err` means the process could not be started at all.
    fn run(
        &self,
        command: &CodegenCommand,
        working_dir: &Path,
    ) -> impl Future<Output = crate::Result<RunStatus>>;
}

/// Runs the generator as a child process, inheriting the terminal
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl CodegenRunner for ProcessRunner {
    async fn run(&self, command: &CodegenCommand, working_dir: &Path) -> crate::Result<RunStatus> {
        let status = Command::new(&command.program)
            .args(&command.args)
            .current_dir(working_dir)
            .status()
            .await
            .map_err(|e| {
                Error::codegen(format!("Failed to launch '{}': {}", command.program, e))
            })?;
        if status.success() {
            Ok(RunStatus::ok())
        } else {
            Ok(RunStatus::failed(status.code()))
        }
    }
}

/// Result of one planned (client, client type) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    Failed { reason: String },
    Skipped { reason: String },
}

/// One planned generator run and how it went
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub client_name: String,
    pub client_type: ClientType,
    /// Empty when the run was skipped before a command was built
    pub command_line: String,
    pub outcome: Outcome,
}

impl Invocation {
    pub fn succeeded(&self) -> bool {
        self.outcome == Outcome::Succeeded
    }

    pub fn failed(&self) -> bool {
        matches!(self.outcome, Outcome::Failed { .. })
    }
}

/// Generate every client of the plan, one process at a time.
pub async fn invoke_plan<R: CodegenRunner>(
    plan: &GenerationPlan,
    ctx: &RunContext,
    config: &GeneratorConfig,
    runner: &R,
) -> crate::Result<Vec<Invocation>> {
    let mut invocations = Vec::new();

    for (client_name, entry) in plan.clients() {
        for client_type in &entry.client_types {
            let invocation = match client_type {
                ClientType::Back => {
                    println!(
                        "Generating java client code for client {} ({})",
                        client_name, entry.spec_location
                    );
                    let command = CodegenCommand::back_end(config, ctx, client_name, entry);
                    run_one(command, ctx, config, runner).await?
                }
                ClientType::Front if ctx.skip_client => {
                    log::warn!(
                        "Skipping front-end client {}: the project has no front-end",
                        client_name
                    );
                    Invocation {
                        client_name: client_name.clone(),
                        client_type: ClientType::Front,
                        command_line: String::new(),
                        outcome: Outcome::Skipped {
                            reason: "project has no front-end".to_string(),
                        },
                    }
                }
                ClientType::Front => {
                    println!(
                        "Generating front-end client code for client {} ({})",
                        client_name, entry.spec_location
                    );
                    let command = CodegenCommand::front_end(config, ctx, client_name, entry);
                    run_one(command, ctx, config, runner).await?
                }
            };
            invocations.push(invocation);
        }
    }

    Ok(invocations)
}

async fn run_one<R: CodegenRunner>(
    command: CodegenCommand,
    ctx: &RunContext,
    config: &GeneratorConfig,
    runner: &R,
) -> crate::Result<Invocation> {
    let command_line = command.command_line();
    log::info!("{}", command_line);

    let outcome = match runner.run(&command, &ctx.project_dir).await {
        Ok(status) if status.success => Outcome::Succeeded,
        Ok(status) => Outcome::Failed {
            reason: match status.code {
                Some(code) => format!("generator exited with status {code}"),
                None => "generator was terminated by a signal".to_string(),
            },
        },
        Err(e) => Outcome::Failed {
            reason: e.to_string(),
        },
    };

    if let Outcome::Failed { reason } = &outcome {
        log::error!(
            "Generation of {} client {} failed: {}",
            command.client_type,
            command.client_name,
            reason
        );
        if config.fail_fast {
            return Err(Error::codegen(format!(
                "{} client {}: {}",
                command.client_type, command.client_name, reason
            )));
        }
    }

    Ok(Invocation {
        client_name: command.client_name,
        client_type: command.client_type,
        command_line,
        outcome,
    })
}
