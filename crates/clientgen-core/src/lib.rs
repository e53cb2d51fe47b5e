//! clientgen Core Library
//!
//! This library generates Spring Cloud and Angular API clients from OpenAPI
//! documents and wires them into a JHipster host project.

pub mod codegen;
pub mod config;
pub mod discovery;
pub mod error;
pub mod generate;
pub mod plan;
pub mod project;
pub mod prompt;
pub mod store;
pub mod templates;
pub mod utils;
pub mod wiring;

pub use crate::{
    codegen::{CodegenCommand, CodegenRunner, Invocation, Outcome, ProcessRunner, RunStatus},
    config::GeneratorConfig,
    discovery::{DiscoveredDoc, DiscoveryProbe},
    error::{Error, Result},
    generate::{GenerationReport, Generator},
    plan::GenerationPlan,
    project::RunContext,
    prompt::{Answers, PromptFlow, Prompter, Validator},
    store::{ClientEntry, ClientStore, ClientType},
};
