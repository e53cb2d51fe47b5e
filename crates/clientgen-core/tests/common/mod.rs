//! Shared fixtures: scripted prompts, a recording runner and a throwaway host project.

#![allow(dead_code)]

use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clientgen_core::{
    CodegenCommand, CodegenRunner, Error, GeneratorConfig, Prompter, Result, RunStatus, Validator,
};
use url::Url;

/// One scripted answer
#[derive(Debug, Clone)]
pub enum Reply {
    Select(usize),
    MultiSelect(Vec<usize>),
    Confirm(bool),
    Input(String),
}

pub fn input(value: &str) -> Reply {
    Reply::Input(value.to_string())
}

/// Answers questions from a queue, like a user typing at the terminal.
///
/// Rejected inputs are recorded and the next queued reply is tried, the
/// way a real prompt asks again.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    replies: VecDeque<Reply>,
    pub asked: Vec<String>,
    pub rejected: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: replies.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn remaining(&self) -> usize {
        self.replies.len()
    }

    fn next(&mut self, message: &str) -> Result<Reply> {
        self.asked.push(message.to_string());
        self.replies
            .pop_front()
            .ok_or_else(|| Error::prompt(format!("no scripted answer for '{message}'")))
    }
}

fn unexpected(message: &str, reply: Reply) -> Error {
    Error::prompt(format!("unexpected reply {reply:?} to '{message}'"))
}

impl Prompter for ScriptedPrompter {
    fn select(&mut self, message: &str, items: &[String], _default: usize) -> Result<usize> {
        match self.next(message)? {
            Reply::Select(i) if i < items.len() => Ok(i),
            other => Err(unexpected(message, other)),
        }
    }

    fn multi_select(
        &mut self,
        message: &str,
        _items: &[String],
        _defaults: &[bool],
    ) -> Result<Vec<usize>> {
        match self.next(message)? {
            Reply::MultiSelect(indexes) => Ok(indexes),
            other => Err(unexpected(message, other)),
        }
    }

    fn confirm(&mut self, message: &str, _default: bool) -> Result<bool> {
        match self.next(message)? {
            Reply::Confirm(value) => Ok(value),
            other => Err(unexpected(message, other)),
        }
    }

    fn input(&mut self, message: &str, default: &str, validate: Option<Validator>) -> Result<String> {
        loop {
            let value = match self.next(message)? {
                Reply::Input(value) if value.is_empty() => default.to_string(),
                Reply::Input(value) => value,
                other => return Err(unexpected(message, other)),
            };
            match validate.map_or(Ok(()), |v| v(&value)) {
                Ok(()) => return Ok(value),
                Err(reason) => self.rejected.push(format!("{value}: {reason}")),
            }
        }
    }
}

/// Records every command instead of running it
#[derive(Debug, Default)]
pub struct RecordingRunner {
    pub commands: Mutex<Vec<CodegenCommand>>,
    failing: HashSet<String>,
}

impl RecordingRunner {
    /// Runs for these client names exit with status 1
    pub fn failing(names: &[&str]) -> Self {
        Self {
            failing: names.iter().map(|n| n.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn commands(&self) -> Vec<CodegenCommand> {
        self.commands.lock().unwrap().clone()
    }
}

impl CodegenRunner for RecordingRunner {
    async fn run(&self, command: &CodegenCommand, _working_dir: &Path) -> Result<RunStatus> {
        self.commands.lock().unwrap().push(command.clone());
        if self.failing.contains(&command.client_name) {
            Ok(RunStatus::failed(Some(1)))
        } else {
            Ok(RunStatus::ok())
        }
    }
}

pub const MAIN_CLASS: &str = "package com.mycompany.myapp;

import org.springframework.boot.SpringApplication;
import org.springframework.boot.autoconfigure.SpringBootApplication;
import org.springframework.core.env.Environment;

@SpringBootApplication
public class JhipsterApp {

    public static void main(String[] args) {
        SpringApplication.run(JhipsterApp.class, args);
    }
}
";

pub const POM: &str = "<project>
    <dependencies>
        <!-- jhipster-needle-maven-add-dependency -->
    </dependencies>
</project>
";

/// Host project settings written to `.yo-rc.json`
#[derive(Debug, Clone)]
pub struct HostProject {
    pub application_type: &'static str,
    pub service_discovery: Option<&'static str>,
    pub skip_client: bool,
}

impl Default for HostProject {
    fn default() -> Self {
        Self {
            application_type: "monolith",
            service_discovery: None,
            skip_client: true,
        }
    }
}

impl HostProject {
    /// Write a minimal Maven JHipster project into `dir`
    pub fn write(&self, dir: &Path) -> std::io::Result<PathBuf> {
        let service_discovery = match self.service_discovery {
            Some(kind) => serde_json::Value::String(kind.to_string()),
            None => serde_json::Value::Bool(false),
        };
        let yo_rc = serde_json::json!({
            "generator-jhipster": {
                "baseName": "jhipster",
                "packageName": "com.mycompany.myapp",
                "packageFolder": "com/mycompany/myapp",
                "buildTool": "maven",
                "applicationType": self.application_type,
                "authenticationType": "jwt",
                "serviceDiscoveryType": service_discovery,
                "skipClient": self.skip_client,
                "clientFramework": "angularX"
            }
        });
        std::fs::write(
            dir.join(".yo-rc.json"),
            serde_json::to_string_pretty(&yo_rc).unwrap(),
        )?;
        std::fs::write(dir.join("pom.xml"), POM)?;
        let java_dir = dir.join("src/main/java/com/mycompany/myapp");
        std::fs::create_dir_all(&java_dir)?;
        let main_class = java_dir.join("JhipsterApp.java");
        std::fs::write(&main_class, MAIN_CLASS)?;
        Ok(main_class)
    }
}

/// Configuration whose discovery probe can never reach anything
pub fn offline_config() -> GeneratorConfig {
    GeneratorConfig {
        registry_url: Url::parse("http://127.0.0.1:9").unwrap(),
        gateway_url: Url::parse("http://127.0.0.1:9").unwrap(),
        ..Default::default()
    }
}
