//! Registers generated back-end clients with the host project.
//!
//! All edits go through one primitive: find the first occurrence of a literal
//! anchor in a file and insert text on its own line(s) right before the
//! anchor's line, reusing the anchor line's indentation. Text that is
//! already present is not inserted again. A missing anchor is an error.

// Internal imports (std, crate)
use std::path::{Path, PathBuf};

// External imports (alphabetized)
use tokio::fs;

use crate::project::{ApplicationType, AuthenticationType, BuildTool, RunContext};
use crate::templates::{TemplateContext, Templates, EXCLUDE_FROM_COMPONENT_SCAN};
use crate::Error;

pub const MAVEN_NEEDLE: &str = "<!-- jhipster-needle-maven-add-dependency -->";
pub const GRADLE_NEEDLE: &str = "//jhipster-needle-gradle-dependency";
pub const ENVIRONMENT_IMPORT: &str = "import org.springframework.core.env.Environment;";
pub const SPRING_BOOT_APPLICATION: &str = "@SpringBootApplication";

/// Result of splicing text into content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Splice {
    Inserted(String),
    AlreadyPresent,
    AnchorMissing,
}

/// Splice `text` in front of the line holding `anchor`.
pub fn splice(content: &str, anchor: &str, text: &str) -> Splice {
    let Some(anchor_at) = content.find(anchor) else {
        return Splice::AnchorMissing;
    };

    let line_start = content[..anchor_at].rfind('\n').map_or(0, |i| i + 1);
    let indent: String = content[line_start..]
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .collect();
    let block: String = text
        .lines()
        .map(|line| {
            if line.is_empty() {
                "\n".to_string()
            } else {
                format!("{indent}{line}\n")
            }
        })
        .collect();

    if content.contains(block.trim_end_matches('\n')) {
        return Splice::AlreadyPresent;
    }

    let mut out = String::with_capacity(content.len() + block.len());
    out.push_str(&content[..line_start]);
    out.push_str(&block);
    out.push_str(&content[line_start..]);
    Splice::Inserted(out)
}

/// Apply [`splice`] to a file; returns whether the file changed.
pub async fn insert_at_anchor(
    path: &Path,
    anchor: &str,
    text: &str,
) -> crate::Result<bool> {
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::anchor(path, anchor));
        }
        Err(e) => return Err(e.into()),
    };
    match splice(&content, anchor, text) {
        Splice::Inserted(updated) => {
            fs::write(path, updated).await?;
            log::debug!("Inserted {:?} near '{}' in {}", text, anchor, path.display());
            Ok(true)
        }
        Splice::AlreadyPresent => {
            log::debug!("{} already contains {:?}", path.display(), text);
            Ok(false)
        }
        Splice::AnchorMissing => Err(Error::anchor(path, anchor)),
    }
}

/// A build dependency managed by the Spring Cloud BOM
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dependency {
    pub group_id: &'static str,
    pub artifact_id: &'static str,
}

const OPENFEIGN: Dependency = Dependency {
    group_id: "org.springframework.cloud",
    artifact_id: "spring-cloud-starter-openfeign",
};

const OAUTH2: Dependency = Dependency {
    group_id: "org.springframework.cloud",
    artifact_id: "spring-cloud-starter-oauth2",
};

/// Dependencies the generated Feign clients need, per application type.
///
/// Gateways and microservices already ship the Spring Cloud stack; UAA
/// servers also carry OAuth2.
pub fn dependencies_for(application_type: ApplicationType) -> &'static [Dependency] {
    match application_type {
        ApplicationType::Monolith => &[OPENFEIGN, OAUTH2],
        ApplicationType::Gateway | ApplicationType::Microservice => &[OAUTH2],
        ApplicationType::Uaa => &[],
    }
}

impl Dependency {
    fn maven_block(&self) -> String {
        format!(
            "<dependency>\n    <groupId>{}</groupId>\n    <artifactId>{}</artifactId>\n</dependency>",
            self.group_id, self.artifact_id
        )
    }

    fn gradle_line(&self) -> String {
        format!("compile \"{}:{}\"", self.group_id, self.artifact_id)
    }
}

/// One change made to the host project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WiringChange {
    pub file: PathBuf,
    pub description: String,
}

/// Register the generated back-end clients with the host project.
///
/// Returns the changes actually made; a second run returns none.
pub async fn wire_project(ctx: &RunContext) -> crate::Result<Vec<WiringChange>> {
    let mut changes = Vec::new();

    let build_file = ctx.build_file();
    log::info!("Registering client dependencies in {} ({})", build_file.display(), ctx.build_tool);
    for dependency in dependencies_for(ctx.application_type) {
        let (needle, text) = match ctx.build_tool {
            BuildTool::Maven => (MAVEN_NEEDLE, dependency.maven_block()),
            BuildTool::Gradle => (GRADLE_NEEDLE, dependency.gradle_line()),
        };
        if insert_at_anchor(&build_file, needle, &text).await? {
            changes.push(WiringChange {
                file: build_file.clone(),
                description: format!(
                    "added dependency {}:{}",
                    dependency.group_id, dependency.artifact_id
                ),
            });
        }
    }

    let main_class = ctx.main_class_file();
    for (anchor, text, description) in main_class_edits(ctx) {
        if insert_at_anchor(&main_class, anchor, &text).await? {
            changes.push(WiringChange {
                file: main_class.clone(),
                description: description.to_string(),
            });
        }
    }

    let templates = Templates::new()?;
    let template_context = TemplateContext {
        package_name: ctx.package_name.clone(),
    };
    let written = templates
        .write(&EXCLUDE_FROM_COMPONENT_SCAN, &template_context, &ctx.java_dir())
        .await?;
    changes.push(WiringChange {
        file: written,
        description: "wrote ExcludeFromComponentScan".to_string(),
    });

    Ok(changes)
}

fn main_class_edits(ctx: &RunContext) -> Vec<(&'static str, String, &'static str)> {
    let mut edits = Vec::new();

    // UAA/JWT microservices enable Feign clients themselves.
    let enables_feign = ctx.application_type == ApplicationType::Microservice
        && matches!(
            ctx.authentication_type,
            AuthenticationType::Uaa | AuthenticationType::Jwt
        );
    if !enables_feign {
        edits.push((
            ENVIRONMENT_IMPORT,
            "import org.springframework.cloud.openfeign.EnableFeignClients;".to_string(),
            "imported EnableFeignClients",
        ));
        edits.push((
            SPRING_BOOT_APPLICATION,
            "@EnableFeignClients".to_string(),
            "annotated with @EnableFeignClients",
        ));
    }

    edits.push((
        ENVIRONMENT_IMPORT,
        "import org.springframework.context.annotation.ComponentScan;".to_string(),
        "imported ComponentScan",
    ));
    edits.push((
        SPRING_BOOT_APPLICATION,
        format!(
            "@ComponentScan( excludeFilters = {{\n    @ComponentScan.Filter({}.client.ExcludeFromComponentScan.class)\n}})",
            ctx.package_name
        ),
        "excluded generated client configurations from the component scan",
    ));

    edits
}
