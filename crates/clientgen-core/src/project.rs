//! Host project context.
//!
//! The host is a JHipster application. Everything clientgen needs to know
//! about it (package, build tool, application type, ...) is read once from the
//! `generator-jhipster` section of its `.yo-rc.json` and handed to the later
//! phases as an immutable [`RunContext`].

// Internal imports (std, crate)
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

// External imports (alphabetized)
use serde::Deserialize;
use serde_json::Value as JsonValue;
use tokio::fs;

use crate::{utils, Error};

/// Name of the Yeoman configuration file at the project root
pub const YO_RC_FILE: &str = ".yo-rc.json";

/// Key of the host generator's section in `.yo-rc.json`
pub const HOST_NAMESPACE: &str = "generator-jhipster";

/// Build tool of the host project
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildTool {
    Maven,
    Gradle,
}

/// Kind of application the host project is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationType {
    Monolith,
    Gateway,
    Microservice,
    Uaa,
}

/// Authentication scheme of the host project
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthenticationType {
    Jwt,
    Oauth2,
    Session,
    Uaa,
}

/// Service discovery mechanism of the host project
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceDiscoveryType {
    Eureka,
    Consul,
    None,
}

/// Front-end framework of the host project
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientFramework {
    AngularJs,
    Angular,
}

macro_rules! parse_lowercase {
    ($ty:ident, $what:literal, { $($text:literal => $variant:ident),+ $(,)? }) => {
        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($text => Ok($ty::$variant),)+
                    _ => Err(format!("Unknown {}: {}", $what, s)),
                }
            }
        }
    };
}

parse_lowercase!(BuildTool, "build tool", { "maven" => Maven, "gradle" => Gradle });
parse_lowercase!(ApplicationType, "application type", {
    "monolith" => Monolith,
    "gateway" => Gateway,
    "microservice" => Microservice,
    "uaa" => Uaa,
});
parse_lowercase!(AuthenticationType, "authentication type", {
    "jwt" => Jwt,
    "oauth2" => Oauth2,
    "session" => Session,
    "uaa" => Uaa,
});
parse_lowercase!(ClientFramework, "client framework", {
    "angular1" => AngularJs,
    "angularx" => Angular,
    "angular2" => Angular,
    "angular" => Angular,
});

impl fmt::Display for BuildTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Maven => write!(f, "maven"),
            Self::Gradle => write!(f, "gradle"),
        }
    }
}

/// Raw shape of the host section; only the fields clientgen reads.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HostSection {
    base_name: Option<String>,
    package_name: Option<String>,
    package_folder: Option<String>,
    build_tool: Option<String>,
    application_type: Option<String>,
    authentication_type: Option<String>,
    #[serde(default)]
    service_discovery_type: JsonValue,
    #[serde(default)]
    skip_client: bool,
    client_framework: Option<String>,
}

/// Values resolved once from the host project, read-only for the rest of the run
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Root directory of the host project
    pub project_dir: PathBuf,
    pub base_name: String,
    pub package_name: String,
    /// Package as a relative path, e.g. `com/mycompany/myapp`
    pub package_folder: String,
    pub build_tool: BuildTool,
    pub application_type: ApplicationType,
    pub authentication_type: AuthenticationType,
    pub service_discovery: ServiceDiscoveryType,
    /// Whether the host has no front-end
    pub skip_client: bool,
    pub client_framework: ClientFramework,
}

impl RunContext {
    /// Read the host section of `<project_dir>/.yo-rc.json`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HostProject`] when the file, the section or one of the
    /// mandatory fields is missing, or when a field holds an unknown value.
    pub async fn load(project_dir: impl AsRef<Path>) -> crate::Result<Self> {
        let project_dir = project_dir.as_ref();
        let path = project_dir.join(YO_RC_FILE);
        let content = fs::read_to_string(&path).await.map_err(|e| {
            Error::host_project(format!(
                "Cannot read {} (is this a JHipster project?): {}",
                path.display(),
                e
            ))
        })?;
        let root: JsonValue = serde_json::from_str(&content).map_err(|e| {
            Error::host_project(format!("Invalid JSON in {}: {}", path.display(), e))
        })?;
        let section = root.get(HOST_NAMESPACE).cloned().ok_or_else(|| {
            Error::host_project(format!(
                "No '{}' section in {}",
                HOST_NAMESPACE,
                path.display()
            ))
        })?;
        let section: HostSection = serde_json::from_value(section).map_err(|e| {
            Error::host_project(format!("Malformed '{}' section: {}", HOST_NAMESPACE, e))
        })?;

        Self::from_section(project_dir, section)
    }

    fn from_section(project_dir: &Path, section: HostSection) -> crate::Result<Self> {
        let base_name = section
            .base_name
            .ok_or_else(|| Error::host_project("Missing 'baseName'"))?;
        let package_name = section
            .package_name
            .ok_or_else(|| Error::host_project("Missing 'packageName'"))?;
        let package_folder = section
            .package_folder
            .unwrap_or_else(|| package_name.replace('.', "/"));

        Ok(Self {
            project_dir: project_dir.to_path_buf(),
            base_name,
            package_name,
            package_folder,
            build_tool: parse_or(section.build_tool, BuildTool::Maven)?,
            application_type: parse_or(section.application_type, ApplicationType::Monolith)?,
            authentication_type: parse_or(section.authentication_type, AuthenticationType::Jwt)?,
            service_discovery: parse_service_discovery(&section.service_discovery_type)?,
            skip_client: section.skip_client,
            client_framework: parse_or(section.client_framework, ClientFramework::AngularJs)?,
        })
    }

    /// `src/main/java/<package folder>` inside the project
    pub fn java_dir(&self) -> PathBuf {
        self.project_dir
            .join("src/main/java")
            .join(&self.package_folder)
    }

    /// `src/main/webapp` inside the project
    pub fn webapp_dir(&self) -> PathBuf {
        self.project_dir.join("src/main/webapp")
    }

    /// Path of the Spring Boot main class source
    pub fn main_class_file(&self) -> PathBuf {
        self.java_dir()
            .join(format!("{}.java", main_class_name(&self.base_name)))
    }

    /// Path of the build descriptor for the configured build tool
    pub fn build_file(&self) -> PathBuf {
        match self.build_tool {
            BuildTool::Maven => self.project_dir.join("pom.xml"),
            BuildTool::Gradle => self.project_dir.join("build.gradle"),
        }
    }

    /// Whether generated clients may be offered service discovery
    pub fn supports_service_discovery(&self) -> bool {
        self.service_discovery == ServiceDiscoveryType::Eureka
    }
}

fn parse_or<T>(raw: Option<String>, default: T) -> crate::Result<T>
where
    T: FromStr<Err = String>,
{
    match raw {
        Some(value) => value.parse().map_err(Error::host_project),
        None => Ok(default),
    }
}

// JHipster writes `false` when no discovery is configured.
fn parse_service_discovery(raw: &JsonValue) -> crate::Result<ServiceDiscoveryType> {
    match raw {
        JsonValue::Null | JsonValue::Bool(false) => Ok(ServiceDiscoveryType::None),
        JsonValue::String(s) => match s.to_lowercase().as_str() {
            "eureka" => Ok(ServiceDiscoveryType::Eureka),
            "consul" => Ok(ServiceDiscoveryType::Consul),
            "" | "no" | "false" => Ok(ServiceDiscoveryType::None),
            other => Err(Error::host_project(format!(
                "Unknown service discovery type: {other}"
            ))),
        },
        other => Err(Error::host_project(format!(
            "Unexpected serviceDiscoveryType value: {other}"
        ))),
    }
}

/// Name of the Spring Boot application class JHipster derives from `baseName`.
///
/// `jhipster` becomes `JhipsterApp`, `gatewayApp` stays `GatewayApp`; anything
/// that would not be a valid Java class name falls back to `Application`.
pub fn main_class_name(base_name: &str) -> String {
    let mut name = utils::pascal_case(base_name);
    if !name.ends_with("App") {
        name.push_str("App");
    }
    let mut chars = name.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        name
    } else {
        "Application".to_string()
    }
}
