//! Durable store of previously generated API clients.
//!
//! Entries live in the host project's `.yo-rc.json`, under
//! `<namespace>.apis`, so a later `--regen` run can rebuild every client with
//! its last saved parameters. The whole `apis` object is rewritten on save;
//! the rest of the file is left untouched.

// Internal imports (std, crate)
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

// External imports (alphabetized)
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use tokio::fs;

use crate::project::YO_RC_FILE;

/// Which side of the application a generated client is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientType {
    /// Java/Spring Cloud Feign client
    Back,
    /// Browser-side Angular client
    Front,
}

impl ClientType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Back => "back",
            Self::Front => "front",
        }
    }
}

impl fmt::Display for ClientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn default_client_types() -> Vec<ClientType> {
    vec![ClientType::Back]
}

/// Generation parameters remembered for one client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientEntry {
    /// URL or file path of the Swagger/OpenAPI document
    #[serde(rename = "spec")]
    pub spec_location: String,

    /// Whether the client resolves its target through the service registry
    #[serde(default)]
    pub use_service_discovery: bool,

    /// Which clients to generate from the document
    #[serde(rename = "cliTypes", default = "default_client_types")]
    pub client_types: Vec<ClientType>,
}

impl ClientEntry {
    /// Back-end only entry, the common case
    pub fn new(spec_location: impl Into<String>, use_service_discovery: bool) -> Self {
        Self {
            spec_location: spec_location.into(),
            use_service_discovery,
            client_types: default_client_types(),
        }
    }

    pub fn with_client_types(mut self, client_types: Vec<ClientType>) -> Self {
        self.client_types = client_types;
        self
    }

    pub fn targets(&self, client_type: ClientType) -> bool {
        self.client_types.contains(&client_type)
    }
}

/// Client name to entry mapping, backed by `.yo-rc.json`
#[derive(Debug, Clone)]
pub struct ClientStore {
    path: PathBuf,
    namespace: String,
    apis: BTreeMap<String, ClientEntry>,
}

impl ClientStore {
    /// Load the store of the project at `project_dir`.
    ///
    /// A missing file, section or `apis` key yields an empty store.
    pub async fn load(project_dir: impl AsRef<Path>, namespace: &str) -> crate::Result<Self> {
        let path = project_dir.as_ref().join(YO_RC_FILE);
        let apis = match fs::read_to_string(&path).await {
            Ok(content) => {
                let root: JsonValue = serde_json::from_str(&content)?;
                match root.get(namespace).and_then(|ns| ns.get("apis")) {
                    Some(apis) => serde_json::from_value(apis.clone())?,
                    None => BTreeMap::new(),
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        log::debug!("Loaded {} stored API client(s) from {}", apis.len(), path.display());

        Ok(Self {
            path,
            namespace: namespace.to_string(),
            apis,
        })
    }

    /// Overwrite the entry at `name` and persist the full mapping.
    pub async fn save(&mut self, name: &str, entry: ClientEntry) -> crate::Result<()> {
        self.apis.insert(name.to_string(), entry);
        self.persist().await
    }

    async fn persist(&self) -> crate::Result<()> {
        let mut root = match fs::read_to_string(&self.path).await {
            Ok(content) => serde_json::from_str::<JsonValue>(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => JsonValue::Object(Map::new()),
            Err(e) => return Err(e.into()),
        };
        let root_map = root.as_object_mut().ok_or_else(|| {
            crate::Error::config(format!("{} is not a JSON object", self.path.display()))
        })?;

        let section = root_map
            .entry(self.namespace.clone())
            .or_insert_with(|| JsonValue::Object(Map::new()));
        let section = section.as_object_mut().ok_or_else(|| {
            crate::Error::config(format!(
                "'{}' in {} is not a JSON object",
                self.namespace,
                self.path.display()
            ))
        })?;
        section.insert("apis".to_string(), serde_json::to_value(&self.apis)?);

        let mut content = serde_json::to_string_pretty(&root)?;
        content.push('\n');
        fs::write(&self.path, content).await?;
        log::info!("Saved API client configuration to {}", self.path.display());
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ClientEntry> {
        self.apis.get(name)
    }

    pub fn entries(&self) -> &BTreeMap<String, ClientEntry> {
        &self.apis
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.apis.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.apis.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apis.is_empty()
    }
}
