//! Auto-discovery of Swagger documents published by a local gateway.
//!
//! A JHipster registry on its default port answering `/health` with
//! `{"status": "UP"}` means a gateway is likely running; its
//! `/swagger-resources` endpoint lists the API documents it aggregates. Any
//! failure along the way simply means nothing was discovered.

// External imports (alphabetized)
use reqwest::header::ACCEPT;
use serde::Deserialize;
use url::Url;

/// A Swagger document published by the gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredDoc {
    /// Absolute URL of the document
    pub url: String,
    /// Name the gateway publishes it under
    pub name: String,
}

impl DiscoveredDoc {
    /// Client name derived from the published name, if one can be
    pub fn client_name(&self) -> Option<String> {
        crate::utils::client_name_from(&self.name)
    }
}

#[derive(Debug, Deserialize)]
struct HealthResponse {
    status: String,
}

#[derive(Debug, Deserialize)]
struct SwaggerResource {
    name: String,
    location: String,
}

/// Probe for a registry and the documents published behind it
#[derive(Debug, Clone)]
pub struct DiscoveryProbe {
    client: reqwest::Client,
    registry_url: Url,
    gateway_url: Url,
}

impl DiscoveryProbe {
    pub fn new(registry_url: Url, gateway_url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            registry_url,
            gateway_url,
        }
    }

    /// Look for published documents; never fails.
    pub async fn discover(&self) -> Vec<DiscoveredDoc> {
        match self.try_discover().await {
            Ok(docs) => {
                if !docs.is_empty() {
                    println!(
                        "The following swagger-docs have been found at {}",
                        self.gateway_url
                    );
                    for doc in &docs {
                        println!("* {} : {}", doc.name, doc.url);
                    }
                }
                docs
            }
            Err(e) => {
                log::debug!("No swagger-docs discovered: {}", e);
                Vec::new()
            }
        }
    }

    async fn try_discover(&self) -> crate::Result<Vec<DiscoveredDoc>> {
        let health_url = self.registry_url.join("health").map_err(url_error)?;
        log::debug!("Probing registry health at {}", health_url);
        let health: HealthResponse = self
            .client
            .get(health_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        if health.status != "UP" {
            log::debug!("Registry reports status {}", health.status);
            return Ok(Vec::new());
        }

        let resources_url = self
            .gateway_url
            .join("swagger-resources")
            .map_err(url_error)?;
        log::debug!("Listing swagger resources at {}", resources_url);
        let body = self
            .client
            .get(resources_url)
            .header(ACCEPT, "application/json, text/javascript;")
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        parse_swagger_resources(&self.gateway_url, &body)
    }
}

fn url_error(e: url::ParseError) -> crate::Error {
    crate::Error::config(format!("Invalid discovery URL: {e}"))
}

/// Turn a `/swagger-resources` body into documents rooted at `gateway_url`.
pub fn parse_swagger_resources(gateway_url: &Url, body: &str) -> crate::Result<Vec<DiscoveredDoc>> {
    let resources: Vec<SwaggerResource> = serde_json::from_str(body)?;
    resources
        .into_iter()
        .map(|resource| {
            let url = gateway_url.join(&resource.location).map_err(url_error)?;
            Ok(DiscoveredDoc {
                url: url.to_string(),
                name: resource.name,
            })
        })
        .collect()
}
