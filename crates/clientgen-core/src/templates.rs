//! Source templates instantiated into the host project.
//!
//! Templates are compiled into the binary and rendered with Tera. Each
//! [`TemplateFile`] names its source and a destination relative to the host's
//! Java source directory.

// Internal imports (std, crate)
use std::path::{Path, PathBuf};

// External imports (alphabetized)
use serde::Serialize;
use tera::{Context, Tera};
use tokio::fs;

/// A template and where it lands in the host project
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateFile {
    /// Template name inside the engine
    pub source: &'static str,
    /// Destination relative to the Java source directory
    pub destination: &'static str,
    content: &'static str,
}

/// Marker annotation keeping generated configurations out of the main scan
pub const EXCLUDE_FROM_COMPONENT_SCAN: TemplateFile = TemplateFile {
    source: "client/ExcludeFromComponentScan.java",
    destination: "client/ExcludeFromComponentScan.java",
    content: include_str!("../templates/client/ExcludeFromComponentScan.java.tera"),
};

const ALL: &[TemplateFile] = &[EXCLUDE_FROM_COMPONENT_SCAN];

/// Variables available to every template
#[derive(Debug, Clone, Serialize)]
pub struct TemplateContext {
    pub package_name: String,
}

/// Renders the built-in templates
#[derive(Debug)]
pub struct Templates {
    tera: Tera,
}

impl Templates {
    pub fn new() -> crate::Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(ALL.iter().map(|t| (t.source, t.content)))?;
        Ok(Self { tera })
    }

    pub fn render(&self, file: &TemplateFile, context: &TemplateContext) -> crate::Result<String> {
        let context = Context::from_serialize(context)?;
        Ok(self.tera.render(file.source, &context)?)
    }

    /// Render `file` into `java_dir`, creating parent directories.
    pub async fn write(
        &self,
        file: &TemplateFile,
        context: &TemplateContext,
        java_dir: &Path,
    ) -> crate::Result<PathBuf> {
        let rendered = self.render(file, context)?;
        let output_path = java_dir.join(file.destination);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        log::debug!("Writing template {} to {}", file.source, output_path.display());
        fs::write(&output_path, rendered).await?;
        Ok(output_path)
    }
}
