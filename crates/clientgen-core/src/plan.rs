//! Turns prompt answers into the set of clients generated this run.

use std::collections::BTreeMap;

use crate::prompt::{Action, Answers};
use crate::store::{ClientEntry, ClientStore, ClientType};
use crate::utils::validate_client_name;
use crate::Error;

/// Client name to generation parameters, consumed once by the invoker
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationPlan {
    clients: BTreeMap<String, ClientEntry>,
}

impl GenerationPlan {
    /// Resolve the plan for a run.
    ///
    /// `regen` or "generate all" take the whole store. A "new" run (or one
    /// where the action was never asked) yields the single new client. A
    /// selection yields exactly the selected stored clients, possibly none.
    pub fn resolve(store: &ClientStore, answers: &Answers, regen: bool) -> Self {
        if regen || answers.action == Some(Action::GenerateAll) {
            return Self {
                clients: store.entries().clone(),
            };
        }

        if answers.is_new() {
            return answers
                .new_client()
                .map(|(name, entry)| Self::single(name, entry))
                .unwrap_or_default();
        }

        if answers.action == Some(Action::SelectStored) {
            let clients = answers
                .selected_clients
                .iter()
                .flatten()
                .filter_map(|name| match store.get(name) {
                    Some(entry) => Some((name.clone(), entry.clone())),
                    None => {
                        log::warn!("Selected client '{}' is not in the store", name);
                        None
                    }
                })
                .collect();
            return Self { clients };
        }

        Self::default()
    }

    pub fn single(name: impl Into<String>, entry: ClientEntry) -> Self {
        let mut clients = BTreeMap::new();
        clients.insert(name.into(), entry);
        Self { clients }
    }

    pub fn from_clients(clients: BTreeMap<String, ClientEntry>) -> Self {
        Self { clients }
    }

    /// Every client needs a valid name and a document before anything is generated.
    pub fn validate(&self) -> crate::Result<()> {
        for (name, entry) in &self.clients {
            if let Err(reason) = validate_client_name(name) {
                return Err(Error::plan(format!("client '{name}': {reason}")));
            }
            if entry.spec_location.trim().is_empty() {
                return Err(Error::plan(format!(
                    "client '{name}' has no specification location"
                )));
            }
        }
        Ok(())
    }

    pub fn clients(&self) -> &BTreeMap<String, ClientEntry> {
        &self.clients
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.clients.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    /// Whether any client asks for back-end code
    pub fn targets_back_end(&self) -> bool {
        self.clients.values().any(|e| e.targets(ClientType::Back))
    }
}
