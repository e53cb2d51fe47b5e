//! Interactive question flow.
//!
//! The flow is a fixed, ordered list of [`Question`] descriptors. Each one
//! carries a pure visibility predicate over the answers collected so far and
//! the [`FlowContext`] (client store, discovered documents, host project
//! capabilities). Questions are asked strictly in declaration order; a hidden
//! question records nothing.
//!
//! Terminal I/O goes through the [`Prompter`] trait so the flow can be driven
//! by `dialoguer` in the CLI and by scripted answers in tests.

use crate::discovery::DiscoveredDoc;
use crate::store::{ClientEntry, ClientStore, ClientType};
use crate::utils::validate_client_name;
use crate::Error;

/// Input check run on free text; `Err` carries the message shown to the user.
pub type Validator = fn(&str) -> Result<(), String>;

/// Terminal interaction primitives the flow needs.
///
/// Implementations re-prompt until `validate` accepts the input, and return
/// `default` when the user submits an empty line.
pub trait Prompter {
    /// Single choice, returns the index of the chosen item
    fn select(&mut self, message: &str, items: &[String], default: usize) -> crate::Result<usize>;

    /// Multiple choice, returns the indexes of the checked items
    fn multi_select(
        &mut self,
        message: &str,
        items: &[String],
        defaults: &[bool],
    ) -> crate::Result<Vec<usize>>;

    /// Yes/no question
    fn confirm(&mut self, message: &str, default: bool) -> crate::Result<bool>;

    /// Free text, optionally validated
    fn input(
        &mut self,
        message: &str,
        default: &str,
        validate: Option<Validator>,
    ) -> crate::Result<String>;
}

/// What the user wants to do this run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// New client from one of the discovered documents
    NewFromDiscovered,
    /// New client from a document the user points at
    NewOther,
    /// Regenerate every stored client
    GenerateAll,
    /// Regenerate a chosen subset of stored clients
    SelectStored,
}

impl Action {
    pub fn is_new(&self) -> bool {
        matches!(self, Self::NewFromDiscovered | Self::NewOther)
    }

    fn label(&self, has_discovered: bool) -> &'static str {
        match self {
            Self::NewFromDiscovered => "Generate a new API client from one of these swagger-docs",
            Self::NewOther if has_discovered => "Generate a new API client from another swagger-doc",
            Self::NewOther => "Generate a new API client",
            Self::GenerateAll => "Generate all stored API clients",
            Self::SelectStored => "Select stored API clients to generate",
        }
    }
}

/// Everything the predicates may look at besides the answers
#[derive(Debug, Clone, Copy)]
pub struct FlowContext<'a> {
    pub store: &'a ClientStore,
    pub discovered: &'a [DiscoveredDoc],
    /// Host project uses Eureka
    pub service_discovery_supported: bool,
    /// Host project has a front-end
    pub has_front_end: bool,
    pub default_spec: &'a str,
    pub default_client_name: &'a str,
}

impl FlowContext<'_> {
    /// Actions that make sense given the store and the discovery results
    pub fn available_actions(&self) -> Vec<Action> {
        let mut actions = Vec::with_capacity(4);
        if !self.discovered.is_empty() {
            actions.push(Action::NewFromDiscovered);
        }
        actions.push(Action::NewOther);
        if !self.store.is_empty() {
            actions.push(Action::GenerateAll);
            actions.push(Action::SelectStored);
        }
        actions
    }
}

/// Answers collected by the flow; `None` means the question was not asked
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Answers {
    pub action: Option<Action>,
    pub discovered_doc: Option<DiscoveredDoc>,
    pub use_service_discovery: Option<bool>,
    pub spec_location: Option<String>,
    pub client_name: Option<String>,
    pub client_types: Option<Vec<ClientType>>,
    pub save_for_reuse: Option<bool>,
    pub selected_clients: Option<Vec<String>>,
}

impl Answers {
    /// A hidden action question means the only option, a new client
    pub fn is_new(&self) -> bool {
        self.action.map_or(true, |a| a.is_new())
    }

    /// The client described by a "new" run, if both name and location are known
    pub fn new_client(&self) -> Option<(String, ClientEntry)> {
        if !self.is_new() {
            return None;
        }
        let name = self.client_name.clone()?;
        let spec = self.spec_location.clone()?;
        let entry = ClientEntry::new(spec, self.use_service_discovery.unwrap_or(false))
            .with_client_types(
                self.client_types
                    .clone()
                    .unwrap_or_else(|| vec![ClientType::Back]),
            );
        Some((name, entry))
    }

    // A chosen document wins over typed values.
    fn apply_discovered_doc(&mut self) {
        if let Some(doc) = &self.discovered_doc {
            self.spec_location = Some(doc.url.clone());
            match doc.client_name() {
                Some(name) => self.client_name = Some(name),
                None => log::warn!(
                    "'{}' cannot be used as a client name, keeping '{}'",
                    doc.name,
                    self.client_name.as_deref().unwrap_or_default()
                ),
            }
        }
    }
}

/// Identifies a question and how its answer is recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionId {
    Action,
    DiscoveredDoc,
    UseServiceDiscovery,
    SpecLocation,
    ClientName,
    ClientTypes,
    SaveForReuse,
    SelectedStoredClients,
}

/// Kind of terminal control used for a question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    Choice,
    MultiSelect,
    Confirm,
    Text,
    ValidatedText,
}

/// One node of the flow
#[derive(Clone, Copy)]
pub struct Question {
    pub id: QuestionId,
    pub kind: QuestionKind,
    pub message: &'static str,
    visible: fn(&Answers, &FlowContext<'_>) -> bool,
}

impl std::fmt::Debug for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Question")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

impl Question {
    pub fn is_visible(&self, answers: &Answers, ctx: &FlowContext<'_>) -> bool {
        (self.visible)(answers, ctx)
    }
}

fn action_visible(_: &Answers, ctx: &FlowContext<'_>) -> bool {
    ctx.available_actions().len() > 1
}

fn from_discovered(answers: &Answers, _: &FlowContext<'_>) -> bool {
    answers.action == Some(Action::NewFromDiscovered)
}

fn service_discovery_visible(answers: &Answers, ctx: &FlowContext<'_>) -> bool {
    answers.action == Some(Action::NewFromDiscovered) && ctx.service_discovery_supported
}

fn spec_location_visible(answers: &Answers, _: &FlowContext<'_>) -> bool {
    answers.is_new() && answers.discovered_doc.is_none()
}

// Asked unless service discovery reuses a usable document name.
fn client_name_visible(answers: &Answers, _: &FlowContext<'_>) -> bool {
    let reuses_doc_name = answers.use_service_discovery == Some(true)
        && answers
            .discovered_doc
            .as_ref()
            .is_some_and(|doc| doc.client_name().is_some());
    answers.is_new() && !reuses_doc_name
}

fn client_types_visible(answers: &Answers, ctx: &FlowContext<'_>) -> bool {
    answers.is_new() && ctx.has_front_end
}

fn new_client(answers: &Answers, _: &FlowContext<'_>) -> bool {
    answers.is_new()
}

fn select_stored(answers: &Answers, _: &FlowContext<'_>) -> bool {
    answers.action == Some(Action::SelectStored)
}

/// The flow, in asking order
pub static QUESTIONS: &[Question] = &[
    Question {
        id: QuestionId::Action,
        kind: QuestionKind::Choice,
        message: "What do you want to do ?",
        visible: action_visible,
    },
    Question {
        id: QuestionId::DiscoveredDoc,
        kind: QuestionKind::Choice,
        message: "Select the doc for which you want to create a client",
        visible: from_discovered,
    },
    Question {
        id: QuestionId::UseServiceDiscovery,
        kind: QuestionKind::Confirm,
        message: "Do you want to use Eureka service discovery ?",
        visible: service_discovery_visible,
    },
    Question {
        id: QuestionId::SpecLocation,
        kind: QuestionKind::Text,
        message: "Where is your Swagger/OpenAPI spec (URL or path) ?",
        visible: spec_location_visible,
    },
    Question {
        id: QuestionId::ClientName,
        kind: QuestionKind::ValidatedText,
        message: "What is the unique name for your API client ?",
        visible: client_name_visible,
    },
    Question {
        id: QuestionId::ClientTypes,
        kind: QuestionKind::MultiSelect,
        message: "Select which type of API client to generate",
        visible: client_types_visible,
    },
    Question {
        id: QuestionId::SaveForReuse,
        kind: QuestionKind::Confirm,
        message: "Do you want to save this config for future reuse ?",
        visible: new_client,
    },
    Question {
        id: QuestionId::SelectedStoredClients,
        kind: QuestionKind::MultiSelect,
        message: "Select which APIs you want to generate",
        visible: select_stored,
    },
];

const CLIENT_TYPE_CHOICES: [(ClientType, &str, bool); 2] = [
    (ClientType::Back, "Back-end client (Java/Spring Cloud Feign)", true),
    (ClientType::Front, "Front-end client (Angular)", false),
];

/// Runs [`QUESTIONS`] against a [`Prompter`]
#[derive(Debug, Clone, Copy)]
pub struct PromptFlow<'a> {
    ctx: FlowContext<'a>,
}

impl<'a> PromptFlow<'a> {
    pub fn new(ctx: FlowContext<'a>) -> Self {
        Self { ctx }
    }

    /// Ask every visible question in order and return the resolved answers.
    pub fn run<P: Prompter + ?Sized>(&self, prompter: &mut P) -> crate::Result<Answers> {
        let mut answers = Answers::default();
        for question in QUESTIONS {
            if !question.is_visible(&answers, &self.ctx) {
                log::debug!("Skipping question {:?}", question.id);
                continue;
            }
            self.ask(question, &mut answers, prompter)?;
        }
        answers.apply_discovered_doc();
        Ok(answers)
    }

    fn ask<P: Prompter + ?Sized>(
        &self,
        question: &Question,
        answers: &mut Answers,
        prompter: &mut P,
    ) -> crate::Result<()> {
        let message = question.message;
        match question.id {
            QuestionId::Action => {
                let actions = self.ctx.available_actions();
                let has_discovered = !self.ctx.discovered.is_empty();
                let labels: Vec<String> = actions
                    .iter()
                    .map(|a| a.label(has_discovered).to_string())
                    .collect();
                let index = prompter.select(message, &labels, 0)?;
                answers.action = Some(*pick(&actions, index)?);
            }
            QuestionId::DiscoveredDoc => {
                let labels: Vec<String> = self
                    .ctx
                    .discovered
                    .iter()
                    .map(|doc| format!("{} ({})", doc.name, doc.url))
                    .collect();
                let index = prompter.select(message, &labels, 0)?;
                answers.discovered_doc = Some(pick(self.ctx.discovered, index)?.clone());
            }
            QuestionId::UseServiceDiscovery => {
                answers.use_service_discovery = Some(prompter.confirm(message, true)?);
            }
            QuestionId::SpecLocation => {
                let spec = prompter.input(message, self.ctx.default_spec, None)?;
                answers.spec_location = Some(spec.trim().to_string());
            }
            QuestionId::ClientName => {
                let name = prompter.input(
                    message,
                    self.ctx.default_client_name,
                    Some(validate_client_name),
                )?;
                answers.client_name = Some(name);
            }
            QuestionId::ClientTypes => {
                let labels: Vec<String> = CLIENT_TYPE_CHOICES
                    .iter()
                    .map(|(_, label, _)| label.to_string())
                    .collect();
                let defaults: Vec<bool> = CLIENT_TYPE_CHOICES.iter().map(|c| c.2).collect();
                let indexes = prompter.multi_select(message, &labels, &defaults)?;
                let mut types = indexes
                    .into_iter()
                    .map(|i| pick(&CLIENT_TYPE_CHOICES, i).map(|c| c.0))
                    .collect::<crate::Result<Vec<_>>>()?;
                if types.is_empty() {
                    log::warn!("No client type selected, generating the back-end client");
                    types.push(ClientType::Back);
                }
                types.sort();
                types.dedup();
                answers.client_types = Some(types);
            }
            QuestionId::SaveForReuse => {
                answers.save_for_reuse = Some(prompter.confirm(message, false)?);
            }
            QuestionId::SelectedStoredClients => {
                let names: Vec<&str> = self.ctx.store.names().collect();
                let labels: Vec<String> = self
                    .ctx
                    .store
                    .entries()
                    .iter()
                    .map(|(name, entry)| format!("{} ({})", name, entry.spec_location))
                    .collect();
                let defaults = vec![false; labels.len()];
                let indexes = prompter.multi_select(message, &labels, &defaults)?;
                let selected = indexes
                    .into_iter()
                    .map(|i| pick(&names, i).map(|n| n.to_string()))
                    .collect::<crate::Result<Vec<_>>>()?;
                answers.selected_clients = Some(selected);
            }
        }
        Ok(())
    }
}

fn pick<T>(items: &[T], index: usize) -> crate::Result<&T> {
    items.get(index).ok_or_else(|| {
        Error::prompt(format!(
            "Choice {} is out of range ({} options)",
            index,
            items.len()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> DiscoveredDoc {
        DiscoveredDoc {
            url: "http://localhost:8080/foo/v2/api-docs".into(),
            name: "foo".into(),
        }
    }

    async fn empty_store() -> ClientStore {
        let dir = tempfile::tempdir().unwrap();
        ClientStore::load(dir.path(), "clientgen").await.unwrap()
    }

    async fn filled_store() -> (tempfile::TempDir, ClientStore) {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ClientStore::load(dir.path(), "clientgen").await.unwrap();
        store
            .save("petstore", ClientEntry::new("petstore.json", false))
            .await
            .unwrap();
        (dir, store)
    }

    fn ctx<'a>(store: &'a ClientStore, discovered: &'a [DiscoveredDoc]) -> FlowContext<'a> {
        FlowContext {
            store,
            discovered,
            service_discovery_supported: true,
            has_front_end: false,
            default_spec: "http://petstore.swagger.io/v2/swagger.json",
            default_client_name: "petstore",
        }
    }

    fn visible(id: QuestionId, answers: &Answers, ctx: &FlowContext<'_>) -> bool {
        QUESTIONS
            .iter()
            .find(|q| q.id == id)
            .map(|q| q.is_visible(answers, ctx))
            .unwrap()
    }

    #[tokio::test]
    async fn test_only_new_when_nothing_known() {
        let store = empty_store().await;
        let ctx = ctx(&store, &[]);
        assert_eq!(ctx.available_actions(), vec![Action::NewOther]);
        assert!(!visible(QuestionId::Action, &Answers::default(), &ctx));
        // Hidden action is an implicit "new"
        assert!(visible(QuestionId::SpecLocation, &Answers::default(), &ctx));
        assert!(visible(QuestionId::ClientName, &Answers::default(), &ctx));
        assert!(visible(QuestionId::SaveForReuse, &Answers::default(), &ctx));
        assert!(!visible(QuestionId::SelectedStoredClients, &Answers::default(), &ctx));
    }

    #[tokio::test]
    async fn test_actions_with_discovery_and_store() {
        let (_dir, store) = filled_store().await;
        let docs = [doc()];
        let ctx = ctx(&store, &docs);
        assert_eq!(
            ctx.available_actions(),
            vec![
                Action::NewFromDiscovered,
                Action::NewOther,
                Action::GenerateAll,
                Action::SelectStored
            ]
        );
        assert!(visible(QuestionId::Action, &Answers::default(), &ctx));
    }

    #[tokio::test]
    async fn test_discovered_branch_predicates() {
        let store = empty_store().await;
        let docs = [doc()];
        let mut flow_ctx = ctx(&store, &docs);
        let mut answers = Answers {
            action: Some(Action::NewFromDiscovered),
            ..Default::default()
        };
        assert!(visible(QuestionId::DiscoveredDoc, &answers, &flow_ctx));
        assert!(visible(QuestionId::UseServiceDiscovery, &answers, &flow_ctx));

        answers.discovered_doc = Some(doc());
        assert!(!visible(QuestionId::SpecLocation, &answers, &flow_ctx));

        answers.use_service_discovery = Some(true);
        assert!(!visible(QuestionId::ClientName, &answers, &flow_ctx));
        answers.use_service_discovery = Some(false);
        assert!(visible(QuestionId::ClientName, &answers, &flow_ctx));

        // A published name with nothing usable in it means the name is asked
        answers.use_service_discovery = Some(true);
        answers.discovered_doc = Some(DiscoveredDoc {
            name: "(-)".into(),
            ..doc()
        });
        assert!(visible(QuestionId::ClientName, &answers, &flow_ctx));

        flow_ctx.service_discovery_supported = false;
        assert!(!visible(QuestionId::UseServiceDiscovery, &answers, &flow_ctx));
    }

    #[test]
    fn test_discovered_doc_name_is_made_a_valid_client_name() {
        let mut answers = Answers {
            action: Some(Action::NewFromDiscovered),
            discovered_doc: Some(DiscoveredDoc {
                name: "foo (foo)".into(),
                ..doc()
            }),
            use_service_discovery: Some(true),
            ..Default::default()
        };
        answers.apply_discovered_doc();
        assert_eq!(answers.client_name.as_deref(), Some("foo"));

        answers.discovered_doc = Some(DiscoveredDoc {
            name: "(-)".into(),
            ..doc()
        });
        answers.client_name = Some("typed".into());
        answers.apply_discovered_doc();
        assert_eq!(answers.client_name.as_deref(), Some("typed"));
    }

    #[tokio::test]
    async fn test_stored_actions_hide_new_questions() {
        let (_dir, store) = filled_store().await;
        let ctx = ctx(&store, &[]);
        for action in [Action::GenerateAll, Action::SelectStored] {
            let answers = Answers {
                action: Some(action),
                ..Default::default()
            };
            assert!(!visible(QuestionId::SpecLocation, &answers, &ctx));
            assert!(!visible(QuestionId::ClientName, &answers, &ctx));
            assert!(!visible(QuestionId::SaveForReuse, &answers, &ctx));
            assert_eq!(
                visible(QuestionId::SelectedStoredClients, &answers, &ctx),
                action == Action::SelectStored
            );
        }
    }

    #[tokio::test]
    async fn test_client_types_need_front_end() {
        let store = empty_store().await;
        let mut flow_ctx = ctx(&store, &[]);
        assert!(!visible(QuestionId::ClientTypes, &Answers::default(), &flow_ctx));
        flow_ctx.has_front_end = true;
        assert!(visible(QuestionId::ClientTypes, &Answers::default(), &flow_ctx));
    }

    #[test]
    fn test_discovered_doc_overrides_typed_values() {
        let mut answers = Answers {
            action: Some(Action::NewFromDiscovered),
            discovered_doc: Some(doc()),
            client_name: Some("typed".into()),
            ..Default::default()
        };
        answers.apply_discovered_doc();
        assert_eq!(answers.spec_location.as_deref(), Some("http://localhost:8080/foo/v2/api-docs"));
        assert_eq!(answers.client_name.as_deref(), Some("foo"));
    }

    #[test]
    fn test_new_client_defaults() {
        let answers = Answers {
            spec_location: Some("spec.json".into()),
            client_name: Some("demo".into()),
            ..Default::default()
        };
        assert_eq!(
            answers.new_client(),
            Some(("demo".to_string(), ClientEntry::new("spec.json", false)))
        );

        let stored = Answers {
            action: Some(Action::GenerateAll),
            ..answers
        };
        assert_eq!(stored.new_client(), None);
    }
}
