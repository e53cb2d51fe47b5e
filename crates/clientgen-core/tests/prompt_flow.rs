//! Prompt flow driven by scripted answers

mod common;

use clientgen_core::prompt::{Action, FlowContext, PromptFlow};
use clientgen_core::{ClientEntry, ClientStore, ClientType, DiscoveredDoc, Result};
use common::{input, Reply, ScriptedPrompter};
use tempfile::tempdir;

const DEFAULT_SPEC: &str = "http://petstore.swagger.io/v2/swagger.json";

fn flow_context<'a>(store: &'a ClientStore, discovered: &'a [DiscoveredDoc]) -> FlowContext<'a> {
    FlowContext {
        store,
        discovered,
        service_discovery_supported: false,
        has_front_end: true,
        default_spec: DEFAULT_SPEC,
        default_client_name: "petstore",
    }
}

fn foo_doc() -> DiscoveredDoc {
    DiscoveredDoc {
        url: "http://localhost:8080/foo/v2/api-docs".into(),
        name: "foo".into(),
    }
}

#[tokio::test]
async fn test_first_run_asks_only_about_the_new_client() -> Result<()> {
    let dir = tempdir()?;
    let store = ClientStore::load(dir.path(), "clientgen").await?;

    let mut prompter = ScriptedPrompter::new([
        input(""),
        input("billing"),
        Reply::MultiSelect(vec![]),
        Reply::Confirm(false),
    ]);
    let answers = PromptFlow::new(flow_context(&store, &[])).run(&mut prompter)?;

    assert_eq!(answers.action, None);
    assert!(answers.is_new());
    assert_eq!(answers.spec_location.as_deref(), Some(DEFAULT_SPEC));
    // An empty selection still generates the back-end client
    assert_eq!(answers.client_types, Some(vec![ClientType::Back]));
    assert_eq!(
        answers.new_client(),
        Some(("billing".to_string(), ClientEntry::new(DEFAULT_SPEC, false)))
    );
    assert_eq!(answers.selected_clients, None);
    Ok(())
}

#[tokio::test]
async fn test_select_stored_clients() -> Result<()> {
    let dir = tempdir()?;
    let mut store = ClientStore::load(dir.path(), "clientgen").await?;
    store.save("alpha", ClientEntry::new("a.json", false)).await?;
    store.save("beta", ClientEntry::new("b.json", false)).await?;

    // Without discovered docs: new, generate all, select
    let mut prompter = ScriptedPrompter::new([Reply::Select(2), Reply::MultiSelect(vec![1])]);
    let answers = PromptFlow::new(flow_context(&store, &[])).run(&mut prompter)?;

    assert_eq!(answers.action, Some(Action::SelectStored));
    assert_eq!(answers.selected_clients, Some(vec!["beta".to_string()]));
    assert_eq!(answers.spec_location, None);
    assert_eq!(answers.client_name, None);
    assert_eq!(answers.save_for_reuse, None);
    assert_eq!(prompter.asked.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_discovered_doc_name_replaces_typed_name() -> Result<()> {
    let dir = tempdir()?;
    let store = ClientStore::load(dir.path(), "clientgen").await?;
    let discovered = [foo_doc()];

    // No service discovery on this host: the name is still asked
    let mut prompter = ScriptedPrompter::new([
        Reply::Select(0),
        Reply::Select(0),
        input("typed"),
        Reply::MultiSelect(vec![0]),
        Reply::Confirm(true),
    ]);
    let answers = PromptFlow::new(flow_context(&store, &discovered)).run(&mut prompter)?;

    assert_eq!(answers.action, Some(Action::NewFromDiscovered));
    assert_eq!(answers.use_service_discovery, None);
    assert_eq!(
        answers.new_client(),
        Some((
            "foo".to_string(),
            ClientEntry::new("http://localhost:8080/foo/v2/api-docs", false)
        ))
    );
    assert_eq!(prompter.remaining(), 0);
    Ok(())
}

#[tokio::test]
async fn test_service_discovery_skips_name_question() -> Result<()> {
    let dir = tempdir()?;
    let store = ClientStore::load(dir.path(), "clientgen").await?;
    let discovered = [foo_doc()];
    let ctx = FlowContext {
        service_discovery_supported: true,
        has_front_end: false,
        ..flow_context(&store, &discovered)
    };

    let mut prompter =
        ScriptedPrompter::new([Reply::Select(0), Reply::Select(0), Reply::Confirm(true), Reply::Confirm(false)]);
    let answers = PromptFlow::new(ctx).run(&mut prompter)?;

    assert_eq!(answers.use_service_discovery, Some(true));
    let (name, entry) = answers.new_client().unwrap();
    assert_eq!(name, "foo");
    assert!(entry.use_service_discovery);
    assert_eq!(entry.client_types, vec![ClientType::Back]);
    assert!(!prompter
        .asked
        .iter()
        .any(|q| q.contains("unique name")));
    Ok(())
}

#[tokio::test]
async fn test_other_doc_when_docs_were_discovered() -> Result<()> {
    let dir = tempdir()?;
    let store = ClientStore::load(dir.path(), "clientgen").await?;
    let discovered = [foo_doc()];

    let mut prompter = ScriptedPrompter::new([
        Reply::Select(1),
        input("./specs/api.yml"),
        input("local_api"),
        Reply::MultiSelect(vec![1]),
        Reply::Confirm(false),
    ]);
    let answers = PromptFlow::new(flow_context(&store, &discovered)).run(&mut prompter)?;

    assert_eq!(answers.action, Some(Action::NewOther));
    assert_eq!(answers.discovered_doc, None);
    let (name, entry) = answers.new_client().unwrap();
    assert_eq!(name, "local_api");
    assert_eq!(entry.spec_location, "./specs/api.yml");
    assert_eq!(entry.client_types, vec![ClientType::Front]);
    Ok(())
}

#[tokio::test]
async fn test_published_doc_name_becomes_valid_client_name() -> Result<()> {
    let dir = tempdir()?;
    let store = ClientStore::load(dir.path(), "clientgen").await?;
    let discovered = [DiscoveredDoc {
        name: "foo (foo)".into(),
        ..foo_doc()
    }];
    let ctx = FlowContext {
        service_discovery_supported: true,
        has_front_end: false,
        ..flow_context(&store, &discovered)
    };

    let mut prompter =
        ScriptedPrompter::new([Reply::Select(0), Reply::Select(0), Reply::Confirm(true), Reply::Confirm(true)]);
    let answers = PromptFlow::new(ctx).run(&mut prompter)?;

    let (name, _) = answers.new_client().unwrap();
    assert_eq!(name, "foo");
    assert!(clientgen_core::utils::validate_client_name(&name).is_ok());
    Ok(())
}

#[tokio::test]
async fn test_unusable_doc_name_asks_for_a_name() -> Result<()> {
    let dir = tempdir()?;
    let store = ClientStore::load(dir.path(), "clientgen").await?;
    let discovered = [DiscoveredDoc {
        name: "(-)".into(),
        ..foo_doc()
    }];
    let ctx = FlowContext {
        service_discovery_supported: true,
        has_front_end: false,
        ..flow_context(&store, &discovered)
    };

    let mut prompter = ScriptedPrompter::new([
        Reply::Select(0),
        Reply::Select(0),
        Reply::Confirm(true),
        input("gateway_docs"),
        Reply::Confirm(false),
    ]);
    let answers = PromptFlow::new(ctx).run(&mut prompter)?;

    let (name, entry) = answers.new_client().unwrap();
    assert_eq!(name, "gateway_docs");
    assert!(entry.use_service_discovery);
    assert_eq!(prompter.remaining(), 0);
    Ok(())
}
