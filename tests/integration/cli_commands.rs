use cartographer::access::{Actor, UserRole};
use cartographer::directory::{MemoryDirectory, NetworkDirectory};
use cartographer::layout::LayoutDocument;
use cartographer::tooling::{Cli, CliContext, Commands, LayoutCommands, NetworkCommands};
use cartographer::{ApiError, LayoutError, Position};
use clap::Parser;
use std::sync::Arc;
use tempfile::TempDir;

const TREE_JSON: &str = r#"{
  "id": "root",
  "name": "Home",
  "children": [
    {"id": "10.0.0.1", "name": "Router", "role": "gateway/router"},
    {"id": "10.0.0.2", "name": "Phone", "role": "client", "x": 7, "y": 8}
  ]
}"#;

fn context(role: UserRole) -> CliContext {
    CliContext::with_directory(
        Arc::new(MemoryDirectory::new()),
        Actor::new("local", role),
    )
}

fn parse(args: &[&str]) -> Commands {
    let mut full = vec!["cartographer"];
    full.extend_from_slice(args);
    Cli::try_parse_from(full).unwrap().command
}

fn create(ctx: &CliContext, name: &str) -> String {
    ctx.execute(&parse(&["network", "create", name])).unwrap();
    ctx.directory()
        .list_networks()
        .unwrap()
        .into_iter()
        .find(|n| n.name == name)
        .unwrap()
        .id
}

#[test]
fn network_lifecycle() {
    let ctx = context(UserRole::Owner);
    let id = create(&ctx, "Home");

    let listed = ctx
        .execute(&parse(&["network", "list", "--format", "json"]))
        .unwrap();
    let networks: serde_json::Value = serde_json::from_str(&listed).unwrap();
    assert_eq!(networks[0]["name"], "Home");

    ctx.execute(&parse(&["network", "rename", id.as_str(), "Cabin"]))
        .unwrap();
    let shown = ctx.execute(&parse(&["network", "show", id.as_str()])).unwrap();
    assert!(shown.contains("Cabin"));

    ctx.execute(&parse(&["network", "delete", id.as_str()])).unwrap();
    assert!(matches!(
        ctx.execute(&parse(&["network", "show", id.as_str()])),
        Err(ApiError::NetworkNotFound(_))
    ));
}

#[test]
fn list_rejects_unknown_format() {
    let ctx = context(UserRole::Owner);
    assert!(matches!(
        ctx.execute(&parse(&["network", "list", "--format", "yaml"])),
        Err(ApiError::InvalidRequest(_))
    ));
}

#[test]
fn export_with_moves_and_save_then_show() {
    let temp_dir = TempDir::new().unwrap();
    let tree_path = temp_dir.path().join("tree.json");
    std::fs::write(&tree_path, TREE_JSON).unwrap();
    let ctx = context(UserRole::Owner);
    let id = create(&ctx, "Home");
    let tree_arg = tree_path.to_str().unwrap();

    let exported = ctx
        .execute(&parse(&[
            "layout",
            "export",
            id.as_str(),
            "--tree",
            tree_arg,
            "--set",
            "10.0.0.1=100,200",
            "--save",
        ]))
        .unwrap();
    let doc = LayoutDocument::parse(&exported).unwrap();
    assert_eq!(doc.position("10.0.0.1"), Some(Position::new(100.0, 200.0)));
    // Fixed coordinates read from the tree file count as positions
    assert_eq!(doc.position("10.0.0.2"), Some(Position::new(7.0, 8.0)));
    assert_eq!(doc.position("root"), None);

    let shown = ctx.execute(&parse(&["layout", "show", id.as_str()])).unwrap();
    assert_eq!(LayoutDocument::parse(&shown).unwrap(), doc);
}

#[test]
fn export_without_save_leaves_directory_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let tree_path = temp_dir.path().join("tree.json");
    std::fs::write(&tree_path, TREE_JSON).unwrap();
    let ctx = context(UserRole::Owner);
    let id = create(&ctx, "Home");

    ctx.execute(&parse(&[
        "layout",
        "export",
        id.as_str(),
        "--tree",
        tree_path.to_str().unwrap(),
        "--set",
        "10.0.0.1=1,1",
    ]))
    .unwrap();

    assert!(ctx.directory().get_layout(&id).unwrap().layout_data.is_none());
    let shown = ctx.execute(&parse(&["layout", "show", id.as_str()])).unwrap();
    assert!(shown.starts_with("No saved layout"));
}

#[test]
fn import_accepts_document_and_rejects_garbage() {
    let temp_dir = TempDir::new().unwrap();
    let good = temp_dir.path().join("good.json");
    let bad = temp_dir.path().join("bad.json");
    std::fs::write(
        &good,
        concat!(
            r#"{"version":1,"timestamp":"2026-01-01T00:00:00.000Z","#,
            r#""positions":{"a":{"x":1,"y":2}},"root":null}"#,
        ),
    )
    .unwrap();
    std::fs::write(&bad, "{ not json").unwrap();
    let ctx = context(UserRole::Owner);
    let id = create(&ctx, "Home");

    let summary = ctx
        .execute(&parse(&["layout", "import", id.as_str(), good.to_str().unwrap()]))
        .unwrap();
    assert!(summary.contains("1 positions"));

    let result = ctx.execute(&parse(&["layout", "import", id.as_str(), bad.to_str().unwrap()]));
    assert!(matches!(
        result,
        Err(ApiError::Layout(LayoutError::MalformedDocument(_)))
    ));
    let kept = ctx.directory().get_layout(&id).unwrap().layout_data.unwrap();
    assert_eq!(kept.position("a"), Some(Position::new(1.0, 2.0)));
}

#[test]
fn readonly_actor_cannot_mutate() {
    let directory = Arc::new(MemoryDirectory::new());
    let owner = CliContext::with_directory(directory.clone(), Actor::new("o", UserRole::Owner));
    let id = create(&owner, "Home");
    owner
        .execute(&parse(&["permission", "add", id.as_str(), "v", "--role", "editor"]))
        .unwrap();
    let viewer = CliContext::with_directory(directory, Actor::new("v", UserRole::ReadOnly));

    assert!(viewer.execute(&parse(&["network", "show", id.as_str()])).is_ok());
    for args in [
        vec!["network", "create", "Other"],
        vec!["network", "rename", id.as_str(), "X"],
        vec!["network", "delete", id.as_str()],
    ] {
        assert!(matches!(
            viewer.execute(&parse(&args)),
            Err(ApiError::Unauthorized(_))
        ));
    }
}

#[test]
fn sharing_controls_per_network_access() {
    let directory = Arc::new(MemoryDirectory::new());
    let alice =
        CliContext::with_directory(directory.clone(), Actor::new("alice", UserRole::ReadWrite));
    let bob = CliContext::with_directory(directory, Actor::new("bob", UserRole::ReadWrite));
    let id = create(&alice, "Home");

    assert!(bob.execute(&parse(&["network", "list"])).unwrap().starts_with("No networks"));
    for args in [
        vec!["network", "show", id.as_str()],
        vec!["network", "rename", id.as_str(), "Mine"],
        vec!["layout", "show", id.as_str()],
    ] {
        assert!(matches!(
            bob.execute(&parse(&args)),
            Err(ApiError::Unauthorized(_))
        ));
    }

    alice
        .execute(&parse(&["permission", "add", id.as_str(), "bob"]))
        .unwrap();
    let listed = bob
        .execute(&parse(&["network", "list", "--format", "json"]))
        .unwrap();
    let networks: serde_json::Value = serde_json::from_str(&listed).unwrap();
    assert_eq!(networks[0]["permission"], "viewer");
    assert_eq!(networks[0]["is_owner"], false);
    assert!(matches!(
        bob.execute(&parse(&["network", "rename", id.as_str(), "Mine"])),
        Err(ApiError::Unauthorized(_))
    ));

    alice
        .execute(&parse(&["permission", "add", id.as_str(), "bob", "--role", "editor"]))
        .unwrap();
    bob.execute(&parse(&["network", "rename", id.as_str(), "Shared"]))
        .unwrap();
    for args in [
        vec!["network", "delete", id.as_str()],
        vec!["permission", "list", id.as_str()],
        vec!["permission", "add", id.as_str(), "carol"],
    ] {
        assert!(matches!(
            bob.execute(&parse(&args)),
            Err(ApiError::Unauthorized(_))
        ));
    }

    let shared = alice
        .execute(&parse(&["permission", "list", id.as_str()]))
        .unwrap();
    assert!(shared.contains("bob") && shared.contains("editor"));

    alice
        .execute(&parse(&["permission", "remove", id.as_str(), "bob"]))
        .unwrap();
    assert!(matches!(
        bob.execute(&parse(&["network", "show", id.as_str()])),
        Err(ApiError::Unauthorized(_))
    ));
    assert!(matches!(
        alice.execute(&parse(&["permission", "remove", id.as_str(), "bob"])),
        Err(ApiError::PermissionNotFound { .. })
    ));
}

#[test]
fn argument_parsing() {
    assert!(matches!(
        parse(&["network", "create", "Lab", "--description", "rack 2"]),
        Commands::Network {
            command: NetworkCommands::Create { ref description, .. }
        } if description.as_deref() == Some("rack 2")
    ));

    match parse(&[
        "layout", "export", "n1", "--tree", "t.json", "--set", "a=1,2", "--set", "b=-3,4.5",
    ]) {
        Commands::Layout {
            command: LayoutCommands::Export { moves, save, .. },
        } => {
            assert_eq!(moves.len(), 2);
            assert_eq!(moves[1].id, "b");
            assert_eq!((moves[1].x, moves[1].y), (-3.0, 4.5));
            assert!(!save);
        }
        _ => panic!("expected layout export"),
    }

    let base = ["cartographer", "layout", "export", "n1", "--tree", "t.json"];
    let mut bad_set = base.to_vec();
    bad_set.extend(["--set", "a=1"]);
    assert!(Cli::try_parse_from(bad_set).is_err());
    assert!(Cli::try_parse_from(["cartographer", "layout", "export", "n1"]).is_err());
    assert!(Cli::try_parse_from(["cartographer", "network"]).is_err());
}
