use cartographer::access::{Actor, NetworkRole, UserRole};
use cartographer::directory::{
    CreateNetwork, CreateNetworkPermission, NetworkDirectory, SledDirectory,
};
use cartographer::{ApiError, DeviceRole, LayoutError, LayoutSession, Position, TopologyNode};
use tempfile::TempDir;

fn discovered_tree() -> TopologyNode {
    TopologyNode::new("root", "Office").with_children(vec![
        TopologyNode::new("10.0.0.1", "Gateway").with_role(DeviceRole::GatewayRouter),
        TopologyNode::new("group:clients", "Clients")
            .with_role(DeviceRole::Group)
            .with_children(vec![
                TopologyNode::new("10.0.0.50", "Desk"),
                TopologyNode::new("10.0.0.51", "Printer"),
            ]),
    ])
}

fn owner() -> Actor {
    Actor::new("alice", UserRole::Owner)
}

fn create_network(directory: &dyn NetworkDirectory) -> String {
    directory
        .create_network(
            &owner(),
            CreateNetwork {
                name: "Office".to_string(),
                description: None,
            },
        )
        .unwrap()
        .id
}

#[test]
fn positions_survive_directory_reopen_and_rediscovery() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("directory");

    let network_id = {
        let directory = SledDirectory::open(&path).unwrap();
        let network_id = create_network(&directory);
        let (mut session, report) =
            LayoutSession::open(&directory, &network_id, discovered_tree(), owner()).unwrap();
        assert_eq!(report.applied, 0);
        session.move_node("10.0.0.1", 0.0, -120.0);
        session.move_node("10.0.0.50", 80.0, 60.0);
        session.save(&directory).unwrap();
        network_id
    };

    let directory = SledDirectory::open(&path).unwrap();
    // Rediscovery dropped the printer and found a new laptop
    let rediscovered = TopologyNode::new("root", "Office").with_children(vec![
        TopologyNode::new("10.0.0.1", "Gateway"),
        TopologyNode::new("group:clients", "Clients").with_children(vec![
            TopologyNode::new("10.0.0.50", "Desk"),
            TopologyNode::new("10.0.0.52", "Laptop"),
        ]),
    ]);
    let (session, report) =
        LayoutSession::open(&directory, &network_id, rediscovered, owner()).unwrap();

    assert_eq!(report.applied, 2);
    assert!(report.unmatched.is_empty());
    let root = session.root();
    assert_eq!(
        root.children()[0].fixed_position(),
        Some(Position::new(0.0, -120.0))
    );
    let clients = &root.children()[1];
    assert_eq!(
        clients.children()[0].fixed_position(),
        Some(Position::new(80.0, 60.0))
    );
    assert_eq!(clients.children()[1].fixed_position(), None);
    assert_eq!(session.store().len(), 2);
}

fn grant(directory: &dyn NetworkDirectory, network_id: &str, user_id: &str, role: NetworkRole) {
    directory
        .add_permission(
            network_id,
            CreateNetworkPermission {
                user_id: user_id.to_string(),
                role,
            },
        )
        .unwrap();
}

#[test]
fn readonly_member_can_open_but_not_save() {
    let temp_dir = TempDir::new().unwrap();
    let directory = SledDirectory::open(temp_dir.path()).unwrap();
    let network_id = create_network(&directory);
    grant(&directory, &network_id, "bob", NetworkRole::Editor);
    let viewer = Actor::new("bob", UserRole::ReadOnly);

    let (mut session, _) =
        LayoutSession::open(&directory, &network_id, discovered_tree(), viewer).unwrap();
    session.move_node("10.0.0.1", 1.0, 2.0);

    assert!(matches!(
        session.save(&directory),
        Err(ApiError::Unauthorized(_))
    ));
    assert!(directory
        .get_layout(&network_id)
        .unwrap()
        .layout_data
        .is_none());
}

#[test]
fn duplicate_ids_are_rejected_before_apply() {
    let temp_dir = TempDir::new().unwrap();
    let directory = SledDirectory::open(temp_dir.path()).unwrap();
    let network_id = create_network(&directory);
    let tree = TopologyNode::new("root", "Office").with_children(vec![
        TopologyNode::new("10.0.0.1", "A"),
        TopologyNode::new("10.0.0.1", "B"),
    ]);

    let result = LayoutSession::open(&directory, &network_id, tree, owner());

    assert!(matches!(
        result,
        Err(ApiError::Layout(LayoutError::DuplicateNodeId(ref id))) if id == "10.0.0.1"
    ));
}

#[test]
fn reset_drops_live_moves_from_next_export() {
    let temp_dir = TempDir::new().unwrap();
    let directory = SledDirectory::open(temp_dir.path()).unwrap();
    let network_id = create_network(&directory);
    let tree = discovered_tree();

    let (mut session, _) = LayoutSession::open(&directory, &network_id, tree, owner()).unwrap();
    session.move_node("10.0.0.51", 3.0, 4.0);
    session.reset();

    assert!(session.export().positions.is_empty());
}

#[test]
fn unknown_network_fails_to_open() {
    let temp_dir = TempDir::new().unwrap();
    let directory = SledDirectory::open(temp_dir.path()).unwrap();

    let result = LayoutSession::open(&directory, "missing", discovered_tree(), owner());

    assert!(matches!(result, Err(ApiError::NetworkNotFound(_))));
}

#[test]
fn grants_control_who_can_open_and_save() {
    let temp_dir = TempDir::new().unwrap();
    let directory = SledDirectory::open(temp_dir.path()).unwrap();
    let network_id = create_network(&directory);
    let dave = Actor::new("dave", UserRole::ReadWrite);

    assert!(matches!(
        LayoutSession::open(&directory, &network_id, discovered_tree(), dave.clone()),
        Err(ApiError::Unauthorized(_))
    ));

    grant(&directory, &network_id, "dave", NetworkRole::Viewer);
    let (mut session, _) =
        LayoutSession::open(&directory, &network_id, discovered_tree(), dave.clone()).unwrap();
    session.move_node("10.0.0.1", 9.0, 9.0);
    assert!(matches!(
        session.save(&directory),
        Err(ApiError::Unauthorized(_))
    ));

    grant(&directory, &network_id, "dave", NetworkRole::Editor);
    let saved = session.save(&directory).unwrap();
    assert_eq!(
        saved.layout_data.unwrap().position("10.0.0.1"),
        Some(Position::new(9.0, 9.0))
    );

    directory.remove_permission(&network_id, "dave").unwrap();
    assert!(matches!(
        LayoutSession::open(&directory, &network_id, discovered_tree(), dave),
        Err(ApiError::Unauthorized(_))
    ));
}

#[test]
fn deep_tree_layout_survives_sled() {
    let temp_dir = TempDir::new().unwrap();
    let directory = SledDirectory::open(temp_dir.path()).unwrap();
    let network_id = create_network(&directory);
    let mut tree = TopologyNode::new("leaf", "Leaf");
    for level in (0..220).rev() {
        tree = TopologyNode::new(format!("hop-{}", level), "Hop").with_children(vec![tree]);
    }

    let (mut session, _) =
        LayoutSession::open(&directory, &network_id, tree.clone(), owner()).unwrap();
    session.move_node("leaf", 1.5, -2.5);
    session.save(&directory).unwrap();

    let (reopened, report) =
        LayoutSession::open(&directory, &network_id, tree, owner()).unwrap();
    assert_eq!(report.applied, 1);
    assert_eq!(reopened.store().get("leaf"), Some(Position::new(1.5, -2.5)));
}
