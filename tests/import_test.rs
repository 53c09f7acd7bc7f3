use sylva::import::GraphImporter;
use sylva::source::{Edge, IndexDescription, IndexTarget, IndexType, MemoryGraph, Node, Value};
use sylva::store::{ClassKind, Database, PropertyType, ScalarType, StoreError};

fn import(graph: &MemoryGraph) -> (Database, sylva::ImportReport) {
    let mut db = Database::new();
    let report = GraphImporter::new(graph).run(&mut db).unwrap();
    (db, report)
}

#[test]
fn test_gene_with_alias_array() {
    // One node with a collection-valued property becomes one vertex with
    // a typed string array
    let mut graph = MemoryGraph::new();
    graph.add_node(
        Node::new(1, "Gene")
            .with_property("name", "TP53")
            .with_property("aliases", Value::List(vec!["p53".into(), "TRP53".into()])),
    );

    let (db, report) = import(&graph);
    assert_eq!(report.nodes_created, 1);
    assert!(!report.has_problems());

    let class = db.class("Gene").unwrap();
    assert_eq!(class.kind, ClassKind::Vertex);
    assert_eq!(
        class.property_type("name"),
        Some(PropertyType::Scalar(ScalarType::String))
    );
    assert_eq!(
        class.property_type("aliases"),
        Some(PropertyType::Array(ScalarType::String))
    );

    let vertex = db.records("Gene").next().unwrap();
    assert_eq!(vertex.property("name"), Some(&Value::from("TP53")));
    assert_eq!(
        vertex.property("aliases"),
        Some(&Value::StringArray(vec!["p53".into(), "TRP53".into()]))
    );
}

#[test]
fn test_round_trip_cardinality() {
    let mut graph = MemoryGraph::new();
    for id in 1..=20 {
        graph.add_node(Node::new(id, "Gene").with_property("name", format!("G{}", id)));
    }
    for id in 1..=19 {
        graph.add_edge(Edge::new(100 + id, "INTERACTS_WITH", id, id + 1));
    }

    let (db, report) = import(&graph);
    assert_eq!(report.nodes_created, 20);
    assert_eq!(report.edges_created, 19);
    assert_eq!(db.vertex_count(), 20);
    assert_eq!(db.edge_count(), 19);
    assert_eq!(db.record_count("INTERACTS_WITH"), 19);
}

#[test]
fn test_unresolved_edge_endpoint_is_reported() {
    // Node 2 is never imported; the edge referencing it is a reported
    // reference failure, and no edge record is created
    let mut graph = MemoryGraph::new();
    graph.add_node(Node::new(1, "Gene"));
    graph.add_edge(Edge::new(5, "INTERACTS_WITH", 1, 2));

    let (db, report) = import(&graph);
    assert_eq!(report.edges_created, 0);
    assert_eq!(report.edges_unresolved, 1);
    assert!(report.has_problems());
    assert_eq!(db.record_count("INTERACTS_WITH"), 0);
    // The edge class itself still exists
    assert_eq!(db.class("INTERACTS_WITH").unwrap().kind, ClassKind::Edge);
}

#[test]
fn test_unique_index_rejects_later_duplicate() {
    let mut graph = MemoryGraph::new();
    graph.add_node(Node::new(1, "Gene").with_property("name", "TP53"));
    graph.declare_index(IndexDescription::new(
        IndexTarget::Node,
        "Gene",
        "name",
        IndexType::Unique,
    ));

    let (mut db, report) = import(&graph);
    assert_eq!(report.indices_created, 1);

    let duplicate = db.create_vertex("Gene").unwrap();
    db.set_property(duplicate, "name", Value::from("TP53")).unwrap();
    assert!(matches!(
        db.save(duplicate),
        Err(StoreError::DuplicateValue { .. })
    ));
}

#[test]
fn test_ignored_keys_never_materialize() {
    let mut graph = MemoryGraph::new();
    graph.add_node(
        Node::new(1, "Gene")
            .with_property("__id", 1i64)
            .with_property("__label", "Gene")
            .with_property("name", "TP53"),
    );
    graph.add_edge(
        Edge::new(5, "SELF", 1, 1)
            .with_property("__from_id", 1i64)
            .with_property("since", 2020i64),
    );

    let (db, report) = import(&graph);
    assert!(!report.has_problems());

    let vertex = db.records("Gene").next().unwrap();
    assert!(!vertex.has_property("__id"));
    assert!(!vertex.has_property("__label"));
    assert!(vertex.has_property("name"));
    assert!(!db.class("Gene").unwrap().has_property("__id"));

    let edge = db.records("SELF").next().unwrap();
    assert!(!edge.has_property("__from_id"));
    assert_eq!(edge.property("since"), Some(&Value::Long(2020)));
}

#[test]
fn test_null_properties_are_stripped() {
    let mut graph = MemoryGraph::new();
    graph.add_node(
        Node::new(1, "Gene")
            .with_property("name", "TP53")
            .with_property("obsolete", Value::Null),
    );

    let (db, report) = import(&graph);
    // Dropping a null is normal behavior, not a problem
    assert!(!report.has_problems());
    let vertex = db.records("Gene").next().unwrap();
    assert!(!vertex.has_property("obsolete"));
}

#[test]
fn test_array_index_is_skipped_without_store_call() {
    let mut graph = MemoryGraph::new();
    graph.add_node(
        Node::new(1, "Gene").with_property("aliases", Value::List(vec!["p53".into()])),
    );
    graph.declare_index(
        IndexDescription::new(IndexTarget::Node, "Gene", "aliases", IndexType::NonUnique).array(),
    );

    let (db, report) = import(&graph);
    assert_eq!(report.indices_skipped, 1);
    assert_eq!(report.indices_created, 0);
    assert!(!report.has_problems());
    assert!(db.indexes().next().is_none());
}

#[test]
fn test_missing_property_index_fails_without_aborting_the_rest() {
    let mut graph = MemoryGraph::new();
    graph.add_node(Node::new(1, "Gene").with_property("name", "TP53"));
    // No record ever carried 'symbol', so the property was never declared
    graph.declare_index(IndexDescription::new(
        IndexTarget::Node,
        "Gene",
        "symbol",
        IndexType::NonUnique,
    ));
    graph.declare_index(IndexDescription::new(
        IndexTarget::Node,
        "Gene",
        "name",
        IndexType::Unique,
    ));

    let (db, report) = import(&graph);
    assert_eq!(report.indices_failed, 1);
    assert_eq!(report.indices_created, 1);
    assert!(report.has_problems());
    assert!(db.index("Gene.name").is_some());
    assert!(db.index("Gene.symbol").is_none());
}

#[test]
fn test_mixed_collection_skips_property_not_record() {
    let mut graph = MemoryGraph::new();
    graph.add_node(
        Node::new(1, "Gene")
            .with_property("name", "TP53")
            .with_property("mixed", Value::List(vec![Value::Long(1), "x".into()])),
    );

    let (db, report) = import(&graph);
    assert_eq!(report.nodes_created, 1);
    assert_eq!(report.properties_skipped, 1);
    assert!(report.has_problems());

    let vertex = db.records("Gene").next().unwrap();
    assert!(!vertex.has_property("mixed"));
    assert_eq!(vertex.property("name"), Some(&Value::from("TP53")));
}

#[test]
fn test_type_conflicting_value_skips_property_not_record() {
    // The schema scan fixes 'score' as long from the first node; the
    // second node's double is rejected by the store and skipped
    let mut graph = MemoryGraph::new();
    graph.add_node(Node::new(1, "Gene").with_property("score", 10i64));
    graph.add_node(Node::new(2, "Gene").with_property("score", 0.5f64));

    let (db, report) = import(&graph);
    assert_eq!(report.nodes_created, 2);
    assert_eq!(report.properties_skipped, 1);

    let second = db.records("Gene").nth(1).unwrap();
    assert!(!second.has_property("score"));
}

#[test]
fn test_multi_label_node_uses_primary_class() {
    let mut graph = MemoryGraph::new();
    graph.add_node(Node::with_labels(1, vec!["Gene".into(), "Protein".into()]));

    let (db, report) = import(&graph);
    assert_eq!(report.nodes_created, 1);
    assert_eq!(db.record_count("Gene"), 1);
    assert!(db.class("Protein").is_none());
}

#[test]
fn test_edge_properties_are_coerced_like_node_properties() {
    let mut graph = MemoryGraph::new();
    graph.add_node(Node::new(1, "Gene"));
    graph.add_node(Node::new(2, "Gene"));
    graph.add_edge(
        Edge::new(5, "INTERACTS_WITH", 1, 2)
            .with_property("score", 0.9f64)
            .with_property("sources", Value::List(vec!["intact".into(), "string".into()])),
    );

    let (db, report) = import(&graph);
    assert_eq!(report.edges_created, 1);
    assert!(!report.has_problems());

    let edge = db.records("INTERACTS_WITH").next().unwrap();
    assert_eq!(edge.property("score"), Some(&Value::Double(0.9)));
    assert_eq!(
        edge.property("sources"),
        Some(&Value::StringArray(vec!["intact".into(), "string".into()]))
    );

    // Endpoints resolve to the vertices created during node import
    let from = edge.from.unwrap();
    assert_eq!(db.record(from).unwrap().class, "Gene");
}

#[test]
fn test_duplicate_source_id_is_fatal() {
    let mut graph = MemoryGraph::new();
    graph.add_node(Node::new(1, "Gene").with_property("name", "TP53"));
    graph.add_node(Node::new(1, "Gene").with_property("name", "EGFR"));

    let mut db = Database::new();
    let err = GraphImporter::new(&graph).run(&mut db).unwrap_err();
    assert!(matches!(err, sylva::ImportError::DuplicateNodeId(1)));
}

#[test]
fn test_empty_graph_imports_cleanly() {
    let graph = MemoryGraph::new();
    let (db, report) = import(&graph);
    assert_eq!(report.nodes_created, 0);
    assert!(!report.has_problems());
    assert_eq!(db.vertex_count(), 0);
}
