use super::centered;
use crate::*;

const DIAGRAM: &str = r#"{
  "viewport": { "width": 800, "height": 600 },
  "layout": { "random_offset": 0 },
  "accounts": [
    {
      "id": "a",
      "x": 40,
      "y": 40,
      "owner_name": "Sara",
      "owner_family_name": "Ahmadi",
      "account_id": "6037-0001",
      "branch_name": "Central",
      "sheba": "IR820540102680020817909002",
      "account_type": "savings"
    },
    {
      "id": "b",
      "width": 300,
      "owner_name": "Reza",
      "owner_family_name": "Karimi",
      "account_id": "6037-0002",
      "branch_name": "North",
      "account_type": "current"
    }
  ],
  "transactions": [
    {
      "source": "a",
      "target": "b",
      "source_account": "6037-0001",
      "destination_account": "6037-0002",
      "amount": 2500000,
      "date": "2024-03-01",
      "transaction_id": "TX-1",
      "transaction_type": "satna"
    }
  ]
}"#;

#[test]
fn parses_flattened_account_and_transaction_fields() {
    let doc = DiagramDocument::from_json_str(DIAGRAM).unwrap();
    assert_eq!(doc.layout.random_offset, 0.0);
    assert_eq!(doc.layout.node_width, 270.0);
    assert_eq!(doc.accounts.len(), 2);
    assert_eq!(doc.accounts[0].account.account_type, AccountType::Savings);
    assert_eq!(doc.accounts[0].account.card_id, "");
    assert_eq!(doc.accounts[1].x, None);

    let tx = &doc.transactions[0];
    assert_eq!(tx.id, None);
    assert_eq!(tx.transaction.amount, 2_500_000);
    assert_eq!(tx.transaction.transaction_type, TransactionType::Satna);
    assert_eq!(tx.transaction.date.to_string(), "2024-03-01");
}

#[test]
fn targets_default_to_accounts_without_a_position() {
    let mut doc = DiagramDocument::from_json_str(DIAGRAM).unwrap();
    assert_eq!(doc.resolved_targets(), ["b"]);

    doc.targets = Some(vec!["a".to_string()]);
    assert_eq!(doc.resolved_targets(), ["a"]);
}

#[test]
fn build_graph_fills_missing_geometry_from_the_layout() {
    let doc = DiagramDocument::from_json_str(DIAGRAM).unwrap();
    let g = doc.build_graph().unwrap();

    assert_eq!(g.account("a").unwrap().geometry, Geometry::new(40.0, 40.0, 270.0, 80.0));
    assert_eq!(g.account("b").unwrap().geometry, Geometry::new(0.0, 0.0, 300.0, 80.0));

    let edge = g.transactions().next().unwrap();
    assert_eq!((edge.source.as_str(), edge.target.as_str()), ("a", "b"));
    assert!(!edge.id.is_empty());
}

#[test]
fn build_graph_rejects_dangling_transactions() {
    let mut doc = DiagramDocument::from_json_str(DIAGRAM).unwrap();
    doc.transactions[0].target = "nobody".to_string();
    assert!(matches!(
        doc.build_graph(),
        Err(Error::UnknownAccount { ref id }) if id == "nobody"
    ));
}

#[test]
fn malformed_json_is_a_json_error() {
    let err = DiagramDocument::from_json_str("{ \"accounts\": 3 }").unwrap_err();
    assert!(matches!(err, Error::Json(_)));
    assert!(err.to_string().starts_with("Invalid diagram JSON:"));
}

#[test]
fn from_graph_snapshots_a_laid_out_diagram() {
    let doc = DiagramDocument::from_json_str(DIAGRAM).unwrap();
    let mut g = doc.build_graph().unwrap();
    let targets = doc.resolved_targets();
    pack(&mut g, &doc.layout, doc.viewport, &targets[..], &mut centered()).unwrap();

    let out = DiagramDocument::from_graph(&g, doc.viewport, doc.layout.clone());
    assert!(out.targets.is_none());
    assert_eq!(out.accounts[1].x, Some(390.0));
    assert_eq!(out.accounts[1].y, Some(40.0));
    assert!(out.transactions[0].id.is_some());

    let reparsed = DiagramDocument::from_json_str(&out.to_json(true).unwrap()).unwrap();
    assert_eq!(reparsed, out);
    assert!(reparsed.resolved_targets().is_empty());
}
