use super::{account, at, transfer};
use crate::*;

#[test]
fn add_account_generates_uuid_ids() {
    let mut g = BankGraph::new();
    let a = g.add_account(account("Sara", "1"), at(0.0, 0.0));
    let b = g.add_account(account("Reza", "2"), at(0.0, 0.0));
    assert_ne!(a, b);
    assert!(uuid::Uuid::parse_str(&a).is_ok());
    assert_eq!(g.account_count(), 2);
    assert_eq!(g.account(&a).unwrap().account.owner_name, "Sara");
}

#[test]
fn add_transaction_rejects_unknown_endpoints() {
    let mut g = BankGraph::new();
    g.insert_account("a", account("Sara", "1"), at(0.0, 0.0));
    let err = g
        .add_transaction("a", "missing", transfer("1", "9", 10))
        .unwrap_err();
    assert!(matches!(err, Error::UnknownAccount { ref id } if id == "missing"));
    assert_eq!(g.transaction_count(), 0);
}

#[test]
fn insert_transaction_rejects_duplicate_ids() {
    let mut g = BankGraph::new();
    g.insert_account("a", account("Sara", "1"), at(0.0, 0.0));
    g.insert_account("b", account("Reza", "2"), at(0.0, 0.0));
    g.insert_transaction("t", "a", "b", transfer("1", "2", 10))
        .unwrap();
    let err = g
        .insert_transaction("t", "b", "a", transfer("2", "1", 5))
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateTransaction { .. }));
}

#[test]
fn remove_account_drops_incident_transactions() {
    let mut g = BankGraph::new();
    for id in ["a", "b", "c"] {
        g.insert_account(id, account(id, id), at(0.0, 0.0));
    }
    g.insert_transaction("ab", "a", "b", transfer("a", "b", 1))
        .unwrap();
    g.insert_transaction("bc", "b", "c", transfer("b", "c", 2))
        .unwrap();
    g.insert_transaction("ca", "c", "a", transfer("c", "a", 3))
        .unwrap();
    g.animate_move("a", 10.0, 10.0).unwrap();

    assert_eq!(g.transactions_of("a").count(), 2);
    assert!(g.remove_account("a").is_some());

    let left: Vec<&str> = g.transactions().map(|e| e.id.as_str()).collect();
    assert_eq!(left, ["bc"]);
    assert!(g.pending_transitions().is_empty());
    assert!(g.validate().is_ok());
    assert!(g.remove_account("a").is_none());
}

#[test]
fn resize_and_set_position_require_a_known_node() {
    let mut g = BankGraph::new();
    g.insert_account("a", account("Sara", "1"), at(0.0, 0.0));
    g.resize("a", 300.0, 120.0).unwrap();
    g.set_position("a", 15.0, 25.0).unwrap();
    assert_eq!(g.account("a").unwrap().geometry, Geometry::new(15.0, 25.0, 300.0, 120.0));

    assert!(matches!(g.resize("x", 1.0, 1.0), Err(Error::UnknownAccount { .. })));
    assert!(matches!(g.set_position("x", 1.0, 1.0), Err(Error::UnknownAccount { .. })));
}

#[test]
fn animate_move_queues_until_finished() {
    let mut g = BankGraph::new();
    g.insert_account("a", account("Sara", "1"), at(5.0, 6.0));
    g.animate_move("a", 100.0, 200.0).unwrap();

    assert_eq!(g.account("a").unwrap().geometry.position(), Position { x: 5.0, y: 6.0 });
    let t = &g.pending_transitions()[0];
    assert_eq!(t.from, Position { x: 5.0, y: 6.0 });
    assert_eq!(t.to, Position { x: 100.0, y: 200.0 });
    assert_eq!(t.duration().as_millis(), 1000);
    assert_eq!(t.timing, Timing::EaseOutCubic);

    g.finish_transitions();
    assert!(g.pending_transitions().is_empty());
    assert_eq!(g.account("a").unwrap().geometry.position(), Position { x: 100.0, y: 200.0 });
}

#[test]
fn drain_transitions_leaves_positions_alone() {
    let mut g = BankGraph::new();
    g.insert_account("a", account("Sara", "1"), at(0.0, 0.0));
    g.animate_move("a", 40.0, 40.0).unwrap();
    let drained = g.drain_transitions();
    assert_eq!(drained.len(), 1);
    assert!(g.pending_transitions().is_empty());
    assert_eq!(g.account("a").unwrap().geometry.x, 0.0);
}

#[test]
fn layout_items_follow_insertion_order() {
    let mut g = BankGraph::new();
    g.insert_account("z", account("Sara", "1"), at(1.0, 2.0));
    g.insert_account("a", account("Reza", "2"), at(3.0, 4.0));
    let items = g.layout_items();
    let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, ["z", "a"]);
    assert_eq!((items[1].x, items[1].y, items[1].width), (3.0, 4.0, 270.0));
}

#[test]
fn owner_full_name_skips_blank_parts() {
    let mut a = account("Sara", "1");
    assert_eq!(a.owner_full_name(), "Sara Ahmadi");
    a.owner_name = "  ".to_string();
    assert_eq!(a.owner_full_name(), "Ahmadi");
}
