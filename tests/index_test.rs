use quadstore::index::Candidates;
use quadstore::{IndexDimension, Literal, MemoryStore, NamedNode, QuadPattern, Quadruple, Resource, StoreIndex};

fn node(iri: &str) -> NamedNode {
    NamedNode::new(iri).unwrap()
}

fn people_store(count: usize) -> MemoryStore {
    let mut store = MemoryStore::new();
    for i in 0..count {
        let person = node(&format!("http://example.org/person/{}", i));
        let context = node(&format!("http://example.org/graph/{}", i % 3));
        store
            .add_quadruple(Quadruple::new(
                context.clone(),
                person.clone(),
                node("http://xmlns.com/foaf/0.1/name"),
                Literal::new_simple_literal(format!("Person{}", i)),
            ))
            .add_quadruple(Quadruple::new(
                context,
                person,
                node("http://xmlns.com/foaf/0.1/knows"),
                node(&format!("http://example.org/person/{}", (i + 1) % count)),
            ));
    }
    store
}

#[test]
fn test_index_tracks_every_mutation() {
    let mut store = people_store(30);
    assert_eq!(store.index(), &StoreIndex::from_quadruples(store.iter()));

    store.remove_by_context(&Resource::from(node("http://example.org/graph/1")));
    assert_eq!(store.index(), &StoreIndex::from_quadruples(store.iter()));
    assert_eq!(store.index().bucket_count(IndexDimension::Context), 2);

    let knows = node("http://xmlns.com/foaf/0.1/knows");
    store.remove_by_predicate(&knows);
    assert_eq!(store.index(), &StoreIndex::from_quadruples(store.iter()));
    assert_eq!(store.index().bucket_count(IndexDimension::Object), 0);

    store.clear_quadruples();
    assert!(store.index().is_empty());
}

#[test]
fn test_candidates_match_full_scan() {
    let store = people_store(30);
    let context = Resource::from(node("http://example.org/graph/2"));
    let knows = node("http://xmlns.com/foaf/0.1/knows");
    let pattern = QuadPattern::any().with_context(&context).with_predicate(&knows);

    let scanned: Vec<_> = store.iter().filter(|q| pattern.matches(q)).map(|q| q.id()).collect();
    match store.index().candidates(&pattern) {
        Candidates::Matching(ids) => {
            assert_eq!(ids.len(), scanned.len());
            assert!(scanned.iter().all(|id| ids.contains(id)));
        }
        Candidates::All => panic!("constrained pattern returned All"),
    }
}

#[test]
fn test_literal_and_object_dimensions_are_disjoint() {
    let store = people_store(5);
    let object_keys = store.index().bucket_count(IndexDimension::Object);
    let literal_keys = store.index().bucket_count(IndexDimension::Literal);

    assert_eq!(object_keys, 5);
    assert_eq!(literal_keys, 5);

    let name = Literal::new_simple_literal("Person3");
    assert_eq!(store.select_by_literal(&name).len(), 1);
    let as_resource = Resource::from(node("http://example.org/person/3"));
    assert_eq!(store.select_by_object(&as_resource).len(), 1);
}
