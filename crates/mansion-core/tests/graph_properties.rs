use mansion_core::{
    GameRng, Graph, MAX_CONNECTIONS, MIN_CONNECTIONS, NUM_ROOMS, RoomRole, generate_graph,
};
use proptest::prelude::*;

fn role_count(graph: &Graph, role: RoomRole) -> usize {
    graph.rooms().iter().filter(|r| r.role() == role).count()
}

proptest! {
    #[test]
    fn generated_graph_upholds_invariants(seed in any::<u64>()) {
        let graph = generate_graph(&mut GameRng::new(seed)).unwrap();
        prop_assert!(graph.validate().is_ok());
        prop_assert_eq!(graph.rooms().len(), NUM_ROOMS);
        prop_assert_eq!(role_count(&graph, RoomRole::Start), 1);
        prop_assert_eq!(role_count(&graph, RoomRole::End), 1);
        prop_assert_eq!(role_count(&graph, RoomRole::Mid), NUM_ROOMS - 2);

        for room in graph.rooms() {
            let count = room.connection_count();
            prop_assert!((MIN_CONNECTIONS..=MAX_CONNECTIONS).contains(&count));
            for target in room.connections() {
                prop_assert_ne!(target.as_str(), room.name());
                let other = graph.room(target).unwrap();
                prop_assert!(other.is_connected_to(room.name()));
                let dupes = room.connections().iter().filter(|c| *c == target).count();
                prop_assert_eq!(dupes, 1);
            }
        }
    }

    #[test]
    fn same_seed_same_graph(seed in any::<u64>()) {
        let a = generate_graph(&mut GameRng::new(seed)).unwrap();
        let b = generate_graph(&mut GameRng::new(seed)).unwrap();
        prop_assert_eq!(a, b);
    }
}
