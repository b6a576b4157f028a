use std::fs;
use std::path::PathBuf;

use mansion_core::{GameRng, NUM_ROOMS, generate_graph};
use mansion_save::{find_latest, graph_dir_name, load_graph, room_file_name, write_graph};

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("mansion_rt_{}_{}", std::process::id(), name));
    fs::remove_dir_all(&dir).ok();
    dir
}

#[test]
fn test_write_then_load_preserves_graph() {
    let base = scratch("many");
    for seed in 0..25u32 {
        let graph = generate_graph(&mut GameRng::new(u64::from(seed))).unwrap();
        let dir = base.join(graph_dir_name("mansion.rooms.", seed + 1));
        write_graph(&graph, &dir).unwrap();

        let files = fs::read_dir(&dir).unwrap().count();
        assert_eq!(files, NUM_ROOMS);
        for room in graph.rooms() {
            assert!(dir.join(room_file_name(room.name())).is_file());
        }

        let loaded = load_graph(&dir).unwrap();
        assert!(loaded.validate().is_ok());
        for room in graph.rooms() {
            assert_eq!(loaded.room(room.name()), Some(room));
        }
    }
    fs::remove_dir_all(&base).ok();
}

#[test]
fn test_latest_directory_is_loadable() {
    let base = scratch("latest");
    fs::create_dir_all(&base).unwrap();
    let graph = generate_graph(&mut GameRng::new(77)).unwrap();
    let dir = base.join(graph_dir_name("mansion.rooms.", 4321));
    write_graph(&graph, &dir).unwrap();

    let found = find_latest(&base, "mansion.rooms.").unwrap();
    assert_eq!(found, dir);
    let loaded = load_graph(&found).unwrap();
    assert_eq!(loaded.start().unwrap().name(), graph.start().unwrap().name());
    assert_eq!(loaded.end().unwrap().name(), graph.end().unwrap().name());
    fs::remove_dir_all(&base).ok();
}
