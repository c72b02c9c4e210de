//! Tests for the in-memory game registry.

use tictactoe_server::{GameRegistry, Mark, MoveError, RegistryError};

#[test]
fn create_allocates_monotonic_ids_starting_at_one() {
    let registry = GameRegistry::new();

    assert_eq!(registry.create(), 1);
    assert_eq!(registry.create(), 2);
    assert_eq!(registry.create(), 3);
}

#[test]
fn get_unknown_id_is_not_found() {
    let registry = GameRegistry::new();

    assert_eq!(registry.get(42), Err(RegistryError::NotFound));
}

#[test]
fn list_returns_all_games_in_id_order() {
    let registry = GameRegistry::new();
    registry.create();
    registry.create();
    registry.create();

    let games = registry.list();
    let ids: Vec<_> = games.iter().map(|g| g.id()).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn apply_move_mutates_the_stored_game() {
    let registry = GameRegistry::new();
    let id = registry.create();

    registry.apply_move(id, Mark::X, 0).unwrap();

    let game = registry.get(id).unwrap();
    assert_eq!(game.next_turn(), Mark::O);
    assert!(!game.is_over());
}

#[test]
fn apply_move_on_unknown_game_is_not_found() {
    let registry = GameRegistry::new();

    assert_eq!(
        registry.apply_move(7, Mark::X, 0),
        Err(RegistryError::NotFound)
    );
}

#[test]
fn apply_move_propagates_rule_violations() {
    let registry = GameRegistry::new();
    let id = registry.create();

    assert_eq!(
        registry.apply_move(id, Mark::O, 0),
        Err(RegistryError::Move(MoveError::NotYourTurn {
            expected: Mark::X
        }))
    );
}

#[test]
fn clones_share_the_same_registry() {
    let registry = GameRegistry::new();
    let handle = registry.clone();

    let id = registry.create();
    handle.apply_move(id, Mark::X, 4).unwrap();

    assert_eq!(registry.get(id).unwrap().next_turn(), Mark::O);
}

#[test]
fn concurrent_moves_on_one_game_never_double_place() {
    let registry = GameRegistry::new();
    let id = registry.create();

    // Both threads race X's opening move into cell 0; the lock makes the
    // lookup-and-place atomic, so exactly one can win.
    let handles: Vec<_> = (0..2)
        .map(|_| {
            let registry = registry.clone();
            std::thread::spawn(move || registry.apply_move(id, Mark::X, 0))
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let wins = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(wins, 1);

    let game = registry.get(id).unwrap();
    assert_eq!(game.next_turn(), Mark::O);
}
