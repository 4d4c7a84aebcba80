use rand::rngs::StdRng;
use rand::SeedableRng;
use rustc_hash::FxHashSet;

use cookie_crunch::{ChainKind, Level, LevelLayout, PieceType, StandardLevel, Swap};

/// Fills a fully open level from rows of kinds, top row first.
fn filled<const COLUMNS: usize, const ROWS: usize>(
    rows: [[PieceType; COLUMNS]; ROWS],
) -> Level<COLUMNS, ROWS> {
    let mut level = Level::full();
    for (line, kinds) in rows.iter().enumerate() {
        for (column, &kind) in kinds.iter().enumerate() {
            level.place_piece(column, ROWS - line - 1, kind);
        }
    }
    level
}

fn shaped_level() -> StandardLevel {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/levels/level_1.json");
    StandardLevel::from_layout(&LevelLayout::load(path).unwrap()).unwrap()
}

fn has_run_of_three<const C: usize, const R: usize>(level: &Level<C, R>) -> bool {
    let kind = |column, row| level.piece_at(column, row).map(|piece| piece.kind());
    for row in 0..R {
        for column in 0..C.saturating_sub(2) {
            if kind(column, row).is_some()
                && kind(column, row) == kind(column + 1, row)
                && kind(column, row) == kind(column + 2, row)
            {
                return true;
            }
        }
    }
    for column in 0..C {
        for row in 0..R.saturating_sub(2) {
            if kind(column, row).is_some()
                && kind(column, row) == kind(column, row + 1)
                && kind(column, row) == kind(column, row + 2)
            {
                return true;
            }
        }
    }
    false
}

#[test]
fn generated_arrangements_have_no_runs() {
    for seed in 0..100 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut full = StandardLevel::full();
        full.generate_initial_arrangement(&mut rng);
        assert!(!has_run_of_three(&full), "seed {seed}:\n{full}");

        let mut shaped = shaped_level();
        shaped.generate_initial_arrangement(&mut rng);
        assert!(!has_run_of_three(&shaped), "seed {seed}:\n{shaped}");
    }
}

#[test]
fn pieces_only_on_open_tiles() {
    let mut level = shaped_level();
    let placed = level.initial_set(&mut StdRng::seed_from_u64(9));
    assert_eq!(placed.len(), level.open_tile_count());
    for piece in &placed {
        assert!(level.tile_at(piece.column(), piece.row()).is_some());
    }
}

#[test]
fn initial_set_is_always_playable() {
    for seed in 0..30 {
        let mut level = shaped_level();
        level.initial_set(&mut StdRng::seed_from_u64(seed));
        assert!(!level.detect_possible_swaps().is_empty());
    }
}

#[test]
fn every_legal_swap_makes_a_chain_through_a_swapped_piece() {
    for seed in 0..10 {
        let mut level = StandardLevel::full();
        level.initial_set(&mut StdRng::seed_from_u64(seed));
        let before = level.to_string();
        let swaps: Vec<Swap> = level.possible_swaps().iter().copied().collect();

        for swap in swaps {
            level.perform_swap(&swap);
            let chains = level.detect_all_chains();
            assert!(!chains.is_empty(), "{swap} made no chain");
            assert!(
                chains
                    .iter()
                    .any(|chain| chain.contains(swap.from().coord())
                        || chain.contains(swap.to().coord())),
                "{swap} made chains elsewhere only"
            );

            level.perform_swap(&swap);
            assert_eq!(level.to_string(), before);
        }
    }
}

#[test]
fn perform_swap_twice_restores_pieces() {
    let mut level = StandardLevel::full();
    level.initial_set(&mut StdRng::seed_from_u64(77));
    let swap = level.propose_swap((0, 0), (1, 0)).unwrap();
    let (first, second) = (swap.from(), swap.to());

    level.perform_swap(&swap);
    level.perform_swap(&swap);

    let restored_first = level.piece_at(0, 0).unwrap();
    let restored_second = level.piece_at(1, 0).unwrap();
    assert_eq!(restored_first.kind(), first.kind());
    assert_eq!(restored_second.kind(), second.kind());
    assert_eq!(restored_first.coord(), (0, 0));
    assert_eq!(restored_second.coord(), (1, 0));
}

#[test]
fn swap_direction_does_not_matter() {
    let mut level = StandardLevel::full();
    level.initial_set(&mut StdRng::seed_from_u64(13));
    let forward = level.propose_swap((3, 3), (3, 4)).unwrap();
    let backward = level.propose_swap((3, 4), (3, 3)).unwrap();
    assert_eq!(forward, backward);

    let set: FxHashSet<Swap> = [forward, backward].into_iter().collect();
    assert_eq!(set.len(), 1);
    assert_eq!(level.is_possible(&forward), level.is_possible(&backward));
}

#[test]
fn row_of_five_is_a_single_horizontal_chain() {
    use PieceType::*;
    let level = filled([
        [Croissant, Cupcake, Danish, Donut, Macaroon],
        [SugarCookie, SugarCookie, SugarCookie, SugarCookie, SugarCookie],
        [Cupcake, Danish, Donut, Macaroon, Croissant],
    ]);
    let chains = level.detect_all_chains();
    assert_eq!(chains.len(), 1);
    let chain = chains.iter().next().unwrap();
    assert_eq!(chain.kind(), ChainKind::Horizontal);
    assert_eq!(chain.len(), 5);
    assert!(chains.iter().all(|chain| chain.kind() != ChainKind::Vertical));
}

#[test]
fn empty_board_has_no_chains_or_swaps() {
    let mut level = StandardLevel::full();
    assert!(level.detect_all_chains().is_empty());
    assert!(level.detect_possible_swaps().is_empty());
}

#[test]
fn edge_pieces_are_scanned_safely() {
    use PieceType::*;
    // every cell sits on an edge of a 2x2 board
    let mut level = filled([[Donut, Donut], [Donut, Cupcake]]);
    assert!(level.detect_all_chains().is_empty());
    assert!(level.detect_possible_swaps().is_empty());
    for column in 0..2 {
        for row in 0..2 {
            assert!(!level.has_chain_through(column, row));
        }
    }
}

#[test]
fn completing_a_strip_is_legal_and_makes_one_chain() {
    use PieceType::*;
    let mut level = filled([[Danish, Danish, Macaroon, Danish]]);
    let swap = level.propose_swap((2, 0), (3, 0)).unwrap();

    level.detect_possible_swaps();
    assert!(level.is_possible(&swap));

    level.perform_swap(&swap);
    let chains = level.detect_all_chains();
    assert_eq!(chains.len(), 1);
    let chain = chains.iter().next().unwrap();
    assert_eq!(chain.kind(), ChainKind::Horizontal);
    assert_eq!(chain.len(), 3);
    assert!((0..3).all(|column| chain.contains((column, 0))));
}
