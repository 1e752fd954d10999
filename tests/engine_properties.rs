use nexus_2048::engine::{self as GameEngine, Board, Cell, Coord, Move, Rank, SIZE, SPAWN_RANK};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn board(ranks: [[i32; 4]; 4]) -> Board {
    let cell = |r: i32| if r < 0 { None } else { Some(r as Rank) };
    Board::from_rows(ranks.map(|row| row.map(cell)))
}

/// Random boards with a mix of empty cells and low ranks, so merges are common.
fn random_boards(seed: u64, count: usize) -> Vec<Board> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let density = rng.gen_range(0.2..1.0);
            let rows: [[Cell; SIZE]; SIZE] = std::array::from_fn(|_| {
                std::array::from_fn(|_| rng.gen_bool(density).then(|| rng.gen_range(0..5)))
            });
            Board::from_rows(rows)
        })
        .collect()
}

fn mass(board: &Board) -> u64 {
    board.tiles().flatten().map(|rank| 1u64 << (rank + 1)).sum()
}

fn tile_count(board: &Board) -> usize {
    board.tiles().flatten().count()
}

#[test]
fn merge_cap_keeps_pairs_apart() {
    let b = board([[1, 1, 1, 1], [-1; 4], [-1; 4], [-1; 4]]);
    let (left, moved) = b.apply_move(Move::Left);
    assert!(moved);
    assert_eq!(left.rows()[0], [Some(2), Some(2), None, None]);

    let (right, _) = b.apply_move(Move::Right);
    assert_eq!(right.rows()[0], [None, None, Some(2), Some(2)]);

    let column = b.transposed();
    let up = column.shift(Move::Up).transposed();
    assert_eq!(up.rows()[0], [Some(2), Some(2), None, None]);
}

#[test]
fn moves_conserve_mass() {
    for b in random_boards(11, 500) {
        for dir in Move::ALL {
            let (next, moved) = b.apply_move(dir);
            assert_eq!(mass(&next), mass(&b), "{b:?} {dir}");
            assert!(tile_count(&next) <= tile_count(&b));
            // Each merge removes exactly one tile, at most two merges per line.
            assert!(tile_count(&b) - tile_count(&next) <= 2 * SIZE);
            if !moved {
                assert_eq!(tile_count(&next), tile_count(&b));
            }
        }
    }
}

#[test]
fn no_op_moves_leave_the_board_alone() {
    let mut rng = StdRng::seed_from_u64(5);
    let packed = board([[0, 1, 2, 3], [2, -1, -1, -1], [-1; 4], [-1; 4]]);
    assert_eq!(packed.apply_move(Move::Left), (packed, false));
    assert_eq!(packed.apply_move(Move::Up), (packed, false));
    assert_eq!(packed.make_move(Move::Left, &mut rng), packed);
    assert_eq!(packed.make_move(Move::Up, &mut rng), packed);

    for b in random_boards(12, 500) {
        for dir in Move::ALL {
            let (next, moved) = b.apply_move(dir);
            assert_eq!(moved, next != b);
            if !moved {
                assert_eq!(b.make_move(dir, &mut rng), b);
            } else {
                let spawned = b.make_move(dir, &mut rng);
                assert_eq!(spawned.count_empty(), next.count_empty() - 1);
            }
        }
    }
}

#[test]
fn directions_are_mirror_images() {
    for b in random_boards(13, 500) {
        let (mirrored, transposed) = (b.mirrored(), b.transposed());
        assert_eq!(b.shift(Move::Left).mirrored(), mirrored.shift(Move::Right));
        assert_eq!(b.shift(Move::Right).mirrored(), mirrored.shift(Move::Left));
        assert_eq!(b.shift(Move::Up), transposed.shift(Move::Left).transposed());
        assert_eq!(
            b.shift(Move::Down),
            transposed.shift(Move::Right).transposed()
        );
        assert_eq!(
            b.apply_move(Move::Left).1,
            mirrored.apply_move(Move::Right).1
        );
    }
}

#[test]
fn loss_requires_full_board_without_pairs() {
    let stuck = board([[0, 1, 2, 3], [1, 2, 3, 0], [2, 3, 0, 1], [3, 0, 1, 2]]);
    assert!(stuck.is_full());
    assert!(stuck.is_loss());
    assert!(GameEngine::is_loss_state(&stuck));
    assert!(stuck.is_game_over());

    let horizontal = board([[0, 0, 2, 3], [1, 2, 3, 0], [2, 3, 0, 1], [3, 0, 1, 2]]);
    assert!(horizontal.is_full());
    assert!(GameEngine::has_any_merge_possible(&horizontal));
    assert!(!horizontal.is_loss());

    let vertical = board([[0, 1, 2, 3], [1, 2, 3, 0], [2, 3, 0, 1], [2, 0, 1, 2]]);
    assert!(!vertical.is_loss());
    assert!(!vertical.is_game_over());
}

#[test]
fn loss_matches_game_over_on_full_boards() {
    for b in random_boards(14, 2000).into_iter().filter(Board::is_full) {
        assert_eq!(b.is_loss(), b.is_game_over(), "{b:?}");
    }
}

#[test]
fn win_tracks_the_winning_rank() {
    let mut b = board([[0, -1, -1, -1], [-1, 4, -1, -1], [-1; 4], [-1; 4]]);
    assert!(b.is_win(4));
    assert!(GameEngine::is_win_state(&b, 4));
    b.set(1, 1, Some(3)).unwrap();
    assert!(!b.is_win(4));
    // Ranks past the winning rank are not a win by themselves.
    b.set(1, 1, Some(5)).unwrap();
    assert!(!b.is_win(4));
}

#[test]
fn merging_pair_then_one_spawn() {
    let b = board([[0, 0, -1, -1], [-1; 4], [-1; 4], [-1; 4]]);
    let (next, moved) = GameEngine::apply_move(b, Move::Left);
    assert!(moved);
    assert_eq!(next, board([[1, -1, -1, -1], [-1; 4], [-1; 4], [-1; 4]]));
    let empties = next.empty_cells();
    assert_eq!(empties.len(), 15);

    for seed in 0..64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut spawned = next;
        let coord = spawned.spawn_random_tile(&mut rng).unwrap();
        assert!(empties.contains(&coord));
        assert_ne!(coord, Coord::new(0, 0));
        assert_eq!(spawned.cell(coord), Some(SPAWN_RANK));
        assert_eq!(spawned.count_empty(), 14);
    }
}

#[test]
fn gap_merges_toward_the_move() {
    let b = board([[-1, 0, -1, 0], [-1; 4], [-1; 4], [-1; 4]]);
    assert_eq!(b.shift(Move::Left).rows()[0], [Some(1), None, None, None]);
    assert_eq!(b.shift(Move::Right).rows()[0], [None, None, None, Some(1)]);
}

#[test]
fn spawns_cover_every_empty_cell() {
    let mut rng = StdRng::seed_from_u64(21);
    let b = board([[0, 1, 2, 3], [-1, 1, -1, 3], [0, 1, 2, 3], [0, -1, 2, 3]]);
    let empties = b.empty_cells();
    let mut hits = vec![0usize; empties.len()];
    for _ in 0..3000 {
        let mut next = b;
        let coord = next.spawn_random_tile(&mut rng).unwrap();
        let idx = empties.iter().position(|&c| c == coord).unwrap();
        hits[idx] += 1;
    }
    // Uniform over 3 cells: each should land near 1000.
    assert!(hits.iter().all(|&n| (800..1200).contains(&n)), "{hits:?}");
}

#[test]
fn thread_rng_helpers_fill_the_board() {
    let mut b = Board::EMPTY;
    for _ in 0..16 {
        b = GameEngine::insert_random_tile(b);
    }
    assert_eq!(b.count_empty(), 0);
    assert_eq!(GameEngine::insert_random_tile(b), b);
    let pair = board([[0, 0, -1, -1], [-1; 4], [-1; 4], [-1; 4]]);
    let moved = GameEngine::make_move(pair, Move::Right);
    assert_eq!(moved.rows()[0][3], Some(1));
    assert_eq!(moved.count_empty(), 14);
}
