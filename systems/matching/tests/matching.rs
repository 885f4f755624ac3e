use std::num::NonZeroUsize;

use match3_sim_board::{Board, BoardCache, CacheStats};
use match3_sim_core::{ApPool, Color, Match, Rules, Square, Tile};
use match3_sim_system_matching::{
    can_combine, dominant_pool, find_matches, find_matches_at, find_matches_cached, has_matches,
    probe_matches, probe_matches_cached,
};

fn parse(text: &str) -> Board {
    text.parse().expect("fixture board parses")
}

fn matched(coords: &[(usize, usize)]) -> Match {
    Match::new(coords.iter().map(|&(row, col)| Square::new(row, col)))
}

#[test]
fn uniform_board_resolves_to_single_match() {
    let rules = Rules::default();
    for tile in [Tile::Colored(Color::Green), Tile::Critical, Tile::Teamup] {
        let board = Board::filled(8, tile);
        let matches = find_matches(&board, &rules);
        assert_eq!(matches.len(), 1, "uniform {tile} board should merge");
        assert_eq!(matches[0].tile_count(), 64);
    }
}

#[test]
fn empty_board_has_no_matches() {
    let board = Board::empty(8);
    assert!(find_matches(&board, &Rules::default()).is_empty());
    assert!(!has_matches(&board, &Rules::default()));
}

#[test]
fn cross_merges_into_one_match() {
    let board = parse(
        "| R | Y | R  | G |\n\
         | Y | Y | Y  | R |\n\
         | G | Y | G  | BL |\n\
         | R | G | R  | G |",
    );
    let matches = find_matches(&board, &Rules::default());
    assert_eq!(
        matches,
        vec![matched(&[(0, 1), (1, 0), (1, 1), (1, 2), (2, 1)])]
    );
}

#[test]
fn straight_line_merges_overlapping_runs() {
    let board = parse(
        "| Y | Y | Y | Y | Y |\n\
         | G | P | BK | BL | G |\n\
         | P | BK | BL | G | P |\n\
         | BK | BL | G | P | BK |\n\
         | BL | G | P | BK | BL |",
    );
    let rules = Rules::default();
    assert_eq!(
        find_matches_at(&board, Square::new(0, 2), &rules),
        vec![
            matched(&[(0, 0), (0, 1), (0, 2)]),
            matched(&[(0, 2), (0, 3), (0, 4)]),
        ]
    );
    assert_eq!(
        find_matches(&board, &rules),
        vec![matched(&[(0, 0), (0, 1), (0, 2), (0, 3), (0, 4)])]
    );
}

#[test]
fn critical_bridge_does_not_merge_different_colors() {
    let board = parse(
        "| R | R | C | Y | Y |\n\
         | G | P | BK | BL | G |\n\
         | P | BK | BL | G | P |\n\
         | BK | BL | G | P | BK |\n\
         | BL | G | P | BK | BL |",
    );
    let matches = find_matches(&board, &Rules::default());
    assert_eq!(
        matches,
        vec![
            matched(&[(0, 0), (0, 1), (0, 2)]),
            matched(&[(0, 2), (0, 3), (0, 4)]),
        ]
    );
    assert!(!can_combine(&board, &matches[0], &matches[1]));
    assert_eq!(
        dominant_pool(&board, &matches[0]),
        Some(ApPool::Color(Color::Red))
    );
    assert_eq!(
        dominant_pool(&board, &matches[1]),
        Some(ApPool::Color(Color::Yellow))
    );
}

#[test]
fn dominant_pool_handles_colorless_matches() {
    let teamups = Board::filled(3, Tile::Teamup);
    let criticals = Board::filled(3, Tile::Critical);
    let row = matched(&[(0, 0), (0, 1), (0, 2)]);
    assert_eq!(dominant_pool(&teamups, &row), Some(ApPool::Teamup));
    assert_eq!(dominant_pool(&criticals, &row), None);
}

#[test]
fn probe_stops_early_with_uncombined_candidates() {
    let board = Board::filled(8, Tile::Colored(Color::Red));
    let rules = Rules::default();
    let probe = probe_matches(&board, NonZeroUsize::MIN, &rules);

    assert!(!probe.is_empty());
    assert!(probe.len() < 64);
    assert!(probe
        .candidates()
        .iter()
        .all(|candidate| candidate.tile_count() == 8));
}

#[test]
fn cached_queries_reuse_results() {
    let board = Board::filled(4, Tile::Colored(Color::Purple));
    let rules = Rules::default();
    let mut cache = BoardCache::new();

    let first = find_matches_cached(&board, &rules, &mut cache);
    let second = find_matches_cached(&board, &rules, &mut cache);
    assert_eq!(first, second);

    let limit = NonZeroUsize::new(3).expect("non-zero");
    let probe = probe_matches_cached(&board, limit, &rules, &mut cache);
    let again = probe_matches_cached(&board, limit, &rules, &mut cache);
    assert_eq!(probe, again);

    assert_eq!(cache.stats(), CacheStats { hits: 2, misses: 2 });
    assert_eq!(cache.len(), 2);
}

#[test]
fn settled_matches_are_pairwise_uncombinable() {
    let board = parse(
        "| Y | Y | Y | R | R | R |\n\
         | G | C | G | BL | R | P |\n\
         | G | G | G | BK | R | P |\n\
         | BL | P | BK | Y | G | P |\n\
         | T | T | T | T | G | BK |\n\
         | BK | Y | BL | P | G | Y |",
    );
    let matches = find_matches(&board, &Rules::default());
    assert!(!matches.is_empty());
    for (index, first) in matches.iter().enumerate() {
        for second in &matches[index + 1..] {
            assert!(
                !can_combine(&board, first, second),
                "{first} and {second} should have merged"
            );
        }
    }
}
