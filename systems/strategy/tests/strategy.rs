use match3_sim_board::{Board, BoardCache};
use match3_sim_core::{ApPool, Color, Rules, ScriptedRandomness, SeededRandomness, Square, Swap};
use match3_sim_system_strategy::{
    simulated_ap, AiEmulation, ApSeeking, Context, FirstMove, GameView, NoMove, RandomMove, Side,
    Strategy,
};

const STUCK: &str = "| Y | P | P | Y |\n| R | G | R | Y |\n| Y | G | R | G |\n| R | Y | P | G |";
const ONE_MOVE: &str = "| Y | P | P | Y |\n| R | G | R | P |\n| Y | G | R | G |\n| R | Y | P | G |";
const FOUR_MOVES: &str =
    "| Y | R | P | Y |\n| R | G | R | Y |\n| Y | G | R | G |\n| G | Y | Y | G |";

fn swap(from: (usize, usize), to: (usize, usize)) -> Swap {
    Swap::new(Square::new(from.0, from.1), Square::new(to.0, to.1))
}

fn unordered(swap: Swap) -> (Square, Square) {
    if swap.from <= swap.to {
        (swap.from, swap.to)
    } else {
        (swap.to, swap.from)
    }
}

fn pick<S: Strategy>(strategy: &mut S, board: &Board, seed: u64) -> Option<Swap> {
    let rules = Rules::default();
    let mut cache = BoardCache::new();
    let mut rng = SeededRandomness::new(seed);
    let view = GameView {
        board,
        move_count: 1,
        turn_count: 1,
        to_move: Side::Offense,
    };
    let mut context = Context {
        rules: &rules,
        cache: &mut cache,
        rng: &mut rng,
    };
    strategy.pick_move(&view, &mut context)
}

fn parse(text: &str) -> Board {
    text.parse().expect("fixture board parses")
}

fn pools(codes: &[&str]) -> Vec<ApPool> {
    codes
        .iter()
        .map(|code| ApPool::from_code(code).expect("known pool code"))
        .collect()
}

#[test]
fn stuck_board_yields_no_move_from_any_strategy() {
    let board = parse(STUCK);
    assert_eq!(pick(&mut NoMove, &board, 1), None);
    assert_eq!(pick(&mut FirstMove, &board, 1), None);
    assert_eq!(pick(&mut RandomMove, &board, 1), None);
    assert_eq!(pick(&mut ApSeeking::new(pools(&["Y"])), &board, 1), None);
    assert_eq!(pick(&mut AiEmulation::new(pools(&["Y"])), &board, 1), None);
}

#[test]
fn no_move_refuses_even_with_moves_available() {
    assert_eq!(pick(&mut NoMove, &parse(FOUR_MOVES), 1), None);
}

#[test]
fn first_move_takes_the_canonical_first() {
    assert_eq!(
        pick(&mut FirstMove, &parse(ONE_MOVE), 1),
        Some(swap((0, 3), (1, 3)))
    );
    assert_eq!(
        pick(&mut FirstMove, &parse(FOUR_MOVES), 1),
        Some(swap((0, 1), (0, 2)))
    );
}

#[test]
fn random_move_stays_within_legal_moves() {
    let board = parse(FOUR_MOVES);
    let legal = [
        swap((0, 1), (0, 2)),
        swap((0, 1), (1, 1)),
        swap((2, 0), (3, 0)),
        swap((3, 0), (3, 1)),
    ];
    for seed in 0..20 {
        let picked = pick(&mut RandomMove, &board, seed).expect("moves exist");
        assert!(
            legal.iter().any(|candidate| unordered(*candidate) == unordered(picked)),
            "{picked} is not legal"
        );
    }
}

#[test]
fn ap_seeking_prefers_first_pool_then_earliest_move() {
    let board = parse(FOUR_MOVES);
    assert_eq!(
        pick(&mut ApSeeking::new(pools(&["Y"])), &board, 1),
        Some(swap((2, 0), (3, 0)))
    );
    assert_eq!(
        pick(&mut ApSeeking::new(pools(&["G", "R"])), &board, 1),
        Some(swap((3, 0), (3, 1)))
    );
    assert_eq!(
        pick(&mut ApSeeking::new(pools(&["R", "G"])), &board, 1),
        Some(swap((0, 1), (0, 2)))
    );
}

#[test]
fn simulated_ap_counts_destroyed_tiles_per_pool() {
    let board = parse(FOUR_MOVES);
    let mut rng = ScriptedRandomness::new(Vec::new());
    let gained = simulated_ap(
        &board,
        swap((2, 0), (3, 0)),
        &[ApPool::Color(Color::Red), ApPool::Color(Color::Yellow)],
        &Rules::default(),
        &mut rng,
    );
    assert_eq!(gained, vec![0, 3]);
}

struct AiCase {
    description: &'static str,
    board: &'static str,
    pools: &'static [&'static str],
    expected: ((usize, usize), (usize, usize)),
}

fn ai_cases() -> Vec<AiCase> {
    vec![
        AiCase {
            description: "prefers a 4 match to a 3 match of its own pools",
            board: "| Y | Y |   | Y |\n| R | R | Y | R |\n| T | T | G | T |\n|   |   |   |   |",
            pools: &["T", "R"],
            expected: ((1, 2), (0, 2)),
        },
        AiCase {
            description: "prefers a 4 match of its own pool to a 3 match of another",
            board: "| Y | Y |   | Y |\n| R | R | Y | R |\n| T | T | G | T |\n|   |   |   |   |",
            pools: &["Y"],
            expected: ((1, 2), (0, 2)),
        },
        AiCase {
            description: "prefers a 4 match of its own pools to a 3 match of its own",
            board: "| Y | Y |   | Y |\n| R | R | Y | R |\n| T | T | G | T |\n|   |   |   |   |",
            pools: &["Y", "R", "T"],
            expected: ((1, 2), (0, 2)),
        },
        AiCase {
            description: "prefers a 3 match of its own pool to a 3 match of another",
            board: "| Y | Y |   | R |\n| R | R | Y | R |\n| T | T |   | T |\n|   |   |   |   |",
            pools: &["R"],
            expected: ((1, 3), (1, 2)),
        },
        AiCase {
            description: "judges extent by straight lines",
            board: "|   |   | G |   |\n| G | G |   |   |\n|   |   | G |   |\n|   |   | G |   |",
            pools: &["Y"],
            expected: ((1, 1), (1, 2)),
        },
    ]
}

#[test]
fn ai_emulation_follows_extent_then_pool_preference() {
    for case in ai_cases() {
        let board = parse(case.board);
        let expected = unordered(swap(case.expected.0, case.expected.1));
        for seed in 0..5 {
            let picked = pick(&mut AiEmulation::new(pools(case.pools)), &board, seed)
                .expect("moves exist");
            assert_eq!(unordered(picked), expected, "{}", case.description);
        }
    }
}
