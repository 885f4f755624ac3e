use match3_sim_board::Board;
use match3_sim_core::{Match, Rules, Square};
use match3_sim_system_destroyer::{destroy_matches, destroy_tiles};

struct Case {
    board: &'static str,
    expected: &'static str,
    destroyed: Vec<(usize, usize)>,
}

fn cases() -> Vec<Case> {
    vec![
        Case {
            board: "| Y | Y  | R   | Y |
                    | R | R  | Y   | Y |
                    | Y | G  | BL  | G |
                    | P | BL | BK  | G |",
            expected: "| Y | Y | R | Y |\n\
                       | R | R | Y | Y |\n\
                       | Y | G | BL | G |\n\
                       | P | BL | BK | G |",
            destroyed: Vec::new(),
        },
        Case {
            board: "| Y | Y  | Y  | Y |
                    | R | R  | R  | Y |
                    | Y | G  | G  | G |
                    | P | BL | BK | G |",
            expected: "| E | E | E | E |\n\
                       | E | E | E | Y |\n\
                       | Y | E | E | E |\n\
                       | P | BL | BK | G |",
            destroyed: vec![
                (0, 0),
                (0, 1),
                (0, 2),
                (0, 3),
                (1, 0),
                (1, 1),
                (1, 2),
                (2, 1),
                (2, 2),
                (2, 3),
            ],
        },
        Case {
            board: "| Y | Y  | Y  | Y | G | G |
                    | R | R  | R  | R | R | G |
                    | Y | G  | Y  | G | Y | Y |
                    | P | BL | BK | G | Y | Y |
                    | G | BK | BL | Y | G | G |
                    | P | BL | BK | G | Y | Y |",
            expected: "| E | E | E | E | E | E |\n\
                       | E | E | E | E | E | E |\n\
                       | Y | G | Y | G | Y | Y |\n\
                       | P | BL | BK | G | Y | Y |\n\
                       | G | BK | BL | Y | G | G |\n\
                       | P | BL | BK | G | Y | Y |",
            destroyed: (0..6).map(|c| (0, c)).chain((0..6).map(|c| (1, c))).collect(),
        },
        Case {
            board: "| Y | R  | Y  | Y | G | G |
                    | Y | R  | R  | P | R | G |
                    | Y | R  | Y  | G | Y | Y |
                    | Y | R  | BK | G | Y | Y |
                    | P | R  | BL | Y | G | G |
                    | P | BL | BK | G | Y | Y |",
            expected: "| E | E | Y | Y | G | G |\n\
                       | E | E | R | P | R | G |\n\
                       | E | E | Y | G | Y | Y |\n\
                       | E | E | BK | G | Y | Y |\n\
                       | E | E | BL | Y | G | G |\n\
                       | E | E | BK | G | Y | Y |",
            destroyed: (0..6).map(|r| (r, 0)).chain((0..6).map(|r| (r, 1))).collect(),
        },
        Case {
            board: "| G | R | Y  | Y | G | G |
                    | Y | R | R  | P | R | G |
                    | Y | R | Y  | G | Y | Y |
                    | G | R | BK | G | Y | Y |
                    | Y | G | BL | Y | G | G |
                    | Y | Y | Y  | Y | Y | Y |",
            expected: "| G | E | Y | Y | G | G |\n\
                       | Y | E | R | P | R | G |\n\
                       | Y | E | Y | G | Y | Y |\n\
                       | G | E | BK | G | Y | Y |\n\
                       | Y | E | BL | Y | G | G |\n\
                       | E | E | E | E | E | E |",
            destroyed: (0..6).map(|r| (r, 1)).chain((0..6).map(|c| (5, c))).collect(),
        },
    ]
}

fn sorted_squares(coords: &[(usize, usize)]) -> Vec<Square> {
    let mut squares: Vec<Square> = coords
        .iter()
        .map(|&(row, col)| Square::new(row, col))
        .collect();
    squares.sort();
    squares.dedup();
    squares
}

#[test]
fn destroys_matches_and_line_bonuses() {
    let rules = Rules::default();
    for (index, case) in cases().into_iter().enumerate() {
        let board: Board = case.board.parse().expect("fixture parses");
        let expected: Board = case.expected.parse().expect("expectation parses");
        let destruction = destroy_tiles(&board, &rules);

        assert_eq!(
            destruction.destroyed,
            sorted_squares(&case.destroyed),
            "case {index}: destroyed squares"
        );
        assert_eq!(
            destruction.board.to_string(),
            expected.to_string(),
            "case {index}: resulting board"
        );
    }
}

#[test]
fn input_board_is_untouched() {
    let rules = Rules::default();
    let text = "| Y | Y | Y |\n| R | G | R |\n| G | R | G |";
    let board: Board = text.parse().expect("fixture parses");
    let destruction = destroy_tiles(&board, &rules);

    assert_eq!(board.to_string(), text);
    assert_eq!(
        destruction.destroyed,
        vec![Square::new(0, 0), Square::new(0, 1), Square::new(0, 2)]
    );
}

#[test]
fn line_clear_threshold_follows_rules() {
    let board: Board = "| Y | Y | Y | R |\n| R | G | R | G |\n| G | R | G | R |\n| BL | P | BK | BL |"
        .parse()
        .expect("fixture parses");
    let three_clears = Rules {
        min_line_clear: 3,
        ..Rules::default()
    };
    let matched = Match::new([Square::new(0, 0), Square::new(0, 1), Square::new(0, 2)]);
    let destruction = destroy_matches(&board, &[matched], &three_clears);
    assert_eq!(destruction.destroyed.len(), 4);
    assert!(destruction.board.at(Square::new(0, 3)).is_empty());
}
