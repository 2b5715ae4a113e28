use promoplay_core::*;

fn play_spin_wheel(seed: u64) -> Vec<PlayOutcome> {
    let mut wheel = SpinWheel::new(SpinWheelConfig::default(), seed, ManualTimers::new()).unwrap();
    let mut outcomes = vec![wheel.spin()];
    for _ in 0..5 {
        outcomes.push(wheel.spin());
        outcomes.extend(drive(&mut wheel, 1_000));
    }
    outcomes
}

fn wins(outcomes: &[PlayOutcome]) -> usize {
    outcomes.iter().filter(|outcome| outcome.is_won()).count()
}

#[test]
fn spin_wheel_reports_exactly_one_win_per_session() {
    for seed in 0..25 {
        assert_eq!(wins(&play_spin_wheel(seed)), 1, "seed {seed}");
    }
}

#[test]
fn scratching_past_full_coverage_wins_once() {
    let config = ScratchCardConfig::default();
    let (columns, rows) = (config.columns, config.rows);
    let mut card = ScratchCard::new(config, 10).unwrap();
    let mut outcomes = Vec::new();

    for _ in 0..3 {
        for y in 0..rows {
            outcomes.push(card.scratch_line((0, y), (columns - 1, y)).unwrap());
        }
    }

    assert_eq!(wins(&outcomes), 1);
    assert!(card.progress() > card.reveal_threshold());
    assert!(card.progress() < 1.0);
}

#[test]
fn lucky_draw_only_pays_out_on_the_prize_card() {
    let mut draw = LuckyDraw::new(LuckyDrawConfig::default(), 33).unwrap();

    for _ in 0..20 {
        let winner = draw.winning_card();
        for card in 0..draw.card_count() {
            let mut attempt = draw.clone();
            let outcome = attempt.pick(card).unwrap();
            assert_eq!(outcome.is_won(), card == winner);
        }
        draw.reset();
    }
}

#[test]
fn color_match_perfect_game_pays_the_selected_prize() {
    let mut game = ColorMatch::new(ColorMatchConfig::default(), 8, ManualTimers::new()).unwrap();
    let prize = game.selected().cloned().unwrap();
    let mut outcomes = Vec::new();

    while !game.status().is_finished() {
        let board = game.board().clone();
        let first = board.tiles().iter().position(|tile| tile.can_flip()).unwrap();
        let second = (0..board.len())
            .find(|&other| {
                other != first && board.tiles()[other].color == board.tiles()[first].color
            })
            .unwrap();
        outcomes.push(game.flip(first).unwrap());
        outcomes.push(game.flip(second).unwrap());
        outcomes.extend(drive(&mut game, 1_000));
    }

    assert_eq!(game.moves(), 6);
    assert_eq!(outcomes.iter().filter(|o| o.is_won()).count(), 1);
    assert_eq!(game.selected(), Some(&prize));
    assert_eq!(game.progress(), 1.0);
}

#[test]
fn reset_twice_gives_two_independent_sessions() {
    let mut draw = LuckyDraw::new(LuckyDrawConfig::default(), 1).unwrap();
    let mut wheel = SpinWheel::new(SpinWheelConfig::default(), 1, ManualTimers::new()).unwrap();
    let mut game = ColorMatch::new(ColorMatchConfig::default(), 1, ManualTimers::new()).unwrap();

    wheel.spin();
    game.flip(0).unwrap();

    let games: [&mut dyn RewardGame; 3] = [&mut draw, &mut wheel, &mut game];
    for game in games {
        game.reset();
        let first = game.generation();
        game.reset();

        assert_eq!(game.generation(), first + 1);
        assert_eq!(game.status(), SessionStatus::Idle);
        assert_eq!(game.progress(), 0.0);
    }

    assert_eq!(wheel.timers().pending_count(), 0);
    assert_eq!(game.timers().pending_count(), 0);
}

#[test]
fn winning_slots_vary_across_resets() {
    let mut draw = LuckyDraw::new(LuckyDrawConfig::default(), 2024).unwrap();
    let mut slots = Vec::new();

    for _ in 0..30 {
        slots.push(draw.winning_card());
        draw.reset();
    }

    slots.sort_unstable();
    slots.dedup();
    assert!(slots.len() > 1);
}

#[test]
fn configuration_drives_the_games() {
    let config = PromoConfig::from_json(
        r#"{
            "spin_wheel": {
                "segments": [{"code": "ONLY", "discount_percent": 30, "description": "30% off"}],
                "spin_duration_ms": 500
            }
        }"#,
    )
    .unwrap();
    let mut wheel = SpinWheel::new(config.spin_wheel, 4, ManualTimers::new()).unwrap();

    wheel.spin();

    let outcomes = drive(&mut wheel, 500);
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].won_reward().map(|r| r.code.as_str()), Some("ONLY"));
}
