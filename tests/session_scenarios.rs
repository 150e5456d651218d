use std::collections::HashSet;
use std::time::Duration;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use rubiks_3d_game::puzzle::animator::{Animator, AnimatorEvent};
use rubiks_3d_game::puzzle::axis::Axis;
use rubiks_3d_game::puzzle::error::ActionRejected;
use rubiks_3d_game::puzzle::grid::CubeGrid;
use rubiks_3d_game::puzzle::history::{Difficulty, inverse_sequence, random_twist};
use rubiks_3d_game::puzzle::moves::{Direction, Move, MoveSource, SpeedPreset, Twist};
use rubiks_3d_game::puzzle::session::{Session, SessionEvent};
use rubiks_3d_game::puzzle::solved::is_cube_solved;

const FRAME: Duration = Duration::from_millis(16);

/// Ticks until the queue drains, collecting every event.
fn run_until_idle(session: &mut Session) -> Vec<SessionEvent> {
    let mut events = Vec::new();
    for _ in 0..100_000 {
        events.extend(session.tick(FRAME));
        if session.is_accepting_input() {
            return events;
        }
    }
    panic!("session never went idle");
}

fn twist(axis: Axis, layer: i32, direction: Direction) -> Twist {
    Twist::new(axis, layer, direction).unwrap()
}

fn assert_on_lattice(grid: &CubeGrid) {
    assert!(grid.is_aligned());
    let mut seen = HashSet::new();
    for cubie in grid.cubies() {
        let p = cubie.grid_position();
        assert!(p.abs().max_element() <= 1, "{p} off the lattice");
        assert!(seen.insert(p), "two cubies share {p}");
    }
    assert_eq!(seen.len(), 27);
    for axis in Axis::ALL {
        for layer in -1..=1 {
            assert_eq!(grid.cubies_in_slice(axis, layer).len(), 9);
        }
    }
}

fn assert_home(grid: &CubeGrid) {
    for cubie in grid.cubies() {
        assert_eq!(cubie.grid_position(), cubie.home());
    }
    assert!(is_cube_solved(grid));
}

#[test]
fn shuffle_then_solve_returns_every_cubie_home() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let mut session = Session::new(SpeedPreset::Fast, Difficulty::Hard);

    let scrambled = session.shuffle(&mut rng).unwrap();
    assert!(Difficulty::Hard.shuffle_moves().contains(&(scrambled as u32)));
    let events = run_until_idle(&mut session);
    assert_eq!(session.history().len(), scrambled);
    assert_eq!(session.move_count(), 0);
    assert!(!session.is_solved());
    assert!(!is_cube_solved(session.grid()));
    assert_on_lattice(session.grid());

    let replayed = session.solve().unwrap();
    assert_eq!(replayed, scrambled);
    assert!(session.history().is_empty());
    let solve_events = run_until_idle(&mut session);

    assert_home(session.grid());
    assert!(session.is_solved());
    assert_eq!(session.move_count(), 0);
    let won = |e: &SessionEvent| matches!(e, SessionEvent::Won(_));
    assert!(!events.iter().any(won));
    assert!(!solve_events.iter().any(won));
    assert_eq!(session.win(), None);
}

#[test]
fn hand_moves_are_counted_and_undo_by_hand_wins() {
    let mut session = Session::default();
    let turns = [
        twist(Axis::X, 1, Direction::Clockwise),
        twist(Axis::Y, 0, Direction::CounterClockwise),
        twist(Axis::Z, -1, Direction::Clockwise),
    ];
    for turn in turns {
        session.user_move(turn).unwrap();
        run_until_idle(&mut session);
    }
    assert_eq!(session.move_count(), 3);
    assert!(!session.is_solved());

    let mut events = Vec::new();
    for turn in inverse_sequence(turns) {
        session.user_move(turn).unwrap();
        events.extend(run_until_idle(&mut session));
    }
    assert_eq!(session.move_count(), 6);
    let wins: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            SessionEvent::Won(win) => Some(*win),
            _ => None,
        })
        .collect();
    assert_eq!(wins.len(), 1);
    assert_eq!(wins[0].move_count, 6);
    assert_home(session.grid());
}

#[test]
fn input_is_rejected_until_the_queue_drains() {
    let mut session = Session::default();
    session
        .user_move(twist(Axis::Y, 1, Direction::Clockwise))
        .unwrap();
    assert_eq!(
        session.user_move(twist(Axis::X, 1, Direction::Clockwise)),
        Err(ActionRejected::Busy)
    );
    run_until_idle(&mut session);
    session.solve().unwrap();
    assert_eq!(session.solve(), Err(ActionRejected::AutoSolving));
    assert_eq!(
        session.user_move(twist(Axis::X, 1, Direction::Clockwise)),
        Err(ActionRejected::AutoSolving)
    );
    run_until_idle(&mut session);
    assert_eq!(session.solve(), Err(ActionRejected::NothingToUndo));
}

#[test]
fn animator_plays_moves_in_queue_order() {
    let mut grid = CubeGrid::new();
    let mut animator = Animator::new();
    let queued: Vec<Move> = [Axis::X, Axis::Y, Axis::Z]
        .into_iter()
        .map(|axis| Move {
            twist: twist(axis, 1, Direction::Clockwise),
            duration: Duration::from_millis(100),
            source: MoveSource::Manual,
        })
        .collect();
    for mv in &queued {
        animator.enqueue(*mv);
    }

    let mut started = Vec::new();
    let mut completed = Vec::new();
    while !animator.is_idle() {
        for event in animator.tick(&mut grid, Duration::from_millis(30)) {
            match event {
                AnimatorEvent::Started(mv) => started.push(mv),
                AnimatorEvent::Completed(mv) => completed.push(mv),
                AnimatorEvent::Aborted(_) => panic!("nothing was aborted"),
            }
        }
    }
    assert_eq!(started, queued);
    assert_eq!(completed, queued);
    assert_on_lattice(&grid);
}

#[test]
fn inverting_a_sequence_twice_gives_it_back() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let sequence: Vec<Twist> = (0..40).map(|_| random_twist(&mut rng)).collect();
    let inverse = inverse_sequence(sequence.iter().copied());
    assert_ne!(inverse, sequence);
    assert_eq!(inverse_sequence(inverse), sequence);
}

#[test]
fn random_turns_keep_the_lattice_intact() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let mut grid = CubeGrid::new();
    let mut applied = Vec::new();
    for _ in 0..200 {
        let turn = random_twist(&mut rng);
        grid.turn(turn);
        applied.push(turn);
        assert_on_lattice(&grid);
    }
    for turn in inverse_sequence(applied) {
        grid.turn(turn);
    }
    assert_home(&grid);
}

#[test]
fn reset_mid_shuffle_leaves_a_clean_cube() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let mut session = Session::default();
    session.shuffle(&mut rng).unwrap();
    // Partway into the third move
    for _ in 0..15 {
        session.tick(FRAME);
    }
    assert!(session.is_animating());

    session.reset();
    assert!(session.is_accepting_input());
    assert_eq!(session.pending_moves(), 0);
    assert!(session.history().is_empty());
    assert_eq!(session.move_count(), 0);
    assert_home(session.grid());

    // Nothing left over surfaces on later ticks
    let events = run_until_idle(&mut session);
    assert!(events.is_empty());
}

#[test]
fn abort_settles_the_turning_slice() {
    let mut grid = CubeGrid::new();
    let mut animator = Animator::new();
    animator.enqueue(Move {
        twist: twist(Axis::Z, 0, Direction::CounterClockwise),
        duration: Duration::from_millis(300),
        source: MoveSource::Manual,
    });
    animator.tick(&mut grid, Duration::from_millis(120));
    assert!(!grid.is_aligned());

    let events = animator.abort(&mut grid);
    assert!(matches!(events.as_slice(), [AnimatorEvent::Aborted(_)]));
    assert!(animator.is_idle());
    assert_on_lattice(&grid);
}
