use rand::rngs::StdRng;
use rand::SeedableRng;

use twincade::assets::SpriteSet;
use twincade::audio::{Cue, RecordingAudio};
use twincade::engine::GameState;
use twincade::games::flappy::{Flappy, PipePair, BIRD_SIZE, WIN_HEIGHT};
use twincade::games::snake::{Apple, Snake, SnakeGame};
use twincade::games::Game;
use twincade::input::{Command, Direction};

fn flappy() -> (Flappy, RecordingAudio) {
    let sprites = SpriteSet::builtin().unwrap();
    let mut game = Flappy::new(sprites, 60, StdRng::seed_from_u64(9));
    let mut audio = RecordingAudio::new();
    game.handle_command(Command::Confirm, &mut audio);
    // Level flight: no climb left, sinking slowly
    game.bird_mut().ms_to_climb = 0.0;
    (game, audio)
}

fn snake() -> (SnakeGame, RecordingAudio) {
    let mut game = SnakeGame::new(15, StdRng::seed_from_u64(9));
    let mut audio = RecordingAudio::new();
    game.handle_command(Command::Confirm, &mut audio);
    (game, audio)
}

#[test]
fn bird_inside_gap_survives() {
    let (mut game, mut audio) = flappy();
    let mut pipe = PipePair::with_bottom(4, game.sprites());
    pipe.x = game.bird().x;
    let (top, bottom) = pipe.gap();
    assert!(game.bird().y > top as f64 && game.bird().y + (BIRD_SIZE as f64) < bottom as f64);
    game.insert_pipe(pipe);

    game.update(1, &mut audio);
    assert_eq!(game.state(), GameState::Playing);
    assert_eq!(audio.count(Cue::GameOver), 0);
}

#[test]
fn bird_overlapping_pipe_ends_game_once() {
    let (mut game, mut audio) = flappy();
    // Tallest bottom pipe reaches well above the bird's row
    let mut pipe = PipePair::with_bottom(PipePair::total_body_pieces(), game.sprites());
    pipe.x = game.bird().x;
    game.insert_pipe(pipe);

    game.update(1, &mut audio);
    assert!(game.is_game_over());
    game.update(1, &mut audio);
    assert_eq!(audio.count(Cue::GameOver), 1);
}

#[test]
fn passed_pipe_scores_once() {
    let (mut game, mut audio) = flappy();
    let mut pipe = PipePair::with_bottom(4, game.sprites());
    pipe.x = 7.6;
    game.insert_pipe(pipe);

    game.update(1, &mut audio);
    assert_eq!(game.get_score(), 1);
    game.update(1, &mut audio);
    game.update(1, &mut audio);
    assert_eq!(game.get_score(), 1);
    assert_eq!(audio.count(Cue::Score), 1);
}

#[test]
fn flappy_restart_resets_world_and_keeps_best() {
    let (mut game, mut audio) = flappy();
    let start_y = game.bird().y;
    let mut pipe = PipePair::with_bottom(4, game.sprites());
    pipe.x = 7.6;
    game.insert_pipe(pipe);
    game.update(1, &mut audio);
    assert_eq!(game.get_score(), 1);

    game.bird_mut().y = (WIN_HEIGHT - BIRD_SIZE) as f64;
    game.update(1, &mut audio);
    assert!(game.is_game_over());

    // 1.5 s of freeze at 60 fps
    game.update(90, &mut audio);
    game.handle_command(Command::Restart, &mut audio);
    assert_eq!(game.state(), GameState::Playing);
    assert_eq!(game.get_score(), 0);
    assert_eq!(game.best_score(), 1);
    assert!(game.pipes().is_empty());
    assert_eq!(game.bird().y, start_y);
}

#[test]
fn snake_moves_down_without_collision() {
    let (mut game, mut audio) = snake();
    game.set_board(
        Snake::from_cells(&[(5, 5), (5, 4), (5, 3)], Direction::Down),
        Apple { cell: (20, 15) },
    );
    game.update(1, &mut audio);
    let cells: Vec<_> = game.snake().cells().copied().collect();
    assert_eq!(cells, vec![(5, 6), (5, 5), (5, 4)]);
    assert_eq!(game.state(), GameState::Playing);
}

#[test]
fn snake_reversing_into_body_ends_game() {
    let (mut game, mut audio) = snake();
    game.set_board(
        Snake::from_cells(&[(5, 5), (5, 4), (5, 3)], Direction::Down),
        Apple { cell: (20, 15) },
    );
    game.handle_command(Command::Steer(Direction::Up), &mut audio);
    game.update(1, &mut audio);
    assert!(game.is_game_over());
    assert_eq!(audio.count(Cue::GameOver), 1);
}

#[test]
fn snake_restart_after_freeze() {
    let (mut game, mut audio) = snake();
    game.set_board(Snake::from_cells(&[(1, 5)], Direction::Left), Apple { cell: (20, 15) });
    game.update(1, &mut audio);
    assert!(game.is_game_over());

    game.handle_command(Command::Confirm, &mut audio);
    assert!(game.is_game_over(), "restart ignored while frozen");

    // 1 s of freeze at 15 fps
    game.update(15, &mut audio);
    game.handle_command(Command::Confirm, &mut audio);
    assert_eq!(game.state(), GameState::Playing);
    assert_eq!(game.snake().head(), SnakeGame::start_cell());
    assert_eq!(game.snake().len(), 1);
    assert_eq!(game.get_score(), 0);
}
