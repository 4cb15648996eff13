use glam::Vec2;
use ninja_run::Tuning;
use ninja_run::consts::*;
use ninja_run::platform::{AudioSink, Driver, RenderSink, UiSink};
use ninja_run::sim::*;
use ninja_run::tuning::EnemyMode;
use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Records everything the driver routes out of the simulation
#[derive(Default)]
struct Recorder {
    frames: Vec<Frame>,
    effects: Vec<GameEvent>,
    cues: Vec<AudioCue>,
    shown: Vec<(u64, GamePhase)>,
    finals: Vec<u64>,
}

impl RenderSink for Recorder {
    fn draw(&mut self, frame: &Frame) {
        self.frames.push(frame.clone());
    }

    fn effect(&mut self, event: &GameEvent) {
        self.effects.push(event.clone());
    }
}

impl AudioSink for Recorder {
    fn play(&mut self, cue: AudioCue) {
        self.cues.push(cue);
    }
}

impl UiSink for Recorder {
    fn show(&mut self, score: u64, phase: GamePhase) {
        self.shown.push((score, phase));
    }

    fn final_score(&mut self, score: u64) {
        self.finals.push(score);
    }
}

type TestDriver = Driver<Recorder, Recorder, Recorder>;

fn driver_with(seed: u64, tuning: Tuning) -> TestDriver {
    Driver::new(
        GameState::with_tuning(seed, tuning),
        Recorder::default(),
        Recorder::default(),
        Recorder::default(),
    )
}

/// Nothing spawns on its own
fn quiet_tuning() -> Tuning {
    let mut tuning = Tuning::default();
    tuning.spawn.initial_enemy_delay = 1.0e9;
    tuning.spawn.initial_obstacle_delay = 1.0e9;
    tuning
}

/// Drop an obstacle right in front of the player
fn block_player(driver: &mut TestDriver) {
    let state = driver.state_mut();
    let field = state.playfield;
    let id = state.next_entity_id();
    let mut obstacle = Obstacle::spawn(id, 0, Vec2::new(30.0, 40.0), 5.0, &field);
    obstacle.pos.x = PLAYER_X + 30.0;
    state.obstacles.push(obstacle);
}

#[test]
fn restart_scenario_end_to_end() {
    let mut driver = driver_with(99, quiet_tuning());
    driver.push(Command::Start);
    for _ in 0..100 {
        assert!(!driver.frame(1.0).game_over);
    }
    assert_eq!(driver.state().displayed_score(), 10);

    block_player(&mut driver);
    let report = driver.frame(1.0);
    assert!(report.game_over);
    assert_eq!(driver.ui().finals, vec![10]);
    assert_eq!(driver.audio().cues.last(), Some(&AudioCue::PlayerDied));
    assert_eq!(driver.ui().shown.last(), Some(&(10, GamePhase::GameOver)));

    driver.push(Command::Restart);
    driver.frame(1.0);
    let state = driver.state();
    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.pooled_count(), 0);
    // One tick of the new run has already been played
    assert_eq!(state.tick_count, 1);
    assert_eq!(state.displayed_score(), 0);
    assert!((state.difficulty.speed() - (BASE_SCROLL_SPEED + SCROLL_RAMP)).abs() < 1e-6);

    // The old player and the blocking obstacle were both released
    let released = driver
        .render()
        .effects
        .iter()
        .filter(|e| {
            matches!(
                e,
                GameEvent::Destroyed {
                    cause: DestroyCause::Reset,
                    ..
                }
            )
        })
        .count();
    assert_eq!(released, 2);
}

#[test]
fn game_over_freezes_until_restart() {
    let mut driver = driver_with(3, quiet_tuning());
    driver.push(Command::Start);
    driver.frame(1.0);
    block_player(&mut driver);
    assert!(driver.frame(1.0).game_over);

    let frozen = driver.state().frame().entities.len();
    for _ in 0..10 {
        driver.push(Command::Jump);
        driver.push(Command::Fire);
        driver.push(Command::Start);
        let report = driver.frame(1.0);
        assert!(!report.game_over);
        assert_eq!(report.tick, 2);
    }
    assert_eq!(driver.state().frame().entities.len(), frozen);
    assert_eq!(driver.ui().finals.len(), 1);
    assert_eq!(
        driver.audio().cues.iter().filter(|c| **c == AudioCue::PlayerDied).count(),
        1
    );
}

#[test]
fn menu_ignores_gameplay_commands() {
    let mut driver = driver_with(1, Tuning::default());
    driver.push(Command::Jump);
    driver.push(Command::Fire);
    driver.push(Command::Restart);
    for _ in 0..5 {
        driver.frame(1.0);
    }
    assert_eq!(driver.state().phase, GamePhase::Menu);
    assert!(driver.audio().cues.is_empty());
    assert!(driver.render().effects.is_empty());
    assert!(driver.render().frames.iter().all(|f| f.entities.is_empty()));
}

#[test]
fn shuriken_kill_reaches_every_sink() {
    let tuning = quiet_tuning();
    let mut driver = driver_with(8, tuning.clone());
    driver.push(Command::Start);
    driver.frame(1.0);

    let state = driver.state_mut();
    let field = state.playfield;
    let id = state.next_entity_id();
    let mut rng = Pcg32::seed_from_u64(0);
    let mut enemy = Enemy::spawn(id, EnemyMode::Static, 0.0, &tuning.enemy, &field, &mut rng);
    enemy.pos.x = 600.0;
    state.enemies.push(enemy);

    driver.push(Command::Fire);
    let mut kills = 0;
    for _ in 0..100 {
        kills += driver.frame(1.0).kills;
    }
    assert_eq!(kills, 1);

    assert_eq!(
        driver.audio().cues,
        vec![AudioCue::ProjectileFired, AudioCue::EnemyDestroyed]
    );
    assert!(driver.render().effects.iter().any(|e| matches!(
        e,
        GameEvent::EnemyDestroyed { id: hit, tint: DESTROY_EFFECT_TINT, .. } if *hit == id
    )));
    // 101 ticks of survival plus the bonus
    assert_eq!(driver.state().displayed_score(), 20);
    assert_eq!(driver.ui().shown.last(), Some(&(20, GamePhase::Playing)));
}

#[test]
fn missed_shuriken_culled_past_right_edge() {
    let mut driver = driver_with(2, quiet_tuning());
    driver.push(Command::Start);
    driver.push(Command::Fire);

    let offscreen = |driver: &TestDriver| {
        driver.render().effects.iter().any(|e| {
            matches!(
                e,
                GameEvent::Destroyed {
                    kind: EntityKind::Projectile,
                    cause: DestroyCause::Offscreen,
                    ..
                }
            )
        })
    };

    // Muzzle at x=130, 8 px per tick, culled once past 1380
    for _ in 0..156 {
        driver.frame(1.0);
    }
    assert!(!offscreen(&driver));
    assert_eq!(driver.state().projectiles.len(), 1);

    driver.frame(1.0);
    assert!(offscreen(&driver));
    assert!(driver.state().projectiles.is_empty());
}

#[test]
fn render_sink_sees_every_active_entity() {
    let mut driver = driver_with(21, Tuning::default());
    driver.push(Command::Start);
    for _ in 0..150 {
        driver.frame(1.0);
    }

    let frame = driver.render().frames.last().expect("frame drawn");
    assert_eq!(frame.tick, 150);
    assert!(frame.entities.iter().any(|e| e.kind == EntityKind::Player));
    assert!(frame.entities.iter().any(|e| e.kind == EntityKind::Enemy));
    assert!(driver.render().effects.iter().any(|e| matches!(
        e,
        GameEvent::Spawned {
            kind: EntityKind::Enemy,
            ..
        }
    )));
}

#[test]
fn same_seed_same_run() {
    let run = |seed: u64| {
        let mut driver = driver_with(seed, Tuning::default());
        driver.push(Command::Start);
        for n in 0..600u32 {
            if n % 37 == 0 {
                driver.push(Command::Jump);
            }
            if n % 15 == 0 {
                driver.push(Command::Fire);
            }
            driver.frame(1.0);
        }
        serde_json::to_string(&driver.state().frame()).expect("frame serializes")
    };

    assert_eq!(run(4242), run(4242));
}
