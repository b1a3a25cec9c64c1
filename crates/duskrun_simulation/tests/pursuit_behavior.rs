//! Интеграционные тесты pursuit агента
//!
//! Прогоняем sensing/chase step-функции по симулированному времени и
//! проверяем контракт: latch только на границах периода, frame-accurate
//! chase, standoff stop, однократная команда "домой" за период.

use bevy::prelude::*;
use duskrun_simulation::pursuit::{chase_step, sense_tick};
use duskrun_simulation::{NavAgent, PursuitAgent, PursuitConfig};

const DT: f32 = 0.05;

fn config() -> PursuitConfig {
    PursuitConfig {
        chase_distance: 10.0,
        standoff_distance: 1.5,
        sense_interval: 0.25,
    }
}

#[test]
fn in_range_latches_only_at_sense_boundaries() {
    let config = config();
    let mut agent = PursuitAgent::new(Vec3::ZERO);
    let mut nav = NavAgent::default();

    let far = Some(Vec3::new(50.0, 0.0, 0.0));
    let near = Some(Vec3::new(5.0, 0.0, 0.0));

    // Активация: первый sense немедленно, цель далеко
    assert!(sense_tick(&mut agent, &config, Vec3::ZERO, far, &mut nav, DT));
    assert!(!agent.in_range);

    // Цель телепортировалась в range посреди периода — latch не меняется
    let mut fired = false;
    for _ in 0..5 {
        fired = sense_tick(&mut agent, &config, Vec3::ZERO, near, &mut nav, DT);
        if fired {
            break;
        }
        assert!(!agent.in_range, "in_range изменился между активациями sense");
    }

    // На границе периода — latch обновлён
    assert!(fired);
    assert!(agent.in_range);
}

#[test]
fn chase_follows_live_target_every_frame() {
    let config = config();
    let mut agent = PursuitAgent::new(Vec3::ZERO);
    agent.in_range = true;
    let mut nav = NavAgent::default();

    // Цель движется; destination совпадает с живой позицией каждый кадр
    for frame in 0..20 {
        let target = Vec3::new(5.0 + frame as f32 * 0.1, 0.0, 3.0);
        chase_step(&agent, &config, Vec3::ZERO, Some(target), &mut nav);
        assert_eq!(nav.current_destination(), Some(target));
    }

    // 20 кадров — 20 команд (frame-accurate, не период-accurate)
    assert_eq!(nav.revision(), 20);
}

#[test]
fn standoff_stops_then_chase_resumes() {
    let config = config();
    let mut agent = PursuitAgent::new(Vec3::ZERO);
    agent.in_range = true;
    let mut nav = NavAgent::default();

    // Преследуем
    chase_step(&agent, &config, Vec3::ZERO, Some(Vec3::new(4.0, 0.0, 0.0)), &mut nav);
    assert!(nav.current_destination().is_some());

    // Цель в standoff радиусе: один stop, дальше тишина
    let close = Some(Vec3::new(1.0, 0.0, 0.0));
    chase_step(&agent, &config, Vec3::ZERO, close, &mut nav);
    assert_eq!(nav.current_destination(), None);
    let stopped_revision = nav.revision();

    for _ in 0..10 {
        chase_step(&agent, &config, Vec3::ZERO, close, &mut nav);
    }
    assert_eq!(nav.revision(), stopped_revision);

    // Цель отошла за standoff — chase возобновился
    chase_step(&agent, &config, Vec3::ZERO, Some(Vec3::new(3.0, 0.0, 0.0)), &mut nav);
    assert_eq!(nav.current_destination(), Some(Vec3::new(3.0, 0.0, 0.0)));
}

#[test]
fn return_home_issued_once_per_period() {
    let config = config();
    let home = Vec3::new(2.0, 0.0, 2.0);
    let mut agent = PursuitAgent::new(home);
    let mut nav = NavAgent::default();

    // Агент ушёл от дома, преследуя цель; destination ≠ home
    nav.set_destination(Vec3::new(30.0, 0.0, 0.0));
    let baseline = nav.revision();

    // Цель вне range; секунда симуляции = 5 активаций sense (t=0, 0.25, ...)
    let far = Some(Vec3::new(50.0, 0.0, 0.0));
    let mut fires = 0;
    for _ in 0..20 {
        if sense_tick(&mut agent, &config, Vec3::ZERO, far, &mut nav, DT) {
            fires += 1;
        }
    }

    assert!(fires >= 4);
    // Ровно одна команда "домой": первая активация; после destination == home
    assert_eq!(nav.revision(), baseline + 1);
    assert_eq!(nav.current_destination(), Some(home));
}

#[test]
fn absent_target_is_noop_everywhere() {
    let config = config();
    let mut agent = PursuitAgent::new(Vec3::ZERO);
    agent.in_range = true;
    let mut nav = NavAgent::default();

    for _ in 0..20 {
        sense_tick(&mut agent, &config, Vec3::ZERO, None, &mut nav, DT);
        chase_step(&agent, &config, Vec3::ZERO, None, &mut nav);
    }

    // Ни одной команды, latch нетронут
    assert_eq!(nav.revision(), 0);
    assert!(agent.in_range);
}
