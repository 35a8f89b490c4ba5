use std::ops::RangeInclusive;
use std::time::Duration;

use eframe::egui::{Pos2, Rect, Vec2, pos2, vec2};
use log::trace;
use rand::Rng;
use rand::rngs::StdRng;

mod clock;

pub(in crate::app) use clock::{SystemClock, TickScheduler};

pub const AGENT_SIZE: Vec2 = vec2(32.0, 24.0);
const ARRIVAL_EPSILON: f32 = 0.5;
const RETARGET_TICKS: RangeInclusive<u32> = 40..=160;
const SPEED_RANGE: RangeInclusive<f32> = 30.0..=80.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

#[derive(Clone, Debug)]
pub struct Agent {
    /// Top-left corner of the footprint, canvas-local.
    pub position: Pos2,
    pub velocity: Vec2,
    pub target: Pos2,
    /// Units per second.
    pub speed: f32,
    pub retarget_in: u32,
    pub facing: Facing,
}

impl Agent {
    pub fn rect(&self) -> Rect {
        Rect::from_min_size(self.position, AGENT_SIZE)
    }

    fn update_facing(&mut self) {
        if self.velocity.x > 0.0 {
            self.facing = Facing::Right;
        } else if self.velocity.x < 0.0 {
            self.facing = Facing::Left;
        }
    }

    fn aim(&mut self) {
        let to_target = self.target - self.position;
        let distance = to_target.length();
        self.velocity = if distance > ARRIVAL_EPSILON {
            to_target / distance * self.speed
        } else {
            Vec2::ZERO
        };
        self.update_facing();
    }
}

/// Ambient wanderers confined to the canvas.
///
/// Each agent walks toward a random target and picks a new one when it gets
/// there or when its countdown runs out. Coordinates are canvas-local, so the
/// agents ignore pan and zoom.
pub struct AnimationController<R: Rng = StdRng> {
    agents: Vec<Agent>,
    agent_count: usize,
    bounds: Rect,
    rng: R,
}

impl<R: Rng> AnimationController<R> {
    pub fn new(agent_count: usize, rng: R) -> Self {
        Self {
            agents: Vec::with_capacity(agent_count),
            agent_count,
            bounds: Rect::ZERO,
            rng,
        }
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Area the top-left corner of an agent may occupy.
    fn movement_area(&self) -> Rect {
        movement_area(self.bounds)
    }

    /// Updates the canvas size. The first usable size spawns the agents;
    /// later changes pull stragglers back inside and send them somewhere new.
    pub fn resize(&mut self, size: Vec2) {
        let bounds = Rect::from_min_size(Pos2::ZERO, size);
        if bounds == self.bounds {
            return;
        }
        self.bounds = bounds;

        if !has_area(bounds) {
            return;
        }

        if self.agents.is_empty() {
            self.spawn();
            return;
        }

        let area = self.movement_area();
        let Self { agents, rng, .. } = self;
        for (index, agent) in agents.iter_mut().enumerate() {
            let clamped = agent.position.clamp(area.min, area.max);
            let target_outside = !area.contains(agent.target);
            if clamped != agent.position || target_outside {
                trace!("agent {index} re-targeted after resize to {size:?}");
                agent.position = clamped;
                retarget(agent, area, rng);
            }
        }
    }

    fn spawn(&mut self) {
        let area = self.movement_area();
        for _ in 0..self.agent_count {
            let speed = self.rng.random_range(SPEED_RANGE);
            let mut agent = Agent {
                position: random_point(&mut self.rng, area),
                velocity: Vec2::ZERO,
                target: Pos2::ZERO,
                speed,
                retarget_in: 0,
                facing: Facing::Right,
            };
            retarget(&mut agent, area, &mut self.rng);
            self.agents.push(agent);
        }
        trace!("spawned {} agents in {:?}", self.agents.len(), self.bounds);
    }

    /// Advances every agent by one tick of length `elapsed`. Does nothing until
    /// the canvas has a size.
    pub fn tick(&mut self, elapsed: Duration) {
        if !has_area(self.bounds) || self.agents.is_empty() {
            return;
        }

        let area = self.movement_area();
        let seconds = elapsed.as_secs_f32();
        let Self { agents, rng, .. } = self;
        for agent in agents.iter_mut() {
            let to_target = agent.target - agent.position;
            let distance = to_target.length();
            let step = agent.speed * seconds;

            let arrived = if distance <= step.max(ARRIVAL_EPSILON) {
                agent.position = agent.target;
                true
            } else {
                let direction = to_target / distance;
                agent.position += direction * step;
                agent.velocity = direction * agent.speed;
                agent.update_facing();
                distance - step <= ARRIVAL_EPSILON
            };

            agent.retarget_in = agent.retarget_in.saturating_sub(1);
            if arrived || agent.retarget_in == 0 {
                retarget(agent, area, rng);
            }

            agent.position = agent.position.clamp(area.min, area.max);
        }
    }
}

fn has_area(rect: Rect) -> bool {
    rect.width() > 0.0 && rect.height() > 0.0
}

fn movement_area(bounds: Rect) -> Rect {
    let max = (bounds.max - AGENT_SIZE).max(bounds.min);
    Rect::from_min_max(bounds.min, max)
}

fn random_point<R: Rng>(rng: &mut R, area: Rect) -> Pos2 {
    pos2(
        rng.random_range(area.min.x..=area.max.x),
        rng.random_range(area.min.y..=area.max.y),
    )
}

fn retarget<R: Rng>(agent: &mut Agent, area: Rect, rng: &mut R) {
    agent.target = random_point(rng, area);
    agent.retarget_in = rng.random_range(RETARGET_TICKS);
    agent.aim();
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::clock::manual::ManualClock;
    use super::*;

    const TICK: Duration = Duration::from_millis(50);

    fn controller(count: usize, seed: u64) -> AnimationController<StdRng> {
        AnimationController::new(count, StdRng::seed_from_u64(seed))
    }

    fn assert_inside(controller: &AnimationController<StdRng>) {
        let bounds = controller.bounds;
        for agent in controller.agents() {
            assert!(
                bounds.contains_rect(agent.rect()),
                "{:?} escaped {:?}",
                agent.rect(),
                bounds
            );
        }
    }

    #[test]
    fn spawns_once_when_canvas_is_sized() {
        let mut controller = controller(6, 1);
        assert!(controller.agents().is_empty());

        controller.resize(vec2(800.0, 600.0));
        assert_eq!(controller.agents().len(), 6);
        assert_inside(&controller);

        controller.resize(vec2(900.0, 650.0));
        assert_eq!(controller.agents().len(), 6);
    }

    #[test]
    fn zero_size_canvas_tick_is_noop() {
        let mut controller = controller(4, 2);
        controller.tick(TICK);
        assert!(controller.agents().is_empty());

        controller.resize(Vec2::ZERO);
        controller.tick(TICK);
        assert!(controller.agents().is_empty());
    }

    #[test]
    fn ticks_after_collapse_keep_agents_still() {
        let mut controller = controller(3, 3);
        controller.resize(vec2(400.0, 300.0));
        let before = controller
            .agents()
            .iter()
            .map(|agent| agent.position)
            .collect::<Vec<_>>();

        controller.resize(vec2(0.0, 300.0));
        controller.tick(TICK);
        let after = controller
            .agents()
            .iter()
            .map(|agent| agent.position)
            .collect::<Vec<_>>();
        assert_eq!(before, after);
    }

    #[test]
    fn moves_toward_target_by_speed() {
        let mut controller = controller(1, 4);
        controller.resize(vec2(800.0, 600.0));
        {
            let agent = &mut controller.agents[0];
            agent.position = pos2(100.0, 100.0);
            agent.target = pos2(400.0, 100.0);
            agent.speed = 40.0;
            agent.retarget_in = 100;
        }

        controller.tick(Duration::from_millis(500));
        let agent = &controller.agents()[0];
        assert!((agent.position.x - 120.0).abs() < 1e-3);
        assert_eq!(agent.position.y, 100.0);
        assert_eq!(agent.facing, Facing::Right);
        assert_eq!(agent.retarget_in, 99);
    }

    #[test]
    fn arrival_picks_a_new_target() {
        let mut controller = controller(1, 5);
        controller.resize(vec2(800.0, 600.0));
        {
            let agent = &mut controller.agents[0];
            agent.position = pos2(100.0, 100.0);
            agent.target = pos2(101.0, 100.0);
            agent.speed = 40.0;
            agent.retarget_in = 100;
        }

        controller.tick(TICK);
        let agent = &controller.agents()[0];
        assert_eq!(agent.position, pos2(101.0, 100.0));
        assert!(RETARGET_TICKS.contains(&agent.retarget_in));
        assert!(movement_area(controller.bounds).contains(agent.target));
    }

    #[test]
    fn countdown_expiry_forces_retarget() {
        let mut controller = controller(1, 6);
        controller.resize(vec2(800.0, 600.0));
        {
            let agent = &mut controller.agents[0];
            agent.position = pos2(10.0, 10.0);
            agent.target = pos2(700.0, 500.0);
            agent.retarget_in = 1;
        }

        controller.tick(TICK);
        assert!(RETARGET_TICKS.contains(&controller.agents()[0].retarget_in));
    }

    #[test]
    fn facing_follows_horizontal_velocity_only() {
        let mut agent = Agent {
            position: pos2(50.0, 50.0),
            velocity: Vec2::ZERO,
            target: pos2(10.0, 50.0),
            speed: 10.0,
            retarget_in: 10,
            facing: Facing::Right,
        };
        agent.aim();
        assert_eq!(agent.facing, Facing::Left);

        agent.target = pos2(50.0, 300.0);
        agent.aim();
        assert_eq!(agent.velocity.x, 0.0);
        assert_eq!(agent.facing, Facing::Left);

        agent.target = pos2(90.0, 50.0);
        agent.aim();
        assert_eq!(agent.facing, Facing::Right);
    }

    #[test]
    fn shrinking_canvas_clamps_and_retargets() {
        let mut controller = controller(8, 7);
        controller.resize(vec2(1200.0, 900.0));
        for agent in &mut controller.agents {
            agent.position = pos2(1100.0, 800.0);
        }

        controller.resize(vec2(300.0, 200.0));
        assert_inside(&controller);
        let area = movement_area(controller.bounds);
        for agent in controller.agents() {
            assert!(area.contains(agent.target));
            assert!(RETARGET_TICKS.contains(&agent.retarget_in));
        }
    }

    #[test]
    fn agents_stay_inside_through_ticks_and_resizes() {
        let clock = ManualClock::default();
        let mut scheduler = TickScheduler::new(clock.clone(), TICK);
        scheduler.due_ticks();

        let mut controller = controller(10, 8);
        let sizes = [
            vec2(640.0, 480.0),
            vec2(200.0, 150.0),
            vec2(1280.0, 720.0),
            vec2(40.0, 30.0),
            vec2(900.0, 100.0),
        ];

        for round in 0..400 {
            if round % 80 == 0 {
                controller.resize(sizes[round / 80]);
                assert_inside(&controller);
            }
            clock.advance(Duration::from_millis(16));
            for _ in 0..scheduler.due_ticks() {
                controller.tick(scheduler.period());
                assert_inside(&controller);
            }
        }
    }

    #[test]
    fn canvas_smaller_than_agent_pins_to_origin() {
        let mut controller = controller(2, 9);
        controller.resize(vec2(10.0, 10.0));
        controller.tick(TICK);
        for agent in controller.agents() {
            assert_eq!(agent.position, Pos2::ZERO);
        }
    }

    #[test]
    fn same_seed_same_motion() {
        let mut a = controller(5, 42);
        let mut b = controller(5, 42);
        for controller in [&mut a, &mut b] {
            controller.resize(vec2(500.0, 400.0));
            for _ in 0..50 {
                controller.tick(TICK);
            }
        }
        let positions = |c: &AnimationController<StdRng>| {
            c.agents().iter().map(|agent| agent.position).collect::<Vec<_>>()
        };
        assert_eq!(positions(&a), positions(&b));
    }
}
