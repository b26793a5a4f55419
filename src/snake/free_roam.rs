//! Continuous-space snake whose body follows the head through a spring chain.

use std::f32::consts::{PI, TAU};

use bevy::math::Vec2;

/// Simulation constants are tuned per 60 Hz frame.
const FRAME_RATE: f32 = 60.0;
const SPRING_STIFFNESS: f32 = 0.15;
const SPACING_FACTOR: f32 = 0.8;
const BEND_SMOOTHING: f32 = 0.1;
const MAX_TURN_FAST: f32 = 0.08;
const MAX_TURN_SLOW: f32 = 0.15;
const ACCELERATION: f32 = 0.1;
const COASTING_DECAY: f32 = 0.95;

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct FreeSegment {
    pub position: Vec2,
    /// Bend angle in radians, eased toward the predecessor.
    pub angle: f32,
    pub width: f32,
}

impl FreeSegment {
    fn new(position: Vec2, index: usize) -> Self {
        Self {
            position,
            angle: 0.0,
            width: segment_width(index),
        }
    }
}

/// Body segments taper from 25 units at the head to a minimum of 3.
pub fn segment_width(index: usize) -> f32 {
    (25.0 - index as f32 * 1.2).max(3.0)
}

/// Wraps an angle difference into `(-PI, PI]`.
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}

#[derive(Clone, Debug)]
pub struct FreeRoamSnake {
    segments: Vec<FreeSegment>,
    heading: f32,
    speed: f32,
    max_speed: f32,
    boosting: bool,
}

impl FreeRoamSnake {
    /// Lays `length` segments out in a line behind `head`, `spacing` apart.
    pub fn new(head: Vec2, length: usize, spacing: f32) -> Self {
        let segments = (0..length.max(1))
            .map(|i| FreeSegment::new(head - Vec2::new(i as f32 * spacing, 0.0), i))
            .collect();
        Self {
            segments,
            heading: 0.0,
            speed: 0.0,
            max_speed: 3.0,
            boosting: false,
        }
    }

    pub fn head(&self) -> &FreeSegment {
        &self.segments[0]
    }

    pub fn segments(&self) -> &[FreeSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn heading(&self) -> f32 {
        self.heading
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn is_boosting(&self) -> bool {
        self.boosting
    }

    pub fn set_boost(&mut self, boosting: bool) {
        self.boosting = boosting;
    }

    /// Turns the heading toward `target`, limited by the turning rate.
    pub fn steer_toward(&mut self, target: Vec2, dt: f32) {
        let to_target = target - self.head().position;
        if to_target.length_squared() < f32::EPSILON {
            return;
        }
        let wanted = to_target.y.atan2(to_target.x);
        let diff = wrap_angle(wanted - self.heading);
        let max_turn = if self.speed > 1.0 {
            MAX_TURN_FAST
        } else {
            MAX_TURN_SLOW
        } * dt
            * FRAME_RATE;
        self.heading = wrap_angle(self.heading + diff.clamp(-max_turn, max_turn));
    }

    /// Advances the head and lets every segment chase its predecessor.
    pub fn update(&mut self, dt: f32) {
        let frames = dt * FRAME_RATE;

        if self.boosting {
            self.speed = (self.speed + ACCELERATION * frames).min(self.max_speed);
        } else {
            self.speed *= COASTING_DECAY.powf(frames);
        }

        let heading = self.heading;
        let speed = self.speed;
        let head = &mut self.segments[0];
        head.position += Vec2::from_angle(heading) * speed * frames;
        head.angle = heading;

        for i in 1..self.segments.len() {
            let leader = self.segments[i - 1].position;
            let segment = &mut self.segments[i];
            let offset = leader - segment.position;
            let distance = offset.length();
            if distance <= 0.0 {
                continue;
            }

            let force = (distance - segment.width * SPACING_FACTOR) * SPRING_STIFFNESS;
            segment.position += offset / distance * force * frames;

            let target_angle = offset.y.atan2(offset.x);
            let bend = wrap_angle(target_angle - segment.angle);
            let ease = (BEND_SMOOTHING * frames).min(1.0);
            segment.angle = wrap_angle(segment.angle + bend * ease);
        }
    }

    /// Appends a new segment just behind the tail.
    pub fn grow(&mut self) {
        let tail = self.segments[self.segments.len() - 1].position;
        let index = self.segments.len();
        self.segments
            .push(FreeSegment::new(tail - Vec2::new(10.0, 10.0), index));
    }
}
