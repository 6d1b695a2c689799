//! Game session state and per-frame ingestion.
//!
//! [`GameSession`] owns the mutable [`GameState`] and is the only writer:
//! each incoming [`KeypointFrame`] flows through the gesture detector,
//! the punch classifier, and hit resolution, and the resulting
//! notifications are returned as [`GameEvent`]s. Consumers read the state
//! through [`GameSnapshot`]s.

use punchbox_core::{
    BodyPose, Hand, KeypointFrame, ObservedPoint, Point2D, PunchStats, PunchType, SessionId,
    Timestamp, Viewport,
};
use serde::{Deserialize, Serialize};

use crate::classifier::PunchClassifier;
use crate::config::EngineConfig;
use crate::detector::GestureDetector;
use crate::target::TargetField;

/// Notification emitted toward UI and statistics consumers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Score after a registered hit
    ScoreChanged(u32),
    /// Punch statistics after a registered hit
    StatsChanged(PunchStats),
    /// New target center, after a hit and once at session start
    TargetMoved(Point2D),
    /// Body joints forwarded to the rendering collaborator
    SkeletonUpdated(BodyPose),
}

/// Mutable session aggregate.
///
/// Mutated exclusively by frame ingestion; lives for the session
/// duration and is discarded with it.
#[derive(Debug, Clone)]
pub struct GameState {
    score: u32,
    target_center: Point2D,
    /// Hit registration is suppressed until this deadline passes
    cooldown_until: Option<Timestamp>,
    previous_left_fist: Option<ObservedPoint>,
    previous_right_fist: Option<ObservedPoint>,
    body_joints: BodyPose,
    show_skeleton: bool,
    punch_stats: PunchStats,
}

impl GameState {
    fn new(target_center: Point2D, show_skeleton: bool) -> Self {
        Self {
            score: 0,
            target_center,
            cooldown_until: None,
            previous_left_fist: None,
            previous_right_fist: None,
            body_joints: BodyPose::default(),
            show_skeleton,
            punch_stats: PunchStats::default(),
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn target_center(&self) -> Point2D {
        self.target_center
    }

    pub fn punch_stats(&self) -> PunchStats {
        self.punch_stats
    }

    pub fn body_joints(&self) -> &BodyPose {
        &self.body_joints
    }

    /// False only inside the cooldown window following a registered hit
    pub fn can_register_hit(&self, now: Timestamp) -> bool {
        match self.cooldown_until {
            None => true,
            Some(deadline) => now >= deadline,
        }
    }

    fn previous_fist(&self, hand: Hand) -> Option<ObservedPoint> {
        match hand {
            Hand::Left => self.previous_left_fist,
            Hand::Right => self.previous_right_fist,
        }
    }

    fn set_previous_fist(&mut self, hand: Hand, observed: ObservedPoint) {
        match hand {
            Hand::Left => self.previous_left_fist = Some(observed),
            Hand::Right => self.previous_right_fist = Some(observed),
        }
    }

    /// Read-only summary handed across the consumer boundary
    pub fn snapshot(&self, now: Timestamp) -> GameSnapshot {
        GameSnapshot {
            score: self.score,
            target_center: self.target_center,
            can_register_hit: self.can_register_hit(now),
            body_pose_confidence: self.body_joints.confidence,
            punch_stats: self.punch_stats,
        }
    }
}

/// Owned, serializable view of the session state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub score: u32,
    pub target_center: Point2D,
    pub can_register_hit: bool,
    pub body_pose_confidence: f32,
    pub punch_stats: PunchStats,
}

/// A single game session: detector, classifier, target, and state.
pub struct GameSession {
    id: SessionId,
    state: GameState,
    detector: GestureDetector,
    classifier: PunchClassifier,
    target: TargetField,
}

impl GameSession {
    /// Create a session with the target already placed
    pub fn new(config: EngineConfig, viewport: Viewport) -> Self {
        let target = TargetField::new(viewport, config.target);
        let target_center = target.relocate(&mut rand::rng());

        Self {
            id: SessionId::new(),
            state: GameState::new(target_center, config.show_skeleton),
            detector: GestureDetector::new(config.detector),
            classifier: PunchClassifier::new(config.classifier),
            target,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Events describing the freshly created session (initial target)
    pub fn initial_events(&self) -> Vec<GameEvent> {
        vec![GameEvent::TargetMoved(self.state.target_center)]
    }

    /// Toggle skeleton forwarding; controlled externally
    pub fn set_show_skeleton(&mut self, show: bool) {
        self.state.show_skeleton = show;
    }

    /// Ingest one keypoint frame and return the resulting notifications.
    ///
    /// Hands are checked against the previous frame's body joints; the
    /// stored previous fist is overwritten whenever the hand is visible
    /// and left untouched when it is lost.
    pub fn process_frame(&mut self, frame: &KeypointFrame) -> Vec<GameEvent> {
        let mut events = Vec::new();
        let now = frame.timestamp;

        self.process_hand(Hand::Left, frame, now, &mut events);
        self.process_hand(Hand::Right, frame, now, &mut events);

        if let Some(body) = &frame.body {
            self.state.body_joints = body.clone();
            if self.state.show_skeleton {
                events.push(GameEvent::SkeletonUpdated(body.clone()));
            }
        }

        events
    }

    fn process_hand(
        &mut self,
        hand: Hand,
        frame: &KeypointFrame,
        now: Timestamp,
        events: &mut Vec<GameEvent>,
    ) {
        let Some(fist) = frame.fist(hand) else {
            return;
        };

        let previous = self.state.previous_fist(hand);
        if self.detector.is_punch(&fist, previous.as_ref(), now) {
            let punch = self.classifier.classify(
                fist,
                hand,
                &self.state.body_joints,
                previous.map(|p| p.point),
            );
            self.resolve_hit(fist, punch, now, events);
        }

        self.state.set_previous_fist(hand, ObservedPoint::new(fist, now));
    }

    fn resolve_hit(
        &mut self,
        fist: Point2D,
        punch: PunchType,
        now: Timestamp,
        events: &mut Vec<GameEvent>,
    ) {
        if !self.state.can_register_hit(now) {
            return;
        }

        if !self.target.contains(self.state.target_center, fist) {
            return;
        }

        self.state.score += 1;
        self.state.punch_stats.record(punch);

        // Replace any pending deadline rather than stacking cooldowns
        self.state.cooldown_until =
            Some(now.after_secs(self.target.config().cooldown_secs));

        self.state.target_center = self.target.relocate(&mut rand::rng());

        events.push(GameEvent::ScoreChanged(self.state.score));
        events.push(GameEvent::StatsChanged(self.state.punch_stats));
        events.push(GameEvent::TargetMoved(self.state.target_center));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TargetConfig;
    use punchbox_core::JointName;

    const VIEWPORT: Viewport = Viewport {
        width: 400.0,
        height: 800.0,
    };

    fn session() -> GameSession {
        GameSession::new(EngineConfig::default(), VIEWPORT)
    }

    fn frame_at_ms(ms: i64) -> KeypointFrame {
        KeypointFrame::new(Timestamp::from_nanos(ms * 1_000_000))
    }

    fn left_fist_frame(ms: i64, fist: Point2D) -> KeypointFrame {
        let mut frame = frame_at_ms(ms);
        frame.left_fist = Some(fist);
        frame
    }

    /// Prime the previous point outside the hit zone, then punch into
    /// the target
    fn land_hit(session: &mut GameSession, start_ms: i64) -> Vec<GameEvent> {
        let target = session.state().target_center();
        let windup = Point2D::new(target.x - 80.0, target.y);

        session.process_frame(&left_fist_frame(start_ms, windup));
        session.process_frame(&left_fist_frame(start_ms + 33, target))
    }

    #[test]
    fn test_initial_target_in_safe_area() {
        let session = session();
        let center = session.state().target_center();
        let config = TargetConfig::default();

        assert!(center.x >= config.safe_margin + config.radius());
        assert!(center.y >= config.safe_margin + config.radius());

        let events = session.initial_events();
        assert_eq!(events, vec![GameEvent::TargetMoved(center)]);
    }

    #[test]
    fn test_hit_scores_and_relocates() {
        let mut session = session();

        let events = land_hit(&mut session, 0);

        assert_eq!(session.state().score(), 1);
        assert_eq!(session.state().punch_stats().total_punches, 1);
        assert_eq!(events[0], GameEvent::ScoreChanged(1));
        assert!(matches!(events[1], GameEvent::StatsChanged(_)));
        assert_eq!(
            events[2],
            GameEvent::TargetMoved(session.state().target_center())
        );
    }

    #[test]
    fn test_first_observation_never_punches() {
        let mut session = session();
        let target = session.state().target_center();

        // Fist appears directly on the target with no history
        let events = session.process_frame(&left_fist_frame(0, target));
        assert!(events.is_empty());
        assert_eq!(session.state().score(), 0);
    }

    #[test]
    fn test_slow_movement_is_not_a_punch() {
        let mut session = session();
        let target = session.state().target_center();
        let near = Point2D::new(target.x - 2.0, target.y);

        session.process_frame(&left_fist_frame(0, near));
        // 2 units over 33 ms is ~60 units/s, far below the gate
        let events = session.process_frame(&left_fist_frame(33, target));

        assert!(events.is_empty());
        assert_eq!(session.state().score(), 0);
    }

    #[test]
    fn test_fast_miss_does_not_score() {
        let mut session = session();
        let target = session.state().target_center();
        // Punch lands 150 units from the center, outside the hit zone
        let offset = if target.x < VIEWPORT.width / 2.0 {
            150.0
        } else {
            -150.0
        };
        let far = Point2D::new(target.x + offset, target.y);

        session.process_frame(&left_fist_frame(0, Point2D::new(far.x - 40.0, far.y)));
        let events = session.process_frame(&left_fist_frame(33, far));

        assert!(events.is_empty());
        assert_eq!(session.state().score(), 0);
        assert_eq!(session.state().punch_stats().total_punches, 0);
    }

    #[test]
    fn test_cooldown_blocks_second_hit() {
        let mut session = session();
        land_hit(&mut session, 0);
        assert_eq!(session.state().score(), 1);

        let center_after_first = session.state().target_center();

        // Second hit attempt 100 ms later, well inside the 500 ms window
        let events = land_hit(&mut session, 100);
        assert!(events.is_empty());
        assert_eq!(session.state().score(), 1);
        assert_eq!(session.state().punch_stats().total_punches, 1);
        assert_eq!(session.state().target_center(), center_after_first);
    }

    #[test]
    fn test_hit_registers_again_after_cooldown() {
        let mut session = session();
        land_hit(&mut session, 0);

        // Cooldown from the hit at t=33 ms expires at t=533 ms
        let events = land_hit(&mut session, 600);

        assert_eq!(session.state().score(), 2);
        assert_eq!(session.state().punch_stats().total_punches, 2);
        assert_eq!(events[0], GameEvent::ScoreChanged(2));
    }

    #[test]
    fn test_lost_hand_keeps_previous_point() {
        let mut session = session();
        let target = session.state().target_center();
        let windup = Point2D::new(target.x - 40.0, target.y);

        session.process_frame(&left_fist_frame(0, windup));
        // Hand lost for a frame; previous point must survive
        session.process_frame(&frame_at_ms(33));
        let events = session.process_frame(&left_fist_frame(66, target));

        // Re-acquired 40 units away over 66 ms: still above the gate
        assert_eq!(session.state().score(), 1);
        assert!(!events.is_empty());
    }

    #[test]
    fn test_hands_are_tracked_independently() {
        let mut session = session();
        let target = session.state().target_center();

        // Left hand winds up; right hand appears on the target
        let mut frame = frame_at_ms(0);
        frame.left_fist = Some(Point2D::new(target.x - 40.0, target.y));
        frame.right_fist = Some(target);
        session.process_frame(&frame);

        // Right hand holds still: its own history shows no movement
        let mut frame = frame_at_ms(33);
        frame.right_fist = Some(target);
        let events = session.process_frame(&frame);

        assert!(events.is_empty());
        assert_eq!(session.state().score(), 0);
    }

    #[test]
    fn test_classified_jab_recorded_in_stats() {
        let mut session = session();
        let target = session.state().target_center();

        // Horizontal shoulder line below the fist path; short lead-hand
        // extension keeps this a jab
        let mut body = BodyPose::default();
        body.set(
            JointName::LeftShoulder,
            Point2D::new(target.x - 20.0, target.y + 50.0),
        );
        body.set(
            JointName::RightShoulder,
            Point2D::new(target.x + 80.0, target.y + 50.0),
        );

        let mut frame = left_fist_frame(0, Point2D::new(target.x - 40.0, target.y));
        frame.body = Some(body.clone());
        session.process_frame(&frame);

        let mut frame = left_fist_frame(33, target);
        frame.body = Some(body);
        session.process_frame(&frame);

        let stats = session.state().punch_stats();
        assert_eq!(stats.total_punches, 1);
        assert_eq!(stats.jabs, 1);
        assert_eq!(stats.straights, 0);
        assert_eq!(stats.last_punch_type, PunchType::Jab);
    }

    #[test]
    fn test_skeleton_forwarding_follows_toggle() {
        let mut session = session();

        let mut body = BodyPose::default();
        body.set(JointName::Nose, Point2D::new(200.0, 100.0));

        let mut frame = frame_at_ms(0);
        frame.body = Some(body.clone());
        let events = session.process_frame(&frame);
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::SkeletonUpdated(_))));

        session.set_show_skeleton(false);
        let mut frame = frame_at_ms(33);
        frame.body = Some(body);
        let events = session.process_frame(&frame);
        assert!(events.is_empty());

        // Joints are still ingested while forwarding is off
        assert!(session
            .state()
            .body_joints()
            .get(JointName::Nose)
            .is_some());
    }

    #[test]
    fn test_snapshot_reflects_cooldown() {
        let mut session = session();
        land_hit(&mut session, 0);

        let during = session.state().snapshot(Timestamp::from_nanos(100_000_000));
        assert_eq!(during.score, 1);
        assert!(!during.can_register_hit);

        let after = session.state().snapshot(Timestamp::from_nanos(700_000_000));
        assert!(after.can_register_hit);
    }

    #[test]
    fn test_pose_failure_leaves_state_unchanged() {
        let mut session = session();
        land_hit(&mut session, 0);
        let snapshot = session.state().snapshot(Timestamp::from_nanos(0));

        // A frame with no signal at all is a no-op
        let events = session.process_frame(&frame_at_ms(100));
        assert!(events.is_empty());
        assert_eq!(session.state().snapshot(Timestamp::from_nanos(0)), snapshot);
    }
}
