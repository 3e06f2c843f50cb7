use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;
use tracing::{debug, info};

use crate::card::{self, Card, CardOutcome};
use crate::launcher::PlayerName;
use crate::level::Level;
use crate::session::{CardView, Phase, RoundResult, Snapshot};
use crate::timer::{Timer, TimerKind, TimerSlot};

/// Length of one recall countdown step
pub const COUNTDOWN_PERIOD: Duration = Duration::from_secs(1);

/// One player's visit to the game screen.
///
/// The session owns the only timer that can change its state. Hosts feed
/// elapsed time in through [`GameSession::advance`]; input arrives through
/// [`GameSession::select_card`]. Both run on the caller's thread, so whichever
/// resolves the round first wins and the other finds the round closed.
#[derive(Debug)]
pub struct GameSession {
    player: PlayerName,
    level: Level,
    phase: Phase,
    cards: Vec<Card>,
    target: Option<u8>,
    seconds_remaining: u32,
    score: u32,
    result: Option<RoundResult>,
    cards_enabled: bool,
    timer: TimerSlot,
    rng: StdRng,
}

impl GameSession {
    pub fn new(player: PlayerName) -> Self {
        Self::with_rng(player, StdRng::from_entropy())
    }

    /// Deterministic deals, for tests and replays
    pub fn with_seed(player: PlayerName, seed: u64) -> Self {
        Self::with_rng(player, StdRng::seed_from_u64(seed))
    }

    fn with_rng(player: PlayerName, rng: StdRng) -> Self {
        Self {
            player,
            level: Level::default(),
            phase: Phase::Idle,
            cards: Vec::new(),
            target: None,
            seconds_remaining: 0,
            score: 0,
            result: None,
            cards_enabled: false,
            timer: TimerSlot::default(),
            rng,
        }
    }

    pub fn player(&self) -> &PlayerName {
        &self.player
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    pub fn result(&self) -> Option<RoundResult> {
        self.result
    }

    pub fn result_message(&self) -> String {
        self.result.map(|r| r.message()).unwrap_or_default()
    }

    pub fn cards_enabled(&self) -> bool {
        self.cards_enabled
    }

    pub fn timer_armed(&self) -> bool {
        self.timer.is_armed()
    }

    /// The number to find, once the cards have been hidden
    pub fn target(&self) -> Option<u8> {
        match self.phase {
            Phase::Recalling | Phase::Resolved => self.target,
            Phase::Idle | Phase::Memorizing => None,
        }
    }

    /// Changes the level for the next round. Ignored while a round runs.
    pub fn set_level(&mut self, level: Level) -> bool {
        if self.phase.in_round() {
            return false;
        }
        self.level = level;
        true
    }

    /// Deals a new round and starts the memorize phase. Any running round is
    /// abandoned; the score is kept.
    pub fn start(&mut self, level: Level) {
        if self.timer.cancel() {
            debug!("cancelled running timer before new round");
        }

        let deal = card::deal(&mut self.rng);
        self.level = level;
        self.cards = deal.cards;
        self.target = Some(deal.target);
        self.seconds_remaining = level.recall_secs();
        self.result = None;
        self.cards_enabled = false;
        self.phase = Phase::Memorizing;
        self.timer
            .arm(Timer::once(TimerKind::Memorize, level.memorize_duration()));

        info!(player = %self.player, %level, "round started");
    }

    /// Back to idle: round state is dropped, score stays
    pub fn restart(&mut self) {
        if self.timer.cancel() {
            debug!(phase = %self.phase, "cancelled running timer on restart");
        }
        self.phase = Phase::Idle;
        self.cards.clear();
        self.target = None;
        self.seconds_remaining = 0;
        self.result = None;
        self.cards_enabled = false;
    }

    /// Lets `elapsed` pass on the armed timer, firing it as often as the
    /// budget allows.
    pub fn advance(&mut self, elapsed: Duration) {
        let mut budget = elapsed;
        while let Some(fired) = self.timer.advance(budget) {
            budget = fired.leftover;
            match fired.kind {
                TimerKind::Memorize => self.begin_recall(),
                TimerKind::Countdown => self.countdown_tick(),
            }
        }
    }

    /// Picks the card at `position` (row-major, 0-based). Returns the round
    /// result when the pick resolved the round.
    pub fn select_card(&mut self, position: usize) -> Option<RoundResult> {
        if self.phase != Phase::Recalling || !self.cards_enabled {
            return None;
        }
        let target = self.target?;
        let value = self.cards.get(position)?.value;

        self.timer.cancel();
        self.seconds_remaining = 0;

        let (outcome, result) = if value == target {
            let points = self.level.points();
            self.score += points;
            (CardOutcome::Correct, RoundResult::Won { points })
        } else {
            (CardOutcome::Incorrect, RoundResult::WrongCard { picked: value })
        };
        self.cards[position].reveal(outcome);
        self.resolve(result);

        Some(result)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            player: self.player.clone(),
            level: self.level,
            phase: self.phase,
            cards: self
                .cards
                .iter()
                .map(|c| CardView {
                    value: c.visible.then_some(c.value),
                    outcome: c.outcome,
                    interactive: self.cards_enabled,
                })
                .collect(),
            target: self.target(),
            seconds_remaining: self.seconds_remaining,
            score: self.score,
            result_message: self.result_message(),
        }
    }

    fn begin_recall(&mut self) {
        if self.phase != Phase::Memorizing {
            return;
        }
        self.cards.iter_mut().for_each(Card::hide);
        self.cards_enabled = true;
        self.phase = Phase::Recalling;
        self.timer
            .arm(Timer::every(TimerKind::Countdown, COUNTDOWN_PERIOD));

        debug!(seconds = self.seconds_remaining, "cards hidden, recall started");
    }

    fn countdown_tick(&mut self) {
        if self.phase != Phase::Recalling {
            self.timer.cancel();
            return;
        }
        self.seconds_remaining = self.seconds_remaining.saturating_sub(1);
        if self.seconds_remaining == 0 {
            self.timer.cancel();
            self.resolve(RoundResult::TimedOut);
        }
    }

    fn resolve(&mut self, result: RoundResult) {
        self.cards_enabled = false;
        self.result = Some(result);
        self.phase = Phase::Resolved;

        info!(player = %self.player, ?result, score = self.score, "round resolved");
    }
}

impl Drop for GameSession {
    fn drop(&mut self) {
        if self.timer.cancel() {
            debug!(phase = %self.phase, "session closed mid-round, timer released");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn session(seed: u64) -> GameSession {
        GameSession::with_seed(PlayerName::parse("testuser").unwrap(), seed)
    }

    fn recalling(level: Level) -> GameSession {
        let mut s = session(42);
        s.start(level);
        s.advance(level.memorize_duration());
        assert_eq!(s.phase(), Phase::Recalling);
        s
    }

    fn position_of(s: &GameSession, value: u8) -> usize {
        s.cards.iter().position(|c| c.value == value).unwrap()
    }

    fn target_position(s: &GameSession) -> usize {
        position_of(s, s.target.unwrap())
    }

    fn wrong_position(s: &GameSession) -> usize {
        let target = s.target.unwrap();
        s.cards.iter().position(|c| c.value != target).unwrap()
    }

    #[test]
    fn test_new_session_is_idle() {
        let s = session(1);
        let snap = s.snapshot();

        assert_eq!(snap.phase, Phase::Idle);
        assert_eq!(snap.level, Level::Medium);
        assert!(snap.cards.is_empty());
        assert_eq!(snap.target, None);
        assert_eq!(snap.seconds_remaining, 0);
        assert_eq!(snap.score, 0);
        assert_eq!(snap.result_message, "");
        assert!(!s.timer_armed());
    }

    #[test]
    fn test_start_enters_memorizing() {
        let mut s = session(1);
        s.start(Level::Medium);
        let snap = s.snapshot();

        assert_eq!(snap.phase, Phase::Memorizing);
        assert_eq!(snap.cards.len(), 9);
        assert!(snap.cards.iter().all(|c| c.visible() && !c.interactive));
        assert!(snap
            .cards
            .iter()
            .all(|c| c.outcome == CardOutcome::Neutral));
        assert_eq!(snap.seconds_remaining, 5);
        assert!(!snap.target_visible());
        assert_eq!(s.timer.kind(), Some(TimerKind::Memorize));
        assert!(s.target.is_some());
    }

    #[test]
    fn test_memorize_phase_lasts_level_duration() {
        let mut s = session(1);
        s.start(Level::High);

        s.advance(Duration::from_millis(1999));
        assert_eq!(s.phase(), Phase::Memorizing);

        s.advance(Duration::from_millis(1));
        assert_eq!(s.phase(), Phase::Recalling);
        assert_eq!(s.seconds_remaining(), 2);
    }

    #[test]
    fn test_recall_hides_cards_and_reveals_target() {
        let s = recalling(Level::Medium);
        let snap = s.snapshot();

        assert!(snap.cards.iter().all(|c| !c.visible() && c.interactive));
        assert_eq!(snap.target, s.target);
        assert_eq!(snap.seconds_remaining, 5);
        assert_eq!(s.timer.kind(), Some(TimerKind::Countdown));
    }

    #[test]
    fn test_countdown_from_three_times_out() {
        let mut s = recalling(Level::Low);
        s.seconds_remaining = 3;

        s.advance(COUNTDOWN_PERIOD);
        assert_eq!(s.seconds_remaining(), 2);
        s.advance(COUNTDOWN_PERIOD);
        assert_eq!(s.seconds_remaining(), 1);
        assert_eq!(s.phase(), Phase::Recalling);

        s.advance(COUNTDOWN_PERIOD);
        assert_eq!(s.seconds_remaining(), 0);
        assert_eq!(s.phase(), Phase::Resolved);
        assert_eq!(s.result(), Some(RoundResult::TimedOut));
        assert!(s.result_message().contains("You didn't press in time"));
        assert!(s.snapshot().cards.iter().all(|c| !c.interactive));
        assert!(!s.timer_armed());
    }

    #[test]
    fn test_partial_seconds_accumulate() {
        let mut s = recalling(Level::Medium);
        for _ in 0..4 {
            s.advance(Duration::from_millis(250));
        }
        assert_eq!(s.seconds_remaining(), 4);
    }

    #[test]
    fn test_one_large_step_runs_whole_round() {
        let mut s = session(3);
        s.start(Level::High);
        s.advance(Duration::from_secs(60));

        assert_eq!(s.phase(), Phase::Resolved);
        assert_eq!(s.result(), Some(RoundResult::TimedOut));
        assert!(!s.timer_armed());
    }

    #[test]
    fn test_selecting_target_wins() {
        let mut s = recalling(Level::Medium);
        let pos = target_position(&s);

        let result = s.select_card(pos);

        assert_eq!(result, Some(RoundResult::Won { points: 20 }));
        assert_eq!(s.phase(), Phase::Resolved);
        assert_eq!(s.score(), 20);
        assert_eq!(s.seconds_remaining(), 0);
        assert!(!s.cards_enabled());
        assert!(!s.timer_armed());

        let snap = s.snapshot();
        assert_eq!(snap.cards[pos].outcome, CardOutcome::Correct);
        assert_eq!(snap.cards[pos].value, s.target);
        assert!(snap.cards.iter().all(|c| !c.interactive));
        assert!(snap.result_message.contains("You win 20 points"));
    }

    #[test]
    fn test_selecting_other_card_loses() {
        let mut s = recalling(Level::Medium);
        let pos = wrong_position(&s);
        let picked = s.cards[pos].value;

        let result = s.select_card(pos);

        assert_eq!(result, Some(RoundResult::WrongCard { picked }));
        assert_eq!(s.score(), 0);
        let snap = s.snapshot();
        assert_eq!(snap.cards[pos].outcome, CardOutcome::Incorrect);
        assert_eq!(snap.cards[pos].value, Some(picked));
        assert!(snap.result_message.contains("You have failed"));
        assert!(!s.timer_armed());
    }

    #[test]
    fn test_select_during_memorize_is_noop() {
        let mut s = session(5);
        s.start(Level::Medium);
        let before = s.cards.clone();

        assert_eq!(s.select_card(0), None);
        assert_eq!(s.cards, before);
        assert_eq!(s.phase(), Phase::Memorizing);
    }

    #[test]
    fn test_select_with_gate_closed_changes_nothing() {
        let mut s = recalling(Level::Medium);
        s.cards_enabled = false;
        let before = s.cards.clone();

        assert_eq!(s.select_card(0), None);
        assert_eq!(s.cards, before);
        assert_eq!(s.phase(), Phase::Recalling);
    }

    #[test]
    fn test_select_out_of_range_is_noop() {
        let mut s = recalling(Level::Medium);
        assert_eq!(s.select_card(9), None);
        assert_eq!(s.phase(), Phase::Recalling);
        assert!(s.timer_armed());
    }

    #[test]
    fn test_timeout_then_late_click_is_ignored() {
        let mut s = recalling(Level::High);
        let pos = target_position(&s);

        s.advance(Duration::from_secs(2));
        assert_matches!(s.result(), Some(RoundResult::TimedOut));

        let before = s.cards.clone();
        assert_eq!(s.select_card(pos), None);
        assert_eq!(s.cards, before);
        assert_eq!(s.score(), 0);
        assert_matches!(s.result(), Some(RoundResult::TimedOut));
    }

    #[test]
    fn test_click_then_late_tick_is_ignored() {
        let mut s = recalling(Level::High);
        s.advance(Duration::from_millis(1999));
        let pos = target_position(&s);

        s.select_card(pos);
        s.advance(Duration::from_secs(5));

        assert_eq!(s.result(), Some(RoundResult::Won { points: 30 }));
        assert_eq!(s.score(), 30);
        assert_eq!(s.seconds_remaining(), 0);
        assert_eq!(s.phase(), Phase::Resolved);
    }

    #[test]
    fn test_second_click_after_win_does_not_score_again() {
        let mut s = recalling(Level::Low);
        let pos = target_position(&s);

        s.select_card(pos);
        assert_eq!(s.select_card(pos), None);
        assert_eq!(s.score(), 10);
    }

    #[test]
    fn test_score_accumulates_over_rounds() {
        let mut s = session(11);
        for round in 1..=4 {
            s.start(Level::High);
            s.advance(Level::High.memorize_duration());
            let pos = target_position(&s);
            s.select_card(pos);
            assert_eq!(s.score(), round * 30);
        }
    }

    #[test]
    fn test_loss_keeps_previous_score() {
        let mut s = recalling(Level::Medium);
        let pos = target_position(&s);
        s.select_card(pos);

        s.start(Level::Medium);
        s.advance(Level::Medium.memorize_duration());
        let pos = wrong_position(&s);
        s.select_card(pos);

        assert_eq!(s.score(), 20);
    }

    #[test]
    fn test_restart_cancels_timer_and_keeps_score() {
        let mut s = recalling(Level::Low);
        let pos = target_position(&s);
        s.select_card(pos);
        s.start(Level::Low);
        s.advance(Level::Low.memorize_duration());

        s.restart();

        assert_eq!(s.phase(), Phase::Idle);
        assert!(!s.timer_armed());
        assert_eq!(s.score(), 10);
        assert!(s.snapshot().cards.is_empty());
        assert_eq!(s.result_message(), "");

        s.advance(Duration::from_secs(30));
        assert_eq!(s.phase(), Phase::Idle);
    }

    #[test]
    fn test_start_mid_round_replaces_timer() {
        let mut s = recalling(Level::Medium);
        s.advance(Duration::from_secs(2));

        s.start(Level::Low);

        assert_eq!(s.phase(), Phase::Memorizing);
        assert_eq!(s.timer.kind(), Some(TimerKind::Memorize));
        assert_eq!(s.seconds_remaining(), 10);
        s.advance(Duration::from_secs(9));
        assert_eq!(s.phase(), Phase::Memorizing);
    }

    #[test]
    fn test_set_level_only_between_rounds() {
        let mut s = session(2);
        assert!(s.set_level(Level::High));
        assert_eq!(s.level(), Level::High);

        s.start(Level::High);
        assert!(!s.set_level(Level::Low));
        assert_eq!(s.level(), Level::High);

        s.advance(Duration::from_secs(10));
        assert_eq!(s.phase(), Phase::Resolved);
        assert!(s.set_level(Level::Low));
    }

    #[test]
    fn test_same_seed_same_deal() {
        let mut a = session(77);
        let mut b = session(77);
        a.start(Level::Medium);
        b.start(Level::Medium);

        assert_eq!(a.cards, b.cards);
        assert_eq!(a.target, b.target);
    }
}
