use super::helpers::{take_cards, unique_indices};
use super::*;
use crate::{evaluate_hand, Event, EventBus, ScoringContext};
use tracing::debug;

impl GameSession {
    /// Discard the named hand positions and draw as many replacements as the
    /// deck allows. Duplicate indices count once.
    pub fn draw(&mut self, indices: &[usize], events: &mut EventBus) -> Result<(), SessionError> {
        self.ensure_phase(Phase::Active)?;
        if self.state.draws_used >= self.config.max_draws {
            return Err(SessionError::NoDrawsRemaining);
        }
        if indices.is_empty() {
            return Err(SessionError::InvalidSelectionSize {
                expected: 1,
                got: 0,
            });
        }
        let unique = unique_indices(indices, self.hand.len())?;

        let discarded = take_cards(&mut self.hand, &unique);
        let count = discarded.len();
        self.deck.discard(discarded);
        let mut drawn = self.deck.draw_up_to(count);
        let drawn_count = drawn.len();
        self.hand.append(&mut drawn);
        self.state.draws_used += 1;

        events.push(Event::CardsDrawn {
            discarded: count,
            drawn: drawn_count,
            draws_used: self.state.draws_used,
        });
        debug!(
            session = %self.id,
            discarded = count,
            drawn = drawn_count,
            draws_used = self.state.draws_used,
            "cards drawn"
        );
        Ok(())
    }

    /// Score exactly `play_size` distinct hand positions, run the result
    /// through active turbos and settle the round.
    pub fn play(
        &mut self,
        indices: &[usize],
        events: &mut EventBus,
    ) -> Result<PlayOutcome, SessionError> {
        self.ensure_phase(Phase::Active)?;
        let expected = self.config.play_size;
        let unique = unique_indices(indices, self.hand.len())?;
        if indices.len() != expected || unique.len() != expected {
            return Err(SessionError::InvalidSelectionSize {
                expected,
                got: unique.len(),
            });
        }

        // Evaluate in the order the player listed the cards.
        let played: Vec<Card> = indices.iter().map(|&idx| self.hand[idx].clone()).collect();
        let ctx = ScoringContext::new(&self.tables, &self.content.effects)
            .with_blocked_suit(self.state.blocked_suit());
        let hand_result = evaluate_hand(&played, &ctx, &mut self.rng)?;

        let removed = take_cards(&mut self.hand, &unique);
        let count = removed.len();
        self.deck.discard(removed);
        let mut drawn = self.deck.draw_up_to(count);
        self.hand.append(&mut drawn);

        let (final_score, turbo_applied) = self.content.turbos.apply_all(
            &self.inventory.turbos,
            hand_result.total_score,
            &hand_result,
            &played,
        );
        self.state.total_score += final_score;
        self.state.hands_played += 1;
        events.push(Event::HandScored {
            hand: hand_result.hand_type,
            base_score: hand_result.total_score,
            final_score,
            round_score: self.state.total_score,
        });
        if hand_result.money_bonus > 0 {
            self.state.money += hand_result.money_bonus;
            events.push(Event::MoneyEarned {
                amount: hand_result.money_bonus,
                money: self.state.money,
            });
        }
        debug!(
            session = %self.id,
            hand = hand_result.hand_type.id(),
            score = final_score,
            round_score = self.state.total_score,
            "hand played"
        );

        let (round_complete, money_awarded) = self.settle_hand(events);
        Ok(PlayOutcome {
            hand_result,
            final_score,
            turbo_applied,
            round_complete,
            money_awarded,
            state: self.snapshot(),
        })
    }
}
