use super::*;
use crate::{Event, EventBus};
use tracing::debug;

impl GameSession {
    /// Decide what follows a scored hand. Returns whether the round was
    /// cleared and the reward paid for it.
    pub(super) fn settle_hand(&mut self, events: &mut EventBus) -> (bool, i64) {
        let round = self.state.current_round;
        if self.state.total_score >= self.round_target() {
            let reward = self.config.reward_for(round);
            self.state.money += reward;
            events.push(Event::RoundCleared {
                round,
                score: self.state.total_score,
                reward,
                money: self.state.money,
            });
            if round >= self.config.final_round() {
                self.state.phase = Phase::Victory;
                events.push(Event::GameWon {
                    score: self.state.total_score,
                    money: self.state.money,
                });
                debug!(session = %self.id, "game won");
            } else {
                self.enter_shop(events);
            }
            return (true, reward);
        }

        if self.state.hands_played >= self.config.max_hands {
            self.state.phase = Phase::GameOver;
            events.push(Event::GameLost {
                round,
                score: self.state.total_score,
            });
            debug!(session = %self.id, round, "game lost");
        } else {
            self.state.draws_used = 0;
        }
        (false, 0)
    }

    /// Leave the shop and start the next round on a rebuilt deck.
    pub fn next_round(&mut self, events: &mut EventBus) -> Result<(), SessionError> {
        self.ensure_phase(Phase::Shop)?;
        self.state.current_round += 1;
        self.state.hands_played = 0;
        self.state.draws_used = 0;
        self.state.total_score = 0;
        self.shop = None;
        self.rebuild_deck();
        self.state.phase = Phase::Active;
        events.push(Event::RoundStarted {
            round: self.state.current_round,
            target: self.round_target(),
            deck_size: self.deck.remaining_count(),
        });
        debug!(
            session = %self.id,
            round = self.state.current_round,
            deck = self.deck.remaining_count(),
            "round started"
        );
        Ok(())
    }

    /// Fresh 52 minus one copy of each held card, plus queued purchases.
    fn rebuild_deck(&mut self) {
        self.deck.reset(&mut self.rng);
        for card in &self.hand {
            // First match only; a held card with two copies in the pile
            // removes just one.
            self.deck.remove_first_match(card);
        }
        self.deck.draw.append(&mut self.purchased_cards);
        self.deck.shuffle(&mut self.rng);
    }
}
