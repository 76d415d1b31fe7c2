//! Four-player single-elimination bracket.
//!
//! Two semifinals feed one final. The player order is shuffled exactly
//! once at creation, which fixes the pairing for the bracket's lifetime:
//! players 0 v 1 and players 2 v 3, winners meet in the final.

use log::{debug, info, warn};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::physics::Side;

pub const BRACKET_SIZE: usize = 4;
/// One seat always belongs to the acting user, so at most three AIs.
pub const MAX_AI_PLAYERS: usize = 3;

/// A tournament participant. Identity is structural: a human entry may be
/// the logged-in user or a locally typed alias, and the bracket treats
/// them the same.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub is_ai: bool,
}

impl Player {
    pub fn human(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_ai: false,
        }
    }

    pub fn ai(index: usize) -> Self {
        Self {
            name: format!("AI {index}"),
            is_ai: true,
        }
    }
}

/// Control mode a session runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Pvp,
    Ai,
}

/// Bracket progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Round {
    Semifinals,
    Final,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchSlot {
    Semifinal(usize),
    Final,
}

/// Seating and mode for a session the bracket wants played.
///
/// The human (if any) always sits left so the first input mapping stays
/// theirs; with two humans, left is the first of the pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchPlan {
    pub mode: Mode,
    pub left: Player,
    pub right: Player,
}

/// What starting a bracket match produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchStart {
    /// Both seats were AI controlled; the coin flip already placed the
    /// winner and no session runs.
    Simulated { winner: Player },
    /// A real session must be played and its winning side reported back
    /// through [`Bracket::record_winner`].
    Session(MatchPlan),
}

#[derive(Debug, Clone)]
struct PendingMatch {
    slot: MatchSlot,
    left: Player,
    right: Player,
}

/// The bracket state machine.
///
/// A semifinal winner slot is written at most once; the pending-match
/// record guarantees the same slot can never host two sessions at once.
#[derive(Debug)]
pub struct Bracket {
    players: [Player; BRACKET_SIZE],
    semifinal_winners: [Option<Player>; 2],
    round: Round,
    pending: Option<PendingMatch>,
    champion: Option<Player>,
}

impl Bracket {
    /// Builds a bracket around the acting user, up to `4 - ai_count - 1`
    /// extra local names and `ai_count` AI seats.
    ///
    /// Inputs are clamped and padded rather than rejected: the AI count
    /// is capped at three, excess local names are dropped, blank ones get
    /// positional defaults, and AI seats fill whatever is left so the
    /// result always holds exactly four players.
    pub fn new(
        host_name: &str,
        local_names: &[String],
        ai_count: usize,
        rng: &mut impl Rng,
    ) -> Self {
        let requested = ai_count;
        let ai_count = ai_count.min(MAX_AI_PLAYERS);
        if ai_count != requested {
            debug!("clamped AI seat count from {requested} to {ai_count}");
        }

        let host = host_name.trim();
        let host = if host.is_empty() { "Player 1" } else { host };

        let extra_locals = BRACKET_SIZE - 1 - ai_count;
        let mut players: Vec<Player> = Vec::with_capacity(BRACKET_SIZE);
        players.push(Player::human(host));
        for (slot, name) in local_names.iter().take(extra_locals).enumerate() {
            let name = name.trim();
            if name.is_empty() {
                players.push(Player::human(format!("Player {}", slot + 2)));
            } else {
                players.push(Player::human(name));
            }
        }

        let locals = players.len();
        let fill = ai_count.min(BRACKET_SIZE - locals);
        for index in 1..=fill {
            players.push(Player::ai(index));
        }
        // Still short means fewer locals were supplied than the AI count
        // allowed for; keep padding with AI seats.
        while players.len() < BRACKET_SIZE {
            players.push(Player::ai(players.len() - locals + 1));
        }

        players.shuffle(rng);
        info!(
            "bracket created: {} vs {}, {} vs {}",
            players[0].name, players[1].name, players[2].name, players[3].name
        );

        let players: [Player; BRACKET_SIZE] = players
            .try_into()
            .expect("padding always resolves to exactly four players");
        Self {
            players,
            semifinal_winners: [None, None],
            round: Round::Semifinals,
            pending: None,
            champion: None,
        }
    }

    pub fn players(&self) -> &[Player; BRACKET_SIZE] {
        &self.players
    }

    pub fn round(&self) -> Round {
        self.round
    }

    pub fn champion(&self) -> Option<&Player> {
        self.champion.as_ref()
    }

    /// The fixed pairing for semifinal 0 or 1.
    pub fn semifinal_pair(&self, index: usize) -> (&Player, &Player) {
        (&self.players[index * 2], &self.players[index * 2 + 1])
    }

    pub fn semifinal_winner(&self, index: usize) -> Option<&Player> {
        self.semifinal_winners[index].as_ref()
    }

    /// The finalists, once both semifinals are decided.
    pub fn final_pair(&self) -> Option<(&Player, &Player)> {
        match (&self.semifinal_winners[0], &self.semifinal_winners[1]) {
            (Some(a), Some(b)) => Some((a, b)),
            _ => None,
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Starts semifinal 0 or 1. Returns `None` when the slot is not
    /// playable right now (already decided, wrong round, or another
    /// match is still pending).
    pub fn start_semifinal(&mut self, index: usize, rng: &mut impl Rng) -> Option<MatchStart> {
        if index >= 2
            || self.round != Round::Semifinals
            || self.pending.is_some()
            || self.semifinal_winners[index].is_some()
        {
            warn!("semifinal {} is not playable right now", index + 1);
            return None;
        }
        let (a, b) = self.semifinal_pair(index);
        let (a, b) = (a.clone(), b.clone());
        Some(self.start_pair(MatchSlot::Semifinal(index), a, b, rng))
    }

    /// Starts the final once both semifinal winners are known.
    pub fn start_final(&mut self, rng: &mut impl Rng) -> Option<MatchStart> {
        if self.round != Round::Final || self.pending.is_some() {
            warn!("final is not playable yet");
            return None;
        }
        let (a, b) = self.final_pair()?;
        let (a, b) = (a.clone(), b.clone());
        Some(self.start_pair(MatchSlot::Final, a, b, rng))
    }

    fn start_pair(
        &mut self,
        slot: MatchSlot,
        a: Player,
        b: Player,
        rng: &mut impl Rng,
    ) -> MatchStart {
        if a.is_ai && b.is_ai {
            // Two AI paddles have no human-facing match to render; an
            // unweighted coin flip decides the slot on the spot.
            let winner = if rng.gen_bool(0.5) { a } else { b };
            info!("{} wins the AI-vs-AI flip", winner.name);
            self.place(slot, winner.clone());
            return MatchStart::Simulated { winner };
        }

        let (left, right) = if b.is_ai {
            (a, b)
        } else if a.is_ai {
            (b, a)
        } else {
            (a, b)
        };
        let mode = if right.is_ai { Mode::Ai } else { Mode::Pvp };
        self.pending = Some(PendingMatch {
            slot,
            left: left.clone(),
            right: right.clone(),
        });
        MatchStart::Session(MatchPlan { mode, left, right })
    }

    /// Resolves the pending session with its winning side and returns the
    /// promoted player. The bracket itself maps the side back to the
    /// seated player, so callers never re-derive seating.
    pub fn record_winner(&mut self, winner_side: Side) -> Option<&Player> {
        let Some(pending) = self.pending.take() else {
            warn!("no bracket match is pending; dropping reported winner");
            return None;
        };
        let winner = match winner_side {
            Side::Left => pending.left,
            Side::Right => pending.right,
        };
        info!("{} advances", winner.name);
        self.place(pending.slot, winner);
        match pending.slot {
            MatchSlot::Semifinal(index) => self.semifinal_winners[index].as_ref(),
            MatchSlot::Final => self.champion.as_ref(),
        }
    }

    /// Forgets the pending session so its slot becomes playable again,
    /// for when the player walks out of a bracket match.
    pub fn cancel_pending(&mut self) {
        if self.pending.take().is_some() {
            debug!("pending bracket match abandoned");
        }
    }

    fn place(&mut self, slot: MatchSlot, winner: Player) {
        match slot {
            MatchSlot::Semifinal(index) => {
                self.semifinal_winners[index] = Some(winner);
                if self.semifinal_winners.iter().all(Option::is_some) {
                    self.round = Round::Final;
                }
            }
            MatchSlot::Final => {
                self.champion = Some(winner);
                self.round = Round::Done;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn names(bracket: &Bracket) -> Vec<String> {
        let mut names: Vec<String> = bracket.players().iter().map(|p| p.name.clone()).collect();
        names.sort();
        names
    }

    #[test]
    fn padding_fills_to_four_with_extra_ai() {
        // One AI requested but only one local supplied: a second AI pads
        // the bracket to four.
        let mut rng = rng();
        let bracket = Bracket::new("you", &["Bob".to_string()], 1, &mut rng);
        assert_eq!(
            names(&bracket),
            vec!["AI 1", "AI 2", "Bob", "you"]
        );
    }

    #[test]
    fn every_valid_setup_yields_exactly_four_players() {
        let all_names = [
            "Alice".to_string(),
            "Bob".to_string(),
            "Carol".to_string(),
        ];
        for ai_count in 0..=3 {
            for supplied in 0..=3 {
                let mut rng = rng();
                let bracket = Bracket::new("you", &all_names[..supplied], ai_count, &mut rng);
                assert_eq!(bracket.players().len(), BRACKET_SIZE);
                let hosts = bracket
                    .players()
                    .iter()
                    .filter(|p| p.name == "you" && !p.is_ai)
                    .count();
                assert_eq!(hosts, 1, "ai={ai_count} supplied={supplied}");
            }
        }
    }

    #[test]
    fn excessive_ai_count_is_clamped() {
        let mut rng = rng();
        let bracket = Bracket::new("you", &[], 9, &mut rng);
        assert_eq!(bracket.players().iter().filter(|p| p.is_ai).count(), 3);
    }

    #[test]
    fn blank_local_names_get_positional_defaults() {
        let mut rng = rng();
        let bracket = Bracket::new(
            "you",
            &["  ".to_string(), "".to_string(), "Carl".to_string()],
            0,
            &mut rng,
        );
        assert_eq!(
            names(&bracket),
            vec!["Carl", "Player 2", "Player 3", "you"]
        );
    }

    #[test]
    fn blank_host_falls_back_to_default() {
        let mut rng = rng();
        let bracket = Bracket::new("  ", &[], 3, &mut rng);
        assert!(bracket
            .players()
            .iter()
            .any(|p| p.name == "Player 1" && !p.is_ai));
    }

    #[test]
    fn pairing_is_players_0v1_and_2v3() {
        let mut rng = rng();
        let bracket = Bracket::new("you", &["Bob".to_string()], 1, &mut rng);
        let (a, b) = bracket.semifinal_pair(0);
        assert_eq!(a, &bracket.players()[0]);
        assert_eq!(b, &bracket.players()[1]);
        let (c, d) = bracket.semifinal_pair(1);
        assert_eq!(c, &bracket.players()[2]);
        assert_eq!(d, &bracket.players()[3]);
    }

    #[test]
    fn human_is_seated_left_whatever_the_pair_order() {
        // With three AI seats the host lands in either slot of their
        // semifinal depending on the shuffle; sweep seeds to see both.
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut bracket = Bracket::new("you", &[], 3, &mut rng);
            let host_semi = (0..2)
                .find(|&i| {
                    let (a, b) = bracket.semifinal_pair(i);
                    !a.is_ai || !b.is_ai
                })
                .expect("host plays one semifinal");
            match bracket.start_semifinal(host_semi, &mut rng) {
                Some(MatchStart::Session(plan)) => {
                    assert_eq!(plan.mode, Mode::Ai);
                    assert_eq!(plan.left.name, "you");
                    assert!(plan.right.is_ai);
                }
                other => panic!("expected a session, got {other:?}"),
            }
        }
    }

    #[test]
    fn two_humans_keep_pair_order_and_pvp_mode() {
        let mut rng = rng();
        // No AI seats at all, so every pairing is human vs human.
        let mut bracket = Bracket::new(
            "you",
            &["Bob".to_string(), "Cat".to_string(), "Dan".to_string()],
            0,
            &mut rng,
        );
        let (a, b) = bracket.semifinal_pair(0);
        let (a, b) = (a.clone(), b.clone());
        match bracket.start_semifinal(0, &mut rng) {
            Some(MatchStart::Session(plan)) => {
                assert_eq!(plan.mode, Mode::Pvp);
                assert_eq!(plan.left, a);
                assert_eq!(plan.right, b);
            }
            other => panic!("expected a session, got {other:?}"),
        }
    }

    #[test]
    fn pending_match_blocks_the_other_slot() {
        let mut rng = rng();
        let mut bracket = Bracket::new("you", &["Bob".to_string(), "Cat".to_string()], 0, &mut rng);
        assert!(matches!(
            bracket.start_semifinal(0, &mut rng),
            Some(MatchStart::Session(_))
        ));
        assert!(bracket.has_pending());
        assert!(bracket.start_semifinal(1, &mut rng).is_none());

        bracket.record_winner(Side::Left);
        assert!(!bracket.has_pending());
        assert!(bracket.start_semifinal(1, &mut rng).is_some());
    }

    #[test]
    fn decided_semifinal_cannot_be_replayed() {
        let mut rng = rng();
        let mut bracket = Bracket::new("you", &["Bob".to_string(), "Cat".to_string()], 0, &mut rng);
        bracket.start_semifinal(0, &mut rng);
        let winner = bracket.record_winner(Side::Left).cloned();
        assert!(winner.is_some());
        assert!(bracket.start_semifinal(0, &mut rng).is_none());
        assert_eq!(bracket.semifinal_winner(0).cloned(), winner);
    }

    #[test]
    fn cancelling_a_pending_match_reopens_the_slot() {
        let mut rng = rng();
        let mut bracket = Bracket::new("you", &["Bob".to_string(), "Cat".to_string()], 0, &mut rng);
        bracket.start_semifinal(0, &mut rng);
        bracket.cancel_pending();
        assert!(bracket.semifinal_winner(0).is_none());
        assert!(bracket.start_semifinal(0, &mut rng).is_some());
    }

    #[test]
    fn stray_winner_reports_are_ignored() {
        let mut rng = rng();
        let mut bracket = Bracket::new("you", &["Bob".to_string(), "Cat".to_string()], 0, &mut rng);
        assert!(bracket.record_winner(Side::Left).is_none());
        assert!(bracket.semifinal_winner(0).is_none());
        assert!(bracket.semifinal_winner(1).is_none());
    }

    #[test]
    fn final_waits_for_both_semifinals() {
        let mut rng = rng();
        let mut bracket = Bracket::new("you", &["Bob".to_string(), "Cat".to_string()], 0, &mut rng);
        assert!(bracket.start_final(&mut rng).is_none());
        bracket.start_semifinal(0, &mut rng);
        bracket.record_winner(Side::Left);
        assert!(bracket.start_final(&mut rng).is_none());
        bracket.start_semifinal(1, &mut rng);
        bracket.record_winner(Side::Right);
        assert_eq!(bracket.round(), Round::Final);
        assert!(bracket.start_final(&mut rng).is_some());
    }

    #[test]
    fn ai_only_pairings_resolve_by_coin_flip() {
        let mut rng = rng();
        let mut bracket = Bracket::new("you", &[], 3, &mut rng);
        let ai_semi = (0..2)
            .find(|&i| {
                let (a, b) = bracket.semifinal_pair(i);
                a.is_ai && b.is_ai
            })
            .expect("three AIs guarantee an all-AI semifinal");
        match bracket.start_semifinal(ai_semi, &mut rng) {
            Some(MatchStart::Simulated { winner }) => {
                assert!(winner.is_ai);
                assert_eq!(bracket.semifinal_winner(ai_semi), Some(&winner));
                assert!(!bracket.has_pending());
            }
            other => panic!("expected a simulated result, got {other:?}"),
        }
    }

    #[test]
    fn all_ai_final_is_flipped_and_crowns_a_champion() {
        let mut rng = rng();
        let mut bracket = Bracket::new("you", &[], 3, &mut rng);
        for index in 0..2 {
            match bracket.start_semifinal(index, &mut rng) {
                Some(MatchStart::Simulated { .. }) => {}
                Some(MatchStart::Session(plan)) => {
                    // Let the AI knock the host out.
                    assert!(plan.right.is_ai);
                    bracket.record_winner(Side::Right);
                }
                None => panic!("semifinal {index} should be playable"),
            }
        }
        assert_eq!(bracket.round(), Round::Final);
        match bracket.start_final(&mut rng) {
            Some(MatchStart::Simulated { winner }) => {
                assert!(winner.is_ai);
                assert_eq!(bracket.champion(), Some(&winner));
                assert_eq!(bracket.round(), Round::Done);
            }
            other => panic!("expected a silent all-AI final, got {other:?}"),
        }
    }
}
