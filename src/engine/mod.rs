//! The rules engine: a pure `apply(session, action)` over snapshots.
//!
//! Operations never mutate the caller's session. `apply` clones the
//! snapshot, runs the action against the clone, and returns either the
//! new snapshot or an [`EngineError`] with the original left untouched.
//! There is no partial application: a rejected action discards the
//! working clone entirely.
//!
//! The phase machine gates which actions are legal. Labor and the three
//! oshikatsu phases are simultaneous (every completion flag must be set
//! to advance), fansa time is sequential (only the active player's
//! flag), and setup/round-end advance unconditionally. The bulk
//! operations (`RollDiceAndProcessLabor`, `RevealOshikatsuDecisions`,
//! `ProcessFansaTime`, `EndRound`) advance the phase themselves once
//! their work is done.

pub mod action;
pub mod error;
pub mod results;

pub use action::GameAction;
pub use error::EngineError;
pub use results::{final_results, FinalResults, Standing};

use chrono::Utc;

use crate::board::SpotId;
use crate::core::phase::{Phase, PhaseKind};
use crate::core::piece::{GoodsKind, PieceId};
use crate::core::player::{Decision, PlayerId, PlayerSpec};
use crate::core::rng::GameRng;
use crate::core::session::{DecisionRecord, LaborRecord, Session, TOTAL_ROUNDS};
use crate::fansa::cards::prepare_reveal;
use crate::fansa::scoring::run_fansa_time;
use crate::ledger;
use crate::reward::{self, RewardCardId};

/// Create a fresh session in the setup phase.
///
/// The caller supplies player names/colors and the RNG (seeded in tests,
/// entropy-backed in production).
pub fn initialize_game(specs: &[PlayerSpec], rng: GameRng) -> Result<Session, EngineError> {
    if !(1..=4).contains(&specs.len()) {
        return Err(EngineError::InvalidPlayerCount(specs.len()));
    }
    let id = format!("session-{}", Utc::now().timestamp_millis());
    Ok(Session::new(id, specs, rng))
}

/// Apply an action to a session snapshot, producing the next snapshot.
///
/// On error the input session is the still-current state.
pub fn apply(session: &Session, action: GameAction) -> Result<Session, EngineError> {
    if session.phase.is_terminal() {
        return Err(EngineError::GameOver);
    }

    let mut next = session.clone();
    match action {
        GameAction::MovePiece { piece, spot } => move_piece(&mut next, piece, spot)?,
        GameAction::SelectRewardCard { player, card } => {
            select_reward_card(&mut next, player, card)?;
        }
        GameAction::RollDiceAndProcessLabor => roll_dice_and_process_labor(&mut next)?,
        GameAction::SelectOshikatsuDecision { player, decision } => {
            select_decision(&mut next, player, decision)?;
        }
        GameAction::RevealOshikatsuDecisions => reveal_decisions(&mut next)?,
        GameAction::PurchaseGoods { player, kind } => {
            purchase_goods_inner(&mut next, player, kind)?;
        }
        GameAction::CreateKagebunshin { player, piece } => {
            create_kagebunshin_inner(&mut next, player, piece)?;
        }
        GameAction::ProcessFansaTime => process_fansa_time(&mut next)?,
        GameAction::NextPhase => next_phase(&mut next)?,
        GameAction::NextTurn => next_turn(&mut next)?,
        GameAction::SetPlayerActionCompleted { player, completed } => {
            set_player_action_completed(&mut next, player, completed)?;
        }
        GameAction::EndRound => end_round(&mut next)?,
        GameAction::EndGame => next.phase = Phase::GameEnd,
    }
    Ok(next)
}

/// Buy a goods kind, returning the new snapshot and the piece the goods
/// landed on.
pub fn purchase_goods(
    session: &Session,
    player: PlayerId,
    kind: GoodsKind,
) -> Result<(Session, PieceId), EngineError> {
    if session.phase.is_terminal() {
        return Err(EngineError::GameOver);
    }
    let mut next = session.clone();
    let piece = purchase_goods_inner(&mut next, player, kind)?;
    Ok((next, piece))
}

/// Create a kagebunshin, returning the new snapshot and the clone's id.
pub fn create_kagebunshin(
    session: &Session,
    player: PlayerId,
    piece: PieceId,
) -> Result<(Session, PieceId), EngineError> {
    if session.phase.is_terminal() {
        return Err(EngineError::GameOver);
    }
    let mut next = session.clone();
    let clone_id = create_kagebunshin_inner(&mut next, player, piece)?;
    Ok((next, clone_id))
}

/// Whether the game is over for a given round/phase pair.
#[must_use]
pub fn is_game_complete(round: u8, phase: Phase) -> bool {
    round > TOTAL_ROUNDS || (round == TOTAL_ROUNDS && phase == Phase::RoundEnd)
}

// === Phase machinery ===

fn ensure_phase(session: &Session, expected: Phase) -> Result<(), EngineError> {
    if session.phase == expected {
        Ok(())
    } else {
        Err(EngineError::WrongPhase {
            actual: session.phase,
        })
    }
}

fn ensure_player(session: &Session, player: PlayerId) -> Result<(), EngineError> {
    if session.player(player).is_some() {
        Ok(())
    } else {
        Err(EngineError::UnknownPlayer(player))
    }
}

/// Enter `dest`: reset completion flags and the waiting list, clear the
/// transient player fields scoped to the destination, and run its entry
/// work (resting players pre-completed for the goods/placement phases,
/// the fansa reveal drawn on entry to fansa time).
fn transition(session: &mut Session, dest: Phase) {
    session.phase = dest;
    session.turn.reset();

    match dest {
        Phase::Labor => {
            for player in &mut session.players {
                player.selected_reward_card = None;
                player.decision = None;
            }
        }
        Phase::OshikatsuDecision => {
            for player in &mut session.players {
                player.selected_reward_card = None;
            }
        }
        Phase::OshikatsuGoods | Phase::OshikatsuPlacement => {
            let resting: Vec<PlayerId> = session
                .players
                .iter()
                .filter(|p| p.decision == Some(Decision::Rest))
                .map(|p| p.id)
                .collect();
            for player in resting {
                session.turn.mark(player, true);
            }
        }
        Phase::FansaTime => {
            session.reveal = Some(prepare_reveal(&mut session.rng));
        }
        _ => {}
    }
    log::debug!("phase -> {dest} (round {})", session.round);
}

fn next_phase(session: &mut Session) -> Result<(), EngineError> {
    match session.phase.kind() {
        PhaseKind::Terminal => return Err(EngineError::GameOver),
        PhaseKind::Unconditional => {}
        PhaseKind::Simultaneous => {
            if !session.turn.all_complete() {
                return Err(EngineError::PhaseNotComplete(session.phase));
            }
        }
        PhaseKind::Sequential => {
            if !session.turn.is_complete(session.active_player) {
                return Err(EngineError::PhaseNotComplete(session.phase));
            }
        }
    }

    if session.phase == Phase::RoundEnd {
        end_round(session)
    } else {
        let dest = session.phase.next().expect("non-terminal phase");
        transition(session, dest);
        Ok(())
    }
}

fn next_turn(session: &mut Session) -> Result<(), EngineError> {
    if session.phase.kind() != PhaseKind::Sequential {
        return Err(EngineError::WrongPhase {
            actual: session.phase,
        });
    }
    let next_index = (session.active_player.index() + 1) % session.player_count();
    session.active_player = PlayerId::new(next_index as u8);
    Ok(())
}

fn set_player_action_completed(
    session: &mut Session,
    player: PlayerId,
    completed: bool,
) -> Result<(), EngineError> {
    ensure_player(session, player)?;
    // Sequential phases take completions only from the active player.
    if session.phase.kind() == PhaseKind::Sequential && player != session.active_player {
        return Err(EngineError::NotYourTurn(player));
    }
    session.turn.mark(player, completed);
    Ok(())
}

fn end_round(session: &mut Session) -> Result<(), EngineError> {
    ensure_phase(session, Phase::RoundEnd)?;

    if is_game_complete(session.round, session.phase) {
        session.phase = Phase::GameEnd;
        log::debug!("game complete after round {}", session.round);
        return Ok(());
    }

    session.round_cleanup();
    session.round += 1;
    transition(session, Phase::Labor);
    Ok(())
}

// === Labor phase ===

fn select_reward_card(
    session: &mut Session,
    player: PlayerId,
    card: RewardCardId,
) -> Result<(), EngineError> {
    ensure_phase(session, Phase::Labor)?;
    ensure_player(session, player)?;

    let entry = session.player_mut(player).expect("player checked");
    if entry.selected_reward_card.is_some() {
        return Err(EngineError::AlreadySelected(player));
    }
    entry.selected_reward_card = Some(card);
    session.turn.mark(player, true);
    Ok(())
}

fn roll_dice_and_process_labor(session: &mut Session) -> Result<(), EngineError> {
    ensure_phase(session, Phase::Labor)?;
    if session
        .players
        .iter()
        .any(|p| p.selected_reward_card.is_none())
    {
        return Err(EngineError::SelectionsIncomplete);
    }

    let die = session.rng.roll_die();
    let payouts: Vec<(PlayerId, RewardCardId, u32)> = session
        .players
        .iter()
        .map(|p| {
            let card = p.selected_reward_card.expect("selection checked");
            (p.id, card, reward::payout(card, die))
        })
        .collect();

    for &(player, card, payout) in &payouts {
        session
            .player_mut(player)
            .expect("player exists")
            .adjust_money(i64::from(payout));
        session.current_round_entry_mut().labor.push(LaborRecord {
            player,
            card,
            die,
            payout,
        });
        log::debug!("{player} earned {payout} from card {card} (die {die})");
    }

    transition(session, Phase::OshikatsuDecision);
    Ok(())
}

// === Oshikatsu decision phase ===

fn select_decision(
    session: &mut Session,
    player: PlayerId,
    decision: Decision,
) -> Result<(), EngineError> {
    ensure_phase(session, Phase::OshikatsuDecision)?;
    ensure_player(session, player)?;

    session.player_mut(player).expect("player checked").decision = Some(decision);
    session.turn.mark(player, true);
    Ok(())
}

fn reveal_decisions(session: &mut Session) -> Result<(), EngineError> {
    ensure_phase(session, Phase::OshikatsuDecision)?;
    if session.players.iter().any(|p| p.decision.is_none()) {
        return Err(EngineError::DecisionsIncomplete);
    }

    let records: Vec<DecisionRecord> = session
        .players
        .iter()
        .map(|p| DecisionRecord {
            player: p.id,
            decision: p.decision.expect("decision checked"),
        })
        .collect();

    // Resting players are paid a bonus equal to this round's labor payout.
    let bonuses: Vec<(PlayerId, u32)> = records
        .iter()
        .filter(|r| r.decision == Decision::Rest)
        .filter_map(|r| session.labor_payout(r.player).map(|p| (r.player, p)))
        .collect();
    for &(player, bonus) in &bonuses {
        session
            .player_mut(player)
            .expect("player exists")
            .adjust_money(i64::from(bonus));
        log::debug!("{player} rests, bonus {bonus}");
    }

    session.current_round_entry_mut().decisions = records;
    transition(session, Phase::OshikatsuGoods);
    Ok(())
}

// === Oshikatsu goods phase ===

fn purchase_goods_inner(
    session: &mut Session,
    player: PlayerId,
    kind: GoodsKind,
) -> Result<PieceId, EngineError> {
    ensure_phase(session, Phase::OshikatsuGoods)?;
    ensure_player(session, player)?;
    ledger::purchase_goods(session.player_mut(player).expect("player checked"), kind)
}

fn create_kagebunshin_inner(
    session: &mut Session,
    player: PlayerId,
    piece: PieceId,
) -> Result<PieceId, EngineError> {
    ensure_phase(session, Phase::OshikatsuGoods)?;
    ensure_player(session, player)?;

    let clone_id = session.alloc_piece_id();
    ledger::create_kagebunshin(
        session.player_mut(player).expect("player checked"),
        piece,
        clone_id,
    )?;
    Ok(clone_id)
}

// === Oshikatsu placement phase ===

/// Silent-failure placement: an unknown piece, a goods-less piece, or a
/// full target spot leaves the snapshot unchanged without an error.
fn move_piece(session: &mut Session, piece: PieceId, spot: SpotId) -> Result<(), EngineError> {
    ensure_phase(session, Phase::OshikatsuPlacement)?;

    let Some((owner, found)) = session.find_piece(piece) else {
        return Ok(());
    };
    if !found.is_placeable() {
        return Ok(());
    }
    let owner_id = owner.id;

    if !session.board.place(piece, spot) {
        return Ok(());
    }
    session
        .player_mut(owner_id)
        .expect("owner exists")
        .piece_mut(piece)
        .expect("piece exists")
        .spot = Some(spot);
    Ok(())
}

// === Fansa time ===

fn process_fansa_time(session: &mut Session) -> Result<(), EngineError> {
    ensure_phase(session, Phase::FansaTime)?;

    // The reveal is drawn on phase entry; re-draw only if a repaired or
    // hand-built session arrived without one.
    let reveal = match session.reveal {
        Some(reveal) => reveal,
        None => {
            let reveal = prepare_reveal(&mut session.rng);
            session.reveal = Some(reveal);
            reveal
        }
    };

    run_fansa_time(session, &reveal);
    transition(session, Phase::RoundEnd);
    Ok(())
}
