//! Resource and goods bookkeeping: the price list, goods purchase, and
//! kagebunshin creation.
//!
//! All money movement clamps at zero via `Player::adjust_money`; these
//! operations additionally refuse to start when funds are short, so a
//! purchase either fully applies or leaves the player untouched.

use crate::core::piece::{GoodsKind, Piece, PieceId};
use crate::core::player::Player;
use crate::engine::error::EngineError;

/// Money each player starts the game with.
pub const STARTING_MONEY: u32 = 10;

/// Price of creating one kagebunshin clone.
pub const KAGEBUNSHIN_PRICE: u32 = 4;

/// Buy a goods kind and assign it to the player's first eligible piece
/// (no goods, no board assignment, in piece order).
///
/// Returns the piece the goods landed on.
pub fn purchase_goods(player: &mut Player, kind: GoodsKind) -> Result<PieceId, EngineError> {
    let price = kind.price();
    if player.money < price {
        return Err(EngineError::InsufficientFunds {
            player: player.id,
            needed: price,
            available: player.money,
        });
    }

    let piece = player
        .pieces
        .iter_mut()
        .find(|p| p.is_goods_eligible())
        .ok_or(EngineError::NoEligiblePiece(player.id))?;

    piece.goods = Some(kind);
    let piece_id = piece.id;
    player.adjust_money(-i64::from(price));
    Ok(piece_id)
}

/// Create a kagebunshin clone from one of the player's gift-carrying
/// pieces. The clone inherits the gift goods kind and starts unplaced.
///
/// `new_id` is allocated by the session before the call.
pub fn create_kagebunshin(
    player: &mut Player,
    source: PieceId,
    new_id: PieceId,
) -> Result<(), EngineError> {
    let source_piece = player
        .piece(source)
        .ok_or(EngineError::UnknownPiece(source))?;
    if source_piece.goods != Some(GoodsKind::Gift) {
        return Err(EngineError::NotGiftPiece(source));
    }
    if player.money < KAGEBUNSHIN_PRICE {
        return Err(EngineError::InsufficientFunds {
            player: player.id,
            needed: KAGEBUNSHIN_PRICE,
            available: player.money,
        });
    }

    player
        .pieces
        .push(Piece::clone_of(new_id, player.id, GoodsKind::Gift));
    player.adjust_money(-i64::from(KAGEBUNSHIN_PRICE));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::SpotId;
    use crate::core::player::{PlayerId, PlayerSpec};

    fn player_with_pieces(money: u32) -> Player {
        let mut player = Player::new(PlayerId::new(0), &PlayerSpec::new("Aki", "red"), money);
        for i in 0..4 {
            player.pieces.push(Piece::new(PieceId::new(i), player.id));
        }
        player
    }

    #[test]
    fn test_purchase_assigns_first_eligible_piece() {
        let mut player = player_with_pieces(10);
        let assigned = purchase_goods(&mut player, GoodsKind::Uchiwa).unwrap();
        assert_eq!(assigned, PieceId::new(0));
        assert_eq!(player.pieces[0].goods, Some(GoodsKind::Uchiwa));
        assert_eq!(player.money, 7);

        // Next purchase skips the already-equipped piece.
        let assigned = purchase_goods(&mut player, GoodsKind::Gift).unwrap();
        assert_eq!(assigned, PieceId::new(1));
        assert_eq!(player.money, 2);
    }

    #[test]
    fn test_purchase_rejects_short_funds() {
        let mut player = player_with_pieces(2);
        let err = purchase_goods(&mut player, GoodsKind::Uchiwa).unwrap_err();
        assert_eq!(
            err,
            EngineError::InsufficientFunds {
                player: PlayerId::new(0),
                needed: 3,
                available: 2,
            }
        );
        assert_eq!(player.money, 2);
        assert!(player.pieces.iter().all(|p| p.goods.is_none()));
    }

    #[test]
    fn test_purchase_rejects_without_eligible_piece() {
        let mut player = player_with_pieces(20);
        for piece in &mut player.pieces {
            piece.goods = Some(GoodsKind::Penlight);
        }
        let err = purchase_goods(&mut player, GoodsKind::Uchiwa).unwrap_err();
        assert_eq!(err, EngineError::NoEligiblePiece(PlayerId::new(0)));
        assert_eq!(player.money, 20);
    }

    #[test]
    fn test_placed_piece_is_not_eligible() {
        let mut player = player_with_pieces(10);
        // A stale spot assignment must disqualify even a goods-less piece.
        player.pieces[0].spot = Some(SpotId::new(0));
        let assigned = purchase_goods(&mut player, GoodsKind::Uchiwa).unwrap();
        assert_eq!(assigned, PieceId::new(1));
    }

    #[test]
    fn test_kagebunshin_from_gift_piece() {
        let mut player = player_with_pieces(10);
        player.pieces[2].goods = Some(GoodsKind::Gift);

        create_kagebunshin(&mut player, PieceId::new(2), PieceId::new(99)).unwrap();
        assert_eq!(player.money, 6);
        assert_eq!(player.pieces.len(), 5);

        let clone = player.piece(PieceId::new(99)).unwrap();
        assert!(clone.is_clone);
        assert_eq!(clone.goods, Some(GoodsKind::Gift));
        assert!(clone.spot.is_none());
    }

    #[test]
    fn test_kagebunshin_rejects_non_gift_source() {
        let mut player = player_with_pieces(10);
        player.pieces[0].goods = Some(GoodsKind::Uchiwa);

        let err = create_kagebunshin(&mut player, PieceId::new(0), PieceId::new(99)).unwrap_err();
        assert_eq!(err, EngineError::NotGiftPiece(PieceId::new(0)));

        let err = create_kagebunshin(&mut player, PieceId::new(1), PieceId::new(99)).unwrap_err();
        assert_eq!(err, EngineError::NotGiftPiece(PieceId::new(1)));
        assert_eq!(player.pieces.len(), 4);
        assert_eq!(player.money, 10);
    }

    #[test]
    fn test_kagebunshin_rejects_short_funds() {
        let mut player = player_with_pieces(3);
        player.pieces[0].goods = Some(GoodsKind::Gift);
        let err = create_kagebunshin(&mut player, PieceId::new(0), PieceId::new(99)).unwrap_err();
        assert!(matches!(err, EngineError::InsufficientFunds { .. }));
        assert_eq!(player.pieces.len(), 4);
    }
}
