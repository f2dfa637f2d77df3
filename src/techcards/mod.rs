//! Alien tech cards.
//!
//! ## Key Types
//!
//! - `TechCardId`: one per physical card (22 in the deck)
//! - `TechKind`: card type, with family, victory points and abilities
//! - `TechCardCatalog`: owner and used flag of every card, plus the
//!   deck/discard/window piles
//! - `CardArgs`: targets passed to an ability
//!
//! Every card has up to two abilities. The power costs fuel, may be used
//! once per turn, and the card stays in hand. The discard power is free
//! but sends the card to the discard pile.

pub mod catalog;
pub mod definition;
pub mod piles;
pub mod powers;

pub use catalog::TechCardCatalog;
pub use definition::{Ability, TechCard, TechCardId, TechFamily, TechKind};
pub use piles::{CardPiles, Pile};
pub use powers::CardArgs;
