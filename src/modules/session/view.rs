use itertools::Itertools;

use crate::modules::cards::Card;

/// Unsent cards first, then sent ones, each group in creation order
pub fn sorted_cards(cards: &[Card]) -> Vec<&Card> {
    cards.iter().sorted_by_key(|card| card.sent).collect()
}

/// One line of the card list, e.g. "Somebody / candy"
pub fn card_summary(card: &Card) -> String {
    match card.formatted_sent_date() {
        Some(date) if card.sent => format!("{} / {} (sent {})", card.to, card.item, date),
        _ => format!("{} / {}", card.to, card.item),
    }
}

/// Text preview of a card with its personalized message
pub fn render_card(card: &Card, message: &str) -> String {
    format!("Dear {},\n\n{}\n\n{}", card.to, message, card.from)
}
