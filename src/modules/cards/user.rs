use serde::{Deserialize, Serialize};

use super::model::{Card, CardFields};
use super::CardError;

/// A username and the cards it owns, in the order they were created
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct User {
    username: String,
    cards: Vec<Card>,
}

impl User {
    pub fn new(username: impl Into<String>) -> Self {
        User {
            username: username.into(),
            cards: Vec::new(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Append a card built from `fields`. The id comes from the caller; it must not collide.
    pub fn add_card(&mut self, fields: CardFields) -> Result<&Card, CardError> {
        if self.find_card(fields.id).is_some() {
            return Err(CardError::DuplicateId(fields.id));
        }

        self.cards.push(Card::new(fields));
        Ok(&self.cards[self.cards.len() - 1])
    }

    /// Highest id plus one, recomputed from the current cards (0 when empty)
    pub fn next_card_id(&self) -> Result<u64, CardError> {
        match self.cards.iter().map(|card| card.id).max() {
            Some(max) => max.checked_add(1).ok_or(CardError::IdExhausted),
            None => Ok(0),
        }
    }

    pub fn find_card(&self, id: u64) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == id)
    }

    pub fn find_card_mut(&mut self, id: u64) -> Option<&mut Card> {
        self.cards.iter_mut().find(|card| card.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields_with_id(id: u64) -> CardFields {
        CardFields {
            to: format!("Person {}", id),
            from: "Me".to_string(),
            item: "candy".to_string(),
            message_type: "tons".to_string(),
            sender: "me@example.com".to_string(),
            recipient: "you@example.com".to_string(),
            id,
            sent: false,
            date_sent: None,
        }
    }

    #[test]
    fn test_next_card_id_empty() {
        let user = User::new("admin");
        assert!(user.is_empty());
        assert_eq!(user.next_card_id().unwrap(), 0);
    }

    #[test]
    fn test_next_card_id_sequential() {
        let mut user = User::new("admin");
        user.add_card(fields_with_id(0)).unwrap();
        user.add_card(fields_with_id(1)).unwrap();
        assert_eq!(user.next_card_id().unwrap(), 2);
    }

    #[test]
    fn test_next_card_id_uses_max_not_count() {
        let mut user = User::new("admin");
        user.add_card(fields_with_id(0)).unwrap();
        user.add_card(fields_with_id(5)).unwrap();
        assert_eq!(user.next_card_id().unwrap(), 6);
    }

    #[test]
    fn test_next_card_id_at_max_id_is_exhausted() {
        let mut user = User::new("admin");
        user.add_card(fields_with_id(u64::MAX)).unwrap();
        assert!(matches!(user.next_card_id(), Err(CardError::IdExhausted)));

        // Lower ids can still be added explicitly
        user.add_card(fields_with_id(0)).unwrap();
        assert_eq!(user.cards().len(), 2);
    }

    #[test]
    fn test_add_card_keeps_insertion_order() {
        let mut user = User::new("admin");
        user.add_card(fields_with_id(3)).unwrap();
        user.add_card(fields_with_id(1)).unwrap();

        let ids: Vec<u64> = user.cards().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let mut user = User::new("admin");
        user.add_card(fields_with_id(0)).unwrap();

        assert!(matches!(
            user.add_card(fields_with_id(0)),
            Err(CardError::DuplicateId(0))
        ));
        assert_eq!(user.cards().len(), 1);
    }

    #[test]
    fn test_find_card() {
        let mut user = User::new("admin");
        user.add_card(fields_with_id(0)).unwrap();
        user.add_card(fields_with_id(1)).unwrap();

        assert_eq!(user.find_card(1).unwrap().to, "Person 1");
        assert!(user.find_card(7).is_none());
    }
}
