//! In-memory client backend

use async_trait::async_trait;
use std::collections::HashMap;

use super::{ClientMode, ClientResult, MealPlanner};
use crate::models::MealDay;

/// Per-process mirror of saved days; nothing survives a restart
#[derive(Debug, Default)]
pub struct LocalSession {
    records: HashMap<String, MealDay>,
}

impl LocalSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl MealPlanner for LocalSession {
    fn mode(&self) -> ClientMode {
        ClientMode::Local
    }

    async fn save(&mut self, day: &MealDay) -> ClientResult<String> {
        self.records.insert(day.date.clone(), day.clone());
        Ok(format!("Saved locally for {}", day.date))
    }

    async fn view(&self, date: &str) -> ClientResult<Option<MealDay>> {
        Ok(self.records.get(date).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MealPart;

    #[tokio::test]
    async fn test_save_replaces_previous_entry() {
        let mut session = LocalSession::new();
        let first = MealDay::new("2024-03-01", MealPart::new("Lentils", false), MealPart::default());
        let second = MealDay::new("2024-03-01", MealPart::new("Soup", true), MealPart::default());

        assert_eq!(session.save(&first).await.unwrap(), "Saved locally for 2024-03-01");
        session.save(&second).await.unwrap();

        assert_eq!(session.len(), 1);
        assert_eq!(session.view("2024-03-01").await.unwrap(), Some(second));
    }

    #[tokio::test]
    async fn test_view_unknown_date() {
        let session = LocalSession::new();
        assert_eq!(session.view("2099-01-01").await.unwrap(), None);
        assert!(session.is_empty());
    }
}
