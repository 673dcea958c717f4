//! Character roster: unlock costs and selection.

use serde::{Deserialize, Serialize};

use crate::error::SaveError;
use crate::save_data::{CharacterId, SaveData};
use crate::store::KeyValueStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub cost: u32,
}

impl Character {
    pub fn new(name: impl Into<String>, cost: u32) -> Self {
        Self {
            name: name.into(),
            cost,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharacterStatus {
    Locked { cost: u32 },
    Unlocked,
    Selected,
}

/// The roster. Characters are addressed by their index in the catalog.
#[derive(Debug, Clone, Default)]
pub struct CharacterStore {
    catalog: Vec<Character>,
}

impl CharacterStore {
    pub fn new(catalog: Vec<Character>) -> Self {
        Self { catalog }
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    pub fn character(&self, index: usize) -> Option<&Character> {
        self.catalog.get(index)
    }

    pub fn status<S: KeyValueStore>(
        &self,
        save: &SaveData<S>,
        index: usize,
    ) -> Result<CharacterStatus, SaveError> {
        let character = self.get(index)?;
        let id = CharacterId::Index(index);
        Ok(if !save.is_unlocked(&id) {
            CharacterStatus::Locked {
                cost: character.cost,
            }
        } else if save.selected() == id {
            CharacterStatus::Selected
        } else {
            CharacterStatus::Unlocked
        })
    }

    /// Buy a character: spend its cost, unlock it and select it.
    ///
    /// Nothing is spent when the character is already unlocked or the
    /// balance is short.
    pub fn unlock<S: KeyValueStore>(
        &self,
        save: &mut SaveData<S>,
        index: usize,
    ) -> Result<(), SaveError> {
        let character = self.get(index)?;
        let id = CharacterId::Index(index);
        if save.is_unlocked(&id) {
            return Err(SaveError::AlreadyUnlocked(index));
        }
        save.spend_coins(character.cost)?;
        save.unlock(&id);
        save.select(&id);
        tracing::info!(index, name = %character.name, cost = character.cost, "character unlocked");
        Ok(())
    }

    pub fn select<S: KeyValueStore>(
        &self,
        save: &mut SaveData<S>,
        index: usize,
    ) -> Result<(), SaveError> {
        self.get(index)?;
        let id = CharacterId::Index(index);
        if !save.is_unlocked(&id) {
            return Err(SaveError::Locked(index));
        }
        save.select(&id);
        Ok(())
    }

    fn get(&self, index: usize) -> Result<&Character, SaveError> {
        self.catalog
            .get(index)
            .ok_or(SaveError::UnknownCharacter(index))
    }
}
