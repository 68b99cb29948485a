//! Editable copy of the dietary settings.

#[cfg(test)]
#[path = "preferences_test.rs"]
mod preferences_test;

use crate::net::types::Settings;

pub const ALLERGENS: [&str; 6] = ["Gluten", "Lactose", "Eggs", "Nuts", "Seafood", "Soy"];
pub const DIETS: [&str; 6] = [
    "Vegetarian",
    "Vegan",
    "Gluten-free",
    "Keto",
    "Low-calorie",
    "High-protein",
];

/// Which settings list an edit applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingsList {
    Allergies,
    Dislikes,
    Preferences,
    Favorites,
}

pub fn list(settings: &Settings, list: SettingsList) -> &[String] {
    match list {
        SettingsList::Allergies => &settings.allergies,
        SettingsList::Dislikes => &settings.dislikes,
        SettingsList::Preferences => &settings.preferences,
        SettingsList::Favorites => &settings.favorites,
    }
}

pub fn list_mut(settings: &mut Settings, list: SettingsList) -> &mut Vec<String> {
    match list {
        SettingsList::Allergies => &mut settings.allergies,
        SettingsList::Dislikes => &mut settings.dislikes,
        SettingsList::Preferences => &mut settings.preferences,
        SettingsList::Favorites => &mut settings.favorites,
    }
}

/// Add `value` if absent, remove it if present.
pub fn toggle(items: &mut Vec<String>, value: &str) {
    if let Some(pos) = items.iter().position(|item| item == value) {
        items.remove(pos);
    } else {
        items.push(value.to_owned());
    }
}

/// Append a trimmed free-text entry. Returns `false` for blanks and duplicates.
pub fn add_unique(items: &mut Vec<String>, value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() || items.iter().any(|item| item == value) {
        return false;
    }
    items.push(value.to_owned());
    true
}

pub fn remove(items: &mut Vec<String>, value: &str) {
    items.retain(|item| item != value);
}
