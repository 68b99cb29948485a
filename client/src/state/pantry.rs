//! Pantry wizard: stored ingredients, the current selection, and the cook
//! request built from it.
//!
//! Steps run from the always-at-home list through cooking methods, today's
//! extras, and portions to a review and the generated recipe. Stored entries
//! start out selected; deselecting only affects the next cook request.

#[cfg(test)]
#[path = "pantry_test.rs"]
mod pantry_test;

use crate::net::types::{CookRequest, CookResponse, NewPantryItem, PantryItem, Settings};
use crate::state::preferences::toggle;

pub const ALWAYS_HAVE: &str = "Always at home";
pub const EXTRAS_TODAY: &str = "Extra today";

pub const ANY_METHOD: &str = "any method";
pub const METHODS: [&str; 4] = [ANY_METHOD, "boiled", "baked", "fried"];

pub const DUPLICATE_MESSAGE: &str = "This ingredient already exists!";

pub const PEOPLE_RANGE: (u32, u32) = (1, 20);
pub const PREP_TIME_RANGE: (u32, u32) = (5, 120);
pub const PREP_TIME_STEP: u32 = 5;
pub const DEFAULT_PREP_TIME: u32 = 20;

pub const TIPS: [&str; 10] = [
    "Leftover vegetables make a quick soup or stir-fry.",
    "Day-old rice plus an egg and some vegetables is fried rice.",
    "Stale bread turns into bruschetta with olive oil and garlic.",
    "Boiled eggs, yogurt and a little garlic make a fast protein snack.",
    "Overripe fruit belongs in a smoothie or your oats.",
    "Parmesan and pasta in the cupboard mean dinner is ten minutes away.",
    "Keep cheese rinds; they add depth to soups.",
    "Leftover meat and tortillas make quick wraps.",
    "Zucchini and eggs are an easy frittata.",
    "Boiled potatoes roast well with a pinch of spice.",
];

/// Tip for a uniform sample in `[0, 1)`.
pub fn tip_for(sample: f64) -> &'static str {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let index = (sample.clamp(0.0, 1.0) * TIPS.len() as f64) as usize;
    TIPS[index.min(TIPS.len() - 1)]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WizardStep {
    AlwaysHave,
    Methods,
    ExtrasToday,
    Portions,
    Review,
    Recipe,
}

impl WizardStep {
    pub const ALL: [Self; 6] = [
        Self::AlwaysHave,
        Self::Methods,
        Self::ExtrasToday,
        Self::Portions,
        Self::Review,
        Self::Recipe,
    ];

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|step| *step == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL.get(self.index() + 1).copied().unwrap_or(self)
    }

    pub fn prev(self) -> Self {
        self.index()
            .checked_sub(1)
            .and_then(|i| Self::ALL.get(i).copied())
            .unwrap_or(self)
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::AlwaysHave => "What do you always have at home?",
            Self::Methods => "Pick the cooking methods",
            Self::ExtrasToday => "What else do you have today?",
            Self::Portions => "How many people, and how much time?",
            Self::Review => "Ready to cook?",
            Self::Recipe => "Suggested recipe",
        }
    }

    /// Width of the progress bar.
    pub fn progress_percent(self) -> u32 {
        let last = Self::ALL.len() - 1;
        #[allow(clippy::cast_possible_truncation)]
        let percent = (self.index() * 100 / last) as u32;
        percent
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PantryWizard {
    pub step: WizardStep,
    pub items: Vec<PantryItem>,
    /// Names of stored items included in the next cook request.
    pub selected: Vec<String>,
    pub methods: Vec<String>,
    pub people: u32,
    pub prep_time: u32,
    pub recipe: Option<CookResponse>,
}

impl Default for PantryWizard {
    fn default() -> Self {
        Self {
            step: WizardStep::AlwaysHave,
            items: Vec::new(),
            selected: Vec::new(),
            methods: vec![ANY_METHOD.to_owned()],
            people: PEOPLE_RANGE.0,
            prep_time: DEFAULT_PREP_TIME,
            recipe: None,
        }
    }
}

impl PantryWizard {
    /// Replace the stored items, selecting all of them.
    pub fn load(&mut self, items: Vec<PantryItem>) {
        self.selected = items.iter().map(|item| item.name.clone()).collect();
        self.items = items;
    }

    pub fn items_in(&self, category: &str) -> Vec<PantryItem> {
        self.items
            .iter()
            .filter(|item| item.category == category)
            .cloned()
            .collect()
    }

    /// Validate a free-text entry for `category` before it is stored.
    ///
    /// Names are unique across the whole pantry, ignoring case.
    pub fn new_item(&self, category: &str, name: &str) -> Result<NewPantryItem, &'static str> {
        let name = name.trim();
        if name.is_empty() {
            return Err("Please enter an ingredient.");
        }
        if self
            .items
            .iter()
            .any(|item| item.name.eq_ignore_ascii_case(name))
        {
            return Err(DUPLICATE_MESSAGE);
        }
        Ok(NewPantryItem {
            name: name.to_owned(),
            category: category.to_owned(),
            temporary: category == EXTRAS_TODAY,
        })
    }

    /// Add a freshly stored item and select it.
    pub fn insert(&mut self, item: PantryItem) {
        if !self.selected.contains(&item.name) {
            self.selected.push(item.name.clone());
        }
        self.items.push(item);
    }

    pub fn remove(&mut self, id: i64) {
        if let Some(pos) = self.items.iter().position(|item| item.id == id) {
            let item = self.items.remove(pos);
            self.selected.retain(|name| *name != item.name);
        }
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selected.iter().any(|selected| selected == name)
    }

    pub fn toggle_selected(&mut self, name: &str) {
        toggle(&mut self.selected, name);
    }

    pub fn toggle_method(&mut self, method: &str) {
        toggle(&mut self.methods, method);
    }

    /// Set portions from raw input, clamped; unparsable input keeps the value.
    pub fn set_people(&mut self, raw: &str) {
        if let Ok(people) = raw.trim().parse::<u32>() {
            self.people = people.clamp(PEOPLE_RANGE.0, PEOPLE_RANGE.1);
        }
    }

    pub fn set_prep_time(&mut self, raw: &str) {
        if let Ok(minutes) = raw.trim().parse::<u32>() {
            let snapped = minutes / PREP_TIME_STEP * PREP_TIME_STEP;
            self.prep_time = snapped.clamp(PREP_TIME_RANGE.0, PREP_TIME_RANGE.1);
        }
    }

    /// Selected names in `category`, in stored order.
    pub fn selected_in(&self, category: &str) -> Vec<String> {
        self.items
            .iter()
            .filter(|item| item.category == category && self.is_selected(&item.name))
            .map(|item| item.name.clone())
            .collect()
    }

    pub fn cook_request(&self, settings: &Settings) -> CookRequest {
        CookRequest {
            always_have: self.selected_in(ALWAYS_HAVE),
            extras_today: self.selected_in(EXTRAS_TODAY),
            allowed_methods: self.methods.clone(),
            prep_time: self.prep_time,
            people: self.people,
            allergies: settings.allergies.clone(),
            dislikes: settings.dislikes.clone(),
            preferences: settings.preferences.clone(),
            favorites: settings.favorites.clone(),
        }
    }

    pub fn show_recipe(&mut self, recipe: CookResponse) {
        self.recipe = Some(recipe);
        self.step = WizardStep::Recipe;
    }

    /// Back to the first step; stored items and selections stay.
    pub fn restart(&mut self) {
        self.recipe = None;
        self.step = WizardStep::AlwaysHave;
    }
}

/// Comma-separated summary for the review step.
pub fn summary(values: &[String]) -> String {
    if values.is_empty() {
        "nothing selected".to_owned()
    } else {
        values.join(", ")
    }
}
