use super::*;

fn recipe(id: Option<i64>, title: &str) -> Recipe {
    Recipe {
        id,
        title: title.to_owned(),
        image: None,
        ingredients: Vec::new(),
        instructions: String::new(),
        ready_in_minutes: 0,
        servings: 0,
    }
}

// =============================================================
// favorites_heading
// =============================================================

#[test]
fn heading_pluralizes() {
    assert_eq!(favorites_heading(0), "No saved recipes yet.");
    assert_eq!(favorites_heading(1), "1 saved recipe");
    assert_eq!(favorites_heading(4), "4 saved recipes");
}

// =============================================================
// without
// =============================================================

#[test]
fn without_drops_only_matching_id() {
    let list = vec![recipe(Some(1), "Soup"), recipe(Some(2), "Stew"), recipe(None, "Draft")];
    let titles: Vec<String> = without(&list, 1).into_iter().map(|r| r.title).collect();
    assert_eq!(titles, vec!["Stew".to_owned(), "Draft".to_owned()]);
}
