use ikladde::database::connection::establish_pooled_connection_to;
use ikladde::{DatabaseStore, Ingredient, Photo, Recipe, RecipeStore, Step, Tag};

fn memory_store() -> DatabaseStore {
    DatabaseStore::new(establish_pooled_connection_to(":memory:"))
}

fn pancakes() -> Recipe {
    let mut recipe = Recipe::new("Pancakes");
    recipe.portions = 4;
    recipe.rating = 4;
    recipe.photo = Some(Photo::new("photos/123_pancakes.jpg".to_owned()));
    recipe.add_ingredient(Ingredient::new("Flour".to_owned(), 200.0, "g".to_owned()));
    recipe.add_ingredient(Ingredient::new("Milk".to_owned(), 0.3, "l".to_owned()));
    recipe.add_ingredient(Ingredient::new("Eggs".to_owned(), 2.0, String::new()));
    recipe.add_step(Step::new("Whisk the batter".to_owned()));
    recipe.add_step(Step::new("Rest for 20 minutes".to_owned()));
    recipe.add_step(Step::new("Fry in butter".to_owned()));
    recipe.add_tag(Tag::new("Breakfast"));
    recipe.add_tag(Tag::new("Sweet"));
    recipe
}

#[test]
fn insert_assigns_distinct_positive_ids() {
    let store = memory_store();

    let first = store.insert_recipe(&pancakes()).unwrap();
    let second = store.insert_recipe(&Recipe::new("Goulash")).unwrap();

    assert!(first > 0);
    assert!(second > first);
}

#[test]
fn round_trip_preserves_fields_and_order() {
    let store = memory_store();
    let recipe = pancakes();

    let id = store.insert_recipe(&recipe).unwrap();

    let loaded = store.fetch_all_recipes().unwrap();
    assert_eq!(loaded.len(), 1);
    let core = &loaded[0];
    assert_eq!(core.id, id);
    assert_eq!(core.name, "Pancakes");
    assert_eq!(core.rating, 4);
    assert_eq!(core.portions, 4);
    assert_eq!(core.created_date, recipe.created_date);
    assert_eq!(
        core.photo.as_ref().unwrap().file_path,
        "photos/123_pancakes.jpg"
    );

    assert_eq!(store.fetch_ingredients(id).unwrap(), recipe.ingredients);

    let steps = store.fetch_steps(id).unwrap();
    assert_eq!(steps, recipe.steps);

    assert_eq!(store.fetch_tags(id).unwrap(), recipe.tags);
}

#[test]
fn update_replaces_sub_collections_wholesale() {
    let store = memory_store();
    let mut recipe = pancakes();
    recipe.id = store.insert_recipe(&recipe).unwrap();

    recipe.name = "Thin Pancakes".to_owned();
    recipe.ingredients = vec![Ingredient::new(
        "Buckwheat".to_owned(),
        150.0,
        "g".to_owned(),
    )];
    recipe.steps = vec![
        Step::new("Mix".to_owned()),
        Step::new("Fry".to_owned()),
    ];
    recipe.tags = [Tag::new("Dinner")].into();
    recipe.photo = None;

    store.update_recipe(&recipe).unwrap();

    let loaded = store.fetch_all_recipes().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].name, "Thin Pancakes");
    assert!(loaded[0].photo.is_none());

    let ingredients = store.fetch_ingredients(recipe.id).unwrap();
    assert_eq!(ingredients.len(), 1);
    assert_eq!(ingredients[0].name, "Buckwheat");

    let steps = store.fetch_steps(recipe.id).unwrap();
    assert_eq!(steps.len(), 2);
    assert_eq!(steps[0].description, "Mix");
    assert_eq!(steps[1].description, "Fry");

    assert_eq!(store.fetch_tags(recipe.id).unwrap(), recipe.tags);
}

#[test]
fn tags_are_stored_once_per_case_insensitive_name() {
    let store = memory_store();

    let mut first = Recipe::new("Apple Pie");
    first.add_tag(Tag::new("Dessert"));
    store.insert_recipe(&first).unwrap();

    let mut second = Recipe::new("Tiramisu");
    second.add_tag(Tag::new("dessert"));
    second.add_tag(Tag::new("Italian"));
    let second_id = store.insert_recipe(&second).unwrap();

    let all_tags = store.fetch_all_tags().unwrap();
    let names: Vec<&str> = all_tags.iter().map(Tag::name).collect();
    // The first spelling wins; no second row for "dessert".
    assert_eq!(names, ["Dessert", "Italian"]);

    let tiramisu_tags = store.fetch_tags(second_id).unwrap();
    assert!(tiramisu_tags.contains(&Tag::new("DESSERT")));
}

#[test]
fn tags_survive_the_recipes_that_carried_them() {
    let store = memory_store();

    let mut recipe = Recipe::new("Apple Pie");
    recipe.add_tag(Tag::new("Dessert"));
    let id = store.insert_recipe(&recipe).unwrap();

    store.delete_recipe(id).unwrap();

    let all_tags = store.fetch_all_tags().unwrap();
    let names: Vec<&str> = all_tags.iter().map(Tag::name).collect();
    assert_eq!(names, ["Dessert"]);
}

#[test]
fn delete_cascades_to_sub_collections_and_links() {
    let store = memory_store();
    let recipe = pancakes();
    let id = store.insert_recipe(&recipe).unwrap();

    store.delete_recipe(id).unwrap();

    assert!(store.fetch_all_recipes().unwrap().is_empty());
    assert!(store.fetch_ingredients(id).unwrap().is_empty());
    assert!(store.fetch_steps(id).unwrap().is_empty());
    assert!(store.fetch_tags(id).unwrap().is_empty());
}

#[test]
fn linking_the_same_tag_twice_is_harmless() {
    let store = memory_store();

    let mut recipe = Recipe::new("Apple Pie");
    recipe.add_tag(Tag::new("Dessert"));
    let id = store.insert_recipe(&recipe).unwrap();

    // A later save re-links the tag; the link table stays unique.
    recipe.id = id;
    store.update_recipe(&recipe).unwrap();

    assert_eq!(store.fetch_tags(id).unwrap().len(), 1);
    assert_eq!(store.fetch_all_tags().unwrap().len(), 1);
}
