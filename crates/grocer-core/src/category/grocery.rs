//! Built-in grocery taxonomy.

use super::{Category, Taxonomy};

/// Fallback label for items no keyword matches.
pub const DEFAULT_CATEGORY: &str = "Other";

/// Categories in precedence order.
const GROCERY: &[(&str, &[&str])] = &[
    (
        "Meal Prep",
        &[
            "chicken", "rice", "avocado", "broccoli", "spinach", "quinoa", "oats", "tofu",
            "lentil", "sweet potato", "ground turkey",
        ],
    ),
    (
        "Produce",
        &[
            "banana", "apple", "orange", "berr", "grape", "melon", "lettuce", "tomato", "onion",
            "garlic", "carrot", "potato", "cucumber", "pepper", "lemon", "lime", "kale",
            "mushroom", "celery", "eggplant",
        ],
    ),
    (
        "Dairy",
        &["milk", "cheese", "yogurt", "yoghurt", "butter", "cream", "egg", "kefir"],
    ),
    (
        "Meat & Seafood",
        &[
            "beef", "pork", "steak", "bacon", "turkey", "sausage", "salmon", "shrimp", "tuna",
            "cod", "fish", "lamb",
        ],
    ),
    (
        "Bakery",
        &["bread", "bagel", "muffin", "croissant", "tortilla", "baguette", "donut"],
    ),
    (
        "Snacks",
        &[
            "chip", "cookie", "cracker", "popcorn", "pretzel", "candy", "chocolate", "granola",
            "nuts", "trail mix",
        ],
    ),
    (
        "Beverages",
        &["juice", "soda", "water", "coffee", "tea", "kombucha", "sparkling"],
    ),
    ("Frozen", &["frozen", "pizza", "popsicle", "waffle"]),
    (
        "Pantry",
        &[
            "pasta", "flour", "sugar", "cereal", "sauce", "soup", "beans", "olive oil", "canola",
            "salt", "honey", "vinegar", "spice",
        ],
    ),
    (
        "Household",
        &[
            "paper towel", "toilet paper", "detergent", "dish soap", "sponge", "trash bag",
            "foil", "bleach", "tissue", "napkin",
        ],
    ),
    (
        "Personal Care",
        &[
            "shampoo", "conditioner", "toothpaste", "toothbrush", "deodorant", "lotion", "razor",
            "body wash", "soap",
        ],
    ),
];

/// The default grocery taxonomy.
pub fn grocery_taxonomy() -> Taxonomy {
    Taxonomy::new(
        GROCERY
            .iter()
            .map(|(label, keywords)| Category::new(*label, keywords.iter()))
            .collect(),
    )
}
