//! Pure portion-scaling math.

use itertools::Itertools;

use crate::database::models::ingredient::Ingredient;

/// Returns a new ingredient list with every quantity multiplied by
/// `factor`. Length and order are preserved and the input is left
/// untouched, so callers can keep a stable base list and rescale it any
/// number of times without drift. Quantities are not clamped; formatting
/// odd values is the presentation layer's job.
pub fn scale_ingredients(base: &[Ingredient], factor: f64) -> Vec<Ingredient> {
    base.iter()
        .map(|ingredient| {
            Ingredient::new(
                ingredient.name.clone(),
                ingredient.quantity * factor,
                ingredient.unit.clone(),
            )
        })
        .collect_vec()
}

/// Scale factor from a recipe's base portion count to `requested`
/// servings. Base counts of zero or less act as one serving.
pub fn portion_factor(requested: i32, base_portions: i32) -> f64 {
    f64::from(requested) / f64::from(base_portions.max(1))
}

#[cfg(test)]
mod tests {
    use super::{portion_factor, scale_ingredients};
    use crate::database::models::ingredient::Ingredient;

    fn base() -> Vec<Ingredient> {
        vec![
            Ingredient::new("Flour".to_owned(), 200.0, "g".to_owned()),
            Ingredient::new("Milk".to_owned(), 0.5, "l".to_owned()),
            Ingredient::new("Salt".to_owned(), 0.0, String::new()),
        ]
    }

    #[test]
    fn multiplies_every_quantity() {
        let scaled = scale_ingredients(&base(), 3.0);

        assert_eq!(scaled.len(), 3);
        assert_eq!(scaled[0].quantity, 600.0);
        assert_eq!(scaled[1].quantity, 1.5);
        assert_eq!(scaled[2].quantity, 0.0);
    }

    #[test]
    fn keeps_names_units_and_order() {
        let scaled = scale_ingredients(&base(), 0.5);

        assert_eq!(scaled[0].name, "Flour");
        assert_eq!(scaled[0].unit, "g");
        assert_eq!(scaled[1].name, "Milk");
        assert_eq!(scaled[2].name, "Salt");
        assert_eq!(scaled[2].unit, "");
    }

    #[test]
    fn factor_one_is_value_equal_to_base() {
        let base = base();

        assert_eq!(scale_ingredients(&base, 1.0), base);
    }

    #[test]
    fn does_not_mutate_the_base() {
        let base = base();
        let _ = scale_ingredients(&base, 12.0);

        assert_eq!(base[0].quantity, 200.0);
    }

    #[test]
    fn rescaling_from_base_does_not_drift() {
        let base = base();

        let _ = scale_ingredients(&base, 2.0);
        let scaled = scale_ingredients(&base, 2.0);

        assert_eq!(scaled[0].quantity, 400.0);
    }

    #[test]
    fn portion_factor_divides_by_base() {
        assert_eq!(portion_factor(2, 4), 0.5);
        assert_eq!(portion_factor(12, 4), 3.0);
        assert_eq!(portion_factor(3, 2), 1.5);
    }

    #[test]
    fn portion_factor_treats_nonpositive_base_as_one() {
        assert_eq!(portion_factor(5, 0), 5.0);
        assert_eq!(portion_factor(5, -2), 5.0);
    }
}
