use lombok::AllArgsConstructor;

/// File-path reference to a recipe's photo. At most one per recipe.
#[derive(AllArgsConstructor, Debug, Clone, PartialEq)]
pub struct Photo {
    pub file_path: String,
}
