//! Built-in starter catalog.

/// `(name, height in feet, colour)` of the plants every new database starts
/// with.
pub const STARTER_PLANTS: &[(&str, u32, &str)] = &[
    ("Purple Coneflower", 3, "purple"),
    ("Black-Eyed Susan", 2, "yellow"),
    ("Wild Bergamot", 3, "purple"),
    ("Butterfly Weed", 2, "orange"),
    ("New England Aster", 4, "purple"),
    ("Joe Pye Weed", 4, "pink"),
    ("Wild Columbine", 2, "red"),
    ("Goldenrod", 3, "yellow"),
    ("Blazing Star", 3, "pink"),
];
