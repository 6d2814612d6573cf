//! Product Categories

use smallvec::SmallVec;

/// Category memberships; the first entry is the canonical category.
pub type Categories = SmallVec<[String; 3]>;

/// Trim entries and drop repeats (case-insensitive), keeping the first occurrence.
pub(crate) fn normalize<I, S>(categories: I) -> Categories
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut normalized = Categories::new();

    for category in categories {
        let category = category.as_ref().trim();

        if !normalized.iter().any(|existing| same_category(existing, category)) {
            normalized.push(category.to_string());
        }
    }

    normalized
}

/// Case-insensitive category comparison, accents included (`Maní` matches `MANÍ`).
pub(crate) fn same_category(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_deduplicates() {
        let categories = normalize([" Almendras", "nueces", "almendras ", "Mix"]);

        assert_eq!(categories.as_slice(), ["Almendras", "nueces", "Mix"]);
    }

    #[test]
    fn comparison_ignores_case() {
        assert!(same_category("Maní", "MANÍ"));
        assert!(!same_category("Maní", "Mani"));
    }
}
