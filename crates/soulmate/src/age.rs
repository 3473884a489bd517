//! Partner age windows.

use crate::gender::Gender;
use serde::{Deserialize, Serialize};

/// Youngest age any window may contain.
pub const ADULT_AGE: i32 = 18;
/// Width of every window, in years.
pub const WINDOW_SPAN: i32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeWindow {
    pub min_age: i32,
    pub max_age: i32,
}

impl AgeWindow {
    /// Inclusive range of birth years, oldest first.
    pub fn birth_years(&self, reference_year: i32) -> (i32, i32) {
        (reference_year - self.max_age, reference_year - self.min_age)
    }

    pub fn midpoint_age(&self) -> i32 {
        (self.min_age + self.max_age) / 2
    }

    pub fn contains_birth_year(&self, birth_year: i32, reference_year: i32) -> bool {
        let (first, last) = self.birth_years(reference_year);
        (first..=last).contains(&birth_year)
    }
}

/// Target age window for a partner of `target_sex`.
///
/// Minors always get 18-26. A man seeking a woman uses half-your-age-plus-seven,
/// a woman seeking a man the mirror of it; every other pairing is +/-4 years,
/// so adults under 22 get a window narrower than eight years.
pub fn age_range(user_age: i32, user_gender: Gender, target_sex: Gender) -> AgeWindow {
    if user_age < ADULT_AGE {
        return AgeWindow {
            min_age: ADULT_AGE,
            max_age: ADULT_AGE + WINDOW_SPAN,
        };
    }

    match (user_gender, target_sex) {
        (Gender::Male, Gender::Female) => {
            let min_age = (user_age.div_euclid(2) + 7).max(ADULT_AGE);
            AgeWindow {
                min_age,
                max_age: min_age + WINDOW_SPAN,
            }
        }
        (Gender::Female, Gender::Male) => AgeWindow {
            min_age: user_age.max(ADULT_AGE),
            max_age: user_age + WINDOW_SPAN,
        },
        _ => AgeWindow {
            min_age: (user_age - WINDOW_SPAN / 2).max(ADULT_AGE),
            max_age: user_age + WINDOW_SPAN / 2,
        },
    }
}

/// Partner birth year at the middle of the window, for recomputing a result
/// when the gender selection changes after a search.
pub fn recalculate_birth_year(
    user_birth_year: i32,
    user_gender: Gender,
    target_sex: Gender,
    current_year: i32,
) -> (i32, AgeWindow) {
    let window = age_range(current_year - user_birth_year, user_gender, target_sex);
    (current_year - window.midpoint_age(), window)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_pairings() {
        assert_eq!(age_range(30, Gender::Male, Gender::Female), AgeWindow { min_age: 22, max_age: 30 });
        assert_eq!(age_range(30, Gender::Female, Gender::Male), AgeWindow { min_age: 30, max_age: 38 });
        assert_eq!(age_range(25, Gender::Male, Gender::Male), AgeWindow { min_age: 21, max_age: 29 });
    }

    #[test]
    fn test_minors_get_fixed_window() {
        for gender in [Gender::Male, Gender::Female, Gender::NonBinary, Gender::Unknown] {
            assert_eq!(age_range(15, gender, Gender::Female), AgeWindow { min_age: 18, max_age: 26 });
        }
    }

    #[test]
    fn test_young_man_floor() {
        // 20 / 2 + 7 = 17, lifted to 18
        assert_eq!(age_range(20, Gender::Male, Gender::Female), AgeWindow { min_age: 18, max_age: 26 });
    }

    #[test]
    fn test_window_is_eight_years_from_22() {
        let genders = [Gender::Male, Gender::Female, Gender::NonBinary, Gender::Unknown];
        for age in 22..100 {
            for user in genders {
                for target in genders {
                    let w = age_range(age, user, target);
                    assert_eq!(w.max_age - w.min_age, WINDOW_SPAN, "age {age} {user}->{target}");
                    assert!(w.min_age >= ADULT_AGE);
                }
            }
        }
    }

    #[test]
    fn test_symmetric_window_clipped_at_adulthood() {
        // 19 - 4 is lifted to 18, the upper bound stays at 19 + 4
        assert_eq!(age_range(19, Gender::Female, Gender::Female), AgeWindow { min_age: 18, max_age: 23 });
    }

    #[test]
    fn test_recalculate_birth_year() {
        let (year, window) = recalculate_birth_year(1990, Gender::Male, Gender::Female, 2025);
        // age 35: 24..32, midpoint 28
        assert_eq!(window, AgeWindow { min_age: 24, max_age: 32 });
        assert_eq!(year, 1997);
    }

    #[test]
    fn test_birth_years() {
        let window = AgeWindow { min_age: 22, max_age: 30 };
        assert_eq!(window.birth_years(2025), (1995, 2003));
        assert!(window.contains_birth_year(2000, 2025));
        assert!(!window.contains_birth_year(2004, 2025));
    }
}
