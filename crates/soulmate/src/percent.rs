/// Score that reads as 100%: the evaluator's "exceptional" threshold of 30
/// plus the full North Node bonus.
pub const MAX_COMPATIBILITY_SCORE: u32 = 38;

/// Square-root curve onto 0-100, so half the ceiling already reads as ~71%.
pub fn to_percent(score: i64) -> u8 {
    if score <= 0 {
        return 0;
    }
    let ratio = score as f64 / MAX_COMPATIBILITY_SCORE as f64;
    (100.0 * ratio.sqrt()).round().min(100.0) as u8
}
