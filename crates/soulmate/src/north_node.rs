use aphrodite::zodiac::Sign;

pub const SUN_ON_NODE: u32 = 4;
pub const MOON_ON_NODE: u32 = 4;
pub const VENUS_ON_NODE: u32 = 3;
/// Sun, Moon and Venus all on the node still score 8, not 11.
pub const NORTH_NODE_CAP: u32 = 8;

/// Bonus for a candidate's Sun, Moon or Venus sharing the sign of the user's
/// North Node.
pub fn score_north_node(user_node: Sign, sun: Sign, moon: Sign, venus: Sign) -> u32 {
    let mut score = 0;
    if sun == user_node {
        score += SUN_ON_NODE;
    }
    if moon == user_node {
        score += MOON_ON_NODE;
    }
    if venus == user_node {
        score += VENUS_ON_NODE;
    }
    score.min(NORTH_NODE_CAP)
}
