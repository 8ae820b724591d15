use std::f64::consts::{LN_10, PI};

/// Converts between the Elo-like 400-point scale and natural logistic units.
pub const GLICKO_Q: f64 = LN_10 / 400.;

/// Glicko's g-function: discounts evidence from an opponent whose rating is uncertain.
/// Lies in (0, 1] and decreases strictly as `rd` grows.
pub fn rd_weight(rd: f64) -> f64 {
    (1. + 3. * GLICKO_Q * GLICKO_Q * rd * rd / (PI * PI))
        .sqrt()
        .recip()
}

/// Probability that a side rated `own_rating` beats an opponent with the given rating and RD.
/// Only the opponent's RD enters the formula, so this is not symmetric in general.
pub fn expectation(own_rating: f64, opponent_rating: f64, opponent_rd: f64) -> f64 {
    let z = rd_weight(opponent_rd) * GLICKO_Q * (own_rating - opponent_rating);
    (1. + (-z).exp()).recip()
}

/// Fisher information contributed by one game, before scaling by `GLICKO_Q²`.
pub fn game_information(own_rating: f64, opponent_rating: f64, opponent_rd: f64) -> f64 {
    let g = rd_weight(opponent_rd);
    let probability = expectation(own_rating, opponent_rating, opponent_rd);
    g * g * probability * (1. - probability)
}
