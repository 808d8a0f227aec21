//! Decorative card backgrounds

use rand::Rng;

/// Hue spacing between the three gradient stops
const HUE_STEP: u32 = 15;

/// Build a translucent three-stop linear gradient around a random hue
pub fn random_gradient<R: Rng>(rng: &mut R) -> String {
    let hue = rng.gen_range(0..360);
    let degree = rng.gen_range(0..360);
    gradient_for(hue, degree)
}

/// Gradient for an explicit base hue and angle
#[must_use]
pub fn gradient_for(hue: u32, degree: u32) -> String {
    let stops = (0..3)
        .map(|index| format!("hsla({},100%,50%,0.5)", hue + index * HUE_STEP))
        .collect::<Vec<_>>()
        .join(",");
    format!("linear-gradient({degree}deg,{stops})")
}
