//! Short acknowledgements shown when a button press is answered

use rand::seq::SliceRandom;

pub const TOASTS: [&str; 5] = ["Okay!", "Cool!", "Alright!", "Fine!", "Hmmm!"];

pub fn random_toast() -> &'static str {
    TOASTS.choose(&mut rand::thread_rng()).copied().unwrap_or(TOASTS[0])
}
