//! Random room code generation

use pickflick_application::RoomCodeGenerator;
use pickflick_domain::{ROOM_CODE_ALPHABET, ROOM_CODE_LEN, RoomCode};
use rand::Rng;

/// Draws every character of a room code uniformly from [`ROOM_CODE_ALPHABET`]
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomRoomCodes;

impl RoomCodeGenerator for RandomRoomCodes {
    fn generate(&self) -> RoomCode {
        let mut rng = rand::thread_rng();
        let indices: [usize; ROOM_CODE_LEN] =
            std::array::from_fn(|_| rng.gen_range(0..ROOM_CODE_ALPHABET.len()));
        RoomCode::from_alphabet_indices(indices)
    }
}
