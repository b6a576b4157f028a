//! Size limits and fixed tables shared by the generator, loader and player.

/// Number of rooms in every generated graph
pub const NUM_ROOMS: usize = 7;

/// Size of the candidate name pool the generator draws from
pub const NUM_CANDIDATE_ROOMS: usize = 10;

/// Minimum outgoing connections per room in a full graph
pub const MIN_CONNECTIONS: usize = 3;

/// Maximum outgoing connections per room
pub const MAX_CONNECTIONS: usize = 6;

/// Longest allowed room name, in bytes
pub const MAX_ROOM_NAME_LEN: usize = 31;

/// Candidate room names. The mansion is a murder-mystery house.
pub const CANDIDATE_ROOMS: [&str; NUM_CANDIDATE_ROOMS] = [
    "Conservatory",
    "Lounge",
    "Kitchen",
    "Library",
    "Hall",
    "Study",
    "Ballroom",
    "DiningRoom",
    "BilliardRoom",
    "Courtyard",
];

/// Default prefix for generated room directories (`<prefix><pid>`)
pub const DEFAULT_DIR_PREFIX: &str = "mansion.rooms.";

/// Default location of the timestamp file written by the time worker
pub const DEFAULT_TIME_FILE: &str = "currentTime.txt";

/// Command word that asks for the current time
pub const DEFAULT_TIME_COMMAND: &str = "time";

/// Trailing characters stripped from player input before matching
pub const DEFAULT_TRIM_CHARS: &str = " \t\r\n,.";
