// src/config/consts.rs

// Net config
pub const BASE_URL: &str = "https://j-archive.com/showgame.php?game_id=";
pub const USER_AGENT: &str = concat!("jarchive_scrape/", env!("CARGO_PKG_VERSION"));
pub const REQUEST_TIMEOUT_SECS: u64 = 20;

// Board values: per-row step for each regular round.
pub const FIRST_ROUND_STEP: i64 = 200;
pub const SECOND_ROUND_STEP: i64 = 400;
// Values doubled on this air date; earlier boards use half the step.
pub const VALUES_DOUBLED_ON: (i32, u32, u32) = (2001, 11, 26);

// Board shape
pub const BOARD_COLUMNS: usize = 6;
pub const BOARD_ROWS: usize = 5;

// Transcript markers
pub const TRIPLE_STUMPER: &str = "Triple Stumper";

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_FILE_STEM: &str = "episode";
