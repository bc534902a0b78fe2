//! Sites, file names and tuning constants

use chrono::NaiveDate;
use std::time::Duration;

/// Archive of scraped puzzles
pub const ARCHIVE_FILE: &str = "bees.xml";

/// Public, jumbled copy of the archive
pub const JUMBLED_FILE: &str = "jumbledbees.xml";

/// Landing page uploaded next to the jumbled archive
pub const INDEX_FILE: &str = "index.htm";

/// Root element of both archive documents
pub const ROOT_TAG: &str = "spelling_bees";

/// sbsolver puzzle pages, addressed by numeric id
pub const SBSOLVER_BASE_URL: &str = "https://www.sbsolver.com/s/";

/// NYT puzzle page; today's puzzle at the root, past puzzles at `/<YYYY-MM-DD>`
pub const NYT_URL: &str = "https://www.nytimes.com/puzzles/spelling-bee";

/// Where a jumbled puzzle can be played, keyed by `puzzleid`
pub const PLAY_URL: &str = "https://tii.ezv.temporary.site/beejumble";

/// Where rendered puzzle pages are served from
pub const ARCHIVE_PAGE_URL: &str = "https://tii.ezv.temporary.site/beejumble/archive/";

/// Ending of every rendered page's file name, after the `YYYYMMDD` date
pub const PAGE_FILE_SUFFIX: &str = "BEEJUMBLE.html";

/// Remote directory rendered pages are published to; [`ARCHIVE_PAGE_URL`] serves it
pub const REMOTE_PAGE_DIR: &str = "archive";

/// Known sbsolver id and the date it was published; ids advance one per day
pub const SBSOLVER_REFERENCE_ID: i64 = 2520;

/// Date of [`SBSOLVER_REFERENCE_ID`]
pub const SBSOLVER_REFERENCE_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2025, 4, 1) {
    Some(date) => date,
    None => panic!("invalid reference date"),
};

/// Default size of the fetch worker pool
pub const DEFAULT_WORKERS: usize = 10;

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// How many past days `harvest` walks back by default (today included)
pub const DEFAULT_HARVEST_DAYS: u32 = 10;

/// Shuffle attempts before a scramble falls back to reversal
pub const SCRAMBLE_ATTEMPTS: usize = 10;

/// Sent with every request; NYT rejects clients without one
pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; bee_jumble/1.0)";

/// Default FTP control port
pub const DEFAULT_FTP_PORT: u16 = 21;
