//! `sprintboard` (sb) - Sprint board issue tracker
//!
//! Issues, users and sprints live in memory for one invocation, seeded
//! with a sample board or hydrated from a tickets document.

use sprintboard::run;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
