//! Scripted lines played by the shutdown view, varied by how often the desktop has been shut down.

use crate::model::INITIAL_SHUTDOWN_COUNT;

const SCRIPTS: [&[&str]; 4] = [
    &[
        "Saving your settings...",
        "Closing all programs...",
        "It is now safe to turn off your computer.",
    ],
    &[
        "Back so soon?",
        "Closing all programs... again.",
        "It is still safe to turn off your computer.",
    ],
    &[
        "Shutting down for the third time.",
        "The portfolio is not going anywhere, you know.",
        "Fine. It is safe to turn off your computer.",
    ],
    &[
        "Shutdown acknowledged.",
        "Counting shutdowns is no longer a priority.",
        "Press Restart whenever you are ready.",
    ],
];

/// Lines for the shutdown that produced `shutdown_count`.
///
/// The first shutdown moves the counter from 1 to 2 and plays the first script. Counts past the
/// last script keep replaying it.
pub fn shutdown_script(shutdown_count: u32) -> &'static [&'static str] {
    let cycle = shutdown_count.saturating_sub(INITIAL_SHUTDOWN_COUNT + 1) as usize;
    SCRIPTS[cycle.min(SCRIPTS.len() - 1)]
}
