pub const FULL: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "+git.",
    env!("TASKLANE_GIT_COUNT"),
    ".",
    env!("TASKLANE_GIT_SHA"),
    env!("TASKLANE_GIT_DIRTY")
);
