pub const FULL: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "+git.",
    env!("TASKLANE_GIT_COUNT"),
    ".",
    env!("TASKLANE_GIT_SHA"),
    env!("TASKLANE_GIT_DIRTY")
);

#[cfg(test)]
mod tests {
    use super::FULL;

    #[test]
    fn version_starts_with_the_package_version() {
        assert!(FULL.starts_with(env!("CARGO_PKG_VERSION")));
    }
}
